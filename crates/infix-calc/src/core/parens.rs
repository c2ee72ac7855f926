//! Parenthesis pair map

use crate::core::{CalcError, CalcResult};

/// Matching `(`/`)` byte offsets for one expression, ordered by opening offset
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParenPairs {
    pairs: Vec<(usize, usize)>,
    max_depth: usize,
}

impl ParenPairs {
    /// Pairs every `(` with its `)` using a stack.
    ///
    /// A `)` with nothing open, or a `(` left open at the end, is
    /// [`CalcError::MismatchedParentheses`].
    pub fn scan(expr: &str) -> CalcResult<Self> {
        let mut stack = Vec::new();
        let mut pairs = Vec::new();
        let mut max_depth = 0;

        for (i, ch) in expr.char_indices() {
            match ch {
                '(' => {
                    stack.push(i);
                    max_depth = max_depth.max(stack.len());
                }
                ')' => {
                    let open = stack.pop().ok_or(CalcError::MismatchedParentheses)?;
                    pairs.push((open, i));
                }
                _ => {}
            }
        }

        if !stack.is_empty() {
            return Err(CalcError::MismatchedParentheses);
        }

        pairs.sort_unstable();
        Ok(Self { pairs, max_depth })
    }

    /// Deepest nesting level seen during the scan
    #[must_use]
    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    /// All pairs ordered by opening offset
    pub fn iter(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.pairs.iter().copied()
    }

    /// First pair that encloses no other pair.
    ///
    /// Disjoint innermost groups are returned leftmost first.
    #[must_use]
    pub fn innermost(&self) -> Option<(usize, usize)> {
        self.iter()
            .find(|&(s, e)| !self.iter().any(|(s2, e2)| s < s2 && e2 < e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scan_no_parens() {
        let pairs = ParenPairs::scan("1+2").unwrap();
        assert_eq!(pairs.iter().count(), 0);
        assert_eq!(pairs.max_depth(), 0);
    }

    #[test]
    fn test_scan_simple_pair() {
        let pairs = ParenPairs::scan("(2+3)*4").unwrap();
        assert_eq!(pairs.iter().collect::<Vec<_>>(), vec![(0, 4)]);
    }

    #[test]
    fn test_scan_nested_depth() {
        let pairs = ParenPairs::scan("((1+(2*3))-4)").unwrap();
        assert_eq!(pairs.max_depth(), 3);
        assert_eq!(
            pairs.iter().collect::<Vec<_>>(),
            vec![(0, 12), (1, 9), (4, 8)]
        );
    }

    #[test]
    fn test_scan_unclosed() {
        assert_eq!(
            ParenPairs::scan("(1+2"),
            Err(CalcError::MismatchedParentheses)
        );
    }

    #[test]
    fn test_scan_unopened() {
        assert_eq!(
            ParenPairs::scan("1+2)"),
            Err(CalcError::MismatchedParentheses)
        );
        assert_eq!(
            ParenPairs::scan(")("),
            Err(CalcError::MismatchedParentheses)
        );
    }

    #[test]
    fn test_innermost_nested() {
        let pairs = ParenPairs::scan("((1+(2*3))-4)").unwrap();
        assert_eq!(pairs.innermost(), Some((4, 8)));
    }

    #[test]
    fn test_innermost_disjoint_picks_leftmost() {
        let pairs = ParenPairs::scan("(1+2)*(3+4)").unwrap();
        assert_eq!(pairs.innermost(), Some((0, 4)));
    }

    #[test]
    fn test_innermost_empty() {
        let pairs = ParenPairs::scan("7").unwrap();
        assert_eq!(pairs.innermost(), None);
    }

    #[test]
    fn test_offsets_are_bytes() {
        // `×` is two bytes wide
        let pairs = ParenPairs::scan("×(1)").unwrap();
        assert_eq!(pairs.innermost(), Some((2, 4)));
    }
}
