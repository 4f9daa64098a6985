// src/detect/subsets.rs
//! Lexicographic enumeration of fixed-size vertex subsets.

/// Iterates the `k`-subsets of `0..n` in lexicographic order.
///
/// An anchored iterator keeps its first element fixed, which lets callers
/// split the full enumeration by smallest vertex and scan the parts in
/// parallel.
#[derive(Debug, Clone)]
pub struct Subsets {
    end: usize,
    current: Vec<usize>,
    fixed: usize,
    started: bool,
    done: bool,
}

impl Subsets {
    /// All `k`-subsets of `0..n`.
    #[must_use]
    pub fn new(n: usize, k: usize) -> Self {
        Self {
            end: n,
            current: (0..k).collect(),
            fixed: 0,
            started: false,
            done: k > n,
        }
    }

    /// The `k`-subsets of `0..n` whose smallest element is `first`.
    #[must_use]
    pub fn anchored(first: usize, n: usize, k: usize) -> Self {
        Self {
            end: n,
            current: (first..first + k).collect(),
            fixed: 1,
            started: false,
            done: k == 0 || first + k > n,
        }
    }

    #[allow(clippy::indexing_slicing)]
    fn advance(&mut self) -> bool {
        let k = self.current.len();
        let mut i = k;
        while i > self.fixed {
            i -= 1;
            if self.current[i] < self.end - (k - i) {
                self.current[i] += 1;
                for j in (i + 1)..k {
                    self.current[j] = self.current[j - 1] + 1;
                }
                return true;
            }
        }
        false
    }
}

impl Iterator for Subsets {
    type Item = Vec<usize>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        if self.started {
            if !self.advance() {
                self.done = true;
                return None;
            }
        } else {
            self.started = true;
        }
        Some(self.current.clone())
    }
}

/// Number of `k`-subsets of an `n`-set, saturating on overflow.
#[must_use]
pub fn binomial(n: usize, k: usize) -> u128 {
    if k > n {
        return 0;
    }
    let k = k.min(n - k);
    (0..k).fold(1u128, |acc, i| {
        acc.saturating_mul((n - i) as u128) / (i as u128 + 1)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn full_enumeration_matches_binomial() {
        for n in 0..9 {
            for k in 0..=n {
                let count = Subsets::new(n, k).count() as u128;
                assert_eq!(count, binomial(n, k), "C({n},{k})");
            }
        }
    }

    #[test]
    fn lexicographic_order() {
        let all: Vec<_> = Subsets::new(4, 2).collect();
        assert_eq!(
            all,
            vec![
                vec![0, 1],
                vec![0, 2],
                vec![0, 3],
                vec![1, 2],
                vec![1, 3],
                vec![2, 3]
            ]
        );
    }

    #[test]
    fn anchored_parts_partition_the_whole() {
        let (n, k) = (7, 3);
        let parts: Vec<Vec<usize>> = (0..n).flat_map(|first| Subsets::anchored(first, n, k)).collect();
        let whole: Vec<Vec<usize>> = Subsets::new(n, k).collect();
        assert_eq!(parts, whole);
    }

    #[test]
    fn oversized_subsets_are_empty() {
        assert_eq!(Subsets::new(3, 5).count(), 0);
        assert_eq!(Subsets::anchored(2, 4, 3).count(), 0);
    }
}
