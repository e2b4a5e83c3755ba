//! Pairwise combination iterators
//!
//! Used by [`crate::HpoSet`] to enumerate term pairs for set statistics.

/// Iterator of all ordered pairs of a sequence, including self-pairs
///
/// For `[1, 2]` it yields `(1,1), (1,2), (2,1), (2,2)`.
pub struct Combinations<T> {
    inner: Vec<T>,
    idx1: usize,
    idx2: usize,
}

impl<T> Combinations<T> {
    pub(crate) fn new(inner: Vec<T>) -> Self {
        Self {
            inner,
            idx1: 0,
            idx2: 0,
        }
    }
}

impl<T: Copy> Iterator for Combinations<T> {
    type Item = (T, T);
    fn next(&mut self) -> Option<Self::Item> {
        if self.idx1 >= self.inner.len() {
            return None;
        }
        let pair = (self.inner[self.idx1], self.inner[self.idx2]);
        self.idx2 += 1;
        if self.idx2 == self.inner.len() {
            self.idx2 = 0;
            self.idx1 += 1;
        }
        Some(pair)
    }
}

/// Iterator of all unordered pairs of a sequence, excluding self-pairs
///
/// For `[1, 2, 3]` it yields `(1,2), (1,3), (2,3)`.
pub struct CombinationsOneWay<T> {
    inner: Vec<T>,
    idx1: usize,
    idx2: usize,
}

impl<T> CombinationsOneWay<T> {
    pub(crate) fn new(inner: Vec<T>) -> Self {
        Self {
            inner,
            idx1: 0,
            idx2: 1,
        }
    }
}

impl<T: Copy> Iterator for CombinationsOneWay<T> {
    type Item = (T, T);
    fn next(&mut self) -> Option<Self::Item> {
        if self.idx2 >= self.inner.len() {
            self.idx1 += 1;
            self.idx2 = self.idx1 + 1;
            if self.idx2 >= self.inner.len() {
                return None;
            }
        }
        let pair = (self.inner[self.idx1], self.inner[self.idx2]);
        self.idx2 += 1;
        Some(pair)
    }
}
