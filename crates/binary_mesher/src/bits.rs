//! Set-bit iteration over column words.

/// Iterator over the positions of set bits in a `u64`, lowest first.
///
/// Each position is cleared from the internal copy as it is yielded, so the
/// sequence is finite and cannot be restarted.
#[derive(Clone, Copy, Debug)]
pub struct SetBits(u64);

impl SetBits {
    #[inline]
    pub fn new(word: u64) -> Self {
        Self(word)
    }
}

impl Iterator for SetBits {
    type Item = usize;

    #[inline]
    fn next(&mut self) -> Option<usize> {
        if self.0 == 0 {
            return None;
        }
        let bit = self.0.trailing_zeros() as usize;
        // Clear lowest set bit
        self.0 &= self.0 - 1;
        Some(bit)
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        let n = self.0.count_ones() as usize;
        (n, Some(n))
    }
}

impl ExactSizeIterator for SetBits {}
