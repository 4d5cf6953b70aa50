//! Stride sampling.
//!
//! An [`Interval`] of `n` keeps the elements at 0-based positions
//! `0, n, 2n, …`. The rule is the same whether the sequence is a list of
//! files or the frames of a video: file passes go through the
//! [`StrideExt::stride`] adapter, the frame extractor asks
//! [`Interval::selects`] for each decoded frame.
//!
//! # Example
//!
//! ```
//! use stridecut::{Interval, StrideExt};
//!
//! let interval = Interval::new(3)?;
//! let picked: Vec<_> = (0..10).stride(interval).map(|(index, _)| index).collect();
//! assert_eq!(picked, vec![0, 3, 6, 9]);
//! # Ok::<(), stridecut::StrideError>(())
//! ```

use std::{
    fmt::{Display, Formatter, Result as FmtResult},
    num::NonZeroU64,
};

use crate::error::StrideError;

/// A validated sampling step, always at least 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Interval(NonZeroU64);

impl Interval {
    /// Keep every element.
    pub const EVERY: Interval = Interval(NonZeroU64::MIN);

    /// Validate a user-supplied interval.
    ///
    /// # Errors
    ///
    /// Returns [`StrideError::InvalidInterval`] if `value <= 0`.
    pub fn new(value: i64) -> Result<Self, StrideError> {
        u64::try_from(value)
            .ok()
            .and_then(NonZeroU64::new)
            .map(Interval)
            .ok_or(StrideError::InvalidInterval(value))
    }

    /// The step size.
    pub fn get(self) -> u64 {
        self.0.get()
    }

    /// Whether the element at `index` is kept.
    pub fn selects(self, index: u64) -> bool {
        index % self.get() == 0
    }

    /// How many elements a sequence of `len` items yields.
    pub fn selected_count(self, len: u64) -> u64 {
        len.div_ceil(self.get())
    }
}

impl TryFrom<i64> for Interval {
    type Error = StrideError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        Interval::new(value)
    }
}

impl From<NonZeroU64> for Interval {
    fn from(value: NonZeroU64) -> Self {
        Interval(value)
    }
}

impl Display for Interval {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "{}", self.0)
    }
}

/// Iterator adapter returned by [`StrideExt::stride`].
///
/// Yields `(index, item)` pairs where `index` is the item's position in the
/// underlying sequence. Skipped items are still pulled from the inner
/// iterator, so a lazy source advances exactly as far as it would unsampled.
#[derive(Debug, Clone)]
#[must_use = "iterators are lazy and do nothing unless consumed"]
pub struct Stride<I> {
    inner: I,
    interval: Interval,
    position: u64,
}

impl<I: Iterator> Iterator for Stride<I> {
    type Item = (u64, I::Item);

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let item = self.inner.next()?;
            let index = self.position;
            self.position += 1;
            if self.interval.selects(index) {
                return Some((index, item));
            }
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let (lower, upper) = self.inner.size_hint();
        let step = self.interval.get();
        let kept = |remaining: usize| -> usize {
            // Elements left before the next selected position.
            let offset = (step - self.position % step) % step;
            (remaining as u64)
                .saturating_sub(offset)
                .div_ceil(step)
                .try_into()
                .unwrap_or(usize::MAX)
        };
        (kept(lower), upper.map(kept))
    }
}

/// Adds [`stride`](StrideExt::stride) to every iterator.
pub trait StrideExt: Iterator + Sized {
    /// Keep the elements at positions `0, n, 2n, …` where `n` is
    /// `interval`, paired with their position.
    fn stride(self, interval: Interval) -> Stride<Self> {
        Stride {
            inner: self,
            interval,
            position: 0,
        }
    }
}

impl<I: Iterator> StrideExt for I {}
