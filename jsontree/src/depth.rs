// SPDX-License-Identifier: Apache-2.0

use crate::parse_error::ParseError;

/// Nesting ceiling used when the parser is not given one explicitly, unless
/// the counter type tops out lower.
pub const DEFAULT_MAX_DEPTH: usize = 1024;

/// Trait for depth counters - tracks how deeply arrays and objects are nested.
///
/// The counter type caps nesting on its own: a `u8` counter can never describe
/// more than 255 open containers. Wider counters are still held to
/// [`DEFAULT_MAX_DEPTH`] unless the parser is told otherwise. Implemented for
/// all unsigned integer types.
pub trait DepthCounter: core::fmt::Debug + Copy + PartialOrd {
    /// Create a zero depth value
    fn zero() -> Self;

    /// The deepest nesting this counter type can represent
    fn max_value() -> Self;

    /// Converts `value`, clamping to [`DepthCounter::max_value`] when it does not fit
    fn from_usize_saturating(value: usize) -> Self;

    /// Increment depth, returning (new_value, overflow_occurred)
    fn increment(self) -> (Self, bool);

    /// Decrement depth, returning (new_value, underflow_occurred)
    fn decrement(self) -> (Self, bool);

    /// Check if depth is zero
    fn is_zero(self) -> bool;
}

macro_rules! impl_depth_counter {
    ($($t:ty),*) => {
        $(
            impl DepthCounter for $t {
                #[inline]
                fn zero() -> Self { 0 }

                #[inline]
                fn max_value() -> Self { <$t>::MAX }

                #[inline]
                fn from_usize_saturating(value: usize) -> Self {
                    <$t>::try_from(value).unwrap_or(<$t>::MAX)
                }

                #[inline]
                fn increment(self) -> (Self, bool) { self.overflowing_add(1) }

                #[inline]
                fn decrement(self) -> (Self, bool) { self.overflowing_sub(1) }

                #[inline]
                fn is_zero(self) -> bool { self == 0 }
            }
        )*
    };
}

impl_depth_counter!(u8, u16, u32, u64, usize);

/// Current nesting depth plus the ceiling it may not exceed.
#[derive(Debug, Clone)]
pub(crate) struct NestingDepth<D> {
    depth: D,
    limit: D,
}

impl<D: DepthCounter> NestingDepth<D> {
    /// [`DEFAULT_MAX_DEPTH`], or the counter's maximum if that is smaller.
    pub fn with_default_limit() -> Self {
        Self::new(D::from_usize_saturating(DEFAULT_MAX_DEPTH))
    }

    pub fn new(limit: D) -> Self {
        Self {
            depth: D::zero(),
            limit,
        }
    }

    pub fn current(&self) -> D {
        self.depth
    }

    pub fn limit(&self) -> D {
        self.limit
    }

    /// Called when an array or object opens.
    pub fn enter(&mut self) -> Result<(), ParseError> {
        let (new_depth, overflow) = self.depth.increment();
        if overflow || new_depth > self.limit {
            return Err(ParseError::DepthLimitExceeded);
        }
        self.depth = new_depth;
        Ok(())
    }

    /// Called when an array or object is finished, closed or not.
    pub fn exit(&mut self) {
        if self.depth.is_zero() {
            return;
        }
        let (new_depth, _underflow) = self.depth.decrement();
        self.depth = new_depth;
    }
}
