use num_bigint::BigInt;
use num_traits::{One, Signed, Zero};

/// A fixed-width integer value: an integer constrained to a declared number
/// of bits with declared inclusive-lower/exclusive-upper bounds.
///
/// The bounds are declared, not derived: they may span less than the
/// representable domain of the bit width, which is exactly the situation
/// [`check_intbv_signal`](crate::check_intbv_signal) exists to reject.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IntBv {
    value: BigInt,
    width: usize,
    bounds: Option<(BigInt, BigInt)>,
}

impl IntBv {
    /// A full-range unsigned value of `width` bits, initialized to zero.
    pub fn unsigned(width: usize) -> Self {
        assert!(width > 0, "bit width must be positive");
        let (min, max) = full_range(width, false);
        Self {
            value: BigInt::zero(),
            width,
            bounds: Some((min, max)),
        }
    }

    /// A full-range signed value of `width` bits, initialized to zero.
    pub fn signed(width: usize) -> Self {
        assert!(width > 0, "bit width must be positive");
        let (min, max) = full_range(width, true);
        Self {
            value: BigInt::zero(),
            width,
            bounds: Some((min, max)),
        }
    }

    /// A value with explicitly declared bounds `min..max`.
    ///
    /// The bit width is the smallest width whose representable domain, given
    /// the sign class inferred from `min < 0`, covers the bounds.
    pub fn with_bounds(
        value: impl Into<BigInt>,
        min: impl Into<BigInt>,
        max: impl Into<BigInt>,
    ) -> Self {
        let value = value.into();
        let min = min.into();
        let max = max.into();
        assert!(min < max, "declared bounds must satisfy min < max");
        assert!(
            min <= value && value < max,
            "initial value must lie within the declared bounds"
        );
        let width = width_for_bounds(&min, &max);
        Self {
            value,
            width,
            bounds: Some((min, max)),
        }
    }

    /// A value with no declared bounds and no meaningful width.
    ///
    /// Such a value cannot pass validation; it exists so callers that forgot
    /// to declare bounds are reported as a precondition violation instead of
    /// silently passing.
    pub fn unconstrained(value: impl Into<BigInt>) -> Self {
        Self {
            value: value.into(),
            width: 0,
            bounds: None,
        }
    }

    pub fn value(&self) -> &BigInt {
        &self.value
    }

    pub fn bit_width(&self) -> usize {
        self.width
    }

    pub fn bounds(&self) -> Option<(&BigInt, &BigInt)> {
        self.bounds.as_ref().map(|(min, max)| (min, max))
    }

    pub fn min(&self) -> Option<&BigInt> {
        self.bounds.as_ref().map(|(min, _)| min)
    }

    pub fn max(&self) -> Option<&BigInt> {
        self.bounds.as_ref().map(|(_, max)| max)
    }

    /// The sign class inferred from the declared minimum, or `None` when no
    /// bounds were declared.
    pub fn is_signed(&self) -> Option<bool> {
        self.min().map(|min| min.is_negative())
    }

    /// Replace the held value. The declared bounds and width are fixed at
    /// construction and never change.
    pub fn set(&mut self, value: impl Into<BigInt>) {
        let value = value.into();
        if let Some((min, max)) = &self.bounds {
            assert!(
                *min <= value && value < *max,
                "value must lie within the declared bounds"
            );
        }
        self.value = value;
    }
}

/// Read-only view of a bounded integer: the attributes an interface check is
/// allowed to inspect. Any concrete signal/value representation can satisfy
/// this to become checkable.
pub trait BoundedIntView {
    fn value(&self) -> &BigInt;
    fn bit_width(&self) -> usize;
    fn min(&self) -> Option<&BigInt>;
    fn max(&self) -> Option<&BigInt>;
}

impl BoundedIntView for IntBv {
    fn value(&self) -> &BigInt {
        self.value()
    }

    fn bit_width(&self) -> usize {
        self.bit_width()
    }

    fn min(&self) -> Option<&BigInt> {
        self.min()
    }

    fn max(&self) -> Option<&BigInt> {
        self.max()
    }
}

/// The bounds that exactly span the representable domain of `width` bits:
/// `(0, 2^width)` unsigned, `(-2^(width-1), 2^(width-1))` signed.
pub(crate) fn full_range(width: usize, signed: bool) -> (BigInt, BigInt) {
    assert!(width > 0, "bit width must be positive");
    if signed {
        let half = BigInt::one() << (width - 1);
        (-&half, half)
    } else {
        (BigInt::zero(), BigInt::one() << width)
    }
}

/// Smallest number of bits `k` with `2^k >= n`. Zero for `n <= 1`.
fn bits_for(n: &BigInt) -> usize {
    if *n <= BigInt::one() {
        0
    } else {
        (n - BigInt::one()).bits() as usize
    }
}

fn width_for_bounds(min: &BigInt, max: &BigInt) -> usize {
    if min.is_negative() {
        // Two's complement: one sign bit plus enough magnitude bits to reach
        // both -min and max.
        1 + bits_for(&-min).max(bits_for(max))
    } else {
        bits_for(max).max(1)
    }
}
