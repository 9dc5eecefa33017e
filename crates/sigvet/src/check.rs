use std::any::Any;
use std::str::FromStr;

use num_bigint::BigInt;
use num_traits::Signed;
use serde::Deserialize;

use crate::error::CheckError;
use crate::signal::{Signal, SignalValue};
use crate::value::{BoundedIntView, full_range};

/// How declared bounds are compared against a requested value range.
///
/// The conversion from an external string selector lives in [`FromStr`];
/// everything past that boundary works on the closed variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RangeTest {
    /// Declared bounds must lie within the requested range:
    /// `min >= lo` and `max <= hi`.
    Inside,
    /// Declared bounds must cover the requested range:
    /// `min <= lo` and `max >= hi`.
    Outside,
    /// Declared bounds must equal the requested range.
    Exact,
}

impl FromStr for RangeTest {
    type Err = CheckError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "inside" => Ok(RangeTest::Inside),
            "outside" => Ok(RangeTest::Outside),
            "exact" => Ok(RangeTest::Exact),
            other => Err(CheckError::InvalidRangeTest {
                found: Some(other.to_owned()),
            }),
        }
    }
}

/// Optional constraints for [`check_intbv_signal`].
///
/// Unset fields are not checked; the full-range invariant is enforced
/// regardless of what is set here.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IntbvCheck {
    pub bit_width: Option<usize>,
    pub signed: Option<bool>,
    pub val_range: Option<(BigInt, BigInt)>,
    pub range_test: Option<RangeTest>,
}

impl IntbvCheck {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn bit_width(mut self, width: usize) -> Self {
        self.bit_width = Some(width);
        self
    }

    pub fn signed(mut self, signed: bool) -> Self {
        self.signed = Some(signed);
        self
    }

    pub fn val_range(mut self, lo: impl Into<BigInt>, hi: impl Into<BigInt>) -> Self {
        self.val_range = Some((lo.into(), hi.into()));
        self
    }

    pub fn range_test(mut self, test: RangeTest) -> Self {
        self.range_test = Some(test);
        self
    }
}

fn as_signal<'a>(port: &'a dyn Any, name: &str) -> Result<&'a Signal, CheckError> {
    port.downcast_ref::<Signal>()
        .ok_or_else(|| CheckError::NotASignal {
            port: name.to_owned(),
        })
}

/// Check that `port` is a signal usable as a boolean: it must hold either a
/// boolean or a fixed-width integer of exactly one bit.
pub fn check_bool_signal(port: &dyn Any, name: &str) -> Result<(), CheckError> {
    let signal = as_signal(port, name)?;
    match signal.value() {
        SignalValue::Bool(_) => Ok(()),
        SignalValue::IntBv(bv) if bv.bit_width() == 1 => Ok(()),
        SignalValue::IntBv(bv) => Err(CheckError::WrongBitWidth {
            port: name.to_owned(),
            expected: 1,
            found: bv.bit_width(),
        }),
        other => Err(CheckError::WrongValueKind {
            port: name.to_owned(),
            expected: "a boolean or a single-bit fixed-width integer",
            found: other.kind_name(),
        }),
    }
}

/// Check that `port` is a fixed-width integer signal satisfying `check`.
///
/// The optional constraints are checked in order (bit width, signedness,
/// value range) and the first violated one aborts the call. Independently of
/// them, the declared bounds must exactly fill the bit width given the sign
/// class inferred from `min < 0`: bounds narrower than that have no effect
/// once the design is lowered to hardware, so relying on them is an
/// interface defect even when every requested constraint holds.
pub fn check_intbv_signal(
    port: &dyn Any,
    name: &str,
    check: &IntbvCheck,
) -> Result<(), CheckError> {
    let signal = as_signal(port, name)?;
    match signal.value() {
        SignalValue::IntBv(bv) => check_intbv_view(bv, name, check),
        other => Err(CheckError::WrongValueKind {
            port: name.to_owned(),
            expected: "a fixed-width integer",
            found: other.kind_name(),
        }),
    }
}

/// Trait-level entry for [`check_intbv_signal`]: validates any
/// [`BoundedIntView`] implementation without going through the signal
/// downcast boundary.
pub fn check_intbv_view(
    view: &dyn BoundedIntView,
    name: &str,
    check: &IntbvCheck,
) -> Result<(), CheckError> {
    // Values can be created without declared bounds. The checks exist to
    // prove a signal is convertible to hardware, so unset bounds are a
    // defect in the caller, not a checkable state.
    let (min, max) = match (view.min(), view.max()) {
        (Some(min), Some(max)) => (min, max),
        _ => {
            return Err(CheckError::Precondition {
                port: name.to_owned(),
                reason: "declared bounds must be set",
            });
        }
    };
    let width = view.bit_width();
    if width == 0 {
        return Err(CheckError::Precondition {
            port: name.to_owned(),
            reason: "bit width must be positive",
        });
    }

    if let Some(expected) = check.bit_width
        && width != expected
    {
        return Err(CheckError::WrongBitWidth {
            port: name.to_owned(),
            expected,
            found: width,
        });
    }

    let signed = min.is_negative();
    if let Some(expected_signed) = check.signed
        && expected_signed != signed
    {
        return Err(CheckError::WrongSignedness {
            port: name.to_owned(),
            expected_signed,
        });
    }

    if let Some((lo, hi)) = &check.val_range {
        let Some(test) = check.range_test else {
            return Err(CheckError::InvalidRangeTest { found: None });
        };
        let holds = match test {
            RangeTest::Inside => min >= lo && max <= hi,
            RangeTest::Outside => min <= lo && max >= hi,
            RangeTest::Exact => min == lo && max == hi,
        };
        if !holds {
            return Err(CheckError::RangeViolation {
                port: name.to_owned(),
                test,
                lo: lo.clone(),
                hi: hi.clone(),
                min: min.clone(),
                max: max.clone(),
            });
        }
    }

    // Declared bounds clip values in simulation only; after lowering, the
    // bit width is all that remains. Enforced last so a more specific
    // diagnostic wins when one of the requested constraints also fails.
    let (expected_min, expected_max) = full_range(width, signed);
    if *min != expected_min || *max != expected_max {
        return Err(CheckError::NonFullRange {
            port: name.to_owned(),
            min: min.clone(),
            max: max.clone(),
            expected_min,
            expected_max,
        });
    }

    Ok(())
}
