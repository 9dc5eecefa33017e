use num_bigint::BigInt;

use crate::value::IntBv;

/// What a signal currently holds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SignalValue {
    Bool(bool),
    /// A fixed-width integer with declared bounds.
    IntBv(IntBv),
    /// A plain integer with no declared width or bounds. Interface checks
    /// reject it; it exists because design code can create such signals.
    Int(BigInt),
}

impl SignalValue {
    pub(crate) fn kind_name(&self) -> &'static str {
        match self {
            SignalValue::Bool(_) => "a boolean",
            SignalValue::IntBv(_) => "a fixed-width integer",
            SignalValue::Int(_) => "a plain integer",
        }
    }
}

/// A mutable value cell representing one wire or register of a design
/// interface.
///
/// Signals are created and owned by design/testbench code. Interface checks
/// only ever read them, so sharing a signal between concurrent checks is
/// fine; writes go through [`Signal::set`] on the owning side.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Signal {
    value: SignalValue,
}

impl Signal {
    pub fn new(value: SignalValue) -> Self {
        Self { value }
    }

    pub fn of_bool(value: bool) -> Self {
        Self::new(SignalValue::Bool(value))
    }

    pub fn of_intbv(value: IntBv) -> Self {
        Self::new(SignalValue::IntBv(value))
    }

    pub fn of_int(value: impl Into<BigInt>) -> Self {
        Self::new(SignalValue::Int(value.into()))
    }

    pub fn value(&self) -> &SignalValue {
        &self.value
    }

    pub fn set(&mut self, value: SignalValue) {
        self.value = value;
    }
}
