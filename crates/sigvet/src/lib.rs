mod check;
mod error;
mod record;
mod signal;
mod value;

pub use check::{IntbvCheck, RangeTest, check_bool_signal, check_intbv_signal, check_intbv_view};
pub use error::CheckError;
pub use num_bigint::BigInt;
pub use record::{CheckCall, CheckKind, Checks, InterfaceChecker, PortId, RecordingChecker};
pub use signal::{Signal, SignalValue};
pub use value::{BoundedIntView, IntBv};
