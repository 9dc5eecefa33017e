use num_bigint::BigInt;
use thiserror::Error;

use crate::check::RangeTest;

/// A violated interface contract.
///
/// Every variant carries the diagnostic name of the offending port so test
/// output can localize it. The first violated condition aborts the check
/// that produced it; there is no accumulation across rules.
#[derive(Error, Debug)]
pub enum CheckError {
    #[error("port `{port}` should be a signal")]
    NotASignal { port: String },

    #[error("port `{port}` should carry {expected}, found {found}")]
    WrongValueKind {
        port: String,
        expected: &'static str,
        found: &'static str,
    },

    #[error("port `{port}` should be {expected} bits wide, found {found}")]
    WrongBitWidth {
        port: String,
        expected: usize,
        found: usize,
    },

    #[error("port `{port}` should be {}", sign_word(.expected_signed))]
    WrongSignedness { port: String, expected_signed: bool },

    #[error("{}", range_violation_msg(.port, .test, .lo, .hi))]
    RangeViolation {
        port: String,
        test: RangeTest,
        lo: BigInt,
        hi: BigInt,
        min: BigInt,
        max: BigInt,
    },

    #[error("`range_test` should be one of `inside`, `outside` or `exact`{}", rejected_mode(.found))]
    InvalidRangeTest { found: Option<String> },

    #[error(
        "port `{port}` should use the full range available given the bit width: \
         declared ({min}, {max}), expected ({expected_min}, {expected_max})"
    )]
    NonFullRange {
        port: String,
        min: BigInt,
        max: BigInt,
        expected_min: BigInt,
        expected_max: BigInt,
    },

    /// Caller defect, not a normal validation failure: the port under check
    /// was handed over in a state the checks assume cannot occur.
    #[error("port `{port}`: {reason}")]
    Precondition { port: String, reason: &'static str },
}

fn sign_word(expected_signed: &bool) -> &'static str {
    if *expected_signed { "signed" } else { "unsigned" }
}

fn rejected_mode(found: &Option<String>) -> String {
    match found {
        Some(mode) => format!(", got `{mode}`"),
        None => String::new(),
    }
}

fn range_violation_msg(port: &str, test: &RangeTest, lo: &BigInt, hi: &BigInt) -> String {
    let (lo_op, hi_op) = match test {
        RangeTest::Inside => (">=", "<="),
        RangeTest::Outside => ("<=", ">="),
        RangeTest::Exact => ("==", "=="),
    };
    format!("port `{port}`.min should be {lo_op} {lo} and port `{port}`.max should be {hi_op} {hi}")
}
