use std::any::Any;

use crate::check::{self, IntbvCheck};
use crate::error::CheckError;

/// The two interface-check operations as a trait, so design code can take
/// `&mut dyn InterfaceChecker` and tests can interpose a recorder without
/// the design changing.
pub trait InterfaceChecker {
    fn check_bool_signal(&mut self, port: &dyn Any, name: &str) -> Result<(), CheckError>;

    fn check_intbv_signal(
        &mut self,
        port: &dyn Any,
        name: &str,
        check: &IntbvCheck,
    ) -> Result<(), CheckError>;
}

/// The canonical checker: delegates straight to the free functions.
#[derive(Debug, Clone, Copy, Default)]
pub struct Checks;

impl InterfaceChecker for Checks {
    fn check_bool_signal(&mut self, port: &dyn Any, name: &str) -> Result<(), CheckError> {
        check::check_bool_signal(port, name)
    }

    fn check_intbv_signal(
        &mut self,
        port: &dyn Any,
        name: &str,
        check: &IntbvCheck,
    ) -> Result<(), CheckError> {
        check::check_intbv_signal(port, name, check)
    }
}

/// Which operation a recorded call went through.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckKind {
    Bool,
    Intbv,
}

/// Object identity of a port, captured at call time. Two ports compare equal
/// only when they are the same object, never by value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PortId(*const ());

impl PortId {
    pub fn of(port: &dyn Any) -> Self {
        PortId(port as *const dyn Any as *const ())
    }
}

/// One recorded invocation of an interface-check operation.
#[derive(Debug, Clone, PartialEq)]
pub struct CheckCall {
    pub kind: CheckKind,
    pub port: PortId,
    pub name: String,
    /// The constraints passed to the integer check; `None` for the boolean
    /// check, which takes none.
    pub check: Option<IntbvCheck>,
}

/// Wraps another checker and records every invocation before delegating.
///
/// Lets a test assert that a design under test validated the expected port
/// with the expected parameters, matching the port by identity.
#[derive(Debug, Default)]
pub struct RecordingChecker<C = Checks> {
    inner: C,
    calls: Vec<CheckCall>,
}

impl RecordingChecker {
    pub fn new() -> Self {
        Self::default()
    }
}

impl<C: InterfaceChecker> RecordingChecker<C> {
    pub fn wrap(inner: C) -> Self {
        Self {
            inner,
            calls: Vec::new(),
        }
    }

    pub fn calls(&self) -> &[CheckCall] {
        &self.calls
    }

    /// Was `check_bool_signal` invoked with exactly this port object and
    /// name?
    pub fn bool_signal_checked(&self, port: &dyn Any, name: &str) -> bool {
        let id = PortId::of(port);
        self.calls
            .iter()
            .any(|call| call.kind == CheckKind::Bool && call.port == id && call.name == name)
    }

    /// Was `check_intbv_signal` invoked with exactly this port object, name,
    /// and constraints?
    pub fn intbv_signal_checked(&self, port: &dyn Any, name: &str, check: &IntbvCheck) -> bool {
        let id = PortId::of(port);
        self.calls.iter().any(|call| {
            call.kind == CheckKind::Intbv
                && call.port == id
                && call.name == name
                && call.check.as_ref() == Some(check)
        })
    }
}

impl<C: InterfaceChecker> InterfaceChecker for RecordingChecker<C> {
    fn check_bool_signal(&mut self, port: &dyn Any, name: &str) -> Result<(), CheckError> {
        self.calls.push(CheckCall {
            kind: CheckKind::Bool,
            port: PortId::of(port),
            name: name.to_owned(),
            check: None,
        });
        self.inner.check_bool_signal(port, name)
    }

    fn check_intbv_signal(
        &mut self,
        port: &dyn Any,
        name: &str,
        check: &IntbvCheck,
    ) -> Result<(), CheckError> {
        self.calls.push(CheckCall {
            kind: CheckKind::Intbv,
            port: PortId::of(port),
            name: name.to_owned(),
            check: Some(check.clone()),
        });
        self.inner.check_intbv_signal(port, name, check)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::signal::Signal;
    use crate::value::IntBv;

    // Stand-in for a design that validates its interface on construction.
    fn dut(
        checker: &mut dyn InterfaceChecker,
        enable: &Signal,
        data: &Signal,
    ) -> Result<(), CheckError> {
        checker.check_bool_signal(enable, "enable")?;
        checker.check_intbv_signal(data, "data", &IntbvCheck::new().bit_width(4).signed(false))
    }

    #[test]
    fn test_records_calls_with_port_identity() {
        let enable = Signal::of_bool(false);
        let data = Signal::of_intbv(IntBv::unsigned(4));

        let mut recorder = RecordingChecker::new();
        dut(&mut recorder, &enable, &data).unwrap();

        assert_eq!(recorder.calls().len(), 2);
        assert!(recorder.bool_signal_checked(&enable, "enable"));
        assert!(recorder.intbv_signal_checked(
            &data,
            "data",
            &IntbvCheck::new().bit_width(4).signed(false),
        ));
    }

    #[test]
    fn test_identity_not_value_equality() {
        let enable = Signal::of_bool(false);
        let impostor = enable.clone();
        let data = Signal::of_intbv(IntBv::unsigned(4));

        let mut recorder = RecordingChecker::new();
        dut(&mut recorder, &enable, &data).unwrap();

        assert!(!recorder.bool_signal_checked(&impostor, "enable"));
    }

    #[test]
    fn test_mismatched_parameters_do_not_match() {
        let enable = Signal::of_bool(false);
        let data = Signal::of_intbv(IntBv::unsigned(4));

        let mut recorder = RecordingChecker::new();
        dut(&mut recorder, &enable, &data).unwrap();

        assert!(!recorder.intbv_signal_checked(
            &data,
            "data",
            &IntbvCheck::new().bit_width(4).signed(true),
        ));
        assert!(!recorder.intbv_signal_checked(&data, "other_name", &IntbvCheck::new()));
    }

    #[test]
    fn test_failures_propagate_through_the_recorder() {
        let enable = Signal::of_int(0);
        let data = Signal::of_intbv(IntBv::unsigned(4));

        let mut recorder = RecordingChecker::new();
        let err = dut(&mut recorder, &enable, &data).unwrap_err();
        assert!(matches!(err, CheckError::WrongValueKind { .. }));

        // The failing call was still recorded.
        assert!(recorder.bool_signal_checked(&enable, "enable"));
    }
}
