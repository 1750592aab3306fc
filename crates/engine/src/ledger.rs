//! Error ledger — suppresses repeated operator notifications per error kind.
//!
//! Once a failure of some kind has been reported to the chat, further failures
//! of that kind in the same run are only logged. A kind is recorded only after
//! its report was actually delivered, so a delivery glitch does not silence
//! the kind for the rest of the run.
//!
//! State is held in-memory and resets on restart.

use std::collections::HashSet;

use reviewbot_common::error::ErrorKind;

/// In-memory set of error kinds already reported during this run.
#[derive(Debug, Default)]
pub struct ErrorLedger {
    reported: HashSet<ErrorKind>,
}

impl ErrorLedger {
    pub fn new() -> Self {
        Self {
            reported: HashSet::new(),
        }
    }

    /// Whether a failure of this kind should be reported to the operator.
    pub fn should_report(&self, kind: ErrorKind) -> bool {
        !self.reported.contains(&kind)
    }

    /// Record a delivered report. Kinds are never removed within a run.
    pub fn mark_reported(&mut self, kind: ErrorKind) {
        if self.reported.insert(kind) {
            tracing::debug!(kind = %kind, "Error kind reported, further repeats suppressed");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_kind_is_reported() {
        let ledger = ErrorLedger::new();
        assert!(ledger.should_report(ErrorKind::EndpointUnavailable));
    }

    #[test]
    fn test_marked_kind_is_suppressed() {
        let mut ledger = ErrorLedger::new();
        ledger.mark_reported(ErrorKind::EndpointUnavailable);

        assert!(!ledger.should_report(ErrorKind::EndpointUnavailable));
        assert!(ledger.should_report(ErrorKind::UndocumentedStatus));
    }

    #[test]
    fn test_marking_is_idempotent() {
        let mut ledger = ErrorLedger::new();
        ledger.mark_reported(ErrorKind::MissingField);
        ledger.mark_reported(ErrorKind::MissingField);
        assert!(!ledger.should_report(ErrorKind::MissingField));
        assert!(ledger.should_report(ErrorKind::EmptyResponse));
    }

    #[test]
    fn test_unmarked_kind_stays_reportable() {
        let ledger = ErrorLedger::new();
        // Checking does not record anything on its own
        assert!(ledger.should_report(ErrorKind::EmptyResponse));
        assert!(ledger.should_report(ErrorKind::EmptyResponse));
    }
}
