// Copyright 2019-2022 ChainSafe Systems
// SPDX-License-Identifier: Apache-2.0, MIT

use crate::{ActorError, ExitCode, Serialized};

/// Result of applying one invocation. Exactly one variant holds; the
/// enclosing pipeline turns it into the message receipt.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ExitOutcome {
    /// Method completed and its return data validated against the signature.
    Ok(Serialized),
    /// Recoverable, message-scoped rejection with its canonical exit code.
    Revert { code: ExitCode, msg: String },
    /// Internal invariant violation; the enclosing block-processing attempt
    /// must halt. Never surfaces as a numeric exit code.
    Fault { msg: String },
}

impl ExitOutcome {
    /// Folds a dispatch result into an outcome, keeping the classification
    /// assigned at the error's origin.
    pub fn from_result(res: Result<Serialized, ActorError>) -> Self {
        match res {
            Ok(ret) => ExitOutcome::Ok(ret),
            Err(e) if e.is_fatal() => ExitOutcome::Fault {
                msg: e.msg().to_owned(),
            },
            Err(e) => ExitOutcome::Revert {
                code: e.exit_code(),
                msg: e.msg().to_owned(),
            },
        }
    }

    /// Numeric exit code surfaced to the chain. Faults have none.
    pub fn exit_code(&self) -> Option<ExitCode> {
        match self {
            ExitOutcome::Ok(_) => Some(ExitCode::Ok),
            ExitOutcome::Revert { code, .. } => Some(*code),
            ExitOutcome::Fault { .. } => None,
        }
    }

    pub fn is_ok(&self) -> bool {
        matches!(self, ExitOutcome::Ok(_))
    }

    /// Return data of a successful invocation.
    pub fn return_data(&self) -> Option<&Serialized> {
        match self {
            ExitOutcome::Ok(ret) => Some(ret),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::actor_error;

    #[test]
    fn folds_classification() {
        let ok = ExitOutcome::from_result(Ok(Serialized::default()));
        assert!(ok.is_ok());
        assert_eq!(ok.exit_code(), Some(ExitCode::Ok));

        let revert = ExitOutcome::from_result(Err(actor_error!(ErrForbidden; "no")));
        assert_eq!(revert.exit_code(), Some(ExitCode::ErrForbidden));
        assert!(revert.return_data().is_none());

        let fault = ExitOutcome::from_result(Err(actor_error!(fatal("broken"))));
        assert_eq!(fault.exit_code(), None);
    }
}
