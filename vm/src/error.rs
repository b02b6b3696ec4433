// Copyright 2019-2022 ChainSafe Systems
// SPDX-License-Identifier: Apache-2.0, MIT

use thiserror::Error;

use crate::ExitCode;

/// The error type that gets returned by actor method calls. Classification
/// happens at the error's origin and is never changed downstream: fatal
/// errors (faults) abort processing of the enclosing block, non-fatal ones
/// (reverts) unwind only the current invocation.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("ActorError(fatal: {fatal}, exit_code: {exit_code:?}, msg: {msg})")]
pub struct ActorError {
    /// Is this a fatal error.
    fatal: bool,
    /// The exit code for this invocation, must not be `Ok`.
    exit_code: ExitCode,
    /// Message for debugging purposes,
    msg: String,
}

impl ActorError {
    /// Creates a recoverable error carrying its canonical exit code.
    pub fn new(exit_code: ExitCode, msg: String) -> Self {
        Self {
            fatal: false,
            exit_code,
            msg,
        }
    }

    /// Creates a fatal error: an internal invariant violation that no
    /// well-formed on-chain input should be able to trigger.
    pub fn new_fatal(msg: String) -> Self {
        Self {
            fatal: true,
            exit_code: ExitCode::ErrPlaceholder,
            msg,
        }
    }

    pub fn is_fatal(&self) -> bool {
        self.fatal
    }

    /// Returns the exit code of the error.
    pub fn exit_code(&self) -> ExitCode {
        self.exit_code
    }

    /// Error message of the actor error.
    pub fn msg(&self) -> &str {
        &self.msg
    }

    /// Prefix error message with a string message.
    pub fn wrap(mut self, msg: impl AsRef<str>) -> Self {
        self.msg = format!("{}: {}", msg.as_ref(), self.msg);
        self
    }
}

/// Converts a raw encoding error into an ErrSerialization revert. Encoding of
/// internal well-formed data must instead map to a fatal error explicitly at
/// the call site.
impl From<encoding::Error> for ActorError {
    fn from(e: encoding::Error) -> Self {
        Self::new(ExitCode::ErrSerialization, e.to_string())
    }
}

/// Convenience macro for generating Actor Errors
#[macro_export]
macro_rules! actor_error {
    // Fatal errors, aborting the enclosing block
    ( fatal($msg:expr) ) => { $crate::ActorError::new_fatal($msg.to_string()) };
    ( fatal($msg:literal, $($ex:expr),*) ) => {
        $crate::ActorError::new_fatal(format!($msg, $($ex,)*))
    };

    // Error with only one stringable expression
    ( $code:ident; $msg:expr ) => {
        $crate::ActorError::new($crate::ExitCode::$code, $msg.to_string())
    };

    // String with positional arguments
    ( $code:ident; $msg:literal $(, $ex:expr)+ ) => {
        $crate::ActorError::new($crate::ExitCode::$code, format!($msg, $($ex,)*))
    };
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::actor_error;

    #[test]
    fn macro_classifies_at_origin() {
        let err = actor_error!(ErrForbidden; "caller {} not allowed", 7);
        assert!(!err.is_fatal());
        assert_eq!(err.exit_code(), ExitCode::ErrForbidden);
        assert_eq!(err.msg(), "caller 7 not allowed");

        let err = actor_error!(fatal("impossible branch {}", 3));
        assert!(err.is_fatal());
    }

    #[test]
    fn wrap_prefixes_message() {
        let err = actor_error!(ErrNotFound; "no entry").wrap("loading state");
        assert_eq!(err.msg(), "loading state: no entry");
        assert_eq!(err.exit_code(), ExitCode::ErrNotFound);
    }

    #[test]
    fn encoding_errors_become_serialization_reverts() {
        let enc = encoding::from_slice::<u64>(&[0xff, 0xff]).unwrap_err();
        let err: ActorError = enc.into();
        assert!(!err.is_fatal());
        assert_eq!(err.exit_code(), ExitCode::ErrSerialization);
    }
}
