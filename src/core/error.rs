//! The crate error enum.
//!
//! Fatal conditions only: everything recoverable (bad input encodings,
//! engine resource limits, incompatible flags, empty-match loops) is
//! reported through the warning sink instead and the call keeps going.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    /// Pattern failed to compile; carries the engine's reason verbatim.
    #[error("invalid regular expression '{pattern}', reason '{reason}'")]
    InvalidPattern { pattern: String, reason: String },

    /// Raw-path pattern failed to compile (the pattern bytes may not be
    /// printable, so only the reason is reported).
    #[error("invalid regular expression, reason '{reason}'")]
    InvalidRawPattern { reason: String },

    /// A pattern, replacement or separator is not valid in the execution
    /// encoding. `what` names the offender, e.g. `'pattern'`.
    #[error("{what} is invalid UTF-8")]
    InvalidEncoding { what: String },

    /// Substitution output would exceed the refusal threshold.
    #[error("result string is too long")]
    ResultTooLong,

    /// Raw-bytes search with an offset below 1.
    #[error("invalid 'offset' argument")]
    InvalidOffset,

    /// Fixed-dialect substitution with an empty pattern.
    #[error("zero-length pattern")]
    ZeroLengthPattern,

    /// The host raised the cooperative-cancellation flag.
    #[error("operation interrupted")]
    Interrupted,
}
