use thiserror::Error;

/// Error raised when building engine values from strings.
///
/// The engine entry points themselves never fail: malformed expressions
/// degrade to `None`, `false` or a verbatim fallback (see the crate docs).
/// This type only surfaces through the [FromStr](std::str::FromStr)
/// construction API.
#[derive(Error, Debug)]
pub enum GateKitError {
    /// The name is not a single letter A-Z
    #[error("'{0}' is not a valid variable name")]
    InvalidVariable(String),

    /// The text could not be parsed into an expression tree
    #[error("Not a valid expression")]
    InvalidExpression,
}
