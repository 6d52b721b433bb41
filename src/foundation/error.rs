/// Convenience result type used across chalkline.
pub type ChalkResult<T> = Result<T, ChalkError>;

/// Top-level error taxonomy used by engine APIs.
///
/// Structural script errors (`Script`) fail fast and halt evaluation. Missing
/// registry references are deliberately *not* an error variant: commands log
/// a warning and no-op so one skipped effect cannot take down a whole
/// animated sequence.
#[derive(thiserror::Error, Debug)]
pub enum ChalkError {
    /// Invalid arity, argument type, or missing required collaborator in an
    /// authored expression. Tagged with the originating expression identity.
    #[error("script error in `{origin}`: {message}")]
    Script {
        /// Identity of the expression that raised the error.
        origin: String,
        /// Human-readable description of what was wrong.
        message: String,
    },

    /// Command lifecycle violations (play before init, double init).
    #[error("command error: {0}")]
    Command(String),

    /// Errors while resolving a selection against a rendered component.
    #[error("selection error: {0}")]
    Selection(String),

    /// Wrapped lower-level error from dependencies.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl ChalkError {
    /// Build a [`ChalkError::Script`] value tagged with the originating
    /// expression identity.
    pub fn script(origin: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Script {
            origin: origin.into(),
            message: message.into(),
        }
    }

    /// Build a [`ChalkError::Command`] value.
    pub fn command(msg: impl Into<String>) -> Self {
        Self::Command(msg.into())
    }

    /// Build a [`ChalkError::Selection`] value.
    pub fn selection(msg: impl Into<String>) -> Self {
        Self::Selection(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
