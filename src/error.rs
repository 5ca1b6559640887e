//! Errors a module invocation can end in.
//!
//! Only two kinds exist. Both are terminal: the binary turns them into a
//! failure object for the host and exits. Problems *loading* the argument
//! document are not module errors; they travel as [`anyhow::Error`].

/// Why an invocation was rejected before anything was computed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ModuleError {
    #[error("missing required arguments: {name}")]
    MissingParameter { name: &'static str },

    #[error(
        "argument '{name}' is of type {found} and we were unable to convert to {expected}: {detail}"
    )]
    InvalidType {
        name: &'static str,
        expected: &'static str,
        found: &'static str,
        detail: String,
    },
}

impl ModuleError {
    /// Short identifier of the kind, handy in logs and tests.
    pub fn kind(&self) -> &'static str {
        match self {
            ModuleError::MissingParameter { .. } => "MissingParameter",
            ModuleError::InvalidType { .. } => "InvalidType",
        }
    }

    /// The option the error is about.
    pub fn param(&self) -> &'static str {
        match self {
            ModuleError::MissingParameter { name } | ModuleError::InvalidType { name, .. } => name,
        }
    }
}
