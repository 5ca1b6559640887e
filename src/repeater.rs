//! The one thing this module does: repeat a message.

use serde::Serialize;

use crate::consts::{PARAM_REPEAT, SUCCESS_MESSAGE};
use crate::error::ModuleError;
use crate::params::RepeatParams;

/// What a successful invocation reports back.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InvocationResult {
    /// Always false. Nothing outside the process is touched.
    pub changed: bool,
    pub original_message: String,
    pub repeated_message: String,
    /// Fixed status line.
    pub message: String,
}

/// Concatenate `message` with itself `repeat` times.
///
/// Negative counts clamp to zero. Fails when the result cannot be allocated.
pub fn repeat_message(message: &str, repeat: i64) -> Result<String, ModuleError> {
    if message.is_empty() || repeat <= 0 {
        return Ok(String::new());
    }
    let count = usize::try_from(repeat).map_err(|_| too_large(repeat))?;

    let total = message
        .len()
        .checked_mul(count)
        .ok_or_else(|| too_large(repeat))?;

    let mut out = String::new();
    out.try_reserve_exact(total).map_err(|e| {
        tracing::warn!(total, error = %e, "cannot allocate repeated message");
        too_large(repeat)
    })?;
    for _ in 0..count {
        out.push_str(message);
    }
    Ok(out)
}

fn too_large(repeat: i64) -> ModuleError {
    ModuleError::InvalidType {
        name: PARAM_REPEAT,
        expected: "int",
        found: "int",
        detail: format!("repeat count {} makes the result too large", repeat),
    }
}

/// Run the repeat for validated options.
pub fn run(params: &RepeatParams) -> Result<InvocationResult, ModuleError> {
    let repeated_message = repeat_message(&params.message, params.repeat)?;
    Ok(InvocationResult {
        changed: false,
        original_message: params.message.clone(),
        repeated_message,
        message: SUCCESS_MESSAGE.to_string(),
    })
}
