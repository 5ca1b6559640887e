//! Project-wide constants.

pub const AUTHOR: &str = env!("CARGO_PKG_AUTHORS");
pub const HOMEPAGE: &str = env!("CARGO_PKG_HOMEPAGE");
pub const REPO: &str = env!("CARGO_PKG_REPOSITORY");

/// Name the host knows this module by, unless it passes its own.
pub const MODULE_NAME: &str = "repeater";

/// Fixed status line carried in every successful result.
pub const SUCCESS_MESSAGE: &str = "Task completed successfully";

pub const PARAM_MESSAGE: &str = "message";
pub const PARAM_REPEAT: &str = "repeat";

/// Every option the module accepts, in the order they are reported.
pub const SUPPORTED_PARAMS: &[&str] = &[PARAM_MESSAGE, PARAM_REPEAT];

/// Used when `repeat` is absent.
pub const DEFAULT_REPEAT: i64 = 1;

/// Prefix of keys the host injects for its own bookkeeping.
pub const HOST_INTERNAL_PREFIX: &str = "_ansible_";

/// Some hosts wrap the options object in this key.
pub const WRAPPED_ARGS_KEY: &str = "ANSIBLE_MODULE_ARGS";

/// Environment variable holding the tracing filter.
pub const LOG_ENV: &str = "REPEATER_LOG";

/// Filter used when [`LOG_ENV`] is unset.
pub const DEFAULT_LOG_LEVEL: &str = "warn";

/// Exit status for a failed invocation. Success and skip exit 0.
pub const EXIT_FAILURE: i32 = 1;

/// Join the supported option names for messages, e.g. `"message, repeat"`.
pub fn supported_params_list() -> String {
    SUPPORTED_PARAMS.join(", ")
}
