//! The single JSON object written back to the host.

use serde::Serialize;
use serde_json::Value;

use crate::consts::EXIT_FAILURE;
use crate::error::ModuleError;
use crate::repeater::InvocationResult;

/// Echo of the options the module actually ran with.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Invocation {
    pub module_args: Value,
}

/// Successful run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Exit {
    #[serde(flatten)]
    pub result: InvocationResult,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub invocation: Option<Invocation>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<String>,
}

/// Rejected run. Carries no computed fields.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Failure {
    pub failed: bool,
    pub msg: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<String>,
}

/// Run that was not attempted (check mode).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Skipped {
    pub changed: bool,
    pub skipped: bool,
    pub msg: String,
}

/// What the host gets back.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Response {
    Exit(Exit),
    Fail(Failure),
    Skipped(Skipped),
}

impl Response {
    pub fn exit(
        result: InvocationResult,
        invocation: Option<Invocation>,
        warnings: Vec<String>,
    ) -> Self {
        Response::Exit(Exit {
            result,
            invocation,
            warnings,
        })
    }

    pub fn fail(msg: impl Into<String>, warnings: Vec<String>) -> Self {
        Response::Fail(Failure {
            failed: true,
            msg: msg.into(),
            warnings,
        })
    }

    pub fn skipped(msg: impl Into<String>) -> Self {
        Response::Skipped(Skipped {
            changed: false,
            skipped: true,
            msg: msg.into(),
        })
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, Response::Fail(_))
    }

    /// Process exit status matching the outcome.
    pub fn exit_code(&self) -> i32 {
        if self.is_failed() { EXIT_FAILURE } else { 0 }
    }

    /// Serialize for stdout, compact unless `pretty`.
    pub fn to_json(&self, pretty: bool) -> serde_json::Result<String> {
        if pretty {
            serde_json::to_string_pretty(self)
        } else {
            serde_json::to_string(self)
        }
    }
}

impl From<ModuleError> for Response {
    fn from(err: ModuleError) -> Self {
        Response::fail(err.to_string(), Vec::new())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample() -> InvocationResult {
        InvocationResult {
            changed: false,
            original_message: "hi".to_string(),
            repeated_message: "hihi".to_string(),
            message: "Task completed successfully".to_string(),
        }
    }

    #[test]
    fn exit_flattens_result() {
        let response = Response::exit(
            sample(),
            Some(Invocation {
                module_args: json!({"message": "hi", "repeat": 2}),
            }),
            Vec::new(),
        );
        let value = serde_json::to_value(&response).unwrap();
        assert_eq!(
            value,
            json!({
                "changed": false,
                "original_message": "hi",
                "repeated_message": "hihi",
                "message": "Task completed successfully",
                "invocation": {"module_args": {"message": "hi", "repeat": 2}}
            })
        );
        assert_eq!(response.exit_code(), 0);
    }

    #[test]
    fn exit_keeps_warnings_when_present() {
        let response = Response::exit(sample(), None, vec!["careful".to_string()]);
        let value = serde_json::to_value(&response).unwrap();
        assert_eq!(value["warnings"], json!(["careful"]));
        assert!(value.get("invocation").is_none());
    }

    #[test]
    fn failure_has_no_computed_fields() {
        let response: Response = ModuleError::MissingParameter { name: "message" }.into();
        let value = serde_json::to_value(&response).unwrap();
        assert_eq!(
            value,
            json!({"failed": true, "msg": "missing required arguments: message"})
        );
        assert!(response.is_failed());
        assert_eq!(response.exit_code(), 1);
    }

    #[test]
    fn skipped_is_not_a_failure() {
        let response = Response::skipped("not supported");
        let value = serde_json::to_value(&response).unwrap();
        assert_eq!(
            value,
            json!({"changed": false, "skipped": true, "msg": "not supported"})
        );
        assert_eq!(response.exit_code(), 0);
    }

    #[test]
    fn pretty_output_spans_lines() {
        let response = Response::skipped("x");
        assert!(!response.to_json(false).unwrap().contains('\n'));
        assert!(response.to_json(true).unwrap().contains('\n'));
    }
}
