//! The module's argument spec and the type checks behind it.
//!
//! Coercion follows the host's own rules: strings accept any value (with a
//! warning when it was not already a string), integers accept integral
//! numbers, booleans and numeric strings.

use serde_json::{Map, Value};

use crate::consts::{
    DEFAULT_REPEAT, PARAM_MESSAGE, PARAM_REPEAT, SUPPORTED_PARAMS, supported_params_list,
};
use crate::error::ModuleError;

/// Validated options for one invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepeatParams {
    pub message: String,
    pub repeat: i64,
}

/// Validated options plus anything worth telling the host about them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Validated {
    pub params: RepeatParams,
    pub warnings: Vec<String>,
}

impl RepeatParams {
    pub fn new(message: impl Into<String>, repeat: i64) -> Self {
        Self {
            message: message.into(),
            repeat,
        }
    }

    /// Validate a raw options object. Unknown keys are not looked at here,
    /// see [`check_supported`].
    pub fn from_args(args: &Map<String, Value>) -> Result<Validated, ModuleError> {
        let mut warnings = Vec::new();

        let message = match present(args, PARAM_MESSAGE) {
            Some(value) => {
                let (message, warning) = check_str(PARAM_MESSAGE, value);
                warnings.extend(warning);
                message
            }
            None => {
                return Err(ModuleError::MissingParameter {
                    name: PARAM_MESSAGE,
                });
            }
        };

        let repeat = match present(args, PARAM_REPEAT) {
            Some(value) => check_int(PARAM_REPEAT, value)?,
            None => DEFAULT_REPEAT,
        };

        Ok(Validated {
            params: Self { message, repeat },
            warnings,
        })
    }

    /// The options as the host should see them echoed back.
    pub fn to_module_args(&self) -> Value {
        let mut args = Map::new();
        args.insert(PARAM_MESSAGE.to_string(), Value::from(self.message.as_str()));
        args.insert(PARAM_REPEAT.to_string(), Value::from(self.repeat));
        Value::Object(args)
    }
}

/// Reject options the module does not know. The error is the message the
/// host shows, listing every offending key.
pub fn check_supported(args: &Map<String, Value>, module_name: &str) -> Result<(), String> {
    let unknown: Vec<&str> = args
        .keys()
        .map(String::as_str)
        .filter(|key| !SUPPORTED_PARAMS.contains(key))
        .collect();

    if unknown.is_empty() {
        return Ok(());
    }
    Err(format!(
        "Unsupported parameters for ({}) module: {}. Supported parameters include: {}.",
        module_name,
        unknown.join(", "),
        supported_params_list()
    ))
}

/// A key set to `null` counts as absent.
fn present<'a>(args: &'a Map<String, Value>, name: &str) -> Option<&'a Value> {
    args.get(name).filter(|v| !v.is_null())
}

/// Accept a string, or convert anything else to one and say so.
/// Containers are rendered as compact JSON.
pub fn check_str(name: &'static str, value: &Value) -> (String, Option<String>) {
    let converted = match value {
        Value::String(s) => return (s.clone(), None),
        Value::Bool(true) => "True".to_string(),
        Value::Bool(false) => "False".to_string(),
        Value::Null => "None".to_string(),
        other => other.to_string(),
    };

    tracing::debug!(param = name, "converted value to string");
    let warning = format!(
        "The value '{}' (type {}) in '{}' was converted to '{}' (type string). \
         If this does not look like what you expect, quote the entire value to ensure it does not change.",
        value,
        type_name(value),
        name,
        converted
    );
    (converted, Some(warning))
}

/// Accept an integer, an integral float, a boolean (as 0 or 1), or a string
/// holding an integer.
pub fn check_int(name: &'static str, value: &Value) -> Result<i64, ModuleError> {
    let invalid = |detail: String| ModuleError::InvalidType {
        name,
        expected: "int",
        found: type_name(value),
        detail,
    };

    match value {
        Value::Bool(b) => Ok(i64::from(*b)),
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                return Ok(i);
            }
            match n.as_f64() {
                Some(f) if f.fract() == 0.0 && f >= i64::MIN as f64 && f < i64::MAX as f64 => {
                    Ok(f as i64)
                }
                Some(f) if f.fract() == 0.0 => Err(invalid(format!("{} is out of range", n))),
                _ => Err(invalid(format!("{} has a fractional part", n))),
            }
        }
        Value::String(s) => s
            .trim()
            .parse::<i64>()
            .map_err(|e| invalid(format!("'{}': {}", s, e))),
        _ => Err(invalid(format!("{} cannot be converted to an int", value))),
    }
}

/// JSON values named the way the host reports types.
fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "NoneType",
        Value::Bool(_) => "bool",
        Value::Number(n) if n.is_f64() => "float",
        Value::Number(_) => "int",
        Value::String(_) => "str",
        Value::Array(_) => "list",
        Value::Object(_) => "dict",
    }
}
