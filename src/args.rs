//! Loading the argument document the host hands over.
//!
//! The host writes a JSON object to a file and passes its path as the first
//! argument; when run by hand the object can come on stdin instead. The
//! object is either the options themselves or the options wrapped under
//! [`WRAPPED_ARGS_KEY`]. Keys starting with [`HOST_INTERNAL_PREFIX`] belong to
//! the host and are split off into [`HostOptions`].

use std::io::Read;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use serde_json::{Map, Value};

use crate::consts::{HOST_INTERNAL_PREFIX, WRAPPED_ARGS_KEY};

/// Where the argument document comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ArgsSource {
    File(PathBuf),
    Stdin,
}

impl ArgsSource {
    /// No path, or `-`, means stdin.
    pub fn from_path(path: Option<PathBuf>) -> Self {
        match path {
            Some(p) if p.as_os_str() != "-" => ArgsSource::File(p),
            _ => ArgsSource::Stdin,
        }
    }

    /// Read the raw document text.
    pub fn read(&self) -> Result<String> {
        match self {
            ArgsSource::File(path) => read_file(path),
            ArgsSource::Stdin => {
                let mut text = String::new();
                std::io::stdin()
                    .read_to_string(&mut text)
                    .context("failed to read module arguments from stdin")?;
                Ok(text)
            }
        }
    }
}

fn read_file(path: &Path) -> Result<String> {
    std::fs::read_to_string(path)
        .with_context(|| format!("failed to read module arguments from {}", path.display()))
}

/// Host bookkeeping flags found among the arguments.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HostOptions {
    /// Dry-run requested.
    pub check_mode: bool,
    /// Keep argument values out of the result and the logs.
    pub no_log: bool,
    /// Name the host invoked us under.
    pub module_name: Option<String>,
}

impl HostOptions {
    fn absorb(&mut self, key: &str, value: &Value) {
        match key.strip_prefix(HOST_INTERNAL_PREFIX) {
            Some("check_mode") => self.check_mode = truthy(value),
            Some("no_log") => self.no_log = truthy(value),
            Some("module_name") => self.module_name = value.as_str().map(str::to_string),
            _ => tracing::trace!(key, "ignoring host-internal key"),
        }
    }
}

/// Hosts send real booleans, but older ones stringify them.
fn truthy(value: &Value) -> bool {
    match value {
        Value::Bool(b) => *b,
        Value::String(s) => matches!(
            s.trim().to_ascii_lowercase().as_str(),
            "true" | "yes" | "on" | "1"
        ),
        Value::Number(n) => n.as_i64() == Some(1),
        _ => false,
    }
}

/// A loaded argument document: module options plus host flags.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ModuleArgs {
    pub params: Map<String, Value>,
    pub host: HostOptions,
}

impl ModuleArgs {
    /// Parse the document text. Blank input is an empty option set.
    pub fn parse(text: &str) -> Result<Self> {
        if text.trim().is_empty() {
            return Ok(Self::default());
        }

        let root: Value =
            serde_json::from_str(text).context("module arguments are not valid JSON")?;
        let mut object = match root {
            Value::Object(map) => map,
            other => bail!(
                "module arguments must be a JSON object, got {}",
                json_kind(&other)
            ),
        };

        if let Some(wrapped) = object.remove(WRAPPED_ARGS_KEY) {
            object = match wrapped {
                Value::Object(map) => map,
                other => bail!(
                    "{} must be a JSON object, got {}",
                    WRAPPED_ARGS_KEY,
                    json_kind(&other)
                ),
            };
        }

        Ok(Self::from_map(object))
    }

    /// Split host-internal keys out of a raw options object.
    pub fn from_map(object: Map<String, Value>) -> Self {
        let mut params = Map::new();
        let mut host = HostOptions::default();
        for (key, value) in object {
            if key.starts_with(HOST_INTERNAL_PREFIX) {
                host.absorb(&key, &value);
            } else {
                params.insert(key, value);
            }
        }
        Self { params, host }
    }

    /// Read and parse from the given source.
    pub fn load(source: &ArgsSource) -> Result<Self> {
        tracing::debug!(?source, "loading module arguments");
        let text = source.read()?;
        Self::parse(&text)
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn dash_and_none_mean_stdin() {
        assert_eq!(ArgsSource::from_path(None), ArgsSource::Stdin);
        assert_eq!(
            ArgsSource::from_path(Some(PathBuf::from("-"))),
            ArgsSource::Stdin
        );
        assert_eq!(
            ArgsSource::from_path(Some(PathBuf::from("/tmp/args"))),
            ArgsSource::File(PathBuf::from("/tmp/args"))
        );
    }

    #[test]
    fn parse_flat_object() {
        let args = ModuleArgs::parse(r#"{"message": "hi", "repeat": 3}"#).unwrap();
        assert_eq!(args.params.get("message"), Some(&json!("hi")));
        assert_eq!(args.params.get("repeat"), Some(&json!(3)));
        assert_eq!(args.host, HostOptions::default());
    }

    #[test]
    fn parse_wrapped_object() {
        let args = ModuleArgs::parse(r#"{"ANSIBLE_MODULE_ARGS": {"message": "hi"}}"#).unwrap();
        assert_eq!(args.params.len(), 1);
        assert_eq!(args.params.get("message"), Some(&json!("hi")));
    }

    #[test]
    fn blank_input_is_empty() {
        let args = ModuleArgs::parse("  \n").unwrap();
        assert!(args.params.is_empty());
    }

    #[test]
    fn host_keys_are_split_off() {
        let args = ModuleArgs::parse(
            r#"{
                "message": "hi",
                "_ansible_check_mode": true,
                "_ansible_no_log": "yes",
                "_ansible_module_name": "echo_twice",
                "_ansible_verbosity": 3
            }"#,
        )
        .unwrap();

        assert_eq!(args.params.len(), 1);
        assert!(args.host.check_mode);
        assert!(args.host.no_log);
        assert_eq!(args.host.module_name.as_deref(), Some("echo_twice"));
    }

    #[test]
    fn invalid_json_is_rejected() {
        let err = ModuleArgs::parse("{not json").unwrap_err();
        assert!(err.to_string().contains("not valid JSON"));
    }

    #[test]
    fn non_object_root_is_rejected() {
        let err = ModuleArgs::parse("[1, 2]").unwrap_err();
        assert!(err.to_string().contains("an array"));
    }

    #[test]
    fn non_object_wrapper_is_rejected() {
        let err = ModuleArgs::parse(r#"{"ANSIBLE_MODULE_ARGS": "x"}"#).unwrap_err();
        assert!(err.to_string().contains("ANSIBLE_MODULE_ARGS"));
    }

    #[test]
    fn load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("args.json");
        std::fs::write(&path, r#"{"message": "from file"}"#).unwrap();

        let args = ModuleArgs::load(&ArgsSource::File(path)).unwrap();
        assert_eq!(args.params.get("message"), Some(&json!("from file")));
    }

    #[test]
    fn load_missing_file_names_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nope.json");

        let err = ModuleArgs::load(&ArgsSource::File(path)).unwrap_err();
        assert!(err.to_string().contains("nope.json"));
    }
}
