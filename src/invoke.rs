//! The outermost boundary. main.rs only knows [`invoke`] and [`load_and_invoke`].

use crate::args::{ArgsSource, ModuleArgs};
use crate::consts::MODULE_NAME;
use crate::params::{RepeatParams, check_supported};
use crate::repeater;
use crate::response::{Invocation, Response};

/// Validate, compute and package one invocation.
pub fn invoke(args: &ModuleArgs) -> Response {
    let module_name = args.host.module_name.as_deref().unwrap_or(MODULE_NAME);

    if let Err(msg) = check_supported(&args.params, module_name) {
        tracing::warn!(module = module_name, "unsupported module arguments");
        return Response::fail(msg, Vec::new());
    }

    let validated = match RepeatParams::from_args(&args.params) {
        Ok(v) => v,
        Err(e) => {
            tracing::warn!(kind = e.kind(), param = e.param(), "invalid module arguments");
            return e.into();
        }
    };

    // validation failures win over check mode
    if args.host.check_mode {
        tracing::info!(module = module_name, "check mode requested, skipping");
        return Response::skipped(format!(
            "remote module ({}) does not support check mode",
            module_name
        ));
    }

    let params = validated.params;
    if args.host.no_log {
        tracing::debug!(repeat = params.repeat, "repeating message");
    } else {
        tracing::debug!(message = %params.message, repeat = params.repeat, "repeating message");
    }

    match repeater::run(&params) {
        Ok(result) => {
            tracing::debug!(len = result.repeated_message.len(), "repeat done");
            let invocation = (!args.host.no_log).then(|| Invocation {
                module_args: params.to_module_args(),
            });
            Response::exit(result, invocation, validated.warnings)
        }
        Err(e) => {
            tracing::warn!(kind = e.kind(), "repeat rejected");
            Response::fail(e.to_string(), validated.warnings)
        }
    }
}

/// Load arguments from `source`, then [`invoke`]. Load errors become failures.
pub fn load_and_invoke(source: &ArgsSource) -> Response {
    match ModuleArgs::load(source) {
        Ok(args) => invoke(&args),
        Err(e) => {
            let msg = format!("{e:#}");
            tracing::error!(error = %msg, "could not load module arguments");
            Response::fail(msg, Vec::new())
        }
    }
}
