//! `{{ var }}` interpolation of setup values against the setup's `vars` table.

use std::collections::BTreeMap;
use std::sync::OnceLock;

use minijinja::{Environment, UndefinedBehavior};

use crate::domain::{AppError, ParamValue};

pub type Vars = BTreeMap<String, ParamValue>;

static ENV: OnceLock<Environment<'static>> = OnceLock::new();

fn env() -> &'static Environment<'static> {
    ENV.get_or_init(|| {
        let mut env = Environment::new();
        env.set_undefined_behavior(UndefinedBehavior::Strict);
        env
    })
}

/// Interpolate a value in place, descending into lists and tables.
///
/// Strings without `{{` are left alone. A string that consists of exactly one
/// `{{ expr }}` is replaced by the typed result of the expression; any other
/// templated string renders to a string.
pub fn interpolate(value: &ParamValue, vars: &Vars, what: &str) -> Result<ParamValue, AppError> {
    match value {
        ParamValue::String(text) => interpolate_str(text, vars, what),
        ParamValue::List(items) => items
            .iter()
            .map(|item| interpolate(item, vars, what))
            .collect::<Result<Vec<_>, _>>()
            .map(ParamValue::List),
        ParamValue::Table(table) => table
            .iter()
            .map(|(key, item)| Ok((key.clone(), interpolate(item, vars, what)?)))
            .collect::<Result<BTreeMap<_, _>, AppError>>()
            .map(ParamValue::Table),
        other => Ok(other.clone()),
    }
}

/// Interpolate every value of a table.
pub fn interpolate_table(
    table: &BTreeMap<String, ParamValue>,
    vars: &Vars,
    what: &str,
) -> Result<BTreeMap<String, ParamValue>, AppError> {
    table
        .iter()
        .map(|(key, value)| {
            let context = format!("{} '{}'", what, key);
            Ok((key.clone(), interpolate(value, vars, &context)?))
        })
        .collect()
}

fn interpolate_str(text: &str, vars: &Vars, what: &str) -> Result<ParamValue, AppError> {
    if let Some(token) = disallowed_template_token(text) {
        return Err(template_error(what, format!("template syntax '{}' is not allowed", token)));
    }
    if !text.contains("{{") {
        return Ok(ParamValue::String(text.to_string()));
    }

    if let Some(expr) = whole_expression(text) {
        let value = env()
            .compile_expression(expr)
            .and_then(|compiled| compiled.eval(vars))
            .map_err(|err| template_error(what, err))?;
        let json = serde_json::to_value(&value).map_err(|err| template_error(what, err))?;
        return serde_json::from_value(json).map_err(|_| {
            template_error(what, format!("expression '{}' has no setup value type", expr.trim()))
        });
    }

    env().render_str(text, vars).map(ParamValue::String).map_err(|err| template_error(what, err))
}

/// Inner expression of a string that is one `{{ ... }}` block and nothing else.
fn whole_expression(text: &str) -> Option<&str> {
    let inner = text.trim().strip_prefix("{{")?.strip_suffix("}}")?;
    if inner.contains("{{") || inner.contains("}}") {
        return None;
    }
    Some(inner)
}

fn disallowed_template_token(text: &str) -> Option<&'static str> {
    if text.contains("{%") {
        return Some("{%");
    }
    if text.contains("{#") {
        return Some("{#");
    }
    None
}

fn template_error(what: &str, err: impl std::fmt::Display) -> AppError {
    AppError::Template { what: what.to_string(), details: err.to_string() }
}
