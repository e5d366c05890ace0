//! Loading terms, types and environments from JSON.

use anyhow::{bail, Context, Result};
use effcheck_ast::Term;
use effcheck_checker::TypeEnv;
use effcheck_types::{EffectError, Ty};
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::collections::BTreeMap;
use std::path::Path;
use thiserror::Error;

/// Maximum input file size in bytes (1MB)
pub const MAX_INPUT_SIZE: usize = 1_000_000;

/// The input spelled an effect as the flag pair `[false, true]`, which no
/// effect denotes.
///
/// That is an invariant violation at the input boundary rather than a
/// malformed file.
#[derive(Debug, Error)]
#[error("input carries the effect flag pair [false, true]")]
pub struct IllegalEffectInput(#[source] pub EffectError);

pub fn read_input(path: &Path) -> Result<String> {
    let src = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read '{}'", path.display()))?;
    if src.len() > MAX_INPUT_SIZE {
        bail!(
            "input file '{}' exceeds {}MB limit ({} bytes)",
            path.display(),
            MAX_INPUT_SIZE / 1_000_000,
            src.len()
        );
    }
    Ok(src)
}

/// Deserialize without serde_json's nesting limit; deep terms are bounded
/// by the checker's depth ceiling, not by the parser.
fn from_json<T: DeserializeOwned>(src: &str) -> serde_json::Result<T> {
    let mut de = serde_json::Deserializer::from_str(src);
    de.disable_recursion_limit();
    let value = T::deserialize(serde_stacker::Deserializer::new(&mut de))?;
    de.end()?;
    Ok(value)
}

/// Does the document contain a `[false, true]` array anywhere?
///
/// The tree is consumed node by node so arbitrarily deep documents are
/// neither walked nor dropped recursively.
fn carries_illegal_effect(src: &str) -> bool {
    let Ok(root) = from_json::<Value>(src) else {
        return false;
    };
    let mut found = false;
    let mut pending = vec![root];
    while let Some(value) = pending.pop() {
        match value {
            Value::Array(items) => {
                found |= matches!(items.as_slice(), [Value::Bool(false), Value::Bool(true)]);
                pending.extend(items);
            }
            Value::Object(fields) => pending.extend(fields.into_iter().map(|(_, v)| v)),
            _ => {}
        }
    }
    found
}

fn parse_json<T: DeserializeOwned>(src: &str) -> Result<T> {
    match from_json(src) {
        Ok(value) => Ok(value),
        Err(_) if carries_illegal_effect(src) => {
            Err(IllegalEffectInput(EffectError::IllegalFlags).into())
        }
        Err(e) => Err(e.into()),
    }
}

fn load_json<T: DeserializeOwned>(path: &Path, what: &str) -> Result<T> {
    let src = read_input(path)?;
    parse_json(&src).with_context(|| format!("'{}' is not a valid {what}", path.display()))
}

pub fn load_term(path: &Path) -> Result<Term> {
    load_json(path, "term")
}

/// An environment file is a JSON object from variable name to type.
pub fn load_env(path: &Path) -> Result<TypeEnv> {
    let bindings: BTreeMap<String, Ty> = load_json(path, "type environment")?;
    Ok(bindings.into_iter().collect())
}

/// A type given on the command line: inline JSON, or the path of a JSON file.
pub fn parse_ty(arg: &str) -> Result<Ty> {
    let trimmed = arg.trim_start();
    if trimmed.starts_with('{') || trimmed.starts_with('"') {
        parse_json(arg).with_context(|| format!("'{arg}' is not a valid type"))
    } else {
        load_json(Path::new(arg), "type")
    }
}

/// Did loading fail with [`IllegalEffectInput`]?
pub fn is_illegal_effect(err: &anyhow::Error) -> bool {
    err.downcast_ref::<IllegalEffectInput>().is_some()
}
