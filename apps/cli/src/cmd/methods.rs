//! `strata methods`: list models, methods and layer stacks.

use anyhow::Result;
use models::{ModelInfo, ModelRegistry};
use std::fmt::Write;

/// Render the registry, or a single model of it.
pub fn describe(registry: &ModelRegistry, model: Option<&str>) -> Result<String> {
    let mut out = String::new();
    match model {
        Some(name) => {
            let Some(info) = registry.resolve(name) else {
                anyhow::bail!("unknown model '{name}'");
            };
            describe_model(&mut out, info)?;
        }
        None => {
            for info in registry.models() {
                describe_model(&mut out, info)?;
            }
        }
    }
    Ok(out)
}

fn describe_model(out: &mut String, model: &ModelInfo) -> Result<()> {
    writeln!(out, "{}", model.name())?;
    if model.methods().is_empty() {
        writeln!(out, "  (no methods)")?;
        return Ok(());
    }

    for method in model.methods().iter() {
        let signature = method.signature();
        writeln!(
            out,
            "  {} ({}) -> {}  [{} layer(s)]",
            method.name(),
            signature.args(),
            signature.output(),
            method.len()
        )?;
        for layer in method.layers() {
            let marker = if layer.id() == method.top().id() {
                " (top)"
            } else {
                ""
            };
            writeln!(out, "    {} {}{marker}", layer.id(), layer.receiver())?;
        }
    }
    Ok(())
}
