//! `strata call`: invoke a method from the command line.

use anyhow::Result;
use models::{ModelRegistry, RecordCollection};

/// Invoke `model.method` on the given ids and render its result.
///
/// Only methods without arguments returning `f64` or `String` can be
/// called from the command line.
pub fn invoke(registry: &ModelRegistry, model: &str, method: &str, ids: &[i64]) -> Result<String> {
    let Some(info) = registry.lookup(model, method) else {
        anyhow::bail!("unknown method '{model}.{method}'");
    };

    let records = RecordCollection::new(model, ids.iter().copied());
    let signature = info.signature();
    if signature.accepts::<(), f64>() {
        let value: f64 = info.call(&records, ())?;
        Ok(value.to_string())
    } else if signature.accepts::<(), String>() {
        Ok(info.call::<(), String>(&records, ())?)
    } else {
        anyhow::bail!(
            "'{model}.{method}' takes ({}) and returns {}, which cannot be called from the command line",
            signature.args(),
            signature.output()
        )
    }
}
