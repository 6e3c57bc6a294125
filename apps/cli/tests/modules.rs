//! Tests for the built-in modules and registry bootstrap.

use compact_str::CompactString;
use strata_cli::{
    cmd::{bootstrap, call::invoke, init, methods::describe},
    config::{Config, ModulesConfig},
    modules,
};

fn config(load: &[&str]) -> Config {
    Config {
        models: vec!["Invoice".into(), "Partner".into()],
        modules: ModulesConfig {
            load: load.iter().copied().map(CompactString::from).collect(),
        },
    }
}

#[test]
fn default_stack() {
    let registry = bootstrap(&Config::default()).unwrap();
    assert!(registry.is_bootstrapped());

    // (100 + 10) * 2 for a single invoice.
    assert_eq!(invoke(&registry, "Invoice", "Total", &[1]).unwrap(), "220");
    assert_eq!(invoke(&registry, "Invoice", "Total", &[1, 2]).unwrap(), "420");
    assert_eq!(
        invoke(&registry, "Invoice", "Label", &[1, 2]).unwrap(),
        "Invoice(1, 2) [stamped]"
    );
    assert_eq!(
        invoke(&registry, "Partner", "Label", &[3]).unwrap(),
        "1 partner(s)"
    );
}

#[test]
fn load_order_changes_result() {
    let registry = bootstrap(&config(&["sale", "double", "surcharge"])).unwrap();
    assert_eq!(invoke(&registry, "Invoice", "Total", &[1]).unwrap(), "210");

    let registry = bootstrap(&config(&["sale"])).unwrap();
    assert_eq!(invoke(&registry, "Invoice", "Total", &[1]).unwrap(), "100");
}

#[test]
fn extension_without_base_fails() {
    let err = bootstrap(&config(&["surcharge", "sale"])).unwrap_err();
    assert!(format!("{err:#}").contains("surcharge"));
}

#[test]
fn undeclared_model_fails() {
    let mut config = config(&["sale"]);
    config.models = vec!["Partner".into()];
    let err = bootstrap(&config).unwrap_err();
    assert!(format!("{err:#}").contains("unknown model `Invoice`"));
}

#[test]
fn unknown_module_fails() {
    let err = bootstrap(&config(&["sale", "shipping"])).unwrap_err();
    let message = err.to_string();
    assert!(message.contains("shipping"));
    assert!(message.contains("surcharge"));
}

#[test]
fn builtin_lookup() {
    assert_eq!(modules::builtin().len(), 5);
    assert_eq!(modules::find("stamp").unwrap().name(), "stamp");
    assert!(modules::find("missing").is_none());
}

#[test]
fn invoke_unknown_method() {
    let registry = bootstrap(&Config::default()).unwrap();
    let err = invoke(&registry, "Invoice", "Refund", &[1]).unwrap_err();
    assert!(err.to_string().contains("Invoice.Refund"));
}

#[test]
fn describe_lists_layers_top_first() {
    let registry = bootstrap(&Config::default()).unwrap();
    let out = describe(&registry, Some("Invoice")).unwrap();

    assert!(out.starts_with("Invoice\n"));
    assert!(out.contains("Total (()) -> f64  [3 layer(s)]"));
    assert!(out.contains("Label (()) -> alloc::string::String  [2 layer(s)]"));

    let total = out.split("  Total").nth(1).unwrap();
    let layers: Vec<_> = total.lines().skip(1).take(3).collect();
    assert!(layers[0].ends_with("RecordCollection (top)"));
    assert!(layers[1].ends_with("InvoiceSet"));
    assert!(layers[2].ends_with("InvoiceSet"));
}

#[test]
fn describe_unknown_model() {
    let registry = bootstrap(&Config::default()).unwrap();
    assert!(describe(&registry, Some("Payment")).is_err());
}

#[test]
fn describe_model_without_methods() {
    let registry = bootstrap(&config(&[])).unwrap();
    let out = describe(&registry, None).unwrap();
    assert_eq!(out, "Invoice\n  (no methods)\nPartner\n  (no methods)\n");
}

#[test]
fn init_refuses_overwrite() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("strata.toml");
    init::run(&path, false).unwrap();
    assert!(init::run(&path, false).is_err());
    init::run(&path, true).unwrap();
}
