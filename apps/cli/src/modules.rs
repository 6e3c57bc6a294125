//! Built-in modules.
//!
//! `sale` and `contacts` create methods; `surcharge`, `double` and `stamp`
//! extend them. Each extension must be loaded after the module creating
//! the method it extends.

use anyhow::Result;
use compact_str::CompactString;
use models::{Module, ModelRegistry, RecordCollection, RecordSet, Super, record_set};

/// Price of one invoice before extensions.
pub const UNIT_PRICE: f64 = 100.0;

/// Flat amount added by the `surcharge` module.
pub const SURCHARGE: f64 = 10.0;

record_set!(
    /// Records of the `Invoice` model.
    pub InvoiceSet => "Invoice"
);

record_set!(
    /// Records of the `Partner` model.
    pub PartnerSet => "Partner"
);

/// Creates `Invoice.Total` and `Invoice.Label`.
pub struct Sale;

impl Module for Sale {
    fn name(&self) -> &str {
        "sale"
    }

    fn register(&self, registry: &mut ModelRegistry) -> models::Result<()> {
        registry.create_method("Invoice", "Total", invoice_total)?;
        registry.create_method("Invoice", "Label", invoice_label)?;
        Ok(())
    }
}

fn invoice_total(rs: InvoiceSet, _: &Super<(), f64>, _: ()) -> f64 {
    rs.len() as f64 * UNIT_PRICE
}

fn invoice_label(rs: InvoiceSet, _: &Super<(), String>, _: ()) -> String {
    rs.0.to_string()
}

/// Creates `Partner.Label`.
pub struct Contacts;

impl Module for Contacts {
    fn name(&self) -> &str {
        "contacts"
    }

    fn register(&self, registry: &mut ModelRegistry) -> models::Result<()> {
        registry.create_method(
            "Partner",
            "Label",
            |rs: PartnerSet, _: &Super<(), String>, _: ()| format!("{} partner(s)", rs.len()),
        )?;
        Ok(())
    }
}

/// Adds [`SURCHARGE`] to `Invoice.Total`.
pub struct Surcharge;

impl Module for Surcharge {
    fn name(&self) -> &str {
        "surcharge"
    }

    fn register(&self, registry: &mut ModelRegistry) -> models::Result<()> {
        registry.extend_method(
            "Invoice",
            "Total",
            |rs: InvoiceSet, sup: &Super<(), f64>, _: ()| {
                sup.call(&rs, ()).unwrap_or_default() + SURCHARGE
            },
        )?;
        Ok(())
    }
}

/// Doubles `Invoice.Total`.
pub struct Double;

impl Module for Double {
    fn name(&self) -> &str {
        "double"
    }

    fn register(&self, registry: &mut ModelRegistry) -> models::Result<()> {
        // Takes the plain collection: any receiver convention may extend.
        registry.extend_method(
            "Invoice",
            "Total",
            |rs: RecordCollection, sup: &Super<(), f64>, _: ()| {
                sup.call(&rs, ()).unwrap_or_default() * 2.0
            },
        )?;
        Ok(())
    }
}

/// Marks `Invoice.Label` as stamped.
pub struct Stamp;

impl Module for Stamp {
    fn name(&self) -> &str {
        "stamp"
    }

    fn register(&self, registry: &mut ModelRegistry) -> models::Result<()> {
        registry.extend_method(
            "Invoice",
            "Label",
            |rs: InvoiceSet, sup: &Super<(), String>, _: ()| {
                let label = sup.call(&rs, ()).unwrap_or_default();
                format!("{label} [stamped]")
            },
        )?;
        Ok(())
    }
}

/// All built-in modules.
pub fn builtin() -> [&'static dyn Module; 5] {
    [&Sale, &Contacts, &Surcharge, &Double, &Stamp]
}

/// Find a built-in module by name.
pub fn find(name: &str) -> Option<&'static dyn Module> {
    builtin().into_iter().find(|module| module.name() == name)
}

/// Resolve module names, in order.
pub fn resolve(names: &[CompactString]) -> Result<Vec<&'static dyn Module>> {
    names
        .iter()
        .map(|name| {
            find(name).ok_or_else(|| {
                let known: Vec<_> = builtin().into_iter().map(|m| m.name()).collect();
                anyhow::anyhow!("unknown module '{name}' (known: {})", known.join(", "))
            })
        })
        .collect()
}
