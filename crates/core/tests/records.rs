//! Tests for record handles and receiver conventions.

use strata_core::{Receiver, RecordCollection, RecordSet, record_set};

record_set!(
    /// Invoices, bound to the `Invoice` model.
    pub InvoiceSet => "Invoice"
);

#[test]
fn collection_accessors() {
    let records = RecordCollection::new("Invoice", [3, 1, 2]);
    assert_eq!(records.model_name(), "Invoice");
    assert_eq!(records.ids(), &[3, 1, 2]);
    assert_eq!(records.len(), 3);
    assert!(!records.is_empty());

    let empty = RecordCollection::empty("Invoice");
    assert!(empty.is_empty());
    assert_eq!(empty.model_name(), "Invoice");
}

#[test]
fn collection_display() {
    assert_eq!(
        RecordCollection::new("Invoice", [1, 2]).to_string(),
        "Invoice(1, 2)"
    );
    assert_eq!(RecordCollection::empty("Partner").to_string(), "Partner()");
}

#[test]
fn plain_collection_is_unbound() {
    assert_eq!(<RecordCollection as Receiver>::MODEL, None);
    let records = RecordCollection::new("Anything", [1]);
    let receiver = RecordCollection::from_records(records.clone());
    assert_eq!(receiver.records(), &records);
}

#[test]
fn wrapper_embeds_collection() {
    assert_eq!(InvoiceSet::MODEL, Some("Invoice"));

    let records = RecordCollection::new("Invoice", [4, 5]);
    let invoices = InvoiceSet::from_records(records.clone());
    assert_eq!(invoices.0, records);
    assert_eq!(invoices.records(), &records);
    assert_eq!(invoices.model_name(), "Invoice");
    assert_eq!(invoices.ids(), &[4, 5]);

    let converted: InvoiceSet = records.clone().into();
    assert_eq!(converted, invoices);

    // Deref reaches the embedded collection.
    assert_eq!(invoices.to_string(), "Invoice(4, 5)");
}
