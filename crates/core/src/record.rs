//! Record handles passed as the receiver of every method layer.
//!
//! A layer's first parameter is either a [`RecordCollection`] itself, or a
//! typed wrapper whose first field is one. Wrappers are declared with
//! [`record_set!`](crate::record_set) and bind to a single model.
//!
//! ```rust,ignore
//! use strata_core::{RecordCollection, record_set};
//!
//! record_set!(pub InvoiceSet => "Invoice");
//!
//! let invoices = InvoiceSet::from(RecordCollection::new("Invoice", [1, 2]));
//! assert_eq!(invoices.len(), 2);
//! ```

use compact_str::CompactString;
use std::fmt;

/// Read access to a set of records of one model.
pub trait RecordSet {
    /// Name of the model the records belong to.
    fn model_name(&self) -> &str;

    /// Record ids, in order.
    fn ids(&self) -> &[i64];

    /// Number of records.
    fn len(&self) -> usize {
        self.ids().len()
    }

    /// Whether the set holds no record.
    fn is_empty(&self) -> bool {
        self.ids().is_empty()
    }
}

/// The concrete record handle handed to method layers.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct RecordCollection {
    model: CompactString,
    ids: Vec<i64>,
}

impl RecordCollection {
    /// Create a collection of the given records.
    pub fn new(model: impl Into<CompactString>, ids: impl IntoIterator<Item = i64>) -> Self {
        Self {
            model: model.into(),
            ids: ids.into_iter().collect(),
        }
    }

    /// Create an empty collection of the given model.
    pub fn empty(model: impl Into<CompactString>) -> Self {
        Self::new(model, [])
    }
}

impl RecordSet for RecordCollection {
    fn model_name(&self) -> &str {
        &self.model
    }

    fn ids(&self) -> &[i64] {
        &self.ids
    }
}

impl fmt::Display for RecordCollection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}(", self.model)?;
        for (i, id) in self.ids.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{id}")?;
        }
        f.write_str(")")
    }
}

/// A type accepted as the first parameter of a method layer.
///
/// The layer adapter builds a fresh receiver from the handle it is invoked
/// with, so a receiver must be constructible from a [`RecordCollection`]
/// alone and must expose it back for delegation.
pub trait Receiver: RecordSet + Sized + 'static {
    /// The model this receiver is bound to, `None` for any model.
    const MODEL: Option<&'static str> = None;

    /// Build the receiver around the given records.
    fn from_records(records: RecordCollection) -> Self;

    /// The records held by this receiver.
    fn records(&self) -> &RecordCollection;
}

impl Receiver for RecordCollection {
    fn from_records(records: RecordCollection) -> Self {
        records
    }

    fn records(&self) -> &RecordCollection {
        self
    }
}

/// Declare a typed record set bound to one model.
///
/// The generated struct wraps a [`RecordCollection`] in its first field and
/// implements [`RecordSet`], [`Receiver`], `From<RecordCollection>` and
/// `Deref<Target = RecordCollection>`.
#[macro_export]
macro_rules! record_set {
    ($(#[$meta:meta])* $vis:vis $name:ident => $model:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq)]
        $vis struct $name(pub $crate::RecordCollection);

        impl $crate::RecordSet for $name {
            fn model_name(&self) -> &str {
                $crate::RecordSet::model_name(&self.0)
            }

            fn ids(&self) -> &[i64] {
                $crate::RecordSet::ids(&self.0)
            }
        }

        impl $crate::Receiver for $name {
            const MODEL: Option<&'static str> = Some($model);

            fn from_records(records: $crate::RecordCollection) -> Self {
                Self(records)
            }

            fn records(&self) -> &$crate::RecordCollection {
                &self.0
            }
        }

        impl From<$crate::RecordCollection> for $name {
            fn from(records: $crate::RecordCollection) -> Self {
                Self(records)
            }
        }

        impl ::std::ops::Deref for $name {
            type Target = $crate::RecordCollection;

            fn deref(&self) -> &Self::Target {
                &self.0
            }
        }
    };
}
