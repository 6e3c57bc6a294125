//! Layered, extensible methods for Strata models.
//!
//! A module creates a method on a model; modules loaded later extend it by
//! stacking layers on top, without touching the original code. Invoking a
//! method runs its most recently added layer, which may delegate to the
//! layer beneath it through its [`Super`] context.

pub use {
    error::{Error, Result, SignaturePart},
    method::{Adapter, LayerId, MethodInfo, MethodLayer, MethodsCollection, Signature, Super},
    module::Module,
    record::{Receiver, RecordCollection, RecordSet},
    registry::{ModelInfo, ModelRegistry},
};

mod error;
mod method;
mod module;
mod record;
mod registry;
