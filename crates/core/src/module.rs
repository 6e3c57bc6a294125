//! Modules contribute methods to models.

use crate::{ModelRegistry, Result};

/// A unit of business logic loaded into the registry before bootstrap.
///
/// Modules are loaded in order; a module extending a method must be loaded
/// after the module creating it, and its layers run before those of every
/// module loaded earlier.
pub trait Module {
    /// Name of the module, used in logs.
    fn name(&self) -> &str;

    /// Declare models, create and extend methods.
    fn register(&self, registry: &mut ModelRegistry) -> Result<()>;
}
