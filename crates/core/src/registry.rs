//! Model registry and method registration.
//!
//! The [`ModelRegistry`] is built once at startup: models are declared,
//! modules create and extend methods, then [`ModelRegistry::bootstrap`]
//! locks every method table. From then on the registry is read-only and
//! can be shared across threads.
//!
//! # Example
//!
//! ```rust,ignore
//! use strata_core::{ModelRegistry, RecordCollection, RecordSet, Super};
//!
//! let mut registry = ModelRegistry::new();
//! registry.add_model("Invoice")?;
//! registry.create_method("Invoice", "Total", |rs: RecordCollection, _: &Super<(), f64>, ()| {
//!     rs.len() as f64 * 100.0
//! })?;
//! registry.extend_method("Invoice", "Total", |rs: RecordCollection, sup: &Super<(), f64>, ()| {
//!     sup.call(&rs, ()).unwrap_or_default() + 10.0
//! })?;
//! registry.bootstrap();
//!
//! let total: f64 = registry.call("Invoice", "Total", &RecordCollection::new("Invoice", [1]), ())?;
//! assert_eq!(total, 110.0);
//! ```

use crate::{
    Error, Module, Result,
    method::{Adapter, LayerId, MethodInfo, MethodLayer, MethodsCollection, Signature, Super},
    record::Receiver,
};
use compact_str::CompactString;
use std::{
    collections::BTreeMap,
    sync::atomic::{AtomicU32, Ordering},
};

/// Source of registry ids, so a [`LayerId`] never resolves in a registry
/// other than the one that issued it.
static NEXT_REGISTRY: AtomicU32 = AtomicU32::new(0);

/// A declared model and its methods.
#[derive(Debug)]
pub struct ModelInfo {
    name: CompactString,
    methods: MethodsCollection,
}

impl ModelInfo {
    /// Name of the model.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The model's method table.
    pub fn methods(&self) -> &MethodsCollection {
        &self.methods
    }
}

/// Registry of models and their layered methods.
#[derive(Debug)]
pub struct ModelRegistry {
    id: u32,
    models: Vec<ModelInfo>,
    index: BTreeMap<CompactString, usize>,
    bootstrapped: bool,
}

impl ModelRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self {
            id: NEXT_REGISTRY.fetch_add(1, Ordering::Relaxed),
            models: Vec::new(),
            index: BTreeMap::new(),
            bootstrapped: false,
        }
    }

    /// Declare a model.
    pub fn add_model(&mut self, name: impl Into<CompactString>) -> Result<()> {
        let name = name.into();
        if self.bootstrapped {
            return Err(Error::Bootstrapped { model: name }.logged());
        }
        if self.index.contains_key(&name) {
            return Err(Error::DuplicateModel { model: name }.logged());
        }

        let idx = self.models.len();
        self.models.push(ModelInfo {
            name: name.clone(),
            methods: MethodsCollection::new(self.id, idx as u32),
        });
        tracing::debug!("declared model '{name}'");
        self.index.insert(name, idx);
        Ok(())
    }

    /// Resolve a model by name.
    pub fn resolve(&self, name: &str) -> Option<&ModelInfo> {
        self.index.get(name).map(|&idx| &self.models[idx])
    }

    /// Declared models, in declaration order.
    pub fn models(&self) -> impl Iterator<Item = &ModelInfo> {
        self.models.iter()
    }

    /// Create `method` on `model` with `func` as its base layer.
    ///
    /// The method's signature is fixed from `func`: every later layer must
    /// take the same arguments `A` and return the same `O`.
    pub fn create_method<W, A, O, F>(&mut self, model: &str, method: &str, func: F) -> Result<LayerId>
    where
        W: Receiver,
        A: 'static,
        O: 'static,
        F: Fn(W, &Super<'_, A, O>, A) -> O + Send + Sync + 'static,
    {
        let info = self.open(model, method)?;
        if info.methods.get(method).is_some() {
            return Err(Error::DuplicateMethod {
                model: info.name.clone(),
                method: method.into(),
            }
            .logged());
        }
        check_receiver::<W>(&info.name, method)?;

        let signature = Signature::of::<W, A, O>();
        let model = info.name.clone();
        let id = info
            .methods
            .create(&model, method, signature, Adapter::new(func))
            .ok_or_else(|| unknown_method(&model, method))?;
        tracing::debug!("created method '{model}.{method}' {signature} as layer {id}");
        Ok(id)
    }

    /// Push `func` as a new top layer of an existing `method` on `model`.
    ///
    /// The receiver may differ from the base layer's; arguments and return
    /// type must be identical.
    pub fn extend_method<W, A, O, F>(&mut self, model: &str, method: &str, func: F) -> Result<LayerId>
    where
        W: Receiver,
        A: 'static,
        O: 'static,
        F: Fn(W, &Super<'_, A, O>, A) -> O + Send + Sync + 'static,
    {
        let info = self.open(model, method)?;
        let Some(existing) = info.methods.get(method) else {
            return Err(unknown_method(&info.name, method));
        };
        check_receiver::<W>(&info.name, method)?;

        let layer = Signature::of::<W, A, O>();
        if let Some((part, expected, received)) = existing.signature().mismatch(&layer) {
            return Err(Error::SignatureMismatch {
                model: info.name.clone(),
                method: method.into(),
                part,
                expected,
                received,
            }
            .logged());
        }

        let id = info
            .methods
            .extend(method, Adapter::new(func))
            .ok_or_else(|| unknown_method(&info.name, method))?;
        tracing::debug!("extended method '{}.{method}' with layer {id}", info.name);
        Ok(id)
    }

    /// Look up a method.
    pub fn lookup(&self, model: &str, method: &str) -> Option<&MethodInfo> {
        self.resolve(model)?.methods.get(method)
    }

    /// Find a layer by the identity returned when it was registered.
    pub fn find_layer(&self, id: LayerId) -> Option<&MethodLayer> {
        if id.registry != self.id {
            return None;
        }
        self.models.get(id.model as usize)?.methods.find_layer(id)
    }

    /// Invoke a method through its top layer.
    pub fn call<A: 'static, O: 'static>(
        &self,
        model: &str,
        method: &str,
        records: &impl Receiver,
        args: A,
    ) -> Result<O> {
        let Some(info) = self.resolve(model) else {
            return Err(Error::UnknownModel {
                model: model.into(),
            });
        };
        let Some(found) = info.methods.get(method) else {
            return Err(Error::UnknownMethod {
                model: info.name.clone(),
                method: method.into(),
            });
        };
        found.call(records, args)
    }

    /// Load a module, registering its methods.
    pub fn load(&mut self, module: &dyn Module) -> Result<()> {
        module.register(self)?;
        tracing::info!("loaded module '{}'", module.name());
        Ok(())
    }

    /// Load modules in order.
    pub fn load_all<'m>(&mut self, modules: impl IntoIterator<Item = &'m dyn Module>) -> Result<()> {
        for module in modules {
            self.load(module)?;
        }
        Ok(())
    }

    /// Lock every model's methods. Registration fails from now on.
    pub fn bootstrap(&mut self) {
        if self.bootstrapped {
            return;
        }
        let mut methods = 0;
        for model in &mut self.models {
            model.methods.lock();
            methods += model.methods.len();
        }
        self.bootstrapped = true;
        tracing::info!(
            "bootstrapped {} model(s) with {methods} method(s)",
            self.models.len()
        );
    }

    /// Whether [`Self::bootstrap`] has run.
    pub fn is_bootstrapped(&self) -> bool {
        self.bootstrapped
    }

    /// The model open for registration of `method`.
    fn open(&mut self, model: &str, method: &str) -> Result<&mut ModelInfo> {
        let Some(&idx) = self.index.get(model) else {
            return Err(Error::UnknownModel {
                model: model.into(),
            }
            .logged());
        };
        let info = &mut self.models[idx];
        if info.methods.is_locked() {
            return Err(Error::RegistryLocked {
                model: info.name.clone(),
                method: method.into(),
            }
            .logged());
        }
        Ok(info)
    }
}

impl Default for ModelRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// Reject receivers bound to another model.
fn check_receiver<W: Receiver>(model: &CompactString, method: &str) -> Result<()> {
    match W::MODEL {
        Some(bound) if bound != model.as_str() => Err(Error::InvalidFirstParameter {
            model: model.clone(),
            method: method.into(),
            received: std::any::type_name::<W>(),
        }
        .logged()),
        _ => Ok(()),
    }
}

fn unknown_method(model: &CompactString, method: &str) -> Error {
    Error::UnknownMethod {
        model: model.clone(),
        method: method.into(),
    }
    .logged()
}
