//! Per-model method table.

use super::{Adapter, LayerId, MethodInfo, MethodLayer, Signature};
use compact_str::CompactString;
use std::collections::BTreeMap;

/// The methods of one model, indexed by name and by layer identity.
///
/// Both indices are only ever updated together by [`Self::insert_layer`].
#[derive(Debug)]
pub struct MethodsCollection {
    registry: u32,
    model: u32,
    by_name: BTreeMap<CompactString, MethodInfo>,
    by_identity: BTreeMap<LayerId, (CompactString, usize)>,
    next_seq: u32,
    locked: bool,
}

impl MethodsCollection {
    pub(crate) fn new(registry: u32, model: u32) -> Self {
        Self {
            registry,
            model,
            by_name: BTreeMap::new(),
            by_identity: BTreeMap::new(),
            next_seq: 0,
            locked: false,
        }
    }

    /// Get a method by name.
    pub fn get(&self, name: &str) -> Option<&MethodInfo> {
        self.by_name.get(name)
    }

    /// Find the layer with the given identity.
    pub fn find_layer(&self, id: LayerId) -> Option<&MethodLayer> {
        let (method, position) = self.by_identity.get(&id)?;
        self.by_name.get(method)?.layers.get(*position)
    }

    /// Method names, in order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.by_name.keys().map(CompactString::as_str)
    }

    /// All methods, ordered by name.
    pub fn iter(&self) -> impl Iterator<Item = &MethodInfo> {
        self.by_name.values()
    }

    /// Number of methods.
    pub fn len(&self) -> usize {
        self.by_name.len()
    }

    /// Whether the model has no method.
    pub fn is_empty(&self) -> bool {
        self.by_name.is_empty()
    }

    /// Whether registration is closed.
    pub fn is_locked(&self) -> bool {
        self.locked
    }

    /// Create a method with `adapter` as its base layer.
    ///
    /// The caller has checked that the name is free.
    pub(crate) fn create(
        &mut self,
        model: &CompactString,
        name: &str,
        signature: Signature,
        adapter: Adapter,
    ) -> Option<LayerId> {
        let name = CompactString::from(name);
        let info = MethodInfo::new(model.clone(), name.clone(), signature);
        self.by_name.insert(name.clone(), info);
        self.insert_layer(&name, adapter)
    }

    /// Push `adapter` on top of an existing method, `None` if there is no
    /// method of that name.
    pub(crate) fn extend(&mut self, name: &str, adapter: Adapter) -> Option<LayerId> {
        self.insert_layer(name, adapter)
    }

    pub(crate) fn lock(&mut self) {
        self.locked = true;
    }

    fn insert_layer(&mut self, name: &str, adapter: Adapter) -> Option<LayerId> {
        let id = LayerId {
            registry: self.registry,
            model: self.model,
            seq: self.next_seq,
        };
        let info = self.by_name.get_mut(name)?;
        let position = info.push(id, adapter);
        self.by_identity.insert(id, (info.name.clone(), position));
        self.next_seq += 1;
        Some(id)
    }
}
