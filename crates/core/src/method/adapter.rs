//! Layer adapter: stores heterogeneously typed layer functions behind one
//! uniform shape and restores their types on invocation.

use super::MethodInfo;
use super::MethodLayer;
use crate::record::{Receiver, RecordCollection};
use std::{
    any::{Any, type_name},
    marker::PhantomData,
};

/// The uniform shape every layer function is adapted to.
pub(crate) type LayerFn<A, O> = dyn Fn(RecordCollection, &Super<'_, A, O>, A) -> O + Send + Sync;

/// A type-erased layer function.
pub struct Adapter {
    func: Box<dyn Any + Send + Sync>,
    receiver: &'static str,
}

impl Adapter {
    /// Adapt `func`, whose receiver is `W`, to the uniform layer shape.
    ///
    /// Every invocation builds a fresh `W` from the handle before calling
    /// `func` with the delegation context and the arguments.
    pub(crate) fn new<W, A, O, F>(func: F) -> Self
    where
        W: Receiver,
        A: 'static,
        O: 'static,
        F: Fn(W, &Super<'_, A, O>, A) -> O + Send + Sync + 'static,
    {
        let adapted: Box<LayerFn<A, O>> = Box::new(
            move |records: RecordCollection, sup: &Super<'_, A, O>, args: A| -> O {
                func(W::from_records(records), sup, args)
            },
        );
        Self {
            func: Box::new(adapted),
            receiver: type_name::<W>(),
        }
    }

    /// Type name of the adapted function's receiver.
    pub fn receiver(&self) -> &'static str {
        self.receiver
    }

    /// Restore the concrete layer function, `None` if the types differ.
    pub(crate) fn typed<A: 'static, O: 'static>(&self) -> Option<&LayerFn<A, O>> {
        self.func
            .downcast_ref::<Box<LayerFn<A, O>>>()
            .map(|func| func.as_ref())
    }
}

impl std::fmt::Debug for Adapter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Adapter")
            .field("receiver", &self.receiver)
            .finish_non_exhaustive()
    }
}

/// Delegation context handed to a running layer.
///
/// There is no implicit call-next: a layer reaches the rest of the chain
/// only by calling [`Super::call`] with the records it was invoked with.
pub struct Super<'m, A, O> {
    method: &'m MethodInfo,
    below: Option<usize>,
    _types: PhantomData<fn(A) -> O>,
}

impl<'m, A: 'static, O: 'static> Super<'m, A, O> {
    pub(crate) fn new(method: &'m MethodInfo, running: usize) -> Self {
        Self {
            method,
            below: running.checked_sub(1),
            _types: PhantomData,
        }
    }

    /// The method the running layer belongs to.
    pub fn method(&self) -> &'m MethodInfo {
        self.method
    }

    /// The layer beneath the running one, `None` at the base layer.
    pub fn next(&self) -> Option<&'m MethodLayer> {
        self.below.and_then(|position| self.method.layers.get(position))
    }

    /// Run the layer beneath the running one.
    ///
    /// Returns `None` when the running layer is the base layer, or when
    /// `records` belong to another model than the method's (logged).
    pub fn call(&self, records: &impl Receiver, args: A) -> Option<O> {
        let position = self.below?;
        let records = records.records();
        self.method.check_records(records).ok()?;
        self.method.run(position, records.clone(), args)
    }
}
