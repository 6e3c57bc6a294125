//! Methods and their layer stacks.
//!
//! A [`MethodInfo`] is one named method of one model. It owns an ordered
//! stack of [`MethodLayer`]s: the base layer at the bottom, the most
//! recently extended layer on top. Invoking the method runs the top layer,
//! which may delegate downward through its [`Super`] context.
//!
//! ```rust,ignore
//! let info = registry.lookup("Invoice", "Total").unwrap();
//! let total: f64 = info.call(&invoices, ())?;
//!
//! // Walk the stack from the top down.
//! let mut layer = Some(info.top());
//! while let Some(current) = layer {
//!     println!("{} ({})", current.id(), current.receiver());
//!     layer = info.next_layer(current);
//! }
//! ```

pub use adapter::{Adapter, Super};
pub use collection::MethodsCollection;

use crate::{
    Error, Result,
    error::SignaturePart,
    record::{Receiver, RecordCollection, RecordSet},
};
use compact_str::CompactString;
use std::{
    any::{TypeId, type_name},
    fmt,
};

mod adapter;
mod collection;

/// Identity of a registered layer.
///
/// Returned by every registration call and used to find a layer again
/// without comparing function values. Only the registry that issued it
/// resolves it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct LayerId {
    pub(crate) registry: u32,
    pub(crate) model: u32,
    pub(crate) seq: u32,
}

impl fmt::Display for LayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}.{}", self.model, self.seq)
    }
}

/// The canonical shape of a method, fixed by its base layer.
///
/// Equality compares the receiver too. Later layers only need to be
/// [compatible](Self::is_compatible): another receiver type is fine as
/// long as arguments and return type are identical.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Signature {
    receiver: &'static str,
    args: TypeId,
    args_name: &'static str,
    output: TypeId,
    output_name: &'static str,
}

impl Signature {
    /// Signature of a layer taking `W` and `A`, returning `O`.
    pub fn of<W: Receiver, A: 'static, O: 'static>() -> Self {
        Self {
            receiver: type_name::<W>(),
            args: TypeId::of::<A>(),
            args_name: type_name::<A>(),
            output: TypeId::of::<O>(),
            output_name: type_name::<O>(),
        }
    }

    /// Whether a call with arguments `A` expecting `O` fits this signature.
    pub fn accepts<A: 'static, O: 'static>(&self) -> bool {
        self.args == TypeId::of::<A>() && self.output == TypeId::of::<O>()
    }

    /// Whether `other` takes the same arguments and returns the same type,
    /// whatever its receiver.
    pub fn is_compatible(&self, other: &Signature) -> bool {
        self.mismatch(other).is_none()
    }

    /// Type name of the base layer's receiver.
    pub fn receiver(&self) -> &'static str {
        self.receiver
    }

    /// Type name of the argument list.
    pub fn args(&self) -> &'static str {
        self.args_name
    }

    /// Type name of the return value.
    pub fn output(&self) -> &'static str {
        self.output_name
    }

    /// The first part of `other` that disagrees with this signature.
    pub(crate) fn mismatch(&self, other: &Signature) -> Option<(SignaturePart, &'static str, &'static str)> {
        if self.args != other.args {
            return Some((SignaturePart::Arguments, self.args_name, other.args_name));
        }
        if self.output != other.output {
            return Some((SignaturePart::Return, self.output_name, other.output_name));
        }
        None
    }
}

impl fmt::Display for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "fn({}, {}) -> {}", self.receiver, self.args_name, self.output_name)
    }
}

/// One implementation of a method, contributed by one module.
#[derive(Debug)]
pub struct MethodLayer {
    id: LayerId,
    method: CompactString,
    position: usize,
    adapter: Adapter,
}

impl MethodLayer {
    /// Identity of this layer.
    pub fn id(&self) -> LayerId {
        self.id
    }

    /// Name of the method this layer belongs to.
    pub fn method(&self) -> &str {
        &self.method
    }

    /// Position in the stack, `0` for the base layer.
    pub fn position(&self) -> usize {
        self.position
    }

    /// Type name of this layer's receiver.
    pub fn receiver(&self) -> &'static str {
        self.adapter.receiver()
    }
}

/// A named method of a model and its stack of layers.
#[derive(Debug)]
pub struct MethodInfo {
    name: CompactString,
    model: CompactString,
    signature: Signature,
    /// Base layer first, top layer last.
    layers: Vec<MethodLayer>,
}

impl MethodInfo {
    fn new(model: CompactString, name: CompactString, signature: Signature) -> Self {
        Self {
            name,
            model,
            signature,
            layers: Vec::new(),
        }
    }

    /// Name of the method.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Name of the model owning the method.
    pub fn model(&self) -> &str {
        &self.model
    }

    /// The signature fixed by the base layer.
    pub fn signature(&self) -> &Signature {
        &self.signature
    }

    /// The layer run when the method is invoked.
    pub fn top(&self) -> &MethodLayer {
        &self.layers[self.layers.len() - 1]
    }

    /// The layer the method was created with.
    pub fn base(&self) -> &MethodLayer {
        &self.layers[0]
    }

    /// Number of layers.
    pub fn len(&self) -> usize {
        self.layers.len()
    }

    /// Always `false`: a method is created with its base layer.
    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }

    /// Layers from the top down to the base.
    pub fn layers(&self) -> impl DoubleEndedIterator<Item = &MethodLayer> + ExactSizeIterator {
        self.layers.iter().rev()
    }

    /// The layer with the given identity, if it belongs to this method.
    pub fn layer(&self, id: LayerId) -> Option<&MethodLayer> {
        self.layers.iter().find(|layer| layer.id == id)
    }

    /// The layer beneath `layer`, `None` at the base or for a foreign layer.
    pub fn next_layer(&self, layer: &MethodLayer) -> Option<&MethodLayer> {
        if !self.owns(layer) {
            return None;
        }
        layer
            .position
            .checked_sub(1)
            .and_then(|position| self.layers.get(position))
    }

    /// Invoke the method through its top layer.
    pub fn call<A: 'static, O: 'static>(&self, records: &impl Receiver, args: A) -> Result<O> {
        self.check_records(records.records())?;
        self.check_call::<A, O>()?;
        self.run(self.layers.len() - 1, records.records().clone(), args)
            .ok_or_else(|| self.call_mismatch::<A, O>())
    }

    /// Invoke a specific layer directly; delegation continues beneath it.
    pub fn call_layer<A: 'static, O: 'static>(
        &self,
        layer: &MethodLayer,
        records: &impl Receiver,
        args: A,
    ) -> Result<O> {
        if !self.owns(layer) {
            return Err(Error::UnknownLayer {
                model: self.model.clone(),
                method: self.name.clone(),
                layer: layer.id.to_string(),
            }
            .logged());
        }
        self.check_records(records.records())?;
        self.check_call::<A, O>()?;
        self.run(layer.position, records.records().clone(), args)
            .ok_or_else(|| self.call_mismatch::<A, O>())
    }

    /// Run the layer at `position` with a context pointing beneath it.
    pub(crate) fn run<A: 'static, O: 'static>(
        &self,
        position: usize,
        records: RecordCollection,
        args: A,
    ) -> Option<O> {
        let func = self.layers.get(position)?.adapter.typed::<A, O>()?;
        let sup = Super::new(self, position);
        Some(func(records, &sup, args))
    }

    /// Push a new top layer.
    pub(crate) fn push(&mut self, id: LayerId, adapter: Adapter) -> usize {
        let position = self.layers.len();
        self.layers.push(MethodLayer {
            id,
            method: self.name.clone(),
            position,
            adapter,
        });
        position
    }

    fn owns(&self, layer: &MethodLayer) -> bool {
        self.layers
            .get(layer.position)
            .is_some_and(|own| own.id == layer.id)
    }

    /// Reject records of another model.
    pub(crate) fn check_records(&self, records: &RecordCollection) -> Result<()> {
        if records.model_name() == self.model.as_str() {
            return Ok(());
        }
        Err(Error::WrongModel {
            model: self.model.clone(),
            method: self.name.clone(),
            received: records.model_name().into(),
        }
        .logged())
    }

    fn check_call<A: 'static, O: 'static>(&self) -> Result<()> {
        if self.signature.accepts::<A, O>() {
            Ok(())
        } else {
            Err(self.call_mismatch::<A, O>())
        }
    }

    fn call_mismatch<A: 'static, O: 'static>(&self) -> Error {
        Error::CallMismatch {
            model: self.model.clone(),
            method: self.name.clone(),
            expected: format!("({}) -> {}", self.signature.args(), self.signature.output()),
            received: format!("({}) -> {}", type_name::<A>(), type_name::<O>()),
        }
        .logged()
    }
}
