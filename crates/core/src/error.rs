//! Registration and invocation errors.
//!
//! Every variant is a broken module contract: a method registered against
//! the wrong model, too late, twice, or with a signature that disagrees with
//! the base layer. None of them is meant to be recovered from locally.

use compact_str::CompactString;
use std::fmt;

/// Result alias for registry operations.
pub type Result<T> = std::result::Result<T, Error>;

/// The part of a signature that failed to match.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SignaturePart {
    /// The argument list (every parameter after the receiver).
    Arguments,
    /// The return type.
    Return,
}

impl fmt::Display for SignaturePart {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Arguments => f.write_str("arguments"),
            Self::Return => f.write_str("return type"),
        }
    }
}

/// Errors raised by the model registry.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// The model name does not resolve.
    #[error("unknown model `{model}`")]
    UnknownModel { model: CompactString },

    /// The model was declared twice.
    #[error("model `{model}` is already declared")]
    DuplicateModel { model: CompactString },

    /// A model was declared after the registry bootstrapped.
    #[error("model `{model}` cannot be declared after bootstrap")]
    Bootstrapped { model: CompactString },

    /// Registration was attempted after the model's methods were locked.
    #[error("cannot register `{model}.{method}`: methods must be created or extended before bootstrap")]
    RegistryLocked {
        model: CompactString,
        method: CompactString,
    },

    /// `create_method` was called twice for the same method.
    #[error("method `{model}.{method}` already exists")]
    DuplicateMethod {
        model: CompactString,
        method: CompactString,
    },

    /// `extend_method` was called on a method that was never created.
    #[error("cannot extend unknown method `{model}.{method}`")]
    UnknownMethod {
        model: CompactString,
        method: CompactString,
    },

    /// The layer's receiver is a record set bound to another model.
    #[error("receiver of `{model}.{method}` must hold `{model}` records, got `{received}`")]
    InvalidFirstParameter {
        model: CompactString,
        method: CompactString,
        received: &'static str,
    },

    /// An extension disagrees with the signature of the base layer.
    #[error("signature of `{model}.{method}` does not match: {part} expected `{expected}`, received `{received}`")]
    SignatureMismatch {
        model: CompactString,
        method: CompactString,
        part: SignaturePart,
        expected: &'static str,
        received: &'static str,
    },

    /// The method was invoked with types other than its signature.
    #[error("`{model}.{method}` called as `{received}`, declared as `{expected}`")]
    CallMismatch {
        model: CompactString,
        method: CompactString,
        expected: String,
        received: String,
    },

    /// The method was invoked on records of another model.
    #[error("`{model}.{method}` called on `{received}` records")]
    WrongModel {
        model: CompactString,
        method: CompactString,
        received: CompactString,
    },

    /// The given layer does not belong to the method.
    #[error("layer {layer} is not a layer of `{model}.{method}`")]
    UnknownLayer {
        model: CompactString,
        method: CompactString,
        layer: String,
    },
}

impl Error {
    /// The model the error refers to.
    pub fn model(&self) -> &str {
        match self {
            Self::UnknownModel { model }
            | Self::DuplicateModel { model }
            | Self::Bootstrapped { model }
            | Self::RegistryLocked { model, .. }
            | Self::DuplicateMethod { model, .. }
            | Self::UnknownMethod { model, .. }
            | Self::InvalidFirstParameter { model, .. }
            | Self::SignatureMismatch { model, .. }
            | Self::CallMismatch { model, .. }
            | Self::WrongModel { model, .. }
            | Self::UnknownLayer { model, .. } => model,
        }
    }

    /// Log the error and hand it back, for use at the point of failure.
    pub(crate) fn logged(self) -> Self {
        tracing::error!(model = self.model(), "{self}");
        self
    }
}
