//! Typed values that can be bound to options and params.
//!
//! Every primitive kind (bool, int, float, string, date) comes in a scalar
//! and a slice shape, both generic over one [`Kind`]. So the two shapes
//! always parse and render the same way. The bool and int kinds also have a
//! flag shape that updates without a token. [`Enum`] and [`EnumSlice`] map
//! caller-supplied keys to values of any type.

mod choice;
mod kind;
mod scalar;
mod slice;

pub use choice::{Enum, EnumSlice};
pub use kind::{BoolKind, DateKind, FloatKind, IntKind, Kind, Step, StringKind};
pub use scalar::{FlagValue, Scalar};
pub use slice::Slice;

use thiserror::Error;

/// A token that could not be parsed as the requested kind.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("bad {kind} value {token:?}")]
pub struct ValueError {
    /// The kind label, e.g. `int`.
    pub kind: &'static str,
    /// The offending text, after trimming.
    pub token: String,
}

impl ValueError {
    pub fn new(kind: &'static str, token: impl Into<String>) -> Self {
        Self {
            kind,
            token: token.into(),
        }
    }
}

pub type Bool<'a> = Scalar<'a, BoolKind>;
pub type BoolFlag<'a> = FlagValue<'a, BoolKind>;
pub type BoolSlice<'a> = Slice<'a, BoolKind>;

pub type Int<'a> = Scalar<'a, IntKind>;
pub type IntFlag<'a> = FlagValue<'a, IntKind>;
pub type IntSlice<'a> = Slice<'a, IntKind>;

pub type Float<'a> = Scalar<'a, FloatKind>;
pub type FloatSlice<'a> = Slice<'a, FloatKind>;

pub type Str<'a> = Scalar<'a, StringKind>;
pub type StrSlice<'a> = Slice<'a, StringKind>;

pub type Date<'a> = Scalar<'a, DateKind>;
pub type DateSlice<'a> = Slice<'a, DateKind>;
