//! The capability set the parsers use to drive every bound value.
//!
//! The parsers never branch on a concrete value type. They only ask a
//! binding to assign a token, render itself, reset, or describe its type.
//! Two optional capabilities sit on top of that:
//!
//! - [`Flag`], reached through [`Binding::as_flag`], marks an option that
//!   changes state without consuming a value token;
//! - [`ParamBinding`] lets a binding pull its own tokens off the cursor when
//!   it is used as a positional param.

use crate::args::Args;
use crate::value::ValueError;
use std::fmt;
use thiserror::Error;

/// A typed program variable that can be set from command-line text.
pub trait Binding: fmt::Display {
    /// Parse one token and store (or, for slices, append) the result.
    fn assign(&mut self, token: &str) -> Result<(), ValueError>;

    /// Restore the value to its zero state.
    fn reset(&mut self);

    /// Short label for usage text, e.g. `int` or `string...`.
    fn type_name(&self) -> String;

    /// Whether the value is at its zero state.
    fn is_zero(&self) -> bool;

    /// The rendered value, or an empty string at the zero state.
    fn non_zero(&self) -> String {
        if self.is_zero() {
            String::new()
        } else {
            self.to_string()
        }
    }

    /// Flag capability. Bindings that can update without a token return
    /// `Some(self)`.
    fn as_flag(&mut self) -> Option<&mut dyn Flag> {
        None
    }
}

/// A binding that changes state when its option appears without a value.
pub trait Flag {
    fn update(&mut self);
}

/// A binding that can be used as a positional param.
pub trait ParamBinding: Binding {
    /// Take the tokens this binding needs from the front of `args`.
    fn consume(&mut self, args: &mut Args) -> Result<(), ConsumeError>;
}

/// Errors raised while a param consumes its tokens.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConsumeError {
    #[error("requires a value")]
    MissingValue,

    #[error(transparent)]
    Value(#[from] ValueError),
}

/// Shift exactly one token into `binding`.
pub(crate) fn consume_one<B: Binding + ?Sized>(
    binding: &mut B,
    args: &mut Args,
) -> Result<(), ConsumeError> {
    let token = args.shift().ok_or(ConsumeError::MissingValue)?;
    binding.assign(&token)?;
    Ok(())
}

/// Feed every remaining token into `binding`, stopping at the first error.
pub(crate) fn consume_rest<B: Binding + ?Sized>(
    binding: &mut B,
    args: &mut Args,
) -> Result<(), ConsumeError> {
    for token in args.take_rest() {
        binding.assign(&token)?;
    }
    Ok(())
}
