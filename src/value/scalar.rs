//! Single-valued bindings: plain scalars and flags.

use super::kind::{Kind, Step};
use super::ValueError;
use crate::args::Args;
use crate::binding::{consume_one, Binding, ConsumeError, Flag, ParamBinding};
use std::fmt;

/// A binding over one value of kind `K`.
///
/// As an option it always expects a value token. As a param it takes
/// exactly one token.
pub struct Scalar<'a, K: Kind> {
    target: &'a mut K::Value,
}

impl<'a, K: Kind> Scalar<'a, K> {
    pub fn new(target: &'a mut K::Value) -> Self {
        Self { target }
    }

    pub fn value(&self) -> &K::Value {
        &*self.target
    }
}

impl<K: Kind> fmt::Display for Scalar<'_, K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&K::render(&*self.target))
    }
}

impl<K: Kind> Binding for Scalar<'_, K> {
    fn assign(&mut self, token: &str) -> Result<(), ValueError> {
        *self.target = K::parse(token)?;
        Ok(())
    }

    fn reset(&mut self) {
        *self.target = K::zero();
    }

    fn type_name(&self) -> String {
        K::NAME.to_string()
    }

    fn is_zero(&self) -> bool {
        K::is_zero(&*self.target)
    }
}

impl<K: Kind> ParamBinding for Scalar<'_, K> {
    fn consume(&mut self, args: &mut Args) -> Result<(), ConsumeError> {
        consume_one(self, args)
    }
}

/// A single-valued binding that also acts as a flag.
///
/// Seen without a value, a bool flag becomes `true` and an int flag counts
/// up by one. An explicit value (`--verbose=3`) still goes through
/// [`Binding::assign`].
pub struct FlagValue<'a, K: Step> {
    target: &'a mut K::Value,
}

impl<'a, K: Step> FlagValue<'a, K> {
    pub fn new(target: &'a mut K::Value) -> Self {
        Self { target }
    }

    pub fn value(&self) -> &K::Value {
        &*self.target
    }
}

impl<K: Step> fmt::Display for FlagValue<'_, K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&K::render(&*self.target))
    }
}

impl<K: Step> Binding for FlagValue<'_, K> {
    fn assign(&mut self, token: &str) -> Result<(), ValueError> {
        *self.target = K::parse(token)?;
        Ok(())
    }

    fn reset(&mut self) {
        *self.target = K::zero();
    }

    fn type_name(&self) -> String {
        K::NAME.to_string()
    }

    fn is_zero(&self) -> bool {
        K::is_zero(&*self.target)
    }

    fn as_flag(&mut self) -> Option<&mut dyn Flag> {
        Some(self)
    }
}

impl<K: Step> Flag for FlagValue<'_, K> {
    fn update(&mut self) {
        K::step(&mut *self.target);
    }
}
