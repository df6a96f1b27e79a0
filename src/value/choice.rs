//! Enum bindings: tokens are looked up in a caller-supplied key mapping.

use super::ValueError;
use crate::args::Args;
use crate::binding::{consume_one, consume_rest, Binding, ConsumeError, ParamBinding};
use std::fmt;

const ENUM: &str = "enum";

/// A binding that maps one of a fixed set of keys to a value of type `T`.
///
/// Key lookup ignores case. The matched canonical key is kept for display.
/// The usage type lists every key in declaration order, e.g.
/// `debug|info|warn`.
pub struct Enum<'a, T> {
    mapping: Vec<(String, T)>,
    key: String,
    target: &'a mut T,
}

impl<'a, T: Clone + PartialEq + Default> Enum<'a, T> {
    /// Bind `target` to the given mapping.
    ///
    /// If the current value of `target` appears in the mapping, its key
    /// becomes the displayed (and default) key.
    pub fn new<I, K>(target: &'a mut T, mapping: I) -> Self
    where
        I: IntoIterator<Item = (K, T)>,
        K: Into<String>,
    {
        let mapping: Vec<(String, T)> = mapping.into_iter().map(|(k, v)| (k.into(), v)).collect();
        let key = key_of(&mapping, target);
        Self {
            mapping,
            key,
            target,
        }
    }

    pub fn value(&self) -> &T {
        &*self.target
    }

    /// The canonical key of the current value, or an empty string.
    pub fn key(&self) -> &str {
        &self.key
    }
}

impl<T> fmt::Display for Enum<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.key)
    }
}

impl<T: Clone + PartialEq + Default> Binding for Enum<'_, T> {
    fn assign(&mut self, token: &str) -> Result<(), ValueError> {
        let (key, value) = find(&self.mapping, token)?;
        self.key = key.clone();
        *self.target = value.clone();
        Ok(())
    }

    fn reset(&mut self) {
        *self.target = T::default();
        self.key = key_of(&self.mapping, &*self.target);
    }

    fn type_name(&self) -> String {
        type_label(&self.mapping)
    }

    fn is_zero(&self) -> bool {
        self.key.is_empty()
    }
}

impl<T: Clone + PartialEq + Default> ParamBinding for Enum<'_, T> {
    fn consume(&mut self, args: &mut Args) -> Result<(), ConsumeError> {
        consume_one(self, args)
    }
}

/// The slice shape of [`Enum`]: comma-separated keys accumulate.
pub struct EnumSlice<'a, T> {
    mapping: Vec<(String, T)>,
    keys: Vec<String>,
    target: &'a mut Vec<T>,
}

impl<'a, T: Clone + PartialEq> EnumSlice<'a, T> {
    pub fn new<I, K>(target: &'a mut Vec<T>, mapping: I) -> Self
    where
        I: IntoIterator<Item = (K, T)>,
        K: Into<String>,
    {
        let mapping: Vec<(String, T)> = mapping.into_iter().map(|(k, v)| (k.into(), v)).collect();
        let keys = target.iter().map(|value| key_of(&mapping, value)).collect();
        Self {
            mapping,
            keys,
            target,
        }
    }

    pub fn value(&self) -> &[T] {
        &*self.target
    }

    pub fn keys(&self) -> &[String] {
        &self.keys
    }
}

impl<T> fmt::Display for EnumSlice<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}]", self.keys.join(","))
    }
}

impl<T: Clone + PartialEq> Binding for EnumSlice<'_, T> {
    fn assign(&mut self, token: &str) -> Result<(), ValueError> {
        let found = token
            .split(',')
            .map(|piece| find(&self.mapping, piece))
            .collect::<Result<Vec<_>, _>>()?;
        for (key, value) in found {
            self.keys.push(key.clone());
            self.target.push(value.clone());
        }
        Ok(())
    }

    fn reset(&mut self) {
        self.keys.clear();
        self.target.clear();
    }

    fn type_name(&self) -> String {
        format!("{}...", type_label(&self.mapping))
    }

    fn is_zero(&self) -> bool {
        self.target.is_empty()
    }
}

impl<T: Clone + PartialEq> ParamBinding for EnumSlice<'_, T> {
    fn consume(&mut self, args: &mut Args) -> Result<(), ConsumeError> {
        consume_rest(self, args)
    }
}

fn find<'m, T>(mapping: &'m [(String, T)], token: &str) -> Result<(&'m String, &'m T), ValueError> {
    let token = token.trim();
    mapping
        .iter()
        .find(|(key, _)| key.to_lowercase() == token.to_lowercase())
        .map(|(key, value)| (key, value))
        .ok_or_else(|| ValueError::new(ENUM, token))
}

fn key_of<T: PartialEq>(mapping: &[(String, T)], value: &T) -> String {
    mapping
        .iter()
        .find(|(_, v)| v == value)
        .map(|(key, _)| key.clone())
        .unwrap_or_default()
}

fn type_label<T>(mapping: &[(String, T)]) -> String {
    mapping
        .iter()
        .map(|(key, _)| key.as_str())
        .collect::<Vec<_>>()
        .join("|")
}
