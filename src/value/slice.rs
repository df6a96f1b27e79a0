//! Multi-valued bindings that accumulate across tokens.

use super::kind::Kind;
use super::ValueError;
use crate::args::Args;
use crate::binding::{consume_rest, Binding, ConsumeError, ParamBinding};
use std::fmt;

/// A binding that appends values of kind `K` to a vector.
///
/// For kinds that split, one token may carry several comma-separated
/// values (`1,2,3`). A token is accepted whole or not at all. If any piece
/// fails to parse, nothing from that token is appended. String slices never
/// split.
///
/// As a param it takes every remaining token, so it must be the last param.
pub struct Slice<'a, K: Kind> {
    target: &'a mut Vec<K::Value>,
}

impl<'a, K: Kind> Slice<'a, K> {
    pub fn new(target: &'a mut Vec<K::Value>) -> Self {
        Self { target }
    }

    pub fn value(&self) -> &[K::Value] {
        self.target.as_slice()
    }
}

impl<K: Kind> fmt::Display for Slice<'_, K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let items: Vec<String> = self.target.iter().map(K::render).collect();
        write!(f, "[{}]", items.join(","))
    }
}

impl<K: Kind> Binding for Slice<'_, K> {
    fn assign(&mut self, token: &str) -> Result<(), ValueError> {
        if !K::SPLIT {
            self.target.push(K::parse(token)?);
            return Ok(());
        }
        let values = token
            .split(',')
            .map(K::parse)
            .collect::<Result<Vec<_>, _>>()?;
        self.target.extend(values);
        Ok(())
    }

    fn reset(&mut self) {
        self.target.clear();
    }

    fn type_name(&self) -> String {
        format!("{}...", K::NAME)
    }

    fn is_zero(&self) -> bool {
        self.target.is_empty()
    }
}

impl<K: Kind> ParamBinding for Slice<'_, K> {
    fn consume(&mut self, args: &mut Args) -> Result<(), ConsumeError> {
        consume_rest(self, args)
    }
}
