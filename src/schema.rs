//! Option and param declarations, and their set-up validation.

use crate::binding::{Binding, ParamBinding};
use std::collections::HashSet;
use thiserror::Error;

/// Errors in a schema declaration.
///
/// These are programming mistakes found before any user input is read. They
/// are never reported as parse failures.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SchemaError {
    #[error("option without a name")]
    UnnamedOption,

    #[error("param without a name")]
    UnnamedParam,

    #[error("invalid option name {0:?}: must not start with '-' or contain '='")]
    InvalidName(String),

    #[error("invalid short option '{0}'")]
    InvalidShort(char),

    #[error("duplicate option name: {0}")]
    DuplicateOption(String),

    #[error("duplicate short option: -{0}")]
    DuplicateShort(char),

    #[error("duplicate param name: {0}")]
    DuplicateParam(String),
}

/// A named option: `--name`, optionally also `-s`.
pub struct Opt<'a> {
    name: String,
    short: Option<char>,
    description: String,
    binding: Box<dyn Binding + 'a>,
    default_value: String,
}

impl<'a> Opt<'a> {
    /// Declare an option called `--name` bound to `binding`.
    pub fn new(name: impl Into<String>, binding: impl Binding + 'a) -> Self {
        Self {
            name: name.into(),
            short: None,
            description: String::new(),
            binding: Box::new(binding),
            default_value: String::new(),
        }
    }

    /// Also accept `-c` for this option.
    #[must_use]
    pub fn short(mut self, short: char) -> Self {
        self.short = Some(short);
        self
    }

    #[must_use]
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn get_name(&self) -> &str {
        &self.name
    }

    pub fn get_short(&self) -> Option<char> {
        self.short
    }

    pub fn get_description(&self) -> &str {
        &self.description
    }

    /// The value shown as the default in usage text.
    ///
    /// This is captured by [`Options::init`], so values set by a later parse
    /// never show up here.
    pub fn default_value(&self) -> &str {
        &self.default_value
    }

    pub fn binding(&self) -> &(dyn Binding + 'a) {
        self.binding.as_ref()
    }

    pub fn binding_mut(&mut self) -> &mut (dyn Binding + 'a) {
        self.binding.as_mut()
    }

    /// Validate the declaration and take the default-value snapshot.
    pub fn init(&mut self) -> Result<(), SchemaError> {
        if self.name.is_empty() {
            return Err(SchemaError::UnnamedOption);
        }
        if self.name.starts_with('-') || self.name.contains('=') {
            return Err(SchemaError::InvalidName(self.name.clone()));
        }
        if let Some(short) = self.short {
            if short == '-' || short.is_whitespace() {
                return Err(SchemaError::InvalidShort(short));
            }
        }
        self.default_value = self.binding.non_zero();
        Ok(())
    }
}

/// A positional param.
pub struct Param<'a> {
    name: String,
    description: String,
    binding: Box<dyn ParamBinding + 'a>,
}

impl<'a> Param<'a> {
    /// Declare a param bound to `binding`.
    ///
    /// A slice binding takes every remaining token, so only the last param
    /// of a schema should be a slice.
    pub fn new(name: impl Into<String>, binding: impl ParamBinding + 'a) -> Self {
        Self {
            name: name.into(),
            description: String::new(),
            binding: Box::new(binding),
        }
    }

    #[must_use]
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn get_name(&self) -> &str {
        &self.name
    }

    pub fn get_description(&self) -> &str {
        &self.description
    }

    pub fn binding(&self) -> &(dyn ParamBinding + 'a) {
        self.binding.as_ref()
    }

    pub fn binding_mut(&mut self) -> &mut (dyn ParamBinding + 'a) {
        self.binding.as_mut()
    }

    pub fn init(&mut self) -> Result<(), SchemaError> {
        if self.name.is_empty() {
            return Err(SchemaError::UnnamedParam);
        }
        Ok(())
    }
}

/// The ordered option declarations of one command.
#[derive(Default)]
pub struct Options<'a> {
    pub(crate) opts: Vec<Opt<'a>>,
}

impl<'a> Options<'a> {
    pub fn new() -> Self {
        Self { opts: Vec::new() }
    }

    #[must_use]
    pub fn with(mut self, opt: Opt<'a>) -> Self {
        self.opts.push(opt);
        self
    }

    pub fn push(&mut self, opt: Opt<'a>) {
        self.opts.push(opt);
    }

    /// Initialize every option, rejecting unnamed or clashing declarations.
    pub fn init(&mut self) -> Result<(), SchemaError> {
        let mut names = HashSet::new();
        let mut shorts = HashSet::new();
        for opt in &mut self.opts {
            opt.init()?;
            if !names.insert(opt.name.clone()) {
                return Err(SchemaError::DuplicateOption(opt.name.clone()));
            }
            if let Some(short) = opt.short {
                if !shorts.insert(short) {
                    return Err(SchemaError::DuplicateShort(short));
                }
            }
        }
        Ok(())
    }

    pub fn iter(&self) -> impl Iterator<Item = &Opt<'a>> {
        self.opts.iter()
    }

    pub fn len(&self) -> usize {
        self.opts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.opts.is_empty()
    }

    pub fn find_long(&mut self, name: &str) -> Option<&mut Opt<'a>> {
        self.opts.iter_mut().find(|opt| opt.name == name)
    }

    pub fn find_short(&mut self, short: char) -> Option<&mut Opt<'a>> {
        self.opts.iter_mut().find(|opt| opt.short == Some(short))
    }
}

impl<'a> FromIterator<Opt<'a>> for Options<'a> {
    fn from_iter<I: IntoIterator<Item = Opt<'a>>>(iter: I) -> Self {
        Self {
            opts: iter.into_iter().collect(),
        }
    }
}

/// The ordered param declarations of one command.
#[derive(Default)]
pub struct Params<'a> {
    pub(crate) params: Vec<Param<'a>>,
}

impl<'a> Params<'a> {
    pub fn new() -> Self {
        Self { params: Vec::new() }
    }

    #[must_use]
    pub fn with(mut self, param: Param<'a>) -> Self {
        self.params.push(param);
        self
    }

    pub fn push(&mut self, param: Param<'a>) {
        self.params.push(param);
    }

    pub fn init(&mut self) -> Result<(), SchemaError> {
        let mut names = HashSet::new();
        for param in &mut self.params {
            param.init()?;
            if !names.insert(param.name.clone()) {
                return Err(SchemaError::DuplicateParam(param.name.clone()));
            }
        }
        Ok(())
    }

    pub fn iter(&self) -> impl Iterator<Item = &Param<'a>> {
        self.params.iter()
    }

    pub fn len(&self) -> usize {
        self.params.len()
    }

    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }
}

impl<'a> FromIterator<Param<'a>> for Params<'a> {
    fn from_iter<I: IntoIterator<Item = Param<'a>>>(iter: I) -> Self {
        Self {
            params: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::{Int, IntFlag, Str, StrSlice};

    #[test]
    fn test_option_requires_name() {
        let mut count = 0;
        let mut opt = Opt::new("", Int::new(&mut count));
        assert_eq!(opt.init(), Err(SchemaError::UnnamedOption));
    }

    #[test]
    fn test_option_name_without_dashes() {
        let mut count = 0;
        let mut opt = Opt::new("--count", Int::new(&mut count));
        assert!(matches!(opt.init(), Err(SchemaError::InvalidName(_))));
    }

    #[test]
    fn test_param_requires_name() {
        let mut file = String::new();
        let mut params = Params::new().with(Param::new("", Str::new(&mut file)));
        assert_eq!(params.init(), Err(SchemaError::UnnamedParam));
    }

    #[test]
    fn test_init_snapshots_default() {
        let mut count = 3;
        let mut name = String::new();
        let mut options = Options::new()
            .with(Opt::new("count", Int::new(&mut count)).short('c'))
            .with(Opt::new("name", Str::new(&mut name)));
        options.init().unwrap();

        let defaults: Vec<&str> = options.iter().map(Opt::default_value).collect();
        assert_eq!(defaults, vec!["3", ""]);

        options
            .find_short('c')
            .unwrap()
            .binding_mut()
            .assign("9")
            .unwrap();
        assert_eq!(options.find_long("count").unwrap().default_value(), "3");
        assert_eq!(options.find_long("count").unwrap().binding().to_string(), "9");
    }

    #[test]
    fn test_duplicate_declarations() {
        let (mut a, mut b) = (0, 0);
        let mut options: Options = [
            Opt::new("verbose", IntFlag::new(&mut a)).short('v'),
            Opt::new("version", IntFlag::new(&mut b)).short('v'),
        ]
        .into_iter()
        .collect();
        assert_eq!(options.init(), Err(SchemaError::DuplicateShort('v')));

        let (mut a, mut b) = (0, 0);
        let mut options = Options::new()
            .with(Opt::new("level", Int::new(&mut a)))
            .with(Opt::new("level", Int::new(&mut b)));
        assert_eq!(
            options.init(),
            Err(SchemaError::DuplicateOption("level".to_string()))
        );
    }

    #[test]
    fn test_duplicate_params() {
        let mut first = String::new();
        let mut rest = Vec::new();
        let mut params = Params::new()
            .with(Param::new("file", Str::new(&mut first)))
            .with(Param::new("file", StrSlice::new(&mut rest)));
        assert_eq!(
            params.init(),
            Err(SchemaError::DuplicateParam("file".to_string()))
        );
    }

    #[test]
    fn test_builder_accessors() {
        let mut count = 0;
        let opt = Opt::new("count", Int::new(&mut count))
            .short('c')
            .description("How many");
        assert_eq!(opt.get_name(), "count");
        assert_eq!(opt.get_short(), Some('c'));
        assert_eq!(opt.get_description(), "How many");
        assert_eq!(opt.binding().type_name(), "int");
    }
}
