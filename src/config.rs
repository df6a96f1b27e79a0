//! JSON configuration describing one script's options and params.

use serde::Deserialize;
use std::collections::{HashMap, HashSet};
use std::fmt;
use thiserror::Error;

use crate::output::to_shell_var_name;
use crate::schema::SchemaError;
use crate::value::ValueError;

/// The default environment variable prefix.
pub const DEFAULT_PREFIX: &str = "ARGBIND_";

/// Errors that can occur during config parsing and validation.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to parse JSON config: {0}")]
    ParseError(#[from] serde_json::Error),

    #[error("argument without a name")]
    MissingName,

    #[error("invalid argument name {0:?}: must not start with '-' or contain '='")]
    InvalidName(String),

    #[error("duplicate argument name: {0}")]
    DuplicateName(String),

    #[error("arguments '{0}' and '{1}' both map to shell variable {2}")]
    VariableClash(String, String, String),

    #[error("invalid short option '{0}': must be a single ASCII letter or digit")]
    InvalidShortOption(char),

    #[error("duplicate short option: -{0}")]
    DuplicateShort(char),

    #[error("type '{1}' cannot be used for param '{0}'")]
    FlagAsParam(String, ValueType),

    #[error("'multiple' cannot be used with type '{1}' on argument '{0}'")]
    MultipleFlag(String, ValueType),

    #[error("param '{0}' cannot have a short option")]
    ParamShort(String),

    #[error("param '{0}' cannot have a default: params are always required")]
    ParamDefault(String),

    #[error("param '{0}' takes multiple values but is not the last param")]
    MultipleNotLast(String),

    #[error("argument '{0}' has type 'choice' but no 'choices'")]
    MissingChoices(String),

    #[error("'choices' on argument '{0}' requires type 'choice'")]
    ChoicesWithoutChoiceType(String),

    #[error("'choices' on argument '{0}' is empty: must have at least one valid value")]
    EmptyChoices(String),

    #[error("'choices' on argument '{0}' has duplicate value: {1}")]
    DuplicateChoice(String, String),

    #[error("invalid schema: {0}")]
    Schema(#[from] SchemaError),

    #[error("invalid default for argument '{name}': {source}")]
    InvalidDefault {
        name: String,
        #[source]
        source: ValueError,
    },
}

/// The kind of value an argument binds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ValueType {
    /// A boolean that takes a value (`--color true`)
    Bool,
    /// A boolean flag: present means true
    Flag,
    /// A repeatable counter flag (`-vvv`)
    Count,
    /// A signed 64-bit integer
    Int,
    /// A floating point number
    Float,
    /// Any string value (default)
    #[default]
    String,
    /// A calendar date, `YYYY-MM-DD`
    Date,
    /// One of a fixed set of `choices`
    Choice,
}

impl ValueType {
    /// Whether this type updates without a value token.
    pub fn is_flag(self) -> bool {
        matches!(self, ValueType::Flag | ValueType::Count)
    }
}

impl fmt::Display for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ValueType::Bool => "bool",
            ValueType::Flag => "flag",
            ValueType::Count => "count",
            ValueType::Int => "int",
            ValueType::Float => "float",
            ValueType::String => "string",
            ValueType::Date => "date",
            ValueType::Choice => "choice",
        };
        f.write_str(name)
    }
}

/// Configuration for a single option or param.
#[derive(Debug, Clone, Deserialize)]
pub struct ArgConfig {
    /// The name of the argument: `--name` for options, and the variable name
    pub name: String,
    /// Short option character (e.g., 'v' for -v); options only
    pub short: Option<char>,
    /// Help text for this argument
    pub help: Option<String>,
    /// The value type
    #[serde(rename = "type", default)]
    pub value_type: ValueType,
    /// Accumulate values instead of holding one
    #[serde(default)]
    pub multiple: bool,
    /// Allowed values for a `choice` argument
    pub choices: Option<Vec<String>>,
    /// Default value, parsed like a command-line token
    pub default: Option<String>,
}

/// Top-level configuration for a script.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// Name of the script, shown in usage text
    pub name: Option<String>,
    /// Description of the script
    pub description: Option<String>,
    /// Version of the script; enables `--version`
    pub version: Option<String>,
    /// Environment variable prefix (default: "ARGBIND_")
    pub prefix: Option<String>,
    /// Named options, in usage order
    #[serde(default)]
    pub options: Vec<ArgConfig>,
    /// Positional params, in consumption order
    #[serde(default)]
    pub params: Vec<ArgConfig>,
}

impl Config {
    /// Parse a JSON string into a Config.
    pub fn from_json(json: &str) -> Result<Config, ConfigError> {
        let config: Config = serde_json::from_str(json)?;
        Ok(config)
    }

    /// Validate the configuration.
    ///
    /// Defaults are checked later, when they are assigned through their
    /// bindings.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut names = HashMap::new();
        let mut shorts = HashSet::new();

        for arg in &self.options {
            Self::validate_arg(arg, &mut names)?;
            if let Some(short) = arg.short {
                if !short.is_ascii_alphanumeric() {
                    return Err(ConfigError::InvalidShortOption(short));
                }
                if !shorts.insert(short) {
                    return Err(ConfigError::DuplicateShort(short));
                }
            }
        }

        for (index, arg) in self.params.iter().enumerate() {
            Self::validate_arg(arg, &mut names)?;
            if arg.value_type.is_flag() {
                return Err(ConfigError::FlagAsParam(arg.name.clone(), arg.value_type));
            }
            if arg.short.is_some() {
                return Err(ConfigError::ParamShort(arg.name.clone()));
            }
            if arg.default.is_some() {
                return Err(ConfigError::ParamDefault(arg.name.clone()));
            }
            if arg.multiple && index + 1 != self.params.len() {
                return Err(ConfigError::MultipleNotLast(arg.name.clone()));
            }
        }

        Ok(())
    }

    /// Validate the parts shared by options and params.
    ///
    /// `names` maps each shell variable name to the argument that claimed it.
    fn validate_arg<'c>(
        arg: &'c ArgConfig,
        names: &mut HashMap<String, &'c str>,
    ) -> Result<(), ConfigError> {
        if arg.name.is_empty() {
            return Err(ConfigError::MissingName);
        }
        if arg.name.starts_with('-') || arg.name.contains('=') {
            return Err(ConfigError::InvalidName(arg.name.clone()));
        }
        let var_name = to_shell_var_name(&arg.name);
        if let Some(previous) = names.insert(var_name.clone(), &arg.name) {
            if previous == arg.name {
                return Err(ConfigError::DuplicateName(arg.name.clone()));
            }
            return Err(ConfigError::VariableClash(
                previous.to_string(),
                arg.name.clone(),
                var_name,
            ));
        }
        if arg.multiple && arg.value_type.is_flag() {
            return Err(ConfigError::MultipleFlag(arg.name.clone(), arg.value_type));
        }
        Self::validate_choices(arg)
    }

    /// Validate the choices field on an argument.
    fn validate_choices(arg: &ArgConfig) -> Result<(), ConfigError> {
        match (&arg.choices, arg.value_type) {
            (None, ValueType::Choice) => Err(ConfigError::MissingChoices(arg.name.clone())),
            (None, _) => Ok(()),
            (Some(_), value_type) if value_type != ValueType::Choice => {
                Err(ConfigError::ChoicesWithoutChoiceType(arg.name.clone()))
            }
            (Some(choices), _) => {
                if choices.is_empty() {
                    return Err(ConfigError::EmptyChoices(arg.name.clone()));
                }
                let mut seen = HashSet::new();
                for choice in choices {
                    if !seen.insert(choice.to_lowercase()) {
                        return Err(ConfigError::DuplicateChoice(
                            arg.name.clone(),
                            choice.clone(),
                        ));
                    }
                }
                Ok(())
            }
        }
    }

    /// Get the effective prefix, using the default if none is set.
    pub fn effective_prefix(&self) -> &str {
        self.prefix.as_deref().unwrap_or(DEFAULT_PREFIX)
    }

    /// Get the name to show in usage text.
    pub fn effective_name(&self) -> &str {
        self.name.as_deref().unwrap_or("script")
    }
}
