//! Option and param parsing over a shared token cursor.

use crate::args::Args;
use crate::binding::ConsumeError;
use crate::schema::{Options, Params};
use crate::value::ValueError;
use thiserror::Error;

/// Errors that can occur while parsing user-supplied arguments.
///
/// `arg` is the option as typed (`--count`, `-c`) or the param name.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("{0}: unknown option")]
    UnknownOption(String),

    #[error("{0}: unexpected argument")]
    Unexpected(String),

    #[error("{arg}: requires a value")]
    MissingValue { arg: String },

    #[error("{arg}: {source}")]
    InvalidValue {
        arg: String,
        #[source]
        source: ValueError,
    },
}

impl ParseError {
    fn invalid(arg: String, source: ValueError) -> Self {
        ParseError::InvalidValue { arg, source }
    }

    fn consume(arg: &str, err: ConsumeError) -> Self {
        match err {
            ConsumeError::MissingValue => ParseError::MissingValue {
                arg: arg.to_string(),
            },
            ConsumeError::Value(source) => ParseError::invalid(arg.to_string(), source),
        }
    }
}

/// Result of a parse phase.
pub type ParseResult = Result<(), ParseError>;

/// Run the options phase, then the params phase, over one cursor.
///
/// Tokens left over after the last param stay in `args`. The first error
/// stops the parse. Bindings assigned before it keep their new values.
pub fn parse_args(options: &mut Options<'_>, params: &mut Params<'_>, args: &mut Args) -> ParseResult {
    options.parse(args)?;
    params.parse(args)
}

impl Options<'_> {
    /// Consume the leading run of option tokens from `args`.
    ///
    /// Scanning stops at the first token that is not option syntax (left in
    /// place) or after a `--` separator (consumed).
    pub fn parse(&mut self, args: &mut Args) -> ParseResult {
        while let Some(arg) = args.peek() {
            if !arg.starts_with('-') || arg == "-" {
                break;
            }
            let Some(arg) = args.shift() else {
                break;
            };
            if arg == "--" {
                tracing::trace!("end of options marker");
                break;
            }
            if let Some(long) = arg.strip_prefix("--") {
                self.parse_long(long, args)?;
            } else {
                self.parse_short(&arg[1..], args)?;
            }
        }
        Ok(())
    }

    fn parse_long(&mut self, arg: &str, args: &mut Args) -> ParseResult {
        if let Some(name) = arg.strip_prefix("no-") {
            let opt = self
                .find_long(name)
                .ok_or_else(|| ParseError::UnknownOption(format!("--{arg}")))?;
            tracing::trace!(option = name, "reset");
            opt.binding_mut().reset();
            return Ok(());
        }

        let (name, inline) = match arg.split_once('=') {
            Some((name, value)) => (name, Some(value)),
            None => (arg, None),
        };
        let label = format!("--{name}");
        let opt = self
            .find_long(name)
            .ok_or_else(|| ParseError::UnknownOption(format!("--{arg}")))?;
        let binding = opt.binding_mut();

        if let Some(value) = inline {
            tracing::trace!(option = name, value, "assign inline value");
            return binding
                .assign(value)
                .map_err(|source| ParseError::invalid(label, source));
        }
        if let Some(flag) = binding.as_flag() {
            tracing::trace!(option = name, "flag update");
            flag.update();
            return Ok(());
        }
        let value = args
            .shift()
            .ok_or_else(|| ParseError::MissingValue { arg: label.clone() })?;
        tracing::trace!(option = name, value = value.as_str(), "assign next token");
        binding
            .assign(&value)
            .map_err(|source| ParseError::invalid(label, source))
    }

    fn parse_short(&mut self, cluster: &str, args: &mut Args) -> ParseResult {
        let mut chars = cluster.chars();
        while let Some(short) = chars.next() {
            let label = format!("-{short}");
            let opt = self
                .find_short(short)
                .ok_or_else(|| ParseError::UnknownOption(label.clone()))?;
            let binding = opt.binding_mut();

            if let Some(flag) = binding.as_flag() {
                tracing::trace!(option = %short, "flag update");
                flag.update();
                continue;
            }

            let rest = chars.as_str();
            let value = if !rest.is_empty() {
                rest.to_string()
            } else {
                args.shift()
                    .ok_or_else(|| ParseError::MissingValue { arg: label.clone() })?
            };
            tracing::trace!(option = %short, value = value.as_str(), "assign value");
            return binding
                .assign(&value)
                .map_err(|source| ParseError::invalid(label, source));
        }
        Ok(())
    }
}

impl Params<'_> {
    /// Feed the remaining tokens to each param in declaration order.
    pub fn parse(&mut self, args: &mut Args) -> ParseResult {
        for param in &mut self.params {
            let name = param.get_name().to_string();
            tracing::trace!(param = name.as_str(), remaining = args.len(), "consume");
            param
                .binding_mut()
                .consume(args)
                .map_err(|err| ParseError::consume(&name, err))?;
        }
        Ok(())
    }
}
