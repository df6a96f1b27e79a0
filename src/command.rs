//! A tree of commands, each with its own options and params.
//!
//! Running a command parses its options and params, then either calls its
//! runner or hands the remaining tokens to one of its sub-commands. Every
//! command gets `--help`/`-h`, and commands built with
//! [`Command::logging`] also get `--log-file` and `--log-level`.

use std::path::Path;

use thiserror::Error;

use crate::args::Args;
use crate::help::{generate_command_usage, SubcommandSummary};
use crate::logging::{self, LogSettings};
use crate::parser::ParseError;
use crate::schema::{Opt, Options, Param, Params, SchemaError};
use crate::value::BoolFlag;

/// Callback run with the full command name and the tokens left after params.
pub type Runner<'a> = Box<dyn FnMut(&str, &[String]) -> anyhow::Result<()> + 'a>;

/// Errors that stop a command run.
///
/// `command` is the full name, e.g. `tool deploy`.
#[derive(Debug, Error)]
pub enum CommandError {
    #[error("{command}: {source}")]
    Schema {
        command: String,
        #[source]
        source: SchemaError,
    },

    #[error("{command}: {source}")]
    Parse {
        command: String,
        #[source]
        source: ParseError,
        usage: String,
    },

    #[error("{command}: unknown command {name:?}")]
    UnknownCommand {
        command: String,
        name: String,
        usage: String,
    },

    #[error("{command}: a command is required")]
    MissingCommand { command: String, usage: String },

    #[error("{command}: default command {name:?} is not a sub-command")]
    UnknownDefault { command: String, name: String },

    #[error("{command}: {error}")]
    Run {
        command: String,
        error: anyhow::Error,
    },
}

impl CommandError {
    /// The usage text to show alongside a user error.
    pub fn usage(&self) -> Option<&str> {
        match self {
            CommandError::Parse { usage, .. }
            | CommandError::UnknownCommand { usage, .. }
            | CommandError::MissingCommand { usage, .. } => Some(usage),
            _ => None,
        }
    }

    /// Process exit code: 2 for usage errors, 1 for a failed runner, 254
    /// for a broken command declaration.
    pub fn exit_code(&self) -> i32 {
        match self {
            CommandError::Parse { .. }
            | CommandError::UnknownCommand { .. }
            | CommandError::MissingCommand { .. } => 2,
            CommandError::Run { .. } => 1,
            CommandError::Schema { .. } | CommandError::UnknownDefault { .. } => 254,
        }
    }
}

/// What a successful run ended with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Dispatch {
    /// The command that ran, by full name, and the tokens it was left with.
    Ran { command: String, args: Vec<String> },
    /// `--help` was given; holds the usage text of that command.
    Help(String),
}

/// A command with options, params and optional sub-commands.
pub struct Command<'a> {
    name: String,
    brief: String,
    description: String,
    options: Options<'a>,
    params: Params<'a>,
    subcommands: Vec<Command<'a>>,
    default: Option<String>,
    logging: bool,
    runner: Option<Runner<'a>>,
}

impl<'a> Command<'a> {
    /// Declare a command. An empty name at the root is replaced by the
    /// program's file name.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            brief: String::new(),
            description: String::new(),
            options: Options::new(),
            params: Params::new(),
            subcommands: Vec::new(),
            default: None,
            logging: false,
            runner: None,
        }
    }

    /// One-line summary shown in the parent's sub-command list.
    #[must_use]
    pub fn brief(mut self, brief: impl Into<String>) -> Self {
        self.brief = brief.into();
        self
    }

    #[must_use]
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    #[must_use]
    pub fn option(mut self, opt: Opt<'a>) -> Self {
        self.options.push(opt);
        self
    }

    #[must_use]
    pub fn param(mut self, param: Param<'a>) -> Self {
        self.params.push(param);
        self
    }

    #[must_use]
    pub fn subcommand(mut self, command: Command<'a>) -> Self {
        self.subcommands.push(command);
        self
    }

    /// Run the named sub-command when no command token is given.
    #[must_use]
    pub fn default_subcommand(mut self, name: impl Into<String>) -> Self {
        self.default = Some(name.into());
        self
    }

    /// Add `--log-file` and `--log-level`, and install the log sink once
    /// this command's arguments parse.
    #[must_use]
    pub fn logging(mut self, enabled: bool) -> Self {
        self.logging = enabled;
        self
    }

    /// Run `runner` instead of dispatching to a sub-command.
    #[must_use]
    pub fn on_run<F>(mut self, runner: F) -> Self
    where
        F: FnMut(&str, &[String]) -> anyhow::Result<()> + 'a,
    {
        self.runner = Some(Box::new(runner));
        self
    }

    pub fn get_name(&self) -> &str {
        &self.name
    }

    /// Run over the process arguments.
    pub fn run_env(self) -> Result<Dispatch, CommandError> {
        self.run(Args::from_env())
    }

    /// Run over `args`.
    ///
    /// The command is consumed, so every variable it bound can be read
    /// again once this returns.
    pub fn run(mut self, args: Args) -> Result<Dispatch, CommandError> {
        if self.name.is_empty() {
            self.name = program_name();
        }
        let full_name = self.name.clone();
        self.dispatch(full_name, args)
    }

    fn dispatch(self, full_name: String, mut args: Args) -> Result<Dispatch, CommandError> {
        let Command {
            brief,
            description,
            options: declared,
            mut params,
            subcommands,
            default,
            logging: with_logging,
            runner,
            ..
        } = self;

        let mut help = false;
        let mut log = LogSettings::default();
        let mut options = declared;
        if with_logging {
            for opt in log.options() {
                options.push(opt);
            }
        }
        options.push(
            Opt::new("help", BoolFlag::new(&mut help))
                .short('h')
                .description("Show this usage message"),
        );

        let schema_error = |source| CommandError::Schema {
            command: full_name.clone(),
            source,
        };
        options.init().map_err(schema_error)?;
        params.init().map_err(schema_error)?;
        if let Some(name) = &default {
            if !subcommands.iter().any(|sub| &sub.name == name) {
                return Err(CommandError::UnknownDefault {
                    command: full_name,
                    name: name.clone(),
                });
            }
        }

        let summaries: Vec<SubcommandSummary<'_>> = subcommands
            .iter()
            .map(|sub| SubcommandSummary {
                name: &sub.name,
                brief: &sub.brief,
                is_default: default.as_deref() == Some(sub.name.as_str()),
            })
            .collect();
        let text = [description.as_str(), brief.as_str()]
            .into_iter()
            .find(|text| !text.is_empty());
        let usage = generate_command_usage(&full_name, text, &options, &params, &summaries);
        drop(summaries);

        let parsed = options.parse(&mut args);
        drop(options);
        if let Err(source) = parsed {
            return Err(CommandError::Parse {
                command: full_name,
                source,
                usage,
            });
        }
        if help {
            return Ok(Dispatch::Help(usage));
        }
        if let Err(source) = params.parse(&mut args) {
            return Err(CommandError::Parse {
                command: full_name,
                source,
                usage,
            });
        }
        drop(params);

        if with_logging {
            if let Err(err) = logging::init(&log) {
                eprintln!("{full_name}: {err}");
                eprintln!("{full_name}: logging is disabled");
            }
        }

        if let Some(mut runner) = runner {
            let rest = args.into_vec();
            tracing::debug!(command = full_name.as_str(), args = rest.len(), "run");
            runner(&full_name, &rest).map_err(|error| CommandError::Run {
                command: full_name.clone(),
                error,
            })?;
            return Ok(Dispatch::Ran {
                command: full_name,
                args: rest,
            });
        }
        if subcommands.is_empty() {
            return Ok(Dispatch::Ran {
                command: full_name,
                args: args.into_vec(),
            });
        }

        let wanted = match (args.shift(), default) {
            (Some(name), _) => name,
            (None, Some(name)) => name,
            (None, None) => {
                return Err(CommandError::MissingCommand {
                    command: full_name,
                    usage,
                })
            }
        };
        let Some(sub) = subcommands.into_iter().find(|sub| sub.name == wanted) else {
            return Err(CommandError::UnknownCommand {
                command: full_name,
                name: wanted,
                usage,
            });
        };
        let sub_name = format!("{full_name} {}", sub.name);
        tracing::debug!(command = sub_name.as_str(), "dispatch");
        sub.dispatch(sub_name, args)
    }
}

fn program_name() -> String {
    std::env::args()
        .next()
        .as_deref()
        .and_then(|arg0| Path::new(arg0).file_name())
        .and_then(|name| name.to_str())
        .map(str::to_string)
        .unwrap_or_else(|| "command".to_string())
}
