//! argbind - bind command-line options and params to typed variables.
//!
//! A schema is a list of [`Opt`]s and [`Param`]s, each holding a binding
//! that borrows a caller variable. Parsing walks an [`Args`] cursor and
//! assigns through those bindings:
//!
//! ```
//! use argbind::{parse_args, Args, Int, IntFlag, Opt, Options, Param, Params, Str};
//!
//! let (mut count, mut verbose, mut file) = (0, 0, String::new());
//! {
//!     let mut options = Options::new()
//!         .with(Opt::new("count", Int::new(&mut count)).short('c'))
//!         .with(Opt::new("verbose", IntFlag::new(&mut verbose)).short('v'));
//!     let mut params = Params::new().with(Param::new("file", Str::new(&mut file)));
//!     options.init().unwrap();
//!     params.init().unwrap();
//!     parse_args(&mut options, &mut params, &mut Args::new(["-vvc", "5", "report.txt"])).unwrap();
//! }
//! assert_eq!((count, verbose, file.as_str()), (5, 2, "report.txt"));
//! ```
//!
//! [`Command`] arranges schemas into a tree of sub-commands with built-in
//! `--help`. The [`script`] and [`output`] modules drive the same engine
//! from a JSON description, for use from shell scripts.

pub mod args;
pub mod binding;
pub mod command;
pub mod config;
pub mod help;
pub mod logging;
pub mod output;
pub mod parser;
pub mod schema;
pub mod script;
pub mod value;

pub use args::Args;
pub use binding::{Binding, ConsumeError, Flag, ParamBinding};
pub use command::{Command, CommandError, Dispatch};
pub use config::{ArgConfig, Config, ConfigError, ValueType};
pub use help::{generate_command_usage, generate_usage, generate_version, SubcommandSummary};
pub use logging::{LogError, LogLevel, LogSettings};
pub use output::generate_output;
pub use parser::{parse_args, ParseError, ParseResult};
pub use schema::{Opt, Options, Param, Params, SchemaError};
pub use script::{run, Outcome, ShellValue};
pub use value::{
    Bool, BoolFlag, BoolSlice, Date, DateSlice, Enum, EnumSlice, Float, FloatSlice, Int, IntFlag,
    IntSlice, Str, StrSlice, ValueError,
};
