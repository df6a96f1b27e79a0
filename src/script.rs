//! Binding a JSON-described script schema and running it over a token list.
//!
//! Each configured option and param gets a storage [`Slot`] that its binding
//! borrows for the length of the parse. Once the schema is dropped, the slots
//! are read back out as shell values.

use chrono::NaiveDate;

use crate::args::Args;
use crate::config::{ArgConfig, Config, ConfigError, ValueType};
use crate::help::{generate_usage, generate_version};
use crate::parser::ParseError;
use crate::schema::{Opt, Options, Param, Params};
use crate::value::{
    Bool, BoolFlag, BoolKind, BoolSlice, Date, DateKind, DateSlice, Enum, EnumSlice, Float,
    FloatKind, FloatSlice, Int, IntFlag, IntKind, IntSlice, Kind, Str, StrSlice,
};

/// A parsed value, ready to be written as a shell variable.
#[derive(Debug, Clone, PartialEq)]
pub enum ShellValue {
    Scalar(String),
    List(Vec<String>),
}

/// What a script run produced.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    /// Every option and param, in declaration order.
    Values(Vec<(String, ShellValue)>),
    /// `--help` was given; holds the usage text.
    Help(String),
    /// `--version` was given; holds the version line.
    Version(String),
    /// The user's arguments were rejected.
    Failed { message: String, usage: String },
}

/// Storage for one configured argument.
#[derive(Debug)]
enum Slot {
    Bool(bool),
    Flag(bool),
    Count(i64),
    Int(i64),
    Float(f64),
    Str(String),
    Date(NaiveDate),
    Choice(String),
    Bools(Vec<bool>),
    Ints(Vec<i64>),
    Floats(Vec<f64>),
    Strs(Vec<String>),
    Dates(Vec<NaiveDate>),
    Choices(Vec<String>),
}

impl Slot {
    fn for_arg(arg: &ArgConfig) -> Slot {
        match (arg.value_type, arg.multiple) {
            (ValueType::Flag, _) => Slot::Flag(false),
            (ValueType::Count, _) => Slot::Count(0),
            (ValueType::Bool, false) => Slot::Bool(false),
            (ValueType::Int, false) => Slot::Int(0),
            (ValueType::Float, false) => Slot::Float(0.0),
            (ValueType::String, false) => Slot::Str(String::new()),
            (ValueType::Date, false) => Slot::Date(DateKind::zero()),
            (ValueType::Choice, false) => Slot::Choice(String::new()),
            (ValueType::Bool, true) => Slot::Bools(Vec::new()),
            (ValueType::Int, true) => Slot::Ints(Vec::new()),
            (ValueType::Float, true) => Slot::Floats(Vec::new()),
            (ValueType::String, true) => Slot::Strs(Vec::new()),
            (ValueType::Date, true) => Slot::Dates(Vec::new()),
            (ValueType::Choice, true) => Slot::Choices(Vec::new()),
        }
    }

    fn into_shell(self) -> ShellValue {
        match self {
            Slot::Bool(v) | Slot::Flag(v) => ShellValue::Scalar(BoolKind::render(&v)),
            Slot::Count(v) | Slot::Int(v) => ShellValue::Scalar(IntKind::render(&v)),
            Slot::Float(v) => ShellValue::Scalar(FloatKind::render(&v)),
            Slot::Str(v) | Slot::Choice(v) => ShellValue::Scalar(v),
            // An unset date exports as empty rather than 0001-01-01.
            Slot::Date(v) if DateKind::is_zero(&v) => ShellValue::Scalar(String::new()),
            Slot::Date(v) => ShellValue::Scalar(DateKind::render(&v)),
            Slot::Bools(v) => list::<BoolKind>(&v),
            Slot::Ints(v) => list::<IntKind>(&v),
            Slot::Floats(v) => list::<FloatKind>(&v),
            Slot::Dates(v) => list::<DateKind>(&v),
            Slot::Strs(v) | Slot::Choices(v) => ShellValue::List(v),
        }
    }
}

fn list<K: Kind>(values: &[K::Value]) -> ShellValue {
    ShellValue::List(values.iter().map(K::render).collect())
}

fn choice_mapping(arg: &ArgConfig) -> Vec<(String, String)> {
    arg.choices
        .iter()
        .flatten()
        .map(|choice| (choice.clone(), choice.clone()))
        .collect()
}

fn bind_option<'a>(arg: &ArgConfig, slot: &'a mut Slot) -> Result<Opt<'a>, ConfigError> {
    let name = arg.name.as_str();
    let mut opt = match slot {
        Slot::Bool(v) => Opt::new(name, Bool::new(v)),
        Slot::Flag(v) => Opt::new(name, BoolFlag::new(v)),
        Slot::Count(v) => Opt::new(name, IntFlag::new(v)),
        Slot::Int(v) => Opt::new(name, Int::new(v)),
        Slot::Float(v) => Opt::new(name, Float::new(v)),
        Slot::Str(v) => Opt::new(name, Str::new(v)),
        Slot::Date(v) => Opt::new(name, Date::new(v)),
        Slot::Choice(v) => Opt::new(name, Enum::new(v, choice_mapping(arg))),
        Slot::Bools(v) => Opt::new(name, BoolSlice::new(v)),
        Slot::Ints(v) => Opt::new(name, IntSlice::new(v)),
        Slot::Floats(v) => Opt::new(name, FloatSlice::new(v)),
        Slot::Strs(v) => Opt::new(name, StrSlice::new(v)),
        Slot::Dates(v) => Opt::new(name, DateSlice::new(v)),
        Slot::Choices(v) => Opt::new(name, EnumSlice::new(v, choice_mapping(arg))),
    };
    if let Some(short) = arg.short {
        opt = opt.short(short);
    }
    if let Some(help) = &arg.help {
        opt = opt.description(help.as_str());
    }
    if let Some(default) = &arg.default {
        opt.binding_mut()
            .assign(default)
            .map_err(|source| ConfigError::InvalidDefault {
                name: arg.name.clone(),
                source,
            })?;
    }
    Ok(opt)
}

fn bind_param<'a>(arg: &ArgConfig, slot: &'a mut Slot) -> Result<Param<'a>, ConfigError> {
    let name = arg.name.as_str();
    let param = match slot {
        Slot::Flag(_) | Slot::Count(_) => {
            return Err(ConfigError::FlagAsParam(arg.name.clone(), arg.value_type))
        }
        Slot::Bool(v) => Param::new(name, Bool::new(v)),
        Slot::Int(v) => Param::new(name, Int::new(v)),
        Slot::Float(v) => Param::new(name, Float::new(v)),
        Slot::Str(v) => Param::new(name, Str::new(v)),
        Slot::Date(v) => Param::new(name, Date::new(v)),
        Slot::Choice(v) => Param::new(name, Enum::new(v, choice_mapping(arg))),
        Slot::Bools(v) => Param::new(name, BoolSlice::new(v)),
        Slot::Ints(v) => Param::new(name, IntSlice::new(v)),
        Slot::Floats(v) => Param::new(name, FloatSlice::new(v)),
        Slot::Strs(v) => Param::new(name, StrSlice::new(v)),
        Slot::Dates(v) => Param::new(name, DateSlice::new(v)),
        Slot::Choices(v) => Param::new(name, EnumSlice::new(v, choice_mapping(arg))),
    };
    Ok(match &arg.help {
        Some(help) => param.description(help.as_str()),
        None => param,
    })
}

fn failed(err: impl ToString, usage: String) -> Outcome {
    Outcome::Failed {
        message: err.to_string(),
        usage,
    }
}

/// Parse `args` against the script described by `config`.
///
/// Errors in the config itself come back as `Err`. Errors in the user's
/// arguments are an [`Outcome::Failed`] carrying the usage text. A
/// `--help` or `--version` seen among the options wins over any param
/// errors that would follow.
pub fn run(config: &Config, args: Vec<String>) -> Result<Outcome, ConfigError> {
    config.validate()?;

    let mut option_slots: Vec<Slot> = config.options.iter().map(Slot::for_arg).collect();
    let mut param_slots: Vec<Slot> = config.params.iter().map(Slot::for_arg).collect();
    let mut help = false;
    let mut version = false;
    let mut args = Args::from(args);

    let mut options = Options::new();
    for (arg, slot) in config.options.iter().zip(option_slots.iter_mut()) {
        options.push(bind_option(arg, slot)?);
    }
    options.push(
        Opt::new("help", BoolFlag::new(&mut help))
            .short('h')
            .description("Print help"),
    );
    if config.version.is_some() {
        options.push(
            Opt::new("version", BoolFlag::new(&mut version))
                .short('V')
                .description("Print version"),
        );
    }
    let mut params = Params::new();
    for (arg, slot) in config.params.iter().zip(param_slots.iter_mut()) {
        params.push(bind_param(arg, slot)?);
    }
    options.init()?;
    params.init()?;

    let name = config.effective_name();
    let usage = generate_usage(name, config.description.as_deref(), &options, &params);

    let parsed = options.parse(&mut args);
    drop(options);
    if let Err(err) = parsed {
        tracing::debug!(error = %err, "option parse failed");
        return Ok(failed(err, usage));
    }
    if help {
        return Ok(Outcome::Help(usage));
    }
    if version {
        return Ok(Outcome::Version(generate_version(
            name,
            config.version.as_deref(),
        )));
    }

    let parsed = params.parse(&mut args);
    drop(params);
    if let Err(err) = parsed {
        tracing::debug!(error = %err, "param parse failed");
        return Ok(failed(err, usage));
    }
    if let Some(extra) = args.shift() {
        return Ok(failed(ParseError::Unexpected(extra), usage));
    }

    let names = config.options.iter().chain(&config.params).map(|arg| arg.name.clone());
    let slots = option_slots.into_iter().chain(param_slots);
    let values: Vec<(String, ShellValue)> = names.zip(slots.map(Slot::into_shell)).collect();
    tracing::debug!(count = values.len(), "script arguments parsed");
    Ok(Outcome::Values(values))
}
