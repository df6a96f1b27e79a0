//! argbind - typed argument binding for shell scripts.

use anyhow::{bail, Context, Result};
use argbind::logging::{self, LogLevel, LogSettings};
use argbind::{generate_output, generate_version, run, Config, Outcome};
use clap::{Parser, Subcommand};

/// Typed argument binding for shell scripts.
#[derive(Parser, Debug)]
#[command(name = "argbind", version, about, disable_help_subcommand = true)]
struct Cli {
    /// Log destination: a path, stderr or stdout
    #[arg(long, global = true)]
    log_file: Option<String>,

    /// Log level: debug, info, warn, error or none
    #[arg(long, global = true, default_value = "info")]
    log_level: LogLevel,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Parse script arguments and write a sourceable file
    Parse {
        /// JSON configuration for the target script
        #[arg(long)]
        config: String,

        /// Environment variable prefix (overrides config)
        #[arg(long)]
        prefix: Option<String>,

        /// Arguments to parse for the target script
        #[arg(last = true)]
        args: Vec<String>,
    },

    /// Print help text for the target script
    Help {
        /// JSON configuration for the target script
        #[arg(long)]
        config: String,
    },

    /// Print version of the target script
    Version {
        /// JSON configuration for the target script
        #[arg(long)]
        config: String,
    },
}

fn load_config(json: &str) -> Result<Config> {
    let config = Config::from_json(json).context("failed to parse config JSON")?;
    config.validate().context("invalid config")?;
    Ok(config)
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let settings = LogSettings {
        file: cli.log_file.unwrap_or_default(),
        level: cli.log_level,
    };
    if let Err(err) = logging::init(&settings) {
        eprintln!("argbind: {err}; continuing without logging");
    }

    match cli.command {
        Commands::Parse {
            config,
            prefix,
            args,
        } => {
            let cfg = load_config(&config)?;
            let effective_prefix = prefix.as_deref().unwrap_or_else(|| cfg.effective_prefix());

            let outcome = run(&cfg, args).context("invalid config")?;
            let path = generate_output(&outcome, effective_prefix)
                .context("failed to generate output file")?;

            println!("{}", path.display());
        }
        Commands::Help { config } => {
            let cfg = load_config(&config)?;
            match run(&cfg, vec!["--help".to_string()]).context("invalid config")? {
                Outcome::Help(usage) => print!("{usage}"),
                other => bail!("unexpected outcome for --help: {other:?}"),
            }
        }
        Commands::Version { config } => {
            let cfg = load_config(&config)?;
            print!(
                "{}",
                generate_version(cfg.effective_name(), cfg.version.as_deref())
            );
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_parse_subcommand_parses_config() {
        let cli = Cli::try_parse_from(["argbind", "parse", "--config", r#"{"name":"test"}"#, "--"])
            .unwrap();

        match cli.command {
            Commands::Parse {
                config,
                prefix,
                args,
            } => {
                assert_eq!(config, r#"{"name":"test"}"#);
                assert!(prefix.is_none());
                assert!(args.is_empty());
            }
            _ => panic!("Expected Parse command"),
        }
        assert_eq!(cli.log_level, LogLevel::Info);
        assert!(cli.log_file.is_none());
    }

    #[test]
    fn test_parse_subcommand_parses_args() {
        let cli = Cli::try_parse_from([
            "argbind",
            "parse",
            "--config",
            r#"{"name":"test"}"#,
            "--",
            "-v",
            "--output",
            "file.txt",
            "input.txt",
        ])
        .unwrap();

        match cli.command {
            Commands::Parse { args, .. } => {
                assert_eq!(args, vec!["-v", "--output", "file.txt", "input.txt"]);
            }
            _ => panic!("Expected Parse command"),
        }
    }

    #[test]
    fn test_global_log_options() {
        let cli = Cli::try_parse_from([
            "argbind",
            "help",
            "--config",
            "{}",
            "--log-file",
            "stderr",
            "--log-level",
            "DEBUG",
        ])
        .unwrap();
        assert_eq!(cli.log_file.as_deref(), Some("stderr"));
        assert_eq!(cli.log_level, LogLevel::Debug);
    }

    #[test]
    fn test_bad_log_level_is_rejected() {
        let result = Cli::try_parse_from([
            "argbind",
            "--log-level",
            "chatty",
            "version",
            "--config",
            "{}",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_parse_subcommand_requires_config() {
        let result = Cli::try_parse_from(["argbind", "parse", "--"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_cli_requires_subcommand() {
        let result = Cli::try_parse_from(["argbind"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_cli_help() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_prefix_priority() {
        let cfg = load_config(r#"{"name":"test","prefix":"CONFIG_"}"#).unwrap();
        let cli_prefix = Some("CLI_".to_string());
        assert_eq!(
            cli_prefix.as_deref().unwrap_or_else(|| cfg.effective_prefix()),
            "CLI_"
        );
        assert_eq!(cfg.effective_prefix(), "CONFIG_");

        let cfg = load_config(r#"{"name":"test"}"#).unwrap();
        assert_eq!(cfg.effective_prefix(), "ARGBIND_");
    }

    #[test]
    fn test_load_config_rejects_invalid() {
        let err = load_config(r#"{"params": [{"name": "q", "type": "flag"}]}"#).unwrap_err();
        assert_eq!(err.to_string(), "invalid config");
    }
}
