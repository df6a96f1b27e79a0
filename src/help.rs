//! Usage and version text generation from a declared schema.

use crate::schema::{Options, Params};

/// One row of the "Sub-commands" section.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubcommandSummary<'s> {
    pub name: &'s str,
    pub brief: &'s str,
    pub is_default: bool,
}

/// Generate the usage text for a command.
///
/// Option defaults come from the snapshot taken by [`Options::init`], so
/// rendering after a parse still shows the declared defaults.
pub fn generate_usage(
    name: &str,
    description: Option<&str>,
    options: &Options<'_>,
    params: &Params<'_>,
) -> String {
    generate_command_usage(name, description, options, params, &[])
}

/// Generate the usage text for a command that may have sub-commands.
///
/// Without params, the header ends in `command [args...]` and a
/// "Sub-commands" section lists each name with its brief.
pub fn generate_command_usage(
    name: &str,
    description: Option<&str>,
    options: &Options<'_>,
    params: &Params<'_>,
    subcommands: &[SubcommandSummary<'_>],
) -> String {
    let mut usage = String::new();

    if let Some(description) = description.filter(|d| !d.is_empty()) {
        usage.push_str(description);
        usage.push_str("\n\n");
    }

    usage.push_str(&format!("Usage: {name}"));
    if !options.is_empty() {
        usage.push_str(" [options]");
    }
    for param in params.iter() {
        usage.push(' ');
        usage.push_str(param.get_name());
    }
    if params.is_empty() && !subcommands.is_empty() {
        usage.push_str(" command [args...]");
    }
    usage.push('\n');

    if !options.is_empty() {
        usage.push_str("  Options\n");
        for opt in options.iter() {
            usage.push_str(&format!("    --{}", opt.get_name()));
            if let Some(short) = opt.get_short() {
                usage.push_str(&format!(", -{short}"));
            }
            usage.push_str(&format!(" <{}>", opt.binding().type_name()));
            if !opt.default_value().is_empty() {
                usage.push_str(&format!(" [default {}]", opt.default_value()));
            }
            usage.push('\n');
            push_description(&mut usage, opt.get_description());
        }
    }

    if !params.is_empty() {
        usage.push_str("  Params\n");
        for param in params.iter() {
            usage.push_str(&format!(
                "    {} <{}>\n",
                param.get_name(),
                param.binding().type_name()
            ));
            push_description(&mut usage, param.get_description());
        }
    }

    if !subcommands.is_empty() {
        usage.push_str("  Sub-commands\n");
        let width = subcommands
            .iter()
            .map(|sub| sub.name.chars().count())
            .max()
            .unwrap_or(0);
        for sub in subcommands {
            let mut line = format!("    {:<width$}", sub.name);
            if !sub.brief.is_empty() {
                line.push_str("  ");
                line.push_str(sub.brief);
            }
            if sub.is_default {
                line.push_str(" (default)");
            }
            usage.push_str(line.trim_end());
            usage.push('\n');
        }
    }

    usage
}

fn push_description(usage: &mut String, description: &str) {
    for line in description.lines() {
        usage.push_str(&format!("      {line}\n"));
    }
}

/// Generate the version line: the name, then the version if one is set.
pub fn generate_version(name: &str, version: Option<&str>) -> String {
    let mut text = name.to_string();
    if let Some(version) = version {
        text.push(' ');
        text.push_str(version);
    }
    text.push('\n');
    text
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::args::Args;
    use crate::logging::LogSettings;
    use crate::schema::{Opt, Param};
    use crate::value::{Int, IntFlag, Str, StrSlice};

    #[test]
    fn test_generate_usage_all_sections() {
        let (mut count, mut verbose, mut file, mut rest) = (3, 0, String::new(), Vec::new());
        let mut options = Options::new()
            .with(
                Opt::new("count", Int::new(&mut count))
                    .short('c')
                    .description("How many times"),
            )
            .with(Opt::new("verbose", IntFlag::new(&mut verbose)).short('v'));
        let mut params = Params::new()
            .with(Param::new("file", Str::new(&mut file)).description("Input file"))
            .with(Param::new("rest", StrSlice::new(&mut rest)));
        options.init().unwrap();
        params.init().unwrap();

        let usage = generate_usage("tool", Some("Does things"), &options, &params);
        let expected = "\
Does things

Usage: tool [options] file rest
  Options
    --count, -c <int> [default 3]
      How many times
    --verbose, -v <int>
  Params
    file <string>
      Input file
    rest <string...>
";
        assert_eq!(usage, expected);
    }

    #[test]
    fn test_generate_usage_minimal() {
        let usage = generate_usage("tool", None, &Options::new(), &Params::new());
        assert_eq!(usage, "Usage: tool\n");
    }

    #[test]
    fn test_default_is_not_the_parsed_value() {
        let mut count = 3;
        let mut options = Options::new().with(Opt::new("count", Int::new(&mut count)));
        options.init().unwrap();
        options.parse(&mut Args::new(["--count=8"])).unwrap();

        let usage = generate_usage("tool", None, &options, &Params::new());
        assert!(usage.contains("--count <int> [default 3]"));
        assert!(!usage.contains("default 8"));
    }

    #[test]
    fn test_enum_type_label() {
        let mut settings = LogSettings::default();
        let mut options: Options = settings.options().into_iter().collect();
        options.init().unwrap();

        let usage = generate_usage("tool", None, &options, &Params::new());
        assert!(usage.contains("--log-file <string>"));
        assert!(usage.contains("--log-level <debug|info|warn|error|none> [default info]"));
    }

    #[test]
    fn test_subcommand_section() {
        let subcommands = [
            SubcommandSummary {
                name: "deploy",
                brief: "Deploy a build",
                is_default: false,
            },
            SubcommandSummary {
                name: "ls",
                brief: "",
                is_default: true,
            },
        ];
        let usage =
            generate_command_usage("tool", None, &Options::new(), &Params::new(), &subcommands);
        let expected = "\
Usage: tool command [args...]
  Sub-commands
    deploy  Deploy a build
    ls     (default)
";
        assert_eq!(usage, expected);
    }

    #[test]
    fn test_generate_version() {
        assert_eq!(generate_version("tool", Some("1.2.3")), "tool 1.2.3\n");
        assert_eq!(generate_version("tool", None), "tool\n");
    }
}
