//! Sourceable shell files for each script outcome.

use anyhow::Result;
use std::io::Write;
use std::path::PathBuf;
use tempfile::NamedTempFile;

use crate::script::{Outcome, ShellValue};

/// Heredoc delimiter for help output.
const HELP_DELIMITER: &str = "ARGBIND_HELP";
/// Heredoc delimiter for version output.
const VERSION_DELIMITER: &str = "ARGBIND_VERSION";
/// Heredoc delimiter for the usage printed after an error.
const USAGE_DELIMITER: &str = "ARGBIND_USAGE";

/// Exit status of a sourced file when the arguments were rejected.
pub const USAGE_EXIT_CODE: i32 = 2;

/// Escape a string for safe use in a shell double-quoted context.
///
/// Escapes: $, `, \, ", and !
fn escape_shell_value(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '$' | '`' | '\\' | '"' | '!' => {
                escaped.push('\\');
                escaped.push(c);
            }
            '\n' => escaped.push_str("\\n"),
            '\r' => escaped.push_str("\\r"),
            '\t' => escaped.push_str("\\t"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// Convert an argument name to a shell variable name.
///
/// Uppercases, and maps anything outside `[A-Za-z0-9_]` to `_`.
pub(crate) fn to_shell_var_name(name: &str) -> String {
    name.chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() {
                c.to_ascii_uppercase()
            } else {
                '_'
            }
        })
        .collect()
}

/// Render parsed values as shell assignments.
///
/// Scalars are exported. Lists become bash arrays, which cannot be exported.
pub fn values_string(values: &[(String, ShellValue)], prefix: &str) -> String {
    let mut output = String::new();
    for (name, value) in values {
        let var_name = format!("{}{}", prefix, to_shell_var_name(name));
        match value {
            ShellValue::Scalar(value) => {
                output.push_str(&format!(
                    "export {}=\"{}\"\n",
                    var_name,
                    escape_shell_value(value)
                ));
            }
            ShellValue::List(items) => {
                let items: Vec<String> = items
                    .iter()
                    .map(|item| format!("\"{}\"", escape_shell_value(item)))
                    .collect();
                output.push_str(&format!("{}=({})\n", var_name, items.join(" ")));
            }
        }
    }
    output
}

/// Render a rejected command line: the message and usage go to stderr.
pub fn error_string(message: &str, usage: &str) -> String {
    format!(
        "echo \"error: {}\" >&2\n{}exit {}\n",
        escape_shell_value(message),
        heredoc(usage, USAGE_DELIMITER, " >&2"),
        USAGE_EXIT_CODE
    )
}

/// Render help text that prints and exits 0 when sourced.
pub fn help_string(help_text: &str) -> String {
    format!("{}exit 0\n", heredoc(help_text, HELP_DELIMITER, ""))
}

/// Render a version line that prints and exits 0 when sourced.
pub fn version_string(version_text: &str) -> String {
    format!("{}exit 0\n", heredoc(version_text, VERSION_DELIMITER, ""))
}

fn heredoc(text: &str, delimiter: &str, redirect: &str) -> String {
    let newline = if text.ends_with('\n') { "" } else { "\n" };
    format!("cat <<'{delimiter}'{redirect}\n{text}{newline}{delimiter}\n")
}

/// Render any outcome into the content of a sourceable file.
pub fn render(outcome: &Outcome, prefix: &str) -> String {
    match outcome {
        Outcome::Values(values) => values_string(values, prefix),
        Outcome::Help(text) => help_string(text),
        Outcome::Version(text) => version_string(text),
        Outcome::Failed { message, usage } => error_string(message, usage),
    }
}

/// Write the rendered outcome to a temporary file and return its path.
///
/// The file is kept after the process exits; the sourcing script is
/// expected to remove it.
pub fn generate_output(outcome: &Outcome, prefix: &str) -> Result<PathBuf> {
    write_temp_file(&render(outcome, prefix))
}

fn write_temp_file(content: &str) -> Result<PathBuf> {
    let mut file = NamedTempFile::new()?;
    file.write_all(content.as_bytes())?;
    let path = file.into_temp_path().keep()?;
    Ok(path)
}
