use argbind::output::render;
use argbind::{generate_output, run, Config, Outcome};
use std::fs;

const CONFIG: &str = r#"{
    "name": "backup",
    "version": "0.3.0",
    "prefix": "BK_",
    "options": [
        {"name": "verbose", "short": "v", "type": "count", "help": "More output"},
        {"name": "level", "type": "choice", "choices": ["fast", "best"], "default": "fast"},
        {"name": "exclude", "short": "x", "multiple": true}
    ],
    "params": [
        {"name": "source"},
        {"name": "dest-dirs", "multiple": true}
    ]
}"#;

fn tokens(list: &[&str]) -> Vec<String> {
    list.iter().map(|t| t.to_string()).collect()
}

#[test]
fn test_values_render_as_shell_assignments() {
    let config = Config::from_json(CONFIG).unwrap();
    let outcome = run(
        &config,
        tokens(&["-vv", "--level", "BEST", "-x", "*.tmp", "/home", "/mnt/a", "/mnt/b c"]),
    )
    .unwrap();

    assert_eq!(
        render(&outcome, config.effective_prefix()),
        "export BK_VERBOSE=\"2\"\n\
         export BK_LEVEL=\"best\"\n\
         BK_EXCLUDE=(\"*.tmp\")\n\
         export BK_SOURCE=\"/home\"\n\
         BK_DEST_DIRS=(\"/mnt/a\" \"/mnt/b c\")\n"
    );
}

#[test]
fn test_failure_file_exits_with_usage() {
    let config = Config::from_json(CONFIG).unwrap();
    let outcome = run(&config, tokens(&["--level", "slow", "/home"])).unwrap();
    let path = generate_output(&outcome, config.effective_prefix()).unwrap();
    let content = fs::read_to_string(&path).unwrap();
    fs::remove_file(&path).unwrap();

    assert!(content.starts_with("echo \"error: --level: bad enum value \\\"slow\\\"\" >&2\n"));
    assert!(content.contains("Usage: backup [options] source dest-dirs\n"));
    assert!(content.contains("--level <fast|best> [default fast]"));
    assert!(content.ends_with("ARGBIND_USAGE\nexit 2\n"));
}

#[test]
fn test_help_and_version_outcomes() {
    let config = Config::from_json(CONFIG).unwrap();

    let help = run(&config, tokens(&["-h"])).unwrap();
    let rendered = render(&help, "BK_");
    assert!(rendered.starts_with("cat <<'ARGBIND_HELP'\nUsage: backup"));
    assert!(rendered.contains("    --verbose, -v <int>\n      More output\n"));
    assert!(rendered.ends_with("ARGBIND_HELP\nexit 0\n"));

    assert_eq!(
        run(&config, tokens(&["--version", "ignored"])).unwrap(),
        Outcome::Version("backup 0.3.0\n".to_string())
    );
}

#[test]
fn test_invalid_config_is_an_error_not_an_outcome() {
    let config = Config::from_json(
        r#"{"params": [{"name": "all", "multiple": true}, {"name": "last"}]}"#,
    )
    .unwrap();
    let err = run(&config, tokens(&["a"])).unwrap_err();
    assert_eq!(
        err.to_string(),
        "param 'all' takes multiple values but is not the last param"
    );
}
