//! CLI parsing and execution contracts.

use clap::Parser;
use std::io::{Cursor, Write};
use undofs::config::UndoConfig;
use undofs::error::ApiError;
use undofs::script::Mode;
use undofs::tooling::cli::{Cli, CliContext, Commands};

fn context() -> CliContext {
    let mut config = UndoConfig::default();
    config.engine.table_capacity = 12301;
    CliContext::from_config(config)
}

fn script_file(contents: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(file, "{}", contents).unwrap();
    file
}

#[test]
fn parses_each_subcommand() {
    let cli = Cli::try_parse_from(["undofs", "history"]).unwrap();
    assert_eq!(cli.command.mode(), Mode::History);
    assert_eq!(cli.format, "text");
    assert!(!cli.summary);

    let cli = Cli::try_parse_from(["undofs", "tail", "--input", "script.txt"]).unwrap();
    assert_eq!(cli.command.mode(), Mode::Tail);
    assert_eq!(
        cli.command.input().map(|p| p.to_string_lossy().into_owned()),
        Some("script.txt".to_string())
    );

    let cli = Cli::try_parse_from(["undofs", "--format", "json", "--summary", "flat"]).unwrap();
    assert_eq!(cli.command.mode(), Mode::Flat);
    assert_eq!(cli.format, "json");
    assert!(cli.summary);
}

#[test]
fn history_capacity_flag_parses() {
    let cli = Cli::try_parse_from(["undofs", "history", "--capacity", "7"]).unwrap();
    match cli.command {
        Commands::History { capacity, input } => {
            assert_eq!(capacity, Some(7));
            assert!(input.is_none());
        }
        _ => panic!("expected history subcommand"),
    }
}

#[test]
fn rejects_unknown_subcommand_and_missing_subcommand() {
    assert!(Cli::try_parse_from(["undofs", "replay"]).is_err());
    assert!(Cli::try_parse_from(["undofs"]).is_err());
    assert!(Cli::try_parse_from(["undofs", "flat", "--capacity", "3"]).is_err());
}

#[test]
fn global_flags_accepted_after_subcommand() {
    let cli = Cli::try_parse_from(["undofs", "history", "--log-level", "trace"]).unwrap();
    assert_eq!(cli.log_level.as_deref(), Some("trace"));
}

#[test]
fn execute_history_session_text() {
    let command = Commands::History {
        input: None,
        capacity: None,
    };
    let execution = context()
        .execute(&command, Cursor::new("3 4\nNEW docs/\nNEW docs\nLIST\n"))
        .unwrap();
    assert_eq!(
        execution.output,
        "docs/\nERROR: cannot execute NEW docs\ndocs/\n"
    );
}

#[test]
fn execute_reads_input_file() {
    let file = script_file("4 2\nfirst\nsecond\nthird\nfourth\n");
    let command = Commands::Tail {
        input: Some(file.path().to_path_buf()),
    };
    let execution = context().execute_from_source(&command).unwrap();
    assert_eq!(execution.output, "third\nfourth\n");
}

#[test]
fn execute_missing_input_file_is_script_error() {
    let command = Commands::Flat {
        input: Some("/nonexistent/undofs-script.txt".into()),
    };
    let result = context().execute_from_source(&command);
    assert!(matches!(result, Err(ApiError::Script(_))));
}

#[test]
fn missing_header_capacity_is_an_error() {
    let command = Commands::History {
        input: None,
        capacity: None,
    };
    let result = context().execute(&command, Cursor::new("1\nLIST\n"));
    assert!(result.is_err());
}

#[test]
fn json_output_and_summary() {
    let command = Commands::History {
        input: None,
        capacity: None,
    };
    let execution = context()
        .with_format("json")
        .unwrap()
        .with_summary(true)
        .execute(&command, Cursor::new("2 2\nNEW a\nUNDO 3\n"))
        .unwrap();

    let lines: Vec<serde_json::Value> = execution
        .output
        .lines()
        .map(|line| serde_json::from_str(line).unwrap())
        .collect();
    assert_eq!(lines.len(), 2);
    assert_eq!(lines[0]["kind"], "listing");
    assert_eq!(lines[0]["command"], "NEW a");
    assert_eq!(lines[1]["kind"], "error");
    assert_eq!(lines[1]["message"], "ERROR: cannot execute UNDO 3");

    let summary: serde_json::Value =
        serde_json::from_str(&execution.summary.unwrap()).unwrap();
    assert_eq!(summary["commands"], 2);
    assert_eq!(summary["rejected"], 1);
    assert_eq!(summary["history_depth"], 2);
}

#[test]
fn invalid_format_rejected() {
    assert!(matches!(
        context().with_format("yaml"),
        Err(ApiError::ConfigError(_))
    ));
}

#[test]
fn config_file_drives_context() {
    let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
    writeln!(
        file,
        "[engine]\ntable_capacity = 12301\nhistory_capacity = 1\necho_listing = false"
    )
    .unwrap();

    let context = CliContext::new(Some(file.path().to_path_buf())).unwrap();
    assert_eq!(context.config().engine.history_capacity, Some(1));

    let command = Commands::History {
        input: None,
        capacity: None,
    };
    // Header asks for 5 snapshots; configuration caps history at 1.
    let execution = context
        .execute(&command, Cursor::new("4 5\nNEW a\nNEW b\nUNDO 2\nLIST\n"))
        .unwrap();
    let mut lines = execution.output.lines();
    assert_eq!(lines.next(), Some("ERROR: cannot execute UNDO 2"));
    let mut listed: Vec<&str> = lines.next().unwrap().split(' ').collect();
    listed.sort();
    assert_eq!(listed, vec!["a", "b"]);
    assert_eq!(lines.next(), None);
}

#[test]
fn invalid_config_file_rejected() {
    let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
    writeln!(file, "[engine]\ntable_capacity = 0").unwrap();
    let result = CliContext::new(Some(file.path().to_path_buf()));
    assert!(matches!(result, Err(ApiError::ConfigError(_))));
}
