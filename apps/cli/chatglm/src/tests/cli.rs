// Unit tests for argument parsing

use crate::cli::{Cli, Command};

use std::path::Path;

use clap::{CommandFactory, Parser};

/// **VALUE**: The clap definition is internally consistent.
///
/// **BUG THIS CATCHES**: Would catch duplicate short flags or conflicting global
/// arguments, which clap only reports at runtime.
#[test]
fn given_cli_definition_when_debug_asserted_then_is_valid() {
    Cli::command().debug_assert();
}

/// **VALUE**: Prompt commands accept their sampling options.
///
/// **BUG THIS CATCHES**: Would catch a renamed flag breaking scripts that pass
/// `--top-p`.
#[test]
fn given_invoke_with_options_when_parsed_then_fields_are_set() {
    // GIVEN/WHEN: A full invoke command line
    let cli = Cli::try_parse_from([
        "chatglm",
        "invoke",
        "hello",
        "--model",
        "chatglm_lite",
        "--temperature",
        "0.5",
        "--top-p",
        "0.7",
    ])
    .expect("Should parse");

    // THEN: All options land on the prompt args
    match cli.command {
        Command::Invoke(args) => {
            assert_eq!(args.prompt, "hello");
            assert_eq!(args.model.as_deref(), Some("chatglm_lite"));
            assert_eq!(args.temperature, Some(0.5));
            assert_eq!(args.top_p, Some(0.7));
            assert!(args.request_id.is_none());
        }
        other => panic!("Expected Invoke, got {other:?}"),
    }
}

/// **VALUE**: Global flags work after the subcommand and feed the overrides.
///
/// **BUG THIS CATCHES**: Would catch `global = true` being dropped, which makes
/// `chatglm query ID --debug` a parse error.
#[test]
fn given_global_flags_after_subcommand_when_parsed_then_overrides_are_set() {
    // GIVEN/WHEN: Flags placed after the subcommand
    let cli = Cli::try_parse_from([
        "chatglm",
        "sse",
        "hi",
        "-m",
        "chatglm_std",
        "--debug",
        "--config",
        "/tmp/c.toml",
        "--base-url",
        "http://localhost:1",
    ])
    .expect("Should parse");

    // THEN: Overrides carry flag values and the subcommand model
    let overrides = cli.overrides();
    assert!(overrides.debug);
    assert_eq!(overrides.base_url.as_deref(), Some("http://localhost:1"));
    assert_eq!(overrides.model.as_deref(), Some("chatglm_std"));
    assert_eq!(cli.config.as_deref(), Some(Path::new("/tmp/c.toml")));
}

/// **VALUE**: Query takes the task id positionally and contributes no model.
///
/// **BUG THIS CATCHES**: Would catch the query command requiring a model.
#[test]
fn given_query_command_when_parsed_then_task_id_is_set() {
    // GIVEN/WHEN: Query command
    let cli = Cli::try_parse_from(["chatglm", "query", "task-42"]).expect("Should parse");

    // THEN: Task id is captured, no model override
    assert!(cli.overrides().model.is_none());
    match cli.command {
        Command::Query { task_id } => assert_eq!(task_id, "task-42"),
        other => panic!("Expected Query, got {other:?}"),
    }
}

/// **VALUE**: Prompt commands require a prompt.
///
/// **BUG THIS CATCHES**: Would catch the prompt becoming optional, which would send
/// an empty request.
#[test]
fn given_invoke_without_prompt_when_parsed_then_fails() {
    let result = Cli::try_parse_from(["chatglm", "invoke"]);
    assert!(result.is_err(), "Missing prompt should fail");
}
