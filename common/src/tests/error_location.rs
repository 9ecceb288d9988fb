use crate::ErrorLocation;
use std::panic::Location;

/// **VALUE**: Verifies that `ErrorLocation` points at the call site that created it.
///
/// **WHY THIS MATTERS**: Every error in the workspace embeds an `ErrorLocation`.
/// When a token fails to sign or a request is rejected, the location is the only
/// pointer back to the failing line.
///
/// **BUG THIS CATCHES**: Would catch if `Location::caller()` stops propagating
/// through `#[track_caller]`, making every error report the constructor instead.
#[test]
fn given_track_caller_helper_when_called_twice_then_lines_differ() {
    // GIVEN: A helper that records its caller
    #[track_caller]
    fn capture() -> ErrorLocation {
        ErrorLocation::from(Location::caller())
    }

    // WHEN: Capturing from two consecutive lines
    let first = capture();
    let second = capture();

    // THEN: Same file, consecutive lines
    assert_eq!(first.file, second.file);
    assert_eq!(first.line + 1, second.line);
    assert!(first.column > 0);
}

/// **VALUE**: Verifies the `[file:line:column]` rendering used in every error message.
///
/// **BUG THIS CATCHES**: Would catch a Display change that drops the brackets
/// or one of the coordinates, which breaks log grepping.
#[test]
fn given_error_location_when_formatted_then_renders_bracketed_coordinates() {
    // GIVEN: A hand-built location
    let location = ErrorLocation {
        file: "backend/chatglm-core/src/auth/token.rs",
        line: 42,
        column: 7,
    };

    // WHEN: Formatting
    let formatted = location.to_string();

    // THEN: Exact bracketed format
    assert_eq!(formatted, "[backend/chatglm-core/src/auth/token.rs:42:7]");
}

/// **VALUE**: Verifies `file_name()` strips directories on both separator styles.
#[test]
fn given_nested_paths_when_file_name_then_returns_last_component() {
    let unix = ErrorLocation {
        file: "backend/chatglm-core/src/hooks.rs",
        line: 1,
        column: 1,
    };
    let windows = ErrorLocation {
        file: "backend\\chatglm-core\\src\\hooks.rs",
        line: 1,
        column: 1,
    };
    let bare = ErrorLocation {
        file: "hooks.rs",
        line: 1,
        column: 1,
    };

    assert_eq!(unix.file_name(), "hooks.rs");
    assert_eq!(windows.file_name(), "hooks.rs");
    assert_eq!(bare.file_name(), "hooks.rs");
}
