//! Shared fixtures for the integration tests.
#![allow(dead_code)]
use lsp_wire::types::*;

/// A bare command, as sent by servers that answer with commands only.
pub const COMMAND_JSON: &str = r#"{"title":"command_title","command":"command"}"#;

/// A quick fix that runs `COMMAND_JSON` when applied.
pub const CODE_ACTION_JSON: &str = r#"{"title":"codeaction_title","kind":"quickfix","isPreferred":true,"command":{"title":"command_title","command":"command"}}"#;

/// A clangd answer to `textDocument/codeAction`, keys in alphabetical order.
pub const CLANGD_CODE_ACTIONS: &str = r#"
[
    {
        "diagnostics": [
            {
                "code": "undeclared_var_use_suggest",
                "message": "Use of undeclared identifier 'ads'; did you mean 'abs'? (fix available)",
                "range": {
                    "end":   {"character": 5, "line": 14},
                    "start": {"character": 2, "line": 14}
                },
                "severity": 1,
                "source": "clang"
            }
        ],
        "edit": {
            "changes": {
                "file:///tmp/arduino-language-server616865191/sketch/Blink.ino.cpp": [
                    {
                        "newText": "abs",
                        "range": {
                            "end":   {"character": 5, "line": 14},
                            "start": {"character": 2, "line": 14}
                        }
                    }
                ]
            }
        },
        "isPreferred": true,
        "kind": "quickfix",
        "title": "change 'ads' to 'abs'"
    }
]"#;

pub fn test_command() -> Command {
    Command::new("command_title", "command")
}

pub fn test_code_action() -> CodeAction {
    CodeAction {
        title: "codeaction_title".to_string(),
        kind: Some(CodeActionKind::QUICKFIX),
        is_preferred: Some(true),
        command: Some(test_command()),
        ..Default::default()
    }
}

/// `[CODE_ACTION, COMMAND, CODE_ACTION, CODE_ACTION, COMMAND]`
pub fn mixed_array_json() -> String {
    format!(
        "[{ca},{com},{ca},{ca},{com}]",
        ca = CODE_ACTION_JSON,
        com = COMMAND_JSON
    )
}

/// Assert that two JSON values are equivalent, ignoring field order
pub fn assert_json_eq(expected: &str, actual: &str) {
    let expected: serde_json::Value =
        serde_json::from_str(expected).expect("Expected JSON should be valid");
    let actual: serde_json::Value =
        serde_json::from_str(actual).expect("Actual JSON should be valid");
    assert_eq!(expected, actual, "JSON values should be equal");
}
