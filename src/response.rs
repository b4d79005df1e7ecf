//! Decoding of response results keyed by the request method.
//!
//! A JSON-RPC response does not say what its `result` is; the caller knows
//! from the method of the request it answered. [`decode_result`] maps that
//! method to the typed result shape.

use crate::error::{LspError, Result};
use crate::types::{CodeAction, CommandOrCodeAction};
use serde::Serialize;

/// Method names with a known result shape.
pub mod methods {
    pub const CODE_ACTION: &str = "textDocument/codeAction";
    pub const CODE_ACTION_RESOLVE: &str = "codeAction/resolve";
}

/// A typed response result.
///
/// Serializes back to the same JSON shape it was decoded from.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ServerResult {
    /// `textDocument/codeAction`: `(Command | CodeAction)[] | null`.
    CodeActions(Option<Vec<CommandOrCodeAction>>),
    /// `codeAction/resolve`.
    CodeAction(CodeAction),
}

impl ServerResult {
    /// The code action list, or `None` for other results and for a `null`
    /// answer.
    pub fn into_code_actions(self) -> Option<Vec<CommandOrCodeAction>> {
        match self {
            ServerResult::CodeActions(actions) => actions,
            ServerResult::CodeAction(_) => None,
        }
    }
}

/// Decode the raw `result` of a response to a `method` request.
///
/// Decoding is all-or-nothing: one malformed array element fails the whole
/// result.
pub fn decode_result(method: &str, raw: &[u8]) -> Result<ServerResult> {
    log::debug!("decoding {} result ({} bytes)", method, raw.len());

    match method {
        methods::CODE_ACTION => Ok(ServerResult::CodeActions(serde_json::from_slice(raw)?)),
        methods::CODE_ACTION_RESOLVE => Ok(ServerResult::CodeAction(serde_json::from_slice(raw)?)),
        other => {
            log::warn!("no result decoder for method {}", other);
            Err(LspError::UnsupportedMethod(other.to_string()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Variant;

    #[test]
    fn test_null_code_action_result() {
        let result = decode_result(methods::CODE_ACTION, b"null").unwrap();
        assert_eq!(result, ServerResult::CodeActions(None));
        assert_eq!(serde_json::to_string(&result).unwrap(), "null");
    }

    #[test]
    fn test_resolve_returns_single_code_action() {
        let raw = br#"{"title":"fix","edit":{"changes":{}}}"#;
        let result = decode_result(methods::CODE_ACTION_RESOLVE, raw).unwrap();
        match &result {
            ServerResult::CodeAction(action) => {
                assert_eq!(action.title, "fix");
                assert!(action.edit.is_some());
            }
            other => panic!("unexpected result: {:?}", other),
        }
        assert_eq!(result.into_code_actions(), None);
    }

    #[test]
    fn test_unsupported_method() {
        let err = decode_result("textDocument/hover", b"{}").unwrap_err();
        assert!(matches!(err, LspError::UnsupportedMethod(ref m) if m == "textDocument/hover"));
    }

    #[test]
    fn test_one_bad_element_fails_the_array() {
        let raw = br#"[{"title":"a","command":"a"},{"title":"b","kind":"quickfix","command":"oops"}]"#;
        let err = decode_result(methods::CODE_ACTION, raw).unwrap_err();
        assert!(err.is_decode_error());
    }

    #[test]
    fn test_order_preserved() {
        let raw = br#"[{"title":"a","command":"a"},{"title":"b","kind":"quickfix"}]"#;
        let actions = decode_result(methods::CODE_ACTION, raw)
            .unwrap()
            .into_code_actions()
            .unwrap();
        let variants: Vec<Variant> = actions.iter().map(CommandOrCodeAction::variant).collect();
        assert_eq!(variants, vec![Variant::Command, Variant::CodeAction]);
        assert_eq!(actions[1].title(), "b");
    }
}
