//! `Command`, `CodeAction`, and the `Command | CodeAction` sum type returned
//! by `textDocument/codeAction`.
//!
//! The wire format carries no discriminant. Which variant an object is gets
//! decided once, at decode time, from the keys it has:
//!
//! - any of `kind`, `diagnostics`, `isPreferred`, `disabled`, `edit`, `data`
//!   means `CodeAction`;
//! - a `command` key whose value is an object means `CodeAction`;
//! - everything else is a `Command`.
//!
//! Encoding writes the held variant back without any wrapper, in the
//! variant's canonical key order, omitting absent optional fields.

use crate::error::{LspError, Result};
use crate::types::{Diagnostic, WorkspaceEdit};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::borrow::Cow;
use std::fmt;

/// Keys that only ever appear on a `CodeAction`.
const CODE_ACTION_ONLY_KEYS: &[&str] = &[
    "kind",
    "diagnostics",
    "isPreferred",
    "disabled",
    "edit",
    "data",
];

/// A reference to a command the client can execute, like `save`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Command {
    /// Title of the command, like 'save'.
    pub title: String,
    /// Identifier of the command handler. Missing on the wire decodes as an
    /// empty string.
    #[serde(default)]
    pub command: String,
    /// Arguments the command handler should be invoked with.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub arguments: Option<Vec<Value>>,
}

impl Command {
    /// Create a new command without arguments.
    pub fn new(title: impl Into<String>, command: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            command: command.into(),
            arguments: None,
        }
    }
}

/// The kind of a code action, a dot-separated hierarchical string.
///
/// Servers may send kinds outside the predefined set, so any string is
/// accepted.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CodeActionKind(Cow<'static, str>);

impl CodeActionKind {
    /// The empty kind, which contains every other kind.
    pub const EMPTY: CodeActionKind = CodeActionKind(Cow::Borrowed(""));
    /// Fixes for a diagnostic.
    pub const QUICKFIX: CodeActionKind = CodeActionKind(Cow::Borrowed("quickfix"));
    /// Base kind for refactorings.
    pub const REFACTOR: CodeActionKind = CodeActionKind(Cow::Borrowed("refactor"));
    /// Extract a method, function, variable, and the like.
    pub const REFACTOR_EXTRACT: CodeActionKind = CodeActionKind(Cow::Borrowed("refactor.extract"));
    /// Inline a function, variable or constant.
    pub const REFACTOR_INLINE: CodeActionKind = CodeActionKind(Cow::Borrowed("refactor.inline"));
    /// Rewrites such as converting a function into a method.
    pub const REFACTOR_REWRITE: CodeActionKind = CodeActionKind(Cow::Borrowed("refactor.rewrite"));
    /// Actions that apply to the whole file.
    pub const SOURCE: CodeActionKind = CodeActionKind(Cow::Borrowed("source"));
    /// Sort and prune imports.
    pub const SOURCE_ORGANIZE_IMPORTS: CodeActionKind =
        CodeActionKind(Cow::Borrowed("source.organizeImports"));
    /// Apply every unambiguous fix in the file.
    pub const SOURCE_FIX_ALL: CodeActionKind = CodeActionKind(Cow::Borrowed("source.fixAll"));

    /// Create a kind outside the predefined set.
    pub fn new(kind: impl Into<String>) -> Self {
        Self(Cow::Owned(kind.into()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// True if `self` equals `parent` or is nested below it
    /// (`refactor.extract` is within `refactor`).
    pub fn is_within(&self, parent: &CodeActionKind) -> bool {
        let parent = parent.as_str();
        parent.is_empty()
            || self.as_str() == parent
            || self
                .as_str()
                .strip_prefix(parent)
                .is_some_and(|rest| rest.starts_with('.'))
    }
}

impl fmt::Display for CodeActionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&'static str> for CodeActionKind {
    fn from(kind: &'static str) -> Self {
        Self(Cow::Borrowed(kind))
    }
}

/// Why a code action cannot currently be applied.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CodeActionDisabled {
    pub reason: String,
}

/// A change that can be performed in code, e.g. a quick fix or a refactoring.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CodeAction {
    pub title: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub kind: Option<CodeActionKind>,

    /// The diagnostics this action resolves.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub diagnostics: Option<Vec<Diagnostic>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_preferred: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub disabled: Option<CodeActionDisabled>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub edit: Option<WorkspaceEdit>,

    /// Executed after `edit`, if both are present.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub command: Option<Command>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
}

impl CodeAction {
    /// Create a new code action with only a title.
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Default::default()
        }
    }
}

/// Which of the two shapes a value was decoded as.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Variant {
    Command,
    CodeAction,
}

impl Variant {
    /// Decide the variant of a raw JSON object from its keys.
    pub fn classify(object: &Map<String, Value>) -> Variant {
        if CODE_ACTION_ONLY_KEYS.iter().any(|key| object.contains_key(*key)) {
            return Variant::CodeAction;
        }
        match object.get("command") {
            Some(Value::Object(_)) => Variant::CodeAction,
            _ => Variant::Command,
        }
    }
}

impl fmt::Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Variant::Command => f.write_str("Command"),
            Variant::CodeAction => f.write_str("CodeAction"),
        }
    }
}

/// One element of a `textDocument/codeAction` result.
#[derive(Debug, Clone, PartialEq)]
pub enum CommandOrCodeAction {
    Command(Command),
    CodeAction(CodeAction),
}

impl CommandOrCodeAction {
    /// Decode a JSON value, choosing the variant from the keys present.
    pub fn from_value(value: Value) -> Result<Self> {
        let variant = match &value {
            Value::Object(object) => Variant::classify(object),
            other => {
                return Err(LspError::Decode(format!(
                    "expected a Command or CodeAction object, found {}",
                    json_kind(other)
                )))
            }
        };
        log::trace!("classified code action result element as {}", variant);

        match variant {
            Variant::Command => serde_json::from_value(value)
                .map(CommandOrCodeAction::Command)
                .map_err(|e| LspError::Decode(format!("invalid Command: {}", e))),
            Variant::CodeAction => serde_json::from_value(value)
                .map(CommandOrCodeAction::CodeAction)
                .map_err(|e| LspError::Decode(format!("invalid CodeAction: {}", e))),
        }
    }

    pub fn variant(&self) -> Variant {
        match self {
            CommandOrCodeAction::Command(_) => Variant::Command,
            CommandOrCodeAction::CodeAction(_) => Variant::CodeAction,
        }
    }

    pub fn title(&self) -> &str {
        match self {
            CommandOrCodeAction::Command(command) => &command.title,
            CommandOrCodeAction::CodeAction(action) => &action.title,
        }
    }

    pub fn as_command(&self) -> Option<&Command> {
        match self {
            CommandOrCodeAction::Command(command) => Some(command),
            CommandOrCodeAction::CodeAction(_) => None,
        }
    }

    pub fn as_code_action(&self) -> Option<&CodeAction> {
        match self {
            CommandOrCodeAction::CodeAction(action) => Some(action),
            CommandOrCodeAction::Command(_) => None,
        }
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

impl From<Command> for CommandOrCodeAction {
    fn from(command: Command) -> Self {
        CommandOrCodeAction::Command(command)
    }
}

impl From<CodeAction> for CommandOrCodeAction {
    fn from(action: CodeAction) -> Self {
        CommandOrCodeAction::CodeAction(action)
    }
}

impl Serialize for CommandOrCodeAction {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        match self {
            CommandOrCodeAction::Command(command) => command.serialize(serializer),
            CommandOrCodeAction::CodeAction(action) => action.serialize(serializer),
        }
    }
}

impl<'de> Deserialize<'de> for CommandOrCodeAction {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        Self::from_value(value).map_err(serde::de::Error::custom)
    }
}

/// A holder that is either empty or carries one `CommandOrCodeAction`.
///
/// Reading an empty slot is an error, and so is encoding one.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ActionSlot {
    value: Option<CommandOrCodeAction>,
}

impl ActionSlot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a `Command` or a `CodeAction`, replacing any previous value.
    pub fn set(&mut self, value: impl Into<CommandOrCodeAction>) {
        self.value = Some(value.into());
    }

    pub fn get(&self) -> Result<&CommandOrCodeAction> {
        self.value.as_ref().ok_or(LspError::UnsetAccess)
    }

    pub fn take(&mut self) -> Option<CommandOrCodeAction> {
        self.value.take()
    }

    pub fn is_set(&self) -> bool {
        self.value.is_some()
    }

    pub fn variant(&self) -> Option<Variant> {
        self.value.as_ref().map(CommandOrCodeAction::variant)
    }

    /// Decode `data` into this slot. On failure the slot keeps its previous
    /// contents.
    pub fn unmarshal_json(&mut self, data: &[u8]) -> Result<()> {
        let value: Value = serde_json::from_slice(data)?;
        self.value = Some(CommandOrCodeAction::from_value(value)?);
        Ok(())
    }

    pub fn marshal_json(&self) -> Result<Vec<u8>> {
        Ok(serde_json::to_vec(self.get()?)?)
    }
}

impl From<CommandOrCodeAction> for ActionSlot {
    fn from(value: CommandOrCodeAction) -> Self {
        Self { value: Some(value) }
    }
}

impl Serialize for ActionSlot {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        match &self.value {
            Some(value) => value.serialize(serializer),
            None => Err(serde::ser::Error::custom(LspError::UnsetAccess)),
        }
    }
}

impl<'de> Deserialize<'de> for ActionSlot {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        CommandOrCodeAction::deserialize(deserializer).map(ActionSlot::from)
    }
}
