//! # lsp-wire
//!
//! Wire-level types for Language Server Protocol clients.
//!
//! This crate covers two places where an LSP client easily loses information
//! between the JSON on the wire and the values it works with:
//!
//! - `file://` document URIs, converted to and from local paths with correct
//!   percent-encoding, either separator convention, and lower-cased drive
//!   letters ([`DocumentUri`]).
//! - `textDocument/codeAction` results, whose elements are either a
//!   `Command` or a `CodeAction` with no discriminant on the wire
//!   ([`CommandOrCodeAction`]). Decoding remembers the variant, and encoding
//!   reproduces the original JSON.
//!
//! Framing, request dispatch and connection handling are left to the client
//! using this crate.
//!
//! ## Example
//!
//! ```rust
//! use lsp_wire::response::{decode_result, methods};
//! use lsp_wire::types::{CommandOrCodeAction, DocumentUri, PathStyle};
//!
//! # fn main() -> lsp_wire::Result<()> {
//! let uri = DocumentUri::from_path_with_style(r"C:\Users\me\Sketch.ino", PathStyle::Windows);
//! assert_eq!(uri.to_string(), "file:///c%3A/Users/me/Sketch.ino");
//!
//! let raw = br#"[{"title":"Save","command":"save"}]"#;
//! let actions = decode_result(methods::CODE_ACTION, raw)?
//!     .into_code_actions()
//!     .unwrap_or_default();
//! assert!(matches!(actions[0], CommandOrCodeAction::Command(_)));
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod response;
pub mod types;

pub use error::{LspError, Result};
pub use response::{decode_result, ServerResult};
pub use types::{ActionSlot, CodeAction, Command, CommandOrCodeAction, DocumentUri, PathStyle, Variant};

/// Re-export commonly used types
pub mod prelude {
    pub use crate::error::{LspError, Result};
    pub use crate::response::{decode_result, methods, ServerResult};
    pub use crate::types::*;
}
