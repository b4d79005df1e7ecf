//! Wire types for the Language Server Protocol.
//!
//! Only the shapes needed to decode `textDocument/codeAction` results are
//! defined, plus the document URI type they reference.

pub mod code_action;
pub mod lsp;
pub mod uri;

pub use code_action::*;
pub use lsp::*;
pub use uri::*;

/// A URI that is not necessarily a document, e.g. a diagnostic's `href`.
/// Kept as the raw wire string.
pub type Uri = String;
