//! # iopls-base
//!
//! Core library for IOP editor intelligence: parsing, symbol indexing,
//! name resolution, and the goto-definition/hover logic an LSP server
//! binary is built on. This crate contains no protocol transport; an
//! external server owns the JSON-RPC surface and calls into
//! [`ide::AnalysisHost`].
//!
//! ## Module structure (dependency order)
//!
//! ```text
//! project → workspace scanning (.iop discovery, bulk indexing)
//!   ↓
//! ide     → AnalysisHost, position classification, goto-def, hover
//!   ↓
//! hir     → symbols, doc comments, C-name mangling, SymbolIndex
//!   ↓
//! syntax  → SyntaxKind taxonomy, lexer, parser, rowan syntax trees
//!   ↓
//! base    → primitives (FileId, FileSet, LineCol, LineIndex)
//! ```

/// Foundation types: FileId, FileSet, source positions.
pub mod base;

/// Lexer, parser, and lossless syntax trees for IOP source.
pub mod syntax;

/// Semantic model: symbols, extraction, and the workspace-wide index.
pub mod hir;

/// IDE features: AnalysisHost, goto-definition, hover.
pub mod ide;

/// Workspace management: recursive scanning of IOP source trees.
pub mod project;

pub use base::{FileId, FileSet, LineCol, LineIndex, SourceRange};
pub use hir::{Symbol, SymbolIndex, SymbolKind};
pub use ide::{AnalysisHost, Location, RefContext};
pub use project::WorkspaceLoader;
pub use syntax::{Parse, SyntaxKind, parse};
