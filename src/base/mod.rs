//! Foundation types for the IOP toolchain.
//!
//! This module provides the primitives used throughout the crate:
//! - [`FileId`], [`FileSet`] - interned file identifiers and the path registry
//! - [`TextRange`], [`TextSize`] - byte-offset positions
//! - [`LineCol`], [`LineIndex`], [`SourceRange`] - line/column conversion
//!
//! This module has NO dependencies on other iopls modules.

mod files;
mod span;

pub use files::{FileId, FileSet};
pub use span::{LineCol, LineIndex, SourceRange, TextRange, TextSize};
