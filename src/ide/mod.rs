//! IDE features: high-level APIs for LSP handlers.
//!
//! This module is the boundary an LSP server calls into. Each function
//! corresponds to an editor request; none of them use protocol types,
//! which are converted at the server boundary.
//!
//! The recommended entry point is [`AnalysisHost`]:
//!
//! ```
//! use std::path::Path;
//! use iopls::base::LineCol;
//! use iopls::ide::AnalysisHost;
//!
//! let mut host = AnalysisHost::new();
//! host.set_file_text(Path::new("/core.iop"), "package core;\nstruct Log {};");
//! assert!(host.index().by_qualified_name("core.Log").is_some());
//! assert!(host.hover(Path::new("/core.iop"), LineCol::new(1, 8)).is_some());
//! ```

mod analysis;
mod goto_definition;
mod hover;
mod position;

pub use analysis::AnalysisHost;
pub use goto_definition::{Location, goto_definition};
pub use hover::{format_enum_value, format_symbol, hover};
pub use position::{Classified, RefContext, classify};
