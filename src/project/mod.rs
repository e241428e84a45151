//! Workspace management: scanning directory trees of IOP sources.

mod workspace_loader;

pub use workspace_loader::{IOP_EXTENSION, LoadError, ScanReport, WorkspaceLoader};
