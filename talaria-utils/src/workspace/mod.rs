//! Workspace management utilities

pub mod herald;
pub mod temp;

// Re-export main workspace types
pub use temp::{
    find_workspace, list_workspaces, TempWorkspace, WorkspaceConfig, WorkspaceMetadata,
    WorkspaceStats, WorkspaceStatus,
};

pub use herald::{HeraldStatistics, HeraldTransaction, HeraldWorkspaceManager};
