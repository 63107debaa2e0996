pub mod paths;
pub mod version;

// Re-export commonly used functions
pub use paths::{
    database_path, describe_paths, generate_utc_timestamp, is_custom_data_dir, manifest_path,
    storage_path, talaria_cache_dir, talaria_data_dir, talaria_databases_dir, talaria_home,
    talaria_taxonomy_current_dir, talaria_taxonomy_version_dir, talaria_taxonomy_versions_dir,
    talaria_tools_dir, talaria_workspace_dir,
};
pub use version::{current_version, is_compatible, parse_version};
