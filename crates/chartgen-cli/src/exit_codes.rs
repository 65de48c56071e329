//! Standard exit codes for CLI operations
//!
//! These exit codes follow Unix conventions and sysexits.h where applicable.

/// General error - unspecified failure
pub const ERROR: i32 = 1;

/// Config error - malformed generator configuration or missing chartName
pub const CONFIG_ERROR: i32 = 2;

/// Version error - helm is missing a parseable version or is not v3
pub const VERSION_ERROR: i32 = 3;

/// Fetch error - `helm pull` failed
pub const FETCH_ERROR: i32 = 4;

/// Render error - `helm template` failed
pub const RENDER_ERROR: i32 = 5;

/// IO error - file not found, permission denied, etc.
pub const IO_ERROR: i32 = 6;

/// Manifest error - helm output is not a stream of Kubernetes objects
pub const MANIFEST_ERROR: i32 = 7;
