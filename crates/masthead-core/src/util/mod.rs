//! Utility modules.
//!
//! - [`paths`]: Path resolution helpers (tilde expansion, safe path segments)

pub mod paths;
