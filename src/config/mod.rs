//! Configuration module for Kharcha
//!
//! - XDG-compliant path resolution
//! - User settings persistence (remembered principal, display preferences)

pub mod paths;
pub mod settings;

pub use paths::KharchaPaths;
pub use settings::Settings;
