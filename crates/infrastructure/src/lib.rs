//! Hairpin DNS Infrastructure Layer
pub mod dns;
pub mod service_directory;
pub mod system;
