//! CLI command implementations.

pub mod build;
pub mod init;

pub use build::{build_site, BuildOptions};
pub use init::init_project;
