//! Authentication module
//!
//! Supports: Basic, Bearer, cluster API key, Custom Headers

mod authenticator;
mod types;

pub use authenticator::Authenticator;
pub use types::AuthConfig;

#[cfg(test)]
mod tests;
