pub mod data;
pub mod env;
pub mod io;
pub mod keys;
pub mod printing;

pub use data::Config;
pub use env::{ChatSettings, EndpointSettings, SettingsOverrides};
pub use io::ConfigError;

#[cfg(test)]
mod tests;
