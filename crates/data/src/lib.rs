//! Pool files and tool configuration.

pub mod config;
pub mod load;
pub mod schema;

pub use config::*;
pub use load::*;
pub use schema::*;
