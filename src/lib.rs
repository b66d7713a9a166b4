pub mod cli;
pub mod config;
pub mod error;
pub mod manager;
pub mod process;
pub mod user;

pub use config::Config;
pub use error::ProcessError;
pub use manager::Manager;
