//! Motor controller driver
//!
//! [`Transactor`] performs single write/settle/read exchanges and
//! [`MotorController`] composes them into the public operations.

pub mod config;
pub mod driver;
pub mod error;
pub mod executor;

#[cfg(test)]
mod mock;

pub use config::{ControllerConfig, DEFAULT_SETTLE_INTERVAL_US};
pub use driver::MotorController;
pub use error::ControllerError;
pub use executor::Transactor;
