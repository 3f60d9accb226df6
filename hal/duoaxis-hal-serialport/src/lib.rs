//! Host serial port HAL for the duoaxis driver
//!
//! Implements the `duoaxis-hal` UART traits on top of the `serialport`
//! crate and provides a thread-sleeping delay for the settle interval.
//! Every read and write is bounded by the port timeout from [`PortConfig`].

pub mod delay;
pub mod port;

pub use delay::StdDelay;
pub use duoaxis_hal::{DataBits, Parity, StopBits};
pub use port::{available_ports, PortConfig, SerialError, SerialUart};
