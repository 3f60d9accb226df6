//! Two-axis motor controller driver
//!
//! This crate turns the register protocol defined in `duoaxis-protocol`
//! into blocking request/response operations over any transport that
//! implements the `duoaxis-hal` UART traits:
//!
//! - Stop both motors
//! - Move a motor to an absolute position
//! - Read current position and travel limit
//! - Raw reads of the target and status registers
//!
//! One request is in flight at a time. Every operation writes a frame,
//! waits a settle interval, then reads exactly one 7-byte reply.

#![no_std]
#![deny(unsafe_code)]

pub mod controller;

pub use controller::{ControllerConfig, ControllerError, MotorController, Transactor};
