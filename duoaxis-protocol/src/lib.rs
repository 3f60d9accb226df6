//! Two-Axis Motor Controller Protocol
//!
//! This crate defines the serial register protocol spoken by the two-axis
//! stepper/DC motor controller. Every exchange is one fixed 7-byte frame in
//! each direction.
//!
//! # Protocol Overview
//!
//! ```text
//! ┌───────┬──────────┬────────────────────────────┬──────────┐
//! │ START │ REGISTER │ VALUE (little-endian u32)  │ CHECKSUM │
//! │ 0xFF  │ 1B       │ 4B                         │ 1B       │
//! └───────┴──────────┴────────────────────────────┴──────────┘
//! ```
//!
//! Bit 7 of the register byte is set for writes. The checksum is chosen so
//! all seven bytes sum to zero modulo 256.
//!
//! Serial settings used by the controller: 38400 baud, 8N1, no flow control.

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod codec;
pub mod command;
pub mod frame;
pub mod registers;

pub use codec::{
    decode_max_position, decode_position, decode_register, encode_position, PositionOutOfRange,
    MAX_POSITION,
};
pub use command::{CommandKind, CommandTable, COMMAND_COUNT};
pub use frame::{checksum, Frame, FrameError, FRAME_LEN, FRAME_START, WRITE_BIT};
pub use registers::{Axis, AxisStatus, InvalidAxis, LimitSeek, MotionState};

/// Baud rate the controller ships configured for
pub const DEFAULT_BAUDRATE: u32 = 38_400;
