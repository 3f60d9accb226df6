//! Command table and frame builder
//!
//! The controller is driven through twelve pre-built frames, one per
//! operation and axis:
//!
//! | index  | command                           |
//! |--------|-----------------------------------|
//! | 0, 1   | stop motor 1 / motor 2            |
//! | 2, 3   | read target register              |
//! | 4, 5   | read status register              |
//! | 6, 7   | read limit register               |
//! | 8, 9   | read current position register    |
//! | 10, 11 | write target (absolute position)  |
//!
//! Templates are immutable once built. Position writes are produced by
//! patching a copy of the write-target template.

use crate::frame::Frame;
use crate::registers::{reg, Axis, LimitSeek};

/// Number of entries in the command table
pub const COMMAND_COUNT: usize = 12;

/// Operation selected from the command table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum CommandKind {
    /// Abort motion
    Stop,
    /// Read the seek target
    ReadTarget,
    /// Read the status register
    ReadStatus,
    /// Read the travel limit
    ReadLimit,
    /// Read the current position
    ReadCurrent,
    /// Write a new absolute target
    WriteTarget,
}

impl CommandKind {
    /// Every command kind, in table order
    pub const ALL: [CommandKind; 6] = [
        CommandKind::Stop,
        CommandKind::ReadTarget,
        CommandKind::ReadStatus,
        CommandKind::ReadLimit,
        CommandKind::ReadCurrent,
        CommandKind::WriteTarget,
    ];

    /// Table index of the motor 1 entry
    pub const fn base_index(self) -> usize {
        match self {
            CommandKind::Stop => 0,
            CommandKind::ReadTarget => 2,
            CommandKind::ReadStatus => 4,
            CommandKind::ReadLimit => 6,
            CommandKind::ReadCurrent => 8,
            CommandKind::WriteTarget => 10,
        }
    }

    /// Whether the command only reads a register
    pub const fn is_read(self) -> bool {
        !matches!(self, CommandKind::Stop | CommandKind::WriteTarget)
    }

    /// Template frame for this command on `axis`
    fn template(self, axis: Axis) -> Frame {
        match self {
            CommandKind::Stop => Frame::write(
                axis.select(reg::USER_LIMIT_1, reg::USER_LIMIT_2),
                LimitSeek::Abort.into(),
            ),
            CommandKind::ReadTarget => {
                Frame::read(axis.select(reg::USER_TARGET_1, reg::USER_TARGET_2))
            }
            CommandKind::ReadStatus => {
                Frame::read(axis.select(reg::USER_STATUS_1, reg::USER_STATUS_2))
            }
            CommandKind::ReadLimit => {
                Frame::read(axis.select(reg::SETUP_LIMIT_1, reg::SETUP_LIMIT_2))
            }
            CommandKind::ReadCurrent => {
                Frame::read(axis.select(reg::USER_CURRENT_1, reg::USER_CURRENT_2))
            }
            CommandKind::WriteTarget => {
                Frame::write(axis.select(reg::USER_TARGET_1, reg::USER_TARGET_2), 0)
            }
        }
    }
}

/// The twelve template frames used to drive the controller
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandTable {
    frames: [Frame; COMMAND_COUNT],
}

impl Default for CommandTable {
    fn default() -> Self {
        Self::new()
    }
}

impl CommandTable {
    /// Build every template with its checksum sealed
    pub fn new() -> Self {
        let mut frames = [Frame::from_bytes([0; 7]); COMMAND_COUNT];
        for kind in CommandKind::ALL {
            for axis in Axis::ALL {
                frames[Self::index(kind, axis)] = kind.template(axis);
            }
        }
        Self { frames }
    }

    /// Table index for a command on an axis
    pub const fn index(kind: CommandKind, axis: Axis) -> usize {
        kind.base_index() + axis.index()
    }

    /// Entry at a raw table index
    pub fn get(&self, index: usize) -> Option<&Frame> {
        self.frames.get(index)
    }

    /// Copy of the template for a command on an axis
    pub fn template(&self, kind: CommandKind, axis: Axis) -> Frame {
        self.frames[Self::index(kind, axis)]
    }

    /// All entries in table order
    pub fn frames(&self) -> &[Frame; COMMAND_COUNT] {
        &self.frames
    }

    /// Build a send-ready absolute position write for `axis`
    ///
    /// The low and high bytes of `position` go into bytes 2 and 3 of a copy
    /// of the write-target template, then the checksum is recomputed. No
    /// travel limit check is made here.
    pub fn move_frame(&self, axis: Axis, position: u16) -> Frame {
        self.template(CommandKind::WriteTarget, axis)
            .with_payload_u16(position)
    }
}
