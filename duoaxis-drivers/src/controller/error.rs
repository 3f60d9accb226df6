//! Driver errors

use duoaxis_protocol::{CommandKind, FrameError, InvalidAxis, PositionOutOfRange};

/// Errors returned by [`MotorController`](super::MotorController) operations
///
/// `E` is the transport error of the underlying UART.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ControllerError<E> {
    /// Write, flush or read failed at the transport
    Transport(E),
    /// Axis index outside {0, 1}; nothing was sent
    InvalidAxis(u8),
    /// Position does not fit the 16 bits sent on the wire; nothing was sent
    PositionOutOfRange(i32),
    /// Reply arrived but failed validation (only with `verify_replies`)
    Integrity(FrameError),
    /// Command is not a register read
    NotReadable(CommandKind),
}

impl<E> ControllerError<E> {
    /// Whether the error came from the transport layer
    pub fn is_transport(&self) -> bool {
        matches!(self, ControllerError::Transport(_))
    }
}

impl<E> From<InvalidAxis> for ControllerError<E> {
    fn from(err: InvalidAxis) -> Self {
        ControllerError::InvalidAxis(err.0)
    }
}

impl<E> From<PositionOutOfRange> for ControllerError<E> {
    fn from(err: PositionOutOfRange) -> Self {
        ControllerError::PositionOutOfRange(err.0)
    }
}

impl<E> From<FrameError> for ControllerError<E> {
    fn from(err: FrameError) -> Self {
        ControllerError::Integrity(err)
    }
}

impl<E: core::fmt::Display> core::fmt::Display for ControllerError<E> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            ControllerError::Transport(e) => write!(f, "transport error: {}", e),
            ControllerError::InvalidAxis(axis) => {
                write!(f, "{}", InvalidAxis(*axis))
            }
            ControllerError::PositionOutOfRange(position) => {
                write!(f, "{}", PositionOutOfRange(*position))
            }
            ControllerError::Integrity(e) => write!(f, "invalid reply: {}", e),
            ControllerError::NotReadable(kind) => {
                write!(f, "{:?} is not a register read", kind)
            }
        }
    }
}

impl<E> core::error::Error for ControllerError<E>
where
    E: core::error::Error + 'static,
{
    fn source(&self) -> Option<&(dyn core::error::Error + 'static)> {
        match self {
            ControllerError::Transport(e) => Some(e),
            ControllerError::Integrity(e) => Some(e),
            _ => None,
        }
    }
}
