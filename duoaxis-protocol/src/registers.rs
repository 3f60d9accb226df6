//! Controller register map
//!
//! Register ids as documented by the controller manufacturer. Motor 1
//! registers live in the `0x1_` range and motor 2 registers in the `0x2_`
//! range; only a handful are used by the command table, the rest are listed
//! for integrators extending it.

/// Register addresses
pub mod reg {
    // System registers (read only, writes do not survive power loss)

    /// Product id, reads back 0x4001
    pub const SYS_PRODUCTID: u8 = 0x01;
    /// Hardware version
    pub const SYS_VERSIONHW: u8 = 0x02;
    /// Firmware build date
    pub const SYS_VERSIONDATE: u8 = 0x03;
    /// Firmware version
    pub const SYS_VERSIONSW: u8 = 0x04;
    /// Motor family: 1 (or 0xFFFFFFD9) 2-phase stepper, 2 5-phase, 3 DC encoder
    pub const SYS_PRODUCTID_SUBCLASS: u8 = 0x05;

    // Setup registers

    /// Persist setup registers to EEPROM; the written value must be 1
    pub const SETUP_WRITE: u8 = 0x0E;
    pub const SETUP_ACCEL_1: u8 = 0x15;
    pub const SETUP_ACCEL_2: u8 = 0x25;
    pub const SETUP_INITVELOCITY_1: u8 = 0x16;
    pub const SETUP_INITVELOCITY_2: u8 = 0x26;
    pub const SETUP_MAXVELOCITY_1: u8 = 0x17;
    pub const SETUP_MAXVELOCITY_2: u8 = 0x27;
    pub const SETUP_REVBACKLASH_1: u8 = 0x18;
    pub const SETUP_REVBACKLASH_2: u8 = 0x28;
    pub const SETUP_FWDBACKLASH_1: u8 = 0x19;
    pub const SETUP_FWDBACKLASH_2: u8 = 0x29;
    /// Sensor configuration (bit 0 far sensor is home, bit 1 reverse seek
    /// through home, bit 2 axis 2 disabled)
    pub const SETUP_CONFIG_1: u8 = 0x1B;
    pub const SETUP_CONFIG_2: u8 = 0x2B;
    /// Travel limit of motor 1
    pub const SETUP_LIMIT_1: u8 = 0x1C;
    /// Travel limit of motor 2
    pub const SETUP_LIMIT_2: u8 = 0x2C;

    // User registers

    /// Motor 1 absolute seek target
    pub const USER_TARGET_1: u8 = 0x10;
    /// Motor 2 absolute seek target
    pub const USER_TARGET_2: u8 = 0x20;
    /// Motor 1 seek relative to current position
    pub const USER_INCREMENT_1: u8 = 0x11;
    pub const USER_INCREMENT_2: u8 = 0x21;
    /// Motor 1 current position
    pub const USER_CURRENT_1: u8 = 0x12;
    /// Motor 2 current position
    pub const USER_CURRENT_2: u8 = 0x22;
    /// Motor 1 limit seek command, see [`LimitSeek`](super::LimitSeek)
    pub const USER_LIMIT_1: u8 = 0x13;
    pub const USER_LIMIT_2: u8 = 0x23;
    /// Motor 1 status, see [`AxisStatus`](super::AxisStatus)
    pub const USER_STATUS_1: u8 = 0x14;
    pub const USER_STATUS_2: u8 = 0x24;
}

/// Axis index outside {0, 1}
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct InvalidAxis(pub u8);

impl core::fmt::Display for InvalidAxis {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "invalid axis {} (expected 0 or 1)", self.0)
    }
}

impl core::error::Error for InvalidAxis {}

/// One of the two motors driven by the controller
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Axis {
    /// Axis index 0
    Motor1,
    /// Axis index 1
    Motor2,
}

impl Axis {
    /// Both axes, in the order stop commands are issued
    pub const ALL: [Axis; 2] = [Axis::Motor1, Axis::Motor2];

    /// Zero-based axis index
    pub const fn index(self) -> usize {
        match self {
            Axis::Motor1 => 0,
            Axis::Motor2 => 1,
        }
    }

    /// Pick the motor 1 or motor 2 variant of a register pair
    pub const fn select(self, motor1: u8, motor2: u8) -> u8 {
        match self {
            Axis::Motor1 => motor1,
            Axis::Motor2 => motor2,
        }
    }
}

impl TryFrom<u8> for Axis {
    type Error = InvalidAxis;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Axis::Motor1),
            1 => Ok(Axis::Motor2),
            other => Err(InvalidAxis(other)),
        }
    }
}

impl From<Axis> for u8 {
    fn from(axis: Axis) -> u8 {
        axis.index() as u8
    }
}

/// Value written to a `USER_LIMIT` register
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LimitSeek {
    /// Drive to the home sensor
    Home = 0,
    /// Drive to the limit sensor
    Limit = 1,
    /// Abort any motion in progress
    Abort = 2,
}

impl From<LimitSeek> for u32 {
    fn from(seek: LimitSeek) -> u32 {
        seek as u32
    }
}

/// Motion state reported in the low byte of a `USER_STATUS` register
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum MotionState {
    Idle,
    DrivingHome,
    ComingOffHome,
    DrivingToLimit,
    SeekingForward,
    DecelForward,
    ForwardBacklash,
    SeekingReverse,
    DecelReverse,
    ReverseBacklash,
    AbortDecelForward,
    AbortDecelReverse,
    /// Code not listed in the register documentation
    Unknown(u8),
}

impl From<u8> for MotionState {
    fn from(code: u8) -> Self {
        match code {
            0 => MotionState::Idle,
            1 => MotionState::DrivingHome,
            2 => MotionState::ComingOffHome,
            3 => MotionState::DrivingToLimit,
            4 => MotionState::SeekingForward,
            5 => MotionState::DecelForward,
            6 => MotionState::ForwardBacklash,
            7 => MotionState::SeekingReverse,
            8 => MotionState::DecelReverse,
            9 => MotionState::ReverseBacklash,
            11 => MotionState::AbortDecelForward,
            12 => MotionState::AbortDecelReverse,
            other => MotionState::Unknown(other),
        }
    }
}

/// Parsed `USER_STATUS` register
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct AxisStatus {
    /// Motion state (bits 0-7)
    pub state: MotionState,
    /// Motor is on the home sensor (bit 8)
    pub on_home: bool,
    /// Motor is on the limit sensor (bit 9)
    pub on_limit: bool,
}

impl AxisStatus {
    /// Parse from raw status register value
    pub fn from_register(value: u32) -> Self {
        Self {
            state: MotionState::from((value & 0xFF) as u8),
            on_home: (value & (1 << 8)) != 0,
            on_limit: (value & (1 << 9)) != 0,
        }
    }

    /// Whether the axis is at rest
    pub fn is_idle(&self) -> bool {
        self.state == MotionState::Idle
    }
}
