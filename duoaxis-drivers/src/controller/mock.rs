//! Scripted transport and delay used by the driver tests

use duoaxis_hal::{ErrorType, UartRx, UartTx};
use duoaxis_protocol::{checksum, Frame, FRAME_LEN, WRITE_BIT};
use embedded_hal::delay::DelayNs;
use heapless::{Deque, Vec};

/// Reply bytes as the controller sends them for `register`
pub fn reply(register: u8, value: u32) -> [u8; FRAME_LEN] {
    let mut bytes = Frame::write(register, value).into_bytes();
    bytes[1] &= !WRITE_BIT;
    bytes[6] = checksum(&bytes[..6]);
    bytes
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MockError {
    Write,
    Flush,
    Read,
    /// Write was not exactly one frame long
    BadLength,
}

impl core::fmt::Display for MockError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            MockError::Write => write!(f, "mock write failed"),
            MockError::Flush => write!(f, "mock flush failed"),
            MockError::Read => write!(f, "mock read failed"),
            MockError::BadLength => write!(f, "mock write was not one frame"),
        }
    }
}

impl core::error::Error for MockError {}

/// UART that records every written frame and answers from a script
///
/// Queued replies are served first; once the queue is empty the fixed
/// reply (if any) is returned for every read.
pub struct MockUart {
    pub written: Vec<Frame, 16>,
    pub reads: usize,
    pub flushes: usize,
    pub fail_write: bool,
    pub fail_flush: bool,
    pub fail_read: bool,
    queued: Deque<[u8; FRAME_LEN], 16>,
    fixed: Option<[u8; FRAME_LEN]>,
}

impl MockUart {
    pub fn echoing(reply: [u8; FRAME_LEN]) -> Self {
        Self {
            written: Vec::new(),
            reads: 0,
            flushes: 0,
            fail_write: false,
            fail_flush: false,
            fail_read: false,
            queued: Deque::new(),
            fixed: Some(reply),
        }
    }

    pub fn scripted(replies: &[[u8; FRAME_LEN]]) -> Self {
        let mut uart = Self::echoing([0; FRAME_LEN]);
        uart.fixed = None;
        for reply in replies {
            uart.queued.push_back(*reply).unwrap();
        }
        uart
    }

    /// Total number of transport calls made
    pub fn calls(&self) -> usize {
        self.written.len() + self.flushes + self.reads
    }
}

impl ErrorType for MockUart {
    type Error = MockError;
}

impl UartTx for MockUart {
    fn write_blocking(&mut self, data: &[u8]) -> Result<(), MockError> {
        if self.fail_write {
            return Err(MockError::Write);
        }
        let bytes: [u8; FRAME_LEN] = data.try_into().map_err(|_| MockError::BadLength)?;
        self.written.push(Frame::from_bytes(bytes)).unwrap();
        Ok(())
    }

    fn flush(&mut self) -> Result<(), MockError> {
        self.flushes += 1;
        if self.fail_flush {
            return Err(MockError::Flush);
        }
        Ok(())
    }
}

impl UartRx for MockUart {
    fn read_blocking(&mut self, buf: &mut [u8]) -> Result<(), MockError> {
        self.reads += 1;
        if self.fail_read {
            return Err(MockError::Read);
        }
        let reply = self
            .queued
            .pop_front()
            .or(self.fixed)
            .ok_or(MockError::Read)?;
        buf.copy_from_slice(&reply);
        Ok(())
    }
}

/// Delay that only accumulates the requested time
pub struct CountingDelay {
    pub total_ns: u64,
}

impl CountingDelay {
    pub fn new() -> Self {
        Self { total_ns: 0 }
    }
}

impl DelayNs for CountingDelay {
    fn delay_ns(&mut self, ns: u32) {
        self.total_ns += ns as u64;
    }
}
