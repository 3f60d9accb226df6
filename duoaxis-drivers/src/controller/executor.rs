//! Single request/response exchange with the controller
//!
//! Every exchange is:
//! 1. write the 7-byte request and flush
//! 2. wait the settle interval
//! 3. read exactly 7 reply bytes
//!
//! Any transport failure ends the exchange immediately. Nothing is retried.

use duoaxis_hal::Uart;
use duoaxis_protocol::{Frame, FRAME_LEN};
use embedded_hal::delay::DelayNs;

/// Transaction executor owning the transport and the settle delay
pub struct Transactor<U, D> {
    uart: U,
    delay: D,
    settle_interval_us: u32,
    completed: u32,
}

impl<U, D> Transactor<U, D>
where
    U: Uart,
    D: DelayNs,
{
    /// Create an executor with the given settle interval
    pub fn new(uart: U, delay: D, settle_interval_us: u32) -> Self {
        Self {
            uart,
            delay,
            settle_interval_us,
            completed: 0,
        }
    }

    /// Send `request` and return the raw reply
    ///
    /// The reply is returned as received; checksum validation is left to
    /// the caller.
    pub fn execute(&mut self, request: &Frame) -> Result<Frame, U::Error> {
        #[cfg(feature = "defmt")]
        defmt::trace!("tx {}", request);

        self.uart.write_blocking(request.as_bytes())?;
        self.uart.flush()?;

        self.delay.delay_us(self.settle_interval_us);

        let mut reply = [0u8; FRAME_LEN];
        self.uart.read_blocking(&mut reply)?;
        let reply = Frame::from_bytes(reply);

        #[cfg(feature = "defmt")]
        defmt::trace!("rx {}", reply);

        self.completed = self.completed.wrapping_add(1);
        Ok(reply)
    }

    /// Settle interval in microseconds
    pub fn settle_interval_us(&self) -> u32 {
        self.settle_interval_us
    }

    /// Number of exchanges that completed without error
    pub fn completed(&self) -> u32 {
        self.completed
    }

    /// Give back the transport and delay
    pub fn release(self) -> (U, D) {
        (self.uart, self.delay)
    }
}
