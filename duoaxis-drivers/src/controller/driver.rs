//! Motor controller public operations
//!
//! Each operation is one or more complete request/response exchanges built
//! from the command table. The driver keeps no state between calls other
//! than the immutable table and its configuration; motion state lives on
//! the controller.

use duoaxis_hal::Uart;
use duoaxis_protocol::{
    decode_max_position, decode_position, decode_register, encode_position, Axis, CommandKind,
    CommandTable, Frame,
};
use embedded_hal::delay::DelayNs;

use super::config::ControllerConfig;
use super::error::ControllerError;
use super::executor::Transactor;

/// Driver for one two-axis motor controller
///
/// Owns the transport exclusively. The protocol allows a single request in
/// flight, so every method takes `&mut self`; share a controller between
/// threads only behind a lock.
pub struct MotorController<U, D> {
    table: CommandTable,
    transactor: Transactor<U, D>,
    config: ControllerConfig,
}

impl<U, D> MotorController<U, D>
where
    U: Uart,
    D: DelayNs,
{
    /// Create a driver with the default configuration
    pub fn new(uart: U, delay: D) -> Self {
        Self::with_config(uart, delay, ControllerConfig::default())
    }

    /// Create a driver with an explicit configuration
    pub fn with_config(uart: U, delay: D, config: ControllerConfig) -> Self {
        Self {
            table: CommandTable::new(),
            transactor: Transactor::new(uart, delay, config.settle_interval_us),
            config,
        }
    }

    /// Stop both motors
    ///
    /// Sends the motor 1 stop, then the motor 2 stop. The second is not sent
    /// if the first fails.
    pub fn stop(&mut self) -> Result<(), ControllerError<U::Error>> {
        for axis in Axis::ALL {
            let frame = self.table.template(CommandKind::Stop, axis);
            self.transact(&frame)?;
        }
        Ok(())
    }

    /// Command `axis` to seek to an absolute `position`
    ///
    /// Returns once the controller has acknowledged the write; motion
    /// completion is not awaited. Check the target against
    /// [`get_max_position`](Self::get_max_position) first.
    pub fn move_to(&mut self, axis: u8, position: i32) -> Result<(), ControllerError<U::Error>> {
        let axis = Axis::try_from(axis)?;
        let position = encode_position(position)?;
        let frame = self.table.move_frame(axis, position);
        self.transact(&frame)?;
        Ok(())
    }

    /// Current position of `axis`
    pub fn get_position(&mut self, axis: u8) -> Result<u16, ControllerError<U::Error>> {
        let reply = self.query(CommandKind::ReadCurrent, axis)?;
        Ok(decode_position(&reply))
    }

    /// Travel limit of `axis`
    pub fn get_max_position(&mut self, axis: u8) -> Result<u16, ControllerError<U::Error>> {
        let reply = self.query(CommandKind::ReadLimit, axis)?;
        Ok(decode_max_position(&reply))
    }

    /// Raw 32-bit value of one of the registers the command table reads
    ///
    /// Use [`AxisStatus::from_register`](duoaxis_protocol::AxisStatus::from_register)
    /// to interpret a [`CommandKind::ReadStatus`] value.
    pub fn read_register(
        &mut self,
        kind: CommandKind,
        axis: u8,
    ) -> Result<u32, ControllerError<U::Error>> {
        let reply = self.query(kind, axis)?;
        Ok(decode_register(&reply))
    }

    /// The command table this driver sends from
    pub fn table(&self) -> &CommandTable {
        &self.table
    }

    /// Active configuration
    pub fn config(&self) -> &ControllerConfig {
        &self.config
    }

    /// Number of exchanges completed so far
    pub fn transactions(&self) -> u32 {
        self.transactor.completed()
    }

    /// Give back the transport and delay
    pub fn release(self) -> (U, D) {
        self.transactor.release()
    }

    fn query(&mut self, kind: CommandKind, axis: u8) -> Result<Frame, ControllerError<U::Error>> {
        if !kind.is_read() {
            return Err(ControllerError::NotReadable(kind));
        }
        let axis = Axis::try_from(axis)?;
        let frame = self.table.template(kind, axis);
        self.transact(&frame)
    }

    fn transact(&mut self, frame: &Frame) -> Result<Frame, ControllerError<U::Error>> {
        let reply = self
            .transactor
            .execute(frame)
            .map_err(ControllerError::Transport)?;

        if self.config.verify_replies {
            if let Err(e) = reply.validate() {
                #[cfg(feature = "defmt")]
                defmt::warn!("reply to {} rejected: {}", frame, e);
                return Err(e.into());
            }
        }

        Ok(reply)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::controller::mock::{reply, CountingDelay, MockError, MockUart};
    use duoaxis_protocol::FrameError;

    /// Position reply 0x1234 with a valid checksum
    const POSITION_REPLY: [u8; 7] = [0xFF, 0x10, 0x34, 0x12, 0x00, 0x00, 0xAB];

    fn controller(uart: MockUart) -> MotorController<MockUart, CountingDelay> {
        MotorController::new(uart, CountingDelay::new())
    }

    #[test]
    fn test_get_position() {
        let mut ctl = controller(MockUart::echoing(POSITION_REPLY));

        assert_eq!(ctl.get_position(0), Ok(0x1234));

        let (uart, _) = ctl.release();
        assert_eq!(uart.written.len(), 1);
        assert_eq!(
            uart.written[0].as_bytes(),
            &[0xFF, 0x12, 0x00, 0x00, 0x00, 0x00, 0xEF]
        );
    }

    #[test]
    fn test_get_max_position_uses_limit_register() {
        let mut ctl = controller(MockUart::echoing(POSITION_REPLY));

        assert_eq!(ctl.get_max_position(1), Ok(4660));

        let (uart, _) = ctl.release();
        assert_eq!(uart.written[0].register(), 0x2C);
    }

    #[test]
    fn test_move_to_frame() {
        let mut ctl = controller(MockUart::echoing(POSITION_REPLY));

        ctl.move_to(1, 300).unwrap();

        let (uart, _) = ctl.release();
        assert_eq!(uart.written.len(), 1);
        let sent = uart.written[0];
        assert_eq!(&sent.as_bytes()[..6], &[0xFF, 0xA0, 0x2C, 0x01, 0x00, 0x00]);
        assert!(sent.is_valid());
    }

    #[test]
    fn test_repeated_moves_do_not_leak_payload() {
        let mut ctl = controller(MockUart::echoing(POSITION_REPLY));

        ctl.move_to(0, 0xABCD).unwrap();
        ctl.move_to(0, 7).unwrap();

        let (uart, _) = ctl.release();
        assert_eq!(uart.written[1].payload(), 7);
        assert!(uart.written[1].is_valid());
    }

    #[test]
    fn test_stop_sends_both_axes_in_order() {
        let mut ctl = controller(MockUart::echoing(POSITION_REPLY));

        ctl.stop().unwrap();
        assert_eq!(ctl.transactions(), 2);

        let (uart, _) = ctl.release();
        assert_eq!(uart.written.len(), 2);
        assert_eq!(uart.written[0].as_bytes()[1], 0x93);
        assert_eq!(uart.written[1].as_bytes()[1], 0xA3);
    }

    #[test]
    fn test_stop_aborts_after_first_failure() {
        let mut uart = MockUart::echoing(POSITION_REPLY);
        uart.fail_read = true;
        let mut ctl = controller(uart);

        assert_eq!(ctl.stop(), Err(ControllerError::Transport(MockError::Read)));

        let (uart, _) = ctl.release();
        assert_eq!(uart.written.len(), 1);
    }

    #[test]
    fn test_read_failure_returns_transport_error() {
        let mut uart = MockUart::echoing(POSITION_REPLY);
        uart.fail_read = true;
        let mut ctl = controller(uart);

        let result = ctl.get_position(0);

        assert_eq!(result, Err(ControllerError::Transport(MockError::Read)));
        assert!(result.unwrap_err().is_transport());
    }

    #[test]
    fn test_invalid_axis_sends_nothing() {
        let mut ctl = controller(MockUart::echoing(POSITION_REPLY));

        assert_eq!(ctl.move_to(2, 100), Err(ControllerError::InvalidAxis(2)));
        assert_eq!(ctl.get_position(2), Err(ControllerError::InvalidAxis(2)));
        assert_eq!(ctl.get_max_position(7), Err(ControllerError::InvalidAxis(7)));

        let (uart, delay) = ctl.release();
        assert_eq!(uart.calls(), 0);
        assert_eq!(delay.total_ns, 0);
    }

    #[test]
    fn test_position_out_of_range_sends_nothing() {
        let mut ctl = controller(MockUart::echoing(POSITION_REPLY));

        assert_eq!(
            ctl.move_to(0, 65_536),
            Err(ControllerError::PositionOutOfRange(65_536))
        );
        assert_eq!(
            ctl.move_to(0, -5),
            Err(ControllerError::PositionOutOfRange(-5))
        );

        let (uart, _) = ctl.release();
        assert_eq!(uart.calls(), 0);
    }

    #[test]
    fn test_corrupt_reply_trusted_by_default() {
        let corrupt = [0xFF, 0x10, 0x34, 0x12, 0x00, 0x00, 0x00];
        let mut ctl = controller(MockUart::echoing(corrupt));

        assert_eq!(ctl.get_position(0), Ok(0x1234));
    }

    #[test]
    fn test_corrupt_reply_rejected_when_verifying() {
        let corrupt = [0xFF, 0x10, 0x34, 0x12, 0x00, 0x00, 0x00];
        let config = ControllerConfig {
            verify_replies: true,
            ..ControllerConfig::default()
        };
        let mut ctl =
            MotorController::with_config(MockUart::echoing(corrupt), CountingDelay::new(), config);

        assert_eq!(
            ctl.get_position(0),
            Err(ControllerError::Integrity(FrameError::InvalidChecksum))
        );
    }

    #[test]
    fn test_valid_reply_accepted_when_verifying() {
        let config = ControllerConfig {
            verify_replies: true,
            ..ControllerConfig::default()
        };
        let mut ctl = MotorController::with_config(
            MockUart::echoing(POSITION_REPLY),
            CountingDelay::new(),
            config,
        );

        assert_eq!(ctl.get_position(0), Ok(0x1234));
    }

    #[test]
    fn test_read_register_status() {
        // Status 0x0104: seeking forward on the home sensor
        let status = reply(0x14, 0x0104);
        let mut ctl = controller(MockUart::scripted(&[status]));

        assert_eq!(ctl.read_register(CommandKind::ReadStatus, 0), Ok(0x0104));

        let (uart, _) = ctl.release();
        assert_eq!(uart.written[0].register(), 0x14);
    }

    #[test]
    fn test_read_register_rejects_writes() {
        let mut ctl = controller(MockUart::echoing(POSITION_REPLY));

        assert_eq!(
            ctl.read_register(CommandKind::WriteTarget, 0),
            Err(ControllerError::NotReadable(CommandKind::WriteTarget))
        );
        assert_eq!(
            ctl.read_register(CommandKind::Stop, 1),
            Err(ControllerError::NotReadable(CommandKind::Stop))
        );
        assert_eq!(ctl.transactions(), 0);
    }

    #[test]
    fn test_settle_interval_applied_per_exchange() {
        let config = ControllerConfig {
            settle_interval_us: 2_000,
            ..ControllerConfig::default()
        };
        let mut ctl = MotorController::with_config(
            MockUart::echoing(POSITION_REPLY),
            CountingDelay::new(),
            config,
        );

        ctl.stop().unwrap();

        let (_, delay) = ctl.release();
        assert_eq!(delay.total_ns, 4_000_000);
    }

    #[test]
    fn test_scripted_replies_in_order() {
        let first = reply(0x12, 10);
        let second = reply(0x22, 20);
        let mut ctl = controller(MockUart::scripted(&[first, second]));

        assert_eq!(ctl.get_position(0), Ok(10));
        assert_eq!(ctl.get_position(1), Ok(20));
        assert_eq!(
            ctl.get_position(0),
            Err(ControllerError::Transport(MockError::Read))
        );
    }
}
