//! Core display operations
//!
//! [`Sh1106`] binds a [`DisplayInterface`] and exposes one method per controller
//! command. It keeps no controller state: every method encodes its parameters,
//! writes one or two bytes to the command sink (or one byte per pixel byte to the
//! data sink), and returns.

use crate::command::{
    ComPadConfig, ComScanDirection, Command, DcDcMode, DisplayDirection, DisplayState,
    OscillatorFrequency, PumpVoltage, SegmentRemap,
};
use crate::error::Error;
use crate::interface::DisplayInterface;

type DisplayResult<I> = core::result::Result<(), Error<I>>;

/// Command encoder for the SH1106 controller
///
/// ## Example
///
/// ```
/// use sh1106::command::{DcDcMode, DisplayState};
/// use sh1106::{FnInterface, Sh1106};
///
/// let mut log = [0u8; 8];
/// let mut len = 0;
/// let interface = FnInterface::new(
///     |byte: u8| {
///         log[len] = byte;
///         len += 1;
///         Ok::<(), core::convert::Infallible>(())
///     },
///     |_byte: u8| Ok(()),
/// );
/// let mut display = Sh1106::new(interface);
/// let _ = display.set_dc_dc_mode(DcDcMode::Enable);
/// let _ = display.set_display_state(DisplayState::OledOn);
/// drop(display);
/// assert_eq!(&log[..len], &[0xAD, 0x8B, 0xAF]);
/// ```
pub struct Sh1106<I>
where
    I: DisplayInterface,
{
    /// Command and data sinks
    interface: I,
}

impl<I> Sh1106<I>
where
    I: DisplayInterface,
{
    /// Create a new encoder on top of `interface`
    pub fn new(interface: I) -> Self {
        Self { interface }
    }

    /// Give back the interface
    pub fn release(self) -> I {
        self.interface
    }

    /// Access the underlying interface
    pub fn interface(&mut self) -> &mut I {
        &mut self.interface
    }

    /// Emit an already built [`Command`]
    ///
    /// Bytes go out in order; if one fails the rest are not sent.
    pub fn send(&mut self, command: Command) -> DisplayResult<I> {
        let encoded = command.encode();
        log::trace!("sh1106 command {:?} -> {:02X?}", command, encoded.as_slice());
        for &byte in encoded.as_slice() {
            self.interface.send_command(byte).map_err(Error::Interface)?;
        }
        Ok(())
    }

    /// Set column address (0-131), low nibble first
    pub fn set_column_address(&mut self, column: u8) -> DisplayResult<I> {
        self.send(Command::ColumnAddress(column))
    }

    /// Set charge pump output voltage
    pub fn set_pump_voltage(&mut self, voltage: PumpVoltage) -> DisplayResult<I> {
        self.send(Command::PumpVoltage(voltage))
    }

    /// Set the RAM line displayed on COM0 (0-63)
    pub fn set_display_start_line(&mut self, line: u8) -> DisplayResult<I> {
        self.send(Command::DisplayStartLine(line))
    }

    /// Set contrast step (0-255)
    pub fn set_contrast(&mut self, contrast: u8) -> DisplayResult<I> {
        self.send(Command::Contrast(contrast))
    }

    /// Set segment re-map direction
    pub fn set_segment_remap(&mut self, remap: SegmentRemap) -> DisplayResult<I> {
        self.send(Command::SegmentRemap(remap))
    }

    /// Set entire-display override or OLED panel power
    pub fn set_display_state(&mut self, state: DisplayState) -> DisplayResult<I> {
        self.send(Command::DisplayState(state))
    }

    /// Set normal or reverse display polarity
    pub fn set_display_direction(&mut self, direction: DisplayDirection) -> DisplayResult<I> {
        self.send(Command::DisplayDirection(direction))
    }

    /// Set the raw multiplex ratio register
    ///
    /// `ratio` is the register value 0-63, selecting a multiplex ratio of
    /// `ratio + 1`. Higher bits are dropped.
    pub fn set_multiplex_ratio(&mut self, ratio: u8) -> DisplayResult<I> {
        self.send(Command::MultiplexRatio(ratio))
    }

    /// Set DC-DC converter mode
    ///
    /// The panel must be off while this command is issued.
    pub fn set_dc_dc_mode(&mut self, mode: DcDcMode) -> DisplayResult<I> {
        self.send(Command::DcDcMode(mode))
    }

    /// Set page address (0-7)
    pub fn set_page_address(&mut self, page: u8) -> DisplayResult<I> {
        self.send(Command::PageAddress(page))
    }

    /// Set common output scan direction
    pub fn set_com_scan_direction(&mut self, direction: ComScanDirection) -> DisplayResult<I> {
        self.send(Command::ComScanDirection(direction))
    }

    /// Set COM display offset (0-63)
    pub fn set_display_offset(&mut self, offset: u8) -> DisplayResult<I> {
        self.send(Command::DisplayOffset(offset))
    }

    /// Set display clock divide ratio (1-16) and oscillator frequency
    pub fn set_clock_divide(
        &mut self,
        ratio: u8,
        frequency: OscillatorFrequency,
    ) -> DisplayResult<I> {
        self.send(Command::ClockDivide { ratio, frequency })
    }

    /// Set pre-charge and dis-charge periods in DCLKs (1-15 each)
    ///
    /// A period of 0 is invalid on the chip but is passed through unchanged.
    pub fn set_charge_periods(&mut self, pre_charge: u8, dis_charge: u8) -> DisplayResult<I> {
        self.send(Command::ChargePeriods {
            pre_charge,
            dis_charge,
        })
    }

    /// Set common pads hardware configuration
    pub fn set_com_pad_config(&mut self, config: ComPadConfig) -> DisplayResult<I> {
        self.send(Command::ComPadConfig(config))
    }

    /// Set VCOM deselect level (see [`crate::command::vcom_deselect_beta`])
    pub fn set_vcom_deselect_level(&mut self, level: u8) -> DisplayResult<I> {
        self.send(Command::VcomDeselectLevel(level))
    }

    /// Enter read-modify-write mode
    ///
    /// Must be paired with [`Self::end_read_modify_write`]. Nothing here tracks
    /// the pairing; use [`Self::read_modify_write`] for a guarded session.
    pub fn begin_read_modify_write(&mut self) -> DisplayResult<I> {
        self.send(Command::ReadModifyWrite)
    }

    /// Leave read-modify-write mode
    ///
    /// The controller moves the column address back to where the session began.
    pub fn end_read_modify_write(&mut self) -> DisplayResult<I> {
        self.send(Command::End)
    }

    /// Non-operation
    pub fn nop(&mut self) -> DisplayResult<I> {
        self.send(Command::Nop)
    }

    /// Write one byte to display RAM through the data sink
    pub fn write_display_data(&mut self, data: u8) -> DisplayResult<I> {
        self.interface.send_data(data).map_err(Error::Interface)
    }

    /// Write a run of bytes to display RAM, one data sink call per byte
    ///
    /// Stops at the first failing byte.
    pub fn write_display_data_slice(&mut self, data: &[u8]) -> DisplayResult<I> {
        log::trace!("sh1106 data {} bytes", data.len());
        for &byte in data {
            self.write_display_data(byte)?;
        }
        Ok(())
    }

    /// Move the RAM access position: page address, then column address
    pub fn set_cursor(&mut self, page: u8, column: u8) -> DisplayResult<I> {
        self.set_page_address(page)?;
        self.set_column_address(column)
    }

    /// Start a guarded read-modify-write session
    ///
    /// Emits `Read-Modify-Write` and returns a guard that borrows the display,
    /// so no other command can be interleaved until the session ends. Call
    /// [`ReadModifyWrite::finish`] to emit `End` and observe its result. A guard
    /// dropped without `finish` still emits `End`.
    ///
    /// # Errors
    ///
    /// Returns the interface error if the begin command could not be sent. No
    /// guard is created in that case.
    pub fn read_modify_write(&mut self) -> Result<ReadModifyWrite<'_, I>, Error<I>> {
        self.begin_read_modify_write()?;
        log::debug!("sh1106 read-modify-write started");
        Ok(ReadModifyWrite {
            display: self,
            finished: false,
        })
    }
}

/// Guarded read-modify-write session
///
/// Column address only advances on data writes while the guard lives. Ending
/// the session restores the column address to where it started.
pub struct ReadModifyWrite<'a, I>
where
    I: DisplayInterface,
{
    display: &'a mut Sh1106<I>,
    finished: bool,
}

impl<I> ReadModifyWrite<'_, I>
where
    I: DisplayInterface,
{
    /// Write one byte to display RAM
    pub fn write_display_data(&mut self, data: u8) -> DisplayResult<I> {
        self.display.write_display_data(data)
    }

    /// Write a run of bytes to display RAM
    pub fn write_display_data_slice(&mut self, data: &[u8]) -> DisplayResult<I> {
        self.display.write_display_data_slice(data)
    }

    /// Emit `End` and close the session
    pub fn finish(mut self) -> DisplayResult<I> {
        self.finished = true;
        log::debug!("sh1106 read-modify-write finished");
        self.display.end_read_modify_write()
    }
}

impl<I> Drop for ReadModifyWrite<'_, I>
where
    I: DisplayInterface,
{
    fn drop(&mut self) {
        if self.finished {
            return;
        }
        if let Err(e) = self.display.end_read_modify_write() {
            log::warn!("sh1106 read-modify-write not closed: {:?}", e.into_inner());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec::Vec;

    #[derive(Debug, Clone, Copy, PartialEq)]
    enum Sink {
        Command(u8),
        Data(u8),
    }

    #[derive(Debug, Clone, Copy, PartialEq)]
    struct BusFault;

    #[derive(Debug, Default)]
    struct MockInterface {
        calls: Vec<Sink>,
        /// Fail the call with this index (0-based)
        fail_at: Option<usize>,
    }

    impl MockInterface {
        fn failing_at(index: usize) -> Self {
            Self {
                calls: Vec::new(),
                fail_at: Some(index),
            }
        }

        fn record(&mut self, call: Sink) -> Result<(), BusFault> {
            if self.fail_at == Some(self.calls.len()) {
                return Err(BusFault);
            }
            self.calls.push(call);
            Ok(())
        }

        fn commands(&self) -> Vec<u8> {
            self.calls
                .iter()
                .filter_map(|call| match call {
                    Sink::Command(byte) => Some(*byte),
                    Sink::Data(_) => None,
                })
                .collect()
        }
    }

    impl DisplayInterface for MockInterface {
        type Error = BusFault;

        fn send_command(&mut self, command: u8) -> Result<(), Self::Error> {
            self.record(Sink::Command(command))
        }

        fn send_data(&mut self, data: u8) -> Result<(), Self::Error> {
            self.record(Sink::Data(data))
        }
    }

    fn test_display() -> Sh1106<MockInterface> {
        Sh1106::new(MockInterface::default())
    }

    #[test]
    fn test_contrast_sink_order() {
        let mut display = test_display();
        display.set_contrast(0x7F).unwrap();
        assert_eq!(
            display.interface.calls,
            alloc::vec![Sink::Command(0x81), Sink::Command(0x7F)]
        );
    }

    #[test]
    fn test_column_address_all_valid() {
        for column in 0..=131u8 {
            let mut display = test_display();
            display.set_column_address(column).unwrap();
            assert_eq!(
                display.interface.commands(),
                alloc::vec![column & 0x0F, 0x10 | ((column >> 4) & 0x0F)]
            );
        }
    }

    fn command_bytes<F>(op: F) -> usize
    where
        F: FnOnce(&mut Sh1106<MockInterface>) -> DisplayResult<MockInterface>,
    {
        let mut display = test_display();
        op(&mut display).unwrap();
        assert!(
            display
                .interface
                .calls
                .iter()
                .all(|call| matches!(call, Sink::Command(_)))
        );
        display.interface.calls.len()
    }

    #[test]
    fn test_every_operation_byte_count() {
        assert_eq!(command_bytes(|d| d.set_column_address(10)), 2);
        assert_eq!(command_bytes(|d| d.set_pump_voltage(PumpVoltage::V9_0)), 1);
        assert_eq!(command_bytes(|d| d.set_display_start_line(5)), 1);
        assert_eq!(command_bytes(|d| d.set_contrast(0x10)), 2);
        assert_eq!(command_bytes(|d| d.set_segment_remap(SegmentRemap::Reverse)), 1);
        assert_eq!(command_bytes(|d| d.set_display_state(DisplayState::OledOff)), 1);
        assert_eq!(
            command_bytes(|d| d.set_display_direction(DisplayDirection::Reverse)),
            1
        );
        assert_eq!(command_bytes(|d| d.set_multiplex_ratio(0x3F)), 2);
        assert_eq!(command_bytes(|d| d.set_dc_dc_mode(DcDcMode::Disable)), 2);
        assert_eq!(command_bytes(|d| d.set_page_address(3)), 1);
        assert_eq!(
            command_bytes(|d| d.set_com_scan_direction(ComScanDirection::Flipped)),
            1
        );
        assert_eq!(command_bytes(|d| d.set_display_offset(7)), 2);
        assert_eq!(
            command_bytes(|d| d.set_clock_divide(1, OscillatorFrequency::Por)),
            2
        );
        assert_eq!(command_bytes(|d| d.set_charge_periods(2, 2)), 2);
        assert_eq!(
            command_bytes(|d| d.set_com_pad_config(ComPadConfig::Sequential)),
            2
        );
        assert_eq!(command_bytes(|d| d.set_vcom_deselect_level(0x35)), 2);
        assert_eq!(command_bytes(|d| d.begin_read_modify_write()), 1);
        assert_eq!(command_bytes(|d| d.end_read_modify_write()), 1);
        assert_eq!(command_bytes(|d| d.nop()), 1);
    }

    #[test]
    fn test_option_commands_exact_bytes() {
        let mut display = test_display();
        display.set_segment_remap(SegmentRemap::Normal).unwrap();
        display.set_segment_remap(SegmentRemap::Reverse).unwrap();
        display.set_display_state(DisplayState::InternalOn).unwrap();
        display.set_display_state(DisplayState::InternalOff).unwrap();
        display.set_display_state(DisplayState::OledOn).unwrap();
        display.set_display_state(DisplayState::OledOff).unwrap();
        display.set_display_direction(DisplayDirection::Normal).unwrap();
        display.set_display_direction(DisplayDirection::Reverse).unwrap();
        display.set_com_scan_direction(ComScanDirection::Normal).unwrap();
        display.set_com_scan_direction(ComScanDirection::Flipped).unwrap();
        display.set_dc_dc_mode(DcDcMode::Enable).unwrap();
        display.set_dc_dc_mode(DcDcMode::Disable).unwrap();
        assert_eq!(
            display.interface.commands(),
            alloc::vec![
                0xA0, 0xA1, 0xA5, 0xA4, 0xAF, 0xAE, 0xA6, 0xA7, 0xC0, 0xC8, 0xAD, 0x8B, 0xAD, 0x8A
            ]
        );
    }

    #[test]
    fn test_write_display_data_uses_data_sink_only() {
        let mut display = test_display();
        display.write_display_data(0xAB).unwrap();
        assert_eq!(display.interface.calls, alloc::vec![Sink::Data(0xAB)]);
    }

    #[test]
    fn test_write_display_data_slice() {
        let mut display = test_display();
        display.write_display_data_slice(&[0x01, 0x02, 0xFF]).unwrap();
        assert_eq!(
            display.interface.calls,
            alloc::vec![Sink::Data(0x01), Sink::Data(0x02), Sink::Data(0xFF)]
        );
    }

    #[test]
    fn test_write_display_data_slice_stops_on_failure() {
        let mut display = Sh1106::new(MockInterface::failing_at(1));
        let result = display.write_display_data_slice(&[0x01, 0x02, 0x03]);
        assert!(matches!(result, Err(Error::Interface(BusFault))));
        assert_eq!(display.interface.calls, alloc::vec![Sink::Data(0x01)]);
    }

    #[test]
    fn test_page_address_masks() {
        let mut display = test_display();
        display.set_page_address(0xFF).unwrap();
        display.set_page_address(0x07).unwrap();
        assert_eq!(display.interface.commands(), alloc::vec![0xB7, 0xB7]);
    }

    #[test]
    fn test_repeated_calls_are_identical() {
        let mut first = test_display();
        let mut second = test_display();
        first.set_clock_divide(4, OscillatorFrequency::Minus10).unwrap();
        second.set_clock_divide(4, OscillatorFrequency::Minus10).unwrap();
        first.set_clock_divide(4, OscillatorFrequency::Minus10).unwrap();
        assert_eq!(first.interface.commands()[..2], second.interface.commands()[..]);
        assert_eq!(first.interface.commands()[2..], second.interface.commands()[..]);
    }

    #[test]
    fn test_failed_mode_select_skips_data_byte() {
        let mut display = Sh1106::new(MockInterface::failing_at(0));
        let result = display.set_contrast(0x40);
        assert!(matches!(result, Err(Error::Interface(BusFault))));
        assert!(display.interface.calls.is_empty());
    }

    #[test]
    fn test_failed_data_byte_is_reported() {
        let mut display = Sh1106::new(MockInterface::failing_at(1));
        let result = display.set_vcom_deselect_level(0x35);
        assert!(matches!(result, Err(Error::Interface(BusFault))));
        assert_eq!(display.interface.calls, alloc::vec![Sink::Command(0xDB)]);
    }

    #[test]
    fn test_raw_read_modify_write_boundaries() {
        let mut display = test_display();
        display.begin_read_modify_write().unwrap();
        display.end_read_modify_write().unwrap();
        assert_eq!(
            display.interface.calls,
            alloc::vec![Sink::Command(0xE0), Sink::Command(0xEE)]
        );
    }

    #[test]
    fn test_read_modify_write_guard_finish() {
        let mut display = test_display();
        let mut session = display.read_modify_write().unwrap();
        session.write_display_data(0x3C).unwrap();
        session.write_display_data_slice(&[0x18]).unwrap();
        session.finish().unwrap();
        assert_eq!(
            display.interface.calls,
            alloc::vec![
                Sink::Command(0xE0),
                Sink::Data(0x3C),
                Sink::Data(0x18),
                Sink::Command(0xEE)
            ]
        );
    }

    #[test]
    fn test_read_modify_write_guard_drop_ends_session() {
        let mut display = test_display();
        {
            let _session = display.read_modify_write().unwrap();
        }
        assert_eq!(
            display.interface.calls,
            alloc::vec![Sink::Command(0xE0), Sink::Command(0xEE)]
        );
    }

    #[test]
    fn test_read_modify_write_begin_failure_creates_no_guard() {
        let mut display = Sh1106::new(MockInterface::failing_at(0));
        assert!(display.read_modify_write().is_err());
        assert!(display.interface.calls.is_empty());
    }

    #[test]
    fn test_set_cursor_page_then_column() {
        let mut display = test_display();
        display.set_cursor(2, 0x42).unwrap();
        assert_eq!(display.interface.commands(), alloc::vec![0xB2, 0x02, 0x14]);
    }

    #[test]
    fn test_send_prebuilt_command() {
        let mut display = test_display();
        display
            .send(Command::ChargePeriods {
                pre_charge: 1,
                dis_charge: 15,
            })
            .unwrap();
        assert_eq!(display.interface.commands(), alloc::vec![0xD9, 0xF1]);
    }

    #[test]
    fn test_release_returns_interface() {
        let mut display = test_display();
        display.nop().unwrap();
        let interface = display.release();
        assert_eq!(interface.calls, alloc::vec![Sink::Command(0xE3)]);
    }

    #[test]
    fn test_borrowed_interface() {
        let mut interface = MockInterface::default();
        {
            let mut display = Sh1106::new(&mut interface);
            display.set_display_start_line(0x7F).unwrap();
        }
        assert_eq!(interface.calls, alloc::vec![Sink::Command(0x7F)]);
    }
}
