//! SH1106 OLED Controller Command Encoder
//!
//! Turns typed SH1106 commands into the one- or two-byte sequences the
//! controller expects and pushes them through a pair of byte sinks (command and
//! display data). Supports the 132x64 controller RAM with 8 pages.
//!
//! ## Features
//!
//! - `no_std` compatible, no allocation
//! - `embedded-hal` v1.0 support (4-wire SPI and I2C)
//! - Every parameterized command masks its argument, so encoding never fails
//! - Guarded read-modify-write sessions
//!
//! Initialization order, reset timing and framebuffers are left to the caller.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use core::convert::Infallible;
//! use embedded_hal::digital::OutputPin;
//! use embedded_hal::spi::{Operation, SpiDevice};
//! use sh1106::command::{ComPadConfig, DisplayState, OscillatorFrequency, SegmentRemap};
//! use sh1106::{Sh1106, SpiInterface};
//!
//! # struct MockSpi;
//! # impl embedded_hal::spi::ErrorType for MockSpi { type Error = Infallible; }
//! # impl SpiDevice for MockSpi {
//! #     fn transaction(
//! #         &mut self,
//! #         _operations: &mut [Operation<'_, u8>],
//! #     ) -> Result<(), Self::Error> {
//! #         Ok(())
//! #     }
//! # }
//! # struct MockPin;
//! # impl embedded_hal::digital::ErrorType for MockPin { type Error = Infallible; }
//! # impl OutputPin for MockPin {
//! #     fn set_low(&mut self) -> Result<(), Self::Error> { Ok(()) }
//! #     fn set_high(&mut self) -> Result<(), Self::Error> { Ok(()) }
//! # }
//! # fn main() -> Result<(), sh1106::Error<SpiInterface<MockSpi, MockPin>>> {
//! # let spi = MockSpi;
//! # let dc = MockPin;
//! let mut display = Sh1106::new(SpiInterface::new(spi, dc));
//!
//! display.set_display_state(DisplayState::OledOff)?;
//! display.set_clock_divide(1, OscillatorFrequency::Por)?;
//! display.set_segment_remap(SegmentRemap::Reverse)?;
//! display.set_com_pad_config(ComPadConfig::Alternative)?;
//! display.set_contrast(0x80)?;
//! display.set_display_state(DisplayState::OledOn)?;
//!
//! display.set_cursor(0, 2)?;
//! display.write_display_data_slice(&[0xFF; 128])?;
//! # Ok(())
//! # }
//! ```

#![no_std]

#[cfg(test)]
extern crate alloc;

/// SH1106 command definitions and encoding
pub mod command;
/// Core display operations
pub mod display;
/// Error types for the driver
pub mod error;
/// Hardware interface abstraction
pub mod interface;

pub use command::{
    ComPadConfig, ComScanDirection, Command, DcDcMode, DisplayDirection, DisplayState, Encoded,
    OscillatorFrequency, PumpVoltage, SegmentRemap,
};
pub use display::{ReadModifyWrite, Sh1106};
pub use error::Error;
pub use interface::{
    DEFAULT_I2C_ADDRESS, DisplayInterface, FnInterface, I2cInterface, InterfaceError,
    SpiInterface,
};
