//! Hardware interface abstraction
//!
//! This module provides the [`DisplayInterface`] trait, the two byte sinks the
//! command encoder writes through, and a few adapters that wire it to
//! embedded-hal buses or plain closures.
//!
//! ## Adapters
//!
//! - [`SpiInterface`]: SPI device plus a DC pin (low = command, high = data)
//! - [`I2cInterface`]: I2C bus, every byte prefixed with a control byte
//! - [`FnInterface`]: two closures, one per sink
//!
//! The adapters only map the two-sink contract onto the HAL traits. Bus timing and
//! transaction framing stay with the HAL implementation.
//!
//! ## Example
//!
//! ```rust,no_run
//! use embedded_hal::digital::OutputPin;
//! use embedded_hal::spi::{Operation, SpiDevice};
//! use sh1106::{DisplayInterface, SpiInterface};
//! # use core::convert::Infallible;
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
//! // Create interface with SPI and the DC pin
//! let mut interface = SpiInterface::new(MockSpi, MockPin);
//!
//! // Send command
//! let _ = interface.send_command(0xAF); // Display on
//!
//! // Send one byte of display data
//! let _ = interface.send_data(0xFF);
//! ```

use core::fmt::Debug;
use embedded_hal::digital::OutputPin;
use embedded_hal::i2c::I2c;
use embedded_hal::spi::SpiDevice;

type InterfaceResult<T, E> = core::result::Result<T, E>;

/// Trait for the command and data byte sinks of the SH1106
///
/// The encoder calls exactly one of these per emitted byte and expects the
/// call to block until the byte has been accepted by the bus.
///
/// ## Implementing
///
/// For SPI or I2C wiring use [`SpiInterface`] or [`I2cInterface`]. For anything
/// else (parallel 8080/6800 buses, test recorders), implement this trait on your
/// own type or wrap two closures in [`FnInterface`].
pub trait DisplayInterface {
    /// Error type for interface operations
    ///
    /// Must implement [`Debug`] for error reporting.
    type Error: Debug;

    /// Send a command byte to the controller's command register
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying transport fails.
    fn send_command(&mut self, command: u8) -> InterfaceResult<(), Self::Error>;

    /// Send a byte to display RAM through the data register
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying transport fails.
    fn send_data(&mut self, data: u8) -> InterfaceResult<(), Self::Error>;
}

impl<T: DisplayInterface + ?Sized> DisplayInterface for &mut T {
    type Error = T::Error;

    fn send_command(&mut self, command: u8) -> InterfaceResult<(), Self::Error> {
        (**self).send_command(command)
    }

    fn send_data(&mut self, data: u8) -> InterfaceResult<(), Self::Error> {
        (**self).send_data(data)
    }
}

/// Errors that can occur at the SPI interface level
///
/// Generic over SPI and GPIO error types.
#[derive(Debug)]
pub enum InterfaceError<SpiErr, PinErr> {
    /// SPI communication error
    Spi(SpiErr),
    /// GPIO pin error
    Pin(PinErr),
}

impl<SpiErr: Debug, PinErr: Debug> core::fmt::Display for InterfaceError<SpiErr, PinErr> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Spi(e) => write!(f, "SPI error: {e:?}"),
            Self::Pin(e) => write!(f, "Pin error: {e:?}"),
        }
    }
}

impl<SpiErr: Debug, PinErr: Debug> core::error::Error for InterfaceError<SpiErr, PinErr> {}

/// SPI interface for the SH1106
///
/// Implements [`DisplayInterface`] for an embedded-hal v1.0 [`SpiDevice`] and a
/// Data/Command [`OutputPin`]. Chip select is handled by the `SpiDevice`.
///
/// ## Type Parameters
///
/// * `SPI` - SPI device implementing [`SpiDevice`]
/// * `DC` - Data/Command pin implementing [`OutputPin`]
pub struct SpiInterface<SPI, DC> {
    /// SPI device for communication
    spi: SPI,
    /// Data/Command select pin (low=command, high=data)
    dc: DC,
}

impl<SPI, DC> SpiInterface<SPI, DC>
where
    SPI: SpiDevice,
    DC: OutputPin,
{
    /// Create a new SPI interface
    ///
    /// # Arguments
    ///
    /// * `spi` - SPI device (must implement [`SpiDevice`])
    /// * `dc` - Data/Command pin (output, low=command, high=data)
    pub fn new(spi: SPI, dc: DC) -> Self {
        Self { spi, dc }
    }

    /// Give back the SPI device and DC pin
    pub fn release(self) -> (SPI, DC) {
        (self.spi, self.dc)
    }
}

impl<SPI, DC> DisplayInterface for SpiInterface<SPI, DC>
where
    SPI: SpiDevice,
    SPI::Error: Debug,
    DC: OutputPin,
    DC::Error: Debug,
{
    type Error = InterfaceError<SPI::Error, DC::Error>;

    fn send_command(&mut self, command: u8) -> InterfaceResult<(), Self::Error> {
        self.dc.set_low().map_err(InterfaceError::Pin)?;
        self.spi.write(&[command]).map_err(InterfaceError::Spi)?;
        Ok(())
    }

    fn send_data(&mut self, data: u8) -> InterfaceResult<(), Self::Error> {
        self.dc.set_high().map_err(InterfaceError::Pin)?;
        self.spi.write(&[data]).map_err(InterfaceError::Spi)?;
        Ok(())
    }
}

/// Default 7-bit I2C address of SH1106 modules (SA0 low)
pub const DEFAULT_I2C_ADDRESS: u8 = 0x3C;

/// I2C control byte announcing a command byte (Co=0, D/C#=0)
pub const I2C_CONTROL_COMMAND: u8 = 0x00;

/// I2C control byte announcing a data byte (Co=0, D/C#=1)
pub const I2C_CONTROL_DATA: u8 = 0x40;

/// I2C interface for the SH1106
///
/// Every byte is written as its own two-byte transfer: a control byte that
/// selects the command or data register, then the byte itself.
pub struct I2cInterface<I2C> {
    /// I2C bus
    i2c: I2C,
    /// 7-bit device address
    address: u8,
}

impl<I2C> I2cInterface<I2C>
where
    I2C: I2c,
{
    /// Create a new I2C interface for the device at `address`
    pub fn new(i2c: I2C, address: u8) -> Self {
        Self { i2c, address }
    }

    /// Device address in use
    pub fn address(&self) -> u8 {
        self.address
    }

    /// Give back the I2C bus
    pub fn release(self) -> I2C {
        self.i2c
    }
}

impl<I2C> DisplayInterface for I2cInterface<I2C>
where
    I2C: I2c,
{
    type Error = I2C::Error;

    fn send_command(&mut self, command: u8) -> InterfaceResult<(), Self::Error> {
        self.i2c.write(self.address, &[I2C_CONTROL_COMMAND, command])
    }

    fn send_data(&mut self, data: u8) -> InterfaceResult<(), Self::Error> {
        self.i2c.write(self.address, &[I2C_CONTROL_DATA, data])
    }
}

/// Interface built from two closures, one per sink
///
/// ```
/// use core::convert::Infallible;
/// use sh1106::{FnInterface, Sh1106};
///
/// let mut commands = [0u8; 4];
/// let mut sent = 0;
/// let interface = FnInterface::new(
///     |byte| {
///         commands[sent] = byte;
///         sent += 1;
///         Ok::<(), Infallible>(())
///     },
///     |_byte: u8| Ok(()),
/// );
/// let mut display = Sh1106::new(interface);
/// let _ = display.set_contrast(0x7F);
/// drop(display);
/// assert_eq!(&commands[..sent], &[0x81, 0x7F]);
/// ```
pub struct FnInterface<C, D> {
    /// Command sink
    command: C,
    /// Data sink
    data: D,
}

impl<C, D, E> FnInterface<C, D>
where
    C: FnMut(u8) -> InterfaceResult<(), E>,
    D: FnMut(u8) -> InterfaceResult<(), E>,
{
    /// Bind a command sink and a data sink
    pub fn new(command: C, data: D) -> Self {
        Self { command, data }
    }
}

impl<C, D, E> DisplayInterface for FnInterface<C, D>
where
    C: FnMut(u8) -> InterfaceResult<(), E>,
    D: FnMut(u8) -> InterfaceResult<(), E>,
    E: Debug,
{
    type Error = E;

    fn send_command(&mut self, command: u8) -> InterfaceResult<(), Self::Error> {
        (self.command)(command)
    }

    fn send_data(&mut self, data: u8) -> InterfaceResult<(), Self::Error> {
        (self.data)(data)
    }
}
