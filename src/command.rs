//! SH1106 command definitions
//!
//! This module holds the opcode table of the SH1106 OLED controller, the option
//! enums that select between fixed opcode variants, and [`Command`], which turns
//! one operation into the one or two bytes the controller expects on its command
//! register.
//!
//! Commands are written with the bus in command mode (A0/DC low). Display RAM
//! writes go through the data register instead and are not part of [`Command`].
//!
//! ## Encoding
//!
//! Numeric parameters are masked to their register field before they are packed
//! into an opcode. High bits the controller treats as "don't care" are dropped,
//! never rejected.
//!
//! ```
//! use sh1106::command::{Command, OscillatorFrequency};
//!
//! // Column address 0x2A splits into a low and a high nibble command
//! assert_eq!(Command::ColumnAddress(0x2A).encode().as_slice(), &[0x0A, 0x12]);
//!
//! // Page address is masked, not rejected
//! assert_eq!(Command::PageAddress(0xFF).encode().as_slice(), &[0xB7]);
//!
//! // Double-byte commands emit the mode-select byte first
//! let clock = Command::ClockDivide {
//!     ratio: 1,
//!     frequency: OscillatorFrequency::Por,
//! };
//! assert_eq!(clock.encode().as_slice(), &[0xD5, 0x50]);
//! ```

// Addressing commands

/// Set lower column address (0x00 - 0x0F)
///
/// Low nibble of the column address goes into D3-D0.
pub const SET_LOWER_COLUMN_ADDRESS: u8 = 0x00;

/// Set higher column address (0x10 - 0x1F)
///
/// High nibble of the column address goes into D3-D0.
pub const SET_HIGHER_COLUMN_ADDRESS: u8 = 0x10;

/// Set display start line (0x40 - 0x7F)
///
/// Line address 0-63 goes into D5-D0.
pub const SET_DISPLAY_START_LINE: u8 = 0x40;

/// Set page address (0xB0 - 0xB7)
///
/// Page 0-7 goes into D2-D0.
pub const SET_PAGE_ADDRESS: u8 = 0xB0;

// Power and analog commands

/// Set pump voltage value (0x30 - 0x33)
///
/// Charge pump output voltage selector goes into D1-D0.
pub const SET_PUMP_VOLTAGE: u8 = 0x30;

/// DC-DC control mode set (0xAD)
///
/// Double-byte command, followed by [`DC_DC_ON`] or [`DC_DC_OFF`].
/// The panel must be off while issuing it.
pub const DC_DC_CONTROL_MODE_SET: u8 = 0xAD;

/// DC-DC disabled (0x8A)
pub const DC_DC_OFF: u8 = 0x8A;

/// DC-DC turned on when the display is switched on (0x8B, POR)
pub const DC_DC_ON: u8 = 0x8B;

/// VCOM deselect level mode set (0xDB)
///
/// Double-byte command, followed by the raw level byte.
/// See [`vcom_deselect_beta`].
pub const VCOM_DESELECT_LEVEL_MODE_SET: u8 = 0xDB;

// Display control commands

/// Contrast control mode set (0x81)
///
/// Double-byte command, followed by one of 256 contrast steps.
/// No other command is accepted until the data byte has been written.
pub const CONTRAST_CONTROL_MODE_SET: u8 = 0x81;

/// Segment re-map, normal direction (0xA0, POR)
pub const SEGMENT_REMAP_NORMAL: u8 = 0xA0;

/// Segment re-map, reverse direction (0xA1)
pub const SEGMENT_REMAP_REVERSE: u8 = 0xA1;

/// Entire display off, show RAM contents (0xA4, POR)
pub const ENTIRE_DISPLAY_OFF: u8 = 0xA4;

/// Entire display on, regardless of RAM contents (0xA5)
pub const ENTIRE_DISPLAY_ON: u8 = 0xA5;

/// Normal display, RAM bit 1 lights the pixel (0xA6, POR)
pub const NORMAL_DISPLAY: u8 = 0xA6;

/// Reverse display, RAM bit 0 lights the pixel (0xA7)
pub const REVERSE_DISPLAY: u8 = 0xA7;

/// Display OFF, enters sleep mode (0xAE, POR)
pub const DISPLAY_OFF: u8 = 0xAE;

/// Display ON (0xAF)
pub const DISPLAY_ON: u8 = 0xAF;

// Hardware configuration commands

/// Multiplex ratio mode set (0xA8)
///
/// Double-byte command. Data byte is ratio - 1 in D5-D0.
pub const MULTIPLEX_RATIO_MODE_SET: u8 = 0xA8;

/// Common output scan from COM0 to COM[N-1] (0xC0, POR)
pub const COM_SCAN_NORMAL: u8 = 0xC0;

/// Common output scan from COM[N-1] to COM0 (0xC8)
pub const COM_SCAN_FLIPPED: u8 = 0xC8;

/// Display offset mode set (0xD3)
///
/// Double-byte command. Data byte is the COM offset 0-63 in D5-D0.
pub const DISPLAY_OFFSET_MODE_SET: u8 = 0xD3;

/// Common pads hardware configuration mode set (0xDA)
///
/// Double-byte command, followed by [`COM_PADS_SEQUENTIAL`] or [`COM_PADS_ALTERNATIVE`].
pub const COM_PADS_MODE_SET: u8 = 0xDA;

/// Sequential common pad layout (0x02)
pub const COM_PADS_SEQUENTIAL: u8 = 0x02;

/// Alternative common pad layout (0x12, POR)
pub const COM_PADS_ALTERNATIVE: u8 = 0x12;

// Timing commands

/// Divide ratio / oscillator frequency mode set (0xD5)
///
/// Double-byte command. Data byte packs the oscillator frequency in D7-D4
/// and divide ratio - 1 in D3-D0.
pub const CLOCK_DIVIDE_MODE_SET: u8 = 0xD5;

/// Dis-charge / pre-charge period mode set (0xD9)
///
/// Double-byte command. Data byte packs the dis-charge period in D7-D4
/// and the pre-charge period in D3-D0, both in DCLKs.
pub const PRE_CHARGE_PERIOD_MODE_SET: u8 = 0xD9;

// Read-modify-write and misc commands

/// Read-modify-write (0xE0)
///
/// Column address increments on writes only until [`END`] is issued.
pub const READ_MODIFY_WRITE: u8 = 0xE0;

/// End read-modify-write (0xEE)
///
/// Column address returns to where read-modify-write started.
pub const END: u8 = 0xEE;

/// Non-operation (0xE3)
pub const NOP: u8 = 0xE3;

// Register field masks

/// 4-bit field (column nibbles, clock and charge nibbles)
pub const NIBBLE_MASK: u8 = 0x0F;

/// Upper nibble of a packed data byte
pub const HIGH_NIBBLE_MASK: u8 = 0xF0;

/// 6-bit field (start line, multiplex ratio, display offset)
pub const SIX_BIT_MASK: u8 = 0x3F;

/// 3-bit field (page address)
pub const PAGE_MASK: u8 = 0x07;

/// 2-bit field (pump voltage)
pub const PUMP_VOLTAGE_MASK: u8 = 0x03;

// Controller geometry

/// Number of column addresses in display RAM
pub const NUM_COLUMNS: u8 = 132;

/// Highest valid column address
pub const MAX_COLUMN_ADDRESS: u8 = NUM_COLUMNS - 1;

/// Number of 8-row pages in display RAM
pub const NUM_PAGES: u8 = 8;

/// Number of COM lines
pub const NUM_LINES: u8 = 64;

/// Power-on reset values of the numeric registers
pub mod por {
    /// Contrast step (also the value to use when contrast control is unused)
    pub const CONTRAST: u8 = 0x80;
    /// Multiplex ratio register (ratio 64)
    pub const MULTIPLEX_RATIO: u8 = 0x3F;
    /// Display clock divide ratio
    pub const CLOCK_DIVIDE_RATIO: u8 = 1;
    /// Pre-charge period in DCLKs
    pub const PRE_CHARGE_PERIOD: u8 = 2;
    /// Dis-charge period in DCLKs
    pub const DIS_CHARGE_PERIOD: u8 = 2;
    /// VCOM deselect level (beta = 0.770)
    pub const VCOM_DESELECT_LEVEL: u8 = 0x35;
    /// Display start line
    pub const DISPLAY_START_LINE: u8 = 0;
    /// Display offset
    pub const DISPLAY_OFFSET: u8 = 0;
}

/// Charge pump output voltage (Vpp)
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[repr(u8)]
pub enum PumpVoltage {
    /// 7.4V (POR)
    #[default]
    V7_4 = 0b00,
    /// 8.0V
    V8_0 = 0b01,
    /// 8.4V
    V8_4 = 0b10,
    /// 9.0V
    V9_0 = 0b11,
}

impl PumpVoltage {
    /// Output voltage in millivolts
    pub fn millivolts(self) -> u16 {
        match self {
            Self::V7_4 => 7400,
            Self::V8_0 => 8000,
            Self::V8_4 => 8400,
            Self::V9_0 => 9000,
        }
    }
}

/// Relationship between RAM column address and segment driver
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SegmentRemap {
    /// Column 0 drives SEG0 (POR)
    #[default]
    Normal,
    /// Column 0 drives SEG131
    Reverse,
}

/// Display state
///
/// Covers both the entire-display override (`Internal*`) and the OLED panel
/// power (`Oled*`). The two pairs are independent controller settings.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DisplayState {
    /// Entire display forced on regardless of RAM contents
    InternalOn,
    /// Display follows RAM contents (POR)
    InternalOff,
    /// OLED panel on
    OledOn,
    /// OLED panel off, controller enters sleep mode (POR)
    OledOff,
}

/// Display polarity
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum DisplayDirection {
    /// RAM bit 1 lights the pixel (POR)
    #[default]
    Normal,
    /// RAM bit 0 lights the pixel
    Reverse,
}

/// Built-in DC-DC converter mode
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum DcDcMode {
    /// DC-DC turns on together with the display (POR)
    #[default]
    Enable,
    /// DC-DC off, external Vpp must be supplied
    Disable,
}

/// Common output scan direction
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ComScanDirection {
    /// Scan from COM0 to COM[N-1] (POR)
    #[default]
    Normal,
    /// Scan from COM[N-1] to COM0, flips the image vertically
    Flipped,
}

/// Common signals pad layout, dictated by how the module is wired
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ComPadConfig {
    /// COM31..0 on one side, COM32..63 on the other
    Sequential,
    /// COM62,60..0 on one side, COM1,3..63 on the other (POR)
    #[default]
    Alternative,
}

/// Oscillator frequency relative to the nominal fOSC
///
/// The discriminant is the value written to D7-D4 of the clock data byte.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[repr(u8)]
pub enum OscillatorFrequency {
    /// fOSC -25%
    Minus25 = 0x0,
    /// fOSC -20%
    Minus20 = 0x1,
    /// fOSC -15%
    Minus15 = 0x2,
    /// fOSC -10%
    Minus10 = 0x3,
    /// fOSC -5%
    Minus5 = 0x4,
    /// Nominal fOSC (POR)
    #[default]
    Por = 0x5,
    /// fOSC +5%
    Plus5 = 0x6,
    /// fOSC +10%
    Plus10 = 0x7,
    /// fOSC +15%
    Plus15 = 0x8,
    /// fOSC +20%
    Plus20 = 0x9,
    /// fOSC +25%
    Plus25 = 0xA,
    /// fOSC +30%
    Plus30 = 0xB,
    /// fOSC +35%
    Plus35 = 0xC,
    /// fOSC +40%
    Plus40 = 0xD,
    /// fOSC +45%
    Plus45 = 0xE,
    /// fOSC +50%
    Plus50 = 0xF,
}

impl OscillatorFrequency {
    /// Deviation from the nominal frequency in percent
    ///
    /// ```
    /// use sh1106::command::OscillatorFrequency;
    ///
    /// assert_eq!(OscillatorFrequency::Minus25.percent(), -25);
    /// assert_eq!(OscillatorFrequency::Por.percent(), 0);
    /// assert_eq!(OscillatorFrequency::Plus50.percent(), 50);
    /// ```
    pub fn percent(self) -> i8 {
        (self as i8) * 5 - 25
    }
}

/// VCOM deselect ratio for a register level
///
/// VCOM = beta * VREF, where beta = 0.430 + level * 0.006415 for levels below
/// 0x40 and 1.0 from 0x40 upwards.
pub fn vcom_deselect_beta(level: u8) -> f32 {
    if level >= 0x40 {
        1.0
    } else {
        0.430 + f32::from(level) * 0.006_415
    }
}

/// Encoded form of a single [`Command`]: one or two command-register bytes
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Encoded {
    bytes: [u8; 2],
    len: usize,
}

impl Encoded {
    const fn one(byte: u8) -> Self {
        Self {
            bytes: [byte, 0],
            len: 1,
        }
    }

    const fn two(mode: u8, data: u8) -> Self {
        Self {
            bytes: [mode, data],
            len: 2,
        }
    }

    /// Bytes in transmission order
    pub fn as_slice(&self) -> &[u8] {
        &self.bytes[..self.len]
    }

    /// Number of bytes (1 or 2)
    pub fn len(&self) -> usize {
        self.len
    }

    /// Always false, an encoded command has at least one byte
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Opcode (or mode-select byte for double-byte commands)
    pub fn first(&self) -> u8 {
        self.bytes[0]
    }
}

impl AsRef<[u8]> for Encoded {
    fn as_ref(&self) -> &[u8] {
        self.as_slice()
    }
}

/// One SH1106 command-register operation
///
/// Display data writes are not commands; they go through the data register
/// (see [`crate::Sh1106::write_display_data`]).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Command {
    /// Column address 0-131, sent as low then high nibble
    ColumnAddress(u8),
    /// Charge pump output voltage
    PumpVoltage(PumpVoltage),
    /// RAM line shown on COM0, 0-63
    DisplayStartLine(u8),
    /// Contrast step 0-255
    Contrast(u8),
    /// Segment re-map direction
    SegmentRemap(SegmentRemap),
    /// Entire-display override or OLED power
    DisplayState(DisplayState),
    /// Normal or reverse polarity
    DisplayDirection(DisplayDirection),
    /// Raw multiplex ratio register, 0-63 selects ratio 1-64
    MultiplexRatio(u8),
    /// DC-DC converter mode
    DcDcMode(DcDcMode),
    /// Page address 0-7
    PageAddress(u8),
    /// Common output scan direction
    ComScanDirection(ComScanDirection),
    /// COM offset 0-63
    DisplayOffset(u8),
    /// Display clock divide ratio 1-16 and oscillator frequency
    ClockDivide {
        /// Divide ratio 1-16 (0 wraps to 16)
        ratio: u8,
        /// Oscillator frequency
        frequency: OscillatorFrequency,
    },
    /// Pre-charge and dis-charge periods in DCLKs, 1-15 each (0 is invalid on the chip)
    ChargePeriods {
        /// Pre-charge period
        pre_charge: u8,
        /// Dis-charge period
        dis_charge: u8,
    },
    /// Common pads hardware configuration
    ComPadConfig(ComPadConfig),
    /// VCOM deselect level 0-255
    VcomDeselectLevel(u8),
    /// Enter read-modify-write mode
    ReadModifyWrite,
    /// Leave read-modify-write mode
    End,
    /// Non-operation
    Nop,
}

impl Command {
    /// Encode into command-register bytes
    pub fn encode(self) -> Encoded {
        match self {
            Self::ColumnAddress(addr) => Encoded::two(
                SET_LOWER_COLUMN_ADDRESS | (addr & NIBBLE_MASK),
                SET_HIGHER_COLUMN_ADDRESS | ((addr >> 4) & NIBBLE_MASK),
            ),
            Self::PumpVoltage(voltage) => {
                Encoded::one(SET_PUMP_VOLTAGE | (voltage as u8 & PUMP_VOLTAGE_MASK))
            }
            Self::DisplayStartLine(line) => {
                Encoded::one(SET_DISPLAY_START_LINE | (line & SIX_BIT_MASK))
            }
            Self::Contrast(contrast) => Encoded::two(CONTRAST_CONTROL_MODE_SET, contrast),
            Self::SegmentRemap(remap) => Encoded::one(match remap {
                SegmentRemap::Normal => SEGMENT_REMAP_NORMAL,
                SegmentRemap::Reverse => SEGMENT_REMAP_REVERSE,
            }),
            Self::DisplayState(state) => Encoded::one(match state {
                DisplayState::InternalOn => ENTIRE_DISPLAY_ON,
                DisplayState::InternalOff => ENTIRE_DISPLAY_OFF,
                DisplayState::OledOn => DISPLAY_ON,
                DisplayState::OledOff => DISPLAY_OFF,
            }),
            Self::DisplayDirection(direction) => Encoded::one(match direction {
                DisplayDirection::Normal => NORMAL_DISPLAY,
                DisplayDirection::Reverse => REVERSE_DISPLAY,
            }),
            Self::MultiplexRatio(ratio) => {
                Encoded::two(MULTIPLEX_RATIO_MODE_SET, ratio & SIX_BIT_MASK)
            }
            Self::DcDcMode(mode) => Encoded::two(
                DC_DC_CONTROL_MODE_SET,
                match mode {
                    DcDcMode::Enable => DC_DC_ON,
                    DcDcMode::Disable => DC_DC_OFF,
                },
            ),
            Self::PageAddress(page) => Encoded::one(SET_PAGE_ADDRESS | (page & PAGE_MASK)),
            Self::ComScanDirection(direction) => Encoded::one(match direction {
                ComScanDirection::Normal => COM_SCAN_NORMAL,
                ComScanDirection::Flipped => COM_SCAN_FLIPPED,
            }),
            Self::DisplayOffset(offset) => {
                Encoded::two(DISPLAY_OFFSET_MODE_SET, offset & SIX_BIT_MASK)
            }
            Self::ClockDivide { ratio, frequency } => Encoded::two(
                CLOCK_DIVIDE_MODE_SET,
                (((frequency as u8) << 4) & HIGH_NIBBLE_MASK)
                    | (ratio.wrapping_sub(1) & NIBBLE_MASK),
            ),
            Self::ChargePeriods {
                pre_charge,
                dis_charge,
            } => Encoded::two(
                PRE_CHARGE_PERIOD_MODE_SET,
                ((dis_charge << 4) & HIGH_NIBBLE_MASK) | (pre_charge & NIBBLE_MASK),
            ),
            Self::ComPadConfig(config) => Encoded::two(
                COM_PADS_MODE_SET,
                match config {
                    ComPadConfig::Sequential => COM_PADS_SEQUENTIAL,
                    ComPadConfig::Alternative => COM_PADS_ALTERNATIVE,
                },
            ),
            Self::VcomDeselectLevel(level) => Encoded::two(VCOM_DESELECT_LEVEL_MODE_SET, level),
            Self::ReadModifyWrite => Encoded::one(READ_MODIFY_WRITE),
            Self::End => Encoded::one(END),
            Self::Nop => Encoded::one(NOP),
        }
    }
}
