//! Strongly typed parameter enumerations for the ISM303DAC register map.
//!
//! These enums map directly to the vendor register field encodings and are used
//! across [`Config`](crate::config::Config) and the sensor drivers. Prefer these
//! types over raw integers to keep configuration values valid and explicit.
//!
//! # Examples
//!
//! ```rust
//! use ism303dac_poll::params::{AccelDataRate, AccelPowerMode, MagDataRate, MagSystemMode};
//!
//! let odr = AccelDataRate::Hz100;
//! let mode = AccelPowerMode::HighPerformance;
//! let mag = (MagSystemMode::Continuous, MagDataRate::Hz100);
//! let _ = (odr, mode, mag);
//! ```

use modular_bitfield::prelude::Specifier;

/// Accelerometer power mode (`CTRL1_A[7]`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Specifier)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
#[bits = 1]
pub enum AccelPowerMode {
    /// High-resolution continuous conversion.
    HighPerformance = 0,
    /// Low-power conversion.
    LowPower = 1,
}

/// Accelerometer output data rate selections (`CTRL1_A[6:4]`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Specifier)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
#[bits = 3]
pub enum AccelDataRate {
    /// Power-down, no conversions.
    PowerDown = 0b000,
    /// 12.5 Hz.
    Hz12_5 = 0b001,
    /// 25 Hz.
    Hz25 = 0b010,
    /// 50 Hz.
    Hz50 = 0b011,
    /// 100 Hz.
    Hz100 = 0b100,
    /// 200 Hz.
    Hz200 = 0b101,
    /// 400 Hz.
    Hz400 = 0b110,
    /// 800 Hz.
    Hz800 = 0b111,
}

impl AccelDataRate {
    /// Returns the ODR in millihertz, `0` when powered down.
    pub const fn millihertz(self) -> u32 {
        match self {
            Self::PowerDown => 0,
            Self::Hz12_5 => 12_500,
            Self::Hz25 => 25_000,
            Self::Hz50 => 50_000,
            Self::Hz100 => 100_000,
            Self::Hz200 => 200_000,
            Self::Hz400 => 400_000,
            Self::Hz800 => 800_000,
        }
    }
}

/// Accelerometer full-scale selections (`CTRL1_A[3:2]`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Specifier)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
#[bits = 2]
pub enum AccelFullScale {
    /// ±2 g.
    G2 = 0b00,
    /// ±16 g.
    G16 = 0b01,
    /// ±4 g.
    G4 = 0b10,
    /// ±8 g.
    G8 = 0b11,
}

/// Magnetometer system mode (`CFG_REG_A_M[1:0]`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Specifier)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
#[bits = 2]
pub enum MagSystemMode {
    /// Continuous acquisition.
    Continuous = 0b00,
    /// Single conversion, then back to idle.
    Single = 0b01,
    /// Idle.
    Idle = 0b10,
    /// Idle (alternate encoding, reset value).
    IdleDefault = 0b11,
}

impl MagSystemMode {
    /// Returns `true` for either idle encoding.
    pub const fn is_idle(self) -> bool {
        matches!(self, Self::Idle | Self::IdleDefault)
    }
}

/// Magnetometer output data rate (`CFG_REG_A_M[3:2]`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Specifier)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
#[bits = 2]
pub enum MagDataRate {
    /// 10 Hz.
    Hz10 = 0b00,
    /// 20 Hz.
    Hz20 = 0b01,
    /// 50 Hz.
    Hz50 = 0b10,
    /// 100 Hz.
    Hz100 = 0b11,
}

impl MagDataRate {
    /// Returns the ODR in hertz.
    pub const fn hz(self) -> u32 {
        match self {
            Self::Hz10 => 10,
            Self::Hz20 => 20,
            Self::Hz50 => 50,
            Self::Hz100 => 100,
        }
    }
}
