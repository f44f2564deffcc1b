//! Register map definitions for the ISM303DAC accelerometer and magnetometer.
#![allow(unused_parens)]

use modular_bitfield::prelude::*;

use crate::params::{AccelDataRate, AccelFullScale, AccelPowerMode, MagDataRate, MagSystemMode};

// Accelerometer (I²C address 0x1D).

/// Register address of `WHO_AM_I_A`.
pub const REG_WHO_AM_I_A: u8 = 0x0F;
/// Register address of `CTRL1_A`.
pub const REG_CTRL1_A: u8 = 0x20;
/// Register address of `STATUS_A`.
pub const REG_STATUS_A: u8 = 0x27;
/// Register address of `OUT_X_L_A`.
pub const REG_OUT_X_L_A: u8 = 0x28;

/// Expected `WHO_AM_I_A` content.
pub const EXPECTED_WHO_AM_I_A: u8 = 0x43;

// Magnetometer (I²C address 0x1E).

/// Register address of `WHO_AM_I_M`.
pub const REG_WHO_AM_I_M: u8 = 0x4F;
/// Register address of `CFG_REG_A_M`.
pub const REG_CFG_REG_A_M: u8 = 0x60;
/// Register address of `STATUS_REG_M`.
pub const REG_STATUS_REG_M: u8 = 0x67;
/// Register address of `OUTX_L_REG_M`.
pub const REG_OUTX_L_REG_M: u8 = 0x68;

/// Expected `WHO_AM_I_M` content.
pub const EXPECTED_WHO_AM_I_M: u8 = 0x40;

/// Number of consecutive bytes spanning the X, Y, Z output registers.
pub const RAW_AXIS_BYTES: usize = 6;

/// Minimal metadata exposed by every register value type.
pub trait Register: From<u8> + Into<u8> + Copy {
    /// Register address as documented in the datasheet.
    const ADDRESS: u8;
    /// Reset/default value defined by the datasheet.
    const RESET_VALUE: u8;
}

/// Bitfield representation of the `CTRL1_A` register (address `0x20`).
#[allow(unused_parens)]
#[bitfield]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ctrl1A {
    // Block data update (bit 0).
    pub bdu: bool,
    // High-frequency ODR selection (bit 1).
    pub hf_odr: bool,
    // Full-scale selection (bits 3:2).
    pub full_scale: AccelFullScale,
    // Output data rate (bits 6:4).
    pub odr: AccelDataRate,
    // Low-power conversion (bit 7).
    pub power_mode: AccelPowerMode,
}

/// Bitfield representation of the `STATUS_A` register (address `0x27`).
#[allow(unused_parens)]
#[bitfield]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatusA {
    // New X, Y, Z data available (bit 0).
    pub drdy: bool,
    // Free-fall event (bit 1).
    pub ff_ia: bool,
    // Orientation change event (bit 2).
    pub d6d_ia: bool,
    // Single tap event (bit 3).
    pub single_tap: bool,
    // Double tap event (bit 4).
    pub double_tap: bool,
    // Sleep state (bit 5).
    pub sleep_state: bool,
    // Wake-up event (bit 6).
    pub wu_ia: bool,
    // FIFO threshold reached (bit 7).
    pub fifo_ths: bool,
}

/// Bitfield representation of the `CFG_REG_A_M` register (address `0x60`).
#[allow(unused_parens)]
#[bitfield]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CfgRegAM {
    // System mode (bits 1:0).
    pub mode: MagSystemMode,
    // Output data rate (bits 3:2).
    pub odr: MagDataRate,
    // Low-power mode (bit 4).
    pub low_power: bool,
    // Soft reset (bit 5).
    pub soft_rst: bool,
    // Reboot memory content (bit 6).
    pub reboot: bool,
    // Temperature compensation (bit 7).
    pub comp_temp_en: bool,
}

/// Bitfield representation of the `STATUS_REG_M` register (address `0x67`).
#[allow(unused_parens)]
#[bitfield]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatusRegM {
    // X-axis new data (bit 0).
    pub xda: bool,
    // Y-axis new data (bit 1).
    pub yda: bool,
    // Z-axis new data (bit 2).
    pub zda: bool,
    // X, Y, Z new data (bit 3).
    pub zyxda: bool,
    // X-axis overrun (bit 4).
    pub xor: bool,
    // Y-axis overrun (bit 5).
    pub yor: bool,
    // Z-axis overrun (bit 6).
    pub zor: bool,
    // X, Y, Z overrun (bit 7).
    pub zyxor: bool,
}

macro_rules! byte_register {
    ($ty:ty, $address:expr, $reset:expr) => {
        impl From<u8> for $ty {
            fn from(value: u8) -> Self {
                Self::from_bytes([value])
            }
        }

        impl From<$ty> for u8 {
            fn from(value: $ty) -> Self {
                value.into_bytes()[0]
            }
        }

        impl Register for $ty {
            const ADDRESS: u8 = $address;
            const RESET_VALUE: u8 = $reset;
        }
    };
}

byte_register!(Ctrl1A, REG_CTRL1_A, 0x00);
byte_register!(StatusA, REG_STATUS_A, 0x00);
byte_register!(CfgRegAM, REG_CFG_REG_A_M, 0x03);
byte_register!(StatusRegM, REG_STATUS_REG_M, 0x00);

#[cfg(test)]
mod tests {
    use super::*;

    /// `CTRL1_A` for high-performance 100 Hz at ±2 g.
    #[test]
    fn ctrl1_a_layout_matches_datasheet() {
        let ctrl = Ctrl1A::new()
            .with_odr(AccelDataRate::Hz100)
            .with_full_scale(AccelFullScale::G2)
            .with_power_mode(AccelPowerMode::HighPerformance);

        assert_eq!(u8::from(ctrl), 0b0_100_00_0_0);

        let low_power = ctrl.with_power_mode(AccelPowerMode::LowPower);
        assert_eq!(u8::from(low_power), 0b1_100_00_0_0);
        assert_eq!(Ctrl1A::from(0xC4).full_scale(), AccelFullScale::G16);
    }

    #[test]
    fn status_a_ready_bit_is_bit_zero() {
        assert!(StatusA::from(0x01).drdy());
        assert!(!StatusA::from(0xFE).drdy());
        assert!(StatusA::from(0x80).fifo_ths());
    }

    /// Continuous mode at 100 Hz encodes as `0x0C`.
    #[test]
    fn cfg_reg_a_m_layout_matches_datasheet() {
        let cfg = CfgRegAM::from(CfgRegAM::RESET_VALUE)
            .with_mode(MagSystemMode::Continuous)
            .with_odr(MagDataRate::Hz100);

        assert_eq!(u8::from(cfg), 0x0C);
        assert_eq!(CfgRegAM::from(0x03).mode(), MagSystemMode::IdleDefault);
    }

    #[test]
    fn status_reg_m_ready_bit_is_bit_three() {
        assert!(StatusRegM::from(0x08).zyxda());
        assert!(!StatusRegM::from(0x07).zyxda());
        assert!(StatusRegM::from(0x80).zyxor());
    }
}
