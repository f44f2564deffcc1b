//! Magnetometer half of the ISM303DAC.

use super::{Sensor, SensorKind, verify_identity, modify, read_axes, read_typed};
use crate::conversion::{Triplet, mag_to_mgauss};
use crate::error::{Error, Result};
use crate::interface::SensorInterface;
use crate::params::{MagDataRate, MagSystemMode};
use crate::registers::{CfgRegAM, EXPECTED_WHO_AM_I_M, REG_OUTX_L_REG_M, REG_WHO_AM_I_M, StatusRegM};

/// Decoded view of the `STATUS_REG_M` register.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct MagStatus {
    /// STATUS_REG_M[3] Zyxda, new data on all three axes.
    pub data_ready: bool,
    /// STATUS_REG_M[7] Zyxor, a sample was overwritten before being read.
    pub overrun: bool,
    /// STATUS_REG_M[2:0] per-axis new data (X, Y, Z).
    pub axis_ready: [bool; 3],
}

impl From<StatusRegM> for MagStatus {
    fn from(status: StatusRegM) -> Self {
        Self {
            data_ready: status.zyxda(),
            overrun: status.zyxor(),
            axis_ready: [status.xda(), status.yda(), status.zda()],
        }
    }
}

/// Synchronous driver for the magnetometer.
pub struct Magnetometer<IFACE> {
    interface: IFACE,
}

impl<IFACE> Magnetometer<IFACE> {
    /// Creates a driver over the given capability bundle.
    pub const fn new(interface: IFACE) -> Self {
        Self { interface }
    }

    /// Consumes the driver and returns the owned interface.
    pub fn release(self) -> IFACE {
        self.interface
    }
}

impl<IFACE, CommE> Magnetometer<IFACE>
where
    IFACE: SensorInterface<Error = CommE>,
{
    /// Reads `WHO_AM_I_M`.
    pub fn device_id(&mut self) -> Result<u8, CommE> {
        self.interface
            .read_register(REG_WHO_AM_I_M)
            .map_err(Error::from)
    }

    /// Verifies `WHO_AM_I_M` against the ISM303DAC magnetometer constant.
    pub fn check_id(&mut self) -> Result<u8, CommE> {
        let found = self.device_id()?;
        verify_identity(SensorKind::Magnetometer, found, EXPECTED_WHO_AM_I_M)
    }

    /// Selects continuous, single or idle acquisition.
    pub fn set_mode(&mut self, mode: MagSystemMode) -> Result<(), CommE> {
        modify::<CfgRegAM, _, _>(&mut self.interface, |cfg| cfg.with_mode(mode))?;
        Ok(())
    }

    /// Selects the output data rate.
    pub fn set_data_rate(&mut self, odr: MagDataRate) -> Result<(), CommE> {
        modify::<CfgRegAM, _, _>(&mut self.interface, |cfg| cfg.with_odr(odr))?;
        Ok(())
    }

    /// Returns a snapshot of `STATUS_REG_M`.
    pub fn status(&mut self) -> Result<MagStatus, CommE> {
        let status: StatusRegM = read_typed(&mut self.interface)?;
        Ok(MagStatus::from(status))
    }

    /// Reads the current raw X, Y, Z output registers.
    pub fn read_raw(&mut self) -> Result<Triplet<i16>, CommE> {
        read_axes(&mut self.interface, REG_OUTX_L_REG_M)
    }

    /// Reads the current magnetic field in milligauss.
    pub fn read_mgauss(&mut self) -> Result<Triplet<f32>, CommE> {
        Ok(self.read_raw()?.map(mag_to_mgauss))
    }
}

impl<IFACE, CommE> Sensor for Magnetometer<IFACE>
where
    IFACE: SensorInterface<Error = CommE>,
{
    type Error = Error<CommE>;

    const KIND: SensorKind = SensorKind::Magnetometer;

    fn data_ready(&mut self) -> Result<bool, CommE> {
        Ok(self.status()?.data_ready)
    }

    fn read_raw(&mut self) -> Result<Triplet<i16>, CommE> {
        Magnetometer::read_raw(self)
    }

    fn convert(raw: i16) -> f32 {
        mag_to_mgauss(raw)
    }
}
