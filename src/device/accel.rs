//! Accelerometer half of the ISM303DAC.

use super::{Sensor, SensorKind, verify_identity, modify, read_axes, read_typed};
use crate::conversion::{Triplet, accel_to_mg};
use crate::error::{Error, Result};
use crate::interface::SensorInterface;
use crate::params::{AccelDataRate, AccelPowerMode};
use crate::registers::{Ctrl1A, EXPECTED_WHO_AM_I_A, REG_OUT_X_L_A, REG_WHO_AM_I_A, StatusA};

/// Decoded view of the `STATUS_A` register.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct AccelStatus {
    /// STATUS_A[0] DRDY.
    pub data_ready: bool,
    /// STATUS_A[1] FF_IA.
    pub free_fall: bool,
    /// STATUS_A[2] 6D_IA.
    pub orientation_change: bool,
    /// STATUS_A[3] SINGLE_TAP.
    pub single_tap: bool,
    /// STATUS_A[4] DOUBLE_TAP.
    pub double_tap: bool,
    /// STATUS_A[5] SLEEP_STATE.
    pub sleep_state: bool,
    /// STATUS_A[6] WU_IA.
    pub wake_up: bool,
    /// STATUS_A[7] FIFO_THS.
    pub fifo_threshold: bool,
}

impl From<StatusA> for AccelStatus {
    fn from(status: StatusA) -> Self {
        Self {
            data_ready: status.drdy(),
            free_fall: status.ff_ia(),
            orientation_change: status.d6d_ia(),
            single_tap: status.single_tap(),
            double_tap: status.double_tap(),
            sleep_state: status.sleep_state(),
            wake_up: status.wu_ia(),
            fifo_threshold: status.fifo_ths(),
        }
    }
}

/// Synchronous driver for the accelerometer, configured for the ±2 g range.
pub struct Accelerometer<IFACE> {
    interface: IFACE,
}

impl<IFACE> Accelerometer<IFACE> {
    /// Creates a driver over the given capability bundle.
    pub const fn new(interface: IFACE) -> Self {
        Self { interface }
    }

    /// Consumes the driver and returns the owned interface.
    pub fn release(self) -> IFACE {
        self.interface
    }
}

impl<IFACE, CommE> Accelerometer<IFACE>
where
    IFACE: SensorInterface<Error = CommE>,
{
    /// Reads `WHO_AM_I_A`.
    pub fn device_id(&mut self) -> Result<u8, CommE> {
        self.interface
            .read_register(REG_WHO_AM_I_A)
            .map_err(Error::from)
    }

    /// Verifies `WHO_AM_I_A` against the ISM303DAC accelerometer constant.
    pub fn check_id(&mut self) -> Result<u8, CommE> {
        let found = self.device_id()?;
        verify_identity(SensorKind::Accelerometer, found, EXPECTED_WHO_AM_I_A)
    }

    /// Selects high-performance or low-power conversion.
    pub fn set_power_mode(&mut self, mode: AccelPowerMode) -> Result<(), CommE> {
        modify::<Ctrl1A, _, _>(&mut self.interface, |ctrl| ctrl.with_power_mode(mode))?;
        Ok(())
    }

    /// Selects the output data rate.
    pub fn set_data_rate(&mut self, odr: AccelDataRate) -> Result<(), CommE> {
        modify::<Ctrl1A, _, _>(&mut self.interface, |ctrl| {
            ctrl.with_odr(odr).with_hf_odr(false)
        })?;
        Ok(())
    }

    /// Returns a snapshot of `STATUS_A`.
    pub fn status(&mut self) -> Result<AccelStatus, CommE> {
        let status: StatusA = read_typed(&mut self.interface)?;
        Ok(AccelStatus::from(status))
    }

    /// Reads the current raw X, Y, Z output registers.
    pub fn read_raw(&mut self) -> Result<Triplet<i16>, CommE> {
        read_axes(&mut self.interface, REG_OUT_X_L_A)
    }

    /// Reads the current acceleration in milli-g.
    pub fn read_mg(&mut self) -> Result<Triplet<f32>, CommE> {
        Ok(self.read_raw()?.map(accel_to_mg))
    }
}

impl<IFACE, CommE> Sensor for Accelerometer<IFACE>
where
    IFACE: SensorInterface<Error = CommE>,
{
    type Error = Error<CommE>;

    const KIND: SensorKind = SensorKind::Accelerometer;

    fn data_ready(&mut self) -> Result<bool, CommE> {
        Ok(self.status()?.data_ready)
    }

    fn read_raw(&mut self) -> Result<Triplet<i16>, CommE> {
        Accelerometer::read_raw(self)
    }

    fn convert(raw: i16) -> f32 {
        accel_to_mg(raw)
    }
}
