//! ISM303DAC register-map drivers.
//!
//! Only the subset the polling core needs: identity, power mode, output data
//! rate, readiness status and raw output registers.

pub mod accel;
pub mod mag;

use core::fmt;

use crate::conversion::Triplet;
use crate::error::{Error, Result};
use crate::interface::SensorInterface;
use crate::registers::{RAW_AXIS_BYTES, Register};

pub use accel::Accelerometer;
pub use mag::Magnetometer;

/// The two logical devices sharing the package.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SensorKind {
    /// Linear acceleration, reported in milli-g.
    Accelerometer,
    /// Magnetic field, reported in milligauss.
    Magnetometer,
}

impl fmt::Display for SensorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Accelerometer => "Accelerometer",
            Self::Magnetometer => "Magnetometer",
        })
    }
}

/// Readiness-gated sample source polled by the acquisition loop.
pub trait Sensor {
    /// Error produced by a failed status or sample read.
    type Error;

    /// Which device this source reads.
    const KIND: SensorKind;

    /// Returns `true` when a new sample is available since the last read.
    fn data_ready(&mut self) -> core::result::Result<bool, Self::Error>;

    /// Returns the current raw X, Y, Z output registers.
    fn read_raw(&mut self) -> core::result::Result<Triplet<i16>, Self::Error>;

    /// Scales one raw axis value into physical units.
    fn convert(raw: i16) -> f32;
}

/// Reads a typed register.
pub(crate) fn read_typed<R, IFACE>(interface: &mut IFACE) -> Result<R, IFACE::Error>
where
    R: Register,
    IFACE: SensorInterface,
{
    let raw = interface.read_register(R::ADDRESS).map_err(Error::from)?;
    Ok(R::from(raw))
}

/// Read-modify-write of a typed register; the write is skipped when nothing changed.
pub(crate) fn modify<R, IFACE, F>(interface: &mut IFACE, mutate: F) -> Result<R, IFACE::Error>
where
    R: Register,
    IFACE: SensorInterface,
    F: FnOnce(R) -> R,
{
    let current = interface.read_register(R::ADDRESS).map_err(Error::from)?;
    let updated = mutate(R::from(current));

    let raw: u8 = updated.into();
    if raw != current {
        interface
            .write_register(R::ADDRESS, raw)
            .map_err(Error::from)?;
    }

    Ok(updated)
}

/// Reads the six little-endian output bytes starting at `register`.
pub(crate) fn read_axes<IFACE>(
    interface: &mut IFACE,
    register: u8,
) -> Result<Triplet<i16>, IFACE::Error>
where
    IFACE: SensorInterface,
{
    let mut raw = [0u8; RAW_AXIS_BYTES];
    interface.read_reg(register, &mut raw).map_err(Error::from)?;
    Ok(Triplet::from_le_bytes(raw))
}

/// Compares an identity register value with the expected part constant.
pub(crate) fn verify_identity<E>(device: SensorKind, found: u8, expected: u8) -> Result<u8, E> {
    if found != expected {
        return Err(Error::IdentityMismatch {
            device,
            found,
            expected,
        });
    }

    Ok(found)
}
