//! Error handling primitives for the bus transport and the sensor drivers.

use core::fmt;

use crate::device::SensorKind;

/// Crate-wide result type alias.
pub type Result<T, E> = core::result::Result<T, Error<E>>;

/// Failure of a single register transaction on the shared bus.
///
/// The wrapped value is the error reported by the bus implementation for the
/// phase that failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TransportError<E> {
    /// The target address could not be selected (no device acknowledged it).
    AddressSelect(E),
    /// The register offset or payload was not fully accepted by the bus.
    ShortWrite(E),
    /// Fewer bytes than requested came back from the device.
    ShortRead(E),
    /// The payload does not fit into a single write transfer.
    PayloadTooLong {
        /// Requested payload length in bytes.
        len: usize,
        /// Largest payload a single transfer can carry.
        max: usize,
    },
}

/// Error variants produced by the drivers and the bootstrap sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error<E> {
    /// Any error reported by the underlying bus interface.
    Interface(E),
    /// The identity register does not hold the expected part constant.
    IdentityMismatch {
        /// Which device was probed.
        device: SensorKind,
        /// Value read back from the identity register.
        found: u8,
        /// Value the part is expected to report.
        expected: u8,
    },
    /// The provided configuration parameters are invalid.
    InvalidConfig,
}

impl<E> From<E> for Error<E> {
    fn from(err: E) -> Self {
        Self::Interface(err)
    }
}

impl<E: fmt::Debug> fmt::Display for TransportError<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AddressSelect(err) => write!(f, "address select failed: {err:?}"),
            Self::ShortWrite(err) => write!(f, "short write: {err:?}"),
            Self::ShortRead(err) => write!(f, "short read: {err:?}"),
            Self::PayloadTooLong { len, max } => {
                write!(f, "payload of {len} bytes exceeds the {max} byte transfer limit")
            }
        }
    }
}

impl<E: fmt::Display> fmt::Display for Error<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Interface(err) => write!(f, "bus error: {err}"),
            Self::IdentityMismatch {
                device,
                found,
                expected,
            } => write!(
                f,
                "{device} not detected (WHOAMI: 0x{found:02X}, expected 0x{expected:02X})"
            ),
            Self::InvalidConfig => f.write_str("invalid configuration"),
        }
    }
}
