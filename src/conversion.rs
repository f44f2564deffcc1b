//! Raw register value to physical unit conversion.

/// Accelerometer sensitivity at ±2 g full scale.
pub const ACCEL_FS2G_MG_PER_LSB: f32 = 0.061;
/// Magnetometer sensitivity.
pub const MAG_MGAUSS_PER_LSB: f32 = 1.5;

/// Converts a raw accelerometer value at ±2 g into milli-g.
#[inline]
pub fn accel_to_mg(raw: i16) -> f32 {
    f32::from(raw) * ACCEL_FS2G_MG_PER_LSB
}

/// Converts a raw magnetometer value into milligauss.
#[inline]
pub fn mag_to_mgauss(raw: i16) -> f32 {
    f32::from(raw) * MAG_MGAUSS_PER_LSB
}

/// One value per axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Triplet<T> {
    /// X axis.
    pub x: T,
    /// Y axis.
    pub y: T,
    /// Z axis.
    pub z: T,
}

impl<T> Triplet<T> {
    /// Creates a triplet from its three components.
    pub const fn new(x: T, y: T, z: T) -> Self {
        Self { x, y, z }
    }

    /// Applies `f` to every component.
    pub fn map<U>(self, mut f: impl FnMut(T) -> U) -> Triplet<U> {
        Triplet {
            x: f(self.x),
            y: f(self.y),
            z: f(self.z),
        }
    }
}

impl Triplet<i16> {
    /// Decodes X, Y, Z from six little-endian output register bytes.
    pub const fn from_le_bytes(raw: [u8; 6]) -> Self {
        Self {
            x: i16::from_le_bytes([raw[0], raw[1]]),
            y: i16::from_le_bytes([raw[2], raw[3]]),
            z: i16::from_le_bytes([raw[4], raw[5]]),
        }
    }
}
