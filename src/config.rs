//! Configuration primitives: fixed bus wiring and the one-shot sensor setup.

use crate::params::{AccelDataRate, AccelPowerMode, MagDataRate, MagSystemMode};

/// Linux I²C character device the sensor package is wired to.
pub const I2C_BUS_PATH: &str = "/dev/i2c-1";
/// 7-bit address of the accelerometer.
pub const ACCEL_ADDRESS: u8 = 0x1D;
/// 7-bit address of the magnetometer.
pub const MAG_ADDRESS: u8 = 0x1E;
/// Pause between two polling ticks (~10 Hz).
pub const POLL_INTERVAL_MS: u32 = 100;

/// Sensor setup applied once at bootstrap, plus the polling cadence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Config {
    /// Accelerometer conversion mode.
    pub accel_power_mode: AccelPowerMode,
    /// Accelerometer output data rate.
    pub accel_odr: AccelDataRate,
    /// Magnetometer acquisition mode.
    pub mag_mode: MagSystemMode,
    /// Magnetometer output data rate.
    pub mag_odr: MagDataRate,
    /// Sleep after every acquisition tick, in milliseconds.
    pub poll_interval_ms: u32,
}

impl Config {
    /// Begins building a [`Config`] using the builder pattern.
    pub fn new() -> ConfigBuilder {
        ConfigBuilder::new()
    }

    /// Checks that the configuration can actually produce samples.
    pub fn validate(&self) -> core::result::Result<(), ConfigError> {
        if self.poll_interval_ms == 0 {
            return Err(ConfigError::ZeroPollInterval);
        }

        if self.accel_odr == AccelDataRate::PowerDown {
            return Err(ConfigError::AccelPoweredDown);
        }

        if self.mag_mode.is_idle() {
            return Err(ConfigError::MagIdle);
        }

        Ok(())
    }
}

/// Builder for [`Config`] allowing piecemeal construction.
#[derive(Debug, Clone, Copy)]
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    /// Creates a new builder seeded with [`Config::default()`].
    pub fn new() -> Self {
        Self {
            config: Config::default(),
        }
    }

    /// Overrides the accelerometer power mode.
    pub fn accel_power_mode(mut self, mode: AccelPowerMode) -> Self {
        self.config.accel_power_mode = mode;
        self
    }

    /// Overrides the accelerometer output data rate.
    pub fn accel_odr(mut self, odr: AccelDataRate) -> Self {
        self.config.accel_odr = odr;
        self
    }

    /// Overrides the magnetometer acquisition mode.
    pub fn mag_mode(mut self, mode: MagSystemMode) -> Self {
        self.config.mag_mode = mode;
        self
    }

    /// Overrides the magnetometer output data rate.
    pub fn mag_odr(mut self, odr: MagDataRate) -> Self {
        self.config.mag_odr = odr;
        self
    }

    /// Overrides the pause between polling ticks.
    pub fn poll_interval_ms(mut self, interval_ms: u32) -> Self {
        self.config.poll_interval_ms = interval_ms;
        self
    }

    /// Finalizes the builder and returns the [`Config`].
    pub fn build(self) -> Config {
        self.config
    }
}

impl Default for ConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            accel_power_mode: AccelPowerMode::HighPerformance,
            accel_odr: AccelDataRate::Hz100,
            mag_mode: MagSystemMode::Continuous,
            mag_odr: MagDataRate::Hz100,
            poll_interval_ms: POLL_INTERVAL_MS,
        }
    }
}

/// Validation errors generated while verifying a [`Config`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigError {
    /// The loop would spin without pausing.
    ZeroPollInterval,
    /// The accelerometer would never raise its ready flag.
    AccelPoweredDown,
    /// The magnetometer would never raise its ready flag.
    MagIdle,
}
