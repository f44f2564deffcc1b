//! One-shot bring-up: bind both devices, verify identities, apply the setup.

use embedded_hal::delay::DelayNs;
use embedded_hal::i2c::I2c;

use crate::config::{ACCEL_ADDRESS, Config, MAG_ADDRESS};
use crate::device::{Accelerometer, Magnetometer, SensorKind};
use crate::error::{Error, Result, TransportError};
use crate::interface::i2c::DeviceBinding;
use crate::log::{log_info, log_warn};
use crate::transport::BusTransport;

/// Both drivers, bound to the same transport and ready to poll.
pub struct Sensors<'bus, I2C, D> {
    /// Accelerometer at [`ACCEL_ADDRESS`].
    pub accel: Accelerometer<DeviceBinding<'bus, I2C, D>>,
    /// Magnetometer at [`MAG_ADDRESS`].
    pub mag: Magnetometer<DeviceBinding<'bus, I2C, D>>,
}

/// Binds, identifies and configures both devices on `transport`.
///
/// Fails fast: the magnetometer is not probed at all when the accelerometer
/// identity check fails. Power mode and ODR writes are fire-and-forget; a
/// failed write is logged and bring-up continues. On error the caller still
/// owns `transport` and is expected to close it.
pub fn bootstrap<'bus, I2C, D>(
    transport: &'bus BusTransport<I2C>,
    mut make_delay: impl FnMut() -> D,
    config: &Config,
) -> Result<Sensors<'bus, I2C, D>, TransportError<I2C::Error>>
where
    I2C: I2c,
    D: DelayNs,
{
    config.validate().map_err(|_| Error::InvalidConfig)?;

    let mut accel = Accelerometer::new(DeviceBinding::new(transport, ACCEL_ADDRESS, make_delay()));
    let mut mag = Magnetometer::new(DeviceBinding::new(transport, MAG_ADDRESS, make_delay()));

    let id = accel.check_id()?;
    log_info!("Accelerometer detected (WHOAMI: {:#x})", id);

    let id = mag.check_id()?;
    log_info!("Magnetometer detected (WHOAMI: {:#x})", id);

    let outcome = accel.set_power_mode(config.accel_power_mode);
    apply(SensorKind::Accelerometer, "power mode", outcome);
    let outcome = accel.set_data_rate(config.accel_odr);
    apply(SensorKind::Accelerometer, "data rate", outcome);

    let outcome = mag.set_mode(config.mag_mode);
    apply(SensorKind::Magnetometer, "system mode", outcome);
    let outcome = mag.set_data_rate(config.mag_odr);
    apply(SensorKind::Magnetometer, "data rate", outcome);

    log_info!(
        "sensors configured (accel {} mHz, mag {} Hz)",
        config.accel_odr.millihertz(),
        config.mag_odr.hz()
    );
    Ok(Sensors { accel, mag })
}

fn apply<E>(device: SensorKind, setting: &str, outcome: Result<(), E>) {
    if outcome.is_err() {
        log_warn!("{} {} not applied, continuing", device, setting);
    }
}
