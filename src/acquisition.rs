//! Cooperative, readiness-gated polling of the two sensors.
//!
//! Each tick checks the accelerometer and then the magnetometer, fetching and
//! converting a sample only from a device whose ready flag is set. The two
//! checks never gate each other. A failed transaction skips that device for
//! the tick and is reported in the [`TickReport`]; the loop keeps running.
//! Samples produced between ticks are not queued, only the latest output
//! registers are read.

use core::fmt;
use core::sync::atomic::{AtomicBool, Ordering};

use embedded_hal::delay::DelayNs;

use crate::conversion::Triplet;
use crate::device::{Sensor, SensorKind};
use crate::log::{log_debug, log_info, log_warn};

/// One converted sample.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Reading {
    /// Acceleration in milli-g.
    Acceleration(Triplet<f32>),
    /// Magnetic field in milligauss.
    MagneticField(Triplet<f32>),
}

impl Reading {
    /// Wraps `values` according to the device that produced them.
    pub const fn new(kind: SensorKind, values: Triplet<f32>) -> Self {
        match kind {
            SensorKind::Accelerometer => Self::Acceleration(values),
            SensorKind::Magnetometer => Self::MagneticField(values),
        }
    }

    /// Device that produced the sample.
    pub const fn kind(&self) -> SensorKind {
        match self {
            Self::Acceleration(_) => SensorKind::Accelerometer,
            Self::MagneticField(_) => SensorKind::Magnetometer,
        }
    }

    /// Converted X, Y, Z values.
    pub const fn values(&self) -> Triplet<f32> {
        match self {
            Self::Acceleration(values) | Self::MagneticField(values) => *values,
        }
    }
}

impl fmt::Display for Reading {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Acceleration(_) => "Accel [mg]",
            Self::MagneticField(_) => "Mag [mGauss]",
        };
        let Triplet { x, y, z } = self.values();
        write!(f, "{label}: X={x:.2}, Y={y:.2}, Z={z:.2}")
    }
}

/// Outcome of one tick, per device.
///
/// `Ok(None)` means the device had no new sample; `Err` means a status or
/// sample transaction failed and nothing was emitted for that device.
#[derive(Debug)]
pub struct TickReport<AE, ME> {
    /// Accelerometer outcome.
    pub accel: Result<Option<Reading>, AE>,
    /// Magnetometer outcome.
    pub mag: Result<Option<Reading>, ME>,
}

impl<AE, ME> TickReport<AE, ME> {
    /// Number of readings emitted during the tick.
    pub fn emitted(&self) -> usize {
        let accel = usize::from(matches!(self.accel, Ok(Some(_))));
        let mag = usize::from(matches!(self.mag, Ok(Some(_))));
        accel + mag
    }

    /// `true` when no transaction failed.
    pub fn is_clean(&self) -> bool {
        self.accel.is_ok() && self.mag.is_ok()
    }
}

/// Counters accumulated by [`Poller::run`].
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct RunSummary {
    /// Completed ticks.
    pub ticks: u64,
    /// Accelerometer readings emitted.
    pub accel_readings: u64,
    /// Magnetometer readings emitted.
    pub mag_readings: u64,
    /// Ticks on which an accelerometer transaction failed.
    pub accel_failures: u64,
    /// Ticks on which a magnetometer transaction failed.
    pub mag_failures: u64,
}

impl RunSummary {
    fn record<AE, ME>(&mut self, report: &TickReport<AE, ME>) {
        self.ticks += 1;
        match report.accel {
            Ok(Some(_)) => self.accel_readings += 1,
            Ok(None) => {}
            Err(_) => self.accel_failures += 1,
        }
        match report.mag {
            Ok(Some(_)) => self.mag_readings += 1,
            Ok(None) => {}
            Err(_) => self.mag_failures += 1,
        }
    }
}

/// Drives the accelerometer and magnetometer polling cycle.
pub struct Poller<A, M> {
    accel: A,
    mag: M,
}

impl<A, M> Poller<A, M>
where
    A: Sensor,
    M: Sensor,
{
    /// Creates a poller over two independent sample sources.
    pub const fn new(accel: A, mag: M) -> Self {
        Self { accel, mag }
    }

    /// Consumes the poller and returns both sources.
    pub fn release(self) -> (A, M) {
        (self.accel, self.mag)
    }

    /// Runs a single polling pass over both devices, without sleeping.
    pub fn tick(&mut self, emit: &mut impl FnMut(Reading)) -> TickReport<A::Error, M::Error> {
        let accel = poll(&mut self.accel);
        if let Ok(Some(reading)) = &accel {
            emit(*reading);
        }

        let mag = poll(&mut self.mag);
        if let Ok(Some(reading)) = &mag {
            emit(*reading);
        }

        TickReport { accel, mag }
    }

    /// Polls until `stop` is set, sleeping `interval_ms` after every tick.
    ///
    /// `stop` is checked once before each tick, so a flag raised during a tick
    /// or its sleep ends the loop before the next one starts.
    pub fn run<D>(
        &mut self,
        delay: &mut D,
        interval_ms: u32,
        stop: &AtomicBool,
        mut emit: impl FnMut(Reading),
    ) -> RunSummary
    where
        D: DelayNs,
    {
        let mut summary = RunSummary::default();
        log_info!("polling every {} ms", interval_ms);

        while !stop.load(Ordering::Relaxed) {
            let report = self.tick(&mut emit);
            summary.record(&report);

            if report.accel.is_err() {
                log_warn!("{} transaction failed, sample skipped", A::KIND);
            }
            if report.mag.is_err() {
                log_warn!("{} transaction failed, sample skipped", M::KIND);
            }
            log_debug!("tick {}: {} reading(s)", summary.ticks, report.emitted());

            delay.delay_ms(interval_ms);
        }

        log_info!(
            "polling stopped after {} ticks ({} accel, {} mag readings; {} accel, {} mag failures)",
            summary.ticks,
            summary.accel_readings,
            summary.mag_readings,
            summary.accel_failures,
            summary.mag_failures
        );
        summary
    }
}

fn poll<S: Sensor>(sensor: &mut S) -> Result<Option<Reading>, S::Error> {
    if !sensor.data_ready()? {
        return Ok(None);
    }

    let raw = sensor.read_raw()?;
    Ok(Some(Reading::new(S::KIND, raw.map(S::convert))))
}
