#![cfg_attr(not(any(test, feature = "linux")), no_std)]

mod error;
mod log;

pub mod acquisition;
pub mod bootstrap;
pub mod config;
pub mod conversion;
pub mod device;
pub mod interface;
pub mod params;
pub mod registers;
pub mod transport;

pub use crate::acquisition::{Poller, Reading, RunSummary, TickReport};
pub use crate::bootstrap::{Sensors, bootstrap};
pub use crate::config::Config;
pub use crate::device::{Accelerometer, Magnetometer, Sensor, SensorKind};
pub use crate::error::{Error, Result, TransportError};
pub use crate::interface::i2c::DeviceBinding;
pub use crate::transport::BusTransport;
