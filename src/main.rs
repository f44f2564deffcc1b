//! Polls the ISM303DAC on the Raspberry Pi I²C bus and prints both sensors at ~10 Hz.
//!
//! Exits with status 1 when the bus cannot be opened or a device fails its
//! identity check, and with status 0 after SIGINT/SIGTERM.

use std::process::ExitCode;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use ism303dac_poll::config::{Config, I2C_BUS_PATH};
use ism303dac_poll::{BusTransport, Poller, bootstrap};
use linux_embedded_hal::{Delay, I2cdev};

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let transport = match BusTransport::open(I2C_BUS_PATH) {
        Ok(transport) => transport,
        Err(err) => {
            eprintln!("Failed to open I²C device {I2C_BUS_PATH}: {err}");
            return ExitCode::FAILURE;
        }
    };
    log::info!("opened {I2C_BUS_PATH}");

    let status = poll(&transport, &Config::default());

    drop(transport.release());
    log::info!("closed {I2C_BUS_PATH}");
    status
}

fn poll(transport: &BusTransport<I2cdev>, config: &Config) -> ExitCode {
    let sensors = match bootstrap(transport, || Delay, config) {
        Ok(sensors) => sensors,
        Err(err) => {
            println!("{err}");
            return ExitCode::FAILURE;
        }
    };

    let stop = Arc::new(AtomicBool::new(false));
    let handler_stop = Arc::clone(&stop);
    if let Err(err) = ctrlc::set_handler(move || handler_stop.store(true, Ordering::SeqCst)) {
        log::warn!("signal handler not installed, stop with SIGKILL: {err}");
    }

    let mut poller = Poller::new(sensors.accel, sensors.mag);
    poller.run(&mut Delay, config.poll_interval_ms, &stop, |reading| {
        println!("{reading}")
    });

    ExitCode::SUCCESS
}
