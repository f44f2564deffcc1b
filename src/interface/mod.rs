//! Capability bundle handed to the sensor register-map drivers.

pub mod i2c;

/// Abstraction over the register access and timing a sensor driver requires.
///
/// One implementation exists per physical device; [`address`](Self::address)
/// identifies which device the bundle closes over.
pub trait SensorInterface {
    /// Error type produced by the concrete bus implementation.
    type Error;

    /// Writes `data` to consecutive registers starting at `register`.
    fn write_reg(&mut self, register: u8, data: &[u8]) -> core::result::Result<(), Self::Error>;

    /// Reads consecutive registers starting at `register` into `buf`.
    fn read_reg(&mut self, register: u8, buf: &mut [u8]) -> core::result::Result<(), Self::Error>;

    /// Blocks for at least `ms` milliseconds.
    fn delay_ms(&mut self, ms: u32);

    /// 7-bit bus address of the bound device.
    fn address(&self) -> u8;

    /// Writes a single register.
    fn write_register(&mut self, register: u8, value: u8) -> core::result::Result<(), Self::Error> {
        self.write_reg(register, core::slice::from_ref(&value))
    }

    /// Reads a single register.
    fn read_register(&mut self, register: u8) -> core::result::Result<u8, Self::Error> {
        let mut value = [0u8; 1];
        self.read_reg(register, &mut value)?;
        Ok(value[0])
    }
}
