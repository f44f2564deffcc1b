//! I²C interface implementation: a fixed-address view over a shared [`BusTransport`].

use embedded_hal::delay::DelayNs;
use embedded_hal::i2c::I2c;

use super::SensorInterface;
use crate::error::TransportError;
use crate::transport::BusTransport;

/// Binds one device address and a delay source to a borrowed bus transport.
///
/// The address is fixed at construction. Any number of bindings may borrow the
/// same transport; each call re-selects this binding's address.
pub struct DeviceBinding<'bus, I2C, D> {
    transport: &'bus BusTransport<I2C>,
    address: u8,
    delay: D,
}

impl<'bus, I2C, D> DeviceBinding<'bus, I2C, D> {
    /// Creates a binding for the 7-bit `address` on `transport`.
    pub const fn new(transport: &'bus BusTransport<I2C>, address: u8, delay: D) -> Self {
        Self {
            transport,
            address,
            delay,
        }
    }

    /// Consumes the binding and returns its delay source.
    pub fn release(self) -> D {
        self.delay
    }
}

impl<I2C, D> SensorInterface for DeviceBinding<'_, I2C, D>
where
    I2C: I2c,
    D: DelayNs,
{
    type Error = TransportError<I2C::Error>;

    fn write_reg(&mut self, register: u8, data: &[u8]) -> core::result::Result<(), Self::Error> {
        self.transport.write(self.address, register, data)
    }

    fn read_reg(&mut self, register: u8, buf: &mut [u8]) -> core::result::Result<(), Self::Error> {
        self.transport.read(self.address, register, buf)
    }

    fn delay_ms(&mut self, ms: u32) {
        self.delay.delay_ms(ms);
    }

    fn address(&self) -> u8 {
        self.address
    }
}
