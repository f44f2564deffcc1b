//! Shared bus transport: one open bus handle, many addressed devices.
//!
//! Every call names its target address, so the selection made by one caller
//! never leaks into the next transaction. The bus sits in a [`RefCell`] and all
//! operations take `&self`, letting several [`DeviceBinding`]s borrow the same
//! transport. Transactions are not atomic across threads; the type is `!Sync`.
//!
//! [`DeviceBinding`]: crate::interface::i2c::DeviceBinding

use core::cell::RefCell;

use embedded_hal::i2c::{ErrorKind, I2c, NoAcknowledgeSource};

use crate::error::TransportError;

/// Largest payload carried by a single register write, excluding the offset byte.
pub const MAX_WRITE_PAYLOAD: usize = 32;

/// Owns the physical bus and performs register-addressed transfers on it.
pub struct BusTransport<I2C> {
    bus: RefCell<I2C>,
}

impl<I2C> BusTransport<I2C> {
    /// Wraps an already opened bus.
    pub const fn new(bus: I2C) -> Self {
        Self {
            bus: RefCell::new(bus),
        }
    }

    /// Consumes the transport and returns the owned bus.
    ///
    /// Dropping the returned handle closes the underlying connection.
    pub fn release(self) -> I2C {
        self.bus.into_inner()
    }
}

#[cfg(feature = "linux")]
impl BusTransport<linux_embedded_hal::I2cdev> {
    /// Opens the Linux I²C character device at `path`.
    pub fn open(
        path: impl AsRef<std::path::Path>,
    ) -> core::result::Result<Self, linux_embedded_hal::i2cdev::linux::LinuxI2CError> {
        let bus = linux_embedded_hal::I2cdev::new(path)?;
        crate::log::log_debug!("bus opened");
        Ok(Self::new(bus))
    }
}

impl<I2C> BusTransport<I2C>
where
    I2C: I2c,
{
    /// Writes `payload` starting at `register` of the device at `address`.
    ///
    /// The offset byte and the payload travel as one transfer.
    pub fn write(
        &self,
        address: u8,
        register: u8,
        payload: &[u8],
    ) -> core::result::Result<(), TransportError<I2C::Error>> {
        if payload.len() > MAX_WRITE_PAYLOAD {
            return Err(TransportError::PayloadTooLong {
                len: payload.len(),
                max: MAX_WRITE_PAYLOAD,
            });
        }

        let mut frame = [0u8; MAX_WRITE_PAYLOAD + 1];
        frame[0] = register;
        frame[1..=payload.len()].copy_from_slice(payload);

        self.bus
            .borrow_mut()
            .write(address, &frame[..=payload.len()])
            .map_err(|err| classify(err, TransportError::ShortWrite))
    }

    /// Reads `buf.len()` bytes starting at `register` of the device at `address`.
    ///
    /// The offset byte is written first, then the payload is read back in a
    /// second, separate transfer.
    pub fn read(
        &self,
        address: u8,
        register: u8,
        buf: &mut [u8],
    ) -> core::result::Result<(), TransportError<I2C::Error>> {
        let mut bus = self.bus.borrow_mut();
        bus.write(address, &[register])
            .map_err(|err| classify(err, TransportError::ShortWrite))?;

        if buf.is_empty() {
            return Ok(());
        }

        bus.read(address, buf)
            .map_err(|err| classify(err, TransportError::ShortRead))
    }
}

fn classify<E>(err: E, phase: fn(E) -> TransportError<E>) -> TransportError<E>
where
    E: embedded_hal::i2c::Error,
{
    match err.kind() {
        ErrorKind::NoAcknowledge(NoAcknowledgeSource::Address) => {
            TransportError::AddressSelect(err)
        }
        _ => phase(err),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use embedded_hal::i2c::{ErrorType, Operation};

    /// One transfer seen on the wire.
    #[derive(Debug, Clone, PartialEq, Eq)]
    enum Transfer {
        Write { address: u8, bytes: Vec<u8> },
        Read { address: u8, len: usize },
    }

    /// Bus double that records every transfer and answers reads from a queue.
    #[derive(Default)]
    struct RecordingBus {
        transfers: Vec<Transfer>,
        responses: Vec<Vec<u8>>,
        fail_at: Option<(usize, ErrorKind)>,
    }

    impl RecordingBus {
        fn failing_at(index: usize, kind: ErrorKind) -> Self {
            Self {
                fail_at: Some((index, kind)),
                ..Self::default()
            }
        }
    }

    impl ErrorType for RecordingBus {
        type Error = ErrorKind;
    }

    impl I2c for RecordingBus {
        fn transaction(
            &mut self,
            address: u8,
            operations: &mut [Operation<'_>],
        ) -> Result<(), Self::Error> {
            for operation in operations.iter_mut() {
                let index = self.transfers.len();
                match operation {
                    Operation::Write(bytes) => self.transfers.push(Transfer::Write {
                        address,
                        bytes: bytes.to_vec(),
                    }),
                    Operation::Read(buf) => {
                        self.transfers.push(Transfer::Read {
                            address,
                            len: buf.len(),
                        });
                        if !self.responses.is_empty() {
                            let response = self.responses.remove(0);
                            buf.copy_from_slice(&response);
                        }
                    }
                }

                if let Some((fail_index, kind)) = self.fail_at {
                    if fail_index == index {
                        return Err(kind);
                    }
                }
            }
            Ok(())
        }
    }

    #[test]
    fn write_prefixes_payload_with_register_in_one_transfer() {
        for len in 0..=MAX_WRITE_PAYLOAD {
            let payload: Vec<u8> = (0..len as u8).collect();
            let transport = BusTransport::new(RecordingBus::default());

            transport.write(0x1D, 0x20, &payload).unwrap();

            let bus = transport.release();
            assert_eq!(bus.transfers.len(), 1);
            let Transfer::Write { address, bytes } = &bus.transfers[0] else {
                panic!("expected a write transfer");
            };
            assert_eq!(*address, 0x1D);
            assert_eq!(bytes.len(), len + 1);
            assert_eq!(bytes[0], 0x20);
            assert_eq!(&bytes[1..], payload.as_slice());
        }
    }

    #[test]
    fn read_writes_offset_then_reads_requested_length() {
        let mut bus = RecordingBus::default();
        bus.responses.push(vec![0xA0, 0x0F, 0x60, 0xF0, 0x00, 0x00]);
        let transport = BusTransport::new(bus);

        let mut buf = [0u8; 6];
        transport.read(0x1E, 0x68, &mut buf).unwrap();
        assert_eq!(buf, [0xA0, 0x0F, 0x60, 0xF0, 0x00, 0x00]);

        let bus = transport.release();
        assert_eq!(
            bus.transfers,
            vec![
                Transfer::Write {
                    address: 0x1E,
                    bytes: vec![0x68]
                },
                Transfer::Read {
                    address: 0x1E,
                    len: 6
                },
            ]
        );
    }

    #[test]
    fn read_framing_holds_for_every_length() {
        for len in 0..=MAX_WRITE_PAYLOAD {
            let response: Vec<u8> = (0..len as u8).map(|byte| byte ^ 0x5A).collect();
            let mut bus = RecordingBus::default();
            if len > 0 {
                bus.responses.push(response.clone());
            }
            let transport = BusTransport::new(bus);

            let mut buf = vec![0u8; len];
            transport.read(0x1D, 0x28, &mut buf).unwrap();
            assert_eq!(buf, response);

            let mut expected = vec![Transfer::Write {
                address: 0x1D,
                bytes: vec![0x28],
            }];
            if len > 0 {
                expected.push(Transfer::Read { address: 0x1D, len });
            }
            assert_eq!(transport.release().transfers, expected);
        }
    }

    #[test]
    fn empty_read_sends_only_the_offset() {
        let transport = BusTransport::new(RecordingBus::default());

        transport.read(0x1D, 0x0F, &mut []).unwrap();

        assert_eq!(
            transport.release().transfers,
            vec![Transfer::Write {
                address: 0x1D,
                bytes: vec![0x0F]
            }]
        );
    }

    #[test]
    fn failing_offset_write_during_read_maps_to_short_write() {
        let transport = BusTransport::new(RecordingBus::failing_at(0, ErrorKind::Bus));

        let mut buf = [0u8; 6];
        let err = transport.read(0x1E, 0x68, &mut buf).unwrap_err();
        assert_eq!(err, TransportError::ShortWrite(ErrorKind::Bus));
        assert_eq!(transport.release().transfers.len(), 1);
    }

    #[test]
    fn oversized_payload_never_reaches_the_bus() {
        let transport = BusTransport::new(RecordingBus::default());
        let payload = [0u8; MAX_WRITE_PAYLOAD + 1];

        let err = transport.write(0x1D, 0x20, &payload).unwrap_err();
        assert_eq!(
            err,
            TransportError::PayloadTooLong {
                len: MAX_WRITE_PAYLOAD + 1,
                max: MAX_WRITE_PAYLOAD
            }
        );
        assert!(transport.release().transfers.is_empty());
    }

    #[test]
    fn address_nack_maps_to_address_select() {
        let nack = ErrorKind::NoAcknowledge(NoAcknowledgeSource::Address);
        let transport = BusTransport::new(RecordingBus::failing_at(0, nack));

        let mut buf = [0u8; 1];
        let err = transport.read(0x1D, 0x0F, &mut buf).unwrap_err();
        assert_eq!(err, TransportError::AddressSelect(nack));
        // The read-back phase is never attempted.
        assert_eq!(transport.release().transfers.len(), 1);
    }

    #[test]
    fn failing_offset_write_maps_to_short_write() {
        let transport = BusTransport::new(RecordingBus::failing_at(0, ErrorKind::Bus));

        let err = transport.write(0x1E, 0x60, &[0x0C]).unwrap_err();
        assert_eq!(err, TransportError::ShortWrite(ErrorKind::Bus));
    }

    #[test]
    fn failing_read_back_maps_to_short_read() {
        let data_nack = ErrorKind::NoAcknowledge(NoAcknowledgeSource::Data);
        let transport = BusTransport::new(RecordingBus::failing_at(1, data_nack));

        let mut buf = [0u8; 6];
        let err = transport.read(0x1D, 0x28, &mut buf).unwrap_err();
        assert_eq!(err, TransportError::ShortRead(data_nack));
    }

    #[test]
    fn selection_does_not_persist_between_calls() {
        let mut bus = RecordingBus::default();
        bus.responses.push(vec![0x43]);
        let transport = BusTransport::new(bus);

        transport.write(0x1D, 0x20, &[0x40]).unwrap();
        transport.write(0x1E, 0x60, &[0x0C]).unwrap();
        let mut who = [0u8; 1];
        transport.read(0x1D, 0x0F, &mut who).unwrap();

        let bus = transport.release();
        let addresses: Vec<u8> = bus
            .transfers
            .iter()
            .map(|transfer| match transfer {
                Transfer::Write { address, .. } | Transfer::Read { address, .. } => *address,
            })
            .collect();
        assert_eq!(addresses, vec![0x1D, 0x1E, 0x1D, 0x1D]);
        assert_eq!(who, [0x43]);
    }
}
