//! Hardware interface abstraction
//!
//! This module provides the [`PanelInterface`] trait and the [`Interface`]
//! struct for communicating with the HX8357-D controller over SPI.
//!
//! ## Hardware Requirements
//!
//! The HX8357-D requires:
//! - SPI bus (MOSI + SCK)
//! - 2 GPIO pins driven by this driver:
//!   - **DC**: Data/Command select (output, low = command)
//!   - **CS**: Chip select (output, active low)
//!
//! The reset pin is not owned here: board bring-up toggles it once before
//! [`Display::init`](crate::display::Display::init) is called.
//!
//! The driver takes an [`SpiBus`] rather than an `SpiDevice` because a
//! streaming RAM write keeps CS asserted across many bus transfers that
//! are logically one transaction; CS is therefore driven explicitly.
//!
//! ## Packet framing
//!
//! One packet is an optional command byte plus an optional payload. The
//! payload is split into transfers of at most [`CHUNK_LIMIT`] bytes each,
//! the size bound of a single transfer on the DMA-backed SPI drivers this
//! targets. [`Boundary`] selects whether the packet frames its own
//! chip-select transaction or runs inside one held by the caller.
//!
//! ## Example
//!
//! ```rust,no_run
//! use hx8357d::{Boundary, Interface, PanelInterface};
//! # use core::convert::Infallible;
//! # use embedded_hal::digital::OutputPin;
//! # use embedded_hal::spi::SpiBus;
//! # struct MockSpi;
//! # impl embedded_hal::spi::ErrorType for MockSpi { type Error = Infallible; }
//! # impl SpiBus for MockSpi {
//! #     fn read(&mut self, _words: &mut [u8]) -> Result<(), Self::Error> { Ok(()) }
//! #     fn write(&mut self, _words: &[u8]) -> Result<(), Self::Error> { Ok(()) }
//! #     fn transfer(&mut self, _read: &mut [u8], _write: &[u8]) -> Result<(), Self::Error> { Ok(()) }
//! #     fn transfer_in_place(&mut self, _words: &mut [u8]) -> Result<(), Self::Error> { Ok(()) }
//! #     fn flush(&mut self) -> Result<(), Self::Error> { Ok(()) }
//! # }
//! # struct MockPin;
//! # impl embedded_hal::digital::ErrorType for MockPin { type Error = Infallible; }
//! # impl OutputPin for MockPin {
//! #     fn set_low(&mut self) -> Result<(), Self::Error> { Ok(()) }
//! #     fn set_high(&mut self) -> Result<(), Self::Error> { Ok(()) }
//! # }
//! // Create interface with SPI bus and GPIO pins
//! let mut interface = Interface::new(MockSpi, MockPin, MockPin);
//!
//! // One-shot command with parameters, framed by its own CS transaction
//! let _ = interface.write_packet(Some(0x3A), &[0x55], Boundary::Owned);
//!
//! // Streaming write: many packets under one held CS assertion
//! let _ = interface.begin_transaction();
//! let _ = interface.write_packet(Some(0x2C), &[], Boundary::Held);
//! let _ = interface.write_packet(None, &[0xF8, 0x00], Boundary::Held);
//! let _ = interface.end_transaction();
//! ```

use core::fmt::Debug;
use embedded_hal::digital::OutputPin;
use embedded_hal::spi::SpiBus;

type InterfaceResult<T, E> = core::result::Result<T, E>;

/// Largest number of bytes moved in a single bus transfer
///
/// Payloads longer than this are split into consecutive transfers of
/// exactly this size plus a shorter final remainder.
pub const CHUNK_LIMIT: usize = 1024;

/// Chip-select ownership of one packet
///
/// The controller treats everything between a CS assertion and release as
/// one transaction, so a multi-packet stream (window, RAM write, pixel
/// data) must run under a single held assertion.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Boundary {
    /// The packet frames its own transaction: CS is asserted before the
    /// first byte and released after the last chunk.
    Owned,
    /// CS is managed by the caller via
    /// [`begin_transaction`](PanelInterface::begin_transaction) /
    /// [`end_transaction`](PanelInterface::end_transaction), which hold one
    /// logical transaction across several packets.
    Held,
}

/// Trait for hardware interface to the HX8357-D controller
///
/// Abstracts over different hardware implementations, allowing the
/// [`Display`](crate::display::Display) to work with any SPI + GPIO
/// implementation that satisfies embedded-hal traits.
///
/// ## Implementing
///
/// For most cases, use the provided [`Interface`] struct. If you need
/// custom behavior (e.g., inverted CS polarity, a parallel bus), implement
/// this trait on your own type; every implementation must preserve the
/// packet framing and chunking rules documented on
/// [`write_packet`](Self::write_packet).
pub trait PanelInterface {
    /// Error type for interface operations
    ///
    /// Must implement [`Debug`] for error reporting.
    type Error: Debug;

    /// Assert chip-select, opening a transaction held across packets
    ///
    /// # Errors
    ///
    /// Returns an error if GPIO fails.
    fn begin_transaction(&mut self) -> InterfaceResult<(), Self::Error>;

    /// Flush the bus and release chip-select, closing a held transaction
    ///
    /// # Errors
    ///
    /// Returns an error if SPI communication or GPIO fails.
    fn end_transaction(&mut self) -> InterfaceResult<(), Self::Error>;

    /// Frame one packet: optional command byte, then chunked payload
    ///
    /// The implementation must:
    /// 1. If `command` is present: set DC low, (if `Owned`) assert CS,
    ///    transfer the single command byte, set DC high
    /// 2. Transfer `payload` in order, in chunks of at most
    ///    [`CHUNK_LIMIT`] bytes, no byte duplicated or dropped
    /// 3. If `Owned`, flush the bus and release CS after the last chunk
    ///
    /// An empty payload is legal (command-only packet), as is a
    /// command-less packet (payload continuation of an open RAM write;
    /// DC is left high from the command that opened the stream).
    ///
    /// # Errors
    ///
    /// Returns an error if SPI communication or GPIO fails. A failed
    /// chunk leaves the stream half-applied; callers must not retry the
    /// packet.
    fn write_packet(
        &mut self,
        command: Option<u8>,
        payload: &[u8],
        boundary: Boundary,
    ) -> InterfaceResult<(), Self::Error>;
}

/// Errors that can occur at the interface level
///
/// Generic over SPI and GPIO error types.
#[derive(Debug)]
pub enum InterfaceError<SpiErr, PinErr> {
    /// SPI communication error
    Spi(SpiErr),
    /// GPIO pin error
    Pin(PinErr),
}

impl<SpiErr: Debug, PinErr: Debug> core::fmt::Display for InterfaceError<SpiErr, PinErr> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Spi(e) => write!(f, "SPI error: {e:?}"),
            Self::Pin(e) => write!(f, "Pin error: {e:?}"),
        }
    }
}

impl<SpiErr: Debug, PinErr: Debug> core::error::Error for InterfaceError<SpiErr, PinErr> {}

/// Hardware interface implementation for the HX8357-D
///
/// Implements [`PanelInterface`] for embedded-hal v1.0 SPI and GPIO traits.
///
/// ## Type Parameters
///
/// * `SPI` - SPI bus implementing [`SpiBus`]
/// * `DC` - Data/Command pin implementing [`OutputPin`]
/// * `CS` - Chip-select pin implementing [`OutputPin`]
pub struct Interface<SPI, DC, CS> {
    /// SPI bus for communication
    spi: SPI,
    /// Data/Command select pin (low = command, high = data)
    dc: DC,
    /// Chip-select pin (active low)
    cs: CS,
}

impl<SPI, DC, CS> Interface<SPI, DC, CS>
where
    SPI: SpiBus,
    DC: OutputPin,
    CS: OutputPin,
{
    /// Create a new Interface
    ///
    /// # Arguments
    ///
    /// * `spi` - SPI bus (must implement [`SpiBus`])
    /// * `dc` - Data/Command pin (output, low = command, high = data)
    /// * `cs` - Chip-select pin (output, active low)
    pub fn new(spi: SPI, dc: DC, cs: CS) -> Self {
        Self { spi, dc, cs }
    }

    /// Release the bus and pins
    pub fn release(self) -> (SPI, DC, CS) {
        (self.spi, self.dc, self.cs)
    }
}

impl<SPI, DC, CS, PinErr> PanelInterface for Interface<SPI, DC, CS>
where
    SPI: SpiBus,
    SPI::Error: Debug,
    DC: OutputPin<Error = PinErr>,
    CS: OutputPin<Error = PinErr>,
    PinErr: Debug,
{
    type Error = InterfaceError<SPI::Error, PinErr>;

    fn begin_transaction(&mut self) -> InterfaceResult<(), Self::Error> {
        self.cs.set_low().map_err(|e| InterfaceError::Pin(e))
    }

    fn end_transaction(&mut self) -> InterfaceResult<(), Self::Error> {
        self.spi.flush().map_err(|e| InterfaceError::Spi(e))?;
        self.cs.set_high().map_err(|e| InterfaceError::Pin(e))
    }

    fn write_packet(
        &mut self,
        command: Option<u8>,
        payload: &[u8],
        boundary: Boundary,
    ) -> InterfaceResult<(), Self::Error> {
        if let Some(command) = command {
            self.dc.set_low().map_err(|e| InterfaceError::Pin(e))?;
            if boundary == Boundary::Owned {
                self.cs.set_low().map_err(|e| InterfaceError::Pin(e))?;
            }
            self.spi
                .write(&[command])
                .map_err(|e| InterfaceError::Spi(e))?;
            self.dc.set_high().map_err(|e| InterfaceError::Pin(e))?;
        } else if boundary == Boundary::Owned {
            self.cs.set_low().map_err(|e| InterfaceError::Pin(e))?;
        }

        for chunk in payload.chunks(CHUNK_LIMIT) {
            self.spi.write(chunk).map_err(|e| InterfaceError::Spi(e))?;
        }

        if boundary == Boundary::Owned {
            self.spi.flush().map_err(|e| InterfaceError::Spi(e))?;
            self.cs.set_high().map_err(|e| InterfaceError::Pin(e))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::rc::Rc;
    use alloc::vec::Vec;
    use core::cell::RefCell;

    #[derive(Debug, Clone, PartialEq)]
    enum Event {
        CsLow,
        CsHigh,
        DcLow,
        DcHigh,
        Write(Vec<u8>),
        Flush,
    }

    type Log = Rc<RefCell<Vec<Event>>>;

    #[derive(Debug, Clone, Copy)]
    struct MockError;

    impl embedded_hal::spi::Error for MockError {
        fn kind(&self) -> embedded_hal::spi::ErrorKind {
            embedded_hal::spi::ErrorKind::Other
        }
    }

    impl embedded_hal::digital::Error for MockError {
        fn kind(&self) -> embedded_hal::digital::ErrorKind {
            embedded_hal::digital::ErrorKind::Other
        }
    }

    struct MockBus {
        log: Log,
    }

    impl embedded_hal::spi::ErrorType for MockBus {
        type Error = MockError;
    }

    impl SpiBus for MockBus {
        fn read(&mut self, _words: &mut [u8]) -> Result<(), Self::Error> {
            Ok(())
        }

        fn write(&mut self, words: &[u8]) -> Result<(), Self::Error> {
            self.log.borrow_mut().push(Event::Write(words.to_vec()));
            Ok(())
        }

        fn transfer(&mut self, _read: &mut [u8], _write: &[u8]) -> Result<(), Self::Error> {
            Ok(())
        }

        fn transfer_in_place(&mut self, _words: &mut [u8]) -> Result<(), Self::Error> {
            Ok(())
        }

        fn flush(&mut self) -> Result<(), Self::Error> {
            self.log.borrow_mut().push(Event::Flush);
            Ok(())
        }
    }

    struct MockPin {
        log: Log,
        on_low: Event,
        on_high: Event,
    }

    impl embedded_hal::digital::ErrorType for MockPin {
        type Error = MockError;
    }

    impl OutputPin for MockPin {
        fn set_low(&mut self) -> Result<(), Self::Error> {
            self.log.borrow_mut().push(self.on_low.clone());
            Ok(())
        }

        fn set_high(&mut self) -> Result<(), Self::Error> {
            self.log.borrow_mut().push(self.on_high.clone());
            Ok(())
        }
    }

    fn test_interface() -> (Interface<MockBus, MockPin, MockPin>, Log) {
        let log: Log = Rc::new(RefCell::new(Vec::new()));
        let spi = MockBus { log: log.clone() };
        let dc = MockPin {
            log: log.clone(),
            on_low: Event::DcLow,
            on_high: Event::DcHigh,
        };
        let cs = MockPin {
            log: log.clone(),
            on_low: Event::CsLow,
            on_high: Event::CsHigh,
        };
        (Interface::new(spi, dc, cs), log)
    }

    fn writes(log: &Log) -> Vec<Vec<u8>> {
        log.borrow()
            .iter()
            .filter_map(|event| match event {
                Event::Write(bytes) => Some(bytes.clone()),
                _ => None,
            })
            .collect()
    }

    fn count(log: &Log, event: &Event) -> usize {
        log.borrow().iter().filter(|e| *e == event).count()
    }

    #[test]
    fn test_owned_command_packet_framing() {
        let (mut interface, log) = test_interface();
        interface
            .write_packet(Some(0x2C), &[0xF8, 0x00], Boundary::Owned)
            .ok();

        let events = log.borrow().clone();
        assert_eq!(
            events,
            alloc::vec![
                Event::DcLow,
                Event::CsLow,
                Event::Write(alloc::vec![0x2C]),
                Event::DcHigh,
                Event::Write(alloc::vec![0xF8, 0x00]),
                Event::Flush,
                Event::CsHigh,
            ]
        );
    }

    #[test]
    fn test_owned_command_only_packet() {
        let (mut interface, log) = test_interface();
        interface.write_packet(Some(0x01), &[], Boundary::Owned).ok();

        let events = log.borrow().clone();
        assert_eq!(
            events,
            alloc::vec![
                Event::DcLow,
                Event::CsLow,
                Event::Write(alloc::vec![0x01]),
                Event::DcHigh,
                Event::Flush,
                Event::CsHigh,
            ]
        );
    }

    #[test]
    fn test_owned_commandless_packet_still_frames_boundary() {
        let (mut interface, log) = test_interface();
        interface
            .write_packet(None, &[0xAA, 0x55], Boundary::Owned)
            .ok();

        let events = log.borrow().clone();
        assert_eq!(
            events,
            alloc::vec![
                Event::CsLow,
                Event::Write(alloc::vec![0xAA, 0x55]),
                Event::Flush,
                Event::CsHigh,
            ]
        );
    }

    #[test]
    fn test_payload_chunking_boundaries() {
        // Lengths around the chunk limit plus multi-chunk cases
        for len in [
            0usize,
            1,
            CHUNK_LIMIT - 1,
            CHUNK_LIMIT,
            CHUNK_LIMIT + 1,
            5 * CHUNK_LIMIT,
            5 * CHUNK_LIMIT + 7,
        ] {
            let (mut interface, log) = test_interface();
            let payload: Vec<u8> = (0..len).map(|i| (i % 251) as u8).collect();
            interface.write_packet(None, &payload, Boundary::Held).ok();

            let chunks = writes(&log);
            assert_eq!(chunks.len(), len.div_ceil(CHUNK_LIMIT), "len {len}");
            for (i, chunk) in chunks.iter().enumerate() {
                if i + 1 < chunks.len() {
                    assert_eq!(chunk.len(), CHUNK_LIMIT, "len {len} chunk {i}");
                } else {
                    assert!(chunk.len() <= CHUNK_LIMIT, "len {len} final chunk");
                }
            }
            let total: Vec<u8> = chunks.concat();
            assert_eq!(total, payload, "len {len} must cover every byte once");
        }
    }

    #[test]
    fn test_held_stream_asserts_boundary_exactly_once() {
        let (mut interface, log) = test_interface();

        interface.begin_transaction().ok();
        interface.write_packet(Some(0x2C), &[], Boundary::Held).ok();
        for _ in 0..4 {
            interface
                .write_packet(None, &[0x07, 0xE0], Boundary::Held)
                .ok();
        }
        interface.end_transaction().ok();

        assert_eq!(count(&log, &Event::CsLow), 1);
        assert_eq!(count(&log, &Event::CsHigh), 1);
        let events = log.borrow().clone();
        assert_eq!(events.first(), Some(&Event::CsLow));
        assert_eq!(events.last(), Some(&Event::CsHigh));
    }

    #[test]
    fn test_end_transaction_flushes_before_release() {
        let (mut interface, log) = test_interface();
        interface.begin_transaction().ok();
        interface.end_transaction().ok();

        let events = log.borrow().clone();
        assert_eq!(
            events,
            alloc::vec![Event::CsLow, Event::Flush, Event::CsHigh]
        );
    }

    #[test]
    fn test_held_multichunk_stream_keeps_boundary() {
        let (mut interface, log) = test_interface();
        let payload = alloc::vec![0u8; 3 * CHUNK_LIMIT + 10];

        interface.begin_transaction().ok();
        interface.write_packet(Some(0x2C), &payload, Boundary::Held).ok();
        interface.end_transaction().ok();

        // 1 command write + 4 payload chunks, one boundary pair
        assert_eq!(writes(&log).len(), 5);
        assert_eq!(count(&log, &Event::CsLow), 1);
        assert_eq!(count(&log, &Event::CsHigh), 1);
    }
}
