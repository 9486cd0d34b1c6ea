//! Capabilities the printer driver needs from its host
//!
//! The driver never touches hardware directly. It is handed a [Transport](crate::transport::Transport) to move bytes, a [Clock](crate::transport::Clock) to measure time (and to hand control back to the host while waiting), and optionally a [BusyLine](crate::transport::BusyLine) when the printer's DTR handshake pin is wired.

pub use self::clock::{SystemClock, VirtualClock};
pub use self::recorder::Recorder;

mod clock;
mod recorder;

use crate::Error;

/// Byte-level link to the printer
///
/// Sending is fire-and-forget: the printer never acknowledges bytes, so an implementation should only fail when the underlying link itself is broken.
pub trait Transport {
    /// Sends a single byte to the printer
    fn send_byte(&mut self, byte: u8) -> Result<(), Error>;
    /// Indicates if the printer has sent back a byte that can be read
    fn byte_available(&mut self) -> bool;
    /// Reads one byte sent by the printer
    fn receive_byte(&mut self) -> Result<u8, Error>;
}

/// Monotonic microsecond clock
///
/// The counter is allowed to wrap around; every comparison the driver does against it is rollover-safe.
pub trait Clock {
    /// Current time, in microseconds
    fn now_micros(&self) -> u32;

    /// Called on every iteration of a blocking wait
    ///
    /// Hosts with a scheduler can run other work here. The default does nothing, which turns every wait into a busy loop.
    fn yield_now(&mut self) {}
}

/// The printer's busy (DTR) signal
pub trait BusyLine {
    /// Returns `true` while the printer can not accept more data
    fn is_busy(&mut self) -> bool;
}

impl<F: FnMut() -> bool> BusyLine for F {
    fn is_busy(&mut self) -> bool {
        self()
    }
}
