//! Timing-based flow control
//!
//! The printer has no flow control on its serial line and a receive buffer of only a few hundred bytes. Instead of observing when the printer is done, the driver estimates how long each operation keeps the printer busy, and refuses to send the next byte before that moment.

use crate::{
    Error,
    transport::{BusyLine, Clock, Transport}
};

/// Bits on the wire per byte: 8 data bits, start, stop, and one idle bit of margin
const BITS_PER_BYTE: u32 = 11;

/// Longest wait that still compares correctly against a wrapping 32 bit clock
const MAX_DURATION: u32 = i32::MAX as u32;

/// Microseconds needed to push one byte through the serial line, rounded to the nearest microsecond
///
/// ```rust
/// use thermal_rs::flow_control::byte_time;
/// assert_eq!(573, byte_time(19200));
/// assert_eq!(1146, byte_time(9600));
/// ```
pub const fn byte_time(baud_rate: u32) -> u32 {
    (BITS_PER_BYTE * 1_000_000 + baud_rate / 2) / baud_rate
}

/// Gate between the encoder and the transport
///
/// Keeps a single "resume not before" deadline. In handshake mode the deadline is ignored, and the busy line is polled instead.
pub struct FlowControl<T, C> {
    transport: T,
    clock: C,
    busy_line: Option<Box<dyn BusyLine>>,
    /// Set once the printer has been told to drive the busy line
    handshake: bool,
    resume_at: u32,
    byte_time: u32
}

impl<T: Transport, C: Clock> FlowControl<T, C> {
    /// Wraps a transport and a clock. The first byte can go out right away.
    pub fn new(transport: T, clock: C, baud_rate: u32) -> FlowControl<T, C> {
        let resume_at = clock.now_micros();
        FlowControl {
            transport,
            clock,
            busy_line: None,
            handshake: false,
            resume_at,
            byte_time: byte_time(baud_rate.max(1))
        }
    }

    /// Records `now + duration` as the earliest moment for the next byte
    ///
    /// The previous deadline is overwritten, never extended.
    pub fn set_deadline(&mut self, duration: u32) {
        self.resume_at = self.clock.now_micros().wrapping_add(duration.min(MAX_DURATION));
    }

    /// Blocks until the printer is expected to accept data again
    pub fn await_deadline(&mut self) {
        if self.handshake {
            if let Some(busy_line) = self.busy_line.as_mut() {
                while busy_line.is_busy() {
                    self.clock.yield_now();
                }
                return;
            }
        }
        // Signed difference, so the clock counter can roll over
        while (self.clock.now_micros().wrapping_sub(self.resume_at) as i32) < 0 {
            self.clock.yield_now();
        }
    }

    /// Waits for the deadline, then sends one byte. The deadline is left untouched.
    pub fn send(&mut self, byte: u8) -> Result<(), Error> {
        self.await_deadline();
        self.transport.send_byte(byte)
    }

    /// Blocks for a fixed amount of time, regardless of the deadline or handshake mode
    pub fn pause(&mut self, micros: u32) {
        let start = self.clock.now_micros();
        while self.clock.now_micros().wrapping_sub(start) < micros {
            self.clock.yield_now();
        }
    }

    /// Installs the busy line. It is only consulted after [enable_handshake](FlowControl::enable_handshake).
    pub fn set_busy_line(&mut self, busy_line: Box<dyn BusyLine>) {
        self.busy_line = Some(busy_line);
    }

    /// Indicates if a busy line was installed, whether or not handshake is on
    pub fn has_busy_line(&self) -> bool {
        self.busy_line.is_some()
    }

    /// Switches to handshake mode, if a busy line is installed
    pub(crate) fn enable_handshake(&mut self) {
        self.handshake = self.busy_line.is_some();
    }

    /// Returns `true` once the busy line paces the transfer instead of the deadline
    pub fn handshake(&self) -> bool {
        self.handshake
    }

    /// Time to transmit one byte at the configured baud rate
    pub fn byte_time(&self) -> u32 {
        self.byte_time
    }

    /// Moment before which nothing will be sent, in clock microseconds
    pub fn deadline(&self) -> u32 {
        self.resume_at
    }

    /// Microseconds left until the deadline, zero if it already passed
    pub fn remaining(&self) -> u32 {
        let diff = self.resume_at.wrapping_sub(self.clock.now_micros()) as i32;
        diff.max(0) as u32
    }

    /// Underlying byte link
    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn transport_mut(&mut self) -> &mut T {
        &mut self.transport
    }

    /// Clock used for every deadline
    pub fn clock(&self) -> &C {
        &self.clock
    }

    pub fn clock_mut(&mut self) -> &mut C {
        &mut self.clock
    }

    /// Polls the transport for a reply byte
    pub(crate) fn try_receive(&mut self) -> Result<Option<u8>, Error> {
        if self.transport.byte_available() {
            self.transport.receive_byte().map(Some)
        } else {
            Ok(None)
        }
    }

    /// Gives back the transport and the clock
    pub fn into_parts(self) -> (T, C) {
        (self.transport, self.clock)
    }
}
