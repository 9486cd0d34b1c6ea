use super::Transport;
use crate::Error;
use std::collections::VecDeque;

/// Transport that keeps every byte instead of sending it
///
/// Used for previews and dry runs. Replies the printer would have sent back (paper status, for example) can be queued beforehand with [queue_reply](Recorder::queue_reply).
///
/// ```rust
/// use thermal_rs::transport::{Recorder, Transport};
///
/// let mut recorder = Recorder::new();
/// recorder.send_byte(0x1b)?;
/// assert_eq!(&[0x1b], recorder.sent());
/// # Ok::<(), thermal_rs::Error>(())
/// ```
#[derive(Clone, Debug, Default)]
pub struct Recorder {
    sent: Vec<u8>,
    replies: VecDeque<u8>
}

impl Recorder {
    pub fn new() -> Recorder {
        Recorder::default()
    }

    /// Everything sent so far
    pub fn sent(&self) -> &[u8] {
        &self.sent
    }

    /// Returns the sent bytes, leaving the recorder empty
    pub fn take(&mut self) -> Vec<u8> {
        std::mem::take(&mut self.sent)
    }

    /// Queues a byte to be read back as if the printer had answered
    pub fn queue_reply(&mut self, byte: u8) {
        self.replies.push_back(byte);
    }
}

impl Transport for Recorder {
    fn send_byte(&mut self, byte: u8) -> Result<(), Error> {
        self.sent.push(byte);
        Ok(())
    }

    fn byte_available(&mut self) -> bool {
        !self.replies.is_empty()
    }

    fn receive_byte(&mut self) -> Result<u8, Error> {
        self.replies.pop_front().ok_or_else(|| Error::Transport("no reply pending".to_string()))
    }
}
