//! Pushes command bytes through the flow control
//!
//! Every byte waits for the current deadline. Once the whole group is out, a single deadline covering the transmission of all of its bytes is set: between bytes of the same command, the serial line is the bottleneck, not the print mechanism.

use super::Command;
use crate::{
    Error,
    flow_control::FlowControl,
    transport::{Clock, Transport}
};

/// Sends an arbitrary group of bytes as one logical command
pub fn write_bytes<T: Transport, C: Clock>(flow: &mut FlowControl<T, C>, bytes: &[u8]) -> Result<(), Error> {
    for byte in bytes {
        flow.send(*byte)?;
    }
    let duration = flow.byte_time().saturating_mul(bytes.len() as u32);
    flow.set_deadline(duration);
    Ok(())
}

/// Sends a single command
pub fn write_command<T: Transport, C: Clock>(flow: &mut FlowControl<T, C>, command: &Command) -> Result<(), Error> {
    write_bytes(flow, &command.as_bytes())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transport::{Recorder, VirtualClock};

    #[test]
    fn test_single_deadline_for_the_whole_group() {
        let mut flow = FlowControl::new(Recorder::new(), VirtualClock::new(), 19200);
        write_bytes(&mut flow, &[1, 2, 3, 4, 5, 6]).unwrap();
        assert_eq!(&[1, 2, 3, 4, 5, 6], flow.transport().sent());
        // Nothing was pending, so no byte had to wait
        assert_eq!(0, flow.clock().yields());
        assert_eq!(6 * 573, flow.remaining());
    }

    #[test]
    fn test_next_command_waits_for_transmission() {
        let mut flow = FlowControl::new(Recorder::new(), VirtualClock::new().with_step(1), 19200);
        write_command(&mut flow, &Command::Init).unwrap();
        write_command(&mut flow, &Command::Tab).unwrap();
        assert_eq!(2 * 573, flow.clock().now_micros());
        assert_eq!(573, flow.remaining());
    }
}
