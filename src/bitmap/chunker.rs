use super::ByteSource;
use crate::{
    Error,
    command::{Command, encoder},
    flow_control::FlowControl,
    transport::{Clock, Transport}
};
use log::trace;

/// Receive buffer of the printer, in bytes
pub const BUFFER_SIZE: u16 = 256;
/// Bytes per row the 384 dot head can print. Anything wider is cut off.
pub const MAX_ROW_BYTES: u8 = 48;
/// Strip height when the busy line paces the transfer. The header carries the height in a single byte.
pub const HANDSHAKE_CHUNK_HEIGHT: u8 = 255;

/// Geometry of a chunked bitmap print
///
/// ```rust
/// use thermal_rs::bitmap::ChunkPlan;
///
/// let plan = ChunkPlan::new(400, 500, 255, false);
/// assert_eq!(50, plan.row_bytes());
/// assert_eq!(48, plan.row_bytes_clipped());
/// assert_eq!(5, plan.chunk_height_limit());
/// assert_eq!(100, plan.strips().count());
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ChunkPlan {
    height: u16,
    /// Bytes per source row, rounded up to whole bytes
    row_bytes: u32,
    /// Bytes per row actually sent
    row_bytes_clipped: u8,
    chunk_height_limit: u8
}

impl ChunkPlan {
    /// Plans a `width` x `height` pixel image
    ///
    /// Without handshake, a strip must fit the receive buffer, and is further capped by `max_chunk_height`.
    pub fn new(width: u16, height: u16, max_chunk_height: u8, handshake: bool) -> ChunkPlan {
        // Widened, so the rounding can not overflow near u16::MAX
        let row_bytes = (width as u32 + 7) / 8;
        let row_bytes_clipped = row_bytes.min(MAX_ROW_BYTES as u32) as u8;
        let chunk_height_limit = if handshake {
            HANDSHAKE_CHUNK_HEIGHT
        } else {
            let fits = BUFFER_SIZE / (row_bytes_clipped.max(1) as u16);
            fits.min(max_chunk_height as u16).max(1) as u8
        };
        ChunkPlan {
            height,
            row_bytes,
            row_bytes_clipped,
            chunk_height_limit
        }
    }

    pub fn row_bytes(&self) -> u32 {
        self.row_bytes
    }

    pub fn row_bytes_clipped(&self) -> u8 {
        self.row_bytes_clipped
    }

    pub fn chunk_height_limit(&self) -> u8 {
        self.chunk_height_limit
    }

    /// Source bytes dropped at the end of every row
    pub fn excess_bytes(&self) -> u32 {
        self.row_bytes - self.row_bytes_clipped as u32
    }

    /// Source bytes the whole image takes
    pub fn source_len(&self) -> usize {
        self.row_bytes as usize * self.height as usize
    }

    /// Height of each strip, top to bottom. Only the last one may be shorter.
    pub fn strips(&self) -> impl Iterator<Item = u8> {
        let limit = self.chunk_height_limit as u16;
        // Zero width images have nothing to send
        let height = if self.row_bytes_clipped == 0 { 0 } else { self.height };
        (0..height).step_by(limit as usize).map(move |row_start| (height - row_start).min(limit) as u8)
    }
}

/// Sends the image strip by strip, pulling rows from `source`
pub(crate) fn print_chunked<T, C, S>(flow: &mut FlowControl<T, C>, plan: &ChunkPlan, dot_print_time: u32, source: &mut S) -> Result<(), Error>
where T: Transport, C: Clock, S: ByteSource + ?Sized {
    for (index, strip_height) in plan.strips().enumerate() {
        trace!("Bitmap strip {}: {} rows of {} bytes", index, strip_height, plan.row_bytes_clipped);
        encoder::write_command(flow, &Command::RasterHeader {
            height: strip_height,
            row_bytes: plan.row_bytes_clipped
        })?;
        for _row in 0..strip_height {
            for _x in 0..plan.row_bytes_clipped {
                let byte = source.next_byte()?;
                flow.send(byte)?;
            }
            for _x in 0..plan.excess_bytes() {
                source.next_byte()?;
            }
        }
        flow.set_deadline((strip_height as u32).saturating_mul(dot_print_time));
    }
    Ok(())
}
