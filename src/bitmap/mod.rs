//! Raster bitmap printing
//!
//! The printer takes raster images as `DC2 *` strips. A strip must fit the printer's 256 byte receive buffer, so tall images are split into several strips, each followed by a wait long enough for the head to print it.

pub use self::bitmap_image::Bitmap;
pub use self::chunker::{ChunkPlan, BUFFER_SIZE, HANDSHAKE_CHUNK_HEIGHT, MAX_ROW_BYTES};
pub use self::source::{ByteSource, SliceSource, StreamSource};

pub(crate) use self::chunker::print_chunked;

mod bitmap_image;
mod chunker;
mod source;
