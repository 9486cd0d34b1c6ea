use crate::Error;
use std::io::Read;

/// Sequential supplier of bitmap bytes
///
/// Bytes are always pulled in order. Parts of a row that the printer can not print are still pulled and dropped, so the position in the source stays aligned with the image rows.
pub trait ByteSource {
    /// Returns the next byte, blocking until it is available
    fn next_byte(&mut self) -> Result<u8, Error>;

    /// Reads a little endian `u16`
    fn next_u16_le(&mut self) -> Result<u16, Error> {
        let low = self.next_byte()?;
        let high = self.next_byte()?;
        Ok(u16::from_le_bytes([low, high]))
    }
}

/// In-memory bitmap
pub struct SliceSource<'a> {
    data: &'a [u8],
    position: usize
}

impl<'a> SliceSource<'a> {
    pub fn new(data: &'a [u8]) -> SliceSource<'a> {
        SliceSource {
            data,
            position: 0
        }
    }

    /// Bytes pulled so far
    pub fn position(&self) -> usize {
        self.position
    }
}

impl<'a> ByteSource for SliceSource<'a> {
    fn next_byte(&mut self) -> Result<u8, Error> {
        let byte = *self.data.get(self.position).ok_or(Error::StreamEnded)?;
        self.position += 1;
        Ok(byte)
    }
}

/// Bitmap read as it arrives, from a file, a socket or a serial port
///
/// Reads block until a byte shows up. The end of the stream before the image is complete is an [Error::StreamEnded](crate::Error::StreamEnded).
pub struct StreamSource<R> {
    reader: R
}

impl<R: Read> StreamSource<R> {
    pub fn new(reader: R) -> StreamSource<R> {
        StreamSource {
            reader
        }
    }

    pub fn into_inner(self) -> R {
        self.reader
    }
}

impl<R: Read> ByteSource for StreamSource<R> {
    fn next_byte(&mut self) -> Result<u8, Error> {
        let mut buffer = [0u8; 1];
        self.reader.read_exact(&mut buffer)?;
        Ok(buffer[0])
    }
}
