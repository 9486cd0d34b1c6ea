/// Errors that this crate throws.
///
/// The printer protocol itself has no error reporting, so most of these come either from the injected transport, or from host-side preparation of data (text encoding, images).
#[derive(Debug)]
pub enum Error {
    /// The transport failed to move a byte
    Transport(String),
    /// I/O error from a streaming byte source
    Io(std::io::Error),
    /// A streaming bitmap source ran dry before the image was complete
    StreamEnded,
    /// The bitmap buffer is shorter than its declared geometry
    BitmapSize {
        /// Bytes required by `width` and `height`
        expected: usize,
        /// Bytes actually supplied
        found: usize
    },
    /// Error regarding image treatment
    ImageError(image::ImageError),
    /// The content could not be encoded as a qr code
    QrError(String),
    /// An unsupported utf-8 character was found when passing to cp437
    Encoding
}

impl std::fmt::Display for Error {
    fn fmt(&self, formatter: &mut std::fmt::Formatter) -> Result<(), std::fmt::Error> {
        let content = match self {
            Error::Transport(detail) => format!("Transport error: {}", detail),
            Error::Io(e) => format!("I/O error: {}", e),
            Error::StreamEnded => "The bitmap stream ended before the image was complete".to_string(),
            Error::BitmapSize{expected, found} => format!("Bitmap buffer too short, expected {} bytes but found {}", expected, found),
            Error::ImageError(e) => format!("Image error: {}", e),
            Error::QrError(detail) => format!("QR code error: {}", detail),
            Error::Encoding => "An unsupported utf-8 character was found when passing to cp437".to_string()
        };
        write!(formatter, "{}", content)
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Io(e) => Some(e),
            Error::ImageError(e) => Some(e),
            _other => None
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(e: std::io::Error) -> Error {
        if e.kind() == std::io::ErrorKind::UnexpectedEof {
            Error::StreamEnded
        } else {
            Error::Io(e)
        }
    }
}
