//! Library for driving serial thermal receipt printers with rust
//!
//! These printers (the common 58mm, 384 dot models sold for embedded projects) are connected through a plain serial line, with no flow control. They only buffer a few hundred bytes, and take their time to physically print and feed paper. Sending faster than that silently drops data.
//!
//! This crate encodes print operations into the printer's escape sequences, and paces the byte stream by estimating how long the printer stays busy after each operation. If the printer's DTR pin is wired, its busy signal can be used instead of the estimates.
//!
//! The byte link and the clock are supplied by the host, through the [Transport](crate::transport::Transport) and [Clock](crate::transport::Clock) traits. A [Recorder](crate::transport::Recorder) and a [VirtualClock](crate::transport::VirtualClock) are included to preview the output without a printer.
//!
//! ```rust
//! use thermal_rs::{Printer, PrinterProfile, command::{Justification, Size}};
//! use thermal_rs::transport::{Recorder, VirtualClock};
//!
//! let mut printer = Printer::new(Recorder::new(), VirtualClock::new(), PrinterProfile::default());
//! // The firmware version is printed on the test page, 2.68 is 268
//! printer.begin(268)?;
//! printer.justify(Justification::Center)?;
//! printer.set_size(Size::Large)?;
//! printer.println("Receipt")?;
//! printer.set_size(Size::Small)?;
//! printer.feed(2)?;
//! # Ok::<(), thermal_rs::Error>(())
//! ```
//!
//! ## Timing
//!
//! Print and feed speed depend on the supply voltage, the paper, and the unit itself. The [PrinterProfile](crate::PrinterProfile) holds the estimates; defaults come from a typical printer, and should be tuned if the output gets garbled (too fast) or printing stalls (too slow).
//!
//! ### Images
//!
//! Raster images are sent in strips that fit the printer's buffer. A [Bitmap](crate::Bitmap) can be built from an [image](https://docs.rs/image) or a qr code, or raw packed data can be printed from memory or from any [ByteSource](crate::bitmap::ByteSource).
//!
//! ```rust
//! use thermal_rs::{Bitmap, Printer, PrinterProfile};
//! use thermal_rs::transport::{Recorder, VirtualClock};
//!
//! let mut printer = Printer::new(Recorder::new(), VirtualClock::new(), PrinterProfile::default());
//! printer.begin(268)?;
//! let code = Bitmap::qr_code("https://example.com", 6)?;
//! printer.print_image(&code)?;
//! # Ok::<(), thermal_rs::Error>(())
//! ```

pub use printer::{Printer, PrinterProfile, PrinterProfileBuilder, HeatConfig, Firmware, Session, PaperStatus};
pub use bitmap::Bitmap;
pub use error::{Error};

/// Contains raw printer commands
pub mod command;
/// Raster bitmap strips
pub mod bitmap;
pub mod flow_control;
/// Host supplied capabilities
pub mod transport;

mod printer;
mod error;
