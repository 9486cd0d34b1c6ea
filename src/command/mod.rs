//! Raw printer commands
//!
//! Each command knows its exact byte representation on the wire. The [encoder](crate::command::encoder) pushes those bytes through the flow control; nothing in here talks to the printer directly.

pub use self::barcode::BarcodeType;
pub use self::charset::Charset;
pub use self::code_page::CodePage;
pub use self::command::Command;
pub use self::font::{Font, Size};
pub use self::justification::Justification;
pub use self::print_mode::PrintMode;

pub mod encoder;

mod barcode;
mod charset;
mod code_page;
mod command;
mod font;
mod justification;
mod print_mode;

/// Horizontal tab
pub const HT: u8 = b'\t';
/// Line feed
pub const LF: u8 = b'\n';
/// Form feed
pub const FF: u8 = 0x0c;
/// Carriage return, never sent to the printer
pub const CR: u8 = b'\r';
/// Device control 2
pub const DC2: u8 = 18;
/// Escape
pub const ESC: u8 = 27;
/// Field separator
pub const FS: u8 = 28;
/// Group separator
pub const GS: u8 = 29;
