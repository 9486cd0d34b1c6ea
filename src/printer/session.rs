use super::Firmware;
use crate::command::{Font, PrintMode, LF};

/// Width of the print head, in dots
pub const HEAD_WIDTH: u16 = 384;

/// Mutable state of one printer session
///
/// Mirrors what the printer is believed to be doing: the active print mode, where the head is on the current line, and the line geometry that drives the timing estimates.
#[derive(Clone, Debug, PartialEq)]
pub struct Session {
    pub (crate) firmware: Firmware,
    pub (crate) print_mode: PrintMode,
    /// Last character issued to the printer
    pub (crate) prev_byte: u8,
    /// Last horizontal column printed
    pub (crate) column: u8,
    /// Output wraps at this column
    pub (crate) max_column: u8,
    /// Height of characters, in dots
    pub (crate) char_height: u8,
    /// Inter-line spacing (not line height), in dots
    pub (crate) line_spacing: u8,
    /// Barcode height in dots, not including the label
    pub (crate) barcode_height: u8,
    pub (crate) dot_print_time: u32,
    pub (crate) dot_feed_time: u32,
    pub (crate) max_chunk_height: u8,
    pub (crate) online: bool,
    pub (crate) asleep: bool
}

impl Session {
    pub(crate) fn new(firmware: Firmware) -> Session {
        Session {
            firmware,
            print_mode: PrintMode::empty(),
            prev_byte: LF,
            column: 0,
            max_column: 32,
            char_height: 24,
            line_spacing: 6,
            barcode_height: 50,
            dot_print_time: 30_000,
            dot_feed_time: 2_100,
            max_chunk_height: 255,
            online: true,
            asleep: false
        }
    }

    /// Defaults the printer itself falls back to on `ESC @`
    pub(crate) fn reset_line_state(&mut self) {
        // Treat as if the prior line is blank
        self.prev_byte = LF;
        self.column = 0;
        self.print_mode = PrintMode::empty();
        self.max_column = 32;
        self.char_height = 24;
        self.line_spacing = 6;
        self.barcode_height = 50;
    }

    /// Re-derives the character height and the column count from the print mode
    ///
    /// Only depends on the mask, so applying it twice is the same as applying it once.
    pub(crate) fn adjust_char_values(&mut self) {
        let font = if self.print_mode.contains(PrintMode::FONT_B) {
            Font::FontB
        } else {
            Font::FontA
        };
        let (mut char_width, mut char_height) = font.dimensions();
        if self.print_mode.contains(PrintMode::DOUBLE_WIDTH) {
            char_width *= 2;
        }
        if self.print_mode.contains(PrintMode::DOUBLE_HEIGHT) {
            char_height *= 2;
        }
        self.char_height = char_height;
        self.max_column = (HEAD_WIDTH / char_width as u16) as u8;
    }

    /// Time the paper needs to advance one text line
    ///
    /// A line following a blank one only feeds paper. Otherwise the character rows are printed and the spacing is fed.
    pub(crate) fn line_time(&self) -> u32 {
        let char_height = self.char_height as u32;
        let line_spacing = self.line_spacing as u32;
        if self.prev_byte == LF {
            (char_height + line_spacing).saturating_mul(self.dot_feed_time)
        } else {
            char_height.saturating_mul(self.dot_print_time)
                .saturating_add(line_spacing.saturating_mul(self.dot_feed_time))
        }
    }

    pub fn firmware(&self) -> Firmware {
        self.firmware
    }

    pub fn print_mode(&self) -> PrintMode {
        self.print_mode
    }

    pub fn prev_byte(&self) -> u8 {
        self.prev_byte
    }

    pub fn column(&self) -> u8 {
        self.column
    }

    pub fn max_column(&self) -> u8 {
        self.max_column
    }

    pub fn char_height(&self) -> u8 {
        self.char_height
    }

    pub fn line_spacing(&self) -> u8 {
        self.line_spacing
    }

    pub fn barcode_height(&self) -> u8 {
        self.barcode_height
    }

    pub fn dot_print_time(&self) -> u32 {
        self.dot_print_time
    }

    pub fn dot_feed_time(&self) -> u32 {
        self.dot_feed_time
    }

    pub fn max_chunk_height(&self) -> u8 {
        self.max_chunk_height
    }

    /// Whether the printer was last told to obey print commands. Advisory only
    pub fn is_online(&self) -> bool {
        self.online
    }

    /// Whether the printer was last sent to sleep. Advisory only
    pub fn is_asleep(&self) -> bool {
        self.asleep
    }
}
