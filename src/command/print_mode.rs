extern crate serde;

use serde::{Serialize, Deserialize};

/// Bit mask sent with `ESC !`
///
/// ```rust
/// use thermal_rs::command::PrintMode;
///
/// let mode = PrintMode::empty().with(PrintMode::BOLD).with(PrintMode::DOUBLE_WIDTH);
/// assert_eq!(0b0010_1000, mode.bits());
/// assert!(mode.contains(PrintMode::BOLD));
/// ```
#[derive(Serialize, Deserialize, Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct PrintMode(u8);

impl PrintMode {
    /// Font B instead of font A
    pub const FONT_B: PrintMode = PrintMode(1 << 0);
    /// White on black. Only honoured through this bit by old firmware
    pub const INVERSE: PrintMode = PrintMode(1 << 1);
    /// Upside-down text. Only honoured through this bit by old firmware
    pub const UPSIDE_DOWN: PrintMode = PrintMode(1 << 2);
    pub const BOLD: PrintMode = PrintMode(1 << 3);
    pub const DOUBLE_HEIGHT: PrintMode = PrintMode(1 << 4);
    pub const DOUBLE_WIDTH: PrintMode = PrintMode(1 << 5);
    /// Strike-through
    pub const STRIKE: PrintMode = PrintMode(1 << 6);

    pub const fn empty() -> PrintMode {
        PrintMode(0)
    }

    pub const fn from_bits(bits: u8) -> PrintMode {
        PrintMode(bits)
    }

    pub const fn bits(&self) -> u8 {
        self.0
    }

    pub const fn contains(&self, other: PrintMode) -> bool {
        self.0 & other.0 == other.0
    }

    pub fn insert(&mut self, other: PrintMode) {
        self.0 |= other.0;
    }

    pub fn remove(&mut self, other: PrintMode) {
        self.0 &= !other.0;
    }

    pub const fn with(self, other: PrintMode) -> PrintMode {
        PrintMode(self.0 | other.0)
    }
}
