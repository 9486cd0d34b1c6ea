extern crate serde;

use serde::{Serialize, Deserialize};

/// Fonts built into the printer
#[derive(Serialize, Deserialize, Clone, Copy, Debug, Hash, PartialEq)]
pub enum Font {
    /// 12x24 dots, 32 columns
    FontA,
    /// 9x17 dots, 42 columns
    FontB
}

impl Eq for Font{}

impl Font {
    /// Width and height of a single character, in dots
    pub fn dimensions(&self) -> (u8, u8) {
        match self {
            Font::FontA => (12, 24),
            Font::FontB => (9, 17)
        }
    }
}

/// Text size presets, built from the double height and double width modes
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq)]
pub enum Size {
    /// Standard width and height
    Small,
    /// Double height
    Medium,
    /// Double width and height
    Large
}
