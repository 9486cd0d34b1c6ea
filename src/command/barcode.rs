extern crate serde;

use serde::{Serialize, Deserialize};

/// Barcode symbologies supported by the printer
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq)]
pub enum BarcodeType {
    UpcA,
    UpcE,
    Ean13,
    Ean8,
    Code39,
    Itf,
    Codabar,
    Code93,
    Code128
}

impl BarcodeType {
    /// Type number as understood by old firmware
    pub fn as_byte(&self) -> u8 {
        match self {
            BarcodeType::UpcA => 0,
            BarcodeType::UpcE => 1,
            BarcodeType::Ean13 => 2,
            BarcodeType::Ean8 => 3,
            BarcodeType::Code39 => 4,
            BarcodeType::Itf => 5,
            BarcodeType::Codabar => 6,
            BarcodeType::Code93 => 7,
            BarcodeType::Code128 => 8
        }
    }

    /// Type number for the length-prefixed form of `GS k`, offset by 65
    pub fn as_prefixed_byte(&self) -> u8 {
        self.as_byte() + 65
    }
}
