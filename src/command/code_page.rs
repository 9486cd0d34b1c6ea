extern crate serde;

use serde::{Serialize, Deserialize};

/// Code pages for the upper half of the character table (`0x80..=0xff`)
///
/// Numbers 11 to 14 are not assigned by the firmware.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq)]
pub enum CodePage {
    CP437,
    Katakana,
    CP850,
    CP860,
    CP863,
    CP865,
    WCP1251,
    CP866,
    MIK,
    CP755,
    Iran,
    CP862,
    WCP1252,
    WCP1253,
    CP852,
    CP858,
    Iran2,
    Latvian,
    CP864,
    ISO8859_1,
    CP737,
    WCP1257,
    Thai,
    CP720,
    CP855,
    CP857,
    WCP1250,
    CP775,
    WCP1254,
    WCP1255,
    WCP1256,
    WCP1258,
    ISO8859_2,
    ISO8859_3,
    ISO8859_4,
    ISO8859_5,
    ISO8859_6,
    ISO8859_7,
    ISO8859_8,
    ISO8859_9,
    ISO8859_15,
    Thai2,
    CP856,
    CP874
}

impl CodePage {
    /// Highest code page number the firmware documents
    pub const MAX: u8 = 47;

    /// Returns the parameter byte for `ESC t`
    pub fn as_byte(&self) -> u8 {
        match self {
            CodePage::CP437 => 0,
            CodePage::Katakana => 1,
            CodePage::CP850 => 2,
            CodePage::CP860 => 3,
            CodePage::CP863 => 4,
            CodePage::CP865 => 5,
            CodePage::WCP1251 => 6,
            CodePage::CP866 => 7,
            CodePage::MIK => 8,
            CodePage::CP755 => 9,
            CodePage::Iran => 10,
            CodePage::CP862 => 15,
            CodePage::WCP1252 => 16,
            CodePage::WCP1253 => 17,
            CodePage::CP852 => 18,
            CodePage::CP858 => 19,
            CodePage::Iran2 => 20,
            CodePage::Latvian => 21,
            CodePage::CP864 => 22,
            CodePage::ISO8859_1 => 23,
            CodePage::CP737 => 24,
            CodePage::WCP1257 => 25,
            CodePage::Thai => 26,
            CodePage::CP720 => 27,
            CodePage::CP855 => 28,
            CodePage::CP857 => 29,
            CodePage::WCP1250 => 30,
            CodePage::CP775 => 31,
            CodePage::WCP1254 => 32,
            CodePage::WCP1255 => 33,
            CodePage::WCP1256 => 34,
            CodePage::WCP1258 => 35,
            CodePage::ISO8859_2 => 36,
            CodePage::ISO8859_3 => 37,
            CodePage::ISO8859_4 => 38,
            CodePage::ISO8859_5 => 39,
            CodePage::ISO8859_6 => 40,
            CodePage::ISO8859_7 => 41,
            CodePage::ISO8859_8 => 42,
            CodePage::ISO8859_9 => 43,
            CodePage::ISO8859_15 => 44,
            CodePage::Thai2 => 45,
            CodePage::CP856 => 46,
            CodePage::CP874 => 47
        }
    }
}

impl From<CodePage> for u8 {
    fn from(code_page: CodePage) -> u8 {
        code_page.as_byte()
    }
}
