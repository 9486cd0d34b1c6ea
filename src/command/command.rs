extern crate serde;

use super::{Justification, PrintMode, DC2, ESC, FF, GS, HT};
use serde::{Serialize, Deserialize};

/// Tab stops installed on reset, every 4 columns. The final 0 ends the list.
const TAB_STOPS: [u8; 8] = [4, 8, 12, 16, 20, 24, 28, 0];

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub enum Command {
    /// Equivalent to ESC @
    Init,
    /// Tab stops every 4 columns. Equivalent to ESC D
    SetTabStops,
    /// Equivalent to ESC ! n
    SelectPrintMode {
        mode: PrintMode
    },
    /// Dedicated white/black reverse toggle. Equivalent to GS B n
    Inverse {
        enabled: bool
    },
    /// Dedicated upside-down toggle. Equivalent to ESC { n
    UpsideDown {
        enabled: bool
    },
    /// Equivalent to ESC a n
    Justify {
        justification: Justification
    },
    /// Feeds a number of text lines. Equivalent to ESC d n
    FeedLines {
        lines: u8
    },
    /// Feeds a number of dot rows. Equivalent to ESC J n
    FeedRows {
        rows: u8
    },
    /// Equivalent to FF
    FormFeed,
    /// Horizontal tab
    Tab,
    /// Heating parameters. Equivalent to ESC 7 n1 n2 n3
    HeatConfig {
        /// Max heating dots, in units of 8 dots (minus 1)
        dots: u8,
        /// Heating time, in units of 10us
        time: u8,
        /// Heating interval, in units of 10us
        interval: u8
    },
    /// Equivalent to DC2 # n
    PrintDensity {
        density: u8,
        break_time: u8
    },
    /// Equivalent to ESC - n
    Underline {
        weight: u8
    },
    /// Equivalent to ESC 3 n
    LineHeight {
        height: u8
    },
    /// Equivalent to ESC SP n
    CharSpacing {
        spacing: u8
    },
    /// Equivalent to ESC R n
    SelectCharset {
        charset: u8
    },
    /// Equivalent to ESC t n
    SelectCodePage {
        code_page: u8
    },
    /// Equivalent to ESC = n
    Online {
        online: bool
    },
    /// Sleep timer, two bytes little endian. Equivalent to ESC 8 nL nH
    SleepAfter {
        seconds: u16
    },
    /// Sleep timer for old firmware, single byte. Equivalent to ESC 8 n
    SleepAfterShort {
        seconds: u8
    },
    /// Wakes the printer from sleep
    Wake,
    /// No-op byte
    Nul,
    /// Equivalent to GS h n
    BarcodeHeight {
        height: u8
    },
    /// Human readable label position. Equivalent to GS H n
    BarcodeLabel {
        position: u8
    },
    /// Equivalent to GS w n
    BarcodeWidth {
        width: u8
    },
    /// Equivalent to GS k n
    BarcodeType {
        code: u8
    },
    /// Paper sensor query. Equivalent to ESC v 0
    PaperStatus,
    /// Paper sensor query for old firmware. Equivalent to GS r 0
    PaperStatusShort,
    /// Makes the printer drive its DTR line while busy. Equivalent to GS a n
    EnableHandshake,
    /// Equivalent to DC2 T
    TestPage,
    /// Raster bit image header, followed by `height * row_bytes` bytes of data. Equivalent to DC2 * r n
    RasterHeader {
        height: u8,
        row_bytes: u8
    }
}

impl Command {
    pub fn as_bytes(&self) -> Vec<u8> {
        match self {
            Command::Init => vec![ESC, b'@'],
            Command::SetTabStops => {
                let mut res = vec![ESC, b'D'];
                res.extend_from_slice(&TAB_STOPS);
                res
            },
            Command::SelectPrintMode{mode} => vec![ESC, b'!', mode.bits()],
            Command::Inverse{enabled} => vec![GS, b'B', *enabled as u8],
            Command::UpsideDown{enabled} => vec![ESC, b'{', *enabled as u8],
            Command::Justify{justification} => vec![ESC, b'a', justification.as_byte()],
            Command::FeedLines{lines} => vec![ESC, b'd', *lines],
            Command::FeedRows{rows} => vec![ESC, b'J', *rows],
            Command::FormFeed => vec![FF],
            Command::Tab => vec![HT],
            Command::HeatConfig{dots, time, interval} => vec![ESC, b'7', *dots, *time, *interval],
            Command::PrintDensity{density, break_time} => {
                // Packed in 16 bits, only the low byte reaches the printer
                let packed = ((*density as u16) << 5) | (*break_time as u16);
                vec![DC2, b'#', packed as u8]
            },
            Command::Underline{weight} => vec![ESC, b'-', *weight],
            Command::LineHeight{height} => vec![ESC, b'3', *height],
            Command::CharSpacing{spacing} => vec![ESC, b' ', *spacing],
            Command::SelectCharset{charset} => vec![ESC, b'R', *charset],
            Command::SelectCodePage{code_page} => vec![ESC, b't', *code_page],
            Command::Online{online} => vec![ESC, b'=', *online as u8],
            Command::SleepAfter{seconds} => {
                let [low, high] = seconds.to_le_bytes();
                vec![ESC, b'8', low, high]
            },
            Command::SleepAfterShort{seconds} => vec![ESC, b'8', *seconds],
            Command::Wake => vec![0xff],
            Command::Nul => vec![0x00],
            Command::BarcodeHeight{height} => vec![GS, b'h', *height],
            Command::BarcodeLabel{position} => vec![GS, b'H', *position],
            Command::BarcodeWidth{width} => vec![GS, b'w', *width],
            Command::BarcodeType{code} => vec![GS, b'k', *code],
            Command::PaperStatus => vec![ESC, b'v', 0],
            Command::PaperStatusShort => vec![GS, b'r', 0],
            Command::EnableHandshake => vec![GS, b'a', 1 << 5],
            Command::TestPage => vec![DC2, b'T'],
            Command::RasterHeader{height, row_bytes} => vec![DC2, b'*', *height, *row_bytes]
        }
    }
}
