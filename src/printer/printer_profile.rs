use serde::{Serialize, Deserialize};

/// Thermal head drive parameters, see [set_heat_config](crate::Printer::set_heat_config)
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq)]
pub struct HeatConfig {
    /// Max heating dots, in units of 8 dots (minus 1)
    pub dots: u8,
    /// Heating time, in units of 10us
    pub time: u8,
    /// Heating interval, in units of 10us
    pub interval: u8
}

impl Default for HeatConfig {
    /// 96 heating dots, 1.2ms heating time, 400us interval
    fn default() -> HeatConfig {
        HeatConfig {
            dots: 11,
            time: 120,
            interval: 40
        }
    }
}

/// Details required to drive the printer
///
/// The values are applied by [begin](crate::Printer::begin). Print and feed times vary with the supply voltage and the paper, so measuring them on the actual unit is worth it: too low and the receive buffer overflows, too high and printing gets slow.
///
/// The profile can be stored and loaded with [serde](https://docs.rs/serde).
///
/// ```rust
/// use thermal_rs::PrinterProfile;
///
/// let profile = PrinterProfile::builder()
///     .with_baud_rate(9600)
///     .with_times(28_000, 2_000)
///     .build();
/// assert_eq!(9600, profile.baud_rate());
/// ```
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct PrinterProfile {
    /// Serial speed, used to estimate the transmission time of each byte
    pub (crate) baud_rate: u32,
    /// Heating parameters sent during initialization
    pub (crate) heat_config: HeatConfig,
    /// Time to print a single dot line, in microseconds
    pub (crate) dot_print_time: u32,
    /// Time to feed a single dot line, in microseconds
    pub (crate) dot_feed_time: u32,
    /// Upper bound for the rows of a single bitmap strip
    pub (crate) max_chunk_height: u8
}

impl PrinterProfile {
    /// Creates a [PrinterProfileBuilder](crate::PrinterProfileBuilder) loaded with the factory defaults
    pub fn builder() -> PrinterProfileBuilder {
        PrinterProfileBuilder::new()
    }

    pub fn baud_rate(&self) -> u32 {
        self.baud_rate
    }

    pub fn heat_config(&self) -> HeatConfig {
        self.heat_config
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
}

impl Default for PrinterProfile {
    fn default() -> PrinterProfile {
        PrinterProfileBuilder::new().build()
    }
}

/// Helper structure to create a [PrinterProfile](crate::PrinterProfile)
pub struct PrinterProfileBuilder {
    baud_rate: u32,
    heat_config: HeatConfig,
    dot_print_time: u32,
    dot_feed_time: u32,
    max_chunk_height: u8
}

impl PrinterProfileBuilder {
    /// Creates a new builder
    ///
    /// Most of these printers are factory configured for 19200 baud. The default timings (30ms print, 2.1ms feed per dot line) come from a typical unit.
    pub fn new() -> PrinterProfileBuilder {
        PrinterProfileBuilder {
            baud_rate: 19200,
            heat_config: HeatConfig::default(),
            dot_print_time: 30_000,
            dot_feed_time: 2_100,
            max_chunk_height: 255
        }
    }

    /// Sets the serial speed. A few rare units work at 9600.
    pub fn with_baud_rate(mut self, baud_rate: u32) -> PrinterProfileBuilder {
        self.baud_rate = baud_rate;
        self
    }

    /// Sets the heating parameters sent by [begin](crate::Printer::begin)
    pub fn with_heat_config(mut self, heat_config: HeatConfig) -> PrinterProfileBuilder {
        self.heat_config = heat_config;
        self
    }

    /// Sets the print and feed time of a single dot line, in microseconds
    pub fn with_times(mut self, dot_print_time: u32, dot_feed_time: u32) -> PrinterProfileBuilder {
        self.dot_print_time = dot_print_time;
        self.dot_feed_time = dot_feed_time;
        self
    }

    /// Caps the height of bitmap strips
    pub fn with_max_chunk_height(mut self, max_chunk_height: u8) -> PrinterProfileBuilder {
        self.max_chunk_height = max_chunk_height;
        self
    }

    /// Build the `PrinterProfile` that lies beneath the builder
    pub fn build(self) -> PrinterProfile {
        PrinterProfile {
            baud_rate: self.baud_rate,
            heat_config: self.heat_config,
            dot_print_time: self.dot_print_time,
            dot_feed_time: self.dot_feed_time,
            max_chunk_height: self.max_chunk_height
        }
    }
}

impl Default for PrinterProfileBuilder {
    fn default() -> PrinterProfileBuilder {
        PrinterProfileBuilder::new()
    }
}
