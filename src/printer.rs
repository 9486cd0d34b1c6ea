pub use self::firmware::Firmware;
pub use self::printer_profile::{HeatConfig, PrinterProfile, PrinterProfileBuilder};
pub use self::session::Session;

mod firmware;
mod printer_profile;
mod session;

use crate::{
    Error,
    bitmap::{self, Bitmap, ByteSource, ChunkPlan, SliceSource},
    command::{encoder, BarcodeType, Charset, CodePage, Command, Font, Justification, PrintMode, Size, CR, LF},
    flow_control::FlowControl,
    transport::{BusyLine, Clock, Transport}
};

extern crate codepage_437;
extern crate log;

use log::{debug, warn};
use codepage_437::{IntoCp437, CP437_CONTROL};

/// Grace period after power up before the printer accepts data
const BOOT_TIME: u32 = 500_000;
/// Settle time after the wake byte, on firmware that supports "sleep off"
const WAKE_TIME: u32 = 50_000;
/// Deadline after each no-op of the legacy wake sequence
const LEGACY_WAKE_STEP: u32 = 10_000;
/// Attempts to read a paper status reply, and the wait between them
const STATUS_ATTEMPTS: u8 = 10;
const STATUS_POLL_INTERVAL: u32 = 100_000;
/// Paper status bit set when the paper runs out
const NO_PAPER_MASK: u8 = 0b0000_0100;
/// Barcode type, label below the barcode, and bar width of 3 (0.375/1.0mm thin/thick)
const BARCODE_LABEL_BELOW: u8 = 2;
const BARCODE_WIDTH: u8 = 3;
/// Extra dot rows a barcode takes, on top of its height, for the label
const BARCODE_LABEL_ROWS: u32 = 40;

/// Answer of the paper sensor
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PaperStatus {
    /// Paper is loaded
    Present,
    /// The sensor reports no paper
    Out,
    /// The printer did not answer the query
    NoResponse
}

/// Main thermal-rs structure
///
/// The printer owns the byte link, the clock, and the session state. Every operation waits until the printer is expected to be ready, sends its command, and then estimates how long the printer will be busy with it.
///
/// Operations take `&mut self`: a printer has a single byte stream without any framing, so interleaving two callers would corrupt it beyond recovery.
///
/// ```rust
/// use thermal_rs::{Printer, PrinterProfile, transport::{Recorder, VirtualClock}};
///
/// let mut printer = Printer::new(Recorder::new(), VirtualClock::new(), PrinterProfile::default());
/// printer.begin(268)?;
/// printer.bold_on()?;
/// printer.println("Hello, world!")?;
/// # Ok::<(), thermal_rs::Error>(())
/// ```
pub struct Printer<T, C> {
    printer_profile: PrinterProfile,
    /// Gate to the transport
    flow: FlowControl<T, C>,
    session: Session
}

impl<T: Transport, C: Clock> Printer<T, C> {
    /// Creates a new printer
    ///
    /// Nothing is sent until [begin](Printer::begin) is called.
    pub fn new(transport: T, clock: C, printer_profile: PrinterProfile) -> Printer<T, C> {
        let flow = FlowControl::new(transport, clock, printer_profile.baud_rate);
        Printer {
            printer_profile,
            flow,
            session: Session::new(Firmware::default())
        }
    }

    /// Wires the printer's busy (DTR) line
    ///
    /// When present, [begin](Printer::begin) switches the printer to hardware handshake, and the busy line replaces the timing estimates.
    pub fn with_busy_line<B: BusyLine + 'static>(mut self, busy_line: B) -> Printer<T, C> {
        self.flow.set_busy_line(Box::new(busy_line));
        self
    }

    /// Initializes the printer
    ///
    /// Waits out the boot time, wakes the printer, resets it, and sends the heat configuration. Print and feed times from the profile are applied last, so custom timings must be set after this call.
    pub fn begin(&mut self, firmware: u16) -> Result<(), Error> {
        debug!("Initializing printer, firmware {}", firmware);
        self.session.firmware = Firmware::new(firmware);

        // The printer needs a moment to cold boot
        self.flow.set_deadline(BOOT_TIME);
        self.flow.await_deadline();

        self.wake()?;
        self.reset()?;

        let heat_config = self.printer_profile.heat_config;
        self.set_heat_config(heat_config.dots, heat_config.time, heat_config.interval)?;

        if self.flow.has_busy_line() {
            debug!("Enabling DTR handshake");
            self.command(&Command::EnableHandshake)?;
            self.flow.enable_handshake();
        }

        self.session.dot_print_time = self.printer_profile.dot_print_time;
        self.session.dot_feed_time = self.printer_profile.dot_feed_time;
        self.session.max_chunk_height = self.printer_profile.max_chunk_height;
        Ok(())
    }

    /// Resets the printer to its power-on state
    pub fn reset(&mut self) -> Result<(), Error> {
        debug!("Resetting printer");
        self.command(&Command::Init)?;
        self.session.reset_line_state();
        if self.session.firmware.tab_stops {
            self.command(&Command::SetTabStops)?;
        }
        Ok(())
    }

    /// Resets text formatting parameters
    pub fn set_default(&mut self) -> Result<(), Error> {
        self.online()?;
        self.justify(Justification::Left)?;
        self.inverse_off()?;
        self.double_height_off()?;
        self.set_line_height(30)?;
        self.bold_off()?;
        self.underline_off()?;
        self.set_barcode_height(50)?;
        self.set_size(Size::Small)?;
        self.set_charset(Charset::USA)?;
        self.set_code_page(CodePage::CP437)
    }

    /// Sends a single character
    ///
    /// Carriage returns are dropped. A newline, or a character past the last column, ends the line: the wait after it covers printing the line (or only feeding it, if it was blank).
    pub fn write(&mut self, byte: u8) -> Result<(), Error> {
        if byte == CR {
            return Ok(());
        }
        self.flow.send(byte)?;
        let mut duration = self.flow.byte_time();
        if byte == LF || self.session.column >= self.session.max_column {
            duration = duration.saturating_add(self.session.line_time());
            self.session.column = 0;
            // A wrap counts as a newline for the next character
            self.session.prev_byte = LF;
        } else {
            self.session.column += 1;
            self.session.prev_byte = byte;
        }
        self.flow.set_deadline(duration);
        Ok(())
    }

    /// Prints some text
    ///
    /// The text is encoded to CP437 (the default code page), and sent character by character through [write](Printer::write).
    pub fn print<A: AsRef<str>>(&mut self, content: A) -> Result<(), Error> {
        let feed = content.as_ref().to_string().into_cp437(&CP437_CONTROL).map_err(|_| Error::Encoding)?;
        for byte in feed.iter() {
            self.write(*byte)?;
        }
        Ok(())
    }

    /// Prints some text, with a newline at the end.
    pub fn println<A: AsRef<str>>(&mut self, content: A) -> Result<(), Error> {
        self.print(content)?;
        self.write(LF)
    }

    /// Sends raw bytes as a single command
    ///
    /// Session state is not updated, so the column tracking and timing estimates can drift if the bytes print anything.
    pub fn raw<A: AsRef<[u8]>>(&mut self, bytes: A) -> Result<(), Error> {
        encoder::write_bytes(&mut self.flow, bytes.as_ref())
    }

    /// Sends a single command
    pub fn command(&mut self, command: &Command) -> Result<(), Error> {
        encoder::write_command(&mut self.flow, command)
    }

    /// Sets the print and feed time of a single dot line, in microseconds
    ///
    /// In the default state, text is 24 dots tall with 6 dots of spacing, so a line takes roughly `24 * print + 6 * feed`.
    pub fn set_times(&mut self, dot_print_time: u32, dot_feed_time: u32) {
        self.session.dot_print_time = dot_print_time;
        self.session.dot_feed_time = dot_feed_time;
    }

    /// Caps the height of bitmap strips
    pub fn set_max_chunk_height(&mut self, max_chunk_height: u8) {
        self.session.max_chunk_height = max_chunk_height;
    }

    // Print mode -----------------------------------------------------------

    fn set_print_mode(&mut self, mask: PrintMode) -> Result<(), Error> {
        self.session.print_mode.insert(mask);
        self.write_print_mode()
    }

    fn unset_print_mode(&mut self, mask: PrintMode) -> Result<(), Error> {
        self.session.print_mode.remove(mask);
        self.write_print_mode()
    }

    fn write_print_mode(&mut self) -> Result<(), Error> {
        let mode = self.session.print_mode;
        self.command(&Command::SelectPrintMode{mode})?;
        self.session.adjust_char_values();
        Ok(())
    }

    /// Clears every print mode
    pub fn normal(&mut self) -> Result<(), Error> {
        self.session.print_mode = PrintMode::empty();
        self.write_print_mode()
    }

    pub fn bold_on(&mut self) -> Result<(), Error> {
        self.set_print_mode(PrintMode::BOLD)
    }

    pub fn bold_off(&mut self) -> Result<(), Error> {
        self.unset_print_mode(PrintMode::BOLD)
    }

    pub fn double_height_on(&mut self) -> Result<(), Error> {
        self.set_print_mode(PrintMode::DOUBLE_HEIGHT)
    }

    pub fn double_height_off(&mut self) -> Result<(), Error> {
        self.unset_print_mode(PrintMode::DOUBLE_HEIGHT)
    }

    pub fn double_width_on(&mut self) -> Result<(), Error> {
        self.set_print_mode(PrintMode::DOUBLE_WIDTH)
    }

    pub fn double_width_off(&mut self) -> Result<(), Error> {
        self.unset_print_mode(PrintMode::DOUBLE_WIDTH)
    }

    pub fn strike_on(&mut self) -> Result<(), Error> {
        self.set_print_mode(PrintMode::STRIKE)
    }

    pub fn strike_off(&mut self) -> Result<(), Error> {
        self.unset_print_mode(PrintMode::STRIKE)
    }

    /// White on black printing
    pub fn inverse_on(&mut self) -> Result<(), Error> {
        if self.session.firmware.style_commands {
            self.command(&Command::Inverse{enabled: true})
        } else {
            self.set_print_mode(PrintMode::INVERSE)
        }
    }

    pub fn inverse_off(&mut self) -> Result<(), Error> {
        if self.session.firmware.style_commands {
            self.command(&Command::Inverse{enabled: false})
        } else {
            self.unset_print_mode(PrintMode::INVERSE)
        }
    }

    pub fn upside_down_on(&mut self) -> Result<(), Error> {
        if self.session.firmware.style_commands {
            self.command(&Command::UpsideDown{enabled: true})
        } else {
            self.set_print_mode(PrintMode::UPSIDE_DOWN)
        }
    }

    pub fn upside_down_off(&mut self) -> Result<(), Error> {
        if self.session.firmware.style_commands {
            self.command(&Command::UpsideDown{enabled: false})
        } else {
            self.unset_print_mode(PrintMode::UPSIDE_DOWN)
        }
    }

    pub fn set_font(&mut self, font: Font) -> Result<(), Error> {
        match font {
            Font::FontA => self.unset_print_mode(PrintMode::FONT_B),
            Font::FontB => self.set_print_mode(PrintMode::FONT_B)
        }
    }

    pub fn set_size(&mut self, size: Size) -> Result<(), Error> {
        match size {
            Size::Small => {
                self.double_width_off()?;
                self.double_height_off()
            },
            Size::Medium => {
                self.double_height_on()?;
                self.double_width_off()
            },
            Size::Large => {
                self.double_height_on()?;
                self.double_width_on()
            }
        }
    }

    // Text formatting ------------------------------------------------------

    pub fn justify(&mut self, justification: Justification) -> Result<(), Error> {
        self.command(&Command::Justify{justification})
    }

    /// Underlines text, 1 for a normal line and 2 for a thick one. Heavier weights are reduced to 2.
    pub fn underline_on(&mut self, weight: u8) -> Result<(), Error> {
        let weight = if weight > 2 {
            warn!("Underline weight {} is out of range, using 2", weight);
            2
        } else {
            weight
        };
        self.command(&Command::Underline{weight})
    }

    pub fn underline_off(&mut self) -> Result<(), Error> {
        self.command(&Command::Underline{weight: 0})
    }

    /// Sets the full line height, in dots
    ///
    /// The printer does not account for the text height, so this works as inter-line spacing on top of the 24 dot characters. Values under 24 are raised to 24.
    pub fn set_line_height(&mut self, height: u8) -> Result<(), Error> {
        let height = height.max(24);
        self.session.line_spacing = height - 24;
        self.command(&Command::LineHeight{height})
    }

    pub fn set_char_spacing(&mut self, spacing: u8) -> Result<(), Error> {
        self.command(&Command::CharSpacing{spacing})
    }

    /// Alters some characters in the `0x23..=0x7e` range, see [Charset](crate::command::Charset). Numbers past 15 are reduced to 15.
    pub fn set_charset<A: Into<u8>>(&mut self, charset: A) -> Result<(), Error> {
        let mut charset = charset.into();
        if charset > Charset::MAX {
            warn!("Charset {} does not exist, using {}", charset, Charset::MAX);
            charset = Charset::MAX;
        }
        self.command(&Command::SelectCharset{charset})
    }

    /// Selects the symbols for `0x80..=0xff`, see [CodePage](crate::command::CodePage). Numbers past 47 are reduced to 47.
    pub fn set_code_page<A: Into<u8>>(&mut self, code_page: A) -> Result<(), Error> {
        let mut code_page = code_page.into();
        if code_page > CodePage::MAX {
            warn!("Code page {} does not exist, using {}", code_page, CodePage::MAX);
            code_page = CodePage::MAX;
        }
        self.command(&Command::SelectCodePage{code_page})
    }

    /// Moves to the next tab stop, every 4 columns
    pub fn tab(&mut self) -> Result<(), Error> {
        self.command(&Command::Tab)?;
        self.session.column = (self.session.column.wrapping_add(4)) & 0b1111_1100;
        Ok(())
    }

    // Paper movement -------------------------------------------------------

    /// Feeds by the specified number of text lines
    ///
    /// Old firmware has no counted feed, so newlines are written one by one instead.
    pub fn feed(&mut self, lines: u8) -> Result<(), Error> {
        if self.session.firmware.counted_feed {
            self.command(&Command::FeedLines{lines})?;
            self.flow.set_deadline(self.session.dot_feed_time.saturating_mul(self.session.char_height as u32));
            self.session.prev_byte = LF;
            self.session.column = 0;
        } else {
            for _ in 0..lines {
                self.write(LF)?;
            }
        }
        Ok(())
    }

    /// Feeds by the specified number of dot rows
    pub fn feed_rows(&mut self, rows: u8) -> Result<(), Error> {
        self.command(&Command::FeedRows{rows})?;
        self.flow.set_deadline((rows as u32).saturating_mul(self.session.dot_feed_time));
        self.session.prev_byte = LF;
        self.session.column = 0;
        Ok(())
    }

    /// Sends a form feed
    pub fn flush(&mut self) -> Result<(), Error> {
        self.command(&Command::FormFeed)
    }

    // Configuration --------------------------------------------------------

    /// Thermal head drive parameters
    ///
    /// * `dots`: max heating dots fired at once, in units of 8 dots (minus 1). More dots print faster but draw more peak current.
    /// * `time`: heating time, in units of 10us, at least 3. Longer is darker and slower.
    /// * `interval`: recovery time between dot groups, in units of 10us. Longer is clearer and slower.
    pub fn set_heat_config(&mut self, dots: u8, time: u8, interval: u8) -> Result<(), Error> {
        let time = time.max(3);
        self.command(&Command::HeatConfig{dots, time, interval})
    }

    /// Print density (50% + 5% per step, 0 to 31) and break time (250us per step, 0 to 7)
    ///
    /// Out of range values are clamped. The two are packed as `(density << 5) | break_time` and truncated to a byte, which is what the printer expects on the wire.
    pub fn set_print_density(&mut self, density: u8, break_time: u8) -> Result<(), Error> {
        self.command(&Command::PrintDensity {
            density: density.min(31),
            break_time: break_time.min(7)
        })
    }

    // Barcodes -------------------------------------------------------------

    /// Barcode height in dots, at least 1. Defaults to 50.
    pub fn set_barcode_height(&mut self, height: u8) -> Result<(), Error> {
        let height = height.max(1);
        self.session.barcode_height = height;
        self.command(&Command::BarcodeHeight{height})
    }

    /// Prints a barcode with its label below
    ///
    /// Content longer than 255 bytes is truncated. On old firmware the data is NUL terminated, so it ends at the first NUL.
    pub fn print_barcode<A: AsRef<[u8]>>(&mut self, content: A, barcode_type: BarcodeType) -> Result<(), Error> {
        // The printer can't print a barcode without a feed first
        self.feed(1)?;
        let prefixed = self.session.firmware.prefixed_barcodes;
        let code = if prefixed {
            barcode_type.as_prefixed_byte()
        } else {
            barcode_type.as_byte()
        };
        self.command(&Command::BarcodeLabel{position: BARCODE_LABEL_BELOW})?;
        self.command(&Command::BarcodeWidth{width: BARCODE_WIDTH})?;
        self.command(&Command::BarcodeType{code})?;

        let content = content.as_ref();
        let data = if prefixed {
            let content = &content[..content.len().min(255)];
            let mut data = Vec::with_capacity(content.len() + 1);
            data.push(content.len() as u8);
            data.extend_from_slice(content);
            data
        } else {
            let mut data: Vec<u8> = content.iter().copied().take_while(|byte| *byte != 0).collect();
            data.push(0);
            data
        };
        self.raw(&data)?;

        let rows = (self.session.barcode_height as u32) + BARCODE_LABEL_ROWS;
        self.flow.set_deadline(rows.saturating_mul(self.session.dot_print_time));
        self.session.prev_byte = LF;
        Ok(())
    }

    // Bitmaps --------------------------------------------------------------

    /// Prints a packed raster image from memory
    ///
    /// `data` holds `ceil(width / 8)` bytes per row. Pixels past the 384 dot head are dropped.
    pub fn print_bitmap(&mut self, width: u16, height: u16, data: &[u8]) -> Result<(), Error> {
        let plan = self.chunk_plan(width, height);
        if data.len() < plan.source_len() {
            return Err(Error::BitmapSize{expected: plan.source_len(), found: data.len()});
        }
        self.print_planned(&plan, &mut SliceSource::new(data))
    }

    /// Prints a raster image read from a byte source as it arrives
    pub fn print_bitmap_from_source<S: ByteSource + ?Sized>(&mut self, width: u16, height: u16, source: &mut S) -> Result<(), Error> {
        let plan = self.chunk_plan(width, height);
        self.print_planned(&plan, source)
    }

    /// Prints a raster image from a stream that starts with its width and height, both little endian `u16`
    pub fn print_bitmap_with_header<S: ByteSource + ?Sized>(&mut self, source: &mut S) -> Result<(), Error> {
        let width = source.next_u16_le()?;
        let height = source.next_u16_le()?;
        self.print_bitmap_from_source(width, height, source)
    }

    /// Prints a [Bitmap](crate::Bitmap)
    pub fn print_image(&mut self, image: &Bitmap) -> Result<(), Error> {
        self.print_bitmap(image.width(), image.height(), image.data())
    }

    fn chunk_plan(&self, width: u16, height: u16) -> ChunkPlan {
        ChunkPlan::new(width, height, self.session.max_chunk_height, self.flow.handshake())
    }

    fn print_planned<S: ByteSource + ?Sized>(&mut self, plan: &ChunkPlan, source: &mut S) -> Result<(), Error> {
        debug!("Printing bitmap, {} bytes per row in strips of {}", plan.row_bytes_clipped(), plan.chunk_height_limit());
        bitmap::print_chunked(&mut self.flow, plan, self.session.dot_print_time, source)?;
        self.session.prev_byte = LF;
        Ok(())
    }

    // Power and status -----------------------------------------------------

    /// Takes the printer offline. Print commands are ignored until [online](Printer::online).
    pub fn offline(&mut self) -> Result<(), Error> {
        self.command(&Command::Online{online: false})?;
        self.session.online = false;
        Ok(())
    }

    pub fn online(&mut self) -> Result<(), Error> {
        self.command(&Command::Online{online: true})?;
        self.session.online = true;
        Ok(())
    }

    /// Puts the printer into a low-energy state immediately
    pub fn sleep(&mut self) -> Result<(), Error> {
        // Zero would mean "don't sleep"
        self.sleep_after(1)
    }

    /// Puts the printer into a low-energy state after the given number of seconds
    ///
    /// Old firmware takes a single byte, so the time is capped at 255 seconds there.
    pub fn sleep_after(&mut self, seconds: u16) -> Result<(), Error> {
        debug!("Sleeping after {} seconds", seconds);
        if self.session.firmware.long_sleep_timer {
            self.command(&Command::SleepAfter{seconds})?;
        } else {
            self.command(&Command::SleepAfterShort{seconds: seconds.min(255) as u8})?;
        }
        self.session.asleep = true;
        Ok(())
    }

    /// Wakes the printer from a low-energy state
    pub fn wake(&mut self) -> Result<(), Error> {
        debug!("Waking printer");
        // A deadline left over from before sleep may look like the future once the clock wrapped
        self.flow.set_deadline(0);
        self.command(&Command::Wake)?;
        if self.session.firmware.wake_sleep_off {
            self.flow.pause(WAKE_TIME);
            // Sleep off, or the printer dozes off again
            self.command(&Command::SleepAfter{seconds: 0})?;
        } else {
            // 50ms alone is not enough, style commands can still be misread right after wake. No-ops spaced out help.
            for _ in 0..10 {
                self.command(&Command::Nul)?;
                self.flow.set_deadline(LEGACY_WAKE_STEP);
            }
        }
        self.session.asleep = false;
        Ok(())
    }

    /// Asks the paper sensor, waiting up to a second for the answer
    ///
    /// The status bit is not confirmed for every firmware family, and some printers never answer at all.
    pub fn paper_status(&mut self) -> Result<PaperStatus, Error> {
        if self.session.firmware.paper_status_query {
            self.command(&Command::PaperStatus)?;
        } else {
            self.command(&Command::PaperStatusShort)?;
        }

        for _ in 0..STATUS_ATTEMPTS {
            if let Some(status) = self.flow.try_receive()? {
                return Ok(if status & NO_PAPER_MASK == 0 {
                    PaperStatus::Present
                } else {
                    PaperStatus::Out
                });
            }
            self.flow.pause(STATUS_POLL_INTERVAL);
        }
        warn!("No answer to the paper status query");
        Ok(PaperStatus::NoResponse)
    }

    /// Returns `true` if the printer reports paper. A printer that does not answer counts as out of paper.
    pub fn has_paper(&mut self) -> Result<bool, Error> {
        Ok(self.paper_status()? == PaperStatus::Present)
    }

    // Self test ------------------------------------------------------------

    /// Prints a short greeting
    pub fn test(&mut self) -> Result<(), Error> {
        self.println("Hello World!")?;
        self.feed(2)
    }

    /// Prints the printer's built-in test page
    pub fn test_page(&mut self) -> Result<(), Error> {
        self.command(&Command::TestPage)?;
        // 26 lines of 24 dot text with 6 dots of spacing, plus a blank line
        let print = self.session.dot_print_time.saturating_mul(24 * 26);
        let feed = self.session.dot_feed_time.saturating_mul(6 * 26 + 30);
        self.flow.set_deadline(print.saturating_add(feed));
        Ok(())
    }

    // Accessors ------------------------------------------------------------

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn printer_profile(&self) -> &PrinterProfile {
        &self.printer_profile
    }

    pub fn flow(&self) -> &FlowControl<T, C> {
        &self.flow
    }

    pub fn flow_mut(&mut self) -> &mut FlowControl<T, C> {
        &mut self.flow
    }

    pub fn transport(&self) -> &T {
        self.flow.transport()
    }

    pub fn transport_mut(&mut self) -> &mut T {
        self.flow.transport_mut()
    }

    /// Gives back the transport and the clock
    pub fn into_parts(self) -> (T, C) {
        self.flow.into_parts()
    }
}

#[cfg(test)]
mod tests;
