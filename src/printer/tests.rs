use super::*;
use crate::{
    bitmap::{ByteSource, StreamSource},
    command::{DC2, ESC, GS},
    transport::{Recorder, VirtualClock}
};
use pretty_assertions::assert_eq;
use std::{cell::Cell, rc::Rc};

const BYTE: u32 = 573;

fn begun(firmware: u16) -> Printer<Recorder, VirtualClock> {
    let mut printer = Printer::new(Recorder::new(), VirtualClock::new(), PrinterProfile::default());
    printer.begin(firmware).unwrap();
    printer.transport_mut().take();
    printer
}

fn sent(printer: &mut Printer<Recorder, VirtualClock>) -> Vec<u8> {
    printer.transport_mut().take()
}

#[test]
fn test_begin_on_recent_firmware() {
    let mut printer = Printer::new(Recorder::new(), VirtualClock::new(), PrinterProfile::default());
    printer.begin(268).unwrap();
    assert_eq!(
        vec![
            0xff, ESC, b'8', 0, 0,
            ESC, b'@',
            ESC, b'D', 4, 8, 12, 16, 20, 24, 28, 0,
            ESC, b'7', 11, 120, 40
        ],
        sent(&mut printer)
    );
    // Boot grace plus the wake pause
    assert!(printer.flow().clock().now_micros() >= 550_000);
    assert!(!printer.flow().handshake());
    assert_eq!(30_000, printer.session().dot_print_time());
    assert_eq!(2_100, printer.session().dot_feed_time());
    assert_eq!(255, printer.session().max_chunk_height());
}

#[test]
fn test_begin_on_legacy_firmware() {
    let mut printer = Printer::new(Recorder::new(), VirtualClock::new(), PrinterProfile::default());
    printer.begin(263).unwrap();
    let mut expected = vec![0xff];
    expected.extend_from_slice(&[0; 10]);
    expected.extend_from_slice(&[ESC, b'@', ESC, b'7', 11, 120, 40]);
    assert_eq!(expected, sent(&mut printer));
}

#[test]
fn test_begin_applies_profile() {
    let profile = PrinterProfile::builder()
        .with_baud_rate(9600)
        .with_heat_config(HeatConfig{dots: 7, time: 80, interval: 2})
        .with_times(20_000, 1_500)
        .with_max_chunk_height(24)
        .build();
    let mut printer = Printer::new(Recorder::new(), VirtualClock::new(), profile);
    printer.begin(268).unwrap();
    assert!(sent(&mut printer).ends_with(&[ESC, b'7', 7, 80, 2]));
    assert_eq!(1146, printer.flow().byte_time());
    assert_eq!(20_000, printer.session().dot_print_time());
    assert_eq!(1_500, printer.session().dot_feed_time());
    assert_eq!(24, printer.session().max_chunk_height());
}

#[test]
fn test_begin_enables_handshake() {
    let mut printer = Printer::new(Recorder::new(), VirtualClock::new(), PrinterProfile::default())
        .with_busy_line(|| false);
    printer.begin(268).unwrap();
    assert!(sent(&mut printer).ends_with(&[GS, b'a', 0x20]));
    assert!(printer.flow().handshake());
}

#[test]
fn test_write_advances_column_without_feed_time() {
    let mut printer = begun(268);
    for expected in 1..32u8 {
        printer.write(b'a').unwrap();
        assert_eq!(expected, printer.session().column());
        assert_eq!(BYTE, printer.flow().remaining());
    }
    assert_eq!(vec![b'a'; 31], sent(&mut printer));
}

#[test]
fn test_newline_time_depends_on_previous_line() {
    let mut printer = begun(268);
    printer.write(b'a').unwrap();
    printer.write(b'\n').unwrap();
    // Text line: print the characters, feed the spacing
    assert_eq!(BYTE + 24 * 30_000 + 6 * 2_100, printer.flow().remaining());
    assert_eq!(0, printer.session().column());

    printer.write(b'\n').unwrap();
    // Blank line: feed only
    assert_eq!(BYTE + 30 * 2_100, printer.flow().remaining());
}

#[test]
fn test_wrap_at_max_column() {
    let mut printer = begun(268);
    for _ in 0..32 {
        printer.write(b'x').unwrap();
    }
    assert_eq!(32, printer.session().column());
    printer.write(b'y').unwrap();
    assert_eq!(0, printer.session().column());
    assert_eq!(LF, printer.session().prev_byte());
    assert_eq!(BYTE + 24 * 30_000 + 6 * 2_100, printer.flow().remaining());
}

#[test]
fn test_carriage_return_is_dropped() {
    let mut printer = begun(268);
    printer.write(b'a').unwrap();
    printer.write(b'\r').unwrap();
    assert_eq!(vec![b'a'], sent(&mut printer));
    assert_eq!(1, printer.session().column());
}

#[test]
fn test_println_encodes_cp437() {
    let mut printer = begun(268);
    printer.println("Año").unwrap();
    assert_eq!(vec![b'A', 0xa4, b'o', LF], sent(&mut printer));
    assert!(matches!(printer.print("日本"), Err(Error::Encoding)));
}

#[test]
fn test_feed_is_a_single_command() {
    let mut printer = begun(264);
    printer.write(b'a').unwrap();
    printer.feed(3).unwrap();
    assert_eq!(vec![b'a', ESC, b'd', 3], sent(&mut printer));
    assert_eq!(24 * 2_100, printer.flow().remaining());
    assert_eq!(0, printer.session().column());
    assert_eq!(LF, printer.session().prev_byte());
}

#[test]
fn test_feed_on_legacy_firmware_writes_newlines() {
    let mut printer = begun(263);
    printer.feed(3).unwrap();
    assert_eq!(vec![LF, LF, LF], sent(&mut printer));
}

#[test]
fn test_feed_rows() {
    let mut printer = begun(268);
    printer.feed_rows(10).unwrap();
    assert_eq!(vec![ESC, b'J', 10], sent(&mut printer));
    assert_eq!(10 * 2_100, printer.flow().remaining());
}

#[test]
fn test_mode_toggle_round_trip() {
    let mut printer = begun(268);
    printer.strike_on().unwrap();
    let before = printer.session().print_mode();
    printer.bold_on().unwrap();
    assert!(printer.session().print_mode().contains(PrintMode::BOLD));
    printer.bold_off().unwrap();
    assert_eq!(before, printer.session().print_mode());
    assert_eq!(vec![ESC, b'!', 0x40, ESC, b'!', 0x48, ESC, b'!', 0x40], sent(&mut printer));
}

#[test]
fn test_size_changes_geometry() {
    let mut printer = begun(268);
    printer.set_size(Size::Large).unwrap();
    assert_eq!(vec![ESC, b'!', 0x10, ESC, b'!', 0x30], sent(&mut printer));
    assert_eq!(48, printer.session().char_height());
    assert_eq!(16, printer.session().max_column());

    printer.set_size(Size::Medium).unwrap();
    assert_eq!((48, 32), (printer.session().char_height(), printer.session().max_column()));

    printer.set_font(Font::FontB).unwrap();
    printer.set_size(Size::Small).unwrap();
    assert_eq!((17, 42), (printer.session().char_height(), printer.session().max_column()));
}

#[test]
fn test_normal_clears_modes() {
    let mut printer = begun(268);
    printer.double_width_on().unwrap();
    printer.normal().unwrap();
    assert_eq!(PrintMode::empty(), printer.session().print_mode());
    assert_eq!(32, printer.session().max_column());
}

#[test]
fn test_inverse_and_upside_down_by_firmware() {
    let mut printer = begun(268);
    printer.inverse_on().unwrap();
    printer.upside_down_on().unwrap();
    assert_eq!(vec![GS, b'B', 1, ESC, b'{', 1], sent(&mut printer));
    assert_eq!(PrintMode::empty(), printer.session().print_mode());

    let mut printer = begun(267);
    printer.inverse_on().unwrap();
    printer.upside_down_on().unwrap();
    printer.inverse_off().unwrap();
    assert_eq!(vec![ESC, b'!', 0x02, ESC, b'!', 0x06, ESC, b'!', 0x04], sent(&mut printer));
    assert_eq!(PrintMode::UPSIDE_DOWN, printer.session().print_mode());
}

#[test]
fn test_line_height_minimum() {
    let mut printer = begun(268);
    printer.set_line_height(10).unwrap();
    assert_eq!(vec![ESC, b'3', 24], sent(&mut printer));
    assert_eq!(0, printer.session().line_spacing());

    printer.set_line_height(40).unwrap();
    assert_eq!(16, printer.session().line_spacing());
}

#[test]
fn test_print_density() {
    let mut printer = begun(268);
    printer.set_print_density(20, 3).unwrap();
    printer.set_print_density(99, 99).unwrap();
    // 31 << 5 | 7 truncated
    assert_eq!(vec![DC2, b'#', 0x83, DC2, b'#', 0xe7], sent(&mut printer));
}

#[test]
fn test_out_of_range_input_is_clamped() {
    let mut printer = begun(268);
    printer.underline_on(5).unwrap();
    printer.set_charset(20u8).unwrap();
    printer.set_code_page(60u8).unwrap();
    printer.set_heat_config(11, 0, 40).unwrap();
    assert_eq!(
        vec![ESC, b'-', 2, ESC, b'R', 15, ESC, b't', 47, ESC, b'7', 11, 3, 40],
        sent(&mut printer)
    );
}

#[test]
fn test_charset_and_code_page_enums() {
    let mut printer = begun(268);
    printer.set_charset(Charset::Japan).unwrap();
    printer.set_code_page(CodePage::WCP1252).unwrap();
    assert_eq!(vec![ESC, b'R', 8, ESC, b't', 16], sent(&mut printer));
}

#[test]
fn test_tab_moves_to_next_stop() {
    let mut printer = begun(268);
    printer.tab().unwrap();
    assert_eq!(4, printer.session().column());
    for _ in 0..3 {
        printer.write(b'a').unwrap();
    }
    printer.tab().unwrap();
    assert_eq!(8, printer.session().column());
    assert_eq!(vec![b'\t', b'a', b'a', b'a', b'\t'], sent(&mut printer));
}

#[test]
fn test_sleep_timer_by_firmware() {
    let mut printer = begun(264);
    printer.sleep_after(300).unwrap();
    assert_eq!(vec![ESC, b'8', 0x2c, 0x01], sent(&mut printer));
    assert!(printer.session().is_asleep());
    printer.wake().unwrap();
    assert!(!printer.session().is_asleep());

    let mut printer = begun(263);
    printer.sleep_after(300).unwrap();
    printer.sleep().unwrap();
    assert_eq!(vec![ESC, b'8', 255, ESC, b'8', 1], sent(&mut printer));
}

#[test]
fn test_legacy_wake_spaces_out_no_ops() {
    let mut printer = Printer::new(Recorder::new(), VirtualClock::new().with_step(1), PrinterProfile::default());
    printer.begin(263).unwrap();
    printer.sleep().unwrap();
    sent(&mut printer);
    let start = printer.flow().clock().now_micros();
    printer.wake().unwrap();
    let mut expected = vec![0xff];
    expected.extend_from_slice(&[0; 10]);
    assert_eq!(expected, sent(&mut printer));
    // The first no-op waits for the wake byte, the other nine for 10ms each
    let elapsed = printer.flow().clock().now_micros() - start;
    assert_eq!(BYTE + 9 * 10_000, elapsed);
    assert_eq!(10_000, printer.flow().remaining());
    assert!(!printer.session().is_asleep());
}

#[test]
fn test_online_offline() {
    let mut printer = begun(268);
    printer.offline().unwrap();
    assert!(!printer.session().is_online());
    printer.online().unwrap();
    assert!(printer.session().is_online());
    assert_eq!(vec![ESC, b'=', 0, ESC, b'=', 1], sent(&mut printer));
}

#[test]
fn test_paper_status() {
    let mut printer = begun(268);
    printer.transport_mut().queue_reply(0x00);
    assert_eq!(PaperStatus::Present, printer.paper_status().unwrap());
    assert_eq!(vec![ESC, b'v', 0], sent(&mut printer));

    printer.transport_mut().queue_reply(0x04);
    assert!(!printer.has_paper().unwrap());

    let mut printer = begun(263);
    printer.transport_mut().queue_reply(0x20);
    assert!(printer.has_paper().unwrap());
    assert_eq!(vec![GS, b'r', 0], sent(&mut printer));
}

#[test]
fn test_paper_status_without_reply() {
    let mut printer = begun(268);
    let start = printer.flow().clock().now_micros();
    assert_eq!(PaperStatus::NoResponse, printer.paper_status().unwrap());
    assert!(printer.flow().clock().now_micros() - start >= 10 * 100_000);
    assert!(!printer.has_paper().unwrap());
}

#[test]
fn test_barcode_on_recent_firmware() {
    let mut printer = begun(268);
    printer.print_barcode("12345", BarcodeType::Code128).unwrap();
    assert_eq!(
        vec![
            ESC, b'd', 1,
            GS, b'H', 2,
            GS, b'w', 3,
            GS, b'k', 73,
            5, b'1', b'2', b'3', b'4', b'5'
        ],
        sent(&mut printer)
    );
    assert_eq!((50 + 40) * 30_000, printer.flow().remaining());
    assert_eq!(LF, printer.session().prev_byte());
}

#[test]
fn test_barcode_on_legacy_firmware() {
    let mut printer = begun(263);
    printer.set_barcode_height(0).unwrap();
    assert_eq!(1, printer.session().barcode_height());
    printer.print_barcode("12\u{0}34", BarcodeType::Ean8).unwrap();
    assert_eq!(
        vec![
            GS, b'h', 1,
            LF,
            GS, b'H', 2,
            GS, b'w', 3,
            GS, b'k', 3,
            b'1', b'2', 0
        ],
        sent(&mut printer)
    );
}

#[test]
fn test_bitmap_from_buffer() {
    let mut printer = begun(268);
    printer.write(b'a').unwrap();
    sent(&mut printer);
    // 16 pixels wide, 2 bytes per row, 128 rows per strip
    let data = vec![0xaa; 2 * 130];
    printer.print_bitmap(16, 130, &data).unwrap();
    let bytes = sent(&mut printer);
    assert_eq!(4 + 256 + 4 + 4, bytes.len());
    assert_eq!(&[DC2, b'*', 128, 2], &bytes[0..4]);
    assert_eq!(&[DC2, b'*', 2, 2], &bytes[260..264]);
    assert_eq!(2 * 30_000, printer.flow().remaining());
    assert_eq!(LF, printer.session().prev_byte());
}

#[test]
fn test_bitmap_buffer_too_short() {
    let mut printer = begun(268);
    match printer.print_bitmap(400, 10, &[0; 499]) {
        Err(Error::BitmapSize{expected, found}) => assert_eq!((500, 499), (expected, found)),
        other => panic!("unexpected result {:?}", other)
    }
    assert!(sent(&mut printer).is_empty());
}

#[test]
fn test_bitmap_respects_max_chunk_height() {
    let mut printer = begun(268);
    printer.set_max_chunk_height(3);
    printer.print_bitmap(8, 7, &[0xff; 7]).unwrap();
    let bytes = sent(&mut printer);
    assert_eq!(&[DC2, b'*', 3, 1], &bytes[0..4]);
    assert_eq!(&[DC2, b'*', 3, 1], &bytes[7..11]);
    assert_eq!(&[DC2, b'*', 1, 1], &bytes[14..18]);
}

#[test]
fn test_bitmap_stream_with_header() {
    let mut printer = begun(268);
    // 400 x 2, 50 bytes per row of which 48 are printed
    let mut stream = vec![0x90, 0x01, 0x02, 0x00];
    for row in 1..=2u8 {
        stream.extend(std::iter::repeat(row).take(48));
        stream.extend_from_slice(&[0xee, 0xee]);
    }
    let mut source = StreamSource::new(&stream[..]);
    printer.print_bitmap_with_header(&mut source).unwrap();
    let bytes = sent(&mut printer);
    assert_eq!(&[DC2, b'*', 2, 48], &bytes[0..4]);
    assert_eq!(vec![1; 48], bytes[4..52].to_vec());
    assert_eq!(vec![2; 48], bytes[52..100].to_vec());
    assert_eq!(100, bytes.len());
}

#[test]
fn test_widest_stream_header() {
    let mut printer = begun(268);
    // 65535 x 1, 8192 bytes per row of which 48 are printed
    let mut stream = vec![0xff, 0xff, 0x01, 0x00];
    stream.extend(std::iter::repeat(0x11).take(48));
    stream.extend(std::iter::repeat(0xee).take(8144));
    let mut source = StreamSource::new(&stream[..]);
    printer.print_bitmap_with_header(&mut source).unwrap();
    let bytes = sent(&mut printer);
    assert_eq!(&[DC2, b'*', 1, 48], &bytes[0..4]);
    assert_eq!(vec![0x11; 48], bytes[4..].to_vec());
    // The whole row was consumed
    assert!(matches!(source.next_byte(), Err(Error::StreamEnded)));
}

#[test]
fn test_truncated_stream_fails() {
    let mut printer = begun(268);
    let mut source = StreamSource::new(&[0xffu8; 10][..]);
    assert!(matches!(printer.print_bitmap_from_source(8, 20, &mut source), Err(Error::StreamEnded)));
}

#[test]
fn test_bitmap_in_handshake_mode() {
    let polls = Rc::new(Cell::new(0u32));
    let counter = polls.clone();
    let mut printer = Printer::new(Recorder::new(), VirtualClock::new(), PrinterProfile::default())
        .with_busy_line(move || {
            counter.set(counter.get() + 1);
            false
        });
    printer.begin(268).unwrap();
    sent(&mut printer);
    let before = polls.get();
    printer.print_bitmap(384, 300, &vec![0; 48 * 300]).unwrap();
    let bytes = sent(&mut printer);
    // One strip of 255 rows, then the remaining 45
    assert_eq!(&[DC2, b'*', 255, 48], &bytes[0..4]);
    let second = 4 + 255 * 48;
    assert_eq!(&[DC2, b'*', 45, 48], &bytes[second..second + 4]);
    // Every byte polled the busy line
    assert_eq!(bytes.len() as u32, polls.get() - before);
}

#[test]
fn test_print_image() {
    let mut printer = begun(268);
    let image = Bitmap::new(8, 2, vec![0x0f, 0xf0]).unwrap();
    printer.print_image(&image).unwrap();
    assert_eq!(vec![DC2, b'*', 2, 1, 0x0f, 0xf0], sent(&mut printer));
}

#[test]
fn test_set_default() {
    let mut printer = begun(268);
    printer.set_size(Size::Large).unwrap();
    printer.set_line_height(50).unwrap();
    printer.offline().unwrap();
    sent(&mut printer);
    printer.set_default().unwrap();
    let session = printer.session();
    assert!(session.is_online());
    assert_eq!(PrintMode::empty(), session.print_mode());
    assert_eq!(6, session.line_spacing());
    assert_eq!(50, session.barcode_height());
    assert_eq!((24, 32), (session.char_height(), session.max_column()));
    assert!(sent(&mut printer).ends_with(&[ESC, b'R', 0, ESC, b't', 0]));
}

#[test]
fn test_test_page_deadline() {
    let mut printer = begun(268);
    printer.test_page().unwrap();
    assert_eq!(vec![DC2, b'T'], sent(&mut printer));
    assert_eq!(30_000 * 24 * 26 + 2_100 * (6 * 26 + 30), printer.flow().remaining());
}

#[test]
fn test_custom_times_after_begin() {
    let mut printer = begun(268);
    printer.set_times(10_000, 1_000);
    printer.write(b'a').unwrap();
    printer.write(LF).unwrap();
    assert_eq!(BYTE + 24 * 10_000 + 6 * 1_000, printer.flow().remaining());
}
