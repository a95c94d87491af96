//! End-to-end register behaviour over mock peripherals.

use playreg_core::{Pins, RegisterConfig};
use playreg_hardware::Clock;
use playreg_protocol::BOOT_SEQUENCE;
use playreg_register::{MockHandles, MockPlatform, Peripherals, RegisterMode, SessionState};
use rstest::rstest;

/// Barcode guards close at 360 ms (three 120 ms commands) + 1500 ms.
const INPUT_READY_AT_MS: u64 = 1860;

fn booted() -> (RegisterMode<MockPlatform>, MockHandles) {
    let (peripherals, handles) = Peripherals::mock();
    let mut register = RegisterMode::new(peripherals, RegisterConfig::default()).unwrap();
    register.initialize(Pins::default());
    register.enter();
    (register, handles)
}

/// Booted register with the barcode guards already expired.
fn ready() -> (RegisterMode<MockPlatform>, MockHandles) {
    let (register, handles) = booted();
    handles.clock.set(INPUT_READY_AT_MS);
    (register, handles)
}

#[test]
fn test_debug_barcode_adds_resolved_item() {
    let (mut register, handles) = booted();

    handles.debug.inject_line("BC:ABC123");
    register.update();

    let expected = register.catalog().resolve("ABC123");
    assert_eq!(register.cart().len(), 1);
    assert_eq!(register.cart().items().next(), Some(&expected));
    assert!(handles.surface.texts().contains(&expected.name));
}

#[test]
fn test_debug_card_completes_payment() {
    let (mut register, handles) = booted();
    handles.debug.inject_line("BC:ABC123");
    handles.debug.inject_line("BC:XYZ789");
    register.update();
    assert_eq!(register.cart().len(), 2);

    handles.clock.set(5000);
    handles.debug.inject_line("RFID:DEADBEEF");
    register.update();

    assert_eq!(register.state(), SessionState::ThankYou);
    assert!(register.cart().is_empty());
    assert_eq!(register.cart().total(), 0);
    assert_eq!(register.thank_you_started_at_ms(), Some(5000));
    assert_eq!(
        handles.surface.texts(),
        vec!["お買いあげ".to_string(), "ありがとうございます".into()]
    );
}

#[test]
fn test_cart_keeps_newest_items() {
    let (mut register, handles) = booted();
    let codes = ["ABC123", "DEF456", "GHI789", "JKL012"];
    for code in codes {
        handles.debug.inject_line(&format!("BC:{code}"));
    }
    register.update();

    let capacity = register.config().visible_rows;
    assert_eq!(register.cart().len(), capacity);

    let kept: Vec<_> = register.cart().items().cloned().collect();
    let expected: Vec<_> = codes[codes.len() - capacity..]
        .iter()
        .map(|code| register.catalog().resolve(code))
        .collect();
    assert_eq!(kept, expected);

    let total: u64 = expected.iter().map(|item| u64::from(item.price)).sum();
    assert_eq!(register.cart().total(), total);
}

#[test]
fn test_clear_button_empties_cart() {
    let (mut register, handles) = booted();
    handles.debug.inject_line("BC:ABC123");
    register.update();
    handles.audio.clear();

    register.on_touch(230, 200);

    assert!(register.cart().is_empty());
    assert_eq!(register.cart().total(), 0);
    assert_eq!(handles.audio.frequencies(), vec![1760]);
    assert!(handles.surface.texts().contains(&"￥0".to_string()));
}

#[rstest]
#[case(229, 200)]
#[case(230, 199)]
#[case(310, 215)]
#[case(20, 20)]
fn test_touch_outside_clear_button_keeps_cart(#[case] x: i32, #[case] y: i32) {
    let (mut register, handles) = booted();
    handles.debug.inject_line("BC:ABC123");
    register.update();

    register.on_touch(x, y);
    assert_eq!(register.cart().len(), 1);
}

#[test]
fn test_thank_you_ignores_input() {
    let (mut register, handles) = ready();
    handles.debug.inject_line("RFID:DEADBEEF");
    register.update();
    assert_eq!(register.state(), SessionState::ThankYou);
    let started = register.thank_you_started_at_ms();

    handles.debug.inject_line("BC:ABC123");
    handles.barcode.inject_line("4901234567894");
    handles.debug.inject_line("RFID:CAFEBABE");
    register.update();
    register.on_touch(230, 200);

    assert!(register.cart().is_empty());
    assert_eq!(register.state(), SessionState::ThankYou);
    assert_eq!(register.thank_you_started_at_ms(), started);
}

#[test]
fn test_thank_you_expires_after_duration() {
    let (mut register, handles) = ready();
    handles.clock.set(10_000);
    handles.debug.inject_line("RFID:DEADBEEF");
    register.update();

    // The payment chime has already moved the clock past the start.
    handles.clock.set(12_999);
    register.update();
    assert_eq!(register.state(), SessionState::ThankYou);

    handles.clock.set(13_000);
    register.update();
    assert_eq!(register.state(), SessionState::Normal);
    assert_eq!(register.thank_you_started_at_ms(), None);
    assert!(handles.surface.texts().contains(&"おうちレジ".to_string()));

    handles.debug.inject_line("BC:ABC123");
    register.update();
    assert_eq!(register.cart().len(), 1);
}

#[test]
fn test_initialize_sends_boot_commands() {
    let (peripherals, handles) = Peripherals::mock();
    let mut register = RegisterMode::new(peripherals, RegisterConfig::default()).unwrap();
    register.initialize(Pins::default());

    let expected: Vec<Vec<u8>> = BOOT_SEQUENCE.iter().map(|c| c.bytes().to_vec()).collect();
    assert_eq!(handles.barcode.written(), expected);
    assert_eq!(handles.barcode.flush_count(), BOOT_SEQUENCE.len());
    // Before and after each command, then once more once the boot guard is armed.
    assert_eq!(handles.barcode.discard_count(), 2 * BOOT_SEQUENCE.len() + 1);

    assert_eq!(handles.clock.now_ms(), 360);
    assert_eq!(register.guards().input_ready_at_ms(), INPUT_READY_AT_MS);
    assert_eq!(register.guards().command_guard_until_ms(), 480);
    assert_eq!(handles.audio.volume(), Some(32));
}

#[test]
fn test_scanner_echo_is_discarded_during_boot() {
    let (peripherals, handles) = Peripherals::mock();
    handles.barcode.set_echo(Some(b"3u\r\n"));
    let mut register = RegisterMode::new(peripherals, RegisterConfig::default()).unwrap();
    register.initialize(Pins::default());
    register.enter();

    handles.clock.set(INPUT_READY_AT_MS);
    register.update();
    assert!(register.cart().is_empty());
    assert_eq!(handles.barcode.written().len(), BOOT_SEQUENCE.len());
}

#[test]
fn test_boot_guard_discards_barcode_input() {
    let (mut register, handles) = booted();

    handles.clock.set(INPUT_READY_AT_MS - 1);
    handles.barcode.inject_line("4901234567894");
    let discards = handles.barcode.discard_count();
    register.update();

    assert!(register.cart().is_empty());
    assert_eq!(handles.barcode.discard_count(), discards + 1);

    handles.clock.set(INPUT_READY_AT_MS);
    register.update();
    assert!(register.cart().is_empty(), "discarded bytes must not come back");

    handles.barcode.inject_line("4901234567894");
    register.update();
    assert_eq!(register.cart().len(), 1);
}

#[test]
fn test_barcode_frame_completed_by_idle_gap() {
    let (mut register, handles) = ready();

    handles.barcode.inject_str("4901234567894");
    register.update();
    assert!(register.cart().is_empty());

    handles.clock.advance(299);
    register.update();
    assert!(register.cart().is_empty());

    handles.clock.advance(1);
    register.update();

    let expected = register.catalog().resolve("4901234567894");
    assert_eq!(register.cart().items().next(), Some(&expected));
}

#[rstest]
#[case("3u")]
#[case("$01")]
#[case("\"ab")]
#[case("12345")]
fn test_scanner_noise_never_reaches_cart(#[case] frame: &str) {
    let (mut register, handles) = ready();
    handles.barcode.inject_line(frame);
    register.update();
    assert!(register.cart().is_empty());
}

#[test]
fn test_barcode_scanner_frames_resolve_like_debug_frames() {
    let (mut register, handles) = ready();
    handles.barcode.inject(b"  4901234567894\r\n");
    handles.debug.inject_line("BC:4901234567894");
    register.update();

    let items: Vec<_> = register.cart().items().cloned().collect();
    assert_eq!(items.len(), 2);
    assert_eq!(items[0], items[1]);
}

#[test]
fn test_card_reader_payment() {
    let (mut register, handles) = ready();
    assert!(register.is_card_reader_ready());
    assert!(handles.card_reader.is_initialized());

    handles.debug.inject_line("BC:ABC123");
    register.update();
    handles.card_reader.present_card(vec![0xDE, 0xAD, 0xBE, 0xEF]);
    register.update();

    assert_eq!(register.state(), SessionState::ThankYou);
    assert!(register.cart().is_empty());
    assert_eq!(handles.card_reader.halt_count(), 1);
    assert_eq!(handles.card_reader.stop_crypto_count(), 1);
}

#[test]
fn test_unreadable_card_is_skipped() {
    let (mut register, handles) = ready();
    handles.card_reader.present_card(vec![0x01]);
    register.update();

    assert_eq!(register.state(), SessionState::Normal);
    assert_eq!(handles.card_reader.halt_count(), 0);
}

#[test]
fn test_missing_card_reader_is_never_polled() {
    let (peripherals, handles) = Peripherals::mock_without_card_reader();
    let mut register = RegisterMode::new(peripherals, RegisterConfig::default()).unwrap();
    register.initialize(Pins::default());
    register.enter();
    assert!(!register.is_card_reader_ready());

    handles.card_reader.present_card(vec![0xDE, 0xAD, 0xBE, 0xEF]);
    register.update();
    assert_eq!(register.state(), SessionState::Normal);
    assert_eq!(handles.card_reader.halt_count(), 0);

    // The debug console still takes payments.
    handles.debug.inject_line("RFID:DEADBEEF");
    register.update();
    assert_eq!(register.state(), SessionState::ThankYou);
}

#[test]
fn test_debug_card_wins_over_same_tick_barcode() {
    let (mut register, handles) = ready();
    handles.barcode.inject_line("4901234567894");
    handles.debug.inject_line("RFID:DEADBEEF");
    register.update();

    assert_eq!(register.state(), SessionState::ThankYou);
    assert!(register.cart().is_empty());
}

#[test]
fn test_tones() {
    let (mut register, handles) = ready();

    register.play_startup_tone();
    assert_eq!(handles.audio.frequencies(), vec![1319, 1760, 2093]);
    handles.audio.clear();

    handles.debug.inject_line("BC:ABC123");
    register.update();
    assert_eq!(handles.audio.frequencies(), vec![1760]);
    handles.audio.clear();

    handles.debug.inject_line("RFID:DEADBEEF");
    register.update();
    assert_eq!(handles.audio.frequencies(), vec![1175, 1568, 2093]);
}

#[test]
fn test_enter_leaves_thank_you() {
    let (mut register, handles) = ready();
    handles.debug.inject_line("RFID:DEADBEEF");
    register.update();
    assert_eq!(register.state(), SessionState::ThankYou);

    register.enter();
    assert_eq!(register.state(), SessionState::Normal);
    assert!(handles.surface.texts().contains(&"CLEAR".to_string()));

    // No stale expiry fires later.
    handles.clock.advance(10_000);
    register.update();
    assert_eq!(register.state(), SessionState::Normal);
}

#[test]
fn test_invalid_debug_lines_ignored() {
    let (mut register, handles) = booted();
    for line in ["HELLO", "BC:", "BC:A", "RFID:", "rfid:DEADBEEF"] {
        handles.debug.inject_line(line);
    }
    register.update();

    assert!(register.cart().is_empty());
    assert_eq!(register.state(), SessionState::Normal);
}
