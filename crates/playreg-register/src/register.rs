//! The register mode: input arbitration and session handling.
//!
//! Each call to [`RegisterMode::update`] polls, in this fixed order:
//!
//! 1. the debug console (`BC:` / `RFID:` lines)
//! 2. the barcode scanner, unless a guard window is open
//! 3. the card reader
//! 4. the thank-you expiry
//!
//! so a card UID injected on the console takes effect before a barcode
//! frame read in the same tick.
//!
//! Nothing here returns an error once the mode is built. Peripheral
//! failures are logged and the tick carries on.

use playreg_core::constants::{RFID_I2C_ADDRESS, RFID_RESET_DUMMY_PIN, SPEAKER_VOLUME};
use playreg_core::{
    PAYMENT_TONE_STEPS, Pins, RegisterConfig, Result, SCAN_TONE_STEPS, STARTUP_TONE_STEPS,
    ToneStep,
};
use playreg_hardware::{AudioSink, ByteStream, CardReader, Clock, play_tone_steps};
use playreg_protocol::{
    BOOT_SEQUENCE, CodeNormalizer, ControlFilter, DebugCommand, FrameReader, ScannerCommand,
};

use crate::cart::Cart;
use crate::catalog::Catalog;
use crate::display::ScreenRenderer;
use crate::guards::TimingGuards;
use crate::platform::{Peripherals, Platform};
use crate::state_machine::{SessionMachine, SessionState};

/// Play register mode.
///
/// # Examples
///
/// ```
/// use playreg_core::{Pins, RegisterConfig};
/// use playreg_register::{Peripherals, RegisterMode, SessionState};
///
/// let (peripherals, handles) = Peripherals::mock();
/// let mut register = RegisterMode::new(peripherals, RegisterConfig::default()).unwrap();
/// register.initialize(Pins::default());
/// register.enter();
///
/// handles.debug.inject_line("BC:ABC123");
/// register.update();
/// assert_eq!(register.cart().len(), 1);
///
/// handles.debug.inject_line("RFID:DEADBEEF");
/// register.update();
/// assert_eq!(register.state(), SessionState::ThankYou);
/// assert!(register.cart().is_empty());
/// ```
pub struct RegisterMode<P: Platform> {
    peripherals: Peripherals<P>,
    config: RegisterConfig,

    catalog: Catalog,
    cart: Cart,
    session: SessionMachine,
    renderer: ScreenRenderer,

    filter: ControlFilter,
    normalizer: CodeNormalizer,
    debug_reader: FrameReader,
    barcode_reader: FrameReader,
    guards: TimingGuards,

    card_reader_ready: bool,
}

impl<P: Platform> RegisterMode<P> {
    /// Build the mode around its peripherals.
    ///
    /// # Errors
    ///
    /// Returns an error if `config` fails validation or describes an
    /// unusable price ladder.
    pub fn new(peripherals: Peripherals<P>, config: RegisterConfig) -> Result<Self> {
        config.validate()?;
        let catalog = Catalog::new(&config)?;
        let now = peripherals.clock.now_ms();

        Ok(Self {
            catalog,
            cart: Cart::new(config.visible_rows),
            session: SessionMachine::new(now),
            renderer: ScreenRenderer::new(config.visible_rows),
            filter: ControlFilter::from_config(&config),
            normalizer: CodeNormalizer::from_config(&config),
            debug_reader: FrameReader::new(config.debug_frame_gap_ms, config.frame_buffer_max_length),
            barcode_reader: FrameReader::new(
                config.barcode_frame_gap_ms,
                config.frame_buffer_max_length,
            ),
            guards: TimingGuards::new(),
            card_reader_ready: false,
            peripherals,
            config,
        })
    }

    /// Bring up the scanner and card reader.
    ///
    /// Blocks for one command guard interval per scanner command.
    pub fn initialize(&mut self, pins: Pins) {
        tracing::info!(
            rx_pin = pins.barcode_rxd_pin,
            tx_pin = pins.barcode_txd_pin,
            baud = self.config.barcode_baud_rate,
            "Barcode serial begin"
        );

        for command in BOOT_SEQUENCE {
            self.send_barcode_command(command);
        }

        let now = self.now();
        self.guards.arm_boot(now, self.config.boot_stabilize_ms);
        self.clear_barcode_input();

        self.card_reader_ready = self.init_card_reader();

        self.peripherals.audio.set_volume(SPEAKER_VOLUME);

        tracing::info!(
            rx_pin = pins.barcode_rxd_pin,
            tx_pin = pins.barcode_txd_pin,
            baud = self.config.barcode_baud_rate,
            trigger = "unit button",
            "Barcode scanner configured"
        );
        tracing::info!(
            sda_pin = pins.rfid_sda_pin,
            scl_pin = pins.rfid_scl_pin,
            reset_pin = RFID_RESET_DUMMY_PIN,
            ready = self.card_reader_ready,
            "Card reader wiring"
        );
    }

    /// Activate the mode: back to `Normal` and redraw.
    pub fn enter(&mut self) {
        let now = self.now();
        let transition = self.session.reset(now);
        if transition.from != SessionState::Normal {
            tracing::debug!(from = %transition.from, "Session reset on enter");
        }
        self.render_normal_screen();
    }

    /// Handle a tap at `(x, y)`. Only the CLEAR button reacts.
    pub fn on_touch(&mut self, x: i32, y: i32) {
        if !self.session.current_state().accepts_input() {
            return;
        }

        let hit = self.renderer.clear_button_hit_rect(&self.peripherals.surface);
        if !hit.contains(x, y) {
            return;
        }

        tracing::info!(items = self.cart.len(), "Cart cleared");
        self.play_tone(SCAN_TONE_STEPS);
        self.clear_cart();
    }

    /// One tick of the cooperative loop.
    pub fn update(&mut self) {
        self.poll_debug();
        self.poll_barcode();
        self.poll_card_reader();
        self.update_thank_you();
    }

    /// Chime played when the dispatcher selects this mode.
    pub fn play_startup_tone(&mut self) {
        self.play_tone(STARTUP_TONE_STEPS);
    }

    pub fn state(&self) -> SessionState {
        self.session.current_state()
    }

    pub fn cart(&self) -> &Cart {
        &self.cart
    }

    pub fn session(&self) -> &SessionMachine {
        &self.session
    }

    pub fn guards(&self) -> &TimingGuards {
        &self.guards
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn config(&self) -> &RegisterConfig {
        &self.config
    }

    /// When the current payment confirmation started, if one is showing.
    pub fn thank_you_started_at_ms(&self) -> Option<u64> {
        (self.session.current_state() == SessionState::ThankYou)
            .then(|| self.session.state_entered_at_ms())
    }

    pub fn is_card_reader_ready(&self) -> bool {
        self.card_reader_ready
    }

    pub fn peripherals(&self) -> &Peripherals<P> {
        &self.peripherals
    }

    pub fn peripherals_mut(&mut self) -> &mut Peripherals<P> {
        &mut self.peripherals
    }

    /// Handle a scanned (or injected) barcode frame.
    pub fn handle_barcode_code(&mut self, raw: &str) {
        if !self.session.current_state().accepts_input() {
            tracing::debug!(frame = %raw, state = %self.state(), "Barcode ignored");
            return;
        }

        if self.filter.is_control(raw) {
            tracing::debug!(frame = %raw, "Scanner control frame dropped");
            return;
        }

        let Some(code) = self.normalizer.normalize_barcode(raw) else {
            tracing::debug!(frame = %raw, "Barcode too short");
            return;
        };

        let item = self.catalog.resolve(code);
        tracing::info!(code = %code, name = %item.name, price = item.price, "Barcode scanned");
        self.play_tone(SCAN_TONE_STEPS);

        if let Some(evicted) = self.cart.push(item) {
            tracing::debug!(item = %evicted, "Oldest item scrolled out of cart");
        }
        self.render_normal_screen();
    }

    /// Handle a card UID: settle the cart and show the confirmation.
    pub fn handle_card_uid(&mut self, raw: &str) {
        if !self.session.current_state().accepts_input() {
            tracing::debug!(uid = %raw, state = %self.state(), "Card ignored");
            return;
        }

        let Some(uid) = self.normalizer.normalize(raw) else {
            tracing::debug!(uid = %raw, "Card UID too short");
            return;
        };

        let total = self.cart.total();
        let now = self.now();
        match self.session.transition_to(SessionState::ThankYou, now) {
            Ok(_) => self.session.set_timeout(self.config.thank_you_duration_ms),
            Err(e) => {
                tracing::warn!(error = %e, "Payment rejected by session");
                return;
            }
        }
        self.cart.clear();
        tracing::info!(uid = %uid, total, "Payment accepted");

        self.renderer.render_thank_you(&mut self.peripherals.surface);
        self.play_tone(PAYMENT_TONE_STEPS);
    }

    fn poll_debug(&mut self) {
        loop {
            let now = self.now();
            let Some(line) = self
                .debug_reader
                .read_frame(&mut self.peripherals.debug, now)
            else {
                break;
            };
            self.handle_debug_line(&line);
        }
    }

    fn handle_debug_line(&mut self, line: &str) {
        match DebugCommand::parse(line) {
            Some(DebugCommand::Barcode(code)) => self.handle_barcode_code(code),
            Some(DebugCommand::CardUid(uid)) => self.handle_card_uid(uid),
            None => tracing::trace!(line = %line, "Unrecognized debug line"),
        }
    }

    fn poll_barcode(&mut self) {
        let now = self.now();
        if let Some(window) = self.guards.blocking(now) {
            if self.peripherals.barcode.bytes_available() > 0 {
                tracing::trace!(window = %window, "Discarding barcode input");
            }
            self.clear_barcode_input();
            return;
        }

        loop {
            let now = self.now();
            let Some(frame) = self
                .barcode_reader
                .read_frame(&mut self.peripherals.barcode, now)
            else {
                break;
            };
            self.handle_barcode_code(&frame);
        }
    }

    fn poll_card_reader(&mut self) {
        if !self.card_reader_ready {
            return;
        }

        let reader = &mut self.peripherals.card_reader;
        if !reader.is_new_card_present() {
            return;
        }

        let card = match reader.read_card_serial() {
            Ok(Some(card)) => card,
            Ok(None) => return,
            Err(e) => {
                tracing::warn!(error = %e, "Card read failed");
                return;
            }
        };

        let uid = card.uid_hex();
        tracing::debug!(uid = %uid, read_at = %card.read_at, "Card detected");
        self.handle_card_uid(&uid);

        let reader = &mut self.peripherals.card_reader;
        reader.halt();
        reader.stop_crypto();
    }

    fn update_thank_you(&mut self) {
        if self.session.current_state() != SessionState::ThankYou {
            return;
        }

        let now = self.now();
        match self.session.check_and_handle_timeout(now) {
            Ok(Some(transition)) => {
                tracing::info!(from = %transition.from, to = %transition.to, "Thank-you screen expired");
                self.render_normal_screen();
            }
            Ok(None) => {}
            Err(e) => tracing::warn!(error = %e, "Thank-you expiry failed"),
        }
    }

    fn init_card_reader(&mut self) -> bool {
        let reader = &mut self.peripherals.card_reader;

        if let Err(e) = reader.detect() {
            tracing::warn!(
                address = %format!("0x{:02X}", RFID_I2C_ADDRESS),
                error = %e,
                "Card reader not found"
            );
            return false;
        }
        tracing::info!(
            address = %format!("0x{:02X}", RFID_I2C_ADDRESS),
            "Card reader detected"
        );

        if let Err(e) = reader.init() {
            tracing::warn!(error = %e, "Card reader init failed");
            return false;
        }

        match reader.version() {
            Ok(version) => {
                tracing::info!(version = %format!("0x{:02X}", version), "Card reader version")
            }
            Err(e) => tracing::warn!(error = %e, "Card reader version unreadable"),
        }

        true
    }

    fn send_barcode_command(&mut self, command: ScannerCommand) {
        self.clear_barcode_input();

        let barcode = &mut self.peripherals.barcode;
        if let Err(e) = barcode
            .write_all(command.bytes())
            .and_then(|()| barcode.flush())
        {
            tracing::warn!(command = %command, error = %e, "Scanner command failed");
        } else {
            tracing::debug!(command = %command, "Scanner command sent");
        }

        self.peripherals.clock.sleep_ms(self.config.command_guard_ms);
        self.clear_barcode_input();

        let now = self.now();
        self.guards.arm_command(now, self.config.command_guard_ms);
    }

    fn clear_barcode_input(&mut self) {
        self.peripherals.barcode.discard_input();
        self.barcode_reader.flush();
    }

    fn clear_cart(&mut self) {
        self.cart.clear();
        self.render_normal_screen();
    }

    fn render_normal_screen(&mut self) {
        self.renderer
            .render_normal(&mut self.peripherals.surface, &self.cart);
    }

    fn play_tone(&mut self, steps: &[ToneStep]) {
        play_tone_steps(&mut self.peripherals.audio, &self.peripherals.clock, steps);
    }

    fn now(&self) -> u64 {
        self.peripherals.clock.now_ms()
    }
}

impl<P: Platform> std::fmt::Debug for RegisterMode<P> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RegisterMode")
            .field("state", &self.session.current_state())
            .field("cart", &self.cart)
            .field("guards", &self.guards)
            .field("card_reader_ready", &self.card_reader_ready)
            .finish_non_exhaustive()
    }
}
