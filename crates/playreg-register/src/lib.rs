//! Play register core.
//!
//! This crate holds the register's behaviour: turning scanned codes into
//! items, keeping the cart, switching between the shopping and payment
//! screens, and arbitrating the three input sources each tick.
//!
//! ```text
//! debug console ──┐
//! barcode UART ───┼─> RegisterMode::update ─> Catalog ─> Cart ─> ScreenRenderer
//! card reader ────┘            │
//!                              └─> SessionMachine (Normal / ThankYou)
//! ```

pub mod cart;
pub mod catalog;
pub mod display;
pub mod guards;
pub mod mode;
pub mod platform;
pub mod register;
pub mod state_machine;

pub use cart::Cart;
pub use catalog::{Catalog, fnv1a32};
pub use display::ScreenRenderer;
pub use guards::{GuardWindow, TimingGuards};
pub use mode::{AnyMode, Mode};
pub use platform::{MockHandles, MockPlatform, Peripherals, Platform};
pub use register::RegisterMode;
pub use state_machine::{SessionMachine, SessionMachineBuilder, SessionState, StateTransition};
