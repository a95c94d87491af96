//! Mode contract shared with sibling device modes.
//!
//! The device switches between independent modes (this register, a camera
//! viewer, ...). Each owns its screen and input while active; an external
//! dispatcher calls [`Mode::enter`] on selection and then forwards taps and
//! ticks.

use crate::platform::Platform;
use crate::register::RegisterMode;

pub trait Mode {
    /// Called when the dispatcher switches to this mode.
    fn enter(&mut self);

    fn on_touch(&mut self, x: i32, y: i32);

    /// Called once per main-loop tick while the mode is active.
    fn update(&mut self);
}

impl<P: Platform> Mode for RegisterMode<P> {
    fn enter(&mut self) {
        RegisterMode::enter(self);
    }

    fn on_touch(&mut self, x: i32, y: i32) {
        RegisterMode::on_touch(self, x, y);
    }

    fn update(&mut self) {
        RegisterMode::update(self);
    }
}

/// Enum wrapper for mode dispatch.
///
/// # Examples
///
/// ```
/// use playreg_core::RegisterConfig;
/// use playreg_register::{AnyMode, Mode, Peripherals, RegisterMode};
///
/// let (peripherals, handles) = Peripherals::mock();
/// let register = RegisterMode::new(peripherals, RegisterConfig::default()).unwrap();
/// let mut mode = AnyMode::Register(register);
///
/// mode.enter();
/// assert_eq!(handles.surface.frame_count(), 1);
/// ```
#[derive(Debug)]
#[non_exhaustive]
pub enum AnyMode<P: Platform> {
    Register(RegisterMode<P>),
}

impl<P: Platform> AnyMode<P> {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Register(_) => "register",
        }
    }
}

impl<P: Platform> Mode for AnyMode<P> {
    fn enter(&mut self) {
        match self {
            Self::Register(mode) => Mode::enter(mode),
        }
    }

    fn on_touch(&mut self, x: i32, y: i32) {
        match self {
            Self::Register(mode) => Mode::on_touch(mode, x, y),
        }
    }

    fn update(&mut self) {
        match self {
            Self::Register(mode) => Mode::update(mode),
        }
    }
}
