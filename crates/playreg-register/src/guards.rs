//! Timing guards for the barcode channel.
//!
//! The scanner emits noise at power-up and after every configuration
//! command. Two independent windows keep that noise out of the frame
//! reader: a one-time boot stabilization window and a short window after
//! each command. Both only ever move forward.

use std::fmt;

/// Which window is currently blocking barcode input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuardWindow {
    BootStabilize,
    CommandGuard,
}

impl fmt::Display for GuardWindow {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::BootStabilize => f.write_str("boot-stabilize"),
            Self::CommandGuard => f.write_str("command-guard"),
        }
    }
}

/// Boot and post-command guard deadlines.
///
/// ```
/// use playreg_register::guards::{GuardWindow, TimingGuards};
///
/// let mut guards = TimingGuards::new();
/// guards.arm_command(0, 120);
/// guards.arm_boot(360, 1500);
///
/// assert_eq!(guards.blocking(200), Some(GuardWindow::BootStabilize));
/// assert!(guards.is_open(1860));
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TimingGuards {
    input_ready_at_ms: u64,
    command_guard_until_ms: u64,
}

impl TimingGuards {
    pub fn new() -> Self {
        Self::default()
    }

    /// Block input until `now_ms + delay_ms`.
    pub fn arm_boot(&mut self, now_ms: u64, delay_ms: u64) {
        self.input_ready_at_ms = self
            .input_ready_at_ms
            .max(now_ms.saturating_add(delay_ms));
    }

    /// Block input until `now_ms + guard_ms`.
    pub fn arm_command(&mut self, now_ms: u64, guard_ms: u64) {
        self.command_guard_until_ms = self
            .command_guard_until_ms
            .max(now_ms.saturating_add(guard_ms));
    }

    /// The window blocking input at `now_ms`, boot first.
    pub fn blocking(&self, now_ms: u64) -> Option<GuardWindow> {
        if now_ms < self.input_ready_at_ms {
            Some(GuardWindow::BootStabilize)
        } else if now_ms < self.command_guard_until_ms {
            Some(GuardWindow::CommandGuard)
        } else {
            None
        }
    }

    pub fn is_open(&self, now_ms: u64) -> bool {
        self.blocking(now_ms).is_none()
    }

    pub fn input_ready_at_ms(&self) -> u64 {
        self.input_ready_at_ms
    }

    pub fn command_guard_until_ms(&self) -> u64 {
        self.command_guard_until_ms
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn test_unarmed_guards_are_open() {
        assert!(TimingGuards::new().is_open(0));
    }

    #[rstest]
    #[case(0, Some(GuardWindow::BootStabilize))]
    #[case(1499, Some(GuardWindow::BootStabilize))]
    #[case(1500, Some(GuardWindow::CommandGuard))]
    #[case(1599, Some(GuardWindow::CommandGuard))]
    #[case(1600, None)]
    fn test_windows(#[case] now: u64, #[case] expected: Option<GuardWindow>) {
        let mut guards = TimingGuards::new();
        guards.arm_boot(0, 1500);
        guards.arm_command(1480, 120);
        assert_eq!(guards.blocking(now), expected);
    }

    #[test]
    fn test_deadlines_never_roll_back() {
        let mut guards = TimingGuards::new();
        guards.arm_command(1000, 120);
        guards.arm_command(500, 120);
        assert_eq!(guards.command_guard_until_ms(), 1120);

        guards.arm_boot(0, 1500);
        guards.arm_boot(0, 100);
        assert_eq!(guards.input_ready_at_ms(), 1500);
    }
}
