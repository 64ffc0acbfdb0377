//! Press classification state machine.
//!
//! Pure timing logic - no I/O, no timers. Callers pass the press time in, which
//! keeps boundary cases exact in tests.

use std::time::Duration;
use tokio::time::Instant;

/// Default window for a second press to count as a double press.
pub const DEFAULT_GESTURE_WINDOW: Duration = Duration::from_millis(500);

/// Machine state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GestureState {
    /// No pending press.
    Idle,
    /// One press registered; a second may still follow.
    Armed {
        /// Time of the first press.
        since: Instant,
        /// Identifies this press sequence to the deferred expiry.
        generation: u64,
    },
}

/// What a press did to the machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PressOutcome {
    /// First press; open the report at `deadline` unless superseded.
    Armed { generation: u64, deadline: Instant },
    /// Second press strictly inside the window; cancel `cancelled` and copy now.
    DoublePress { cancelled: u64 },
    /// The previous sequence's window had already closed but its expiry had not
    /// run yet. Open the report for `expired` now, then treat this press as a
    /// fresh first press.
    ExpiredThenArmed {
        expired: u64,
        generation: u64,
        deadline: Instant,
    },
    /// Extra press right after a double press; nothing happens.
    Ignored,
}

/// Two-state press classifier: IDLE and ARMED.
///
/// A press at `since + window` or later is never a double press.
#[derive(Debug)]
pub struct GestureMachine {
    window: Duration,
    state: GestureState,
    next_generation: u64,
    quiet_until: Option<Instant>,
}

impl GestureMachine {
    pub fn new(window: Duration) -> Self {
        Self {
            window,
            state: GestureState::Idle,
            next_generation: 1,
            quiet_until: None,
        }
    }

    pub fn window(&self) -> Duration {
        self.window
    }

    pub fn state(&self) -> GestureState {
        self.state
    }

    /// Register a press at `now`.
    pub fn press(&mut self, now: Instant) -> PressOutcome {
        match self.state {
            GestureState::Idle => {
                if self.quiet_until.is_some_and(|until| now < until) {
                    return PressOutcome::Ignored;
                }
                self.quiet_until = None;
                let (generation, deadline) = self.arm(now);
                PressOutcome::Armed {
                    generation,
                    deadline,
                }
            }
            GestureState::Armed { since, generation } => {
                if now.saturating_duration_since(since) < self.window {
                    self.state = GestureState::Idle;
                    self.quiet_until = Some(now + self.window);
                    PressOutcome::DoublePress {
                        cancelled: generation,
                    }
                } else {
                    let (fresh, deadline) = self.arm(now);
                    PressOutcome::ExpiredThenArmed {
                        expired: generation,
                        generation: fresh,
                        deadline,
                    }
                }
            }
        }
    }

    /// The deferred timer for `generation` ran.
    ///
    /// Returns `true` when the report should open, i.e. the machine was still
    /// armed for that same press sequence.
    pub fn expire(&mut self, generation: u64) -> bool {
        match self.state {
            GestureState::Armed {
                generation: armed, ..
            } if armed == generation => {
                self.state = GestureState::Idle;
                true
            }
            _ => false,
        }
    }

    /// Drop any pending press without firing.
    pub fn reset(&mut self) {
        self.state = GestureState::Idle;
        self.quiet_until = None;
    }

    fn arm(&mut self, now: Instant) -> (u64, Instant) {
        let generation = self.next_generation;
        self.next_generation += 1;
        self.state = GestureState::Armed {
            since: now,
            generation,
        };
        (generation, now + self.window)
    }
}

impl Default for GestureMachine {
    fn default() -> Self {
        Self::new(DEFAULT_GESTURE_WINDOW)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const W: Duration = Duration::from_millis(500);

    #[test]
    fn test_first_press_arms() {
        let mut machine = GestureMachine::new(W);
        let t0 = Instant::now();

        let outcome = machine.press(t0);
        assert_eq!(
            outcome,
            PressOutcome::Armed {
                generation: 1,
                deadline: t0 + W
            }
        );
        assert!(matches!(machine.state(), GestureState::Armed { since, .. } if since == t0));
    }

    #[test]
    fn test_second_press_inside_window_is_double() {
        let mut machine = GestureMachine::new(W);
        let t0 = Instant::now();
        machine.press(t0);

        assert_eq!(
            machine.press(t0 + W / 5),
            PressOutcome::DoublePress { cancelled: 1 }
        );
        assert_eq!(machine.state(), GestureState::Idle);
        // The cancelled sequence must not open the report afterwards.
        assert!(!machine.expire(1));
    }

    #[test]
    fn test_press_just_inside_boundary_is_double() {
        let mut machine = GestureMachine::new(W);
        let t0 = Instant::now();
        machine.press(t0);

        assert!(matches!(
            machine.press(t0 + W - Duration::from_nanos(1)),
            PressOutcome::DoublePress { .. }
        ));
    }

    #[test]
    fn test_press_exactly_at_boundary_is_not_double() {
        let mut machine = GestureMachine::new(W);
        let t0 = Instant::now();
        machine.press(t0);

        let outcome = machine.press(t0 + W);
        assert_eq!(
            outcome,
            PressOutcome::ExpiredThenArmed {
                expired: 1,
                generation: 2,
                deadline: t0 + W + W
            }
        );
        // The stale timer for the first sequence finds nothing to do.
        assert!(!machine.expire(1));
        assert!(machine.expire(2));
    }

    #[test]
    fn test_expiry_fires_once() {
        let mut machine = GestureMachine::new(W);
        let t0 = Instant::now();
        machine.press(t0);

        assert!(machine.expire(1));
        assert!(!machine.expire(1));
        assert_eq!(machine.state(), GestureState::Idle);
    }

    #[test]
    fn test_third_rapid_press_is_ignored() {
        let mut machine = GestureMachine::new(W);
        let t0 = Instant::now();
        machine.press(t0);
        machine.press(t0 + Duration::from_millis(100));

        assert_eq!(
            machine.press(t0 + Duration::from_millis(200)),
            PressOutcome::Ignored
        );
        assert_eq!(machine.state(), GestureState::Idle);

        // Once the quiet period is over, a press arms again.
        assert!(matches!(
            machine.press(t0 + Duration::from_millis(100) + W),
            PressOutcome::Armed { generation: 2, .. }
        ));
    }

    #[test]
    fn test_reset_drops_pending_press() {
        let mut machine = GestureMachine::new(W);
        machine.press(Instant::now());
        machine.reset();
        assert!(!machine.expire(1));
    }
}
