use std::time::{Duration, Instant};

use rand::Rng;
use rand::rngs::StdRng;

use crate::motion::{self, Geometry, Position};
use crate::picker::Picker;

/// Longest wait for the surface to redraw after a move before drag motion is
/// trusted again.
const SETTLE_TIMEOUT: Duration = Duration::from_millis(50);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Phase {
    Idle,
    Sliding,
}

/// Durations and distances that drive the idle / slide behaviour.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Timing {
    pub(crate) idle_timeout: Duration,
    pub(crate) slide_step: i32,
    pub(crate) flash: Duration,
}

impl Default for Timing {
    fn default() -> Self {
        Self {
            idle_timeout: Duration::from_secs(15),
            slide_step: 30,
            flash: Duration::from_millis(200),
        }
    }
}

/// Result of one slide tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum SlideStep {
    /// Moved closer; more ticks needed.
    Moving(Position),
    /// Reached the hidden offset. Text is cleared and the phase is back to idle.
    Arrived(Position),
}

/// Everything that changes while the widget is up: the last pick, the idle
/// clock, the window position and an in-progress drag.
pub(crate) struct SessionState<R = StdRng> {
    picker: Picker<R>,
    geometry: Geometry,
    timing: Timing,
    phase: Phase,
    last_activity: Instant,
    displayed: Option<String>,
    position: Position,
    /// Cursor location inside the window when the drag started.
    grab: Option<(f32, f32)>,
    /// Set after a drag move until the surface has redrawn at its new margin.
    /// Pointer coordinates arriving before then are relative to the old spot.
    settling_until: Option<Instant>,
    flash_until: Option<Instant>,
}

impl<R: Rng> SessionState<R> {
    pub(crate) fn new(
        picker: Picker<R>,
        geometry: Geometry,
        start: Position,
        timing: Timing,
        now: Instant,
    ) -> Self {
        Self {
            picker,
            geometry,
            timing,
            phase: Phase::Idle,
            last_activity: now,
            displayed: None,
            position: geometry.clamp(start),
            grab: None,
            settling_until: None,
            flash_until: None,
        }
    }

    pub(crate) fn phase(&self) -> Phase {
        self.phase
    }

    pub(crate) fn position(&self) -> Position {
        self.position
    }

    pub(crate) fn displayed(&self) -> Option<&str> {
        self.displayed.as_deref()
    }

    pub(crate) fn is_dragging(&self) -> bool {
        self.grab.is_some()
    }

    pub(crate) fn is_flashing(&self, now: Instant) -> bool {
        self.flash_until.is_some_and(|until| now < until)
    }

    /// Record user activity, re-arming the idle timeout.
    pub(crate) fn touch(&mut self, now: Instant) {
        self.last_activity = now;
    }

    /// Draw a new name and show it. Does not interrupt a running slide.
    pub(crate) fn pick(&mut self, now: Instant) -> &str {
        let name = self.picker.pick().to_string();
        log::debug!("picked {name:?}");
        self.displayed = Some(name);
        self.flash_until = Some(now + self.timing.flash);
        self.touch(now);
        self.displayed.as_deref().unwrap_or_default()
    }

    /// Left button went down on the window body at `cursor` (window-local).
    pub(crate) fn press(&mut self, now: Instant, cursor: Option<(f32, f32)>) {
        self.grab = cursor;
        self.settling_until = None;
        self.touch(now);
    }

    /// Cursor moved to `cursor` (window-local). While a drag is active the
    /// window follows, clamped to the screen. Returns the new position when it
    /// changed.
    ///
    /// The compositor applies a margin change asynchronously, so after a move
    /// further motion is ignored until [`Self::settled`] or `SETTLE_TIMEOUT`.
    /// The grab point is fixed in window-local terms, so the next trusted
    /// event still carries the whole offset and nothing is lost.
    pub(crate) fn drag(&mut self, now: Instant, cursor: (f32, f32)) -> Option<Position> {
        let (gx, gy) = self.grab?;
        self.touch(now);
        if self.settling_until.is_some_and(|until| now < until) {
            return None;
        }
        self.settling_until = None;
        let dx = (cursor.0 - gx).round() as i32;
        let dy = (cursor.1 - gy).round() as i32;
        let next = self.geometry.clamp(Position {
            x: self.position.x + dx,
            y: self.position.y + dy,
        });
        if next == self.position {
            return None;
        }
        self.position = next;
        self.settling_until = Some(now + SETTLE_TIMEOUT);
        Some(next)
    }

    /// The surface redrew, so the last move has been applied.
    pub(crate) fn settled(&mut self) {
        self.settling_until = None;
    }

    pub(crate) fn release(&mut self) {
        self.grab = None;
        self.settling_until = None;
    }

    /// Periodic idle check. Starts the slide once the timeout has strictly
    /// elapsed; returns `true` on that transition.
    pub(crate) fn idle_tick(&mut self, now: Instant) -> bool {
        if self.flash_until.is_some_and(|until| now >= until) {
            self.flash_until = None;
        }
        if self.phase == Phase::Sliding {
            return false;
        }
        if now.saturating_duration_since(self.last_activity) > self.timing.idle_timeout {
            self.phase = Phase::Sliding;
            log::info!(
                "Idle -> Sliding from y={} (last shown: {:?})",
                self.position.y,
                self.picker.last()
            );
            return true;
        }
        false
    }

    /// Advance the slide by one step. `None` when not sliding.
    pub(crate) fn slide_tick(&mut self, now: Instant) -> Option<SlideStep> {
        if self.phase != Phase::Sliding {
            return None;
        }
        let target = self.geometry.hidden_y;
        self.position.y = motion::step_toward(self.position.y, target, self.timing.slide_step);
        if self.position.y != target {
            return Some(SlideStep::Moving(self.position));
        }
        self.displayed = None;
        self.phase = Phase::Idle;
        self.touch(now);
        log::info!("Sliding -> Idle (hidden at y={target})");
        Some(SlideStep::Arrived(self.position))
    }
}
