//! Window placement arithmetic: drag clamping and slide stepping.

/// Top-left corner of the widget in screen coordinates (logical pixels).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Size {
    pub width: i32,
    pub height: i32,
}

/// Screen and window dimensions plus the offset the widget hides at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Geometry {
    pub screen: Size,
    pub window: Size,
    /// Lowest allowed `y`. Negative, so the widget can tuck under the top edge
    /// with only a sliver showing.
    pub hidden_y: i32,
}

impl Geometry {
    /// Horizontally centred, vertically centred and then raised by `lift`.
    pub fn home(&self, lift: i32) -> Position {
        let x = self.screen.width / 2 - self.window.width / 2;
        let y = self.screen.height / 2 - self.window.height / 2 - lift;
        self.clamp(Position { x, y })
    }

    /// Keep the widget on screen: `x` in `[0, screen_w - window_w]`, `y` in
    /// `[hidden_y, screen_h - window_h]`.
    pub fn clamp(&self, pos: Position) -> Position {
        let max_x = (self.screen.width - self.window.width).max(0);
        let max_y = (self.screen.height - self.window.height).max(self.hidden_y);
        Position {
            x: pos.x.clamp(0, max_x),
            y: pos.y.clamp(self.hidden_y, max_y),
        }
    }
}

/// One step of `current` toward `target` by at most `step`. Never overshoots.
pub fn step_toward(current: i32, target: i32, step: i32) -> i32 {
    let step = step.saturating_abs().max(1);
    if current > target {
        current.saturating_sub(step).max(target)
    } else {
        current.saturating_add(step).min(target)
    }
}
