//! Pointer and wheel input state machine.
//!
//! Two states: `Idle` and `Dragging`. A drag records where it started and
//! where the pointer was last seen; the committed transform is not touched
//! until the drag ends, so the live preview is always
//! `committed center + delta / scale` and never accumulates rounding error.
//!
//! The handler only decides *what* an event means. Applying the result to
//! the transform and re-rendering is the controller's job.

use tracing::warn;

/// A position in screen (page) coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScreenPoint {
    pub x: f64,
    pub y: f64,
}

impl ScreenPoint {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

/// Input events, with mouse and touch unified.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    /// Mouse button pressed or touch started.
    PointerDown(ScreenPoint),
    /// Pointer moved (with or without a drag in progress).
    PointerMove(ScreenPoint),
    /// Mouse button released or touch ended. Touch end events carry no
    /// position, in which case the last position seen is used.
    PointerUp(Option<ScreenPoint>),
    /// Pointer left the surface or the gesture was cancelled.
    PointerLeave(Option<ScreenPoint>),
    /// Wheel scrolled; positive zooms in.
    Wheel { delta: f64 },
}

/// An in-progress drag.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragSession {
    pub start: ScreenPoint,
    pub last: ScreenPoint,
}

impl DragSession {
    fn new(start: ScreenPoint) -> Self {
        Self { start, last: start }
    }

    /// Screen-space pan delta. The view moves opposite to the pointer.
    pub fn delta(&self) -> (f64, f64) {
        (self.start.x - self.last.x, self.start.y - self.last.y)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum InteractionState {
    #[default]
    Idle,
    Dragging(DragSession),
}

/// What the controller should do in response to an event.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InteractionOutcome {
    /// Nothing changed; no render needed.
    Ignored,
    /// A drag began; no render needed.
    DragStarted,
    /// Show the committed transform panned by this delta.
    Preview { dx: f64, dy: f64 },
    /// Fold this delta into the committed transform, then render.
    Commit { dx: f64, dy: f64 },
    /// Apply a wheel delta to the zoom.
    Wheel { delta: f64 },
}

/// Drives the Idle/Dragging state machine.
#[derive(Debug, Clone, Default)]
pub struct InteractionHandler {
    state: InteractionState,
}

impl InteractionHandler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> InteractionState {
        self.state
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self.state, InteractionState::Dragging(_))
    }

    /// The live drag delta, if a drag is in progress.
    pub fn live_delta(&self) -> Option<(f64, f64)> {
        match self.state {
            InteractionState::Dragging(session) => Some(session.delta()),
            InteractionState::Idle => None,
        }
    }

    /// Drop any drag in progress without committing it.
    pub fn reset(&mut self) {
        self.state = InteractionState::Idle;
    }

    pub fn handle(&mut self, event: InputEvent) -> InteractionOutcome {
        match event {
            InputEvent::PointerDown(point) => {
                if !point.is_finite() {
                    warn!(?point, "ignoring pointer-down with non-finite position");
                    return InteractionOutcome::Ignored;
                }
                self.state = InteractionState::Dragging(DragSession::new(point));
                InteractionOutcome::DragStarted
            }
            InputEvent::PointerMove(point) => match &mut self.state {
                InteractionState::Idle => InteractionOutcome::Ignored,
                InteractionState::Dragging(session) => {
                    if !point.is_finite() {
                        warn!(?point, "ignoring pointer-move with non-finite position");
                        return InteractionOutcome::Ignored;
                    }
                    session.last = point;
                    let (dx, dy) = session.delta();
                    InteractionOutcome::Preview { dx, dy }
                }
            },
            InputEvent::PointerUp(point) | InputEvent::PointerLeave(point) => {
                let InteractionState::Dragging(mut session) = self.state else {
                    return InteractionOutcome::Ignored;
                };
                self.state = InteractionState::Idle;

                match point {
                    Some(p) if p.is_finite() => session.last = p,
                    Some(p) => warn!(point = ?p, "release position is non-finite, using last known"),
                    None => {}
                }
                let (dx, dy) = session.delta();
                InteractionOutcome::Commit { dx, dy }
            }
            InputEvent::Wheel { delta } => {
                if !delta.is_finite() {
                    warn!(delta, "ignoring non-finite wheel delta");
                    return InteractionOutcome::Ignored;
                }
                InteractionOutcome::Wheel { delta }
            }
        }
    }
}
