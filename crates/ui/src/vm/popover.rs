//! Hover intent and placement for the day-detail popover.
//!
//! The intent machine is toolkit-agnostic: it never sleeps or touches the
//! DOM. It returns `HoverEffect::Schedule` when the host should start a
//! timer, and the host reports back through `HoverIntent::timer_fired`.
//! Every scheduled timer carries a fresh `TimerId`, so a timer that was
//! superseded or cancelled is recognised and ignored when it fires.

use std::time::Duration;

pub const OPEN_DELAY: Duration = Duration::from_millis(300);
pub const CLOSE_DELAY: Duration = Duration::from_millis(150);

/// Distance between the trigger and the popover.
pub const POPOVER_GAP: f64 = 8.0;
/// Minimum distance between the popover and the viewport edge.
pub const VIEWPORT_MARGIN: f64 = 8.0;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct TimerId(u64);

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum HoverPhase<K> {
    Closed,
    Opening { target: K, timer: TimerId },
    Open { target: K },
    Closing { target: K, timer: TimerId },
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum HoverInput<K> {
    /// Pointer entered a trigger; `has_content` is false for days without tracks.
    EnterTrigger { target: K, has_content: bool },
    LeaveTrigger,
    EnterPopover,
    LeavePopover,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HoverEffect {
    None,
    Schedule { timer: TimerId, delay: Duration },
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HoverIntent<K> {
    phase: HoverPhase<K>,
    next_timer: u64,
}

impl<K> Default for HoverIntent<K> {
    fn default() -> Self {
        Self {
            phase: HoverPhase::Closed,
            next_timer: 0,
        }
    }
}

impl<K: Clone + PartialEq> HoverIntent<K> {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn phase(&self) -> &HoverPhase<K> {
        &self.phase
    }

    /// The target whose popover is visible, if any.
    ///
    /// A closing popover stays visible until its close timer fires.
    #[must_use]
    pub fn visible_target(&self) -> Option<&K> {
        match &self.phase {
            HoverPhase::Open { target } | HoverPhase::Closing { target, .. } => Some(target),
            HoverPhase::Closed | HoverPhase::Opening { .. } => None,
        }
    }

    fn schedule(&mut self, delay: Duration) -> (TimerId, HoverEffect) {
        self.next_timer += 1;
        let timer = TimerId(self.next_timer);
        (timer, HoverEffect::Schedule { timer, delay })
    }

    pub fn handle(&mut self, input: HoverInput<K>) -> HoverEffect {
        match input {
            HoverInput::EnterTrigger {
                has_content: false, ..
            } => self.leave(),
            HoverInput::EnterTrigger { target, .. } => self.enter(target),
            HoverInput::LeaveTrigger | HoverInput::LeavePopover => self.leave(),
            HoverInput::EnterPopover => {
                if let HoverPhase::Closing { target, .. } = &self.phase {
                    self.phase = HoverPhase::Open {
                        target: target.clone(),
                    };
                }
                HoverEffect::None
            }
        }
    }

    fn enter(&mut self, target: K) -> HoverEffect {
        match &self.phase {
            HoverPhase::Closed => {
                let (timer, effect) = self.schedule(OPEN_DELAY);
                self.phase = HoverPhase::Opening { target, timer };
                effect
            }
            HoverPhase::Opening { target: pending, .. } if *pending == target => HoverEffect::None,
            HoverPhase::Opening { .. } => {
                let (timer, effect) = self.schedule(OPEN_DELAY);
                self.phase = HoverPhase::Opening { target, timer };
                effect
            }
            // Already showing a popover: switch or keep it without another delay.
            HoverPhase::Open { .. } | HoverPhase::Closing { .. } => {
                self.phase = HoverPhase::Open { target };
                HoverEffect::None
            }
        }
    }

    fn leave(&mut self) -> HoverEffect {
        match &self.phase {
            HoverPhase::Opening { .. } => {
                self.phase = HoverPhase::Closed;
                HoverEffect::None
            }
            HoverPhase::Open { target } => {
                let target = target.clone();
                let (timer, effect) = self.schedule(CLOSE_DELAY);
                self.phase = HoverPhase::Closing { target, timer };
                effect
            }
            HoverPhase::Closed | HoverPhase::Closing { .. } => HoverEffect::None,
        }
    }

    /// Report a timer expiry. Returns true when the phase changed.
    pub fn timer_fired(&mut self, fired: TimerId) -> bool {
        match &self.phase {
            HoverPhase::Opening { target, timer } if *timer == fired => {
                self.phase = HoverPhase::Open {
                    target: target.clone(),
                };
                true
            }
            HoverPhase::Closing { timer, .. } if *timer == fired => {
                self.phase = HoverPhase::Closed;
                true
            }
            _ => false,
        }
    }

    pub fn close_now(&mut self) {
        self.phase = HoverPhase::Closed;
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    #[must_use]
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    #[must_use]
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    #[must_use]
    pub fn right(&self) -> f64 {
        self.x + self.width
    }
}

/// Measured bounds of the trigger a popover hangs off, tagged with the
/// target it was measured for. Measurement is async, so the latest rect
/// can belong to a trigger the pointer has already left.
#[derive(Clone, Debug, PartialEq)]
pub struct PopoverAnchor<T> {
    pub target: T,
    pub rect: Rect,
}

impl<T: PartialEq> PopoverAnchor<T> {
    #[must_use]
    pub fn new(target: T, rect: Rect) -> Self {
        Self { target, rect }
    }

    /// The rect, only if it was measured for `target`.
    #[must_use]
    pub fn rect_for(&self, target: &T) -> Option<Rect> {
        (self.target == *target).then_some(self.rect)
    }
}

pub const POPOVER_WIDTH: f64 = 300.0;
pub const POPOVER_MAX_HEIGHT: f64 = 420.0;
const POPOVER_HEADER_HEIGHT: f64 = 48.0;
const POPOVER_ROW_HEIGHT: f64 = 64.0;

/// Rendered size of a popover listing `rows` tracks. Matches the fixed
/// width and row height in the stylesheet; taller lists scroll.
#[must_use]
pub fn estimate_popover_size(rows: usize) -> Size {
    let rows = f64::from(u32::try_from(rows).unwrap_or(u32::MAX));
    let height = POPOVER_HEADER_HEIGHT + rows * POPOVER_ROW_HEIGHT;
    Size::new(POPOVER_WIDTH, height.min(POPOVER_MAX_HEIGHT))
}

/// Top-left corner for a popover anchored to `trigger`.
///
/// Right of the trigger when it fits, otherwise left of it, otherwise
/// whichever position the viewport clamp produces. Vertically the popover
/// lines up with the trigger's top edge and is pushed up or down only as
/// far as needed to stay inside the viewport.
#[must_use]
pub fn place_popover(trigger: Rect, popover: Size, viewport: Size) -> Point {
    let max_x = viewport.width - VIEWPORT_MARGIN - popover.width;
    let right = trigger.right() + POPOVER_GAP;
    let left = trigger.x - POPOVER_GAP - popover.width;
    let x = if right <= max_x {
        right
    } else if left >= VIEWPORT_MARGIN {
        left
    } else {
        clamp_axis(right, VIEWPORT_MARGIN, max_x)
    };

    let max_y = viewport.height - VIEWPORT_MARGIN - popover.height;
    let y = clamp_axis(trigger.y, VIEWPORT_MARGIN, max_y);
    Point { x, y }
}

// Popovers larger than the viewport pin to the leading margin.
fn clamp_axis(value: f64, min: f64, max: f64) -> f64 {
    if max < min { min } else { value.clamp(min, max) }
}
