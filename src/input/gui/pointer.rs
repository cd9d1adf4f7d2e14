use crate::controllers::interactive::gesture::GestureEvent;
use crate::core::data::point::Point;
use std::time::{Duration, Instant};

pub const DOUBLE_CLICK_INTERVAL: Duration = Duration::from_millis(400);

/// Maximum distance, in physical pixels, between the two presses of a
/// double click.
pub const DOUBLE_CLICK_SLOP: f64 = 4.0;

/// Turns raw window mouse input into gestures.
///
/// winit reports the cursor position separately from button presses and
/// has no notion of a double click, so both are tracked here.
#[derive(Debug, Default, Clone, Copy)]
pub struct PointerTracker {
    position: Option<Point>,
    pressed: bool,
    last_click: Option<(Instant, Point)>,
}

impl PointerTracker {
    #[must_use]
    pub fn position(&self) -> Option<Point> {
        self.position
    }

    #[must_use]
    pub fn is_pressed(&self) -> bool {
        self.pressed
    }

    pub fn moved(&mut self, position: Point) -> Option<GestureEvent> {
        self.position = Some(position);
        self.pressed.then_some(GestureEvent::PointerMove { position })
    }

    /// Cursor left the window. An open drag is abandoned.
    pub fn left(&mut self) -> Option<GestureEvent> {
        self.position = None;
        self.last_click = None;

        if self.pressed {
            self.pressed = false;
            Some(GestureEvent::PointerCancel)
        } else {
            None
        }
    }

    /// Primary button down. The second press of a double click zooms
    /// instead of starting a drag.
    pub fn pressed(&mut self, now: Instant) -> Option<GestureEvent> {
        let position = self.position?;

        let is_double = self.last_click.is_some_and(|(at, first)| {
            now.saturating_duration_since(at) <= DOUBLE_CLICK_INTERVAL
                && first.distance_squared(position) <= DOUBLE_CLICK_SLOP * DOUBLE_CLICK_SLOP
        });

        if is_double {
            self.last_click = None;
            return Some(GestureEvent::DoubleClick { position });
        }

        self.last_click = Some((now, position));
        self.pressed = true;
        Some(GestureEvent::PointerDown { position })
    }

    pub fn released(&mut self) -> Option<GestureEvent> {
        if !self.pressed {
            return None;
        }

        self.pressed = false;
        self.position
            .map(|position| GestureEvent::PointerUp { position })
    }

    /// Takes winit's vertical scroll in lines, positive when the wheel rolls
    /// away from the user. Gestures count rolls towards the user as positive,
    /// so rolling away zooms out.
    pub fn wheel(&self, lines: f64) -> Option<GestureEvent> {
        let position = self.position?;

        (lines != 0.0).then_some(GestureEvent::Wheel {
            position,
            delta_y: -lines,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(x: f64, y: f64) -> Point {
        Point::new(x, y)
    }

    #[test]
    fn test_moves_only_drag_while_pressed() {
        let mut tracker = PointerTracker::default();
        let now = Instant::now();

        assert_eq!(tracker.moved(at(10.0, 10.0)), None);
        assert_eq!(
            tracker.pressed(now),
            Some(GestureEvent::PointerDown {
                position: at(10.0, 10.0)
            })
        );
        assert_eq!(
            tracker.moved(at(30.0, 12.0)),
            Some(GestureEvent::PointerMove {
                position: at(30.0, 12.0)
            })
        );
        assert_eq!(
            tracker.released(),
            Some(GestureEvent::PointerUp {
                position: at(30.0, 12.0)
            })
        );
        assert_eq!(tracker.moved(at(40.0, 12.0)), None);
    }

    #[test]
    fn test_quick_second_press_is_double_click() {
        let mut tracker = PointerTracker::default();
        let now = Instant::now();
        tracker.moved(at(100.0, 50.0));

        tracker.pressed(now);
        tracker.released();
        tracker.moved(at(101.0, 51.0));
        let second = tracker.pressed(now + Duration::from_millis(150));

        assert_eq!(
            second,
            Some(GestureEvent::DoubleClick {
                position: at(101.0, 51.0)
            })
        );
        assert!(!tracker.is_pressed());
    }

    #[test]
    fn test_slow_or_distant_second_press_starts_drag() {
        let mut tracker = PointerTracker::default();
        let now = Instant::now();
        tracker.moved(at(100.0, 50.0));

        tracker.pressed(now);
        tracker.released();
        let slow = tracker.pressed(now + Duration::from_millis(900));
        assert!(matches!(slow, Some(GestureEvent::PointerDown { .. })));

        tracker.released();
        tracker.moved(at(140.0, 50.0));
        let distant = tracker.pressed(now + Duration::from_millis(1000));
        assert!(matches!(distant, Some(GestureEvent::PointerDown { .. })));
    }

    #[test]
    fn test_leaving_window_cancels_drag() {
        let mut tracker = PointerTracker::default();
        tracker.moved(at(5.0, 5.0));
        tracker.pressed(Instant::now());

        assert_eq!(tracker.left(), Some(GestureEvent::PointerCancel));
        assert_eq!(tracker.released(), None);
        assert_eq!(tracker.position(), None);
    }

    #[test]
    fn test_wheel_needs_known_position() {
        let mut tracker = PointerTracker::default();
        assert_eq!(tracker.wheel(1.0), None);

        tracker.moved(at(20.0, 30.0));
        assert_eq!(tracker.wheel(0.0), None);
    }

    #[test]
    fn test_winit_scroll_away_from_user_zooms_out() {
        let mut tracker = PointerTracker::default();
        tracker.moved(at(20.0, 30.0));

        assert_eq!(
            tracker.wheel(1.0),
            Some(GestureEvent::Wheel {
                position: at(20.0, 30.0),
                delta_y: -1.0
            })
        );
        assert_eq!(
            tracker.wheel(-0.5),
            Some(GestureEvent::Wheel {
                position: at(20.0, 30.0),
                delta_y: 0.5
            })
        );
    }
}
