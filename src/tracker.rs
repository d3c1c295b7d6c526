//! Drag state machine for the tap marker.
//!
//! The tracker keeps the grab offset of the active drag and a single
//! pending coordinate. Moves between two rendering frames overwrite the
//! pending slot, so only the latest survives until the frame takes it.

use crate::Coordinate;
use log::debug;

/// Exists only between drag start and drag end.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragSession {
    /// Pointer position minus the marker center at grab time
    pub offset: Coordinate,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct PositionTracker {
    session: Option<DragSession>,
    pending: Option<Coordinate>,
}

impl PositionTracker {
    /// Start dragging unless the controller is running.
    ///
    /// Returns true when a new session began.
    pub fn begin_drag(&mut self, pointer: Coordinate, target_center: Coordinate, running: bool) -> bool {
        if running || self.session.is_some() {
            return false;
        }
        let offset = pointer - target_center;
        debug!("Drag started with offset ({:.1}, {:.1})", offset.x, offset.y);
        self.session = Some(DragSession { offset });
        self.pending = None;
        true
    }

    /// Record a pointer move. Replaces any pending coordinate and returns
    /// the new one, or `None` when no drag is active.
    pub fn drag_move(&mut self, pointer: Coordinate) -> Option<Coordinate> {
        let session = self.session?;
        let next = pointer - session.offset;
        self.pending = Some(next);
        Some(next)
    }

    /// Called from the frame callback; hands out the latest move once.
    pub fn take_pending(&mut self) -> Option<Coordinate> {
        self.pending.take()
    }

    /// Follow the controller's run flag: a run that starts mid-drag ends
    /// the drag. Returns true when a drag was cut short.
    pub fn sync_running(&mut self, running: bool) -> bool {
        running && self.end_drag()
    }

    /// Finish the drag and drop any unapplied move.
    ///
    /// Returns true when a drag was actually active.
    pub fn end_drag(&mut self) -> bool {
        self.pending = None;
        match self.session.take() {
            Some(_) => {
                debug!("Drag ended");
                true
            }
            None => false,
        }
    }
}

#[cfg(test)]
impl PositionTracker {
    fn is_dragging(&self) -> bool {
        self.session.is_some()
    }

    fn session(&self) -> Option<DragSession> {
        self.session
    }

    fn has_pending(&self) -> bool {
        self.pending.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{ControlAction, RateController};

    #[test]
    fn keeps_grab_offset() {
        let mut tracker = PositionTracker::default();
        let center = Coordinate::new(100.0, 100.0);
        assert!(tracker.begin_drag(Coordinate::new(110.0, 95.0), center, false));
        assert_eq!(
            tracker.session(),
            Some(DragSession { offset: Coordinate::new(10.0, -5.0) })
        );

        let moved = tracker.drag_move(Coordinate::new(210.0, 195.0));
        assert_eq!(moved, Some(Coordinate::new(200.0, 200.0)));
    }

    #[test]
    fn refuses_to_start_while_running() {
        let mut tracker = PositionTracker::default();
        assert!(!tracker.begin_drag(Coordinate::ORIGIN, Coordinate::ORIGIN, true));
        assert!(!tracker.is_dragging());
        assert_eq!(tracker.drag_move(Coordinate::new(5.0, 5.0)), None);
        assert!(!tracker.has_pending());
    }

    #[test]
    fn coalesces_moves_per_frame() {
        let mut tracker = PositionTracker::default();
        tracker.begin_drag(Coordinate::ORIGIN, Coordinate::ORIGIN, false);
        tracker.drag_move(Coordinate::new(1.0, 1.0));
        tracker.drag_move(Coordinate::new(2.0, 2.0));
        tracker.drag_move(Coordinate::new(3.0, 4.0));

        assert_eq!(tracker.take_pending(), Some(Coordinate::new(3.0, 4.0)));
        assert_eq!(tracker.take_pending(), None);
    }

    #[test]
    fn end_discards_pending_move() {
        let mut tracker = PositionTracker::default();
        tracker.begin_drag(Coordinate::ORIGIN, Coordinate::ORIGIN, false);
        tracker.drag_move(Coordinate::new(9.0, 9.0));
        assert!(tracker.end_drag());
        assert!(!tracker.is_dragging());
        assert_eq!(tracker.take_pending(), None);
        assert!(!tracker.end_drag());
    }

    #[test]
    fn second_press_does_not_restart_session() {
        let mut tracker = PositionTracker::default();
        tracker.begin_drag(Coordinate::new(3.0, 0.0), Coordinate::ORIGIN, false);
        assert!(!tracker.begin_drag(Coordinate::new(50.0, 50.0), Coordinate::ORIGIN, false));
        assert_eq!(tracker.session().map(|s| s.offset), Some(Coordinate::new(3.0, 0.0)));
    }

    #[test]
    fn drag_is_a_no_op_while_running() {
        let start = Coordinate::new(320.0, 240.0);
        let mut controller = RateController::new(start);
        controller.apply(ControlAction::ToggleRun);

        let mut tracker = PositionTracker::default();
        tracker.begin_drag(Coordinate::new(320.0, 240.0), start, controller.is_running());
        if let Some(next) = tracker.drag_move(Coordinate::new(10.0, 10.0)) {
            controller.apply(ControlAction::MoveTarget(next));
        }
        tracker.end_drag();

        assert_eq!(controller.coordinate(), start);
    }

    #[test]
    fn frame_update_reaches_controller() {
        let mut controller = RateController::new(Coordinate::new(50.0, 50.0));
        let mut tracker = PositionTracker::default();
        tracker.begin_drag(Coordinate::new(55.0, 50.0), controller.coordinate(), false);
        tracker.drag_move(Coordinate::new(105.0, 80.0));
        if let Some(next) = tracker.take_pending() {
            controller.apply(ControlAction::MoveTarget(next));
        }
        assert_eq!(controller.coordinate(), Coordinate::new(100.0, 80.0));
    }

    #[test]
    fn run_start_ends_active_drag() {
        let mut tracker = PositionTracker::default();
        tracker.begin_drag(Coordinate::ORIGIN, Coordinate::ORIGIN, false);
        tracker.drag_move(Coordinate::new(4.0, 4.0));

        assert!(!tracker.sync_running(false));
        assert!(tracker.is_dragging());

        assert!(tracker.sync_running(true));
        assert!(!tracker.is_dragging());
        assert_eq!(tracker.session(), None);
        assert!(!tracker.has_pending());
        // The frame scheduled before the run started finds nothing to apply
        assert_eq!(tracker.take_pending(), None);
        // Already idle
        assert!(!tracker.sync_running(true));
    }

    #[test]
    fn stopping_a_run_does_not_touch_drag() {
        let mut tracker = PositionTracker::default();
        tracker.begin_drag(Coordinate::ORIGIN, Coordinate::ORIGIN, false);
        assert!(!tracker.sync_running(false));
        assert!(tracker.session().is_some());
    }
}
