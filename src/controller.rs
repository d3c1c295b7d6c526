//! Run/pause state, tap counting and the rate setting.
//!
//! [`RateController`] is a plain value; the Yew view drives it through
//! [`ControlAction`]s dispatched to a `use_reducer` handle.

use crate::{clamp_speed, defaults, interval_for_speed, Coordinate, TapRecord};
use log::{debug, info};
use std::rc::Rc;
use yew::Reducible;

/// Counters and settings of a tap run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunState {
    pub running: bool,
    pub speed_percent: u8,
    /// 0 means unbounded
    pub target_count: u32,
    pub completed_count: u32,
}

impl Default for RunState {
    fn default() -> Self {
        Self {
            running: false,
            speed_percent: defaults::SPEED_PERCENT,
            target_count: defaults::TARGET_COUNT,
            completed_count: 0,
        }
    }
}

impl RunState {
    /// True once a bounded run has reached its target.
    pub fn is_completed(&self) -> bool {
        self.target_count > 0 && self.completed_count >= self.target_count
    }

    /// Clamp the counter to the target and stop when it is reached.
    /// Returns true when the clamp fired.
    fn enforce_target(&mut self) -> bool {
        if !self.is_completed() {
            return false;
        }
        self.completed_count = self.target_count;
        self.running = false;
        true
    }
}

/// Actions accepted by the reducer.
#[derive(Debug, Clone, PartialEq)]
pub enum ControlAction {
    SetSpeed(u8),
    SetTargetCount(u32),
    ToggleRun,
    /// Carries the current viewport center
    Reset(Coordinate),
    MoveTarget(Coordinate),
    Tick,
}

/// Parameters of the repeating tap timer.
///
/// The timer exists exactly while a schedule exists; a different schedule
/// means the old timer is dropped and a new one built.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimerSchedule {
    pub interval_ms: u32,
    pub at: Coordinate,
}

/// Owns the run state and the tap coordinate.
#[derive(Debug, Clone, PartialEq)]
pub struct RateController {
    state: RunState,
    coordinate: Coordinate,
}

impl RateController {
    pub fn new(center: Coordinate) -> Self {
        Self {
            state: RunState::default(),
            coordinate: center,
        }
    }

    pub fn state(&self) -> &RunState {
        &self.state
    }

    pub fn coordinate(&self) -> Coordinate {
        self.coordinate
    }

    pub fn is_running(&self) -> bool {
        self.state.running
    }

    /// Current tap interval derived from the speed dial.
    pub fn interval_ms(&self) -> u32 {
        interval_for_speed(self.state.speed_percent)
    }

    /// The timer the view should keep alive, `None` unless running.
    pub fn timer_schedule(&self) -> Option<TimerSchedule> {
        self.state.running.then(|| TimerSchedule {
            interval_ms: self.interval_ms(),
            at: self.coordinate,
        })
    }

    /// Ignored while running. Returns whether the speed changed.
    pub fn set_speed(&mut self, speed_percent: u8) -> bool {
        if self.state.running {
            debug!("Ignoring speed change to {} while running", speed_percent);
            return false;
        }
        let speed = clamp_speed(speed_percent as u32);
        if speed == self.state.speed_percent {
            return false;
        }
        self.state.speed_percent = speed;
        true
    }

    /// Ignored while running. Returns whether the state changed.
    pub fn set_target_count(&mut self, target_count: u32) -> bool {
        if self.state.running {
            debug!("Ignoring target change to {} while running", target_count);
            return false;
        }
        if target_count == self.state.target_count {
            return false;
        }
        self.state.target_count = target_count;
        self.state.enforce_target();
        true
    }

    /// Stop a running run, or start one. Starting from a completed run
    /// restarts the counter.
    pub fn toggle_run(&mut self) {
        if self.state.running {
            self.state.running = false;
            info!("Stopped after {} taps", self.state.completed_count);
            return;
        }
        if self.state.is_completed() {
            self.state.completed_count = 0;
        }
        self.state.running = true;
        info!(
            "Started: every {}ms, target {}",
            self.interval_ms(),
            self.state.target_count
        );
    }

    /// Back to defaults with the marker at `center`.
    pub fn reset(&mut self, center: Coordinate) {
        self.state = RunState::default();
        self.coordinate = center;
    }

    /// Ignored while running. Returns whether the coordinate changed.
    pub fn move_target(&mut self, coordinate: Coordinate) -> bool {
        if self.state.running || coordinate == self.coordinate {
            return false;
        }
        self.coordinate = coordinate;
        true
    }

    /// One timer firing: count a tap at the current coordinate.
    ///
    /// Returns `None` when not running, so a late timer callback never
    /// counts.
    pub fn tick(&mut self) -> Option<TapRecord> {
        if !self.state.running {
            return None;
        }
        self.state.completed_count = self.state.completed_count.saturating_add(1);
        let tap = TapRecord::from(self.coordinate);
        if self.state.enforce_target() {
            info!("Target of {} taps reached", self.state.target_count);
        }
        Some(tap)
    }

    /// Apply an action, returning whether anything observable changed.
    pub fn apply(&mut self, action: ControlAction) -> bool {
        match action {
            ControlAction::SetSpeed(speed) => self.set_speed(speed),
            ControlAction::SetTargetCount(count) => self.set_target_count(count),
            ControlAction::ToggleRun => {
                self.toggle_run();
                true
            }
            ControlAction::Reset(center) => {
                let before = self.clone();
                self.reset(center);
                *self != before
            }
            ControlAction::MoveTarget(coordinate) => self.move_target(coordinate),
            ControlAction::Tick => match self.tick() {
                Some(tap) => {
                    info!("{}", tap);
                    true
                }
                None => false,
            },
        }
    }
}

impl Reducible for RateController {
    type Action = ControlAction;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        let mut next = (*self).clone();
        if next.apply(action) {
            Rc::new(next)
        } else {
            self
        }
    }
}
