use gloo_timers::callback::Interval;
use tap_titan::TimerSchedule;
use yew::prelude::*;

/// Keep one `Interval` alive per schedule, firing `on_tick`.
///
/// A changed schedule drops the old interval before building the new one,
/// and `None` or unmount drops it for good. Dropping a gloo `Interval`
/// clears it.
#[hook]
pub fn use_tap_timer(schedule: Option<TimerSchedule>, on_tick: Callback<()>) {
    use_effect_with(schedule, move |&schedule| {
        let timer = schedule.map(|s| Interval::new(s.interval_ms, move || on_tick.emit(())));
        move || drop(timer)
    });
}
