//! Pure Yew view components for the TapTitan control panel.
//!
//! These render from props only; all state lives in the `AutoClicker`
//! reducer.

use tap_titan::{clicks_per_second, defaults, target_count_display};
use yew::prelude::*;

/// Big counter with the optional `/target` suffix.
#[derive(Properties, PartialEq)]
pub struct ClickCounterProps {
    pub completed: u32,
    pub target: u32,
    pub is_completed: bool,
}

#[function_component(ClickCounter)]
pub fn click_counter(props: &ClickCounterProps) -> Html {
    html! {
        <div class="click-counter">
            <p class="counter-label">{ "Clicks Performed" }</p>
            <p class="counter-value">
                { props.completed }
                if props.target > 0 {
                    <span class="counter-target">{ format!("/{}", props.target) }</span>
                }
            </p>
            if props.is_completed {
                <p class="counter-done">{ "Target reached!" }</p>
            }
        </div>
    }
}

#[derive(Properties, PartialEq)]
pub struct SpeedSliderProps {
    pub speed: u8,
    pub interval_ms: u32,
    pub disabled: bool,
    pub oninput: Callback<InputEvent>,
}

#[function_component(SpeedSlider)]
pub fn speed_slider(props: &SpeedSliderProps) -> Html {
    html! {
        <div class="form-group">
            <label for="speed">{ "Click Speed" }</label>
            <div class="slider-with-value">
                <span class="slider-end">{ "slow" }</span>
                <input type="range"
                    id="speed"
                    min={defaults::MIN_SPEED.to_string()}
                    max={defaults::MAX_SPEED.to_string()}
                    step="1"
                    value={props.speed.to_string()}
                    disabled={props.disabled}
                    oninput={props.oninput.clone()}
                />
                <span class="slider-end">{ "fast" }</span>
            </div>
            <div class="slider-value">{
                format!("Interval: {}ms ({:.1} clicks/sec)",
                        props.interval_ms, clicks_per_second(props.interval_ms))
            }</div>
        </div>
    }
}

#[derive(Properties, PartialEq)]
pub struct TargetCountInputProps {
    pub target: u32,
    pub disabled: bool,
    pub oninput: Callback<InputEvent>,
}

#[function_component(TargetCountInput)]
pub fn target_count_input(props: &TargetCountInputProps) -> Html {
    let value = target_count_display(props.target);
    html! {
        <div class="form-group">
            <label for="click-count">{ "Total Clicks (0 for infinite)" }</label>
            <input type="number"
                id="click-count"
                min="0"
                value={value}
                placeholder="0 for infinite"
                disabled={props.disabled}
                oninput={props.oninput.clone()}
            />
        </div>
    }
}

#[derive(Properties, PartialEq)]
pub struct PositionReadoutProps {
    pub x: i64,
    pub y: i64,
}

#[function_component(PositionReadout)]
pub fn position_readout(props: &PositionReadoutProps) -> Html {
    html! {
        <div class="position-readout">
            <p>{ "Drag the circle to set the tap location." }</p>
            <p>{ format!("Current position: ({}, {})", props.x, props.y) }</p>
        </div>
    }
}

/// Floating button shown while the panel is minimized.
#[derive(Properties, PartialEq)]
pub struct ShowControlsButtonProps {
    pub onclick: Callback<MouseEvent>,
}

#[function_component(ShowControlsButton)]
pub fn show_controls_button(props: &ShowControlsButtonProps) -> Html {
    html! {
        <div class="show-controls">
            <button class="btn-round" title="Show Controls" onclick={props.onclick.clone()}>
                { "⋮" }
                <span class="sr-only">{ "Open Menu" }</span>
            </button>
        </div>
    }
}
