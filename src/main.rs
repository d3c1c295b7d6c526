//! Main module for the TapTitan application using Yew.
//! Wires the rate controller reducer, the tap timer and the draggable marker.

use log::info;
use tap_titan::{
    coerce_count_input, coerce_speed_input, target_count_display, ControlAction, Coordinate,
    RateController,
};
use web_sys::HtmlInputElement;
use yew::prelude::*;

mod components;
mod config;
mod hooks;
mod logging;
mod target;
mod utils;

use components::{ClickCounter, PositionReadout, ShowControlsButton, SpeedSlider, TargetCountInput};
use config::*;
use hooks::use_tap_timer;
use target::DraggableTarget;
use utils::viewport_center_or_origin;

/// Root component: owns the controller state and renders the panel.
#[function_component(AutoClicker)]
fn auto_clicker() -> Html {
    let controller = use_reducer(|| RateController::new(viewport_center_or_origin()));
    let minimized = use_state(|| false);

    let state = controller.state().clone();
    let running = controller.is_running();
    let coords = controller.coordinate();
    let interval_ms = controller.interval_ms();

    let on_tick = {
        let dispatcher = controller.dispatcher();
        Callback::from(move |_| dispatcher.dispatch(ControlAction::Tick))
    };
    use_tap_timer(controller.timer_schedule(), on_tick);

    let on_move = {
        let dispatcher = controller.dispatcher();
        Callback::from(move |c: Coordinate| dispatcher.dispatch(ControlAction::MoveTarget(c)))
    };

    let speed_oninput = {
        let dispatcher = controller.dispatcher();
        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            dispatcher.dispatch(ControlAction::SetSpeed(coerce_speed_input(&input.value())));
        })
    };

    let target_oninput = {
        let dispatcher = controller.dispatcher();
        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            let count = coerce_count_input(&input.value());
            // The state may not change (e.g. "3.7" over 3), so write the
            // canonical text back instead of waiting for a re-render
            input.set_value(&target_count_display(count));
            dispatcher.dispatch(ControlAction::SetTargetCount(count));
        })
    };

    let on_toggle = {
        let dispatcher = controller.dispatcher();
        Callback::from(move |_: MouseEvent| dispatcher.dispatch(ControlAction::ToggleRun))
    };

    let on_reset = {
        let dispatcher = controller.dispatcher();
        Callback::from(move |_: MouseEvent| {
            info!("Resetting all settings");
            dispatcher.dispatch(ControlAction::Reset(viewport_center_or_origin()));
        })
    };

    let set_minimized = |value: bool| {
        let minimized = minimized.clone();
        Callback::from(move |_: MouseEvent| minimized.set(value))
    };

    let marker = html! {
        <DraggableTarget coords={coords} running={running} on_move={on_move} />
    };

    if *minimized {
        return html! {
            <>
                { marker }
                <ShowControlsButton onclick={set_minimized(false)} />
            </>
        };
    }

    let (x, y) = coords.rounded();
    let (toggle_class, toggle_label) = if running {
        ("btn-primary btn-stop", "Stop")
    } else {
        ("btn-primary", "Start")
    };

    html! {
        <>
            { marker }
            <div class="container">
                <div class="card">
                    <div class="card-header">
                        <button class="btn-ghost minimize" title="Minimize" onclick={set_minimized(true)}>
                            { "–" }
                            <span class="sr-only">{ "Minimize" }</span>
                        </button>
                        <h1 class="card-title">{ APP_TITLE }</h1>
                        <p class="card-description">{ APP_SUBTITLE }</p>
                    </div>

                    <div class="card-content">
                        <ClickCounter
                            completed={state.completed_count}
                            target={state.target_count}
                            is_completed={state.is_completed()}
                        />
                        <SpeedSlider
                            speed={state.speed_percent}
                            interval_ms={interval_ms}
                            disabled={running}
                            oninput={speed_oninput}
                        />
                        <TargetCountInput
                            target={state.target_count}
                            disabled={running}
                            oninput={target_oninput}
                        />
                        <PositionReadout x={x} y={y} />
                    </div>

                    <div class="card-footer">
                        <button class={toggle_class} onclick={on_toggle}>{ toggle_label }</button>
                        <button class="btn-ghost small" disabled={running} onclick={on_reset}>
                            { "Reset All Settings" }
                        </button>
                    </div>
                </div>
            </div>
        </>
    }
}

/// Entry point: installs the panic hook and logger, then renders the app.
fn main() {
    console_error_panic_hook::set_once();
    logging::init(LOG_LEVEL);
    yew::Renderer::<AutoClicker>::new().render();
}
