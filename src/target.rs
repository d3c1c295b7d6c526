//! The draggable tap marker.
//!
//! Press handlers live on the marker itself; move/release listeners are
//! attached to the document only for the lifetime of a drag, and every
//! move schedules one animation frame, replacing the previous one.

use crate::config::MARKER_SIZE_PX;
use crate::utils::{element_center, set_text_selection_or_warn};
use gloo_events::{EventListener, EventListenerOptions};
use gloo_render::{request_animation_frame, AnimationFrame};
use std::cell::RefCell;
use std::rc::Rc;
use tap_titan::{Coordinate, PositionTracker};
use wasm_bindgen::JsCast;
use web_sys::{Element, Event, MouseEvent, TouchEvent};
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct DraggableTargetProps {
    pub coords: Coordinate,
    pub running: bool,
    pub on_move: Callback<Coordinate>,
}

/// Client position of the only active touch; multi-touch yields `None`.
fn single_touch(event: &TouchEvent) -> Option<Coordinate> {
    let touches = event.touches();
    if touches.length() != 1 {
        return None;
    }
    touches
        .get(0)
        .map(|t| Coordinate::new(t.client_x() as f64, t.client_y() as f64))
}

fn mouse_point(event: &MouseEvent) -> Coordinate {
    Coordinate::new(event.client_x() as f64, event.client_y() as f64)
}

/// Shared between the press handlers and the document listeners.
struct DragContext {
    tracker: Rc<RefCell<PositionTracker>>,
    frame: Rc<RefCell<Option<AnimationFrame>>>,
    dragging: UseStateHandle<bool>,
    on_move: Callback<Coordinate>,
}

impl DragContext {
    fn handle_move(&self, pointer: Coordinate) {
        if self.tracker.borrow_mut().drag_move(pointer).is_none() {
            return;
        }
        let tracker = self.tracker.clone();
        let on_move = self.on_move.clone();
        let handle = request_animation_frame(move |_| {
            let next = tracker.borrow_mut().take_pending();
            if let Some(next) = next {
                on_move.emit(next);
            }
        });
        // Dropping the superseded frame cancels it
        *self.frame.borrow_mut() = Some(handle);
    }

    fn handle_end(&self) {
        let ended = self.tracker.borrow_mut().end_drag();
        self.finish(ended);
    }

    fn handle_run_state(&self, running: bool) {
        let ended = self.tracker.borrow_mut().sync_running(running);
        self.finish(ended);
    }

    /// Cancel the queued frame; dropping `dragging` to false tears down the
    /// listeners and restores text selection.
    fn finish(&self, ended: bool) {
        if ended {
            self.frame.borrow_mut().take();
            self.dragging.set(false);
        }
    }
}

fn install_drag_listeners(ctx: Rc<DragContext>) -> Vec<EventListener> {
    let document = gloo_utils::document();
    let mut listeners = Vec::with_capacity(5);

    let c = ctx.clone();
    listeners.push(EventListener::new(&document, "mousemove", move |event: &Event| {
        if let Some(event) = event.dyn_ref::<MouseEvent>() {
            c.handle_move(mouse_point(event));
        }
    }));

    let c = ctx.clone();
    listeners.push(EventListener::new(&document, "mouseup", move |_| c.handle_end()));

    let c = ctx.clone();
    listeners.push(EventListener::new_with_options(
        &document,
        "touchmove",
        EventListenerOptions::enable_prevent_default(),
        move |event: &Event| {
            let Some(touch_event) = event.dyn_ref::<TouchEvent>() else {
                return;
            };
            if let Some(point) = single_touch(touch_event) {
                event.prevent_default();
                c.handle_move(point);
            }
        },
    ));

    for name in ["touchend", "touchcancel"] {
        let c = ctx.clone();
        listeners.push(EventListener::new(&document, name, move |_| c.handle_end()));
    }

    listeners
}

#[function_component(DraggableTarget)]
pub fn draggable_target(props: &DraggableTargetProps) -> Html {
    let node_ref = use_node_ref();
    let dragging = use_state(|| false);
    let tracker = use_mut_ref(PositionTracker::default);
    let frame = use_mut_ref(|| None::<AnimationFrame>);

    let ctx = Rc::new(DragContext {
        tracker: tracker.clone(),
        frame: frame.clone(),
        dragging: dragging.clone(),
        on_move: props.on_move.clone(),
    });

    let begin_drag = {
        let node_ref = node_ref.clone();
        let tracker = tracker.clone();
        let dragging = dragging.clone();
        let running = props.running;
        move |pointer: Coordinate| {
            let Some(element) = node_ref.cast::<Element>() else {
                return;
            };
            let center = element_center(&element);
            if tracker.borrow_mut().begin_drag(pointer, center, running) {
                dragging.set(true);
            }
        }
    };

    let onmousedown = {
        let begin_drag = begin_drag.clone();
        Callback::from(move |e: MouseEvent| {
            e.prevent_default();
            begin_drag(mouse_point(&e));
        })
    };

    let ontouchstart = Callback::from(move |e: TouchEvent| {
        if let Some(point) = single_touch(&e) {
            begin_drag(point);
        }
    });

    // Document listeners and the selection lock exist only while dragging
    {
        let ctx = ctx.clone();
        use_effect_with(*dragging, move |&is_dragging| {
            let listeners = if is_dragging {
                set_text_selection_or_warn(false);
                install_drag_listeners(ctx.clone())
            } else {
                Vec::new()
            };
            move || {
                drop(listeners);
                if is_dragging {
                    ctx.frame.borrow_mut().take();
                    set_text_selection_or_warn(true);
                }
            }
        });
    }

    // A run that starts mid-drag ends the drag
    {
        let ctx = ctx.clone();
        use_effect_with(props.running, move |&running| {
            ctx.handle_run_state(running);
            || ()
        });
    }

    let class = classes!(
        "tap-target",
        (!props.running && !*dragging).then_some("cursor-grab"),
        (*dragging).then_some("dragging"),
        props.running.then_some("running"),
    );
    let style = format!(
        "left: 0px; top: 0px; width: {size}px; height: {size}px; \
         transform: translate3d({x}px, {y}px, 0) translate(-50%, -50%); touch-action: none;",
        size = MARKER_SIZE_PX,
        x = props.coords.x,
        y = props.coords.y,
    );

    html! {
        <div ref={node_ref} class={class} style={style} {onmousedown} {ontouchstart}>
            <span class="tap-target-icon">{ "✋" }</span>
        </div>
    }
}
