//! Drawing toolbar: shape tools, edit/remove actions and undo.
//!
//! SYSTEM CONTEXT
//! ==============
//! `DrawController` decides which tool is active and owns the drawn-shape
//! collection. This component attaches the engine's drawing plugin once the
//! map exists, feeds its notifications into the controller and renders one
//! button per `ButtonState` the controller reports.

#[cfg(test)]
#[path = "draw_toolbar_test.rs"]
mod draw_toolbar_test;

use leptos::prelude::*;

use mapcore::controls::TooltipSide;
use mapcore::draw::{DrawAction, DrawController, DrawShape};

use crate::components::control_button::ControlButton;
use crate::util::map_handle::MapSignal;

/// Icon class for a shape tool button.
pub fn shape_icon_class(shape: DrawShape) -> String {
    format!("map-draw-toolbar__icon map-draw-toolbar__icon--{}", shape.as_str())
}

/// Icon class for an edit/remove button.
pub fn action_icon_class(action: DrawAction) -> String {
    format!("map-draw-toolbar__icon map-draw-toolbar__icon--{}", action.as_str())
}

/// Local signal owning a toolbar's controller.
pub type DrawSignal = RwSignal<DrawController, LocalStorage>;

/// Wrap a configured controller for [`DrawToolbar`].
pub fn draw_signal(controller: DrawController) -> DrawSignal {
    RwSignal::new_local(controller)
}

/// Toolbar driving `controller`. Tools stay inert until the drawing plugin
/// is attached to `map`.
#[component]
#[cfg_attr(not(feature = "hydrate"), allow(unused_variables))]
pub fn DrawToolbar(map: MapSignal, controller: DrawSignal, #[prop(optional)] side: TooltipSide) -> impl IntoView {
    #[cfg(feature = "hydrate")]
    {
        use std::rc::Rc;

        use mapcore::draw::DrawEvent;

        use crate::util::leaflet::{DrawLayer, DrawSink, attach_draw, describe};

        let attached = StoredValue::new_local(None::<DrawLayer>);
        Effect::new(move || {
            let Some(handle) = map.get() else {
                attached.set_value(None);
                return;
            };
            if attached.with_value(Option::is_some) {
                return;
            }
            let sink: DrawSink = Rc::new(move |event: DrawEvent| controller.update(|controller| controller.handle_event(event)));
            match attach_draw(&handle.borrow(), sink) {
                Ok((layer, factory)) => {
                    controller.update(|controller| controller.attach_factory(Box::new(factory)));
                    attached.set_value(Some(layer));
                }
                Err(err) => leptos::logging::error!("draw toolbar: {}", describe(&err)),
            }
        });

        on_cleanup(move || {
            controller.try_update(DrawController::teardown);
        });
    }

    let toggle_shape = move |shape: DrawShape| {
        controller.update(|controller| {
            if let Err(err) = controller.toggle_shape(shape) {
                leptos::logging::warn!("draw toolbar: {err}");
            }
        });
    };
    let toggle_action = move |action: DrawAction| {
        controller.update(|controller| {
            if let Err(err) = controller.toggle_action(action) {
                leptos::logging::warn!("draw toolbar: {err}");
            }
        });
    };
    let undo = move || {
        controller.update(|controller| {
            if let Err(err) = controller.undo() {
                leptos::logging::warn!("draw toolbar: {err}");
            }
        });
    };

    let shape_buttons = DrawShape::ALL
        .into_iter()
        .map(|shape| {
            let state = Memo::new(move |_| controller.with(|controller| controller.shape_button(shape)));
            view! {
                <ControlButton
                    label=Signal::derive(move || state.get().label)
                    disabled=Signal::derive(move || state.get().disabled)
                    active=Signal::derive(move || state.get().active)
                    side=side
                    on_click=move |_| toggle_shape(shape)
                >
                    <span class=shape_icon_class(shape) aria-hidden="true"></span>
                </ControlButton>
            }
        })
        .collect_view();

    let action_buttons = [DrawAction::Edit, DrawAction::Delete]
        .into_iter()
        .map(|action| {
            let state = Memo::new(move |_| controller.with(|controller| controller.action_button(action)));
            view! {
                <ControlButton
                    label=Signal::derive(move || state.get().label)
                    disabled=Signal::derive(move || state.get().disabled)
                    active=Signal::derive(move || state.get().active)
                    side=side
                    on_click=move |_| toggle_action(action)
                >
                    <span class=action_icon_class(action) aria-hidden="true"></span>
                </ControlButton>
            }
        })
        .collect_view();

    let undo_state = Memo::new(move |_| controller.with(DrawController::undo_button));
    let last_error = move || controller.with(|controller| controller.last_error().map(str::to_owned));

    view! {
        <div class="map-control map-draw-toolbar" role="toolbar" aria-label="Drawing tools">
            <div class="map-draw-toolbar__group">{shape_buttons}</div>
            <div class="map-draw-toolbar__group">
                {action_buttons}
                <ControlButton
                    label=Signal::derive(move || undo_state.get().label)
                    disabled=Signal::derive(move || undo_state.get().disabled)
                    active=Signal::stored(false)
                    side=side
                    on_click=move |_| undo()
                >
                    <span class="map-draw-toolbar__icon map-draw-toolbar__icon--undo" aria-hidden="true"></span>
                </ControlButton>
            </div>
            {move || {
                last_error()
                    .map(|message| {
                        view! {
                            <div class="map-draw-toolbar__error" role="status">
                                {message}
                            </div>
                        }
                    })
            }}
        </div>
    }
}
