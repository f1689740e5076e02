use dioxus::prelude::*;
use flash_core::SessionEvent;

use crate::views::StudyController;
use crate::vm::map_study_card;

/// Keyboard shortcuts on the study card.
fn event_for_key(key: &Key) -> Option<SessionEvent> {
    match key {
        Key::ArrowRight => Some(SessionEvent::NextCard),
        Key::ArrowLeft => Some(SessionEvent::PreviousCard),
        Key::Enter => Some(SessionEvent::FlipCard),
        Key::Character(text) if text == " " => Some(SessionEvent::FlipCard),
        _ => None,
    }
}

#[component]
pub fn StudyView() -> Element {
    let controller = use_context::<StudyController>();
    let Some(card) = map_study_card(controller.vm.read().session()) else {
        return rsx! {};
    };
    let dispatch = controller.dispatch;
    let face_class = if card.flipped {
        "study-card study-card--back"
    } else {
        "study-card"
    };

    rsx! {
        section {
            class: "panel study-panel",
            tabindex: 0,
            // Shortcuts need keyboard focus as soon as the screen opens.
            onmounted: move |evt: MountedEvent| async move {
                if let Err(err) = evt.set_focus(true).await {
                    tracing::debug!(error = ?err, "could not focus study panel");
                }
            },
            onkeydown: move |evt| {
                if let Some(event) = event_for_key(&evt.key()) {
                    evt.prevent_default();
                    dispatch.call(event);
                }
            },
            div { class: "study-meta",
                span { class: "study-clock", role: "timer", "{card.clock}" }
                span { class: "study-position", "{card.position}" }
            }

            button {
                class: "{face_class}",
                r#type: "button",
                onclick: move |_| dispatch.call(SessionEvent::FlipCard),
                span { class: "study-card-label", "{card.face_label}" }
                span { class: "study-card-text", "{card.face}" }
                span { class: "study-card-hint", "Click to flip" }
            }

            div { class: "study-nav",
                button {
                    class: "btn btn-secondary",
                    r#type: "button",
                    disabled: !card.can_navigate,
                    onclick: move |_| dispatch.call(SessionEvent::PreviousCard),
                    "Previous"
                }
                button {
                    class: "btn btn-secondary",
                    r#type: "button",
                    disabled: !card.can_navigate,
                    onclick: move |_| dispatch.call(SessionEvent::NextCard),
                    "Next"
                }
            }

            div { class: "actions",
                button {
                    class: "btn btn-ghost",
                    r#type: "button",
                    onclick: move |_| dispatch.call(SessionEvent::StopStudy),
                    "Stop"
                }
            }
        }
    }
}
