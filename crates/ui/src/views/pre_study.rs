use dioxus::prelude::*;
use flash_core::SessionEvent;
use flash_core::model::StudyMode;

use crate::views::StudyController;
use crate::vm::map_pre_study;

#[component]
pub fn PreStudyView() -> Element {
    let controller = use_context::<StudyController>();
    let Some(data) = map_pre_study(controller.vm.read().session()) else {
        return rsx! {};
    };
    let dispatch = controller.dispatch;
    let mut minutes = controller.minutes;
    let minutes_value = minutes();
    let term_first = data.mode == StudyMode::TermFirst;

    rsx! {
        section { class: "panel pre-study-panel",
            header { class: "view-header",
                h2 { class: "view-title study-topic", "{data.topic}" }
                p { class: "view-subtitle", "{data.card_count_label} ready to study" }
            }
            div { class: "view-divider" }

            if let Some(preview) = data.source_preview.as_ref() {
                details { class: "source-preview",
                    summary { "Source content" }
                    pre { class: "source-preview-text", "{preview}" }
                }
            }

            div { class: "study-options",
                label { class: "field-label", r#for: "study-minutes", "Study time (minutes)" }
                input {
                    id: "study-minutes",
                    class: "minutes-input",
                    r#type: "number",
                    min: 1,
                    max: 60,
                    value: "{minutes_value}",
                    oninput: move |evt| minutes.set(evt.value()),
                }

                label { class: "field-label", r#for: "study-mode", "Show first" }
                select {
                    id: "study-mode",
                    class: "mode-select",
                    onchange: move |evt| {
                        if let Ok(mode) = evt.value().parse::<StudyMode>() {
                            dispatch.call(SessionEvent::SetStudyMode(mode));
                        }
                    },
                    option { value: "term", selected: term_first, "Term" }
                    option { value: "definition", selected: !term_first, "Definition" }
                }
            }

            div { class: "actions",
                button {
                    class: "btn btn-primary",
                    r#type: "button",
                    onclick: move |_| {
                        dispatch.call(SessionEvent::StartStudy {
                            minutes: minutes.peek().to_string(),
                        });
                    },
                    "Start studying"
                }
                button {
                    class: "btn btn-secondary",
                    r#type: "button",
                    onclick: move |_| dispatch.call(SessionEvent::Export),
                    "Export"
                }
                button {
                    class: "btn btn-ghost",
                    r#type: "button",
                    onclick: move |_| dispatch.call(SessionEvent::GenerateNew),
                    "Generate new"
                }
            }
        }
    }
}
