use dioxus::prelude::*;
use flash_core::SessionEvent;

use crate::views::StudyController;
use crate::vm::map_complete;

#[component]
pub fn CompleteView() -> Element {
    let controller = use_context::<StudyController>();
    let Some(data) = map_complete(controller.vm.read().session()) else {
        return rsx! {};
    };
    let dispatch = controller.dispatch;

    rsx! {
        section { class: "panel complete-panel",
            header { class: "view-header",
                h2 { class: "view-title", "Time's up!" }
                p { class: "view-subtitle", "You studied {data.card_count_label} on {data.topic}." }
            }
            div { class: "actions",
                button {
                    class: "btn btn-primary",
                    r#type: "button",
                    onclick: move |_| dispatch.call(SessionEvent::StudyAgain),
                    "Study again"
                }
                button {
                    class: "btn btn-secondary",
                    r#type: "button",
                    onclick: move |_| dispatch.call(SessionEvent::GenerateNew),
                    "Generate new"
                }
            }
        }
    }
}
