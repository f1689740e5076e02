use dioxus::prelude::*;
use flash_core::SessionEvent;

use crate::views::StudyController;

/// Status or error line for the current session.
#[component]
pub fn NoticeBar() -> Element {
    let controller = use_context::<StudyController>();
    let notice = controller.vm.read().session().notice().cloned();

    let Some(notice) = notice else {
        return rsx! {};
    };
    let class = if notice.is_error() {
        "notice notice--error"
    } else {
        "notice notice--info"
    };
    let role = if notice.is_error() { "alert" } else { "status" };

    rsx! {
        div { class: "{class}", role: "{role}",
            span { class: "notice-message", "{notice.message}" }
            button {
                class: "notice-dismiss",
                r#type: "button",
                aria_label: "Dismiss",
                onclick: move |_| controller.dispatch.call(SessionEvent::DismissNotice),
                "×"
            }
        }
    }
}
