use dioxus::prelude::*;

use crate::views::StudyRoot;

#[component]
pub fn App() -> Element {
    rsx! {
        document::Stylesheet { href: asset!("/assets/style.css") }
        document::Title { "Flashcard Generator" }

        div { class: "app-root",
            header { class: "app-header",
                h1 { class: "app-title", "Flashcard Generator" }
            }
            ErrorBoundary {
                handle_error: |errors: ErrorContext| rsx! {
                    div { class: "fatal",
                        h1 { "Something went wrong" }
                        pre { "{errors:?}" }
                    }
                },
                StudyRoot {}
            }
        }
    }
}
