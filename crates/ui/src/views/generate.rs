use dioxus::prelude::*;

use crate::views::StudyController;

#[component]
pub fn GenerateView() -> Element {
    let controller = use_context::<StudyController>();
    let mut form = controller.form;
    let busy = (controller.busy)();
    let progress = controller.progress.cloned();
    let values = form.cloned();
    let show_pdf_options = values.is_pdf();
    let generate = controller.generate;

    rsx! {
        section { class: "panel generate-panel",
            header { class: "view-header",
                h2 { class: "view-title", "Create a study set" }
                p { class: "view-subtitle",
                    "Type a topic, paste your notes, or point at a .txt, .md, .docx or .pdf file."
                }
            }
            div { class: "view-divider" }

            label { class: "field-label", r#for: "topic-input", "Topic or content" }
            textarea {
                id: "topic-input",
                class: "topic-input",
                rows: 6,
                placeholder: "e.g. Spanish greetings",
                disabled: busy,
                value: "{values.topic}",
                oninput: move |evt| form.write().topic = evt.value(),
            }

            label { class: "field-label", r#for: "file-input", "Or import a file" }
            input {
                id: "file-input",
                class: "file-input",
                r#type: "text",
                placeholder: "/path/to/notes.pdf",
                disabled: busy,
                value: "{values.file_path}",
                oninput: move |evt| form.write().file_path = evt.value(),
            }

            if show_pdf_options {
                div { class: "pdf-options",
                    label { class: "field-label", r#for: "page-start", "Pages" }
                    div { class: "page-range",
                        input {
                            id: "page-start",
                            class: "page-input",
                            r#type: "number",
                            min: 1,
                            placeholder: "first",
                            disabled: busy,
                            value: "{values.page_start}",
                            oninput: move |evt| form.write().page_start = evt.value(),
                        }
                        span { class: "page-range-sep", "to" }
                        input {
                            id: "page-end",
                            class: "page-input",
                            r#type: "number",
                            min: 1,
                            placeholder: "last",
                            disabled: busy,
                            value: "{values.page_end}",
                            oninput: move |evt| form.write().page_end = evt.value(),
                        }
                    }
                    label { class: "checkbox-row",
                        input {
                            r#type: "checkbox",
                            checked: values.use_ocr,
                            disabled: busy,
                            onchange: move |evt| form.write().use_ocr = evt.checked(),
                        }
                        "Recognize text in scanned pages (OCR)"
                    }
                }
            }

            div { class: "actions",
                button {
                    class: "btn btn-primary",
                    r#type: "button",
                    disabled: busy,
                    onclick: move |_| generate.call(()),
                    if busy {
                        "Generating..."
                    } else {
                        "Generate flashcards"
                    }
                }
            }

            if let Some(status) = progress {
                p { class: "status-line", role: "status", "{status}" }
            }
        }
    }
}
