use dioxus::prelude::*;
use flash_core::ViewState;

use crate::views::{
    CompleteView, GenerateView, NoticeBar, PreStudyView, StudyView, use_study_controller,
};

#[cfg(test)]
use crate::views::StudyController;
#[cfg(test)]
use std::cell::RefCell;
#[cfg(test)]
use std::rc::Rc;

/// Renders exactly one screen for the current session view.
#[component]
pub fn StudyRoot() -> Element {
    let controller = use_study_controller();

    #[cfg(test)]
    {
        let mut registered = use_signal(|| false);
        if !registered() {
            registered.set(true);
            if let Some(handles) = try_consume_context::<StudyTestHandles>() {
                handles.register(controller);
            }
        }
    }

    let view = controller.vm.read().view();

    rsx! {
        main { class: "study-root", "data-view": "{view}",
            NoticeBar {}
            match view {
                ViewState::Generation => rsx! { GenerateView {} },
                ViewState::PreStudy => rsx! { PreStudyView {} },
                ViewState::Study => rsx! { StudyView {} },
                ViewState::Complete => rsx! { CompleteView {} },
            }
        }
    }
}

#[cfg(test)]
#[derive(Clone, Default)]
pub(crate) struct StudyTestHandles {
    controller: Rc<RefCell<Option<StudyController>>>,
}

#[cfg(test)]
impl StudyTestHandles {
    pub(crate) fn register(&self, controller: StudyController) {
        *self.controller.borrow_mut() = Some(controller);
    }

    pub(crate) fn controller(&self) -> StudyController {
        (*self.controller.borrow()).expect("study controller registered")
    }
}
