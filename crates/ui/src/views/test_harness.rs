use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use dioxus::core::NoOpMutations;
use dioxus::prelude::*;
use flash_core::{Countdown, SessionEvent};
use flash_core::model::{Flashcard, StudySet};
use services::{
    CompletionBackend, CompletionError, DeckBuilder, DocxExtractor, ExportSink, ExportSinkError,
    GeneratorService, ImportService, PopplerLoader,
};

use crate::context::{UiApp, build_app_context};
use crate::views::root::StudyTestHandles;
use crate::views::{StudyController, StudyRoot};
use crate::vm::{GenerateForm, StudyVm};

/// What the stub backend answers.
#[derive(Clone, Copy)]
pub enum Reply {
    Text(&'static str),
    Fail(&'static str),
}

struct StubBackend {
    reply: Reply,
}

#[async_trait]
impl CompletionBackend for StubBackend {
    async fn complete(&self, _prompt: &str) -> Result<String, CompletionError> {
        match self.reply {
            Reply::Text(text) => Ok(text.to_string()),
            Reply::Fail(message) => Err(CompletionError::Other(message.to_string())),
        }
    }
}

#[derive(Default)]
pub struct MemorySink {
    pub saved: Mutex<Vec<(String, String)>>,
}

#[async_trait]
impl ExportSink for MemorySink {
    async fn save(&self, file_name: &str, contents: &str) -> Result<PathBuf, ExportSinkError> {
        self.saved
            .lock()
            .unwrap()
            .push((file_name.to_string(), contents.to_string()));
        Ok(PathBuf::from("/exports").join(file_name))
    }
}

struct TestApp {
    generator: Arc<GeneratorService>,
    sink: Arc<MemorySink>,
}

impl UiApp for TestApp {
    fn generator(&self) -> Arc<GeneratorService> {
        Arc::clone(&self.generator)
    }

    fn export_sink(&self) -> Arc<dyn ExportSink> {
        self.sink.clone()
    }
}

#[derive(Props, Clone)]
struct HarnessProps {
    app: Arc<TestApp>,
    handles: StudyTestHandles,
}

impl PartialEq for HarnessProps {
    fn eq(&self, _other: &Self) -> bool {
        true
    }
}

#[component]
fn HarnessRoot(props: HarnessProps) -> Element {
    let app: Arc<dyn UiApp> = props.app.clone();
    use_context_provider(|| build_app_context(&app));
    use_context_provider(|| props.handles.clone());
    rsx! { StudyRoot {} }
}

pub struct StudyHarness {
    pub dom: VirtualDom,
    pub sink: Arc<MemorySink>,
    handles: StudyTestHandles,
}

impl StudyHarness {
    pub fn rebuild(&mut self) {
        self.dom.rebuild_in_place();
        drive_dom(&mut self.dom);
    }

    pub fn drive(&mut self) {
        drive_dom(&mut self.dom);
    }

    pub async fn drive_async(&mut self) {
        for _ in 0..3 {
            let _ = tokio::time::timeout(
                Duration::from_millis(50),
                self.dom.wait_for_work(),
            )
            .await;
            self.dom.render_immediate(&mut NoOpMutations);
            self.dom.process_events();
        }
    }

    /// Let (paused) tokio time run for `duration`, polling spawned tasks and
    /// re-rendering after each wake-up.
    pub async fn run_for(&mut self, duration: Duration) {
        let deadline = tokio::time::Instant::now() + duration;
        while tokio::time::Instant::now() < deadline {
            let _ = tokio::time::timeout_at(deadline, self.dom.wait_for_work()).await;
            self.dom.render_immediate(&mut NoOpMutations);
            self.dom.process_events();
        }
    }

    pub fn render(&self) -> String {
        dioxus_ssr::render(&self.dom)
    }

    pub fn controller(&self) -> StudyController {
        self.handles.controller()
    }

    pub fn dispatch(&mut self, event: SessionEvent) {
        let dispatch = self.controller().dispatch;
        self.dom.in_runtime(|| dispatch.call(event));
        self.drive();
    }

    pub fn generate(&mut self) {
        let generate = self.controller().generate;
        self.dom.in_runtime(|| generate.call(()));
        self.drive();
    }

    pub fn set_form(&self, form: GenerateForm) {
        let mut signal = self.controller().form;
        self.dom.in_runtime(|| signal.set(form));
    }

    /// Read the view model without subscribing.
    pub fn with_vm<T>(&self, read: impl FnOnce(&StudyVm) -> T) -> T {
        let vm = self.controller().vm;
        self.dom.in_runtime(|| read(&vm.peek()))
    }

    pub fn is_busy(&self) -> bool {
        let busy = self.controller().busy;
        self.dom.in_runtime(|| *busy.peek())
    }

    pub fn remaining_seconds(&self) -> Option<u32> {
        self.with_vm(|vm| vm.session().countdown().map(Countdown::remaining))
    }

    pub fn form_topic(&self) -> String {
        let form = self.controller().form;
        self.dom.in_runtime(|| form.peek().topic.clone())
    }

    /// Skip the backend and load a deck straight into pre-study.
    pub fn load_deck(&mut self, topic: &str, cards: &[(&str, &str)]) {
        let cards = cards
            .iter()
            .map(|(term, definition)| Flashcard::new(*term, *definition).unwrap())
            .collect();
        let set = StudySet::new(topic, cards, None).unwrap();
        self.dispatch(SessionEvent::DeckGenerated(set));
    }
}

pub fn drive_dom(dom: &mut VirtualDom) {
    dom.process_events();
    dom.render_immediate(&mut NoOpMutations);
    dom.process_events();
}

pub fn setup_study_harness(reply: Reply) -> StudyHarness {
    let backend = Arc::new(StubBackend { reply });
    let generator = Arc::new(GeneratorService::new(
        DeckBuilder::new(backend),
        ImportService::new(Arc::new(DocxExtractor), Arc::new(PopplerLoader), None),
    ));
    let sink = Arc::new(MemorySink::default());
    let handles = StudyTestHandles::default();

    let app = Arc::new(TestApp {
        generator,
        sink: Arc::clone(&sink),
    });
    let mut dom = VirtualDom::new_with_props(
        HarnessRoot,
        HarnessProps {
            app,
            handles: handles.clone(),
        },
    );
    dom.rebuild_in_place();
    drive_dom(&mut dom);

    StudyHarness { dom, sink, handles }
}
