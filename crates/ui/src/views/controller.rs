use std::sync::Arc;
use std::time::Duration;

use dioxus::prelude::*;
use flash_core::{Effect, Notice, SessionEvent};
use services::{ExportSink, ImportStatus};
use tokio::time::MissedTickBehavior;

use crate::context::AppContext;
use crate::vm::{GenerateForm, GenerateRequest, StudyVm};

const TICK_PERIOD: Duration = Duration::from_secs(1);

/// Initial value of the minutes box.
pub const DEFAULT_STUDY_MINUTES: &str = "5";

/// Signals and actions shared by every screen of the study flow.
#[derive(Clone, Copy)]
pub struct StudyController {
    pub vm: Signal<StudyVm>,
    pub form: Signal<GenerateForm>,
    pub minutes: Signal<String>,
    pub busy: Signal<bool>,
    pub progress: SyncSignal<Option<String>>,
    pub dispatch: Callback<SessionEvent>,
    pub generate: Callback<()>,
}

/// Create the controller and provide it to descendants.
pub fn use_study_controller() -> StudyController {
    let ctx = use_context::<AppContext>();
    let vm = use_signal(StudyVm::new);
    let form = use_signal(GenerateForm::default);
    let minutes = use_signal(|| DEFAULT_STUDY_MINUTES.to_owned());
    let busy = use_signal(|| false);
    let progress = use_signal_sync(|| None::<String>);

    let export_sink = ctx.export_sink();
    let dispatch = use_callback(move |event: SessionEvent| {
        let mut vm = vm;
        let result = vm.write().dispatch(event);
        let Ok(effects) = result else {
            return;
        };
        for effect in effects {
            match effect {
                Effect::StartTicker => start_ticker(vm),
                Effect::StopTicker => stop_ticker(vm),
                Effect::ClearInput => {
                    let mut form = form;
                    let mut progress = progress;
                    form.set(GenerateForm::default());
                    progress.set(None);
                }
                Effect::Export {
                    file_name,
                    contents,
                } => save_export(vm, Arc::clone(&export_sink), file_name, contents),
            }
        }
    });

    let generator = ctx.generator();
    let generate = use_callback(move |()| {
        let mut busy = busy;
        let mut progress = progress;
        if *busy.peek() {
            return;
        }

        let request = match form.peek().request() {
            Ok(request) => request,
            Err(err) => {
                dispatch.call(SessionEvent::GenerationFailed(err.user_message()));
                return;
            }
        };

        dispatch.call(SessionEvent::DismissNotice);
        busy.set(true);
        progress.set(Some(ImportStatus::Generating.to_string()));

        let generator = Arc::clone(&generator);
        spawn(async move {
            let on_progress = move |status: ImportStatus| {
                let mut progress = progress;
                progress.set(Some(status.to_string()));
            };
            let result = match &request {
                GenerateRequest::Topic(topic) => generator.generate_from_topic(topic).await,
                GenerateRequest::File(file) => {
                    generator.generate_from_file(file, &on_progress).await
                }
            };

            // Controls come back whatever the outcome.
            busy.set(false);
            progress.set(None);

            match result {
                Ok(set) => dispatch.call(SessionEvent::DeckGenerated(set)),
                Err(err) => {
                    tracing::warn!(error = %err, "generation failed");
                    dispatch.call(SessionEvent::GenerationFailed(err.user_message()));
                }
            }
        });
    });

    use_context_provider(|| StudyController {
        vm,
        form,
        minutes,
        busy,
        progress,
        dispatch,
        generate,
    })
}

fn start_ticker(mut vm: Signal<StudyVm>) {
    stop_ticker(vm);
    let task = spawn(async move {
        let mut interval = tokio::time::interval(TICK_PERIOD);
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
        // The first tick completes immediately.
        interval.tick().await;
        loop {
            interval.tick().await;
            if !tick(vm) {
                break;
            }
        }
    });
    vm.write().replace_ticker(task);
}

/// Advance the countdown once; `false` once the ticker should end.
fn tick(mut vm: Signal<StudyVm>) -> bool {
    let result = vm.write().dispatch(SessionEvent::Tick);
    match result {
        Ok(effects) if !effects.contains(&Effect::StopTicker) => true,
        _ => {
            vm.write().take_ticker();
            false
        }
    }
}

fn stop_ticker(mut vm: Signal<StudyVm>) {
    let previous = vm.write().take_ticker();
    if let Some(task) = previous {
        task.cancel();
    }
}

fn save_export(
    mut vm: Signal<StudyVm>,
    sink: Arc<dyn ExportSink>,
    file_name: String,
    contents: String,
) {
    spawn(async move {
        let notice = match sink.save(&file_name, &contents).await {
            Ok(path) => Notice::info(format!("Exported to {}", path.display())),
            Err(err) => {
                tracing::warn!(error = %err, "export failed");
                Notice::error(format!("Export failed: {err}"))
            }
        };
        vm.write().set_notice(notice);
    });
}
