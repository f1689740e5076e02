use std::time::Duration;

use flash_core::{SessionEvent, ViewState};

use super::test_harness::{Reply, setup_study_harness};
use crate::vm::{GenerateForm, StudyVm};

const SPANISH_REPLY: &str = "Hola: Hello\nAdios: Goodbye\nGracias: Thank you";

fn topic_form(topic: &str) -> GenerateForm {
    GenerateForm {
        topic: topic.to_string(),
        ..GenerateForm::default()
    }
}

#[tokio::test(flavor = "current_thread")]
async fn generation_form_is_the_initial_screen() {
    let mut harness = setup_study_harness(Reply::Text(SPANISH_REPLY));
    harness.rebuild();
    let html = harness.render();
    assert!(html.contains("Create a study set"), "missing form in {html}");
    assert!(html.contains("Generate flashcards"), "missing button in {html}");
    assert!(!html.contains("Start studying"), "pre-study leaked into {html}");
    assert!(!html.contains("Time's up"), "complete leaked into {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn successful_generation_opens_pre_study() {
    let mut harness = setup_study_harness(Reply::Text(SPANISH_REPLY));
    harness.set_form(topic_form("Spanish greetings"));
    harness.generate();
    harness.drive_async().await;

    let html = harness.render();
    assert!(html.contains("Spanish greetings"), "missing topic in {html}");
    assert!(html.contains("3 cards ready to study"), "missing count in {html}");
    assert!(html.contains("Start studying"), "missing start in {html}");
    assert!(!html.contains("Create a study set"), "form still visible in {html}");
    assert!(!harness.is_busy());
}

#[tokio::test(flavor = "current_thread")]
async fn backend_failure_keeps_the_form() {
    let mut harness = setup_study_harness(Reply::Fail("TypeError: Failed to fetch"));
    harness.set_form(topic_form("Spanish greetings"));
    harness.generate();
    harness.drive_async().await;

    let html = harness.render();
    assert!(html.contains("Network error"), "missing error in {html}");
    assert!(html.contains("Create a study set"), "form missing in {html}");
    assert!(html.contains("Spanish greetings"), "input was cleared in {html}");
    assert!(!harness.is_busy());
}

#[tokio::test(flavor = "current_thread")]
async fn blank_topic_is_rejected_before_any_work() {
    let mut harness = setup_study_harness(Reply::Text(SPANISH_REPLY));
    harness.set_form(topic_form("  "));
    harness.generate();

    assert!(!harness.is_busy());
    let html = harness.render();
    assert!(
        html.contains("Please enter a topic or some content first"),
        "missing validation in {html}"
    );
}

#[tokio::test(flavor = "current_thread")]
async fn study_screen_navigates_and_flips() {
    let mut harness = setup_study_harness(Reply::Text(SPANISH_REPLY));
    harness.load_deck(
        "Spanish",
        &[("Hola", "Hello"), ("Adios", "Goodbye"), ("Gracias", "Thank you")],
    );

    harness.dispatch(SessionEvent::StartStudy {
        minutes: "0".into(),
    });
    let html = harness.render();
    assert!(html.contains("between 1 and 60 minutes"), "missing validation in {html}");
    assert!(html.contains("Start studying"), "left pre-study in {html}");

    harness.dispatch(SessionEvent::StartStudy {
        minutes: "1".into(),
    });
    let html = harness.render();
    assert!(html.contains("01:00"), "missing clock in {html}");
    assert!(html.contains("1 / 3"), "missing position in {html}");
    assert!(html.contains("Hola"), "missing front in {html}");
    assert!(harness.with_vm(StudyVm::has_ticker));

    for _ in 0..3 {
        harness.dispatch(SessionEvent::NextCard);
    }
    assert!(harness.render().contains("1 / 3"));
    harness.dispatch(SessionEvent::PreviousCard);
    let html = harness.render();
    assert!(html.contains("3 / 3"), "previous did not wrap in {html}");

    harness.dispatch(SessionEvent::FlipCard);
    let html = harness.render();
    assert!(html.contains("Thank you"), "flip did not show back in {html}");

    harness.dispatch(SessionEvent::StopStudy);
    let html = harness.render();
    assert!(html.contains("Start studying"), "stop did not return in {html}");
    assert!(!harness.with_vm(StudyVm::has_ticker));
}

#[tokio::test(flavor = "current_thread")]
async fn countdown_expiry_completes_and_resets() {
    let mut harness = setup_study_harness(Reply::Text(SPANISH_REPLY));
    harness.load_deck("Spanish", &[("Hola", "Hello")]);
    harness.dispatch(SessionEvent::StartStudy {
        minutes: "1".into(),
    });

    let html = harness.render();
    assert!(html.contains("disabled"), "single card should disable nav in {html}");

    for _ in 0..60 {
        harness.dispatch(SessionEvent::Tick);
    }
    let html = harness.render();
    assert!(html.contains("Time's up!"), "missing completion in {html}");
    assert!(!harness.with_vm(StudyVm::has_ticker));

    harness.dispatch(SessionEvent::StudyAgain);
    assert_eq!(harness.with_vm(StudyVm::view), ViewState::PreStudy);

    harness.set_form(topic_form("Spanish"));
    harness.dispatch(SessionEvent::GenerateNew);
    let html = harness.render();
    assert!(html.contains("Create a study set"), "missing form in {html}");
    assert_eq!(harness.form_topic(), "");
    assert!(harness.with_vm(|vm| vm.session().study_set().is_none()));
}

#[tokio::test(flavor = "current_thread", start_paused = true)]
async fn ticker_counts_down_to_completion() {
    let mut harness = setup_study_harness(Reply::Text(SPANISH_REPLY));
    harness.load_deck("Spanish", &[("Hola", "Hello"), ("Adios", "Goodbye")]);
    harness.dispatch(SessionEvent::StartStudy {
        minutes: "1".into(),
    });

    harness.run_for(Duration::from_millis(3_500)).await;
    assert_eq!(harness.remaining_seconds(), Some(57));
    assert!(harness.render().contains("00:57"));
    assert!(harness.with_vm(StudyVm::has_ticker));

    harness.run_for(Duration::from_secs(57)).await;
    assert_eq!(harness.with_vm(StudyVm::view), ViewState::Complete);
    assert!(!harness.with_vm(StudyVm::has_ticker));
    assert!(harness.render().contains("Time's up!"));

    harness.run_for(Duration::from_secs(5)).await;
    assert_eq!(harness.with_vm(StudyVm::view), ViewState::Complete);
}

#[tokio::test(flavor = "current_thread", start_paused = true)]
async fn stopping_cancels_the_ticker() {
    let mut harness = setup_study_harness(Reply::Text(SPANISH_REPLY));
    harness.load_deck("Spanish", &[("Hola", "Hello"), ("Adios", "Goodbye")]);
    harness.dispatch(SessionEvent::StartStudy {
        minutes: "1".into(),
    });
    harness.run_for(Duration::from_millis(2_500)).await;
    assert_eq!(harness.remaining_seconds(), Some(58));

    harness.dispatch(SessionEvent::StopStudy);
    assert!(!harness.with_vm(StudyVm::has_ticker));
    harness.run_for(Duration::from_secs(5)).await;
    assert_eq!(harness.with_vm(StudyVm::view), ViewState::PreStudy);
    assert_eq!(harness.remaining_seconds(), None);

    // A fresh session counts at one tick per second; a leaked task would
    // make it run fast.
    harness.dispatch(SessionEvent::StartStudy {
        minutes: "1".into(),
    });
    harness.run_for(Duration::from_millis(2_500)).await;
    assert_eq!(harness.remaining_seconds(), Some(58));
}

#[tokio::test(flavor = "current_thread")]
async fn study_panel_is_a_focus_target() {
    let mut harness = setup_study_harness(Reply::Text(SPANISH_REPLY));
    harness.load_deck("Spanish", &[("Hola", "Hello")]);
    harness.dispatch(SessionEvent::StartStudy {
        minutes: "1".into(),
    });
    let html = harness.render();
    assert!(html.contains("tabindex"), "study panel not focusable in {html}");
    assert!(html.contains("Hola"), "missing card in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn export_goes_through_the_sink() {
    let mut harness = setup_study_harness(Reply::Text(SPANISH_REPLY));
    harness.load_deck("Spanish Verbs", &[("Hola", "Hello"), ("Adios", "Goodbye")]);

    harness.dispatch(SessionEvent::Export);
    harness.drive_async().await;

    let saved = harness.sink.saved.lock().unwrap().clone();
    assert_eq!(
        saved,
        vec![(
            "Spanish_Verbs_flashcards.txt".to_string(),
            "Hola: Hello\nAdios: Goodbye".to_string()
        )]
    );
    let html = harness.render();
    assert!(html.contains("Exported to"), "missing notice in {html}");
}
