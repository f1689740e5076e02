use dioxus::core::Task;
use flash_core::model::StudyMode;
use flash_core::{Effect, Notice, Session, SessionError, SessionEvent, ViewState};

/// Longest source excerpt shown before studying, in chars.
pub const SOURCE_PREVIEW_CHARS: usize = 600;

/// Session state plus the handle of the live countdown ticker.
#[derive(Default)]
pub struct StudyVm {
    session: Session,
    ticker: Option<Task>,
}

impl StudyVm {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn session(&self) -> &Session {
        &self.session
    }

    #[must_use]
    pub fn view(&self) -> ViewState {
        self.session.view()
    }

    /// Apply an event to the session.
    ///
    /// # Errors
    ///
    /// Returns the session's rejection unchanged; the session records a
    /// notice where the user needs to see one.
    pub fn dispatch(&mut self, event: SessionEvent) -> Result<Vec<Effect>, SessionError> {
        let name = event.name();
        let from = self.session.view();
        let result = self.session.apply(event);
        match &result {
            Ok(_) if self.session.view() != from => {
                tracing::debug!(event = name, %from, to = %self.session.view(), "view changed");
            }
            Ok(_) => {}
            Err(err) => tracing::debug!(event = name, error = %err, "session event rejected"),
        }
        result
    }

    pub fn set_notice(&mut self, notice: Notice) {
        self.session.set_notice(notice);
    }

    /// Store a new ticker, returning the one it replaces.
    pub fn replace_ticker(&mut self, task: Task) -> Option<Task> {
        self.ticker.replace(task)
    }

    pub fn take_ticker(&mut self) -> Option<Task> {
        self.ticker.take()
    }

    #[must_use]
    pub fn has_ticker(&self) -> bool {
        self.ticker.is_some()
    }
}

/// Header data for the screen shown before a timed session.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PreStudyVm {
    pub topic: String,
    pub card_count_label: String,
    pub source_preview: Option<String>,
    pub mode: StudyMode,
}

#[must_use]
pub fn map_pre_study(session: &Session) -> Option<PreStudyVm> {
    let set = session.study_set()?;
    Some(PreStudyVm {
        topic: set.topic().to_owned(),
        card_count_label: card_count_label(set.len()),
        source_preview: set
            .source_content()
            .map(|source| truncate_preview(source, SOURCE_PREVIEW_CHARS)),
        mode: session.mode(),
    })
}

/// The single card shown while the countdown runs.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StudyCardVm {
    pub clock: String,
    pub position: String,
    pub face: String,
    pub face_label: &'static str,
    pub flipped: bool,
    pub can_navigate: bool,
}

#[must_use]
pub fn map_study_card(session: &Session) -> Option<StudyCardVm> {
    let face = session.visible_face()?;
    let countdown = session.countdown()?;
    let cursor = session.cursor();
    Some(StudyCardVm {
        clock: countdown.label(),
        position: cursor.position_label(),
        face: face.to_owned(),
        face_label: face_label(session.mode(), session.flipped()),
        flipped: session.flipped(),
        can_navigate: cursor.can_navigate(),
    })
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CompleteVm {
    pub topic: String,
    pub card_count_label: String,
}

#[must_use]
pub fn map_complete(session: &Session) -> Option<CompleteVm> {
    let set = session.study_set()?;
    Some(CompleteVm {
        topic: set.topic().to_owned(),
        card_count_label: card_count_label(set.len()),
    })
}

fn face_label(mode: StudyMode, flipped: bool) -> &'static str {
    match (mode, flipped) {
        (StudyMode::TermFirst, false) | (StudyMode::DefinitionFirst, true) => "Term",
        (StudyMode::TermFirst, true) | (StudyMode::DefinitionFirst, false) => "Definition",
    }
}

fn card_count_label(count: usize) -> String {
    if count == 1 {
        "1 card".to_owned()
    } else {
        format!("{count} cards")
    }
}

fn truncate_preview(text: &str, max_chars: usize) -> String {
    let trimmed = text.trim();
    match trimmed.char_indices().nth(max_chars) {
        Some((idx, _)) => format!("{}...", &trimmed[..idx]),
        None => trimmed.to_owned(),
    }
}
