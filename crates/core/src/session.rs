//! The study session state machine.
//!
//! A [`Session`] owns the active deck and moves between four views:
//! generation, pre-study, study and complete. Every change goes through
//! [`Session::apply`], which returns the side effects the caller must run
//! (starting or stopping the one-second ticker, clearing the input form,
//! writing an export).

use std::fmt;

use thiserror::Error;

use crate::cursor::CardCursor;
use crate::export::{ExportError, export_file_name, export_text};
use crate::model::{Flashcard, StudyMode, StudySet};
use crate::timer::{Countdown, StudyDuration, TickOutcome, TimerError};

//
// ─── STATES, EVENTS, EFFECTS ───────────────────────────────────────────────────
//

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum ViewState {
    #[default]
    Generation,
    PreStudy,
    Study,
    Complete,
}

impl fmt::Display for ViewState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Generation => "generation",
            Self::PreStudy => "pre-study",
            Self::Study => "study",
            Self::Complete => "complete",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionEvent {
    DeckGenerated(StudySet),
    GenerationFailed(String),
    StartStudy { minutes: String },
    Tick,
    StopStudy,
    StudyAgain,
    GenerateNew,
    NextCard,
    PreviousCard,
    FlipCard,
    SetStudyMode(StudyMode),
    Export,
    DismissNotice,
}

impl SessionEvent {
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::DeckGenerated(_) => "deck-generated",
            Self::GenerationFailed(_) => "generation-failed",
            Self::StartStudy { .. } => "start-study",
            Self::Tick => "tick",
            Self::StopStudy => "stop-study",
            Self::StudyAgain => "study-again",
            Self::GenerateNew => "generate-new",
            Self::NextCard => "next-card",
            Self::PreviousCard => "previous-card",
            Self::FlipCard => "flip-card",
            Self::SetStudyMode(_) => "set-study-mode",
            Self::Export => "export",
            Self::DismissNotice => "dismiss-notice",
        }
    }
}

/// Work the caller performs after a transition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    StartTicker,
    StopTicker,
    ClearInput,
    Export { file_name: String, contents: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Info,
    Error,
}

/// A status or error line shown to the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub message: String,
}

impl Notice {
    #[must_use]
    pub fn info(message: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Info,
            message: message.into(),
        }
    }

    #[must_use]
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Error,
            message: message.into(),
        }
    }

    #[must_use]
    pub fn is_error(&self) -> bool {
        self.kind == NoticeKind::Error
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum SessionError {
    #[error("cannot handle {event} while in the {from} view")]
    InvalidTransition { from: ViewState, event: &'static str },
    #[error(transparent)]
    InvalidDuration(#[from] TimerError),
    #[error(transparent)]
    Export(#[from] ExportError),
}

//
// ─── SESSION ───────────────────────────────────────────────────────────────────
//

#[derive(Debug, Clone, Default)]
pub struct Session {
    view: ViewState,
    study_set: Option<StudySet>,
    countdown: Option<Countdown>,
    ticker_live: bool,
    cursor: CardCursor,
    mode: StudyMode,
    flipped: bool,
    notice: Option<Notice>,
}

impl Session {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn view(&self) -> ViewState {
        self.view
    }

    #[must_use]
    pub fn study_set(&self) -> Option<&StudySet> {
        self.study_set.as_ref()
    }

    #[must_use]
    pub fn countdown(&self) -> Option<&Countdown> {
        self.countdown.as_ref()
    }

    #[must_use]
    pub fn ticker_live(&self) -> bool {
        self.ticker_live
    }

    #[must_use]
    pub fn cursor(&self) -> CardCursor {
        self.cursor
    }

    #[must_use]
    pub fn mode(&self) -> StudyMode {
        self.mode
    }

    #[must_use]
    pub fn flipped(&self) -> bool {
        self.flipped
    }

    #[must_use]
    pub fn notice(&self) -> Option<&Notice> {
        self.notice.as_ref()
    }

    #[must_use]
    pub fn current_card(&self) -> Option<&Flashcard> {
        self.study_set
            .as_ref()
            .and_then(|set| set.card(self.cursor.index()))
    }

    /// Text on the visible face of the current card.
    #[must_use]
    pub fn visible_face(&self) -> Option<&str> {
        let card = self.current_card()?;
        Some(if self.flipped {
            self.mode.back(card)
        } else {
            self.mode.front(card)
        })
    }

    /// Apply one event and return the effects the caller must execute.
    ///
    /// Failed events leave the view and deck untouched. Duration and export
    /// failures additionally surface as an error notice.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::InvalidTransition` when the event does not apply
    /// to the current view, `SessionError::InvalidDuration` for a rejected
    /// study length and `SessionError::Export` when there is nothing to export.
    pub fn apply(&mut self, event: SessionEvent) -> Result<Vec<Effect>, SessionError> {
        let from = self.view;
        let name = event.name();
        let invalid = || SessionError::InvalidTransition { from, event: name };

        match event {
            SessionEvent::DeckGenerated(set) => {
                if from != ViewState::Generation {
                    return Err(invalid());
                }
                self.notice = Some(Notice::info(format!(
                    "Generated {} flashcards.",
                    set.len()
                )));
                self.cursor = CardCursor::new(set.len());
                self.study_set = Some(set);
                self.flipped = false;
                self.view = ViewState::PreStudy;
                Ok(Vec::new())
            }
            SessionEvent::GenerationFailed(message) => {
                if from != ViewState::Generation {
                    return Err(invalid());
                }
                self.notice = Some(Notice::error(message));
                Ok(Vec::new())
            }
            SessionEvent::StartStudy { minutes } => {
                if from != ViewState::PreStudy || self.study_set.is_none() {
                    return Err(invalid());
                }
                let duration = match StudyDuration::parse(&minutes) {
                    Ok(duration) => duration,
                    Err(err) => {
                        self.notice = Some(Notice::error(err.to_string()));
                        return Err(err.into());
                    }
                };
                let mut effects = self.stop_ticker();
                self.countdown = Some(Countdown::new(duration));
                self.ticker_live = true;
                self.flipped = false;
                self.notice = None;
                self.view = ViewState::Study;
                effects.push(Effect::StartTicker);
                Ok(effects)
            }
            SessionEvent::Tick => {
                if from != ViewState::Study {
                    return Err(invalid());
                }
                let Some(countdown) = self.countdown.as_mut() else {
                    return Err(invalid());
                };
                match countdown.tick() {
                    TickOutcome::Running { .. } => Ok(Vec::new()),
                    TickOutcome::Expired => {
                        let effects = self.stop_ticker();
                        self.view = ViewState::Complete;
                        Ok(effects)
                    }
                }
            }
            SessionEvent::StopStudy => {
                if from != ViewState::Study {
                    return Err(invalid());
                }
                let effects = self.stop_ticker();
                self.countdown = None;
                self.flipped = false;
                self.view = ViewState::PreStudy;
                Ok(effects)
            }
            SessionEvent::StudyAgain => {
                if from != ViewState::Complete {
                    return Err(invalid());
                }
                self.countdown = None;
                self.cursor.reset();
                self.flipped = false;
                self.view = ViewState::PreStudy;
                Ok(Vec::new())
            }
            SessionEvent::GenerateNew => {
                let mut effects = self.stop_ticker();
                self.study_set = None;
                self.countdown = None;
                self.cursor = CardCursor::default();
                self.flipped = false;
                self.notice = None;
                self.view = ViewState::Generation;
                effects.push(Effect::ClearInput);
                Ok(effects)
            }
            SessionEvent::NextCard => {
                if from != ViewState::Study {
                    return Err(invalid());
                }
                self.step(CardCursor::next);
                Ok(Vec::new())
            }
            SessionEvent::PreviousCard => {
                if from != ViewState::Study {
                    return Err(invalid());
                }
                self.step(CardCursor::previous);
                Ok(Vec::new())
            }
            SessionEvent::FlipCard => {
                if from != ViewState::Study {
                    return Err(invalid());
                }
                self.flipped = !self.flipped;
                Ok(Vec::new())
            }
            SessionEvent::SetStudyMode(mode) => {
                self.mode = mode;
                self.flipped = false;
                Ok(Vec::new())
            }
            SessionEvent::Export => match export_text(self.study_set.as_ref()) {
                Ok(contents) => {
                    let topic = self.study_set.as_ref().map_or("", StudySet::topic);
                    Ok(vec![Effect::Export {
                        file_name: export_file_name(topic),
                        contents,
                    }])
                }
                Err(err) => {
                    self.notice = Some(Notice::error(err.to_string()));
                    Err(err.into())
                }
            },
            SessionEvent::DismissNotice => {
                self.notice = None;
                Ok(Vec::new())
            }
        }
    }

    /// Record a status line without changing the view.
    pub fn set_notice(&mut self, notice: Notice) {
        self.notice = Some(notice);
    }

    fn step(&mut self, move_cursor: fn(&mut CardCursor) -> usize) {
        if self.cursor.can_navigate() {
            move_cursor(&mut self.cursor);
            self.flipped = false;
        }
    }

    fn stop_ticker(&mut self) -> Vec<Effect> {
        if self.ticker_live {
            self.ticker_live = false;
            vec![Effect::StopTicker]
        } else {
            Vec::new()
        }
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
