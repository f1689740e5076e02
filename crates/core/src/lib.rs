#![forbid(unsafe_code)]

pub mod cursor;
pub mod error;
pub mod export;
pub mod model;
pub mod parse;
pub mod session;
pub mod timer;

pub use cursor::CardCursor;
pub use error::Error;
pub use export::{ExportError, export_file_name, export_text};
pub use parse::parse_flashcards;
pub use session::{Effect, Notice, NoticeKind, Session, SessionError, SessionEvent, ViewState};
pub use timer::{Countdown, StudyDuration, TickOutcome, TimerError, format_clock};
