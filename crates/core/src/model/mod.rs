mod card;
mod deck;
mod study_mode;
pub mod text;

pub use card::{CardError, Flashcard};
pub use deck::{DeckError, GENERIC_TOPIC_LABEL, MAX_TOPIC_LABEL_CHARS, StudySet, looks_like_content};
pub use study_mode::{StudyMode, StudyModeParseError};
pub use text::{DefinitionText, TermText, TextError};
