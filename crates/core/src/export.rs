use thiserror::Error;

use crate::model::StudySet;

const EXPORT_SUFFIX: &str = "flashcards.txt";

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ExportError {
    #[error("there is no study set to export")]
    NoDeck,
}

/// Serialize a study set as `term: definition` lines.
///
/// # Errors
///
/// Returns `ExportError::NoDeck` when there is no active set. A `StudySet`
/// always holds at least one card.
pub fn export_text(set: Option<&StudySet>) -> Result<String, ExportError> {
    let set = set.ok_or(ExportError::NoDeck)?;
    let lines: Vec<String> = set
        .cards()
        .iter()
        .map(|card| format!("{}: {}", card.term(), card.definition()))
        .collect();
    Ok(lines.join("\n"))
}

/// File name for an exported deck, derived from its topic.
#[must_use]
pub fn export_file_name(topic: &str) -> String {
    let stem: String = topic
        .trim()
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '_' })
        .collect();

    if stem.chars().all(|c| c == '_') {
        EXPORT_SUFFIX.to_owned()
    } else {
        format!("{stem}_{EXPORT_SUFFIX}")
    }
}
