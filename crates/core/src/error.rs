use thiserror::Error;

use crate::export::ExportError;
use crate::model::{CardError, DeckError, TextError};
use crate::session::SessionError;
use crate::timer::TimerError;

#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Text(#[from] TextError),
    #[error(transparent)]
    Card(#[from] CardError),
    #[error(transparent)]
    Deck(#[from] DeckError),
    #[error(transparent)]
    Timer(#[from] TimerError),
    #[error(transparent)]
    Export(#[from] ExportError),
    #[error(transparent)]
    Session(#[from] SessionError),
}
