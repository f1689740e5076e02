use thiserror::Error;

pub const MIN_STUDY_MINUTES: u32 = 1;
pub const MAX_STUDY_MINUTES: u32 = 60;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum TimerError {
    #[error("please enter the study time as a whole number of minutes")]
    NotANumber,
    #[error("study time must be between 1 and 60 minutes (got {minutes})")]
    OutOfRange { minutes: String },
}

/// A validated study length in whole minutes, within `[1, 60]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StudyDuration(u32);

impl StudyDuration {
    /// Parse user input such as `"15"`.
    ///
    /// # Errors
    ///
    /// Returns `TimerError::NotANumber` for non-numeric input and
    /// `TimerError::OutOfRange` outside `[1, 60]`.
    pub fn parse(raw: &str) -> Result<Self, TimerError> {
        let trimmed = raw.trim();
        let digits = trimmed.strip_prefix(['+', '-']).unwrap_or(trimmed);
        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return Err(TimerError::NotANumber);
        }
        // Digits that overflow `i64` are still a number, just far out of range.
        match trimmed.parse::<i64>() {
            Ok(minutes) => Self::from_minutes(minutes),
            Err(_) => Err(TimerError::OutOfRange {
                minutes: trimmed.to_owned(),
            }),
        }
    }

    /// # Errors
    ///
    /// Returns `TimerError::OutOfRange` outside `[1, 60]`.
    pub fn from_minutes(minutes: i64) -> Result<Self, TimerError> {
        match u32::try_from(minutes) {
            Ok(m) if (MIN_STUDY_MINUTES..=MAX_STUDY_MINUTES).contains(&m) => Ok(Self(m)),
            _ => Err(TimerError::OutOfRange {
                minutes: minutes.to_string(),
            }),
        }
    }

    #[must_use]
    pub fn minutes(self) -> u32 {
        self.0
    }

    #[must_use]
    pub fn seconds(self) -> u32 {
        self.0 * 60
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    Running { remaining: u32 },
    Expired,
}

/// Whole-second countdown, decremented once per tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Countdown {
    remaining: u32,
}

impl Countdown {
    #[must_use]
    pub fn new(duration: StudyDuration) -> Self {
        Self {
            remaining: duration.seconds(),
        }
    }

    #[must_use]
    pub fn remaining(&self) -> u32 {
        self.remaining
    }

    #[must_use]
    pub fn is_expired(&self) -> bool {
        self.remaining == 0
    }

    pub fn tick(&mut self) -> TickOutcome {
        self.remaining = self.remaining.saturating_sub(1);
        if self.remaining == 0 {
            TickOutcome::Expired
        } else {
            TickOutcome::Running {
                remaining: self.remaining,
            }
        }
    }

    #[must_use]
    pub fn label(&self) -> String {
        format_clock(self.remaining)
    }
}

/// Render seconds as `MM:SS`.
#[must_use]
pub fn format_clock(seconds: u32) -> String {
    let minutes = seconds / 60;
    let remainder = seconds % 60;
    format!("{minutes:02}:{remainder:02}")
}
