use core::fmt;

/// Why a score submission was rejected.
///
/// Variants follow the validator's stage order. `Display` renders the reason
/// string returned to clients; [`SubmissionError::code`] is the stable
/// machine-readable form.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SubmissionError {
    InvalidToken,
    SessionAlreadyUsed,
    InvalidNameLength,
    InvalidNameCharset,
    InvalidScoreOrWave,
    GameTooShort,
    ScoreTooHighForWave,
    ScoreRateTooHigh,
}

impl SubmissionError {
    pub fn code(self) -> &'static str {
        match self {
            Self::InvalidToken => "invalid_token",
            Self::SessionAlreadyUsed => "session_already_used",
            Self::InvalidNameLength => "invalid_name_length",
            Self::InvalidNameCharset => "invalid_name_charset",
            Self::InvalidScoreOrWave => "invalid_score_or_wave",
            Self::GameTooShort => "game_too_short",
            Self::ScoreTooHighForWave => "score_too_high_for_wave",
            Self::ScoreRateTooHigh => "score_rate_too_high",
        }
    }

    /// True for the stages that can only fail for a forged or reused session.
    pub fn is_auth_failure(self) -> bool {
        matches!(self, Self::InvalidToken | Self::SessionAlreadyUsed)
    }
}

impl fmt::Display for SubmissionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidToken => write!(f, "invalid token"),
            Self::SessionAlreadyUsed => write!(f, "session already used"),
            Self::InvalidNameLength => write!(f, "name must be 3-8 characters"),
            Self::InvalidNameCharset => write!(f, "name must be alphanumeric"),
            Self::InvalidScoreOrWave => write!(f, "invalid score or wave"),
            Self::GameTooShort => write!(f, "game too short"),
            Self::ScoreTooHighForWave => write!(f, "score too high for wave"),
            Self::ScoreRateTooHigh => write!(f, "score rate too high"),
        }
    }
}

impl std::error::Error for SubmissionError {}
