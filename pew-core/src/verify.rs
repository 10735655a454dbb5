use std::collections::{HashSet, VecDeque};
use std::sync::{Mutex, MutexGuard, PoisonError};

use serde::{Deserialize, Serialize};

use crate::clock::{Clock, SystemClock};
use crate::constants::{
    BASE_ENEMIES, ENEMIES_PER_WAVE, MAX_SCORE_PER_ENEMY, MAX_SCORE_PER_SEC, MAX_USED_SESSIONS,
    MIN_GAME_SECS, NAME_MAX_LEN, NAME_MIN_LEN, NUKE_SCORE_BUFFER_DEN, NUKE_SCORE_BUFFER_NUM,
};
use crate::error::SubmissionError;
use crate::session::{SessionSigner, SessionToken};

/// A final score as reported by the client.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreSubmission {
    pub name: String,
    pub score: i64,
    pub wave: i64,
    pub session_id: String,
    pub start_time: i64,
    pub token: String,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ValidatedSubmission {
    /// Trimmed, upper-cased display name.
    pub name: String,
    pub score: i64,
    pub wave: i64,
    /// Server-observed game length in seconds.
    pub duration: f64,
}

/// Sessions that already produced an accepted score.
///
/// Bounded: once over capacity the oldest insertion is evicted, regardless of
/// how recently it was looked up.
#[derive(Debug)]
pub struct ReplayGuard {
    capacity: usize,
    order: VecDeque<String>,
    used: HashSet<String>,
}

impl Default for ReplayGuard {
    fn default() -> Self {
        Self::with_capacity(MAX_USED_SESSIONS)
    }
}

impl ReplayGuard {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            capacity,
            order: VecDeque::new(),
            used: HashSet::new(),
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Number of sessions currently remembered.
    pub fn used(&self) -> usize {
        self.used.len()
    }

    pub fn contains(&self, session_id: &str) -> bool {
        self.used.contains(session_id)
    }

    /// Marks a session consumed. Returns false if it already was.
    pub fn insert(&mut self, session_id: &str) -> bool {
        if !self.used.insert(session_id.to_string()) {
            return false;
        }
        self.order.push_back(session_id.to_string());
        while self.used.len() > self.capacity {
            match self.order.pop_front() {
                Some(oldest) => {
                    self.used.remove(&oldest);
                }
                None => break,
            }
        }
        true
    }
}

/// Upper bound on the score reachable by the end of `wave`.
///
/// Every enemy of every wave up to `wave` counted at tank value, plus half
/// again for nuke kills: `floor(1.5 * 30 * sum(5 + 3w))`. `None` means the
/// bound does not fit in an `i64` and so cannot reject anything.
pub fn max_plausible_score(wave: i64) -> Option<i64> {
    if wave < 1 {
        return Some(0);
    }
    let n = i128::from(wave);
    let base = i128::from(BASE_ENEMIES);
    let step = i128::from(ENEMIES_PER_WAVE);

    // sum_{w=1..n} (base + step*w) = base*n + step*n*(n+1)/2
    let enemies = base
        .checked_mul(n)?
        .checked_add(step.checked_mul(n)?.checked_mul(n + 1)? / 2)?;
    let total = enemies.checked_mul(i128::from(MAX_SCORE_PER_ENEMY))?;
    let bounded = total.checked_mul(NUKE_SCORE_BUFFER_NUM)? / NUKE_SCORE_BUFFER_DEN;
    i64::try_from(bounded).ok()
}

/// Stored form of an accepted name.
pub fn sanitize_name(name: &str) -> String {
    name.trim()
        .to_uppercase()
        .chars()
        .take(NAME_MAX_LEN)
        .collect()
}

fn check_name(name: &str) -> Result<(), SubmissionError> {
    let trimmed = name.trim();
    // Length is measured in UTF-16 units, the way browser clients count it.
    let len = trimmed.encode_utf16().count();
    if !(NAME_MIN_LEN..=NAME_MAX_LEN).contains(&len) {
        return Err(SubmissionError::InvalidNameLength);
    }
    if !trimmed.chars().all(|c| c.is_ascii_alphanumeric()) {
        return Err(SubmissionError::InvalidNameCharset);
    }
    Ok(())
}

/// Checks client-reported scores against their signed session.
///
/// Stages run in a fixed order and stop at the first failure. The replay
/// guard is locked for the whole pipeline and only written once every stage
/// has passed, so a rejected attempt never consumes its session and two
/// concurrent submissions for one session cannot both succeed.
pub struct SubmissionValidator<C = SystemClock> {
    signer: SessionSigner,
    guard: Mutex<ReplayGuard>,
    clock: C,
}

impl SubmissionValidator<SystemClock> {
    pub fn new(signer: SessionSigner, guard: ReplayGuard) -> Self {
        Self::with_clock(signer, guard, SystemClock)
    }
}

impl<C: Clock> SubmissionValidator<C> {
    pub fn with_clock(signer: SessionSigner, guard: ReplayGuard, clock: C) -> Self {
        Self {
            signer,
            guard: Mutex::new(guard),
            clock,
        }
    }

    pub fn signer(&self) -> &SessionSigner {
        &self.signer
    }

    /// Mints a token stamped with this validator's clock.
    pub fn issue_session(&self) -> SessionToken {
        self.signer.issue(&self.clock)
    }

    pub fn used_sessions(&self) -> usize {
        self.lock_guard().used()
    }

    pub fn max_used_sessions(&self) -> usize {
        self.lock_guard().capacity()
    }

    pub fn validate(&self, sub: &ScoreSubmission) -> Result<ValidatedSubmission, SubmissionError> {
        if !self.signer.verify(&sub.session_id, sub.start_time, &sub.token) {
            return Err(SubmissionError::InvalidToken);
        }

        let mut guard = self.lock_guard();
        if guard.contains(&sub.session_id) {
            return Err(SubmissionError::SessionAlreadyUsed);
        }

        check_name(&sub.name)?;

        if sub.score < 0 || sub.wave < 1 {
            return Err(SubmissionError::InvalidScoreOrWave);
        }

        let duration = self.clock.now_ms().saturating_sub(sub.start_time) as f64 / 1000.0;
        if duration < MIN_GAME_SECS {
            return Err(SubmissionError::GameTooShort);
        }

        if let Some(max_score) = max_plausible_score(sub.wave) {
            if sub.score > max_score {
                return Err(SubmissionError::ScoreTooHighForWave);
            }
        }

        if sub.score as f64 > duration * MAX_SCORE_PER_SEC {
            return Err(SubmissionError::ScoreRateTooHigh);
        }

        guard.insert(&sub.session_id);

        Ok(ValidatedSubmission {
            name: sanitize_name(&sub.name),
            score: sub.score,
            wave: sub.wave,
            duration,
        })
    }

    fn lock_guard(&self) -> MutexGuard<'_, ReplayGuard> {
        self.guard.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
