pub mod clock;
pub mod constants;
pub mod error;
pub mod rng;
pub mod session;
pub mod sim;
pub mod verify;

pub use clock::{Clock, FrameClock, SystemClock};
pub use error::SubmissionError;
pub use rng::{RandomSource, SeededRng, ThreadRandom};
pub use session::{SessionSigner, SessionToken};
pub use verify::{
    max_plausible_score, sanitize_name, ReplayGuard, ScoreSubmission, SubmissionValidator,
    ValidatedSubmission,
};
