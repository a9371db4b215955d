//! # sleuth-session
//!
//! The session controller: the only mutation path for a guessing game.
//!
//! - `session` — `Session`, the state machine driven by front-end calls
//! - `stage` — public stage, outcome and status types
//! - `prompt` — what a front end shows and what hint calls return
//! - `manager` — `SessionManager`, a `DashMap` registry of independent sessions
//!
//! ```text
//! QUESTIONING ──confident──► GUESS_CONFIRM ──no──► QUESTIONING
//!      │                          └──yes──► DONE(success)
//!      └──pool ≤ 3 or no probe──► FINAL_SINGLE_CONFIRM (1 left)
//!                               ► FINAL_HINTING (2+ left) ──idk──► DONE(exhausted-listed)
//! ```

pub mod manager;
pub mod prompt;
pub mod session;
pub mod stage;

pub use manager::SessionManager;
pub use prompt::{GuessKind, HintReply, HintSubmission, HintTicket, NoGuessReason, Prompt};
pub use session::Session;
pub use stage::{Outcome, SessionStatus, Stage};
