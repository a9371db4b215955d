//! Line-based game loop.

use std::io::{BufRead, Write};

use anyhow::{bail, Context, Result};
use sleuth_core::Answer;
use sleuth_session::{GuessKind, HintReply, HintSubmission, Outcome, Prompt, Session};
use tracing::debug;

use crate::render;

/// Reads trimmed lines and re-prompts until the caller accepts one.
struct LineReader<R> {
    lines: std::io::Lines<R>,
}

impl<R: BufRead> LineReader<R> {
    fn new(input: R) -> Self {
        Self {
            lines: input.lines(),
        }
    }

    /// `None` once input is closed.
    fn read(&mut self, out: &mut impl Write, prompt: &str) -> Result<Option<String>> {
        write!(out, "{prompt}")?;
        out.flush()?;
        match self.lines.next().transpose().context("reading input")? {
            Some(line) => Ok(Some(line.trim().to_string())),
            None => Ok(None),
        }
    }

    fn answer(&mut self, out: &mut impl Write) -> Result<Option<Answer>> {
        loop {
            let Some(line) = self.read(out, "(yes / no / idk) > ")? else {
                return Ok(None);
            };
            match Answer::parse(&line) {
                Some(answer) => return Ok(Some(answer)),
                None => writeln!(out, "Please answer yes, no or idk.")?,
            }
        }
    }

    fn yes_no(&mut self, out: &mut impl Write) -> Result<Option<bool>> {
        loop {
            let Some(line) = self.read(out, "(yes / no) > ")? else {
                return Ok(None);
            };
            match Answer::parse(&line) {
                Some(Answer::Yes) => return Ok(Some(true)),
                Some(Answer::No) => return Ok(Some(false)),
                _ => writeln!(out, "Please answer yes or no.")?,
            }
        }
    }
}

/// Play one session to the end. Returns `None` if input closes first.
///
/// Hints are ranked on tokio's blocking pool, so this must run inside a
/// runtime.
pub async fn play<R: BufRead, W: Write>(
    session: &mut Session,
    input: R,
    mut out: W,
) -> Result<Option<Outcome>> {
    let mut reader = LineReader::new(input);
    let mut prompt = session.start()?;

    loop {
        prompt = match prompt {
            Prompt::Question {
                text, remaining, ..
            } => {
                writeln!(out, "\n[{remaining} candidates left] {text}")?;
                let Some(answer) = reader.answer(&mut out)? else {
                    return Ok(None);
                };
                session.submit_answer(answer)?
            }
            Prompt::ConfirmGuess { kind, candidate } => {
                let heading = match kind {
                    GuessKind::Early => "I think I know who it is!",
                    GuessKind::LastCandidate => "Only one candidate is left:",
                    GuessKind::HintMatch => "Based on your hints, is it:",
                };
                writeln!(out, "\n{heading}")?;
                write!(out, "{}", render::person_card(&candidate))?;
                writeln!(out, "Is this your character?")?;
                let Some(correct) = reader.yes_no(&mut out)? else {
                    return Ok(None);
                };
                session.confirm_guess(correct)?
            }
            Prompt::AwaitHint {
                remaining,
                hint_so_far,
            } => {
                writeln!(
                    out,
                    "\n{remaining} candidates remain. Describe your character (or 'idk' to see them all)."
                )?;
                if !hint_so_far.is_empty() {
                    writeln!(out, "Hints so far: {hint_so_far}")?;
                }
                let Some(line) = reader.read(&mut out, "hint > ")? else {
                    return Ok(None);
                };
                match session.begin_hint(&line)? {
                    HintSubmission::Listed(entries) => {
                        writeln!(out, "\nThe remaining candidates were:")?;
                        write!(out, "{}", render::listing(&entries))?;
                    }
                    HintSubmission::Pending(ticket) => {
                        debug!(ticket_id = ticket.id, "ranking hint");
                        let outcome = session.spawn_rank(&ticket).await;
                        match session.complete_hint(ticket.id, outcome)? {
                            HintReply::NoGuess { reason } => {
                                writeln!(out, "No guess possible ({reason}). Try another hint.")?;
                            }
                            HintReply::Listed { entries } => {
                                write!(out, "{}", render::listing(&entries))?;
                            }
                            HintReply::Match { .. } | HintReply::Discarded => {}
                        }
                    }
                }
                session.current_prompt()
            }
            Prompt::Finished { outcome } => {
                let message = match outcome {
                    Outcome::Success => "Great, I guessed it!",
                    Outcome::Exhausted => "I give up, I couldn't find your character.",
                    Outcome::ExhaustedListed => "Thanks for playing!",
                };
                writeln!(out, "\n{message}")?;
                return Ok(Some(outcome));
            }
            other @ (Prompt::NotStarted | Prompt::Ranking { .. }) => {
                bail!("session stalled at {other:?}")
            }
        };
    }
}
