use std::io::BufRead;

use crate::error::Error;

/// The network seam of the line loop. `Client` is the real one; tests
/// substitute a recorder.
pub trait Publisher {
    /// Create a new message, returning its id.
    fn create(&mut self, channel_id: &str, text: &str) -> Result<String, Error>;

    /// Replace the text of an existing message, returning its id.
    fn revise(&mut self, post_id: &str, text: &str) -> Result<String, Error>;
}

/// Whether a message has been created yet in this run.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum FollowState {
    #[default]
    NoMessageYet,
    HasMessage(String),
}

#[derive(Debug, PartialEq, Eq)]
pub enum Action {
    Create,
    Revise(String),
}

/// Decide what the next line triggers. Pure; all network effects stay in
/// the caller.
pub fn next_action(state: &FollowState, update: bool) -> Action {
    match state {
        FollowState::HasMessage(id) if update => Action::Revise(id.clone()),
        _ => Action::Create,
    }
}

/// Publish one message per input line until the stream ends or a call
/// fails. In update mode the first line creates a message and every later
/// line rewrites it in place. Lines already published stay published; the
/// first failure ends the run.
pub fn follow<R: BufRead, P: Publisher>(
    reader: R,
    publisher: &mut P,
    channel_id: &str,
    update: bool,
) -> Result<(), Error> {
    let mut state = FollowState::NoMessageYet;

    for line in reader.lines() {
        let line = line?;
        let text = line.strip_suffix('\r').unwrap_or(&line);

        let id = match next_action(&state, update) {
            Action::Create => publisher.create(channel_id, text)?,
            Action::Revise(post_id) => publisher.revise(&post_id, text)?,
        };

        // Without --update every line stands alone; the state never moves.
        if update {
            state = FollowState::HasMessage(id);
        }
    }

    Ok(())
}
