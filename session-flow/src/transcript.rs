use serde::{Deserialize, Serialize};

/// Attribution of a single conversational turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sender {
    User,
    Bot,
}

/// One message unit, attributed to either the user or the service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Turn {
    pub text: String,
    pub sender: Sender,
}

impl Turn {
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            sender: Sender::User,
        }
    }

    pub fn bot(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            sender: Sender::Bot,
        }
    }
}

/// Ordered record of the exchanged turns, oldest first.
///
/// A successful exchange always appends the user's turn followed by the
/// bot's reply, so after `n` exchanges on top of the opening summary turn
/// the transcript holds `2n + 1` turns.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transcript {
    turns: Vec<Turn>,
}

impl Transcript {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a transcript with the opening bot turn.
    pub fn opening(first_line: impl Into<String>) -> Self {
        Self {
            turns: vec![Turn::bot(first_line)],
        }
    }

    /// Append one question/reply pair, user turn first.
    pub fn push_exchange(&mut self, question: impl Into<String>, reply: impl Into<String>) {
        self.turns.push(Turn::user(question));
        self.turns.push(Turn::bot(reply));
    }

    pub fn turns(&self) -> &[Turn] {
        &self.turns
    }

    pub fn len(&self) -> usize {
        self.turns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }

    pub fn last(&self) -> Option<&Turn> {
        self.turns.last()
    }

    pub fn clear(&mut self) {
        self.turns.clear();
    }
}
