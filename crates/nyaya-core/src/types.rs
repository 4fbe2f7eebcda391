use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// =============================================================================
// Enums
// =============================================================================

/// Who authored a turn in the session log.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// The person asking questions.
    User,
    /// The assistant producing guidance.
    Assistant,
}

/// Progressive-reveal state of a turn.
///
/// Only assistant turns carry a meaningful value; user turns are always
/// `NotApplicable`. A turn moves `Revealing` -> `Settled` exactly once and
/// never re-enters `Revealing`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RevealState {
    /// User turns: reveal does not apply.
    NotApplicable,
    /// The turn's content is being disclosed step by step.
    Revealing,
    /// The full content has been displayed.
    Settled,
}

// =============================================================================
// TurnId
// =============================================================================

/// Unique, monotonically orderable turn identifier.
///
/// Ordered by creation time first, then by the append sequence counter.
/// Timestamps are low-resolution relative to the append rate, so the
/// sequence tie-break is mandatory, not cosmetic.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TurnId {
    /// Creation time as epoch milliseconds.
    pub created_at_ms: i64,
    /// Append sequence counter, strictly increasing per session.
    pub seq: u64,
}

impl TurnId {
    /// Create an id from a creation timestamp and sequence counter.
    pub fn new(created_at: DateTime<Utc>, seq: u64) -> Self {
        Self {
            created_at_ms: created_at.timestamp_millis(),
            seq,
        }
    }
}

// =============================================================================
// Turn
// =============================================================================

/// One message (user or assistant) in the session log.
///
/// `content` is the authoritative text and never changes after creation.
/// While an assistant turn is revealing, the *displayed* text lags behind:
/// `revealed_chars` counts how many characters are currently disclosed and
/// [`Turn::visible_content`] returns that prefix.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Turn {
    /// Unique, creation-ordered identifier.
    pub id: TurnId,
    /// Author of the turn.
    pub role: Role,
    /// Full text of the turn, immutable once created.
    pub content: String,
    /// Creation timestamp, used for ordering/display only.
    pub created_at: DateTime<Utc>,
    /// Reveal lifecycle state.
    pub reveal_state: RevealState,
    /// Number of characters currently disclosed (Revealing only).
    pub revealed_chars: usize,
}

impl Turn {
    /// Create a user turn. User turns are fully visible immediately.
    pub fn user(seq: u64, content: String, created_at: DateTime<Utc>) -> Self {
        Self {
            id: TurnId::new(created_at, seq),
            role: Role::User,
            content,
            created_at,
            reveal_state: RevealState::NotApplicable,
            revealed_chars: 0,
        }
    }

    /// Create an assistant turn in the `Revealing` state with nothing
    /// disclosed yet.
    pub fn assistant(seq: u64, content: String, created_at: DateTime<Utc>) -> Self {
        Self {
            id: TurnId::new(created_at, seq),
            role: Role::Assistant,
            content,
            created_at,
            reveal_state: RevealState::Revealing,
            revealed_chars: 0,
        }
    }

    /// The currently displayed text.
    ///
    /// Full content for user turns and settled turns; while revealing, a
    /// prefix of `revealed_chars` characters. Counts Unicode scalar values,
    /// so the prefix never splits a multi-byte character.
    pub fn visible_content(&self) -> &str {
        match self.reveal_state {
            RevealState::Revealing => match self.content.char_indices().nth(self.revealed_chars) {
                Some((byte_idx, _)) => &self.content[..byte_idx],
                None => &self.content,
            },
            _ => &self.content,
        }
    }

    /// Total content length in characters (the reveal step count).
    pub fn char_count(&self) -> usize {
        self.content.chars().count()
    }
}

// =============================================================================
// SessionSnapshot
// =============================================================================

/// Read-only view of the session that the presentation layer renders.
///
/// Re-published on every turn append and on each reveal step.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct SessionSnapshot {
    /// All turns in strict creation order.
    pub turns: Vec<Turn>,
    /// True while an assistant response is being generated for the most
    /// recent user turn. New submissions are rejected while set.
    pub pending: bool,
}

// =============================================================================
// Tests
// =============================================================================
