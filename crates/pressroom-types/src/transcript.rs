//! Conversation transcript types.
//!
//! A [`Transcript`] holds the instruction context plus the ordered list of
//! human/model turns exchanged during one conference. Appending enforces
//! strict alternation: after the seed (human) turn, model and human turns
//! must take turns.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::TranscriptError;

/// Speaker of a turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// The opaque instruction context handed to the model out of band.
    Instruction,
    Human,
    Model,
}

impl Role {
    /// The role that must follow this one in the transcript.
    pub fn counterpart(self) -> Role {
        match self {
            Role::Human => Role::Model,
            Role::Model | Role::Instruction => Role::Human,
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Role::Instruction => write!(f, "instruction"),
            Role::Human => write!(f, "human"),
            Role::Model => write!(f, "model"),
        }
    }
}

impl FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "instruction" => Ok(Role::Instruction),
            "human" => Ok(Role::Human),
            "model" => Ok(Role::Model),
            other => Err(format!("invalid role: '{other}'")),
        }
    }
}

/// One contiguous utterance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Turn {
    pub role: Role,
    pub text: String,
}

impl Turn {
    pub fn new(role: Role, text: impl Into<String>) -> Self {
        Self {
            role,
            text: text.into(),
        }
    }
}

/// The growing record of one conference.
///
/// Always starts with exactly one human turn (the seed). The instruction
/// context is kept apart from the dialogue turns because the wire protocol
/// sends it in its own field.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Transcript {
    instruction: Turn,
    turns: Vec<Turn>,
}

impl Transcript {
    /// Create a transcript seeded with the instruction context and the
    /// opening human turn.
    pub fn seeded(instruction: impl Into<String>, opening: impl Into<String>) -> Self {
        Self {
            instruction: Turn::new(Role::Instruction, instruction),
            turns: vec![Turn::new(Role::Human, opening)],
        }
    }

    /// The instruction context.
    pub fn instruction(&self) -> &str {
        &self.instruction.text
    }

    /// Dialogue turns in order, seed first.
    pub fn turns(&self) -> &[Turn] {
        &self.turns
    }

    /// Number of dialogue turns (the instruction is not counted).
    pub fn len(&self) -> usize {
        self.turns.len()
    }

    /// Always false: a transcript carries its seed from creation.
    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }

    /// Role of the most recent turn.
    pub fn last_role(&self) -> Role {
        self.turns
            .last()
            .map(|t| t.role)
            .unwrap_or(Role::Instruction)
    }

    /// Role the next appended turn must have.
    pub fn expected_role(&self) -> Role {
        self.last_role().counterpart()
    }

    /// Number of model turns recorded so far.
    pub fn model_turns(&self) -> usize {
        self.turns.iter().filter(|t| t.role == Role::Model).count()
    }

    /// Append a model turn.
    pub fn push_model(&mut self, text: impl Into<String>) -> Result<(), TranscriptError> {
        self.push(Turn::new(Role::Model, text))
    }

    /// Append a human turn.
    pub fn push_human(&mut self, text: impl Into<String>) -> Result<(), TranscriptError> {
        self.push(Turn::new(Role::Human, text))
    }

    /// Append a turn, rejecting anything that breaks alternation.
    pub fn push(&mut self, turn: Turn) -> Result<(), TranscriptError> {
        if turn.role == Role::Instruction {
            return Err(TranscriptError::MisplacedInstruction);
        }
        let expected = self.expected_role();
        if turn.role != expected {
            return Err(TranscriptError::OutOfTurn {
                expected,
                got: turn.role,
            });
        }
        self.turns.push(turn);
        Ok(())
    }
}
