// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

//! Conversation transcript
//!
//! An append-only sequence of role-tagged segments. The transcript is
//! rendered by plain concatenation into the single user-role message sent to
//! the model each round; the roles exist for inspection and tests, not for
//! the wire format.

/// Role of one transcript segment
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    /// The fixed generation instruction seeded first
    Instruction,
    /// A user-supplied prompt fragment
    User,
    /// The textual result of a tool call
    ToolResult,
}

/// One transcript segment
#[derive(Debug, Clone)]
pub struct Segment {
    pub role: Role,
    pub text: String,
}

/// Ordered, append-only transcript for one generation round
#[derive(Debug, Default)]
pub struct Transcript {
    segments: Vec<Segment>,
}

impl Transcript {
    pub fn new() -> Self {
        Self { segments: vec![] }
    }

    pub fn push(&mut self, role: Role, text: impl Into<String>) {
        self.segments.push(Segment {
            role,
            text: text.into(),
        });
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Concatenate every segment's text, in order, with no separators.
    pub fn render(&self) -> String {
        self.segments
            .iter()
            .map(|segment| segment.text.as_str())
            .collect()
    }
}
