// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use crate::ids::*;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Idea {
    pub id: IdeaId,
    pub text: String,
}

/// What the saved-ideas section shows for one pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IdeaListing {
    Available(Vec<Idea>),
    Unavailable,
}

impl IdeaListing {
    pub fn ideas(&self) -> &[Idea] {
        match self {
            Self::Available(ideas) => ideas,
            Self::Unavailable => &[],
        }
    }

    pub fn len(&self) -> usize {
        self.ideas().len()
    }

    pub fn is_empty(&self) -> bool {
        self.ideas().is_empty()
    }
}

impl Default for IdeaListing {
    fn default() -> Self {
        Self::Available(Vec::new())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Success,
    Info,
    Warning,
    Error,
}

impl NoticeLevel {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::Info => "info",
            Self::Warning => "warning",
            Self::Error => "error",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
}

impl Notice {
    pub fn new(level: NoticeLevel, message: impl Into<String>) -> Self {
        Self {
            level,
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowState {
    Idle,
    AwaitingEnrichment,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnrichmentPanel {
    pub idea_id: IdeaId,
    pub idea_text: String,
    pub suggestions: String,
}

impl EnrichmentPanel {
    pub fn title(&self) -> String {
        format!("Suggestions for '{}':", self.idea_text)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Input,
    Ideas,
}

impl Focus {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Input => "input",
            Self::Ideas => "ideas",
        }
    }

    pub const fn toggled(self) -> Self {
        match self {
            Self::Input => Self::Ideas,
            Self::Ideas => Self::Input,
        }
    }
}
