// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use crate::{EnrichmentPanel, Focus, Idea, IdeaFormInput, IdeaId, Notice, NoticeLevel, RowState};

pub const SAVE_SUCCESS_MESSAGE: &str = "Idea saved!";
pub const EMPTY_LIST_MESSAGE: &str = "You have no saved ideas yet. Add one above!";
pub const BUSY_MESSAGE: &str = "Contacting the AI genius...";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppState {
    pub input: String,
    pub focus: Focus,
    pub selected_row: usize,
    pub notices: Vec<Notice>,
    pub awaiting: Option<IdeaId>,
    pub panel: Option<EnrichmentPanel>,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            input: String::new(),
            focus: Focus::Input,
            selected_row: 0,
            notices: Vec::new(),
            awaiting: None,
            panel: None,
        }
    }
}

/// A user interaction with the page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppCommand {
    InsertChar(char),
    DeleteChar,
    ClearInput,
    ToggleFocus,
    MoveSelection(isize),
    Save,
    Enrich(IdeaId),
}

impl AppCommand {
    /// Save and enrich start a fresh pass: transient notices and panels are dropped.
    pub const fn starts_pass(self) -> bool {
        matches!(self, Self::Save | Self::Enrich(_))
    }
}

/// Side effect the runtime must run before the next render.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppEffect {
    InsertIdea { text: String },
    EnrichIdea { id: IdeaId, text: String },
}

/// Outcome of an effect, or of the per-pass store reads.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppEvent {
    IdeaSaved(IdeaId),
    SaveFailed(String),
    EnrichmentReady {
        id: IdeaId,
        idea_text: String,
        suggestions: String,
    },
    EnrichmentFailed { id: IdeaId, error: String },
    SchemaFailed(String),
    ListingFailed(String),
}

impl AppState {
    pub fn dispatch(&mut self, command: AppCommand, ideas: &[Idea]) -> Vec<AppEffect> {
        if command.starts_pass() {
            self.notices.clear();
            self.panel = None;
        }

        match command {
            AppCommand::InsertChar(ch) => {
                self.input.push(ch);
                Vec::new()
            }
            AppCommand::DeleteChar => {
                self.input.pop();
                Vec::new()
            }
            AppCommand::ClearInput => {
                self.input.clear();
                Vec::new()
            }
            AppCommand::ToggleFocus => {
                self.focus = self.focus.toggled();
                Vec::new()
            }
            AppCommand::MoveSelection(delta) => {
                self.move_selection(delta, ideas.len());
                Vec::new()
            }
            AppCommand::Save => self.save(),
            AppCommand::Enrich(id) => self.enrich(id, ideas),
        }
    }

    pub fn apply(&mut self, event: AppEvent) {
        match event {
            AppEvent::IdeaSaved(_) => {
                self.input.clear();
                self.selected_row = 0;
                self.push_notice(NoticeLevel::Success, SAVE_SUCCESS_MESSAGE);
            }
            AppEvent::SaveFailed(error) => {
                self.push_notice(NoticeLevel::Error, format!("Error saving the idea: {error}"));
            }
            AppEvent::EnrichmentReady {
                id,
                idea_text,
                suggestions,
            } => {
                self.awaiting = None;
                self.panel = Some(EnrichmentPanel {
                    idea_id: id,
                    idea_text,
                    suggestions,
                });
            }
            AppEvent::EnrichmentFailed { id, error } => {
                if self.awaiting == Some(id) {
                    self.awaiting = None;
                }
                self.push_notice(
                    NoticeLevel::Error,
                    format!("Error contacting the AI: {error}"),
                );
            }
            AppEvent::SchemaFailed(error) => {
                self.push_notice(
                    NoticeLevel::Error,
                    format!("Could not prepare the idea table: {error}"),
                );
            }
            AppEvent::ListingFailed(error) => {
                self.push_notice(
                    NoticeLevel::Error,
                    format!("Could not load the ideas: {error}"),
                );
            }
        }
    }

    pub fn row_state(&self, id: IdeaId) -> RowState {
        if self.awaiting == Some(id) {
            RowState::AwaitingEnrichment
        } else {
            RowState::Idle
        }
    }

    pub fn selected_idea<'a>(&self, ideas: &'a [Idea]) -> Option<&'a Idea> {
        ideas.get(self.selected_row)
    }

    pub fn clamp_selection(&mut self, len: usize) {
        self.selected_row = self.selected_row.min(len.saturating_sub(1));
    }

    fn save(&mut self) -> Vec<AppEffect> {
        let form = IdeaFormInput::new(self.input.clone());
        if let Err(error) = form.validate() {
            self.push_notice(NoticeLevel::Warning, error.to_string());
            return Vec::new();
        }
        vec![AppEffect::InsertIdea {
            text: form.normalized_text().to_owned(),
        }]
    }

    fn enrich(&mut self, id: IdeaId, ideas: &[Idea]) -> Vec<AppEffect> {
        let Some(idea) = ideas.iter().find(|idea| idea.id == id) else {
            self.push_notice(
                NoticeLevel::Warning,
                format!("Idea {id} is no longer listed; pick another one."),
            );
            return Vec::new();
        };
        self.awaiting = Some(id);
        vec![AppEffect::EnrichIdea {
            id,
            text: idea.text.clone(),
        }]
    }

    fn move_selection(&mut self, delta: isize, len: usize) {
        if len == 0 {
            self.selected_row = 0;
            return;
        }
        let current = self.selected_row.min(len - 1) as isize;
        let next = (current + delta).clamp(0, len as isize - 1);
        self.selected_row = next as usize;
    }

    fn push_notice(&mut self, level: NoticeLevel, message: impl Into<String>) {
        self.notices.push(Notice::new(level, message));
    }
}
