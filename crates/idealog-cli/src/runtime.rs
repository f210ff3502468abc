// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use anyhow::Result;
use idealog_app::{Idea, IdeaId};
use idealog_db::Store;
use idealog_llm::Client;

pub struct DbRuntime<'a> {
    store: &'a Store,
    llm: Client,
}

impl<'a> DbRuntime<'a> {
    pub fn new(store: &'a Store, llm: Client) -> Self {
        Self { store, llm }
    }
}

impl idealog_tui::AppRuntime for DbRuntime<'_> {
    fn ensure_schema(&mut self) -> Result<()> {
        Ok(self.store.ensure_schema()?)
    }

    fn insert_idea(&mut self, text: &str) -> Result<IdeaId> {
        Ok(self.store.insert(text)?)
    }

    fn list_ideas(&mut self) -> Result<Vec<Idea>> {
        Ok(self.store.list_all()?)
    }

    fn enrich_idea(&mut self, text: &str) -> Result<String> {
        Ok(self.llm.enrich(text)?)
    }
}
