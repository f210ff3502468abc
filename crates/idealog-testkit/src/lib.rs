// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use anyhow::{Context, Result};
use idealog_app::{Idea, IdeaId};
use std::path::PathBuf;

const FORMATS: [&str; 10] = [
    "podcast",
    "newsletter",
    "video series",
    "workshop",
    "blog series",
    "webinar",
    "case study",
    "launch checklist",
    "community challenge",
    "free template",
];

const TOPICS: [&str; 12] = [
    "indie game design",
    "home espresso",
    "remote onboarding",
    "urban gardening",
    "personal finance for freelancers",
    "accessible web forms",
    "vintage synthesizers",
    "trail running",
    "small-batch baking",
    "open source maintenance",
    "customer interviews",
    "sourdough troubleshooting",
];

const AUDIENCES: [&str; 8] = [
    "beginners",
    "busy parents",
    "first-time founders",
    "students",
    "designers",
    "retirees",
    "engineering managers",
    "weekend hobbyists",
];

#[derive(Debug, Clone)]
struct DeterministicRng {
    state: u64,
}

impl DeterministicRng {
    fn new(seed: u64) -> Self {
        let mut state = seed ^ 0x9E37_79B9_7F4A_7C15;
        if state == 0 {
            state = 0xA409_3822_299F_31D0;
        }
        Self { state }
    }

    fn next_u64(&mut self) -> u64 {
        self.state = self
            .state
            .wrapping_mul(6_364_136_223_846_793_005)
            .wrapping_add(1_442_695_040_888_963_407);

        let mut x = self.state;
        x ^= x >> 13;
        x ^= x << 7;
        x ^= x >> 17;
        x
    }

    fn int_n(&mut self, n: usize) -> usize {
        if n <= 1 {
            return 0;
        }
        (self.next_u64() % (n as u64)) as usize
    }
}

/// Seeded generator of plausible idea texts.
#[derive(Debug, Clone)]
pub struct IdeaFaker {
    rng: DeterministicRng,
}

impl IdeaFaker {
    pub fn new(seed: u64) -> Self {
        let normalized = if seed == 0 { 1 } else { seed };
        Self {
            rng: DeterministicRng::new(normalized),
        }
    }

    pub fn idea_text(&mut self) -> String {
        let format = self.pick(&FORMATS);
        let topic = self.pick(&TOPICS);
        let audience = self.pick(&AUDIENCES);
        let mut text = format!("{format} about {topic} for {audience}");
        if let Some(first) = text.get_mut(0..1) {
            first.make_ascii_uppercase();
        }
        text
    }

    pub fn idea_texts(&mut self, count: usize) -> Vec<String> {
        (0..count).map(|_| self.idea_text()).collect()
    }

    fn pick<'a>(&mut self, items: &'a [&'a str]) -> &'a str {
        items[self.rng.int_n(items.len())]
    }
}

/// Ideas as `list_all` would return them: ids descending.
pub fn listed_ideas(texts: &[&str]) -> Vec<Idea> {
    texts
        .iter()
        .enumerate()
        .rev()
        .map(|(index, text)| Idea {
            id: IdeaId::new(index as i64 + 1),
            text: (*text).to_owned(),
        })
        .collect()
}

pub fn temp_db_path() -> Result<(tempfile::TempDir, PathBuf)> {
    let dir = tempfile::tempdir().context("create temp dir")?;
    let db_path = dir.path().join("idealog.db");
    Ok((dir, db_path))
}

#[cfg(test)]
mod tests {
    use super::{IdeaFaker, listed_ideas};
    use idealog_app::IdeaId;
    use std::collections::BTreeSet;

    #[test]
    fn new_deterministic_seed() {
        let mut left = IdeaFaker::new(42);
        let mut right = IdeaFaker::new(42);
        assert_eq!(left.idea_texts(5), right.idea_texts(5));
    }

    #[test]
    fn idea_text_is_capitalized_and_non_empty() {
        let mut faker = IdeaFaker::new(7);
        for text in faker.idea_texts(20) {
            assert!(!text.trim().is_empty());
            assert!(text.chars().next().is_some_and(char::is_uppercase));
            assert!(text.contains(" about "));
        }
    }

    #[test]
    fn seeds_produce_varied_texts() {
        let mut faker = IdeaFaker::new(3);
        let unique = faker.idea_texts(30).into_iter().collect::<BTreeSet<_>>();
        assert!(unique.len() > 1);
    }

    #[test]
    fn listed_ideas_are_newest_first() {
        let ideas = listed_ideas(&["A", "B", "C"]);
        let texts = ideas.iter().map(|idea| idea.text.as_str()).collect::<Vec<_>>();
        assert_eq!(texts, vec!["C", "B", "A"]);
        assert_eq!(ideas[0].id, IdeaId::new(3));
    }
}
