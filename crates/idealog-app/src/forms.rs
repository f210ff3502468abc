// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use anyhow::{Result, bail};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdeaFormInput {
    pub text: String,
}

impl IdeaFormInput {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }

    pub fn validate(&self) -> Result<()> {
        if self.text.trim().is_empty() {
            bail!("Please write an idea before saving it.");
        }
        Ok(())
    }

    /// Text as it will be stored. Only meaningful after `validate` passes.
    pub fn normalized_text(&self) -> &str {
        self.text.trim()
    }
}

#[cfg(test)]
mod tests {
    use super::IdeaFormInput;

    #[test]
    fn blank_input_is_rejected_with_guidance() {
        for raw in ["", "   ", "\t\n"] {
            let error = IdeaFormInput::new(raw)
                .validate()
                .expect_err("blank idea should fail");
            assert!(error.to_string().contains("write an idea"));
        }
    }

    #[test]
    fn surrounding_whitespace_is_trimmed() {
        let form = IdeaFormInput::new("  Launch a podcast \n");
        assert!(form.validate().is_ok());
        assert_eq!(form.normalized_text(), "Launch a podcast");
    }

    #[test]
    fn inner_whitespace_is_preserved() {
        let form = IdeaFormInput::new("Weekly  newsletter");
        assert_eq!(form.normalized_text(), "Weekly  newsletter");
    }
}
