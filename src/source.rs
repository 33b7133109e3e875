//! Append-only sink for generated Java source fragments.

use std::fmt;

/// Incrementally builds Java source text.
#[derive(Debug, Clone, Default)]
pub struct SourceBuilder {
    content: String,
}

impl SourceBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends `text` without a newline.
    pub fn push(&mut self, text: &str) -> &mut Self {
        self.content.push_str(text);
        self
    }

    /// Appends `line` followed by a newline.
    pub fn push_line(&mut self, line: &str) -> &mut Self {
        self.content.push_str(line);
        self.content.push('\n');
        self
    }

    pub fn build(self) -> String {
        self.content
    }
}

impl fmt::Write for SourceBuilder {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        self.content.push_str(s);
        Ok(())
    }
}
