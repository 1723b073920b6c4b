//! Builder for test notes with sensible defaults.

// Allow dead code since this is a test utility with methods for future tests
#![allow(dead_code)]

/// Builder for the Markdown content of a test note.
///
/// A note with no title, aliases or tags is written without frontmatter.
#[derive(Debug, Clone)]
pub struct TestNote {
    name: String,
    title: Option<String>,
    aliases: Vec<String>,
    tags: Vec<String>,
    body: String,
}

impl TestNote {
    /// Creates a note stored at `<name>.md` (name may include directories).
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            title: None,
            aliases: Vec::new(),
            tags: Vec::new(),
            body: String::new(),
        }
    }

    /// Sets the frontmatter title.
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Adds an alias to the frontmatter.
    pub fn alias(mut self, alias: impl Into<String>) -> Self {
        self.aliases.push(alias.into());
        self
    }

    /// Adds a tag to the frontmatter.
    pub fn tag(mut self, tag: impl Into<String>) -> Self {
        self.tags.push(tag.into());
        self
    }

    /// Sets the body content (builder method).
    pub fn body(mut self, body: impl Into<String>) -> Self {
        self.body = body.into();
        self
    }

    /// Appends a `[[target]]` line to the body.
    pub fn links_to(mut self, target: &str) -> Self {
        self.body.push_str(&format!("See [[{target}]]\n"));
        self
    }

    /// File path relative to the vault root.
    pub fn file_name(&self) -> String {
        format!("{}.md", self.name)
    }

    /// Renders frontmatter and body.
    pub fn render(&self) -> String {
        let mut out = String::new();
        if self.title.is_some() || !self.aliases.is_empty() || !self.tags.is_empty() {
            out.push_str("---\n");
            if let Some(title) = &self.title {
                out.push_str(&format!("title: {title}\n"));
            }
            if !self.aliases.is_empty() {
                out.push_str("aliases:\n");
                for alias in &self.aliases {
                    out.push_str(&format!("  - {alias}\n"));
                }
            }
            if !self.tags.is_empty() {
                out.push_str(&format!("tags: [{}]\n", self.tags.join(", ")));
            }
            out.push_str("---\n");
        }
        out.push_str(&self.body);
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_note_has_no_frontmatter() {
        let note = TestNote::new("plain").body("hello\n");
        assert_eq!(note.render(), "hello\n");
        assert_eq!(note.file_name(), "plain.md");
    }

    #[test]
    fn frontmatter_lists_aliases_and_tags() {
        let note = TestNote::new("rich")
            .title("Rich Note")
            .alias("fancy")
            .tag("a")
            .tag("b")
            .links_to("other");
        assert_eq!(
            note.render(),
            "---\ntitle: Rich Note\naliases:\n  - fancy\ntags: [a, b]\n---\nSee [[other]]\n"
        );
    }
}
