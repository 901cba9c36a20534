use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A stored presentation, keyed by `(owner, slug)`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Presentation {
    pub owner: String,
    pub name: String,
    pub slug: String,
    pub markdown: String,
    /// Free-form renderer settings (theme, transition, ...).
    #[serde(default = "empty_config")]
    pub config: serde_json::Value,
    #[serde(default)]
    pub is_public: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

fn empty_config() -> serde_json::Value {
    serde_json::Value::Object(serde_json::Map::new())
}

impl Presentation {
    pub fn new(owner: &str, name: &str, markdown: String) -> Self {
        let now = Utc::now();
        Self {
            owner: owner.to_string(),
            name: name.to_string(),
            slug: slugify(name),
            markdown,
            config: empty_config(),
            is_public: false,
            created_at: now,
            updated_at: now,
        }
    }

    /// First non-empty line with any heading marks stripped, or "Untitled".
    pub fn extract_title(markdown: &str) -> String {
        let first_line = markdown
            .lines()
            .find(|line| !line.trim().is_empty())
            .unwrap_or("Untitled");
        let title = first_line
            .trim_start_matches('#')
            .trim_start_matches(' ')
            .trim();
        if title.is_empty() {
            "Untitled".to_string()
        } else {
            title.chars().take(50).collect()
        }
    }

    pub fn update_markdown(&mut self, markdown: String) {
        self.markdown = markdown;
        self.updated_at = Utc::now();
    }
}

/// Lowercase, collapse runs of non-alphanumerics into `-`, trim dashes.
pub fn slugify(name: &str) -> String {
    let mut slug = String::with_capacity(name.len());
    let mut pending_dash = false;
    for c in name.chars().flat_map(char::to_lowercase) {
        if c.is_alphanumeric() {
            if pending_dash && !slug.is_empty() {
                slug.push('-');
            }
            pending_dash = false;
            slug.push(c);
        } else {
            pending_dash = true;
        }
    }
    if slug.is_empty() {
        "untitled".to_string()
    } else {
        slug
    }
}
