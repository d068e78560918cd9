use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

pub const BLOG_CATEGORIES: &[&str] = &[
    "Real Estate",
    "Market Trends",
    "Investment Tips",
    "Home Buying",
    "Property Management",
    "Legal Advice",
    "Lifestyle",
    "News",
];

pub const BLOG_SORT_COLUMNS: &[&str] = &["created_at", "updated_at", "views", "title"];

/// Average adult reading speed used to derive `read_time`.
const WORDS_PER_MINUTE: usize = 200;

const EXCERPT_MAX_CHARS: usize = 160;

#[derive(Debug, Clone, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Blog {
    pub id: Uuid,
    pub title: String,
    pub content: String,
    pub excerpt: String,
    pub author: String,
    pub category: String,
    pub tags: Vec<String>,
    pub image: String,
    pub slug: String,
    pub featured: bool,
    pub published: bool,
    pub read_time: i32,
    pub views: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlogInput {
    pub title: String,
    pub content: String,
    /// Authored excerpt; derived from content when empty.
    #[serde(default)]
    pub excerpt: String,
    pub author: String,
    pub category: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub image: String,
    #[serde(default)]
    pub featured: bool,
    #[serde(default = "default_published")]
    pub published: bool,
}

fn default_published() -> bool {
    true
}

impl BlogInput {
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();

        if self.title.trim().len() < 3 {
            errors.push("Title must be at least 3 characters long".to_string());
        }
        if self.content.trim().is_empty() {
            errors.push("Content is required".to_string());
        }
        if self.author.trim().len() < 2 {
            errors.push("Author name must be at least 2 characters long".to_string());
        }
        if !BLOG_CATEGORIES.contains(&self.category.as_str()) {
            errors.push("Invalid blog category".to_string());
        }

        errors
    }

    /// The stored excerpt: the authored one, or the opening of the content.
    pub fn resolved_excerpt(&self) -> String {
        if self.excerpt.trim().is_empty() {
            generate_excerpt(&self.content)
        } else {
            self.excerpt.trim().to_string()
        }
    }
}

/// URL slug derived from the title: lowercased, non-alphanumeric runs
/// collapsed to single hyphens.
pub fn slugify(title: &str) -> String {
    let mut slug = String::with_capacity(title.len());
    let mut last_hyphen = true; // suppress leading hyphen
    for c in title.chars() {
        if c.is_alphanumeric() {
            slug.extend(c.to_lowercase());
            last_hyphen = false;
        } else if !last_hyphen {
            slug.push('-');
            last_hyphen = true;
        }
    }
    if slug.ends_with('-') {
        slug.pop();
    }
    slug
}

/// Minutes to read, derived from the word count of the tag-stripped content.
pub fn calculate_read_time(content: &str) -> i32 {
    let words = strip_html(content).split_whitespace().count();
    let minutes = (words + WORDS_PER_MINUTE - 1) / WORDS_PER_MINUTE;
    minutes.max(1) as i32
}

/// Leading plain text of the content, cut at a word boundary.
pub fn generate_excerpt(content: &str) -> String {
    let text = strip_html(content);
    let text = text.split_whitespace().collect::<Vec<_>>().join(" ");
    if text.len() <= EXCERPT_MAX_CHARS {
        return text;
    }

    let mut cut = EXCERPT_MAX_CHARS;
    while cut > 0 && !text.is_char_boundary(cut) {
        cut -= 1;
    }
    let truncated = &text[..cut];
    let truncated = match truncated.rfind(' ') {
        Some(idx) => &truncated[..idx],
        None => truncated,
    };
    format!("{}...", truncated)
}

/// Drop HTML tags; blog content is an HTML string from the rich-text editor.
fn strip_html(content: &str) -> String {
    let mut out = String::with_capacity(content.len());
    let mut in_tag = false;
    for c in content.chars() {
        match c {
            '<' => in_tag = true,
            '>' if in_tag => {
                in_tag = false;
                out.push(' ');
            }
            _ if !in_tag => out.push(c),
            _ => {}
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slugify_collapses_punctuation() {
        assert_eq!(slugify("Top 10 Buying Tips!"), "top-10-buying-tips");
        assert_eq!(slugify("  Market -- Trends  "), "market-trends");
        assert_eq!(slugify("Ünïcode Tîtle"), "ünïcode-tîtle");
    }

    #[test]
    fn read_time_rounds_up_with_a_floor_of_one() {
        assert_eq!(calculate_read_time("short post"), 1);
        let words = vec!["word"; 201].join(" ");
        assert_eq!(calculate_read_time(&words), 2);
        let words = vec!["word"; 400].join(" ");
        assert_eq!(calculate_read_time(&words), 2);
    }

    #[test]
    fn excerpt_strips_tags_and_truncates_on_word_boundary() {
        let content = "<p>Buying a home is the largest purchase most people ever make, \
            and the process rewards patience, preparation and a clear budget long before \
            the first viewing is ever booked.</p>";
        let excerpt = generate_excerpt(content);
        assert!(!excerpt.contains('<'));
        assert!(excerpt.len() <= EXCERPT_MAX_CHARS + 3);
        assert!(excerpt.ends_with("..."));

        assert_eq!(generate_excerpt("<b>Short.</b>"), "Short.");
    }

    #[test]
    fn authored_excerpt_wins_over_derived() {
        let input = BlogInput {
            title: "A Title".into(),
            content: "<p>Some content</p>".into(),
            excerpt: "Hand-written summary".into(),
            author: "Jo".into(),
            category: "News".into(),
            tags: vec![],
            image: String::new(),
            featured: false,
            published: true,
        };
        assert_eq!(input.resolved_excerpt(), "Hand-written summary");
    }

    #[test]
    fn validation_rejects_unknown_category() {
        let input = BlogInput {
            title: "A Title".into(),
            content: "body".into(),
            excerpt: String::new(),
            author: "Jo".into(),
            category: "Gossip".into(),
            tags: vec![],
            image: String::new(),
            featured: false,
            published: true,
        };
        assert!(input
            .validate()
            .iter()
            .any(|e| e.contains("Invalid blog category")));
    }
}
