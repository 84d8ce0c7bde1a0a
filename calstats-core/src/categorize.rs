//! Keyword-based categorization
//!
//! Rules are loaded from a TOML file with three independent tables:
//!
//! ```toml
//! [categories.meeting]
//! name = "Meetings"
//! keywords = ["meeting", "sync", "1on1"]
//!
//! [event_categories.standup]
//! keywords = ["standup", "daily scrum"]
//! category = "meeting"
//!
//! [notion_categories.meeting_notes]
//! keywords = ["minutes", "meeting notes"]
//! ```
//!
//! Every lookup is a case-insensitive substring match where the first
//! matching rule wins. Rule tables are hash maps, so rule names are sorted
//! before evaluation; the outcome for a given rule set and title is the same
//! regardless of how the tables were built.

use crate::error::{Error, Result};
use crate::types::TimeBucket;
use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;

/// Category returned when no rule matches.
pub const OTHER: &str = "other";

/// A general category: display name plus keywords.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct CategoryDefinition {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub keywords: Vec<String>,
}

/// Event-specific rule, evaluated before the general categories.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct EventRule {
    #[serde(default)]
    pub keywords: Vec<String>,
    /// Category assigned when one of the keywords matches
    pub category: String,
}

/// Page-title rule for Notion-style pages.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct NotionRule {
    #[serde(default)]
    pub keywords: Vec<String>,
}

/// The complete rule set. Read-only for the duration of an analysis run.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct CategorizationRules {
    #[serde(default)]
    pub categories: HashMap<String, CategoryDefinition>,
    #[serde(default)]
    pub event_categories: HashMap<String, EventRule>,
    #[serde(default)]
    pub notion_categories: HashMap<String, NotionRule>,
}

/// Keys of `map` in lexicographic order.
fn sorted_keys<V>(map: &HashMap<String, V>) -> Vec<&str> {
    let mut keys: Vec<&str> = map.keys().map(String::as_str).collect();
    keys.sort_unstable();
    keys
}

/// True if any keyword (lowercased) occurs in the already-lowercased title.
fn matches_any(title: &str, keywords: &[String]) -> bool {
    keywords
        .iter()
        .any(|keyword| title.contains(&keyword.to_lowercase()))
}

impl CategorizationRules {
    /// Load rules from a TOML file.
    ///
    /// A missing file is [`Error::RulesNotFound`]: there are no built-in
    /// rules to fall back on.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(Error::RulesNotFound(path.to_path_buf()));
        }

        let content = std::fs::read_to_string(path).map_err(|e| {
            Error::Config(format!("failed to read rules file {:?}: {}", path, e))
        })?;

        let rules = Self::from_toml(&content)
            .map_err(|e| Error::Config(format!("failed to parse rules file {:?}: {}", path, e)))?;

        tracing::info!(
            path = %path.display(),
            categories = rules.categories.len(),
            event_rules = rules.event_categories.len(),
            page_rules = rules.notion_categories.len(),
            "Loaded categorization rules"
        );

        Ok(rules)
    }

    /// Parse rules from TOML text.
    pub fn from_toml(content: &str) -> std::result::Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    /// Category for an event title.
    ///
    /// Event rules are tried first (returning the rule's declared category),
    /// then general categories (returning the category key), then `other`.
    pub fn categorize_event(&self, title: &str) -> String {
        let title = title.to_lowercase();

        for name in sorted_keys(&self.event_categories) {
            let rule = &self.event_categories[name];
            if matches_any(&title, &rule.keywords) {
                return rule.category.clone();
            }
        }

        self.match_general(&title)
            .map(str::to_string)
            .unwrap_or_else(|| OTHER.to_string())
    }

    /// Coarse time bucket for an event title, from the general categories only.
    pub fn time_bucket(&self, title: &str) -> TimeBucket {
        self.match_general(&title.to_lowercase())
            .map(TimeBucket::from_category_key)
            .unwrap_or(TimeBucket::Other)
    }

    /// Category for a page title, from the page rules only.
    pub fn categorize_page(&self, title: &str) -> String {
        let title = title.to_lowercase();

        sorted_keys(&self.notion_categories)
            .into_iter()
            .find(|name| matches_any(&title, &self.notion_categories[*name].keywords))
            .map(str::to_string)
            .unwrap_or_else(|| OTHER.to_string())
    }

    /// Count page titles per page category.
    pub fn page_category_counts<'a, I>(&self, titles: I) -> std::collections::BTreeMap<String, usize>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut counts = std::collections::BTreeMap::new();
        for title in titles {
            *counts.entry(self.categorize_page(title)).or_insert(0) += 1;
        }
        counts
    }

    /// Display name for a category key.
    ///
    /// Uses the configured `name` of a general category when present and
    /// non-empty, otherwise the key with each word capitalised.
    pub fn display_name(&self, category: &str) -> String {
        match self.categories.get(category) {
            Some(def) if !def.name.is_empty() => def.name.clone(),
            _ => title_case(category),
        }
    }

    /// First general category (by sorted key) whose keywords match.
    fn match_general(&self, lowered_title: &str) -> Option<&str> {
        sorted_keys(&self.categories)
            .into_iter()
            .find(|key| matches_any(lowered_title, &self.categories[*key].keywords))
    }
}

fn title_case(value: &str) -> String {
    value
        .split(' ')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}
