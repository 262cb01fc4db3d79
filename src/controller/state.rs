use std::collections::HashMap;
use std::fmt::Display;

use crate::models::{Category, FilterKey, Method, Mode};

use super::conversation::Conversation;

/// Why the submit action is currently disabled
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitBlock {
    MissingCategory,
    EmptyPreferences,
    EmptySearch,
}

impl Display for SubmitBlock {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SubmitBlock::MissingCategory => f.write_str("no category selected"),
            SubmitBlock::EmptyPreferences => f.write_str("preference list is empty"),
            SubmitBlock::EmptySearch => f.write_str("search text and filters are all empty"),
        }
    }
}

/// Everything the panel knows about the current session
///
/// Inputs are changed through the setters below, one per user action. The
/// conversation is only written by the controller's submission flow.
#[derive(Debug, Clone, Default)]
pub struct ControllerState {
    category: Option<Category>,
    mode: Mode,
    method: Method,
    preferences: String,
    query: String,
    /// Raw filter inputs. Keys the selected category does not recognize are kept but inert.
    filters: HashMap<FilterKey, String>,
    pub(crate) conversation: Conversation,
}

impl ControllerState {
    pub fn new(method: Method) -> Self {
        Self {
            method,
            ..Default::default()
        }
    }

    pub fn set_category(&mut self, category: Option<Category>) {
        self.category = category;
    }

    pub fn set_mode(&mut self, mode: Mode) {
        self.mode = mode;
    }

    pub fn set_method(&mut self, method: Method) {
        self.method = method;
    }

    pub fn set_preferences(&mut self, text: impl Into<String>) {
        self.preferences = text.into();
    }

    pub fn set_query(&mut self, text: impl Into<String>) {
        self.query = text.into();
    }

    /// Sets one filter input; an empty value clears it
    pub fn set_filter(&mut self, key: FilterKey, value: impl Into<String>) {
        let value = value.into();
        if value.is_empty() {
            self.filters.remove(&key);
        } else {
            self.filters.insert(key, value);
        }
    }

    pub fn clear_filters(&mut self) {
        self.filters.clear();
    }

    pub fn category(&self) -> Option<Category> {
        self.category
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn method(&self) -> Method {
        self.method
    }

    pub fn preferences(&self) -> &str {
        &self.preferences
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn filter(&self, key: FilterKey) -> Option<&str> {
        self.filters.get(&key).map(String::as_str)
    }

    pub fn conversation(&self) -> &Conversation {
        &self.conversation
    }

    /// Non-blank filter values the given category recognizes, in key order
    pub fn active_filters(&self, category: Category) -> impl Iterator<Item = (FilterKey, &str)> {
        category.filter_keys().iter().filter_map(|key| {
            self.filter(*key)
                .filter(|value| !value.trim().is_empty())
                .map(|value| (*key, value))
        })
    }

    /// Reason submission is refused, recomputed from the current inputs
    pub fn submit_block(&self) -> Option<SubmitBlock> {
        let Some(category) = self.category else {
            return Some(SubmitBlock::MissingCategory);
        };

        match self.mode {
            Mode::ByPreferences if self.preferences.trim().is_empty() => {
                Some(SubmitBlock::EmptyPreferences)
            }
            Mode::Search
                if self.query.trim().is_empty()
                    && self.active_filters(category).next().is_none() =>
            {
                Some(SubmitBlock::EmptySearch)
            }
            _ => None,
        }
    }

    pub fn can_submit(&self) -> bool {
        self.submit_block().is_none()
    }
}
