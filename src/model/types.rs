//! Core type definitions for the application

use std::time::Instant;

/// Which section of the UI is currently active/focused
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ActiveSection {
    Search,
    Results,
}

impl ActiveSection {
    pub fn next(self) -> Self {
        match self {
            ActiveSection::Search => ActiveSection::Results,
            ActiveSection::Results => ActiveSection::Search,
        }
    }

    pub fn prev(self) -> Self {
        match self {
            ActiveSection::Search => ActiveSection::Results,
            ActiveSection::Results => ActiveSection::Search,
        }
    }
}

/// UI state for the application
#[derive(Clone)]
pub struct UiState {
    pub active_section: ActiveSection,
    pub search_query: String,
    pub error_message: Option<String>,
    pub error_timestamp: Option<Instant>,
    pub show_help_popup: bool,
}

impl Default for UiState {
    fn default() -> Self {
        Self {
            active_section: ActiveSection::Search,
            search_query: String::new(),
            error_message: None,
            error_timestamp: None,
            show_help_popup: false,
        }
    }
}
