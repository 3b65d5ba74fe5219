//! Model module - Application state and data types
//!
//! This module contains all the data structures and state management for the application.
//! It is organized into submodules by responsibility:
//!
//! - `types`: Core type definitions (enums, UI state)
//! - `session`: Observable session store (who is signed in)
//! - `auth_flow`: Login/signup modal state machine
//! - `content`: Content view data (search results, song detail)
//! - `api_client`: REST client for the search provider and the backend
//! - `app_model`: Main application model with state management methods

mod api_client;
mod app_model;
mod auth_flow;
mod content;
mod session;
mod types;

// Re-export all public types for convenient access
pub use types::{ActiveSection, UiState};

pub use session::{Session, User};

pub use auth_flow::{AuthFlow, LoginField, LoginForm, SignupField, SignupForm, Submission};

pub use content::{ContentState, ContentView, DetailTask, Song, SongDetail};

pub use api_client::{ApiClient, ApiError};

pub use app_model::AppModel;
