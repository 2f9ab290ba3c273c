//! View controllers: form state bookkeeping wired to the query catalog.
//!
//! Controllers publish their view state through `tokio::sync::watch`
//! channels; a front end subscribes and re-renders whenever it changes.

pub mod contact;
pub mod detail;
pub mod forms;
pub mod list;
pub mod picker;
pub mod reviews;

/// Where to go after an action that leaves the current view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Authors,
    Books,
}

/// Asks the user to confirm a destructive action.
pub trait Confirm {
    fn confirm(&self, prompt: &str) -> bool;
}

impl<F: Fn(&str) -> bool> Confirm for F {
    fn confirm(&self, prompt: &str) -> bool {
        self(prompt)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Status {
    #[default]
    Idle,
    Loading,
    Ready,
    /// Holds the message shown to the user.
    Failed(String),
}

/// An entity fetched by id.
#[derive(Debug, Clone, PartialEq)]
pub enum Lookup<T> {
    Loading,
    NotFound,
    Found(T),
    Failed(String),
}

impl<T> Default for Lookup<T> {
    fn default() -> Self {
        Self::Loading
    }
}

impl<T> Lookup<T> {
    pub fn found(&self) -> Option<&T> {
        match self {
            Self::Found(value) => Some(value),
            _ => None,
        }
    }
}

impl<T> From<Option<T>> for Lookup<T> {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::NotFound, Self::Found)
    }
}
