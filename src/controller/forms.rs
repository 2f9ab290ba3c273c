//! The "add author" and "add book" forms.
//!
//! Every field is required. Dates are kept exactly as typed into the date
//! input (`YYYY-MM-DD`) and sent in that format.

use std::sync::Arc;

use tokio::sync::watch;
use tracing::error;

use super::picker::AuthorPicker;
use crate::client::{Client, QueryFamily};
use crate::dates;
use crate::datamodel::{Author, AuthorRef, Book, NewAuthor, NewBook};
use crate::error::{Error, Result};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormMessage {
    Success(String),
    Failure(String),
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormState {
    pub submitting: bool,
    pub message: Option<FormMessage>,
}

fn required(value: &str, label: &str) -> Result<String> {
    let value = value.trim();
    if value.is_empty() {
        return Err(Error::validation(format!("{label} is required")));
    }
    Ok(value.to_owned())
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AuthorForm {
    pub name: String,
    pub biography: String,
    pub born_date: String,
    pub profile_image_uri: String,
}

impl AuthorForm {
    pub fn validate(&self) -> Result<NewAuthor> {
        Ok(NewAuthor {
            name: required(&self.name, "Name")?,
            biography: required(&self.biography, "Biography")?,
            born_date: dates::parse_input(&required(&self.born_date, "Born date")?)?,
            profile_image_uri: required(&self.profile_image_uri, "Profile image URI")?,
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BookForm {
    pub title: String,
    pub published_date: String,
    pub author_id: Option<i32>,
    pub cover_image_uri: String,
}

impl BookForm {
    pub fn validate(&self) -> Result<NewBook> {
        Ok(NewBook {
            title: required(&self.title, "Title")?,
            published_date: dates::parse_input(&required(
                &self.published_date,
                "Published date",
            )?)?,
            author_id: self
                .author_id
                .ok_or_else(|| Error::validation("Author is required"))?,
            cover_image_uri: required(&self.cover_image_uri, "Cover image URI")?,
        })
    }
}

pub struct AddAuthor {
    client: Arc<Client>,
    pub form: AuthorForm,
    state: watch::Sender<FormState>,
}

impl AddAuthor {
    pub fn new(client: Arc<Client>) -> Self {
        Self {
            client,
            form: AuthorForm::default(),
            state: watch::Sender::new(FormState::default()),
        }
    }

    pub fn subscribe(&self) -> watch::Receiver<FormState> {
        self.state.subscribe()
    }

    pub fn state(&self) -> FormState {
        self.state.borrow().clone()
    }

    /// On success the form is cleared.
    pub async fn submit(&mut self) -> Result<Author> {
        let author = self.form.validate().inspect_err(|err| {
            self.state
                .send_modify(|s| s.message = Some(FormMessage::Failure(err.user_message())));
        })?;

        self.state.send_modify(|s| {
            s.submitting = true;
            s.message = None;
        });
        let result = self.client.create_author(&author).await;
        self.state.send_modify(|s| s.submitting = false);

        match result {
            Ok(created) => {
                self.client.evict(QueryFamily::Authors);
                self.form = AuthorForm::default();
                self.state.send_modify(|s| {
                    s.message = Some(FormMessage::Success("Author added successfully!".into()))
                });
                Ok(created)
            }
            Err(err) => {
                error!("Error adding author: {err}");
                self.state.send_modify(|s| {
                    s.message = Some(FormMessage::Failure(
                        "Failed to add author. Please try again.".into(),
                    ))
                });
                Err(err)
            }
        }
    }
}

pub struct AddBook {
    client: Arc<Client>,
    pub form: BookForm,
    authors: AuthorPicker,
    state: watch::Sender<FormState>,
}

impl AddBook {
    pub fn new(client: Arc<Client>) -> Self {
        Self {
            authors: AuthorPicker::new(client.clone()),
            client,
            form: BookForm::default(),
            state: watch::Sender::new(FormState::default()),
        }
    }

    pub fn subscribe(&self) -> watch::Receiver<FormState> {
        self.state.subscribe()
    }

    pub fn state(&self) -> FormState {
        self.state.borrow().clone()
    }

    pub async fn open_author_picker(&mut self) -> Result<&[AuthorRef]> {
        self.authors.open().await
    }

    pub async fn submit(&mut self) -> Result<Book> {
        let book = self.form.validate().inspect_err(|err| {
            self.state
                .send_modify(|s| s.message = Some(FormMessage::Failure(err.user_message())));
        })?;

        self.state.send_modify(|s| {
            s.submitting = true;
            s.message = None;
        });
        let result = self.client.create_book(&book).await;
        self.state.send_modify(|s| s.submitting = false);

        match result {
            Ok(created) => {
                // Author rows embed book titles.
                self.client.evict(QueryFamily::Books);
                self.client.evict(QueryFamily::Authors);
                self.form = BookForm::default();
                self.state.send_modify(|s| {
                    s.message = Some(FormMessage::Success("Book added successfully!".into()))
                });
                Ok(created)
            }
            Err(err) => {
                error!("Error adding book: {err}");
                self.state.send_modify(|s| {
                    s.message = Some(FormMessage::Failure(
                        "Failed to add book. Please try again.".into(),
                    ))
                });
                Err(err)
            }
        }
    }
}
