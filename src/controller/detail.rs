//! Detail views of a single author or book.
//!
//! Both follow the same cycle: `load`, then optionally `begin_edit` to
//! snapshot the entity into a draft, modify the draft, and `save` or
//! `cancel_edit`. A failed save keeps the draft and stays in edit mode.

use std::sync::Arc;

use chrono::NaiveDate;
use tokio::sync::watch;
use tracing::error;

use super::contact::{ContactController, ContactDraft};
use super::picker::AuthorPicker;
use super::reviews::ReviewsController;
use super::{Confirm, Lookup, Route};
use crate::client::{Client, FetchPolicy, QueryFamily};
use crate::datamodel::{Author, AuthorChanges, AuthorDetails, Book, BookChanges};
use crate::error::{Error, Result};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthorDraft {
    pub name: String,
    pub biography: String,
    pub born_date: NaiveDate,
    pub profile_image_uri: String,
    pub contact: ContactDraft,
}

impl AuthorDraft {
    fn snapshot(author: &Author, details: Option<&AuthorDetails>) -> Self {
        Self {
            name: author.name.clone(),
            biography: author.biography.clone(),
            born_date: author.born_date,
            profile_image_uri: author.profile_image_uri.clone(),
            contact: details.map(ContactDraft::from).unwrap_or_default(),
        }
    }

    fn changes(&self) -> AuthorChanges {
        AuthorChanges {
            name: Some(self.name.clone()),
            biography: Some(self.biography.clone()),
            born_date: Some(self.born_date),
            profile_image_uri: Some(self.profile_image_uri.clone()),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct AuthorView {
    pub author: Lookup<Author>,
    pub details: Option<AuthorDetails>,
    pub editing: bool,
    pub updating: bool,
    pub message: Option<String>,
}

pub struct AuthorDetailController {
    client: Arc<Client>,
    id: i32,
    contact: ContactController,
    draft: Option<AuthorDraft>,
    state: watch::Sender<AuthorView>,
}

impl AuthorDetailController {
    pub fn new(client: Arc<Client>, id: i32) -> Self {
        Self {
            contact: ContactController::new(client.clone(), id),
            client,
            id,
            draft: None,
            state: watch::Sender::new(AuthorView::default()),
        }
    }

    pub fn id(&self) -> i32 {
        self.id
    }

    pub fn subscribe(&self) -> watch::Receiver<AuthorView> {
        self.state.subscribe()
    }

    pub fn view(&self) -> AuthorView {
        self.state.borrow().clone()
    }

    pub async fn load(&mut self) -> Result<()> {
        self.fetch(FetchPolicy::CacheFirst).await
    }

    async fn fetch(&mut self, policy: FetchPolicy) -> Result<()> {
        let loaded = async {
            let author = self.client.author(self.id, policy).await?;
            let details = self.contact.load(policy).await?.cloned();
            Ok::<_, Error>((author, details))
        }
        .await;

        match loaded {
            Ok((author, details)) => {
                self.state.send_modify(|view| {
                    view.author = author.into();
                    view.details = details;
                });
                Ok(())
            }
            Err(err) => {
                error!(id = self.id, "Error loading author: {err}");
                self.state
                    .send_modify(|view| view.author = Lookup::Failed(err.user_message()));
                Err(err)
            }
        }
    }

    pub fn begin_edit(&mut self) -> Result<&mut AuthorDraft> {
        let draft = {
            let view = self.state.borrow();
            let author = view.author.found().ok_or(Error::NotLoaded("author"))?;
            AuthorDraft::snapshot(author, view.details.as_ref())
        };
        self.state.send_modify(|view| {
            view.editing = true;
            view.message = None;
        });
        Ok(self.draft.insert(draft))
    }

    pub fn draft(&self) -> Option<&AuthorDraft> {
        self.draft.as_ref()
    }

    pub fn draft_mut(&mut self) -> Option<&mut AuthorDraft> {
        self.draft.as_mut()
    }

    pub fn cancel_edit(&mut self) {
        self.draft = None;
        self.state.send_modify(|view| {
            view.editing = false;
            view.message = None;
        });
    }

    /// Submits the draft: the author record first, then the contact details.
    pub async fn save(&mut self) -> Result<()> {
        let draft = self.draft.clone().ok_or(Error::NotEditing)?;

        self.state.send_modify(|view| view.updating = true);
        let result = self.submit(&draft).await;
        self.state.send_modify(|view| view.updating = false);

        match result {
            Ok(()) => {
                self.draft = None;
                self.state.send_modify(|view| {
                    view.editing = false;
                    view.message = None;
                });
                Ok(())
            }
            Err(err) => {
                error!(id = self.id, "Error updating author: {err}");
                self.state
                    .send_modify(|view| view.message = Some(err.user_message()));
                Err(err)
            }
        }
    }

    async fn submit(&mut self, draft: &AuthorDraft) -> Result<()> {
        self.client.update_author(self.id, &draft.changes()).await?;
        // Book rows embed the author's name.
        self.client.evict(QueryFamily::Authors);
        self.client.evict(QueryFamily::Books);

        let contact = self.contact.save(&draft.contact).await;
        // Failures are logged and shown by `fetch`; the update itself stands.
        self.fetch(FetchPolicy::NetworkOnly).await.ok();
        contact.map(drop)
    }

    /// Returns the route to navigate to, or `None` when the user declined.
    pub async fn delete(&mut self, confirm: &impl Confirm) -> Result<Option<Route>> {
        if !confirm.confirm("Are you sure you want to delete this author?") {
            return Ok(None);
        }
        match self.client.delete_author(self.id).await {
            Ok(_) => {
                self.client.evict(QueryFamily::Authors);
                self.client.evict(QueryFamily::Books);
                self.client.evict(QueryFamily::AuthorDetails);
                Ok(Some(Route::Authors))
            }
            Err(err) => {
                error!(id = self.id, "Error deleting author: {err}");
                self.state
                    .send_modify(|view| view.message = Some(err.user_message()));
                Err(err)
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookDraft {
    pub title: String,
    pub published_date: NaiveDate,
    pub author_id: i32,
    pub cover_image_uri: String,
}

impl BookDraft {
    fn snapshot(book: &Book) -> Self {
        Self {
            title: book.title.clone(),
            published_date: book.published_date,
            author_id: book.author_id,
            cover_image_uri: book.cover_image_uri.clone(),
        }
    }

    fn changes(&self) -> BookChanges {
        BookChanges {
            title: Some(self.title.clone()),
            published_date: Some(self.published_date),
            author_id: Some(self.author_id),
            cover_image_uri: Some(self.cover_image_uri.clone()),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct BookView {
    pub book: Lookup<Book>,
    pub editing: bool,
    pub updating: bool,
    pub message: Option<String>,
}

pub struct BookDetailController {
    client: Arc<Client>,
    id: i32,
    reviews: ReviewsController,
    authors: AuthorPicker,
    draft: Option<BookDraft>,
    state: watch::Sender<BookView>,
}

impl BookDetailController {
    pub fn new(client: Arc<Client>, id: i32) -> Self {
        Self {
            reviews: ReviewsController::new(client.clone(), id),
            authors: AuthorPicker::new(client.clone()),
            client,
            id,
            draft: None,
            state: watch::Sender::new(BookView::default()),
        }
    }

    pub fn id(&self) -> i32 {
        self.id
    }

    pub fn subscribe(&self) -> watch::Receiver<BookView> {
        self.state.subscribe()
    }

    pub fn view(&self) -> BookView {
        self.state.borrow().clone()
    }

    pub fn reviews(&mut self) -> &mut ReviewsController {
        &mut self.reviews
    }

    /// Author options offered while editing; empty until edit mode is entered.
    pub fn authors(&self) -> &AuthorPicker {
        &self.authors
    }

    pub async fn load(&mut self) -> Result<()> {
        self.fetch(FetchPolicy::CacheFirst).await?;
        self.reviews.load(FetchPolicy::CacheFirst).await
    }

    async fn fetch(&mut self, policy: FetchPolicy) -> Result<()> {
        match self.client.book(self.id, policy).await {
            Ok(book) => {
                self.state.send_modify(|view| view.book = book.into());
                Ok(())
            }
            Err(err) => {
                error!(id = self.id, "Error loading book: {err}");
                self.state
                    .send_modify(|view| view.book = Lookup::Failed(err.user_message()));
                Err(err)
            }
        }
    }

    /// Enters edit mode and loads the author options. A failure to load the
    /// options is logged but does not prevent editing.
    pub async fn begin_edit(&mut self) -> Result<&mut BookDraft> {
        let draft = {
            let view = self.state.borrow();
            let book = view.book.found().ok_or(Error::NotLoaded("book"))?;
            BookDraft::snapshot(book)
        };
        // Logged by the picker; editing goes on without options.
        self.authors.open().await.ok();
        self.state.send_modify(|view| {
            view.editing = true;
            view.message = None;
        });
        Ok(self.draft.insert(draft))
    }

    pub fn draft(&self) -> Option<&BookDraft> {
        self.draft.as_ref()
    }

    pub fn draft_mut(&mut self) -> Option<&mut BookDraft> {
        self.draft.as_mut()
    }

    pub fn cancel_edit(&mut self) {
        self.draft = None;
        self.state.send_modify(|view| {
            view.editing = false;
            view.message = None;
        });
    }

    pub async fn save(&mut self) -> Result<()> {
        let draft = self.draft.clone().ok_or(Error::NotEditing)?;

        self.state.send_modify(|view| view.updating = true);
        let result = self.submit(&draft).await;
        self.state.send_modify(|view| view.updating = false);

        match result {
            Ok(()) => {
                self.draft = None;
                self.state.send_modify(|view| {
                    view.editing = false;
                    view.message = None;
                });
                Ok(())
            }
            Err(err) => {
                error!(id = self.id, "Error updating book: {err}");
                self.state
                    .send_modify(|view| view.message = Some(err.user_message()));
                Err(err)
            }
        }
    }

    async fn submit(&mut self, draft: &BookDraft) -> Result<()> {
        self.client.update_book(self.id, &draft.changes()).await?;

        // Author rows embed book titles.
        self.client.evict(QueryFamily::Books);
        self.client.evict(QueryFamily::Authors);
        // Failures are logged and shown by `fetch`; the update itself stands.
        self.fetch(FetchPolicy::NetworkOnly).await.ok();
        Ok(())
    }

    pub async fn delete(&mut self, confirm: &impl Confirm) -> Result<Option<Route>> {
        if !confirm.confirm("Are you sure you want to delete this book?") {
            return Ok(None);
        }
        match self.client.delete_book(self.id).await {
            Ok(_) => {
                self.client.evict(QueryFamily::Books);
                self.client.evict(QueryFamily::Authors);
                self.client.evict(QueryFamily::BookReviews);
                Ok(Some(Route::Books))
            }
            Err(err) => {
                error!(id = self.id, "Error deleting book: {err}");
                self.state
                    .send_modify(|view| view.message = Some(err.user_message()));
                Err(err)
            }
        }
    }
}
