use std::sync::Arc;

use tokio::sync::watch;
use tracing::error;

use super::{Confirm, Status};
use crate::client::{Client, FetchPolicy};
use crate::datamodel::{BookReview, NewReview, Rating};
use crate::error::{Error, Result};

/// The "write a review" form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReviewDraft {
    pub user_name: String,
    pub review: String,
    pub rating: i32,
}

impl Default for ReviewDraft {
    fn default() -> Self {
        Self {
            user_name: String::new(),
            review: String::new(),
            rating: i32::from(Rating::default().get()),
        }
    }
}

impl ReviewDraft {
    pub fn validate(&self, book_id: i32) -> Result<NewReview> {
        if self.user_name.trim().is_empty() {
            return Err(Error::validation("Name is required"));
        }
        if self.review.trim().is_empty() {
            return Err(Error::validation("Review text is required"));
        }
        Ok(NewReview {
            book_id,
            user_name: self.user_name.trim().to_owned(),
            review: self.review.trim().to_owned(),
            rating: Rating::new(self.rating)?,
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReviewsState {
    pub reviews: Vec<BookReview>,
    pub status: Status,
    pub submitting: bool,
    pub message: Option<String>,
}

/// Reviews of one book.
pub struct ReviewsController {
    client: Arc<Client>,
    book_id: i32,
    state: watch::Sender<ReviewsState>,
}

impl ReviewsController {
    pub fn new(client: Arc<Client>, book_id: i32) -> Self {
        Self {
            client,
            book_id,
            state: watch::Sender::new(ReviewsState::default()),
        }
    }

    pub fn subscribe(&self) -> watch::Receiver<ReviewsState> {
        self.state.subscribe()
    }

    pub fn state(&self) -> ReviewsState {
        self.state.borrow().clone()
    }

    pub async fn load(&mut self, policy: FetchPolicy) -> Result<()> {
        self.state.send_modify(|state| state.status = Status::Loading);
        match self.client.book_reviews(self.book_id, policy).await {
            Ok(reviews) => {
                self.state.send_modify(|state| {
                    state.reviews = reviews;
                    state.status = Status::Ready;
                });
                Ok(())
            }
            Err(err) => {
                error!(book_id = self.book_id, "Error loading reviews: {err}");
                self.state
                    .send_modify(|state| state.status = Status::Failed(err.user_message()));
                Err(err)
            }
        }
    }

    /// Validates and submits `draft`. Invalid drafts never reach the server.
    pub async fn create(&mut self, draft: &ReviewDraft) -> Result<BookReview> {
        let review = match draft.validate(self.book_id) {
            Ok(review) => review,
            Err(err) => {
                self.state
                    .send_modify(|state| state.message = Some(err.user_message()));
                return Err(err);
            }
        };

        self.state.send_modify(|state| {
            state.submitting = true;
            state.message = None;
        });
        let result = self.client.create_book_review(&review).await;
        self.state.send_modify(|state| state.submitting = false);

        match result {
            Ok(created) => {
                // The review exists either way; a failed reload only shows in
                // the list status.
                self.load(FetchPolicy::NetworkOnly).await.ok();
                Ok(created)
            }
            Err(err) => {
                error!(book_id = self.book_id, "Error creating review: {err}");
                self.state
                    .send_modify(|state| state.message = Some(err.user_message()));
                Err(err)
            }
        }
    }

    /// Returns `false` when the user declined.
    pub async fn delete(&mut self, review_id: i32, confirm: &impl Confirm) -> Result<bool> {
        if !confirm.confirm("Are you sure you want to delete this review?") {
            return Ok(false);
        }
        match self.client.delete_book_review(review_id).await {
            Ok(_) => {
                self.load(FetchPolicy::NetworkOnly).await.ok();
                Ok(true)
            }
            Err(err) => {
                error!(book_id = self.book_id, review_id, "Error deleting review: {err}");
                self.state
                    .send_modify(|state| state.message = Some(err.user_message()));
                Err(err)
            }
        }
    }
}
