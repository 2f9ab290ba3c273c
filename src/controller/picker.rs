use std::sync::Arc;

use tracing::error;

use crate::client::{Client, FetchPolicy};
use crate::datamodel::{AuthorFilter, AuthorRef};
use crate::error::Result;

/// How many authors an author dropdown offers.
pub const AUTHOR_OPTIONS_PAGE_SIZE: u32 = 100;

/// The author dropdown of the book views. Options are fetched the first time
/// the dropdown is opened and kept afterwards.
pub struct AuthorPicker {
    client: Arc<Client>,
    options: Option<Vec<AuthorRef>>,
}

impl AuthorPicker {
    pub fn new(client: Arc<Client>) -> Self {
        Self {
            client,
            options: None,
        }
    }

    pub fn is_loaded(&self) -> bool {
        self.options.is_some()
    }

    pub fn options(&self) -> &[AuthorRef] {
        self.options.as_deref().unwrap_or_default()
    }

    pub fn name_of(&self, author_id: i32) -> Option<&str> {
        self.options()
            .iter()
            .find(|author| author.id == author_id)
            .map(|author| author.name.as_str())
    }

    pub async fn open(&mut self) -> Result<&[AuthorRef]> {
        if self.options.is_none() {
            let page = self
                .client
                .authors(
                    &AuthorFilter::default(),
                    1,
                    AUTHOR_OPTIONS_PAGE_SIZE,
                    FetchPolicy::CacheFirst,
                )
                .await
                .inspect_err(|err| error!("Error loading authors: {err}"))?;
            let options = page
                .edges
                .into_iter()
                .map(|author| AuthorRef {
                    id: author.id,
                    name: author.name,
                })
                .collect();
            self.options = Some(options);
        }
        Ok(self.options())
    }
}
