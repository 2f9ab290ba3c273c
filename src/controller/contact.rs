use std::sync::Arc;

use tracing::warn;

use crate::client::{Client, FetchPolicy};
use crate::datamodel::AuthorDetails;
use crate::error::Result;

/// Editable contact fields of an author.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContactDraft {
    pub phone: Option<String>,
    pub address: Option<String>,
    pub email: Option<String>,
    pub website: Option<String>,
}

impl From<&AuthorDetails> for ContactDraft {
    fn from(details: &AuthorDetails) -> Self {
        Self {
            phone: details.phone.clone(),
            address: details.address.clone(),
            email: details.email.clone(),
            website: details.website.clone(),
        }
    }
}

/// Contact details of one author. They are stored apart from the author, so
/// the first save creates them and later saves update them.
pub struct ContactController {
    client: Arc<Client>,
    author_id: i32,
    details: Option<AuthorDetails>,
}

impl ContactController {
    pub fn new(client: Arc<Client>, author_id: i32) -> Self {
        Self {
            client,
            author_id,
            details: None,
        }
    }

    pub fn details(&self) -> Option<&AuthorDetails> {
        self.details.as_ref()
    }

    pub async fn load(&mut self, policy: FetchPolicy) -> Result<Option<&AuthorDetails>> {
        self.details = self.client.author_details(self.author_id, policy).await?;
        Ok(self.details.as_ref())
    }

    /// Returns `None` when there was nothing to save: no stored details and an
    /// empty draft.
    ///
    /// The details are reloaded after every attempt, so a failed create caused
    /// by a row that appeared in the meantime turns into an update next time.
    pub async fn save(&mut self, draft: &ContactDraft) -> Result<Option<AuthorDetails>> {
        if self.details.is_none() && *draft == ContactDraft::default() {
            return Ok(None);
        }
        let details = AuthorDetails {
            author_id: self.author_id,
            phone: draft.phone.clone(),
            address: draft.address.clone(),
            email: draft.email.clone(),
            website: draft.website.clone(),
        };
        let saved = if self.details.is_some() {
            self.client.update_author_detail(&details).await
        } else {
            self.client.create_author_detail(&details).await
        };
        let reloaded = self.load(FetchPolicy::NetworkOnly).await.map(drop);
        if let Err(err) = reloaded {
            warn!(author_id = self.author_id, "Error reloading author details: {err}");
        }
        saved.map(Some)
    }
}
