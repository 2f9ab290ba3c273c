use std::fmt::Debug;
use std::sync::Arc;

use tokio::sync::watch;
use tracing::error;

use super::Status;
use crate::client::{Client, FetchPolicy};
use crate::datamodel::{Author, AuthorFilter, Book, BookFilter, Page, PageInfo};
use crate::error::Result;

/// An entity that can be browsed page by page.
#[allow(async_fn_in_trait)]
pub trait Listing: Clone + Send + Sync + 'static {
    type Filter: Clone + Default + PartialEq + Debug + Send + Sync;

    const NAME: &'static str;

    async fn fetch_page(
        client: &Client,
        filter: &Self::Filter,
        page: u32,
        page_size: u32,
        policy: FetchPolicy,
    ) -> Result<Page<Self>>;
}

impl Listing for Author {
    type Filter = AuthorFilter;

    const NAME: &'static str = "authors";

    async fn fetch_page(
        client: &Client,
        filter: &AuthorFilter,
        page: u32,
        page_size: u32,
        policy: FetchPolicy,
    ) -> Result<Page<Self>> {
        client.authors(filter, page, page_size, policy).await
    }
}

impl Listing for Book {
    type Filter = BookFilter;

    const NAME: &'static str = "books";

    async fn fetch_page(
        client: &Client,
        filter: &BookFilter,
        page: u32,
        page_size: u32,
        policy: FetchPolicy,
    ) -> Result<Page<Self>> {
        client.books(filter, page, page_size, policy).await
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ListState<T> {
    pub page: u32,
    pub items: Vec<T>,
    /// `None` until the current page has been loaded.
    pub page_info: Option<PageInfo>,
    pub status: Status,
}

impl<T> Default for ListState<T> {
    fn default() -> Self {
        Self {
            page: 1,
            items: Vec::new(),
            page_info: None,
            status: Status::Idle,
        }
    }
}

/// Filter and pagination state of a list view.
///
/// Pages are 1-based. Changing the filter goes back to page 1.
pub struct ListController<T: Listing> {
    client: Arc<Client>,
    filter: T::Filter,
    page: u32,
    page_size: u32,
    state: watch::Sender<ListState<T>>,
}

impl<T: Listing> ListController<T> {
    pub fn new(client: Arc<Client>, page_size: u32) -> Self {
        Self {
            client,
            filter: T::Filter::default(),
            page: 1,
            page_size: page_size.max(1),
            state: watch::Sender::new(ListState::default()),
        }
    }

    pub fn filter(&self) -> &T::Filter {
        &self.filter
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn subscribe(&self) -> watch::Receiver<ListState<T>> {
        self.state.subscribe()
    }

    pub fn state(&self) -> ListState<T> {
        self.state.borrow().clone()
    }

    pub fn can_previous(&self) -> bool {
        self.page > 1
    }

    pub fn can_next(&self) -> bool {
        self.state
            .borrow()
            .page_info
            .is_some_and(|info| info.has_next_page)
    }

    /// Loads the current page, from the cache when possible.
    pub async fn load(&mut self) -> Result<()> {
        self.fetch(FetchPolicy::CacheFirst).await
    }

    /// Reloads the current page from the server.
    pub async fn refresh(&mut self) -> Result<()> {
        self.fetch(FetchPolicy::NetworkOnly).await
    }

    pub async fn set_filter(&mut self, filter: T::Filter) -> Result<()> {
        if filter == self.filter {
            return Ok(());
        }
        self.filter = filter;
        self.page = 1;
        self.load().await
    }

    /// Returns `false` without fetching when there is no next page.
    pub async fn next_page(&mut self) -> Result<bool> {
        if !self.can_next() {
            return Ok(false);
        }
        self.page += 1;
        self.load().await?;
        Ok(true)
    }

    pub async fn previous_page(&mut self) -> Result<bool> {
        if !self.can_previous() {
            return Ok(false);
        }
        self.page -= 1;
        self.load().await?;
        Ok(true)
    }

    async fn fetch(&mut self, policy: FetchPolicy) -> Result<()> {
        let page = self.page;
        self.state.send_modify(|state| {
            state.page = page;
            state.page_info = None;
            state.status = Status::Loading;
        });

        match T::fetch_page(&self.client, &self.filter, page, self.page_size, policy).await {
            Ok(result) => {
                self.state.send_modify(|state| {
                    state.items = result.edges;
                    state.page_info = Some(result.page_info);
                    state.status = Status::Ready;
                });
                Ok(())
            }
            Err(err) => {
                error!(list = T::NAME, page, filter = ?self.filter, "Error loading list: {err}");
                self.state.send_modify(|state| {
                    state.items.clear();
                    state.status = Status::Failed(err.user_message());
                });
                Err(err)
            }
        }
    }
}
