use chrono::{DateTime, NaiveDate, Utc};

use crate::error::{Error, Result};

#[derive(Debug, Clone, PartialEq)]
pub struct Author {
    pub id: i32,
    pub name: String,
    pub biography: String,
    pub born_date: NaiveDate,
    pub profile_image_uri: String,
    /// Titles of the author's books, as embedded in list results.
    pub book_titles: Vec<String>,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

/// Optional contact information, stored separately from [`Author`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AuthorDetails {
    pub author_id: i32,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub email: Option<String>,
    pub website: Option<String>,
}

/// The `author { id name }` selection embedded in book results.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthorRef {
    pub id: i32,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Book {
    pub id: i32,
    pub title: String,
    pub published_date: NaiveDate,
    pub author_id: i32,
    /// Missing on mutation results, which do not select the author.
    pub author: Option<AuthorRef>,
    pub cover_image_uri: String,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookReview {
    pub id: i32,
    pub book_id: i32,
    pub user_name: String,
    pub review: String,
    pub rating: Rating,
}

/// A review rating, always within `1..=5`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Rating(u8);

impl Rating {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 5;

    pub fn new(value: i32) -> Result<Self> {
        match u8::try_from(value) {
            Ok(v) if (Self::MIN..=Self::MAX).contains(&v) => Ok(Self(v)),
            _ => Err(Error::validation(format!(
                "Rating must be between {} and {}, got {value}",
                Self::MIN,
                Self::MAX
            ))),
        }
    }

    pub fn get(self) -> u8 {
        self.0
    }
}

impl Default for Rating {
    fn default() -> Self {
        Self(Self::MAX)
    }
}

impl TryFrom<i32> for Rating {
    type Error = Error;

    fn try_from(value: i32) -> Result<Self> {
        Self::new(value)
    }
}

// Write-side records. Dates are converted to the API's string formats by the
// client, never here.

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewAuthor {
    pub name: String,
    pub biography: String,
    pub born_date: NaiveDate,
    pub profile_image_uri: String,
}

/// Fields of an `updateAuthor` call; `None` leaves a field untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AuthorChanges {
    pub name: Option<String>,
    pub biography: Option<String>,
    pub born_date: Option<NaiveDate>,
    pub profile_image_uri: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewBook {
    pub title: String,
    pub published_date: NaiveDate,
    pub author_id: i32,
    pub cover_image_uri: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BookChanges {
    pub title: Option<String>,
    pub published_date: Option<NaiveDate>,
    pub author_id: Option<i32>,
    pub cover_image_uri: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewReview {
    pub book_id: i32,
    pub user_name: String,
    pub review: String,
    pub rating: Rating,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PageInfo {
    pub has_next_page: bool,
    pub total_count: i32,
}

/// One page of a list query.
#[derive(Debug, Clone, PartialEq)]
pub struct Page<T> {
    pub edges: Vec<T>,
    pub page_info: PageInfo,
}

/// Filter state of the authors list.
///
/// The date range only narrows the query once both ends are set.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct AuthorFilter {
    pub id: Option<i32>,
    pub name: String,
    pub born_from: Option<NaiveDate>,
    pub born_to: Option<NaiveDate>,
}

impl AuthorFilter {
    pub fn by_id(id: i32) -> Self {
        Self {
            id: Some(id),
            ..Default::default()
        }
    }

    pub fn born_range(&self) -> Option<(NaiveDate, NaiveDate)> {
        self.born_from.zip(self.born_to)
    }
}

/// Filter state of the books list.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct BookFilter {
    pub id: Option<i32>,
    pub title: String,
    pub author_id: Option<i32>,
    pub published_from: Option<NaiveDate>,
    pub published_to: Option<NaiveDate>,
}

impl BookFilter {
    pub fn by_id(id: i32) -> Self {
        Self {
            id: Some(id),
            ..Default::default()
        }
    }

    pub fn by_author(author_id: i32) -> Self {
        Self {
            author_id: Some(author_id),
            ..Default::default()
        }
    }

    pub fn published_range(&self) -> Option<(NaiveDate, NaiveDate)> {
        self.published_from.zip(self.published_to)
    }
}
