//! Typed operations over the query catalog.
//!
//! Each method builds one catalog operation, runs it and decodes the wire
//! records into [`crate::datamodel`] types, rejecting malformed dates and
//! ratings on the way in.

use cynic::{MutationBuilder as _, QueryBuilder as _};
use tracing::info;

use super::queries::{self, DateRangeInput};
use super::{Client, FetchPolicy, QueryFamily};
use crate::dates;
use crate::datamodel::{
    Author, AuthorChanges, AuthorDetails, AuthorFilter, AuthorRef, Book, BookChanges, BookFilter,
    BookReview, NewAuthor, NewBook, NewReview, Page, PageInfo, Rating,
};
use crate::error::{Error, Result};

fn int(value: u32) -> i32 {
    i32::try_from(value).unwrap_or(i32::MAX)
}

fn non_empty(text: &str) -> Option<String> {
    let text = text.trim();
    (!text.is_empty()).then(|| text.to_owned())
}

fn date_range(range: Option<(chrono::NaiveDate, chrono::NaiveDate)>) -> Option<DateRangeInput> {
    range.map(|(start, end)| DateRangeInput {
        start: dates::to_input_string(start),
        end: dates::to_input_string(end),
    })
}

impl From<&AuthorFilter> for queries::AuthorFilterInput {
    fn from(filter: &AuthorFilter) -> Self {
        Self {
            id: filter.id,
            name: non_empty(&filter.name),
            born_date_range: date_range(filter.born_range()),
        }
    }
}

impl From<&BookFilter> for queries::BookFilterInput {
    fn from(filter: &BookFilter) -> Self {
        Self {
            id: filter.id,
            title: non_empty(&filter.title),
            author_id: filter.author_id,
            published_date_range: date_range(filter.published_range()),
        }
    }
}

impl From<queries::PageInfo> for PageInfo {
    fn from(info: queries::PageInfo) -> Self {
        Self {
            has_next_page: info.has_next_page,
            total_count: info.total_count,
        }
    }
}

impl From<queries::AuthorName> for AuthorRef {
    fn from(author: queries::AuthorName) -> Self {
        Self {
            id: author.id,
            name: author.name,
        }
    }
}

impl TryFrom<queries::AuthorNode> for Author {
    type Error = Error;

    fn try_from(node: queries::AuthorNode) -> Result<Self> {
        Ok(Self {
            id: node.id,
            name: node.name,
            biography: node.biography,
            born_date: dates::parse_epoch_millis("born_date", &node.born_date)?.date_naive(),
            profile_image_uri: node.profile_image_uri,
            book_titles: node.books.into_iter().map(|b| b.title).collect(),
            created_at: Some(dates::parse_timestamp("created_at", &node.created_at)?),
            updated_at: Some(dates::parse_timestamp("updated_at", &node.updated_at)?),
        })
    }
}

impl TryFrom<queries::AuthorFields> for Author {
    type Error = Error;

    fn try_from(fields: queries::AuthorFields) -> Result<Self> {
        Ok(Self {
            id: fields.id,
            name: fields.name,
            biography: fields.biography,
            born_date: dates::parse_epoch_millis("born_date", &fields.born_date)?.date_naive(),
            profile_image_uri: fields.profile_image_uri,
            book_titles: Vec::new(),
            created_at: None,
            updated_at: None,
        })
    }
}

impl TryFrom<queries::BookNode> for Book {
    type Error = Error;

    fn try_from(node: queries::BookNode) -> Result<Self> {
        Ok(Self {
            id: node.id,
            title: node.title,
            published_date: dates::parse_epoch_millis("published_date", &node.published_date)?
                .date_naive(),
            author_id: node.author_id,
            author: Some(node.author.into()),
            cover_image_uri: node.cover_image_uri,
            created_at: Some(dates::parse_timestamp("created_at", &node.created_at)?),
            updated_at: Some(dates::parse_timestamp("updated_at", &node.updated_at)?),
        })
    }
}

impl TryFrom<queries::BookFields> for Book {
    type Error = Error;

    fn try_from(fields: queries::BookFields) -> Result<Self> {
        Ok(Self {
            id: fields.id,
            title: fields.title,
            published_date: dates::parse_epoch_millis("published_date", &fields.published_date)?
                .date_naive(),
            author_id: fields.author_id,
            author: None,
            cover_image_uri: fields.cover_image_uri,
            created_at: None,
            updated_at: None,
        })
    }
}

impl From<queries::AuthorDetailsFields> for AuthorDetails {
    fn from(fields: queries::AuthorDetailsFields) -> Self {
        Self {
            author_id: fields.author_id,
            phone: fields.phone,
            address: fields.address,
            email: fields.email,
            website: fields.website,
        }
    }
}

impl TryFrom<queries::ReviewFields> for BookReview {
    type Error = Error;

    fn try_from(fields: queries::ReviewFields) -> Result<Self> {
        Ok(Self {
            id: fields.id,
            book_id: fields.book_id,
            user_name: fields.user_name,
            review: fields.review,
            rating: Rating::new(fields.rating).map_err(|err| Error::decode("rating", err))?,
        })
    }
}

fn decode_page<N, T>(edges: Vec<N>, page_info: queries::PageInfo) -> Result<Page<T>>
where
    T: TryFrom<N, Error = Error>,
{
    Ok(Page {
        edges: edges.into_iter().map(T::try_from).collect::<Result<_>>()?,
        page_info: page_info.into(),
    })
}

fn details_variables(details: &AuthorDetails) -> queries::AuthorDetailVariables {
    queries::AuthorDetailVariables {
        author_id: details.author_id,
        phone: details.phone.clone(),
        address: details.address.clone(),
        email: details.email.clone(),
        website: details.website.clone(),
    }
}

impl Client {
    pub async fn authors(
        &self,
        filter: &AuthorFilter,
        page: u32,
        page_size: u32,
        policy: FetchPolicy,
    ) -> Result<Page<Author>> {
        let op = queries::GetAuthors::build(queries::AuthorsVariables {
            filter: Some(filter.into()),
            page: int(page),
            page_size: int(page_size),
        });
        let connection = self.query(QueryFamily::Authors, op, policy).await?.authors;
        decode_page(connection.edges, connection.page_info)
    }

    /// A single author, looked up through the list query filtered by id.
    pub async fn author(&self, id: i32, policy: FetchPolicy) -> Result<Option<Author>> {
        let page = self.authors(&AuthorFilter::by_id(id), 1, 1, policy).await?;
        Ok(page.edges.into_iter().next())
    }

    pub async fn books(
        &self,
        filter: &BookFilter,
        page: u32,
        page_size: u32,
        policy: FetchPolicy,
    ) -> Result<Page<Book>> {
        let op = queries::GetBooks::build(queries::BooksVariables {
            filter: Some(filter.into()),
            page: int(page),
            page_size: int(page_size),
        });
        let connection = self.query(QueryFamily::Books, op, policy).await?.books;
        decode_page(connection.edges, connection.page_info)
    }

    pub async fn book(&self, id: i32, policy: FetchPolicy) -> Result<Option<Book>> {
        let page = self.books(&BookFilter::by_id(id), 1, 1, policy).await?;
        Ok(page.edges.into_iter().next())
    }

    pub async fn author_details(
        &self,
        author_id: i32,
        policy: FetchPolicy,
    ) -> Result<Option<AuthorDetails>> {
        let op = queries::GetAuthorDetails::build(queries::AuthorIdVariables { author_id });
        let data = self.query(QueryFamily::AuthorDetails, op, policy).await?;
        Ok(data.author_details.map(Into::into))
    }

    pub async fn book_reviews(&self, book_id: i32, policy: FetchPolicy) -> Result<Vec<BookReview>> {
        let op = queries::GetBookReviews::build(queries::BookIdVariables { book_id });
        let data = self.query(QueryFamily::BookReviews, op, policy).await?;
        data.book_reviews
            .into_iter()
            .map(BookReview::try_from)
            .collect()
    }

    pub async fn create_author(&self, author: &NewAuthor) -> Result<Author> {
        let op = queries::CreateAuthor::build(queries::CreateAuthorVariables {
            name: author.name.clone(),
            biography: author.biography.clone(),
            born_date: dates::to_input_string(author.born_date),
            profile_image_uri: author.profile_image_uri.clone(),
        });
        let created: Author = self.mutate(op).await?.create_author.try_into()?;
        info!(id = created.id, name = %created.name, "created author");
        Ok(created)
    }

    pub async fn update_author(&self, id: i32, changes: &AuthorChanges) -> Result<Author> {
        let op = queries::UpdateAuthor::build(queries::UpdateAuthorVariables {
            id,
            name: changes.name.clone(),
            biography: changes.biography.clone(),
            born_date: changes.born_date.map(dates::to_update_string),
            profile_image_uri: changes.profile_image_uri.clone(),
        });
        let updated: Author = self.mutate(op).await?.update_author.try_into()?;
        info!(id, "updated author");
        Ok(updated)
    }

    pub async fn delete_author(&self, id: i32) -> Result<AuthorRef> {
        let op = queries::DeleteAuthor::build(queries::IdVariables { id });
        let deleted: AuthorRef = self.mutate(op).await?.delete_author.into();
        info!(id, name = %deleted.name, "deleted author");
        Ok(deleted)
    }

    pub async fn create_author_detail(&self, details: &AuthorDetails) -> Result<AuthorDetails> {
        let op = queries::CreateAuthorDetail::build(details_variables(details));
        let created = self.mutate(op).await?.create_author_detail.into();
        info!(author_id = details.author_id, "created author details");
        Ok(created)
    }

    pub async fn update_author_detail(&self, details: &AuthorDetails) -> Result<AuthorDetails> {
        let op = queries::UpdateAuthorDetail::build(details_variables(details));
        let updated = self.mutate(op).await?.update_author_detail.into();
        info!(author_id = details.author_id, "updated author details");
        Ok(updated)
    }

    pub async fn create_book(&self, book: &NewBook) -> Result<Book> {
        let op = queries::CreateBook::build(queries::CreateBookVariables {
            title: book.title.clone(),
            published_date: dates::to_input_string(book.published_date),
            author_id: book.author_id,
            cover_image_uri: book.cover_image_uri.clone(),
        });
        let created: Book = self.mutate(op).await?.create_book.try_into()?;
        info!(id = created.id, title = %created.title, "created book");
        Ok(created)
    }

    pub async fn update_book(&self, id: i32, changes: &BookChanges) -> Result<Book> {
        let op = queries::UpdateBook::build(queries::UpdateBookVariables {
            id,
            title: changes.title.clone(),
            published_date: changes.published_date.map(dates::to_update_string),
            author_id: changes.author_id,
            cover_image_uri: changes.cover_image_uri.clone(),
        });
        let updated: Book = self.mutate(op).await?.update_book.try_into()?;
        info!(id, "updated book");
        Ok(updated)
    }

    pub async fn delete_book(&self, id: i32) -> Result<Book> {
        let op = queries::DeleteBook::build(queries::IdVariables { id });
        let deleted: Book = self.mutate(op).await?.delete_book.try_into()?;
        info!(id, title = %deleted.title, "deleted book");
        Ok(deleted)
    }

    pub async fn create_book_review(&self, review: &NewReview) -> Result<BookReview> {
        let op = queries::CreateBookReview::build(queries::CreateReviewVariables {
            book_id: review.book_id,
            user_name: review.user_name.clone(),
            review: review.review.clone(),
            rating: i32::from(review.rating.get()),
        });
        let created: BookReview = self.mutate(op).await?.create_book_review.try_into()?;
        info!(id = created.id, book_id = created.book_id, "created review");
        Ok(created)
    }

    pub async fn delete_book_review(&self, id: i32) -> Result<BookReview> {
        let op = queries::DeleteBookReview::build(queries::IdVariables { id });
        let deleted: BookReview = self.mutate(op).await?.delete_book_review.try_into()?;
        info!(id, book_id = deleted.book_id, "deleted review");
        Ok(deleted)
    }
}
