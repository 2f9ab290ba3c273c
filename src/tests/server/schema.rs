use async_graphql::{ComplexObject, Context, InputObject, Object, Result, SimpleObject};
use chrono::NaiveDate;

use super::store::{Db, lock, now_millis, parse_written_date, stored_date};

#[derive(SimpleObject, Clone)]
#[graphql(complex, rename_fields = "snake_case")]
pub struct Author {
    pub id: i32,
    pub name: String,
    pub biography: String,
    pub born_date: String,
    pub profile_image_uri: String,
    pub created_at: String,
    pub updated_at: String,
}

#[ComplexObject]
impl Author {
    async fn books(&self, ctx: &Context<'_>) -> Vec<Book> {
        let db = lock(ctx.data_unchecked::<Db>());
        db.books
            .values()
            .filter(|book| book.author_id == self.id)
            .cloned()
            .collect()
    }
}

#[derive(SimpleObject, Clone)]
#[graphql(rename_fields = "snake_case")]
pub struct AuthorDetails {
    pub id: i32,
    pub author_id: i32,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub email: Option<String>,
    pub website: Option<String>,
}

#[derive(SimpleObject, Clone)]
#[graphql(complex, rename_fields = "snake_case")]
pub struct Book {
    pub id: i32,
    pub title: String,
    pub published_date: String,
    pub author_id: i32,
    pub cover_image_uri: String,
    pub created_at: String,
    pub updated_at: String,
}

#[ComplexObject]
impl Book {
    async fn author(&self, ctx: &Context<'_>) -> Result<Author> {
        let db = lock(ctx.data_unchecked::<Db>());
        db.authors
            .get(&self.author_id)
            .cloned()
            .ok_or_else(|| format!("Author {} not found", self.author_id).into())
    }
}

#[derive(SimpleObject, Clone)]
#[graphql(rename_fields = "snake_case")]
pub struct BookReview {
    pub id: i32,
    pub book_id: i32,
    pub user_name: String,
    pub review: String,
    pub rating: i32,
}

#[derive(SimpleObject)]
pub struct PageInfo {
    has_next_page: bool,
    total_count: i32,
}

#[derive(SimpleObject)]
pub struct AuthorConnection {
    edges: Vec<Author>,
    page_info: PageInfo,
}

#[derive(SimpleObject)]
pub struct BookConnection {
    edges: Vec<Book>,
    page_info: PageInfo,
}

#[derive(InputObject)]
pub struct DateRange {
    start: String,
    end: String,
}

impl DateRange {
    fn contains(&self, stored: &str) -> bool {
        let parse = |raw: &str| NaiveDate::parse_from_str(raw, "%Y-%m-%d").ok();
        match (parse(&self.start), parse(&self.end), stored_date(stored)) {
            (Some(start), Some(end), Some(date)) => start <= date && date <= end,
            _ => false,
        }
    }
}

#[derive(InputObject)]
#[graphql(rename_fields = "snake_case")]
pub struct AuthorFilter {
    id: Option<i32>,
    name: Option<String>,
    born_date_range: Option<DateRange>,
}

#[derive(InputObject)]
#[graphql(rename_fields = "snake_case")]
pub struct BookFilter {
    id: Option<i32>,
    title: Option<String>,
    author_id: Option<i32>,
    published_date_range: Option<DateRange>,
}

fn matches_text(haystack: &str, needle: &Option<String>) -> bool {
    needle
        .as_ref()
        .is_none_or(|needle| haystack.to_lowercase().contains(&needle.to_lowercase()))
}

fn paginate<T>(items: Vec<T>, page: i32, page_size: i32) -> (Vec<T>, PageInfo) {
    let size = page_size.max(1) as usize;
    let start = (page.max(1) as usize - 1) * size;
    let total = items.len();
    let edges = items.into_iter().skip(start).take(size).collect();
    let info = PageInfo {
        has_next_page: start + size < total,
        total_count: total as i32,
    };
    (edges, info)
}

fn written_date(raw: &str) -> Result<String> {
    parse_written_date(raw).ok_or_else(|| format!("Invalid date `{raw}`").into())
}

pub struct QueryRoot;

#[Object]
impl QueryRoot {
    async fn authors(
        &self,
        ctx: &Context<'_>,
        filter: Option<AuthorFilter>,
        #[graphql(default = 1)] page: i32,
        #[graphql(default = 5)] page_size: i32,
    ) -> Result<AuthorConnection> {
        let mut db = lock(ctx.data_unchecked::<Db>());
        db.hit("authors")?;
        let filter = filter.unwrap_or(AuthorFilter {
            id: None,
            name: None,
            born_date_range: None,
        });
        let authors = db
            .authors
            .values()
            .filter(|a| filter.id.is_none_or(|id| a.id == id))
            .filter(|a| matches_text(&a.name, &filter.name))
            .filter(|a| {
                filter
                    .born_date_range
                    .as_ref()
                    .is_none_or(|range| range.contains(&a.born_date))
            })
            .cloned()
            .collect();
        let (edges, page_info) = paginate(authors, page, page_size);
        Ok(AuthorConnection { edges, page_info })
    }

    async fn books(
        &self,
        ctx: &Context<'_>,
        filter: Option<BookFilter>,
        #[graphql(default = 1)] page: i32,
        #[graphql(default = 5)] page_size: i32,
    ) -> Result<BookConnection> {
        let mut db = lock(ctx.data_unchecked::<Db>());
        db.hit("books")?;
        let filter = filter.unwrap_or(BookFilter {
            id: None,
            title: None,
            author_id: None,
            published_date_range: None,
        });
        let books = db
            .books
            .values()
            .filter(|b| filter.id.is_none_or(|id| b.id == id))
            .filter(|b| filter.author_id.is_none_or(|id| b.author_id == id))
            .filter(|b| matches_text(&b.title, &filter.title))
            .filter(|b| {
                filter
                    .published_date_range
                    .as_ref()
                    .is_none_or(|range| range.contains(&b.published_date))
            })
            .cloned()
            .collect();
        let (edges, page_info) = paginate(books, page, page_size);
        Ok(BookConnection { edges, page_info })
    }

    async fn author_details(
        &self,
        ctx: &Context<'_>,
        #[graphql(name = "author_id")] author_id: i32,
    ) -> Result<Option<AuthorDetails>> {
        let mut db = lock(ctx.data_unchecked::<Db>());
        db.hit("authorDetails")?;
        Ok(db.details.get(&author_id).cloned())
    }

    async fn book_reviews(
        &self,
        ctx: &Context<'_>,
        #[graphql(name = "book_id")] book_id: i32,
    ) -> Result<Vec<BookReview>> {
        let mut db = lock(ctx.data_unchecked::<Db>());
        db.hit("bookReviews")?;
        Ok(db
            .reviews
            .values()
            .filter(|r| r.book_id == book_id)
            .cloned()
            .collect())
    }
}

pub struct MutationRoot;

#[Object(rename_args = "snake_case")]
impl MutationRoot {
    async fn create_author(
        &self,
        ctx: &Context<'_>,
        name: String,
        biography: String,
        born_date: String,
        profile_image_uri: String,
    ) -> Result<Author> {
        let mut db = lock(ctx.data_unchecked::<Db>());
        db.hit("createAuthor")?;
        db.record_date("createAuthor", &born_date);
        let id = db.next_id();
        let author = Author {
            id,
            name,
            biography,
            born_date: written_date(&born_date)?,
            profile_image_uri,
            created_at: now_millis(),
            updated_at: now_millis(),
        };
        db.authors.insert(id, author.clone());
        Ok(author)
    }

    async fn update_author(
        &self,
        ctx: &Context<'_>,
        id: i32,
        name: Option<String>,
        biography: Option<String>,
        born_date: Option<String>,
        profile_image_uri: Option<String>,
    ) -> Result<Author> {
        let raw_born_date = born_date;
        let born_date = raw_born_date.as_deref().map(written_date).transpose()?;
        let mut db = lock(ctx.data_unchecked::<Db>());
        db.hit("updateAuthor")?;
        if let Some(raw) = &raw_born_date {
            db.record_date("updateAuthor", raw);
        }
        let author = db.authors.get_mut(&id).ok_or("Author not found")?;
        if let Some(name) = name {
            author.name = name;
        }
        if let Some(biography) = biography {
            author.biography = biography;
        }
        if let Some(born_date) = born_date {
            author.born_date = born_date;
        }
        if let Some(uri) = profile_image_uri {
            author.profile_image_uri = uri;
        }
        author.updated_at = now_millis();
        Ok(author.clone())
    }

    async fn delete_author(&self, ctx: &Context<'_>, id: i32) -> Result<Author> {
        let mut db = lock(ctx.data_unchecked::<Db>());
        db.hit("deleteAuthor")?;
        let author = db.authors.remove(&id).ok_or("Author not found")?;
        db.details.remove(&id);
        let books: Vec<i32> = db
            .books
            .values()
            .filter(|b| b.author_id == id)
            .map(|b| b.id)
            .collect();
        db.books.retain(|_, b| b.author_id != id);
        db.reviews.retain(|_, r| !books.contains(&r.book_id));
        Ok(author)
    }

    async fn create_author_detail(
        &self,
        ctx: &Context<'_>,
        author_id: i32,
        phone: Option<String>,
        address: Option<String>,
        email: Option<String>,
        website: Option<String>,
    ) -> Result<AuthorDetails> {
        let mut db = lock(ctx.data_unchecked::<Db>());
        db.hit("createAuthorDetail")?;
        if !db.authors.contains_key(&author_id) {
            return Err("Author not found".into());
        }
        if db.details.contains_key(&author_id) {
            return Err("Author details already exist".into());
        }
        let details = AuthorDetails {
            id: db.next_id(),
            author_id,
            phone,
            address,
            email,
            website,
        };
        db.details.insert(author_id, details.clone());
        Ok(details)
    }

    async fn update_author_detail(
        &self,
        ctx: &Context<'_>,
        author_id: i32,
        phone: Option<String>,
        address: Option<String>,
        email: Option<String>,
        website: Option<String>,
    ) -> Result<AuthorDetails> {
        let mut db = lock(ctx.data_unchecked::<Db>());
        db.hit("updateAuthorDetail")?;
        let details = db
            .details
            .get_mut(&author_id)
            .ok_or("Author details not found")?;
        for (value, field) in [
            (phone, &mut details.phone),
            (address, &mut details.address),
            (email, &mut details.email),
            (website, &mut details.website),
        ] {
            if value.is_some() {
                *field = value;
            }
        }
        Ok(details.clone())
    }

    async fn create_book(
        &self,
        ctx: &Context<'_>,
        title: String,
        published_date: String,
        author_id: i32,
        cover_image_uri: String,
    ) -> Result<Book> {
        let mut db = lock(ctx.data_unchecked::<Db>());
        db.hit("createBook")?;
        db.record_date("createBook", &published_date);
        if !db.authors.contains_key(&author_id) {
            return Err("Author not found".into());
        }
        let id = db.next_id();
        let book = Book {
            id,
            title,
            published_date: written_date(&published_date)?,
            author_id,
            cover_image_uri,
            created_at: now_millis(),
            updated_at: now_millis(),
        };
        db.books.insert(id, book.clone());
        Ok(book)
    }

    async fn update_book(
        &self,
        ctx: &Context<'_>,
        id: i32,
        title: Option<String>,
        published_date: Option<String>,
        author_id: Option<i32>,
        cover_image_uri: Option<String>,
    ) -> Result<Book> {
        let raw_published_date = published_date;
        let published_date = raw_published_date
            .as_deref()
            .map(written_date)
            .transpose()?;
        let mut db = lock(ctx.data_unchecked::<Db>());
        db.hit("updateBook")?;
        if let Some(raw) = &raw_published_date {
            db.record_date("updateBook", raw);
        }
        if author_id.is_some_and(|id| !db.authors.contains_key(&id)) {
            return Err("Author not found".into());
        }
        let book = db.books.get_mut(&id).ok_or("Book not found")?;
        if let Some(title) = title {
            book.title = title;
        }
        if let Some(published_date) = published_date {
            book.published_date = published_date;
        }
        if let Some(author_id) = author_id {
            book.author_id = author_id;
        }
        if let Some(uri) = cover_image_uri {
            book.cover_image_uri = uri;
        }
        book.updated_at = now_millis();
        Ok(book.clone())
    }

    async fn delete_book(&self, ctx: &Context<'_>, id: i32) -> Result<Book> {
        let mut db = lock(ctx.data_unchecked::<Db>());
        db.hit("deleteBook")?;
        let book = db.books.remove(&id).ok_or("Book not found")?;
        db.reviews.retain(|_, r| r.book_id != id);
        Ok(book)
    }

    async fn create_book_review(
        &self,
        ctx: &Context<'_>,
        book_id: i32,
        user_name: String,
        review: String,
        rating: i32,
    ) -> Result<BookReview> {
        let mut db = lock(ctx.data_unchecked::<Db>());
        db.hit("createBookReview")?;
        if !db.books.contains_key(&book_id) {
            return Err("Book not found".into());
        }
        if !(1..=5).contains(&rating) {
            return Err("Rating must be between 1 and 5".into());
        }
        let review = BookReview {
            id: db.next_id(),
            book_id,
            user_name,
            review,
            rating,
        };
        db.reviews.insert(review.id, review.clone());
        Ok(review)
    }

    async fn delete_book_review(&self, ctx: &Context<'_>, id: i32) -> Result<BookReview> {
        let mut db = lock(ctx.data_unchecked::<Db>());
        db.hit("deleteBookReview")?;
        db.reviews
            .remove(&id)
            .ok_or_else(|| "Review not found".into())
    }
}
