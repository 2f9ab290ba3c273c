use std::collections::{BTreeMap, HashMap, HashSet};
use std::sync::{Arc, Mutex, MutexGuard};

use chrono::{NaiveDate, Utc};

use super::schema::{Author, AuthorDetails, Book, BookReview};
use crate::dates::to_epoch_millis;

pub type Db = Arc<Mutex<Store>>;

pub fn lock(db: &Db) -> MutexGuard<'_, Store> {
    db.lock().unwrap()
}

/// In-memory state behind the test API, plus a counter of calls per root
/// field and the raw date arguments each mutation received.
#[derive(Default)]
pub struct Store {
    next_id: i32,
    pub authors: BTreeMap<i32, Author>,
    /// Keyed by author id.
    pub details: BTreeMap<i32, AuthorDetails>,
    pub books: BTreeMap<i32, Book>,
    pub reviews: BTreeMap<i32, BookReview>,
    pub hits: HashMap<&'static str, usize>,
    /// Root fields that answer with an error.
    pub failing: HashSet<&'static str>,
    pub written_dates: Vec<(&'static str, String)>,
}

pub fn now_millis() -> String {
    Utc::now().timestamp_millis().to_string()
}

/// Dates arrive as `YYYY-MM-DD` from create forms and `MM-DD-YYYY` from
/// edits; both are stored as epoch millis.
pub fn parse_written_date(raw: &str) -> Option<String> {
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .or_else(|_| NaiveDate::parse_from_str(raw, "%m-%d-%Y"))
        .ok()
        .map(|date| to_epoch_millis(date).to_string())
}

pub fn stored_date(raw: &str) -> Option<NaiveDate> {
    let millis: i64 = raw.parse().ok()?;
    chrono::DateTime::from_timestamp_millis(millis).map(|dt| dt.date_naive())
}

fn ymd(y: i32, m: u32, d: u32) -> String {
    to_epoch_millis(NaiveDate::from_ymd_opt(y, m, d).unwrap()).to_string()
}

impl Store {
    pub fn hit(&mut self, field: &'static str) -> Result<(), String> {
        *self.hits.entry(field).or_default() += 1;
        if self.failing.contains(field) {
            return Err(format!("{field} is unavailable"));
        }
        Ok(())
    }

    pub fn record_date(&mut self, field: &'static str, raw: &str) {
        self.written_dates.push((field, raw.to_owned()));
    }

    pub fn next_id(&mut self) -> i32 {
        self.next_id += 1;
        self.next_id
    }

    pub fn seeded() -> Db {
        let mut store = Store {
            next_id: 100,
            ..Default::default()
        };

        let authors = [
            (1, "Frank Herbert", ymd(1920, 10, 8)),
            (2, "Ursula K. Le Guin", ymd(1929, 10, 21)),
            (3, "Octavia E. Butler", ymd(1947, 6, 22)),
            (4, "Isaac Asimov", ymd(1920, 1, 2)),
            (5, "Arthur C. Clarke", ymd(1917, 12, 16)),
            (6, "Philip K. Dick", ymd(1928, 12, 16)),
            (7, "Mary Shelley", ymd(1797, 8, 30)),
        ];
        for (id, name, born_date) in authors {
            store.authors.insert(
                id,
                Author {
                    id,
                    name: name.into(),
                    biography: format!("{name} is an author."),
                    born_date,
                    profile_image_uri: format!("https://images.test/authors/{id}.jpg"),
                    created_at: now_millis(),
                    updated_at: now_millis(),
                },
            );
        }

        let books = [
            (1, "The Dosadi Experiment", 1, ymd(1977, 1, 1)),
            (2, "Whipping Star", 1, ymd(1970, 1, 1)),
            (3, "A Wizard of Earthsea", 2, ymd(1968, 11, 1)),
            (4, "The Left Hand of Darkness", 2, ymd(1969, 3, 1)),
            (5, "Kindred", 3, ymd(1979, 6, 1)),
            (6, "Foundation", 4, ymd(1951, 6, 1)),
        ];
        for (id, title, author_id, published_date) in books {
            store.books.insert(
                id,
                Book {
                    id,
                    title: title.into(),
                    published_date,
                    author_id,
                    cover_image_uri: format!("https://images.test/books/{id}.jpg"),
                    created_at: now_millis(),
                    updated_at: now_millis(),
                },
            );
        }

        let reviews = [(1, 3, "ana", "A classic.", 5), (2, 3, "ben", "Lovely prose.", 4)];
        for (id, book_id, user_name, review, rating) in reviews {
            store.reviews.insert(
                id,
                BookReview {
                    id,
                    book_id,
                    user_name: user_name.into(),
                    review: review.into(),
                    rating,
                },
            );
        }

        store.details.insert(
            2,
            AuthorDetails {
                id: 1,
                author_id: 2,
                phone: None,
                address: Some("Portland, Oregon".into()),
                email: Some("ursula@example.com".into()),
                website: None,
            },
        );

        Arc::new(Mutex::new(store))
    }
}
