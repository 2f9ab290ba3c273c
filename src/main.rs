use std::io::{self, BufRead, Write};
use std::sync::Arc;

use anyhow::{Context, Result, bail};
use clap::{Args, Parser, Subcommand};
use reqwest::Url;
use tracing_subscriber::EnvFilter;

use bookshelf::Client;
use bookshelf::client::FetchPolicy;
use bookshelf::config::Settings;
use bookshelf::controller::contact::{ContactController, ContactDraft};
use bookshelf::controller::detail::{AuthorDetailController, BookDetailController};
use bookshelf::controller::forms::{AddAuthor, AddBook, FormMessage};
use bookshelf::controller::list::{ListController, ListState};
use bookshelf::controller::reviews::{ReviewDraft, ReviewsController};
use bookshelf::controller::{Lookup, Status};
use bookshelf::datamodel::{Author, AuthorFilter, Book, BookFilter};
use bookshelf::dates;

#[derive(Parser, Debug)]
#[command(name = "bookshelf", version, about = "Browse and edit the book catalog")]
struct Cli {
    /// GraphQL endpoint (overrides configuration)
    #[arg(long, global = true)]
    url: Option<Url>,
    /// Items per page (overrides configuration)
    #[arg(long, global = true)]
    page_size: Option<u32>,
    #[command(subcommand)]
    cmd: Cmd,
}

#[derive(Subcommand, Debug)]
enum Cmd {
    /// List authors
    Authors {
        #[arg(long, default_value = "")]
        name: String,
        /// Born on or after (YYYY-MM-DD)
        #[arg(long)]
        born_from: Option<String>,
        /// Born on or before (YYYY-MM-DD)
        #[arg(long)]
        born_to: Option<String>,
        #[arg(long, default_value_t = 1)]
        page: u32,
    },
    /// Show one author with contact details
    Author { id: i32 },
    /// List books
    Books {
        #[arg(long, default_value = "")]
        title: String,
        #[arg(long)]
        author_id: Option<i32>,
        /// Published on or after (YYYY-MM-DD)
        #[arg(long)]
        from: Option<String>,
        /// Published on or before (YYYY-MM-DD)
        #[arg(long)]
        to: Option<String>,
        #[arg(long, default_value_t = 1)]
        page: u32,
    },
    /// Show one book with its reviews
    Book { id: i32 },
    /// Add an author
    AddAuthor {
        #[arg(long)]
        name: String,
        #[arg(long)]
        biography: String,
        /// YYYY-MM-DD
        #[arg(long)]
        born_date: String,
        #[arg(long)]
        profile_image_uri: String,
    },
    /// Add a book
    AddBook {
        #[arg(long)]
        title: String,
        /// YYYY-MM-DD
        #[arg(long)]
        published_date: String,
        #[arg(long)]
        author_id: i32,
        #[arg(long)]
        cover_image_uri: String,
    },
    /// Edit an author; omitted fields keep their current value
    EditAuthor {
        id: i32,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        biography: Option<String>,
        /// YYYY-MM-DD
        #[arg(long)]
        born_date: Option<String>,
        #[arg(long)]
        profile_image_uri: Option<String>,
        #[command(flatten)]
        contact: ContactArgs,
    },
    /// Edit a book; omitted fields keep their current value
    EditBook {
        id: i32,
        #[arg(long)]
        title: Option<String>,
        /// YYYY-MM-DD
        #[arg(long)]
        published_date: Option<String>,
        #[arg(long)]
        author_id: Option<i32>,
        #[arg(long)]
        cover_image_uri: Option<String>,
    },
    /// Delete an author
    DeleteAuthor {
        id: i32,
        #[arg(long)]
        yes: bool,
    },
    /// Delete a book
    DeleteBook {
        id: i32,
        #[arg(long)]
        yes: bool,
    },
    /// Create or update an author's contact details
    Contact {
        author_id: i32,
        #[command(flatten)]
        contact: ContactArgs,
    },
    /// Review a book
    Review {
        book_id: i32,
        #[arg(long)]
        user_name: String,
        #[arg(long)]
        review: String,
        #[arg(long, default_value_t = 5)]
        rating: i32,
    },
    /// Delete a review
    DeleteReview {
        book_id: i32,
        review_id: i32,
        #[arg(long)]
        yes: bool,
    },
}

#[derive(Args, Debug, Default)]
struct ContactArgs {
    #[arg(long)]
    phone: Option<String>,
    #[arg(long)]
    address: Option<String>,
    #[arg(long)]
    email: Option<String>,
    #[arg(long)]
    website: Option<String>,
}

impl ContactArgs {
    fn apply(self, draft: &mut ContactDraft) {
        let fields = [
            (self.phone, &mut draft.phone),
            (self.address, &mut draft.address),
            (self.email, &mut draft.email),
            (self.website, &mut draft.website),
        ];
        for (value, field) in fields {
            if value.is_some() {
                *field = value;
            }
        }
    }
}

fn parse_date(raw: Option<&str>) -> Result<Option<chrono::NaiveDate>> {
    raw.map(dates::parse_input).transpose().map_err(Into::into)
}

fn prompt(yes: bool) -> impl Fn(&str) -> bool {
    move |question: &str| {
        if yes {
            return true;
        }
        print!("{question} [y/N] ");
        let _ = io::stdout().flush();
        let mut answer = String::new();
        io::stdin().lock().read_line(&mut answer).is_ok()
            && matches!(answer.trim(), "y" | "Y" | "yes")
    }
}

fn print_pagination<T>(state: &ListState<T>, can_previous: bool, can_next: bool) {
    if let Some(info) = state.page_info {
        println!(
            "page {} ({} total){}{}",
            state.page,
            info.total_count,
            if can_previous { "  [previous]" } else { "" },
            if can_next { "  [next]" } else { "" },
        );
    }
}

fn print_author(author: &Author) {
    println!("#{} {}", author.id, author.name);
    println!("  born {}", dates::display(author.born_date));
    println!("  {}", author.biography);
    if !author.book_titles.is_empty() {
        println!("  books: {}", author.book_titles.join(", "));
    }
}

fn print_book(book: &Book) {
    let author = book.author.as_ref().map_or("unknown", |a| a.name.as_str());
    println!("#{} {} by {}", book.id, book.title, author);
    println!("  published {}", dates::display(book.published_date));
}

fn report(message: Option<FormMessage>) -> Result<()> {
    match message {
        Some(FormMessage::Success(msg)) => {
            println!("{msg}");
            Ok(())
        }
        Some(FormMessage::Failure(msg)) => bail!(msg),
        None => Ok(()),
    }
}

async fn run(cli: Cli, client: Arc<Client>, page_size: u32) -> Result<()> {
    match cli.cmd {
        Cmd::Authors {
            name,
            born_from,
            born_to,
            page,
        } => {
            let mut list = ListController::<Author>::new(client, page_size);
            list.set_filter(AuthorFilter {
                id: None,
                name,
                born_from: parse_date(born_from.as_deref())?,
                born_to: parse_date(born_to.as_deref())?,
            })
            .await?;
            list.load().await?;
            while list.page() < page && list.next_page().await? {}

            let state = list.state();
            state.items.iter().for_each(print_author);
            print_pagination(&state, list.can_previous(), list.can_next());
        }
        Cmd::Author { id } => {
            let mut detail = AuthorDetailController::new(client, id);
            detail.load().await?;
            let view = detail.view();
            match &view.author {
                Lookup::Found(author) => {
                    print_author(author);
                    if let Some(details) = &view.details {
                        let fields = [
                            ("phone", &details.phone),
                            ("address", &details.address),
                            ("email", &details.email),
                            ("website", &details.website),
                        ];
                        for (label, value) in fields {
                            if let Some(value) = value {
                                println!("  {label}: {value}");
                            }
                        }
                    }
                }
                Lookup::NotFound => bail!("Author not found"),
                Lookup::Loading | Lookup::Failed(_) => {}
            }
        }
        Cmd::Books {
            title,
            author_id,
            from,
            to,
            page,
        } => {
            let mut list = ListController::<Book>::new(client, page_size);
            list.set_filter(BookFilter {
                id: None,
                title,
                author_id,
                published_from: parse_date(from.as_deref())?,
                published_to: parse_date(to.as_deref())?,
            })
            .await?;
            list.load().await?;
            while list.page() < page && list.next_page().await? {}

            let state = list.state();
            state.items.iter().for_each(print_book);
            print_pagination(&state, list.can_previous(), list.can_next());
        }
        Cmd::Book { id } => {
            let mut detail = BookDetailController::new(client, id);
            detail.load().await?;
            match detail.view().book {
                Lookup::Found(book) => print_book(&book),
                Lookup::NotFound => bail!("Book not found"),
                Lookup::Loading | Lookup::Failed(_) => {}
            }
            let reviews = detail.reviews().state();
            if reviews.status == Status::Ready && reviews.reviews.is_empty() {
                println!("  no reviews yet");
            }
            for review in &reviews.reviews {
                println!(
                    "  [{}] {}/5 {}: {}",
                    review.id,
                    review.rating.get(),
                    review.user_name,
                    review.review
                );
            }
        }
        Cmd::AddAuthor {
            name,
            biography,
            born_date,
            profile_image_uri,
        } => {
            let mut add = AddAuthor::new(client);
            add.form.name = name;
            add.form.biography = biography;
            add.form.born_date = born_date;
            add.form.profile_image_uri = profile_image_uri;
            let _ = add.submit().await;
            report(add.state().message)?;
        }
        Cmd::AddBook {
            title,
            published_date,
            author_id,
            cover_image_uri,
        } => {
            let mut add = AddBook::new(client);
            add.form.title = title;
            add.form.published_date = published_date;
            add.form.author_id = Some(author_id);
            add.form.cover_image_uri = cover_image_uri;
            let _ = add.submit().await;
            report(add.state().message)?;
        }
        Cmd::EditAuthor {
            id,
            name,
            biography,
            born_date,
            profile_image_uri,
            contact,
        } => {
            let born_date = parse_date(born_date.as_deref())?;
            let mut detail = AuthorDetailController::new(client, id);
            detail.load().await?;
            let draft = detail.begin_edit()?;
            if let Some(name) = name {
                draft.name = name;
            }
            if let Some(biography) = biography {
                draft.biography = biography;
            }
            if let Some(born_date) = born_date {
                draft.born_date = born_date;
            }
            if let Some(uri) = profile_image_uri {
                draft.profile_image_uri = uri;
            }
            contact.apply(&mut draft.contact);
            detail.save().await?;
            println!("Author updated");
        }
        Cmd::EditBook {
            id,
            title,
            published_date,
            author_id,
            cover_image_uri,
        } => {
            let published_date = parse_date(published_date.as_deref())?;
            let mut detail = BookDetailController::new(client, id);
            detail.load().await?;
            detail.begin_edit().await?;
            if let Some(author_id) = author_id {
                let authors = detail.authors();
                if authors.is_loaded() && authors.name_of(author_id).is_none() {
                    bail!("Unknown author {author_id}");
                }
            }
            let Some(draft) = detail.draft_mut() else {
                bail!("Book is not in edit mode");
            };
            if let Some(title) = title {
                draft.title = title;
            }
            if let Some(published_date) = published_date {
                draft.published_date = published_date;
            }
            if let Some(author_id) = author_id {
                draft.author_id = author_id;
            }
            if let Some(uri) = cover_image_uri {
                draft.cover_image_uri = uri;
            }
            detail.save().await?;
            println!("Book updated");
        }
        Cmd::DeleteAuthor { id, yes } => {
            let mut detail = AuthorDetailController::new(client, id);
            if detail.delete(&prompt(yes)).await?.is_some() {
                println!("Author deleted");
            }
        }
        Cmd::DeleteBook { id, yes } => {
            let mut detail = BookDetailController::new(client, id);
            if detail.delete(&prompt(yes)).await?.is_some() {
                println!("Book deleted");
            }
        }
        Cmd::Contact { author_id, contact } => {
            let mut controller = ContactController::new(client, author_id);
            controller.load(FetchPolicy::NetworkOnly).await?;
            let mut draft = controller
                .details()
                .map(ContactDraft::from)
                .unwrap_or_default();
            contact.apply(&mut draft);
            match controller.save(&draft).await? {
                Some(_) => println!("Contact details saved"),
                None => println!("Nothing to save"),
            }
        }
        Cmd::Review {
            book_id,
            user_name,
            review,
            rating,
        } => {
            let mut reviews = ReviewsController::new(client, book_id);
            let created = reviews
                .create(&ReviewDraft {
                    user_name,
                    review,
                    rating,
                })
                .await?;
            println!("Review #{} added", created.id);
        }
        Cmd::DeleteReview {
            book_id,
            review_id,
            yes,
        } => {
            let mut reviews = ReviewsController::new(client, book_id);
            if reviews.delete(review_id, &prompt(yes)).await? {
                println!("Review deleted");
            }
        }
    }
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let settings = Settings::load().context("failed to load configuration")?;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| format!("bookshelf={}", settings.logging.level).into());
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();

    let url = match cli.url.clone() {
        Some(url) => url,
        None => settings
            .api
            .url
            .parse()
            .with_context(|| format!("invalid API url `{}`", settings.api.url))?,
    };
    let page_size = cli.page_size.unwrap_or(settings.api.page_size);
    let client = Arc::new(Client::new(url));
    tracing::debug!(url = %client.url(), page_size, "starting");
    run(cli, client, page_size).await
}
