//! The fixed catalog of queries and mutations understood by the library API.
//!
//! These are wire records: field names and types mirror
//! `schemas/library.graphql`. See `client::library` for the conversion into
//! [`crate::datamodel`] types.

#[cynic::schema("library")]
mod schema {}

// Inputs

#[derive(cynic::InputObject, Debug, Clone, PartialEq, Eq)]
#[cynic(graphql_type = "DateRange", rename_all = "snake_case")]
pub struct DateRangeInput {
    pub start: String,
    pub end: String,
}

#[derive(cynic::InputObject, Debug, Clone, Default, PartialEq, Eq)]
#[cynic(graphql_type = "AuthorFilter", rename_all = "snake_case")]
pub struct AuthorFilterInput {
    pub id: Option<i32>,
    pub name: Option<String>,
    pub born_date_range: Option<DateRangeInput>,
}

#[derive(cynic::InputObject, Debug, Clone, Default, PartialEq, Eq)]
#[cynic(graphql_type = "BookFilter", rename_all = "snake_case")]
pub struct BookFilterInput {
    pub id: Option<i32>,
    pub title: Option<String>,
    pub author_id: Option<i32>,
    pub published_date_range: Option<DateRangeInput>,
}

// Shared selections

#[derive(cynic::QueryFragment, Debug, Clone)]
pub struct PageInfo {
    pub has_next_page: bool,
    pub total_count: i32,
}

#[derive(cynic::QueryFragment, Debug, Clone)]
#[cynic(graphql_type = "Book")]
pub struct BookTitle {
    pub title: String,
}

#[derive(cynic::QueryFragment, Debug, Clone)]
#[cynic(graphql_type = "Author")]
pub struct AuthorNode {
    pub id: i32,
    pub name: String,
    pub biography: String,
    #[cynic(rename = "born_date")]
    pub born_date: String,
    #[cynic(rename = "profile_image_uri")]
    pub profile_image_uri: String,
    pub books: Vec<BookTitle>,
    #[cynic(rename = "created_at")]
    pub created_at: String,
    #[cynic(rename = "updated_at")]
    pub updated_at: String,
}

/// What author mutations select.
#[derive(cynic::QueryFragment, Debug, Clone)]
#[cynic(graphql_type = "Author")]
pub struct AuthorFields {
    pub id: i32,
    pub name: String,
    pub biography: String,
    #[cynic(rename = "born_date")]
    pub born_date: String,
    #[cynic(rename = "profile_image_uri")]
    pub profile_image_uri: String,
}

#[derive(cynic::QueryFragment, Debug, Clone)]
#[cynic(graphql_type = "Author")]
pub struct AuthorName {
    pub id: i32,
    pub name: String,
}

#[derive(cynic::QueryFragment, Debug, Clone)]
#[cynic(graphql_type = "Book")]
pub struct BookNode {
    pub id: i32,
    pub title: String,
    #[cynic(rename = "published_date")]
    pub published_date: String,
    #[cynic(rename = "author_id")]
    pub author_id: i32,
    pub author: AuthorName,
    #[cynic(rename = "cover_image_uri")]
    pub cover_image_uri: String,
    #[cynic(rename = "created_at")]
    pub created_at: String,
    #[cynic(rename = "updated_at")]
    pub updated_at: String,
}

/// What book mutations select.
#[derive(cynic::QueryFragment, Debug, Clone)]
#[cynic(graphql_type = "Book")]
pub struct BookFields {
    pub id: i32,
    pub title: String,
    #[cynic(rename = "published_date")]
    pub published_date: String,
    #[cynic(rename = "author_id")]
    pub author_id: i32,
    #[cynic(rename = "cover_image_uri")]
    pub cover_image_uri: String,
}

#[derive(cynic::QueryFragment, Debug, Clone)]
pub struct AuthorConnection {
    pub edges: Vec<AuthorNode>,
    #[cynic(rename = "pageInfo")]
    pub page_info: PageInfo,
}

#[derive(cynic::QueryFragment, Debug, Clone)]
pub struct BookConnection {
    pub edges: Vec<BookNode>,
    #[cynic(rename = "pageInfo")]
    pub page_info: PageInfo,
}

#[derive(cynic::QueryFragment, Debug, Clone)]
#[cynic(graphql_type = "AuthorDetails")]
pub struct AuthorDetailsFields {
    pub id: i32,
    #[cynic(rename = "author_id")]
    pub author_id: i32,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub email: Option<String>,
    pub website: Option<String>,
}

#[derive(cynic::QueryFragment, Debug, Clone)]
#[cynic(graphql_type = "BookReview")]
pub struct ReviewFields {
    pub id: i32,
    #[cynic(rename = "book_id")]
    pub book_id: i32,
    #[cynic(rename = "user_name")]
    pub user_name: String,
    pub review: String,
    pub rating: i32,
}

// Queries

#[derive(cynic::QueryVariables, Debug, Clone)]
pub struct AuthorsVariables {
    pub filter: Option<AuthorFilterInput>,
    pub page: i32,
    pub page_size: i32,
}

#[derive(cynic::QueryFragment, Debug, Clone)]
#[cynic(graphql_type = "Query", variables = "AuthorsVariables")]
pub struct GetAuthors {
    #[arguments(filter: $filter, page: $page, pageSize: $page_size)]
    pub authors: AuthorConnection,
}

#[derive(cynic::QueryVariables, Debug, Clone)]
pub struct BooksVariables {
    pub filter: Option<BookFilterInput>,
    pub page: i32,
    pub page_size: i32,
}

#[derive(cynic::QueryFragment, Debug, Clone)]
#[cynic(graphql_type = "Query", variables = "BooksVariables")]
pub struct GetBooks {
    #[arguments(filter: $filter, page: $page, pageSize: $page_size)]
    pub books: BookConnection,
}

#[derive(cynic::QueryVariables, Debug, Clone)]
pub struct AuthorIdVariables {
    pub author_id: i32,
}

#[derive(cynic::QueryFragment, Debug, Clone)]
#[cynic(graphql_type = "Query", variables = "AuthorIdVariables")]
pub struct GetAuthorDetails {
    #[arguments(author_id: $author_id)]
    #[cynic(rename = "authorDetails")]
    pub author_details: Option<AuthorDetailsFields>,
}

#[derive(cynic::QueryVariables, Debug, Clone)]
pub struct BookIdVariables {
    pub book_id: i32,
}

#[derive(cynic::QueryFragment, Debug, Clone)]
#[cynic(graphql_type = "Query", variables = "BookIdVariables")]
pub struct GetBookReviews {
    #[arguments(book_id: $book_id)]
    #[cynic(rename = "bookReviews")]
    pub book_reviews: Vec<ReviewFields>,
}

// Mutations

#[derive(cynic::QueryVariables, Debug, Clone)]
pub struct CreateAuthorVariables {
    pub name: String,
    pub biography: String,
    pub born_date: String,
    pub profile_image_uri: String,
}

#[derive(cynic::QueryFragment, Debug, Clone)]
#[cynic(graphql_type = "Mutation", variables = "CreateAuthorVariables")]
pub struct CreateAuthor {
    #[arguments(name: $name, biography: $biography, born_date: $born_date, profile_image_uri: $profile_image_uri)]
    #[cynic(rename = "createAuthor")]
    pub create_author: AuthorFields,
}

#[derive(cynic::QueryVariables, Debug, Clone)]
pub struct UpdateAuthorVariables {
    pub id: i32,
    pub name: Option<String>,
    pub biography: Option<String>,
    pub born_date: Option<String>,
    pub profile_image_uri: Option<String>,
}

#[derive(cynic::QueryFragment, Debug, Clone)]
#[cynic(graphql_type = "Mutation", variables = "UpdateAuthorVariables")]
pub struct UpdateAuthor {
    #[arguments(id: $id, name: $name, biography: $biography, born_date: $born_date, profile_image_uri: $profile_image_uri)]
    #[cynic(rename = "updateAuthor")]
    pub update_author: AuthorFields,
}

#[derive(cynic::QueryVariables, Debug, Clone)]
pub struct IdVariables {
    pub id: i32,
}

#[derive(cynic::QueryFragment, Debug, Clone)]
#[cynic(graphql_type = "Mutation", variables = "IdVariables")]
pub struct DeleteAuthor {
    #[arguments(id: $id)]
    #[cynic(rename = "deleteAuthor")]
    pub delete_author: AuthorName,
}

#[derive(cynic::QueryVariables, Debug, Clone)]
pub struct AuthorDetailVariables {
    pub author_id: i32,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub email: Option<String>,
    pub website: Option<String>,
}

#[derive(cynic::QueryFragment, Debug, Clone)]
#[cynic(graphql_type = "Mutation", variables = "AuthorDetailVariables")]
pub struct CreateAuthorDetail {
    #[arguments(author_id: $author_id, phone: $phone, address: $address, email: $email, website: $website)]
    #[cynic(rename = "createAuthorDetail")]
    pub create_author_detail: AuthorDetailsFields,
}

#[derive(cynic::QueryFragment, Debug, Clone)]
#[cynic(graphql_type = "Mutation", variables = "AuthorDetailVariables")]
pub struct UpdateAuthorDetail {
    #[arguments(author_id: $author_id, phone: $phone, address: $address, email: $email, website: $website)]
    #[cynic(rename = "updateAuthorDetail")]
    pub update_author_detail: AuthorDetailsFields,
}

#[derive(cynic::QueryVariables, Debug, Clone)]
pub struct CreateBookVariables {
    pub title: String,
    pub published_date: String,
    pub author_id: i32,
    pub cover_image_uri: String,
}

#[derive(cynic::QueryFragment, Debug, Clone)]
#[cynic(graphql_type = "Mutation", variables = "CreateBookVariables")]
pub struct CreateBook {
    #[arguments(title: $title, published_date: $published_date, author_id: $author_id, cover_image_uri: $cover_image_uri)]
    #[cynic(rename = "createBook")]
    pub create_book: BookFields,
}

#[derive(cynic::QueryVariables, Debug, Clone)]
pub struct UpdateBookVariables {
    pub id: i32,
    pub title: Option<String>,
    pub published_date: Option<String>,
    pub author_id: Option<i32>,
    pub cover_image_uri: Option<String>,
}

#[derive(cynic::QueryFragment, Debug, Clone)]
#[cynic(graphql_type = "Mutation", variables = "UpdateBookVariables")]
pub struct UpdateBook {
    #[arguments(id: $id, title: $title, published_date: $published_date, author_id: $author_id, cover_image_uri: $cover_image_uri)]
    #[cynic(rename = "updateBook")]
    pub update_book: BookFields,
}

#[derive(cynic::QueryFragment, Debug, Clone)]
#[cynic(graphql_type = "Mutation", variables = "IdVariables")]
pub struct DeleteBook {
    #[arguments(id: $id)]
    #[cynic(rename = "deleteBook")]
    pub delete_book: BookFields,
}

#[derive(cynic::QueryVariables, Debug, Clone)]
pub struct CreateReviewVariables {
    pub book_id: i32,
    pub user_name: String,
    pub review: String,
    pub rating: i32,
}

#[derive(cynic::QueryFragment, Debug, Clone)]
#[cynic(graphql_type = "Mutation", variables = "CreateReviewVariables")]
pub struct CreateBookReview {
    #[arguments(book_id: $book_id, user_name: $user_name, review: $review, rating: $rating)]
    #[cynic(rename = "createBookReview")]
    pub create_book_review: ReviewFields,
}

#[derive(cynic::QueryFragment, Debug, Clone)]
#[cynic(graphql_type = "Mutation", variables = "IdVariables")]
pub struct DeleteBookReview {
    #[arguments(id: $id)]
    #[cynic(rename = "deleteBookReview")]
    pub delete_book_review: ReviewFields,
}
