//! Typed client and view controllers for a book and author catalog served by a
//! GraphQL API.

pub mod client;
pub mod config;
pub mod controller;
pub mod datamodel;
pub mod dates;
pub mod error;

pub use client::Client;
pub use error::{Error, Result};
