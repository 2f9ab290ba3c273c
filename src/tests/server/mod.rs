use async_graphql::{EmptySubscription, Schema};
use async_graphql_axum::{GraphQLRequest, GraphQLResponse};
use axum::Router;
use axum::extract::State;
use axum::routing::post;

mod schema;
mod store;

use schema::{MutationRoot, QueryRoot};
pub use store::{Db, Store, lock};

type LibrarySchema = Schema<QueryRoot, MutationRoot, EmptySubscription>;

#[axum::debug_handler]
async fn graphql_handler(
    State(schema): State<LibrarySchema>,
    req: GraphQLRequest,
) -> GraphQLResponse {
    schema.execute(req.into_inner()).await.into()
}

pub fn make_app(db: Db) -> Router {
    let schema = Schema::build(QueryRoot, MutationRoot, EmptySubscription)
        .data(db)
        .finish();

    Router::new()
        .route("/graphql", post(graphql_handler))
        .with_state(schema)
}
