use cynic::http::ReqwestExt;
use cynic::serde;
use reqwest::Url;
use tracing::{debug, warn};

use crate::error::{Error, Result};

mod cache;
mod library;
pub mod queries;

use cache::{CacheKey, QueryCache};
pub use cache::{FetchPolicy, QueryFamily};

/// The shared GraphQL client: HTTP transport plus the in-memory query cache.
///
/// One instance is built at startup and handed to every controller behind an
/// `Arc`.
pub struct Client {
    client: reqwest::Client,
    url: Url,
    cache: QueryCache,
}

impl Client {
    pub fn new(url: Url) -> Self {
        Self {
            client: reqwest::Client::new(),
            url,
            cache: QueryCache::default(),
        }
    }

    pub fn url(&self) -> &Url {
        &self.url
    }

    async fn run<Query, Input>(&self, op: cynic::Operation<Query, Input>) -> Result<Query>
    where
        Input: serde::Serialize,
        Query: serde::de::DeserializeOwned + 'static,
    {
        let response = self.client.post(self.url.clone()).run_graphql(op).await?;

        if let Some(errors) = response.errors.filter(|errors| !errors.is_empty()) {
            let messages: Vec<String> = errors.into_iter().map(|e| e.message).collect();
            warn!(errors = ?messages, "server rejected operation");
            return Err(Error::GraphQl(messages));
        }
        response.data.ok_or(Error::EmptyResponse)
    }

    /// Runs a read query, consulting the cache according to `policy`.
    pub async fn query<Query, Input>(
        &self,
        family: QueryFamily,
        op: cynic::Operation<Query, Input>,
        policy: FetchPolicy,
    ) -> Result<Query>
    where
        Input: serde::Serialize,
        Query: serde::de::DeserializeOwned + Clone + Send + Sync + 'static,
    {
        let key = CacheKey {
            family,
            document: op.query.clone(),
            variables: serde_json::to_string(&op.variables)?,
        };

        if policy == FetchPolicy::CacheFirst {
            if let Some(hit) = self.cache.get::<Query>(&key) {
                debug!(?family, variables = %key.variables, "served from cache");
                return Ok(hit);
            }
        }

        debug!(?family, variables = %key.variables, "fetching");
        let data = self.run(op).await?;
        self.cache.insert(key, data.clone());
        Ok(data)
    }

    /// Runs a mutation. Mutations never touch the cache; callers evict or
    /// refetch whatever they made stale.
    pub async fn mutate<Mutation, Input>(
        &self,
        op: cynic::Operation<Mutation, Input>,
    ) -> Result<Mutation>
    where
        Input: serde::Serialize,
        Mutation: serde::de::DeserializeOwned + 'static,
    {
        self.run(op).await
    }

    pub fn evict(&self, family: QueryFamily) {
        let removed = self.cache.evict(family);
        debug!(?family, removed, "evicted cached queries");
    }

    pub fn cached_queries(&self) -> usize {
        self.cache.len()
    }
}
