use super::Engine;

use async_trait::async_trait;
use uuid::Uuid;

use crate::{
    api::PlaceAPI,
    entities::{EndpointKind, Suggestions},
    error::Error,
};

impl Engine {
    async fn is_latest_lookup(&self, id: Uuid, kind: EndpointKind, ticket: u64) -> Result<bool, Error> {
        self.with_session(id, |session| Ok(session.lookups.is_latest(kind, ticket)))
            .await
    }
}

#[async_trait]
impl PlaceAPI for Engine {
    #[tracing::instrument(skip(self))]
    async fn suggest_places(
        &self,
        id: Uuid,
        kind: EndpointKind,
        query: String,
    ) -> Result<Suggestions, Error> {
        let query = query.trim().to_string();

        let ticket = self
            .with_session(id, |session| Ok(session.lookups.issue(kind)))
            .await?;

        if query.chars().count() < self.config.places.min_query_chars {
            return Ok(Suggestions::Fresh {
                ticket,
                candidates: vec![],
            });
        }

        tokio::time::sleep(self.config.places.debounce()).await;

        if !self.is_latest_lookup(id, kind, ticket).await? {
            return Ok(Suggestions::Superseded { ticket });
        }

        let candidates = self.places.search_places(&query).await?;

        if !self.is_latest_lookup(id, kind, ticket).await? {
            tracing::debug!(%id, ticket, "dropping superseded suggestions");
            return Ok(Suggestions::Superseded { ticket });
        }

        Ok(Suggestions::Fresh { ticket, candidates })
    }
}
