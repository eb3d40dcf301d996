use axum::extract::{Extension, Json, Path, Query};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::entities::{EndpointKind, Suggestions};
use crate::error::Error;
use crate::server::DynAPI;

#[derive(Serialize, Deserialize)]
pub struct SuggestionParams {
    field: EndpointKind,
    #[serde(default)]
    q: String,
}

pub async fn suggestions(
    Extension(api): Extension<DynAPI>,
    Path(id): Path<Uuid>,
    Query(params): Query<SuggestionParams>,
) -> Result<Json<Suggestions>, Error> {
    let suggestions = api.suggest_places(id, params.field, params.q).await?;

    Ok(suggestions.into())
}
