use axum::extract::{Extension, Json};

use crate::entities::Tariff;
use crate::server::DynAPI;

pub async fn find(Extension(api): Extension<DynAPI>) -> Json<Tariff> {
    Json(api.tariff().clone())
}
