//! Cache maintenance HTTP handlers.
//!
//! ```text
//! DELETE /api/v1/admin/delivery/cache
//! DELETE /api/v1/admin/delivery/cache?pincode=440001
//! ```

use actix_web::{HttpResponse, delete, web};
use serde::Deserialize;
use serde_json::json;

use crate::domain::{Error, Pincode};
use crate::inbound::http::ApiResult;
use crate::inbound::http::state::HttpState;

/// Query parameters accepted by the cache clear endpoint.
#[derive(Debug, Deserialize)]
pub struct ClearCacheParams {
    /// Restrict the clear to one pincode; omit to clear everything.
    pub pincode: Option<String>,
}

fn parse_target(params: ClearCacheParams) -> Result<Option<Pincode>, Error> {
    let Some(raw) = params.pincode else {
        return Ok(None);
    };
    Pincode::parse(&raw).map(Some).map_err(|error| {
        Error::invalid_request("pincode must be exactly six digits").with_details(json!({
            "field": "pincode",
            "value": raw,
            "reason": error.to_string(),
        }))
    })
}

/// Clear cached delivery quotes from both tiers.
#[utoipa::path(
    delete,
    path = "/api/v1/admin/delivery/cache",
    description = "Drop cached quotes after a rate or range change. \
                   Scope to one pincode with the query parameter.",
    params(
        ("pincode" = Option<String>, Query, description = "Pincode to clear; omit for all")
    ),
    responses(
        (status = 204, description = "Cache cleared"),
        (status = 400, description = "Malformed pincode parameter",
         body = crate::inbound::http::schemas::ErrorSchema),
        (status = 503, description = "Durable tier rejected the clear",
         body = crate::inbound::http::schemas::ErrorSchema)
    ),
    tags = ["admin"],
    operation_id = "clearDeliveryCache"
)]
#[delete("/admin/delivery/cache")]
pub async fn clear_delivery_cache(
    state: web::Data<HttpState>,
    params: web::Query<ClearCacheParams>,
) -> ApiResult<HttpResponse> {
    let target = parse_target(params.into_inner())?;
    state.cache_admin.clear_cache(target).await?;
    Ok(HttpResponse::NoContent().finish())
}
