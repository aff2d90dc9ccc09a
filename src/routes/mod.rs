use axum::extract::rejection::JsonRejection;
use axum::Json;
use serde_json::Value;

pub mod data_routes;
pub mod visit_routes;

/// Pull a required, non-empty string field out of a JSON body.
///
/// An absent or unparseable body counts as `{}`, so the caller answers with
/// its own 400 message instead of axum's rejection.
pub(crate) fn required_str(
    body: &Result<Json<Value>, JsonRejection>,
    field: &str,
) -> Option<String> {
    let Json(payload) = match body {
        Ok(json) => json,
        Err(rejection) => {
            tracing::debug!("Ignoring request body: {rejection}");
            return None;
        }
    };

    payload
        .get(field)
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty())
        .map(str::to_owned)
}
