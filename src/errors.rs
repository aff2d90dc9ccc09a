use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// Failures of the flat-file collection store.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Error reading {collection} file")]
    Read {
        collection: &'static str,
        source: std::io::Error,
    },

    #[error("Error parsing {}", contents(.collection))]
    Parse {
        collection: &'static str,
        source: serde_json::Error,
    },

    #[error("Error encoding {collection} data")]
    Encode {
        collection: &'static str,
        source: serde_json::Error,
    },

    #[error("Error writing {collection} file")]
    Write {
        collection: &'static str,
        source: std::io::Error,
    },
}

/// "visits data", but plain "data" for the data collection.
fn contents(collection: &str) -> String {
    if collection == "data" {
        collection.to_string()
    } else {
        format!("{collection} data")
    }
}

/// Errors a request handler can end with. Rendered as `{ "message": ... }`.
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("{0}")]
    Validation(&'static str),

    #[error("Item not found")]
    NotFound,

    #[error(transparent)]
    Store(#[from] StoreError),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound => StatusCode::NOT_FOUND,
            ApiError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if let ApiError::Store(err) = &self {
            match std::error::Error::source(err) {
                Some(source) => tracing::warn!("{err}: {source}"),
                None => tracing::warn!("{err}"),
            }
        }

        let body = Json(json!({ "message": self.to_string() }));
        (self.status(), body).into_response()
    }
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file {path}")]
    Read {
        path: String,
        source: std::io::Error,
    },

    #[error("Invalid config file: {0}")]
    Parse(#[source] serde_json::Error),
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    #[test]
    fn store_errors_map_to_500_with_collection_in_message() {
        let err = ApiError::from(StoreError::Read {
            collection: "visits",
            source: io::Error::new(io::ErrorKind::NotFound, "gone"),
        });

        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.to_string(), "Error reading visits file");
    }

    #[test]
    fn parse_messages_name_the_contents() {
        let parse = |collection| StoreError::Parse {
            collection,
            source: serde_json::from_str::<serde_json::Value>("{").unwrap_err(),
        };

        assert_eq!(parse("visits").to_string(), "Error parsing visits data");
        assert_eq!(parse("data").to_string(), "Error parsing data");
    }

    #[test]
    fn validation_and_not_found_statuses() {
        assert_eq!(
            ApiError::Validation("Name is required").status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(ApiError::NotFound.status(), StatusCode::NOT_FOUND);
        assert_eq!(ApiError::NotFound.to_string(), "Item not found");
    }
}
