mod categories;
mod questions;
mod quizzes;

use axum::{
    body::Bytes,
    extract::{FromRequestParts, Path},
    http::request::Parts,
    Json,
};
use serde::de::DeserializeOwned;

pub use categories::category_router;
pub use questions::questions_router;
pub use quizzes::quizzes_router;

use super::error::ApiError;

pub type ApiResponse<T> = Result<Json<T>, ApiError>;

/// Parses a JSON request body. An empty body is `Ok(None)` so handlers can
/// tell "nothing sent" apart from "sent garbage".
fn read_json<T: DeserializeOwned>(body: &Bytes) -> Result<Option<T>, serde_json::Error> {
    if body.is_empty() {
        return Ok(None);
    }
    serde_json::from_slice(body).map(Some)
}

/// Integer id from the single path parameter. Anything else cannot name an
/// existing row, so it is reported as not found.
pub struct RowId(pub i64);

impl<S> FromRequestParts<S> for RowId
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(id) = Path::<i64>::from_request_parts(parts, state)
            .await
            .map_err(|_| ApiError::NotFound)?;
        Ok(RowId(id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, Deserialize, PartialEq)]
    struct Body {
        value: Option<i64>,
    }

    #[test]
    fn empty_body_is_none() {
        assert_eq!(read_json::<Body>(&Bytes::new()).unwrap(), None);
    }

    #[test]
    fn json_body_is_parsed() {
        let body = Bytes::from_static(br#"{"value": 4}"#);
        assert_eq!(
            read_json::<Body>(&body).unwrap(),
            Some(Body { value: Some(4) })
        );
    }

    #[test]
    fn malformed_body_is_an_error() {
        let body = Bytes::from_static(b"{value");
        assert!(read_json::<Body>(&body).is_err());
    }
}
