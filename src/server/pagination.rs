use axum::{
    extract::{FromRequestParts, Query},
    http::request::Parts,
};
use serde::Deserialize;

use super::error::ApiError;

pub const QUESTIONS_PER_PAGE: usize = 10;

/// 1-based page number taken from the `page` query parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page(pub i64);

impl Default for Page {
    fn default() -> Self {
        Page(1)
    }
}

#[derive(Deserialize)]
struct PageQuery {
    page: Option<String>,
}

impl Page {
    /// Absent or empty values fall back to the first page, anything that is
    /// not an integer is rejected.
    pub fn parse(raw: Option<&str>) -> Result<Self, ApiError> {
        match raw.map(str::trim) {
            None | Some("") => Ok(Page::default()),
            Some(value) => value.parse().map(Page).map_err(|_| ApiError::BadRequest),
        }
    }

    /// Items `[(page - 1) * 10, page * 10)` of `items`. Pages below 1 or past
    /// the end are empty.
    pub fn slice<T>(self, items: Vec<T>) -> Vec<T> {
        let Some(index) = self.0.checked_sub(1).and_then(|i| usize::try_from(i).ok()) else {
            return Vec::new();
        };
        let Some(start) = index.checked_mul(QUESTIONS_PER_PAGE) else {
            return Vec::new();
        };
        items
            .into_iter()
            .skip(start)
            .take(QUESTIONS_PER_PAGE)
            .collect()
    }
}

impl<S> FromRequestParts<S> for Page
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let Query(query) =
            Query::<PageQuery>::try_from_uri(&parts.uri).map_err(|_| ApiError::BadRequest)?;
        Page::parse(query.page.as_deref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn numbers(n: i64) -> Vec<i64> {
        (1..=n).collect()
    }

    #[test]
    fn first_page_holds_first_ten() {
        assert_eq!(Page(1).slice(numbers(25)), numbers(10));
    }

    #[test]
    fn last_page_is_partial() {
        assert_eq!(Page(3).slice(numbers(25)), vec![21, 22, 23, 24, 25]);
    }

    #[test]
    fn pages_outside_the_collection_are_empty() {
        assert!(Page(4).slice(numbers(25)).is_empty());
        assert!(Page(0).slice(numbers(25)).is_empty());
        assert!(Page(-3).slice(numbers(25)).is_empty());
        assert!(Page(i64::MIN).slice(numbers(25)).is_empty());
        assert!(Page(i64::MAX).slice(numbers(25)).is_empty());
        assert!(Page(1).slice(Vec::<i64>::new()).is_empty());
    }

    #[test]
    fn parsing() {
        assert_eq!(Page::parse(None).unwrap(), Page(1));
        assert_eq!(Page::parse(Some("")).unwrap(), Page(1));
        assert_eq!(Page::parse(Some("3")).unwrap(), Page(3));
        assert_eq!(Page::parse(Some("-1")).unwrap(), Page(-1));
        assert!(matches!(Page::parse(Some("abc")), Err(ApiError::BadRequest)));
        assert!(matches!(Page::parse(Some("1.5")), Err(ApiError::BadRequest)));
    }

    #[tokio::test]
    async fn extracted_from_query_string() {
        let request = axum::http::Request::builder()
            .uri("/questions?page=2&other=x")
            .body(())
            .unwrap();
        let (mut parts, _) = request.into_parts();
        assert_eq!(
            Page::from_request_parts(&mut parts, &()).await.unwrap(),
            Page(2)
        );
    }

    #[tokio::test]
    async fn missing_query_string_is_first_page() {
        let request = axum::http::Request::builder()
            .uri("/questions")
            .body(())
            .unwrap();
        let (mut parts, _) = request.into_parts();
        assert_eq!(
            Page::from_request_parts(&mut parts, &()).await.unwrap(),
            Page(1)
        );
    }
}
