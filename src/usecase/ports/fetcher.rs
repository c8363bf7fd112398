use std::future::Future;

use crate::domain::entities::request::{PageResponse, RequestParams};

pub const FETCH_FAILED_FALLBACK: &str = "Failed to fetch data";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchError {
    Message(String),
    Unknown,
}

impl FetchError {
    pub fn message(message: impl Into<String>) -> Self {
        let message = message.into();
        if message.trim().is_empty() {
            FetchError::Unknown
        } else {
            FetchError::Message(message)
        }
    }
}

impl std::fmt::Display for FetchError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FetchError::Message(message) if !message.trim().is_empty() => write!(f, "{message}"),
            FetchError::Message(_) | FetchError::Unknown => write!(f, "{FETCH_FAILED_FALLBACK}"),
        }
    }
}

impl std::error::Error for FetchError {}

/// Data source behind a paginated table.
pub trait PageFetcher<T> {
    fn fetch_page(
        &self,
        params: RequestParams,
    ) -> impl Future<Output = Result<PageResponse<T>, FetchError>>;
}

impl<T, F, Fut> PageFetcher<T> for F
where
    F: Fn(RequestParams) -> Fut,
    Fut: Future<Output = Result<PageResponse<T>, FetchError>>,
{
    fn fetch_page(
        &self,
        params: RequestParams,
    ) -> impl Future<Output = Result<PageResponse<T>, FetchError>> {
        self(params)
    }
}
