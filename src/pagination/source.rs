//! Paged data source capability.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;

use crate::error::FetchError;

/// Supplies one page of items per call.
///
/// `page_index` starts at 1 and `page_size` is always greater than zero.
/// Returning more than `page_size` items is allowed; returning fewer marks
/// the end of the data.
#[async_trait]
pub trait DataSource<T>: Send + Sync {
    async fn fetch_page(&self, page_index: u32, page_size: usize) -> Result<Vec<T>, FetchError>;
}

#[async_trait]
impl<T, S> DataSource<T> for Arc<S>
where
    T: Send + 'static,
    S: DataSource<T> + ?Sized,
{
    async fn fetch_page(&self, page_index: u32, page_size: usize) -> Result<Vec<T>, FetchError> {
        (**self).fetch_page(page_index, page_size).await
    }
}

/// Pages over a fixed in-memory list.
pub struct InMemorySource<T> {
    items: Vec<T>,
}

impl<T> InMemorySource<T> {
    pub fn new(items: Vec<T>) -> Self {
        Self { items }
    }
}

#[async_trait]
impl<T: Clone + Send + Sync + 'static> DataSource<T> for InMemorySource<T> {
    async fn fetch_page(&self, page_index: u32, page_size: usize) -> Result<Vec<T>, FetchError> {
        let start = (page_index.saturating_sub(1) as usize).saturating_mul(page_size);
        Ok(self
            .items
            .iter()
            .skip(start)
            .take(page_size)
            .cloned()
            .collect())
    }
}

/// Turns a slow fetch into an ordinary [`FetchError`].
pub struct WithTimeout<S> {
    inner: S,
    timeout: Duration,
}

impl<S> WithTimeout<S> {
    pub fn new(inner: S, timeout: Duration) -> Self {
        Self { inner, timeout }
    }
}

#[async_trait]
impl<T, S> DataSource<T> for WithTimeout<S>
where
    T: Send + 'static,
    S: DataSource<T>,
{
    async fn fetch_page(&self, page_index: u32, page_size: usize) -> Result<Vec<T>, FetchError> {
        match tokio::time::timeout(self.timeout, self.inner.fetch_page(page_index, page_size)).await
        {
            Ok(result) => result,
            Err(_) => Err(FetchError::timeout(self.timeout)),
        }
    }
}
