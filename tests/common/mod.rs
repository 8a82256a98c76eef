//! Shared test utilities and scripted data sources.

#![allow(dead_code, unused_imports)]

use async_trait::async_trait;
use parking_lot::Mutex;
use screen_runtime::config::RuntimeConfig;
use screen_runtime::pagination::DataSource;
use screen_runtime::session::ScreenSession;
use screen_runtime::FetchError;
use std::collections::VecDeque;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Semaphore;

pub type Page<T> = Result<Vec<T>, FetchError>;

pub fn ok<T>(items: Vec<T>) -> Page<T> {
    Ok(items)
}

pub fn fail<T>(reason: &str) -> Page<T> {
    Err(FetchError::new(reason))
}

/// Data source that replays a fixed script of pages and records every call.
///
/// When gated, each fetch records its call and then waits for one permit,
/// so tests can hold a fetch in flight. Once the script runs out every
/// fetch returns an empty page.
pub struct ScriptedSource<T> {
    pages: Mutex<VecDeque<Page<T>>>,
    calls: Mutex<Vec<(u32, usize)>>,
    gate: Option<Arc<Semaphore>>,
}

impl<T> ScriptedSource<T> {
    pub fn new(pages: Vec<Page<T>>) -> Arc<Self> {
        Arc::new(Self {
            pages: Mutex::new(pages.into()),
            calls: Mutex::new(Vec::new()),
            gate: None,
        })
    }

    pub fn gated(pages: Vec<Page<T>>) -> (Arc<Self>, Arc<Semaphore>) {
        let gate = Arc::new(Semaphore::new(0));
        let source = Arc::new(Self {
            pages: Mutex::new(pages.into()),
            calls: Mutex::new(Vec::new()),
            gate: Some(Arc::clone(&gate)),
        });
        (source, gate)
    }

    /// `(page_index, page_size)` of every fetch so far.
    pub fn calls(&self) -> Vec<(u32, usize)> {
        self.calls.lock().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().len()
    }
}

#[async_trait]
impl<T: Send + Sync + 'static> DataSource<T> for ScriptedSource<T> {
    async fn fetch_page(&self, page_index: u32, page_size: usize) -> Result<Vec<T>, FetchError> {
        self.calls.lock().push((page_index, page_size));
        if let Some(gate) = &self.gate {
            gate.acquire()
                .await
                .expect("gate semaphore closed")
                .forget();
        }
        self.pages.lock().pop_front().unwrap_or(Ok(Vec::new()))
    }
}

/// Poll until `source` has seen `count` fetches.
pub async fn wait_for_calls<T>(source: &ScriptedSource<T>, count: usize) {
    tokio::time::timeout(Duration::from_secs(2), async {
        while source.call_count() < count {
            tokio::task::yield_now().await;
        }
    })
    .await
    .expect("fetch was never issued");
}

pub fn session(name: &str) -> ScreenSession {
    ScreenSession::new(name, RuntimeConfig::default())
}
