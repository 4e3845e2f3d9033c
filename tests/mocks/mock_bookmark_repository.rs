use async_trait::async_trait;
use service_recommender::error::{RepositoryError, RepositoryResult};
use service_recommender::models::Bookmark;
use service_recommender::repositories::BookmarkRepository;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

/// Mock bookmark repository for testing.
///
/// Holds bookmark rows in memory, can be told to fail, and tracks method
/// calls for verification.
#[allow(dead_code)]
#[derive(Clone)]
pub struct MockBookmarkRepository {
    rows: Arc<Mutex<Vec<Bookmark>>>,
    fail: Arc<Mutex<bool>>,
    call_counts: Arc<Mutex<HashMap<String, usize>>>,
}

#[allow(dead_code)]
impl MockBookmarkRepository {
    pub fn new() -> Self {
        Self {
            rows: Arc::new(Mutex::new(Vec::new())),
            fail: Arc::new(Mutex::new(false)),
            call_counts: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    /// Create a repository holding `(user_id, service_id)` rows.
    pub fn with_pairs(pairs: &[(&str, &str)]) -> Self {
        let repo = Self::new();
        repo.add_pairs(pairs);
        repo
    }

    pub fn add_pairs(&self, pairs: &[(&str, &str)]) {
        let mut rows = self.rows.lock().unwrap();
        rows.extend(pairs.iter().map(|(u, s)| Bookmark::new(*u, *s)));
    }

    /// Make every subsequent fetch fail.
    pub fn set_failing(&self, fail: bool) {
        *self.fail.lock().unwrap() = fail;
    }

    pub fn get_call_count(&self, method: &str) -> usize {
        let counts = self.call_counts.lock().unwrap();
        *counts.get(method).unwrap_or(&0)
    }

    fn track_call(&self, method: &str) {
        let mut counts = self.call_counts.lock().unwrap();
        *counts.entry(method.to_string()).or_insert(0) += 1;
    }
}

impl Default for MockBookmarkRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl BookmarkRepository for MockBookmarkRepository {
    async fn fetch_all(&self) -> RepositoryResult<Vec<Bookmark>> {
        self.track_call("fetch_all");

        if *self.fail.lock().unwrap() {
            return Err(RepositoryError::HttpError("Connection failed".to_string()));
        }
        Ok(self.rows.lock().unwrap().clone())
    }
}
