use async_trait::async_trait;
use service_recommender::client::AsyncSupabaseClient;
use service_recommender::error::{RepositoryError, RepositoryResult};
use service_recommender::models::Bookmark;
use std::collections::HashSet;
use std::sync::{Arc, Mutex};

/// Mock Supabase client backed by an in-memory table.
///
/// Records every page request, and rejects any insert batch containing a
/// service id registered with [`fail_batch_containing`](Self::fail_batch_containing).
#[allow(dead_code)]
#[derive(Clone, Default)]
pub struct MockSupabaseClient {
    table: Arc<Mutex<Vec<Bookmark>>>,
    page_requests: Arc<Mutex<Vec<(usize, usize)>>>,
    insert_calls: Arc<Mutex<usize>>,
    poison: Arc<Mutex<HashSet<String>>>,
}

#[allow(dead_code)]
impl MockSupabaseClient {
    pub fn new() -> Self {
        Self::default()
    }

    /// A table of `count` rows spread over seven users.
    pub fn with_rows(count: usize) -> Self {
        let client = Self::new();
        {
            let mut table = client.table.lock().unwrap();
            for i in 0..count {
                table.push(Bookmark::new(
                    format!("u{}", i % 7),
                    format!("food_{:04}_00000000", i),
                ));
            }
        }
        client
    }

    pub fn fail_batch_containing(&self, service_id: &str) {
        self.poison.lock().unwrap().insert(service_id.to_string());
    }

    pub fn page_requests(&self) -> Vec<(usize, usize)> {
        self.page_requests.lock().unwrap().clone()
    }

    pub fn insert_calls(&self) -> usize {
        *self.insert_calls.lock().unwrap()
    }

    pub fn rows(&self) -> Vec<Bookmark> {
        self.table.lock().unwrap().clone()
    }
}

#[async_trait]
impl AsyncSupabaseClient for MockSupabaseClient {
    async fn fetch_wishlists(&self, limit: usize, offset: usize) -> RepositoryResult<Vec<Bookmark>> {
        self.page_requests.lock().unwrap().push((limit, offset));
        let table = self.table.lock().unwrap();
        Ok(table.iter().skip(offset).take(limit).cloned().collect())
    }

    async fn insert_wishlists(&self, rows: Vec<Bookmark>) -> RepositoryResult<()> {
        *self.insert_calls.lock().unwrap() += 1;

        let poisoned = {
            let poison = self.poison.lock().unwrap();
            rows.iter().any(|r| poison.contains(&r.service_id))
        };
        if poisoned {
            return Err(RepositoryError::ApiError {
                status: 500,
                message: "insert failed".to_string(),
            });
        }

        self.table.lock().unwrap().extend(rows);
        Ok(())
    }

    async fn clear_wishlists(&self) -> RepositoryResult<()> {
        self.table.lock().unwrap().clear();
        Ok(())
    }
}
