use std::future::Future;

use once_cell::sync::OnceCell;

/// Holds a value fetched at most once per run. Failed fetches are not stored,
/// the next caller tries again.
pub struct ManifestCache<T> {
    data: OnceCell<T>,
}

impl<T> Default for ManifestCache<T> {
    fn default() -> Self {
        Self {
            data: OnceCell::new(),
        }
    }
}

impl<T> ManifestCache<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn get_or_fetch<F, Fut, E>(&self, fetch_fn: F) -> Result<&T, E>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T, E>>,
    {
        if let Some(data) = self.data.get() {
            return Ok(data);
        }

        let fetched = fetch_fn().await?;
        Ok(self.data.get_or_init(|| fetched))
    }
}
