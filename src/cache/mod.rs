pub mod result_cache;

use std::sync::Arc;

use tokio::sync::Mutex;

pub use result_cache::ResultCache;

/// Cache handle shared across concurrent scrapes.
pub type SharedCache = Arc<Mutex<ResultCache>>;
