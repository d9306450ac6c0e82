//! Fixed-size worker pool for pooled draw calls.

mod worker_pool;

pub use worker_pool::WorkerPool;
