//! Bounded fan-out for registry lookups
//!
//! Metadata for many hooks is fetched at once by `outdated` and `search`.
//! A fixed number of workers pull the next index from a shared counter, so at
//! most `workers` requests are ever in flight against the registry.

use rayon::ThreadPoolBuilder;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::mpsc;

/// Default number of concurrent lookups
pub const DEFAULT_WORKERS: usize = 8;

/// Apply `f` to every item with at most `workers` calls running at once
///
/// Results come back in input order regardless of completion order.
pub fn bounded_map<T, R, F>(items: &[T], workers: usize, f: F) -> Vec<R>
where
    T: Sync,
    R: Send,
    F: Fn(&T) -> R + Sync,
{
    let workers = workers.clamp(1, items.len().max(1));

    let pool = match ThreadPoolBuilder::new()
        .num_threads(workers)
        .thread_name(|i| format!("hookshelf-fetch-{i}"))
        .build()
    {
        Ok(pool) => pool,
        Err(e) => {
            tracing::warn!("Failed to start worker pool, running sequentially: {e}");
            return items.iter().map(f).collect();
        }
    };

    let next = AtomicUsize::new(0);
    let (tx, rx) = mpsc::channel();

    pool.scope(|scope| {
        for _ in 0..workers {
            let tx = tx.clone();
            let next = &next;
            let f = &f;
            scope.spawn(move |_| {
                loop {
                    let index = next.fetch_add(1, Ordering::Relaxed);
                    let Some(item) = items.get(index) else {
                        break;
                    };
                    if tx.send((index, f(item))).is_err() {
                        break;
                    }
                }
            });
        }
    });
    drop(tx);

    let mut results: Vec<(usize, R)> = rx.into_iter().collect();
    results.sort_by_key(|(index, _)| *index);
    results.into_iter().map(|(_, result)| result).collect()
}
