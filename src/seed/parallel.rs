//! Bounded parallel map with join.

use std::{future::Future, sync::Arc};
use tokio::{sync::Semaphore, task::JoinSet};

/// Error from [`try_map_bounded`].
#[derive(Debug, thiserror::Error)]
pub enum ParallelError<E> {
    #[error("{0}")]
    Task(E),
    #[error("task panicked or was cancelled: {0}")]
    Join(#[from] tokio::task::JoinError),
}

/// Run `f` over every item on the runtime with at most `limit` tasks in
/// flight, wait for all of them, and return results in input order.
///
/// The first error aborts the remaining tasks and is returned.
///
/// # Errors
/// Returns the first task error, or a join error if a task panicked.
pub async fn try_map_bounded<I, T, E, F, Fut>(
    items: I,
    limit: usize,
    f: F,
) -> Result<Vec<T>, ParallelError<E>>
where
    I: IntoIterator,
    F: Fn(I::Item) -> Fut,
    Fut: Future<Output = Result<T, E>> + Send + 'static,
    T: Send + 'static,
    E: Send + 'static,
{
    let permits = Arc::new(Semaphore::new(limit.max(1)));
    let mut set = JoinSet::new();
    let mut len = 0;

    for (index, item) in items.into_iter().enumerate() {
        let permits = Arc::clone(&permits);
        let fut = f(item);
        set.spawn(async move {
            let _permit = permits.acquire_owned().await.ok();
            fut.await.map(|value| (index, value))
        });
        len += 1;
    }

    let mut slots: Vec<Option<T>> = std::iter::repeat_with(|| None).take(len).collect();

    while let Some(joined) = set.join_next().await {
        match joined {
            Ok(Ok((index, value))) => slots[index] = Some(value),
            Ok(Err(err)) => {
                set.abort_all();
                return Err(ParallelError::Task(err));
            }
            Err(err) => {
                set.abort_all();
                return Err(ParallelError::Join(err));
            }
        }
    }

    Ok(slots.into_iter().flatten().collect())
}
