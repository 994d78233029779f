use tokio::sync::Semaphore;
use futures::stream::{FuturesUnordered, StreamExt};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use parking_lot::Mutex;

/// Bounded worker pool: at most `concurrency` tasks are in flight at once.
pub struct ConcurrentProbe {
    semaphore: Arc<Semaphore>,
    completed: Arc<AtomicUsize>,
    panicked: Arc<AtomicUsize>,
}

impl ConcurrentProbe {
    /// `concurrency` is clamped to `1..=Semaphore::MAX_PERMITS`.
    pub fn new(concurrency: usize) -> Self {
        Self {
            semaphore: Arc::new(Semaphore::new(concurrency.clamp(1, Semaphore::MAX_PERMITS))),
            completed: Arc::new(AtomicUsize::new(0)),
            panicked: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Run `task_fn` over every task and wait for all of them.
    ///
    /// Results come back in input order. A slot is `None` when its task
    /// panicked or could not be started.
    pub async fn execute<T, F, Fut>(
        &self,
        tasks: Vec<T>,
        task_fn: F,
    ) -> Vec<Option<Fut::Output>>
    where
        F: Fn(T) -> Fut + Clone + Send + 'static,
        Fut: std::future::Future + Send + 'static,
        Fut::Output: Send + 'static,
        T: Send + 'static,
    {
        let total = tasks.len();
        let slots = Arc::new(ResultSlots::with_capacity(total));
        let mut handles = FuturesUnordered::new();

        for (idx, task) in tasks.into_iter().enumerate() {
            // Wait for a free worker before spawning
            let permit = match self.semaphore.clone().acquire_owned().await {
                Ok(permit) => permit,
                Err(e) => {
                    tracing::error!(error = %e, remaining = total - idx, "worker pool closed");
                    break;
                }
            };
            let task_fn = task_fn.clone();
            let slots = slots.clone();
            let completed = self.completed.clone();

            handles.push(tokio::spawn(async move {
                let result = task_fn(task).await;
                slots.insert(idx, result);
                completed.fetch_add(1, Ordering::Relaxed);
                drop(permit);
            }));
        }

        // Barrier: every spawned task must finish before results are read
        while let Some(joined) = handles.next().await {
            if let Err(e) = joined {
                self.panicked.fetch_add(1, Ordering::Relaxed);
                tracing::warn!(error = %e, "worker task did not complete");
            }
        }

        slots.drain_ordered(total)
    }

    /// (completed, panicked) task counts since creation.
    pub fn get_stats(&self) -> (usize, usize) {
        (
            self.completed.load(Ordering::Relaxed),
            self.panicked.load(Ordering::Relaxed),
        )
    }
}

/// Collection point written concurrently by workers, keyed by task index.
pub struct ResultSlots<V> {
    slots: Mutex<ahash::AHashMap<usize, V>>,
}

impl<V> ResultSlots<V> {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            slots: Mutex::new(ahash::AHashMap::with_capacity(capacity)),
        }
    }

    pub fn insert(&self, idx: usize, value: V) {
        self.slots.lock().insert(idx, value);
    }

    pub fn len(&self) -> usize {
        self.slots.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Take every value out, laid out by index `0..total`.
    pub fn drain_ordered(&self, total: usize) -> Vec<Option<V>> {
        let mut slots = std::mem::take(&mut *self.slots.lock());
        (0..total).map(|idx| slots.remove(&idx)).collect()
    }
}
