//! Background task scheduler
//!
//! Owns the handles of delayed and periodic tasks (welcome sends, config
//! reloads, battery polling) so they can all be aborted on shutdown.

use std::future::Future;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use tokio::task::JoinHandle;
use tracing::{debug, info};

#[derive(Debug, Clone, Default)]
pub struct Scheduler {
    handles: Arc<Mutex<Vec<JoinHandle<()>>>>,
}

impl Scheduler {
    pub fn new() -> Self {
        Self::default()
    }

    fn track(&self, handle: JoinHandle<()>) {
        let mut handles = match self.handles.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        handles.retain(|h| !h.is_finished());
        handles.push(handle);
    }

    /// Run `task` once after `delay`
    pub fn schedule_after<F>(&self, delay: Duration, task: F)
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let handle = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            task.await;
        });
        self.track(handle);
    }

    /// Run the task produced by `make_task` every `period`, first tick after one period
    pub fn schedule_every<F, Fut>(&self, name: &'static str, period: Duration, mut make_task: F)
    where
        F: FnMut() -> Fut + Send + 'static,
        Fut: Future<Output = ()> + Send + 'static,
    {
        let handle = tokio::spawn(async move {
            let mut ticker = tokio::time::interval_at(tokio::time::Instant::now() + period, period);
            ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);

            loop {
                ticker.tick().await;
                debug!(task = name, "Running periodic task");
                make_task().await;
            }
        });
        info!(task = name, period = ?period, "Started periodic task");
        self.track(handle);
    }

    /// Number of tasks that have not finished yet
    pub fn pending(&self) -> usize {
        match self.handles.lock() {
            Ok(guard) => guard.iter().filter(|h| !h.is_finished()).count(),
            Err(poisoned) => poisoned.into_inner().iter().filter(|h| !h.is_finished()).count(),
        }
    }

    /// Abort every task still pending
    pub fn shutdown(&self) {
        let drained: Vec<JoinHandle<()>> = match self.handles.lock() {
            Ok(mut guard) => guard.drain(..).collect(),
            Err(poisoned) => poisoned.into_inner().drain(..).collect(),
        };

        let count = drained.len();
        for handle in drained {
            handle.abort();
        }
        info!(tasks = count, "Scheduler stopped");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[tokio::test(start_paused = true)]
    async fn test_delayed_task_runs_after_delay() {
        let scheduler = Scheduler::new();
        let counter = Arc::new(AtomicUsize::new(0));

        let c = counter.clone();
        scheduler.schedule_after(Duration::from_secs(3), async move {
            c.fetch_add(1, Ordering::SeqCst);
        });

        tokio::time::sleep(Duration::from_secs(2)).await;
        assert_eq!(counter.load(Ordering::SeqCst), 0);

        tokio::time::sleep(Duration::from_secs(2)).await;
        assert_eq!(counter.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_shutdown_aborts_pending_tasks() {
        let scheduler = Scheduler::new();
        let counter = Arc::new(AtomicUsize::new(0));

        let c = counter.clone();
        scheduler.schedule_after(Duration::from_secs(3), async move {
            c.fetch_add(1, Ordering::SeqCst);
        });
        scheduler.shutdown();

        tokio::time::sleep(Duration::from_secs(5)).await;
        assert_eq!(counter.load(Ordering::SeqCst), 0);
        assert_eq!(scheduler.pending(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_periodic_task_repeats() {
        let scheduler = Scheduler::new();
        let counter = Arc::new(AtomicUsize::new(0));

        let c = counter.clone();
        scheduler.schedule_every("count", Duration::from_secs(10), move || {
            let c = c.clone();
            async move {
                c.fetch_add(1, Ordering::SeqCst);
            }
        });

        tokio::time::sleep(Duration::from_secs(35)).await;
        assert_eq!(counter.load(Ordering::SeqCst), 3);
        scheduler.shutdown();
    }
}
