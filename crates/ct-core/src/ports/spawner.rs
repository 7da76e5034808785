use std::future::Future;
use std::pin::Pin;

pub type BoxedJob = Pin<Box<dyn Future<Output = ()> + Send + 'static>>;

/// Runs fire-and-forget jobs. Spawned jobs are not tracked by the caller.
pub trait TaskSpawnerPort: Send + Sync {
    fn spawn(&self, job: BoxedJob);
}
