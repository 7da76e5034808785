use ct_core::ports::{BoxedJob, TaskSpawnerPort};
use tokio::runtime::Handle;

/// Spawns jobs onto a tokio runtime and detaches them.
///
/// Holding a [`Handle`] lets the hotkey listener thread, which is not a
/// runtime worker, start jobs too.
#[derive(Debug, Clone)]
pub struct TokioTaskSpawner {
    handle: Handle,
}

impl TokioTaskSpawner {
    pub fn new(handle: Handle) -> Self {
        Self { handle }
    }
}

impl TaskSpawnerPort for TokioTaskSpawner {
    fn spawn(&self, job: BoxedJob) {
        drop(self.handle.spawn(job));
    }
}
