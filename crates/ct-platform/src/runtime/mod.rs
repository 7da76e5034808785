mod spawner;

pub use spawner::TokioTaskSpawner;
