pub mod paths;
pub mod run;
pub mod tracing;
pub mod wiring;

pub use paths::{find_static_dir, AppPaths};
pub use run::run;
pub use self::tracing::init_tracing_subscriber;
pub use wiring::{build_deps, WiredDeps};
