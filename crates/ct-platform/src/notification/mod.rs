mod desktop;

pub use desktop::{DesktopNotifier, APP_NAME};
