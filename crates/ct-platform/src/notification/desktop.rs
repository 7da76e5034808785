use async_trait::async_trait;
use ct_core::ports::{NotificationError, NotificationPort};
use notify_rust::Notification;
use tokio::task::spawn_blocking;

pub const APP_NAME: &str = "剪贴板翻译";

/// Native desktop notifications via `notify-rust`.
#[derive(Debug, Clone)]
pub struct DesktopNotifier {
    app_name: String,
}

impl DesktopNotifier {
    pub fn new() -> Self {
        Self::with_app_name(APP_NAME)
    }

    pub fn with_app_name(app_name: impl Into<String>) -> Self {
        Self {
            app_name: app_name.into(),
        }
    }
}

impl Default for DesktopNotifier {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl NotificationPort for DesktopNotifier {
    async fn push(&self, title: &str, message: &str) -> Result<(), NotificationError> {
        let mut notification = Notification::new();
        notification
            .appname(&self.app_name)
            .summary(title)
            .body(message);

        // `show` talks to the notification daemon synchronously.
        spawn_blocking(move || notification.show().map(|_| ()))
            .await
            .map_err(|e| NotificationError::Push(format!("notification task failed: {e}")))?
            .map_err(|e| NotificationError::Push(e.to_string()))
    }
}
