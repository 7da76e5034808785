//! # Application Dependencies / 应用依赖
//!
//! Parameter grouping for [`AppRuntime`](crate::AppRuntime) construction.
//! No build steps, no defaults, no hidden logic.

use std::sync::Arc;

use ct_core::ports::*;

/// All dependencies are required - no defaults, no optional fields.
/// 所有依赖都是必需的 - 无默认值，无可选字段。
pub struct AppDeps {
    // Settings / 设置
    pub settings: Arc<dyn SettingsPort>,

    // Swappable resources / 可热替换的资源
    pub provider_factory: Arc<dyn ProviderFactoryPort>,
    pub store_factory: Arc<dyn HistoryStoreFactoryPort>,

    // Platform collaborators / 平台协作者
    pub clipboard: Arc<dyn ClipboardPort>,
    pub notifier: Arc<dyn NotificationPort>,
    pub hotkey: Arc<dyn HotkeyPort>,

    // System / 系统
    pub clock: Arc<dyn ClockPort>,
    pub spawner: Arc<dyn TaskSpawnerPort>,
}
