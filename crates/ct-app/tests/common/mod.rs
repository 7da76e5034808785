//! Hand-written port fakes shared by the integration tests.
#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::atomic::{AtomicI64, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, Once};

use async_trait::async_trait;
use ct_app::ActiveResources;
use ct_core::ports::*;
use ct_core::hotkey::HotkeyBinding;
use ct_core::settings::model::{PersistenceConfig, ProviderConfig, Settings};
use ct_core::translation::{Direction, TranslationResult};
use mockall::mock;
use tokio::task::JoinHandle;

static INIT: Once = Once::new();

pub fn init_tracing() {
    INIT.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter("debug")
            .with_test_writer()
            .try_init();
    });
}

mock! {
    pub Hotkey {}

    impl HotkeyPort for Hotkey {
        fn register(&self, binding: &HotkeyBinding) -> bool;
        fn unregister(&self);
        fn wait_for_trigger(&self) -> bool;
    }
}

pub struct FakeClipboard {
    pub text: Mutex<Result<String, ClipboardError>>,
}

impl FakeClipboard {
    pub fn with_text(text: &str) -> Arc<Self> {
        Arc::new(Self {
            text: Mutex::new(Ok(text.to_string())),
        })
    }

    pub fn failing() -> Arc<Self> {
        Arc::new(Self {
            text: Mutex::new(Err(ClipboardError::Read("no display".into()))),
        })
    }
}

#[async_trait]
impl ClipboardPort for FakeClipboard {
    async fn read_text(&self) -> Result<String, ClipboardError> {
        self.text.lock().unwrap().clone()
    }
}

#[derive(Default)]
pub struct RecordingNotifier {
    pub pushed: Mutex<Vec<(String, String)>>,
    pub fail: bool,
}

impl RecordingNotifier {
    pub fn pushed(&self) -> Vec<(String, String)> {
        self.pushed.lock().unwrap().clone()
    }
}

#[async_trait]
impl NotificationPort for RecordingNotifier {
    async fn push(&self, title: &str, message: &str) -> Result<(), NotificationError> {
        self.pushed
            .lock()
            .unwrap()
            .push((title.to_string(), message.to_string()));
        if self.fail {
            Err(NotificationError::Push("dbus unavailable".into()))
        } else {
            Ok(())
        }
    }
}

/// Echoes the input with a prefix, or returns a fixed error.
pub struct FakeProvider {
    pub name: String,
    pub error: Option<ProviderError>,
    pub calls: AtomicUsize,
    pub closed: AtomicUsize,
    pub seen: Mutex<Vec<(String, Direction)>>,
}

impl FakeProvider {
    pub fn named(name: &str) -> Arc<Self> {
        Arc::new(Self {
            name: name.to_string(),
            error: None,
            calls: AtomicUsize::new(0),
            closed: AtomicUsize::new(0),
            seen: Mutex::new(Vec::new()),
        })
    }

    pub fn failing(error: ProviderError) -> Arc<Self> {
        Arc::new(Self {
            name: "Failing".to_string(),
            error: Some(error),
            calls: AtomicUsize::new(0),
            closed: AtomicUsize::new(0),
            seen: Mutex::new(Vec::new()),
        })
    }

    pub fn closed(&self) -> usize {
        self.closed.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl TranslationProviderPort for FakeProvider {
    fn name(&self) -> &str {
        &self.name
    }

    async fn translate(
        &self,
        _cancel: &CancellationToken,
        text: &str,
        direction: Direction,
    ) -> Result<String, ProviderError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.seen.lock().unwrap().push((text.to_string(), direction));
        tokio::task::yield_now().await;
        match &self.error {
            Some(err) => Err(err.clone()),
            None => Ok(format!("[{}] {}", self.name, text)),
        }
    }

    async fn close(&self) -> Result<(), ProviderError> {
        self.closed.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

/// In-memory history with the same ordering rules as the SQLite store.
#[derive(Default)]
pub struct InMemoryStore {
    pub entries: Mutex<Vec<TranslationResult>>,
    pub initialized: Mutex<bool>,
    pub fail_initialize: bool,
    pub fail_append: bool,
    pub fail_prune: bool,
    pub closed: AtomicUsize,
    pub prunes: Mutex<Vec<i64>>,
}

impl InMemoryStore {
    pub fn ready() -> Arc<Self> {
        let store = Self::default();
        *store.initialized.lock().unwrap() = true;
        Arc::new(store)
    }

    pub fn entries(&self) -> Vec<TranslationResult> {
        self.entries.lock().unwrap().clone()
    }

    pub fn closed(&self) -> usize {
        self.closed.load(Ordering::SeqCst)
    }

    fn check(&self) -> Result<(), HistoryError> {
        if *self.initialized.lock().unwrap() {
            Ok(())
        } else {
            Err(HistoryError::NotInitialized)
        }
    }
}

#[async_trait]
impl HistoryStorePort for InMemoryStore {
    async fn initialize(&self) -> Result<(), HistoryError> {
        if self.fail_initialize {
            return Err(HistoryError::Open("disk full".into()));
        }
        *self.initialized.lock().unwrap() = true;
        Ok(())
    }

    async fn close(&self) -> Result<(), HistoryError> {
        self.closed.fetch_add(1, Ordering::SeqCst);
        *self.initialized.lock().unwrap() = false;
        Ok(())
    }

    async fn append(&self, result: &TranslationResult) -> Result<(), HistoryError> {
        self.check()?;
        if self.fail_append {
            return Err(HistoryError::Write("read-only".into()));
        }
        self.entries.lock().unwrap().push(result.clone());
        Ok(())
    }

    async fn list(&self) -> Result<Vec<TranslationResult>, HistoryError> {
        self.check()?;
        let mut entries: Vec<_> = self.entries.lock().unwrap().iter().cloned().enumerate().collect();
        entries.sort_by(|(ia, a), (ib, b)| b.timestamp.cmp(&a.timestamp).then(ib.cmp(ia)));
        Ok(entries.into_iter().map(|(_, e)| e).collect())
    }

    async fn count(&self) -> Result<u64, HistoryError> {
        self.check()?;
        Ok(self.entries.lock().unwrap().len() as u64)
    }

    async fn clear(&self) -> Result<(), HistoryError> {
        self.check()?;
        self.entries.lock().unwrap().clear();
        Ok(())
    }

    async fn prune(&self, keep: i64) -> Result<u64, HistoryError> {
        self.check()?;
        self.prunes.lock().unwrap().push(keep);
        if self.fail_prune {
            return Err(HistoryError::Write("locked".into()));
        }
        if keep <= 0 {
            return Ok(0);
        }
        let ordered = self.list().await?;
        let keep = keep as usize;
        let removed = ordered.len().saturating_sub(keep);
        let kept: Vec<_> = ordered.into_iter().take(keep).rev().collect();
        *self.entries.lock().unwrap() = kept;
        Ok(removed as u64)
    }
}

/// Hands out scripted providers in order and records the configs it saw.
#[derive(Default)]
pub struct FakeProviderFactory {
    pub queue: Mutex<VecDeque<Result<Arc<FakeProvider>, ProviderError>>>,
    pub built: Mutex<Vec<ProviderConfig>>,
}

impl FakeProviderFactory {
    pub fn next(&self, outcome: Result<Arc<FakeProvider>, ProviderError>) {
        self.queue.lock().unwrap().push_back(outcome);
    }

    pub fn built(&self) -> usize {
        self.built.lock().unwrap().len()
    }
}

impl ProviderFactoryPort for FakeProviderFactory {
    fn build(
        &self,
        config: &ProviderConfig,
    ) -> Result<Arc<dyn TranslationProviderPort>, ProviderError> {
        self.built.lock().unwrap().push(config.clone());
        let next = self
            .queue
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Ok(FakeProvider::named("Default")));
        next.map(|provider| provider as Arc<dyn TranslationProviderPort>)
    }
}

#[derive(Default)]
pub struct FakeStoreFactory {
    pub queue: Mutex<VecDeque<Arc<InMemoryStore>>>,
    pub built: Mutex<Vec<PersistenceConfig>>,
}

impl FakeStoreFactory {
    pub fn next(&self, store: Arc<InMemoryStore>) {
        self.queue.lock().unwrap().push_back(store);
    }

    pub fn built(&self) -> usize {
        self.built.lock().unwrap().len()
    }
}

impl HistoryStoreFactoryPort for FakeStoreFactory {
    fn build(&self, config: &PersistenceConfig) -> Result<Arc<dyn HistoryStorePort>, HistoryError> {
        self.built.lock().unwrap().push(config.clone());
        let store = self
            .queue
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Arc::new(InMemoryStore::default()));
        Ok(store)
    }
}

pub struct MemorySettings {
    pub stored: Mutex<Option<Settings>>,
    pub fail_save: bool,
    pub saves: AtomicUsize,
}

impl MemorySettings {
    pub fn with(settings: Option<Settings>) -> Arc<Self> {
        Arc::new(Self {
            stored: Mutex::new(settings),
            fail_save: false,
            saves: AtomicUsize::new(0),
        })
    }

    pub fn failing_save() -> Arc<Self> {
        Arc::new(Self {
            stored: Mutex::new(None),
            fail_save: true,
            saves: AtomicUsize::new(0),
        })
    }

    pub fn stored(&self) -> Option<Settings> {
        self.stored.lock().unwrap().clone()
    }
}

#[async_trait]
impl SettingsPort for MemorySettings {
    async fn load(&self) -> Result<Settings, ConfigError> {
        self.stored
            .lock()
            .unwrap()
            .clone()
            .ok_or_else(|| ConfigError::Malformed("expected value at line 1".into()))
    }

    async fn save(&self, settings: &Settings) -> Result<(), ConfigError> {
        self.saves.fetch_add(1, Ordering::SeqCst);
        if self.fail_save {
            return Err(ConfigError::Io("permission denied".into()));
        }
        *self.stored.lock().unwrap() = Some(settings.clone());
        Ok(())
    }
}

/// Advances one second per reading.
pub struct SteppingClock {
    pub next_ms: AtomicI64,
}

impl SteppingClock {
    pub fn starting_at(secs: i64) -> Arc<Self> {
        Arc::new(Self {
            next_ms: AtomicI64::new(secs * 1000),
        })
    }
}

impl ClockPort for SteppingClock {
    fn now_ms(&self) -> i64 {
        self.next_ms.fetch_add(1000, Ordering::SeqCst)
    }
}

/// Spawns on tokio and keeps the handles so tests can wait for jobs.
#[derive(Default)]
pub struct CollectingSpawner {
    pub handles: Mutex<Vec<JoinHandle<()>>>,
}

impl CollectingSpawner {
    pub async fn wait_all(&self) {
        let handles: Vec<_> = self.handles.lock().unwrap().drain(..).collect();
        for outcome in futures::future::join_all(handles).await {
            outcome.unwrap();
        }
    }
}

impl TaskSpawnerPort for CollectingSpawner {
    fn spawn(&self, job: BoxedJob) {
        self.handles.lock().unwrap().push(tokio::spawn(job));
    }
}

pub fn resources_with(
    settings: Settings,
    provider: Arc<FakeProvider>,
    store: Arc<InMemoryStore>,
) -> Arc<ActiveResources> {
    Arc::new(ActiveResources::new(settings, provider, store))
}
