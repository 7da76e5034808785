//! Use case for one translation job
//! 单次翻译任务
//!
//! `Idle → Capturing → Detecting → Translating → Persisting → Notifying → Idle`
//!
//! Empty clipboard text ends the job before anything is recorded. A failed
//! provider call does not end it: the error text becomes the translation
//! and the entry is still persisted and notified.

use std::sync::Arc;

use ct_core::language::detect_counts;
use ct_core::ports::{CancellationToken, ClipboardPort, ClockPort, NotificationPort};
use ct_core::translation::{TranslationRequest, TranslationResult};
use tracing::{debug, error, field, info, info_span, warn, Instrument, Span};

use crate::dispatcher::TriggerSource;
use crate::resources::ActiveResources;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JobOutcome {
    /// Nothing to translate, or the clipboard could not be read.
    Skipped,
    Completed(TranslationResult),
    Failed(TranslationResult),
}

impl JobOutcome {
    pub fn result(&self) -> Option<&TranslationResult> {
        match self {
            JobOutcome::Skipped => None,
            JobOutcome::Completed(result) | JobOutcome::Failed(result) => Some(result),
        }
    }
}

pub struct TranslateClipboard {
    resources: Arc<ActiveResources>,
    clipboard: Arc<dyn ClipboardPort>,
    notifier: Arc<dyn NotificationPort>,
    clock: Arc<dyn ClockPort>,
    shutdown: CancellationToken,
}

impl TranslateClipboard {
    /// Jobs started after `shutdown` fires cancel their provider call.
    pub fn new(
        resources: Arc<ActiveResources>,
        clipboard: Arc<dyn ClipboardPort>,
        notifier: Arc<dyn NotificationPort>,
        clock: Arc<dyn ClockPort>,
        shutdown: CancellationToken,
    ) -> Self {
        Self {
            resources,
            clipboard,
            notifier,
            clock,
            shutdown,
        }
    }

    pub async fn execute(&self, source: TriggerSource) -> JobOutcome {
        let span = info_span!(
            "usecase.translate_clipboard.execute",
            source = %source,
            job_id = field::Empty,
        );

        async {
            debug!(state = "capturing");
            let text = match self.clipboard.read_text().await {
                Ok(text) => text,
                Err(err) => {
                    warn!(error = %err, "Failed to read clipboard");
                    return JobOutcome::Skipped;
                }
            };

            debug!(state = "detecting");
            let counts = detect_counts(&text);
            let Some(request) = TranslationRequest::new(text, counts.direction()) else {
                debug!("Clipboard is empty, nothing to translate");
                return JobOutcome::Skipped;
            };
            let settings = self.resources.settings().await;

            debug!(state = "translating");
            let provider = self.resources.provider().await;
            info!(
                provider = provider.name(),
                direction = %request.direction(),
                cjk = counts.cjk,
                latin = counts.latin,
                chars = request.text().chars().count(),
                "Translating clipboard text"
            );
            let cancel = self.shutdown.child_token();
            let translated = provider
                .translate(&cancel, request.text(), request.direction())
                .await;

            let now_ms = self.clock.now_ms();
            let direction = request.direction();
            let (result, failed) = match translated {
                Ok(translated) => (
                    TranslationResult::new(request.into_text(), translated, direction, now_ms),
                    false,
                ),
                Err(err) => {
                    warn!(provider = provider.name(), error = %err, "Translation failed");
                    (
                        TranslationResult::failed(request.into_text(), direction, &err, now_ms),
                        true,
                    )
                }
            };
            Span::current().record("job_id", result.id.as_str());

            debug!(state = "persisting");
            self.persist(&result, settings.database.retention_ceiling).await;

            debug!(state = "notifying");
            if settings.translation.show_notification {
                self.notify(&result).await;
            }

            if failed {
                JobOutcome::Failed(result)
            } else {
                JobOutcome::Completed(result)
            }
        }
        .instrument(span)
        .await
    }

    /// Append, then prune best-effort. Neither failure reaches the caller.
    async fn persist(&self, result: &TranslationResult, retention_ceiling: u32) {
        let store = self.resources.store().await;
        if let Err(err) = store.append(result).await {
            error!(error = %err, "Failed to append history entry");
            return;
        }

        if retention_ceiling > 0 {
            match store.prune(i64::from(retention_ceiling)).await {
                Ok(removed) if removed > 0 => debug!(removed, "Pruned old history entries"),
                Ok(_) => {}
                Err(err) => warn!(error = %err, "Failed to prune history"),
            }
        }
    }

    async fn notify(&self, result: &TranslationResult) {
        let title = format!("翻译结果 ({})", result.direction.label());
        if let Err(err) = self.notifier.push(&title, &result.translated).await {
            warn!(error = %err, "Failed to push notification");
        }
    }
}
