use std::sync::Arc;

use ct_app::{AppRuntime, TriggerDispatcher};

#[derive(Clone)]
pub struct AppState {
    pub runtime: Arc<AppRuntime>,
    pub dispatcher: TriggerDispatcher,
}

impl AppState {
    pub fn new(runtime: Arc<AppRuntime>) -> Self {
        let dispatcher = runtime.usecases().dispatcher();
        Self {
            runtime,
            dispatcher,
        }
    }
}
