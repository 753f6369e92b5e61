use std::sync::Arc;

use tracing::{info, warn};

use crate::clients::build_http_client;
use crate::config::Settings;
use crate::handlers::{self, AppState};
use crate::service::dictation::{SpeechSource, UnsupportedSpeech};
use crate::service::model_service::{GeminiService, ModelClient, XaiService};
use crate::service::planner::Planner;
use crate::service::translator::{EventTranslator, SlotPromptTranslator, StructuredTranslator, TranslatorBackend};
use crate::store::{EventStore, JsonFileStore};

/// Picks the translator for the configured backend.
pub fn build_translator(settings: &Settings) -> Arc<dyn EventTranslator> {
    let http = build_http_client(settings.http_timeout);
    let endpoint = settings.active_endpoint().clone();
    if !endpoint.has_credential() {
        warn!(backend = %settings.backend, "no API key configured; text requests will add nothing");
    }
    match settings.backend {
        TranslatorBackend::Gemini => {
            let model: Arc<dyn ModelClient> = Arc::new(GeminiService::new(http, endpoint));
            Arc::new(SlotPromptTranslator::new(model))
        }
        TranslatorBackend::Xai => {
            let model: Arc<dyn ModelClient> = Arc::new(XaiService::new(http, endpoint));
            Arc::new(StructuredTranslator::new(model, settings.timezone))
        }
    }
}

/// Builds the planner over the configured events file and loads it.
pub async fn build_planner(settings: &Settings) -> Arc<Planner> {
    let store: Arc<dyn EventStore> = Arc::new(JsonFileStore::new(settings.events_file.clone()));
    let planner = Arc::new(Planner::new(store, build_translator(settings)));
    planner.load().await;
    planner
}

pub async fn run_server(settings: Settings) {
    let planner = build_planner(&settings).await;
    let state = AppState {
        planner,
        speech_supported: UnsupportedSpeech.is_supported(),
    };
    info!(
        addr = %settings.bind_addr,
        backend = %settings.backend,
        events_file = %settings.events_file.display(),
        "planner listening"
    );
    warp::serve(handlers::routes(state)).run(settings.bind_addr).await;
}
