use std::sync::Arc;

use sqlx::PgPool;

mod adapters;
mod application;
mod auth;
mod config;
mod error;
mod models;
mod routes;
#[cfg(test)]
mod testing;

use adapters::{GoogleSheetsClient, PgCallRequestRepository, TwilioSms, VapiClient};
use application::{AgentNotifier, CallInitiator, MirrorSynchronizer, WebhookReconciler};
use config::ServerConfig;
use tpv::CallRequestRepository;

/// Application state shared across all routes
#[derive(Clone)]
pub struct AppState {
    pub initiator: Arc<CallInitiator>,
    pub reconciler: Arc<WebhookReconciler>,
    /// `None` when Google Sheets is not configured
    pub mirror: Option<Arc<MirrorSynchronizer>>,
    pub repo: Arc<dyn CallRequestRepository>,
    /// Bearer key for operator routes
    pub api_key: Option<Arc<str>>,
}

impl AppState {
    /// Wire the use cases over the given ports
    pub fn assemble(
        config: &ServerConfig,
        repo: Arc<dyn CallRequestRepository>,
        voice: Option<Arc<dyn tpv::VoiceProvider>>,
        sms: Option<Arc<dyn tpv::SmsNotifier>>,
        sheet: Option<Arc<dyn tpv::SheetMirror>>,
    ) -> Self {
        let mirror = sheet.map(|sheet| Arc::new(MirrorSynchronizer::new(repo.clone(), sheet)));

        let mut initiator =
            CallInitiator::new(repo.clone(), config.agents.clone(), config.country_code.clone())
                .with_mirror(mirror.clone());
        if let Some(voice) = voice {
            let vapi = config.vapi.as_ref();
            initiator = initiator.with_voice(
                voice,
                vapi.and_then(|v| v.assistant_id.clone()),
                vapi.and_then(|v| v.phone_number_id.clone()),
            );
        }

        let reconciler = WebhookReconciler::new(repo.clone())
            .with_notifier(sms.map(|sms| AgentNotifier::new(sms, config.agents.clone())))
            .with_mirror(mirror.clone());

        Self {
            initiator: Arc::new(initiator),
            reconciler: Arc::new(reconciler),
            mirror,
            repo,
            api_key: config.api_key.as_deref().map(Arc::from),
        }
    }
}

#[shuttle_runtime::main]
async fn main(
    #[shuttle_shared_db::Postgres] pool: PgPool,
    #[shuttle_runtime::Secrets] secrets: shuttle_runtime::SecretStore,
) -> shuttle_axum::ShuttleAxum {
    tracing::info!("📞 TPV API initializing...");

    let config = ServerConfig::from_lookup(|key| secrets.get(key))
        .map_err(|e| shuttle_runtime::Error::Custom(e.into()))?;

    if config.api_key.is_some() {
        tracing::info!("🔐 API key authentication enabled for operator routes");
    } else {
        tracing::warn!("⚠️  No TPV_API_KEY set - operator routes are open");
    }
    tracing::info!(agents = config.agents.len(), "👥 Agent registry loaded");

    // Run migrations
    sqlx::migrate!()
        .run(&pool)
        .await
        .expect("Failed to run database migrations");

    tracing::info!("✅ Database migrations completed");

    let repo: Arc<dyn CallRequestRepository> = Arc::new(PgCallRequestRepository::new(pool));

    let voice: Option<Arc<dyn tpv::VoiceProvider>> = match &config.vapi {
        Some(vapi) => {
            let client = VapiClient::new(vapi).expect("Failed to build Vapi client");
            tracing::info!("🎙️  Vapi voice provider initialized");
            Some(Arc::new(client))
        }
        None => {
            tracing::warn!("⚠️  No VAPI_API_KEY set - call initiation disabled");
            None
        }
    };

    let sms: Option<Arc<dyn tpv::SmsNotifier>> = match &config.twilio {
        Some(twilio) => {
            let client = TwilioSms::new(twilio).expect("Failed to build Twilio client");
            tracing::info!("📱 Twilio SMS initialized");
            Some(Arc::new(client))
        }
        None => {
            tracing::warn!("⚠️  Twilio credentials not set - webhook endpoint disabled");
            None
        }
    };

    let sheet: Option<Arc<dyn tpv::SheetMirror>> = match &config.sheets {
        Some(sheets) => {
            let client = GoogleSheetsClient::new(sheets).expect("Failed to build Sheets client");
            tracing::info!(range = %sheets.range, "📊 Google Sheets mirror initialized");
            Some(Arc::new(client))
        }
        None => {
            tracing::warn!("⚠️  Google Sheets credentials not set - mirror disabled");
            None
        }
    };

    let state = AppState::assemble(&config, repo, voice, sms, sheet);
    let router = routes::build_router(state);

    tracing::info!("📚 Swagger UI: /swagger-ui");
    tracing::info!("✅ TPV API ready");

    Ok(router.into())
}
