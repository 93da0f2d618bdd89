//! OpenAPI Documentation
//!
//! Centralized API documentation using utoipa.

use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::models::{
    CallRequestResponse, ErrorResponse, InitiateCallRequest, InitiateCallResponse, SyncResponse,
    VapiWebhookPayload, WebhookAck,
};

use super::HealthCheck;

#[derive(OpenApi)]
#[openapi(
    paths(
        super::health_check,
        super::call::initiate_call,
        super::webhook::vapi_webhook,
        super::sync::sync_sheet,
        super::requests::list_requests,
    ),
    info(
        title = "TPV API",
        version = "0.1.0",
        description = "Third-party verification calls: place an assistant call, reconcile its outcome, text the agent and mirror every request to a spreadsheet.",
        license(name = "MIT"),
    ),
    servers(
        (url = "/", description = "Current server"),
    ),
    tags(
        (name = "Health", description = "Health check endpoints"),
        (name = "Call", description = "Call - Place a verification call"),
        (name = "Webhook", description = "Webhook - Voice provider events"),
        (name = "Sync", description = "Sync - Spreadsheet mirror"),
        (name = "Requests", description = "Requests - Stored call requests"),
    ),
    components(
        schemas(
            HealthCheck,
            ErrorResponse,
            // Call
            InitiateCallRequest,
            InitiateCallResponse,
            // Webhook
            VapiWebhookPayload,
            WebhookAck,
            // Sync
            SyncResponse,
            // Requests
            CallRequestResponse,
        )
    ),
    modifiers(&BearerAuth)
)]
pub struct ApiDoc;

struct BearerAuth;

impl Modify for BearerAuth {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer",
                SecurityScheme::Http(HttpBuilder::new().scheme(HttpAuthScheme::Bearer).build()),
            );
        }
    }
}
