//! TPV Domain Library
//!
//! Core domain types and interfaces for the third-party verification (TPV)
//! call pipeline: a sales agent submits a request, a voice assistant calls the
//! customer, the provider reports back, the agent gets a text and the records
//! are mirrored to a spreadsheet.
//!
//! # Architecture
//!
//! This crate follows Clean Architecture / Hexagonal Architecture principles:
//!
//! - **Domain Layer** (`domain/`): Pure business entities and logic
//!   - `entities/`: Core domain models (CallRequest, TpvSubmission, CallPlacement, EndOfCallReport)
//!   - `value_objects/`: Immutable value types (CallStatus, PhoneNumber, AgentRegistry)
//!   - `services/`: Pure domain services (amortization, webhook envelope decoding, sheet projection)
//!   - `errors/`: Domain-specific error types
//!
//! - **Ports** (`ports/`): Abstract interfaces (traits)
//!   - `repositories/`: Durable store interface
//!   - `services/`: Voice provider, SMS and spreadsheet interfaces
//!
//! # Usage
//!
//! ```rust,ignore
//! use tpv::domain::{CallRequest, TpvSubmission};
//! use tpv::ports::{CallRequestRepository, VoiceProvider};
//! ```

pub mod domain;
pub mod ports;

// Re-export commonly used types
pub use domain::{
    AgentRegistry, CallMetadata, CallOutcome, CallPlacement, CallRequest, CallStatus,
    DomainError, EndOfCallReport, EnvelopeShape, PhoneNumber, Products, TpvSubmission,
    ValidatedSubmission, WebhookEvent,
};
pub use ports::{
    CallRequestRepository, CallTransition, PlacedCall, SheetMirror, SmsNotifier, VoiceProvider,
};
