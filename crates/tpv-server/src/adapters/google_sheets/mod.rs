//! Google Sheets Mirror
//!
//! Service-account authentication plus the bulk clear-and-write client.

mod client;
mod service_account;

pub use client::GoogleSheetsClient;
pub use service_account::ServiceAccountAuth;
