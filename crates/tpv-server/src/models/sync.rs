//! Mirror sync DTOs

use serde::Serialize;
use utoipa::ToSchema;

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SyncResponse {
    pub success: bool,
    /// Rows written, header row included
    pub rows_written: usize,
}
