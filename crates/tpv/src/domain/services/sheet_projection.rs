//! Sheet projection - Fixed column layout of the spreadsheet mirror
//!
//! The mirror is a disposable, human-facing view; the column order below is
//! the contract with whoever reads the sheet.

use crate::domain::entities::{format_number, CallRequest};

pub const SHEET_HEADERS: [&str; 19] = [
    "Date",
    "Agent ID",
    "Customer Name",
    "Customer Phone",
    "Address",
    "City",
    "Province",
    "Postal Code",
    "Email",
    "Products",
    "Sales Price",
    "Interest Rate",
    "Promotional Term",
    "Amortization",
    "Monthly Payment",
    "Status",
    "Call Duration (seconds)",
    "Ended Reason",
    "VAPI Call ID",
];

/// One sheet row for a record
pub fn project_row(record: &CallRequest) -> Vec<String> {
    let text = |v: &Option<String>| v.clone().unwrap_or_default();

    vec![
        record.created_at.format("%Y-%m-%d %H:%M:%S UTC").to_string(),
        record.agent_id.clone(),
        record.customer_name.clone(),
        record.phone_number.clone(),
        record.address.clone(),
        text(&record.city),
        text(&record.province),
        text(&record.postal_code),
        text(&record.email),
        record.products.clone(),
        format_number(record.sales_price),
        record.interest_rate.map(format_number).unwrap_or_default(),
        text(&record.promotional_term),
        record
            .amortization
            .map(|m| m.to_string())
            .unwrap_or_default(),
        record
            .monthly_payment
            .map(|p| format!("{:.2}", p))
            .unwrap_or_default(),
        record.status.to_string(),
        record
            .call_duration_seconds
            .map(|d| d.to_string())
            .unwrap_or_default(),
        text(&record.ended_reason),
        text(&record.vapi_call_id),
    ]
}

/// Header row followed by one row per record, in the given order
pub fn project_table(records: &[CallRequest]) -> Vec<Vec<String>> {
    let header = SHEET_HEADERS.iter().map(|h| h.to_string()).collect();
    std::iter::once(header)
        .chain(records.iter().map(project_row))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::value_objects::CallStatus;
    use chrono::TimeZone;
    use uuid::Uuid;

    fn record() -> CallRequest {
        let created = chrono::Utc.with_ymd_and_hms(2026, 3, 2, 14, 5, 0).unwrap();
        CallRequest {
            id: Uuid::new_v4(),
            vapi_call_id: Some("call-1".into()),
            agent_id: "MM23".into(),
            company_name: Some("Edison Energy".into()),
            first_name: Some("Jane".into()),
            last_name: Some("Doe".into()),
            customer_name: "Jane Doe".into(),
            address: "12 King St W".into(),
            city: Some("Toronto".into()),
            province: Some("Ontario".into()),
            postal_code: Some("M5H 1A1".into()),
            phone_number: "+14165551234".into(),
            email: None,
            products: "Heat Pump, Boiler".into(),
            sales_price: 10_000.0,
            payment_option: Some("finance".into()),
            finance_company: Some("Financeit Canada Inc.".into()),
            interest_rate: Some(9.99),
            promotional_term: Some("12".into()),
            amortization: Some(60),
            monthly_payment: Some(215.59),
            status: CallStatus::Completed,
            ended_reason: Some("assistant-ended-call".into()),
            call_duration_seconds: Some(95),
            created_at: created,
            updated_at: created,
        }
    }

    #[test]
    fn test_row_follows_header_order() {
        let row = project_row(&record());
        assert_eq!(row.len(), SHEET_HEADERS.len());
        assert_eq!(
            row,
            vec![
                "2026-03-02 14:05:00 UTC",
                "MM23",
                "Jane Doe",
                "+14165551234",
                "12 King St W",
                "Toronto",
                "Ontario",
                "M5H 1A1",
                "",
                "Heat Pump, Boiler",
                "10000",
                "9.99",
                "12",
                "60",
                "215.59",
                "completed",
                "95",
                "assistant-ended-call",
                "call-1",
            ]
        );
    }

    #[test]
    fn test_table_starts_with_header() {
        let table = project_table(&[record(), record()]);
        assert_eq!(table.len(), 3);
        assert_eq!(table[0][0], "Date");
        assert_eq!(table[0][18], "VAPI Call ID");
    }

    #[test]
    fn test_empty_table_is_header_only() {
        assert_eq!(project_table(&[]).len(), 1);
    }
}
