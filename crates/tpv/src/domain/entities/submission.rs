//! TpvSubmission - Inbound verification request
//!
//! The sales form posts loosely typed JSON (numbers may arrive as strings,
//! products as a list or a joined string). `validate` turns it into a
//! `ValidatedSubmission` whose fields are typed and normalized.

use serde::{Deserialize, Deserializer, Serialize};

use crate::domain::errors::DomainError;
use crate::domain::services::amortization;
use crate::domain::value_objects::{AgentRegistry, PhoneNumber};

/// Payment option that activates the finance fields.
pub const FINANCE_PAYMENT_OPTION: &str = "finance";

/// Products sold, either as a list or already joined.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Products {
    List(Vec<String>),
    Joined(String),
}

impl Products {
    /// Individual product names, trimmed, in order
    pub fn items(&self) -> Vec<String> {
        let raw: Vec<&str> = match self {
            Products::List(items) => items.iter().map(String::as_str).collect(),
            Products::Joined(joined) => joined.split(',').collect(),
        };
        raw.into_iter()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect()
    }
}

/// Raw request body as posted by the form
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TpvSubmission {
    #[serde(default, deserialize_with = "lenient_text")]
    pub agent_id: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub assistant_id: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub phone_number_id: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub company_name: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub first_name: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub last_name: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub customer_name: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub address: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub city: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub province: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub postal_code: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub phone_number: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub email: Option<String>,
    #[serde(default)]
    pub products: Option<Products>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub sales_price: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub payment_option: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub finance_company: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub interest_rate: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub promotional_term: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub amortization: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub monthly_payment: Option<String>,
}

/// A submission that passed validation, with normalized fields
#[derive(Debug, Clone, PartialEq)]
pub struct ValidatedSubmission {
    pub agent_id: String,
    pub assistant_id: Option<String>,
    pub phone_number_id: Option<String>,
    pub company_name: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub customer_name: String,
    pub address: String,
    pub city: Option<String>,
    pub province: Option<String>,
    pub postal_code: Option<String>,
    /// Number as the agent typed it
    pub raw_phone: String,
    pub phone: PhoneNumber,
    pub email: Option<String>,
    pub products: Vec<String>,
    pub sales_price: f64,
    pub payment_option: Option<String>,
    pub finance_company: Option<String>,
    pub interest_rate: Option<f64>,
    pub promotional_term: Option<String>,
    pub amortization: Option<i32>,
    pub monthly_payment: Option<f64>,
}

impl TpvSubmission {
    /// Validate and normalize the submission.
    ///
    /// Fails on missing required fields, an agent code the registry does not
    /// know, an unusable phone number or unparseable amounts.
    pub fn validate(
        self,
        agents: &AgentRegistry,
        country_code: &str,
    ) -> Result<ValidatedSubmission, DomainError> {
        let customer_name = self.customer_name.clone().or_else(|| {
            match (self.first_name.as_deref(), self.last_name.as_deref()) {
                (Some(first), Some(last)) => Some(format!("{} {}", first, last)),
                (Some(only), None) | (None, Some(only)) => Some(only.to_string()),
                (None, None) => None,
            }
        });
        let products = self.products.as_ref().map(Products::items).unwrap_or_default();

        let mut missing = Vec::new();
        if self.agent_id.is_none() {
            missing.push("agentId");
        }
        if self.phone_number.is_none() {
            missing.push("phoneNumber");
        }
        if customer_name.is_none() {
            missing.push("customerName");
        }
        if self.address.is_none() {
            missing.push("address");
        }
        if products.is_empty() {
            missing.push("products");
        }
        if self.sales_price.is_none() {
            missing.push("salesPrice");
        }

        let missing_fields = || {
            DomainError::validation(format!("Missing required fields: {}", missing.join(", ")))
        };
        if !missing.is_empty() {
            return Err(missing_fields());
        }

        let (Some(agent_id), Some(raw_phone), Some(customer_name), Some(address), Some(price)) = (
            self.agent_id,
            self.phone_number,
            customer_name,
            self.address,
            self.sales_price,
        ) else {
            return Err(missing_fields());
        };

        if !agents.contains(&agent_id) {
            return Err(DomainError::validation("Invalid agent ID"));
        }

        let phone = PhoneNumber::normalize(&raw_phone, country_code)?;

        let sales_price = parse_amount("salesPrice", &price)?;
        if sales_price <= 0.0 {
            return Err(DomainError::validation("salesPrice must be positive"));
        }

        let (first_name, last_name) = match (self.first_name, self.last_name) {
            (None, None) => split_name(&customer_name),
            names => names,
        };

        let finance_active = self
            .payment_option
            .as_deref()
            .map_or(true, |option| option.eq_ignore_ascii_case(FINANCE_PAYMENT_OPTION));

        let mut validated = ValidatedSubmission {
            agent_id,
            assistant_id: self.assistant_id,
            phone_number_id: self.phone_number_id,
            company_name: self.company_name,
            first_name,
            last_name,
            customer_name,
            address,
            city: self.city,
            province: self.province,
            postal_code: self.postal_code,
            raw_phone,
            phone,
            email: self.email,
            products,
            sales_price,
            payment_option: self.payment_option,
            finance_company: None,
            interest_rate: None,
            promotional_term: None,
            amortization: None,
            monthly_payment: None,
        };

        if !finance_active {
            return Ok(validated);
        }

        let interest_rate = self
            .interest_rate
            .map(|rate| parse_amount("interestRate", &rate))
            .transpose()?;
        if interest_rate.is_some_and(|rate| rate < 0.0) {
            return Err(DomainError::validation("interestRate must not be negative"));
        }

        let amortization = self
            .amortization
            .map(|term| parse_term("amortization", &term))
            .transpose()?;

        let supplied_payment = self
            .monthly_payment
            .map(|payment| parse_amount("monthlyPayment", &payment))
            .transpose()?;

        let computed_payment = match (interest_rate, amortization) {
            (Some(rate), Some(term)) => {
                amortization::monthly_payment(sales_price, rate, term.unsigned_abs())
            }
            _ => None,
        };

        validated.finance_company = self.finance_company;
        validated.interest_rate = interest_rate;
        validated.promotional_term = self.promotional_term;
        validated.amortization = amortization;
        validated.monthly_payment = computed_payment.or(supplied_payment);

        Ok(validated)
    }
}

impl ValidatedSubmission {
    /// Products joined the way they are stored and sent to the assistant
    pub fn products_joined(&self) -> String {
        self.products.join(", ")
    }
}

/// Accept strings, numbers and booleans; blank strings and null become `None`.
fn lenient_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de::Error;

    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    match value {
        None | Some(serde_json::Value::Null) => Ok(None),
        Some(serde_json::Value::String(s)) => {
            let trimmed = s.trim();
            Ok((!trimmed.is_empty()).then(|| trimmed.to_string()))
        }
        Some(serde_json::Value::Number(n)) => Ok(Some(n.to_string())),
        Some(serde_json::Value::Bool(b)) => Ok(Some(b.to_string())),
        Some(other) => Err(D::Error::custom(format!(
            "expected a string or number, found {}",
            other
        ))),
    }
}

fn parse_amount(field: &str, raw: &str) -> Result<f64, DomainError> {
    let cleaned: String = raw
        .chars()
        .filter(|c| !matches!(c, '$' | ',' | '%') && !c.is_whitespace())
        .collect();

    cleaned
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| DomainError::validation(format!("{} is not a number: {}", field, raw)))
}

fn parse_term(field: &str, raw: &str) -> Result<i32, DomainError> {
    let digits: String = raw
        .trim()
        .chars()
        .take_while(|c| c.is_ascii_digit())
        .collect();

    match digits.parse::<i32>() {
        Ok(months) if months > 0 => Ok(months),
        _ => Err(DomainError::validation(format!(
            "{} must be a positive number of months: {}",
            field, raw
        ))),
    }
}

fn split_name(full: &str) -> (Option<String>, Option<String>) {
    match full.trim().split_once(char::is_whitespace) {
        Some((first, last)) => (Some(first.to_string()), Some(last.trim().to_string())),
        None => (Some(full.trim().to_string()), None),
    }
}
