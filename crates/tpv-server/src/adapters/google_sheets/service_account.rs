//! Service-account OAuth flow
//!
//! A short-lived RS256 JWT assertion is exchanged for a bearer access token
//! at the Google token endpoint.

use chrono::Utc;
use jsonwebtoken::{Algorithm, EncodingKey, Header};
use reqwest::Client;
use serde::{Deserialize, Serialize};

use tpv::DomainError;

pub const TOKEN_URL: &str = "https://oauth2.googleapis.com/token";
pub const SHEETS_SCOPE: &str = "https://www.googleapis.com/auth/spreadsheets";
const JWT_BEARER_GRANT: &str = "urn:ietf:params:oauth:grant-type:jwt-bearer";
const ASSERTION_TTL_SECS: i64 = 3600;

#[derive(Debug, Serialize, Deserialize)]
pub(crate) struct AssertionClaims {
    pub iss: String,
    pub scope: String,
    pub aud: String,
    pub iat: i64,
    pub exp: i64,
}

#[derive(Deserialize)]
struct TokenResponse {
    access_token: Option<String>,
}

pub struct ServiceAccountAuth {
    client: Client,
    client_email: String,
    private_key: String,
    token_url: String,
}

impl ServiceAccountAuth {
    pub fn new(client: Client, client_email: String, private_key: String) -> Self {
        Self {
            client,
            client_email,
            private_key,
            token_url: TOKEN_URL.to_string(),
        }
    }

    /// Signed assertion valid for one hour from `iat`.
    pub fn sign_assertion(&self, iat: i64) -> Result<String, DomainError> {
        let key = EncodingKey::from_rsa_pem(self.private_key.as_bytes())
            .map_err(|e| DomainError::Auth(format!("Invalid service account key: {e}")))?;

        let claims = AssertionClaims {
            iss: self.client_email.clone(),
            scope: SHEETS_SCOPE.to_string(),
            aud: self.token_url.clone(),
            iat,
            exp: iat + ASSERTION_TTL_SECS,
        };

        jsonwebtoken::encode(&Header::new(Algorithm::RS256), &claims, &key)
            .map_err(|e| DomainError::Auth(format!("Failed to sign assertion: {e}")))
    }

    /// Fresh access token; nothing is cached between syncs.
    pub async fn access_token(&self) -> Result<String, DomainError> {
        let assertion = self.sign_assertion(Utc::now().timestamp())?;

        let response = self
            .client
            .post(&self.token_url)
            .form(&[("grant_type", JWT_BEARER_GRANT), ("assertion", assertion.as_str())])
            .send()
            .await
            .map_err(|e| DomainError::Auth(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            return Err(DomainError::Auth(format!(
                "Token exchange failed: {} - {}",
                status.as_u16(),
                text
            )));
        }

        let token: TokenResponse = response
            .json()
            .await
            .map_err(|e| DomainError::Auth(format!("Invalid token response: {e}")))?;

        token
            .access_token
            .ok_or_else(|| DomainError::Auth("Token response carries no access_token".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use jsonwebtoken::{DecodingKey, Validation};

    const PRIVATE_KEY: &str = include_str!("../../../testdata/service_account_key.pem");
    const PUBLIC_KEY: &str = include_str!("../../../testdata/service_account_pub.pem");
    const CLIENT_EMAIL: &str = "sync@tpv-project.iam.gserviceaccount.com";

    fn auth(private_key: &str) -> ServiceAccountAuth {
        ServiceAccountAuth::new(Client::new(), CLIENT_EMAIL.to_string(), private_key.to_string())
    }

    #[test]
    fn test_assertion_verifies_with_public_key() {
        let iat = Utc::now().timestamp();
        let token = auth(PRIVATE_KEY).sign_assertion(iat).unwrap();

        let mut validation = Validation::new(Algorithm::RS256);
        validation.set_audience(&[TOKEN_URL]);
        validation.set_issuer(&[CLIENT_EMAIL]);

        let decoded = jsonwebtoken::decode::<AssertionClaims>(
            &token,
            &DecodingKey::from_rsa_pem(PUBLIC_KEY.as_bytes()).unwrap(),
            &validation,
        )
        .unwrap();

        assert_eq!(decoded.header.alg, Algorithm::RS256);
        assert_eq!(decoded.claims.scope, SHEETS_SCOPE);
        assert_eq!(decoded.claims.iat, iat);
        assert_eq!(decoded.claims.exp, iat + 3600);
    }

    #[test]
    fn test_malformed_key_is_auth_error() {
        let err = auth("not a pem").sign_assertion(0).unwrap_err();
        assert!(matches!(err, DomainError::Auth(_)));
    }
}
