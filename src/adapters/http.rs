use crate::config::toml_config::ApiConfig;
use crate::domain::model::{BookingRequest, BookingResult, CustomerProfile, ProfileEnvelope};
use crate::domain::ports::{BookingGateway, ProfileProvider};
use crate::utils::error::{BookingError, Result};
use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;

/// Thin client for the booking backend. Cheap to clone.
#[derive(Debug, Clone)]
pub struct ApiClient {
    client: Client,
    base_url: String,
    booking_path: String,
    profile_path: String,
    auth_token: Option<String>,
}

impl ApiClient {
    pub fn new(config: &ApiConfig) -> Result<Self> {
        let mut builder = Client::builder();
        if let Some(timeout) = config.timeout_seconds {
            builder = builder.timeout(Duration::from_secs(timeout));
        }
        let client = builder.build()?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            booking_path: config.booking_path().to_string(),
            profile_path: config.profile_path().to_string(),
            auth_token: config.auth_token.clone(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn authorize(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match &self.auth_token {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }
}

#[async_trait]
impl BookingGateway for ApiClient {
    async fn create_booking(&self, request: &BookingRequest) -> Result<BookingResult> {
        let url = self.url(&self.booking_path);
        tracing::debug!(
            "POST {} for service {} ({})",
            url,
            request.service_type_id,
            request.room_size
        );

        let response = self
            .authorize(self.client.post(&url))
            .json(request)
            .send()
            .await?;
        let status = response.status();
        let body = response.text().await?;
        tracing::debug!("Booking response status: {}", status);

        // 後端失敗時也可能回 JSON 的 status 欄位
        match serde_json::from_str::<BookingResult>(&body) {
            Ok(result) => Ok(result),
            Err(_) if !status.is_success() => Err(BookingError::UnexpectedStatus {
                status: status.as_u16(),
                body,
            }),
            Err(e) => Err(BookingError::SerializationError(e)),
        }
    }
}

#[async_trait]
impl ProfileProvider for ApiClient {
    async fn fetch_profile(&self) -> Result<CustomerProfile> {
        let url = self.url(&self.profile_path);
        tracing::debug!("GET {}", url);

        let response = self.authorize(self.client.get(&url)).send().await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(BookingError::UnexpectedStatus {
                status: status.as_u16(),
                body,
            });
        }

        let envelope: ProfileEnvelope = response.json().await?;
        match envelope {
            ProfileEnvelope {
                status,
                data: Some(profile),
                ..
            } if status == "success" => Ok(profile),
            ProfileEnvelope {
                status, message, ..
            } => Err(BookingError::UnexpectedStatus {
                status: 200,
                body: message.unwrap_or_else(|| format!("profile status '{}'", status)),
            }),
        }
    }
}
