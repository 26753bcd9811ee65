use crate::core::{
    AvailableTimes, BookingRequest, ConfigProvider, ContactRequest, MessageResponse, SalonApi,
    Service,
};
use crate::domain::model::ErrorBody;
use crate::utils::error::{Result, StudioError, DEFAULT_API_ERROR};
use async_trait::async_trait;
use chrono::NaiveDate;
use reqwest::{Client, Method};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:8000/api";

/// Thin JSON client for the salon API. One round trip per call, no retries.
#[derive(Debug, Clone)]
pub struct HairStudioClient {
    base_url: String,
    client: Client,
}

impl HairStudioClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            client: Client::new(),
        }
    }

    pub fn with_timeout(base_url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            client,
        })
    }

    pub fn from_config<C: ConfigProvider>(config: &C) -> Result<Self> {
        match config.request_timeout_seconds() {
            Some(secs) => Self::with_timeout(config.api_base_url(), Duration::from_secs(secs)),
            None => Ok(Self::new(config.api_base_url())),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Sends `body` (if any) as JSON to `{base}{endpoint}` and parses the reply.
    ///
    /// Non-2xx replies become [`StudioError::Api`] carrying the server's
    /// `detail`, or [`DEFAULT_API_ERROR`] when there is none.
    pub async fn call<T, B>(&self, endpoint: &str, method: Method, body: Option<&B>) -> Result<T>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let url = format!("{}{}", self.base_url, endpoint);
        tracing::debug!("{} {}", method, url);

        // 每個請求都宣告 JSON
        let request = self.client.request(method.clone(), &url);
        let request = match body {
            Some(body) => request.json(body),
            None => request.header(reqwest::header::CONTENT_TYPE, "application/json"),
        };

        let response = match request.send().await {
            Ok(response) => response,
            Err(e) => {
                tracing::error!("API Error: {} {} failed: {}", method, url, e);
                return Err(e.into());
            }
        };

        let status = response.status();
        tracing::debug!("API response status: {}", status);
        let bytes = response.bytes().await?;

        if !status.is_success() {
            let message = serde_json::from_slice::<ErrorBody>(&bytes)
                .ok()
                .and_then(|body| body.message())
                .unwrap_or_else(|| DEFAULT_API_ERROR.to_string());
            tracing::error!("API Error: {} {} -> {}: {}", method, url, status, message);
            return Err(StudioError::api(status.as_u16(), message));
        }

        serde_json::from_slice(&bytes).map_err(|e| {
            tracing::error!("API Error: {} {} returned invalid JSON: {}", method, url, e);
            StudioError::from(e)
        })
    }

    async fn get<T: DeserializeOwned>(&self, endpoint: &str) -> Result<T> {
        self.call::<T, ()>(endpoint, Method::GET, None).await
    }

    async fn post<T: DeserializeOwned, B: Serialize>(&self, endpoint: &str, body: &B) -> Result<T> {
        self.call(endpoint, Method::POST, Some(body)).await
    }
}

impl Default for HairStudioClient {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}

#[async_trait]
impl SalonApi for HairStudioClient {
    async fn list_services(&self) -> Result<Vec<Service>> {
        self.get("/services").await
    }

    async fn get_service(&self, service_id: i64) -> Result<Service> {
        self.get(&format!("/services/{}", service_id)).await
    }

    async fn create_booking(&self, booking: &BookingRequest) -> Result<MessageResponse> {
        self.post("/bookings", booking).await
    }

    async fn send_contact(&self, contact: &ContactRequest) -> Result<MessageResponse> {
        self.post("/contact", contact).await
    }

    async fn available_times(&self, date: NaiveDate) -> Result<AvailableTimes> {
        self.get(&format!("/available-times?date={}", date.format("%Y-%m-%d")))
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;
    use serde_json::json;

    #[tokio::test]
    async fn test_list_services() {
        let server = MockServer::start();
        let api_mock = server.mock(|when, then| {
            when.method(GET)
                .path("/api/services")
                .header("Content-Type", "application/json");
            then.status(200)
                .header("Content-Type", "application/json")
                .json_body(json!([
                    {"id": 1, "name": "Cắt tóc nam", "description": "Classic cut", "price": 100000, "duration": 30},
                    {"id": 2, "name": "Nhuộm", "description": "Color", "price": "450000.00", "duration": 90}
                ]));
        });

        let client = HairStudioClient::new(server.url("/api"));
        let services = client.list_services().await.unwrap();

        api_mock.assert();
        assert_eq!(services.len(), 2);
        assert_eq!(services[1].price, 450000.0);
        assert_eq!(services[1].duration, 90);
    }

    #[tokio::test]
    async fn test_get_service_by_id() {
        let server = MockServer::start();
        let api_mock = server.mock(|when, then| {
            when.method(GET).path("/api/services/7");
            then.status(200).json_body(json!({
                "id": 7, "name": "Uốn", "description": "", "price": 300000, "duration": 120
            }));
        });

        let client = HairStudioClient::new(format!("{}/", server.url("/api")));
        let service = client.get_service(7).await.unwrap();

        api_mock.assert();
        assert_eq!(service.id, 7);
        assert_eq!(service.name, "Uốn");
    }

    #[tokio::test]
    async fn test_create_booking_posts_json_body() {
        let server = MockServer::start();
        let api_mock = server.mock(|when, then| {
            when.method(POST)
                .path("/api/bookings")
                .header("content-type", "application/json")
                .json_body(json!({
                "name": "A", "phone": "0900000000", "email": "a@x.com",
                "service_id": 3, "date": "2024-05-01", "time": "10:00", "message": ""
            }));
            then.status(200).json_body(json!({"message": "Đặt lịch thành công!"}));
        });

        let client = HairStudioClient::new(server.url("/api"));
        let result = client
            .create_booking(&BookingRequest {
                name: "A".to_string(),
                phone: "0900000000".to_string(),
                email: "a@x.com".to_string(),
                service_id: 3,
                date: "2024-05-01".to_string(),
                time: "10:00".to_string(),
                message: Some(String::new()),
            })
            .await
            .unwrap();

        api_mock.assert();
        assert_eq!(result.message, "Đặt lịch thành công!");
    }

    #[tokio::test]
    async fn test_available_times_uses_date_query() {
        let server = MockServer::start();
        let api_mock = server.mock(|when, then| {
            when.method(GET)
                .path("/api/available-times")
                .query_param("date", "2024-05-01");
            then.status(200)
                .json_body(json!({"available_times": ["09:00", "10:00"]}));
        });

        let client = HairStudioClient::new(server.url("/api"));
        let date = NaiveDate::from_ymd_opt(2024, 5, 1).unwrap();
        let result = client.available_times(date).await.unwrap();

        api_mock.assert();
        assert_eq!(result.available_times, vec!["09:00", "10:00"]);
    }

    #[tokio::test]
    async fn test_error_detail_becomes_message() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(POST).path("/api/contact");
            then.status(400).json_body(json!({"detail": "Email không hợp lệ"}));
        });

        let client = HairStudioClient::new(server.url("/api"));
        let err = client
            .send_contact(&ContactRequest {
                name: "B".to_string(),
                email: "bad".to_string(),
                subject: "Hi".to_string(),
                message: "Hello".to_string(),
            })
            .await
            .unwrap_err();

        match err {
            StudioError::Api { status, message } => {
                assert_eq!(status, 400);
                assert_eq!(message, "Email không hợp lệ");
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_error_without_detail_uses_fallback() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/api/services");
            then.status(500).body("Internal Server Error");
        });

        let client = HairStudioClient::new(server.url("/api"));
        let err = client.list_services().await.unwrap_err();

        assert_eq!(err.user_message(), DEFAULT_API_ERROR);
    }

    #[tokio::test]
    async fn test_success_with_non_json_body_is_decode_error() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/api/services");
            then.status(200).body("<html></html>");
        });

        let client = HairStudioClient::new(server.url("/api"));
        let err = client.list_services().await.unwrap_err();

        assert!(matches!(err, StudioError::Decode(_)));
    }

    #[tokio::test]
    async fn test_unreachable_server_is_transport_error() {
        // Port 9 (discard) is closed on test machines.
        let client = HairStudioClient::new("http://127.0.0.1:9/api");
        let err = client.list_services().await.unwrap_err();

        assert!(matches!(err, StudioError::Transport(_)));
        assert_eq!(
            err.user_message(),
            "Không thể kết nối tới máy chủ đặt lịch"
        );
    }
}
