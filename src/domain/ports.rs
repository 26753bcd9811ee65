use crate::domain::model::{AvailableTimes, BookingRequest, ContactRequest, MessageResponse, Service};
use crate::utils::error::Result;
use async_trait::async_trait;
use chrono::NaiveDate;

/// Operations of the remote booking API.
#[async_trait]
pub trait SalonApi: Send + Sync {
    async fn list_services(&self) -> Result<Vec<Service>>;
    async fn get_service(&self, service_id: i64) -> Result<Service>;
    async fn create_booking(&self, booking: &BookingRequest) -> Result<MessageResponse>;
    async fn send_contact(&self, contact: &ContactRequest) -> Result<MessageResponse>;
    async fn available_times(&self, date: NaiveDate) -> Result<AvailableTimes>;
}

/// String key/value storage that survives navigation (browser `localStorage`).
pub trait SelectionStore: Send + Sync {
    fn get_item(&self, key: &str) -> Result<Option<String>>;
    fn set_item(&self, key: &str, value: &str) -> Result<()>;
    fn remove_item(&self, key: &str) -> Result<()>;
}

pub trait ConfigProvider: Send + Sync {
    fn api_base_url(&self) -> &str;
    fn storage_path(&self) -> &str;
    fn request_timeout_seconds(&self) -> Option<u64>;
    fn dismiss_after_seconds(&self) -> u64;
}
