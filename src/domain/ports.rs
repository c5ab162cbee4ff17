use crate::domain::model::{BookingRequest, BookingResult, CustomerProfile};
use crate::utils::error::Result;
use async_trait::async_trait;

/// Key/value store holding the serialized cart between sessions.
pub trait CartRepository: Send + Sync {
    fn get(&self, key: &str) -> impl std::future::Future<Output = Result<Option<String>>> + Send;
    fn set(&self, key: &str, value: &str) -> impl std::future::Future<Output = Result<()>> + Send;
    fn clear(&self, key: &str) -> impl std::future::Future<Output = Result<()>> + Send;
}

#[async_trait]
pub trait BookingGateway: Send + Sync {
    async fn create_booking(&self, request: &BookingRequest) -> Result<BookingResult>;
}

#[async_trait]
pub trait ProfileProvider: Send + Sync {
    async fn fetch_profile(&self) -> Result<CustomerProfile>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationLevel {
    Success,
    Error,
    Info,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub level: NotificationLevel,
    pub message: String,
}

impl Notification {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            level: NotificationLevel::Success,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            level: NotificationLevel::Error,
            message: message.into(),
        }
    }

    pub fn info(message: impl Into<String>) -> Self {
        Self {
            level: NotificationLevel::Info,
            message: message.into(),
        }
    }
}

pub trait Notifier: Send + Sync {
    fn notify(&self, notification: Notification);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    /// Cart selection view.
    Cart,
    /// The customer's bookings list.
    Bookings,
}

pub trait Navigator: Send + Sync {
    fn navigate(&self, route: Route);
}
