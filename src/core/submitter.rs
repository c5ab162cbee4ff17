use crate::core::BookingGateway;
use crate::domain::model::{
    BatchResult, BookingRequest, CartLineItem, CustomerProfile, FailureReason,
};
use chrono::NaiveDate;
use futures::future::join_all;

pub const DEFAULT_PLACEHOLDER: &str = "To be filled";
pub const DEFAULT_PREFERRED_TIME: &str = "10:00 AM";

/// Values written into the scheduling and location fields the cart flow does not collect.
#[derive(Debug, Clone, PartialEq)]
pub struct BookingDefaults {
    pub placeholder: String,
    pub preferred_time: String,
    pub notes: Option<String>,
}

impl Default for BookingDefaults {
    fn default() -> Self {
        Self {
            placeholder: DEFAULT_PLACEHOLDER.to_string(),
            preferred_time: DEFAULT_PREFERRED_TIME.to_string(),
            notes: None,
        }
    }
}

pub fn build_request(
    item: &CartLineItem,
    profile: &CustomerProfile,
    defaults: &BookingDefaults,
    preferred_date: NaiveDate,
) -> BookingRequest {
    let additional_notes = match &defaults.notes {
        Some(notes) => notes.clone(),
        None => format!("{} ({}) x{}", item.display_name(), item.room_size, item.quantity),
    };

    BookingRequest {
        customer_name: profile.customer_name.clone(),
        mobile_number: profile.mobile_number.clone(),
        email_id: profile.email_id.clone(),
        address: defaults.placeholder.clone(),
        city: defaults.placeholder.clone(),
        state: defaults.placeholder.clone(),
        pincode: defaults.placeholder.clone(),
        preferred_date: preferred_date.format("%Y-%m-%d").to_string(),
        preferred_time: defaults.preferred_time.clone(),
        additional_notes,
        service_type_id: item.service_type_id.clone(),
        service_type_name: item.service_type_name.clone(),
        room_size: item.room_size.clone(),
        price: item.price,
        quantity: item.quantity,
        total_amount: item.line_total(),
    }
}

pub struct BookingSubmitter<G: BookingGateway> {
    gateway: G,
    defaults: BookingDefaults,
}

impl<G: BookingGateway> BookingSubmitter<G> {
    pub fn new(gateway: G, defaults: BookingDefaults) -> Self {
        Self { gateway, defaults }
    }

    pub fn gateway(&self) -> &G {
        &self.gateway
    }

    pub async fn submit(&self, items: &[CartLineItem], profile: &CustomerProfile) -> BatchResult {
        let today = chrono::Local::now().date_naive();
        self.submit_for_date(items, profile, today).await
    }

    /// Sends every request at once and waits for all of them.
    /// Results line up with `items` by position.
    pub async fn submit_for_date(
        &self,
        items: &[CartLineItem],
        profile: &CustomerProfile,
        preferred_date: NaiveDate,
    ) -> BatchResult {
        let requests: Vec<BookingRequest> = items
            .iter()
            .map(|item| build_request(item, profile, &self.defaults, preferred_date))
            .collect();

        tracing::info!("📤 Submitting {} booking request(s)", requests.len());
        let responses = join_all(
            requests
                .iter()
                .map(|request| self.gateway.create_booking(request)),
        )
        .await;

        let mut batch = BatchResult::default();
        for (item, response) in items.iter().zip(responses) {
            match response {
                Ok(result) if result.is_success() => {
                    tracing::debug!("✅ Booked {} ({})", item.display_name(), item.room_size);
                    batch.succeeded.push(item.clone());
                }
                Ok(result) => {
                    let reason = FailureReason::Rejected {
                        status: result.status,
                        message: result.message,
                    };
                    tracing::warn!("❌ Booking for {} {}", item.display_name(), reason);
                    batch.failed.push((item.clone(), reason));
                }
                Err(e) => {
                    let reason = FailureReason::Transport(e.to_string());
                    tracing::warn!("❌ Booking for {} failed: {}", item.display_name(), reason);
                    batch.failed.push((item.clone(), reason));
                }
            }
        }

        tracing::info!(
            "📥 Booking batch finished: {} succeeded, {} failed",
            batch.succeeded.len(),
            batch.failed.len()
        );
        batch
    }
}
