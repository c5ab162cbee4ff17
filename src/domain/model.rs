use serde::{Deserialize, Deserializer, Serialize};

/// One selected service configuration waiting to be booked.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartLineItem {
    #[serde(alias = "service_type_id", deserialize_with = "string_or_number")]
    pub service_type_id: String,
    #[serde(alias = "service_type_name")]
    pub service_type_name: String,
    #[serde(alias = "room_size")]
    pub room_size: String,
    pub price: f64,
    pub quantity: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

impl CartLineItem {
    pub fn line_total(&self) -> f64 {
        self.price * f64::from(self.quantity)
    }

    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or(&self.service_type_name)
    }
}

/// 後端有時回傳數字 id，有時是字串
fn string_or_number<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Repr {
        Str(String),
        Int(i64),
        Float(f64),
    }

    Ok(match Repr::deserialize(deserializer)? {
        Repr::Str(s) => s,
        Repr::Int(n) => n.to_string(),
        Repr::Float(n) => n.to_string(),
    })
}

pub fn cart_total(items: &[CartLineItem]) -> f64 {
    items.iter().map(CartLineItem::line_total).sum()
}

/// State handed over by the page that navigated into the booking flow.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NavigationState {
    #[serde(default)]
    pub cart_items: Vec<CartLineItem>,
    #[serde(default)]
    pub total_amount: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CartSource {
    Navigation,
    Persisted,
}

/// Normalized (items, total) pair the booking flow works on.
#[derive(Debug, Clone, PartialEq)]
pub struct CartSnapshot {
    pub items: Vec<CartLineItem>,
    pub total: f64,
    pub source: CartSource,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CustomerProfile {
    #[serde(default)]
    pub customer_name: String,
    #[serde(default)]
    pub email_id: String,
    #[serde(default)]
    pub mobile_number: String,
    #[serde(default)]
    pub profile_pic: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ProfileEnvelope {
    pub status: String,
    #[serde(default)]
    pub data: Option<CustomerProfile>,
    #[serde(default)]
    pub message: Option<String>,
}

/// Body of a single booking creation call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BookingRequest {
    pub customer_name: String,
    pub mobile_number: String,
    pub email_id: String,
    pub address: String,
    pub city: String,
    pub state: String,
    pub pincode: String,
    pub preferred_date: String,
    pub preferred_time: String,
    pub additional_notes: String,
    pub service_type_id: String,
    pub service_type_name: String,
    pub room_size: String,
    pub price: f64,
    pub quantity: u32,
    pub total_amount: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BookingResult {
    pub status: String,
    #[serde(default)]
    pub message: Option<String>,
}

impl BookingResult {
    pub fn is_success(&self) -> bool {
        self.status == "success"
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum FailureReason {
    /// Backend answered but did not report success.
    Rejected {
        status: String,
        message: Option<String>,
    },
    /// Request never produced a usable answer.
    Transport(String),
}

impl std::fmt::Display for FailureReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FailureReason::Rejected {
                status,
                message: Some(message),
            } => write!(f, "rejected with status '{}': {}", status, message),
            FailureReason::Rejected { status, .. } => {
                write!(f, "rejected with status '{}'", status)
            }
            FailureReason::Transport(e) => write!(f, "transport error: {}", e),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct BatchResult {
    pub succeeded: Vec<CartLineItem>,
    pub failed: Vec<(CartLineItem, FailureReason)>,
}

impl BatchResult {
    pub fn is_complete_success(&self) -> bool {
        self.failed.is_empty() && !self.succeeded.is_empty()
    }

    pub fn attempted(&self) -> usize {
        self.succeeded.len() + self.failed.len()
    }
}
