use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use url::Url;
use uuid::Uuid;

/// Order lifecycle status as served by the order service.
///
/// Transitions are server-authoritative: this client only requests a
/// transition and re-reads the result, it never computes the next status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderStatus {
    #[default]
    Pending,
    Accepted,
    InProgress,
    Delivered,
    RevisionRequested,
    AwaitingApproval,
    Completed,
    Cancelled,
    Disputed,
    Refunded,
    /// Forward-compatible catch-all for statuses the order service
    /// introduces after this client version is deployed.
    #[serde(other)]
    Unknown,
}

impl OrderStatus {
    /// Every status value, including `Unknown`, for exhaustive table tests.
    pub const ALL: [OrderStatus; 11] = [
        OrderStatus::Pending,
        OrderStatus::Accepted,
        OrderStatus::InProgress,
        OrderStatus::Delivered,
        OrderStatus::RevisionRequested,
        OrderStatus::AwaitingApproval,
        OrderStatus::Completed,
        OrderStatus::Cancelled,
        OrderStatus::Disputed,
        OrderStatus::Refunded,
        OrderStatus::Unknown,
    ];
}

/// Payment status, an independent axis from [`OrderStatus`] (an order can
/// be DELIVERED while payment is still PAID-in-escrow).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PaymentStatus {
    #[default]
    Pending,
    Paid,
    Released,
    Refunded,
    /// Forward-compatible catch-all.
    #[serde(other)]
    Unknown,
}

impl PaymentStatus {
    pub const ALL: [PaymentStatus; 5] = [
        PaymentStatus::Pending,
        PaymentStatus::Paid,
        PaymentStatus::Released,
        PaymentStatus::Refunded,
        PaymentStatus::Unknown,
    ];
}

/// A single order between a client and a freelancer.
///
/// Optional fields use `#[serde(default)]` for resilience against schema
/// evolution in the order service — `deny_unknown_fields` is intentionally
/// not used, and a missing status falls back to PENDING.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: Uuid,
    /// Human-readable order number, e.g. `WL-2026-00417`.
    pub order_number: String,
    pub client_id: Uuid,
    pub freelancer_id: Uuid,
    #[serde(default)]
    pub status: OrderStatus,
    #[serde(default)]
    pub payment_status: PaymentStatus,
    pub total_amount: f64,
    #[serde(default)]
    pub package_price: f64,
    #[serde(default)]
    pub buyer_fee: f64,
    #[serde(default)]
    pub package: Option<ServicePackage>,
    /// Append-only from the freelancer side; newest last.
    #[serde(default)]
    pub deliverables: Vec<Deliverable>,
    /// Link to the external chat thread for this order, if one exists.
    /// The chat protocol itself is not modeled here.
    #[serde(default)]
    pub conversation_id: Option<Uuid>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

/// The purchased package tier of a service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServicePackage {
    pub tier: String,
    pub price: f64,
    /// Promised delivery time in days.
    #[serde(default)]
    pub delivery_time: Option<u32>,
    /// Number of revisions included in the package.
    #[serde(default)]
    pub revisions: Option<u32>,
    #[serde(default)]
    pub features: Vec<String>,
    #[serde(default)]
    pub service: Option<ServiceSummary>,
}

/// The service a package belongs to, as embedded in order responses.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceSummary {
    pub id: Uuid,
    pub title: String,
}

/// A freelancer-submitted unit of completed work attached to an order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Deliverable {
    pub id: Uuid,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub files: Vec<DeliverableFile>,
    #[serde(default)]
    pub submitted_at: Option<DateTime<Utc>>,
}

/// A file attached to a deliverable, addressed by server-side path and
/// fetched through the `/api{path}` static route.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeliverableFile {
    pub name: String,
    /// Server-side path, always beginning with `/`.
    pub path: String,
    #[serde(default)]
    pub size: Option<u64>,
}

impl DeliverableFile {
    /// Resolve the download URL for this file against the API base URL.
    pub fn download_url(&self, base: &Url) -> Result<Url, url::ParseError> {
        base.join(&format!("api{}", self.path))
    }
}

// ── Request DTOs ──

/// Payload for `POST /api/orders/{id}/deliver`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitDelivery {
    pub title: String,
    #[serde(default)]
    pub description: String,
    /// Server-side paths of already-uploaded files (upload handling is
    /// outside this crate).
    #[serde(default)]
    pub files: Vec<String>,
}

/// Payload for `POST /api/orders/{id}/revision`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RequestRevision {
    pub reason: String,
}

/// Payload for `POST /api/orders/{id}/review` — the optional review a
/// client may attach while approving a delivery.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitReview {
    /// 1–5 stars.
    pub rating: u8,
    #[serde(default)]
    pub comment: String,
}
