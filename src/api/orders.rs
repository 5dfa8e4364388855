//! Order operations: one fetch, one call per lifecycle transition.
//!
//! Transition calls return `Ok(())` only — the caller resynchronizes by
//! refetching the order, never by trusting a locally-predicted status.

use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

use super::OrderApi;
use crate::error::OrderClientError;
use crate::models::PaginationQuery;
use crate::models::orders::{Order, RequestRevision, SubmitDelivery, SubmitReview};

/// Acknowledgement envelope returned by mutation endpoints.
///
/// Kept tolerant: a bare `200 OK` with an empty body still counts as
/// success, and the returned order snapshot (if any) is deliberately
/// ignored in favor of the follow-up fetch.
#[derive(Debug, Deserialize)]
struct MutationAck {
    #[serde(default = "default_true")]
    success: bool,
    #[serde(default)]
    message: Option<String>,
}

fn default_true() -> bool {
    true
}

/// Error body shape used by the order service for rejected requests.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: String,
}

/// Normalize the two envelope shapes the order service is known to use
/// for single-order responses: `{data: {order}}` and `{order}`.
///
/// This is the only place that understands the envelope; if the backend
/// contract changes, it changes here.
fn order_from_envelope(endpoint: &str, value: Value) -> Result<Order, OrderClientError> {
    let node = value
        .pointer("/data/order")
        .or_else(|| value.get("order"))
        .cloned()
        .ok_or_else(|| OrderClientError::UnexpectedResponse {
            endpoint: endpoint.to_string(),
            detail: "no `order` field in response".into(),
        })?;

    serde_json::from_value(node).map_err(|e| OrderClientError::Deserialization {
        endpoint: endpoint.to_string(),
        source: e,
    })
}

/// Same normalization for list responses: `{data: {orders}}` and `{orders}`.
fn orders_from_envelope(endpoint: &str, value: Value) -> Result<Vec<Order>, OrderClientError> {
    let node = value
        .pointer("/data/orders")
        .or_else(|| value.get("orders"))
        .cloned()
        .ok_or_else(|| OrderClientError::UnexpectedResponse {
            endpoint: endpoint.to_string(),
            detail: "no `orders` field in response".into(),
        })?;

    serde_json::from_value(node).map_err(|e| OrderClientError::Deserialization {
        endpoint: endpoint.to_string(),
        source: e,
    })
}

impl OrderApi {
    /// GET /api/orders/{id} — fetch one order and normalize its envelope.
    ///
    /// 403 means the viewer is neither party to the order; 404 means the
    /// id is invalid or hidden. Neither is retried.
    pub async fn fetch_order(&self, id: Uuid) -> Result<Order, OrderClientError> {
        let endpoint = format!("GET /orders/{id}");
        let url = format!("{}api/orders/{id}", self.base_url);

        let resp = self
            .http
            .get(&url)
            .send()
            .await
            .map_err(|e| OrderClientError::Http {
                endpoint: endpoint.clone(),
                source: e,
            })?;

        match resp.status() {
            StatusCode::FORBIDDEN => return Err(OrderClientError::AccessDenied),
            StatusCode::NOT_FOUND => return Err(OrderClientError::NotFound(id)),
            status if !status.is_success() => {
                let body = resp.text().await.unwrap_or_default();
                return Err(OrderClientError::Api {
                    endpoint,
                    status: status.as_u16(),
                    body,
                });
            }
            _ => {}
        }

        let value: Value = resp
            .json()
            .await
            .map_err(|e| OrderClientError::Http {
                endpoint: endpoint.clone(),
                source: e,
            })?;

        order_from_envelope(&endpoint, value)
    }

    /// GET /api/orders — list the viewer's orders (as client or
    /// freelancer, merged server-side), paginated.
    pub async fn list_orders(
        &self,
        pagination: PaginationQuery,
    ) -> Result<Vec<Order>, OrderClientError> {
        let endpoint = "GET /orders";
        let url = format!("{}api/orders", self.base_url);

        let resp = self
            .http
            .get(&url)
            .query(&[("page", pagination.page()), ("limit", pagination.limit())])
            .send()
            .await
            .map_err(|e| OrderClientError::Http {
                endpoint: endpoint.into(),
                source: e,
            })?;

        let status = resp.status();
        if status == StatusCode::FORBIDDEN {
            return Err(OrderClientError::AccessDenied);
        }
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(OrderClientError::Api {
                endpoint: endpoint.into(),
                status: status.as_u16(),
                body,
            });
        }

        let value: Value = resp.json().await.map_err(|e| OrderClientError::Http {
            endpoint: endpoint.into(),
            source: e,
        })?;

        orders_from_envelope(endpoint, value)
    }

    /// POST /api/orders/{id}/accept — freelancer accepts a pending order.
    pub async fn accept_order(&self, id: Uuid) -> Result<(), OrderClientError> {
        self.transition(id, "accept", None::<&()>).await
    }

    /// POST /api/orders/{id}/start — freelancer starts work on an
    /// accepted order.
    pub async fn start_work(&self, id: Uuid) -> Result<(), OrderClientError> {
        self.transition(id, "start", None::<&()>).await
    }

    /// POST /api/orders/{id}/deliver — freelancer submits a deliverable.
    pub async fn submit_delivery(
        &self,
        id: Uuid,
        delivery: &SubmitDelivery,
    ) -> Result<(), OrderClientError> {
        self.transition(id, "deliver", Some(delivery)).await
    }

    /// POST /api/orders/{id}/approve — client approves the delivery,
    /// which releases the escrowed payment server-side.
    pub async fn approve_delivery(&self, id: Uuid) -> Result<(), OrderClientError> {
        self.transition(id, "approve", None::<&()>).await
    }

    /// POST /api/orders/{id}/revision — client sends the delivery back
    /// with a reason.
    pub async fn request_revision(
        &self,
        id: Uuid,
        revision: &RequestRevision,
    ) -> Result<(), OrderClientError> {
        self.transition(id, "revision", Some(revision)).await
    }

    /// POST /api/orders/{id}/review — client leaves a review.
    ///
    /// Used as an optional side effect of approval; the approve flow
    /// tolerates failures here.
    pub async fn submit_review(
        &self,
        id: Uuid,
        review: &SubmitReview,
    ) -> Result<(), OrderClientError> {
        self.transition(id, "review", Some(review)).await
    }

    /// Shared mutation call. Exactly one HTTP request; rejections carry
    /// the server's `{message}` verbatim as [`OrderClientError::Transition`].
    async fn transition<B: Serialize + ?Sized>(
        &self,
        id: Uuid,
        verb: &str,
        body: Option<&B>,
    ) -> Result<(), OrderClientError> {
        let endpoint = format!("POST /orders/{id}/{verb}");
        let url = format!("{}api/orders/{id}/{verb}", self.base_url);

        tracing::debug!(order_id = %id, verb, "dispatching order transition");

        let mut request = self.http.post(&url);
        if let Some(body) = body {
            request = request.json(body);
        }

        let resp = request.send().await.map_err(|e| OrderClientError::Http {
            endpoint: endpoint.clone(),
            source: e,
        })?;

        let status = resp.status();
        match status {
            // Any rejection that carries a `{message}` is surfaced
            // verbatim, 403/404 included: on a mutation the server's
            // wording ("Only the freelancer can accept this order") beats
            // the fixed access-denied text.
            s if s.is_client_error() => {
                let body = resp.text().await.unwrap_or_default();
                return Err(match serde_json::from_str::<ErrorBody>(&body) {
                    Ok(err) => OrderClientError::Transition { message: err.message },
                    Err(_) => match s {
                        StatusCode::FORBIDDEN => OrderClientError::AccessDenied,
                        StatusCode::NOT_FOUND => OrderClientError::NotFound(id),
                        _ => OrderClientError::Api {
                            endpoint,
                            status: s.as_u16(),
                            body,
                        },
                    },
                });
            }
            s if !s.is_success() => {
                let body = resp.text().await.unwrap_or_default();
                return Err(OrderClientError::Api {
                    endpoint,
                    status: s.as_u16(),
                    body,
                });
            }
            _ => {}
        }

        // A 2xx with `success: false` still counts as a rejection.
        let body = resp.text().await.unwrap_or_default();
        if !body.is_empty() {
            if let Ok(ack) = serde_json::from_str::<MutationAck>(&body) {
                if !ack.success {
                    return Err(OrderClientError::Transition {
                        message: ack
                            .message
                            .unwrap_or_else(|| "the order service rejected the request".into()),
                    });
                }
            }
        }

        tracing::info!(order_id = %id, verb, "order transition accepted");
        Ok(())
    }
}
