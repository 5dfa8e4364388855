//! Order detail view-model.
//!
//! Composes the fetcher, the badge maps, and the role-gated action set
//! into the state one order detail screen renders from. The screen never
//! predicts a status locally: every dispatch is exactly one mutating
//! call followed by a full refetch, and on any failure the previously
//! loaded view is left untouched.

use url::Url;
use uuid::Uuid;

use crate::actions::{self, OrderAction, ViewerRelation};
use crate::api::OrderApi;
use crate::error::OrderClientError;
use crate::models::orders::{
    DeliverableFile, Order, RequestRevision, SubmitDelivery, SubmitReview,
};
use crate::presentation::{self, StatusBadge};

/// Everything the order detail screen renders for one order: the
/// server-confirmed order, the viewer's relation to it, both badges, and
/// the ordered action row.
#[derive(Debug, Clone)]
pub struct OrderView {
    pub order: Order,
    pub relation: ViewerRelation,
    pub status_badge: StatusBadge,
    pub payment_badge: StatusBadge,
    pub actions: Vec<OrderAction>,
}

impl OrderView {
    fn of(order: Order, viewer_id: Uuid) -> Self {
        let relation = ViewerRelation::of(&order, viewer_id);
        Self {
            relation,
            status_badge: presentation::order_status_badge(order.status),
            payment_badge: presentation::payment_status_badge(order.payment_status),
            actions: actions::available_actions(order.status, order.payment_status, relation),
            order,
        }
    }

    /// Whether the action row currently offers `action` to this viewer.
    pub fn offers(&self, action: OrderAction) -> bool {
        self.actions.contains(&action)
    }

    /// Chat link target, if the order has a conversation thread.
    pub fn conversation_id(&self) -> Option<Uuid> {
        self.order.conversation_id
    }
}

/// One order detail screen for one authenticated viewer.
///
/// The loaded [`OrderView`] is owned exclusively by this screen; the only
/// synchronization mechanism is refetch-after-mutation. State is assigned
/// only after a fetch fully completes, so a dropped (cancelled) future
/// never leaves a partially-applied view.
pub struct OrderScreen {
    api: OrderApi,
    viewer_id: Uuid,
    state: Option<OrderView>,
    in_flight: bool,
}

impl OrderScreen {
    pub fn new(api: OrderApi, viewer_id: Uuid) -> Self {
        Self {
            api,
            viewer_id,
            state: None,
            in_flight: false,
        }
    }

    /// The last server-confirmed view, if an order has been loaded.
    pub fn view(&self) -> Option<&OrderView> {
        self.state.as_ref()
    }

    /// True while a dispatch is in flight — the caller disables the
    /// action controls for the duration.
    pub fn is_busy(&self) -> bool {
        self.in_flight
    }

    /// Fetch `order_id` and (re)build the view from the response.
    ///
    /// On error the previous state is kept; `NotFound` and `AccessDenied`
    /// are the caller's cue to leave this screen for the orders listing
    /// (see [`OrderClientError::redirects_away`]).
    pub async fn load(&mut self, order_id: Uuid) -> Result<&OrderView, OrderClientError> {
        let order = self.api.fetch_order(order_id).await?;
        self.in_flight = false;
        Ok(self.state.insert(OrderView::of(order, self.viewer_id)))
    }

    /// Freelancer accepts a pending order.
    pub async fn accept(&mut self) -> Result<&OrderView, OrderClientError> {
        let id = self.begin_dispatch()?;
        let result = self.api.accept_order(id).await;
        self.finish_dispatch(id, result).await
    }

    /// Freelancer starts work on an accepted order.
    pub async fn start_work(&mut self) -> Result<&OrderView, OrderClientError> {
        let id = self.begin_dispatch()?;
        let result = self.api.start_work(id).await;
        self.finish_dispatch(id, result).await
    }

    /// Freelancer submits a deliverable. The title must be non-empty;
    /// validation failures never reach the network.
    pub async fn submit_delivery(
        &mut self,
        delivery: SubmitDelivery,
    ) -> Result<&OrderView, OrderClientError> {
        if delivery.title.trim().is_empty() {
            return Err(OrderClientError::Validation(
                "deliverable title cannot be empty".into(),
            ));
        }
        let id = self.begin_dispatch()?;
        let result = self.api.submit_delivery(id, &delivery).await;
        self.finish_dispatch(id, result).await
    }

    /// Client approves the delivery, optionally leaving a review first.
    ///
    /// The review is a non-critical side effect: if it fails (or carries
    /// an out-of-range rating) the failure is logged and the approval
    /// proceeds anyway — payment release must not block on the review
    /// system. The approval itself is not rolled back either way.
    pub async fn approve(
        &mut self,
        review: Option<SubmitReview>,
    ) -> Result<&OrderView, OrderClientError> {
        let id = self.begin_dispatch()?;

        if let Some(review) = review {
            if !(1..=5).contains(&review.rating) {
                tracing::warn!(
                    order_id = %id,
                    rating = review.rating,
                    "review rating out of range, skipping review"
                );
            } else if let Err(e) = self.api.submit_review(id, &review).await {
                tracing::warn!(order_id = %id, error = %e, "review failed, approving anyway");
            }
        }

        let result = self.api.approve_delivery(id).await;
        self.finish_dispatch(id, result).await
    }

    /// Client sends the delivery back for revision. An empty reason is
    /// rejected client-side before any dispatch.
    pub async fn request_revision(
        &mut self,
        reason: &str,
    ) -> Result<&OrderView, OrderClientError> {
        let reason = reason.trim();
        if reason.is_empty() {
            return Err(OrderClientError::Validation(
                "revision reason cannot be empty".into(),
            ));
        }
        let id = self.begin_dispatch()?;
        let payload = RequestRevision {
            reason: reason.to_string(),
        };
        let result = self.api.request_revision(id, &payload).await;
        self.finish_dispatch(id, result).await
    }

    /// Download URL for a deliverable file, resolved against the order
    /// service's static route.
    pub fn file_url(&self, file: &DeliverableFile) -> Result<Url, url::ParseError> {
        file.download_url(self.api.base_url())
    }

    fn begin_dispatch(&mut self) -> Result<Uuid, OrderClientError> {
        if self.in_flight {
            return Err(OrderClientError::DispatchInFlight);
        }
        let id = self
            .state
            .as_ref()
            .ok_or_else(|| OrderClientError::Validation("no order is loaded".into()))?
            .order
            .id;
        self.in_flight = true;
        Ok(id)
    }

    /// Complete a dispatch: on success refetch and rebuild the view from
    /// the server's answer, on failure keep the prior view and re-enable
    /// the controls.
    async fn finish_dispatch(
        &mut self,
        id: Uuid,
        result: Result<(), OrderClientError>,
    ) -> Result<&OrderView, OrderClientError> {
        match result {
            Ok(()) => {
                let refreshed = self.api.fetch_order(id).await;
                self.in_flight = false;
                let order = refreshed?;
                Ok(self.state.insert(OrderView::of(order, self.viewer_id)))
            }
            Err(e) => {
                self.in_flight = false;
                Err(e)
            }
        }
    }
}
