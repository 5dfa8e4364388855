//! Role-gated action set for the order detail view.
//!
//! The set of legal viewer actions is a pure function of
//! (order status, payment status, viewer relation) — never of any other
//! client state. Two viewers looking at the same order at the same
//! instant compute identical action sets.

use uuid::Uuid;

use crate::models::orders::{Order, OrderStatus, PaymentStatus};

/// Whether the current authenticated user is the order's client, its
/// freelancer, or neither.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewerRelation {
    Client,
    Freelancer,
    /// Neither party — sees no actions (read-only or access-denied,
    /// enforced upstream by the order service).
    Observer,
}

impl ViewerRelation {
    /// Derive the relation from the order's party ids.
    ///
    /// Self-orders are prevented server-side, so client and freelancer
    /// ids never collide; client wins if they ever did.
    pub fn of(order: &Order, viewer_id: Uuid) -> Self {
        if order.client_id == viewer_id {
            ViewerRelation::Client
        } else if order.freelancer_id == viewer_id {
            ViewerRelation::Freelancer
        } else {
            ViewerRelation::Observer
        }
    }
}

/// A primary action the view may present for an order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrderAction {
    AcceptOrder,
    StartWork,
    DeliverWork,
    ApproveAndReleasePayment,
    RequestRevision,
    PayNow,
}

impl OrderAction {
    /// Button label as shown in the view.
    pub fn label(&self) -> &'static str {
        match self {
            OrderAction::AcceptOrder => "Accept Order",
            OrderAction::StartWork => "Start Work",
            OrderAction::DeliverWork => "Deliver Work",
            OrderAction::ApproveAndReleasePayment => "Approve & Release Payment",
            OrderAction::RequestRevision => "Request Revision",
            OrderAction::PayNow => "Pay Now",
        }
    }
}

/// The ordered list of actions to present to a viewer.
///
/// This is a lookup table, not a heuristic: statuses are matched
/// exhaustively (no wildcard arm) so that a new status variant is a
/// compile error here rather than a silently empty button row.
pub fn available_actions(
    status: OrderStatus,
    payment: PaymentStatus,
    relation: ViewerRelation,
) -> Vec<OrderAction> {
    let mut actions = match relation {
        ViewerRelation::Observer => return Vec::new(),
        ViewerRelation::Freelancer => match status {
            OrderStatus::Pending => vec![OrderAction::AcceptOrder],
            OrderStatus::Accepted => vec![OrderAction::StartWork],
            // Delivery requires the escrow to be funded.
            OrderStatus::InProgress | OrderStatus::RevisionRequested
                if payment == PaymentStatus::Paid =>
            {
                vec![OrderAction::DeliverWork]
            }
            OrderStatus::InProgress
            | OrderStatus::RevisionRequested
            | OrderStatus::Delivered
            | OrderStatus::AwaitingApproval
            | OrderStatus::Completed
            | OrderStatus::Cancelled
            | OrderStatus::Disputed
            | OrderStatus::Refunded
            | OrderStatus::Unknown => Vec::new(),
        },
        ViewerRelation::Client => match status {
            OrderStatus::Delivered => vec![
                OrderAction::ApproveAndReleasePayment,
                OrderAction::RequestRevision,
            ],
            OrderStatus::Pending
            | OrderStatus::Accepted
            | OrderStatus::InProgress
            | OrderStatus::RevisionRequested
            | OrderStatus::AwaitingApproval
            | OrderStatus::Completed
            | OrderStatus::Cancelled
            | OrderStatus::Disputed
            | OrderStatus::Refunded
            | OrderStatus::Unknown => Vec::new(),
        },
    };

    // Pay Now is shown additively to the client whenever payment is still
    // due, independent of the lifecycle status.
    if relation == ViewerRelation::Client && payment == PaymentStatus::Pending {
        actions.push(OrderAction::PayNow);
    }

    actions
}
