//! Status badge lookup for the order detail and order list views.
//!
//! Both maps are total and stateless: every enum value (including the
//! forward-compatible `Unknown`) yields a defined badge, and an unknown
//! status renders as PENDING rather than failing.

use crate::models::orders::{OrderStatus, PaymentStatus};

/// A rendered status badge: display label plus the style class the
/// frontend attaches to it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatusBadge {
    pub label: &'static str,
    pub style: &'static str,
}

const ORDER_PENDING: StatusBadge = StatusBadge {
    label: "Pending",
    style: "bg-yellow-100 text-yellow-800",
};

/// Badge for an order lifecycle status.
pub fn order_status_badge(status: OrderStatus) -> StatusBadge {
    match status {
        OrderStatus::Pending => ORDER_PENDING,
        OrderStatus::Accepted => StatusBadge {
            label: "Accepted",
            style: "bg-sky-100 text-sky-800",
        },
        OrderStatus::InProgress => StatusBadge {
            label: "In Progress",
            style: "bg-blue-100 text-blue-800",
        },
        OrderStatus::Delivered => StatusBadge {
            label: "Delivered",
            style: "bg-purple-100 text-purple-800",
        },
        OrderStatus::RevisionRequested => StatusBadge {
            label: "Revision Requested",
            style: "bg-orange-100 text-orange-800",
        },
        OrderStatus::AwaitingApproval => StatusBadge {
            label: "Awaiting Approval",
            style: "bg-indigo-100 text-indigo-800",
        },
        OrderStatus::Completed => StatusBadge {
            label: "Completed",
            style: "bg-green-100 text-green-800",
        },
        OrderStatus::Cancelled => StatusBadge {
            label: "Cancelled",
            style: "bg-gray-100 text-gray-800",
        },
        OrderStatus::Disputed => StatusBadge {
            label: "Disputed",
            style: "bg-red-100 text-red-800",
        },
        OrderStatus::Refunded => StatusBadge {
            label: "Refunded",
            style: "bg-rose-100 text-rose-800",
        },
        OrderStatus::Unknown => ORDER_PENDING,
    }
}

const PAYMENT_PENDING: StatusBadge = StatusBadge {
    label: "Payment Pending",
    style: "bg-yellow-100 text-yellow-800",
};

/// Badge for a payment status.
pub fn payment_status_badge(status: PaymentStatus) -> StatusBadge {
    match status {
        PaymentStatus::Pending => PAYMENT_PENDING,
        PaymentStatus::Paid => StatusBadge {
            label: "In Escrow",
            style: "bg-blue-100 text-blue-800",
        },
        PaymentStatus::Released => StatusBadge {
            label: "Released",
            style: "bg-green-100 text-green-800",
        },
        PaymentStatus::Refunded => StatusBadge {
            label: "Refunded",
            style: "bg-rose-100 text-rose-800",
        },
        PaymentStatus::Unknown => PAYMENT_PENDING,
    }
}
