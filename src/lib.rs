pub mod actions;
pub mod api;
pub mod config;
pub mod error;
pub mod models;
pub mod presentation;
pub mod view;

pub use actions::{OrderAction, ViewerRelation, available_actions};
pub use api::OrderApi;
pub use config::OrderApiConfig;
pub use error::OrderClientError;
pub use presentation::{StatusBadge, order_status_badge, payment_status_badge};
pub use view::{OrderScreen, OrderView};
