use dotenv::dotenv;
use tracing_subscriber::EnvFilter;
use uuid::Uuid;
use worklane_orders::models::PaginationQuery;
use worklane_orders::{OrderApi, OrderApiConfig, OrderScreen};

/// Inspect an order from the terminal: `worklane-orders [ORDER_ID]`.
///
/// With an order id, prints the detail view (badges, deliverables, and
/// the actions the configured viewer would see). Without one, prints the
/// viewer's order listing — the same listing the detail view falls back
/// to when an order is missing or forbidden.
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into()))
        .init();

    let config = OrderApiConfig::from_env()?;
    let viewer_id: Uuid = std::env::var("WORKLANE_VIEWER_ID")
        .map_err(|_| "WORKLANE_VIEWER_ID must be set")?
        .parse()?;

    let api = OrderApi::new(config)?;

    let order_id = match std::env::args().nth(1) {
        Some(raw) => Some(raw.parse::<Uuid>()?),
        None => None,
    };

    let Some(order_id) = order_id else {
        return list_orders(&api).await;
    };

    let mut screen = OrderScreen::new(api.clone(), viewer_id);
    match screen.load(order_id).await.map(|view| view.clone()) {
        Ok(view) => {
            println!("Order {} ({})", view.order.order_number, view.order.id);
            println!(
                "  status:  {}  [{}]",
                view.status_badge.label, view.status_badge.style
            );
            println!(
                "  payment: {}  [{}]",
                view.payment_badge.label, view.payment_badge.style
            );
            println!("  total:   {:.2}", view.order.total_amount);
            println!("  viewing as {:?}", view.relation);

            if let Some(conversation) = view.conversation_id() {
                println!("  chat thread: {conversation}");
            }

            for deliverable in &view.order.deliverables {
                println!("  deliverable: {}", deliverable.title);
                for file in &deliverable.files {
                    println!("    file: {} -> {}", file.name, screen.file_url(file)?);
                }
            }

            if view.actions.is_empty() {
                println!("  no actions available");
            } else {
                for action in &view.actions {
                    println!("  action: {}", action.label());
                }
            }
            Ok(())
        }
        Err(e) if e.redirects_away() => {
            // Same policy as the web view: leave the detail page and land
            // on the listing, with the error as the toast.
            tracing::warn!("{e}");
            list_orders(&api).await
        }
        Err(e) => Err(e.into()),
    }
}

async fn list_orders(api: &OrderApi) -> Result<(), Box<dyn std::error::Error>> {
    let orders = api.list_orders(PaginationQuery::default()).await?;
    if orders.is_empty() {
        println!("no orders");
        return Ok(());
    }
    for order in orders {
        let badge = worklane_orders::order_status_badge(order.status);
        println!("{}  {}  {}", order.id, order.order_number, badge.label);
    }
    Ok(())
}
