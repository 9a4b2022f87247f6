use std::sync::Arc;

use rust_decimal::Decimal;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use order_lifecycle::{
    create_money, AppConfig, CustomerId, InMemoryOrderRepository, OrderEnvironment, OrderItem,
    OrderMetrics, OrderService, OrderStatus,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = AppConfig::from_env();

    // RUST_LOG overrides the configured filter
    tracing_subscriber::registry()
        .with(fmt::layer().with_target(true))
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&config.log_filter)),
        )
        .init();

    tracing::info!("Starting order lifecycle demo");

    // === 1. Wire environment, repository, service ===
    let env = OrderEnvironment::system().with_fallback_currency(config.fallback_currency.clone());
    let repository = Arc::new(InMemoryOrderRepository::new());
    let mut service = OrderService::new(repository.clone(), env);

    let metrics = if config.metrics_enabled {
        let metrics = Arc::new(OrderMetrics::new()?);
        service = service.with_metrics(metrics.clone());
        Some(metrics)
    } else {
        None
    };

    // === 2. Build sample items ===
    let price = create_money(Decimal::from(1000), "JPY")?;
    let items = vec![
        OrderItem::new("p1", 2, price.clone())?,
        OrderItem::new("p2", 1, price)?,
    ];

    // === 3. Create ===
    let customer_id = CustomerId::new();
    let order = service.create_order(customer_id, items).await?;

    tracing::info!(
        order_id = %order.id(),
        status = %order.status().status_type(),
        total = %order.total_amount(),
        item_count = order.items().len(),
        "Order created"
    );

    // === 4. Place ===
    let placed = service.place_order(order.id(), "payment-456").await?;
    if let OrderStatus::Placed { payment_id, placed_at } = placed.status() {
        tracing::info!(
            order_id = %placed.id(),
            payment_id = %payment_id,
            placed_at = %placed_at,
            "Order placed"
        );
    }

    // === 5. Rejected transitions ===
    if let Err(error) = service.place_order(order.id(), "payment-789").await {
        tracing::info!(kind = error.kind(), error = %error, "Second placement rejected as expected");
    }

    service.ship_order(order.id(), "TRACK-0001").await?;
    if let Err(error) = service.cancel_order(order.id(), "Too late").await {
        tracing::info!(kind = error.kind(), error = %error, "Cancellation rejected as expected");
    }

    // === 6. Cancellation of a fresh order ===
    let price = create_money(Decimal::from(250), "JPY")?;
    let second = service
        .create_order(customer_id, vec![OrderItem::new("p3", 4, price)?])
        .await?;
    service.cancel_order(second.id(), "Customer request").await?;

    // === 7. Summary ===
    for order in service.get_orders_by_customer(customer_id).await? {
        println!("{}", serde_json::to_string_pretty(&order)?);
    }

    if let Some(metrics) = metrics {
        tracing::info!(
            orders_created = metrics.orders_created.get(),
            metric_families = metrics.registry().gather().len(),
            "Metrics recorded"
        );
    }

    tracing::info!(stored = repository.len().await, "Demo complete");

    Ok(())
}
