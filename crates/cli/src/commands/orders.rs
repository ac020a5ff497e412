//! List persisted orders.

use benilink_server::store::OrderStore;

/// Print persisted orders, newest first. `limit` of 0 means all.
pub async fn list(
    store: &OrderStore,
    limit: usize,
    json: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut orders = store.list().await?;
    if limit > 0 {
        orders.truncate(limit);
    }

    if json {
        println!("{}", serde_json::to_string_pretty(&orders)?);
        return Ok(());
    }

    if orders.is_empty() {
        println!("Aucune commande dans {}", store.dir().display());
        return Ok(());
    }

    for order in &orders {
        println!(
            "{}  {}  {:<16}  {:>8.2} EUR  {} article(s)  {}",
            order.timestamp.format("%Y-%m-%d %H:%M"),
            order.order_id,
            order.delivery_info.full_name,
            order.total_amount,
            order.items.iter().map(|i| i.quantity).sum::<u32>(),
            order.payment_method,
        );
    }
    println!("\n{} commande(s)", orders.len());
    Ok(())
}
