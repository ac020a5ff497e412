//! Dump the derived catalog.

use benilink_core::catalog::Catalog;
use benilink_core::pricing::PricingConfig;

/// Print every derived product, either as a fixed-width table or as the
/// JSON the API serves.
pub fn dump(pricing: &PricingConfig, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let catalog = Catalog::build(pricing)?;

    if json {
        println!("{}", serde_json::to_string_pretty(catalog.products())?);
        return Ok(());
    }

    println!(
        "{:<10} {:<55} {:<10} {:<12} {:>10}",
        "ID", "NOM", "CATÉGORIE", "UNITÉ", "PRIX EUR"
    );
    for product in catalog.products() {
        println!(
            "{:<10} {:<55} {:<10} {:<12} {:>10.2}",
            product.id,
            product.name,
            product.category.label(),
            product.unit.label(),
            product.price,
        );
    }
    println!("\n{} produits", catalog.len());
    Ok(())
}
