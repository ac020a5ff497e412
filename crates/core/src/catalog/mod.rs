//! Catalog builder: static price list → priced, categorized products.
//!
//! The shop has no product database. At process start the raw FCFA price
//! list is parsed and each row is classified by name heuristics, priced via
//! [`PricingConfig`], and given an image. The result is immutable for the
//! lifetime of the process and fully deterministic: rebuilding from the same
//! list and the same pricing parameters yields an identical catalog.

mod data;

use std::collections::HashMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::pricing::PricingConfig;
use crate::types::{CurrencyCode, ProductId};

pub use data::RAW_DATA;

/// Product categories.
///
/// Wire names stay French; they are customer-facing filter labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    #[serde(rename = "Huile")]
    Oil,
    #[serde(rename = "Beurre")]
    Butter,
    #[serde(rename = "Poudre")]
    Powder,
    #[serde(rename = "Farine")]
    Flour,
    #[serde(rename = "Conserve")]
    Preserve,
    #[serde(rename = "Céréale")]
    Cereal,
    #[serde(rename = "Épice")]
    Spice,
    #[serde(rename = "Poisson")]
    Fish,
}

impl Category {
    /// Customer-facing label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Oil => "Huile",
            Self::Butter => "Beurre",
            Self::Powder => "Poudre",
            Self::Flour => "Farine",
            Self::Preserve => "Conserve",
            Self::Cereal => "Céréale",
            Self::Spice => "Épice",
            Self::Fish => "Poisson",
        }
    }

    /// Fallback image pool for products without a local photo.
    #[must_use]
    pub const fn image_pool(self) -> &'static [&'static str] {
        match self {
            Self::Oil => data::POOL_OIL,
            Self::Butter => data::POOL_BUTTER,
            Self::Powder => data::POOL_POWDER,
            Self::Flour => data::POOL_FLOUR,
            Self::Preserve => data::POOL_PRESERVE,
            Self::Cereal => data::POOL_CEREAL,
            Self::Spice => data::POOL_SPICE,
            Self::Fish => data::POOL_FISH,
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Unit of sale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Unit {
    #[serde(rename = "litre")]
    Litre,
    #[serde(rename = "kilo")]
    Kilo,
    #[serde(rename = "g")]
    Gram,
    #[serde(rename = "ml")]
    Millilitre,
    #[serde(rename = "sachet")]
    Sachet,
    #[serde(rename = "unité")]
    Each,
}

impl Unit {
    /// Customer-facing label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Litre => "litre",
            Self::Kilo => "kilo",
            Self::Gram => "g",
            Self::Millilitre => "ml",
            Self::Sachet => "sachet",
            Self::Each => "unité",
        }
    }
}

/// A priced catalog product. Immutable once derived.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    /// Sale price in EUR, VAT included.
    pub price: Decimal,
    pub currency: CurrencyCode,
    pub category: Category,
    pub unit: Unit,
    pub image: String,
}

/// Catalog construction failure. The list is static, so any of these
/// means the embedded data itself is broken.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("malformed price list row: {0:?}")]
    MalformedRow(String),
    #[error("no numeric price in row: {0:?}")]
    MissingPrice(String),
}

/// The authoritative catalog with a by-name index.
///
/// Order validation looks products up by their exact display name, since that
/// is what clients submit and what the price table is keyed on.
#[derive(Debug, Clone)]
pub struct Catalog {
    products: Vec<Product>,
    by_name: HashMap<String, usize>,
}

impl Catalog {
    /// Build the catalog from the embedded price list.
    ///
    /// # Errors
    ///
    /// Returns an error if the embedded list contains a malformed row.
    pub fn build(pricing: &PricingConfig) -> Result<Self, CatalogError> {
        Self::from_raw(RAW_DATA, pricing)
    }

    /// Build a catalog from an arbitrary price list (tests, previews).
    ///
    /// # Errors
    ///
    /// Returns an error if a row is not `name,price` or has no digits in
    /// the price field.
    pub fn from_raw(raw: &str, pricing: &PricingConfig) -> Result<Self, CatalogError> {
        let products = raw
            .lines()
            .skip(1) // header
            .enumerate()
            .map(|(index, line)| build_product(index, line, pricing))
            .collect::<Result<Vec<_>, _>>()?;

        let by_name = products
            .iter()
            .enumerate()
            .map(|(i, p)| (p.name.clone(), i))
            .collect();

        Ok(Self { products, by_name })
    }

    /// Look a product up by its exact display name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Product> {
        self.by_name.get(name).and_then(|&i| self.products.get(i))
    }

    /// All products, in price-list order.
    #[must_use]
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.products.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }
}

fn build_product(
    index: usize,
    line: &str,
    pricing: &PricingConfig,
) -> Result<Product, CatalogError> {
    let (name, price_str) = line
        .split_once(',')
        .ok_or_else(|| CatalogError::MalformedRow(line.to_string()))?;
    let base_price_fcfa = parse_fcfa(price_str)
        .ok_or_else(|| CatalogError::MissingPrice(line.to_string()))?;

    let (category, unit) = classify(name);
    let price = pricing.price_catalog_entry(base_price_fcfa);

    Ok(Product {
        id: ProductId::from_row_index(index),
        name: name.to_string(),
        price,
        currency: CurrencyCode::EUR,
        category,
        unit,
        image: image_for(name, category, index),
    })
}

/// Strip non-numeric characters from a price field ("6750 FCFA" → 6750).
fn parse_fcfa(price_str: &str) -> Option<u32> {
    let digits: String = price_str.chars().filter(char::is_ascii_digit).collect();
    digits.parse().ok()
}

/// Classify a product by name and infer its unit of sale.
///
/// Rules are evaluated in a fixed priority order; the first match wins.
/// The exact order matters ("Poudre de piment" is a spice, not a powder)
/// and is pinned by the test suite.
#[must_use]
pub fn classify(name: &str) -> (Category, Unit) {
    let lower = name.to_lowercase();
    let has = |needle: &str| lower.contains(needle);

    if has("farine") || has("aklui") || has("tagliatelle") {
        return (Category::Flour, Unit::Kilo);
    }
    if has("kluiklui") || has("conserve") || (has("huile rouge") && has("ml")) {
        return (Category::Preserve, Unit::Each);
    }
    if has("pomme de terre") || has("igname") || has("patate") || has("carte-cadeau") || has("noix")
    {
        let unit = if has("kg") { Unit::Kilo } else { Unit::Each };
        return (Category::Cereal, unit);
    }
    if has("poisson") || has("crevette") {
        return (Category::Fish, Unit::Kilo);
    }
    if has("piment")
        || has("ognon")
        || has("ail")
        || has("graine")
        || has("infusion")
        || has("lanhouiwin")
        || has("purée")
        || has("sel")
        || has("persil")
        || has("poivre")
        || has("cannelle")
        || has("gingembre")
        || has("monodara")
        || has("thym")
        || has("tomate en poudre")
    {
        let unit = if has("sachet") {
            Unit::Sachet
        } else if has("kg") {
            Unit::Kilo
        } else if has("ml") {
            Unit::Millilitre
        } else if has("g") {
            Unit::Gram
        } else {
            Unit::Each
        };
        return (Category::Spice, unit);
    }
    if has("poudre") {
        return (Category::Powder, Unit::Kilo);
    }
    if has("beurre") {
        return (Category::Butter, Unit::Kilo);
    }
    (Category::Oil, Unit::Litre)
}

/// Pick the display image: local photo when a slug-matched override
/// exists, else a category-pool entry indexed by row position.
fn image_for(name: &str, category: Category, index: usize) -> String {
    let slug = slugify(name);
    if let Some((_, file)) = data::LOCAL_IMAGES.iter().find(|(s, _)| *s == slug) {
        return format!("{}/{file}", data::PRODUCTS_BASE);
    }
    let pool = category.image_pool();
    let photo = pool
        .get(index % pool.len())
        .unwrap_or_else(|| unreachable!("pools are non-empty"));
    format!("https://images.unsplash.com/{photo}?auto=format&fit=crop&q=80&w=800&h=600")
}

/// Slug a product name: accents folded to ASCII, lowercased, non
/// alphanumeric runs collapsed to a single dash.
#[must_use]
pub fn slugify(value: &str) -> String {
    let mut slug = String::with_capacity(value.len());
    let mut pending_dash = false;
    for c in value.chars().flat_map(char::to_lowercase) {
        let folded = match c {
            'à' | 'â' | 'ä' => Some('a'),
            'é' | 'è' | 'ê' | 'ë' => Some('e'),
            'î' | 'ï' => Some('i'),
            'ô' | 'ö' => Some('o'),
            'ù' | 'û' | 'ü' => Some('u'),
            'ç' => Some('c'),
            'œ' => Some('o'), // close enough for slugs
            c if c.is_ascii_alphanumeric() => Some(c),
            _ => None,
        };
        match folded {
            Some(c) => {
                if pending_dash && !slug.is_empty() {
                    slug.push('-');
                }
                pending_dash = false;
                slug.push(c);
            }
            None => pending_dash = true,
        }
    }
    slug
}
