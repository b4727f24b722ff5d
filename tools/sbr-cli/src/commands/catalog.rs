//! List the product catalog.

use anyhow::Result;
use sbr_commerce::prelude::*;
use serde_json::json;

use super::CatalogArgs;
use crate::context::Context;

/// Run the catalog command.
pub async fn run(args: CatalogArgs, ctx: &Context) -> Result<()> {
    let catalog = ctx.catalog()?;
    let assets = ctx.config.landing.asset_resolver();
    let filter = args.event_type.map(EventFilter::Only).unwrap_or_default();
    let categories = match args.category {
        Some(category) => vec![category],
        None => PurchaseCategory::ALL.to_vec(),
    };

    if ctx.output.is_json() {
        let mut value = serde_json::Map::new();
        for category in &categories {
            let products = match category {
                PurchaseCategory::Private => json!(catalog.private),
                PurchaseCategory::Business => json!(catalog.business),
                PurchaseCategory::Event => {
                    json!(catalog.events_matching(filter).collect::<Vec<_>>())
                }
            };
            value.insert(category.as_str().to_string(), products);
        }
        ctx.output.json(&value);
        return Ok(());
    }

    for category in categories {
        ctx.output.header(category.display_name());
        match category {
            PurchaseCategory::Private => {
                for product in &catalog.private {
                    ctx.output
                        .list_item(&format!("{} ({}) - {}", product.name, product.id, product.description));
                    for option in &product.sizes {
                        ctx.output.table_row(&["", &option.size, &option.price.display()], &[2, 8, 12]);
                    }
                    ctx.output.kv("image", &assets.resolve(&product.image));
                }
            }
            PurchaseCategory::Business => {
                for product in &catalog.business {
                    ctx.output.list_item(&format!("{} ({})", product.name, product.id));
                    ctx.output.kv("price", &format!("{} {}", product.price.display(), product.unit));
                    if let Some(min) = product.min_order {
                        ctx.output.kv("minimum order", &format!("{} bottles", min));
                    }
                }
            }
            PurchaseCategory::Event => {
                for package in catalog.events_matching(filter) {
                    ctx.output.list_item(&format!(
                        "{} ({}) - {}",
                        package.name,
                        package.id,
                        package.category.display_name()
                    ));
                    ctx.output.kv("from", &package.base_price.display());
                    ctx.output.kv("includes", &package.includes.join(", "));
                }
            }
        }
    }

    Ok(())
}
