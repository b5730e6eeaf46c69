//! Browse the menu.

use anyhow::Result;
use serde::Serialize;
use storefront_core::prelude::*;

use super::MenuArgs;
use crate::context::Context;
use crate::output::price_tag;

/// Run the menu command.
pub fn run(args: MenuArgs, ctx: &Context) -> Result<()> {
    let products = ctx.products()?;

    if let Some(id) = args.product {
        let product = products.require_product(&ProductId::new(id))?;
        let related = products.related_products(&product)?;
        return show_product(&product, &related, ctx);
    }

    let list = match &args.category {
        Some(category) => products.products_in_category(&CategoryId::new(category.as_str()))?,
        None => products.all_products()?,
    };

    if ctx.output.is_json() {
        ctx.output.json(&list);
        return Ok(());
    }

    ctx.output.header("Menu");
    if list.is_empty() {
        ctx.output.info("No products found");
        return Ok(());
    }

    // Group by category name, keeping the order products arrive in.
    let mut groups: Vec<(&str, Vec<&MenuProduct>)> = Vec::new();
    for product in &list {
        let name = product.category.as_deref().unwrap_or("Other");
        match groups.iter_mut().find(|(n, _)| *n == name) {
            Some((_, items)) => items.push(product),
            None => groups.push((name, vec![product])),
        }
    }

    for (name, items) in groups {
        ctx.output.info("");
        ctx.output.info(name);
        for product in items {
            let price = price_tag(product);
            ctx.output.table_row(&[product.id.as_str(), &product.name, &price], &[16, 32, 24]);
        }
    }

    Ok(())
}

#[derive(Serialize)]
struct ProductView<'a> {
    product: &'a MenuProduct,
    related: &'a [MenuProduct],
}

fn show_product(product: &MenuProduct, related: &[MenuProduct], ctx: &Context) -> Result<()> {
    if ctx.output.is_json() {
        ctx.output.json(&ProductView { product, related });
        return Ok(());
    }

    ctx.output.header(&product.name);
    ctx.output.kv("ID", product.id.as_str());
    ctx.output.kv("Price", &price_tag(product));
    if let Some(pct) = product.sale_percentage() {
        ctx.output.kv("Sale", &format!("{:.0}% off", pct));
    }
    if let Some(description) = &product.description {
        ctx.output.kv("About", description);
    }

    for group in &product.add_ons {
        ctx.output.info("");
        let rule = if group.required {
            format!("required, pick up to {}", group.max_selectable())
        } else {
            format!("optional, pick up to {}", group.max_selectable())
        };
        ctx.output.info(&format!("{} ({})", group.heading, rule));
        for option in &group.options {
            let price = if option.price.is_zero() {
                "free".to_string()
            } else {
                format!("+{}", option.price.display())
            };
            ctx.output.list_item(&format!("{} {}", option.label, price));
        }
    }

    if !related.is_empty() {
        ctx.output.info("");
        ctx.output.info("You may also like");
        for item in related {
            ctx.output.list_item(&format!("{} ({}) {}", item.name, item.id, price_tag(item)));
        }
    }

    Ok(())
}
