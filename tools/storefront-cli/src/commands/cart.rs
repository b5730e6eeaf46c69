//! Cart commands.

use anyhow::{bail, Context as _, Result};
use dialoguer::Confirm;
use serde::Serialize;
use storefront_core::prelude::*;

use super::{CartArgs, CartCommand};
use crate::context::{Cart, Context};

/// Run the cart command.
pub fn run(args: CartArgs, ctx: &Context) -> Result<()> {
    let mut cart = ctx.open_cart()?;

    match args.command.unwrap_or(CartCommand::Show) {
        CartCommand::Show => show_cart(&cart, ctx),
        CartCommand::Add {
            product,
            quantity,
            picks,
        } => add_item(&mut cart, &product, quantity, &picks, ctx),
        CartCommand::Remove { entry } => {
            let entry = EntryId::new(entry);
            let name = line_name(&cart, &entry)?;
            cart.remove_item(&entry)?;
            ctx.output.success(&format!("Removed {}", name));
            show_cart(&cart, ctx)
        }
        CartCommand::Qty { entry, quantity } => {
            let entry = EntryId::new(entry);
            let name = line_name(&cart, &entry)?;
            cart.set_quantity(&entry, quantity)?;
            match cart.entry(&entry) {
                Some(line) => ctx
                    .output
                    .success(&format!("{} × {}", line.quantity, name)),
                None => ctx.output.success(&format!("Removed {}", name)),
            }
            show_cart(&cart, ctx)
        }
        CartCommand::Inc { entry } => {
            let entry = EntryId::new(entry);
            line_name(&cart, &entry)?;
            cart.increment(&entry)?;
            show_cart(&cart, ctx)
        }
        CartCommand::Dec { entry } => {
            let entry = EntryId::new(entry);
            line_name(&cart, &entry)?;
            cart.decrement(&entry)?;
            show_cart(&cart, ctx)
        }
        CartCommand::Clear { yes } => clear_cart(&mut cart, yes, ctx),
    }
}

#[derive(Serialize)]
struct CartView<'a> {
    branch: Option<&'a BranchSelection>,
    entries: &'a [CartEntry],
    pricing: PricingSnapshot,
}

/// Print the cart lines and totals.
pub fn show_cart(cart: &Cart, ctx: &Context) -> Result<()> {
    let pricing = cart.pricing()?;

    if ctx.output.is_json() {
        ctx.output.json(&CartView {
            branch: cart.branch(),
            entries: cart.entries(),
            pricing,
        });
        return Ok(());
    }

    ctx.output.header("Your Cart");

    if cart.is_empty() {
        ctx.output.info("Your cart is empty");
        return Ok(());
    }

    ctx.output.cart_lines(cart.entries());
    ctx.output.pricing(&pricing);
    ctx.output.info(&format!(
        "{} item(s) in {} line(s)",
        cart.item_count(),
        cart.unique_item_count()
    ));

    Ok(())
}

fn add_item(
    cart: &mut Cart,
    product_id: &str,
    quantity: i64,
    picks: &[String],
    ctx: &Context,
) -> Result<()> {
    let mut selection = AddOnSelection::new();
    for pick in picks {
        let (heading, label) = AddOnSelection::parse_pick(pick)?;
        selection.push(heading, label);
    }

    let products = ctx.products()?;
    let product = products
        .require_product(&ProductId::new(product_id))
        .with_context(|| format!("Failed to look up product {}", product_id))?;

    let candidate = CartCandidate::from_product(&product, &selection, quantity)?;
    match cart.add_item(candidate)? {
        Some(entry_id) => {
            let line_quantity = cart.entry(&entry_id).map(|e| e.quantity).unwrap_or(quantity);
            ctx.output.success(&format!("Added {} × {} ({})", quantity, product.name, entry_id));
            ctx.output.debug(&format!("Line now holds {}", line_quantity));
        }
        None => bail!("Quantity must be at least 1"),
    }

    show_cart(cart, ctx)
}

fn clear_cart(cart: &mut Cart, yes: bool, ctx: &Context) -> Result<()> {
    if cart.is_empty() {
        ctx.output.info("Your cart is already empty");
        return Ok(());
    }

    if !yes && !ctx.output.is_json() {
        let confirmed = Confirm::new()
            .with_prompt(format!("Remove all {} item(s) from the cart?", cart.item_count()))
            .default(false)
            .interact()?;

        if !confirmed {
            ctx.output.warn("Cart left as it was");
            return Ok(());
        }
    }

    cart.clear()?;
    ctx.output.success("Cart cleared");
    Ok(())
}

fn line_name(cart: &Cart, entry: &EntryId) -> Result<String> {
    match cart.entry(entry) {
        Some(line) => Ok(line.name.clone()),
        None => bail!("No cart line with ID {}. Run `storefront cart` to list them.", entry),
    }
}
