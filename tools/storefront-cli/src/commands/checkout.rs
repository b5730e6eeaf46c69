//! Place the order.

use anyhow::{bail, Result};
use dialoguer::Confirm;
use storefront_core::prelude::*;

use super::quote::apply_promo;
use super::CheckoutArgs;
use crate::context::Context;

/// Run the checkout command.
pub fn run(args: CheckoutArgs, ctx: &Context) -> Result<()> {
    let mut cart = ctx.open_cart()?;

    if cart.is_empty() {
        bail!("Your cart is empty. Add something with `storefront cart add`.");
    }

    if let Some(code) = args.discount.as_deref() {
        apply_promo(&mut cart, code, ctx)?;
    }

    let mut checkout = Checkout::new();
    if let Some(customer) = args.customer {
        checkout = checkout.with_customer(customer);
    }
    if let Some(note) = args.note {
        checkout = checkout.with_note(note);
    }

    // Step 1: Review
    let request = checkout.build_request(&cart)?;
    if !ctx.output.is_json() {
        ctx.output.header("Checkout");
        ctx.output.cart_lines(cart.entries());
        ctx.output.pricing(&request.pricing);
        match cart.branch() {
            Some(branch) => ctx.output.kv("Order type", branch.order_type.display_name()),
            None => ctx.output.warn("No branch selected; see `storefront branch set`"),
        }
        if let Some(note) = &request.note {
            ctx.output.kv("Note", note);
        }
    }

    // Step 2: Confirmation
    if !args.yes && !ctx.output.is_json() {
        ctx.output.info("");
        let confirmed = Confirm::new()
            .with_prompt(format!("Place order for {}?", request.grand_total().display()))
            .default(true)
            .interact()?;

        if !confirmed {
            ctx.output.warn("Checkout cancelled");
            return Ok(());
        }
    }

    // Step 3: Submit
    let orders = ctx.orders()?;
    let spinner = ctx.output.spinner("Placing order...");
    let placed = checkout.place_order(&mut cart, &orders);
    spinner.finish_and_clear();

    let confirmation = match placed {
        Ok(confirmation) => confirmation,
        Err(e) => {
            ctx.output.warn("Your cart has been kept; run checkout again to retry");
            return Err(e.into());
        }
    };

    if ctx.output.is_json() {
        ctx.output.json(&confirmation);
        return Ok(());
    }

    ctx.output.success(&format!("Order {} placed", confirmation.order_id));
    ctx.output.kv("Total", &request.grand_total().display());
    ctx.output.kv("Track at", &confirmation.completion_path());

    Ok(())
}
