//! Price the cart.

use anyhow::{Context as _, Result};

use super::QuoteArgs;
use crate::context::{Cart, Context};

/// Run the quote command.
pub fn run(args: QuoteArgs, ctx: &Context) -> Result<()> {
    let mut cart = ctx.open_cart()?;

    if let Some(code) = args.discount.as_deref() {
        apply_promo(&mut cart, code, ctx)?;
    }

    let pricing = cart.pricing()?;

    if ctx.output.is_json() {
        ctx.output.json(&pricing);
        return Ok(());
    }

    ctx.output.header("Quote");
    if cart.is_empty() {
        ctx.output.info("Your cart is empty");
    }
    ctx.output.pricing(&pricing);

    let savings = pricing.savings();
    if savings.is_positive() {
        ctx.output.success(&format!("You save {}", savings.display()));
    }

    Ok(())
}

/// Look a promo code up in the configured promotions and apply it.
///
/// A blank code leaves the cart without a discount.
pub fn apply_promo(cart: &mut Cart, code: &str, ctx: &Context) -> Result<()> {
    let promotions = ctx
        .config
        .promo_catalog()
        .context("Invalid [promotions] in config")?;

    match promotions.resolve(code)? {
        Some(discount) => {
            ctx.output.debug(&format!(
                "Applying {} ({}% off)",
                discount.code, discount.percent
            ));
            cart.apply_discount(discount);
        }
        None => {
            cart.remove_discount();
        }
    }
    Ok(())
}
