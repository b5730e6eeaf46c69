//! Configuration management commands.

use anyhow::{bail, Result};
use storefront_core::config::CONFIG_FILE_NAMES;
use storefront_core::prelude::*;

use super::{ConfigArgs, ConfigCommand};
use crate::context::Context;
use crate::output::format_percent;

/// Run the config command.
pub fn run(args: ConfigArgs, ctx: &Context) -> Result<()> {
    match args.command {
        ConfigCommand::Show => show_config(ctx),
        ConfigCommand::Init { force } => init_config(force, ctx),
    }
}

fn show_config(ctx: &Context) -> Result<()> {
    if ctx.output.is_json() {
        ctx.output.json(&ctx.config);
        return Ok(());
    }

    ctx.output.header("Current Configuration");
    match &ctx.config_path {
        Some(path) => ctx.output.kv("file", &path.display().to_string()),
        None => ctx.output.kv("file", "(defaults)"),
    }

    let pricing = &ctx.config.pricing;
    ctx.output.info("");
    ctx.output.info("[pricing]");
    ctx.output.kv("currency", &pricing.currency);
    ctx.output.kv("tax_rate", &format_percent(pricing.tax_rate));
    ctx.output.kv("delivery_charge", &pricing.delivery_charge.to_string());

    if !ctx.config.promotions.is_empty() {
        ctx.output.info("");
        ctx.output.info("[promotions]");
        for (code, percent) in &ctx.config.promotions {
            ctx.output.kv(code, &format_percent(*percent));
        }
    }

    ctx.output.info("");
    ctx.output.info("[api]");
    ctx.output.kv("base_url", &ctx.config.api.base_url);
    ctx.output.kv("timeout_secs", &ctx.config.api.timeout_secs.to_string());

    ctx.output.info("");
    ctx.output.info("[storage]");
    ctx.output.kv("dir", &ctx.config.storage.dir);
    ctx.output.kv("store", &ctx.config.storage.store);
    ctx.output.kv("resolved", &ctx.store_dir().display().to_string());

    // Surface problems that would otherwise only show when pricing a cart.
    if let Err(e) = ctx.config.cart_settings() {
        ctx.output.warn(&format!("Pricing: {}", e));
    }
    if let Err(e) = ctx.config.promo_catalog() {
        ctx.output.warn(&format!("Promotions: {}", e));
    }

    Ok(())
}

fn init_config(force: bool, ctx: &Context) -> Result<()> {
    let config_path = ctx.cwd.join(CONFIG_FILE_NAMES[0]);

    if config_path.exists() && !force {
        bail!(
            "Config file already exists: {}. Use --force to overwrite.",
            config_path.display()
        );
    }

    StorefrontConfig::default().save(&config_path)?;

    ctx.output.success(&format!("Created: {}", config_path.display()));

    Ok(())
}
