//! Branch and order type selection.

use anyhow::Result;
use storefront_core::prelude::*;

use super::{BranchArgs, BranchCommand};
use crate::context::Context;

/// Run the branch command.
pub fn run(args: BranchArgs, ctx: &Context) -> Result<()> {
    let mut cart = ctx.open_cart()?;

    match args.command.unwrap_or(BranchCommand::Show) {
        BranchCommand::Show => {}
        BranchCommand::Set {
            order_type,
            branch_id,
            branch_name,
            address,
        } => {
            let order_type: OrderType = order_type.parse()?;
            let mut selection = BranchSelection::new(order_type);
            if let Some(id) = branch_id {
                let name = branch_name.unwrap_or_else(|| id.clone());
                selection = selection.with_branch(id, name);
            }
            if let Some(address) = address {
                selection = selection.with_address(address);
            }
            if order_type.is_delivery() && selection.address.is_none() {
                ctx.output.warn("No delivery address given");
            }

            cart.set_branch(selection)?;
            ctx.output.success(&format!("Ordering for {}", order_type.display_name()));
        }
        BranchCommand::Clear => {
            cart.clear_branch()?;
            ctx.output.success("Branch selection cleared");
        }
    }

    show_branch(cart.branch(), cart.delivery_charge(), ctx);
    Ok(())
}

fn show_branch(branch: Option<&BranchSelection>, delivery: Money, ctx: &Context) {
    if ctx.output.is_json() {
        ctx.output.json(&branch);
        return;
    }

    ctx.output.header("Branch");

    let Some(branch) = branch else {
        ctx.output.info("No branch selected");
        return;
    };

    ctx.output.kv("Order type", branch.order_type.display_name());
    if let Some(name) = &branch.branch_name {
        ctx.output.kv("Branch", name);
    }
    if let Some(address) = &branch.address {
        ctx.output.kv("Address", address);
    }
    if branch.order_type.is_delivery() {
        ctx.output.kv("Delivery charge", &delivery.display());
    }
}
