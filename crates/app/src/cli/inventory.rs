use clap::{Args, Subcommand};
use waybill::{navigation::Screen, products::ProductId, render};
use waybill_app::context::AppContext;

use super::{failure, products::FilterArgs, signed_in};

#[derive(Debug, Args)]
pub(crate) struct InventoryCommand {
    #[command(subcommand)]
    command: InventorySubcommand,
}

#[derive(Debug, Subcommand)]
enum InventorySubcommand {
    /// List products at your pick-up point
    List(FilterArgs),
    /// Hand a delivered product to its customer
    Receive {
        /// Product id
        #[arg(long)]
        product: ProductId,
    },
}

pub(crate) async fn run(ctx: &AppContext, command: InventoryCommand) -> Result<(), String> {
    let session = signed_in(ctx, Screen::PickUpPointProducts).await?;

    match command.command {
        InventorySubcommand::List(filter) => {
            let products = ctx
                .products
                .pick_up_point_products(session.profile.id, filter.into())
                .await
                .map_err(|error| failure(&error, error.user_message()))?;

            println!("{}", render::table(&products));
        }
        InventorySubcommand::Receive { product } => {
            let product = ctx
                .products
                .receive(product)
                .await
                .map_err(|error| failure(&error, error.user_message()))?;

            println!("product {} is now {}", product.id, product.status);
        }
    }

    Ok(())
}
