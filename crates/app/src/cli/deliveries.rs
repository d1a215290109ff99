use clap::{Args, Subcommand};
use waybill::{navigation::Screen, render, supplies::SupplyId, time};
use waybill_app::context::AppContext;

use super::{failure, signed_in};

#[derive(Debug, Args)]
pub(crate) struct DeliveriesCommand {
    #[command(subcommand)]
    command: DeliveriesSubcommand,
}

#[derive(Debug, Subcommand)]
enum DeliveriesSubcommand {
    /// Show the supply board
    List,
    /// Mark a supply as delivered
    Confirm {
        /// Supply id
        #[arg(long)]
        supply: SupplyId,
    },
}

pub(crate) async fn run(ctx: &AppContext, command: DeliveriesCommand) -> Result<(), String> {
    let session = signed_in(ctx, Screen::DriverSupplies).await?;
    let user = session.profile.id;
    let now = time::now();

    let board = match command.command {
        DeliveriesSubcommand::List => ctx.supplies.driver_board(user, now).await,
        DeliveriesSubcommand::Confirm { supply } => {
            ctx.supplies.confirm_driver_supply(user, supply, now).await
        }
    }
    .map_err(|error| failure(&error, error.user_message()))?;

    println!("{}", render::board(board.entries()));

    Ok(())
}
