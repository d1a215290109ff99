use clap::{Args, Subcommand};
use waybill::{navigation::Screen, products::ProductId, render, supplies::SupplyId, time};
use waybill_app::context::AppContext;

use super::{failure, signed_in};

#[derive(Debug, Args)]
pub(crate) struct ArrivalsCommand {
    #[command(subcommand)]
    command: ArrivalsSubcommand,
}

#[derive(Debug, Subcommand)]
enum ArrivalsSubcommand {
    /// Show the supply board
    List,
    /// Mark a supply as arrived and its products as delivered
    Confirm {
        /// Supply id
        #[arg(long)]
        supply: SupplyId,
    },
}

fn ids(products: &[ProductId]) -> String {
    products
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

pub(crate) async fn run(ctx: &AppContext, command: ArrivalsCommand) -> Result<(), String> {
    let session = signed_in(ctx, Screen::PickUpPointSupplies).await?;
    let user = session.profile.id;
    let now = time::now();

    match command.command {
        ArrivalsSubcommand::List => {
            let board = ctx
                .supplies
                .pick_up_point_board(user, now)
                .await
                .map_err(|error| failure(&error, error.user_message()))?;

            println!("{}", render::board(board.entries()));

            Ok(())
        }
        ArrivalsSubcommand::Confirm { supply } => {
            let confirmation = ctx
                .supplies
                .confirm_arrival(user, supply, now)
                .await
                .map_err(|error| failure(&error, error.user_message()))?;

            println!("{}", render::board(confirmation.board.entries()));

            let report = confirmation.report;

            if !report.updated.is_empty() {
                println!("delivered products: {}", ids(&report.updated));
            }

            match report.user_message() {
                Some(message) => {
                    println!("failed products: {}", ids(&report.failed));
                    Err(message)
                }
                None => Ok(()),
            }
        }
    }
}
