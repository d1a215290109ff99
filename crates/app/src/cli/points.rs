use clap::{Args, Subcommand};
use waybill::{
    fleet::{NewPickUpPoint, PickUpPointId, WorkerId},
    navigation::Screen,
    render,
};
use waybill_app::context::AppContext;

use super::{failure, signed_in};

#[derive(Debug, Args)]
pub(crate) struct PointsCommand {
    #[command(subcommand)]
    command: PointsSubcommand,
}

#[derive(Debug, Subcommand)]
enum PointsSubcommand {
    /// List pick-up points; with a region, only those without a worker
    List {
        /// Region code
        #[arg(long)]
        region: Option<i64>,
    },
    /// Open a pick-up point
    Add {
        /// Street address
        #[arg(long)]
        address: Option<String>,

        /// Region code
        #[arg(long)]
        region: Option<i64>,
    },
    /// Delete a pick-up point
    Delete {
        /// Pick-up point id
        #[arg(long)]
        point: PickUpPointId,
    },
    /// Assign a pick-up point to a worker
    Assign {
        /// Worker id
        #[arg(long)]
        worker: WorkerId,

        /// Pick-up point id
        #[arg(long)]
        point: PickUpPointId,
    },
}

pub(crate) async fn run(ctx: &AppContext, command: PointsCommand) -> Result<(), String> {
    signed_in(ctx, Screen::PickUpPoints).await?;

    match command.command {
        PointsSubcommand::List { region } => {
            let points = ctx
                .fleet
                .pick_up_points(region)
                .await
                .map_err(|error| failure(&error, error.user_message()))?;

            println!("{}", render::table(&points));
        }
        PointsSubcommand::Add { address, region } => {
            ctx.fleet
                .add_pick_up_point(NewPickUpPoint {
                    address: address.unwrap_or_default(),
                    region: region.unwrap_or_default(),
                })
                .await
                .map_err(|error| failure(&error, error.user_message()))?;

            println!("pick-up point added");
        }
        PointsSubcommand::Delete { point } => {
            ctx.fleet
                .delete_pick_up_point(point)
                .await
                .map_err(|error| failure(&error, error.user_message()))?;

            println!("pick-up point {point} deleted");
        }
        PointsSubcommand::Assign { worker, point } => {
            ctx.fleet
                .assign_pick_up_point(worker, point)
                .await
                .map_err(|error| failure(&error, error.user_message()))?;

            println!("pick-up point {point} assigned to worker {worker}");
        }
    }

    Ok(())
}
