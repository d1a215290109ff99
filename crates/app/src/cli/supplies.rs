use clap::{Args, Subcommand};
use jiff::civil::DateTime;
use waybill::{
    fleet::{DriverId, PickUpPointId},
    navigation::Screen,
    render,
    supplies::{SupplyForm, SupplyId},
    time::{self, parse_timestamp},
};
use waybill_app::context::AppContext;

use super::{failure, signed_in};

#[derive(Debug, Args)]
pub(crate) struct SuppliesCommand {
    #[command(subcommand)]
    command: SuppliesSubcommand,
}

#[derive(Debug, Subcommand)]
enum SuppliesSubcommand {
    /// List every supply
    List,
    /// Schedule a supply
    Schedule {
        /// Driver id
        #[arg(long)]
        driver: Option<DriverId>,

        /// Destination pick-up point id
        #[arg(long)]
        point: Option<PickUpPointId>,

        /// Scheduled time, e.g. 2024-05-01T10:00:00
        #[arg(long, value_parser = parse_time)]
        time: Option<DateTime>,
    },
    /// Delete a supply
    Delete {
        /// Supply id
        #[arg(long)]
        supply: SupplyId,
    },
    /// Drivers able to serve a pick-up point
    Drivers {
        /// Pick-up point id
        #[arg(long)]
        point: PickUpPointId,
    },
}

fn parse_time(raw: &str) -> Result<DateTime, String> {
    parse_timestamp(raw).map_err(|error| error.to_string())
}

pub(crate) async fn run(ctx: &AppContext, command: SuppliesCommand) -> Result<(), String> {
    signed_in(ctx, Screen::Supplies).await?;

    match command.command {
        SuppliesSubcommand::List => {
            let supplies = ctx
                .supplies
                .list_supplies()
                .await
                .map_err(|error| failure(&error, error.user_message()))?;

            println!("{}", render::table(&supplies));
        }
        SuppliesSubcommand::Schedule {
            driver,
            point,
            time: scheduled,
        } => {
            let supplies = ctx
                .supplies
                .schedule(
                    SupplyForm {
                        driver_id: driver,
                        pick_up_point_id: point,
                        time: scheduled,
                    },
                    time::now(),
                )
                .await
                .map_err(|error| failure(&error, error.user_message()))?;

            println!("{}", render::table(&supplies));
        }
        SuppliesSubcommand::Delete { supply } => {
            ctx.supplies
                .delete_supply(supply)
                .await
                .map_err(|error| failure(&error, error.user_message()))?;

            println!("supply {supply} deleted");
        }
        SuppliesSubcommand::Drivers { point } => {
            let drivers = ctx
                .supplies
                .drivers_for_point(point)
                .await
                .map_err(|error| failure(&error, error.user_message()))?;

            println!("{}", render::table(&drivers));
        }
    }

    Ok(())
}
