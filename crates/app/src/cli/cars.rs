use clap::{Args, Subcommand};
use waybill::{
    fleet::{CarId, DriverId, NewCar},
    navigation::Screen,
    render,
};
use waybill_app::context::AppContext;

use super::{failure, signed_in};

#[derive(Debug, Args)]
pub(crate) struct CarsCommand {
    #[command(subcommand)]
    command: CarsSubcommand,
}

#[derive(Debug, Subcommand)]
enum CarsSubcommand {
    /// List cars without a driver
    List {
        /// Region code
        #[arg(long)]
        region: Option<i64>,
    },
    /// Register a car
    Add {
        /// Registration number
        #[arg(long)]
        number: Option<String>,

        /// Region code
        #[arg(long)]
        region: Option<i64>,
    },
    /// Delete a car
    Delete {
        /// Car id
        #[arg(long)]
        car: CarId,
    },
    /// Assign a car to a driver
    Assign {
        /// Driver id
        #[arg(long)]
        driver: DriverId,

        /// Car id
        #[arg(long)]
        car: CarId,
    },
}

pub(crate) async fn run(ctx: &AppContext, command: CarsCommand) -> Result<(), String> {
    signed_in(ctx, Screen::Cars).await?;

    match command.command {
        CarsSubcommand::List { region } => {
            let cars = ctx
                .fleet
                .available_cars(region)
                .await
                .map_err(|error| failure(&error, error.user_message()))?;

            println!("{}", render::table(&cars));
        }
        CarsSubcommand::Add { number, region } => {
            ctx.fleet
                .add_car(NewCar {
                    number: number.unwrap_or_default(),
                    region: region.unwrap_or_default(),
                })
                .await
                .map_err(|error| failure(&error, error.user_message()))?;

            println!("car added");
        }
        CarsSubcommand::Delete { car } => {
            ctx.fleet
                .delete_car(car)
                .await
                .map_err(|error| failure(&error, error.user_message()))?;

            println!("car {car} deleted");
        }
        CarsSubcommand::Assign { driver, car } => {
            ctx.fleet
                .assign_car(driver, car)
                .await
                .map_err(|error| failure(&error, error.user_message()))?;

            println!("car {car} assigned to driver {driver}");
        }
    }

    Ok(())
}
