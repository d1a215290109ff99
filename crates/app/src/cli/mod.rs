use std::error::Error;

use clap::{Parser, Subcommand};
use tracing::debug;
use waybill::navigation::Screen;
use waybill_app::{
    config::AppConfig,
    context::AppContext,
    observability,
    session::{Session, SessionError},
};

mod account;
mod arrivals;
mod cars;
mod deliveries;
mod inventory;
mod points;
mod products;
mod reports;
mod shift;
mod staff;
mod supplies;

#[derive(Debug, Parser)]
#[command(name = "waybill", about = "Waybill logistics client", long_about = None)]
pub(crate) struct Cli {
    #[command(flatten)]
    config: AppConfig,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Sign in to the backend
    Login(account::LoginArgs),
    /// Forget the stored session
    Logout,
    /// Show the signed-in user and the screens available to them
    Profile,
    /// Supplies assigned to the signed-in driver
    Deliveries(deliveries::DeliveriesCommand),
    /// Supplies heading to the signed-in worker's pick-up point
    Arrivals(arrivals::ArrivalsCommand),
    /// Products held at the signed-in worker's pick-up point
    Inventory(inventory::InventoryCommand),
    /// The signed-in worker's shift clock
    Shift(shift::ShiftCommand),
    /// Supply scheduling
    Supplies(supplies::SuppliesCommand),
    /// Product catalog
    Products(products::ProductsCommand),
    /// Car administration
    Cars(cars::CarsCommand),
    /// Pick-up point administration
    Points(points::PointsCommand),
    /// Driver, worker and user administration
    Staff(staff::StaffCommand),
    /// Shift and supply reports
    Reports(reports::ReportsCommand),
}

impl Cli {
    pub(crate) async fn run(self) -> Result<(), String> {
        observability::init_subscriber(&self.config.logging)
            .map_err(|error| format!("failed to initialise logging: {error}"))?;

        let ctx = AppContext::from_config(&self.config)
            .map_err(|error| format!("failed to start: {error}"))?;

        match self.command {
            Commands::Login(args) => account::login(&ctx, args).await,
            Commands::Logout => account::logout(&ctx).await,
            Commands::Profile => account::profile(&ctx).await,
            Commands::Deliveries(command) => deliveries::run(&ctx, command).await,
            Commands::Arrivals(command) => arrivals::run(&ctx, command).await,
            Commands::Inventory(command) => inventory::run(&ctx, command).await,
            Commands::Shift(command) => shift::run(&ctx, command).await,
            Commands::Supplies(command) => supplies::run(&ctx, command).await,
            Commands::Products(command) => products::run(&ctx, command).await,
            Commands::Cars(command) => cars::run(&ctx, command).await,
            Commands::Points(command) => points::run(&ctx, command).await,
            Commands::Staff(command) => staff::run(&ctx, command).await,
            Commands::Reports(command) => reports::run(&ctx, command).await,
        }
    }
}

/// Load the session and check that its role can open `screen`.
pub(crate) async fn signed_in(ctx: &AppContext, screen: Screen) -> Result<Session, String> {
    let session = ctx.sessions.require().await.map_err(|error| match &error {
        SessionError::SignedOut => "not signed in; run `waybill login` first".to_string(),
        SessionError::Storage(_) => failure(&error, "failed to read the session".to_string()),
    })?;

    if !screen.is_visible_to(Some(session.role())) {
        return Err(format!(
            "{screen} is not available to the {} role",
            session.role()
        ));
    }

    Ok(session)
}

/// Log the detailed error and hand back the message shown to the user.
pub(crate) fn failure(error: &dyn Error, message: String) -> String {
    debug!(error = %error, source = ?error.source().map(ToString::to_string), "command failed");

    message
}
