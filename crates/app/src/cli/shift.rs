use clap::{Args, Subcommand};
use waybill::{
    navigation::Screen,
    render,
    reports::format_hours,
    shifts::elapsed_hours,
    time::{self, format_display},
};
use waybill_app::context::AppContext;

use super::{failure, signed_in};

#[derive(Debug, Args)]
pub(crate) struct ShiftCommand {
    #[command(subcommand)]
    command: ShiftSubcommand,
}

#[derive(Debug, Subcommand)]
enum ShiftSubcommand {
    /// Show the open shift
    Status,
    /// Open a shift now
    Start,
    /// Close the open shift and record it
    Finish,
    /// List your recorded shifts
    History,
}

pub(crate) async fn run(ctx: &AppContext, command: ShiftCommand) -> Result<(), String> {
    let session = signed_in(ctx, Screen::WorkingShifts).await?;
    let now = time::now();

    match command.command {
        ShiftSubcommand::Status => {
            let clock = ctx
                .shifts
                .current()
                .await
                .map_err(|error| failure(&error, error.user_message()))?;

            match clock.started_at() {
                Some(started_at) => println!(
                    "shift open since {} ({} h)",
                    format_display(started_at),
                    format_hours(elapsed_hours(started_at, Some(now)), '.')
                ),
                None => println!("no shift open"),
            }
        }
        ShiftSubcommand::Start => {
            ctx.shifts
                .start(now)
                .await
                .map_err(|error| failure(&error, error.user_message()))?;

            println!("shift started at {}", format_display(now));
        }
        ShiftSubcommand::Finish => {
            let shift = ctx
                .shifts
                .finish(session.profile.id, now)
                .await
                .map_err(|error| failure(&error, error.user_message()))?;

            println!(
                "shift recorded: {} to {} ({} h)",
                format_display(shift.start_time),
                format_display(shift.end_time),
                format_hours(elapsed_hours(shift.start_time, Some(shift.end_time)), '.')
            );
        }
        ShiftSubcommand::History => {
            let shifts = ctx
                .shifts
                .history(session.profile.id)
                .await
                .map_err(|error| failure(&error, error.user_message()))?;

            println!("{}", render::table(&shifts));
        }
    }

    Ok(())
}
