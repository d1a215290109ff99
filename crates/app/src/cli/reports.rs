use std::path::PathBuf;

use clap::{Args, Subcommand, ValueEnum};
use jiff::civil::Date;
use waybill::{
    navigation::Screen,
    render,
    reports::{ReportFilter, ReportRow, ShiftReportRow, SupplyReportRow, csv},
    shifts::ShiftStatus,
    time,
};
use waybill_app::context::AppContext;

use super::{failure, signed_in};

#[derive(Debug, Clone, Copy, ValueEnum)]
enum ShiftStatusArg {
    Completed,
    InProgress,
    Canceled,
}

impl From<ShiftStatusArg> for ShiftStatus {
    fn from(status: ShiftStatusArg) -> Self {
        match status {
            ShiftStatusArg::Completed => Self::Completed,
            ShiftStatusArg::InProgress => Self::InProgress,
            ShiftStatusArg::Canceled => Self::Canceled,
        }
    }
}

#[derive(Debug, Args)]
struct PeriodArgs {
    /// First day of the period, e.g. 2024-05-01
    #[arg(long)]
    from: Option<Date>,

    /// Last day of the period, inclusive
    #[arg(long)]
    to: Option<Date>,

    /// Case-insensitive fragment of the person's full name
    #[arg(long, default_value = "")]
    search: String,
}

#[derive(Debug, Args)]
struct ExportArgs {
    /// Write the filtered rows as CSV
    #[arg(long)]
    export: bool,

    /// CSV file; defaults to `<report>_<today>.csv`
    #[arg(long, requires = "export")]
    output: Option<PathBuf>,
}

#[derive(Debug, Args)]
pub(crate) struct ReportsCommand {
    #[command(subcommand)]
    command: ReportsSubcommand,
}

#[derive(Debug, Subcommand)]
enum ReportsSubcommand {
    /// Working shifts of pick-up point workers
    Shifts {
        #[command(flatten)]
        period: PeriodArgs,

        /// Worker id
        #[arg(long)]
        worker: Option<i64>,

        /// Shift status
        #[arg(long, value_enum)]
        status: Option<ShiftStatusArg>,

        #[command(flatten)]
        export: ExportArgs,
    },
    /// Supplies and their drivers
    Supplies {
        #[command(flatten)]
        period: PeriodArgs,

        /// Driver id
        #[arg(long)]
        driver: Option<i64>,

        /// Only ready (`true`) or not ready (`false`) supplies
        #[arg(long)]
        ready: Option<bool>,

        #[command(flatten)]
        export: ExportArgs,
    },
}

impl PeriodArgs {
    fn into_filter(self) -> ReportFilter {
        ReportFilter {
            start_date: self.from,
            end_date: self.to,
            search: self.search,
            ..ReportFilter::default()
        }
    }
}

async fn show<R: ReportRow>(
    rows: &[R],
    filter: &ReportFilter,
    export: ExportArgs,
) -> Result<(), String> {
    let rows = filter.apply(rows);

    println!("{}", render::report(rows.iter().copied()));

    if !export.export {
        return Ok(());
    }

    let Some(document) = csv::render(rows.iter().copied()) else {
        println!("nothing to export");
        return Ok(());
    };

    let path = export
        .output
        .unwrap_or_else(|| PathBuf::from(csv::file_name::<R>(time::now().date())));

    tokio::fs::write(&path, document)
        .await
        .map_err(|error| failure(&error, format!("failed to write {}", path.display())))?;

    println!("exported {} rows to {}", rows.len(), path.display());

    Ok(())
}

pub(crate) async fn run(ctx: &AppContext, command: ReportsCommand) -> Result<(), String> {
    signed_in(ctx, Screen::Reports).await?;

    let reports = ctx
        .reports
        .load()
        .await
        .map_err(|error| failure(&error, error.user_message()))?;

    match command.command {
        ReportsSubcommand::Shifts {
            period,
            worker,
            status,
            export,
        } => {
            let filter = ReportFilter {
                person_id: worker,
                shift_status: status.map(ShiftStatus::from),
                ..period.into_filter()
            };

            show::<ShiftReportRow>(&reports.shifts, &filter, export).await
        }
        ReportsSubcommand::Supplies {
            period,
            driver,
            ready,
            export,
        } => {
            let filter = ReportFilter {
                person_id: driver,
                ready,
                ..period.into_filter()
            };

            show::<SupplyReportRow>(&reports.supplies, &filter, export).await
        }
    }
}
