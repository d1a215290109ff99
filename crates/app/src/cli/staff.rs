use clap::{Args, Subcommand, ValueEnum};
use waybill::{
    navigation::Screen,
    render,
    users::{NewUser, Role, UserId},
};
use waybill_app::context::AppContext;

use super::{failure, signed_in};

#[derive(Debug, Clone, Copy, ValueEnum)]
enum RoleArg {
    Admin,
    Worker,
    Driver,
}

impl From<RoleArg> for Role {
    fn from(role: RoleArg) -> Self {
        match role {
            RoleArg::Admin => Self::Admin,
            RoleArg::Worker => Self::Worker,
            RoleArg::Driver => Self::Driver,
        }
    }
}

#[derive(Debug, Args)]
pub(crate) struct RegisterArgs {
    /// Login name
    #[arg(long, default_value = "")]
    login: String,

    /// Password
    #[arg(long, env = "WAYBILL_NEW_USER_PASSWORD", hide_env_values = true, default_value = "")]
    password: String,

    /// Given name
    #[arg(long, default_value = "")]
    name: String,

    /// Family name
    #[arg(long, default_value = "")]
    surname: String,

    /// Patronymic
    #[arg(long, default_value = "")]
    last_name: String,

    /// Age in years
    #[arg(long, default_value_t = 0)]
    age: u32,

    /// Contact phone number
    #[arg(long, default_value = "")]
    phone: String,

    /// Region code
    #[arg(long, default_value_t = 0)]
    region: i64,

    /// Role
    #[arg(long, value_enum)]
    role: RoleArg,
}

#[derive(Debug, Args)]
pub(crate) struct StaffCommand {
    #[command(subcommand)]
    command: StaffSubcommand,
}

#[derive(Debug, Subcommand)]
enum StaffSubcommand {
    /// List drivers
    Drivers {
        /// Region code
        #[arg(long)]
        region: Option<i64>,
    },
    /// List pick-up point workers
    Workers {
        /// Region code
        #[arg(long)]
        region: Option<i64>,
    },
    /// List every user
    Users,
    /// Register a user
    Register(RegisterArgs),
    /// Delete a user
    DeleteUser {
        /// User id
        #[arg(long)]
        user: UserId,
    },
}

pub(crate) async fn run(ctx: &AppContext, command: StaffCommand) -> Result<(), String> {
    signed_in(ctx, Screen::Staff).await?;

    match command.command {
        StaffSubcommand::Drivers { region } => {
            let drivers = ctx
                .fleet
                .drivers(region)
                .await
                .map_err(|error| failure(&error, error.user_message()))?;

            println!("{}", render::table(&drivers));
        }
        StaffSubcommand::Workers { region } => {
            let workers = ctx
                .fleet
                .workers(region)
                .await
                .map_err(|error| failure(&error, error.user_message()))?;

            println!("{}", render::table(&workers));
        }
        StaffSubcommand::Users => {
            let users = ctx
                .fleet
                .users()
                .await
                .map_err(|error| failure(&error, error.user_message()))?;

            println!("{}", render::table(&users));
        }
        StaffSubcommand::Register(args) => {
            let login = args.login.clone();

            ctx.fleet
                .register_user(NewUser {
                    login: args.login,
                    password: args.password,
                    name: args.name,
                    surname: args.surname,
                    last_name: args.last_name,
                    age: args.age,
                    phone_number: args.phone,
                    region: args.region,
                    role: args.role.into(),
                })
                .await
                .map_err(|error| failure(&error, error.user_message()))?;

            println!("user {login} registered");
        }
        StaffSubcommand::DeleteUser { user } => {
            ctx.fleet
                .delete_user(user)
                .await
                .map_err(|error| failure(&error, error.user_message()))?;

            println!("user {user} deleted");
        }
    }

    Ok(())
}
