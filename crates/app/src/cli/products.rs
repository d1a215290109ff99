use clap::{Args, Subcommand, ValueEnum};
use waybill::{
    fleet::PickUpPointId,
    navigation::Screen,
    products::{NewProduct, ProductFilter, ProductStatus},
    render,
    supplies::SupplyId,
};
use waybill_app::context::AppContext;

use super::{failure, signed_in};

#[derive(Debug, Clone, Copy, ValueEnum)]
pub(crate) enum StatusArg {
    NotSent,
    SentInPvz,
    DeliveredInPvz,
    Received,
}

impl From<StatusArg> for ProductStatus {
    fn from(status: StatusArg) -> Self {
        match status {
            StatusArg::NotSent => Self::NotSent,
            StatusArg::SentInPvz => Self::SentInPvz,
            StatusArg::DeliveredInPvz => Self::DeliveredInPvz,
            StatusArg::Received => Self::Received,
        }
    }
}

#[derive(Debug, Args)]
pub(crate) struct FilterArgs {
    /// Only show products with this status
    #[arg(long)]
    status: Option<StatusArg>,

    /// Case-insensitive article number fragment
    #[arg(long, default_value = "")]
    search: String,
}

impl From<FilterArgs> for ProductFilter {
    fn from(args: FilterArgs) -> Self {
        Self {
            status: args.status.map(ProductStatus::from),
            search: args.search,
        }
    }
}

#[derive(Debug, Args)]
pub(crate) struct ProductsCommand {
    #[command(subcommand)]
    command: ProductsSubcommand,
}

#[derive(Debug, Subcommand)]
enum ProductsSubcommand {
    /// List the catalog
    List(FilterArgs),
    /// Add a product to the catalog
    Add {
        /// Article number
        #[arg(long)]
        articul: Option<String>,

        /// Description
        #[arg(long)]
        description: Option<String>,

        /// Pick-up point the product is addressed to
        #[arg(long)]
        point: Option<PickUpPointId>,

        /// Supply carrying the product
        #[arg(long)]
        supply: Option<SupplyId>,

        /// Initial status
        #[arg(long, value_enum, default_value_t = StatusArg::NotSent)]
        status: StatusArg,
    },
}

pub(crate) async fn run(ctx: &AppContext, command: ProductsCommand) -> Result<(), String> {
    signed_in(ctx, Screen::Products).await?;

    match command.command {
        ProductsSubcommand::List(filter) => {
            let products = ctx
                .products
                .catalog(filter.into())
                .await
                .map_err(|error| failure(&error, error.user_message()))?;

            println!("{}", render::table(&products));
        }
        ProductsSubcommand::Add {
            articul,
            description,
            point,
            supply,
            status,
        } => {
            let product = ctx
                .products
                .add_product(NewProduct {
                    articul: articul.unwrap_or_default(),
                    discr: description.unwrap_or_default(),
                    pick_up_point_id: point,
                    supply_id: supply,
                    status: status.into(),
                })
                .await
                .map_err(|error| failure(&error, error.user_message()))?;

            match product {
                Some(product) => println!("product_id: {}", product.id),
                None => println!("product added"),
            }
        }
    }

    Ok(())
}
