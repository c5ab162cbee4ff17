use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Debug, Clone, Parser)]
#[command(name = "pestcontrol-booking")]
#[command(about = "Book pest-control services from the saved cart")]
pub struct CliConfig {
    /// Path to TOML configuration file
    #[arg(short, long, global = true, default_value = "booking.toml")]
    pub config: PathBuf,

    #[arg(short, long, global = true, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, global = true, help = "Emit logs as JSON")]
    pub json_logs: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Book every service in the cart
    Book {
        /// JSON file with {cartItems, totalAmount} handed over by the cart page
        #[arg(long)]
        navigation_state: Option<PathBuf>,

        /// Show what would be booked without calling the backend
        #[arg(long)]
        dry_run: bool,
    },
    /// Show the logged-in customer's profile
    Profile,
    /// Inspect or edit the saved cart
    #[command(subcommand)]
    Cart(CartCommand),
}

#[derive(Debug, Clone, Subcommand)]
pub enum CartCommand {
    Show,
    Add(AddItemArgs),
    Clear,
}

#[derive(Debug, Clone, Args)]
pub struct AddItemArgs {
    #[arg(long)]
    pub service_id: String,

    #[arg(long)]
    pub service_name: String,

    #[arg(long)]
    pub room_size: String,

    #[arg(long)]
    pub price: f64,

    #[arg(long, default_value = "1")]
    pub quantity: u32,

    #[arg(long)]
    pub name: Option<String>,

    #[arg(long)]
    pub image: Option<String>,
}
