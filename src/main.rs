use clap::Parser;
use pestcontrol_booking::config::{CartCommand, Command};
use pestcontrol_booking::core::cart::{add_to_cart, clear_cart, load_cart};
use pestcontrol_booking::domain::model::{cart_total, CartLineItem, NavigationState};
use pestcontrol_booking::domain::ports::ProfileProvider;
use pestcontrol_booking::utils::error::ErrorSeverity;
use pestcontrol_booking::utils::{logger, validation::Validate};
use pestcontrol_booking::{
    ApiClient, AppConfig, BookingError, BookingFlow, BookingSubmitter, CartSourceResolver,
    CliConfig, ConsoleReporter, FileCartRepository, FlowOutcome, Resolution, ResultReporter,
};
use std::path::Path;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    // 初始化日誌
    logger::init_logger(cli.verbose, cli.json_logs);

    tracing::info!("🚀 Starting pestcontrol-booking");
    tracing::info!("📁 Loading configuration from: {}", cli.config.display());

    let config = match AppConfig::from_file(&cli.config) {
        Ok(config) => config,
        Err(e) => {
            eprintln!(
                "❌ Failed to load config file '{}': {}",
                cli.config.display(),
                e
            );
            eprintln!("💡 Make sure the file exists and is valid TOML format");
            std::process::exit(1);
        }
    };

    // 驗證配置
    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(1);
    }

    if let Err(e) = run(cli.command, &config).await {
        tracing::error!(
            "❌ Command failed: {} (Category: {:?}, Severity: {:?})",
            e,
            e.category(),
            e.severity()
        );
        tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());

        eprintln!("❌ {}", e.user_friendly_message());
        eprintln!("💡 {}", e.recovery_suggestion());

        let exit_code = match e.severity() {
            ErrorSeverity::Low => 0,
            ErrorSeverity::Medium => 2,
            ErrorSeverity::High => 1,
            ErrorSeverity::Critical => 3,
        };
        if exit_code > 0 {
            std::process::exit(exit_code);
        }
    }

    Ok(())
}

async fn run(command: Command, config: &AppConfig) -> Result<(), BookingError> {
    let repository = FileCartRepository::new(config.cart_dir());
    let cart_key = config.cart_key();

    match command {
        Command::Book {
            navigation_state,
            dry_run,
        } => {
            let navigation = match navigation_state {
                Some(path) => Some(read_navigation_state(&path)?),
                None => None,
            };

            let client = ApiClient::new(&config.api)?;
            let flow = BookingFlow::new(
                CartSourceResolver::new(repository, cart_key),
                BookingSubmitter::new(client.clone(), config.booking_defaults()),
                client,
                ResultReporter::new(ConsoleReporter::new()),
            );

            if dry_run {
                tracing::info!("🔍 DRY RUN MODE - No bookings will be created");
                match flow.preview(navigation).await? {
                    Resolution::Ready(snapshot) => {
                        println!("Would book {} service(s):", snapshot.items.len());
                        print_items(&snapshot.items);
                        println!("Total: {:.2} ({:?} cart)", snapshot.total, snapshot.source);
                    }
                    Resolution::RedirectToCart => println!("Cart is empty, nothing to book"),
                }
                return Ok(());
            }

            match flow.run(navigation).await? {
                FlowOutcome::Booked(batch) => {
                    tracing::info!("✅ Booked {} service(s)", batch.succeeded.len());
                }
                FlowOutcome::Failed(batch) => {
                    tracing::warn!(
                        "{} of {} booking(s) failed, cart kept for retry",
                        batch.failed.len(),
                        batch.attempted()
                    );
                    std::process::exit(2);
                }
                FlowOutcome::Redirected | FlowOutcome::AlreadySubmitting => {}
            }
        }
        Command::Profile => {
            let client = ApiClient::new(&config.api)?;
            let profile = client.fetch_profile().await?;
            println!("Name:   {}", profile.customer_name);
            println!("Email:  {}", profile.email_id);
            println!("Mobile: {}", profile.mobile_number);
            if let Some(pic) = profile.profile_pic {
                println!("Photo:  {}", pic);
            }
        }
        Command::Cart(CartCommand::Show) => {
            let items = load_cart(&repository, cart_key).await?;
            if items.is_empty() {
                println!("Cart is empty");
            } else {
                print_items(&items);
                println!("Total: {:.2}", cart_total(&items));
            }
        }
        Command::Cart(CartCommand::Add(args)) => {
            let items = add_to_cart(&repository, cart_key, CartLineItem::from(args)).await?;
            println!(
                "🛒 Cart now has {} line(s), total {:.2}",
                items.len(),
                cart_total(&items)
            );
        }
        Command::Cart(CartCommand::Clear) => {
            clear_cart(&repository, cart_key).await?;
            println!("🧹 Cart cleared");
        }
    }

    Ok(())
}

fn read_navigation_state(path: &Path) -> Result<NavigationState, BookingError> {
    let content = std::fs::read_to_string(path)?;
    Ok(serde_json::from_str(&content)?)
}

fn print_items(items: &[CartLineItem]) {
    for item in items {
        println!(
            "  - {} [{}] {} x {:.2} = {:.2}",
            item.display_name(),
            item.room_size,
            item.quantity,
            item.price,
            item.line_total()
        );
    }
}
