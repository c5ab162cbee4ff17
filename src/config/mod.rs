#[cfg(feature = "cli")]
pub mod cli;
pub mod toml_config;

#[cfg(feature = "cli")]
pub use cli::{AddItemArgs, CartCommand, CliConfig, Command};
pub use toml_config::{ApiConfig, AppConfig};

#[cfg(feature = "cli")]
impl From<AddItemArgs> for crate::domain::model::CartLineItem {
    fn from(args: AddItemArgs) -> Self {
        Self {
            service_type_id: args.service_id,
            service_type_name: args.service_name,
            room_size: args.room_size,
            price: args.price,
            quantity: args.quantity,
            name: args.name,
            image: args.image,
        }
    }
}
