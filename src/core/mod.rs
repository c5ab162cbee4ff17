pub mod cart;
pub mod flow;
pub mod reporter;
pub mod resolver;
pub mod submitter;

pub use crate::domain::model::{BatchResult, CartLineItem, CartSnapshot, NavigationState};
pub use crate::domain::ports::{BookingGateway, CartRepository, ProfileProvider};
pub use crate::utils::error::Result;
