use crate::core::resolver::parse_persisted_cart;
use crate::core::CartRepository;
use crate::domain::model::CartLineItem;
use crate::utils::error::{BookingError, Result};
use crate::utils::validation::validate_cart_item;

/// Reads the persisted cart. A missing key is an empty cart.
pub async fn load_cart<R: CartRepository>(repository: &R, key: &str) -> Result<Vec<CartLineItem>> {
    match repository.get(key).await? {
        Some(raw) => parse_persisted_cart(&raw).map_err(|e| BookingError::InvalidCart {
            reason: e.to_string(),
        }),
        None => Ok(Vec::new()),
    }
}

/// Adds a line to the persisted cart. The same service and room size bumps the quantity.
pub async fn add_to_cart<R: CartRepository>(
    repository: &R,
    key: &str,
    item: CartLineItem,
) -> Result<Vec<CartLineItem>> {
    validate_cart_item(&item)?;
    let mut items = load_cart(repository, key).await?;

    match items.iter_mut().find(|existing| {
        existing.service_type_id == item.service_type_id && existing.room_size == item.room_size
    }) {
        Some(existing) => {
            existing.quantity = existing.quantity.saturating_add(item.quantity);
            // 以最新加入的價格為準
            existing.price = item.price;
            tracing::debug!(
                "Merged {} ({}) into existing line, quantity now {}",
                existing.service_type_name,
                existing.room_size,
                existing.quantity
            );
        }
        None => items.push(item),
    }

    repository.set(key, &serde_json::to_string(&items)?).await?;
    Ok(items)
}

pub async fn clear_cart<R: CartRepository>(repository: &R, key: &str) -> Result<()> {
    repository.clear(key).await
}
