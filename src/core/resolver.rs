use crate::core::CartRepository;
use crate::domain::model::{cart_total, CartLineItem, CartSnapshot, CartSource, NavigationState};
use crate::utils::error::{BookingError, Result};
use crate::utils::validation::validate_cart_items;

pub const DEFAULT_CART_KEY: &str = "cart";

#[derive(Debug, Clone, PartialEq)]
pub enum Resolution {
    Ready(CartSnapshot),
    /// Nothing usable to book; send the user back to the cart view.
    RedirectToCart,
}

pub struct CartSourceResolver<R: CartRepository> {
    repository: R,
    cart_key: String,
}

impl<R: CartRepository> CartSourceResolver<R> {
    pub fn new(repository: R, cart_key: impl Into<String>) -> Self {
        Self {
            repository,
            cart_key: cart_key.into(),
        }
    }

    pub fn repository(&self) -> &R {
        &self.repository
    }

    pub fn cart_key(&self) -> &str {
        &self.cart_key
    }

    /// Navigation state wins when it carries items, and its total is taken as-is.
    /// Otherwise the persisted cart is parsed and its total recomputed.
    pub async fn resolve(&self, navigation: Option<NavigationState>) -> Result<Resolution> {
        if let Some(state) = navigation {
            if !state.cart_items.is_empty() {
                tracing::debug!(
                    "Using {} item(s) from navigation state, total {}",
                    state.cart_items.len(),
                    state.total_amount
                );
                return Ok(Resolution::Ready(CartSnapshot {
                    items: state.cart_items,
                    total: state.total_amount,
                    source: CartSource::Navigation,
                }));
            }
            tracing::debug!("Navigation state carried no items, falling back to persisted cart");
        }

        let raw = match self.repository.get(&self.cart_key).await {
            Ok(Some(raw)) => raw,
            Ok(None) => {
                tracing::info!("No persisted cart under '{}'", self.cart_key);
                return Ok(Resolution::RedirectToCart);
            }
            Err(BookingError::InvalidCart { reason }) => {
                tracing::warn!("⚠️ Ignoring unreadable persisted cart: {}", reason);
                return Ok(Resolution::RedirectToCart);
            }
            Err(e) => return Err(e),
        };

        let items = match parse_persisted_cart(&raw) {
            Ok(items) => items,
            Err(e) => {
                tracing::warn!("⚠️ Ignoring unreadable persisted cart: {}", e);
                return Ok(Resolution::RedirectToCart);
            }
        };

        if items.is_empty() {
            tracing::info!("Persisted cart is empty");
            return Ok(Resolution::RedirectToCart);
        }

        let total = cart_total(&items);
        tracing::debug!(
            "Using {} item(s) from persisted cart, recomputed total {}",
            items.len(),
            total
        );
        Ok(Resolution::Ready(CartSnapshot {
            items,
            total,
            source: CartSource::Persisted,
        }))
    }
}

pub fn parse_persisted_cart(raw: &str) -> Result<Vec<CartLineItem>> {
    let items: Vec<CartLineItem> = serde_json::from_str(raw)?;
    validate_cart_items(&items)?;
    Ok(items)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::storage::MemoryCartRepository;

    fn item(id: &str, room: &str, price: f64, quantity: u32) -> CartLineItem {
        CartLineItem {
            service_type_id: id.to_string(),
            service_type_name: format!("Service {}", id),
            room_size: room.to_string(),
            price,
            quantity,
            name: None,
            image: None,
        }
    }

    fn sample_cart() -> Vec<CartLineItem> {
        vec![item("A", "Small", 500.0, 1), item("B", "Large", 1200.0, 2)]
    }

    #[tokio::test]
    async fn test_navigation_total_is_trusted() {
        let repository = MemoryCartRepository::new();
        let resolver = CartSourceResolver::new(repository, DEFAULT_CART_KEY);

        // 總額與品項加總不同，仍照單全收
        let state = NavigationState {
            cart_items: sample_cart(),
            total_amount: 3422.0,
        };
        let resolution = resolver.resolve(Some(state)).await.unwrap();

        match resolution {
            Resolution::Ready(snapshot) => {
                assert_eq!(snapshot.total, 3422.0);
                assert_eq!(snapshot.items.len(), 2);
                assert_eq!(snapshot.source, CartSource::Navigation);
            }
            other => panic!("expected a ready cart, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_persisted_total_is_recomputed() {
        let repository = MemoryCartRepository::new();
        repository
            .set(DEFAULT_CART_KEY, &serde_json::to_string(&sample_cart()).unwrap())
            .await
            .unwrap();
        let resolver = CartSourceResolver::new(repository, DEFAULT_CART_KEY);

        let resolution = resolver.resolve(None).await.unwrap();

        match resolution {
            Resolution::Ready(snapshot) => {
                assert_eq!(snapshot.total, 2900.0);
                assert_eq!(snapshot.source, CartSource::Persisted);
            }
            other => panic!("expected a ready cart, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_empty_navigation_state_falls_back_to_persisted_cart() {
        let repository = MemoryCartRepository::new();
        repository
            .set(DEFAULT_CART_KEY, &serde_json::to_string(&sample_cart()).unwrap())
            .await
            .unwrap();
        let resolver = CartSourceResolver::new(repository, DEFAULT_CART_KEY);

        let state = NavigationState {
            cart_items: vec![],
            total_amount: 10.0,
        };
        let resolution = resolver.resolve(Some(state)).await.unwrap();

        assert!(matches!(
            resolution,
            Resolution::Ready(CartSnapshot { total, source: CartSource::Persisted, .. }) if total == 2900.0
        ));
    }

    #[tokio::test]
    async fn test_missing_cart_redirects() {
        let resolver = CartSourceResolver::new(MemoryCartRepository::new(), DEFAULT_CART_KEY);
        let resolution = resolver.resolve(None).await.unwrap();
        assert_eq!(resolution, Resolution::RedirectToCart);
    }

    #[tokio::test]
    async fn test_unparseable_cart_redirects() {
        let repository = MemoryCartRepository::new();
        repository.set(DEFAULT_CART_KEY, "{not json").await.unwrap();
        let resolver = CartSourceResolver::new(repository, DEFAULT_CART_KEY);

        let resolution = resolver.resolve(None).await.unwrap();
        assert_eq!(resolution, Resolution::RedirectToCart);
    }

    #[tokio::test]
    async fn test_cart_breaking_invariants_redirects() {
        let repository = MemoryCartRepository::new();
        let bad = vec![item("A", "Small", 500.0, 0)];
        repository
            .set(DEFAULT_CART_KEY, &serde_json::to_string(&bad).unwrap())
            .await
            .unwrap();
        let resolver = CartSourceResolver::new(repository, DEFAULT_CART_KEY);

        let resolution = resolver.resolve(None).await.unwrap();
        assert_eq!(resolution, Resolution::RedirectToCart);
    }

    #[tokio::test]
    async fn test_empty_persisted_array_redirects() {
        let repository = MemoryCartRepository::new();
        repository.set(DEFAULT_CART_KEY, "[]").await.unwrap();
        let resolver = CartSourceResolver::new(repository, DEFAULT_CART_KEY);

        assert_eq!(
            resolver.resolve(None).await.unwrap(),
            Resolution::RedirectToCart
        );
    }
}
