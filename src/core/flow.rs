use crate::core::reporter::ResultReporter;
use crate::core::resolver::{CartSourceResolver, Resolution};
use crate::core::submitter::BookingSubmitter;
use crate::core::{BookingGateway, CartRepository, ProfileProvider};
use crate::domain::model::{BatchResult, CustomerProfile, NavigationState};
use crate::domain::ports::{Navigator, Notifier};
use crate::utils::error::Result;
use std::sync::atomic::{AtomicBool, Ordering};

#[derive(Debug, Clone, PartialEq)]
pub enum FlowOutcome {
    /// No cart to book; the user was sent to the cart view.
    Redirected,
    /// Every cart line was booked and the persisted cart cleared.
    Booked(BatchResult),
    /// At least one cart line failed; the cart is left untouched.
    Failed(BatchResult),
    /// Another submission on this flow had not finished yet.
    AlreadySubmitting,
}

/// Resets the submitting flag however the submission ends.
struct SubmissionGuard<'a>(&'a AtomicBool);

impl Drop for SubmissionGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

pub struct BookingFlow<R, G, P, U>
where
    R: CartRepository,
    G: BookingGateway,
    P: ProfileProvider,
    U: Notifier + Navigator,
{
    resolver: CartSourceResolver<R>,
    submitter: BookingSubmitter<G>,
    profiles: P,
    reporter: ResultReporter<U>,
    submitting: AtomicBool,
}

impl<R, G, P, U> BookingFlow<R, G, P, U>
where
    R: CartRepository,
    G: BookingGateway,
    P: ProfileProvider,
    U: Notifier + Navigator,
{
    pub fn new(
        resolver: CartSourceResolver<R>,
        submitter: BookingSubmitter<G>,
        profiles: P,
        reporter: ResultReporter<U>,
    ) -> Self {
        Self {
            resolver,
            submitter,
            profiles,
            reporter,
            submitting: AtomicBool::new(false),
        }
    }

    pub fn reporter(&self) -> &ResultReporter<U> {
        &self.reporter
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting.load(Ordering::Acquire)
    }

    /// Resolves the cart without submitting anything.
    pub async fn preview(&self, navigation: Option<NavigationState>) -> Result<Resolution> {
        self.resolver.resolve(navigation).await
    }

    pub async fn run(&self, navigation: Option<NavigationState>) -> Result<FlowOutcome> {
        if self
            .submitting
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            tracing::warn!("⏳ Submission already in progress, ignoring");
            let outcome = FlowOutcome::AlreadySubmitting;
            self.reporter.report(&outcome);
            return Ok(outcome);
        }
        let _guard = SubmissionGuard(&self.submitting);

        tracing::info!("🛒 Resolving cart...");
        let snapshot = match self.resolver.resolve(navigation).await? {
            Resolution::Ready(snapshot) => snapshot,
            Resolution::RedirectToCart => {
                tracing::info!("↩️ No cart to book, redirecting to cart view");
                let outcome = FlowOutcome::Redirected;
                self.reporter.report(&outcome);
                return Ok(outcome);
            }
        };
        tracing::info!(
            "🛒 {} item(s) from {:?} cart, total {:.2}",
            snapshot.items.len(),
            snapshot.source,
            snapshot.total
        );

        let profile = match self.profiles.fetch_profile().await {
            Ok(profile) => profile,
            Err(e) => {
                tracing::warn!("⚠️ Could not load customer profile, booking without it: {}", e);
                CustomerProfile::default()
            }
        };

        let batch = self.submitter.submit(&snapshot.items, &profile).await;

        let outcome = if batch.is_complete_success() {
            let repository = self.resolver.repository();
            if let Err(e) = repository.clear(self.resolver.cart_key()).await {
                tracing::error!("❌ Bookings created but the cart could not be cleared: {}", e);
            }
            tracing::info!("✅ All {} booking(s) created", batch.succeeded.len());
            FlowOutcome::Booked(batch)
        } else {
            if !batch.succeeded.is_empty() {
                // 已成功的預約不會回滾，重送會造成重複
                let created: Vec<&str> = batch
                    .succeeded
                    .iter()
                    .map(|item| item.service_type_id.as_str())
                    .collect();
                tracing::warn!(
                    "⚠️ Partial failure: {} booking(s) already created for service(s) [{}] remain on the backend",
                    created.len(),
                    created.join(", ")
                );
            }
            for (item, reason) in &batch.failed {
                tracing::error!("❌ {} ({}): {}", item.display_name(), item.room_size, reason);
            }
            FlowOutcome::Failed(batch)
        };

        self.reporter.report(&outcome);
        Ok(outcome)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::console::ConsoleReporter;
    use crate::adapters::storage::MemoryCartRepository;
    use crate::core::resolver::DEFAULT_CART_KEY;
    use crate::core::submitter::BookingDefaults;
    use crate::domain::model::{BookingRequest, BookingResult, CartLineItem};
    use crate::domain::ports::Route;
    use crate::utils::error::BookingError;
    use async_trait::async_trait;
    use std::sync::Arc;
    use tokio::sync::{Mutex, Semaphore};

    #[derive(Clone)]
    struct ScriptedGateway {
        calls: Arc<Mutex<Vec<BookingRequest>>>,
        failing_id: Option<String>,
        gate: Option<Arc<Semaphore>>,
    }

    impl ScriptedGateway {
        fn succeeding() -> Self {
            Self {
                calls: Arc::new(Mutex::new(Vec::new())),
                failing_id: None,
                gate: None,
            }
        }

        fn failing_on(id: &str) -> Self {
            Self {
                failing_id: Some(id.to_string()),
                ..Self::succeeding()
            }
        }
    }

    #[async_trait]
    impl BookingGateway for ScriptedGateway {
        async fn create_booking(&self, request: &BookingRequest) -> Result<BookingResult> {
            self.calls.lock().await.push(request.clone());
            if let Some(gate) = &self.gate {
                let _permit = gate.acquire().await.expect("gate closed");
            }
            let status = match &self.failing_id {
                Some(id) if *id == request.service_type_id => "error",
                _ => "success",
            };
            Ok(BookingResult {
                status: status.to_string(),
                message: None,
            })
        }
    }

    struct StaticProfile(Option<CustomerProfile>);

    #[async_trait]
    impl ProfileProvider for StaticProfile {
        async fn fetch_profile(&self) -> Result<CustomerProfile> {
            self.0.clone().ok_or_else(|| BookingError::UnexpectedStatus {
                status: 401,
                body: "unauthorized".to_string(),
            })
        }
    }

    fn sample_cart() -> Vec<CartLineItem> {
        vec![
            CartLineItem {
                service_type_id: "A".to_string(),
                service_type_name: "General Pest Control".to_string(),
                room_size: "Small".to_string(),
                price: 500.0,
                quantity: 1,
                name: None,
                image: None,
            },
            CartLineItem {
                service_type_id: "B".to_string(),
                service_type_name: "Termite Control".to_string(),
                room_size: "Large".to_string(),
                price: 1200.0,
                quantity: 2,
                name: None,
                image: None,
            },
        ]
    }

    async fn flow_with(
        gateway: ScriptedGateway,
        profile: Option<CustomerProfile>,
        persisted: Option<&str>,
    ) -> (
        BookingFlow<MemoryCartRepository, ScriptedGateway, StaticProfile, ConsoleReporter>,
        MemoryCartRepository,
    ) {
        let repository = MemoryCartRepository::new();
        if let Some(raw) = persisted {
            repository.set(DEFAULT_CART_KEY, raw).await.unwrap();
        }
        let flow = BookingFlow::new(
            CartSourceResolver::new(repository.clone(), DEFAULT_CART_KEY),
            BookingSubmitter::new(gateway, BookingDefaults::default()),
            StaticProfile(profile),
            ResultReporter::new(ConsoleReporter::quiet()),
        );
        (flow, repository)
    }

    #[tokio::test]
    async fn test_full_success_clears_cart_and_navigates() {
        let raw = serde_json::to_string(&sample_cart()).unwrap();
        let gateway = ScriptedGateway::succeeding();
        let (flow, repository) = flow_with(gateway.clone(), None, Some(&raw)).await;

        let outcome = flow.run(None).await.unwrap();

        assert!(matches!(outcome, FlowOutcome::Booked(ref b) if b.succeeded.len() == 2));
        assert_eq!(repository.get(DEFAULT_CART_KEY).await.unwrap(), None);
        assert_eq!(flow.reporter().ui().last_route(), Some(Route::Bookings));
        assert!(!flow.is_submitting());
    }

    #[tokio::test]
    async fn test_partial_failure_keeps_cart() {
        let raw = serde_json::to_string(&sample_cart()).unwrap();
        let (flow, repository) =
            flow_with(ScriptedGateway::failing_on("B"), None, Some(&raw)).await;

        let outcome = flow.run(None).await.unwrap();

        match outcome {
            FlowOutcome::Failed(batch) => {
                assert_eq!(batch.succeeded.len(), 1);
                assert_eq!(batch.failed.len(), 1);
                assert_eq!(batch.failed[0].0.service_type_id, "B");
            }
            other => panic!("expected failure, got {:?}", other),
        }
        assert_eq!(repository.get(DEFAULT_CART_KEY).await.unwrap(), Some(raw));
        assert_eq!(flow.reporter().ui().last_route(), None);
    }

    #[tokio::test]
    async fn test_missing_cart_makes_no_calls() {
        let gateway = ScriptedGateway::succeeding();
        let (flow, _) = flow_with(gateway.clone(), None, None).await;

        let outcome = flow.run(None).await.unwrap();

        assert_eq!(outcome, FlowOutcome::Redirected);
        assert!(gateway.calls.lock().await.is_empty());
        assert_eq!(flow.reporter().ui().last_route(), Some(Route::Cart));
    }

    #[tokio::test]
    async fn test_navigation_total_and_profile_flow_into_requests() {
        let gateway = ScriptedGateway::succeeding();
        let profile = CustomerProfile {
            customer_name: "Ravi Kumar".to_string(),
            email_id: "ravi@example.com".to_string(),
            mobile_number: "9000000001".to_string(),
            profile_pic: None,
        };
        let (flow, _) = flow_with(gateway.clone(), Some(profile), None).await;
        let navigation = NavigationState {
            cart_items: sample_cart(),
            total_amount: 3422.0,
        };

        let preview = flow.preview(Some(navigation.clone())).await.unwrap();
        assert!(matches!(preview, Resolution::Ready(ref s) if s.total == 3422.0));

        let outcome = flow.run(Some(navigation)).await.unwrap();
        assert!(matches!(outcome, FlowOutcome::Booked(_)));

        let calls = gateway.calls.lock().await;
        assert_eq!(calls.len(), 2);
        assert!(calls.iter().all(|c| c.customer_name == "Ravi Kumar"));
    }

    #[tokio::test]
    async fn test_second_submission_is_rejected_while_running() {
        let raw = serde_json::to_string(&sample_cart()).unwrap();
        let gate = Arc::new(Semaphore::new(0));
        let gateway = ScriptedGateway {
            gate: Some(gate.clone()),
            ..ScriptedGateway::succeeding()
        };
        let (flow, _) = flow_with(gateway.clone(), None, Some(&raw)).await;
        let flow = Arc::new(flow);

        let running = {
            let flow = flow.clone();
            tokio::spawn(async move { flow.run(None).await })
        };

        // 等到兩個請求都已送出
        while gateway.calls.lock().await.len() < 2 {
            tokio::task::yield_now().await;
        }
        assert!(flow.is_submitting());
        let second = flow.run(None).await.unwrap();
        assert_eq!(second, FlowOutcome::AlreadySubmitting);

        gate.add_permits(2);
        let first = running.await.unwrap().unwrap();
        assert!(matches!(first, FlowOutcome::Booked(_)));
        assert!(!flow.is_submitting());
    }
}
