use crate::core::flow::FlowOutcome;
use crate::domain::ports::{Navigator, Notification, Notifier, Route};

pub const BOOKED_MESSAGE: &str = "All services booked successfully!";
pub const FAILED_MESSAGE: &str = "Failed to book services. Please try again.";
pub const BUSY_MESSAGE: &str = "A booking is already being submitted.";

/// Turns a flow outcome into a notification and, where needed, a navigation.
pub struct ResultReporter<U: Notifier + Navigator> {
    ui: U,
}

impl<U: Notifier + Navigator> ResultReporter<U> {
    pub fn new(ui: U) -> Self {
        Self { ui }
    }

    pub fn ui(&self) -> &U {
        &self.ui
    }

    pub fn report(&self, outcome: &FlowOutcome) {
        match outcome {
            FlowOutcome::Redirected => self.ui.navigate(Route::Cart),
            FlowOutcome::Booked(batch) => {
                let message = if batch.succeeded.len() == 1 {
                    "Service booked successfully!".to_string()
                } else {
                    BOOKED_MESSAGE.to_string()
                };
                self.ui.notify(Notification::success(message));
                self.ui.navigate(Route::Bookings);
            }
            // 不告訴使用者哪一項失敗，購物車保留讓使用者自行重試
            FlowOutcome::Failed(_) => self.ui.notify(Notification::error(FAILED_MESSAGE)),
            FlowOutcome::AlreadySubmitting => self.ui.notify(Notification::info(BUSY_MESSAGE)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::console::ConsoleReporter;
    use crate::domain::model::{BatchResult, CartLineItem, FailureReason};
    use crate::domain::ports::NotificationLevel;

    fn item(id: &str) -> CartLineItem {
        CartLineItem {
            service_type_id: id.to_string(),
            service_type_name: format!("Service {}", id),
            room_size: "Small".to_string(),
            price: 100.0,
            quantity: 1,
            name: None,
            image: None,
        }
    }

    #[test]
    fn test_success_navigates_to_bookings() {
        let reporter = ResultReporter::new(ConsoleReporter::quiet());
        let batch = BatchResult {
            succeeded: vec![item("A"), item("B")],
            failed: vec![],
        };

        reporter.report(&FlowOutcome::Booked(batch));

        let ui = reporter.ui();
        assert_eq!(ui.last_route(), Some(Route::Bookings));
        let notifications = ui.notifications();
        assert_eq!(notifications.len(), 1);
        assert_eq!(notifications[0].level, NotificationLevel::Success);
        assert_eq!(notifications[0].message, BOOKED_MESSAGE);
    }

    #[test]
    fn test_failure_stays_on_page() {
        let reporter = ResultReporter::new(ConsoleReporter::quiet());
        let batch = BatchResult {
            succeeded: vec![item("A")],
            failed: vec![(item("B"), FailureReason::Transport("timeout".to_string()))],
        };

        reporter.report(&FlowOutcome::Failed(batch));

        let ui = reporter.ui();
        assert_eq!(ui.last_route(), None);
        assert_eq!(ui.notifications()[0].level, NotificationLevel::Error);
        assert_eq!(ui.notifications()[0].message, FAILED_MESSAGE);
    }

    #[test]
    fn test_redirect_has_no_notification() {
        let reporter = ResultReporter::new(ConsoleReporter::quiet());
        reporter.report(&FlowOutcome::Redirected);

        assert_eq!(reporter.ui().last_route(), Some(Route::Cart));
        assert!(reporter.ui().notifications().is_empty());
    }
}
