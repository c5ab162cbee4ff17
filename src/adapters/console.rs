use crate::domain::ports::{Navigator, Notification, NotificationLevel, Notifier, Route};
use std::sync::{Arc, Mutex};

#[derive(Debug, Default)]
struct Recorded {
    notifications: Vec<Notification>,
    last_route: Option<Route>,
}

/// Toast and navigation stand-in for the terminal. Keeps what it showed so callers can inspect it.
#[derive(Debug, Clone, Default)]
pub struct ConsoleReporter {
    recorded: Arc<Mutex<Recorded>>,
    echo: bool,
}

impl ConsoleReporter {
    pub fn new() -> Self {
        Self {
            recorded: Arc::default(),
            echo: true,
        }
    }

    /// Records without printing.
    pub fn quiet() -> Self {
        Self::default()
    }

    pub fn notifications(&self) -> Vec<Notification> {
        self.recorded
            .lock()
            .map(|r| r.notifications.clone())
            .unwrap_or_default()
    }

    pub fn last_route(&self) -> Option<Route> {
        self.recorded.lock().ok().and_then(|r| r.last_route)
    }
}

impl Notifier for ConsoleReporter {
    fn notify(&self, notification: Notification) {
        if self.echo {
            match notification.level {
                NotificationLevel::Success => println!("✅ {}", notification.message),
                NotificationLevel::Error => eprintln!("❌ {}", notification.message),
                NotificationLevel::Info => println!("ℹ️  {}", notification.message),
            }
        }
        if let Ok(mut recorded) = self.recorded.lock() {
            recorded.notifications.push(notification);
        }
    }
}

impl Navigator for ConsoleReporter {
    fn navigate(&self, route: Route) {
        if self.echo {
            let target = match route {
                Route::Cart => "cart",
                Route::Bookings => "my bookings",
            };
            println!("➡️  Go to {}", target);
        }
        tracing::debug!("Navigating to {:?}", route);
        if let Ok(mut recorded) = self.recorded.lock() {
            recorded.last_route = Some(route);
        }
    }
}
