use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

const CRATE_TARGET: &str = "pestcontrol_booking";

/// `RUST_LOG` wins; otherwise our own target at info, or debug with `--verbose`.
fn booking_filter(verbose: bool) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if verbose {
            EnvFilter::new(format!("{}=debug,info", CRATE_TARGET))
        } else {
            EnvFilter::new(format!("{}=info", CRATE_TARGET))
        }
    })
}

/// Compact lines for a terminal, or JSON lines when the output goes to a log collector.
pub fn init_logger(verbose: bool, json: bool) {
    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_target(false)
        .with_thread_ids(false)
        .with_file(verbose)
        .with_line_number(verbose);

    let registry = tracing_subscriber::registry().with(booking_filter(verbose));
    if json {
        registry.with(fmt_layer.json()).init();
    } else {
        registry.with(fmt_layer.compact()).init();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_verbose_raises_crate_level() {
        // RUST_LOG 有設定時以環境為準，不檢查
        if std::env::var("RUST_LOG").is_ok() {
            return;
        }
        assert!(booking_filter(true)
            .to_string()
            .contains("pestcontrol_booking=debug"));
        assert!(booking_filter(false)
            .to_string()
            .contains("pestcontrol_booking=info"));
    }
}
