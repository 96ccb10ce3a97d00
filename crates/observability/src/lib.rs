use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use once_cell::sync::OnceCell;
use serde::Serialize;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

static TRACING_INIT: OnceCell<()> = OnceCell::new();

#[derive(Debug, Default)]
pub struct AppMetrics {
    requests_total: AtomicU64,
    fallback_total: AtomicU64,
    plot_replies_total: AtomicU64,
    default_replies_total: AtomicU64,
    total_latency_millis: AtomicU64,
}

#[derive(Debug, Clone, Serialize)]
pub struct MetricsSnapshot {
    pub requests_total: u64,
    pub fallback_total: u64,
    pub plot_replies_total: u64,
    pub default_replies_total: u64,
    pub avg_latency_millis: f64,
}

impl AppMetrics {
    pub fn shared() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn inc_request(&self) {
        self.requests_total.fetch_add(1, Ordering::Relaxed);
    }

    pub fn inc_fallback(&self) {
        self.fallback_total.fetch_add(1, Ordering::Relaxed);
    }

    pub fn inc_plot_reply(&self) {
        self.plot_replies_total.fetch_add(1, Ordering::Relaxed);
    }

    pub fn inc_default_reply(&self) {
        self.default_replies_total.fetch_add(1, Ordering::Relaxed);
    }

    pub fn observe_latency(&self, duration: Duration) {
        self.total_latency_millis
            .fetch_add(duration.as_millis() as u64, Ordering::Relaxed);
    }

    pub fn snapshot(&self) -> MetricsSnapshot {
        let requests = self.requests_total.load(Ordering::Relaxed);
        let latency = self.total_latency_millis.load(Ordering::Relaxed);

        MetricsSnapshot {
            requests_total: requests,
            fallback_total: self.fallback_total.load(Ordering::Relaxed),
            plot_replies_total: self.plot_replies_total.load(Ordering::Relaxed),
            default_replies_total: self.default_replies_total.load(Ordering::Relaxed),
            avg_latency_millis: if requests == 0 {
                0.0
            } else {
                latency as f64 / requests as f64
            },
        }
    }
}

const LOG_TARGETS: &[&str] = &["floatchat_agents", "floatchat_dashboard", "floatchat_storage"];

pub fn default_directives(service_name: &str) -> String {
    std::iter::once(service_name)
        .chain(LOG_TARGETS.iter().copied().filter(|target| *target != service_name))
        .map(|target| format!("{target}=info"))
        .collect::<Vec<_>>()
        .join(",")
}

// JSON on stderr; stdout belongs to the chat prompt.
pub fn init_tracing(service_name: &str) {
    TRACING_INIT.get_or_init(|| {
        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(default_directives(service_name)));
        let json_logs = fmt::layer()
            .json()
            .with_current_span(true)
            .with_span_list(true)
            .with_writer(std::io::stderr);

        // a host process may already own the global subscriber
        let _ = tracing_subscriber::registry()
            .with(filter)
            .with(json_logs)
            .try_init();
    });
}
