use serde::{Deserialize, Serialize};

/// Dashboard settings, read from the environment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardConfig {
    pub histogram_buckets: usize,
    pub top_n: usize,
    /// Row whose improvement text is shown when the selected row has none.
    pub example_fallback_index: usize,
    /// Exact T value prediction rate, in percent. Supplied externally and
    /// displayed as is.
    pub t_accuracy_pct: f64,
    pub bind: String,
    pub port: u16,
    /// How long the server waits for a request line before answering 408.
    pub read_timeout_ms: u64,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            histogram_buckets: 10,
            top_n: 8,
            example_fallback_index: 0,
            t_accuracy_pct: 3.85,
            bind: "127.0.0.1".to_string(),
            port: 8765,
            read_timeout_ms: 5_000,
        }
    }
}

impl DashboardConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup; unset or unparsable keys keep their defaults.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let d = Self::default();
        Self {
            histogram_buckets: lookup("HISTOGRAM_BUCKETS")
                .and_then(|v| v.parse().ok())
                .unwrap_or(d.histogram_buckets),
            top_n: lookup("TOP_N")
                .and_then(|v| v.parse().ok())
                .unwrap_or(d.top_n),
            example_fallback_index: lookup("EXAMPLE_FALLBACK_INDEX")
                .and_then(|v| v.parse().ok())
                .unwrap_or(d.example_fallback_index),
            t_accuracy_pct: lookup("T_ACCURACY_PCT")
                .and_then(|v| v.parse().ok())
                .unwrap_or(d.t_accuracy_pct),
            bind: lookup("DASHBOARD_BIND").unwrap_or(d.bind),
            port: lookup("DASHBOARD_PORT")
                .and_then(|v| v.parse().ok())
                .unwrap_or(d.port),
            read_timeout_ms: lookup("READ_TIMEOUT_MS")
                .and_then(|v| v.parse().ok())
                .filter(|ms| *ms > 0)
                .unwrap_or(d.read_timeout_ms),
        }
    }

    pub fn addr(&self) -> String {
        format!("{}:{}", self.bind, self.port)
    }
}
