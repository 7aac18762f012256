use std::sync::atomic::{AtomicUsize, Ordering};

/// Point-in-time view of `ConnectionCount`, cheap to log or serve.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConnectionSnapshot {
    pub current: usize,
    pub total: usize,
    pub errors: usize,
}

/// Accept-loop-wide connection counters (spec §4.6, §7): how many
/// connections are live right now, how many have ever been accepted, and
/// how many were torn down by an error rather than a clean close.
#[derive(Debug, Default)]
pub struct ConnectionCount {
    current: AtomicUsize,
    total: AtomicUsize,
    errors: AtomicUsize,
}

impl ConnectionCount {
    pub fn new() -> Self {
        ConnectionCount::default()
    }

    pub fn increment(&self) {
        self.current.fetch_add(1, Ordering::Relaxed);
        self.total.fetch_add(1, Ordering::Relaxed);
    }

    pub fn decrement(&self) {
        self.current.fetch_sub(1, Ordering::Relaxed);
    }

    pub fn increment_errors(&self) {
        self.errors.fetch_add(1, Ordering::Relaxed);
    }

    pub fn current(&self) -> usize {
        self.current.load(Ordering::Relaxed)
    }

    pub fn total(&self) -> usize {
        self.total.load(Ordering::Relaxed)
    }

    pub fn errors(&self) -> usize {
        self.errors.load(Ordering::Relaxed)
    }

    pub fn snapshot(&self) -> ConnectionSnapshot {
        ConnectionSnapshot {
            current: self.current(),
            total: self.total(),
            errors: self.errors(),
        }
    }

    /// Render as Prometheus exposition-format text lines, one gauge/counter
    /// per field, under `prefix`.
    pub fn to_prometheus(&self, prefix: &str) -> String {
        let snapshot = self.snapshot();
        format!(
            "{prefix}_connections_current {current}\n{prefix}_connections_total {total}\n{prefix}_connection_errors_total {errors}\n",
            current = snapshot.current,
            total = snapshot.total,
            errors = snapshot.errors,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tracks_current_total_and_errors_independently() {
        let counts = ConnectionCount::new();
        counts.increment();
        counts.increment();
        counts.decrement();
        counts.increment_errors();

        let snapshot = counts.snapshot();
        assert_eq!(snapshot.current, 1);
        assert_eq!(snapshot.total, 2);
        assert_eq!(snapshot.errors, 1);
    }

    #[test]
    fn prometheus_text_includes_prefix() {
        let counts = ConnectionCount::new();
        counts.increment();
        let text = counts.to_prometheus("openflow");
        assert!(text.contains("openflow_connections_current 1"));
    }
}
