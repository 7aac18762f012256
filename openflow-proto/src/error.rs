use std::sync::atomic::{AtomicU64, Ordering};

use thiserror::Error;

/// Errors produced while decoding or encoding wire data.
///
/// Every variant corresponds to one of the failure kinds a conforming
/// decoder must distinguish; see `ErrorCounters` for the matching
/// per-kind observability counters.
#[derive(Error, Debug)]
pub enum ProtoError {
    #[error("truncated: needed {needed} bytes, had {available}")]
    Truncated { needed: usize, available: usize },

    #[error("version mismatch: expected 0x01, saw {0:#04x}")]
    VersionMismatch(u8),

    #[error("unknown message type {0}")]
    UnknownMessageType(u8),

    #[error("unknown ethertype {0:#06x}")]
    UnknownEtherType(u16),

    #[error("unknown IP protocol {0}")]
    UnknownIpProtocol(u8),

    #[error("malformed trailer: {0} bytes left after decoding a complete body")]
    MalformedTrailer(usize),

    #[error("invalid value for {field}: {value}")]
    InvalidEnum { field: &'static str, value: u32 },

    #[error("length inconsistent: header said {declared}, body needs {actual}")]
    LengthInconsistent { declared: usize, actual: usize },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("config error: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, ProtoError>;

impl ProtoError {
    fn counter_index(&self) -> usize {
        match self {
            ProtoError::Truncated { .. } => 0,
            ProtoError::VersionMismatch(_) => 1,
            ProtoError::UnknownMessageType(_) => 2,
            ProtoError::UnknownEtherType(_) => 3,
            ProtoError::UnknownIpProtocol(_) => 4,
            ProtoError::MalformedTrailer(_) => 5,
            ProtoError::InvalidEnum { .. } => 6,
            ProtoError::LengthInconsistent { .. } => 7,
            ProtoError::Io(_) => 8,
            ProtoError::Config(_) => 9,
        }
    }
}

const KIND_COUNT: usize = 10;
const KIND_NAMES: [&str; KIND_COUNT] = [
    "truncated",
    "version_mismatch",
    "unknown_message_type",
    "unknown_ethertype",
    "unknown_ip_protocol",
    "malformed_trailer",
    "invalid_enum",
    "length_inconsistent",
    "io_error",
    "config_error",
];

/// Per-error-kind counters, so that no decode failure is ever swallowed
/// silently: every `ProtoError` bumps exactly one of these before the
/// connection task logs and closes. Mirrors the atomics-with-snapshot
/// shape of the connection counters in `server::metrics`.
#[derive(Debug)]
pub struct ErrorCounters {
    counts: [AtomicU64; KIND_COUNT],
}

impl Default for ErrorCounters {
    fn default() -> Self {
        Self {
            counts: std::array::from_fn(|_| AtomicU64::new(0)),
        }
    }
}

impl ErrorCounters {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&self, err: &ProtoError) {
        self.counts[err.counter_index()].fetch_add(1, Ordering::Relaxed);
    }

    /// Snapshot of `(kind, count)` pairs for every kind, in declaration order.
    pub fn snapshot(&self) -> Vec<(&'static str, u64)> {
        KIND_NAMES
            .iter()
            .zip(self.counts.iter())
            .map(|(name, count)| (*name, count.load(Ordering::Relaxed)))
            .collect()
    }

    pub fn total(&self) -> u64 {
        self.counts.iter().map(|c| c.load(Ordering::Relaxed)).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counters_track_distinct_kinds() {
        let counters = ErrorCounters::new();
        counters.record(&ProtoError::Truncated { needed: 4, available: 1 });
        counters.record(&ProtoError::Truncated { needed: 8, available: 2 });
        counters.record(&ProtoError::VersionMismatch(2));

        let snapshot = counters.snapshot();
        let truncated = snapshot.iter().find(|(k, _)| *k == "truncated").unwrap();
        let version = snapshot
            .iter()
            .find(|(k, _)| *k == "version_mismatch")
            .unwrap();
        assert_eq!(truncated.1, 2);
        assert_eq!(version.1, 1);
        assert_eq!(counters.total(), 3);
    }
}
