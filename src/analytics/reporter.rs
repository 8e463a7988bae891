//! Request log reporter for `pitwall log`.
//!
//! Aggregates the JSONL request log per endpoint: call count, failure rate,
//! average latency and the most recent error.

use std::collections::HashMap;

use chrono::Utc;

use crate::analytics::logger::{self, RequestLogEntry};

/// Summary statistics across all logged calls.
#[derive(Debug, Default)]
pub struct RequestStats {
    pub total_requests: usize,
    pub total_failures: usize,
    /// Sorted by call count, busiest endpoint first.
    pub endpoints: Vec<EndpointStat>,
}

impl RequestStats {
    pub fn failure_pct(&self) -> f64 {
        pct(self.total_failures, self.total_requests)
    }
}

/// Per-endpoint aggregate.
#[derive(Debug, Clone, PartialEq)]
pub struct EndpointStat {
    pub method: String,
    pub endpoint: String,
    pub count: usize,
    pub failures: usize,
    pub avg_latency_ms: u64,
    pub last_error: Option<String>,
}

impl EndpointStat {
    pub fn failure_pct(&self) -> f64 {
        pct(self.failures, self.count)
    }
}

fn pct(part: usize, total: usize) -> f64 {
    if total == 0 {
        0.0
    } else {
        (part as f64 / total as f64) * 100.0
    }
}

/// Compute stats from the request log, optionally limited to the last
/// `days` days.
pub fn compute_stats(days: Option<u32>) -> RequestStats {
    let entries = logger::read_all_entries();
    build_stats(&filter_since_days(entries, days))
}

fn filter_since_days(entries: Vec<RequestLogEntry>, days: Option<u32>) -> Vec<RequestLogEntry> {
    let Some(days) = days else {
        return entries;
    };

    let cutoff = (Utc::now() - chrono::Duration::days(i64::from(days))).to_rfc3339();
    entries
        .into_iter()
        .filter(|e| e.timestamp >= cutoff)
        .collect()
}

pub(crate) fn build_stats(entries: &[RequestLogEntry]) -> RequestStats {
    let mut by_endpoint: HashMap<(&str, &str), Vec<&RequestLogEntry>> = HashMap::new();
    for entry in entries {
        by_endpoint
            .entry((entry.method.as_str(), entry.endpoint.as_str()))
            .or_default()
            .push(entry);
    }

    let mut endpoints: Vec<EndpointStat> = by_endpoint
        .into_iter()
        .map(|((method, endpoint), calls)| {
            let total_latency: u64 = calls.iter().map(|e| e.latency_ms).sum();
            EndpointStat {
                method: method.to_string(),
                endpoint: endpoint.to_string(),
                count: calls.len(),
                failures: calls.iter().filter(|e| !e.success).count(),
                avg_latency_ms: total_latency / calls.len() as u64,
                last_error: calls.iter().rev().find_map(|e| e.error.clone()),
            }
        })
        .collect();

    endpoints.sort_by(|a, b| {
        b.count
            .cmp(&a.count)
            .then_with(|| a.endpoint.cmp(&b.endpoint))
    });

    RequestStats {
        total_requests: entries.len(),
        total_failures: entries.iter().filter(|e| !e.success).count(),
        endpoints,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn call(endpoint: &str, success: bool, latency_ms: u64, timestamp: &str) -> RequestLogEntry {
        RequestLogEntry {
            timestamp: timestamp.to_string(),
            method: if endpoint.ends_with("chat") { "POST" } else { "GET" }.to_string(),
            endpoint: endpoint.to_string(),
            success,
            status: success.then_some(200),
            latency_ms,
            error: (!success).then(|| format!("failed after {latency_ms}ms")),
        }
    }

    #[test]
    fn empty_log_has_zero_stats() {
        let stats = build_stats(&[]);
        assert_eq!(stats.total_requests, 0);
        assert_eq!(stats.failure_pct(), 0.0);
        assert!(stats.endpoints.is_empty());
    }

    #[test]
    fn aggregates_per_endpoint() {
        let ts = "2025-07-27T13:00:00+00:00";
        let entries = vec![
            call("/api/drivers/standings", true, 100, ts),
            call("/api/drivers/standings", true, 200, ts),
            call("/api/drivers/standings", false, 300, ts),
            call("/api/pit-wall/chat", false, 10_000, ts),
        ];

        let stats = build_stats(&entries);
        assert_eq!(stats.total_requests, 4);
        assert_eq!(stats.total_failures, 2);
        assert!((stats.failure_pct() - 50.0).abs() < f64::EPSILON);

        let standings = &stats.endpoints[0];
        assert_eq!(standings.endpoint, "/api/drivers/standings");
        assert_eq!(standings.count, 3);
        assert_eq!(standings.failures, 1);
        assert_eq!(standings.avg_latency_ms, 200);
        assert_eq!(standings.last_error.as_deref(), Some("failed after 300ms"));

        let chat = &stats.endpoints[1];
        assert_eq!(chat.method, "POST");
        assert!((chat.failure_pct() - 100.0).abs() < f64::EPSILON);
    }

    #[test]
    fn day_filter_drops_old_entries() {
        let recent = Utc::now().to_rfc3339();
        let entries = vec![
            call("/api/health", true, 5, "2001-01-01T00:00:00+00:00"),
            call("/api/health", true, 5, &recent),
        ];
        assert_eq!(filter_since_days(entries.clone(), Some(7)).len(), 1);
        assert_eq!(filter_since_days(entries, None).len(), 2);
    }
}
