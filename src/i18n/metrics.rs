//! Localization metrics.
//!
//! Counters for locale switches and the silent degradations the engine
//! performs (fallbacks, missing keys, failed notifications). One instance is
//! shared between the engine and its notifier for the lifetime of a page.

use serde::Serialize;
use std::sync::atomic::{AtomicUsize, Ordering};

#[derive(Debug, Default)]
pub struct LocalizationMetrics {
    /// Number of times a locale was applied to the page
    locales_applied: AtomicUsize,

    /// Number of applies that substituted the base locale for an unknown one
    fallbacks: AtomicUsize,

    /// Number of targets left untouched because their key was missing
    missing_keys: AtomicUsize,

    /// Number of server notifications issued
    notifications_sent: AtomicUsize,

    /// Number of server notifications that failed to reach the server
    notification_failures: AtomicUsize,
}

impl LocalizationMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_locale_applied(&self) {
        self.locales_applied.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_fallback(&self) {
        self.fallbacks.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_missing_keys(&self, count: usize) {
        self.missing_keys.fetch_add(count, Ordering::Relaxed);
    }

    pub fn record_notification_sent(&self) {
        self.notifications_sent.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_notification_failure(&self) {
        self.notification_failures.fetch_add(1, Ordering::Relaxed);
    }

    pub fn locales_applied(&self) -> usize {
        self.locales_applied.load(Ordering::Relaxed)
    }

    pub fn fallbacks(&self) -> usize {
        self.fallbacks.load(Ordering::Relaxed)
    }

    pub fn missing_keys(&self) -> usize {
        self.missing_keys.load(Ordering::Relaxed)
    }

    pub fn notifications_sent(&self) -> usize {
        self.notifications_sent.load(Ordering::Relaxed)
    }

    pub fn notification_failures(&self) -> usize {
        self.notification_failures.load(Ordering::Relaxed)
    }

    pub fn report(&self) -> MetricsReport {
        let sent = self.notifications_sent();
        let failures = self.notification_failures();
        let notification_success_rate = if sent > 0 {
            (sent.saturating_sub(failures) as f64 / sent as f64) * 100.0
        } else {
            0.0
        };

        MetricsReport {
            locales_applied: self.locales_applied(),
            fallbacks: self.fallbacks(),
            missing_keys: self.missing_keys(),
            notifications_sent: sent,
            notification_failures: failures,
            notification_success_rate,
        }
    }
}

/// Snapshot of the counters, serializable for logs and the preview binary.
#[derive(Debug, Clone, Serialize)]
pub struct MetricsReport {
    pub locales_applied: usize,
    pub fallbacks: usize,
    pub missing_keys: usize,
    pub notifications_sent: usize,
    pub notification_failures: usize,

    /// Notification success rate as a percentage (0-100)
    pub notification_success_rate: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counters_start_at_zero() {
        let metrics = LocalizationMetrics::new();
        assert_eq!(metrics.locales_applied(), 0);
        assert_eq!(metrics.fallbacks(), 0);
        assert_eq!(metrics.missing_keys(), 0);
        assert_eq!(metrics.notifications_sent(), 0);
        assert_eq!(metrics.notification_failures(), 0);
    }

    #[test]
    fn test_record_missing_keys_adds_count() {
        let metrics = LocalizationMetrics::new();
        metrics.record_missing_keys(2);
        metrics.record_missing_keys(3);
        assert_eq!(metrics.missing_keys(), 5);
    }

    #[test]
    fn test_report_empty() {
        let report = LocalizationMetrics::new().report();
        assert_eq!(report.notifications_sent, 0);
        assert_eq!(report.notification_success_rate, 0.0);
    }

    #[test]
    fn test_report_notification_success_rate() {
        let metrics = LocalizationMetrics::new();

        // 4 sent, 1 failed = 75% success rate
        for _ in 0..4 {
            metrics.record_notification_sent();
        }
        metrics.record_notification_failure();

        let report = metrics.report();
        assert_eq!(report.notifications_sent, 4);
        assert_eq!(report.notification_failures, 1);
        assert_eq!(report.notification_success_rate, 75.0);
    }

    #[test]
    fn test_report_serializes() {
        let metrics = LocalizationMetrics::new();
        metrics.record_locale_applied();
        metrics.record_fallback();

        let json = serde_json::to_value(metrics.report()).unwrap();
        assert_eq!(json["locales_applied"], 1);
        assert_eq!(json["fallbacks"], 1);
    }
}
