//! Shortcode lifecycle manager
//!
//! The registry owns the shortcode → record map: it allocates codes with
//! collision avoidance, enforces expiry on the redirect path, and records
//! clicks against the [`ClickLedger`](crate::analytics::ClickLedger).
//!
//! Consistency discipline: `DashMap::entry` makes creation an atomic
//! check-and-insert, and every record sits behind its own `parking_lot`
//! mutex. Resolve's expiry-check, counter increment, and ledger append all
//! happen under that per-record mutex, so a stats snapshot can never observe
//! a click count without its matching ledger entry. Unrelated shortcodes
//! never contend.

pub mod models;

use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use parking_lot::Mutex;

use crate::analytics::ClickLedger;
use crate::errors::{Result, SnaplinkError};
use crate::utils::{generate_random_code, url_validator::validate_url};

use models::{CreatedLink, LinkStats, UrlRecord, VisitMetadata};

/// Lifetime applied when the caller does not pick one.
pub const DEFAULT_VALIDITY_MINUTES: i64 = 30;

/// Length of generated shortcodes. 36^6 candidate codes.
pub const DEFAULT_CODE_LENGTH: usize = 6;

/// Bound on the generate-and-retry loop. At any occupancy this registry can
/// reach in one process lifetime, hitting it means the RNG is broken.
const MAX_CODE_ATTEMPTS: usize = 64;

pub struct Registry {
    entries: DashMap<String, Arc<Mutex<UrlRecord>>>,
    ledger: ClickLedger,
    code_length: usize,
    default_validity_minutes: i64,
}

impl Default for Registry {
    fn default() -> Self {
        Self::new()
    }
}

impl Registry {
    pub fn new() -> Self {
        Self::with_policy(DEFAULT_CODE_LENGTH, DEFAULT_VALIDITY_MINUTES)
    }

    pub fn with_policy(code_length: usize, default_validity_minutes: i64) -> Self {
        Self {
            entries: DashMap::new(),
            ledger: ClickLedger::new(),
            code_length,
            default_validity_minutes,
        }
    }

    /// Number of shortcodes ever issued, expired ones included.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Create a short URL for `original_url`.
    ///
    /// Validation runs before any allocation, so a failed create leaves the
    /// store untouched. Codes are unique across the process lifetime; an
    /// expired record still blocks reuse of its code.
    pub fn create(
        &self,
        original_url: &str,
        validity_minutes: Option<i64>,
        custom_code: Option<&str>,
    ) -> Result<CreatedLink> {
        self.create_at(original_url, validity_minutes, custom_code, Utc::now())
    }

    /// Deterministic-clock variant of [`create`](Self::create).
    pub fn create_at(
        &self,
        original_url: &str,
        validity_minutes: Option<i64>,
        custom_code: Option<&str>,
        now: DateTime<Utc>,
    ) -> Result<CreatedLink> {
        validate_url(original_url).map_err(|e| SnaplinkError::invalid_url(e.to_string()))?;

        let validity = match validity_minutes {
            None => self.default_validity_minutes,
            Some(v) if v > 0 => v,
            Some(v) => {
                return Err(SnaplinkError::invalid_validity(format!(
                    "validity must be a positive number of minutes, got {}",
                    v
                )));
            }
        };

        // Large validities can overflow both the duration and the timestamp;
        // both are validity errors, not panics.
        let expiry_at = Duration::try_minutes(validity)
            .and_then(|d| now.checked_add_signed(d))
            .ok_or_else(|| {
                SnaplinkError::invalid_validity(format!(
                    "validity of {} minutes is out of range",
                    validity
                ))
            })?;

        if let Some(code) = custom_code {
            if !self.try_insert(code, original_url, now, expiry_at) {
                return Err(SnaplinkError::shortcode_exists(format!(
                    "shortcode '{}' is already in use",
                    code
                )));
            }
            return Ok(CreatedLink {
                shortcode: code.to_string(),
                expiry_at,
            });
        }

        for _ in 0..MAX_CODE_ATTEMPTS {
            let code = generate_random_code(self.code_length);
            if self.try_insert(&code, original_url, now, expiry_at) {
                return Ok(CreatedLink {
                    shortcode: code,
                    expiry_at,
                });
            }
        }

        Err(SnaplinkError::code_space_exhausted(format!(
            "could not find a free {}-character code after {} attempts",
            self.code_length, MAX_CODE_ATTEMPTS
        )))
    }

    /// Atomic check-and-insert; `false` means the code was already taken.
    fn try_insert(
        &self,
        shortcode: &str,
        original_url: &str,
        now: DateTime<Utc>,
        expiry_at: DateTime<Utc>,
    ) -> bool {
        match self.entries.entry(shortcode.to_string()) {
            Entry::Occupied(_) => false,
            Entry::Vacant(slot) => {
                slot.insert(Arc::new(Mutex::new(UrlRecord {
                    shortcode: shortcode.to_string(),
                    original_url: original_url.to_string(),
                    created_at: now,
                    expiry_at,
                    click_count: 0,
                })));
                self.ledger.register(shortcode);
                true
            }
        }
    }

    /// Resolve a shortcode to its target URL, recording the visit.
    ///
    /// A successful resolution increments the click count and appends one
    /// ledger event as a single critical section; failures record nothing.
    pub fn resolve(&self, shortcode: &str, visit: VisitMetadata) -> Result<String> {
        self.resolve_at(shortcode, visit, Utc::now())
    }

    /// Deterministic-clock variant of [`resolve`](Self::resolve).
    pub fn resolve_at(
        &self,
        shortcode: &str,
        visit: VisitMetadata,
        now: DateTime<Utc>,
    ) -> Result<String> {
        let slot = self.record_slot(shortcode)?;

        let mut record = slot.lock();
        if record.is_expired_at(now) {
            return Err(SnaplinkError::expired(format!(
                "shortcode '{}' expired at {}",
                shortcode,
                record.expiry_at.to_rfc3339()
            )));
        }

        record.click_count += 1;
        self.ledger.append(shortcode, visit.into_event(now));

        Ok(record.original_url.clone())
    }

    /// Snapshot of a record and its click history.
    ///
    /// Works regardless of expiry state; only the redirect path is blocked
    /// for expired codes.
    pub fn stats(&self, shortcode: &str) -> Result<LinkStats> {
        let slot = self.record_slot(shortcode)?;
        Ok(Self::snapshot(&slot, &self.ledger))
    }

    /// Snapshot every record ever issued, oldest first.
    pub fn list_all(&self) -> Vec<LinkStats> {
        // Collect the slots first so no shard lock is held while snapshotting.
        let slots: Vec<Arc<Mutex<UrlRecord>>> =
            self.entries.iter().map(|e| e.value().clone()).collect();

        let mut stats: Vec<LinkStats> = slots
            .iter()
            .map(|slot| Self::snapshot(slot, &self.ledger))
            .collect();

        stats.sort_by(|a, b| {
            a.record
                .created_at
                .cmp(&b.record.created_at)
                .then_with(|| a.record.shortcode.cmp(&b.record.shortcode))
        });
        stats
    }

    fn record_slot(&self, shortcode: &str) -> Result<Arc<Mutex<UrlRecord>>> {
        self.entries
            .get(shortcode)
            .map(|entry| entry.value().clone())
            .ok_or_else(|| {
                SnaplinkError::not_found(format!("shortcode '{}' was never issued", shortcode))
            })
    }

    /// Capture record + history under the record mutex, so the count always
    /// matches the history length.
    fn snapshot(slot: &Arc<Mutex<UrlRecord>>, ledger: &ClickLedger) -> LinkStats {
        let guard = slot.lock();
        let record = guard.clone();
        let clicks = ledger.read_all(&record.shortcode);
        drop(guard);

        LinkStats { record, clicks }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn visit(ip: &str) -> VisitMetadata {
        VisitMetadata {
            source_ip: ip.into(),
            user_agent: "test-agent".into(),
            referer: None,
        }
    }

    #[test]
    fn test_create_returns_code_and_expiry() {
        let registry = Registry::new();
        let now = Utc::now();
        let created = registry
            .create_at("https://example.com", Some(1), None, now)
            .unwrap();

        assert_eq!(created.shortcode.len(), DEFAULT_CODE_LENGTH);
        assert_eq!(created.expiry_at, now + Duration::minutes(1));
    }

    #[test]
    fn test_create_default_validity_is_30_minutes() {
        let registry = Registry::new();
        let now = Utc::now();
        let created = registry
            .create_at("https://example.com", None, None, now)
            .unwrap();
        assert_eq!(created.expiry_at, now + Duration::minutes(30));
    }

    #[test]
    fn test_generated_codes_are_unique() {
        let registry = Registry::with_policy(3, 30);
        let mut seen = std::collections::HashSet::new();
        for _ in 0..500 {
            let created = registry.create("https://example.com", None, None).unwrap();
            assert!(seen.insert(created.shortcode));
        }
    }

    #[test]
    fn test_custom_code_accepted_then_conflicts() {
        let registry = Registry::new();
        registry
            .create("https://example.com", None, Some("mycode"))
            .unwrap();

        let err = registry
            .create("https://other.example", None, Some("mycode"))
            .unwrap_err();
        assert!(matches!(err, SnaplinkError::ShortcodeExists(_)));
    }

    #[test]
    fn test_expired_code_still_blocks_reuse() {
        let registry = Registry::new();
        let past = Utc::now() - Duration::hours(2);
        registry
            .create_at("https://example.com", Some(1), Some("oldone"), past)
            .unwrap();

        // The record expired long ago, but the code is never recycled.
        let err = registry
            .create("https://other.example", None, Some("oldone"))
            .unwrap_err();
        assert!(matches!(err, SnaplinkError::ShortcodeExists(_)));
    }

    #[test]
    fn test_invalid_url_allocates_nothing() {
        let registry = Registry::new();
        let err = registry.create("not-a-url", None, None).unwrap_err();
        assert!(matches!(err, SnaplinkError::InvalidUrl(_)));
        assert!(registry.is_empty());
    }

    #[test]
    fn test_invalid_validity_rejected() {
        let registry = Registry::new();
        for bad in [0, -5] {
            let err = registry
                .create("https://a.com", Some(bad), None)
                .unwrap_err();
            assert!(matches!(err, SnaplinkError::InvalidValidity(_)));
        }
        assert!(registry.is_empty());
    }

    #[test]
    fn test_out_of_range_validity_rejected() {
        let registry = Registry::new();
        for huge in [i64::MAX, i64::MAX / 60, i64::MAX / (60 * 1000) + 1] {
            let err = registry
                .create("https://a.com", Some(huge), None)
                .unwrap_err();
            assert!(matches!(err, SnaplinkError::InvalidValidity(_)));
        }
        assert!(registry.is_empty());
    }

    #[test]
    fn test_resolve_increments_and_appends() {
        let registry = Registry::new();
        let created = registry.create("https://example.com", Some(5), None).unwrap();

        let target = registry.resolve(&created.shortcode, visit("10.0.0.1")).unwrap();
        assert_eq!(target, "https://example.com");

        let stats = registry.stats(&created.shortcode).unwrap();
        assert_eq!(stats.record.click_count, 1);
        assert_eq!(stats.clicks.len(), 1);
        assert_eq!(stats.clicks[0].source_ip, "10.0.0.1");
        assert_eq!(stats.clicks[0].referer, models::DIRECT_REFERER);
    }

    #[test]
    fn test_resolve_unknown_code_is_not_found() {
        let registry = Registry::new();
        let err = registry.resolve("nosuch", visit("10.0.0.1")).unwrap_err();
        assert!(matches!(err, SnaplinkError::NotFound(_)));
    }

    #[test]
    fn test_resolve_after_expiry_fails_and_records_nothing() {
        let registry = Registry::new();
        let now = Utc::now();
        let created = registry
            .create_at("https://example.com", Some(1), None, now)
            .unwrap();

        // Still live exactly at expiry, gone one second later.
        registry
            .resolve_at(&created.shortcode, visit("10.0.0.1"), now + Duration::minutes(1))
            .unwrap();

        let err = registry
            .resolve_at(
                &created.shortcode,
                visit("10.0.0.2"),
                now + Duration::seconds(61),
            )
            .unwrap_err();
        assert!(matches!(err, SnaplinkError::Expired(_)));

        let stats = registry.stats(&created.shortcode).unwrap();
        assert_eq!(stats.record.click_count, 1);
        assert_eq!(stats.clicks.len(), 1);
    }

    #[test]
    fn test_stats_survive_expiry() {
        let registry = Registry::new();
        let now = Utc::now();
        let created = registry
            .create_at("https://example.com", Some(1), None, now)
            .unwrap();

        registry
            .resolve_at(&created.shortcode, visit("10.0.0.1"), now)
            .unwrap();

        // Redirect is blocked after expiry, statistics are not.
        let after = now + Duration::minutes(2);
        assert!(
            registry
                .resolve_at(&created.shortcode, visit("10.0.0.2"), after)
                .is_err()
        );
        let stats = registry.stats(&created.shortcode).unwrap();
        assert_eq!(stats.record.click_count, 1);
        assert_eq!(stats.clicks.len(), 1);
    }

    #[test]
    fn test_stats_unknown_code_is_not_found() {
        let registry = Registry::new();
        let err = registry.stats("nosuch").unwrap_err();
        assert!(matches!(err, SnaplinkError::NotFound(_)));
    }

    #[test]
    fn test_list_all_includes_expired_oldest_first() {
        let registry = Registry::new();
        let base = Utc::now() - Duration::hours(3);
        registry
            .create_at("https://first.example", Some(1), Some("first1"), base)
            .unwrap();
        registry
            .create_at(
                "https://second.example",
                Some(600),
                Some("second"),
                base + Duration::hours(1),
            )
            .unwrap();

        let all = registry.list_all();
        assert_eq!(all.len(), 2);
        assert_eq!(all[0].record.shortcode, "first1");
        assert_eq!(all[1].record.shortcode, "second");
    }

    #[test]
    fn test_code_space_exhausted_on_saturated_space() {
        // One-character codes over a 36-symbol alphabet saturate quickly.
        let registry = Registry::with_policy(1, 30);
        let mut exhausted = false;
        for _ in 0..200 {
            match registry.create("https://example.com", None, None) {
                Ok(_) => {}
                Err(SnaplinkError::CodeSpaceExhausted(_)) => {
                    exhausted = true;
                    break;
                }
                Err(other) => panic!("unexpected error: {}", other),
            }
        }
        assert!(exhausted);
        assert!(registry.len() <= 36);
    }

    #[test]
    fn test_concurrent_resolves_keep_count_and_ledger_in_sync() {
        let registry = Arc::new(Registry::new());
        let created = registry
            .create("https://example.com", Some(60), Some("shared"))
            .unwrap();

        let threads = 8;
        let per_thread = 50;
        let handles: Vec<_> = (0..threads)
            .map(|t| {
                let registry = registry.clone();
                let code = created.shortcode.clone();
                std::thread::spawn(move || {
                    for i in 0..per_thread {
                        registry
                            .resolve(&code, visit(&format!("10.0.{}.{}", t, i)))
                            .unwrap();
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        let stats = registry.stats(&created.shortcode).unwrap();
        assert_eq!(stats.record.click_count, (threads * per_thread) as u64);
        assert_eq!(stats.clicks.len(), threads * per_thread);
    }

    #[test]
    fn test_concurrent_custom_creates_admit_one_winner() {
        let registry = Arc::new(Registry::new());
        let handles: Vec<_> = (0..8)
            .map(|_| {
                let registry = registry.clone();
                std::thread::spawn(move || {
                    registry
                        .create("https://example.com", None, Some("race01"))
                        .is_ok()
                })
            })
            .collect();

        let wins = handles
            .into_iter()
            .map(|h| h.join().unwrap())
            .filter(|ok| *ok)
            .count();
        assert_eq!(wins, 1);
        assert_eq!(registry.len(), 1);
    }
}
