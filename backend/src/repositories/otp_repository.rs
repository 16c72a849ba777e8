//! Storage for one-time codes keyed by phone number.

use chrono::{DateTime, Utc};
use dashmap::DashMap;

/// A code together with its validity window.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OtpRecord {
    pub code: String,
    pub issued_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

impl OtpRecord {
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now > self.expires_at
    }
}

/// Key-value store for OTP records. `put` replaces any previous record for
/// the same phone number.
pub trait OtpStore: Send + Sync {
    fn put(&self, phone: &str, record: OtpRecord);

    fn get(&self, phone: &str) -> Option<OtpRecord>;

    /// Removes the record for `phone` only if it has expired at `now`.
    /// A record saved concurrently is left alone.
    fn remove_if_expired(&self, phone: &str, now: DateTime<Utc>) -> bool;

    /// Atomically removes and returns the record for `phone` when it holds
    /// `code` and is still live at `now`.
    fn take_if_matches(&self, phone: &str, code: &str, now: DateTime<Utc>) -> Option<OtpRecord>;

    /// Stores `record` unless a record for `phone` already exists.
    fn put_if_absent(&self, phone: &str, record: OtpRecord);

    /// Drops every record that has expired at `now`; returns how many.
    fn purge_expired(&self, now: DateTime<Utc>) -> usize;
}

/// Process-local store backed by a sharded concurrent map.
#[derive(Debug, Default)]
pub struct InMemoryOtpStore {
    records: DashMap<String, OtpRecord>,
}

impl InMemoryOtpStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl OtpStore for InMemoryOtpStore {
    fn put(&self, phone: &str, record: OtpRecord) {
        self.records.insert(phone.to_string(), record);
    }

    fn get(&self, phone: &str) -> Option<OtpRecord> {
        self.records.get(phone).map(|entry| entry.value().clone())
    }

    fn remove_if_expired(&self, phone: &str, now: DateTime<Utc>) -> bool {
        self.records
            .remove_if(phone, |_, record| record.is_expired_at(now))
            .is_some()
    }

    fn take_if_matches(&self, phone: &str, code: &str, now: DateTime<Utc>) -> Option<OtpRecord> {
        self.records
            .remove_if(phone, |_, record| record.code == code && !record.is_expired_at(now))
            .map(|(_, record)| record)
    }

    fn put_if_absent(&self, phone: &str, record: OtpRecord) {
        self.records.entry(phone.to_string()).or_insert(record);
    }

    fn purge_expired(&self, now: DateTime<Utc>) -> usize {
        let before = self.records.len();
        self.records.retain(|_, record| !record.is_expired_at(now));
        before.saturating_sub(self.records.len())
    }
}
