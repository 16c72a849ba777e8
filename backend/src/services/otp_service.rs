//! One-time codes for phone number verification.
//!
//! Codes are six digits, live for a configurable window and are stored per
//! phone number; issuing a new code replaces the previous one.

use crate::repositories::otp_repository::{OtpRecord, OtpStore};
use crate::utils::random::numeric_code;
use chrono::{DateTime, Duration, Utc};
use std::sync::Arc;

pub const OTP_DIGITS: u32 = 6;

pub struct OtpService {
    store: Arc<dyn OtpStore>,
    expiry: Duration,
}

impl OtpService {
    pub fn new(store: Arc<dyn OtpStore>, expiry: Duration) -> Self {
        Self { store, expiry }
    }

    /// Fresh six-digit code, zero padded.
    pub fn generate(&self) -> String {
        numeric_code(&mut rand::thread_rng(), OTP_DIGITS)
    }

    pub fn save(&self, phone: &str, code: &str) {
        self.save_at(phone, code, Utc::now());
    }

    pub fn save_at(&self, phone: &str, code: &str, now: DateTime<Utc>) {
        self.store.put(
            phone,
            OtpRecord {
                code: code.to_string(),
                issued_at: now,
                expires_at: now + self.expiry,
            },
        );
    }

    /// Current code for `phone`, or `None` when missing or expired.
    pub fn retrieve(&self, phone: &str) -> Option<String> {
        self.retrieve_at(phone, Utc::now())
    }

    pub fn retrieve_at(&self, phone: &str, now: DateTime<Utc>) -> Option<String> {
        let record = self.store.get(phone)?;
        if record.is_expired_at(now) {
            self.store.remove_if_expired(phone, now);
            return None;
        }
        Some(record.code)
    }

    pub fn verify(&self, stored: &str, entered: &str) -> bool {
        stored == entered
    }

    /// Generates and stores a code for `phone`, returning it.
    pub fn issue(&self, phone: &str) -> String {
        let code = self.generate();
        self.save(phone, &code);
        code
    }

    /// True when `entered` matches the live code for `phone`.
    pub fn check(&self, phone: &str, entered: &str) -> bool {
        self.check_at(phone, entered, Utc::now())
    }

    pub fn check_at(&self, phone: &str, entered: &str, now: DateTime<Utc>) -> bool {
        self.retrieve_at(phone, now)
            .is_some_and(|stored| self.verify(&stored, entered))
    }

    /// Spends the code for `phone` if `entered` matches it.
    ///
    /// Check and removal happen as one step, so of several concurrent callers
    /// holding the same code at most one gets the record back.
    pub fn consume(&self, phone: &str, entered: &str) -> Option<OtpRecord> {
        self.consume_at(phone, entered, Utc::now())
    }

    pub fn consume_at(&self, phone: &str, entered: &str, now: DateTime<Utc>) -> Option<OtpRecord> {
        self.store.take_if_matches(phone, entered, now)
    }

    /// Puts a spent code back after the operation it was spent on failed.
    /// A code issued in the meantime takes precedence.
    pub fn restore(&self, phone: &str, record: OtpRecord) {
        self.store.put_if_absent(phone, record);
    }

    pub fn purge_expired(&self) -> usize {
        self.store.purge_expired(Utc::now())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repositories::otp_repository::InMemoryOtpStore;
    use std::sync::Mutex;

    const PHONE: &str = "+14155552671";

    fn service() -> OtpService {
        OtpService::new(Arc::new(InMemoryOtpStore::new()), Duration::minutes(5))
    }

    #[test]
    fn test_generate_is_six_digits() {
        let otp = service();
        for _ in 0..100 {
            let code = otp.generate();
            assert_eq!(code.len(), 6);
            assert!(code.chars().all(|c| c.is_ascii_digit()));
        }
    }

    #[test]
    fn test_check_matches_only_the_stored_code() {
        let otp = service();
        otp.save(PHONE, "123456");

        assert!(otp.check(PHONE, "123456"));
        assert!(!otp.check(PHONE, "654321"));
        assert!(!otp.check("+14155550000", "123456"));
    }

    #[test]
    fn test_new_code_invalidates_previous() {
        let otp = service();
        otp.save(PHONE, "111111");
        otp.save(PHONE, "222222");

        assert!(!otp.check(PHONE, "111111"));
        assert!(otp.check(PHONE, "222222"));
    }

    #[test]
    fn test_expired_code_is_absent() {
        let otp = service();
        let issued = Utc::now();
        otp.save_at(PHONE, "123456", issued);

        let at_boundary = issued + Duration::minutes(5);
        assert_eq!(otp.retrieve_at(PHONE, at_boundary).as_deref(), Some("123456"));

        let after = at_boundary + Duration::seconds(1);
        assert_eq!(otp.retrieve_at(PHONE, after), None);
        assert!(!otp.check_at(PHONE, "123456", after));
        // Eviction on read: the record is gone even for an earlier clock.
        assert_eq!(otp.retrieve_at(PHONE, issued), None);
    }

    #[test]
    fn test_issue_and_consume() {
        let otp = service();
        let code = otp.issue(PHONE);
        assert_eq!(otp.retrieve(PHONE), Some(code.clone()));

        let wrong = if code == "000000" { "111111" } else { "000000" };
        assert!(otp.consume(PHONE, wrong).is_none());
        assert!(otp.check(PHONE, &code));

        let spent = otp.consume(PHONE, &code).unwrap();
        assert!(!otp.check(PHONE, &code));
        assert!(otp.consume(PHONE, &code).is_none());

        otp.restore(PHONE, spent);
        assert!(otp.check(PHONE, &code));
    }

    #[test]
    fn test_restore_yields_to_newer_code() {
        let otp = service();
        otp.save(PHONE, "111111");
        let spent = otp.consume(PHONE, "111111").unwrap();

        otp.save(PHONE, "222222");
        otp.restore(PHONE, spent);

        assert!(otp.check(PHONE, "222222"));
        assert!(!otp.check(PHONE, "111111"));
    }

    /// Lets a test slip a write in right after a read, as a concurrent
    /// request would.
    struct InterleavingStore {
        inner: InMemoryOtpStore,
        after_get: Mutex<Option<OtpRecord>>,
    }

    impl OtpStore for InterleavingStore {
        fn put(&self, phone: &str, record: OtpRecord) {
            self.inner.put(phone, record);
        }

        fn get(&self, phone: &str) -> Option<OtpRecord> {
            let record = self.inner.get(phone);
            if let Some(fresh) = self.after_get.lock().unwrap().take() {
                self.inner.put(phone, fresh);
            }
            record
        }

        fn remove_if_expired(&self, phone: &str, now: DateTime<Utc>) -> bool {
            self.inner.remove_if_expired(phone, now)
        }

        fn take_if_matches(&self, phone: &str, code: &str, now: DateTime<Utc>) -> Option<OtpRecord> {
            self.inner.take_if_matches(phone, code, now)
        }

        fn put_if_absent(&self, phone: &str, record: OtpRecord) {
            self.inner.put_if_absent(phone, record);
        }

        fn purge_expired(&self, now: DateTime<Utc>) -> usize {
            self.inner.purge_expired(now)
        }
    }

    #[test]
    fn test_eviction_spares_code_saved_during_read() {
        let issued = Utc::now();
        let now = issued + Duration::minutes(10);
        let store = Arc::new(InterleavingStore {
            inner: InMemoryOtpStore::new(),
            after_get: Mutex::new(Some(OtpRecord {
                code: "222222".to_string(),
                issued_at: now,
                expires_at: now + Duration::minutes(5),
            })),
        });
        let otp = OtpService::new(store, Duration::minutes(5));
        otp.save_at(PHONE, "111111", issued);

        // The read sees the stale code; the fresh one lands before eviction.
        assert_eq!(otp.retrieve_at(PHONE, now), None);
        assert_eq!(otp.retrieve_at(PHONE, now).as_deref(), Some("222222"));
    }

    #[test]
    fn test_verify_is_exact_equality() {
        let otp = service();
        assert!(otp.verify("012345", "012345"));
        assert!(!otp.verify("012345", "12345"));
        assert!(!otp.verify("012345", "012345 "));
    }
}
