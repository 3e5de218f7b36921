use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use std::sync::atomic::{AtomicBool, Ordering};

// Mocking out time so that it is possible to run tests that depend on time.
pub trait ISys: Send + Sync {
    /// The current timestamp in millis
    fn get_timestamp_millis(&self) -> i64;

    fn now(&self) -> DateTime<Utc> {
        Utc.timestamp_millis_opt(self.get_timestamp_millis())
            .single()
            .unwrap_or_else(Utc::now)
    }

    /// The current UTC calendar date
    fn today(&self) -> NaiveDate {
        self.now().date_naive()
    }
}

/// System that gets the real time and is used when not testing
pub struct RealSys {}
impl ISys for RealSys {
    fn get_timestamp_millis(&self) -> i64 {
        Utc::now().timestamp_millis()
    }
}

/// Process wide flag making sure that only one run of a job is in flight.
///
/// This only coordinates runs within a single process, it gives no
/// guarantees when the job is triggered on multiple hosts.
#[derive(Debug, Default)]
pub struct JobLock {
    running: AtomicBool,
}

impl JobLock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Takes the lock unless a run is already in flight. The lock is released
    /// when the returned guard is dropped.
    pub fn try_acquire(&self) -> Option<JobLockGuard<'_>> {
        self.running
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| JobLockGuard { lock: self })
    }

    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::Acquire)
    }
}

#[derive(Debug)]
pub struct JobLockGuard<'a> {
    lock: &'a JobLock,
}

impl Drop for JobLockGuard<'_> {
    fn drop(&mut self) {
        self.lock.running.store(false, Ordering::Release);
    }
}
