use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;

use crate::tier::UserTier;

/// Counts how many more mock sessions the user may start.
///
/// Shared by every simulation controller built from the same `Coach`.
/// Pro users are unlimited.
#[derive(Debug, Clone)]
pub struct QuotaTracker {
    remaining: Option<Arc<AtomicU32>>,
}

impl QuotaTracker {
    pub fn for_tier(tier: UserTier, free_sessions: u32) -> Self {
        match tier {
            UserTier::Pro => Self::unlimited(),
            UserTier::Free => Self::limited(free_sessions),
        }
    }

    pub fn unlimited() -> Self {
        Self { remaining: None }
    }

    pub fn limited(sessions: u32) -> Self {
        Self {
            remaining: Some(Arc::new(AtomicU32::new(sessions))),
        }
    }

    /// `None` means unlimited.
    pub fn remaining(&self) -> Option<u32> {
        self.remaining.as_ref().map(|r| r.load(Ordering::SeqCst))
    }

    /// True when no sessions are left. Never true for unlimited quotas.
    pub fn is_exhausted(&self) -> bool {
        self.remaining() == Some(0)
    }

    /// Takes one session from the quota. Returns false when none are left.
    pub fn try_consume(&self) -> bool {
        match &self.remaining {
            None => true,
            Some(remaining) => remaining
                .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
                .is_ok(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_free_quota_runs_out() {
        let quota = QuotaTracker::for_tier(UserTier::Free, 2);
        assert!(quota.try_consume());
        assert!(quota.try_consume());
        assert!(!quota.try_consume());
        assert_eq!(quota.remaining(), Some(0));
        assert!(quota.is_exhausted());
    }

    #[test]
    fn test_pro_is_unlimited() {
        let quota = QuotaTracker::for_tier(UserTier::Pro, 0);
        for _ in 0..100 {
            assert!(quota.try_consume());
        }
        assert_eq!(quota.remaining(), None);
        assert!(!quota.is_exhausted());
    }

    #[test]
    fn test_clones_share_the_counter() {
        let quota = QuotaTracker::limited(1);
        let other = quota.clone();
        assert!(other.try_consume());
        assert!(!quota.try_consume());
    }
}
