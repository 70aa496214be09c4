//! Unique group ID allocation over a bounded domain.
//!
//! A [`GroupIdAllocator`] is seeded with the keys already present in a table
//! and hands out fresh keys that collide neither with those nor with anything
//! it reserved earlier. Every request is checked against the free capacity of
//! the domain first, so asking for more keys than remain fails up front
//! instead of looping.

use crate::record::GroupId;
use rand::seq::SliceRandom;
use rand::Rng;
use std::collections::HashSet;
use std::fmt;

/// Default lower bound of the group ID domain.
pub const DEFAULT_MIN_GROUP_ID: GroupId = 1;

/// Default upper bound of the group ID domain.
pub const DEFAULT_MAX_GROUP_ID: GroupId = 100_000;

/// Default number of draws rejection sampling makes for a single key.
pub const DEFAULT_MAX_ATTEMPTS: u32 = 1000;

/// Errors from key allocation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum KeyError {
    /// Not enough free keys left in the domain.
    #[error("Group ID domain {domain} exhausted: requested {requested} keys, {available} available")]
    DomainExhausted {
        domain: GroupIdDomain,
        requested: u64,
        available: u64,
    },

    /// Rejection sampling gave up on a single key.
    #[error("No free group ID found after {attempts} attempts")]
    TooManyCollisions { attempts: u32 },

    /// Domain bounds are inverted.
    #[error("Invalid group ID domain: min {min} > max {max}")]
    InvalidDomain { min: GroupId, max: GroupId },
}

/// Inclusive range group IDs are drawn from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GroupIdDomain {
    min: GroupId,
    max: GroupId,
}

impl GroupIdDomain {
    pub fn new(min: GroupId, max: GroupId) -> Result<Self, KeyError> {
        if min > max {
            return Err(KeyError::InvalidDomain { min, max });
        }
        Ok(Self { min, max })
    }

    pub fn min(&self) -> GroupId {
        self.min
    }

    pub fn max(&self) -> GroupId {
        self.max
    }

    /// Number of distinct keys in the domain.
    pub fn size(&self) -> u64 {
        u64::from(self.max - self.min) + 1
    }

    pub fn contains(&self, id: GroupId) -> bool {
        (self.min..=self.max).contains(&id)
    }
}

impl Default for GroupIdDomain {
    fn default() -> Self {
        Self {
            min: DEFAULT_MIN_GROUP_ID,
            max: DEFAULT_MAX_GROUP_ID,
        }
    }
}

impl fmt::Display for GroupIdDomain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}]", self.min, self.max)
    }
}

/// How fresh keys are picked once capacity has been confirmed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum KeyStrategy {
    /// Rejection sampling while the domain stays at most half full, shuffle beyond that.
    #[default]
    Auto,
    /// Draw uniformly and redraw on collision, bounded by the attempt limit.
    Rejection,
    /// Shuffle the remaining free keys and take a prefix.
    Shuffle,
}

/// Tracks taken keys for one table and reserves new ones.
#[derive(Debug, Clone)]
pub struct GroupIdAllocator {
    domain: GroupIdDomain,
    taken: HashSet<GroupId>,
    taken_in_domain: u64,
    strategy: KeyStrategy,
    max_attempts: u32,
}

impl GroupIdAllocator {
    /// Create an allocator seeded with the keys already present in the table.
    ///
    /// Keys outside `domain` are remembered but do not consume capacity.
    pub fn new(domain: GroupIdDomain, existing: impl IntoIterator<Item = GroupId>) -> Self {
        let taken: HashSet<GroupId> = existing.into_iter().collect();
        let taken_in_domain = taken.iter().filter(|id| domain.contains(**id)).count() as u64;
        Self {
            domain,
            taken,
            taken_in_domain,
            strategy: KeyStrategy::default(),
            max_attempts: DEFAULT_MAX_ATTEMPTS,
        }
    }

    pub fn with_strategy(mut self, strategy: KeyStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    pub fn with_max_attempts(mut self, max_attempts: u32) -> Self {
        self.max_attempts = max_attempts.max(1);
        self
    }

    pub fn domain(&self) -> GroupIdDomain {
        self.domain
    }

    /// Free keys left in the domain.
    pub fn available(&self) -> u64 {
        self.domain.size() - self.taken_in_domain
    }

    pub fn is_taken(&self, id: GroupId) -> bool {
        self.taken.contains(&id)
    }

    /// Number of keys tracked, in or out of the domain.
    pub fn taken_count(&self) -> usize {
        self.taken.len()
    }

    /// Reserve `count` fresh keys.
    ///
    /// Either all keys are reserved or none are.
    pub fn reserve<R: Rng>(&mut self, rng: &mut R, count: u64) -> Result<Vec<GroupId>, KeyError> {
        let available = self.available();
        if count > available {
            return Err(KeyError::DomainExhausted {
                domain: self.domain,
                requested: count,
                available,
            });
        }
        if count == 0 {
            return Ok(Vec::new());
        }

        let keys = match self.strategy {
            KeyStrategy::Rejection => self.reserve_rejection(rng, count)?,
            KeyStrategy::Shuffle => self.reserve_shuffle(rng, count),
            KeyStrategy::Auto => {
                if (self.taken_in_domain + count) * 2 <= self.domain.size() {
                    self.reserve_rejection(rng, count)?
                } else {
                    self.reserve_shuffle(rng, count)
                }
            }
        };

        self.taken_in_domain += count;
        Ok(keys)
    }

    fn reserve_rejection<R: Rng>(
        &mut self,
        rng: &mut R,
        count: u64,
    ) -> Result<Vec<GroupId>, KeyError> {
        let mut keys = Vec::with_capacity(count as usize);

        for _ in 0..count {
            let mut attempts = 0u32;
            let key = loop {
                if attempts == self.max_attempts {
                    // Undo this call's reservations so the request stays atomic.
                    for key in &keys {
                        self.taken.remove(key);
                    }
                    return Err(KeyError::TooManyCollisions { attempts });
                }
                attempts += 1;

                let candidate = rng.random_range(self.domain.min..=self.domain.max);
                if self.taken.insert(candidate) {
                    break candidate;
                }
            };
            keys.push(key);
        }

        Ok(keys)
    }

    fn reserve_shuffle<R: Rng>(&mut self, rng: &mut R, count: u64) -> Vec<GroupId> {
        let mut free: Vec<GroupId> = (self.domain.min..=self.domain.max)
            .filter(|id| !self.taken.contains(id))
            .collect();

        let (picked, _) = free.partial_shuffle(rng, count as usize);
        let keys = picked.to_vec();
        self.taken.extend(keys.iter().copied());
        keys
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn assert_unique_and_fresh(keys: &[GroupId], existing: &[GroupId], domain: GroupIdDomain) {
        let unique: HashSet<_> = keys.iter().copied().collect();
        assert_eq!(unique.len(), keys.len(), "keys must be pairwise distinct");
        for key in keys {
            assert!(domain.contains(*key), "{key} outside {domain}");
            assert!(!existing.contains(key), "{key} collides with an existing key");
        }
    }

    #[test]
    fn test_default_domain() {
        let domain = GroupIdDomain::default();
        assert_eq!(domain.min(), 1);
        assert_eq!(domain.max(), 100_000);
        assert_eq!(domain.size(), 100_000);
    }

    #[test]
    fn test_invalid_domain() {
        assert_eq!(
            GroupIdDomain::new(10, 5),
            Err(KeyError::InvalidDomain { min: 10, max: 5 })
        );
    }

    #[test]
    fn test_reserve_avoids_existing_keys() {
        let domain = GroupIdDomain::new(1, 20).unwrap();
        let existing = [1, 2, 3, 10, 15];
        let mut rng = StdRng::seed_from_u64(42);

        for strategy in [KeyStrategy::Auto, KeyStrategy::Rejection, KeyStrategy::Shuffle] {
            let mut allocator = GroupIdAllocator::new(domain, existing).with_strategy(strategy);
            let keys = allocator.reserve(&mut rng, 10).unwrap();
            assert_eq!(keys.len(), 10);
            assert_unique_and_fresh(&keys, &existing, domain);
            assert_eq!(allocator.available(), 5);
        }
    }

    #[test]
    fn test_successive_reservations_do_not_overlap() {
        let domain = GroupIdDomain::new(1, 100).unwrap();
        let mut rng = StdRng::seed_from_u64(7);
        let mut allocator = GroupIdAllocator::new(domain, []);

        let first = allocator.reserve(&mut rng, 30).unwrap();
        let second = allocator.reserve(&mut rng, 30).unwrap();

        assert_unique_and_fresh(&second, &first, domain);
    }

    #[test]
    fn test_fill_entire_domain() {
        let domain = GroupIdDomain::new(1, 1000).unwrap();
        let mut rng = StdRng::seed_from_u64(1);
        let mut allocator = GroupIdAllocator::new(domain, []);

        let mut keys = allocator.reserve(&mut rng, 1000).unwrap();
        keys.sort_unstable();
        assert_eq!(keys, (1..=1000).collect::<Vec<_>>());
        assert_eq!(allocator.available(), 0);
    }

    #[test]
    fn test_exhaustion_is_reported_up_front() {
        let domain = GroupIdDomain::new(1, 100_000).unwrap();
        let mut rng = StdRng::seed_from_u64(3);
        let mut allocator = GroupIdAllocator::new(domain, []);

        let err = allocator.reserve(&mut rng, 100_001).unwrap_err();
        assert_eq!(
            err,
            KeyError::DomainExhausted {
                domain,
                requested: 100_001,
                available: 100_000,
            }
        );
        // Nothing was reserved by the failed call.
        assert_eq!(allocator.available(), 100_000);
        assert_eq!(allocator.taken_count(), 0);
    }

    #[test]
    fn test_exhaustion_counts_existing_keys() {
        let domain = GroupIdDomain::new(1, 5).unwrap();
        let mut rng = StdRng::seed_from_u64(3);
        let mut allocator = GroupIdAllocator::new(domain, [1, 2, 3]);

        assert!(matches!(
            allocator.reserve(&mut rng, 3),
            Err(KeyError::DomainExhausted { available: 2, .. })
        ));
        let mut keys = allocator.reserve(&mut rng, 2).unwrap();
        keys.sort_unstable();
        assert_eq!(keys, vec![4, 5]);
    }

    #[test]
    fn test_out_of_domain_keys_do_not_consume_capacity() {
        let domain = GroupIdDomain::new(1, 10).unwrap();
        let allocator = GroupIdAllocator::new(domain, [0, 11, 500, 5]);
        assert_eq!(allocator.available(), 9);
        assert_eq!(allocator.taken_count(), 4);
        assert!(allocator.is_taken(500));
    }

    #[test]
    fn test_rejection_gives_up_and_rolls_back() {
        // One free key in a domain of 100_000: a single draw is almost certain to miss.
        let domain = GroupIdDomain::new(1, 100_000).unwrap();
        let existing: Vec<GroupId> = (1..100_000).collect();
        let mut rng = StdRng::seed_from_u64(9);
        let mut allocator = GroupIdAllocator::new(domain, existing)
            .with_strategy(KeyStrategy::Rejection)
            .with_max_attempts(1);

        let before = allocator.taken_count();
        match allocator.reserve(&mut rng, 1) {
            Err(err) => {
                assert_eq!(err, KeyError::TooManyCollisions { attempts: 1 });
                assert_eq!(allocator.taken_count(), before);
                assert_eq!(allocator.available(), 1);
            }
            // The single draw happened to hit the free key.
            Ok(keys) => assert_eq!(keys, vec![100_000]),
        }
    }

    #[test]
    fn test_auto_switches_to_shuffle_when_crowded() {
        // 99 of 100 keys taken: rejection with one attempt would almost always fail,
        // auto must not.
        let domain = GroupIdDomain::new(1, 100).unwrap();
        let existing: Vec<GroupId> = (1..=100).filter(|id| *id != 42).collect();
        let mut rng = StdRng::seed_from_u64(11);
        let mut allocator = GroupIdAllocator::new(domain, existing).with_max_attempts(1);

        assert_eq!(allocator.reserve(&mut rng, 1).unwrap(), vec![42]);
    }

    #[test]
    fn test_zero_count() {
        let mut rng = StdRng::seed_from_u64(0);
        let mut allocator = GroupIdAllocator::new(GroupIdDomain::new(1, 1).unwrap(), [1]);
        assert!(allocator.reserve(&mut rng, 0).unwrap().is_empty());
    }
}
