//! Identifier generation for authored blocks and documents.
//!
//! Generators are injected where blocks are built; nothing here is global.

use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};
use uuid::Uuid;

pub trait IdGenerator {
    fn generate(&mut self) -> Uuid;
}

impl<G: IdGenerator + ?Sized> IdGenerator for &mut G {
    fn generate(&mut self) -> Uuid {
        (**self).generate()
    }
}

impl<G: IdGenerator + ?Sized> IdGenerator for Box<G> {
    fn generate(&mut self) -> Uuid {
        (**self).generate()
    }
}

/// Random (v4) ids.
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomIdGenerator;

impl IdGenerator for RandomIdGenerator {
    fn generate(&mut self) -> Uuid {
        Uuid::new_v4()
    }
}

/// Time-ordered (v7) ids; later ids sort after earlier ones.
#[derive(Debug, Clone, Copy, Default)]
pub struct TimeOrderedIdGenerator;

impl IdGenerator for TimeOrderedIdGenerator {
    fn generate(&mut self) -> Uuid {
        Uuid::now_v7()
    }
}

/// `start + 1`, `start + 2`, ... as raw 128-bit values. Never yields nil.
#[derive(Debug, Clone, Copy, Default)]
pub struct SequentialIdGenerator {
    next: u128,
}

impl SequentialIdGenerator {
    pub fn new(start: u128) -> Self {
        Self { next: start }
    }
}

impl IdGenerator for SequentialIdGenerator {
    fn generate(&mut self) -> Uuid {
        self.next = self.next.wrapping_add(1);
        if self.next == 0 {
            self.next = 1;
        }
        Uuid::from_u128(self.next)
    }
}

/// Reproducible v4-shaped ids from a seed.
#[derive(Debug, Clone)]
pub struct SeededIdGenerator {
    rng: StdRng,
}

impl SeededIdGenerator {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl IdGenerator for SeededIdGenerator {
    fn generate(&mut self) -> Uuid {
        let mut bytes = [0u8; 16];
        self.rng.fill_bytes(&mut bytes);
        uuid::Builder::from_random_bytes(bytes).into_uuid()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_sequential() {
        let mut ids = SequentialIdGenerator::new(10);
        assert_eq!(ids.generate(), Uuid::from_u128(11));
        assert_eq!(ids.generate(), Uuid::from_u128(12));
    }

    #[test]
    fn test_sequential_skips_nil() {
        let mut ids = SequentialIdGenerator::new(u128::MAX);
        assert_eq!(ids.generate(), Uuid::from_u128(1));
    }

    #[test]
    fn test_seeded_is_reproducible() {
        let a: Vec<Uuid> = {
            let mut g = SeededIdGenerator::new(42);
            (0..3).map(|_| g.generate()).collect()
        };
        let b: Vec<Uuid> = {
            let mut g = SeededIdGenerator::new(42);
            (0..3).map(|_| g.generate()).collect()
        };

        assert_eq!(a, b);
        assert_eq!(a[0].get_version_num(), 4);
        assert_ne!(a[0], a[1]);
    }

    #[test]
    fn test_random_and_time_ordered_are_unique() {
        let mut random = RandomIdGenerator;
        let mut ordered = TimeOrderedIdGenerator;
        let ids: HashSet<Uuid> = (0..50)
            .flat_map(|_| [random.generate(), ordered.generate()])
            .collect();

        assert_eq!(ids.len(), 100);
        assert_eq!(ordered.generate().get_version_num(), 7);
    }

    #[test]
    fn test_generator_by_reference() {
        fn take<G: IdGenerator>(mut g: G) -> Uuid {
            g.generate()
        }
        let mut ids = SequentialIdGenerator::new(0);
        assert_eq!(take(&mut ids), Uuid::from_u128(1));
        assert_eq!(ids.generate(), Uuid::from_u128(2));
    }
}
