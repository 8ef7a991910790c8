//! Swap-based publishing of thesaurus snapshots.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use log::info;
use parking_lot::RwLock;

use crate::thesaurus::Thesaurus;

/// Shared slot holding the current thesaurus.
///
/// Readers take an `Arc` snapshot and query it without holding any lock, so
/// a query in flight keeps seeing the snapshot it started with. Writers
/// build a complete replacement first and then swap the pointer; the lock is
/// held only for the pointer clone or swap.
#[derive(Debug, Default)]
pub struct ThesaurusHandle {
    current: RwLock<Arc<Thesaurus>>,
    generation: AtomicU64,
}

impl ThesaurusHandle {
    pub fn new(thesaurus: Thesaurus) -> Self {
        Self {
            current: RwLock::new(Arc::new(thesaurus)),
            generation: AtomicU64::new(0),
        }
    }

    /// The thesaurus currently published.
    pub fn snapshot(&self) -> Arc<Thesaurus> {
        Arc::clone(&self.current.read())
    }

    /// Replace the published thesaurus, returning the previous one.
    pub fn publish(&self, thesaurus: Thesaurus) -> Arc<Thesaurus> {
        let concept_count = thesaurus.concepts().len();
        let next = Arc::new(thesaurus);
        let previous = std::mem::replace(&mut *self.current.write(), next);

        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        info!("Published thesaurus generation {generation} ({concept_count} concepts)");

        previous
    }

    /// How many times a replacement has been published.
    pub fn generation(&self) -> u64 {
        self.generation.load(Ordering::SeqCst)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::concept::ConceptMap;

    fn thesaurus(groups: Vec<Vec<&str>>) -> Thesaurus {
        let members = groups
            .into_iter()
            .map(|g| g.into_iter().map(String::from).collect())
            .collect();
        Thesaurus::build(ConceptMap::from_ordered(members).unwrap())
    }

    #[test]
    fn test_publish_swaps_snapshot() {
        let handle = ThesaurusHandle::new(thesaurus(vec![vec!["OD", "Ojo derecho"]]));
        let before = handle.snapshot();

        let previous = handle.publish(thesaurus(vec![vec!["OI", "Ojo izquierdo"]]));
        assert!(Arc::ptr_eq(&before, &previous));
        assert_eq!(handle.generation(), 1);

        // The old snapshot stays usable and unchanged.
        assert!(before.expand("OD").unwrap().found);
        assert!(!handle.snapshot().expand("OD").unwrap().found);
        assert!(handle.snapshot().expand("OI").unwrap().found);
    }

    #[test]
    fn test_concurrent_readers_during_publish() {
        let handle = ThesaurusHandle::new(thesaurus(vec![vec!["AV", "Agudeza visual"]]));

        std::thread::scope(|scope| {
            for _ in 0..4 {
                scope.spawn(|| {
                    for _ in 0..200 {
                        let snapshot = handle.snapshot();
                        let result = snapshot.expand("AV").unwrap();
                        // Every generation maps AV to the same query.
                        assert_eq!(result.query, "(AV OR \"Agudeza visual\")");
                    }
                });
            }
            scope.spawn(|| {
                for _ in 0..20 {
                    handle.publish(thesaurus(vec![vec!["AV", "Agudeza visual"]]));
                }
            });
        });

        assert_eq!(handle.generation(), 20);
    }
}
