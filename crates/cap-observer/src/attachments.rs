//! The weak attachment set backing every [`Observable`](crate::Observable).

use std::fmt;
use std::rc::{Rc, Weak};

use cap_core::ObserverError;
use smallvec::SmallVec;

use crate::observable::Observable;
use crate::observer::Observer;

/// Ordered set of weak observer references.
///
/// Each observer appears at most once. Identity is allocation identity:
/// two `Rc`s are the same observer if they point at the same allocation.
/// A weak reference keeps the allocation (though not the observer) alive,
/// so the address of a dropped observer is never reused while it is
/// still attached.
///
/// Every mutation either applies fully or is rejected before touching
/// the set.
#[derive(Default)]
pub struct Attachments {
    observers: SmallVec<[Weak<dyn Observer>; 4]>,
}

impl Attachments {
    /// Create an empty attachment set.
    pub fn new() -> Self {
        Self::default()
    }

    fn position(&self, observer: &Rc<dyn Observer>) -> Option<usize> {
        let target = Rc::downgrade(observer);
        self.observers.iter().position(|w| Weak::ptr_eq(w, &target))
    }

    /// Attach `observer`.
    ///
    /// Fails with [`ObserverError::AlreadyAttached`] if it is already present.
    pub fn attach(&mut self, observer: &Rc<dyn Observer>) -> Result<(), ObserverError> {
        if self.position(observer).is_some() {
            return Err(ObserverError::AlreadyAttached);
        }
        self.observers.push(Rc::downgrade(observer));
        tracing::trace!(attached = self.observers.len(), "observer attached");
        Ok(())
    }

    /// Detach `observer`, preserving the order of the others.
    ///
    /// Fails with [`ObserverError::NotAttached`] if it is not present.
    pub fn detach(&mut self, observer: &Rc<dyn Observer>) -> Result<(), ObserverError> {
        let index = self
            .position(observer)
            .ok_or(ObserverError::NotAttached)?;
        self.observers.remove(index);
        tracing::trace!(attached = self.observers.len(), "observer detached");
        Ok(())
    }

    /// `true` if `observer` is attached.
    pub fn is_attached(&self, observer: &Rc<dyn Observer>) -> bool {
        self.position(observer).is_some()
    }

    /// Number of attachments, dead ones included.
    pub fn len(&self) -> usize {
        self.observers.len()
    }

    /// `true` if nothing is attached.
    pub fn is_empty(&self) -> bool {
        self.observers.is_empty()
    }

    /// Number of attachments whose observer has been dropped.
    pub fn dead_count(&self) -> usize {
        self.observers.iter().filter(|w| w.strong_count() == 0).count()
    }

    /// Remove attachments whose observer has been dropped.
    ///
    /// [`notify`](Self::notify) never does this on its own; a dangling
    /// attachment is reported there, and callers who expect observers to
    /// come and go prune explicitly. Returns the number removed.
    pub fn prune_dead(&mut self) -> usize {
        let before = self.observers.len();
        self.observers.retain(|w| w.strong_count() > 0);
        let pruned = before - self.observers.len();
        if pruned > 0 {
            tracing::warn!(pruned, "pruned dropped observers");
        }
        pruned
    }

    /// Call [`Observer::update`] on every attached observer, in order.
    ///
    /// Stops at the first failure: a dropped observer yields
    /// [`ObserverError::DeadObserver`], and an error from `update` is
    /// returned unchanged. Observers after the failing one are not called.
    pub fn notify(&self, subject: &dyn Observable) -> Result<(), ObserverError> {
        tracing::trace!(observers = self.observers.len(), "notifying");
        for (position, weak) in self.observers.iter().enumerate() {
            let observer = weak
                .upgrade()
                .ok_or(ObserverError::DeadObserver { position })?;
            observer.update(subject)?;
        }
        Ok(())
    }
}

impl fmt::Debug for Attachments {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Attachments")
            .field("attached", &self.observers.len())
            .field("dead", &self.dead_count())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use std::cell::Cell;
    use tracing_test::traced_test;

    #[derive(Default)]
    struct Silent;
    impl Observer for Silent {
        fn update(&self, _subject: &dyn Observable) -> Result<(), ObserverError> {
            Ok(())
        }
    }

    #[derive(Default)]
    struct Bare {
        attachments: Attachments,
    }
    impl Observable for Bare {
        fn attachments(&self) -> &Attachments {
            &self.attachments
        }
        fn attachments_mut(&mut self) -> &mut Attachments {
            &mut self.attachments
        }
    }

    struct Counting(Cell<usize>);
    impl Observer for Counting {
        fn update(&self, _subject: &dyn Observable) -> Result<(), ObserverError> {
            self.0.set(self.0.get() + 1);
            Ok(())
        }
    }

    fn silent() -> Rc<dyn Observer> {
        Rc::new(Silent)
    }

    #[test]
    fn attach_twice_is_rejected_without_mutation() {
        let mut set = Attachments::new();
        let a = silent();
        set.attach(&a).unwrap();
        assert_eq!(set.attach(&a), Err(ObserverError::AlreadyAttached));
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn detach_requires_attachment() {
        let mut set = Attachments::new();
        let a = silent();
        assert_eq!(set.detach(&a), Err(ObserverError::NotAttached));
        set.attach(&a).unwrap();
        set.detach(&a).unwrap();
        assert_eq!(set.detach(&a), Err(ObserverError::NotAttached));
        assert!(set.is_empty());
    }

    #[test]
    fn clones_of_one_rc_are_the_same_observer() {
        let mut set = Attachments::new();
        let a = silent();
        let alias = Rc::clone(&a);
        set.attach(&a).unwrap();
        assert!(set.is_attached(&alias));
        assert_eq!(set.attach(&alias), Err(ObserverError::AlreadyAttached));
    }

    #[test]
    fn attachment_does_not_keep_observer_alive() {
        let mut set = Attachments::new();
        let a = silent();
        set.attach(&a).unwrap();
        assert_eq!(Rc::strong_count(&a), 1);
        drop(a);
        assert_eq!(set.dead_count(), 1);
    }

    #[test]
    fn notify_reports_dead_position_and_stops() {
        let subject = Bare::default();
        let mut set = Attachments::new();
        let first = Rc::new(Counting(Cell::new(0)));
        let first_dyn: Rc<dyn Observer> = first.clone();
        let doomed = silent();
        let last = Rc::new(Counting(Cell::new(0)));
        let last_dyn: Rc<dyn Observer> = last.clone();
        set.attach(&first_dyn).unwrap();
        set.attach(&doomed).unwrap();
        set.attach(&last_dyn).unwrap();
        drop(doomed);

        assert_eq!(
            set.notify(&subject),
            Err(ObserverError::DeadObserver { position: 1 })
        );
        assert_eq!(first.0.get(), 1);
        assert_eq!(last.0.get(), 0);

        assert_eq!(set.prune_dead(), 1);
        set.notify(&subject).unwrap();
        assert_eq!(first.0.get(), 2);
        assert_eq!(last.0.get(), 1);
    }

    #[test]
    #[traced_test]
    fn prune_dead_logs_a_warning() {
        let mut set = Attachments::new();
        let kept = silent();
        set.attach(&kept).unwrap();
        set.attach(&silent()).unwrap();
        assert_eq!(set.prune_dead(), 1);
        assert!(logs_contain("pruned dropped observers"));
        assert!(set.is_attached(&kept));
        assert_eq!(set.prune_dead(), 0);
    }

    #[test]
    fn detach_preserves_order() {
        let subject = Bare::default();
        let mut set = Attachments::new();
        let order = Rc::new(std::cell::RefCell::new(Vec::new()));
        struct Tagged(u8, Rc<std::cell::RefCell<Vec<u8>>>);
        impl Observer for Tagged {
            fn update(&self, _subject: &dyn Observable) -> Result<(), ObserverError> {
                self.1.borrow_mut().push(self.0);
                Ok(())
            }
        }
        let observers: Vec<Rc<dyn Observer>> = (0..4)
            .map(|i| Rc::new(Tagged(i, order.clone())) as Rc<dyn Observer>)
            .collect();
        for o in &observers {
            set.attach(o).unwrap();
        }
        set.detach(&observers[1]).unwrap();
        set.notify(&subject).unwrap();
        assert_eq!(*order.borrow(), vec![0, 2, 3]);
    }

    #[derive(Clone, Debug)]
    enum Op {
        Attach(usize),
        Detach(usize),
    }

    fn arb_op() -> impl Strategy<Value = Op> {
        prop_oneof![(0usize..4).prop_map(Op::Attach), (0usize..4).prop_map(Op::Detach)]
    }

    proptest! {
        #[test]
        fn attach_detach_matches_set_model(ops in prop::collection::vec(arb_op(), 0..40)) {
            let pool: Vec<Rc<dyn Observer>> = (0..4).map(|_| silent()).collect();
            let mut set = Attachments::new();
            let mut model: Vec<usize> = Vec::new();
            for op in ops {
                match op {
                    Op::Attach(i) => {
                        let result = set.attach(&pool[i]);
                        if model.contains(&i) {
                            prop_assert_eq!(result, Err(ObserverError::AlreadyAttached));
                        } else {
                            prop_assert_eq!(result, Ok(()));
                            model.push(i);
                        }
                    }
                    Op::Detach(i) => {
                        let result = set.detach(&pool[i]);
                        if model.contains(&i) {
                            prop_assert_eq!(result, Ok(()));
                            model.retain(|&m| m != i);
                        } else {
                            prop_assert_eq!(result, Err(ObserverError::NotAttached));
                        }
                    }
                }
                prop_assert_eq!(set.len(), model.len());
                for (i, o) in pool.iter().enumerate() {
                    prop_assert_eq!(set.is_attached(o), model.contains(&i));
                }
            }
        }
    }
}
