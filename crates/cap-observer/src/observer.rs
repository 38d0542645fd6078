//! The [`Observer`] trait.

use cap_core::ObserverError;

use crate::observable::Observable;

/// Reacts to notifications from the observables it is attached to.
///
/// Observers are shared as `Rc<dyn Observer>`; subjects only hold weak
/// references, so an observer lives exactly as long as its strong owners.
/// Use interior mutability for any state changed by [`update`](Self::update).
///
/// The default `update` fails with [`ObserverError::NotImplemented`].
/// A concrete observer that forgets to override it is caught the first
/// time a subject notifies it, not when it is registered or attached.
pub trait Observer {
    /// Handle a notification from `subject`.
    ///
    /// Concrete subject state is reachable by downcasting:
    /// `(subject as &dyn Any).downcast_ref::<MySubject>()`.
    fn update(&self, _subject: &dyn Observable) -> Result<(), ObserverError> {
        Err(ObserverError::NotImplemented {
            operation: "update",
        })
    }
}
