//! The [`Observable`] trait.

use std::any::Any;
use std::rc::Rc;

use cap_core::ObserverError;

use crate::attachments::Attachments;
use crate::observer::Observer;

/// View of any observable as `&dyn Observable`.
///
/// Blanket-implemented for every sized [`Observable`], so implementors
/// never write it by hand. It lets the provided
/// [`notify`](Observable::notify) hand `self` to observers as a trait
/// object, including when called through `Box<dyn Observable>`.
pub trait AsObservable {
    /// Return `self` as a trait object.
    fn as_observable(&self) -> &dyn Observable;
}

impl<T: Observable> AsObservable for T {
    fn as_observable(&self) -> &dyn Observable {
        self
    }
}

/// A subject that observers can attach to.
///
/// Implementors own an [`Attachments`] set and expose it; attach, detach
/// and notify are provided. Per (subject, observer) pair the only states
/// are detached and attached.
///
/// # Examples
///
/// ```
/// use std::rc::Rc;
/// use cap_core::ObserverError;
/// use cap_observer::{Attachments, Observable, Observer};
///
/// #[derive(Default)]
/// struct Thermometer {
///     attachments: Attachments,
///     celsius: f64,
/// }
///
/// impl Observable for Thermometer {
///     fn attachments(&self) -> &Attachments { &self.attachments }
///     fn attachments_mut(&mut self) -> &mut Attachments { &mut self.attachments }
/// }
///
/// struct Alarm;
/// impl Observer for Alarm {
///     fn update(&self, subject: &dyn Observable) -> Result<(), ObserverError> {
///         let any: &dyn std::any::Any = subject;
///         let t = any.downcast_ref::<Thermometer>().unwrap();
///         if t.celsius > 100.0 {
///             return Err(ObserverError::UpdateFailed { reason: "too hot".into() });
///         }
///         Ok(())
///     }
/// }
///
/// let alarm: Rc<dyn Observer> = Rc::new(Alarm);
/// let mut thermometer = Thermometer::default();
/// thermometer.attach(&alarm).unwrap();
/// thermometer.notify().unwrap();
///
/// thermometer.celsius = 120.0;
/// assert!(thermometer.notify().is_err());
/// ```
pub trait Observable: AsObservable + Any + 'static {
    /// The subject's attachment set.
    fn attachments(&self) -> &Attachments;

    /// Mutable access to the subject's attachment set.
    fn attachments_mut(&mut self) -> &mut Attachments;

    /// Attach `observer`, holding only a weak reference to it.
    ///
    /// Fails with [`ObserverError::AlreadyAttached`] if it is already attached.
    fn attach(&mut self, observer: &Rc<dyn Observer>) -> Result<(), ObserverError> {
        self.attachments_mut().attach(observer)
    }

    /// Detach `observer`.
    ///
    /// Fails with [`ObserverError::NotAttached`] if it is not attached.
    fn detach(&mut self, observer: &Rc<dyn Observer>) -> Result<(), ObserverError> {
        self.attachments_mut().detach(observer)
    }

    /// Synchronously update every attached observer, in attachment order.
    ///
    /// With nothing attached this succeeds without doing anything. A
    /// dropped observer fails with [`ObserverError::DeadObserver`].
    fn notify(&self) -> Result<(), ObserverError> {
        self.attachments().notify(self.as_observable())
    }
}
