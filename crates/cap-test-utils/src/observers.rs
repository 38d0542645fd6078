//! Observers and subjects for exercising the notification contract.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use cap_core::{ObserverError, PropertyTree, TreeError};
use cap_observer::{Attachments, Observable, Observer};

/// Address of a subject, for identity checks in assertions.
pub fn subject_address(subject: &dyn Observable) -> usize {
    subject as *const dyn Observable as *const () as usize
}

/// One notification seen by an [`Echo`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LogEntry {
    /// Name of the subject, or `None` if it was not a [`NamedSubject`].
    pub name: Option<String>,
    /// Address of the notifying subject.
    pub address: usize,
}

/// Shared, ordered record of notifications.
#[derive(Clone, Debug, Default)]
pub struct EventLog(Rc<RefCell<Vec<LogEntry>>>);

impl EventLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&self, entry: LogEntry) {
        self.0.borrow_mut().push(entry);
    }

    pub fn entries(&self) -> Vec<LogEntry> {
        self.0.borrow().clone()
    }

    pub fn names(&self) -> Vec<Option<String>> {
        self.0.borrow().iter().map(|e| e.name.clone()).collect()
    }

    pub fn len(&self) -> usize {
        self.0.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.borrow().is_empty()
    }
}

/// Records the identity of every subject that notifies it.
pub struct Echo {
    log: EventLog,
}

impl Echo {
    pub fn new(log: EventLog) -> Self {
        Self { log }
    }
}

impl Observer for Echo {
    fn update(&self, subject: &dyn Observable) -> Result<(), ObserverError> {
        let any: &dyn std::any::Any = subject;
        self.log.push(LogEntry {
            name: any
                .downcast_ref::<NamedSubject>()
                .map(|s| s.name.clone()),
            address: subject_address(subject),
        });
        Ok(())
    }
}

/// An observer that never overrides `update`.
pub struct PlainObserver;

impl Observer for PlainObserver {}

type UpdateHook = Rc<dyn Fn(&dyn Observable) -> Result<(), ObserverError>>;

/// An observer whose `update` can be installed after construction.
///
/// Until a hook is installed, `update` fails with
/// [`ObserverError::NotImplemented`], as an observer without an override
/// would.
#[derive(Default)]
pub struct ScriptedObserver {
    hook: RefCell<Option<UpdateHook>>,
    calls: Cell<usize>,
}

impl ScriptedObserver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_update<F>(&self, hook: F)
    where
        F: Fn(&dyn Observable) -> Result<(), ObserverError> + 'static,
    {
        *self.hook.borrow_mut() = Some(Rc::new(hook));
    }

    pub fn clear_update(&self) {
        *self.hook.borrow_mut() = None;
    }

    /// Number of times `update` has been called, successful or not.
    pub fn calls(&self) -> usize {
        self.calls.get()
    }
}

impl Observer for ScriptedObserver {
    fn update(&self, subject: &dyn Observable) -> Result<(), ObserverError> {
        self.calls.set(self.calls.get() + 1);
        // The hook may replace itself, so it runs outside the borrow.
        let hook = self.hook.borrow().clone();
        match hook {
            Some(hook) => hook(subject),
            None => Err(ObserverError::NotImplemented {
                operation: "update",
            }),
        }
    }
}

/// A plain observable identified by name.
#[derive(Debug, Default)]
pub struct NamedSubject {
    pub name: String,
    attachments: Attachments,
}

impl NamedSubject {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            attachments: Attachments::new(),
        }
    }

    /// Reads `name`.
    pub fn from_ptree(ptree: &PropertyTree) -> Result<Self, TreeError> {
        Ok(Self::new(ptree.get_string("name")?))
    }
}

impl Observable for NamedSubject {
    fn attachments(&self) -> &Attachments {
        &self.attachments
    }

    fn attachments_mut(&mut self) -> &mut Attachments {
        &mut self.attachments
    }
}
