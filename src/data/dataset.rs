//! DataSet Module
//! Observable container of one independent series and any number of
//! dependent series. Charts register as observers and are pushed every
//! change.

use std::cell::RefCell;
use std::ptr;
use std::rc::{Rc, Weak};
use std::sync::atomic::{AtomicU64, Ordering};
use thiserror::Error;
use tracing::{debug, warn};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DataError {
    #[error("Dependent series {index} does not exist ({len} series present)")]
    DependentOutOfRange { index: usize, len: usize },
}

static NEXT_ID: AtomicU64 = AtomicU64::new(0);

/// Process-unique identity of a dataset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DataSetId(u64);

impl DataSetId {
    fn next() -> Self {
        Self(NEXT_ID.fetch_add(1, Ordering::Relaxed))
    }
}

/// Borrowed snapshot handed to observers.
#[derive(Debug)]
pub struct DataView<'a, I> {
    pub independent: &'a [I],
    pub dependent: &'a [Vec<f64>],
}

impl<I> Clone for DataView<'_, I> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<I> Copy for DataView<'_, I> {}

impl<I> DataView<'_, I> {
    /// True when there is something to plot: independent values and at least
    /// one non-empty dependent series.
    pub fn is_plottable(&self) -> bool {
        !self.independent.is_empty() && self.dependent.iter().any(|d| !d.is_empty())
    }
}

/// Receives pushes from a [`DataSet`].
pub trait DataObserver<I> {
    /// Registered with `source`; `data` is its current content.
    fn attached(&mut self, source: DataSetId, data: DataView<'_, I>);

    /// `source` changed.
    fn data_changed(&mut self, source: DataSetId, data: DataView<'_, I>);

    /// No longer observing `source`.
    fn detached(&mut self, source: DataSetId);
}

type ObserverRef<I> = Weak<RefCell<dyn DataObserver<I>>>;

/// Mutable data holder. Every public mutation notifies the registered
/// observers once.
pub struct DataSet<I> {
    id: DataSetId,
    independent: Vec<I>,
    dependent: Vec<Vec<f64>>,
    observers: Vec<ObserverRef<I>>,
}

/// Dataset whose independent values are category names.
pub type CategoricDataSet = DataSet<String>;

impl<I> Default for DataSet<I> {
    fn default() -> Self {
        Self::new()
    }
}

impl<I> PartialEq for DataSet<I> {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl<I: std::fmt::Debug> std::fmt::Debug for DataSet<I> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DataSet")
            .field("id", &self.id)
            .field("independent", &self.independent)
            .field("dependent", &self.dependent)
            .field("observers", &self.observers.len())
            .finish()
    }
}

impl<I> DataSet<I> {
    pub fn new() -> Self {
        Self {
            id: DataSetId::next(),
            independent: Vec::new(),
            dependent: Vec::new(),
            observers: Vec::new(),
        }
    }

    pub fn id(&self) -> DataSetId {
        self.id
    }

    pub fn independent(&self) -> &[I] {
        &self.independent
    }

    pub fn dependent(&self) -> &[Vec<f64>] {
        &self.dependent
    }

    pub fn view(&self) -> DataView<'_, I> {
        DataView {
            independent: &self.independent,
            dependent: &self.dependent,
        }
    }

    /// Replace the independent series.
    pub fn set_independent(&mut self, values: impl IntoIterator<Item = I>) {
        self.replace_independent(values);
        self.notify();
    }

    pub fn push_independent(&mut self, value: I) {
        self.independent.push(value);
        self.notify();
    }

    pub fn clear_independent(&mut self) {
        self.independent.clear();
        self.notify();
    }

    pub fn add_dependent(&mut self, values: Vec<f64>) {
        self.dependent.push(values);
        self.notify();
    }

    /// Remove a dependent series by insertion order.
    pub fn remove_dependent(&mut self, index: usize) -> Result<Vec<f64>, DataError> {
        let removed = self.take_dependent(index)?;
        self.notify();
        Ok(removed)
    }

    /// Start pushing changes to `observer`. It immediately receives the
    /// current data. Registering twice is a no-op.
    pub fn add_observer<O>(&mut self, observer: &Rc<RefCell<O>>)
    where
        O: DataObserver<I> + 'static,
    {
        self.prune();
        if self.position_of(observer).is_some() {
            return;
        }
        let shared: Rc<RefCell<dyn DataObserver<I>>> = observer.clone();
        self.observers.push(Rc::downgrade(&shared));

        match observer.try_borrow_mut() {
            Ok(mut o) => o.attached(self.id, self.view()),
            Err(_) => warn!(dataset = ?self.id, "Observer busy during attach, first update deferred"),
        }
    }

    /// Stop pushing changes to `observer` and tell it so.
    pub fn remove_observer<O>(&mut self, observer: &Rc<RefCell<O>>)
    where
        O: DataObserver<I> + 'static,
    {
        if let Some(pos) = self.position_of(observer) {
            self.observers.remove(pos);
            match observer.try_borrow_mut() {
                Ok(mut o) => o.detached(self.id),
                Err(_) => warn!(dataset = ?self.id, "Observer busy during detach"),
            }
        }
    }

    pub fn remove_all_observers(&mut self) {
        for weak in std::mem::take(&mut self.observers) {
            if let Some(o) = weak.upgrade() {
                match o.try_borrow_mut() {
                    Ok(mut o) => o.detached(self.id),
                    Err(_) => warn!(dataset = ?self.id, "Observer busy during detach"),
                }
            }
        }
    }

    /// Number of observers still alive.
    pub fn observer_count(&mut self) -> usize {
        self.prune();
        self.observers.len()
    }

    /// Push the current content to every live observer.
    pub(crate) fn notify(&mut self) {
        self.prune();
        debug!(dataset = ?self.id, observers = self.observers.len(), "Notifying observers");
        let view = DataView {
            independent: &self.independent,
            dependent: &self.dependent,
        };
        for weak in &self.observers {
            let Some(observer) = weak.upgrade() else {
                continue;
            };
            match observer.try_borrow_mut() {
                Ok(mut o) => o.data_changed(self.id, view),
                Err(_) => warn!(dataset = ?self.id, "Observer busy, skipped update"),
            };
        }
    }

    pub(crate) fn replace_independent(&mut self, values: impl IntoIterator<Item = I>) {
        self.independent.clear();
        self.independent.extend(values);
    }

    pub(crate) fn independent_mut(&mut self) -> &mut Vec<I> {
        &mut self.independent
    }

    pub(crate) fn dependent_mut(&mut self) -> &mut Vec<Vec<f64>> {
        &mut self.dependent
    }

    pub(crate) fn take_dependent(&mut self, index: usize) -> Result<Vec<f64>, DataError> {
        if index >= self.dependent.len() {
            return Err(DataError::DependentOutOfRange {
                index,
                len: self.dependent.len(),
            });
        }
        Ok(self.dependent.remove(index))
    }

    fn position_of<O>(&self, observer: &Rc<RefCell<O>>) -> Option<usize>
    where
        O: DataObserver<I> + 'static,
    {
        let target = Rc::as_ptr(observer);
        self.observers
            .iter()
            .position(|w| ptr::addr_eq(w.as_ptr(), target))
    }

    fn prune(&mut self) {
        self.observers.retain(|w| w.strong_count() > 0);
    }
}
