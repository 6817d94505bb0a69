//! Continuous DataSet Module
//! `f64` vs `f64` dataset that can derive dependent series from functions of
//! the independent values.

use super::dataset::{DataError, DataObserver, DataSet, DataSetId, DataView};
use std::cell::RefCell;
use std::rc::Rc;
use tracing::debug;

/// Function mapping an independent value to a dependent value.
pub type SeriesFn = Box<dyn Fn(f64) -> f64 + Send>;

/// A `DataSet<f64>` whose function series are recomputed whenever the
/// independent values change.
#[derive(Default)]
pub struct ContinuousDataSet {
    inner: DataSet<f64>,
    functions: Vec<SeriesFn>,
    /// Index in `inner.dependent` of each function's series, same order as
    /// `functions`.
    function_slots: Vec<usize>,
}

impl std::fmt::Debug for ContinuousDataSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ContinuousDataSet")
            .field("inner", &self.inner)
            .field("functions", &self.functions.len())
            .finish()
    }
}

impl ContinuousDataSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn id(&self) -> DataSetId {
        self.inner.id()
    }

    pub fn independent(&self) -> &[f64] {
        self.inner.independent()
    }

    pub fn dependent(&self) -> &[Vec<f64>] {
        self.inner.dependent()
    }

    pub fn view(&self) -> DataView<'_, f64> {
        self.inner.view()
    }

    pub fn function_count(&self) -> usize {
        self.functions.len()
    }

    /// Add a function series. Its values are computed right away from the
    /// current independent values.
    pub fn add_function<F>(&mut self, f: F)
    where
        F: Fn(f64) -> f64 + Send + 'static,
    {
        self.add_function_silently(Box::new(f));
        self.inner.notify();
    }

    pub fn set_independent(&mut self, values: impl IntoIterator<Item = f64>) {
        self.inner.replace_independent(values);
        self.reapply_functions();
        self.inner.notify();
    }

    pub fn push_independent(&mut self, value: f64) {
        self.inner.independent_mut().push(value);
        self.reapply_functions();
        self.inner.notify();
    }

    pub fn clear_independent(&mut self) {
        self.inner.independent_mut().clear();
        self.reapply_functions();
        self.inner.notify();
    }

    pub fn add_dependent(&mut self, values: Vec<f64>) {
        self.inner.dependent_mut().push(values);
        self.inner.notify();
    }

    /// Remove a dependent series. Removing a function series drops its
    /// function as well.
    pub fn remove_dependent(&mut self, index: usize) -> Result<Vec<f64>, DataError> {
        let removed = self.remove_dependent_silently(index)?;
        self.inner.notify();
        Ok(removed)
    }

    pub fn add_observer<O>(&mut self, observer: &Rc<RefCell<O>>)
    where
        O: DataObserver<f64> + 'static,
    {
        self.inner.add_observer(observer);
    }

    pub fn remove_observer<O>(&mut self, observer: &Rc<RefCell<O>>)
    where
        O: DataObserver<f64> + 'static,
    {
        self.inner.remove_observer(observer);
    }

    pub fn remove_all_observers(&mut self) {
        self.inner.remove_all_observers();
    }

    pub fn observer_count(&mut self) -> usize {
        self.inner.observer_count()
    }

    pub(crate) fn notify(&mut self) {
        self.inner.notify();
    }

    pub(crate) fn inner_mut(&mut self) -> &mut DataSet<f64> {
        &mut self.inner
    }

    pub(crate) fn add_function_silently(&mut self, f: SeriesFn) {
        let values = self.inner.independent().iter().map(|&x| f(x)).collect();
        let dependent = self.inner.dependent_mut();
        self.function_slots.push(dependent.len());
        dependent.push(values);
        self.functions.push(f);
    }

    pub(crate) fn remove_dependent_silently(&mut self, index: usize) -> Result<Vec<f64>, DataError> {
        let removed = self.inner.take_dependent(index)?;
        if let Some(pos) = self.function_slots.iter().position(|&s| s == index) {
            self.function_slots.remove(pos);
            drop(self.functions.remove(pos));
        }
        for slot in self.function_slots.iter_mut() {
            if *slot > index {
                *slot -= 1;
            }
        }
        Ok(removed)
    }

    /// Drop every function series and recompute them at the end of the
    /// dependent list, in function order.
    pub(crate) fn reapply_functions(&mut self) {
        if self.functions.is_empty() {
            return;
        }
        let mut slots = std::mem::take(&mut self.function_slots);
        slots.sort_unstable();
        let dependent = self.inner.dependent_mut();
        for &slot in slots.iter().rev() {
            dependent.remove(slot);
        }

        let independent = self.inner.independent().to_vec();
        for f in &self.functions {
            let values = independent.iter().map(|&x| f(x)).collect();
            let dependent = self.inner.dependent_mut();
            self.function_slots.push(dependent.len());
            dependent.push(values);
        }
        debug!(functions = self.functions.len(), points = independent.len(), "Reapplied functions");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::dataset::tests::Recorder;

    #[test]
    fn test_function_applied_immediately() {
        let mut ds = ContinuousDataSet::new();
        ds.set_independent(vec![1.0, 2.0, 3.0]);
        ds.add_function(|x| x * 2.0);
        assert_eq!(ds.dependent(), &[vec![2.0, 4.0, 6.0]]);
        assert_eq!(ds.function_count(), 1);
    }

    #[test]
    fn test_function_added_before_independent() {
        let mut ds = ContinuousDataSet::new();
        ds.add_function(|x| x * x);
        assert_eq!(ds.dependent(), &[Vec::<f64>::new()]);

        ds.set_independent(vec![-1.0, 0.0, 3.0]);
        assert_eq!(ds.dependent(), &[vec![1.0, 0.0, 9.0]]);
    }

    #[test]
    fn test_functions_move_after_plain_series() {
        let mut ds = ContinuousDataSet::new();
        ds.add_function(|x| x + 1.0);
        ds.add_dependent(vec![7.0, 7.0]);
        ds.set_independent(vec![0.0, 1.0]);

        assert_eq!(ds.dependent(), &[vec![7.0, 7.0], vec![1.0, 2.0]]);
    }

    #[test]
    fn test_push_independent_extends_function_series() {
        let mut ds = ContinuousDataSet::new();
        ds.set_independent(vec![0.0]);
        ds.add_function(|x| x - 1.0);
        ds.push_independent(5.0);
        assert_eq!(ds.dependent(), &[vec![-1.0, 4.0]]);
    }

    #[test]
    fn test_clear_independent_empties_function_series() {
        let mut ds = ContinuousDataSet::new();
        ds.set_independent(vec![0.0, 1.0]);
        ds.add_function(|x| x);
        ds.add_dependent(vec![3.0]);
        ds.clear_independent();
        assert!(ds.independent().is_empty());
        assert_eq!(ds.dependent(), &[vec![3.0], Vec::new()]);
    }

    #[test]
    fn test_remove_function_series_drops_function() {
        let mut ds = ContinuousDataSet::new();
        ds.set_independent(vec![1.0]);
        ds.add_function(|x| x * 10.0);
        ds.add_function(|x| x * 100.0);
        ds.remove_dependent(0).unwrap();
        assert_eq!(ds.function_count(), 1);

        ds.push_independent(2.0);
        assert_eq!(ds.dependent(), &[vec![100.0, 200.0]]);
    }

    #[test]
    fn test_remove_plain_series_keeps_function_slots() {
        let mut ds = ContinuousDataSet::new();
        ds.add_dependent(vec![5.0]);
        ds.set_independent(vec![1.0]);
        ds.add_function(|x| -x);
        ds.remove_dependent(0).unwrap();
        ds.push_independent(2.0);
        assert_eq!(ds.dependent(), &[vec![-1.0, -2.0]]);
    }

    #[test]
    fn test_observers_see_recomputed_functions() {
        let mut ds = ContinuousDataSet::new();
        ds.add_function(|x| x * 3.0);
        let recorder = Rc::new(RefCell::new(Recorder::default()));
        ds.add_observer(&recorder);

        ds.set_independent(vec![1.0, 2.0]);
        assert_eq!(recorder.borrow().dependent, vec![vec![3.0, 6.0]]);
    }
}
