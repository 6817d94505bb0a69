//! Dispatch Module
//! Marshals dataset mutations from any thread onto the thread that owns the
//! datasets and their charts.

use super::continuous::{ContinuousDataSet, SeriesFn};
use super::dataset::{DataError, DataSet};
use std::sync::mpsc::{channel, Receiver, Sender};
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, warn};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DispatchError {
    #[error("Update queue has been dropped")]
    Disconnected,
}

/// Mutation applicable to any [`DataSet`].
#[derive(Debug, Clone, PartialEq)]
pub enum Mutation<I> {
    SetIndependent(Vec<I>),
    PushIndependent(I),
    ClearIndependent,
    AddDependent(Vec<f64>),
    RemoveDependent(usize),
}

/// Mutation of a [`ContinuousDataSet`].
pub enum ContinuousMutation {
    Data(Mutation<f64>),
    AddFunction(SeriesFn),
}

impl From<Mutation<f64>> for ContinuousMutation {
    fn from(m: Mutation<f64>) -> Self {
        ContinuousMutation::Data(m)
    }
}

/// A model that can take mutations without notifying, then notify once.
pub trait ApplyMutation<M> {
    fn apply_silently(&mut self, mutation: M) -> Result<(), DataError>;

    fn notify_observers(&mut self);
}

impl<I> ApplyMutation<Mutation<I>> for DataSet<I> {
    fn apply_silently(&mut self, mutation: Mutation<I>) -> Result<(), DataError> {
        match mutation {
            Mutation::SetIndependent(values) => self.replace_independent(values),
            Mutation::PushIndependent(value) => self.independent_mut().push(value),
            Mutation::ClearIndependent => self.independent_mut().clear(),
            Mutation::AddDependent(values) => self.dependent_mut().push(values),
            Mutation::RemoveDependent(index) => {
                self.take_dependent(index)?;
            }
        }
        Ok(())
    }

    fn notify_observers(&mut self) {
        self.notify();
    }
}

impl ApplyMutation<ContinuousMutation> for ContinuousDataSet {
    fn apply_silently(&mut self, mutation: ContinuousMutation) -> Result<(), DataError> {
        match mutation {
            ContinuousMutation::AddFunction(f) => self.add_function_silently(f),
            ContinuousMutation::Data(Mutation::RemoveDependent(index)) => {
                self.remove_dependent_silently(index)?;
            }
            ContinuousMutation::Data(Mutation::AddDependent(values)) => {
                self.inner_mut().dependent_mut().push(values);
            }
            ContinuousMutation::Data(m) => {
                self.inner_mut().apply_silently(m)?;
                self.reapply_functions();
            }
        }
        Ok(())
    }

    fn notify_observers(&mut self) {
        self.notify();
    }
}

type Waker = Arc<dyn Fn() + Send + Sync>;

/// Sending half, cheap to clone and safe to move to worker threads.
pub struct UpdateSender<M> {
    tx: Sender<M>,
    waker: Option<Waker>,
}

impl<M> Clone for UpdateSender<M> {
    fn clone(&self) -> Self {
        Self {
            tx: self.tx.clone(),
            waker: self.waker.clone(),
        }
    }
}

impl<M> UpdateSender<M> {
    /// Call `waker` after every successful send, e.g. to wake a UI loop.
    pub fn with_waker<F>(mut self, waker: F) -> Self
    where
        F: Fn() + Send + Sync + 'static,
    {
        self.waker = Some(Arc::new(waker));
        self
    }

    pub fn send(&self, mutation: impl Into<M>) -> Result<(), DispatchError> {
        self.tx
            .send(mutation.into())
            .map_err(|_| DispatchError::Disconnected)?;
        if let Some(wake) = &self.waker {
            wake();
        }
        Ok(())
    }
}

/// Receiving half, owned by the thread that owns the dataset.
pub struct UpdateQueue<M> {
    rx: Receiver<M>,
}

impl<M> UpdateQueue<M> {
    /// Apply every pending mutation to `model`, then notify its observers
    /// once. Returns how many mutations were applied. A failing mutation does
    /// not stop the rest; the first error is returned at the end.
    pub fn drain_into<T>(&self, model: &mut T) -> Result<usize, DataError>
    where
        T: ApplyMutation<M>,
    {
        let mut applied = 0;
        let mut first_error = None;

        while let Ok(mutation) = self.rx.try_recv() {
            match model.apply_silently(mutation) {
                Ok(()) => applied += 1,
                Err(e) => {
                    warn!("Dropped queued mutation: {}", e);
                    first_error.get_or_insert(e);
                }
            }
        }

        if applied > 0 {
            debug!(applied, "Drained queued mutations");
            model.notify_observers();
        }

        match first_error {
            Some(e) => Err(e),
            None => Ok(applied),
        }
    }
}

/// Create a connected sender/queue pair.
pub fn update_channel<M>() -> (UpdateSender<M>, UpdateQueue<M>) {
    let (tx, rx) = channel();
    (UpdateSender { tx, waker: None }, UpdateQueue { rx })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::dataset::tests::Recorder;
    use std::cell::RefCell;
    use std::rc::Rc;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::thread;

    #[test]
    fn test_drain_applies_in_order_and_notifies_once() {
        let (tx, queue) = update_channel::<Mutation<f64>>();
        let mut ds = DataSet::new();
        let recorder = Rc::new(RefCell::new(Recorder::default()));
        ds.add_observer(&recorder);
        let before = recorder.borrow().updates;

        let worker_tx = tx.clone();
        thread::spawn(move || {
            worker_tx.send(Mutation::SetIndependent(vec![1.0, 2.0])).unwrap();
            worker_tx.send(Mutation::AddDependent(vec![5.0, 6.0])).unwrap();
            worker_tx.send(Mutation::PushIndependent(3.0)).unwrap();
        })
        .join()
        .unwrap();

        assert_eq!(queue.drain_into(&mut ds), Ok(3));
        assert_eq!(ds.independent(), &[1.0, 2.0, 3.0]);
        assert_eq!(recorder.borrow().updates, before + 1);
    }

    #[test]
    fn test_drain_reports_first_error_but_applies_rest() {
        let (tx, queue) = update_channel::<Mutation<String>>();
        let mut ds = DataSet::new();
        tx.send(Mutation::RemoveDependent(4)).unwrap();
        tx.send(Mutation::SetIndependent(vec!["a".to_string()])).unwrap();

        assert_eq!(
            queue.drain_into(&mut ds),
            Err(DataError::DependentOutOfRange { index: 4, len: 0 })
        );
        assert_eq!(ds.independent(), &["a".to_string()]);
    }

    #[test]
    fn test_empty_drain_does_not_notify() {
        let (_tx, queue) = update_channel::<Mutation<f64>>();
        let mut ds = DataSet::new();
        let recorder = Rc::new(RefCell::new(Recorder::default()));
        ds.add_observer(&recorder);
        let before = recorder.borrow().updates;
        assert_eq!(queue.drain_into(&mut ds), Ok(0));
        assert_eq!(recorder.borrow().updates, before);
    }

    #[test]
    fn test_continuous_mutations_recompute_functions() {
        let (tx, queue) = update_channel::<ContinuousMutation>();
        let mut ds = ContinuousDataSet::new();
        tx.send(ContinuousMutation::AddFunction(Box::new(|x| x + 0.5)))
            .unwrap();
        tx.send(Mutation::SetIndependent(vec![1.0, 2.0])).unwrap();

        assert_eq!(queue.drain_into(&mut ds), Ok(2));
        assert_eq!(ds.dependent(), &[vec![1.5, 2.5]]);
    }

    #[test]
    fn test_waker_called_per_send() {
        let wakes = Arc::new(AtomicUsize::new(0));
        let counter = wakes.clone();
        let (tx, _queue) = update_channel::<Mutation<f64>>();
        let tx = tx.with_waker(move || {
            counter.fetch_add(1, Ordering::SeqCst);
        });
        tx.send(Mutation::ClearIndependent).unwrap();
        tx.send(Mutation::PushIndependent(1.0)).unwrap();
        assert_eq!(wakes.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_send_after_queue_dropped() {
        let (tx, queue) = update_channel::<Mutation<f64>>();
        drop(queue);
        assert_eq!(
            tx.send(Mutation::ClearIndependent),
            Err(DispatchError::Disconnected)
        );
    }
}
