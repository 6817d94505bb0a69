//! Data module - observable datasets, cross-thread updates and CSV loading

mod continuous;
mod dataset;
mod dispatch;
mod loader;

pub use continuous::{ContinuousDataSet, SeriesFn};
pub use dataset::{CategoricDataSet, DataError, DataObserver, DataSet, DataSetId, DataView};
pub use dispatch::{
    update_channel, ApplyMutation, ContinuousMutation, DispatchError, Mutation, UpdateQueue,
    UpdateSender,
};
pub use loader::{DataLoader, LoaderError};
