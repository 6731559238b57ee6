//! LoadHandle - observable progress of one asynchronous load

use std::sync::{Arc, Condvar, Mutex};

use crate::error::{Error, Result};

/// Progress of an asynchronous load
///
/// States advance monotonically; `Failed` is terminal and reachable from
/// any non-terminal state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadState {
    /// Queued, no worker picked it up yet
    Requested,
    /// Worker is decoding the source file
    Decoding,
    /// Pixels and metadata written to staging memory
    Staged,
    /// Transfer-queue work submitted (copies + release barriers)
    TransferSubmitted,
    /// Destination-queue acquire submitted, waiting for the GPU
    OwnershipTransferring,
    /// Destination queue family owns the resources
    Acquired,
    /// Fully loaded, value available
    Ready,
    /// Load failed, error available
    Failed,
}

struct Slot<T> {
    state: LoadState,
    value: Option<Arc<T>>,
    error: Option<Error>,
}

/// Consumer side of one asynchronous load
///
/// Cheap to clone; every clone observes the same load.
pub struct LoadHandle<T> {
    slot: Arc<(Mutex<Slot<T>>, Condvar)>,
}

impl<T> Clone for LoadHandle<T> {
    fn clone(&self) -> Self {
        Self {
            slot: self.slot.clone(),
        }
    }
}

impl<T> LoadHandle<T> {
    /// Current state of the load
    pub fn state(&self) -> LoadState {
        self.slot.0.lock().unwrap().state
    }

    /// The loaded value, if the load already finished successfully
    pub fn try_get(&self) -> Option<Arc<T>> {
        self.slot.0.lock().unwrap().value.clone()
    }

    /// Block until the load finishes
    ///
    /// Returns the value on `Ready` or the recorded error on `Failed`.
    pub fn wait(&self) -> Result<Arc<T>> {
        let (lock, condvar) = &*self.slot;
        let mut slot = lock.lock().unwrap();
        while slot.state != LoadState::Ready && slot.state != LoadState::Failed {
            slot = condvar.wait(slot).unwrap();
        }
        match slot.state {
            LoadState::Ready => Ok(slot.value.clone().unwrap()),
            _ => Err(slot.error.clone().unwrap()),
        }
    }
}

/// Producer side, held by the loading worker
pub(crate) struct LoadPublisher<T> {
    slot: Arc<(Mutex<Slot<T>>, Condvar)>,
}

impl<T> LoadPublisher<T> {
    /// Advance to a non-terminal state
    pub(crate) fn set_state(&self, state: LoadState) {
        let mut slot = self.slot.0.lock().unwrap();
        slot.state = state;
    }

    /// Publish the finished value and wake every waiter
    pub(crate) fn publish(&self, value: Arc<T>) {
        let (lock, condvar) = &*self.slot;
        let mut slot = lock.lock().unwrap();
        slot.value = Some(value);
        slot.state = LoadState::Ready;
        condvar.notify_all();
    }

    /// Record a failure and wake every waiter
    pub(crate) fn fail(&self, error: Error) {
        let (lock, condvar) = &*self.slot;
        let mut slot = lock.lock().unwrap();
        slot.error = Some(error);
        slot.state = LoadState::Failed;
        condvar.notify_all();
    }
}

impl<T> Drop for LoadPublisher<T> {
    fn drop(&mut self) {
        // A publisher dropped without reaching a terminal state would leave
        // waiters blocked forever; record the abandonment as a failure.
        let (lock, condvar) = &*self.slot;
        let mut slot = lock.lock().unwrap();
        if slot.state != LoadState::Ready && slot.state != LoadState::Failed {
            slot.error = Some(Error::DeviceCall(
                "load abandoned before completion".to_string(),
            ));
            slot.state = LoadState::Failed;
            condvar.notify_all();
        }
    }
}

/// A fresh handle/publisher pair in the `Requested` state
pub(crate) fn load_channel<T>() -> (LoadHandle<T>, LoadPublisher<T>) {
    let slot = Arc::new((
        Mutex::new(Slot {
            state: LoadState::Requested,
            value: None,
            error: None,
        }),
        Condvar::new(),
    ));
    (
        LoadHandle { slot: slot.clone() },
        LoadPublisher { slot },
    )
}
