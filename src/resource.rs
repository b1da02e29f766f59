//! Per-resource load state shared by the stores.
//!
//! Each remote collection a store owns lives in a [`Slot`]: the data, its
//! [`Status`], the last error message and a generation counter. Every fetch
//! takes a [`Ticket`] when it starts; a completion is only applied if its
//! ticket is still the newest one, so an older response arriving late cannot
//! overwrite a newer one.

use std::sync::{PoisonError, RwLock};

/// Lifecycle of one resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Status {
    #[default]
    Idle,
    Loading,
    Success,
    Error,
}

/// Generation of an issued request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ticket(u64);

/// Data plus load state for one remote resource.
#[derive(Debug, Clone, Default)]
pub struct Resource<T> {
    data: T,
    status: Status,
    error: Option<String>,
    issued: u64,
}

impl<T> Resource<T> {
    pub fn new(data: T) -> Self {
        Self {
            data,
            status: Status::Idle,
            error: None,
            issued: 0,
        }
    }

    /// Start a request and return its ticket.
    pub fn begin(&mut self) -> Ticket {
        self.issued += 1;
        self.status = Status::Loading;
        self.error = None;
        Ticket(self.issued)
    }

    pub fn is_current(&self, ticket: Ticket) -> bool {
        ticket.0 == self.issued
    }

    /// Apply a successful response. Returns false if the ticket is stale.
    pub fn succeed(&mut self, ticket: Ticket, data: T) -> bool {
        if !self.is_current(ticket) {
            return false;
        }
        self.data = data;
        self.status = Status::Success;
        self.error = None;
        true
    }

    /// Record a failure, keeping the previous data. Returns false if the ticket is stale.
    pub fn fail(&mut self, ticket: Ticket, message: impl Into<String>) -> bool {
        if !self.is_current(ticket) {
            return false;
        }
        self.status = Status::Error;
        self.error = Some(message.into());
        true
    }

    pub fn data(&self) -> &T {
        &self.data
    }

    /// Mutate the data outside of a fetch, e.g. after a confirmed create.
    pub fn data_mut(&mut self) -> &mut T {
        &mut self.data
    }

    pub fn status(&self) -> Status {
        self.status
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn is_loading(&self) -> bool {
        self.status == Status::Loading
    }
}

/// A [`Resource`] behind a lock.
///
/// Guards never escape the closures, so no lock is held across an await.
#[derive(Debug, Default)]
pub struct Slot<T> {
    inner: RwLock<Resource<T>>,
}

impl<T> Slot<T> {
    pub fn new(data: T) -> Self {
        Self {
            inner: RwLock::new(Resource::new(data)),
        }
    }

    /// Read the resource without changing it.
    pub fn read<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&Resource<T>) -> R,
    {
        let guard = self.inner.read().unwrap_or_else(PoisonError::into_inner);
        f(&guard)
    }

    /// Update the resource.
    pub fn update<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&mut Resource<T>) -> R,
    {
        let mut guard = self.inner.write().unwrap_or_else(PoisonError::into_inner);
        f(&mut guard)
    }

    pub fn begin(&self) -> Ticket {
        self.update(|resource| resource.begin())
    }

    pub fn status(&self) -> Status {
        self.read(|resource| resource.status())
    }

    pub fn error(&self) -> Option<String> {
        self.read(|resource| resource.error().map(str::to_string))
    }

    pub fn is_loading(&self) -> bool {
        self.read(|resource| resource.is_loading())
    }
}

impl<T: Clone> Slot<T> {
    /// Clone of the current data.
    pub fn get(&self) -> T {
        self.read(|resource| resource.data().clone())
    }
}

type Subscriber<E> = Box<dyn Fn(E) + Send + Sync>;

/// Change listeners for a store.
pub struct Subscribers<E> {
    callbacks: RwLock<Vec<Subscriber<E>>>,
}

impl<E> Default for Subscribers<E> {
    fn default() -> Self {
        Self {
            callbacks: RwLock::new(Vec::new()),
        }
    }
}

impl<E: Copy> Subscribers<E> {
    pub fn add<F>(&self, callback: F)
    where
        F: Fn(E) + Send + Sync + 'static,
    {
        self.callbacks
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .push(Box::new(callback));
    }

    /// Call every listener. Must not be called while a store lock is held.
    pub fn notify(&self, event: E) {
        let callbacks = self.callbacks.read().unwrap_or_else(PoisonError::into_inner);
        for callback in callbacks.iter() {
            callback(event);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    #[test]
    fn test_begin_moves_to_loading_and_clears_error() {
        let mut resource = Resource::new(Vec::<u32>::new());
        let first = resource.begin();
        assert!(resource.fail(first, "boom"));
        assert_eq!(resource.status(), Status::Error);
        assert_eq!(resource.error(), Some("boom"));

        resource.begin();
        assert_eq!(resource.status(), Status::Loading);
        assert_eq!(resource.error(), None);
    }

    #[test]
    fn test_stale_ticket_is_discarded() {
        let mut resource = Resource::new(Vec::<u32>::new());
        let older = resource.begin();
        let newer = resource.begin();

        assert!(resource.succeed(newer, vec![2]));
        assert!(!resource.succeed(older, vec![1]));
        assert!(!resource.fail(older, "late failure"));

        assert_eq!(resource.data(), &vec![2]);
        assert_eq!(resource.status(), Status::Success);
        assert_eq!(resource.error(), None);
    }

    #[test]
    fn test_failure_keeps_previous_data() {
        let mut resource = Resource::new(vec![1, 2, 3]);
        let ticket = resource.begin();
        resource.fail(ticket, "offline");
        assert_eq!(resource.data(), &vec![1, 2, 3]);
    }

    #[test]
    fn test_slot_loading_until_latest_completes() {
        let slot = Slot::new(0u32);
        let older = slot.begin();
        let newer = slot.begin();

        slot.update(|r| r.succeed(older, 1));
        assert!(slot.is_loading());

        slot.update(|r| r.succeed(newer, 2));
        assert!(!slot.is_loading());
        assert_eq!(slot.get(), 2);
    }

    #[test]
    fn test_subscribers_notified() {
        let subscribers = Subscribers::<u8>::default();
        let seen = Arc::new(AtomicUsize::new(0));
        let counter = seen.clone();
        subscribers.add(move |event| {
            counter.fetch_add(event as usize, Ordering::SeqCst);
        });

        subscribers.notify(2);
        subscribers.notify(3);
        assert_eq!(seen.load(Ordering::SeqCst), 5);
    }
}
