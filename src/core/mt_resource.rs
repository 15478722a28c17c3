use std::{
    fmt,
    sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard},
};

/// Shared state handed between the client thread, the authority thread and the host.
///
/// Cloning yields another handle to the same value. The authority keeps each actor's
/// session behind one of these, and the sandbox host keeps its world and actor in them
/// so the demo can inspect both after the authority thread has finished.
///
/// A panic while a guard is held poisons the lock. The guards returned here recover the
/// inner value instead of re-raising the panic on every later access.
///
/// ```
/// use std::thread;
/// use vein_miner::core::MtResource;
///
/// let mined = MtResource::new(0usize);
/// let authority_view = mined.clone();
///
/// thread::spawn(move || *authority_view.get_mut() += 12)
///     .join()
///     .unwrap();
///
/// assert_eq!(*mined.get(), 12);
/// ```
pub struct MtResource<T: Send + Sync> {
    shared: Arc<RwLock<T>>,
}

impl<T: Send + Sync + 'static> MtResource<T> {
    pub fn new(value: T) -> Self {
        Self {
            shared: Arc::new(RwLock::new(value)),
        }
    }

    /// Read access; concurrent readers do not block each other.
    pub fn get(&self) -> RwLockReadGuard<'_, T> {
        self.shared.read().unwrap_or_else(PoisonError::into_inner)
    }

    /// Exclusive access.
    pub fn get_mut(&self) -> RwLockWriteGuard<'_, T> {
        self.shared.write().unwrap_or_else(PoisonError::into_inner)
    }

    /// Whether both handles point at the same value.
    pub fn same_as(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.shared, &other.shared)
    }
}

impl<T: Send + Sync> Clone for MtResource<T> {
    fn clone(&self) -> Self {
        Self {
            shared: Arc::clone(&self.shared),
        }
    }
}

impl<T: Send + Sync + Default + 'static> Default for MtResource<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}

impl<T: Send + Sync + fmt::Debug + 'static> fmt::Debug for MtResource<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("MtResource").field(&*self.get()).finish()
    }
}
