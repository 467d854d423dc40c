use core::ops::{Deref, DerefMut};
use ardor_logging::log_verbose;
use parking_lot::Mutex;
use scopeguard::ScopeGuard;
use crate::*;

/// Capacity of a pool created with `Default`
pub const DEFAULT_POOL_SIZE : usize = 11;

/// Size bounded free-list of heap allocated scratch instances
///
/// Fetched instances keep whatever state they had when they were released, so callers need to overwrite them before use.
/// The pool is single-owner, use [`SyncObjectPool`] to share a pool between threads.
#[derive(Debug)]
pub struct ObjectPool<T: Default> {
    free     : Vec<Box<T>>,
    max_size : usize,
}

impl<T: Default> ObjectPool<T> {
    /// Create a pool retaining at most `max_size` released instances
    pub fn new(max_size: usize) -> Result<Self> {
        if max_size == 0 {
            return Err(Error::PoolCapacity);
        }
        Ok(Self { free: Vec::with_capacity(max_size), max_size })
    }

    /// Take an instance from the pool, or allocate a new one when the pool is empty
    #[must_use]
    pub fn fetch(&mut self) -> Box<T> {
        self.free.pop().unwrap_or_default()
    }

    /// Return an instance to the pool, the instance is dropped when the pool is already full
    pub fn release(&mut self, obj: Box<T>) {
        if self.free.len() < self.max_size {
            self.free.push(obj);
        } else {
            log_verbose!(crate::LOG_CAT, "Pool of {} is full ({} instances), dropping released instance", core::any::type_name::<T>(), self.max_size);
        }
    }

    /// Fetch an instance that is released back into the pool when the guard goes out of scope
    #[must_use]
    pub fn scoped(&mut self) -> Pooled<T, &mut Self> {
        let obj = self.fetch();
        Pooled::new(obj, self)
    }

    /// Number of instances currently held by the pool
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.free.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.free.is_empty()
    }

    #[inline]
    #[must_use]
    pub fn max_size(&self) -> usize {
        self.max_size
    }
}

impl<T: Default> Default for ObjectPool<T> {
    fn default() -> Self {
        Self { free: Vec::with_capacity(DEFAULT_POOL_SIZE), max_size: DEFAULT_POOL_SIZE }
    }
}

//------------------------------------------------------------------------------------------------------------------------------

/// [`ObjectPool`] behind a lock, so it can be shared between threads
#[derive(Debug, Default)]
pub struct SyncObjectPool<T: Default> {
    pool : Mutex<ObjectPool<T>>,
}

impl<T: Default> SyncObjectPool<T> {
    /// Create a pool retaining at most `max_size` released instances
    pub fn new(max_size: usize) -> Result<Self> {
        Ok(Self { pool: Mutex::new(ObjectPool::new(max_size)?) })
    }

    /// Take an instance from the pool, or allocate a new one when the pool is empty
    #[must_use]
    pub fn fetch(&self) -> Box<T> {
        self.pool.lock().fetch()
    }

    /// Return an instance to the pool, the instance is dropped when the pool is already full
    pub fn release(&self, obj: Box<T>) {
        self.pool.lock().release(obj)
    }

    /// Fetch an instance that is released back into the pool when the guard goes out of scope
    #[must_use]
    pub fn scoped(&self) -> Pooled<T, &Self> {
        Pooled::new(self.fetch(), self)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.pool.lock().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pool.lock().is_empty()
    }

    #[must_use]
    pub fn max_size(&self) -> usize {
        self.pool.lock().max_size()
    }
}

//------------------------------------------------------------------------------------------------------------------------------

/// Destination of a [`Pooled`] instance
pub trait ReleaseTo<T> {
    fn release_to(self, obj: Box<T>);
}

impl<T: Default> ReleaseTo<T> for &mut ObjectPool<T> {
    fn release_to(self, obj: Box<T>) {
        self.release(obj)
    }
}

impl<T: Default> ReleaseTo<T> for &SyncObjectPool<T> {
    fn release_to(self, obj: Box<T>) {
        self.release(obj)
    }
}

/// Pooled instance, released back into its pool on drop
pub struct Pooled<T, P: ReleaseTo<T>> {
    guard : ScopeGuard<(Box<T>, P), fn((Box<T>, P))>,
}

impl<T, P: ReleaseTo<T>> Pooled<T, P> {
    fn new(obj: Box<T>, pool: P) -> Self {
        let release : fn((Box<T>, P)) = |(obj, pool)| pool.release_to(obj);
        Self { guard: scopeguard::guard((obj, pool), release) }
    }

    /// Take the instance out of the guard, it won't be returned to the pool
    #[must_use]
    pub fn into_inner(self) -> Box<T> {
        ScopeGuard::into_inner(self.guard).0
    }
}

impl<T, P: ReleaseTo<T>> Deref for Pooled<T, P> {
    type Target = T;

    fn deref(&self) -> &T {
        &self.guard.0
    }
}

impl<T, P: ReleaseTo<T>> DerefMut for Pooled<T, P> {
    fn deref_mut(&mut self) -> &mut T {
        &mut self.guard.0
    }
}

#[cfg(test)]
mod tests {
    use crate::*;

    #[test]
    fn capacity() {
        assert_eq!(ObjectPool::<Vector3>::new(0).err(), Some(Error::PoolCapacity));
        assert!(SyncObjectPool::<Vector3>::new(0).is_err());

        let pool = ObjectPool::<Matrix4>::default();
        assert_eq!(pool.max_size(), DEFAULT_POOL_SIZE);
        assert!(pool.is_empty());
    }

    #[test]
    fn surplus_is_dropped() {
        let mut pool = ObjectPool::<Vector3>::new(3).unwrap();
        let fetched : Vec<_> = (0..5).map(|_| pool.fetch()).collect();
        assert_eq!(pool.len(), 0);

        for obj in fetched {
            pool.release(obj);
        }
        assert_eq!(pool.len(), 3);
        assert_eq!(pool.max_size(), 3);
    }

    #[test]
    fn released_instance_is_reused() {
        let mut pool = ObjectPool::<Vector3>::new(4).unwrap();
        let mut obj = pool.fetch();
        obj.x = 5.0;
        let addr = &*obj as *const Vector3;
        pool.release(obj);

        let again = pool.fetch();
        assert_eq!(&*again as *const Vector3, addr);
        // The pool does not reset released instances
        assert_eq!(again.x, 5.0);
        assert!(pool.is_empty());
    }

    #[test]
    fn scoped_release() {
        let mut pool = ObjectPool::<Quaternion>::new(2).unwrap();
        {
            let mut quat = pool.scoped();
            *quat = Quaternion::from_angle_axis(HALF_PI, Vector3::UNIT_Y);
            assert!(quat.is_valid());
        }
        assert_eq!(pool.len(), 1);

        let kept = pool.scoped().into_inner();
        assert!(pool.is_empty());
        pool.release(kept);
        assert_eq!(pool.len(), 1);
    }

    #[test]
    fn shared_between_threads() {
        let pool = SyncObjectPool::<Matrix3>::new(8).unwrap();
        std::thread::scope(|s| {
            for _ in 0..4 {
                s.spawn(|| {
                    for _ in 0..16 {
                        let mut mat = pool.scoped();
                        *mat = Matrix3::IDENTITY;
                        assert!(mat.is_identity());
                    }
                });
            }
        });
        assert!(pool.len() <= pool.max_size());
        assert!(!pool.is_empty());
    }
}
