//! External pointer slots
//!
//! A [`Pointer`] lets an object record (a component's symbol, a picture's
//! pixmap) refer to data owned by the caller. The store never looks inside it.
//! It only clones and drops slots, and each clone or drop is reported to the
//! pointee through [`Pointee::increment`] and [`Pointee::decrement`].

use std::any::Any;
use std::fmt;
use std::sync::Arc;

/// Capability implemented by caller-owned data referenced from a record
///
/// The hooks run synchronously inside store operations. They must not call
/// back into the store.
pub trait Pointee: Any + Send + Sync {
    /// A new slot now refers to this value
    fn increment(&self) {}

    /// A slot referring to this value was overwritten or destroyed
    fn decrement(&self) {}
}

struct Target {
    any: Arc<dyn Any + Send + Sync>,
    hooks: Arc<dyn Pointee>,
}

/// Reference-counted opaque handle stored in an object record
///
/// Two slots are equal when they refer to the same allocation, or are both
/// null. The pointee's own contents never take part in comparisons.
pub struct Pointer {
    target: Option<Target>,
}

impl Pointer {
    /// Wrap a value in a fresh shared allocation
    pub fn new<T: Pointee>(value: T) -> Self {
        Self::from_arc(Arc::new(value))
    }

    /// Refer to an allocation the caller already shares
    pub fn from_arc<T: Pointee>(value: Arc<T>) -> Self {
        value.increment();
        let hooks: Arc<dyn Pointee> = Arc::clone(&value) as Arc<dyn Pointee>;
        let any: Arc<dyn Any + Send + Sync> = value;
        Pointer {
            target: Some(Target { any, hooks }),
        }
    }

    /// A slot that refers to nothing
    pub fn null() -> Self {
        Pointer { target: None }
    }

    pub fn is_null(&self) -> bool {
        self.target.is_none()
    }

    /// Borrow the pointee if it has type `T`
    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        self.target.as_ref()?.any.downcast_ref::<T>()
    }

    /// Share the pointee if it has type `T`
    pub fn downcast_arc<T: Any + Send + Sync>(&self) -> Option<Arc<T>> {
        let target = self.target.as_ref()?;
        Arc::clone(&target.any).downcast::<T>().ok()
    }

    fn address(&self) -> Option<*const ()> {
        self.target
            .as_ref()
            .map(|t| Arc::as_ptr(&t.any) as *const ())
    }
}

impl Default for Pointer {
    fn default() -> Self {
        Pointer::null()
    }
}

impl Clone for Pointer {
    fn clone(&self) -> Self {
        match &self.target {
            None => Pointer::null(),
            Some(target) => {
                target.hooks.increment();
                Pointer {
                    target: Some(Target {
                        any: Arc::clone(&target.any),
                        hooks: Arc::clone(&target.hooks),
                    }),
                }
            }
        }
    }
}

impl Drop for Pointer {
    fn drop(&mut self) {
        if let Some(target) = &self.target {
            target.hooks.decrement();
        }
    }
}

impl PartialEq for Pointer {
    fn eq(&self, other: &Self) -> bool {
        self.address() == other.address()
    }
}

impl Eq for Pointer {}

impl fmt::Debug for Pointer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.address() {
            None => f.write_str("Pointer(null)"),
            Some(addr) => write!(f, "Pointer({:p})", addr),
        }
    }
}
