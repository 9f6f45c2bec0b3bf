//! Reactive property cells.
//!
//! [`Property<T>`] is the state half of the signal/property pair used by every
//! widget-state type: the owner stores its value in a property, and when
//! [`Property::set`] reports a change it emits the associated [`Signal`].
//!
//! # Example
//!
//! ```
//! use choicekit_core::{Property, Signal};
//!
//! struct Limit {
//!     max: Property<Option<usize>>,
//!     max_changed: Signal<Option<usize>>,
//! }
//!
//! impl Limit {
//!     fn set_max(&self, max: Option<usize>) {
//!         if self.max.set(max) {
//!             self.max_changed.emit(max);
//!         }
//!     }
//! }
//!
//! let limit = Limit { max: Property::new(None), max_changed: Signal::new() };
//! limit.set_max(Some(2));
//! assert_eq!(limit.max.get(), Some(2));
//! ```
//!
//! [`Signal`]: crate::Signal

use std::fmt;

use parking_lot::RwLock;

/// A value cell with change detection.
///
/// `Property<T>` uses interior mutability, so owners can expose `&self`
/// setters and be shared behind an `Arc`.
pub struct Property<T> {
    value: RwLock<T>,
}

impl<T: Clone> Property<T> {
    /// Create a new property with an initial value.
    pub fn new(value: T) -> Self {
        Self {
            value: RwLock::new(value),
        }
    }

    /// Get a clone of the current value.
    pub fn get(&self) -> T {
        self.value.read().clone()
    }

    /// Access the value through a closure without cloning.
    ///
    /// The read lock is held for the duration of `f`; do not set the same
    /// property from inside it.
    pub fn with<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&T) -> R,
    {
        f(&self.value.read())
    }

    /// Set the value without change detection.
    pub fn set_silent(&self, value: T) {
        *self.value.write() = value;
    }
}

impl<T: Clone + PartialEq> Property<T> {
    /// Set the value, returning `true` if the value changed.
    pub fn set(&self, value: T) -> bool {
        let mut current = self.value.write();
        if *current != value {
            *current = value;
            true
        } else {
            false
        }
    }

    /// Set the value, returning the old value if it changed.
    pub fn replace(&self, value: T) -> Option<T> {
        let mut current = self.value.write();
        if *current != value {
            Some(std::mem::replace(&mut *current, value))
        } else {
            None
        }
    }
}

impl<T: Clone> Clone for Property<T> {
    fn clone(&self) -> Self {
        Self::new(self.get())
    }
}

impl<T: Clone + Default> Default for Property<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}

impl<T: Clone + fmt::Debug> fmt::Debug for Property<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Property")
            .field("value", &*self.value.read())
            .finish()
    }
}

/// A read-only view of a property.
///
/// Lets an owner hand out read access while keeping the setter private.
pub struct ReadOnlyProperty<'a, T> {
    inner: &'a Property<T>,
}

impl<'a, T: Clone> ReadOnlyProperty<'a, T> {
    /// Create a read-only view of a property.
    pub fn new(property: &'a Property<T>) -> Self {
        Self { inner: property }
    }

    /// Get the current value.
    pub fn get(&self) -> T {
        self.inner.get()
    }

    /// Access the value through a closure.
    pub fn with<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&T) -> R,
    {
        self.inner.with(f)
    }
}

static_assertions::assert_impl_all!(Property<Vec<String>>: Send, Sync);

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[test]
    fn test_property_basic() {
        let prop = Property::new(42);
        assert_eq!(prop.get(), 42);
    }

    #[test]
    fn test_property_set_detects_change() {
        let prop = Property::new(vec![1, 2]);
        assert!(!prop.set(vec![1, 2]));
        assert!(prop.set(vec![1, 2, 3]));
        assert_eq!(prop.get(), vec![1, 2, 3]);
    }

    #[test]
    fn test_property_set_silent() {
        let prop = Property::new(1);
        prop.set_silent(2);
        assert_eq!(prop.get(), 2);
    }

    #[test]
    fn test_property_replace() {
        let prop = Property::new("a".to_string());
        assert_eq!(prop.replace("a".to_string()), None);
        assert_eq!(prop.replace("b".to_string()), Some("a".to_string()));
        assert_eq!(prop.get(), "b");
    }

    #[test]
    fn test_property_with_closure() {
        let prop = Property::new(vec![1, 2, 3]);
        assert_eq!(prop.with(|v| v.len()), 3);
    }

    #[test]
    fn test_property_thread_safe() {
        let prop = Arc::new(Property::new(0));
        let handles: Vec<_> = (1..=4)
            .map(|n| {
                let prop = prop.clone();
                std::thread::spawn(move || {
                    prop.set(n);
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }
        assert!((1..=4).contains(&prop.get()));
    }

    #[test]
    fn test_read_only_property() {
        let prop = Property::new(Some(3usize));
        let view = ReadOnlyProperty::new(&prop);
        assert_eq!(view.get(), Some(3));
        assert!(view.with(|v| v.is_some()));
    }

    #[test]
    fn test_property_default() {
        let prop: Property<Vec<u8>> = Property::default();
        assert!(prop.get().is_empty());
    }
}
