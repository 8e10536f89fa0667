//! Producer host context
//!
//! The publisher never owns its host. It holds a [`HostHandle`] and resolves
//! it at the moment of use; a host that has gone away turns the sync into a
//! no-op.

/// What the publisher needs from its host
pub trait WeatherHost {
    /// Location the user chose to follow
    fn preferred_location(&self) -> &str;

    /// Current wall-clock time in milliseconds
    fn now_ms(&self) -> u64;
}

/// Non-owning reference to a host
pub trait HostHandle {
    type Host: ?Sized;

    /// Run `f` against the host if it is still alive
    fn with_host<R>(&self, f: impl FnOnce(&Self::Host) -> R) -> Option<R>;
}

impl<H: ?Sized> HostHandle for &H {
    type Host = H;

    fn with_host<R>(&self, f: impl FnOnce(&H) -> R) -> Option<R> {
        Some(f(*self))
    }
}

#[cfg(any(test, feature = "alloc"))]
impl<H: ?Sized> HostHandle for alloc::rc::Weak<H> {
    type Host = H;

    fn with_host<R>(&self, f: impl FnOnce(&H) -> R) -> Option<R> {
        self.upgrade().map(|host| f(&*host))
    }
}

#[cfg(any(test, feature = "alloc"))]
impl<H: ?Sized> HostHandle for alloc::sync::Weak<H> {
    type Host = H;

    fn with_host<R>(&self, f: impl FnOnce(&H) -> R) -> Option<R> {
        self.upgrade().map(|host| f(&*host))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::rc::Rc;

    struct Phone;

    impl WeatherHost for Phone {
        fn preferred_location(&self) -> &str {
            "94043"
        }

        fn now_ms(&self) -> u64 {
            1_000
        }
    }

    #[test]
    fn test_borrowed_host_is_always_alive() {
        let phone = Phone;
        let handle = &phone;
        assert_eq!(handle.with_host(|h| h.now_ms()), Some(1_000));
    }

    #[test]
    fn test_weak_host_resolves_until_dropped() {
        let phone = Rc::new(Phone);
        let handle = Rc::downgrade(&phone);
        assert_eq!(
            handle.with_host(|h| h.preferred_location().len()),
            Some(5)
        );

        drop(phone);
        assert_eq!(handle.with_host(|h| h.now_ms()), None);
    }
}
