//! Phone ↔ watch data channel
//!
//! The outgoing half publishes data items; the incoming half yields change
//! notifications. Both are fire-and-forget: a successful publish only means
//! the item was handed to the transport.

use nimbus_protocol::{DataEvent, DataMap};

/// Errors submitting a data item
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ChannelError {
    /// Link to the peer is down
    Disconnected,
    /// Outgoing queue has no room
    QueueFull,
    /// Item could not be encoded for the transport
    Encode,
    /// Transport write failed
    Transport,
}

impl core::fmt::Display for ChannelError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            ChannelError::Disconnected => f.write_str("channel disconnected"),
            ChannelError::QueueFull => f.write_str("channel queue full"),
            ChannelError::Encode => f.write_str("data item could not be encoded"),
            ChannelError::Transport => f.write_str("transport write failed"),
        }
    }
}

/// Outgoing half of the data channel
pub trait DataChannel {
    /// Whether a peer is currently reachable
    fn is_connected(&self) -> bool;

    /// Replace the item at `path` with `map`
    fn publish(&mut self, path: &str, map: &DataMap) -> Result<(), ChannelError>;
}

impl<T: DataChannel + ?Sized> DataChannel for &mut T {
    fn is_connected(&self) -> bool {
        (**self).is_connected()
    }

    fn publish(&mut self, path: &str, map: &DataMap) -> Result<(), ChannelError> {
        (**self).publish(path, map)
    }
}

/// Incoming half of the data channel
#[allow(async_fn_in_trait)]
pub trait ChangeStream {
    /// Wait for the next data event
    ///
    /// Returns `None` once the stream has ended.
    async fn next_event(&mut self) -> Option<DataEvent>;

    /// Restrict this stream to events for `path`
    fn on_path(self, path: &'static str) -> OnPath<Self>
    where
        Self: Sized,
    {
        OnPath { inner: self, path }
    }
}

/// Stream adapter yielding only events for one path
pub struct OnPath<S> {
    inner: S,
    path: &'static str,
}

impl<S> OnPath<S> {
    pub fn path(&self) -> &'static str {
        self.path
    }

    pub fn into_inner(self) -> S {
        self.inner
    }
}

impl<S: ChangeStream> ChangeStream for OnPath<S> {
    async fn next_event(&mut self) -> Option<DataEvent> {
        loop {
            let event = self.inner.next_event().await?;
            if event.is_for(self.path) {
                return Some(event);
            }
            trace!("Dropping event for another path");
        }
    }
}
