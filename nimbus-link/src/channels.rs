//! In-process data link
//!
//! Phone and watch halves share one bounded embassy-sync channel. Publishing
//! never blocks: a full queue is reported as a submission error.

use core::sync::atomic::{AtomicBool, Ordering};

use embassy_sync::blocking_mutex::raw::RawMutex;
use embassy_sync::channel::{Channel, Receiver};

use nimbus_core::traits::{ChangeStream, ChannelError, DataChannel};
use nimbus_protocol::{DataEvent, DataMap};

/// Default queue depth
pub const LINK_CAPACITY: usize = 4;

/// Shared link between a publisher and a change stream
///
/// `const`-constructible so it can live in a `static`.
pub struct LocalLink<M: RawMutex, const N: usize = LINK_CAPACITY> {
    events: Channel<M, DataEvent, N>,
    connected: AtomicBool,
}

impl<M: RawMutex, const N: usize> LocalLink<M, N> {
    /// Create a disconnected link
    pub const fn new() -> Self {
        Self {
            events: Channel::new(),
            connected: AtomicBool::new(false),
        }
    }

    pub fn set_connected(&self, connected: bool) {
        debug!("Link connected: {}", connected);
        self.connected.store(connected, Ordering::Release);
    }

    pub fn is_connected(&self) -> bool {
        self.connected.load(Ordering::Acquire)
    }

    /// Events queued and not yet received
    pub fn pending(&self) -> usize {
        self.events.len()
    }

    /// Phone-side handle
    pub fn sender(&self) -> LinkSender<'_, M, N> {
        LinkSender { link: self }
    }

    /// Watch-side handle
    pub fn changes(&self) -> LinkChanges<'_, M, N> {
        LinkChanges {
            receiver: self.events.receiver(),
        }
    }
}

impl<M: RawMutex, const N: usize> Default for LocalLink<M, N> {
    fn default() -> Self {
        Self::new()
    }
}

/// Publishing half of a [`LocalLink`]
pub struct LinkSender<'a, M: RawMutex, const N: usize> {
    link: &'a LocalLink<M, N>,
}

impl<M: RawMutex, const N: usize> LinkSender<'_, M, N> {
    /// Announce that the item at `path` was removed
    pub fn delete(&mut self, path: &str) -> Result<(), ChannelError> {
        let event = DataEvent::deleted(path).map_err(|_| ChannelError::Encode)?;
        self.submit(event)
    }

    fn submit(&mut self, event: DataEvent) -> Result<(), ChannelError> {
        if !self.link.is_connected() {
            return Err(ChannelError::Disconnected);
        }
        self.link.events.try_send(event).map_err(|_| {
            warn!("Link queue full, dropping data item");
            ChannelError::QueueFull
        })
    }
}

impl<M: RawMutex, const N: usize> DataChannel for LinkSender<'_, M, N> {
    fn is_connected(&self) -> bool {
        self.link.is_connected()
    }

    fn publish(&mut self, path: &str, map: &DataMap) -> Result<(), ChannelError> {
        let event = DataEvent::changed(path, map.clone()).map_err(|_| ChannelError::Encode)?;
        self.submit(event)
    }
}

/// Receiving half of a [`LocalLink`]
pub struct LinkChanges<'a, M: RawMutex, const N: usize> {
    receiver: Receiver<'a, M, DataEvent, N>,
}

impl<M: RawMutex, const N: usize> ChangeStream for LinkChanges<'_, M, N> {
    async fn next_event(&mut self) -> Option<DataEvent> {
        Some(self.receiver.receive().await)
    }
}
