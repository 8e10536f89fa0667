//! Consumer side: keep the latest weather reading from data events

use nimbus_protocol::{decode_snapshot, ChangeKind, DataEvent, PayloadError, WeatherSnapshot, WEATHER_PATH};

/// What happened to one incoming event
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Delivery {
    /// Snapshot replaced with the decoded reading
    Applied(WeatherSnapshot),
    /// Event was for another path
    OtherPath,
    /// Event was not a content change
    NotAChange,
}

/// Errors consuming a data event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConsumeError {
    /// Weather event whose map could not be decoded
    Malformed(PayloadError),
}

impl From<PayloadError> for ConsumeError {
    fn from(e: PayloadError) -> Self {
        ConsumeError::Malformed(e)
    }
}

impl core::fmt::Display for ConsumeError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            ConsumeError::Malformed(e) => write!(f, "malformed weather item: {e}"),
        }
    }
}

/// Tally of a batch of events
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct BatchSummary {
    pub applied: usize,
    pub ignored: usize,
    pub malformed: usize,
}

/// Latest-reading store on the watch
///
/// Starts empty. A well-formed weather event replaces the reading and marks
/// the face for redraw; anything else leaves it as it was.
#[derive(Debug, Default)]
pub struct WeatherReceiver {
    current: Option<WeatherSnapshot>,
    redraw_pending: bool,
}

impl WeatherReceiver {
    pub const fn new() -> Self {
        Self {
            current: None,
            redraw_pending: false,
        }
    }

    /// Reading currently on display
    pub fn current(&self) -> Option<&WeatherSnapshot> {
        self.current.as_ref()
    }

    pub fn condition_id(&self) -> Option<i32> {
        self.current.map(|s| s.condition_id)
    }

    /// Apply one data event
    pub fn on_data_changed(&mut self, event: &DataEvent) -> Result<Delivery, ConsumeError> {
        if event.kind != ChangeKind::Changed {
            trace!("Ignoring non-change event");
            return Ok(Delivery::NotAChange);
        }
        if !event.is_for(WEATHER_PATH) {
            trace!("Ignoring event for another path");
            return Ok(Delivery::OtherPath);
        }

        let snapshot = match decode_snapshot(&event.map) {
            Ok(snapshot) => snapshot,
            Err(e) => {
                warn!("Dropping malformed weather item: {:?}", e);
                return Err(e.into());
            }
        };

        debug!("Weather received: condition {}", snapshot.condition_id);
        self.current = Some(snapshot);
        self.redraw_pending = true;
        Ok(Delivery::Applied(snapshot))
    }

    /// Apply a batch of events in order
    ///
    /// A malformed event is counted and skipped; later events still apply.
    pub fn on_data_events<'a, I>(&mut self, events: I) -> BatchSummary
    where
        I: IntoIterator<Item = &'a DataEvent>,
    {
        let mut summary = BatchSummary::default();
        for event in events {
            match self.on_data_changed(event) {
                Ok(Delivery::Applied(_)) => summary.applied += 1,
                Ok(_) => summary.ignored += 1,
                Err(_) => summary.malformed += 1,
            }
        }
        summary
    }

    /// Whether a redraw was requested since the last call; clears the flag
    pub fn take_redraw(&mut self) -> bool {
        core::mem::take(&mut self.redraw_pending)
    }
}
