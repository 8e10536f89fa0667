//! Producer side: push a weather reading only when it changed

use nimbus_protocol::{encode_snapshot, PayloadError, TemperatureUnit, WeatherSnapshot, WEATHER_PATH};

use crate::traits::{
    ChannelError, DataChannel, HostHandle, SourceError, WeatherHost, WeatherSource,
};

/// What a publish attempt did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SyncOutcome {
    /// Channel not connected; nothing sent
    NotConnected,
    /// Host context no longer alive; nothing sent
    HostGone,
    /// No forecast for today; nothing sent
    NoData,
    /// Reading equals the last one sent; nothing sent
    Unchanged,
    /// Reading submitted to the channel
    Sent,
}

/// Errors during a sync
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SyncError {
    Source(SourceError),
    Payload(PayloadError),
    Channel(ChannelError),
}

impl From<SourceError> for SyncError {
    fn from(e: SourceError) -> Self {
        SyncError::Source(e)
    }
}

impl From<PayloadError> for SyncError {
    fn from(e: PayloadError) -> Self {
        SyncError::Payload(e)
    }
}

impl From<ChannelError> for SyncError {
    fn from(e: ChannelError) -> Self {
        SyncError::Channel(e)
    }
}

impl core::fmt::Display for SyncError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            SyncError::Source(e) => write!(f, "{e}"),
            SyncError::Payload(e) => write!(f, "{e}"),
            SyncError::Channel(e) => write!(f, "{e}"),
        }
    }
}

/// Change-detecting weather publisher
///
/// Remembers the last reading it successfully submitted and drops repeats.
/// The memory lives as long as the publisher and is never persisted.
pub struct WeatherPublisher<C> {
    channel: C,
    unit: TemperatureUnit,
    last_sent: Option<WeatherSnapshot>,
}

impl<C: DataChannel> WeatherPublisher<C> {
    /// Create a publisher that labels readings with `unit`
    pub fn new(channel: C, unit: TemperatureUnit) -> Self {
        Self {
            channel,
            unit,
            last_sent: None,
        }
    }

    pub fn unit(&self) -> TemperatureUnit {
        self.unit
    }

    /// Last reading handed to the channel
    pub fn last_sent(&self) -> Option<&WeatherSnapshot> {
        self.last_sent.as_ref()
    }

    pub fn channel(&self) -> &C {
        &self.channel
    }

    pub fn channel_mut(&mut self) -> &mut C {
        &mut self.channel
    }

    pub fn into_channel(self) -> C {
        self.channel
    }

    /// Publish `snapshot` unless the channel is down or it was already sent
    ///
    /// On a channel error the remembered reading is left untouched, so the
    /// same reading is tried again next time.
    pub fn publish(&mut self, snapshot: WeatherSnapshot) -> Result<SyncOutcome, SyncError> {
        if !self.channel.is_connected() {
            debug!("Channel not connected, skipping weather sync");
            return Ok(SyncOutcome::NotConnected);
        }

        if self.last_sent.as_ref() == Some(&snapshot) {
            debug!("Weather unchanged, not sending");
            return Ok(SyncOutcome::Unchanged);
        }

        let map = encode_snapshot(&snapshot)?;
        if let Err(e) = self.channel.publish(WEATHER_PATH, &map) {
            warn!("Weather publish failed: {:?}", e);
            return Err(e.into());
        }

        info!(
            "Weather sent: condition {} max {} min {}",
            snapshot.condition_id,
            snapshot.temp_max,
            snapshot.temp_min
        );
        self.last_sent = Some(snapshot);
        Ok(SyncOutcome::Sent)
    }

    /// Read today's forecast for the host's location and publish it
    ///
    /// Bails out before touching the store when the channel is down or the
    /// host is gone.
    pub fn sync_from_source<H, S>(
        &mut self,
        host: &H,
        source: &mut S,
    ) -> Result<SyncOutcome, SyncError>
    where
        H: HostHandle,
        H::Host: WeatherHost,
        S: WeatherSource,
    {
        if !self.channel.is_connected() {
            debug!("Channel not connected, skipping weather sync");
            return Ok(SyncOutcome::NotConnected);
        }

        let Some(row) = host.with_host(|h| source.forecast(h.preferred_location(), h.now_ms()))
        else {
            debug!("Host gone, skipping weather sync");
            return Ok(SyncOutcome::HostGone);
        };

        let Some(row) = row? else {
            debug!("No forecast for today");
            return Ok(SyncOutcome::NoData);
        };

        self.publish(WeatherSnapshot::new(
            self.unit,
            row.condition_id,
            row.temp_max,
            row.temp_min,
        ))
    }
}
