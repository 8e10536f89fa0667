//! Long-running loops for each side of the link
//!
//! All loops are plain async functions so they can run under any executor
//! (an embassy task on the watch, `block_on` on the host).

use core::future::pending;

use embassy_futures::select::{select3, Either3};
use embassy_sync::blocking_mutex::raw::RawMutex;
use embassy_sync::channel::Receiver;
use embassy_sync::signal::Signal;

use nimbus_core::state::{next_tick_delay_ms, FaceEvent, Subscription, TimerCommand};
use nimbus_core::sync::{BatchSummary, Delivery, SyncOutcome, WeatherPublisher, WeatherReceiver};
use nimbus_core::traits::{
    ChangeStream, DataChannel, FaceClock, HostHandle, WeatherHost, WeatherSource,
};
use nimbus_display::{FaceCanvas, WeatherFace};
use nimbus_protocol::WeatherSnapshot;

/// Requests driving the producer loop
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SyncRequest {
    /// Fresh forecast data is available; push it if it changed
    Sync,
    /// Leave the loop
    Shutdown,
}

/// Counters returned by [`run_producer`]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ProducerStats {
    pub sent: u32,
    pub skipped: u32,
    pub failed: u32,
}

/// Producer loop: sync once per request until shut down
pub async fn run_producer<C, H, S, M, const N: usize>(
    publisher: &mut WeatherPublisher<C>,
    host: &H,
    source: &mut S,
    requests: Receiver<'_, M, SyncRequest, N>,
) -> ProducerStats
where
    C: DataChannel,
    H: HostHandle,
    H::Host: WeatherHost,
    S: WeatherSource,
    M: RawMutex,
{
    info!("Weather producer started");
    let mut stats = ProducerStats::default();

    loop {
        match requests.receive().await {
            SyncRequest::Sync => match publisher.sync_from_source(host, source) {
                Ok(SyncOutcome::Sent) => stats.sent += 1,
                Ok(outcome) => {
                    debug!("Sync skipped: {:?}", outcome);
                    stats.skipped += 1;
                }
                Err(e) => {
                    warn!("Sync failed: {:?}", e);
                    stats.failed += 1;
                }
            },
            SyncRequest::Shutdown => break,
        }
    }

    info!("Weather producer stopped");
    stats
}

/// Consumer loop: apply events until the stream ends
///
/// Every applied reading is signalled on `redraw` for the render side.
pub async fn run_consumer<S, M>(
    mut stream: S,
    receiver: &mut WeatherReceiver,
    redraw: &Signal<M, WeatherSnapshot>,
) -> BatchSummary
where
    S: ChangeStream,
    M: RawMutex,
{
    info!("Weather consumer started");
    let mut summary = BatchSummary::default();

    while let Some(event) = stream.next_event().await {
        match receiver.on_data_changed(&event) {
            Ok(Delivery::Applied(snapshot)) => {
                summary.applied += 1;
                receiver.take_redraw();
                redraw.signal(snapshot);
            }
            Ok(_) => summary.ignored += 1,
            Err(_) => summary.malformed += 1,
        }
    }

    info!("Weather consumer stopped");
    summary
}

/// Requests driving the face loop
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FaceRequest {
    /// Platform event: visibility, ambient mode or the minute tick
    Event(FaceEvent),
    /// Leave the loop
    Shutdown,
}

/// Counters returned by [`run_face`]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FaceStats {
    /// Frames drawn
    pub frames: u32,
    /// Frames drawn for the interactive timer
    pub ticks: u32,
    /// Readings applied from the change stream
    pub updates: u32,
    pub failed_frames: u32,
}

/// Watch face loop
///
/// Platform requests, weather changes and the interactive timer all end up
/// on this one redraw path. The change stream is opened with `subscribe`
/// when the face becomes visible and dropped when it is hidden; the timer
/// only runs while the face is visible and interactive.
pub async fn run_face<D, K, S, F, M, const N: usize>(
    face: &mut WeatherFace,
    canvas: &mut D,
    clock: &mut K,
    receiver: &mut WeatherReceiver,
    mut subscribe: F,
    requests: Receiver<'_, M, FaceRequest, N>,
) -> FaceStats
where
    D: FaceCanvas,
    K: FaceClock,
    S: ChangeStream,
    F: FnMut() -> S,
    M: RawMutex,
{
    info!("Watch face started");
    let mut stats = FaceStats::default();
    let mut stream: Option<S> = None;
    let mut next_tick: Option<u64> = None;

    loop {
        let wake = {
            let change = async {
                match stream.as_mut() {
                    Some(stream) => stream.next_event().await,
                    None => pending().await,
                }
            };
            let tick = async {
                match next_tick {
                    Some(at) => clock.sleep_until(at).await,
                    None => pending().await,
                }
            };
            select3(requests.receive(), change, tick).await
        };

        let now_ms = clock.now_ms();
        let event = match wake {
            Either3::First(FaceRequest::Event(event)) => event,
            Either3::First(FaceRequest::Shutdown) => break,
            Either3::Second(Some(change)) => match receiver.on_data_changed(&change) {
                Ok(Delivery::Applied(_)) => {
                    receiver.take_redraw();
                    stats.updates += 1;
                    FaceEvent::WeatherUpdated
                }
                // Not for us, or malformed; the last reading stays up
                _ => continue,
            },
            Either3::Second(None) => {
                warn!("Change stream ended");
                stream = None;
                continue;
            }
            Either3::Third(()) => {
                next_tick = None;
                FaceEvent::Tick
            }
        };

        let effects = face.handle(event, now_ms);

        match effects.subscription {
            Subscription::Connect if stream.is_none() => {
                debug!("Subscribing to weather changes");
                stream = Some(subscribe());
            }
            Subscription::Disconnect if stream.is_some() => {
                debug!("Dropping weather subscription");
                stream = None;
            }
            _ => {}
        }

        next_tick = match effects.timer {
            TimerCommand::Keep => next_tick,
            TimerCommand::Start => Some(now_ms),
            TimerCommand::ScheduleNext => {
                let interval = face.config().interactive_tick_ms;
                Some(now_ms + next_tick_delay_ms(now_ms, interval))
            }
            TimerCommand::Stop => None,
        };

        if effects.redraw {
            match face.draw(canvas, clock.time_of_day(), now_ms, receiver.current()) {
                Ok(()) => {
                    stats.frames += 1;
                    if event == FaceEvent::Tick {
                        stats.ticks += 1;
                    }
                }
                Err(e) => {
                    warn!("Frame failed: {:?}", e);
                    stats.failed_frames += 1;
                }
            }
        }
    }

    info!("Watch face stopped");
    stats
}
