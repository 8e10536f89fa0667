//! Time as seen by the watch face

use crate::hands::ClockTime;

/// Monotonic time, wall-clock time of day and a way to wait
#[allow(async_fn_in_trait)]
pub trait FaceClock {
    /// Milliseconds on a monotonic clock
    fn now_ms(&self) -> u64;

    /// Local time of day for the hands
    fn time_of_day(&self) -> ClockTime;

    /// Wait until the monotonic clock reaches `deadline_ms`
    ///
    /// Must be safe to drop before completion.
    async fn sleep_until(&mut self, deadline_ms: u64);
}

impl<T: FaceClock + ?Sized> FaceClock for &mut T {
    fn now_ms(&self) -> u64 {
        (**self).now_ms()
    }

    fn time_of_day(&self) -> ClockTime {
        (**self).time_of_day()
    }

    async fn sleep_until(&mut self, deadline_ms: u64) {
        (**self).sleep_until(deadline_ms).await
    }
}
