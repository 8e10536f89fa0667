//! Events that drive the face mode

/// Events delivered by the platform to the face
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FaceEvent {
    // Lifecycle events
    /// Face became visible (`true`) or hidden (`false`)
    VisibilityChanged(bool),
    /// Low-power ambient mode entered (`true`) or left (`false`)
    AmbientChanged(bool),

    // Timing events
    /// Interactive redraw timer fired
    Tick,
    /// Once-a-minute tick from the platform, delivered in every mode
    MinuteTick,

    // Data events
    /// A new weather reading was applied
    WeatherUpdated,
}
