//! Optional Tracy integration for the `#[instrument]` spans on the engine functions.
//!
//! Build with `--features tracy` and call [`init_tracy`] before the first
//! turn. Without the feature every function here compiles to nothing.

/// Lowest span level forwarded to Tracy.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TraceLevel {
    #[default]
    Info,
    Debug,
    Trace,
}

/// Install the Tracy subscriber. Panics if a global subscriber is already set.
#[cfg(feature = "tracy")]
pub fn init_tracy(level: TraceLevel) {
    use tracing_subscriber::filter::LevelFilter;
    use tracing_subscriber::prelude::*;

    let filter = match level {
        TraceLevel::Info => LevelFilter::INFO,
        TraceLevel::Debug => LevelFilter::DEBUG,
        TraceLevel::Trace => LevelFilter::TRACE,
    };
    tracing_subscriber::registry()
        .with(tracing_tracy::TracyLayer::default())
        .with(filter)
        .init();
}

#[cfg(not(feature = "tracy"))]
pub fn init_tracy(level: TraceLevel) {
    log::debug!("Tracy support not compiled in; ignoring trace level {:?}", level);
}

/// Mark the end of a fiscal year on the Tracy timeline.
#[cfg(feature = "tracy")]
#[inline]
pub fn frame_mark_year() {
    tracy_client::secondary_frame_mark!("year");
}

#[cfg(not(feature = "tracy"))]
#[inline]
pub fn frame_mark_year() {}
