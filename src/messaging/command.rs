// Command types - UI → audio callback

use crate::sampler::Sample;
use std::sync::Arc;

/// Commands drained by the audio callback at the top of each buffer.
///
/// The sample is resolved (and cached) on the UI thread so the real-time
/// callback never touches the filesystem.
#[derive(Clone)]
pub enum Command {
    /// Start a voice for an already-decoded sample. `ramp_ms` is the total
    /// fade-out time; `None` plays without a ramp.
    PlaySample {
        sample: Arc<Sample>,
        ramp_ms: Option<u64>,
    },
}
