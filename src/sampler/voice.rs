// Sitar voice - plays one decoded sample inside the audio callback
// When the trigger carries a sustain, the voice applies a linear gain ramp
// from full volume to silence over (sustain + ADDITIONAL_SUSTAIN) so the
// note decays instead of cutting off.

use crate::sampler::loader::Sample;
use std::sync::Arc;

pub struct SitarVoice {
    sample: Arc<Sample>,
    /// Fractional read position in frames.
    position: f64,
    /// Frame increment per output sample (sample-rate conversion).
    step: f64,
    gain: f32,
    /// Per-output-sample gain decrement; 0.0 means no ramp.
    gain_step: f32,
    active: bool,
    age: u64,
}

impl SitarVoice {
    /// Start a voice at output rate `output_rate`. `ramp_ms` is the total
    /// fade time (already including the additional sustain); `None` plays
    /// the sample at constant gain until its data ends.
    pub fn start(sample: Arc<Sample>, ramp_ms: Option<u64>, output_rate: f32, age: u64) -> Self {
        let step = sample.sample_rate as f64 / output_rate as f64;
        let gain_step = match ramp_ms {
            Some(ms) if ms > 0 => {
                let ramp_samples = (ms as f32 / 1000.0) * output_rate;
                1.0 / ramp_samples
            }
            _ => 0.0,
        };

        Self {
            sample,
            position: 0.0,
            step,
            gain: 1.0,
            gain_step,
            active: true,
            age,
        }
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn age(&self) -> u64 {
        self.age
    }

    /// Render one mono output sample and advance. Returns 0.0 once the
    /// ramp reaches silence or the sample data runs out.
    pub fn next_sample(&mut self) -> f32 {
        if !self.active {
            return 0.0;
        }

        let frames = self.sample.frames();
        let channels = self.sample.channels as usize;

        let frame = self.position as usize;
        if frame >= frames {
            self.active = false;
            return 0.0;
        }
        // The interpolation partner clamps at the last frame so the final
        // frame still renders.
        let next = (frame + 1).min(frames - 1);
        let frac = self.position.fract() as f32;

        // Average channels to mono, linear interpolation between frames.
        let mut a = 0.0f32;
        let mut b = 0.0f32;
        for ch in 0..channels {
            a += self.sample.data[frame * channels + ch];
            b += self.sample.data[next * channels + ch];
        }
        a /= channels as f32;
        b /= channels as f32;
        let value = (a + (b - a) * frac) * self.gain;

        self.position += self.step;
        if self.position as usize >= frames {
            self.active = false;
        }

        if self.gain_step > 0.0 {
            self.gain -= self.gain_step;
            if self.gain <= 0.0 {
                self.gain = 0.0;
                self.active = false;
            }
        }

        value
    }
}
