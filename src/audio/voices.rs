// Voice pool - fixed set of sampler voices mixed by the audio callback
// Pre-sized at startup; the callback never allocates. When every slot is
// busy the oldest voice is stolen.

use crate::sampler::{Sample, SitarVoice};
use std::sync::Arc;

const MAX_VOICES: usize = 16;

pub struct VoicePool {
    voices: Vec<Option<SitarVoice>>,
    output_rate: f32,
    /// Monotone counter used as voice age for stealing.
    next_age: u64,
}

impl VoicePool {
    pub fn new(output_rate: f32) -> Self {
        let mut voices = Vec::with_capacity(MAX_VOICES);
        voices.resize_with(MAX_VOICES, || None);
        Self {
            voices,
            output_rate,
            next_age: 0,
        }
    }

    /// Start a new voice, stealing the oldest one if the pool is full.
    pub fn trigger(&mut self, sample: Arc<Sample>, ramp_ms: Option<u64>) {
        let age = self.next_age;
        self.next_age += 1;

        let voice = SitarVoice::start(sample, ramp_ms, self.output_rate, age);

        let slot = self
            .voices
            .iter()
            .position(|v| v.as_ref().is_none_or(|v| !v.is_active()));

        match slot {
            Some(i) => self.voices[i] = Some(voice),
            None => {
                let oldest = self
                    .voices
                    .iter()
                    .enumerate()
                    .min_by_key(|(_, v)| v.as_ref().map(|v| v.age()).unwrap_or(0))
                    .map(|(i, _)| i)
                    .unwrap_or(0);
                self.voices[oldest] = Some(voice);
            }
        }
    }

    /// Mix one mono sample from all active voices.
    pub fn next_sample(&mut self) -> f32 {
        let mut mix = 0.0;
        for voice in self.voices.iter_mut().flatten() {
            if voice.is_active() {
                mix += voice.next_sample();
            }
        }
        mix
    }

    pub fn active_count(&self) -> usize {
        self.voices
            .iter()
            .flatten()
            .filter(|v| v.is_active())
            .count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn short_sample() -> Arc<Sample> {
        Arc::new(Sample {
            name: "s".to_string(),
            data: vec![0.25; 64],
            sample_rate: 48_000,
            channels: 1,
        })
    }

    #[test]
    fn test_trigger_and_mix() {
        let mut pool = VoicePool::new(48_000.0);
        assert_eq!(pool.active_count(), 0);
        assert_eq!(pool.next_sample(), 0.0);

        pool.trigger(short_sample(), None);
        pool.trigger(short_sample(), None);
        assert_eq!(pool.active_count(), 2);

        // Two voices at 0.25 each sum to 0.5.
        assert!((pool.next_sample() - 0.5).abs() < 1e-6);
    }

    #[test]
    fn test_pool_never_exceeds_capacity() {
        let mut pool = VoicePool::new(48_000.0);
        for _ in 0..MAX_VOICES * 3 {
            pool.trigger(short_sample(), None);
        }
        assert_eq!(pool.active_count(), MAX_VOICES);
    }

    #[test]
    fn test_finished_voices_free_slots() {
        let mut pool = VoicePool::new(48_000.0);
        pool.trigger(short_sample(), None);

        // 64-frame sample ends after 64 output samples.
        for _ in 0..64 {
            pool.next_sample();
        }
        assert_eq!(pool.active_count(), 0);
    }
}
