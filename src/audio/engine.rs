// Audio engine - real-time cpal callback
//
// The callback owns nothing that can block or allocate: commands arrive
// through a lock-free ringbuffer, samples are decoded ahead of time on the
// UI thread, and the voice pool is pre-sized. The internal mix is f32 and
// converted to whatever sample format the output device prefers (f32, i16
// or u16) when writing frames.

use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use cpal::{Device, FromSample, SampleFormat, SizedSample, Stream, StreamConfig};
use ringbuf::traits::{Consumer, Producer};
use std::sync::{Arc, Mutex};
use thiserror::Error;

use crate::audio::parameters::AtomicF32;
use crate::audio::voices::VoicePool;
use crate::messaging::channels::{CommandConsumer, NotificationProducer};
use crate::messaging::command::Command;
use crate::messaging::notification::{Notification, NotificationCategory};

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("No audio output device found")]
    NoDevice,

    #[error("Failed to query stream config: {0}")]
    Config(#[from] cpal::DefaultStreamConfigError),

    #[error("Failed to build output stream: {0}")]
    BuildStream(#[from] cpal::BuildStreamError),

    #[error("Failed to start output stream: {0}")]
    PlayStream(#[from] cpal::PlayStreamError),

    #[error("Unsupported device sample format: {0:?}")]
    UnsupportedFormat(SampleFormat),
}

pub struct AudioEngine {
    _device: Device,
    _stream: Stream,
    sample_rate: f32,
    /// Master volume, written by the UI slider and read per buffer.
    pub volume: AtomicF32,
}

impl AudioEngine {
    pub fn new(
        command_rx: CommandConsumer,
        notification_tx: Arc<Mutex<NotificationProducer>>,
    ) -> Result<Self, EngineError> {
        let host = cpal::default_host();
        let device = host.default_output_device().ok_or(EngineError::NoDevice)?;

        let supported_config = device.default_output_config()?;
        let sample_format = supported_config.sample_format();
        let sample_rate = supported_config.sample_rate().0 as f32;
        let channels = supported_config.channels() as usize;
        let config: StreamConfig = supported_config.into();

        log::info!(
            "audio device: {} ({sample_rate} Hz, {channels} ch, {sample_format:?})",
            device.name().unwrap_or_else(|_| "unknown".to_string())
        );

        let volume = AtomicF32::new(0.8);
        let pool = Arc::new(Mutex::new(VoicePool::new(sample_rate)));
        let command_rx = Arc::new(Mutex::new(command_rx));

        let stream = match sample_format {
            SampleFormat::F32 => Self::build_stream::<f32>(
                &device,
                &config,
                channels,
                command_rx,
                pool,
                volume.clone(),
                notification_tx.clone(),
            ),
            SampleFormat::I16 => Self::build_stream::<i16>(
                &device,
                &config,
                channels,
                command_rx,
                pool,
                volume.clone(),
                notification_tx.clone(),
            ),
            SampleFormat::U16 => Self::build_stream::<u16>(
                &device,
                &config,
                channels,
                command_rx,
                pool,
                volume.clone(),
                notification_tx.clone(),
            ),
            other => return Err(EngineError::UnsupportedFormat(other)),
        }?;

        stream.play()?;

        if let Ok(mut tx) = notification_tx.try_lock() {
            let _ = tx.try_push(Notification::info(
                NotificationCategory::Audio,
                format!("Audio connected: {sample_rate} Hz"),
            ));
        }

        Ok(Self {
            _device: device,
            _stream: stream,
            sample_rate,
            volume,
        })
    }

    pub fn sample_rate(&self) -> f32 {
        self.sample_rate
    }

    fn build_stream<T>(
        device: &Device,
        config: &StreamConfig,
        channels: usize,
        command_rx: Arc<Mutex<CommandConsumer>>,
        pool: Arc<Mutex<VoicePool>>,
        volume: AtomicF32,
        notification_tx: Arc<Mutex<NotificationProducer>>,
    ) -> Result<Stream, EngineError>
    where
        T: SizedSample + FromSample<f32> + Send + 'static,
    {
        let stream = device.build_output_stream(
            config,
            move |data: &mut [T], _: &cpal::OutputCallbackInfo| {
                // Real-time zone: no allocations, no I/O, no blocking locks.
                let mut pool = match pool.try_lock() {
                    Ok(pool) => pool,
                    Err(_) => {
                        for out in data.iter_mut() {
                            *out = T::from_sample(0.0f32);
                        }
                        return;
                    }
                };

                if let Ok(mut rx) = command_rx.try_lock() {
                    while let Some(cmd) = rx.try_pop() {
                        match cmd {
                            Command::PlaySample { sample, ramp_ms } => {
                                pool.trigger(sample, ramp_ms);
                            }
                        }
                    }
                }

                let master = volume.get();
                for frame in data.chunks_mut(channels) {
                    let mixed = (pool.next_sample() * master).tanh();
                    for out in frame.iter_mut() {
                        *out = T::from_sample(mixed);
                    }
                }
            },
            move |err| {
                // Runs outside the audio callback, I/O is fine here.
                log::error!("audio stream error: {err}");
                if let Ok(mut tx) = notification_tx.try_lock() {
                    let _ = tx.try_push(Notification::error(
                        NotificationCategory::Audio,
                        format!("Audio stream error: {err}"),
                    ));
                }
            },
            None,
        )?;

        Ok(stream)
    }
}
