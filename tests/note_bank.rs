// Asset pipeline integration: generate a full set of note WAVs on disk,
// load them through the bank, and render a voice from the decoded data.

use hound::{SampleFormat, WavSpec, WavWriter};
use sitar_riyaz::sampler::{NoteBank, SitarVoice};
use sitar_riyaz::Note;
use std::path::Path;
use std::sync::Arc;
use tempfile::tempdir;

fn write_sine_wav(dir: &Path, note: Note, frames: usize) {
    let spec = WavSpec {
        channels: 1,
        sample_rate: 44_100,
        bits_per_sample: 16,
        sample_format: SampleFormat::Int,
    };
    let path = dir.join(format!("{}.wav", note.file_stem()));
    let mut writer = WavWriter::create(path, spec).unwrap();
    for i in 0..frames {
        let phase = i as f32 * 0.05 * (note.index() + 1) as f32;
        writer
            .write_sample((phase.sin() * 12_000.0) as i16)
            .unwrap();
    }
    writer.finalize().unwrap();
}

#[test]
fn test_full_note_set_loads_once_each() {
    let dir = tempdir().unwrap();
    for note in Note::ALL {
        write_sine_wav(dir.path(), note, 512);
    }

    let mut bank = NoteBank::new(dir.path());
    for note in Note::ALL {
        let first = bank.get(note).unwrap();
        let again = bank.get(note).unwrap();
        assert!(Arc::ptr_eq(&first, &again));
        assert_eq!(first.frames(), 512);
    }
    assert_eq!(bank.loaded_count(), Note::ALL.len());
}

#[test]
fn test_voice_renders_loaded_sample_with_fade() {
    let dir = tempdir().unwrap();
    write_sine_wav(dir.path(), Note::Pa, 44_100);

    let mut bank = NoteBank::new(dir.path());
    let sample = bank.get(Note::Pa).unwrap();

    // 700ms total fade (200ms play + 500ms tail) at the device rate.
    let mut voice = SitarVoice::start(sample, Some(700), 44_100.0, 0);
    let fade_samples = (0.7 * 44_100.0) as usize;

    let mut rendered = 0;
    while voice.is_active() {
        voice.next_sample();
        rendered += 1;
        // The f32 gain step accumulates rounding over ~30k samples.
        assert!(rendered <= fade_samples + 64);
    }

    // The ramp, not the data, ended the voice.
    assert!(rendered >= fade_samples - 64);
}

#[test]
fn test_partial_asset_set_degrades_per_note() {
    let dir = tempdir().unwrap();
    write_sine_wav(dir.path(), Note::Sa, 256);
    write_sine_wav(dir.path(), Note::Ni2, 256);

    let mut bank = NoteBank::new(dir.path());
    assert!(bank.get(Note::Sa).is_ok());
    assert!(bank.get(Note::Ga).is_err());
    assert!(bank.get(Note::Ni2).is_ok());

    // The failed note never enters the cache.
    assert_eq!(bank.loaded_count(), 2);
}
