// Note bank - lazy decode-once cache of the twelve note assets
// Each swara maps to one `note_N.wav` under the asset directory. A note is
// decoded the first time it is requested and served from the cache after
// that. Failures are logged and surface as a silent note, never a crash.

use crate::notes::Note;
use crate::sampler::loader::{Sample, load_sample};
use crate::sampler::SamplerResult;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

pub struct NoteBank {
    asset_dir: PathBuf,
    cache: HashMap<Note, Arc<Sample>>,
}

impl NoteBank {
    /// Create a bank over a directory of `note_1.wav` .. `note_12.wav`.
    /// Nothing is read until a note is first requested.
    pub fn new<P: AsRef<Path>>(asset_dir: P) -> Self {
        Self {
            asset_dir: asset_dir.as_ref().to_path_buf(),
            cache: HashMap::new(),
        }
    }

    /// Path of the asset backing a note.
    pub fn asset_path(&self, note: Note) -> PathBuf {
        self.asset_dir.join(format!("{}.wav", note.file_stem()))
    }

    /// Fetch the decoded sample for a note, loading it on first use.
    ///
    /// On failure the error is logged and returned; the caller is expected
    /// to skip playback and carry on.
    pub fn get(&mut self, note: Note) -> SamplerResult<Arc<Sample>> {
        if let Some(sample) = self.cache.get(&note) {
            return Ok(Arc::clone(sample));
        }

        let path = self.asset_path(note);
        match load_sample(&path) {
            Ok(sample) => {
                self.cache.insert(note, Arc::clone(&sample));
                Ok(sample)
            }
            Err(e) => {
                log::error!("failed to load {}: {e}", path.display());
                Err(e)
            }
        }
    }

    /// Number of notes decoded so far.
    pub fn loaded_count(&self) -> usize {
        self.cache.len()
    }
}
