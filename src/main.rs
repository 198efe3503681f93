use sitar_riyaz::audio::{AtomicF32, AudioEngine};
use sitar_riyaz::messaging::{create_command_channel, create_notification_channel};
use sitar_riyaz::sampler::NoteBank;
use sitar_riyaz::ui::RiyazApp;
use std::sync::{Arc, Mutex};

// Command bursts are tiny (one entry per triggered note), but playback
// sequences and button mashing can overlap; 64 gives plenty of headroom.
const COMMAND_RINGBUFFER_CAPACITY: usize = 64;
const NOTIFICATION_RINGBUFFER_CAPACITY: usize = 64;

const DEFAULT_ASSET_DIR: &str = "assets/sitar_notes";

fn main() {
    env_logger::init();

    let (command_tx, command_rx) = create_command_channel(COMMAND_RINGBUFFER_CAPACITY);
    let (notification_tx, notification_rx) =
        create_notification_channel(NOTIFICATION_RINGBUFFER_CAPACITY);
    let notification_tx = Arc::new(Mutex::new(notification_tx));

    // A dead audio device is not fatal: the game stays playable, silently.
    let engine = match AudioEngine::new(command_rx, notification_tx) {
        Ok(engine) => Some(engine),
        Err(e) => {
            log::error!("audio engine unavailable: {e}");
            None
        }
    };

    let volume = engine
        .as_ref()
        .map(|e| e.volume.clone())
        .unwrap_or_else(|| AtomicF32::new(0.8));

    let asset_dir =
        std::env::var("SITAR_RIYAZ_ASSETS").unwrap_or_else(|_| DEFAULT_ASSET_DIR.to_string());
    let bank = NoteBank::new(asset_dir);

    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([900.0, 520.0])
            .with_title("Sitar Riyaz"),
        ..Default::default()
    };

    let _ = eframe::run_native(
        "Sitar Riyaz",
        native_options,
        Box::new(|_cc| {
            Ok(Box::new(RiyazApp::new(
                command_tx,
                notification_rx,
                volume,
                bank,
                engine,
            )))
        }),
    );
}
