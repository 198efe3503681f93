// UI module

pub mod app;

pub use app::RiyazApp;
