//! ChromaCraft Application
//!
//! Command-line front end: parses arguments, decodes images, talks to the
//! clipboard and the file system, and drives the core library.

mod app;
pub mod cli;
mod clipboard;
mod config;
mod image_input;

pub use app::{run, AppError};
pub use cli::{Cli, ColorArgs, Command};
pub use clipboard::{copy_text, CopyOutcome};
pub use config::AppConfig;
pub use image_input::{decode_pixels, is_image_path, load_pixels};
