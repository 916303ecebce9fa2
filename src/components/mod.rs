//! The components module contains the landing page and the controllers mounted with it.

mod audio_manager;
mod branding_guard;
mod landing;
mod track_controls;

pub use audio_manager::*;
pub use branding_guard::*;
pub use landing::*;
pub use track_controls::*;
