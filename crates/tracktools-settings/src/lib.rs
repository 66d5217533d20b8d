//! TrackTools Settings Crate
//!
//! Handles persisted fence settings and the headless fence dialog state
//! that turns user choices into generator parameters.

pub mod config;
pub mod error;
pub mod form;

pub use config::{AnnularRingPolicy, Config, FenceSettings, MeasurementSystem, UiSettings};
pub use error::{SettingsError, SettingsResult};
pub use form::{
    ApplyBlocker, ClearanceSource, FenceDialogContext, FenceForm, ViaSizeSource, ZoneClearance,
};
