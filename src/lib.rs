//! # TrackTools
//!
//! Derived copper geometry for printed-circuit boards:
//! - Square-ended outlines that replace round-capped tracks and arcs
//! - Via fences stitched along both sides of selected tracks
//!
//! ## Architecture
//!
//! TrackTools is organized as a workspace with multiple crates:
//!
//! 1. **tracktools-core** - Board units, geometry model, error types
//! 2. **tracktools-camtools** - Outline builder, offset sampler, via fence builder
//! 3. **tracktools-settings** - Persisted fence settings and fence dialog state
//! 4. **tracktools-board** - Reference board document, atomic edits, board actions
//! 5. **tracktools** - Command-line host that integrates all crates

pub use tracktools_board as board;
pub use tracktools_camtools as camtools;
pub use tracktools_settings as settings;

pub use tracktools_core::{
    from_mm, to_mm, Angle, ArcSegment, Coord, GeometryError, ItemId, LayerId, NetRef,
    OutlinePolygon, ParameterError, Point, Segment, StraightSegment, Track, ViaPreset,
    ViaSpec, ViaType,
};

pub use tracktools_camtools::{
    FenceParameters, FencePlan, PositionAccumulator, SkippedSegment, SquareTrackGenerator,
    SquareTrackPlan, ViaFenceGenerator,
};

pub use tracktools_settings::{Config, FenceDialogContext, FenceForm, FenceSettings};

pub use tracktools_board::{
    fence_selected_tracks, square_selected_tracks, ActionReport, Board, BoardEdit, DedupSeed,
    FenceOptions,
};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Build date (set at compile time)
pub const BUILD_DATE: &str = env!("BUILD_DATE");

/// Log output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    /// Human-readable, multi-line records
    #[default]
    Pretty,
    /// One JSON object per record
    Json,
}

/// Initialize logging with the default configuration
///
/// Sets up structured logging with:
/// - Console output with pretty formatting
/// - RUST_LOG environment variable support
pub fn init_logging() -> anyhow::Result<()> {
    init_logging_with(LogFormat::Pretty)
}

/// Initialize logging in the given format
///
/// Records go to stderr so command output on stdout stays machine-readable.
pub fn init_logging_with(format: LogFormat) -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::prelude::*;
    use tracing_subscriber::EnvFilter;

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(tracing::Level::INFO.to_string()));

    match format {
        LogFormat::Pretty => {
            let fmt_layer = fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(true)
                .with_level(true)
                .with_thread_ids(true)
                .with_thread_names(true)
                .with_line_number(true)
                .pretty();

            tracing_subscriber::registry()
                .with(env_filter)
                .with(fmt_layer)
                .try_init()?;
        }
        LogFormat::Json => {
            let fmt_layer = fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(true)
                .with_line_number(true)
                .json();

            tracing_subscriber::registry()
                .with(env_filter)
                .with(fmt_layer)
                .try_init()?;
        }
    }

    Ok(())
}
