//! # TrackTools CAM Tools
//!
//! Geometry pipelines that turn selected board tracks into new board items.
//!
//! ## Tools Included
//!
//! - **Square Track Generator**: Replace round-capped tracks with filled,
//!   square-ended outline polygons
//! - **Via Fence Generator**: Place rows of stitching vias on both sides of
//!   tracks, keeping a track-to-via clearance
//!
//! ## Supporting Infrastructure
//!
//! - **Offset Sampler**: Candidate via centers parallel to a track
//! - **Position Accumulator**: Minimum-distance filter for candidates
//!
//! Every pipeline is a pure batch computation. It returns a plan describing
//! what to remove, add and deselect; the host applies the plan to its
//! document in one step.

pub mod offset_sampler;
pub mod position_filter;
pub mod report;
pub mod square_track;
pub mod via_fence;

pub use offset_sampler::{
    arc_station_count, max_angular_step, straight_station_count, Band, Candidate, OffsetSampler,
};
pub use position_filter::{PositionAccumulator, DEFAULT_MIN_SEPARATION};
pub use report::SkippedSegment;
pub use square_track::{build_outline, Replacement, SquareTrackGenerator, SquareTrackPlan};
pub use via_fence::{FencePlan, FenceParameters, ViaFenceGenerator};
