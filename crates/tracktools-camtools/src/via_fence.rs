//! Via Fence Generator
//!
//! Stitches a row of vias along both sides of every selected track. Each
//! track is sampled at `width/2 + via_diameter/2 + clearance` from its
//! centerline, candidates run through one shared [`PositionAccumulator`]
//! for the whole selection, and every accepted position becomes a via.

use crate::offset_sampler::OffsetSampler;
use crate::position_filter::PositionAccumulator;
use crate::report::SkippedSegment;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};
use tracktools_core::{
    Coord, ItemId, LayerId, NetRef, ParameterError, Point, Track, ViaSpec, ViaType,
};

/// Parameters for the Via Fence generator
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FenceParameters {
    /// Via pad diameter (board units)
    pub via_diameter: Coord,
    /// Via drill diameter (board units)
    pub via_drill: Coord,
    /// Gap between track edge and via edge (board units, may be zero or negative)
    pub track_to_via_clearance: Coord,
    pub via_type: ViaType,
    pub start_layer: LayerId,
    pub end_layer: LayerId,
    #[serde(default)]
    pub net: NetRef,
    #[serde(default)]
    pub freely_floating_net: bool,
    #[serde(default)]
    pub remove_unconnected_annular_ring: bool,
}

impl FenceParameters {
    /// Check the preconditions the generator relies on:
    /// `via_diameter > via_drill > 0` and distinct start/end layers.
    ///
    /// Any via type is accepted, `Undefined` included; it is copied onto
    /// every placed via as given.
    pub fn validate(&self) -> Result<(), ParameterError> {
        if !(self.via_drill > 0 && self.via_diameter > self.via_drill) {
            return Err(ParameterError::InvalidViaSize {
                diameter: self.via_diameter,
                drill: self.via_drill,
            });
        }
        if self.start_layer == self.end_layer {
            return Err(ParameterError::SameLayerPair {
                layer: self.start_layer.0,
            });
        }
        Ok(())
    }

    /// Centerline-to-via-center distance for a track of `track_width`
    pub fn perpendicular_offset(&self, track_width: Coord) -> Coord {
        track_width / 2 + self.via_diameter / 2 + self.track_to_via_clearance
    }

    /// Via placed at `position` with these parameters
    pub fn via_at(&self, position: Point) -> ViaSpec {
        ViaSpec {
            position,
            diameter: self.via_diameter,
            drill_diameter: self.via_drill,
            net: self.net.clone(),
            via_type: self.via_type,
            start_layer: self.start_layer,
            end_layer: self.end_layer,
            freely_floating_net: self.freely_floating_net,
            remove_unconnected_annular_ring: self.remove_unconnected_annular_ring,
        }
    }
}

/// Result of fencing a selection
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct FencePlan {
    /// Vias to add, in acceptance order
    pub vias: Vec<ViaSpec>,
    /// Tracks whose selection flag the host should clear
    pub deselect: Vec<ItemId>,
    pub skipped: Vec<SkippedSegment>,
    /// Candidates sampled before deduplication
    pub candidate_count: usize,
}

impl FencePlan {
    pub fn skipped_count(&self) -> usize {
        self.skipped.len()
    }

    /// Candidates dropped by the position accumulator
    pub fn rejected_count(&self) -> usize {
        self.candidate_count - self.vias.len()
    }
}

/// Generator for via fences
#[derive(Debug, Clone)]
pub struct ViaFenceGenerator {
    params: FenceParameters,
}

impl ViaFenceGenerator {
    /// Create a new ViaFenceGenerator.
    ///
    /// The parameters are expected to have passed
    /// [`FenceParameters::validate`] on the configuration side.
    pub fn new(params: FenceParameters) -> Self {
        debug_assert!(
            params.validate().is_ok(),
            "fence parameters must be validated before building: {params:?}"
        );
        Self { params }
    }

    pub fn params(&self) -> &FenceParameters {
        &self.params
    }

    /// Build a fence using a fresh, empty accumulator
    pub fn build(&self, tracks: &[Track]) -> FencePlan {
        let mut accumulator = PositionAccumulator::new();
        self.build_with(tracks, &mut accumulator)
    }

    /// Build a fence, filtering candidates through `accumulator`.
    ///
    /// Tracks are processed in input order; the same accumulator is shared
    /// across all of them.
    pub fn build_with(&self, tracks: &[Track], accumulator: &mut PositionAccumulator) -> FencePlan {
        let sampler = OffsetSampler::new(self.params.via_diameter);
        let mut plan = FencePlan::default();

        for track in tracks {
            plan.deselect.push(track.id);

            let offset = self.params.perpendicular_offset(track.segment.width());
            let candidates = match sampler.sample(&track.segment, offset) {
                Ok(candidates) => candidates,
                Err(error) => {
                    plan.skipped
                        .push(SkippedSegment::record(track.id, error, "Via fence"));
                    continue;
                }
            };

            plan.candidate_count += candidates.len();
            let before = plan.vias.len();
            for candidate in candidates {
                if accumulator.try_add(candidate.position) {
                    plan.vias.push(self.params.via_at(candidate.position));
                }
            }
            debug!(
                track = %track.id,
                kind = track.segment.kind_name(),
                offset,
                accepted = plan.vias.len() - before,
                "Fenced track"
            );
        }

        info!(
            tracks = tracks.len(),
            vias = plan.vias.len(),
            rejected = plan.rejected_count(),
            skipped = plan.skipped.len(),
            "Via fence plan ready"
        );
        plan
    }
}
