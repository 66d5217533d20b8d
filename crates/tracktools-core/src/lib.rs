//! # TrackTools Core
//!
//! Core types and utilities for TrackTools.
//! Provides board units, the track geometry model (straight and arc
//! segments, outlines, vias) and the error taxonomy shared by the
//! geometry pipelines and their hosts.

pub mod error;
pub mod model;
pub mod units;

pub use error::{GeometryError, ParameterError};

pub use model::{
    Angle, ArcSegment, ItemId, LayerId, NetRef, OutlinePolygon, Point, Segment, StraightSegment,
    Track, ViaPreset, ViaSpec, ViaType,
};

pub use units::{from_mm, to_mm, Coord, MeasurementSystem, IU_PER_MM};
