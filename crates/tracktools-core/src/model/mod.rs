//! Geometry model for board tracks and the items derived from them.
//!
//! Everything here is a plain value type: segments are read-only inputs,
//! outlines and vias are created fresh by the builders and handed back to
//! the host for insertion.

mod angle;
mod outline;
mod point;
mod segment;
mod via;

pub use angle::Angle;
pub use outline::OutlinePolygon;
pub use point::Point;
pub use segment::{ArcSegment, Segment, StraightSegment, Track};
pub use via::{ViaPreset, ViaSpec, ViaType};

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Identity of a board item
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemId(Uuid);

impl ItemId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for ItemId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for ItemId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Copper layer identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LayerId(pub u8);

impl LayerId {
    pub const F_CU: LayerId = LayerId(0);
    pub const B_CU: LayerId = LayerId(2);

    /// Inner copper layer `In{n}.Cu`, counting from 1
    pub const fn inner(n: u8) -> LayerId {
        LayerId(2 + 2 * n)
    }

    pub fn default_name(&self) -> String {
        match *self {
            LayerId::F_CU => "F.Cu".to_string(),
            LayerId::B_CU => "B.Cu".to_string(),
            LayerId(id) if id >= 4 && id % 2 == 0 => format!("In{}.Cu", (id - 2) / 2),
            LayerId(id) => format!("Layer{}", id),
        }
    }
}

impl std::fmt::Display for LayerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.default_name())
    }
}

/// Reference to a net by name; the empty name means "no net"
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NetRef(String);

impl NetRef {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn unconnected() -> Self {
        Self(String::new())
    }

    pub fn name(&self) -> &str {
        &self.0
    }

    pub fn is_unconnected(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<&str> for NetRef {
    fn from(name: &str) -> Self {
        NetRef::new(name)
    }
}

impl std::fmt::Display for NetRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.is_unconnected() {
            write!(f, "<no net>")
        } else {
            write!(f, "{}", self.0)
        }
    }
}
