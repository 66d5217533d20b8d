use super::{LayerId, NetRef, Point};
use crate::units::{to_mm, Coord};
use serde::{Deserialize, Serialize};

/// Via construction type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ViaType {
    #[default]
    Through,
    Microvia,
    BlindBuried,
    Undefined,
}

impl ViaType {
    pub const ALL: [ViaType; 3] = [ViaType::Through, ViaType::Microvia, ViaType::BlindBuried];

    pub fn name(&self) -> &'static str {
        match self {
            ViaType::Through => "Through",
            ViaType::Microvia => "Micro",
            ViaType::BlindBuried => "Blind/buried",
            ViaType::Undefined => "Undefined",
        }
    }
}

impl std::fmt::Display for ViaType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// A via placement ready for the host to commit
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ViaSpec {
    pub position: Point,
    pub diameter: Coord,
    pub drill_diameter: Coord,
    #[serde(default)]
    pub net: NetRef,
    #[serde(default)]
    pub via_type: ViaType,
    pub start_layer: LayerId,
    pub end_layer: LayerId,
    /// Net is kept as assigned instead of following the copper it lands on
    #[serde(default)]
    pub freely_floating_net: bool,
    /// Annular ring kept only on start, end and connected layers
    #[serde(default)]
    pub remove_unconnected_annular_ring: bool,
}

/// A via size defined in the board's design rules
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ViaPreset {
    pub diameter: Coord,
    pub drill: Coord,
}

impl ViaPreset {
    pub fn new(diameter: Coord, drill: Coord) -> Self {
        Self { diameter, drill }
    }

    /// Boards keep a placeholder entry with zero sizes; only filled-in
    /// entries are offered as presets.
    pub fn is_defined(&self) -> bool {
        self.diameter != 0 && self.drill != 0
    }
}

impl std::fmt::Display for ViaPreset {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} / {}", to_mm(self.diameter), to_mm(self.drill))
    }
}
