//! Via fence dialog state
//!
//! Headless model of the fence dialog. The host feeds it board facts
//! ([`FenceDialogContext`]) and user actions; the form keeps the
//! interdependent fields consistent and finally produces validated
//! [`FenceParameters`].
//!
//! Coupling rules:
//! - "Use zone clearance" copies the selected net's zone clearance into the
//!   clearance text; typing into the text switches back to manual.
//! - Picking a via preset copies its sizes into the size texts; typing into
//!   either text switches back to manual.
//! - A through via always spans the first and last copper layer, and the
//!   layer choices are locked.
//! - Adjacent start/end layers have no inner layers to strip, so the
//!   annular ring policy is forced to all copper layers and locked.

use crate::config::{AnnularRingPolicy, FenceSettings};
use crate::error::{SettingsError, SettingsResult};
use std::fmt;
use tracing::debug;
use tracktools_camtools::FenceParameters;
use tracktools_core::units::{format_length, parse_length, parse_length_mm, MeasurementSystem};
use tracktools_core::{Coord, LayerId, NetRef, ViaPreset, ViaType};

/// A copper zone's net and its local clearance
#[derive(Debug, Clone, PartialEq)]
pub struct ZoneClearance {
    pub net: NetRef,
    pub clearance: Coord,
}

/// Board facts the dialog is built from
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FenceDialogContext {
    /// Enabled copper layers, front first and back last
    pub copper_layers: Vec<LayerId>,
    /// Zones in board order
    pub zones: Vec<ZoneClearance>,
    /// Board via sizes, placeholder entries included
    pub via_presets: Vec<ViaPreset>,
    pub has_selection: bool,
}

/// Where the clearance value comes from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClearanceSource {
    Manual,
    DerivedFromZone,
}

/// Where the via size comes from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViaSizeSource {
    Manual,
    /// Index into [`FenceForm::offered_presets`]
    Preset(usize),
}

/// Reason the Apply action is unavailable
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApplyBlocker {
    SameLayerPair,
    ClearanceNotNumeric,
    InvalidViaSize,
    NoSelection,
}

impl fmt::Display for ApplyBlocker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SameLayerPair => write!(f, "start and end layer are the same"),
            Self::ClearanceNotNumeric => write!(f, "clearance is not a number"),
            Self::InvalidViaSize => {
                write!(f, "via size needs diameter > drill > 0")
            }
            Self::NoSelection => write!(f, "no track is selected"),
        }
    }
}

/// Fence dialog state
#[derive(Debug, Clone)]
pub struct FenceForm {
    system: MeasurementSystem,
    copper_layers: Vec<LayerId>,
    nets: Vec<ZoneClearance>,
    presets: Vec<ViaPreset>,
    has_selection: bool,

    selected_net: Option<usize>,
    clearance_text: String,
    clearance_source: ClearanceSource,

    via_diameter_text: String,
    via_drill_text: String,
    via_size_source: ViaSizeSource,

    via_type: ViaType,
    start_layer: usize,
    end_layer: usize,
    layers_locked: bool,

    annular_ring: AnnularRingPolicy,
    annular_ring_locked: bool,

    update_via_net: bool,
}

impl FenceForm {
    /// Build the dialog state for `context`, prefilled from `settings`
    pub fn new(
        context: FenceDialogContext,
        settings: &FenceSettings,
        system: MeasurementSystem,
    ) -> Self {
        let nets: Vec<ZoneClearance> = context
            .zones
            .into_iter()
            .filter(|zone| !zone.net.is_unconnected())
            .collect();
        let selected_net = nets.iter().rposition(|zone| zone.net.name().contains("GND"));
        let presets = context
            .via_presets
            .into_iter()
            .filter(ViaPreset::is_defined)
            .collect();
        let last_layer = context.copper_layers.len().saturating_sub(1);

        let mut form = Self {
            system,
            copper_layers: context.copper_layers,
            nets,
            presets,
            has_selection: context.has_selection,
            selected_net,
            clearance_text: mm_text(settings.clearance_mm, system),
            clearance_source: ClearanceSource::Manual,
            via_diameter_text: mm_text(settings.via_diameter_mm, system),
            via_drill_text: mm_text(settings.via_drill_mm, system),
            via_size_source: ViaSizeSource::Manual,
            via_type: settings.via_type,
            start_layer: 0,
            end_layer: last_layer,
            layers_locked: false,
            annular_ring: settings.annular_ring,
            annular_ring_locked: false,
            update_via_net: settings.update_via_net,
        };

        form.apply_via_type_rules();
        form.apply_adjacency_rules();
        if settings.use_zone_clearance && form.selected_net.is_some() {
            form.refresh_zone_clearance();
        }
        form
    }

    pub fn offered_nets(&self) -> &[ZoneClearance] {
        &self.nets
    }

    pub fn offered_presets(&self) -> &[ViaPreset] {
        &self.presets
    }

    pub fn copper_layers(&self) -> &[LayerId] {
        &self.copper_layers
    }

    pub fn selected_net(&self) -> Option<&NetRef> {
        self.selected_net.map(|i| &self.nets[i].net)
    }

    pub fn clearance_text(&self) -> &str {
        &self.clearance_text
    }

    pub fn clearance_source(&self) -> ClearanceSource {
        self.clearance_source
    }

    pub fn via_diameter_text(&self) -> &str {
        &self.via_diameter_text
    }

    pub fn via_drill_text(&self) -> &str {
        &self.via_drill_text
    }

    pub fn via_size_source(&self) -> ViaSizeSource {
        self.via_size_source
    }

    pub fn via_type(&self) -> ViaType {
        self.via_type
    }

    /// Selected `(start, end)` layers
    pub fn layer_pair(&self) -> (Option<LayerId>, Option<LayerId>) {
        (
            self.copper_layers.get(self.start_layer).copied(),
            self.copper_layers.get(self.end_layer).copied(),
        )
    }

    pub fn layers_locked(&self) -> bool {
        self.layers_locked
    }

    pub fn annular_ring(&self) -> AnnularRingPolicy {
        self.annular_ring
    }

    pub fn annular_ring_locked(&self) -> bool {
        self.annular_ring_locked
    }

    pub fn update_via_net(&self) -> bool {
        self.update_via_net
    }

    pub fn set_has_selection(&mut self, has_selection: bool) {
        self.has_selection = has_selection;
    }

    /// Choose the via net by index into [`Self::offered_nets`]
    pub fn select_net(&mut self, index: usize) -> SettingsResult<()> {
        if index >= self.nets.len() {
            return Err(out_of_range("net", index, self.nets.len()));
        }
        self.selected_net = Some(index);
        if self.clearance_source == ClearanceSource::DerivedFromZone {
            self.refresh_zone_clearance();
        }
        Ok(())
    }

    /// Toggle "use zone clearance"
    pub fn set_use_zone_clearance(&mut self, enabled: bool) -> SettingsResult<()> {
        if !enabled {
            self.clearance_source = ClearanceSource::Manual;
            return Ok(());
        }
        if self.selected_net.is_none() {
            return Err(SettingsError::InvalidChoice {
                field: "use_zone_clearance",
                reason: "no net selected".to_string(),
            });
        }
        self.refresh_zone_clearance();
        Ok(())
    }

    /// User typed into the clearance field
    pub fn edit_clearance_text(&mut self, text: impl Into<String>) {
        self.clearance_text = text.into();
        self.clearance_source = ClearanceSource::Manual;
    }

    /// Choose a via size by index into [`Self::offered_presets`]
    pub fn select_via_preset(&mut self, index: usize) -> SettingsResult<()> {
        let preset = *self
            .presets
            .get(index)
            .ok_or_else(|| out_of_range("via_preset", index, self.presets.len()))?;
        self.via_diameter_text = format_length(preset.diameter, self.system);
        self.via_drill_text = format_length(preset.drill, self.system);
        self.via_size_source = ViaSizeSource::Preset(index);
        Ok(())
    }

    /// User typed into the via diameter field
    pub fn edit_via_diameter_text(&mut self, text: impl Into<String>) {
        self.via_diameter_text = text.into();
        self.via_size_source = ViaSizeSource::Manual;
    }

    /// User typed into the via drill field
    pub fn edit_via_drill_text(&mut self, text: impl Into<String>) {
        self.via_drill_text = text.into();
        self.via_size_source = ViaSizeSource::Manual;
    }

    /// Only through, micro and blind/buried vias are offered
    pub fn set_via_type(&mut self, via_type: ViaType) -> SettingsResult<()> {
        if via_type == ViaType::Undefined {
            return Err(SettingsError::InvalidChoice {
                field: "via_type",
                reason: "not an offered via type".to_string(),
            });
        }
        self.via_type = via_type;
        self.apply_via_type_rules();
        Ok(())
    }

    /// Choose the layer pair by indices into [`Self::copper_layers`]
    pub fn set_layer_pair(&mut self, start: usize, end: usize) -> SettingsResult<()> {
        if self.layers_locked {
            return Err(SettingsError::InvalidChoice {
                field: "layer_pair",
                reason: "locked by via type".to_string(),
            });
        }
        let count = self.copper_layers.len();
        if start >= count {
            return Err(out_of_range("start_layer", start, count));
        }
        if end >= count {
            return Err(out_of_range("end_layer", end, count));
        }
        self.start_layer = start;
        self.end_layer = end;
        self.apply_adjacency_rules();
        Ok(())
    }

    pub fn set_annular_ring(&mut self, policy: AnnularRingPolicy) -> SettingsResult<()> {
        if self.annular_ring_locked && policy != AnnularRingPolicy::AllCopperLayers {
            return Err(SettingsError::InvalidChoice {
                field: "annular_ring",
                reason: "adjacent layers keep all copper layers".to_string(),
            });
        }
        self.annular_ring = policy;
        Ok(())
    }

    pub fn set_update_via_net(&mut self, update: bool) {
        self.update_via_net = update;
    }

    /// Everything currently preventing Apply, empty when Apply is enabled
    pub fn apply_blockers(&self) -> Vec<ApplyBlocker> {
        let mut blockers = Vec::new();
        if self.start_layer == self.end_layer {
            blockers.push(ApplyBlocker::SameLayerPair);
        }
        if parse_length_mm(&self.clearance_text, self.system).is_err() {
            blockers.push(ApplyBlocker::ClearanceNotNumeric);
        }
        if !self.via_size_text_valid() {
            blockers.push(ApplyBlocker::InvalidViaSize);
        }
        if !self.has_selection {
            blockers.push(ApplyBlocker::NoSelection);
        }
        blockers
    }

    pub fn can_apply(&self) -> bool {
        self.apply_blockers().is_empty()
    }

    /// Validated generator parameters for the current state
    pub fn to_parameters(&self) -> SettingsResult<FenceParameters> {
        if let Some(blocker) = self.apply_blockers().into_iter().next() {
            return Err(SettingsError::ApplyBlocked(blocker));
        }

        let (Some(start_layer), Some(end_layer)) = self.layer_pair() else {
            return Err(SettingsError::invalid("layer_pair", "board has no copper layers"));
        };

        let track_to_via_clearance = match (self.clearance_source, self.selected_net) {
            (ClearanceSource::DerivedFromZone, Some(i)) => self.nets[i].clearance,
            _ => self.parse("clearance", &self.clearance_text)?,
        };

        let (via_diameter, via_drill) = match self.via_size_source {
            ViaSizeSource::Preset(i) => (self.presets[i].diameter, self.presets[i].drill),
            ViaSizeSource::Manual => (
                self.parse("via_diameter", &self.via_diameter_text)?,
                self.parse("via_drill", &self.via_drill_text)?,
            ),
        };

        let params = FenceParameters {
            via_diameter,
            via_drill,
            track_to_via_clearance,
            via_type: self.via_type,
            start_layer,
            end_layer,
            net: self.selected_net().cloned().unwrap_or_default(),
            freely_floating_net: !self.update_via_net,
            remove_unconnected_annular_ring: self.annular_ring.removes_unconnected(),
        };
        params.validate()?;
        debug!(?params, "Fence parameters ready");
        Ok(params)
    }

    /// Settings to persist as the next run's defaults
    pub fn to_settings(&self, base: &FenceSettings) -> FenceSettings {
        let mm = |text: &str, fallback: f64| parse_length_mm(text, self.system).unwrap_or(fallback);
        FenceSettings {
            via_diameter_mm: mm(&self.via_diameter_text, base.via_diameter_mm),
            via_drill_mm: mm(&self.via_drill_text, base.via_drill_mm),
            clearance_mm: mm(&self.clearance_text, base.clearance_mm),
            via_type: self.via_type,
            annular_ring: self.annular_ring,
            update_via_net: self.update_via_net,
            use_zone_clearance: self.clearance_source == ClearanceSource::DerivedFromZone,
            ..base.clone()
        }
    }

    fn refresh_zone_clearance(&mut self) {
        if let Some(i) = self.selected_net {
            self.clearance_text = format_length(self.nets[i].clearance, self.system);
            self.clearance_source = ClearanceSource::DerivedFromZone;
        }
    }

    fn apply_via_type_rules(&mut self) {
        if self.via_type == ViaType::Through {
            self.start_layer = 0;
            self.end_layer = self.copper_layers.len().saturating_sub(1);
            self.layers_locked = true;
            self.apply_adjacency_rules();
        } else {
            self.layers_locked = false;
        }
    }

    fn apply_adjacency_rules(&mut self) {
        if self.start_layer.abs_diff(self.end_layer) == 1 {
            self.annular_ring = AnnularRingPolicy::AllCopperLayers;
            self.annular_ring_locked = true;
        } else {
            self.annular_ring_locked = false;
        }
    }

    fn via_size_text_valid(&self) -> bool {
        match (
            parse_length_mm(&self.via_diameter_text, self.system),
            parse_length_mm(&self.via_drill_text, self.system),
        ) {
            (Ok(diameter), Ok(drill)) => diameter > 0.0 && drill > 0.0 && diameter > drill,
            _ => false,
        }
    }

    fn parse(&self, key: &str, text: &str) -> SettingsResult<Coord> {
        parse_length(text, self.system).map_err(|reason| SettingsError::invalid(key, reason))
    }
}

fn mm_text(mm: f64, system: MeasurementSystem) -> String {
    format_length(tracktools_core::from_mm(mm), system)
}

fn out_of_range(field: &'static str, index: usize, len: usize) -> SettingsError {
    SettingsError::InvalidChoice {
        field,
        reason: format!("index {index} out of range for {len} entries"),
    }
}
