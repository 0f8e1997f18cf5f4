//! Generation settings: building classes, block geometry, world extent.
//!
//! Every field has a serde default so a partial RON file only needs to name
//! what it overrides.

use serde::{Deserialize, Serialize};

use crate::classifier::BuildingKind;
use crate::error::LayoutError;
use crate::packer::{HeightEnvelope, DEFAULT_MAX_DEPTH};

/// Hard lower bound on a footprint edge, in metres.
pub const MIN_BASE_SIZE: f32 = 5.0;

/// Sizing constraints of one building class, as written in the config file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassSpec {
    /// Fewest floors a building of this class may have.
    pub min_floors: u32,
    /// Smallest admissible footprint edge.
    pub min_base: f32,
    /// Footprint growth per metre of height.
    pub ratio: f32,
    /// Opaque appearance handle passed through to the world layer.
    #[serde(default)]
    pub appearance: String,
}

impl ClassSpec {
    fn new(min_floors: u32, min_base: f32, ratio: f32, appearance: &str) -> Self {
        Self {
            min_floors,
            min_base,
            ratio,
            appearance: appearance.to_string(),
        }
    }

    pub fn validate(&self, kind: BuildingKind) -> Result<(), LayoutError> {
        let invalid = |reason: String| LayoutError::InvalidClass { kind, reason };
        if self.min_floors == 0 {
            return Err(invalid("min_floors must be at least 1".into()));
        }
        if !self.min_base.is_finite() || self.min_base < MIN_BASE_SIZE {
            return Err(invalid(format!(
                "min_base {} is below the {} m floor",
                self.min_base, MIN_BASE_SIZE
            )));
        }
        if !self.ratio.is_finite() || self.ratio <= 0.0 {
            return Err(invalid(format!("ratio {} must be positive", self.ratio)));
        }
        Ok(())
    }
}

/// One [`ClassSpec`] per [`BuildingKind`]. Kinds left out of a config file
/// keep their reference spec.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClassTable {
    /// `min_base` here is the minimum skyscraper base tuning input.
    pub skyscraper: ClassSpec,
    pub apartment: ClassSpec,
    pub factory: ClassSpec,
    pub house: ClassSpec,
}

impl Default for ClassTable {
    fn default() -> Self {
        Self {
            skyscraper: ClassSpec::new(30, 12.0, 0.1, "skyscraper"),
            apartment: ClassSpec::new(6, 15.0, 0.3, "apartment"),
            factory: ClassSpec::new(2, 25.0, 1.0, "factory"),
            house: ClassSpec::new(1, 5.0, 0.5, "house"),
        }
    }
}

impl ClassTable {
    pub fn get(&self, kind: BuildingKind) -> &ClassSpec {
        match kind {
            BuildingKind::Skyscraper => &self.skyscraper,
            BuildingKind::Apartment => &self.apartment,
            BuildingKind::Factory => &self.factory,
            BuildingKind::House => &self.house,
        }
    }

    /// Checks each class, that minimum heights strictly descend in
    /// [`BuildingKind::BY_HEIGHT`] order, and that house is the smallest class.
    pub fn validate(&self) -> Result<(), LayoutError> {
        for kind in BuildingKind::ALL {
            self.get(kind).validate(kind)?;
        }

        for pair in BuildingKind::BY_HEIGHT.windows(2) {
            let (taller, shorter) = (self.get(pair[0]), self.get(pair[1]));
            if taller.min_floors <= shorter.min_floors {
                return Err(LayoutError::InvalidClass {
                    kind: pair[1],
                    reason: format!(
                        "min_floors {} must be below {}'s {}",
                        shorter.min_floors, pair[0], taller.min_floors
                    ),
                });
            }
        }

        let house = self.get(BuildingKind::House).min_base;
        for kind in BuildingKind::ALL {
            if self.get(kind).min_base < house {
                return Err(LayoutError::InvalidClass {
                    kind,
                    reason: format!("min_base must not be below the house min_base {house}"),
                });
            }
        }
        Ok(())
    }
}

/// Geometry of one city block, streets included.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BlockConfig {
    /// Extent along the world x axis.
    #[serde(default = "default_block_width")]
    pub width: f32,
    /// Extent along the world y axis.
    #[serde(default = "default_block_length")]
    pub length: f32,
    /// Street width; also the edge of the square intersection.
    #[serde(default = "default_street_size")]
    pub street_size: f32,
    #[serde(default = "default_min_spacing")]
    pub min_spacing: f32,
    #[serde(default = "default_max_spacing")]
    pub max_spacing: f32,
}

fn default_block_width() -> f32 {
    200.0
}
fn default_block_length() -> f32 {
    80.0
}
fn default_street_size() -> f32 {
    10.0
}
fn default_min_spacing() -> f32 {
    1.0
}
fn default_max_spacing() -> f32 {
    4.0
}

impl Default for BlockConfig {
    fn default() -> Self {
        Self {
            width: default_block_width(),
            length: default_block_length(),
            street_size: default_street_size(),
            min_spacing: default_min_spacing(),
            max_spacing: default_max_spacing(),
        }
    }
}

impl BlockConfig {
    pub fn validate(&self) -> Result<(), LayoutError> {
        let finite = [
            self.width,
            self.length,
            self.street_size,
            self.min_spacing,
            self.max_spacing,
        ];
        if finite.iter().any(|v| !v.is_finite()) {
            return Err(LayoutError::InvalidBlock("dimensions must be finite".into()));
        }
        if self.street_size <= 0.0 {
            return Err(LayoutError::InvalidBlock(format!(
                "street_size {} must be positive",
                self.street_size
            )));
        }
        if self.street_size >= self.width || self.street_size >= self.length {
            return Err(LayoutError::InvalidBlock(format!(
                "street_size {} leaves no interior in a {}x{} block",
                self.street_size, self.width, self.length
            )));
        }
        if self.min_spacing < 0.0 || self.min_spacing > self.max_spacing {
            return Err(LayoutError::InvalidBlock(format!(
                "spacing range [{}, {}] is invalid",
                self.min_spacing, self.max_spacing
            )));
        }
        Ok(())
    }
}

/// Extent of the block grid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorldConfig {
    /// Blocks whose anchor lies within this distance of the origin are generated.
    #[serde(default = "default_radius")]
    pub radius: f32,
}

fn default_radius() -> f32 {
    1000.0
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            radius: default_radius(),
        }
    }
}

impl WorldConfig {
    pub fn validate(&self) -> Result<(), LayoutError> {
        if !self.radius.is_finite() || self.radius <= 0.0 {
            return Err(LayoutError::InvalidWorld(format!(
                "radius {} must be positive",
                self.radius
            )));
        }
        Ok(())
    }
}

/// Everything one generation run needs. Loaded from `city.ron` by the CLI.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CityConfig {
    /// Seed of the single random source shared by the whole run.
    #[serde(default = "default_seed")]
    pub seed: u64,
    /// Metres per floor.
    #[serde(default = "default_floor_height")]
    pub floor_height: f32,
    #[serde(default)]
    pub classes: ClassTable,
    #[serde(default)]
    pub block: BlockConfig,
    #[serde(default)]
    pub world: WorldConfig,
    #[serde(default)]
    pub envelope: HeightEnvelope,
    /// Deepest recursion level the packer may place a building at.
    #[serde(default = "default_max_depth")]
    pub max_depth: u32,
}

fn default_seed() -> u64 {
    42
}
fn default_floor_height() -> f32 {
    3.0
}
fn default_max_depth() -> u32 {
    DEFAULT_MAX_DEPTH
}

impl Default for CityConfig {
    fn default() -> Self {
        Self {
            seed: default_seed(),
            floor_height: default_floor_height(),
            classes: ClassTable::default(),
            block: BlockConfig::default(),
            world: WorldConfig::default(),
            envelope: HeightEnvelope::default(),
            max_depth: default_max_depth(),
        }
    }
}

impl CityConfig {
    pub fn validate(&self) -> Result<(), LayoutError> {
        validate_floor_height(self.floor_height)?;
        self.classes.validate()?;
        self.block.validate()?;
        self.world.validate()?;
        self.envelope.validate()?;
        if self.max_depth == 0 || self.max_depth > DEFAULT_MAX_DEPTH {
            return Err(LayoutError::InvalidEnvelope(format!(
                "max_depth {} must be between 1 and {}",
                self.max_depth, DEFAULT_MAX_DEPTH
            )));
        }
        Ok(())
    }
}

pub(crate) fn validate_floor_height(floor_height: f32) -> Result<(), LayoutError> {
    if !floor_height.is_finite() || floor_height <= 0.0 {
        return Err(LayoutError::InvalidFloorHeight(floor_height));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        CityConfig::default().validate().unwrap();
    }

    #[test]
    fn min_base_below_floor_rejected() {
        let mut config = CityConfig::default();
        config.classes.factory.min_base = 4.0;
        let err = config.validate().unwrap_err();
        assert!(matches!(
            err,
            LayoutError::InvalidClass {
                kind: BuildingKind::Factory,
                ..
            }
        ));
    }

    #[test]
    fn non_descending_floors_rejected() {
        let mut config = CityConfig::default();
        config.classes.apartment.min_floors = 40;
        assert!(config.validate().is_err());
    }

    #[test]
    fn house_must_be_smallest_class() {
        let mut config = CityConfig::default();
        config.classes.house.min_base = 20.0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn inverted_spacing_rejected() {
        let mut config = CityConfig::default();
        config.block.min_spacing = 5.0;
        config.block.max_spacing = 2.0;
        assert!(matches!(
            config.validate(),
            Err(LayoutError::InvalidBlock(_))
        ));
    }

    #[test]
    fn street_wider_than_block_rejected() {
        let mut config = CityConfig::default();
        config.block.street_size = config.block.length;
        assert!(matches!(
            config.validate(),
            Err(LayoutError::InvalidBlock(_))
        ));
    }

    #[test]
    fn zero_depth_and_radius_rejected() {
        let mut config = CityConfig::default();
        config.max_depth = 0;
        assert!(config.validate().is_err());

        let mut config = CityConfig::default();
        config.world.radius = 0.0;
        assert!(matches!(
            config.validate(),
            Err(LayoutError::InvalidWorld(_))
        ));
    }

    #[test]
    fn depth_beyond_bound_rejected() {
        let mut config = CityConfig::default();
        config.max_depth = DEFAULT_MAX_DEPTH + 5;
        assert!(matches!(
            config.validate(),
            Err(LayoutError::InvalidEnvelope(_))
        ));

        config.max_depth = DEFAULT_MAX_DEPTH;
        config.validate().unwrap();
    }

    #[test]
    fn non_positive_floor_height_rejected() {
        let mut config = CityConfig::default();
        config.floor_height = -3.0;
        assert!(matches!(
            config.validate(),
            Err(LayoutError::InvalidFloorHeight(_))
        ));
    }

    #[test]
    fn class_table_lookup_matches_kind() {
        let table = ClassTable::default();
        assert_eq!(table.get(BuildingKind::Factory).appearance, "factory");
        assert_eq!(table.get(BuildingKind::House).min_base, MIN_BASE_SIZE);
    }
}
