//! Building classes and the height/footprint conversions between them.
//!
//! Every class relates height and footprint edge linearly:
//! `base = height * ratio + min_base`, with the height never dropping below
//! the class minimum. Classes are plain data; the conversions are the same
//! code for every class.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::config::{validate_floor_height, ClassSpec, ClassTable, CityConfig};
use crate::error::LayoutError;

/// The four building classes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BuildingKind {
    Skyscraper,
    Apartment,
    Factory,
    House,
}

impl BuildingKind {
    pub const ALL: [BuildingKind; 4] = [
        BuildingKind::Skyscraper,
        BuildingKind::Apartment,
        BuildingKind::Factory,
        BuildingKind::House,
    ];

    /// Order tried when classifying by height: tallest minimum first.
    pub const BY_HEIGHT: [BuildingKind; 4] = [
        BuildingKind::Skyscraper,
        BuildingKind::Apartment,
        BuildingKind::Factory,
        BuildingKind::House,
    ];

    /// Order tried when classifying by footprint: largest minimum base first
    /// in the reference class table. Differs from [`Self::BY_HEIGHT`].
    pub const BY_BASE: [BuildingKind; 4] = [
        BuildingKind::Factory,
        BuildingKind::Apartment,
        BuildingKind::Skyscraper,
        BuildingKind::House,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            BuildingKind::Skyscraper => "skyscraper",
            BuildingKind::Apartment => "apartment",
            BuildingKind::Factory => "factory",
            BuildingKind::House => "house",
        }
    }

    pub fn index(&self) -> usize {
        match self {
            BuildingKind::Skyscraper => 0,
            BuildingKind::Apartment => 1,
            BuildingKind::Factory => 2,
            BuildingKind::House => 3,
        }
    }
}

impl fmt::Display for BuildingKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Resolved sizing constraints of one class. Immutable once built.
#[derive(Debug, Clone, PartialEq)]
pub struct BuildingClass {
    pub kind: BuildingKind,
    /// `min_floors * floor_height`.
    pub min_height: f32,
    pub min_base: f32,
    /// Footprint growth per metre of height.
    pub ratio: f32,
    pub appearance: String,
}

impl BuildingClass {
    pub fn new(kind: BuildingKind, spec: &ClassSpec, floor_height: f32) -> Result<Self, LayoutError> {
        spec.validate(kind)?;
        validate_floor_height(floor_height)?;
        Ok(Self {
            kind,
            min_height: spec.min_floors as f32 * floor_height,
            min_base: spec.min_base,
            ratio: spec.ratio,
            appearance: spec.appearance.clone(),
        })
    }

    /// Height of a building with footprint edge `base`, never below `min_height`.
    pub fn height_for_base_size(&self, base: f32) -> f32 {
        ((base - self.min_base) / self.ratio).max(self.min_height)
    }

    /// Footprint edge of a building `height` tall.
    pub fn base_size_for_height(&self, height: f32) -> f32 {
        height * self.ratio + self.min_base
    }
}

/// The fixed set of building classes and the rules for choosing among them.
#[derive(Debug, Clone)]
pub struct BuildingClassifier {
    classes: [BuildingClass; 4],
    floor_height: f32,
}

impl BuildingClassifier {
    pub fn new(table: &ClassTable, floor_height: f32) -> Result<Self, LayoutError> {
        table.validate()?;
        let class = |kind| BuildingClass::new(kind, table.get(kind), floor_height);
        Ok(Self {
            classes: [
                class(BuildingKind::Skyscraper)?,
                class(BuildingKind::Apartment)?,
                class(BuildingKind::Factory)?,
                class(BuildingKind::House)?,
            ],
            floor_height,
        })
    }

    pub fn from_config(config: &CityConfig) -> Result<Self, LayoutError> {
        Self::new(&config.classes, config.floor_height)
    }

    pub fn class(&self, kind: BuildingKind) -> &BuildingClass {
        &self.classes[kind.index()]
    }

    /// The smallest class; the packer stops when even this one cannot fit.
    pub fn smallest(&self) -> &BuildingClass {
        self.class(BuildingKind::House)
    }

    pub fn floor_height(&self) -> f32 {
        self.floor_height
    }

    pub fn iter(&self) -> impl Iterator<Item = &BuildingClass> {
        self.classes.iter()
    }

    /// First class, tallest minimum first, whose `min_height` is below `height`.
    /// Falls back to house.
    pub fn classify_by_height(&self, height: f32) -> &BuildingClass {
        BuildingKind::BY_HEIGHT
            .iter()
            .map(|&kind| self.class(kind))
            .find(|class| class.min_height < height)
            .unwrap_or_else(|| self.smallest())
    }

    /// First class in [`BuildingKind::BY_BASE`] order whose `min_base` is below
    /// `base`. Falls back to house. Only used when the height-chosen footprint
    /// does not fit.
    pub fn classify_by_base(&self, base: f32) -> &BuildingClass {
        BuildingKind::BY_BASE
            .iter()
            .map(|&kind| self.class(kind))
            .find(|class| class.min_base < base)
            .unwrap_or_else(|| self.smallest())
    }

    /// Whole floors in `height`, at least one.
    pub fn floors_for_height(&self, height: f32) -> u32 {
        ((height / self.floor_height).floor() as u32).max(1)
    }
}
