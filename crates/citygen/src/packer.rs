//! Recursive guillotine packing of square building footprints.
//!
//! Each call places one building flush against a random corner of its
//! rectangle, then splits the leftover L-shaped region into two disjoint
//! rectangles and recurses into both. Heights follow a logarithmic envelope
//! that decays with distance from the world origin, so the tallest and
//! widest buildings cluster around the centre.
//!
//! Random draws happen in a fixed order per call (height, optional fallback
//! base, spacing, corner) so a seeded generator reproduces a layout exactly.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};
use world_core::Rect;

use crate::classifier::{BuildingClassifier, BuildingKind};
use crate::config::{BlockConfig, CityConfig, MIN_BASE_SIZE};
use crate::error::LayoutError;

/// Deepest recursion level that may still place a building.
pub const DEFAULT_MAX_DEPTH: u32 = 7;

/// Constants of the height envelope
/// `max = scale * (offset - ln(distance + distance_bias))`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HeightEnvelope {
    /// Metres of height per unit of log-distance.
    #[serde(default = "default_scale")]
    pub scale: f32,
    /// Log-distance at which the envelope reaches zero.
    #[serde(default = "default_offset")]
    pub offset: f32,
    /// Added to the distance before taking the log; keeps the centre finite.
    #[serde(default = "default_distance_bias")]
    pub distance_bias: f32,
    /// Global height floor, in floors.
    #[serde(default = "default_min_floors")]
    pub min_floors: u32,
}

fn default_scale() -> f32 {
    160.0
}
fn default_offset() -> f32 {
    7.0
}
fn default_distance_bias() -> f32 {
    100.0
}
fn default_min_floors() -> u32 {
    2
}

impl Default for HeightEnvelope {
    fn default() -> Self {
        Self {
            scale: default_scale(),
            offset: default_offset(),
            distance_bias: default_distance_bias(),
            min_floors: default_min_floors(),
        }
    }
}

impl HeightEnvelope {
    pub fn validate(&self) -> Result<(), LayoutError> {
        if !self.scale.is_finite() || !self.offset.is_finite() {
            return Err(LayoutError::InvalidEnvelope(
                "scale and offset must be finite".into(),
            ));
        }
        if !self.distance_bias.is_finite() || self.distance_bias <= 0.0 {
            return Err(LayoutError::InvalidEnvelope(format!(
                "distance_bias {} must be positive",
                self.distance_bias
            )));
        }
        if self.min_floors == 0 {
            return Err(LayoutError::InvalidEnvelope(
                "min_floors must be at least 1".into(),
            ));
        }
        Ok(())
    }

    /// Lowest height the envelope ever yields.
    pub fn min_height(&self, floor_height: f32) -> f32 {
        self.min_floors as f32 * floor_height
    }

    /// `(min, max)` height range for a rectangle whose reference corner is at `corner`.
    pub fn bounds(&self, corner: Vec2, floor_height: f32) -> (f32, f32) {
        let floor = self.min_height(floor_height);
        let distance = corner.length();
        let max = (self.scale * (self.offset - (distance + self.distance_bias).ln())).max(floor);
        let min = (max * 0.5).max(floor);
        (min, max)
    }
}

/// Corner of a rectangle a building is pushed against. "Top" is the low-y
/// side and "left" the low-x side.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Corner {
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
}

impl Corner {
    pub const ALL: [Corner; 4] = [
        Corner::TopLeft,
        Corner::TopRight,
        Corner::BottomLeft,
        Corner::BottomRight,
    ];

    fn is_right(self) -> bool {
        matches!(self, Corner::TopRight | Corner::BottomRight)
    }

    fn is_bottom(self) -> bool {
        matches!(self, Corner::BottomLeft | Corner::BottomRight)
    }
}

/// Result of placing a footprint in a corner and cutting the remainder.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CornerSplit {
    /// Minimum corner of the placed footprint.
    pub anchor: Vec2,
    /// Full-span rectangle on the far side of the building's row or column.
    pub major: Rect,
    /// Remainder of the building's row or column beside it.
    pub minor: Rect,
}

/// Place a `base`-sized square in `corner` of `rect` and cut the leftover
/// region in two. The cut runs across the axis with more leftover room.
///
/// `step` is the footprint edge plus spacing; the strip it claims is clamped
/// to the rectangle so neither piece can extend past `rect`. Pieces may come
/// out empty or with negative extent when the rectangle is nearly full.
pub fn split_at_corner(rect: Rect, corner: Corner, base: f32, step: f32) -> CornerSplit {
    let right = corner.is_right();
    let bottom = corner.is_bottom();

    let anchor = Vec2::new(
        if right { rect.x + rect.width - base } else { rect.x },
        if bottom { rect.y + rect.length - base } else { rect.y },
    );

    let step_x = step.min(rect.width);
    let step_y = step.min(rect.length);

    let (major, minor) = if rect.length - base > rect.width - base {
        // Cut across the length: major keeps the full width.
        let major = Rect::new(
            rect.x,
            if bottom { rect.y } else { rect.y + step_y },
            rect.width,
            rect.length - step_y,
        );
        let minor = Rect::new(
            if right { rect.x } else { rect.x + step_x },
            if bottom { rect.y + rect.length - step_y } else { rect.y },
            rect.width - step_x,
            step_y,
        );
        (major, minor)
    } else {
        // Cut across the width: major keeps the full length.
        let major = Rect::new(
            if right { rect.x } else { rect.x + step_x },
            rect.y,
            rect.width - step_x,
            rect.length,
        );
        let minor = Rect::new(
            if right { rect.x + rect.width - step_x } else { rect.x },
            if bottom { rect.y } else { rect.y + step_y },
            step_x,
            rect.length - step_y,
        );
        (major, minor)
    };

    CornerSplit {
        anchor,
        major,
        minor,
    }
}

/// A final building: square footprint anchored at `(x, y)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Placement {
    pub x: f32,
    pub y: f32,
    pub height: f32,
    pub base_size: f32,
    pub kind: BuildingKind,
    /// Recursion depth of the call that placed it.
    pub depth: u32,
}

impl Placement {
    pub fn footprint(&self) -> Rect {
        Rect::square(self.x, self.y, self.base_size)
    }
}

/// What the packer decided for one rectangle, before anything is placed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BuildingPlan {
    pub kind: BuildingKind,
    pub height: f32,
    pub base_size: f32,
    pub interspace: f32,
    pub corner: Corner,
}

impl BuildingPlan {
    /// Footprint edge plus spacing.
    pub fn step(&self) -> f32 {
        self.base_size + self.interspace
    }
}

/// Tuning knobs of the packer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PackSettings {
    pub min_spacing: f32,
    pub max_spacing: f32,
    pub max_depth: u32,
    pub envelope: HeightEnvelope,
}

impl Default for PackSettings {
    fn default() -> Self {
        let block = BlockConfig::default();
        Self {
            min_spacing: block.min_spacing,
            max_spacing: block.max_spacing,
            max_depth: DEFAULT_MAX_DEPTH,
            envelope: HeightEnvelope::default(),
        }
    }
}

impl PackSettings {
    pub fn from_config(config: &CityConfig) -> Self {
        Self {
            min_spacing: config.block.min_spacing,
            max_spacing: config.block.max_spacing,
            max_depth: config.max_depth,
            envelope: config.envelope,
        }
    }
}

/// Output of one top-level [`AreaPacker::pack`] call.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Packing {
    /// Buildings in emission order (depth-first, major before minor).
    pub placements: Vec<Placement>,
    /// Deepest level that got past the depth guard.
    pub deepest: Option<u32>,
}

/// Fills rectangles with buildings.
#[derive(Debug, Clone, Copy)]
pub struct AreaPacker<'a> {
    classifier: &'a BuildingClassifier,
    settings: PackSettings,
}

impl<'a> AreaPacker<'a> {
    pub fn new(classifier: &'a BuildingClassifier, settings: PackSettings) -> Self {
        Self {
            classifier,
            settings,
        }
    }

    /// Pack `rect` from depth 0.
    pub fn pack<R: Rng + ?Sized>(&self, rect: Rect, rng: &mut R) -> Packing {
        let mut out = Packing::default();
        self.pack_into(rect, 0, rng, &mut out);
        out
    }

    /// Recursive step: place one building in `rect`, then pack the two leftover pieces.
    pub fn pack_into<R: Rng + ?Sized>(
        &self,
        rect: Rect,
        depth: u32,
        rng: &mut R,
        out: &mut Packing,
    ) {
        if depth > self.settings.max_depth {
            return;
        }
        out.deepest = Some(out.deepest.map_or(depth, |d| d.max(depth)));

        let Some(plan) = self.plan(rect, rng) else {
            return;
        };

        let split = split_at_corner(rect, plan.corner, plan.base_size, plan.step());
        let placement = Placement {
            x: split.anchor.x,
            y: split.anchor.y,
            height: plan.height,
            base_size: plan.base_size,
            kind: plan.kind,
            depth,
        };
        log::trace!(
            "depth {}: {} {:.1}x{:.1} m at ({:.1}, {:.1})",
            depth,
            plan.kind,
            plan.base_size,
            plan.height,
            placement.x,
            placement.y
        );
        out.placements.push(placement);

        self.pack_into(split.major, depth + 1, rng, out);
        self.pack_into(split.minor, depth + 1, rng, out);
    }

    /// Choose class, size, spacing and corner for a building in `rect`.
    /// Returns `None` when not even the smallest class fits.
    pub fn plan<R: Rng + ?Sized>(&self, rect: Rect, rng: &mut R) -> Option<BuildingPlan> {
        let max_base = rect.min_edge();
        if max_base.is_nan() || max_base < self.classifier.smallest().min_base {
            return None;
        }

        let floor_height = self.classifier.floor_height();
        let (min_height, max_height) = self.settings.envelope.bounds(rect.origin(), floor_height);
        let mut height = rng.gen_range(min_height..=max_height);

        let mut class = self.classifier.classify_by_height(height);
        let mut base_size = class.base_size_for_height(height);

        if base_size > max_base {
            // Re-draw within what fits rather than clamping to max_base.
            base_size = rng.gen_range(MIN_BASE_SIZE.max(max_base * 0.5)..=max_base);
            class = self.classifier.classify_by_base(base_size);
            height = class.height_for_base_size(base_size);
        }

        if height < class.min_height {
            log::warn!(
                "{} height {:.2} m below class minimum {:.2} m, clamping",
                class.kind,
                height,
                class.min_height
            );
            height = class.min_height.max(floor_height);
        }

        let interspace = rng.gen_range(self.settings.min_spacing..=self.settings.max_spacing);
        let corner = Corner::ALL[rng.gen_range(0..Corner::ALL.len())];

        Some(BuildingPlan {
            kind: class.kind,
            height,
            base_size,
            interspace,
            corner,
        })
    }
}
