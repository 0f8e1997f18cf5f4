//! Grid of blocks around the world origin.

use glam::Vec2;
use rand::prelude::*;

use crate::block::{BlockLayout, BlockLayoutGenerator};
use crate::classifier::{BuildingClassifier, BuildingKind};
use crate::config::{BlockConfig, CityConfig, WorldConfig};
use crate::error::LayoutError;
use crate::packer::Placement;

/// A generated city: every block within the placement radius.
#[derive(Debug, Clone)]
pub struct CityLayout {
    pub seed: u64,
    pub blocks: Vec<BlockLayout>,
}

/// Aggregate numbers for a [`CityLayout`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CityStats {
    pub blocks: usize,
    pub streets: usize,
    pub buildings: usize,
    /// Indexed by [`BuildingKind::index`].
    pub per_kind: [usize; 4],
    pub tallest: Option<Placement>,
    /// Summed footprint area of all buildings.
    pub built_area: f32,
}

impl CityStats {
    pub fn count(&self, kind: BuildingKind) -> usize {
        self.per_kind[kind.index()]
    }
}

impl CityLayout {
    /// Validate `config` and generate from a generator seeded with `config.seed`.
    pub fn generate(config: &CityConfig) -> Result<Self, LayoutError> {
        config.validate()?;
        let classifier = BuildingClassifier::from_config(config)?;
        let mut rng = StdRng::seed_from_u64(config.seed);
        Ok(Self::generate_with(config, &classifier, &mut rng))
    }

    /// Generate with a caller-supplied classifier and generator.
    /// Blocks are laid out in row-major order, all drawing from `rng`.
    pub fn generate_with<R: Rng + ?Sized>(
        config: &CityConfig,
        classifier: &BuildingClassifier,
        rng: &mut R,
    ) -> Self {
        let generator = BlockLayoutGenerator::new(classifier, config);
        let blocks: Vec<BlockLayout> = block_anchors(&config.world, &config.block)
            .into_iter()
            .map(|anchor| generator.generate(anchor, rng))
            .collect();

        log::info!(
            "Generated {} blocks within {:.0} m (seed {})",
            blocks.len(),
            config.world.radius,
            config.seed
        );

        Self {
            seed: config.seed,
            blocks,
        }
    }

    pub fn buildings(&self) -> impl Iterator<Item = &Placement> {
        self.blocks.iter().flat_map(|b| b.buildings.iter())
    }

    pub fn stats(&self) -> CityStats {
        let mut stats = CityStats {
            blocks: self.blocks.len(),
            streets: self.blocks.iter().map(|b| b.streets.len()).sum(),
            ..Default::default()
        };
        for building in self.buildings() {
            stats.buildings += 1;
            stats.per_kind[building.kind.index()] += 1;
            stats.built_area += building.footprint().area();
            if stats.tallest.map_or(true, |t| building.height > t.height) {
                stats.tallest = Some(*building);
            }
        }
        stats
    }
}

/// Anchors of every grid cell within `world.radius` of the origin, row by row.
pub fn block_anchors(world: &WorldConfig, block: &BlockConfig) -> Vec<Vec2> {
    let cells_x = (world.radius / block.width).ceil() as i32;
    let cells_y = (world.radius / block.length).ceil() as i32;

    let mut anchors = Vec::new();
    for j in -cells_y..=cells_y {
        for i in -cells_x..=cells_x {
            let anchor = Vec2::new(i as f32 * block.width, j as f32 * block.length);
            if anchor.length() <= world.radius {
                anchors.push(anchor);
            }
        }
    }
    anchors
}
