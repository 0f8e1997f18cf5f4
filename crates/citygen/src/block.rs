//! One city block: a corner intersection, two street segments, and the
//! packed interior.
//!
//! ```text
//!  (x, y) +----+---------------------------+
//!         | I  |  east-west street         |
//!         +----+---------------------------+
//!         | N  |                           |
//!         | S  |  interior (packed)        |
//!         |    |                           |
//!         +----+---------------------------+
//! ```

use glam::Vec2;
use rand::Rng;
use world_core::Rect;

use crate::classifier::BuildingClassifier;
use crate::config::{BlockConfig, CityConfig};
use crate::packer::{AreaPacker, PackSettings, Placement};

/// Direction a street segment runs in. North-south follows the length (y) axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Orientation {
    NorthSouth,
    EastWest,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StreetSegment {
    pub area: Rect,
    pub orientation: Orientation,
}

impl StreetSegment {
    /// Extent along the direction of travel.
    pub fn run_length(&self) -> f32 {
        match self.orientation {
            Orientation::NorthSouth => self.area.length,
            Orientation::EastWest => self.area.width,
        }
    }
}

/// Square where the block's two streets meet.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Intersection {
    pub area: Rect,
}

/// Everything generated for one block.
#[derive(Debug, Clone, PartialEq)]
pub struct BlockLayout {
    pub anchor: Vec2,
    pub intersection: Intersection,
    /// North-south segment first, then east-west.
    pub streets: [StreetSegment; 2],
    /// Rectangle handed to the packer.
    pub interior: Rect,
    pub buildings: Vec<Placement>,
}

impl BlockLayout {
    /// Full block bounds, streets included.
    pub fn bounds(&self) -> Rect {
        let max = self.interior.max();
        Rect::new(
            self.anchor.x,
            self.anchor.y,
            max.x - self.anchor.x,
            max.y - self.anchor.y,
        )
    }
}

/// Lays out single blocks. Holds no randomness of its own; the caller
/// threads one generator through every block.
#[derive(Debug, Clone)]
pub struct BlockLayoutGenerator<'a> {
    packer: AreaPacker<'a>,
    block: BlockConfig,
}

impl<'a> BlockLayoutGenerator<'a> {
    pub fn new(classifier: &'a BuildingClassifier, config: &CityConfig) -> Self {
        Self {
            packer: AreaPacker::new(classifier, PackSettings::from_config(config)),
            block: config.block.clone(),
        }
    }

    /// Generate the block whose corner is at `anchor`.
    pub fn generate<R: Rng + ?Sized>(&self, anchor: Vec2, rng: &mut R) -> BlockLayout {
        let BlockConfig {
            width,
            length,
            street_size: street,
            ..
        } = self.block;

        let intersection = Intersection {
            area: Rect::square(anchor.x, anchor.y, street),
        };
        let streets = [
            StreetSegment {
                area: Rect::new(anchor.x, anchor.y + street, street, length - street),
                orientation: Orientation::NorthSouth,
            },
            StreetSegment {
                area: Rect::new(anchor.x + street, anchor.y, width - street, street),
                orientation: Orientation::EastWest,
            },
        ];
        let interior = Rect::new(
            anchor.x + street,
            anchor.y + street,
            width - street,
            length - street,
        );

        let packing = self.packer.pack(interior, rng);
        log::debug!(
            "block ({:.0}, {:.0}): {} buildings, deepest level {:?}",
            anchor.x,
            anchor.y,
            packing.placements.len(),
            packing.deepest
        );

        BlockLayout {
            anchor,
            intersection,
            streets,
            interior,
            buildings: packing.placements,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn generate(anchor: Vec2, seed: u64) -> BlockLayout {
        let config = CityConfig::default();
        let classifier = BuildingClassifier::from_config(&config).unwrap();
        let generator = BlockLayoutGenerator::new(&classifier, &config);
        let mut rng = StdRng::seed_from_u64(seed);
        generator.generate(anchor, &mut rng)
    }

    #[test]
    fn block_streets_frame_interior() {
        let block = generate(Vec2::new(200.0, 80.0), 1);
        assert_eq!(block.intersection.area, Rect::square(200.0, 80.0, 10.0));

        let [ns, ew] = block.streets;
        assert_eq!(ns.orientation, Orientation::NorthSouth);
        assert_eq!(ns.area, Rect::new(200.0, 90.0, 10.0, 70.0));
        assert_eq!(ns.run_length(), 70.0);
        assert_eq!(ew.orientation, Orientation::EastWest);
        assert_eq!(ew.area, Rect::new(210.0, 80.0, 190.0, 10.0));
        assert_eq!(ew.run_length(), 190.0);

        assert_eq!(block.interior, Rect::new(210.0, 90.0, 190.0, 70.0));
        assert_eq!(block.bounds(), Rect::new(200.0, 80.0, 200.0, 80.0));
    }

    #[test]
    fn block_pieces_do_not_overlap() {
        let block = generate(Vec2::ZERO, 9);
        let [ns, ew] = block.streets;
        let ground = [block.intersection.area, ns.area, ew.area, block.interior];
        for (i, a) in ground.iter().enumerate() {
            for b in &ground[i + 1..] {
                assert!(!a.overlaps(b));
            }
        }
    }

    #[test]
    fn block_buildings_stay_inside_interior() {
        let block = generate(Vec2::new(-400.0, 160.0), 21);
        assert!(!block.buildings.is_empty());
        for b in &block.buildings {
            assert!(block.interior.contains_rect(&b.footprint()));
        }
    }
}
