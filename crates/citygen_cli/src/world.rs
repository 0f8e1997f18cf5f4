//! World layer: spawns a generated city into an ECS world and reads it back.

use citygen::{BuildingClassifier, BuildingKind, CityLayout, Orientation};
use hecs::World;
use world_core::{Rect, Transform};

/// Height given to street and intersection slabs.
const PAVEMENT_THICKNESS: f32 = 0.1;

/// A building entity. Geometry lives in its [`Transform`].
#[derive(Debug, Clone)]
pub struct Building {
    pub kind: BuildingKind,
    pub floors: u32,
    pub appearance: String,
}

#[derive(Debug, Clone, Copy)]
pub struct Street {
    pub orientation: Orientation,
}

/// Tag component for intersections.
#[derive(Debug, Clone, Copy, Default)]
pub struct Intersection;

/// Index of the block an entity belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlockIndex(pub usize);

/// Spawn every intersection, street and building of `city`. Returns the entity count.
pub fn populate(world: &mut World, city: &CityLayout, classifier: &BuildingClassifier) -> usize {
    let mut spawned = 0;
    for (index, block) in city.blocks.iter().enumerate() {
        let block_index = BlockIndex(index);

        world.spawn((
            Transform::from_footprint(block.intersection.area, PAVEMENT_THICKNESS),
            Intersection,
            block_index,
        ));
        for street in &block.streets {
            world.spawn((
                Transform::from_footprint(street.area, PAVEMENT_THICKNESS),
                Street {
                    orientation: street.orientation,
                },
                block_index,
            ));
        }
        for placement in &block.buildings {
            let class = classifier.class(placement.kind);
            world.spawn((
                Transform::from_footprint(placement.footprint(), placement.height),
                Building {
                    kind: placement.kind,
                    floors: classifier.floors_for_height(placement.height),
                    appearance: class.appearance.clone(),
                },
                block_index,
            ));
        }

        spawned += 1 + block.streets.len() + block.buildings.len();
    }
    spawned
}

/// What the world holds after [`populate`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WorldSummary {
    pub intersections: usize,
    pub streets: usize,
    pub street_length: f32,
    pub buildings: usize,
    /// Indexed by [`BuildingKind::index`].
    pub per_kind: [usize; 4],
    pub total_floors: u64,
    /// Highest building top.
    pub skyline: f32,
    /// Ground area covered by all entities.
    pub bounds: Option<Rect>,
}

pub fn summarize(world: &World) -> WorldSummary {
    let mut summary = WorldSummary {
        intersections: world.query::<&Intersection>().iter().count(),
        ..Default::default()
    };

    for (_, (transform, street)) in world.query::<(&Transform, &Street)>().iter() {
        summary.streets += 1;
        let area = transform.footprint();
        summary.street_length += match street.orientation {
            Orientation::NorthSouth => area.length,
            Orientation::EastWest => area.width,
        };
    }

    for (_, (transform, building)) in world.query::<(&Transform, &Building)>().iter() {
        summary.buildings += 1;
        summary.per_kind[building.kind.index()] += 1;
        summary.total_floors += building.floors as u64;
        summary.skyline = summary.skyline.max(transform.top());
    }

    for (_, transform) in world.query::<&Transform>().iter() {
        let area = transform.footprint();
        summary.bounds = Some(summary.bounds.map_or(area, |b| b.union(&area)));
    }

    summary
}

#[cfg(test)]
mod tests {
    use super::*;
    use citygen::{CityConfig, WorldConfig};

    fn city() -> (CityLayout, BuildingClassifier) {
        let config = CityConfig {
            seed: 3,
            world: WorldConfig { radius: 250.0 },
            ..Default::default()
        };
        let classifier = BuildingClassifier::from_config(&config).unwrap();
        (CityLayout::generate(&config).unwrap(), classifier)
    }

    #[test]
    fn populate_spawns_one_entity_per_record() {
        let (city, classifier) = city();
        let mut world = World::new();
        let spawned = populate(&mut world, &city, &classifier);
        assert_eq!(spawned, world.len() as usize);

        let stats = city.stats();
        let summary = summarize(&world);
        assert_eq!(summary.intersections, stats.blocks);
        assert_eq!(summary.streets, stats.streets);
        assert_eq!(summary.buildings, stats.buildings);
        assert_eq!(summary.per_kind, stats.per_kind);
    }

    #[test]
    fn skyline_matches_tallest_building() {
        let (city, classifier) = city();
        let mut world = World::new();
        populate(&mut world, &city, &classifier);
        let tallest = city.stats().tallest.unwrap();
        let summary = summarize(&world);
        assert!((summary.skyline - tallest.height).abs() < 1e-3);
    }

    #[test]
    fn bounds_cover_every_block() {
        let (city, classifier) = city();
        let mut world = World::new();
        populate(&mut world, &city, &classifier);
        let bounds = summarize(&world).bounds.unwrap();
        for block in &city.blocks {
            assert!(bounds.contains_rect(&block.bounds()));
        }
    }

    #[test]
    fn buildings_carry_class_appearance() {
        let (city, classifier) = city();
        let mut world = World::new();
        populate(&mut world, &city, &classifier);
        for (_, building) in world.query::<&Building>().iter() {
            assert_eq!(building.appearance, building.kind.name());
            assert!(building.floors >= 1);
        }
    }

    #[test]
    fn empty_world_summary() {
        let summary = summarize(&World::new());
        assert_eq!(summary, WorldSummary::default());
    }
}
