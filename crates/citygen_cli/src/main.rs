//! citygen - lays out a procedural city and reports what was built.
//!
//! Usage: `citygen [--init] [CONFIG] [SEED]`

mod config;
mod world;

use anyhow::{bail, Context, Result};
use citygen::{BuildingClassifier, BuildingKind, CityConfig, CityLayout};
use hecs::World;
use rand::{rngs::StdRng, SeedableRng};
use std::path::{Path, PathBuf};

/// Command-line arguments.
#[derive(Debug, Clone, PartialEq)]
struct Args {
    /// Write the default config to `config_path` and exit.
    init: bool,
    config_path: PathBuf,
    seed: Option<u64>,
}

impl Args {
    fn parse(args: impl IntoIterator<Item = String>) -> Result<Self> {
        let mut init = false;
        let mut positional = Vec::new();
        for arg in args {
            match arg.as_str() {
                "--init" => init = true,
                flag if flag.starts_with("--") => bail!("unknown flag {flag}"),
                _ => positional.push(arg),
            }
        }
        if positional.len() > 2 {
            bail!("usage: citygen [--init] [CONFIG] [SEED]");
        }

        let mut positional = positional.into_iter();
        let config_path = positional
            .next()
            .map(PathBuf::from)
            .unwrap_or_else(config::default_path);
        let seed = positional
            .next()
            .map(|s| s.parse::<u64>().with_context(|| format!("invalid seed {s:?}")))
            .transpose()?;

        Ok(Self {
            init,
            config_path,
            seed,
        })
    }
}

/// Validate `config` once, then lay out the city with the classifier the
/// world layer will also use.
fn build_city(config: &CityConfig, path: &Path) -> Result<(CityLayout, BuildingClassifier)> {
    config
        .validate()
        .with_context(|| format!("invalid configuration in {path:?}"))?;
    let classifier = BuildingClassifier::from_config(config)
        .with_context(|| format!("invalid building classes in {path:?}"))?;
    let mut rng = StdRng::seed_from_u64(config.seed);
    let city = CityLayout::generate_with(config, &classifier, &mut rng);
    Ok((city, classifier))
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse(std::env::args().skip(1))?;

    if args.init {
        config::save(&CityConfig::default(), &args.config_path)?;
        log::info!("Wrote default config to {:?}", args.config_path);
        return Ok(());
    }

    let mut city_config = config::load(&args.config_path);
    if let Some(seed) = args.seed {
        city_config.seed = seed;
    }

    let (city, classifier) = build_city(&city_config, &args.config_path)?;

    let mut world = World::new();
    let spawned = world::populate(&mut world, &city, &classifier);
    log::info!("Spawned {} entities", spawned);

    let stats = city.stats();
    let summary = world::summarize(&world);

    println!("╔══════════════════════════════════════════════╗");
    println!("║  citygen  seed {:<30}║", city.seed);
    println!("╠══════════════════════════════════════════════╣");
    println!("║  blocks        {:>10}                    ║", stats.blocks);
    println!("║  streets       {:>10}  ({:>9.0} m)      ║", summary.streets, summary.street_length);
    println!("║  buildings     {:>10}                    ║", summary.buildings);
    for kind in BuildingKind::ALL {
        println!("║    {:<12}{:>10}                    ║", kind.name(), summary.per_kind[kind.index()]);
    }
    println!("║  floors        {:>10}                    ║", summary.total_floors);
    println!("║  skyline       {:>10.1} m                  ║", summary.skyline);
    println!("║  built area    {:>10.0} m²                 ║", stats.built_area);
    if let Some(bounds) = summary.bounds {
        println!("║  extent        {:>6.0} x {:<6.0} m             ║", bounds.width, bounds.length);
    }
    println!("╚══════════════════════════════════════════════╝");

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Result<Args> {
        Args::parse(list.iter().map(|s| s.to_string()))
    }

    #[test]
    fn no_args_uses_default_path() {
        let parsed = args(&[]).unwrap();
        assert!(!parsed.init);
        assert_eq!(parsed.seed, None);
        assert!(parsed.config_path.ends_with(config::CONFIG_FILE));
    }

    #[test]
    fn path_and_seed() {
        let parsed = args(&["town.ron", "99"]).unwrap();
        assert_eq!(parsed.config_path, PathBuf::from("town.ron"));
        assert_eq!(parsed.seed, Some(99));
    }

    #[test]
    fn init_flag() {
        let parsed = args(&["--init", "out.ron"]).unwrap();
        assert!(parsed.init);
        assert_eq!(parsed.config_path, PathBuf::from("out.ron"));
    }

    #[test]
    fn built_city_matches_library_generation() {
        let config = CityConfig {
            seed: 11,
            world: citygen::WorldConfig { radius: 250.0 },
            ..Default::default()
        };
        let (city, classifier) = build_city(&config, Path::new("city.ron")).unwrap();
        assert_eq!(city.blocks, CityLayout::generate(&config).unwrap().blocks);
        assert_eq!(classifier.floor_height(), config.floor_height);
    }

    #[test]
    fn build_city_rejects_invalid_config() {
        let mut config = CityConfig::default();
        config.max_depth = 0;
        let err = build_city(&config, Path::new("city.ron")).unwrap_err();
        assert!(err.to_string().contains("invalid configuration"));
    }

    #[test]
    fn bad_input_rejected() {
        assert!(args(&["city.ron", "not-a-seed"]).is_err());
        assert!(args(&["--verbose"]).is_err());
        assert!(args(&["a", "1", "extra"]).is_err());
    }
}
