use anyhow::{Context, Result};
use cgpevo::config::ConfigSection;
use cgpevo::{inherit, mutate, AppConfig, Brain, ConfigManager, Domain, Genotype, Population};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::env;

/// Fit `x^2 + x` on a fixed grid of sample points
struct SymbolicFit {
    samples: Vec<(f32, f32)>,
}

impl SymbolicFit {
    fn new() -> Self {
        let samples = (0..=20)
            .map(|i| {
                let x = -1.0 + i as f32 * 0.1;
                (x, x * x + x)
            })
            .collect();
        Self { samples }
    }
}

impl Domain for SymbolicFit {
    fn inputs(&self) -> usize {
        1
    }

    fn outputs(&self) -> usize {
        1
    }

    fn evaluate(&self, brain: &mut Brain) -> cgpevo::Result<f32> {
        let mut error = 0.0;
        for &(x, y) in &self.samples {
            error += (brain.run(&[x])?[0] - y).abs();
        }
        Ok(-error / self.samples.len() as f32)
    }
}

fn load_config() -> Result<AppConfig> {
    let manager = ConfigManager::new();
    if let Some(path) = env::args().nth(1) {
        manager
            .load_from_file(&path)
            .with_context(|| format!("loading config from {}", path))?;
    }
    let config = manager.get();
    config.validate()?;
    Ok(config)
}

fn next_generation(
    population: &Population,
    config: &AppConfig,
    rng: &mut StdRng,
) -> cgpevo::Result<Vec<Genotype>> {
    let ranked = population.ranked();
    let elite_count = config.evolution.elite_count.max(1).min(ranked.len());
    let parents = &ranked[..(ranked.len() / 2).max(elite_count)];

    let mut next: Vec<Genotype> = ranked[..elite_count]
        .iter()
        .map(|individual| individual.genotype.clone())
        .collect();

    while next.len() < config.evolution.population_size {
        let first = &parents[rng.gen_range(0..parents.len())].genotype;
        let mut child = if rng.gen::<f32>() < config.evolution.crossover_rate {
            let second = &parents[rng.gen_range(0..parents.len())].genotype;
            inherit(first, second, config.evolution.inherit_preference, rng)?
        } else {
            first.clone()
        };
        mutate(&mut child, &config.cgp.mutation, rng);
        next.push(child);
    }

    Ok(next)
}

fn main() -> Result<()> {
    env_logger::init();

    let config = load_config()?;
    let domain = SymbolicFit::new();
    let mut rng = match config.evolution.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    log::info!(
        "Evolving {} genotypes for {} generations ({} section)",
        config.evolution.population_size,
        config.evolution.num_generations,
        cgpevo::CgpConfig::section_name()
    );

    let mut population = Population::for_domain(&config.cgp, &domain)?;
    population.create_primordial_generation(config.evolution.population_size, &mut rng);

    for generation in 0..config.evolution.num_generations {
        population.evaluate(&domain)?;
        if let Some(best) = population.fittest() {
            println!(
                "Generation {}: best fitness = {:.5}",
                generation + 1,
                best.fitness
            );
        }
        if generation + 1 < config.evolution.num_generations {
            let next = next_generation(&population, &config, &mut rng)?;
            population.replace_generation(next)?;
        }
    }

    if let Some(best) = population.fittest() {
        let brain = best.genotype.grow()?;
        println!(
            "Best genotype ({} active nodes):\n{}",
            brain.active_node_count(),
            serde_json::to_string_pretty(&best.genotype.save()?)?
        );
    }

    Ok(())
}
