use cgpevo::config::cgp::MutationVariant;
use cgpevo::{CgpError, ConfigManager, Population};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::path::PathBuf;

fn temp_config(name: &str, contents: &str) -> PathBuf {
    let path = std::env::temp_dir().join(format!("cgpevo_{}_{}.toml", name, std::process::id()));
    std::fs::write(&path, contents).unwrap();
    path
}

#[test]
fn test_load_from_file_builds_population() {
    let path = temp_config(
        "valid",
        r#"
        [cgp]
        rows = 3
        columns = 2
        levels_back = 1

        [cgp.mutation]
        strategy = "fixed_count"
        mutation_count = 4

        [cgp.functions]
        transcendental = true

        [evolution]
        population_size = 12
        seed = 5
        "#,
    );

    let manager = ConfigManager::new();
    manager.load_from_file(&path).unwrap();
    let config = manager.get();

    assert_eq!(config.cgp.rows, 3);
    assert_eq!(
        config.cgp.mutation,
        MutationVariant::FixedCount(cgpevo::config::FixedCountMutation { mutation_count: 4 })
    );
    assert!(config.cgp.functions.transcendental);
    assert!(config.cgp.functions.arithmetic);

    let mut population = Population::new(&config.cgp, 1, 1).unwrap();
    population.create_primordial_generation(
        config.evolution.population_size,
        &mut StdRng::seed_from_u64(config.evolution.seed.unwrap_or(0)),
    );
    assert_eq!(population.len(), 12);
    assert_eq!(population.layout().function_gene_count(), 6);

    std::fs::remove_file(path).ok();
}

#[test]
fn test_invalid_file_is_rejected() {
    let path = temp_config(
        "invalid",
        r#"
        [cgp]
        levels_back = 0
        "#,
    );

    let manager = ConfigManager::new();
    assert!(matches!(
        manager.load_from_file(&path),
        Err(CgpError::Configuration(_))
    ));
    assert_eq!(manager.get().cgp.levels_back, 2);

    std::fs::remove_file(path).ok();
}

#[test]
fn test_save_and_reload() {
    let path = std::env::temp_dir().join(format!("cgpevo_saved_{}.toml", std::process::id()));
    let manager = ConfigManager::new();
    manager.update(|config| config.cgp.columns = 11).unwrap();
    manager.save_to_file(&path).unwrap();

    let reloaded = ConfigManager::new();
    reloaded.load_from_file(&path).unwrap();
    assert_eq!(reloaded.get().cgp.columns, 11);

    std::fs::remove_file(path).ok();
}
