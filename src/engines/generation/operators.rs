use crate::config::cgp::{FixedCountMutation, MutationVariant, ProbabilisticMutation};
use crate::engines::generation::genotype::Genotype;
use crate::error::{CgpError, Result};
use crate::types::MAX_FUNCTION_ARITY;
use rand::Rng;

/// Bernoulli trial: succeeds iff a uniform draw in [0, 1) falls below `chance`
fn trial<R: Rng>(chance: f32, rng: &mut R) -> bool {
    rng.gen::<f64>() < f64::from(chance)
}

/// Mutate in place with the configured strategy
pub fn mutate<R: Rng>(genotype: &mut Genotype, variant: &MutationVariant, rng: &mut R) {
    match variant {
        MutationVariant::FixedCount(config) => fixed_count_mutation(genotype, config, rng),
        MutationVariant::Probabilistic(config) => probabilistic_mutation(genotype, config, rng),
    }
}

/// Apply exactly `mutation_count` atomic mutations. Each one picks a gene kind
/// uniformly (function, connection, output, constant), then an element of that
/// kind uniformly.
pub fn fixed_count_mutation<R: Rng>(
    genotype: &mut Genotype,
    config: &FixedCountMutation,
    rng: &mut R,
) {
    let gene_count = genotype.function_genes().len();
    let output_count = genotype.output_genes().len();
    if gene_count == 0 || output_count == 0 {
        return;
    }

    for _ in 0..config.mutation_count {
        match rng.gen_range(0..4) {
            0 => {
                let gene = rng.gen_range(0..gene_count);
                genotype.mutate_function(gene, rng);
            }
            1 => {
                let gene = rng.gen_range(0..gene_count);
                let slot = rng.gen_range(0..MAX_FUNCTION_ARITY);
                genotype.mutate_connection(gene, slot, rng);
            }
            2 => {
                let output = rng.gen_range(0..output_count);
                genotype.mutate_output(output, rng);
            }
            _ => {
                let gene = rng.gen_range(0..gene_count);
                genotype.mutate_constant(gene, rng);
            }
        }
    }

    debug_assert!(genotype.validate().is_ok());
}

/// Independent per-element trials for every function, connection slot, output gene
/// and constant.
pub fn probabilistic_mutation<R: Rng>(
    genotype: &mut Genotype,
    config: &ProbabilisticMutation,
    rng: &mut R,
) {
    for gene in 0..genotype.function_genes().len() {
        if trial(config.function_mutation_chance, rng) {
            genotype.mutate_function(gene, rng);
        }
        for slot in 0..MAX_FUNCTION_ARITY {
            if trial(config.connection_mutation_chance, rng) {
                genotype.mutate_connection(gene, slot, rng);
            }
        }
    }

    for output in 0..genotype.output_genes().len() {
        if trial(config.output_mutation_chance, rng) {
            genotype.mutate_output(output, rng);
        }
    }

    for gene in 0..genotype.constants().len() {
        if trial(config.constant_mutation_chance, rng) {
            genotype.mutate_constant(gene, rng);
        }
    }

    debug_assert!(genotype.validate().is_ok());
}

/// Uniform per-gene crossover: every function gene, output gene and constant is
/// taken from `parent1` with probability `preference`, otherwise from `parent2`.
///
/// Both parents share one layout, so each gene already satisfies the connection
/// window of its position and the offspring needs no repair.
pub fn inherit<R: Rng>(
    parent1: &Genotype,
    parent2: &Genotype,
    preference: f32,
    rng: &mut R,
) -> Result<Genotype> {
    if !(0.0..=1.0).contains(&preference) {
        return Err(CgpError::Configuration(format!(
            "Inheritance preference must be between 0 and 1, got {}",
            preference
        )));
    }
    if !parent1.shares_layout_with(parent2) {
        return Err(CgpError::LayoutMismatch);
    }

    let mut offspring = parent1.clone();

    for (gene, other) in offspring
        .function_genes_mut()
        .iter_mut()
        .zip(parent2.function_genes())
    {
        if !trial(preference, rng) {
            *gene = *other;
        }
    }

    for (gene, other) in offspring
        .output_genes_mut()
        .iter_mut()
        .zip(parent2.output_genes())
    {
        if !trial(preference, rng) {
            *gene = *other;
        }
    }

    for (constant, other) in offspring
        .constants_mut()
        .iter_mut()
        .zip(parent2.constants())
    {
        if !trial(preference, rng) {
            *constant = *other;
        }
    }

    debug_assert!(offspring.validate().is_ok());
    Ok(offspring)
}
