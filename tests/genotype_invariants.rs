use cgpevo::config::cgp::{CgpConfig, FixedCountMutation, MutationVariant, ProbabilisticMutation};
use cgpevo::engines::generation::operators::{
    fixed_count_mutation, inherit, mutate, probabilistic_mutation,
};
use cgpevo::types::MAX_FUNCTION_ARITY;
use cgpevo::{CgpLayout, Genotype};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::sync::Arc;

fn layout(
    inputs: usize,
    rows: usize,
    columns: usize,
    levels_back: usize,
    outputs: usize,
) -> Arc<CgpLayout> {
    let config = CgpConfig {
        rows,
        columns,
        levels_back,
        ..CgpConfig::default()
    };
    Arc::new(CgpLayout::new(&config, inputs, outputs).unwrap())
}

/// Every connection must resolve to an input or a strictly earlier node
fn assert_no_forward_references(genotype: &Genotype) {
    let layout = genotype.layout();
    for (i, gene) in genotype.function_genes().iter().enumerate() {
        let own_index = layout.inputs() + i;
        for &connection in gene.connections.iter() {
            assert!(
                usize::from(connection) < own_index,
                "gene {} references node {}",
                i,
                connection
            );
        }
    }
    for gene in genotype.output_genes() {
        assert!(usize::from(gene.connection) < layout.node_count());
    }
}

fn assert_all_invariants(genotype: &Genotype) {
    assert_no_forward_references(genotype);
    assert!(genotype.validate().is_ok());
    assert_eq!(genotype.function_genes().len(), genotype.layout().function_gene_count());
    assert_eq!(genotype.constants().len(), genotype.function_genes().len());
    assert_eq!(genotype.output_genes().len(), genotype.layout().outputs());
}

/// Number of individually mutable elements that differ between two genotypes
fn differing_elements(a: &Genotype, b: &Genotype) -> usize {
    let mut count = 0;
    for (x, y) in a.function_genes().iter().zip(b.function_genes()) {
        if x.function != y.function {
            count += 1;
        }
        for slot in 0..MAX_FUNCTION_ARITY {
            if x.connections[slot] != y.connections[slot] {
                count += 1;
            }
        }
    }
    count += a
        .output_genes()
        .iter()
        .zip(b.output_genes())
        .filter(|(x, y)| x != y)
        .count();
    count += a
        .constants()
        .iter()
        .zip(b.constants())
        .filter(|(x, y)| x != y)
        .count();
    count
}

#[test]
fn test_invariants_hold_across_operators() {
    let layouts = [
        layout(1, 3, 2, 1, 1),
        layout(4, 5, 10, 3, 2),
        layout(2, 1, 20, 20, 3),
        layout(6, 8, 4, 1, 2),
    ];
    let mut rng = StdRng::seed_from_u64(42);
    let probabilistic = ProbabilisticMutation {
        connection_mutation_chance: 0.2,
        function_mutation_chance: 0.2,
        output_mutation_chance: 0.3,
        constant_mutation_chance: 0.3,
    };

    for layout in &layouts {
        let mut a = Genotype::primordial(Arc::clone(layout), &mut rng);
        let mut b = Genotype::primordial(Arc::clone(layout), &mut rng);
        assert_all_invariants(&a);
        assert_all_invariants(&b);

        for round in 0..50 {
            fixed_count_mutation(&mut a, &FixedCountMutation { mutation_count: 3 }, &mut rng);
            probabilistic_mutation(&mut b, &probabilistic, &mut rng);
            assert_all_invariants(&a);
            assert_all_invariants(&b);

            let child = inherit(&a, &b, round as f32 / 50.0, &mut rng).unwrap();
            assert_all_invariants(&child);
        }
    }
}

#[test]
fn test_connection_ranges_are_non_empty_and_backward() {
    for levels_back in 1..=5 {
        let layout = layout(3, 4, 6, levels_back, 1);
        for layer in 0..layout.columns() {
            let range = layout.connection_range(layer, levels_back);
            assert!(!range.is_empty());
            assert!(usize::from(range.hi) <= layout.first_node_of_layer(layer));
        }
    }
}

#[test]
fn test_save_load_round_trip() {
    let layout = layout(3, 4, 6, 2, 2);
    let mut rng = StdRng::seed_from_u64(17);
    let mut genotype = Genotype::primordial(Arc::clone(&layout), &mut rng);
    mutate(
        &mut genotype,
        &MutationVariant::Probabilistic(ProbabilisticMutation::default()),
        &mut rng,
    );

    let text = serde_json::to_string(&genotype.save().unwrap()).unwrap();
    let parsed: serde_json::Value = serde_json::from_str(&text).unwrap();

    let mut restored = Genotype::new(layout);
    restored.load(&parsed).unwrap();
    assert_eq!(restored, genotype);
    for (x, y) in restored.function_genes().iter().zip(genotype.function_genes()) {
        assert_eq!(x.connections, y.connections);
    }
}

#[test]
fn test_end_to_end_small_graph() {
    // 1 input, 2 layers x 3 nodes, levels back 1, 1 output
    let layout = layout(1, 3, 2, 1, 1);
    let mut rng = StdRng::seed_from_u64(2019);

    let seeded = Genotype::primordial(Arc::clone(&layout), &mut rng);
    assert_all_invariants(&seeded);

    let mut mutated = seeded.clone();
    mutate(
        &mut mutated,
        &MutationVariant::FixedCount(FixedCountMutation { mutation_count: 2 }),
        &mut rng,
    );
    assert_all_invariants(&mutated);
    assert!(differing_elements(&seeded, &mutated) <= 2);

    let mut brain = mutated.grow().unwrap();
    let outputs = brain.run(&[0.5]).unwrap();
    assert_eq!(outputs.len(), 1);
    assert!(outputs[0].is_finite());
}

#[test]
fn test_fixed_count_changes_at_most_count_elements() {
    let layout = layout(2, 4, 5, 2, 2);
    let mut rng = StdRng::seed_from_u64(77);
    for count in 0..6 {
        let original = Genotype::primordial(Arc::clone(&layout), &mut rng);
        let mut mutated = original.clone();
        fixed_count_mutation(
            &mut mutated,
            &FixedCountMutation {
                mutation_count: count,
            },
            &mut rng,
        );
        assert!(differing_elements(&original, &mutated) <= count);
    }
}
