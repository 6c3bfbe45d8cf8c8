use crate::config::cgp::CgpConfig;
use crate::engines::evaluation::domain::Domain;
use crate::engines::generation::genotype::Genotype;
use crate::engines::generation::layout::CgpLayout;
use crate::error::{CgpError, Result};
use rand::Rng;
use rayon::prelude::*;
use std::sync::Arc;

#[derive(Debug, Clone)]
pub struct Individual {
    pub genotype: Genotype,
    pub fitness: f32,
}

/// Owner of the shared layout and the current generation of genotypes
pub struct Population {
    layout: Arc<CgpLayout>,
    individuals: Vec<Individual>,
    generation: usize,
}

impl Population {
    pub fn new(config: &CgpConfig, inputs: usize, outputs: usize) -> Result<Self> {
        Ok(Self {
            layout: Arc::new(CgpLayout::new(config, inputs, outputs)?),
            individuals: Vec::new(),
            generation: 0,
        })
    }

    pub fn for_domain<D: Domain + ?Sized>(config: &CgpConfig, domain: &D) -> Result<Self> {
        Self::new(config, domain.inputs(), domain.outputs())
    }

    pub fn layout(&self) -> &Arc<CgpLayout> {
        &self.layout
    }

    pub fn create_primordial_generation<R: Rng>(&mut self, size: usize, rng: &mut R) {
        self.individuals = (0..size)
            .map(|_| Individual {
                genotype: Genotype::primordial(Arc::clone(&self.layout), rng),
                fitness: 0.0,
            })
            .collect();
        self.generation = 0;
        log::info!("Created primordial generation of {} genotypes", size);
    }

    /// Install the next generation. Fitness is reset until `evaluate` runs.
    pub fn replace_generation(&mut self, genotypes: Vec<Genotype>) -> Result<()> {
        if genotypes
            .iter()
            .any(|g| !Arc::ptr_eq(g.layout_handle(), &self.layout) && *g.layout() != *self.layout)
        {
            return Err(CgpError::LayoutMismatch);
        }

        self.individuals = genotypes
            .into_iter()
            .map(|genotype| Individual {
                genotype,
                fitness: 0.0,
            })
            .collect();
        self.generation += 1;
        Ok(())
    }

    /// Grow and score every individual on the rayon pool
    pub fn evaluate<D: Domain + ?Sized>(&mut self, domain: &D) -> Result<()> {
        if domain.inputs() != self.layout.inputs() || domain.outputs() != self.layout.outputs() {
            return Err(CgpError::Configuration(format!(
                "Domain shape {}x{} does not match population layout {}x{}",
                domain.inputs(),
                domain.outputs(),
                self.layout.inputs(),
                self.layout.outputs()
            )));
        }

        self.individuals
            .par_iter_mut()
            .try_for_each(|individual| -> Result<()> {
                let mut brain = individual.genotype.grow()?;
                individual.fitness = domain.evaluate(&mut brain)?;
                Ok(())
            })?;

        if let Some(best) = self.fittest() {
            log::debug!(
                "Generation {} evaluated, best fitness {:.4}",
                self.generation,
                best.fitness
            );
        }
        Ok(())
    }

    pub fn individuals(&self) -> &[Individual] {
        &self.individuals
    }

    /// Individuals ordered by descending fitness
    pub fn ranked(&self) -> Vec<&Individual> {
        let mut ranked: Vec<&Individual> = self.individuals.iter().collect();
        ranked.sort_by(|a, b| {
            b.fitness
                .partial_cmp(&a.fitness)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        ranked
    }

    pub fn fittest(&self) -> Option<&Individual> {
        self.individuals.iter().max_by(|a, b| {
            a.fitness
                .partial_cmp(&b.fitness)
                .unwrap_or(std::cmp::Ordering::Equal)
        })
    }

    pub fn generation(&self) -> usize {
        self.generation
    }

    pub fn len(&self) -> usize {
        self.individuals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.individuals.is_empty()
    }
}
