use super::genes::{FunctionGene, OutputGene};
use super::layout::CgpLayout;
use crate::engines::evaluation::brain::Brain;
use crate::error::{CgpError, Result};
use crate::types::MAX_FUNCTION_ARITY;
use rand::Rng;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use std::sync::Arc;

/// Evolvable CGP graph: function genes organized into layers, output selectors and
/// one evolvable constant per function gene.
///
/// The genotype only holds a shared handle to its population's [`CgpLayout`].
/// Equality is structural: two genotypes with the same genes and constants are
/// equal regardless of which layout handle they carry.
#[derive(Debug, Clone)]
pub struct Genotype {
    layout: Arc<CgpLayout>,
    function_genes: Vec<FunctionGene>,
    output_genes: Vec<OutputGene>,
    constants: Vec<f32>,
}

/// Persisted form, field order matches the saved record
#[derive(Serialize)]
struct GenotypeRecord<'a> {
    function_genes: &'a [FunctionGene],
    output_genes: &'a [OutputGene],
    constants: &'a [f32],
}

struct Violation {
    field: String,
    reason: String,
}

impl Genotype {
    /// Empty genotype; call [`Genotype::create_primordial_seed`] or
    /// [`Genotype::load`] before use.
    pub fn new(layout: Arc<CgpLayout>) -> Self {
        Self {
            layout,
            function_genes: Vec::new(),
            output_genes: Vec::new(),
            constants: Vec::new(),
        }
    }

    /// Fresh randomized genotype
    pub fn primordial<R: Rng>(layout: Arc<CgpLayout>, rng: &mut R) -> Self {
        let mut genotype = Self::new(layout);
        genotype.create_primordial_seed(rng);
        genotype
    }

    pub fn create_primordial_seed<R: Rng>(&mut self, rng: &mut R) {
        let layout = Arc::clone(&self.layout);
        let gene_count = layout.function_gene_count();

        self.function_genes = (0..gene_count)
            .map(|i| {
                let function = layout.catalog().random_function(rng);
                let range = layout.gene_range(i);
                let mut connections = [0; MAX_FUNCTION_ARITY];
                for connection in connections.iter_mut() {
                    *connection = layout.random_index(range, rng);
                }
                FunctionGene {
                    function,
                    connections,
                }
            })
            .collect();

        let output_range = layout.output_range();
        self.output_genes = (0..layout.outputs())
            .map(|_| OutputGene {
                connection: layout.random_index(output_range, rng),
            })
            .collect();

        self.constants = (0..gene_count)
            .map(|_| layout.random_constant(rng))
            .collect();

        debug_assert!(self.validate().is_ok());
    }

    pub fn layout(&self) -> &CgpLayout {
        &self.layout
    }

    pub fn layout_handle(&self) -> &Arc<CgpLayout> {
        &self.layout
    }

    pub fn function_genes(&self) -> &[FunctionGene] {
        &self.function_genes
    }

    pub fn output_genes(&self) -> &[OutputGene] {
        &self.output_genes
    }

    pub fn constants(&self) -> &[f32] {
        &self.constants
    }

    /// True when both genotypes were built for the same population layout
    pub fn shares_layout_with(&self, other: &Genotype) -> bool {
        Arc::ptr_eq(&self.layout, &other.layout) || *self.layout == *other.layout
    }

    /// Compile into an executable brain
    pub fn grow(&self) -> Result<Brain> {
        Brain::grow(self)
    }

    /// Check every structural invariant
    pub fn validate(&self) -> Result<()> {
        match self.find_violation() {
            None => Ok(()),
            Some(v) => Err(CgpError::InvariantViolation(format!(
                "{}: {}",
                v.field, v.reason
            ))),
        }
    }

    fn find_violation(&self) -> Option<Violation> {
        let layout = &self.layout;
        let gene_count = layout.function_gene_count();

        if self.function_genes.len() != gene_count {
            return Some(Violation {
                field: "function_genes".to_string(),
                reason: format!(
                    "expected {} genes, found {}",
                    gene_count,
                    self.function_genes.len()
                ),
            });
        }
        if self.output_genes.len() != layout.outputs() {
            return Some(Violation {
                field: "output_genes".to_string(),
                reason: format!(
                    "expected {} genes, found {}",
                    layout.outputs(),
                    self.output_genes.len()
                ),
            });
        }
        if self.constants.len() != gene_count {
            return Some(Violation {
                field: "constants".to_string(),
                reason: format!(
                    "expected {} values, found {}",
                    gene_count,
                    self.constants.len()
                ),
            });
        }

        for (i, gene) in self.function_genes.iter().enumerate() {
            let range = layout.gene_range(i);
            for (slot, &connection) in gene.connections.iter().enumerate() {
                if !range.contains(connection) {
                    return Some(Violation {
                        field: format!("function_genes[{}].connections[{}]", i, slot),
                        reason: format!(
                            "connection {} outside [{}, {})",
                            connection, range.lo, range.hi
                        ),
                    });
                }
            }
        }

        let output_range = layout.output_range();
        for (i, gene) in self.output_genes.iter().enumerate() {
            if !output_range.contains(gene.connection) {
                return Some(Violation {
                    field: format!("output_genes[{}].connection", i),
                    reason: format!(
                        "connection {} outside [{}, {})",
                        gene.connection, output_range.lo, output_range.hi
                    ),
                });
            }
        }

        if let Some(i) = self.constants.iter().position(|c| !c.is_finite()) {
            return Some(Violation {
                field: format!("constants[{}]", i),
                reason: "value is not finite".to_string(),
            });
        }

        None
    }

    pub fn save(&self) -> Result<Value> {
        let record = GenotypeRecord {
            function_genes: &self.function_genes,
            output_genes: &self.output_genes,
            constants: &self.constants,
        };
        Ok(serde_json::to_value(record)?)
    }

    /// Replace the genes with a saved record. The genotype is left untouched when
    /// the record is malformed or breaks an invariant for this layout.
    pub fn load(&mut self, json: &Value) -> Result<()> {
        let candidate = Genotype {
            layout: Arc::clone(&self.layout),
            function_genes: load_list(json, "function_genes", load_function_gene)?,
            output_genes: load_list(json, "output_genes", load_output_gene)?,
            constants: load_list(json, "constants", parse)?,
        };

        if let Some(v) = candidate.find_violation() {
            log::warn!("Rejected genotype record: {}: {}", v.field, v.reason);
            return Err(CgpError::Load {
                field: v.field,
                reason: v.reason,
            });
        }

        *self = candidate;
        Ok(())
    }

    // --- Atomic mutations, each keeps every invariant ---

    pub(crate) fn mutate_function<R: Rng>(&mut self, gene_index: usize, rng: &mut R) {
        self.function_genes[gene_index].function = self.layout.catalog().random_function(rng);
    }

    pub(crate) fn mutate_connection<R: Rng>(
        &mut self,
        gene_index: usize,
        slot: usize,
        rng: &mut R,
    ) {
        let range = self.layout.gene_range(gene_index);
        self.function_genes[gene_index].connections[slot] = self.layout.random_index(range, rng);
    }

    pub(crate) fn mutate_output<R: Rng>(&mut self, output_index: usize, rng: &mut R) {
        let range = self.layout.output_range();
        self.output_genes[output_index].connection = self.layout.random_index(range, rng);
    }

    pub(crate) fn mutate_constant<R: Rng>(&mut self, gene_index: usize, rng: &mut R) {
        let value = self.constants[gene_index];
        self.constants[gene_index] = self.layout.perturb_constant(value, rng);
    }

    pub(crate) fn function_genes_mut(&mut self) -> &mut [FunctionGene] {
        &mut self.function_genes
    }

    pub(crate) fn output_genes_mut(&mut self) -> &mut [OutputGene] {
        &mut self.output_genes
    }

    pub(crate) fn constants_mut(&mut self) -> &mut [f32] {
        &mut self.constants
    }
}

fn load_error(field: impl Into<String>, reason: impl ToString) -> CgpError {
    CgpError::Load {
        field: field.into(),
        reason: reason.to_string(),
    }
}

/// Look up `name` in a record object, returning the value and its field path
fn member<'a>(value: &'a Value, path: &str, name: &str) -> Result<(&'a Value, String)> {
    let path = if path.is_empty() {
        name.to_string()
    } else {
        format!("{}.{}", path, name)
    };
    match value.get(name) {
        Some(found) => Ok((found, path)),
        None => Err(load_error(path, "missing field")),
    }
}

fn elements<'a>(value: &'a Value, path: &str) -> Result<&'a [Value]> {
    value
        .as_array()
        .map(Vec::as_slice)
        .ok_or_else(|| load_error(path, "expected an array"))
}

fn parse<T: DeserializeOwned>(value: &Value, path: &str) -> Result<T> {
    T::deserialize(value).map_err(|e| load_error(path, e))
}

fn load_list<T>(
    json: &Value,
    name: &str,
    load: impl Fn(&Value, &str) -> Result<T>,
) -> Result<Vec<T>> {
    let (list, path) = member(json, "", name)?;
    elements(list, &path)?
        .iter()
        .enumerate()
        .map(|(i, element)| load(element, &format!("{}[{}]", path, i)))
        .collect()
}

fn load_function_gene(value: &Value, path: &str) -> Result<FunctionGene> {
    let (function, function_path) = member(value, path, "function")?;
    let (connections, connections_path) = member(value, path, "connections")?;

    let slots = elements(connections, &connections_path)?;
    if slots.len() != MAX_FUNCTION_ARITY {
        return Err(load_error(
            connections_path,
            format!("expected {} slots, found {}", MAX_FUNCTION_ARITY, slots.len()),
        ));
    }

    let mut gene = FunctionGene {
        function: parse(function, &function_path)?,
        connections: [0; MAX_FUNCTION_ARITY],
    };
    for (slot, (connection, value)) in gene.connections.iter_mut().zip(slots).enumerate() {
        *connection = parse(value, &format!("{}[{}]", connections_path, slot))?;
    }
    Ok(gene)
}

fn load_output_gene(value: &Value, path: &str) -> Result<OutputGene> {
    let (connection, connection_path) = member(value, path, "connection")?;
    Ok(OutputGene {
        connection: parse(connection, &connection_path)?,
    })
}

impl PartialEq for Genotype {
    fn eq(&self, other: &Self) -> bool {
        self.function_genes == other.function_genes
            && self.output_genes == other.output_genes
            && self.constants == other.constants
    }
}
