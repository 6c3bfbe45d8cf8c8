use crate::engines::generation::genes::FunctionGene;
use crate::engines::generation::genotype::Genotype;
use crate::engines::generation::layout::CgpLayout;
use crate::error::{CgpError, Result};
use crate::types::MAX_FUNCTION_ARITY;
use std::sync::Arc;

/// Executable form of a genotype.
///
/// Only nodes reachable from an output gene are evaluated; the rest of the graph
/// is carried along but never computed.
#[derive(Debug, Clone)]
pub struct Brain {
    layout: Arc<CgpLayout>,
    inputs: usize,
    function_genes: Vec<FunctionGene>,
    constants: Vec<f32>,
    output_connections: Vec<usize>,
    active: Vec<bool>,
    nodes: Vec<f32>,
    outputs: Vec<f32>,
}

impl Brain {
    pub fn grow(genotype: &Genotype) -> Result<Self> {
        debug_assert!(genotype.validate().is_ok());

        let layout = genotype.layout();
        let catalog = layout.catalog();
        if let Some(gene) = genotype
            .function_genes()
            .iter()
            .find(|gene| !catalog.contains(gene.function))
        {
            return Err(CgpError::UnknownFunction(gene.function));
        }

        let inputs = layout.inputs();
        let function_genes = genotype.function_genes().to_vec();
        let output_connections: Vec<usize> = genotype
            .output_genes()
            .iter()
            .map(|gene| usize::from(gene.connection))
            .collect();

        let active = active_nodes(inputs, &function_genes, &output_connections);
        log::trace!(
            "Grew brain: {} of {} nodes active",
            active.iter().filter(|&&a| a).count(),
            function_genes.len()
        );

        Ok(Self {
            layout: Arc::clone(genotype.layout_handle()),
            inputs,
            nodes: vec![0.0; inputs + function_genes.len()],
            outputs: vec![0.0; output_connections.len()],
            function_genes,
            constants: genotype.constants().to_vec(),
            output_connections,
            active,
        })
    }

    /// Evaluate the graph for one input vector and return the outputs
    pub fn run(&mut self, inputs: &[f32]) -> Result<&[f32]> {
        if inputs.len() != self.inputs {
            return Err(CgpError::Evaluation(format!(
                "Brain expects {} inputs, got {}",
                self.inputs,
                inputs.len()
            )));
        }

        self.nodes[..self.inputs].copy_from_slice(inputs);

        let catalog = self.layout.catalog();
        for (i, gene) in self.function_genes.iter().enumerate() {
            if !self.active[i] {
                continue;
            }
            let mut args = [0.0; MAX_FUNCTION_ARITY];
            for (arg, &connection) in args.iter_mut().zip(gene.used_connections()) {
                *arg = self.nodes[usize::from(connection)];
            }
            self.nodes[self.inputs + i] =
                catalog.evaluate(gene.function, &args, self.constants[i])?;
        }

        for (output, &connection) in self.outputs.iter_mut().zip(&self.output_connections) {
            *output = self.nodes[connection];
        }

        Ok(self.outputs.as_slice())
    }

    pub fn inputs(&self) -> usize {
        self.inputs
    }

    pub fn outputs(&self) -> usize {
        self.outputs.len()
    }

    pub fn active_node_count(&self) -> usize {
        self.active.iter().filter(|&&a| a).count()
    }

    pub fn is_active(&self, gene_index: usize) -> bool {
        self.active.get(gene_index).copied().unwrap_or(false)
    }
}

/// Mark function genes reachable from the outputs. Connections only point to lower
/// indices, so one backward sweep is enough.
fn active_nodes(inputs: usize, genes: &[FunctionGene], outputs: &[usize]) -> Vec<bool> {
    let mut active = vec![false; genes.len()];
    for &connection in outputs {
        if connection >= inputs {
            active[connection - inputs] = true;
        }
    }
    for i in (0..genes.len()).rev() {
        if !active[i] {
            continue;
        }
        for &connection in genes[i].used_connections() {
            let connection = usize::from(connection);
            if connection >= inputs {
                active[connection - inputs] = true;
            }
        }
    }
    active
}
