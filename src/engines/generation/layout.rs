use crate::config::cgp::CgpConfig;
use crate::config::traits::ConfigSection;
use crate::error::{CgpError, Result};
use crate::functions::registry::FunctionCatalog;
use crate::types::{ConnectionRange, IndexType};
use rand::Rng;
use rand_distr::{Distribution, Normal};

/// Read-only layout shared by every genotype of a population.
///
/// Node indices `0..inputs` are the primary inputs, index `inputs + i` is function
/// gene `i`, and gene `i` lives in layer `i / rows`. Connections only ever point to
/// lower indices, which keeps every graph acyclic and evaluable in one pass.
#[derive(Debug, Clone)]
pub struct CgpLayout {
    inputs: usize,
    outputs: usize,
    rows: usize,
    columns: usize,
    levels_back: usize,
    outputs_use_levels_back: bool,
    constants_range: f32,
    constants_std_dev: f32,
    constant_noise: Normal<f32>,
    catalog: FunctionCatalog,
}

impl CgpLayout {
    pub fn new(config: &CgpConfig, inputs: usize, outputs: usize) -> Result<Self> {
        let catalog = FunctionCatalog::from_config(&config.functions)?;
        Self::with_catalog(config, inputs, outputs, catalog)
    }

    pub fn with_catalog(
        config: &CgpConfig,
        inputs: usize,
        outputs: usize,
        catalog: FunctionCatalog,
    ) -> Result<Self> {
        config.validate()?;

        if inputs == 0 {
            return Err(CgpError::Configuration(
                "Domain must provide at least one input".to_string(),
            ));
        }
        if outputs == 0 {
            return Err(CgpError::Configuration(
                "Domain must provide at least one output".to_string(),
            ));
        }

        let node_count = config
            .rows
            .checked_mul(config.columns)
            .and_then(|genes| genes.checked_add(inputs))
            .filter(|&count| count <= usize::from(IndexType::MAX))
            .ok_or_else(|| {
                CgpError::Configuration(format!(
                    "Graph with {} inputs and {}x{} nodes exceeds the index limit of {}",
                    inputs,
                    config.rows,
                    config.columns,
                    IndexType::MAX
                ))
            })?;

        let constant_noise = Normal::new(0.0, config.evolvable_constants_std_dev)
            .map_err(|e| CgpError::Configuration(format!("Invalid constant noise: {}", e)))?;

        log::debug!(
            "CGP layout: {} inputs, {} outputs, {} rows x {} columns ({} nodes), levels back {}",
            inputs,
            outputs,
            config.rows,
            config.columns,
            node_count,
            config.levels_back
        );

        Ok(Self {
            inputs,
            outputs,
            rows: config.rows,
            columns: config.columns,
            levels_back: config.levels_back,
            outputs_use_levels_back: config.outputs_use_levels_back,
            constants_range: config.evolvable_constants_range,
            constants_std_dev: config.evolvable_constants_std_dev,
            constant_noise,
            catalog,
        })
    }

    pub fn inputs(&self) -> usize {
        self.inputs
    }

    pub fn outputs(&self) -> usize {
        self.outputs
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn columns(&self) -> usize {
        self.columns
    }

    pub fn levels_back(&self) -> usize {
        self.levels_back
    }

    pub fn catalog(&self) -> &FunctionCatalog {
        &self.catalog
    }

    pub fn constants_range(&self) -> f32 {
        self.constants_range
    }

    pub fn function_gene_count(&self) -> usize {
        self.rows * self.columns
    }

    /// Primary inputs plus function genes
    pub fn node_count(&self) -> usize {
        self.inputs + self.function_gene_count()
    }

    pub fn layer_of(&self, gene_index: usize) -> usize {
        gene_index / self.rows
    }

    pub fn first_node_of_layer(&self, layer: usize) -> usize {
        self.inputs + layer * self.rows
    }

    /// Legal connection targets for a node placed in `layer`.
    ///
    /// `hi` is the first node of `layer` itself; `lo` is the first node of the
    /// earliest layer inside the window, or 0 (the first primary input) once the
    /// window reaches past layer 0. `layer` may equal `columns`, which describes
    /// the window seen by output genes.
    pub fn connection_range(&self, layer: usize, levels_back: usize) -> ConnectionRange {
        let hi = self.first_node_of_layer(layer);
        let lo = if layer < levels_back {
            0
        } else {
            self.first_node_of_layer(layer - levels_back)
        };
        // node_count fits IndexType, checked at construction
        ConnectionRange {
            lo: lo as IndexType,
            hi: hi as IndexType,
        }
    }

    /// Connection range for function gene `gene_index`
    pub fn gene_range(&self, gene_index: usize) -> ConnectionRange {
        self.connection_range(self.layer_of(gene_index), self.levels_back)
    }

    pub fn output_range(&self) -> ConnectionRange {
        if self.outputs_use_levels_back {
            self.connection_range(self.columns, self.levels_back)
        } else {
            self.connection_range(self.columns, self.columns + 1)
        }
    }

    pub(crate) fn random_index<R: Rng>(&self, range: ConnectionRange, rng: &mut R) -> IndexType {
        debug_assert!(!range.is_empty());
        rng.gen_range(range.lo..range.hi)
    }

    pub(crate) fn random_constant<R: Rng>(&self, rng: &mut R) -> f32 {
        if self.constants_range > 0.0 {
            rng.gen_range(-self.constants_range..=self.constants_range)
        } else {
            0.0
        }
    }

    pub(crate) fn perturb_constant<R: Rng>(&self, value: f32, rng: &mut R) -> f32 {
        let noise = self.constant_noise.sample(rng);
        (value + noise).clamp(-self.constants_range, self.constants_range)
    }
}

impl PartialEq for CgpLayout {
    fn eq(&self, other: &Self) -> bool {
        self.inputs == other.inputs
            && self.outputs == other.outputs
            && self.rows == other.rows
            && self.columns == other.columns
            && self.levels_back == other.levels_back
            && self.outputs_use_levels_back == other.outputs_use_levels_back
            && self.constants_range == other.constants_range
            && self.constants_std_dev == other.constants_std_dev
            && self.catalog == other.catalog
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn layout(inputs: usize, rows: usize, columns: usize, levels_back: usize) -> CgpLayout {
        let config = CgpConfig {
            rows,
            columns,
            levels_back,
            ..CgpConfig::default()
        };
        CgpLayout::new(&config, inputs, 1).unwrap()
    }

    #[test]
    fn test_first_layer_sees_only_inputs() {
        let layout = layout(3, 4, 5, 2);
        let range = layout.connection_range(0, 2);
        assert_eq!((range.lo, range.hi), (0, 3));
    }

    #[test]
    fn test_window_slides_past_inputs() {
        let layout = layout(3, 4, 5, 2);
        // layer 1 still reaches the inputs
        assert_eq!(layout.connection_range(1, 2), ConnectionRange { lo: 0, hi: 7 });
        // layer 2 sees layers 0 and 1 only
        assert_eq!(layout.connection_range(2, 2), ConnectionRange { lo: 3, hi: 11 });
        assert_eq!(layout.connection_range(4, 2), ConnectionRange { lo: 11, hi: 19 });
    }

    #[test]
    fn test_every_layer_range_is_non_empty_and_bounded() {
        for levels_back in 1..=6 {
            let layout = layout(2, 3, 5, levels_back);
            for layer in 0..=layout.columns() {
                let range = layout.connection_range(layer, levels_back);
                assert!(!range.is_empty(), "layer {} levels back {}", layer, levels_back);
                assert_eq!(usize::from(range.hi), layout.first_node_of_layer(layer));
            }
        }
    }

    #[test]
    fn test_output_range_modes() {
        let config = CgpConfig {
            rows: 2,
            columns: 3,
            levels_back: 1,
            outputs_use_levels_back: false,
            ..CgpConfig::default()
        };
        let open = CgpLayout::new(&config, 2, 1).unwrap();
        assert_eq!(open.output_range(), ConnectionRange { lo: 0, hi: 8 });

        let windowed = CgpLayout::new(
            &CgpConfig {
                outputs_use_levels_back: true,
                ..config
            },
            2,
            1,
        )
        .unwrap();
        assert_eq!(windowed.output_range(), ConnectionRange { lo: 6, hi: 8 });
    }

    #[test]
    fn test_zero_outputs_rejected() {
        assert!(matches!(
            CgpLayout::new(&CgpConfig::default(), 2, 0),
            Err(CgpError::Configuration(_))
        ));
    }

    #[test]
    fn test_index_overflow_rejected() {
        let config = CgpConfig {
            rows: 300,
            columns: 300,
            ..CgpConfig::default()
        };
        assert!(CgpLayout::new(&config, 1, 1).is_err());
    }

    #[test]
    fn test_constants_stay_in_range() {
        let layout = layout(1, 1, 1, 1);
        let mut rng = StdRng::seed_from_u64(3);
        let mut value = layout.random_constant(&mut rng);
        for _ in 0..100 {
            value = layout.perturb_constant(value, &mut rng);
            assert!(value.abs() <= layout.constants_range());
        }
    }
}
