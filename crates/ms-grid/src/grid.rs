//! Grid axes and combination enumeration.

use serde::{Deserialize, Serialize};

use ms_types::{GridError, Hyperparams};

/// The value sets of the sweep, one axis per hyperparameter, plus how many
/// times the whole grid repeats (the repeat index becomes the seed).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParamGrid {
    pub batch_sizes: Vec<u32>,
    pub hidden_sizes: Vec<u32>,
    pub ffn_num_layers: Vec<u32>,
    pub depths: Vec<u32>,
    pub repeats: u32,
}

impl Default for ParamGrid {
    /// The standard solubility sweep: 3 × 3 × 2 × 2 = 36 combinations,
    /// one repeat with seed 0.
    fn default() -> Self {
        Self {
            batch_sizes: vec![64, 32, 16],
            hidden_sizes: vec![9, 11, 13],
            ffn_num_layers: vec![2, 3],
            depths: vec![2, 3],
            repeats: 1,
        }
    }
}

impl ParamGrid {
    pub fn with_repeats(mut self, repeats: u32) -> Self {
        self.repeats = repeats;
        self
    }

    fn check_axes(&self) -> Result<(), GridError> {
        let axes: [(&str, usize); 4] = [
            ("batch_sizes", self.batch_sizes.len()),
            ("hidden_sizes", self.hidden_sizes.len()),
            ("ffn_num_layers", self.ffn_num_layers.len()),
            ("depths", self.depths.len()),
        ];
        for (axis, len) in axes {
            if len == 0 {
                return Err(GridError::EmptyAxis { axis: axis.into() });
            }
        }
        if self.repeats == 0 {
            return Err(GridError::EmptyAxis {
                axis: "repeats".into(),
            });
        }
        Ok(())
    }

    /// Total number of combinations across all repeats.
    pub fn grid_size(&self) -> Result<usize, GridError> {
        self.check_axes()?;
        let axis_sizes = vec![
            self.batch_sizes.len(),
            self.hidden_sizes.len(),
            self.ffn_num_layers.len(),
            self.depths.len(),
            self.repeats as usize,
        ];
        let mut total: usize = 1;
        for &size in &axis_sizes {
            total = total
                .checked_mul(size)
                .ok_or_else(|| GridError::Overflow {
                    axis_sizes: axis_sizes.clone(),
                })?;
        }
        Ok(total)
    }

    /// Enumerate every combination exactly once, in the fixed submission
    /// order: repeats outermost (seed = repeat index), then a combined
    /// batch/hidden index (batch-major), then ffn layer count, then depth
    /// innermost. The order is a reproducibility contract: job indices and
    /// therefore submission order must not change between runs.
    pub fn combinations(&self) -> Result<Vec<Hyperparams>, GridError> {
        let size = self.grid_size()?;
        let mut combos = Vec::with_capacity(size);

        let pairs = self.batch_sizes.len() * self.hidden_sizes.len();
        for repeat in 0..self.repeats {
            for pair in 0..pairs {
                let batch_size = self.batch_sizes[pair / self.hidden_sizes.len()];
                let hidden_size = self.hidden_sizes[pair % self.hidden_sizes.len()];
                for &ffn_num_layers in &self.ffn_num_layers {
                    for &depth in &self.depths {
                        combos.push(Hyperparams {
                            batch_size,
                            hidden_size,
                            ffn_num_layers,
                            depth,
                            seed: repeat,
                        });
                    }
                }
            }
        }

        Ok(combos)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn default_grid_size() {
        let grid = ParamGrid::default();
        assert_eq!(grid.grid_size().unwrap(), 36);
        assert_eq!(grid.combinations().unwrap().len(), 36);
    }

    #[test]
    fn repeats_multiply_the_grid() {
        let grid = ParamGrid::default().with_repeats(3);
        assert_eq!(grid.grid_size().unwrap(), 108);

        let combos = grid.combinations().unwrap();
        assert_eq!(combos.len(), 108);
        // Seeds are the repeat indices.
        let seeds: HashSet<u32> = combos.iter().map(|c| c.seed).collect();
        assert_eq!(seeds, HashSet::from([0, 1, 2]));
    }

    #[test]
    fn every_combination_has_a_unique_stem() {
        let combos = ParamGrid::default().with_repeats(2).combinations().unwrap();
        let stems: HashSet<String> = combos.iter().map(|c| c.run_stem()).collect();
        assert_eq!(stems.len(), combos.len());
    }

    #[test]
    fn enumeration_order_is_stable() {
        let grid = ParamGrid::default();
        let first = grid.combinations().unwrap();
        let second = grid.combinations().unwrap();
        assert_eq!(first, second);

        // Batch-major over the batch/hidden product, ffn then depth inner.
        assert_eq!(first[0].run_stem(), "64_9_2_2_0");
        assert_eq!(first[1].run_stem(), "64_9_2_3_0");
        assert_eq!(first[2].run_stem(), "64_9_3_2_0");
        assert_eq!(first[3].run_stem(), "64_9_3_3_0");
        assert_eq!(first[4].run_stem(), "64_11_2_2_0");
        // Hidden axis exhausted before batch advances.
        assert_eq!(first[12].run_stem(), "32_9_2_2_0");
    }

    #[test]
    fn empty_axis_is_rejected() {
        let grid = ParamGrid {
            depths: vec![],
            ..ParamGrid::default()
        };
        match grid.combinations() {
            Err(GridError::EmptyAxis { axis }) => assert_eq!(axis, "depths"),
            other => panic!("expected EmptyAxis, got {other:?}"),
        }
    }

    #[test]
    fn zero_repeats_is_rejected() {
        let grid = ParamGrid::default().with_repeats(0);
        assert!(matches!(
            grid.grid_size(),
            Err(GridError::EmptyAxis { .. })
        ));
    }

    #[test]
    fn oversized_grid_reports_overflow() {
        let grid = ParamGrid {
            batch_sizes: vec![0; 1 << 17],
            hidden_sizes: vec![0; 1 << 17],
            ffn_num_layers: vec![0; 1 << 17],
            depths: vec![0; 1 << 17],
            repeats: 1,
        };
        assert!(matches!(grid.grid_size(), Err(GridError::Overflow { .. })));
    }
}
