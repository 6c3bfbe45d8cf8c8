use super::brain::Brain;
use crate::error::Result;

/// A task that scores brains, e.g. a control simulation.
///
/// `evaluate` drives [`Brain::run`] once per simulation step and returns the
/// accumulated fitness; higher is better. Domains are shared across the rayon
/// pool during population evaluation, hence `Sync`.
pub trait Domain: Sync {
    fn inputs(&self) -> usize;

    fn outputs(&self) -> usize;

    fn evaluate(&self, brain: &mut Brain) -> Result<f32>;
}
