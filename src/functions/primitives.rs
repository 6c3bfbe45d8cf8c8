use serde::{Deserialize, Serialize};

/// Function groups that can be switched on or off in the catalog
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FunctionGroup {
    BasicConstants,
    EvolvableConstants,
    Arithmetic,
    Transcendental,
    Comparisons,
    LogicGates,
}

/// Identifier of a primitive graph function.
///
/// Persisted by its snake_case name, so reordering variants does not break saved
/// genotypes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FunctionId {
    // --- Basic constants ---
    ConstZero,
    ConstOne,
    ConstTwo,
    ConstHalf,

    // --- Evolvable constants ---
    EvolvableConstant,
    Scale,

    // --- Arithmetic ---
    Identity,
    Negate,
    Abs,
    Square,
    Sqrt,
    Add,
    Subtract,
    Multiply,
    Divide,
    Average,
    Min,
    Max,

    // --- Transcendental ---
    Sin,
    Cos,
    Tanh,
    Sigmoid,
    Gaussian,

    // --- Comparisons ---
    Greater,
    Less,

    // --- Logic gates ---
    And,
    Or,
    Not,
    Xor,
}

const DIVISION_EPSILON: f32 = 1e-6;

impl FunctionId {
    pub const ALL: [FunctionId; 29] = [
        FunctionId::ConstZero,
        FunctionId::ConstOne,
        FunctionId::ConstTwo,
        FunctionId::ConstHalf,
        FunctionId::EvolvableConstant,
        FunctionId::Scale,
        FunctionId::Identity,
        FunctionId::Negate,
        FunctionId::Abs,
        FunctionId::Square,
        FunctionId::Sqrt,
        FunctionId::Add,
        FunctionId::Subtract,
        FunctionId::Multiply,
        FunctionId::Divide,
        FunctionId::Average,
        FunctionId::Min,
        FunctionId::Max,
        FunctionId::Sin,
        FunctionId::Cos,
        FunctionId::Tanh,
        FunctionId::Sigmoid,
        FunctionId::Gaussian,
        FunctionId::Greater,
        FunctionId::Less,
        FunctionId::And,
        FunctionId::Or,
        FunctionId::Not,
        FunctionId::Xor,
    ];

    /// Number of connection slots the function reads
    pub fn arity(&self) -> usize {
        match self {
            FunctionId::ConstZero
            | FunctionId::ConstOne
            | FunctionId::ConstTwo
            | FunctionId::ConstHalf
            | FunctionId::EvolvableConstant => 0,

            FunctionId::Scale
            | FunctionId::Identity
            | FunctionId::Negate
            | FunctionId::Abs
            | FunctionId::Square
            | FunctionId::Sqrt
            | FunctionId::Sin
            | FunctionId::Cos
            | FunctionId::Tanh
            | FunctionId::Sigmoid
            | FunctionId::Gaussian
            | FunctionId::Not => 1,

            FunctionId::Add
            | FunctionId::Subtract
            | FunctionId::Multiply
            | FunctionId::Divide
            | FunctionId::Average
            | FunctionId::Min
            | FunctionId::Max
            | FunctionId::Greater
            | FunctionId::Less
            | FunctionId::And
            | FunctionId::Or
            | FunctionId::Xor => 2,
        }
    }

    pub fn group(&self) -> FunctionGroup {
        match self {
            FunctionId::ConstZero
            | FunctionId::ConstOne
            | FunctionId::ConstTwo
            | FunctionId::ConstHalf => FunctionGroup::BasicConstants,
            FunctionId::EvolvableConstant | FunctionId::Scale => FunctionGroup::EvolvableConstants,
            FunctionId::Identity
            | FunctionId::Negate
            | FunctionId::Abs
            | FunctionId::Square
            | FunctionId::Sqrt
            | FunctionId::Add
            | FunctionId::Subtract
            | FunctionId::Multiply
            | FunctionId::Divide
            | FunctionId::Average
            | FunctionId::Min
            | FunctionId::Max => FunctionGroup::Arithmetic,
            FunctionId::Sin
            | FunctionId::Cos
            | FunctionId::Tanh
            | FunctionId::Sigmoid
            | FunctionId::Gaussian => FunctionGroup::Transcendental,
            FunctionId::Greater | FunctionId::Less => FunctionGroup::Comparisons,
            FunctionId::And | FunctionId::Or | FunctionId::Not | FunctionId::Xor => {
                FunctionGroup::LogicGates
            }
        }
    }

    /// Evaluate the function. `args` holds at least `arity()` values.
    ///
    /// Non-finite results collapse to 0.0, so a brain never propagates NaN or
    /// infinity downstream.
    pub fn execute(&self, args: &[f32], constant: f32) -> f32 {
        let a = || args[0];
        let b = || args[1];
        let truth = |v: bool| -> f32 { if v { 1.0 } else { 0.0 } };

        let value = match self {
            FunctionId::ConstZero => 0.0,
            FunctionId::ConstOne => 1.0,
            FunctionId::ConstTwo => 2.0,
            FunctionId::ConstHalf => 0.5,
            FunctionId::EvolvableConstant => constant,
            FunctionId::Scale => a() * constant,
            FunctionId::Identity => a(),
            FunctionId::Negate => -a(),
            FunctionId::Abs => a().abs(),
            FunctionId::Square => a() * a(),
            FunctionId::Sqrt => a().abs().sqrt(),
            FunctionId::Add => a() + b(),
            FunctionId::Subtract => a() - b(),
            FunctionId::Multiply => a() * b(),
            FunctionId::Divide => {
                if b().abs() < DIVISION_EPSILON {
                    0.0
                } else {
                    a() / b()
                }
            }
            FunctionId::Average => (a() + b()) / 2.0,
            FunctionId::Min => a().min(b()),
            FunctionId::Max => a().max(b()),
            FunctionId::Sin => a().sin(),
            FunctionId::Cos => a().cos(),
            FunctionId::Tanh => a().tanh(),
            FunctionId::Sigmoid => 1.0 / (1.0 + (-a()).exp()),
            FunctionId::Gaussian => (-(a() * a())).exp(),
            FunctionId::Greater => truth(a() > b()),
            FunctionId::Less => truth(a() < b()),
            FunctionId::And => truth(a() > 0.0 && b() > 0.0),
            FunctionId::Or => truth(a() > 0.0 || b() > 0.0),
            FunctionId::Not => truth(a() <= 0.0),
            FunctionId::Xor => truth((a() > 0.0) != (b() > 0.0)),
        };

        if value.is_finite() {
            value
        } else {
            0.0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::MAX_FUNCTION_ARITY;

    #[test]
    fn test_arity_never_exceeds_connection_slots() {
        for function in FunctionId::ALL {
            assert!(function.arity() <= MAX_FUNCTION_ARITY, "{:?}", function);
        }
    }

    #[test]
    fn test_protected_divide() {
        assert_eq!(FunctionId::Divide.execute(&[3.0, 0.0], 0.0), 0.0);
        assert_eq!(FunctionId::Divide.execute(&[3.0, 2.0], 0.0), 1.5);
    }

    #[test]
    fn test_constant_functions() {
        assert_eq!(FunctionId::EvolvableConstant.execute(&[], 0.75), 0.75);
        assert_eq!(FunctionId::Scale.execute(&[2.0], -1.5), -3.0);
        assert_eq!(FunctionId::ConstHalf.execute(&[], 9.0), 0.5);
    }

    #[test]
    fn test_logic_gates() {
        assert_eq!(FunctionId::And.execute(&[1.0, 0.5], 0.0), 1.0);
        assert_eq!(FunctionId::And.execute(&[1.0, -0.5], 0.0), 0.0);
        assert_eq!(FunctionId::Xor.execute(&[1.0, -1.0], 0.0), 1.0);
        assert_eq!(FunctionId::Not.execute(&[0.0], 0.0), 1.0);
    }

    #[test]
    fn test_non_finite_results_collapse_to_zero() {
        assert_eq!(FunctionId::Multiply.execute(&[f32::MAX, f32::MAX], 0.0), 0.0);
    }

    #[test]
    fn test_names_round_trip_through_serde() {
        let json = serde_json::to_string(&FunctionId::EvolvableConstant).unwrap();
        assert_eq!(json, "\"evolvable_constant\"");
        let back: FunctionId = serde_json::from_str(&json).unwrap();
        assert_eq!(back, FunctionId::EvolvableConstant);
    }
}
