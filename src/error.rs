//! Error types for cloth configuration and numerical degeneracies.

use core::fmt;

/// Errors that prevent a simulation from starting.
#[derive(Debug, Clone, PartialEq)]
pub enum ClothError {
    /// Grid resolution must be at least 2.
    InvalidResolution { n: usize },
    /// `n * n` vertices must be addressable by `u32` indices.
    ResolutionTooLarge { n: usize },
    /// Time step must be positive and finite.
    InvalidTimeStep,
    /// Frame time must be positive and finite.
    InvalidFrameTime,
    /// Sphere radius must be non-negative and finite.
    InvalidRadius,
    /// Spring stiffness must be non-negative and finite.
    InvalidStiffness,
    /// Damping coefficient must be non-negative and finite.
    InvalidDamping,
    /// Node mass must be positive and finite.
    InvalidMass,
    /// Cloth size must be positive and finite.
    InvalidClothSize,
    /// Reset threshold must be positive and finite.
    InvalidResetThreshold,
    /// Cloth height must be finite.
    InvalidClothHeight,
    /// A vector parameter has a NaN or infinite component.
    NonFiniteVector { name: &'static str },
}

impl fmt::Display for ClothError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ClothError::InvalidResolution { n } => {
                write!(f, "grid resolution must be at least 2 (got {})", n)
            }
            ClothError::ResolutionTooLarge { n } => {
                write!(f, "grid resolution {} overflows u32 vertex indices", n)
            }
            ClothError::InvalidTimeStep => write!(f, "time step must be positive and finite"),
            ClothError::InvalidFrameTime => write!(f, "frame time must be positive and finite"),
            ClothError::InvalidRadius => write!(f, "sphere radius must be non-negative and finite"),
            ClothError::InvalidStiffness => write!(f, "spring stiffness must be non-negative and finite"),
            ClothError::InvalidDamping => write!(f, "damping must be non-negative and finite"),
            ClothError::InvalidMass => write!(f, "node mass must be positive and finite"),
            ClothError::InvalidClothSize => write!(f, "cloth size must be positive and finite"),
            ClothError::InvalidResetThreshold => {
                write!(f, "reset threshold must be positive and finite")
            }
            ClothError::InvalidClothHeight => write!(f, "cloth height must be finite"),
            ClothError::NonFiniteVector { name } => write!(f, "{} must have finite components", name),
        }
    }
}

impl std::error::Error for ClothError {}

/// A numerical degeneracy that was recovered by skipping one update.
///
/// These never stop the simulation; they are reported to the
/// [`StepObserver`](crate::observer::StepObserver) for diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Degeneracy {
    /// The spring at `index` has (near) zero current or rest length, so its
    /// direction is undefined. It contributed no force this substep.
    Spring { index: usize },
    /// The node at `(i, j)` sits on the sphere center, so the contact normal
    /// is undefined. Its collision correction was skipped this substep.
    CollisionNormal { node: (usize, usize) },
}

impl fmt::Display for Degeneracy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Degeneracy::Spring { index } => write!(f, "spring {} has zero length", index),
            Degeneracy::CollisionNormal { node } => {
                write!(f, "node ({}, {}) coincides with the sphere center", node.0, node.1)
            }
        }
    }
}
