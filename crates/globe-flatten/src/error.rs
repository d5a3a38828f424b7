/// Errors from building strip mappers and octant layouts.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum FlattenError {
    /// An octant must start within `[-π, π/2]` so it ends by `π`.
    #[error("octant start longitude {0} is outside [-π, π/2]")]
    StartLongitude(f64),

    /// Strip widths must be positive and finite.
    #[error("invalid strip longitude span {0}")]
    LonSpan(f64),

    /// Octants are numbered 0 to 3 around each hemisphere.
    #[error("octant index {0} is outside 0..4")]
    OctantIndex(usize),

    /// An octant needs at least one strip.
    #[error("an octant needs at least one strip")]
    NoStrips,
}
