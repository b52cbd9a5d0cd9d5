/// Runtime values.
///
/// Defines the `Value` enum manipulated by the evaluator, the tagged
/// function representation (`Native` builtins versus `User` closures), and
/// the canonical string form of every value.
pub mod core;
