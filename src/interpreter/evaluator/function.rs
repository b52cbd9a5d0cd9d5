/// The builtins registry and the math and clock natives.
///
/// Installs every native function and constant into a root environment.
pub mod builtin;

/// Call evaluation.
///
/// Dispatches calls to native and user-defined functions, checking arity
/// and call depth.
pub mod core;

/// Natives that produce events: `print` and `Sigil_drawRune`.
pub mod print;
