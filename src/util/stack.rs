/// Stack that must remain before a recursive step moves to a new segment.
pub const RED_ZONE: usize = 64 * 1024;

/// Size of each stack segment allocated once the red zone is reached.
pub const STACK_SEGMENT: usize = 1024 * 1024;

/// Runs `f`, first switching to a fresh heap-allocated stack segment if
/// less than [`RED_ZONE`] bytes of the current stack remain.
///
/// Every recursive step of the parser and evaluator goes through here, so
/// nesting depth is bounded by memory and the call-depth limit, never by
/// the size of the host thread's stack.
///
/// ## Example
/// ```
/// use arcanesigil::util::stack::with_stack;
///
/// fn depth(n: u64) -> u64 {
///     if n == 0 { 0 } else { with_stack(|| 1 + depth(n - 1)) }
/// }
///
/// assert_eq!(depth(50_000), 50_000);
/// ```
pub fn with_stack<R>(f: impl FnOnce() -> R) -> R {
    stacker::maybe_grow(RED_ZONE, STACK_SEGMENT, f)
}
