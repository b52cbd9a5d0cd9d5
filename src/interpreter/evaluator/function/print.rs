use crate::interpreter::{
    evaluator::{
        core::{Context, EvalResult},
        function::builtin::stringify,
        utils::check_arity,
    },
    event::{Event, RuneEvent},
    value::core::Value,
};

/// Emits the printed form of a value as an output event and returns `nil`.
///
/// Accepts exactly one argument of any type.
///
/// # Example
/// ```
/// use std::sync::mpsc;
///
/// use arcanesigil::{
///     Context, Event,
///     interpreter::{evaluator::function::print::print, value::core::Value},
/// };
///
/// let (sender, receiver) = mpsc::channel();
/// let mut context = Context::new(sender);
///
/// let result = print(&mut context, &[Value::Number(42.0)], 1).unwrap();
///
/// assert_eq!(result, Value::Nil);
/// assert_eq!(receiver.recv().unwrap(), Event::Output("42".into()));
/// ```
pub fn print(context: &mut Context, args: &[Value], line: usize) -> EvalResult<Value> {
    check_arity(args, 1, line)?;

    context.emit(Event::Output(stringify(&args[0])));
    Ok(Value::Nil)
}

/// Requests a glyph to be drawn at `(x, y)` and returns `nil`.
///
/// The glyph may be any value and is drawn as its printed form; both
/// coordinates must be numbers.
pub fn draw_rune(context: &mut Context, args: &[Value], line: usize) -> EvalResult<Value> {
    check_arity(args, 3, line)?;

    let rune = RuneEvent { glyph: stringify(&args[0]),
                           x:     args[1].as_number(line)?,
                           y:     args[2].as_number(line)?, };
    context.emit(Event::Rune(rune));
    Ok(Value::Nil)
}
