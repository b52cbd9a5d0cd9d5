use std::{
    fs,
    rc::Rc,
    sync::mpsc::{self, Receiver},
};

use arcanesigil::{
    Context, Error, Event, RuneEvent, Value, compile,
    error::RuntimeError,
    execute,
    interpreter::{
        evaluator::{core::MAX_CALL_DEPTH, function::print::print},
        value::core::{Function, NativeFunction},
    },
    stringify,
};
use walkdir::WalkDir;

fn channel_run(src: &str) -> (Result<(), Error>, Receiver<Event>) {
    let (sender, receiver) = mpsc::channel();
    (execute(src, sender), receiver)
}

fn output_of(src: &str) -> Vec<String> {
    let (result, receiver) = channel_run(src);
    if let Err(e) = result {
        panic!("Script failed: {e}\n{src}");
    }
    receiver.try_iter()
            .filter_map(|event| match event {
                Event::Output(line) => Some(line),
                Event::Rune(_) => None,
            })
            .collect()
}

fn assert_output(src: &str, expected: &[&str]) {
    assert_eq!(output_of(src), expected, "script:\n{src}");
}

fn runtime_error_of(src: &str) -> RuntimeError {
    match channel_run(src).0 {
        Err(Error::Runtime(e)) => e,
        Err(e) => panic!("Expected a runtime error, got: {e}"),
        Ok(()) => panic!("Script succeeded but was expected to fail:\n{src}"),
    }
}

#[test]
fn script_corpus_matches_expected_output() {
    let mut count = 0;

    for entry in
        WalkDir::new("tests/scripts").into_iter()
                                     .filter_map(Result::ok)
                                     .filter(|e| e.path().extension().is_some_and(|ext| ext == "sigil"))
    {
        let path = entry.path();
        let source =
            fs::read_to_string(path).unwrap_or_else(|e| panic!("Failed to read {path:?}: {e}"));
        let expected_path = path.with_extension("expected");
        let expected = fs::read_to_string(&expected_path).unwrap_or_else(|e| {
                                                                panic!("Failed to read {expected_path:?}: {e}")
                                                            });

        count += 1;
        let actual = output_of(&source).join("\n");
        assert_eq!(actual, expected.trim_end(), "output of {path:?} differs");
    }

    assert!(count > 0, "No scripts found in tests/scripts");
}

#[test]
fn arithmetic_and_precedence() {
    assert_output("print 1 + 2 * 3;", &["7"]);
    assert_output("print (1 + 2) * 3;", &["9"]);
    assert_output("print 10 / 4;", &["2.5"]);
    assert_output("print 7 % 3;", &["1"]);
    assert_output("print -7 % 3;", &["-1"]);
    assert_output("print 2 - 3 - 4;", &["-5"]);
    assert_output("print -(2 + 3);", &["-5"]);
}

#[test]
fn numbers_print_in_canonical_form() {
    assert_output("print 5.0;", &["5"]);
    assert_output("print 0.1 + 0.2;", &["0.30000000000000004"]);
    assert_output("print 12.50;", &["12.5"]);
    assert_output("print nil;", &["null"]);
    assert_output("print true;", &["true"]);
    assert_output("print 'raw text';", &["raw text"]);
}

#[test]
fn strings_concatenate_with_any_operand() {
    assert_output("print \"a\" + 'b';", &["ab"]);
    assert_output("print \"n = \" + 5;", &["n = 5"]);
    assert_output("print 2.5 + \"!\";", &["2.5!"]);
    assert_output("print \"is \" + nil;", &["is null"]);
}

#[test]
fn comparison_and_equality() {
    assert_output("print 1 < 2; print 2 <= 2; print 3 > 4; print 4 >= 5;",
                  &["true", "true", "false", "false"]);
    assert_output("print 1 == 1; print \"a\" == \"a\"; print nil == nil;",
                  &["true", "true", "true"]);
    assert_output("print 1 == \"1\"; print nil == false; print 0 != false;",
                  &["false", "false", "true"]);
}

#[test]
fn logical_operators_short_circuit() {
    assert_output("print nil or \"default\";", &["default"]);
    assert_output("print 0 and \"zero is truthy\";", &["zero is truthy"]);
    assert_output("print false and undefined_name;", &["false"]);
    assert_output("print true or undefined_name;", &["true"]);
    assert_output("print !nil; print !0;", &["true", "false"]);
}

#[test]
fn blocks_scope_and_shadow() {
    assert_output("let a = \"outer\";
                   {
                       let a = \"inner\";
                       print a;
                   }
                   print a;",
                  &["inner", "outer"]);
    assert_output("var x = 1; { x = 2; } print x;", &["2"]);
    assert_output("let x; print x;", &["null"]);
    assert_output("const c = 1; c = 2; print c;", &["2"]);
}

#[test]
fn control_flow() {
    assert_output("if (1 < 2) print \"yes\"; else print \"no\";", &["yes"]);
    assert_output("if (nil) print \"yes\"; else print \"no\";", &["no"]);
    assert_output("let i = 0; while (i < 3) { print i; i = i + 1; }", &["0", "1", "2"]);
    assert_output("for (let i = 0; i < 3; i = i + 1) print i;", &["0", "1", "2"]);
    assert_output("let n = 0; for (; n < 2;) n = n + 1; print n;", &["2"]);
}

#[test]
fn for_loop_variable_is_scoped_to_the_loop() {
    let error = runtime_error_of("for (let i = 0; i < 1; i = i + 1) {} print i;");
    assert_eq!(error,
               RuntimeError::UnknownVariable { name: "i".to_string(),
                                               line: 1, });
}

#[test]
fn functions_and_recursion() {
    assert_output("fun add(a, b) { return a + b; } print add(2, 3);", &["5"]);
    assert_output("fun fib(n) { if (n < 2) return n; return fib(n - 1) + fib(n - 2); }
                   print fib(15);",
                  &["610"]);
    assert_output("fun noop() {} print noop();", &["null"]);
    assert_output("fun f() { return; } print f();", &["null"]);
    assert_output("fun f() {} print f;", &["<fn f>"]);
    assert_output("print Math_abs;", &["<native fn Math_abs>"]);
}

#[test]
fn closures_capture_their_environment() {
    assert_output("fun makeCounter() {
                       let count = 0;
                       fun increment() {
                           count = count + 1;
                           return count;
                       }
                       return increment;
                   }
                   let counter = makeCounter();
                   counter();
                   counter();
                   print counter();
                   let other = makeCounter();
                   print other();",
                  &["3", "1"]);
}

#[test]
fn functions_are_first_class() {
    assert_output("fun twice(f, x) { return f(f(x)); }
                   fun inc(x) { return x + 1; }
                   print twice(inc, 5);",
                  &["7"]);
    assert_output("fun make() { fun inner() { return \"called\"; } return inner; }
                   print make()();",
                  &["called"]);
    assert_output("fun f() {} let g = f; print f == g;", &["true"]);
}

#[test]
fn return_inside_loops_leaves_the_function() {
    assert_output("fun first(limit) {
                       for (let i = 0; ; i = i + 1) {
                           if (i * i > limit) return i;
                       }
                   }
                   print first(50);",
                  &["8"]);
}

#[test]
fn top_level_return_ends_the_program() {
    assert_output("print 1; return; print 2;", &["1"]);
}

#[test]
fn math_builtins() {
    assert_output("print Math_sqrt(16);", &["4"]);
    assert_output("print Math_abs(-2.5);", &["2.5"]);
    assert_output("print Math_sin(0); print Math_cos(0);", &["0", "1"]);
    assert_output("print Math_PI;", &["3.141592653589793"]);
    assert_output("let r = Math_random(); print r >= 0 and r < 1;", &["true"]);
    assert_output("print time() > 0;", &["true"]);
}

#[test]
fn draw_rune_emits_events() {
    let (result, receiver) = channel_run("Sigil_drawRune(\"ᚠ\", 10, 20.5); print \"done\";");
    result.unwrap();

    let events: Vec<_> = receiver.try_iter().collect();
    assert_eq!(events,
               [Event::Rune(RuneEvent { glyph: "ᚠ".to_string(),
                                        x:     10.0,
                                        y:     20.5, }),
                Event::Output("done".to_string())]);
}

#[test]
fn print_statement_calls_whatever_print_resolves_to() {
    fn shout(context: &mut Context, args: &[Value], line: usize) -> Result<Value, RuntimeError> {
        let text = stringify(&args[0]).to_uppercase();
        print(context, &[Value::from(text)], line)
    }

    let program = compile("print \"quiet\";").unwrap();
    let (sender, receiver) = mpsc::channel();
    let mut context = Context::new(sender);
    let native = NativeFunction { name:  "print",
                                  arity: 1,
                                  func:  shout, };
    context.globals()
           .borrow_mut()
           .define("print", Value::Function(Rc::new(Function::Native(native))));

    context.run(&program).unwrap();
    assert_eq!(receiver.recv().unwrap(), Event::Output("QUIET".to_string()));
}

#[test]
fn print_is_reserved_in_scripts() {
    assert!(matches!(channel_run("fun print(x) { return x; }").0, Err(Error::Parse(_))));
    assert!(matches!(channel_run("let print = nil;").0, Err(Error::Parse(_))));
}

#[test]
fn builtins_cannot_be_reassigned() {
    assert!(matches!(runtime_error_of("Math_PI = 3;"),
                     RuntimeError::BuiltinReassignment { ref name, line: 1 } if name == "Math_PI"));
    assert!(matches!(runtime_error_of("fun f() { Math_sqrt = nil; }\nf();"),
                     RuntimeError::BuiltinReassignment { line: 1, .. }));
    assert_output("let Math_PI = 3; Math_PI = 4; print Math_PI;", &["4"]);
}

#[test]
fn runtime_errors() {
    assert_eq!(runtime_error_of("print x;"),
               RuntimeError::UnknownVariable { name: "x".to_string(),
                                               line: 1, });
    assert_eq!(runtime_error_of("y = 1;"),
               RuntimeError::UnknownVariable { name: "y".to_string(),
                                               line: 1, });
    assert_eq!(runtime_error_of("\n\nprint 1 / 0;"),
               RuntimeError::DivisionByZero { line: 3 });
    assert_eq!(runtime_error_of("print 1 % 0;"),
               RuntimeError::DivisionByZero { line: 1 });
    assert_eq!(runtime_error_of("print -\"a\";"),
               RuntimeError::ExpectedNumber { line: 1 });
    assert_eq!(runtime_error_of("print 1 < \"2\";"),
               RuntimeError::ExpectedNumber { line: 1 });
    assert_eq!(runtime_error_of("\"not a function\"();"),
               RuntimeError::NotCallable { line: 1 });
    assert_eq!(runtime_error_of("fun f(a) {} f(1, 2);"),
               RuntimeError::ArgumentCountMismatch { expected: 1,
                                                     found:    2,
                                                     line:     1, });
    assert_eq!(runtime_error_of("Math_sqrt();"),
               RuntimeError::ArgumentCountMismatch { expected: 1,
                                                     found:    0,
                                                     line:     1, });
    assert!(matches!(runtime_error_of("print true + nil;"),
                     RuntimeError::TypeError { line: 1, .. }));
}

#[test]
fn runtime_error_stops_execution() {
    let (result, receiver) = channel_run("print 1; print nope; print 2;");
    assert!(result.is_err());
    assert_eq!(receiver.try_iter().collect::<Vec<_>>(), [Event::Output("1".to_string())]);
}

#[test]
fn runtime_error_messages() {
    assert_eq!(runtime_error_of("print x;").to_string(),
               "Error on line 1: Undefined variable 'x'.");
    assert_eq!(runtime_error_of("fun f(a) {} f();").to_string(),
               "Error on line 1: Expected 1 arguments but got 0.");
}

#[test]
fn unbounded_recursion_is_a_stack_overflow() {
    let program = compile("fun down(n) { return down(n + 1); }\ndown(0);").unwrap();
    let mut context = Context::new(|_: Event| {}).with_max_call_depth(40);

    assert_eq!(context.run(&program),
               Err(RuntimeError::StackOverflow { limit: 40,
                                                 line:  1, }));
}

#[test]
fn call_depth_limit_allows_recursion_within_it() {
    let program = compile("fun sum(n) { if (n == 0) return 0; return n + sum(n - 1); }
                           print sum(30);").unwrap();
    let (sender, receiver) = mpsc::channel();
    let mut context = Context::new(sender).with_max_call_depth(40);

    context.run(&program).unwrap();
    assert_eq!(receiver.recv().unwrap(), Event::Output("465".to_string()));
}

#[test]
fn non_tail_recursion_reaches_the_default_call_depth() {
    let deepest = MAX_CALL_DEPTH - 1;
    let source = format!("fun count(n) {{ if (n == 0) return 0; return 1 + count(n - 1); }}
                          print count({deepest});");

    assert_output(&source, &[deepest.to_string().as_str()]);
}

#[test]
fn non_tail_recursion_past_the_default_call_depth_fails_cleanly() {
    let source = format!("fun count(n) {{ if (n == 0) return 0; return 1 + count(n - 1); }}
                          print count({MAX_CALL_DEPTH});");

    assert!(matches!(runtime_error_of(&source),
                     RuntimeError::StackOverflow { limit: MAX_CALL_DEPTH, .. }));
}

#[test]
fn deeply_nested_expressions_evaluate() {
    let depth = 2000;
    let source = format!("print {}1{};", "(".repeat(depth), ")".repeat(depth));
    assert_output(&source, &["1"]);

    let source = format!("print {}true;", "!".repeat(depth));
    assert_output(&source, &["true"]);
}

#[test]
fn deeply_nested_blocks_execute() {
    let depth = 1000;
    let source = format!("{}print 1;{}", "{".repeat(depth), "}".repeat(depth));
    assert_output(&source, &["1"]);
}

#[test]
fn dropping_a_context_releases_its_globals() {
    let program = compile("fun f() {} let x = 1; fun outer() { fun inner() {} return inner; }
                           let kept = outer();")
        .unwrap();
    let context_globals;
    {
        let mut context = Context::new(|_: Event| {});
        context.run(&program).unwrap();
        context_globals = Rc::downgrade(context.globals());
    }

    assert!(context_globals.upgrade().is_none());
}

#[test]
fn dropping_a_context_releases_closure_scopes() {
    let program = compile("fun counter() { let n = 0; fun next() { n = n + 1; return n; } return next; }
                           let tick = counter();
                           tick();")
        .unwrap();
    let mut context = Context::new(|_: Event| {});
    context.run(&program).unwrap();

    let tick = context.globals().borrow().get("tick").unwrap();
    let Value::Function(function) = tick else { panic!("tick is not a function") };
    let Function::User(user) = function.as_ref() else { panic!("tick is not user-defined") };
    let closure = Rc::downgrade(&user.closure);
    assert_eq!(closure.upgrade().unwrap().borrow().get("n"), Some(Value::Number(1.0)));

    drop(function);
    drop(context);
    assert!(closure.upgrade().is_none());
}

#[test]
fn context_keeps_globals_between_runs() {
    let (sender, receiver) = mpsc::channel();
    let mut context = Context::new(sender);

    context.run(&compile("let total = 40;").unwrap()).unwrap();
    context.run(&compile("total = total + 2; print total;").unwrap()).unwrap();

    assert_eq!(receiver.recv().unwrap(), Event::Output("42".to_string()));
    assert!(context.globals().borrow().contains_local("total"));
}

#[test]
fn compile_errors_prevent_execution() {
    let (result, receiver) = channel_run("print \"before\";\nlet = 3;");
    assert!(matches!(result, Err(Error::Parse(_))));
    assert_eq!(receiver.try_iter().count(), 0);

    let (result, _) = channel_run("print @;");
    assert!(matches!(result, Err(Error::Lex(_))));
}
