use crate::{
    ast::BinaryOperator,
    error::RuntimeError,
    interpreter::{
        evaluator::core::{Context, EvalResult},
        value::core::Value,
    },
};

impl Context {
    /// Evaluates a binary operation between two values.
    ///
    /// `+` adds two numbers, or concatenates when either operand is a string
    /// (the other operand is converted to its printed form). The remaining
    /// arithmetic and relational operators require numbers. Equality works
    /// on every type; values of different types are never equal.
    ///
    /// # Errors
    /// - `ExpectedNumber` for a non-numeric operand of `- * / % < <= > >=`.
    /// - `TypeError` for `+` on operands that are neither both numbers nor
    ///   involve a string.
    /// - `DivisionByZero` when the right operand of `/` or `%` is zero.
    ///
    /// # Example
    /// ```
    /// use arcanesigil::{
    ///     ast::BinaryOperator,
    ///     interpreter::{evaluator::core::Context, value::core::Value},
    /// };
    ///
    /// let sum = Context::eval_binary(BinaryOperator::Add, &Value::Number(3.0), &Value::Number(4.0), 1).unwrap();
    /// assert_eq!(sum, Value::Number(7.0));
    ///
    /// let text = Context::eval_binary(BinaryOperator::Add, &Value::from("n = "), &Value::Number(5.0), 1).unwrap();
    /// assert_eq!(text, Value::from("n = 5"));
    ///
    /// assert!(Context::eval_binary(BinaryOperator::Div, &Value::Number(1.0), &Value::Number(0.0), 1).is_err());
    ///
    /// let less = Context::eval_binary(BinaryOperator::Less, &Value::Number(3.0), &Value::Number(5.0), 1).unwrap();
    /// assert_eq!(less, Value::Bool(true));
    /// ```
    pub fn eval_binary(op: BinaryOperator,
                       left: &Value,
                       right: &Value,
                       line: usize)
                       -> EvalResult<Value> {
        use BinaryOperator::{
            Add, Div, Equal, Greater, GreaterEqual, Less, LessEqual, Mod, Mul, NotEqual, Sub,
        };

        match op {
            Add => Self::eval_add(left, right, line),
            Sub => Self::numbers(left, right, line).map(|(a, b)| Value::Number(a - b)),
            Mul => Self::numbers(left, right, line).map(|(a, b)| Value::Number(a * b)),
            Div => Self::divisor(left, right, line).map(|(a, b)| Value::Number(a / b)),
            // Truncated remainder: the result takes the sign of the dividend.
            Mod => Self::divisor(left, right, line).map(|(a, b)| Value::Number(a % b)),
            Less => Self::numbers(left, right, line).map(|(a, b)| Value::Bool(a < b)),
            LessEqual => Self::numbers(left, right, line).map(|(a, b)| Value::Bool(a <= b)),
            Greater => Self::numbers(left, right, line).map(|(a, b)| Value::Bool(a > b)),
            GreaterEqual => Self::numbers(left, right, line).map(|(a, b)| Value::Bool(a >= b)),
            Equal => Ok(Value::Bool(left == right)),
            NotEqual => Ok(Value::Bool(left != right)),
        }
    }

    fn eval_add(left: &Value, right: &Value, line: usize) -> EvalResult<Value> {
        match (left, right) {
            (Value::Number(a), Value::Number(b)) => Ok(Value::Number(a + b)),
            (Value::Str(_), _) | (_, Value::Str(_)) => Ok(Value::from(format!("{left}{right}"))),
            _ => {
                Err(RuntimeError::TypeError { details: format!("Cannot add {} and {}",
                                                               left.type_name(),
                                                               right.type_name()),
                                              line })
            },
        }
    }

    /// Both operands as numbers, left first.
    fn numbers(left: &Value, right: &Value, line: usize) -> EvalResult<(f64, f64)> {
        Ok((left.as_number(line)?, right.as_number(line)?))
    }

    /// Like [`Self::numbers`], rejecting a zero right operand.
    fn divisor(left: &Value, right: &Value, line: usize) -> EvalResult<(f64, f64)> {
        let (a, b) = Self::numbers(left, right, line)?;
        if b == 0.0 {
            return Err(RuntimeError::DivisionByZero { line });
        }
        Ok((a, b))
    }
}
