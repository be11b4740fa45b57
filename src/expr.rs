// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Compiles iteration functions written as text.
//!
//! The language is a single expression over `z` and `c`.  Both infix
//! arithmetic and method chains are understood, so these are the same
//! Mandelbrot step:
//!
//! ```text
//! z^2 + c
//! return z.square().add(c);
//! ```
//!
//! Available operations: `+ - * /`, unary `-`, `^n` for a non-negative
//! integer `n`, and the methods `add`, `subtract`, `multiply`,
//! `divide`, `negative` (or `negate`), `square`, `sqrt`, `abs`, `sin`,
//! `cos`.  Each method may also be called as a function with its
//! receiver as the first argument, as in `sin(z)` or `add(z, c)`.
//! Literals are reals (`0.5`, `1e-3`), imaginaries (`2i`), the
//! constants `i`, `pi` and `Complex.ZERO|ONE|I|PI`, quoted complex
//! strings (`"2+3i"`), and `Complex(a, b)` (optionally preceded by
//! `new`), which is a + b·i.
//!
//! Everything is resolved when the text is compiled; evaluating the
//! result cannot fail.

use crate::complex::{self, Complex};
use crate::errors::FractalError;
use crate::escape::IterationFn;
use log::debug;
use pest::iterators::Pair;
use pest::Parser;

mod grammar {
    use pest_derive::Parser;

    #[derive(Parser)]
    #[grammar = "expr.pest"]
    pub struct ExprParser;
}

use self::grammar::{ExprParser, Rule};

#[derive(Copy, Clone, Debug, PartialEq)]
enum Unary {
    Negate,
    Square,
    Sqrt,
    Abs,
    Sin,
    Cos,
}

impl Unary {
    fn apply(self, z: Complex) -> Complex {
        match self {
            Unary::Negate => -z,
            Unary::Square => z.square(),
            Unary::Sqrt => z.sqrt(),
            Unary::Abs => z.abs(),
            Unary::Sin => z.sin(),
            Unary::Cos => z.cos(),
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq)]
enum Binary {
    Add,
    Subtract,
    Multiply,
    Divide,
}

impl Binary {
    fn apply(self, left: Complex, right: Complex) -> Complex {
        match self {
            Binary::Add => left + right,
            Binary::Subtract => left - right,
            Binary::Multiply => left * right,
            Binary::Divide => left / right,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
enum Expr {
    Z,
    C,
    Constant(Complex),
    Unary(Unary, Box<Expr>),
    Binary(Binary, Box<Expr>, Box<Expr>),
    Power(Box<Expr>, u32),
}

impl Expr {
    fn eval(&self, z: Complex, c: Complex) -> Complex {
        match self {
            Expr::Z => z,
            Expr::C => c,
            Expr::Constant(k) => *k,
            Expr::Unary(op, arg) => op.apply(arg.eval(z, c)),
            Expr::Binary(op, left, right) => op.apply(left.eval(z, c), right.eval(z, c)),
            Expr::Power(_, 0) => complex::ONE,
            Expr::Power(base, n) => {
                let base = base.eval(z, c);
                (1..*n).fold(base, |acc, _| acc * base)
            }
        }
    }
}

/// An iteration function compiled from its source text.
#[derive(Clone, Debug)]
pub struct CompiledFunction {
    source: String,
    body: Expr,
}

impl CompiledFunction {
    /// Compiles `source`.  Text that doesn't parse, or that names an
    /// unknown variable or method, is a `FunctionSyntax` error; a
    /// quoted literal that isn't a complex number is a `Conversion`
    /// error.
    pub fn compile(source: &str) -> Result<CompiledFunction, FractalError> {
        let mut pairs = ExprParser::parse(Rule::program, source)
            .map_err(|e| FractalError::FunctionSyntax(e.to_string()))?;
        let body = pairs
            .next()
            .and_then(|program| program.into_inner().find(|p| p.as_rule() == Rule::expr))
            .ok_or_else(|| syntax("empty function"))?;
        let body = build(body)?;
        debug!("compiled iteration function {:?} as {:?}", source, body);
        Ok(CompiledFunction {
            source: source.to_string(),
            body,
        })
    }

    /// The text this function was compiled from.
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Evaluates one step.
    pub fn eval(&self, z: Complex, c: Complex) -> Complex {
        self.body.eval(z, c)
    }
}

impl IterationFn for CompiledFunction {
    fn apply(&self, z: Complex, c: Complex) -> Result<Complex, FractalError> {
        Ok(self.eval(z, c))
    }
}

fn syntax<S: Into<String>>(message: S) -> FractalError {
    FractalError::FunctionSyntax(message.into())
}

fn build(pair: Pair<Rule>) -> Result<Expr, FractalError> {
    match pair.as_rule() {
        Rule::expr | Rule::term => build_chain(pair),
        Rule::factor => build_factor(pair),
        Rule::power => build_power(pair),
        Rule::postfix => build_postfix(pair),
        Rule::constructor => build_constructor(pair),
        Rule::constant => {
            let name = pair
                .into_inner()
                .next()
                .ok_or_else(|| syntax("Complex. needs a constant name"))?;
            constant(name.as_str())
                .map(Expr::Constant)
                .ok_or_else(|| syntax(format!("unknown constant Complex.{}", name.as_str())))
        }
        Rule::call => build_call(pair),
        Rule::number => number(pair.as_str()).map(|v| Expr::Constant(Complex::from(v))),
        Rule::imaginary => {
            let text = pair.as_str();
            number(&text[..text.len() - 1]).map(|v| Expr::Constant(Complex::new(0.0, v)))
        }
        Rule::string => {
            let text = pair.as_str();
            Ok(Expr::Constant(text[1..text.len() - 1].parse()?))
        }
        Rule::ident => variable(pair.as_str()),
        r => Err(syntax(format!("unexpected {:?}", r))),
    }
}

/// Left-associative `a op b op c ...`, for both precedence levels.
fn build_chain(pair: Pair<Rule>) -> Result<Expr, FractalError> {
    let mut inner = pair.into_inner();
    let first = inner.next().ok_or_else(|| syntax("empty expression"))?;
    let mut acc = build(first)?;
    while let Some(op) = inner.next() {
        let op = match op.as_str() {
            "+" => Binary::Add,
            "-" => Binary::Subtract,
            "*" => Binary::Multiply,
            "/" => Binary::Divide,
            other => return Err(syntax(format!("unknown operator {}", other))),
        };
        let rhs = inner
            .next()
            .ok_or_else(|| syntax("operator without a right-hand side"))?;
        acc = Expr::Binary(op, Box::new(acc), Box::new(build(rhs)?));
    }
    Ok(acc)
}

fn build_factor(pair: Pair<Rule>) -> Result<Expr, FractalError> {
    let mut negations = 0;
    let mut operand = None;
    for part in pair.into_inner() {
        match part.as_rule() {
            Rule::neg => negations += 1,
            _ => operand = Some(build(part)?),
        }
    }
    let mut expr = operand.ok_or_else(|| syntax("negation without an operand"))?;
    for _ in 0..negations {
        expr = Expr::Unary(Unary::Negate, Box::new(expr));
    }
    Ok(expr)
}

fn build_power(pair: Pair<Rule>) -> Result<Expr, FractalError> {
    let mut inner = pair.into_inner();
    let base = build(inner.next().ok_or_else(|| syntax("missing operand"))?)?;
    match inner.next() {
        Some(exponent) => {
            let n = exponent
                .as_str()
                .parse::<u32>()
                .map_err(|_| syntax(format!("exponent {} is too large", exponent.as_str())))?;
            Ok(Expr::Power(Box::new(base), n))
        }
        None => Ok(base),
    }
}

fn build_postfix(pair: Pair<Rule>) -> Result<Expr, FractalError> {
    let mut inner = pair.into_inner();
    let mut receiver = build(inner.next().ok_or_else(|| syntax("missing operand"))?)?;
    for method in inner {
        let mut parts = method.into_inner();
        let name = parts.next().ok_or_else(|| syntax("missing method name"))?;
        let args = build_args(parts.next())?;
        receiver = apply_named(name.as_str(), receiver, args)?;
    }
    Ok(receiver)
}

fn build_call(pair: Pair<Rule>) -> Result<Expr, FractalError> {
    let mut parts = pair.into_inner();
    let name = parts.next().ok_or_else(|| syntax("missing function name"))?;
    let mut args = build_args(parts.next())?;
    if args.is_empty() {
        return Err(syntax(format!("{}() needs an argument", name.as_str())));
    }
    let receiver = args.remove(0);
    apply_named(name.as_str(), receiver, args)
}

/// `Complex(a, b)` is a + b·i; fewer arguments default to zero.
fn build_constructor(pair: Pair<Rule>) -> Result<Expr, FractalError> {
    let args = build_args(pair.into_inner().find(|p| p.as_rule() == Rule::args))?;
    let mut args = args.into_iter();
    match (args.next(), args.next(), args.next()) {
        (None, _, _) => Ok(Expr::Constant(complex::ZERO)),
        (Some(a), None, _) => Ok(a),
        (Some(a), Some(b), None) => {
            let imaginary = Expr::Binary(
                Binary::Multiply,
                Box::new(b),
                Box::new(Expr::Constant(complex::I)),
            );
            Ok(Expr::Binary(Binary::Add, Box::new(a), Box::new(imaginary)))
        }
        _ => Err(syntax("Complex() takes at most two arguments")),
    }
}

fn build_args(pair: Option<Pair<Rule>>) -> Result<Vec<Expr>, FractalError> {
    match pair {
        Some(args) => args.into_inner().map(build).collect(),
        None => Ok(vec![]),
    }
}

fn apply_named(name: &str, receiver: Expr, mut args: Vec<Expr>) -> Result<Expr, FractalError> {
    let unary = match name {
        "negative" | "negate" => Some(Unary::Negate),
        "square" => Some(Unary::Square),
        "sqrt" => Some(Unary::Sqrt),
        "abs" => Some(Unary::Abs),
        "sin" => Some(Unary::Sin),
        "cos" => Some(Unary::Cos),
        _ => None,
    };
    if let Some(op) = unary {
        if !args.is_empty() {
            return Err(syntax(format!("{} takes no arguments", name)));
        }
        return Ok(Expr::Unary(op, Box::new(receiver)));
    }

    let op = match name {
        "add" => Binary::Add,
        "subtract" => Binary::Subtract,
        "multiply" => Binary::Multiply,
        "divide" => Binary::Divide,
        _ => return Err(syntax(format!("unknown function {}", name))),
    };
    if args.len() != 1 {
        return Err(syntax(format!("{} takes exactly one argument", name)));
    }
    Ok(Expr::Binary(op, Box::new(receiver), Box::new(args.remove(0))))
}

fn variable(name: &str) -> Result<Expr, FractalError> {
    match name {
        "z" => Ok(Expr::Z),
        "c" => Ok(Expr::C),
        "i" => Ok(Expr::Constant(complex::I)),
        "pi" => Ok(Expr::Constant(complex::PI)),
        _ => Err(syntax(format!("unknown variable {}", name))),
    }
}

fn constant(name: &str) -> Option<Complex> {
    match name {
        "ZERO" => Some(complex::ZERO),
        "ONE" => Some(complex::ONE),
        "I" => Some(complex::I),
        "PI" => Some(complex::PI),
        _ => None,
    }
}

fn number(text: &str) -> Result<f64, FractalError> {
    text.parse::<f64>()
        .map_err(|_| syntax(format!("{} is not a number", text)))
}
