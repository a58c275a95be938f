//! Evaluación de expresiones sobre un entorno explícito.
//!
//! El trait `Scope` es la costura con el mundo exterior: resuelve rutas
//! con punto a valores `f64`. Las funciones y constantes predefinidas
//! viven en tablas `Lazy` y no dependen del entorno.

use std::collections::HashMap;

use once_cell::sync::Lazy;

use crate::ast::{BinaryOp, Expr, UnaryOp};
use crate::error::{EvalError, ParseError};
use crate::parser::parse_expr;

/// Entorno de evaluación: resuelve rutas (`self.x`, `root.g.y`, `x`).
pub trait Scope {
    fn resolve(&self, path: &[String]) -> Result<f64, EvalError>;
}

/// Entorno sin variables; sirve para aritmética pura y constantes.
pub struct EmptyScope;

impl Scope for EmptyScope {
    fn resolve(&self, path: &[String]) -> Result<f64, EvalError> {
        Err(EvalError::UndefinedVariable { name: path.join(".") })
    }
}

/// Función predefinida según aridad.
enum Builtin {
    Unary(fn(f64) -> f64),
    Binary(fn(f64, f64) -> f64),
}

static BUILTINS: Lazy<HashMap<&'static str, Builtin>> = Lazy::new(|| {
    let mut table: HashMap<&'static str, Builtin> = HashMap::new();
    table.insert("sin", Builtin::Unary(f64::sin));
    table.insert("cos", Builtin::Unary(f64::cos));
    table.insert("tan", Builtin::Unary(f64::tan));
    table.insert("sqrt", Builtin::Unary(f64::sqrt));
    table.insert("abs", Builtin::Unary(f64::abs));
    table.insert("exp", Builtin::Unary(f64::exp));
    // `log` natural, como en el motor simbólico de origen; `ln` es alias.
    table.insert("log", Builtin::Unary(f64::ln));
    table.insert("ln", Builtin::Unary(f64::ln));
    table.insert("floor", Builtin::Unary(f64::floor));
    table.insert("ceil", Builtin::Unary(f64::ceil));
    table.insert("round", Builtin::Unary(f64::round));
    table.insert("min", Builtin::Binary(f64::min));
    table.insert("max", Builtin::Binary(f64::max));
    table.insert("pow", Builtin::Binary(f64::powf));
    table
});

static CONSTANTS: Lazy<HashMap<&'static str, f64>> = Lazy::new(|| {
    let mut table = HashMap::new();
    table.insert("pi", std::f64::consts::PI);
    table.insert("tau", std::f64::consts::TAU);
    table.insert("e", std::f64::consts::E);
    table
});

/// Evalúa una expresión parseada contra un entorno.
pub fn evaluate(expr: &Expr, scope: &dyn Scope) -> Result<f64, EvalError> {
    match expr {
        Expr::Number(n) => Ok(*n),
        Expr::Path(segments) => resolve_path(segments, scope),
        Expr::Unary { op: UnaryOp::Neg, operand } => Ok(-evaluate(operand, scope)?),
        Expr::Binary { op, left, right } => {
            let l = evaluate(left, scope)?;
            let r = evaluate(right, scope)?;
            Ok(apply_binary(*op, l, r))
        }
        Expr::Call { name, args } => call_builtin(name, args, scope),
    }
}

/// Conveniencia: parsea y evalúa en un paso.
pub fn evaluate_str(input: &str, scope: &dyn Scope) -> Result<f64, EvalStrError> {
    let expr = parse_expr(input)?;
    Ok(evaluate(&expr, scope)?)
}

/// Error combinado de `evaluate_str`.
#[derive(Debug, thiserror::Error, Clone, PartialEq, Eq)]
pub enum EvalStrError {
    #[error(transparent)]
    Parse(#[from] ParseError),
    #[error(transparent)]
    Eval(#[from] EvalError),
}

fn resolve_path(segments: &[String], scope: &dyn Scope) -> Result<f64, EvalError> {
    match scope.resolve(segments) {
        Ok(value) => Ok(value),
        Err(err) => {
            // Un nombre suelto que el entorno no conoce puede ser constante.
            if segments.len() == 1 {
                if let Some(value) = CONSTANTS.get(segments[0].as_str()) {
                    return Ok(*value);
                }
            }
            Err(err)
        }
    }
}

fn apply_binary(op: BinaryOp, l: f64, r: f64) -> f64 {
    match op {
        BinaryOp::Add => l + r,
        BinaryOp::Sub => l - r,
        BinaryOp::Mul => l * r,
        BinaryOp::Div => l / r,
        BinaryOp::Mod => l % r,
        BinaryOp::Pow => l.powf(r),
    }
}

fn call_builtin(name: &str, args: &[Expr], scope: &dyn Scope) -> Result<f64, EvalError> {
    let builtin = BUILTINS.get(name)
                          .ok_or_else(|| EvalError::UnknownFunction { name: name.to_string() })?;
    match builtin {
        Builtin::Unary(f) => {
            if args.len() != 1 {
                return Err(EvalError::WrongArity { name: name.to_string(),
                                                   expected: 1,
                                                   got: args.len() });
            }
            Ok(f(evaluate(&args[0], scope)?))
        }
        Builtin::Binary(f) => {
            if args.len() != 2 {
                return Err(EvalError::WrongArity { name: name.to_string(),
                                                   expected: 2,
                                                   got: args.len() });
            }
            Ok(f(evaluate(&args[0], scope)?, evaluate(&args[1], scope)?))
        }
    }
}
