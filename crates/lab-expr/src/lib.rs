//! lab-expr: motor de expresiones simbólicas para parámetros de trabajo.
//!
//! Provee el análisis léxico/sintáctico y la evaluación de fórmulas
//! aritméticas de parámetros (`self.channel_radius * 3`, `sqrt(pi)`, etc.).
//! El evaluador opera sobre un entorno explícito (`Scope`), nunca sobre
//! reflexión del lenguaje: las referencias con punto (`self.x`, `root.g.y`)
//! las resuelve quien implemente el trait.
pub mod ast;
pub mod error;
pub mod eval;
pub mod lexer;
pub mod parser;

pub use ast::{BinaryOp, Expr, UnaryOp};
pub use error::{EvalError, ParseError};
pub use eval::{evaluate, evaluate_str, EmptyScope, EvalStrError, Scope};
pub use lexer::Token;
pub use parser::parse_expr;
