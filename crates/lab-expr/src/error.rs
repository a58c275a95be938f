//! Errores del motor de expresiones.

use thiserror::Error;

/// Fallos de análisis léxico/sintáctico de una fórmula.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("token inválido '{text}' en la posición {pos}")]
    InvalidToken { text: String, pos: usize },
    #[error("fin inesperado de la expresión")]
    UnexpectedEof,
    #[error("token inesperado '{found}' (se esperaba {expected})")]
    UnexpectedToken { found: String, expected: &'static str },
    #[error("expresión vacía")]
    Empty,
}

/// Fallos de evaluación de una expresión ya parseada.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum EvalError {
    #[error("variable no definida '{name}'")]
    UndefinedVariable { name: String },
    #[error("función desconocida '{name}'")]
    UnknownFunction { name: String },
    #[error("la función '{name}' espera {expected} argumento(s), recibió {got}")]
    WrongArity {
        name: String,
        expected: usize,
        got: usize,
    },
    /// Emitido por implementaciones de `Scope` cuando la ruta existe pero
    /// su valor no es numérico.
    #[error("la referencia '{name}' no tiene valor numérico")]
    NotNumeric { name: String },
    /// Emitido por implementaciones de `Scope` al detectar un ciclo de
    /// referencias entre atributos.
    #[error("referencia circular a través de '{name}'")]
    Circular { name: String },
}
