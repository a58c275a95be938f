//! Valor etiquetado de un atributo de parámetros.
//!
//! El rediseño del patrón de origen (inyección reflexiva de atributos)
//! es un mapa de nombre a valor etiquetado: `Scalar` conserva el escalar
//! JSON crudo, `Symbolic` guarda la expresión parseada de un valor con
//! marcador `"sy."`, y `Null` representa el centinela textual `"None"`.

use lab_expr::Expr;
use serde_json::Value;

/// Marcador que señala una expresión simbólica dentro de un string.
pub const SYMBOLIC_MARKER: &str = "sy.";

/// Centinela textual que materializa como valor ausente.
pub const NONE_SENTINEL: &str = "None";

#[derive(Debug, Clone, PartialEq)]
pub enum ParamValue {
    /// Valor ausente (el string literal `"None"` en el archivo).
    Null,
    /// Escalar JSON crudo (número, string sin marcador, booleano).
    Scalar(Value),
    /// Expresión simbólica parseada (string con marcador `"sy."`).
    Symbolic(Expr),
}

impl ParamValue {
    /// Clasifica un escalar JSON crudo. Un string que contiene el marcador
    /// `"sy."` se parsea como expresión tras quitar todas las apariciones
    /// del marcador; el string `"None"` se vuelve `Null`; el resto queda
    /// como escalar. Sólo la forma con marcador es simbólica: `"a+b"` a
    /// secas es un string común.
    pub fn from_raw(raw: &Value) -> Result<Self, lab_expr::ParseError> {
        if let Value::String(text) = raw {
            if text == NONE_SENTINEL {
                return Ok(ParamValue::Null);
            }
            if text.contains(SYMBOLIC_MARKER) {
                let stripped = text.replace(SYMBOLIC_MARKER, "");
                return Ok(ParamValue::Symbolic(lab_expr::parse_expr(&stripped)?));
            }
        }
        Ok(ParamValue::Scalar(raw.clone()))
    }

    pub fn is_null(&self) -> bool {
        matches!(self, ParamValue::Null)
    }

    /// Valor numérico, si el atributo es un escalar numérico.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            ParamValue::Scalar(Value::Number(n)) => n.as_f64(),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            ParamValue::Scalar(Value::String(s)) => Some(s),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            ParamValue::Scalar(Value::Bool(b)) => Some(*b),
            _ => None,
        }
    }

    /// Expresión simbólica, si el atributo la tiene.
    pub fn as_expr(&self) -> Option<&Expr> {
        match self {
            ParamValue::Symbolic(expr) => Some(expr),
            _ => None,
        }
    }
}

impl std::fmt::Display for ParamValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ParamValue::Null => write!(f, "null"),
            ParamValue::Scalar(value) => write!(f, "{value}"),
            ParamValue::Symbolic(expr) => write!(f, "sy.{expr}"),
        }
    }
}
