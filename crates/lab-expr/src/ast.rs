//! AST de fórmulas.
//!
//! El árbol es mínimo: literales numéricos, rutas con punto (`self.x`,
//! `root.g.y`, o un nombre suelto como `pi`), operadores unarios/binarios
//! y llamadas a funciones predefinidas. `Display` reconstruye una forma
//! textual re-parseable, con paréntesis sólo donde la precedencia lo exige.

use std::fmt;

/// Operador binario.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOp {
    Add,
    Sub,
    Mul,
    Div,
    Mod,
    Pow,
}

impl BinaryOp {
    /// Precedencia: más alto liga más fuerte.
    pub(crate) fn precedence(self) -> u8 {
        match self {
            BinaryOp::Add | BinaryOp::Sub => 40,
            BinaryOp::Mul | BinaryOp::Div | BinaryOp::Mod => 50,
            BinaryOp::Pow => 60,
        }
    }

    fn symbol(self) -> &'static str {
        match self {
            BinaryOp::Add => "+",
            BinaryOp::Sub => "-",
            BinaryOp::Mul => "*",
            BinaryOp::Div => "/",
            BinaryOp::Mod => "%",
            BinaryOp::Pow => "^",
        }
    }
}

/// Operador unario (sólo negación).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnaryOp {
    Neg,
}

/// Expresión simbólica parseada.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    /// Literal numérico.
    Number(f64),
    /// Ruta con punto; un nombre suelto es una ruta de un segmento.
    Path(Vec<String>),
    /// Negación unaria.
    Unary { op: UnaryOp, operand: Box<Expr> },
    /// Operación binaria.
    Binary {
        op: BinaryOp,
        left: Box<Expr>,
        right: Box<Expr>,
    },
    /// Llamada a función predefinida (`sqrt(x)`, `min(a, b)`, ...).
    Call { name: String, args: Vec<Expr> },
}

impl Expr {
    /// Rutas referenciadas por la expresión, en orden de aparición.
    pub fn paths(&self) -> Vec<Vec<String>> {
        let mut out = Vec::new();
        self.collect_paths(&mut out);
        out
    }

    fn collect_paths(&self, out: &mut Vec<Vec<String>>) {
        match self {
            Expr::Number(_) => {}
            Expr::Path(segments) => out.push(segments.clone()),
            Expr::Unary { operand, .. } => operand.collect_paths(out),
            Expr::Binary { left, right, .. } => {
                left.collect_paths(out);
                right.collect_paths(out);
            }
            Expr::Call { args, .. } => {
                for arg in args {
                    arg.collect_paths(out);
                }
            }
        }
    }

    fn precedence(&self) -> u8 {
        match self {
            Expr::Binary { op, .. } => op.precedence(),
            Expr::Unary { .. } => 55,
            _ => u8::MAX,
        }
    }
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expr::Number(n) => write!(f, "{n}"),
            Expr::Path(segments) => write!(f, "{}", segments.join(".")),
            Expr::Unary { operand, .. } => {
                if operand.precedence() < 55 {
                    write!(f, "-({operand})")
                } else {
                    write!(f, "-{operand}")
                }
            }
            Expr::Binary { op, left, right } => {
                // El hijo derecho de un operador asociativo a izquierda
                // necesita paréntesis también en empate de precedencia;
                // para `^` (asociativo a derecha) es al revés.
                let left_needs_parens = left.precedence() < op.precedence()
                                        || (left.precedence() == op.precedence() && *op == BinaryOp::Pow);
                if left_needs_parens {
                    write!(f, "({left})")?;
                } else {
                    write!(f, "{left}")?;
                }
                write!(f, " {} ", op.symbol())?;
                if right.precedence() <= op.precedence() && *op != BinaryOp::Pow {
                    write!(f, "({right})")
                } else {
                    write!(f, "{right}")
                }
            }
            Expr::Call { name, args } => {
                write!(f, "{name}(")?;
                for (i, arg) in args.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{arg}")?;
                }
                write!(f, ")")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::parser::parse_expr;

    #[test]
    fn display_roundtrips_through_parser() {
        for src in ["a + b * c", "(a + b) * c", "-x ^ 2", "min(a, b) / 2"] {
            let expr = parse_expr(src).unwrap();
            let rendered = expr.to_string();
            let reparsed = parse_expr(&rendered).unwrap();
            assert_eq!(expr, reparsed, "render inestable para '{src}': '{rendered}'");
        }
    }

    #[test]
    fn paths_are_collected_in_order() {
        let expr = parse_expr("self.a + root.g.b * c").unwrap();
        assert_eq!(expr.paths(),
                   vec![vec!["self".to_string(), "a".to_string()],
                        vec!["root".to_string(), "g".to_string(), "b".to_string()],
                        vec!["c".to_string()],]);
    }
}
