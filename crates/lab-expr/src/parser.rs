//! Parser descendente recursivo con precedencia (Pratt) sobre los tokens
//! del lexer. Sin genéricos ni combinadores: una tabla de precedencias es
//! la única fuente de verdad para los operadores binarios.

use crate::ast::{BinaryOp, Expr, UnaryOp};
use crate::error::ParseError;
use crate::lexer::{tokenize, Token};

/// Cursor sobre la lista de tokens.
struct TokenStream {
    tokens: Vec<Token>,
    pos: usize,
}

impl TokenStream {
    fn new(tokens: Vec<Token>) -> Self {
        Self { tokens, pos: 0 }
    }

    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.pos)
    }

    fn advance(&mut self) -> Option<Token> {
        let token = self.tokens.get(self.pos).cloned();
        if token.is_some() {
            self.pos += 1;
        }
        token
    }

    fn expect(&mut self, expected: &Token, description: &'static str) -> Result<(), ParseError> {
        match self.advance() {
            Some(ref token) if token == expected => Ok(()),
            Some(token) => Err(ParseError::UnexpectedToken { found: token.to_string(),
                                                             expected: description }),
            None => Err(ParseError::UnexpectedEof),
        }
    }

}

/// Asociatividad de un operador binario.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Assoc {
    Left,
    Right,
}

/// Metadatos del operador binario: (precedencia, asociatividad, operador).
fn binary_op_info(token: &Token) -> Option<(u8, Assoc, BinaryOp)> {
    match token {
        Token::Plus => Some((40, Assoc::Left, BinaryOp::Add)),
        Token::Minus => Some((40, Assoc::Left, BinaryOp::Sub)),
        Token::Star => Some((50, Assoc::Left, BinaryOp::Mul)),
        Token::Slash => Some((50, Assoc::Left, BinaryOp::Div)),
        Token::Percent => Some((50, Assoc::Left, BinaryOp::Mod)),
        Token::Caret => Some((60, Assoc::Right, BinaryOp::Pow)),
        _ => None,
    }
}

/// Parsea una fórmula completa. Falla si queda entrada sin consumir.
pub fn parse_expr(input: &str) -> Result<Expr, ParseError> {
    let tokens = tokenize(input)?;
    if tokens.is_empty() {
        return Err(ParseError::Empty);
    }
    let mut stream = TokenStream::new(tokens);
    let expr = parse_pratt(&mut stream, 0)?;
    match stream.peek() {
        None => Ok(expr),
        Some(token) => Err(ParseError::UnexpectedToken { found: token.to_string(),
                                                         expected: "fin de la expresión" }),
    }
}

/// Núcleo Pratt: escalada de precedencia para operadores binarios.
fn parse_pratt(stream: &mut TokenStream, min_prec: u8) -> Result<Expr, ParseError> {
    let mut left = parse_prefix(stream)?;

    while let Some(token) = stream.peek() {
        let Some((prec, assoc, op)) = binary_op_info(token) else {
            break;
        };
        if prec < min_prec {
            break;
        }
        stream.advance();

        let next_prec = if assoc == Assoc::Left { prec + 1 } else { prec };
        let right = parse_pratt(stream, next_prec)?;
        left = Expr::Binary { op,
                              left: Box::new(left),
                              right: Box::new(right) };
    }

    Ok(left)
}

/// Prefijos: negación unaria o átomo. El operando de la negación se parsea
/// a la precedencia de `^`: la potencia liga más fuerte que el menos
/// unario, así `-2^2` es `-(2^2)` como en el motor simbólico de origen.
fn parse_prefix(stream: &mut TokenStream) -> Result<Expr, ParseError> {
    if let Some(Token::Minus) = stream.peek() {
        stream.advance();
        let operand = parse_pratt(stream, 60)?;
        return Ok(Expr::Unary { op: UnaryOp::Neg,
                                operand: Box::new(operand) });
    }
    parse_atom(stream)
}

/// Átomos: número, paréntesis, llamada a función o ruta con punto.
fn parse_atom(stream: &mut TokenStream) -> Result<Expr, ParseError> {
    match stream.advance() {
        Some(Token::Number(n)) => Ok(Expr::Number(n)),
        Some(Token::LParen) => {
            let inner = parse_pratt(stream, 0)?;
            stream.expect(&Token::RParen, "')'")?;
            Ok(inner)
        }
        Some(Token::Ident(name)) => match stream.peek() {
            // `nombre(` es una llamada; una ruta nunca lleva paréntesis.
            Some(Token::LParen) => {
                stream.advance();
                let args = parse_call_args(stream)?;
                Ok(Expr::Call { name, args })
            }
            Some(Token::Dot) => parse_path_rest(stream, name),
            _ => Ok(Expr::Path(vec![name])),
        },
        Some(token) => Err(ParseError::UnexpectedToken { found: token.to_string(),
                                                         expected: "número, identificador o '('" }),
        None => Err(ParseError::UnexpectedEof),
    }
}

/// Segmentos restantes de una ruta `a.b.c`.
fn parse_path_rest(stream: &mut TokenStream, first: String) -> Result<Expr, ParseError> {
    let mut segments = vec![first];
    while let Some(Token::Dot) = stream.peek() {
        stream.advance();
        match stream.advance() {
            Some(Token::Ident(segment)) => segments.push(segment),
            Some(token) => {
                return Err(ParseError::UnexpectedToken { found: token.to_string(),
                                                         expected: "identificador tras '.'" })
            }
            None => return Err(ParseError::UnexpectedEof),
        }
    }
    Ok(Expr::Path(segments))
}

/// Lista de argumentos hasta `)`; admite llamada sin argumentos.
fn parse_call_args(stream: &mut TokenStream) -> Result<Vec<Expr>, ParseError> {
    let mut args = Vec::new();
    if let Some(Token::RParen) = stream.peek() {
        stream.advance();
        return Ok(args);
    }
    loop {
        args.push(parse_pratt(stream, 0)?);
        match stream.advance() {
            Some(Token::Comma) => continue,
            Some(Token::RParen) => break,
            Some(token) => {
                return Err(ParseError::UnexpectedToken { found: token.to_string(),
                                                         expected: "',' o ')'" })
            }
            None => return Err(ParseError::UnexpectedEof),
        }
    }
    Ok(args)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn precedence_mul_over_add() {
        let expr = parse_expr("a + b * c").unwrap();
        match expr {
            Expr::Binary { op: BinaryOp::Add, right, .. } => {
                assert!(matches!(*right, Expr::Binary { op: BinaryOp::Mul, .. }));
            }
            other => panic!("árbol inesperado: {other:?}"),
        }
    }

    #[test]
    fn pow_is_right_associative() {
        let expr = parse_expr("2 ^ 3 ^ 2").unwrap();
        match expr {
            Expr::Binary { op: BinaryOp::Pow, left, right } => {
                assert_eq!(*left, Expr::Number(2.0));
                assert!(matches!(*right, Expr::Binary { op: BinaryOp::Pow, .. }));
            }
            other => panic!("árbol inesperado: {other:?}"),
        }
    }

    #[test]
    fn parens_override_precedence() {
        let grouped = parse_expr("(a + b) * c").unwrap();
        assert!(matches!(grouped, Expr::Binary { op: BinaryOp::Mul, .. }));
    }

    #[test]
    fn call_with_args_and_path() {
        let expr = parse_expr("min(self.a, 2)").unwrap();
        assert_eq!(expr,
                   Expr::Call { name: "min".into(),
                                args: vec![Expr::Path(vec!["self".into(), "a".into()]),
                                           Expr::Number(2.0)] });
    }

    #[test]
    fn pow_binds_tighter_than_unary_minus() {
        // `-2^2` es `-(2^2)`, nunca `(-2)^2`.
        let expr = parse_expr("-2 ^ 2").unwrap();
        match expr {
            Expr::Unary { op: UnaryOp::Neg, operand } => {
                assert!(matches!(*operand, Expr::Binary { op: BinaryOp::Pow, .. }));
            }
            other => panic!("árbol inesperado: {other:?}"),
        }
        // La base negada explícita sí queda bajo la potencia.
        let grouped = parse_expr("(-2) ^ 2").unwrap();
        assert!(matches!(grouped, Expr::Binary { op: BinaryOp::Pow, .. }));
    }

    #[test]
    fn trailing_garbage_is_an_error() {
        assert!(parse_expr("a + b )").is_err());
        assert!(parse_expr("").is_err());
        assert!(parse_expr("a +").is_err());
    }
}
