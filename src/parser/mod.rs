//! Pull-based recursive-descent parser with one token of lookahead.
//!
//! Drives a [`Generator`] directly as statements are recognized rather than
//! building an intermediate AST — each directive, label, assignment, or
//! jump is pushed into the generator's two-pass state machine as soon as
//! it's parsed.

use std::path::Path;

use crate::cpu::resolve_register;
use crate::error::{ParserError, ParserErrorKind, Span};
use crate::generator::Generator;
use crate::lexer::token::{Token, TokenKind};
use crate::lexer::Tokenizer;

pub struct Parser {
    tokenizer: Tokenizer,
    lookahead: Option<Token>,
}

/// A parsed right-hand side: either a textual constant the generator's
/// numeric helpers can size and serialize, or a recognized-but-unsupported
/// form (register-to-register, indirect loads) that must surface as
/// `Unimplemented` rather than silently emit nothing.
enum RhsValue {
    Constant(String),
    Unimplemented,
}

impl Parser {
    pub fn open(path: &Path) -> Result<Self, ParserError> {
        let tokenizer = Tokenizer::open(path)?;
        Ok(Parser { tokenizer, lookahead: None })
    }

    pub fn reinit(&mut self) -> Result<(), ParserError> {
        self.tokenizer.reinit()?;
        self.lookahead = None;
        Ok(())
    }

    fn peek(&mut self) -> Result<&Token, ParserError> {
        if self.lookahead.is_none() {
            self.lookahead = Some(self.tokenizer.next_token()?);
        }
        Ok(self.lookahead.as_ref().expect("just filled"))
    }

    fn read(&mut self) -> Result<Token, ParserError> {
        self.peek()?;
        Ok(self.lookahead.take().expect("peek just filled lookahead"))
    }

    fn expect(&mut self, kind: &TokenKind) -> Result<Token, ParserError> {
        let token = self.read()?;
        if &token.kind == kind {
            Ok(token)
        } else {
            Err(ParserError::new(
                ParserErrorKind::UnexpectedToken,
                format!("expected {kind:?}, found {:?}", token.kind),
                token.span,
            ))
        }
    }

    fn skip_newlines(&mut self) -> Result<(), ParserError> {
        while self.peek()?.kind == TokenKind::NewLine {
            self.read()?;
        }
        Ok(())
    }

    /// Runs the parser to `Eof` against `generator`, driving every
    /// directive, label, assignment, and jump it recognizes along the way.
    pub fn run(&mut self, generator: &mut Generator) -> Result<(), ParserError> {
        loop {
            self.skip_newlines()?;
            if self.peek()?.kind == TokenKind::Eof {
                return Ok(());
            }
            self.parse_statement(generator)?;
            self.skip_newlines()?;
        }
    }

    fn parse_statement(&mut self, generator: &mut Generator) -> Result<(), ParserError> {
        let head = self.peek()?.clone();
        match head.kind {
            TokenKind::SymbolAt => self.parse_directive(generator),
            TokenKind::InstructionJmp => self.parse_jump(generator),
            TokenKind::Identifier(name) => self.parse_label_or_expression(name, head.span, generator),
            TokenKind::SymbolAsterisk => self.parse_indirect_expression(generator),
            _ => Err(ParserError::new(
                ParserErrorKind::UnexpectedToken,
                format!("unexpected token {:?}", head.kind),
                head.span,
            )),
        }
    }

    // ---- Directives -------------------------------------------------

    fn parse_directive(&mut self, generator: &mut Generator) -> Result<(), ParserError> {
        self.expect(&TokenKind::SymbolAt)?;
        let directive = self.read()?;
        match directive.kind {
            TokenKind::ReservedSetBitMode => self.parse_set_bit_mode(generator, directive.span),
            TokenKind::ReservedSetOrigin => self.parse_set_origin(generator),
            TokenKind::ReservedPadBytes => self.parse_pad_bytes(generator, directive.span),
            TokenKind::ReservedDoubleWords => self.parse_double_words(generator),
            TokenKind::ReservedBytes | TokenKind::ReservedWords | TokenKind::ReservedQuadWords => {
                self.skip_stub_arguments()
            }
            _ => Err(ParserError::new(
                ParserErrorKind::InvalidDirective,
                format!("unknown directive {:?}", directive.kind),
                directive.span,
            )),
        }
    }

    fn parse_set_bit_mode(&mut self, generator: &mut Generator, span: Span) -> Result<(), ParserError> {
        self.expect(&TokenKind::SymbolLeftParanthesis)?;
        let number = self.expect_number()?;
        self.expect(&TokenKind::SymbolRightParanthesis)?;
        let mode = crate::cpu::BitMode::from_number(number).ok_or_else(|| {
            ParserError::new(ParserErrorKind::InvalidDirective, format!("{number} is not a valid bit mode"), span)
        })?;
        generator.process_set_bit_mode(mode);
        Ok(())
    }

    fn parse_set_origin(&mut self, generator: &mut Generator) -> Result<(), ParserError> {
        self.expect(&TokenKind::SymbolLeftParanthesis)?;
        let address = self.expect_number()?;
        self.expect(&TokenKind::SymbolRightParanthesis)?;
        generator.process_set_origin(address);
        Ok(())
    }

    fn parse_pad_bytes(&mut self, generator: &mut Generator, span: Span) -> Result<(), ParserError> {
        self.expect(&TokenKind::SymbolLeftParanthesis)?;
        let count = self.parse_const_expr(generator)?;
        let byte = if self.peek()?.kind == TokenKind::SymbolComma {
            self.read()?;
            self.expect_number()? as u8
        } else {
            0x00
        };
        self.expect(&TokenKind::SymbolRightParanthesis)?;
        generator.process_pad_bytes(count, byte, span)?;
        Ok(())
    }

    fn parse_double_words(&mut self, generator: &mut Generator) -> Result<(), ParserError> {
        self.expect(&TokenKind::SymbolLeftParanthesis)?;
        if self.peek()?.kind == TokenKind::SymbolRightParanthesis {
            self.read()?;
            return Ok(());
        }
        loop {
            let value = self.expect_number()?;
            generator.emit_double_word(value as u16)?;
            if self.peek()?.kind == TokenKind::SymbolComma {
                self.read()?;
                continue;
            }
            break;
        }
        self.expect(&TokenKind::SymbolRightParanthesis)?;
        Ok(())
    }

    /// `Bytes`/`Words`/`QuadWords` stubs: consume a balanced `(...)` without
    /// interpreting its contents.
    fn skip_stub_arguments(&mut self) -> Result<(), ParserError> {
        self.expect(&TokenKind::SymbolLeftParanthesis)?;
        let mut depth = 1usize;
        loop {
            let token = self.read()?;
            match token.kind {
                TokenKind::SymbolLeftParanthesis => depth += 1,
                TokenKind::SymbolRightParanthesis => {
                    depth -= 1;
                    if depth == 0 {
                        return Ok(());
                    }
                }
                TokenKind::Eof => {
                    return Err(ParserError::new(
                        ParserErrorKind::UnexpectedToken,
                        "unterminated directive arguments",
                        token.span,
                    ))
                }
                _ => {}
            }
        }
    }

    fn expect_number(&mut self) -> Result<u64, ParserError> {
        let token = self.expect(&TokenKind::Number)?;
        crate::generator::numeric::parse_numeric_text(&token.lexeme)
            .map_err(|message| ParserError::new(ParserErrorKind::InvalidNumber, message, token.span))
    }

    /// `constExpr := ( constExpr ) | value (('+'|'-'|'*'|'/') constExpr)?`
    fn parse_const_expr(&mut self, generator: &mut Generator) -> Result<i64, ParserError> {
        if self.peek()?.kind == TokenKind::SymbolLeftParanthesis {
            self.read()?;
            let value = self.parse_const_expr(generator)?;
            self.expect(&TokenKind::SymbolRightParanthesis)?;
            return Ok(value);
        }
        let lhs = self.parse_const_value(generator)?;
        let op = match self.peek()?.kind {
            TokenKind::SymbolPlus | TokenKind::SymbolMinus | TokenKind::SymbolAsterisk | TokenKind::SymbolForwardSlash => {
                self.read()?.kind
            }
            _ => return Ok(lhs),
        };
        let rhs = self.parse_const_expr(generator)?;
        Ok(match op {
            TokenKind::SymbolPlus => lhs + rhs,
            TokenKind::SymbolMinus => lhs - rhs,
            TokenKind::SymbolAsterisk => lhs * rhs,
            TokenKind::SymbolForwardSlash => lhs.div_euclid(rhs),
            _ => unreachable!("guarded by the match above"),
        })
    }

    /// `value := number | '@' Current '(' ')' | '@' Origin '(' ')'`
    fn parse_const_value(&mut self, generator: &mut Generator) -> Result<i64, ParserError> {
        let token = self.read()?;
        match token.kind {
            TokenKind::Number => crate::generator::numeric::parse_numeric_text(&token.lexeme)
                .map(|v| v as i64)
                .map_err(|message| ParserError::new(ParserErrorKind::InvalidNumber, message, token.span)),
            TokenKind::SymbolAt => {
                let what = self.read()?;
                self.expect(&TokenKind::SymbolLeftParanthesis)?;
                self.expect(&TokenKind::SymbolRightParanthesis)?;
                match what.kind {
                    TokenKind::ReservedCurrent => Ok(generator.current_address() as i64),
                    TokenKind::ReservedStart => Ok(generator.address_origin() as i64),
                    _ => Err(ParserError::new(ParserErrorKind::UnexpectedToken, "expected Current or Origin", what.span)),
                }
            }
            _ => Err(ParserError::new(ParserErrorKind::UnexpectedToken, format!("expected a value, found {:?}", token.kind), token.span)),
        }
    }

    // ---- Labels & expressions ----------------------------------------

    fn parse_label_or_expression(&mut self, name: String, span: Span, generator: &mut Generator) -> Result<(), ParserError> {
        self.read()?; // the identifier itself
        if self.peek()?.kind == TokenKind::SymbolColon {
            self.read()?;
            generator.process_label(&name);
            return Ok(());
        }
        if resolve_register(&name).is_none() {
            return Err(ParserError::new(ParserErrorKind::UnsupportedRegister, format!("unknown register {name}"), span));
        }
        self.parse_assignment(&name, span, generator)
    }

    fn parse_indirect_expression(&mut self, generator: &mut Generator) -> Result<(), ParserError> {
        let asterisk = self.read()?; // '*'
        self.expect_number()?;
        let op = self.read()?;
        match op.kind {
            TokenKind::SymbolEquals => {
                self.parse_rhs(generator)?;
                Err(ParserError::new(ParserErrorKind::Unimplemented, "indirect memory writes are not yet implemented", asterisk.span))
            }
            _ => Err(ParserError::new(ParserErrorKind::UnexpectedToken, format!("expected '=', found {:?}", op.kind), op.span)),
        }
    }

    fn parse_assignment(&mut self, lhs: &str, span: Span, generator: &mut Generator) -> Result<(), ParserError> {
        let op = self.read()?;
        match op.kind {
            TokenKind::SymbolEquals => match self.parse_rhs(generator)? {
                RhsValue::Constant(text) => Ok(generator.emit_assignment(lhs, &text, span)?),
                RhsValue::Unimplemented => Err(ParserError::new(ParserErrorKind::Unimplemented, "this assignment form is not yet implemented", span)),
            },
            TokenKind::SymbolPlus => {
                self.expect(&TokenKind::SymbolEquals)?;
                self.parse_rhs(generator)?;
                Err(ParserError::new(ParserErrorKind::Unimplemented, "+= is reserved and not yet implemented", span))
            }
            TokenKind::SymbolMinus => {
                self.expect(&TokenKind::SymbolEquals)?;
                self.parse_rhs(generator)?;
                Err(ParserError::new(ParserErrorKind::Unimplemented, "-= is reserved and not yet implemented", span))
            }
            _ => Err(ParserError::new(ParserErrorKind::UnexpectedToken, format!("expected an assignment operator, found {:?}", op.kind), op.span)),
        }
    }

    /// `rhs := number | '*' (identifier|number) | register-identifier | '@' Current '(' ')' | '@' Origin '(' ')'`
    fn parse_rhs(&mut self, generator: &mut Generator) -> Result<RhsValue, ParserError> {
        let token = self.read()?;
        match token.kind {
            TokenKind::Number => Ok(RhsValue::Constant(token.lexeme)),
            TokenKind::SymbolAsterisk => {
                self.read()?; // identifier or number being dereferenced
                Ok(RhsValue::Unimplemented)
            }
            TokenKind::Identifier(name) => {
                if resolve_register(&name).is_some() {
                    Ok(RhsValue::Unimplemented)
                } else {
                    Err(ParserError::new(ParserErrorKind::UnsupportedRegister, format!("unknown register {name}"), token.span))
                }
            }
            TokenKind::SymbolAt => {
                let what = self.read()?;
                self.expect(&TokenKind::SymbolLeftParanthesis)?;
                self.expect(&TokenKind::SymbolRightParanthesis)?;
                match what.kind {
                    TokenKind::ReservedCurrent => Ok(RhsValue::Constant(generator.current_address().to_string())),
                    TokenKind::ReservedStart => Ok(RhsValue::Constant(generator.address_origin().to_string())),
                    _ => Err(ParserError::new(ParserErrorKind::UnexpectedToken, "expected Current or Origin", what.span)),
                }
            }
            _ => Err(ParserError::new(ParserErrorKind::UnexpectedToken, format!("expected a value, found {:?}", token.kind), token.span)),
        }
    }

    // ---- Jumps ---------------------------------------------------------

    fn parse_jump(&mut self, generator: &mut Generator) -> Result<(), ParserError> {
        let jmp = self.expect(&TokenKind::InstructionJmp)?;
        let operand = self.read()?;
        match operand.kind {
            TokenKind::Number => Ok(generator.emit_jump_to_constant(&operand.lexeme, jmp.span)?),
            TokenKind::Identifier(name) => Ok(generator.emit_jump_to_label(&name, jmp.span)?),
            _ => Err(ParserError::new(ParserErrorKind::UnexpectedToken, format!("expected a jump operand, found {:?}", operand.kind), operand.span)),
        }
    }
}

#[cfg(test)]
mod tests;
