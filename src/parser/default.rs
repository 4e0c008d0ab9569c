use std::os::unix::io::RawFd;

use crate::ast::{Command, OpenMode, ParsedCommand, STDIN, STDOUT};
use crate::lexer::{Lexer, Span, Token, TokenKind};
use crate::parser::{MAX_ARGS, ParseError, Parser};

pub struct DefaultParser<'a> {
    src: &'a str,
    tokens: Vec<Token>,
    pos: usize,
}

struct Redirection {
    file: Span,
    mode: OpenMode,
    fd: RawFd,
}

impl<'a> DefaultParser<'a> {
    pub fn new(src: &'a str) -> Self {
        let tokens = Lexer::new(src).tokenize_all();
        Self {
            src,
            tokens,
            pos: 0,
        }
    }

    // `tokenize_all` always ends with `End`, so clamping keeps peek total.
    fn peek(&self) -> Token {
        let last = self.tokens.len() - 1;
        self.tokens[self.pos.min(last)]
    }

    fn bump(&mut self) -> Token {
        let tok = self.peek();
        if tok.kind != TokenKind::End {
            self.pos += 1;
        }
        tok
    }

    fn consume(&mut self, kind: TokenKind) -> bool {
        if self.peek().kind == kind {
            self.bump();
            true
        } else {
            false
        }
    }
}

// Top-down recursive descent parser
impl Parser for DefaultParser<'_> {
    fn parse(&mut self) -> Result<ParsedCommand, ParseError> {
        let cmd = self.parse_line()?;
        let next = self.peek();
        if next.kind != TokenKind::End {
            return Err(ParseError::Leftovers(self.src[next.span.start..].to_string()));
        }
        Ok(cmd)
    }
}

impl DefaultParser<'_> {
    // line := pipeline ('&')* (';' line)?
    fn parse_line(&mut self) -> Result<ParsedCommand, ParseError> {
        let mut cmd = self.parse_pipe()?;
        while self.consume(TokenKind::Amp) {
            cmd = Command::background(cmd);
        }
        if self.consume(TokenKind::Semicolon) {
            let rest = self.parse_line()?;
            cmd = Command::list(cmd, rest);
        }
        Ok(cmd)
    }

    // pipeline := exec ('|' pipeline)?
    fn parse_pipe(&mut self) -> Result<ParsedCommand, ParseError> {
        let cmd = self.parse_exec()?;
        if self.consume(TokenKind::Pipe) {
            let rest = self.parse_pipe()?;
            return Ok(Command::pipe(cmd, rest));
        }
        Ok(cmd)
    }

    fn parse_exec(&mut self) -> Result<ParsedCommand, ParseError> {
        if self.peek().kind == TokenKind::LParen {
            return self.parse_block();
        }

        let mut words = Vec::new();
        let mut redirs = Vec::new();
        self.parse_redirs(&mut redirs)?;
        loop {
            let tok = self.peek();
            match tok.kind {
                TokenKind::Pipe
                | TokenKind::RParen
                | TokenKind::Amp
                | TokenKind::Semicolon
                | TokenKind::End => break,
                TokenKind::Word => {
                    self.bump();
                    words.push(tok.span);
                    if words.len() >= MAX_ARGS {
                        return Err(ParseError::TooManyArgs);
                    }
                }
                _ => return Err(ParseError::Syntax { pos: tok.span.start }),
            }
            self.parse_redirs(&mut redirs)?;
        }
        Ok(wrap_redirs(Command::exec(words), redirs))
    }

    // block := '(' line ')' redir*
    fn parse_block(&mut self) -> Result<ParsedCommand, ParseError> {
        let open = self.bump();
        debug_assert_eq!(open.kind, TokenKind::LParen);
        let cmd = self.parse_line()?;
        if !self.consume(TokenKind::RParen) {
            return Err(ParseError::MissingParen { pos: open.span.start });
        }
        let mut redirs = Vec::new();
        self.parse_redirs(&mut redirs)?;
        Ok(wrap_redirs(cmd, redirs))
    }

    fn parse_redirs(&mut self, redirs: &mut Vec<Redirection>) -> Result<(), ParseError> {
        loop {
            let (mode, fd) = match self.peek().kind {
                TokenKind::RedirectIn => (OpenMode::Read, STDIN),
                TokenKind::RedirectOut | TokenKind::RedirectAppend => {
                    (OpenMode::WriteCreate, STDOUT)
                }
                _ => return Ok(()),
            };
            self.bump();
            let target = self.bump();
            if target.kind != TokenKind::Word {
                return Err(ParseError::MissingRedirectTarget {
                    pos: target.span.start,
                });
            }
            redirs.push(Redirection {
                file: target.span,
                mode,
                fd,
            });
        }
    }
}

// The first redirection in the text ends up outermost, so the rightmost one for a
// descriptor is bound last when the tree is walked from the top.
fn wrap_redirs(cmd: ParsedCommand, redirs: Vec<Redirection>) -> ParsedCommand {
    redirs
        .into_iter()
        .rev()
        .fold(cmd, |inner, r| Command::redirect(inner, r.file, r.mode, r.fd))
}
