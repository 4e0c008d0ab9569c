use super::token::{Token, TokenKind};

pub const WHITESPACE: &[u8] = b" \t\r\n\x0b";
pub const SYMBOLS: &[u8] = b"<|>&;()";

pub fn is_whitespace(b: u8) -> bool {
    WHITESPACE.contains(&b)
}

pub fn is_symbol(b: u8) -> bool {
    SYMBOLS.contains(&b)
}

pub struct Lexer<'a> {
    input: &'a str,
    pos: usize,
}

impl<'a> Lexer<'a> {
    pub fn new(input: &'a str) -> Self {
        Lexer { input, pos: 0 }
    }

    fn skip_whitespace(&mut self) {
        let bytes = self.input.as_bytes();
        while self.pos < bytes.len() && is_whitespace(bytes[self.pos]) {
            self.pos += 1;
        }
    }

    /// Scans one token starting at the current position. Never fails; the end of the
    /// buffer is reported as `TokenKind::End` (repeatedly, if asked again).
    pub fn next_token(&mut self) -> Token {
        let bytes = self.input.as_bytes();
        self.skip_whitespace();

        let start = self.pos;
        let kind = match bytes.get(self.pos) {
            None => TokenKind::End,
            Some(b'|') => self.single(TokenKind::Pipe),
            Some(b'(') => self.single(TokenKind::LParen),
            Some(b')') => self.single(TokenKind::RParen),
            Some(b';') => self.single(TokenKind::Semicolon),
            Some(b'&') => self.single(TokenKind::Amp),
            Some(b'<') => self.single(TokenKind::RedirectIn),
            Some(b'>') => {
                self.pos += 1;
                if bytes.get(self.pos) == Some(&b'>') {
                    self.pos += 1;
                    TokenKind::RedirectAppend
                } else {
                    TokenKind::RedirectOut
                }
            }
            Some(_) => {
                while self.pos < bytes.len()
                    && !is_whitespace(bytes[self.pos])
                    && !is_symbol(bytes[self.pos])
                {
                    self.pos += 1;
                }
                TokenKind::Word
            }
        };
        let token = Token::new(kind, start, self.pos);

        // Trailing blanks belong to no token.
        self.skip_whitespace();
        token
    }

    fn single(&mut self, kind: TokenKind) -> TokenKind {
        self.pos += 1;
        kind
    }

    pub fn tokenize_all(&mut self) -> Vec<Token> {
        let mut tokens = Vec::new();
        loop {
            let token = self.next_token();
            let is_end = token.kind == TokenKind::End;
            tokens.push(token);
            if is_end {
                break;
            }
        }
        tokens
    }
}
