// src/core/grammar.rs

//! Recursive-descent parser for the Desktop Entry Exec-key grammar.
//!
//! The grammar, with ordered alternation and greedy repetition:
//!
//! ```text
//! command        := executable arguments
//! executable     := wordexpression
//! arguments      := argument*
//! argument       := wordexpression | fieldcode
//! wordexpression := chars | quote reservedchars quote
//! fieldcode      := BAREFIELD | quote BAREFIELD quote
//! BAREFIELD      := '%' one-of(f F u U d D n N i c k v m)
//! quote          := '"' not preceded by '\'
//! chars          := one-or-more of [A-Za-z0-9_-]
//! reservedchars  := one-or-more of (CHAR | RESERVEDCHAR | QUOTEDCHAR)
//! QUOTEDCHAR     := '\' followed by one of { \, $, `, " }
//! RESERVEDCHAR   := one of { space, tab, newline, ', >, <, ~, |, &, ;, *, ?, #, (, ) }
//! ```
//!
//! There is deliberately no shell interpretation here: no globbing, pipes,
//! redirection or variable expansion. Quoted escapes resolve to their
//! literal second character, so `"\$foo"` parses to the word `$foo`.

use crate::models::{ExecAst, FieldCode, Token};
use thiserror::Error;

/// Parse failure, carrying the character position of the offending input.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GrammarError {
    #[error("Expected {expected} at position {position}.")]
    Expected {
        expected: &'static str,
        position: usize,
    },
    #[error("Unterminated quoted expression starting at position {position}.")]
    UnterminatedQuote { position: usize },
    #[error("Unexpected trailing input at position {position}.")]
    TrailingInput { position: usize },
}

impl GrammarError {
    /// The character position the error points at. Used to pick the
    /// furthest-progressing failure among ordered alternatives.
    pub fn position(&self) -> usize {
        match self {
            Self::Expected { position, .. }
            | Self::UnterminatedQuote { position }
            | Self::TrailingInput { position } => *position,
        }
    }
}

/// Parses a raw Exec string into its syntax tree.
///
/// Parsing is pure and total over the grammar's accepted language: input
/// outside the grammar fails with a positioned [`GrammarError`] and never
/// partially succeeds.
pub fn parse(input: &str) -> Result<ExecAst, GrammarError> {
    let chars: Vec<char> = input.chars().collect();
    let mut parser = Parser {
        input: &chars,
        pos: 0,
    };

    parser.skip_whitespace();
    let executable = parser.word_expression()?;

    let mut arguments = Vec::new();
    loop {
        parser.skip_whitespace();
        if parser.at_end() {
            break;
        }
        arguments.push(parser.argument()?);
    }

    Ok(ExecAst {
        executable,
        arguments,
    })
}

struct Parser<'a> {
    input: &'a [char],
    pos: usize,
}

impl Parser<'_> {
    fn at_end(&self) -> bool {
        self.pos >= self.input.len()
    }

    fn peek(&self) -> Option<char> {
        self.peek_at(self.pos)
    }

    fn peek_at(&self, pos: usize) -> Option<char> {
        self.input.get(pos).copied()
    }

    fn bump(&mut self) {
        self.pos += 1;
    }

    fn skip_whitespace(&mut self) {
        while let Some(c) = self.peek() {
            if c.is_ascii_whitespace() {
                self.bump();
            } else {
                break;
            }
        }
    }

    /// `argument := wordexpression | fieldcode`, with explicit rollback
    /// between the alternatives. When both fail, the failure whose attempt
    /// progressed furthest is reported; if neither alternative got past
    /// the starting position the input is plain trailing junk.
    fn argument(&mut self) -> Result<Token, GrammarError> {
        let start = self.pos;

        let (word_err, word_progress) = match self.word_expression() {
            Ok(word) => return Ok(Token::Word(word)),
            Err(e) => {
                let progress = e.position().max(self.pos);
                (e, progress)
            }
        };
        self.pos = start;

        let (field_err, field_progress) = match self.field_code() {
            Ok(code) => return Ok(Token::Field(code)),
            Err(e) => {
                let progress = e.position().max(self.pos);
                (e, progress)
            }
        };
        self.pos = start;

        if word_progress <= start && field_progress <= start {
            return Err(GrammarError::TrailingInput { position: start });
        }
        Err(if field_progress > word_progress {
            field_err
        } else {
            word_err
        })
    }

    /// `wordexpression := chars | quote reservedchars quote`
    fn word_expression(&mut self) -> Result<String, GrammarError> {
        let start = self.pos;
        match self.simple_chars() {
            Ok(word) => return Ok(word),
            Err(_) => self.pos = start,
        }
        self.quoted_expression()
    }

    /// `chars := one-or-more of [A-Za-z0-9_-]`
    fn simple_chars(&mut self) -> Result<String, GrammarError> {
        let mut word = String::new();
        while let Some(c) = self.peek() {
            if is_simple_char(c) {
                word.push(c);
                self.bump();
            } else {
                break;
            }
        }
        if word.is_empty() {
            return Err(GrammarError::Expected {
                expected: "a word character",
                position: self.pos,
            });
        }
        Ok(word)
    }

    /// `quote reservedchars quote`, resolving quoted escapes to their
    /// literal character value.
    fn quoted_expression(&mut self) -> Result<String, GrammarError> {
        let open = self.pos;
        self.quote()?;

        let mut word = String::new();
        loop {
            let Some(c) = self.peek() else {
                return Err(GrammarError::UnterminatedQuote { position: open });
            };
            if c == '\\' {
                // QUOTEDCHAR: the backslash escapes exactly one of \ $ ` "
                match self.peek_at(self.pos + 1) {
                    Some(escaped @ ('\\' | '$' | '`' | '"')) => {
                        self.bump();
                        self.bump();
                        word.push(escaped);
                    }
                    _ => {
                        return Err(GrammarError::Expected {
                            expected: "an escapable character (one of \\ $ ` \")",
                            position: self.pos + 1,
                        });
                    }
                }
            } else if c == '"' {
                break;
            } else if is_simple_char(c) || is_reserved_char(c) {
                word.push(c);
                self.bump();
            } else {
                return Err(GrammarError::Expected {
                    expected: "a quotable character",
                    position: self.pos,
                });
            }
        }

        if word.is_empty() {
            return Err(GrammarError::Expected {
                expected: "at least one quoted character",
                position: self.pos,
            });
        }
        self.quote()?;
        Ok(word)
    }

    /// `fieldcode := BAREFIELD | quote BAREFIELD quote`
    ///
    /// Both forms yield the same token; quoting is not preserved for
    /// field codes.
    fn field_code(&mut self) -> Result<FieldCode, GrammarError> {
        let start = self.pos;
        match self.bare_field() {
            Ok(code) => return Ok(code),
            Err(_) => self.pos = start,
        }

        self.quote()?;
        let code = self.bare_field()?;
        self.quote()?;
        Ok(code)
    }

    /// `BAREFIELD := '%' one-of(f F u U d D n N i c k v m)`
    fn bare_field(&mut self) -> Result<FieldCode, GrammarError> {
        if self.peek() != Some('%') {
            return Err(GrammarError::Expected {
                expected: "a field code",
                position: self.pos,
            });
        }
        let letter_pos = self.pos + 1;
        let code = self
            .peek_at(letter_pos)
            .and_then(FieldCode::from_char)
            .ok_or(GrammarError::Expected {
                expected: "a field code letter (one of fFuUdDnNickvm)",
                position: letter_pos,
            })?;
        self.bump();
        self.bump();
        Ok(code)
    }

    /// `quote := '"' not preceded by '\'`
    fn quote(&mut self) -> Result<(), GrammarError> {
        let preceded_by_backslash =
            self.pos > 0 && self.peek_at(self.pos - 1) == Some('\\');
        if self.peek() == Some('"') && !preceded_by_backslash {
            self.bump();
            Ok(())
        } else {
            Err(GrammarError::Expected {
                expected: "a quote",
                position: self.pos,
            })
        }
    }
}

fn is_simple_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_' || c == '-'
}

fn is_reserved_char(c: char) -> bool {
    matches!(
        c,
        ' ' | '\t' | '\n' | '\'' | '>' | '<' | '~' | '|' | '&' | ';' | '*' | '?' | '#' | '(' | ')'
    )
}

// MARK: --- UNIT TESTS ---

#[cfg(test)]
mod tests {
    use super::*;

    fn word(s: &str) -> Token {
        Token::Word(s.to_string())
    }

    #[test]
    fn test_bare_executable() {
        let ast = parse("vim").unwrap();
        assert_eq!(ast.executable, "vim");
        assert!(ast.arguments.is_empty());
    }

    #[test]
    fn test_quoted_executable() {
        let ast = parse(r#""vim""#).unwrap();
        assert_eq!(ast.executable, "vim");
        assert!(ast.arguments.is_empty());
    }

    #[test]
    fn test_word_arguments() {
        let ast = parse("vim arg1 arg2").unwrap();
        assert_eq!(ast.executable, "vim");
        assert_eq!(ast.arguments, vec![word("arg1"), word("arg2")]);
    }

    #[test]
    fn test_quoted_argument_resolves_to_plain_word() {
        let ast = parse(r#"vim "arg""#).unwrap();
        assert_eq!(ast.arguments, vec![word("arg")]);
    }

    #[test]
    fn test_quoted_executable_with_space() {
        let ast = parse(r#""vim arg""#).unwrap();
        assert_eq!(ast.executable, "vim arg");
        assert!(ast.arguments.is_empty());
    }

    #[test]
    fn test_quoted_executable_and_quoted_argument() {
        let ast = parse(r#""vim arg" "x y""#).unwrap();
        assert_eq!(ast.executable, "vim arg");
        assert_eq!(ast.arguments, vec![word("x y")]);
    }

    #[test]
    fn test_bare_field_code() {
        let ast = parse("vim %u").unwrap();
        assert_eq!(ast.arguments, vec![Token::Field(FieldCode::Url)]);
    }

    #[test]
    fn test_quoted_field_code_equals_bare() {
        let bare = parse("vim %u").unwrap();
        let quoted = parse(r#"vim "%u""#).unwrap();
        assert_eq!(bare, quoted);
    }

    #[test]
    fn test_mixed_arguments_keep_order() {
        let ast = parse(r#"vim "%u" foo %F"#).unwrap();
        assert_eq!(
            ast.arguments,
            vec![
                Token::Field(FieldCode::Url),
                word("foo"),
                Token::Field(FieldCode::FileList),
            ]
        );
    }

    #[test]
    fn test_quoted_escape_yields_literal_character() {
        let ast = parse(r#"vim "\$foo""#).unwrap();
        assert_eq!(ast.arguments, vec![word("$foo")]);
        // 4 characters, not the 5 of the unresolved escape sequence.
        if let Some(Token::Word(w)) = ast.arguments.first() {
            assert_eq!(w.chars().count(), 4);
        }
    }

    #[test]
    fn test_escaped_quote_inside_quotes() {
        let ast = parse(r#""a a" b "c \" 3""#).unwrap();
        assert_eq!(ast.executable, "a a");
        assert_eq!(ast.arguments, vec![word("b"), word("c \" 3")]);
    }

    #[test]
    fn test_all_four_escapes() {
        let ast = parse(r#""a \\\\ \$f\`""#).unwrap();
        assert_eq!(ast.executable, "a \\\\ $f`");
        assert!(ast.arguments.is_empty());
    }

    #[test]
    fn test_all_field_code_letters() {
        let ast = parse("app %f %F %u %U %d %D %n %N %i %c %k %v %m").unwrap();
        let letters: String = ast
            .arguments
            .iter()
            .map(|t| match t {
                Token::Field(code) => code.as_char(),
                Token::Word(_) => panic!("expected only field codes"),
            })
            .collect();
        assert_eq!(letters, "fFuUdDnNickvm");
    }

    #[test]
    fn test_parse_is_idempotent() {
        let input = r#"vim "%u" foo --line "a b""#;
        assert_eq!(parse(input).unwrap(), parse(input).unwrap());
    }

    #[test]
    fn test_reserved_chars_only_valid_inside_quotes() {
        let ast = parse(r#"sh "a & b | c""#).unwrap();
        assert_eq!(ast.arguments, vec![word("a & b | c")]);

        let err = parse("sh a & b").unwrap_err();
        assert_eq!(err, GrammarError::TrailingInput { position: 5 });
    }

    #[test]
    fn test_empty_input_fails() {
        assert!(parse("").is_err());
        assert!(parse("   ").is_err());
    }

    #[test]
    fn test_executable_cannot_be_a_field_code() {
        let err = parse("%f").unwrap_err();
        assert_eq!(err.position(), 0);
    }

    #[test]
    fn test_unknown_field_letter_fails() {
        let err = parse("vim %z").unwrap_err();
        assert_eq!(err.position(), 5);
    }

    #[test]
    fn test_unterminated_quote_fails() {
        let err = parse(r#"vim "unterminated"#).unwrap_err();
        assert_eq!(err, GrammarError::UnterminatedQuote { position: 4 });
    }

    #[test]
    fn test_empty_quotes_fail() {
        assert!(parse(r#"vim """#).is_err());
    }

    #[test]
    fn test_unsupported_escape_fails() {
        // Only \ $ ` " may follow a backslash inside quotes.
        assert!(parse(r#"vim "\n""#).is_err());
    }
}
