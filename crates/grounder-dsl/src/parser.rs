use pest::Parser;
use pest_derive::Parser;

use crate::ast::{Axiom, Span, Term};
use crate::errors::{ConfigError, DslError, ParseError};

#[derive(Parser)]
#[grammar = "axioms.pest"]
struct AxiomLineParser;

fn is_delimiter(c: u8) -> bool {
    matches!(c, b'(' | b')' | b',')
}

/// Recursive-descent reader over whitespace-stripped term text.
struct TermReader<'a> {
    text: &'a str,
    pos: usize,
}

impl<'a> TermReader<'a> {
    fn new(text: &'a str) -> Self {
        Self { text, pos: 0 }
    }

    fn peek(&self) -> Option<u8> {
        self.text.as_bytes().get(self.pos).copied()
    }

    fn at_end(&self) -> bool {
        self.pos >= self.text.len()
    }

    fn read_functor(&mut self) -> &'a str {
        let text = self.text;
        let start = self.pos;
        while let Some(c) = self.peek() {
            if is_delimiter(c) {
                break;
            }
            self.pos += 1;
        }
        &text[start..self.pos]
    }

    fn read_term(&mut self) -> Result<Term, DslError> {
        let start = self.pos;
        let functor = self.read_functor();
        if functor.is_empty() {
            let end = (start + 1).min(self.text.len()).max(start);
            return Err(ParseError::empty_functor(Span::new(start, end), self.text).into());
        }

        if self.peek() != Some(b'(') {
            return Ok(Term::leaf(functor)?);
        }

        let open = self.pos;
        self.pos += 1;
        let mut args = Vec::new();
        if self.peek() == Some(b')') {
            self.pos += 1;
            return Ok(Term::new(functor, args)?);
        }

        loop {
            if self.at_end() {
                return Err(self.unbalanced(open));
            }
            args.push(self.read_term()?);
            match self.peek() {
                Some(b',') => self.pos += 1,
                Some(b')') => {
                    self.pos += 1;
                    break;
                }
                None => return Err(self.unbalanced(open)),
                Some(_) => {
                    return Err(ParseError::trailing_input(
                        &self.text[self.pos..],
                        Span::new(self.pos, self.text.len()),
                        self.text,
                    )
                    .into())
                }
            }
        }

        Ok(Term::new(functor, args)?)
    }

    fn unbalanced(&self, open: usize) -> DslError {
        ParseError::unbalanced_parens(Span::new(open, open + 1), self.text).into()
    }
}

/// Remove every whitespace character; the term grammar is whitespace-free.
pub fn strip_whitespace(text: &str) -> String {
    text.chars().filter(|c| !c.is_whitespace()).collect()
}

/// Parse exactly one term, rejecting anything left over.
pub fn parse_term(text: &str) -> Result<Term, DslError> {
    let stripped = strip_whitespace(text);
    let mut reader = TermReader::new(&stripped);
    let term = reader.read_term()?;
    if !reader.at_end() {
        return Err(ParseError::trailing_input(
            &stripped[reader.pos..],
            Span::new(reader.pos, stripped.len()),
            &stripped,
        )
        .into());
    }
    Ok(term)
}

/// Parse one `cnf(NAME, axiom, LHS=RHS).` declaration. `line_no` is 1-based.
pub fn parse_axiom_line(line: &str, line_no: usize) -> Result<Axiom, DslError> {
    let pair = AxiomLineParser::parse(Rule::cnf_line, line.trim())
        .map_err(|e| {
            let column = match e.location {
                pest::error::InputLocation::Pos(p) => p,
                pest::error::InputLocation::Span((s, _)) => s,
            };
            ConfigError::MalformedLine {
                line: line_no,
                message: format!("not a `cnf(...)` declaration (column {})", column + 1),
            }
        })?
        .next()
        .ok_or_else(|| ConfigError::MalformedLine {
            line: line_no,
            message: "empty declaration".into(),
        })?;

    let mut name = None;
    let mut role = None;
    let mut formula = None;
    for inner in pair.into_inner() {
        match inner.as_rule() {
            Rule::name => name = Some(inner.as_str()),
            Rule::role => role = Some(inner.as_str()),
            Rule::formula => formula = Some(inner.as_str()),
            _ => {}
        }
    }
    let (Some(name), Some(role), Some(formula)) = (name, role, formula) else {
        return Err(ConfigError::MalformedLine {
            line: line_no,
            message: "declaration is missing a name, role or formula".into(),
        }
        .into());
    };

    if role != "axiom" {
        return Err(ConfigError::UnsupportedRole {
            line: line_no,
            role: role.to_string(),
        }
        .into());
    }

    let formula = formula.trim();
    let Some((lhs, rhs)) = formula.split_once('=') else {
        return Err(ConfigError::MissingEquals {
            line: line_no,
            formula: formula.to_string(),
        }
        .into());
    };
    if rhs.contains('=') {
        return Err(ConfigError::MalformedLine {
            line: line_no,
            message: format!("formula `{formula}` contains more than one `=`"),
        }
        .into());
    }

    let lhs = parse_term(lhs).map_err(|e| e.at_line(line_no))?;
    let rhs = parse_term(rhs).map_err(|e| e.at_line(line_no))?;
    Ok(Axiom::new(name, lhs, rhs))
}

fn is_skipped_line(line: &str) -> bool {
    line.is_empty() || line.starts_with('%')
}

/// Parse a rule file. Blank lines and `%` comments are skipped.
pub fn parse_axioms(source: &str) -> Result<Vec<Axiom>, DslError> {
    source
        .lines()
        .enumerate()
        .map(|(idx, line)| (idx + 1, line.trim()))
        .filter(|(_, line)| !is_skipped_line(line))
        .map(|(line_no, line)| parse_axiom_line(line, line_no))
        .collect()
}
