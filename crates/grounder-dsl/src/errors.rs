use miette::Diagnostic;
use thiserror::Error;

use crate::ast::Span;

/// Malformed term text.
///
/// Spans index into the whitespace-stripped text that the parser actually
/// consumed, which is also the attached source.
#[derive(Debug, Error, Diagnostic)]
pub enum ParseError {
    #[error("Trailing input after term: `{rest}`")]
    #[diagnostic(
        code(grounder::parse::trailing_input),
        help("a term is a single functor optionally followed by a parenthesised argument list")
    )]
    TrailingInput {
        rest: String,
        #[label("unexpected")]
        span: miette::SourceSpan,
        #[source_code]
        src: miette::NamedSource<String>,
    },

    #[error("Unbalanced parentheses: `(` is never closed")]
    #[diagnostic(code(grounder::parse::unbalanced_parens))]
    UnbalancedParens {
        #[label("opened here")]
        span: miette::SourceSpan,
        #[source_code]
        src: miette::NamedSource<String>,
    },

    #[error("Expected a functor symbol")]
    #[diagnostic(code(grounder::parse::empty_functor))]
    EmptyFunctor {
        #[label("functor expected")]
        span: miette::SourceSpan,
        #[source_code]
        src: miette::NamedSource<String>,
    },
}

impl ParseError {
    pub fn trailing_input(rest: impl Into<String>, span: Span, source: &str) -> Self {
        ParseError::TrailingInput {
            rest: rest.into(),
            span: to_source_span(span),
            src: miette::NamedSource::new("term", source.to_owned()),
        }
    }

    pub fn unbalanced_parens(span: Span, source: &str) -> Self {
        ParseError::UnbalancedParens {
            span: to_source_span(span),
            src: miette::NamedSource::new("term", source.to_owned()),
        }
    }

    pub fn empty_functor(span: Span, source: &str) -> Self {
        ParseError::EmptyFunctor {
            span: to_source_span(span),
            src: miette::NamedSource::new("term", source.to_owned()),
        }
    }
}

fn to_source_span(span: Span) -> miette::SourceSpan {
    (span.start, span.end.saturating_sub(span.start)).into()
}

/// Invalid axiom declarations and symbol conventions.
#[derive(Debug, Error, Diagnostic)]
pub enum ConfigError {
    #[error("line {line}: only axioms are supported, found role `{role}`")]
    #[diagnostic(
        code(grounder::config::unsupported_role),
        help("conjectures and other roles are not accepted in the rule file")
    )]
    UnsupportedRole { line: usize, role: String },

    #[error("line {line}: formula `{formula}` is not an equation `LHS=RHS`")]
    #[diagnostic(code(grounder::config::missing_equals))]
    MissingEquals { line: usize, formula: String },

    #[error("line {line}: {message}")]
    #[diagnostic(
        code(grounder::config::malformed_line),
        help("expected `cnf(NAME, axiom, LHS=RHS).`")
    )]
    MalformedLine { line: usize, message: String },

    #[error("Symbol `{symbol}` matches more than one numeral pattern")]
    #[diagnostic(
        code(grounder::config::ambiguous_numeral),
        help("numerals are written num<N>, numneg<N> or negnum<N>")
    )]
    AmbiguousNumeral { symbol: String },
}

impl ConfigError {
    /// Attach a 1-based line number to errors raised while building terms.
    pub fn at_line(self, line: usize) -> Self {
        match self {
            ConfigError::AmbiguousNumeral { symbol } => ConfigError::MalformedLine {
                line,
                message: format!("symbol `{symbol}` matches more than one numeral pattern"),
            },
            other => other,
        }
    }
}

/// Any failure while reading terms or axiom files.
#[derive(Debug, Error, Diagnostic)]
pub enum DslError {
    #[error(transparent)]
    #[diagnostic(transparent)]
    Parse(#[from] ParseError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Config(#[from] ConfigError),

    #[error("line {line}: {source}")]
    #[diagnostic(code(grounder::config::term))]
    Line {
        line: usize,
        #[source]
        source: Box<DslError>,
    },
}

impl DslError {
    pub fn at_line(self, line: usize) -> Self {
        match self {
            DslError::Config(err) => DslError::Config(err.at_line(line)),
            other => DslError::Line {
                line,
                source: Box::new(other),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_trailing_input() {
        let err = ParseError::trailing_input(")", Span::new(4, 5), "f(a))");
        assert_eq!(err.to_string(), "Trailing input after term: `)`");
        match err {
            ParseError::TrailingInput { span, src, .. } => {
                assert_eq!(span.offset(), 4);
                assert_eq!(span.len(), 1);
                assert_eq!(src.name(), "term");
            }
            _ => panic!("expected TrailingInput variant"),
        }
    }

    #[test]
    fn display_unbalanced_parens() {
        let err = ParseError::unbalanced_parens(Span::new(1, 2), "f(a");
        assert_eq!(
            err.to_string(),
            "Unbalanced parentheses: `(` is never closed"
        );
    }

    #[test]
    fn display_config_errors() {
        let role = ConfigError::UnsupportedRole {
            line: 3,
            role: "conjecture".into(),
        };
        assert_eq!(
            role.to_string(),
            "line 3: only axioms are supported, found role `conjecture`"
        );

        let eq = ConfigError::MissingEquals {
            line: 1,
            formula: "f(X)".into(),
        };
        assert_eq!(
            eq.to_string(),
            "line 1: formula `f(X)` is not an equation `LHS=RHS`"
        );
    }

    #[test]
    fn ambiguous_numeral_gains_line_number() {
        let err = ConfigError::AmbiguousNumeral {
            symbol: "numnum1".into(),
        }
        .at_line(7);
        assert!(matches!(err, ConfigError::MalformedLine { line: 7, .. }));
    }

    #[test]
    fn parse_errors_are_wrapped_with_line() {
        let err = DslError::from(ParseError::unbalanced_parens(Span::new(0, 1), "(")).at_line(2);
        assert!(err.to_string().starts_with("line 2: Unbalanced parentheses"));
    }
}
