//! Input loading shared by the subcommands.

use std::fs;
use std::path::Path;

use grounder_dsl::{parse_axioms, parse_term, Axiom, Term};
use miette::{Context, IntoDiagnostic};

use crate::cli::TermInput;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum OutputFormat {
    Text,
    Json,
}

pub(crate) fn parse_output_format(raw: &str) -> miette::Result<OutputFormat> {
    match raw {
        "text" => Ok(OutputFormat::Text),
        "json" => Ok(OutputFormat::Json),
        other => miette::bail!("Unknown output format: {other}. Use 'text' or 'json'."),
    }
}

pub(crate) fn load_rules(path: &Path) -> miette::Result<Vec<Axiom>> {
    let source = fs::read_to_string(path)
        .into_diagnostic()
        .wrap_err_with(|| format!("Failed to read rule file {}", path.display()))?;
    parse_axioms(&source).wrap_err_with(|| format!("Invalid rule file {}", path.display()))
}

/// The term text from `-T`, or the trimmed contents of the `-F` file.
pub(crate) fn term_text(input: &TermInput) -> miette::Result<String> {
    let text = match (&input.term, &input.term_file) {
        (Some(term), _) => term.clone(),
        (None, Some(path)) => fs::read_to_string(path)
            .into_diagnostic()
            .wrap_err_with(|| format!("Failed to read term file {}", path.display()))?
            .trim()
            .to_string(),
        (None, None) => String::new(),
    };
    if text.trim().is_empty() {
        miette::bail!("No term provided or term file was empty.");
    }
    Ok(text)
}

pub(crate) fn load_term(input: &TermInput) -> miette::Result<Term> {
    let text = term_text(input)?;
    Ok(parse_term(&text)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn inline(term: &str) -> TermInput {
        TermInput {
            term: Some(term.to_string()),
            term_file: None,
        }
    }

    #[test]
    fn output_formats() {
        assert_eq!(parse_output_format("text").unwrap(), OutputFormat::Text);
        assert_eq!(parse_output_format("json").unwrap(), OutputFormat::Json);
        assert!(parse_output_format("yaml").is_err());
    }

    #[test]
    fn term_file_is_trimmed() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "  inv(inv(a))  \n").unwrap();
        let input = TermInput {
            term: None,
            term_file: Some(file.path().to_path_buf()),
        };
        assert_eq!(term_text(&input).unwrap(), "inv(inv(a))");
        assert_eq!(load_term(&input).unwrap().size(), 3);
    }

    #[test]
    fn empty_term_is_rejected() {
        let file = tempfile::NamedTempFile::new().unwrap();
        let input = TermInput {
            term: None,
            term_file: Some(file.path().to_path_buf()),
        };
        let err = term_text(&input).unwrap_err();
        assert!(err.to_string().contains("empty"));
        assert!(term_text(&inline("   ")).is_err());
    }

    #[test]
    fn malformed_term_is_a_diagnostic() {
        assert!(load_term(&inline("f(a")).is_err());
    }

    #[test]
    fn rule_file_errors_name_the_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "cnf(c, conjecture, a = b).").unwrap();
        let err = load_rules(file.path()).unwrap_err();
        assert!(err.to_string().contains("Invalid rule file"));

        let err = load_rules(Path::new("/nonexistent/rules.p")).unwrap_err();
        assert!(err.to_string().contains("Failed to read rule file"));
    }
}
