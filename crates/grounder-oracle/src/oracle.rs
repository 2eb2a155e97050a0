use thiserror::Error;

use crate::problem::Problem;
use crate::response::{OracleResponse, RewriteRule, COMPLETION_BANNER};

/// Which refinement round an oracle call belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoundKind {
    /// Runs without a timeout and must exhaust its work.
    Intermediate,
    /// Runs with the user timeout; giving up is acceptable.
    Final,
}

/// How an accepted oracle run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    Completed,
    GaveUp,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AcceptedResponse {
    pub verdict: Verdict,
    pub rules: Vec<RewriteRule>,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OracleProtocolError {
    #[error("oracle output has no completion banner:\n{output}")]
    MissingBanner { output: String },
    #[error("oracle output has no result terminator:\n{output}")]
    MissingTerminator { output: String },
    /// No recovery is defined for an intermediate round hitting a resource
    /// limit, so the run is aborted.
    #[error("oracle gave up during intermediate round `{label}`; only the final round may give up")]
    GaveUpInIntermediateRound { label: String },
}

impl OracleResponse {
    /// Check the response against what `round` permits.
    pub fn accept(
        self,
        round: RoundKind,
        label: &str,
    ) -> Result<AcceptedResponse, OracleProtocolError> {
        match (self, round) {
            (OracleResponse::Completed(rules), _) => Ok(AcceptedResponse {
                verdict: Verdict::Completed,
                rules,
            }),
            (OracleResponse::GaveUp(rules), RoundKind::Final) => Ok(AcceptedResponse {
                verdict: Verdict::GaveUp,
                rules,
            }),
            (OracleResponse::GaveUp(_), RoundKind::Intermediate) => {
                Err(OracleProtocolError::GaveUpInIntermediateRound {
                    label: label.to_string(),
                })
            }
            (OracleResponse::Error(output), _) if output.contains(COMPLETION_BANNER) => {
                Err(OracleProtocolError::MissingTerminator { output })
            }
            (OracleResponse::Error(output), _) => Err(OracleProtocolError::MissingBanner { output }),
        }
    }
}

/// An external equational-completion engine.
pub trait CompletionOracle {
    type Error: std::error::Error + Send + Sync + 'static;

    /// Run completion on `problem`. `timeout_secs` of `None` lets the engine
    /// run until it halts on its own.
    fn complete(
        &mut self,
        problem: &Problem,
        timeout_secs: Option<u64>,
    ) -> Result<OracleResponse, Self::Error>;

    /// Short name for logs and reports.
    fn name(&self) -> &str {
        "oracle"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use grounder_dsl::parse_term;
    use std::convert::Infallible;

    fn rule(lhs: &str, rhs: &str) -> RewriteRule {
        RewriteRule::new(parse_term(lhs).unwrap(), parse_term(rhs).unwrap())
    }

    struct FixedOracle {
        response: OracleResponse,
        calls: Vec<(String, Option<u64>)>,
    }

    impl CompletionOracle for FixedOracle {
        type Error = Infallible;

        fn complete(
            &mut self,
            problem: &Problem,
            timeout_secs: Option<u64>,
        ) -> Result<OracleResponse, Self::Error> {
            self.calls.push((problem.label.clone(), timeout_secs));
            Ok(self.response.clone())
        }
    }

    #[test]
    fn completed_is_accepted_in_every_round() {
        for round in [RoundKind::Intermediate, RoundKind::Final] {
            let accepted = OracleResponse::Completed(vec![rule("a", "goal")])
                .accept(round, "r")
                .unwrap();
            assert_eq!(accepted.verdict, Verdict::Completed);
            assert_eq!(accepted.rules.len(), 1);
        }
    }

    #[test]
    fn gave_up_is_only_accepted_in_the_final_round() {
        let accepted = OracleResponse::GaveUp(Vec::new())
            .accept(RoundKind::Final, "final")
            .unwrap();
        assert_eq!(accepted.verdict, Verdict::GaveUp);

        let err = OracleResponse::GaveUp(Vec::new())
            .accept(RoundKind::Intermediate, "round-2")
            .unwrap_err();
        assert_eq!(
            err,
            OracleProtocolError::GaveUpInIntermediateRound {
                label: "round-2".into()
            }
        );
    }

    #[test]
    fn error_responses_are_classified() {
        let err = OracleResponse::Error("segfault".into())
            .accept(RoundKind::Final, "final")
            .unwrap_err();
        assert!(matches!(err, OracleProtocolError::MissingBanner { .. }));

        let err = OracleResponse::Error(format!("{COMPLETION_BANNER}\n a -> b\n"))
            .accept(RoundKind::Intermediate, "round-0")
            .unwrap_err();
        assert!(matches!(err, OracleProtocolError::MissingTerminator { .. }));
    }

    #[test]
    fn default_name_and_call_recording() {
        let mut oracle = FixedOracle {
            response: OracleResponse::Completed(Vec::new()),
            calls: Vec::new(),
        };
        assert_eq!(oracle.name(), "oracle");
        let problem = Problem::new("final", Vec::new(), parse_term("a").unwrap());
        let response = oracle.complete(&problem, Some(3)).unwrap();
        assert_eq!(response, OracleResponse::Completed(Vec::new()));
        assert_eq!(oracle.calls, vec![("final".to_string(), Some(3))]);
    }
}
