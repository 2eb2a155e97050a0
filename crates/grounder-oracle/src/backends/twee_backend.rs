use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use std::thread;

use thiserror::Error;
use tracing::{debug, info};

use crate::oracle::CompletionOracle;
use crate::problem::Problem;
use crate::response::{parse_response, OracleResponse};

/// Wrapper script that forwards `[timeout] -` to the prover.
pub const DEFAULT_TWEE_COMMAND: &str = "./twee.sh";

#[derive(Debug, Error)]
pub enum TweeError {
    #[error("twee I/O error: {0}")]
    Io(#[from] io::Error),
    #[error("twee not found: {0}")]
    NotFound(String),
    #[error("twee error: {0}")]
    ProcessError(String),
    #[error("failed to write debug dump {path}: {source}")]
    Dump {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TweeConfig {
    /// Executable invoked as `<command> [timeout_seconds] -`.
    pub command: PathBuf,
    /// When set, every call writes `<label>-input.p` and `<label>-output.txt` here.
    pub dump_dir: Option<PathBuf>,
}

impl Default for TweeConfig {
    fn default() -> Self {
        Self {
            command: PathBuf::from(DEFAULT_TWEE_COMMAND),
            dump_dir: None,
        }
    }
}

/// Runs the prover once per problem, feeding the problem on stdin.
#[derive(Debug, Clone, Default)]
pub struct TweeOracle {
    config: TweeConfig,
    calls: usize,
}

impl TweeOracle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: TweeConfig) -> Self {
        Self { config, calls: 0 }
    }

    pub fn with_command(command: impl Into<PathBuf>) -> Self {
        Self::with_config(TweeConfig {
            command: command.into(),
            ..TweeConfig::default()
        })
    }

    pub fn config(&self) -> &TweeConfig {
        &self.config
    }

    /// Number of prover invocations so far.
    pub fn calls(&self) -> usize {
        self.calls
    }

    fn command_args(timeout_secs: Option<u64>) -> Vec<String> {
        let mut args = Vec::new();
        if let Some(secs) = timeout_secs {
            args.push(secs.to_string());
        }
        args.push("-".to_string());
        args
    }

    fn run(&self, input: String, timeout_secs: Option<u64>) -> Result<String, TweeError> {
        let cmd = &self.config.command;
        let mut child = Command::new(cmd)
            .args(Self::command_args(timeout_secs))
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| TweeError::NotFound(format!("{}: {e}", cmd.display())))?;

        let mut stdin = child
            .stdin
            .take()
            .ok_or_else(|| TweeError::ProcessError("failed to capture twee stdin".into()))?;

        // The prover may fill its stdout pipe before it has read all of
        // stdin, so input is written from its own thread.
        let writer = thread::spawn(move || -> io::Result<()> {
            match stdin.write_all(input.as_bytes()) {
                Err(e) if e.kind() == io::ErrorKind::BrokenPipe => Ok(()),
                other => other,
            }
        });

        let output = child.wait_with_output()?;
        writer
            .join()
            .map_err(|_| TweeError::ProcessError("stdin writer panicked".into()))??;

        let mut combined = String::from_utf8_lossy(&output.stdout).into_owned();
        combined.push_str(&String::from_utf8_lossy(&output.stderr));
        debug!(status = %output.status, bytes = combined.len(), "twee finished");
        Ok(combined)
    }

    fn dump(&self, dir: &Path, file_name: String, contents: &str) -> Result<(), TweeError> {
        let path = dir.join(file_name);
        fs::create_dir_all(dir)
            .and_then(|_| fs::write(&path, contents))
            .map_err(|source| TweeError::Dump {
                path: path.clone(),
                source,
            })?;
        info!("wrote {}", path.display());
        Ok(())
    }
}

impl CompletionOracle for TweeOracle {
    type Error = TweeError;

    fn complete(
        &mut self,
        problem: &Problem,
        timeout_secs: Option<u64>,
    ) -> Result<OracleResponse, TweeError> {
        self.calls += 1;
        let input = problem.to_tptp();
        if let Some(dir) = &self.config.dump_dir {
            self.dump(dir, format!("{}-input.p", problem.label), &input)?;
        }

        match timeout_secs {
            Some(secs) => info!("running twee on {} with timeout={secs}s", problem.label),
            None => info!("running twee on {} without timeout", problem.label),
        }
        let output = self.run(input, timeout_secs)?;

        if let Some(dir) = &self.config.dump_dir {
            self.dump(dir, format!("{}-output.txt", problem.label), &output)?;
        }
        Ok(parse_response(&output))
    }

    fn name(&self) -> &str {
        "twee"
    }
}
