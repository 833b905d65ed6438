//! build::dnt
//!
//! [`PackageBuilder`] backed by dnt (Deno to Node Transform).
//!
//! # Design
//!
//! dnt is a Deno library, so the build runs as a short Deno program:
//!
//! ```text
//! import { build } from "<dnt_module>";
//!
//! await build(<options JSON>);
//! ```
//!
//! The program is piped to `deno run -A -` on stdin, which keeps the staging
//! directory limited to the staged source file. Stdout and stderr are
//! captured; on failure stderr becomes the build diagnostics.

use std::process::Stdio;

use async_trait::async_trait;
use serde_json::Value;
use tokio::io::AsyncWriteExt;
use tokio::process::Command;

use super::traits::{BuildError, BuildRequest, PackageBuilder};

/// Default Deno executable.
pub const DEFAULT_DENO: &str = "deno";

/// Default dnt module specifier.
pub const DEFAULT_DNT_MODULE: &str = "https://deno.land/x/dnt/mod.ts";

/// Builder that runs dnt under Deno.
#[derive(Debug, Clone)]
pub struct DntBuilder {
    /// Deno executable (name on PATH or absolute path)
    deno: String,
    /// Module specifier dnt is imported from
    dnt_module: String,
}

impl Default for DntBuilder {
    fn default() -> Self {
        Self::new(DEFAULT_DENO, DEFAULT_DNT_MODULE)
    }
}

impl DntBuilder {
    pub fn new(deno: impl Into<String>, dnt_module: impl Into<String>) -> Self {
        Self {
            deno: deno.into(),
            dnt_module: dnt_module.into(),
        }
    }

    /// Render the Deno program that performs the build.
    ///
    /// # Errors
    ///
    /// Returns `BuildError::InvalidOptions` if serialization fails.
    pub fn render_script(&self, options: &Value) -> Result<String, BuildError> {
        let module = serde_json::to_string(&self.dnt_module)?;
        let options = serde_json::to_string_pretty(options)?;
        Ok(format!(
            "import {{ build }} from {};\n\nawait build({});\n",
            module, options
        ))
    }
}

#[async_trait]
impl PackageBuilder for DntBuilder {
    fn name(&self) -> &'static str {
        "dnt"
    }

    async fn build(&self, request: &BuildRequest) -> Result<(), BuildError> {
        let script = self.render_script(&request.options())?;
        tracing::debug!(deno = %self.deno, module = %self.dnt_module, "starting dnt build");

        let mut child = Command::new(&self.deno)
            .args(["run", "-A", "-"])
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|source| BuildError::Spawn {
                program: self.deno.clone(),
                source,
            })?;

        if let Some(mut stdin) = child.stdin.take() {
            // an early exit closes the pipe; the exit status reports why
            if let Err(e) = stdin.write_all(script.as_bytes()).await {
                if e.kind() != std::io::ErrorKind::BrokenPipe {
                    return Err(e.into());
                }
            }
            // stdin drops here, closing the pipe so deno starts executing
        }

        let output = child.wait_with_output().await?;
        let stdout = String::from_utf8_lossy(&output.stdout);
        if !stdout.trim().is_empty() {
            tracing::debug!(output = %stdout.trim(), "dnt output");
        }

        if output.status.success() {
            Ok(())
        } else {
            Err(BuildError::Failed {
                status: output.status.to_string(),
                diagnostics: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            })
        }
    }
}
