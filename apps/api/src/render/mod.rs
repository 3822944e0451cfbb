//! Document rendering: canonical résumé → PDF bytes.
//!
//! `TypstRenderer` writes the render view as `resume.json` next to the
//! `resume_dark.typ` template in a scratch directory and runs `typst compile`.

pub mod handlers;
pub mod view;

use std::path::PathBuf;
use std::time::Duration;

use async_trait::async_trait;
use thiserror::Error;
use tokio::process::Command;
use tracing::{debug, info};

use crate::models::resume::ImprovedResume;
use view::RenderView;

pub const TEMPLATE_FILE: &str = "resume_dark.typ";
const DATA_FILE: &str = "resume.json";
const OUTPUT_FILE: &str = "resume.pdf";

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("Template not found: {}", .0.display())]
    TemplateMissing(PathBuf),

    #[error("Render engine failed: {0}")]
    Engine(String),

    #[error("Rendering timed out after {secs}s")]
    Timeout { secs: u64 },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to serialize render data: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Turns a canonical résumé into a document. Must not mutate its input.
///
/// Carried in `AppState` as `Arc<dyn DocumentRenderer>`.
#[async_trait]
pub trait DocumentRenderer: Send + Sync {
    async fn render(&self, resume: &ImprovedResume) -> Result<Vec<u8>, RenderError>;
}

pub struct TypstRenderer {
    template_dir: PathBuf,
    typst_bin: String,
    timeout: Duration,
}

impl TypstRenderer {
    pub fn new(template_dir: PathBuf, typst_bin: String, timeout: Duration) -> Self {
        Self {
            template_dir,
            typst_bin,
            timeout,
        }
    }

    async fn load_template(&self) -> Result<String, RenderError> {
        let path = self.template_dir.join(TEMPLATE_FILE);
        match tokio::fs::read_to_string(&path).await {
            Ok(template) => Ok(template),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                Err(RenderError::TemplateMissing(path))
            }
            Err(e) => Err(e.into()),
        }
    }
}

#[async_trait]
impl DocumentRenderer for TypstRenderer {
    async fn render(&self, resume: &ImprovedResume) -> Result<Vec<u8>, RenderError> {
        let template = self.load_template().await?;
        let view = RenderView::from_resume(resume);

        let workdir = tempfile::tempdir()?;
        tokio::fs::write(workdir.path().join("main.typ"), template).await?;
        tokio::fs::write(
            workdir.path().join(DATA_FILE),
            serde_json::to_vec_pretty(&view)?,
        )
        .await?;

        let mut cmd = Command::new(&self.typst_bin);
        cmd.arg("compile")
            .arg("main.typ")
            .arg(OUTPUT_FILE)
            .current_dir(workdir.path())
            .kill_on_drop(true);

        debug!("Running {:?} in {}", cmd, workdir.path().display());

        let output = match tokio::time::timeout(self.timeout, cmd.output()).await {
            Err(_) => {
                return Err(RenderError::Timeout {
                    secs: self.timeout.as_secs(),
                })
            }
            Ok(Err(e)) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(RenderError::Engine(format!(
                    "'{}' executable not found",
                    self.typst_bin
                )))
            }
            Ok(result) => result?,
        };

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(RenderError::Engine(stderr.trim().to_string()));
        }

        let pdf = tokio::fs::read(workdir.path().join(OUTPUT_FILE)).await?;
        info!("Rendered resume for {} ({} bytes)", view.name, pdf.len());
        Ok(pdf)
    }
}

/// `Improved_Resume_<Name>.pdf`, with whitespace turned into `_` and anything
/// unsafe for a header value dropped.
pub fn download_file_name(resume: &ImprovedResume) -> String {
    let name: String = resume
        .name()
        .unwrap_or(view::NAME_PLACEHOLDER)
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("_")
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '.'))
        .collect();

    let name = if name.is_empty() {
        view::NAME_PLACEHOLDER.to_string()
    } else {
        name
    };
    format!("Improved_Resume_{name}.pdf")
}
