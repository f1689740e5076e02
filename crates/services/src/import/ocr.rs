use std::env;
use std::process::Stdio;

use async_trait::async_trait;
use tokio::io::AsyncWriteExt;
use tokio::process::Command;

use crate::error::OcrError;
use crate::import::pages::PageImage;

/// Progress reported while recognising one page.
#[derive(Clone, Debug, PartialEq)]
pub struct OcrProgress {
    pub phase: String,
    pub fraction: f32,
}

impl OcrProgress {
    #[must_use]
    pub fn new(phase: impl Into<String>, fraction: f32) -> Self {
        Self {
            phase: phase.into(),
            fraction: fraction.clamp(0.0, 1.0),
        }
    }
}

#[async_trait]
pub trait OcrEngine: Send + Sync {
    /// Make sure the engine can run before any page is processed.
    async fn prepare(&self) -> Result<(), OcrError> {
        Ok(())
    }

    async fn recognize(
        &self,
        image: &PageImage,
        progress: &(dyn Fn(OcrProgress) + Send + Sync),
    ) -> Result<String, OcrError>;
}

/// OCR through the `tesseract` command-line tool.
#[derive(Clone, Debug)]
pub struct TesseractOcr {
    program: String,
    language: String,
}

impl Default for TesseractOcr {
    fn default() -> Self {
        Self {
            program: "tesseract".into(),
            language: "eng".into(),
        }
    }
}

impl TesseractOcr {
    /// Reads `FLASHGEN_TESSERACT` and `FLASHGEN_OCR_LANG`.
    #[must_use]
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            program: env::var("FLASHGEN_TESSERACT").unwrap_or(defaults.program),
            language: env::var("FLASHGEN_OCR_LANG").unwrap_or(defaults.language),
        }
    }
}

#[async_trait]
impl OcrEngine for TesseractOcr {
    async fn prepare(&self) -> Result<(), OcrError> {
        let output = Command::new(&self.program)
            .arg("--version")
            .output()
            .await
            .map_err(|err| OcrError::Unavailable(format!("{}: {err}", self.program)))?;
        if !output.status.success() {
            return Err(OcrError::Unavailable(format!(
                "{} exited with {}",
                self.program, output.status
            )));
        }
        Ok(())
    }

    async fn recognize(
        &self,
        image: &PageImage,
        progress: &(dyn Fn(OcrProgress) + Send + Sync),
    ) -> Result<String, OcrError> {
        progress(OcrProgress::new("initializing", 0.0));

        let mut child = Command::new(&self.program)
            .args(["stdin", "stdout", "-l", &self.language])
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()?;

        if let Some(mut stdin) = child.stdin.take() {
            stdin.write_all(&image.png).await?;
        }

        progress(OcrProgress::new("recognizing text", 0.5));
        let output = child.wait_with_output().await?;
        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(OcrError::Recognition(stderr.trim().to_string()));
        }

        progress(OcrProgress::new("recognizing text", 1.0));
        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}
