use std::io::Write;
use std::path::Path;

use async_trait::async_trait;
use tempfile::NamedTempFile;
use tokio::process::Command;

use crate::error::{ImportError, PageError};
use crate::import::pages::{PageImage, PagedDocument, PagedDocumentLoader};

/// Loads PDFs with the poppler command-line tools
/// (`pdfinfo`, `pdftotext`, `pdftoppm`).
#[derive(Clone, Debug, Default)]
pub struct PopplerLoader;

#[async_trait]
impl PagedDocumentLoader for PopplerLoader {
    async fn load(&self, bytes: Vec<u8>) -> Result<Box<dyn PagedDocument>, ImportError> {
        let mut file = NamedTempFile::new().map_err(|err| ImportError::Load(err.to_string()))?;
        file.write_all(&bytes)
            .and_then(|()| file.flush())
            .map_err(|err| ImportError::Load(err.to_string()))?;

        let output = Command::new("pdfinfo")
            .arg(file.path())
            .output()
            .await
            .map_err(|err| ImportError::Load(format!("pdfinfo: {err}")))?;
        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(ImportError::Load(stderr.trim().to_string()));
        }

        let info = String::from_utf8_lossy(&output.stdout);
        let page_count = parse_page_count(&info)
            .ok_or_else(|| ImportError::Load("pdfinfo reported no page count".into()))?;
        tracing::debug!(page_count, "pdf loaded");

        Ok(Box::new(PopplerDocument { file, page_count }))
    }
}

struct PopplerDocument {
    file: NamedTempFile,
    page_count: u32,
}

impl PopplerDocument {
    fn path(&self) -> &Path {
        self.file.path()
    }
}

#[async_trait]
impl PagedDocument for PopplerDocument {
    fn page_count(&self) -> u32 {
        self.page_count
    }

    async fn page_text(&self, page: u32) -> Result<String, PageError> {
        let page_arg = page.to_string();
        let output = Command::new("pdftotext")
            .args(["-layout", "-enc", "UTF-8", "-f", &page_arg, "-l", &page_arg])
            .arg(self.path())
            .arg("-")
            .output()
            .await
            .map_err(|err| PageError::Text {
                page,
                reason: err.to_string(),
            })?;
        if !output.status.success() {
            return Err(PageError::Text {
                page,
                reason: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }
        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }

    async fn render_page(&self, page: u32, scale: f32) -> Result<PageImage, PageError> {
        let page_arg = page.to_string();
        let dpi = render_dpi(scale).to_string();
        let output = Command::new("pdftoppm")
            .args(["-png", "-singlefile", "-r", &dpi, "-f", &page_arg, "-l", &page_arg])
            .arg(self.path())
            .output()
            .await
            .map_err(|err| PageError::Render {
                page,
                reason: err.to_string(),
            })?;
        if !output.status.success() || output.stdout.is_empty() {
            return Err(PageError::Render {
                page,
                reason: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }
        Ok(PageImage {
            page,
            png: output.stdout,
        })
    }
}

fn parse_page_count(info: &str) -> Option<u32> {
    info.lines()
        .find_map(|line| line.strip_prefix("Pages:"))
        .and_then(|value| value.trim().parse().ok())
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn render_dpi(scale: f32) -> u32 {
    (72.0 * scale.max(0.1)).round().min(1200.0) as u32
}
