use std::io::{Cursor, Read};
use std::sync::LazyLock;

use async_trait::async_trait;
use regex::Regex;

use crate::error::ImportError;

/// Visible body text and layout markers. Field instructions (`w:instrText`)
/// and deleted runs (`w:delText`) are never matched.
static BODY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?s)<w:t(?:\s[^>]*[^/>]|\s)?>(?P<text>.*?)</w:t>|(?P<tab><w:tab\s*/>)|<w:(?:br|cr)\b[^>]*/>|</w:p>",
    )
    .expect("valid regex")
});
static ENTITY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"&(?:#x(?P<hex>[0-9a-fA-F]+)|#(?P<dec>[0-9]+)|(?P<name>lt|gt|quot|apos|amp));")
        .expect("valid regex")
});
static BLANK_RUNS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\n[ \t]*\n(?:[ \t]*\n)+").expect("valid regex"));

/// Turns document bytes into plain text.
#[async_trait]
pub trait DocumentTextExtractor: Send + Sync {
    async fn extract_text(&self, bytes: &[u8]) -> Result<String, ImportError>;
}

/// Reads the body text of a `.docx` (Office Open XML) file.
#[derive(Clone, Debug, Default)]
pub struct DocxExtractor;

#[async_trait]
impl DocumentTextExtractor for DocxExtractor {
    async fn extract_text(&self, bytes: &[u8]) -> Result<String, ImportError> {
        let xml = read_document_xml(bytes)?;
        Ok(xml_to_text(&xml))
    }
}

fn read_document_xml(bytes: &[u8]) -> Result<String, ImportError> {
    let mut archive = zip::ZipArchive::new(Cursor::new(bytes))
        .map_err(|err| ImportError::Extraction(err.to_string()))?;
    let mut entry = archive
        .by_name("word/document.xml")
        .map_err(|err| ImportError::Extraction(format!("word/document.xml: {err}")))?;
    let mut xml = String::new();
    entry
        .read_to_string(&mut xml)
        .map_err(|err| ImportError::Extraction(err.to_string()))?;
    Ok(xml)
}

fn xml_to_text(xml: &str) -> String {
    let mut text = String::new();
    for caps in BODY.captures_iter(xml) {
        if let Some(run) = caps.name("text") {
            text.push_str(&decode_entities(run.as_str()));
        } else if caps.name("tab").is_some() {
            text.push('\t');
        } else {
            text.push('\n');
        }
    }
    BLANK_RUNS.replace_all(text.trim(), "\n\n").into_owned()
}

/// Decode the predefined XML entities and numeric character references in
/// one pass. Unknown or invalid references are left as written.
fn decode_entities(text: &str) -> String {
    ENTITY
        .replace_all(text, |caps: &regex::Captures<'_>| {
            let code = if let Some(hex) = caps.name("hex") {
                u32::from_str_radix(hex.as_str(), 16).ok()
            } else if let Some(dec) = caps.name("dec") {
                dec.as_str().parse::<u32>().ok()
            } else {
                let named = match caps.name("name").map(|m| m.as_str()) {
                    Some("lt") => '<',
                    Some("gt") => '>',
                    Some("quot") => '"',
                    Some("apos") => '\'',
                    _ => '&',
                };
                return named.to_string();
            };
            code.and_then(char::from_u32)
                .map_or_else(|| caps[0].to_string(), |c| c.to_string())
        })
        .into_owned()
}
