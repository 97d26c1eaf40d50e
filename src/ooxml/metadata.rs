/// OOXML core and extended properties.
///
/// Core properties live in `docProps/core.xml` (Dublin Core terms plus the OPC
/// `cp:` extensions); the producing application and its version are in
/// `docProps/app.xml`. Both parts are optional.
use crate::ooxml::error::{OoxmlError, Result};
use crate::ooxml::xml::{MarkupParser, XmlNode};
use chrono::{DateTime, NaiveDateTime, Utc};
use serde::Serialize;

/// Document metadata of a presentation package.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Metadata {
    pub title: Option<String>,
    pub subject: Option<String>,
    /// `dc:creator`
    pub author: Option<String>,
    pub keywords: Option<String>,
    pub description: Option<String>,
    pub last_modified_by: Option<String>,
    pub revision: Option<String>,
    pub category: Option<String>,
    /// Content status (draft, final, etc.)
    pub content_status: Option<String>,
    pub created: Option<DateTime<Utc>>,
    pub modified: Option<DateTime<Utc>>,
    pub last_printed: Option<DateTime<Utc>>,
    /// Application that created the document (`app.xml`)
    pub application: Option<String>,
    pub app_version: Option<String>,
    /// Slide count as recorded by the producer (`app.xml`)
    pub slide_count: Option<u32>,
    pub company: Option<String>,
}

impl Metadata {
    /// Check if the metadata contains any actual data.
    pub fn is_empty(&self) -> bool {
        *self == Metadata::default()
    }
}

/// Children are matched on the part after the namespace prefix, since core
/// properties mix `dc:`, `dcterms:` and `cp:` freely.
fn field<'a>(root: &'a XmlNode, local: &str) -> Option<&'a XmlNode> {
    root.children().iter().find(|c| {
        let name = c.name();
        name.rsplit(':').next().unwrap_or(name) == local
    })
}

fn text_field(root: &XmlNode, local: &str) -> Option<String> {
    field(root, local)
        .map(|n| n.text().trim())
        .filter(|t| !t.is_empty())
        .map(str::to_string)
}

fn date_field(root: &XmlNode, local: &str) -> Option<DateTime<Utc>> {
    let text = text_field(root, local)?;
    match parse_datetime(&text) {
        Ok(dt) => Some(dt),
        Err(e) => {
            log::debug!("ignoring core property {}: {}", local, e);
            None
        },
    }
}

/// Parse `docProps/core.xml` into a fresh [`Metadata`].
///
/// # Errors
/// Fails when the part is not well-formed XML. Unparseable dates are dropped.
pub fn parse_core_properties(parser: &MarkupParser, xml: &[u8]) -> Result<Metadata> {
    let root = parser.parse(xml)?;
    let name = root.name();
    if name.rsplit(':').next().unwrap_or(name) != "coreProperties" {
        return Err(OoxmlError::InvalidFormat(format!(
            "core properties root is {}",
            root.name()
        )));
    }

    Ok(Metadata {
        title: text_field(&root, "title"),
        subject: text_field(&root, "subject"),
        author: text_field(&root, "creator"),
        keywords: text_field(&root, "keywords"),
        description: text_field(&root, "description"),
        last_modified_by: text_field(&root, "lastModifiedBy"),
        revision: text_field(&root, "revision"),
        category: text_field(&root, "category"),
        content_status: text_field(&root, "contentStatus"),
        created: date_field(&root, "created"),
        modified: date_field(&root, "modified"),
        last_printed: date_field(&root, "lastPrinted"),
        ..Default::default()
    })
}

/// Merge `docProps/app.xml` into existing metadata.
///
/// # Errors
/// Fails when the part is not well-formed XML.
pub fn apply_app_properties(parser: &MarkupParser, xml: &[u8], metadata: &mut Metadata) -> Result<()> {
    let root = parser.parse(xml)?;
    metadata.application = text_field(&root, "Application");
    metadata.app_version = text_field(&root, "AppVersion");
    metadata.company = text_field(&root, "Company");
    metadata.slide_count = text_field(&root, "Slides").and_then(|s| s.parse().ok());
    Ok(())
}

/// Parse an ISO 8601 datetime string into a DateTime<Utc>.
///
/// Supports formats like:
/// - 2023-10-10T14:30:00Z
/// - 2023-10-10T14:30:00.1234567Z
/// - 2023-10-10T14:30:00
fn parse_datetime(s: &str) -> Result<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Ok(dt.with_timezone(&Utc));
    }

    for format in ["%Y-%m-%dT%H:%M:%S%.fZ", "%Y-%m-%dT%H:%M:%SZ", "%Y-%m-%dT%H:%M:%S"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, format) {
            return Ok(DateTime::from_naive_utc_and_offset(dt, Utc));
        }
    }

    Err(OoxmlError::InvalidFormat(format!(
        "Invalid datetime format: {}",
        s
    )))
}
