//! Non-fatal parse diagnostics.
//!
//! Recoverable content gaps (a dangling relationship, an unknown transition, a
//! missing optional part) never abort a parse. They are recorded here as plain data
//! next to the model, and each one is also logged at `warn` level.

use serde::Serialize;
use std::fmt;

/// Stable diagnostic codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum IssueCode {
    MissingRelationship,
    UnresolvedImage,
    UnknownTransition,
    UnknownTimingNode,
    MissingPart,
    MissingTheme,
    MissingLayout,
    MalformedPart,
    UnresolvedChart,
    UnresolvedMedia,
}

impl IssueCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            IssueCode::MissingRelationship => "missing-relationship",
            IssueCode::UnresolvedImage => "unresolved-image",
            IssueCode::UnknownTransition => "unknown-transition",
            IssueCode::UnknownTimingNode => "unknown-timing-node",
            IssueCode::MissingPart => "missing-part",
            IssueCode::MissingTheme => "missing-theme",
            IssueCode::MissingLayout => "missing-layout",
            IssueCode::MalformedPart => "malformed-part",
            IssueCode::UnresolvedChart => "unresolved-chart",
            IssueCode::UnresolvedMedia => "unresolved-media",
        }
    }
}

impl fmt::Display for IssueCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A recoverable content gap; the parser substituted a documented default.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ParseWarning {
    pub code: IssueCode,
    pub message: String,
    /// Part path the warning was raised for
    pub location: Option<String>,
    /// Element (local name or id) the warning concerns
    pub element: Option<String>,
}

/// An error record. Non-fatal records describe entities that were skipped.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ParseIssue {
    pub code: IssueCode,
    pub message: String,
    pub fatal: bool,
    pub location: Option<String>,
    pub element: Option<String>,
}

impl fmt::Display for ParseWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.code, self.message)?;
        if let Some(location) = &self.location {
            write!(f, " ({})", location)?;
        }
        Ok(())
    }
}

/// Warning and error accumulator for one part or one whole parse.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Diagnostics {
    pub warnings: Vec<ParseWarning>,
    pub errors: Vec<ParseIssue>,
}

impl Diagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a warning.
    pub fn warn(
        &mut self,
        code: IssueCode,
        message: impl Into<String>,
        location: Option<&str>,
        element: Option<&str>,
    ) {
        let warning = ParseWarning {
            code,
            message: message.into(),
            location: location.map(str::to_string),
            element: element.map(str::to_string),
        };
        log::warn!("{}", warning);
        self.warnings.push(warning);
    }

    /// Record a non-fatal error for an entity that was skipped.
    pub fn error(&mut self, code: IssueCode, message: impl Into<String>, location: Option<&str>) {
        let message = message.into();
        log::warn!(
            "[{}] {} ({}), skipped",
            code,
            message,
            location.unwrap_or("package")
        );
        self.errors.push(ParseIssue {
            code,
            message,
            fatal: false,
            location: location.map(str::to_string),
            element: None,
        });
    }

    /// Append another accumulator, keeping record order.
    pub fn merge(&mut self, other: Diagnostics) {
        self.warnings.extend(other.warnings);
        self.errors.extend(other.errors);
    }

    pub fn has_code(&self, code: IssueCode) -> bool {
        self.warnings.iter().any(|w| w.code == code) || self.errors.iter().any(|e| e.code == code)
    }

    pub fn is_empty(&self) -> bool {
        self.warnings.is_empty() && self.errors.is_empty()
    }
}
