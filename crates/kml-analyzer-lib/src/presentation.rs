//! Presentation adapter
//!
//! Shapes summarizer output into table rows and builds the labels the map
//! shows for named features. Nothing here draws; the viewer renders these.

use crate::{CountSummary, Feature, FeatureRecord, Length};
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Shown in place of summary rows when the document has no features
pub const EMPTY_SUMMARY_MESSAGE: &str = "No elements found in the KML file";

/// Shown in place of detail rows when the document has no features
pub const EMPTY_DETAIL_MESSAGE: &str = "No detailed information available";

/// Mutually exclusive display modes of a loaded document
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum ViewMode {
    /// Initial mode after every successful load
    #[default]
    Map,
    Summary,
    Detail,
}

impl ViewMode {
    pub fn all() -> &'static [Self] {
        &[Self::Map, Self::Summary, Self::Detail]
    }

    /// Tab title
    pub fn title(&self) -> &'static str {
        match self {
            Self::Map => "Map View",
            Self::Summary => "Summary",
            Self::Detail => "Detailed View",
        }
    }
}

/// One row of the aggregate counts table
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct SummaryRow {
    pub label: &'static str,
    pub count: usize,
}

/// One row of the per-feature detail table
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct DetailRow {
    pub name: String,
    pub kind: &'static str,
    /// `"12.34 km"` or `"N/A"`
    pub length: String,
}

/// Summary rows, alphabetical by kind label
pub fn summary_rows(counts: &CountSummary) -> Vec<SummaryRow> {
    counts
        .iter()
        .map(|(kind, count)| SummaryRow {
            label: kind.label(),
            count,
        })
        .collect()
}

pub fn detail_row(record: &FeatureRecord) -> DetailRow {
    let length = match record.length {
        Length::Kilometers(_) => format!("{} km", record.length),
        Length::NotApplicable => record.length.to_string(),
    };
    DetailRow {
        name: record.name.clone(),
        kind: record.kind.label(),
        length,
    }
}

/// Detail rows in record order
pub fn detail_rows(records: &[FeatureRecord]) -> Vec<DetailRow> {
    records.iter().map(detail_row).collect()
}

/// Name and description of a named feature, as plain text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeatureLabel<'a> {
    pub name: &'a str,
    pub description: &'a str,
}

impl<'a> FeatureLabel<'a> {
    /// `None` unless the feature has a non-empty name
    pub fn of(feature: &'a Feature) -> Option<Self> {
        let name = feature.display_name()?;
        Some(Self {
            name,
            description: feature.description.as_deref().unwrap_or_default(),
        })
    }

    /// Description with markup removed, for plain-text tooltips
    pub fn plain_description(&self) -> String {
        strip_markup(self.description)
    }

    /// `<b>name</b><br>description`, both escaped
    pub fn to_html(&self) -> String {
        format!(
            "<b>{}</b><br>{}",
            escape_html(self.name),
            escape_html(self.description)
        )
    }
}

/// HTML popup label for a feature, only when it has a name
pub fn label_for(feature: &Feature) -> Option<String> {
    FeatureLabel::of(feature).map(|label| label.to_html())
}

/// Plain text of an HTML fragment
///
/// Tags are dropped, `<br>` and closing block tags become line breaks, common
/// entities are decoded and whitespace runs collapse to single spaces.
pub fn strip_markup(html: &str) -> String {
    let mut text = String::with_capacity(html.len());
    let mut rest = html;
    while let Some(start) = rest.find('<') {
        text.push_str(&rest[..start]);
        let Some(end) = rest[start..].find('>') else {
            // Unterminated tag: keep it as text
            text.push_str(&rest[start..]);
            rest = "";
            break;
        };
        let tag = rest[start + 1..start + end]
            .trim()
            .trim_end_matches('/')
            .trim_end()
            .to_ascii_lowercase();
        let tag_name = tag.split_whitespace().next().unwrap_or_default();
        if matches!(tag_name, "br" | "/p" | "/div" | "/li" | "/tr" | "/h1" | "/h2" | "/h3") {
            text.push('\n');
        } else {
            text.push(' ');
        }
        rest = &rest[start + end + 1..];
    }
    text.push_str(rest);

    let decoded = text
        .replace("&nbsp;", " ")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&amp;", "&");

    decoded
        .lines()
        .map(|line| line.split_whitespace().collect::<Vec<_>>().join(" "))
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}

fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
