//! Structured records read back out of the summary markup.
//!
//! Entries are never cached: every modal open re-reads the item so the
//! dialog always reflects the current document and language.

use std::fmt;

use crate::error::{Result, SiteError};
use crate::language::Language;
use crate::markup::{localized_or_visible, MarkupNode};

pub const EXPERIENCE_ITEM_SELECTOR: &str = ".timeline-content";
pub const EDUCATION_ITEM_SELECTOR: &str = ".education-item.clickable";
pub const ENTRY_KEY_ATTRIBUTE: &str = "data-entry";

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EntryKind {
    Experience,
    Education,
}

impl EntryKind {
    pub const ALL: [Self; 2] = [Self::Experience, Self::Education];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Experience => "experience",
            Self::Education => "education",
        }
    }

    pub fn item_selector(self) -> &'static str {
        match self {
            Self::Experience => EXPERIENCE_ITEM_SELECTOR,
            Self::Education => EDUCATION_ITEM_SELECTOR,
        }
    }
}

impl fmt::Display for EntryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TimelineEntry {
    pub title: String,
    pub company: String,
    pub date: String,
    pub location: Option<String>,
    pub responsibilities: Vec<String>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EducationEntry {
    pub school: String,
    pub degree: String,
    pub date: String,
    pub location: Option<String>,
    pub courses: Vec<String>,
    pub key: Option<String>,
}

pub fn summary_item<N: MarkupNode>(root: &N, kind: EntryKind, index: usize) -> Result<N> {
    root.select_all(kind.item_selector())
        .into_iter()
        .nth(index)
        .ok_or(SiteError::EntryNotFound { kind, index })
}

fn required_text<N: MarkupNode>(item: &N, kind: EntryKind, selector: &str, field: &'static str) -> Result<String> {
    item.select_first(selector)
        .map(|node| node.visible_text())
        .ok_or(SiteError::MissingField { kind, field })
}

fn optional_text<N: MarkupNode>(item: &N, selector: &str) -> Option<String> {
    item.select_first(selector)
        .map(|node| node.visible_text())
        .filter(|text| !text.is_empty())
}

impl TimelineEntry {
    pub fn extract<N: MarkupNode>(item: &N) -> Result<Self> {
        let kind = EntryKind::Experience;

        Ok(Self {
            title: required_text(item, kind, "h3", "title")?,
            company: required_text(item, kind, "h4", "company")?,
            date: required_text(item, kind, ".date", "date")?,
            location: optional_text(item, ".location"),
            responsibilities: item
                .select_all("li")
                .iter()
                .map(MarkupNode::visible_text)
                .collect(),
        })
    }
}

impl EducationEntry {
    pub fn extract<N: MarkupNode>(item: &N, language: Language) -> Result<Self> {
        let kind = EntryKind::Education;
        let degree = item
            .select_first(".degree")
            .ok_or(SiteError::MissingField {
                kind,
                field: "degree",
            })?;

        Ok(Self {
            school: required_text(item, kind, "h4", "school")?,
            degree: localized_or_visible(&degree, language),
            date: required_text(item, kind, ".date", "date")?,
            location: optional_text(item, ".location"),
            courses: item
                .select_all(".course-list li")
                .iter()
                .map(|course| localized_or_visible(course, language))
                .collect(),
            key: item
                .attr(ENTRY_KEY_ATTRIBUTE)
                .map(|key| key.trim().to_string())
                .filter(|key| !key.is_empty()),
        })
    }
}
