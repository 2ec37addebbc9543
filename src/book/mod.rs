//! The in-memory book model consumed by a build.

use crate::error::{Error, Result};
use crate::markup::check_text;

/// An ordered collection of named sections with title and author.
///
/// A build snapshots the book by value, so later edits never affect a build
/// already in flight.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Book {
    pub title: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub author: String,
    pub sections: Vec<Section>,
}

/// One named unit of content (a chapter or page).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Section {
    /// Display heading; may be empty.
    #[cfg_attr(feature = "serde", serde(default))]
    pub name: String,
    /// Section text as produced by the editor.
    #[cfg_attr(feature = "serde", serde(default, alias = "content"))]
    pub body: String,
}

impl Book {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Default::default()
        }
    }

    pub fn with_author(mut self, author: impl Into<String>) -> Self {
        self.author = author.into();
        self
    }

    pub fn with_section(mut self, name: impl Into<String>, body: impl Into<String>) -> Self {
        self.add_section(name, body);
        self
    }

    /// Append a section at the end of the reading order.
    pub fn add_section(&mut self, name: impl Into<String>, body: impl Into<String>) {
        self.sections.push(Section::new(name, body));
    }

    /// Remove the last section, keeping at least one in place.
    pub fn remove_last_section(&mut self) -> Option<Section> {
        if self.sections.len() > 1 {
            self.sections.pop()
        } else {
            None
        }
    }

    /// Rename the section at `index`. Returns false if there is no such section.
    pub fn update_section_name(&mut self, index: usize, name: impl Into<String>) -> bool {
        match self.sections.get_mut(index) {
            Some(section) => {
                section.name = name.into();
                true
            }
            None => false,
        }
    }

    /// Replace the body of the section at `index`. Returns false if there is no such section.
    pub fn update_section_body(&mut self, index: usize, body: impl Into<String>) -> bool {
        match self.sections.get_mut(index) {
            Some(section) => {
                section.body = body.into();
                true
            }
            None => false,
        }
    }

    /// Whether any section has a non-empty body.
    pub fn is_buildable(&self) -> bool {
        self.sections.iter().any(|s| !s.body.is_empty())
    }

    /// Check the book before any document is generated.
    ///
    /// Fails with [`Error::EmptyBook`] when there are no sections or every
    /// body is empty, and with [`Error::Encoding`] when any text field holds a
    /// character XML cannot represent. Individual empty bodies are allowed.
    pub fn validate(&self) -> Result<()> {
        if !self.is_buildable() {
            return Err(Error::EmptyBook);
        }

        check_text("title", None, &self.title)?;
        check_text("author", None, &self.author)?;
        for (i, section) in self.sections.iter().enumerate() {
            check_text("name", Some(i), &section.name)?;
            check_text("body", Some(i), &section.body)?;
        }
        Ok(())
    }
}

impl Section {
    pub fn new(name: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            body: body.into(),
        }
    }
}
