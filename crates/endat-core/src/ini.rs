//! INI grammar codec.
//!
//! The configuration wire format is a classic INI dialect: `[section]`
//! headers, `key = value` lines, `#`/`;` line comments and blank lines.
//! Section and key names are matched exactly (case-sensitive). Values are
//! plain strings; commas, internal whitespace and `{placeholder}` tokens
//! pass through untouched.
//!
//! [`Document`] keeps sections and keys in insertion order so a serialised
//! file stays readable, but equality of two documents is defined on the
//! section/key/value mapping: comments and blank lines are not part of the
//! model and do not survive a round-trip.

use crate::error::{EndatError, EndatResult};

/// One named section with its entries in insertion order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section {
    pub name: String,
    entries: Vec<(String, String)>,
}

impl Section {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            entries: Vec::new(),
        }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Insert or overwrite a key. Later writes win, matching the
    /// last-wins rule of classic INI loaders.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((key, value)),
        }
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// An ordered INI document.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Document {
    sections: Vec<Section>,
}

impl Document {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse INI text into a document.
    ///
    /// A `key = value` line before the first `[section]` header, an
    /// unterminated header, an empty key or a line without `=` is an
    /// error carrying the 1-based line number. Duplicate section headers
    /// merge into one section; a duplicate key keeps the later value.
    pub fn parse(input: &str) -> EndatResult<Document> {
        let mut doc = Document::new();
        let mut current: Option<usize> = None;

        for (idx, raw) in input.lines().enumerate() {
            let line = raw.trim();
            if line.is_empty() || line.starts_with('#') || line.starts_with(';') {
                continue;
            }

            if let Some(rest) = line.strip_prefix('[') {
                let name = rest.strip_suffix(']').ok_or_else(|| EndatError::Parse {
                    line: idx + 1,
                    message: format!("unterminated section header \"{raw}\""),
                })?;
                let name = name.trim();
                if name.is_empty() {
                    return Err(EndatError::Parse {
                        line: idx + 1,
                        message: "empty section name".into(),
                    });
                }
                current = Some(doc.section_index_or_insert(name));
                continue;
            }

            let (key, value) = line.split_once('=').ok_or_else(|| EndatError::Parse {
                line: idx + 1,
                message: format!("expected key = value, got \"{raw}\""),
            })?;
            let key = key.trim();
            if key.is_empty() {
                return Err(EndatError::Parse {
                    line: idx + 1,
                    message: "empty key".into(),
                });
            }
            let section = current.ok_or_else(|| EndatError::Parse {
                line: idx + 1,
                message: format!("key \"{key}\" outside of any section"),
            })?;
            doc.sections[section].set(key, value.trim());
        }

        Ok(doc)
    }

    /// Serialise back to the INI grammar.
    ///
    /// Parsing the output again yields an identical mapping.
    pub fn to_ini_string(&self) -> String {
        let mut out = String::new();
        for section in &self.sections {
            if !out.is_empty() {
                out.push('\n');
            }
            out.push('[');
            out.push_str(&section.name);
            out.push_str("]\n");
            for (key, value) in section.iter() {
                out.push_str(key);
                out.push_str(" = ");
                out.push_str(value);
                out.push('\n');
            }
        }
        out
    }

    pub fn section(&self, name: &str) -> Option<&Section> {
        self.sections.iter().find(|s| s.name == name)
    }

    pub fn section_mut(&mut self, name: &str) -> &mut Section {
        let idx = self.section_index_or_insert(name);
        &mut self.sections[idx]
    }

    fn section_index_or_insert(&mut self, name: &str) -> usize {
        match self.sections.iter().position(|s| s.name == name) {
            Some(idx) => idx,
            None => {
                self.sections.push(Section::new(name));
                self.sections.len() - 1
            }
        }
    }

    pub fn get(&self, section: &str, key: &str) -> Option<&str> {
        self.section(section).and_then(|s| s.get(key))
    }

    pub fn set(&mut self, section: &str, key: impl Into<String>, value: impl Into<String>) {
        self.section_mut(section).set(key, value);
    }

    pub fn sections(&self) -> impl Iterator<Item = &Section> {
        self.sections.iter()
    }

    /// Fold another document into this one, later keys winning.
    pub fn merge(&mut self, other: &Document) {
        for section in other.sections() {
            for (key, value) in section.iter() {
                self.set(&section.name, key, value);
            }
        }
    }

    /// Mapping equality regardless of section or key order.
    pub fn same_mapping(&self, other: &Document) -> bool {
        let covers = |a: &Document, b: &Document| {
            a.sections().all(|section| {
                section
                    .iter()
                    .all(|(key, value)| b.get(&section.name, key) == Some(value))
            })
        };
        covers(self, other) && covers(other, self)
    }
}
