//! Insertion-ordered INI document model and emitter.

use std::fmt;

use crate::error::IniResult;
use crate::parser;

/// One section: a name and its entries in insertion order.
///
/// The empty name denotes the implicit default section.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct IniSection {
    pub(crate) name: String,
    pub(crate) entries: Vec<(String, String)>,
}

impl IniSection {
    /// Create an empty section.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            entries: Vec::new(),
        }
    }

    /// The section name (`""` for the default section).
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The key/value entries in insertion order.
    pub fn entries(&self) -> &[(String, String)] {
        &self.entries
    }

    /// Look up a value by key.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Insert or overwrite a key. Overwrites keep the original position.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((key, value)),
        }
    }
}

/// A parsed INI document: sections in insertion order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct IniDocument {
    pub(crate) sections: Vec<IniSection>,
}

impl IniDocument {
    /// Create an empty document.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a complete INI stream.
    pub fn parse(input: &str) -> IniResult<Self> {
        parser::parse(input)
    }

    /// All sections in insertion order (the default section, when present,
    /// comes first).
    pub fn sections(&self) -> &[IniSection] {
        &self.sections
    }

    /// Look up a section by name (`""` for the default section).
    pub fn section(&self, name: &str) -> Option<&IniSection> {
        self.sections.iter().find(|s| s.name == name)
    }

    /// Look up a value by section and key.
    pub fn get(&self, section: &str, key: &str) -> Option<&str> {
        self.section(section)?.get(key)
    }

    /// Whether the document has no sections at all.
    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    pub(crate) fn section_mut(&mut self, name: &str) -> &mut IniSection {
        if let Some(idx) = self.sections.iter().position(|s| s.name == name) {
            return &mut self.sections[idx];
        }
        self.sections.push(IniSection::new(name));
        self.sections.last_mut().expect("just pushed")
    }
}

impl fmt::Display for IniDocument {
    /// Emit the document the way configparser's `write()` does: `key = value`
    /// lines, multi-line values indented with one tab, a blank line after each
    /// section. An empty default section is suppressed.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for section in &self.sections {
            if section.name.is_empty() && section.entries.is_empty() {
                continue;
            }
            if !section.name.is_empty() {
                writeln!(f, "[{}]", section.name)?;
            }
            for (key, value) in &section.entries {
                writeln!(f, "{} = {}", key, value.replace('\n', "\n\t"))?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
