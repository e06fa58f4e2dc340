//! The INI line parser.
//!
//! A single forward pass over the input. Multi-line values are accumulated
//! as lists of stripped lines and joined at the end, mirroring how
//! configparser defers `'\n'.join(...).rstrip()` until the whole file has
//! been read.

use crate::document::{IniDocument, IniSection};
use crate::error::{IniError, IniResult};

/// A section under construction: values are still line lists.
struct RawSection {
    name: String,
    entries: Vec<(String, Vec<String>)>,
}

pub(crate) fn parse(input: &str) -> IniResult<IniDocument> {
    let mut sections: Vec<RawSection> = Vec::new();
    let mut cur_section: Option<usize> = None;
    // (section index, entry index) of the key continuation lines attach to.
    let mut cur_entry: Option<(usize, usize)> = None;
    // Indent of the most recent header or key line.
    let mut indent_level = 0usize;

    for (lineno, raw_line) in input.lines().enumerate() {
        let lineno = lineno + 1;
        let (uncommented, had_comment) = strip_comments(raw_line);
        let value = uncommented.trim();

        if value.is_empty() {
            // A pure blank line extends a multi-line value; a comment line
            // is ignored without terminating the block.
            if !had_comment {
                if let Some((s, e)) = cur_entry {
                    sections[s].entries[e].1.push(String::new());
                }
            }
            continue;
        }

        let cur_indent = indent_of(raw_line);
        if let Some((s, e)) = cur_entry {
            // Continuation lines are indented strictly deeper than the key.
            if cur_indent > indent_level {
                sections[s].entries[e].1.push(value.to_string());
                continue;
            }
        }

        indent_level = cur_indent;
        cur_entry = None;

        if let Some(rest) = value.strip_prefix('[') {
            if let Some(end) = rest.find(']') {
                let name = &rest[..end];
                if name.is_empty() {
                    return Err(IniError::EmptySectionName { line: lineno });
                }
                cur_section = Some(find_or_create(&mut sections, name));
                continue;
            }
            if !value.contains('=') && !value.contains(':') {
                return Err(IniError::UnclosedSection { line: lineno });
            }
            // No closing bracket but a separator present: configparser
            // reads this as an ordinary key/value line whose key keeps
            // the leading bracket.
        }

        let sep = match (value.find('='), value.find(':')) {
            (Some(eq), Some(colon)) => eq.min(colon),
            (Some(eq), None) => eq,
            (None, Some(colon)) => colon,
            (None, None) => return Err(IniError::NoSeparator { line: lineno }),
        };
        let key = value[..sep].trim_end();
        if key.is_empty() {
            return Err(IniError::EmptyKey { line: lineno });
        }
        let val = value[sep + 1..].trim_start();

        let section_idx = match cur_section {
            Some(idx) => idx,
            None => {
                // Keys before any [section] land in the implicit default.
                let idx = find_or_create(&mut sections, "");
                cur_section = Some(idx);
                idx
            }
        };
        let entries = &mut sections[section_idx].entries;
        let entry_idx = match entries.iter().position(|(k, _)| k == key) {
            Some(idx) => {
                // Duplicate key: overwrite in place (strict=False).
                entries[idx].1 = vec![val.to_string()];
                idx
            }
            None => {
                entries.push((key.to_string(), vec![val.to_string()]));
                entries.len() - 1
            }
        };
        cur_entry = Some((section_idx, entry_idx));
    }

    Ok(finalize(sections))
}

/// Remove comments from one line. Returns the surviving prefix and whether
/// any comment was removed (blank-line bookkeeping needs the distinction).
fn strip_comments(line: &str) -> (&str, bool) {
    let stripped = line.trim_start();
    if stripped.starts_with('#') || stripped.starts_with(';') {
        return ("", true);
    }
    let bytes = line.as_bytes();
    for (i, &b) in bytes.iter().enumerate() {
        if (b == b'#' || b == b';') && i > 0 && bytes[i - 1].is_ascii_whitespace() {
            return (&line[..i], true);
        }
    }
    (line, false)
}

/// Character position of the first non-whitespace character.
fn indent_of(line: &str) -> usize {
    line.chars().take_while(|c| c.is_whitespace()).count()
}

fn find_or_create(sections: &mut Vec<RawSection>, name: &str) -> usize {
    if let Some(idx) = sections.iter().position(|s| s.name == name) {
        return idx;
    }
    sections.push(RawSection {
        name: name.to_string(),
        entries: Vec::new(),
    });
    sections.len() - 1
}

fn finalize(sections: Vec<RawSection>) -> IniDocument {
    let sections = sections
        .into_iter()
        .map(|raw| IniSection {
            name: raw.name,
            entries: raw
                .entries
                .into_iter()
                .map(|(key, values)| {
                    let joined = values.join("\n");
                    (key, joined.trim_end().to_string())
                })
                .collect(),
        })
        .collect();
    IniDocument { sections }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::IniDocument;

    #[test]
    fn basic_sections_and_keys() {
        let doc = IniDocument::parse("[metadata]\nname = demo\nversion: 1.0\n").unwrap();
        assert_eq!(doc.get("metadata", "name"), Some("demo"));
        assert_eq!(doc.get("metadata", "version"), Some("1.0"));
    }

    #[test]
    fn keys_before_section_go_to_default() {
        let doc = IniDocument::parse("root = yes\n[named]\nk = v\n").unwrap();
        assert_eq!(doc.get("", "root"), Some("yes"));
        assert_eq!(doc.sections()[0].name(), "");
    }

    #[test]
    fn full_line_comments_are_skipped() {
        let doc = IniDocument::parse("# leading\n[main]\n; note\nkey = value\n").unwrap();
        assert_eq!(doc.get("main", "key"), Some("value"));
        assert_eq!(doc.section("main").unwrap().entries().len(), 1);
    }

    #[test]
    fn inline_comments_need_preceding_whitespace() {
        let doc = IniDocument::parse("[c]\ncolor = #fff\npadded = value  ; tail\n").unwrap();
        assert_eq!(doc.get("c", "color"), Some("#fff"));
        assert_eq!(doc.get("c", "padded"), Some("value"));
    }

    #[test]
    fn multiline_value_by_indent() {
        let input = "[opts]\ndeps =\n    one\n    two\nnext = x\n";
        let doc = IniDocument::parse(input).unwrap();
        assert_eq!(doc.get("opts", "deps"), Some("\none\ntwo"));
        assert_eq!(doc.get("opts", "next"), Some("x"));
    }

    #[test]
    fn continuation_needs_strictly_deeper_indent() {
        // The second line sits at the same indent as the key: a new key.
        let doc = IniDocument::parse("[s]\na = 1\nb = 2\n").unwrap();
        assert_eq!(doc.get("s", "a"), Some("1"));
        assert_eq!(doc.get("s", "b"), Some("2"));
    }

    #[test]
    fn indented_key_then_deeper_continuation() {
        let input = "[s]\n  key = first\n      second\n";
        let doc = IniDocument::parse(input).unwrap();
        assert_eq!(doc.get("s", "key"), Some("first\nsecond"));
    }

    #[test]
    fn blank_line_kept_only_before_more_continuation() {
        let kept = "[s]\nk = a\n\n    b\n";
        assert_eq!(IniDocument::parse(kept).unwrap().get("s", "k"), Some("a\n\nb"));

        let trimmed = "[s]\nk = a\n\nnext = x\n";
        assert_eq!(IniDocument::parse(trimmed).unwrap().get("s", "k"), Some("a"));
    }

    #[test]
    fn comment_inside_block_does_not_terminate_it() {
        let input = "[s]\nk = a\n    # interior note\n    b\n";
        assert_eq!(IniDocument::parse(input).unwrap().get("s", "k"), Some("a\nb"));
    }

    #[test]
    fn continuation_with_separator_stays_a_continuation() {
        let input = "[opts]\ninstall_requires =\n    requests >= 2.0\n";
        let doc = IniDocument::parse(input).unwrap();
        assert_eq!(doc.get("opts", "install_requires"), Some("\nrequests >= 2.0"));
    }

    #[test]
    fn bracket_without_close_but_with_separator_is_a_key() {
        let doc = IniDocument::parse("[s]\n[odd = value\n").unwrap();
        assert_eq!(doc.get("s", "[odd"), Some("value"));
    }

    #[test]
    fn section_header_ignores_trailing_garbage() {
        let doc = IniDocument::parse("[name] trailing\nk = v\n").unwrap();
        assert_eq!(doc.get("name", "k"), Some("v"));
    }

    #[test]
    fn duplicate_sections_merge() {
        let input = "[s]\na = 1\n[other]\nx = y\n[s]\nb = 2\n";
        let doc = IniDocument::parse(input).unwrap();
        assert_eq!(doc.get("s", "a"), Some("1"));
        assert_eq!(doc.get("s", "b"), Some("2"));
        assert_eq!(doc.sections().len(), 2);
    }

    #[test]
    fn duplicate_keys_overwrite_keeping_position() {
        let doc = IniDocument::parse("[s]\na = 1\nb = 2\na = 3\n").unwrap();
        let entries = doc.section("s").unwrap().entries();
        assert_eq!(entries, &[("a".into(), "3".into()), ("b".into(), "2".into())]);
    }

    #[test]
    fn earliest_separator_wins() {
        let doc = IniDocument::parse("[s]\na:b = c\nd=e:f\n").unwrap();
        assert_eq!(doc.get("s", "a"), Some("b = c"));
        assert_eq!(doc.get("s", "d"), Some("e:f"));
    }

    #[test]
    fn values_are_never_interpolated() {
        let doc = IniDocument::parse("[s]\ntemplate = %(name)s-%(version)s\n").unwrap();
        assert_eq!(doc.get("s", "template"), Some("%(name)s-%(version)s"));
    }

    #[test]
    fn empty_value_is_allowed() {
        let doc = IniDocument::parse("[s]\nk =\n").unwrap();
        assert_eq!(doc.get("s", "k"), Some(""));
    }

    #[test]
    fn error_empty_section_name() {
        assert_eq!(
            IniDocument::parse("[]\n").unwrap_err(),
            IniError::EmptySectionName { line: 1 }
        );
    }

    #[test]
    fn error_unclosed_section() {
        assert_eq!(
            IniDocument::parse("[s]\nok = 1\n[broken\n").unwrap_err(),
            IniError::UnclosedSection { line: 3 }
        );
    }

    #[test]
    fn error_no_separator() {
        assert_eq!(
            IniDocument::parse("[s]\njust words\n").unwrap_err(),
            IniError::NoSeparator { line: 2 }
        );
    }

    #[test]
    fn error_empty_key() {
        assert_eq!(
            IniDocument::parse("[s]\n= value\n").unwrap_err(),
            IniError::EmptyKey { line: 2 }
        );
    }

    /// A realistic setup.cfg subset; expectations match Python 3.13
    /// configparser with inline_comment_prefixes=('#',';'),
    /// interpolation=None, allow_unnamed_section=True, strict=False,
    /// optionxform=str.
    #[test]
    fn setup_cfg_subset_agrees_with_configparser() {
        let input = "\
[metadata]
name = example-pkg
version = 0.4.1
author = Jane Doe  # release owner
long_description = file: README.md
classifiers =
    Programming Language :: Python :: 3
    License :: OSI Approved :: MIT License

[options]
zip_safe = False
include_package_data = True
install_requires =
    requests>=2.25
    importlib-metadata; python_version<\"3.8\"

[options.extras_require]
test =
    pytest
    pytest-cov
";
        let doc = IniDocument::parse(input).unwrap();
        assert_eq!(doc.get("metadata", "name"), Some("example-pkg"));
        assert_eq!(doc.get("metadata", "author"), Some("Jane Doe"));
        assert_eq!(
            doc.get("metadata", "classifiers"),
            Some("\nProgramming Language :: Python :: 3\nLicense :: OSI Approved :: MIT License")
        );
        assert_eq!(doc.get("options", "zip_safe"), Some("False"));
        // The ';' here follows a non-space character, so it is not an
        // inline comment and the environment marker survives.
        assert_eq!(
            doc.get("options", "install_requires"),
            Some("\nrequests>=2.25\nimportlib-metadata; python_version<\"3.8\"")
        );
        assert_eq!(
            doc.get("options.extras_require", "test"),
            Some("\npytest\npytest-cov")
        );
        let names: Vec<&str> = doc.sections().iter().map(|s| s.name()).collect();
        assert_eq!(names, ["metadata", "options", "options.extras_require"]);
    }
}
