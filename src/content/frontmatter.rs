//! Front-matter parsing

use indexmap::IndexMap;
use serde::{Deserialize, Deserializer};
use thiserror::Error;

const DELIMITER: &str = "---";

/// Why a header block could not be turned into [`FrontMatter`]
#[derive(Debug, Error)]
pub enum FrontMatterError {
    #[error("unsupported front-matter language: {0}")]
    UnsupportedLanguage(String),

    #[error("YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Custom deserializer that keeps any scalar as a string
///
/// Lists and mappings are consumed and read as absent.
fn scalar_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de::{self, IgnoredAny, MapAccess, SeqAccess, Visitor};
    use std::fmt;

    struct ScalarString;

    impl<'de> Visitor<'de> for ScalarString {
        type Value = Option<String>;

        fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
            formatter.write_str("a front-matter value")
        }

        fn visit_str<E>(self, value: &str) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(Some(value.to_string()))
        }

        fn visit_string<E>(self, value: String) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(Some(value))
        }

        fn visit_bool<E>(self, value: bool) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(Some(value.to_string()))
        }

        fn visit_i64<E>(self, value: i64) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(Some(value.to_string()))
        }

        fn visit_u64<E>(self, value: u64) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(Some(value.to_string()))
        }

        fn visit_f64<E>(self, value: f64) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(Some(value.to_string()))
        }

        fn visit_some<D>(self, deserializer: D) -> Result<Self::Value, D::Error>
        where
            D: Deserializer<'de>,
        {
            deserializer.deserialize_any(ScalarString)
        }

        fn visit_none<E>(self) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(None)
        }

        fn visit_unit<E>(self) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(None)
        }

        fn visit_seq<S>(self, mut seq: S) -> Result<Self::Value, S::Error>
        where
            S: SeqAccess<'de>,
        {
            while seq.next_element::<IgnoredAny>()?.is_some() {}
            Ok(None)
        }

        fn visit_map<M>(self, mut map: M) -> Result<Self::Value, M::Error>
        where
            M: MapAccess<'de>,
        {
            while map.next_entry::<IgnoredAny, IgnoredAny>()?.is_some() {}
            Ok(None)
        }
    }

    deserializer.deserialize_any(ScalarString)
}

/// Front-matter data from a post
///
/// Only `date` and `title` are named. They are left as `None` when the header
/// omits them; nothing here checks that they are present or well formed.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct FrontMatter {
    #[serde(default, deserialize_with = "scalar_string")]
    pub title: Option<String>,

    /// Publication date, compared as a plain string when sorting
    #[serde(default, deserialize_with = "scalar_string")]
    pub date: Option<String>,

    /// Additional custom fields, in header order
    #[serde(flatten)]
    pub extra: IndexMap<String, serde_yaml::Value>,
}

impl FrontMatter {
    /// Parse front-matter from content string
    /// Returns (front_matter, remaining_content)
    ///
    /// The header has to open on the very first line. `---` and `---yaml`
    /// introduce YAML, `---json` introduces JSON. A header without a closing
    /// `---` line is treated as part of the body.
    pub fn parse(content: &str) -> Result<(Self, &str), FrontMatterError> {
        let content = content.strip_prefix('\u{feff}').unwrap_or(content);

        let Some(rest) = content.strip_prefix(DELIMITER) else {
            return Ok((FrontMatter::default(), content));
        };
        let Some(newline) = rest.find('\n') else {
            return Ok((FrontMatter::default(), content));
        };

        let language = rest[..newline].trim();
        // "----" and longer are thematic breaks, not headers
        if language.starts_with('-') {
            return Ok((FrontMatter::default(), content));
        }

        let header_start = &rest[newline + 1..];
        let mut offset = 0;
        for line in header_start.split_inclusive('\n') {
            if line.trim_end_matches(['\n', '\r']) == DELIMITER {
                let header = &header_start[..offset];
                let body = &header_start[offset + line.len()..];
                let fm = Self::parse_header(language, header)?;
                return Ok((fm, body));
            }
            offset += line.len();
        }

        // No closing ---, treat as no front-matter
        Ok((FrontMatter::default(), content))
    }

    fn parse_header(language: &str, header: &str) -> Result<Self, FrontMatterError> {
        match language {
            "" | "yaml" | "yml" => {
                // Blank or comment-only headers deserialize to null, not a mapping
                let is_blank = header.lines().all(|line| {
                    let trimmed = line.trim();
                    trimmed.is_empty() || trimmed.starts_with('#')
                });
                if is_blank {
                    return Ok(FrontMatter::default());
                }
                Ok(serde_yaml::from_str(header)?)
            }
            "json" => {
                if header.trim().is_empty() {
                    return Ok(FrontMatter::default());
                }
                Ok(serde_json::from_str(header)?)
            }
            other => Err(FrontMatterError::UnsupportedLanguage(other.to_string())),
        }
    }

    /// Names of the expected fields the header left out
    pub fn missing_fields(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.date.is_none() {
            missing.push("date");
        }
        if self.title.is_none() {
            missing.push("title");
        }
        missing
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_yaml_frontmatter() {
        let content = r#"---
date: 2024-01-15
title: "Hello World"
tags:
  - rust
  - blog
---
This is the content.
"#;

        let (fm, remaining) = FrontMatter::parse(content).unwrap();
        assert_eq!(fm.title.as_deref(), Some("Hello World"));
        assert_eq!(fm.date.as_deref(), Some("2024-01-15"));
        assert_eq!(
            fm.extra.get("tags"),
            Some(&serde_yaml::from_str::<serde_yaml::Value>("[rust, blog]").unwrap())
        );
        assert_eq!(remaining, "This is the content.\n");
    }

    #[test]
    fn test_parse_json_frontmatter() {
        let content = "---json\n{\"title\": \"Test Post\", \"date\": \"2023-05-01\"}\n---\n# Body\n";

        let (fm, remaining) = FrontMatter::parse(content).unwrap();
        assert_eq!(fm.title.as_deref(), Some("Test Post"));
        assert_eq!(fm.date.as_deref(), Some("2023-05-01"));
        assert_eq!(remaining, "# Body\n");
    }

    #[test]
    fn test_no_frontmatter() {
        let content = "# Just markdown\n\nNo header here.\n";
        let (fm, remaining) = FrontMatter::parse(content).unwrap();
        assert_eq!(fm, FrontMatter::default());
        assert_eq!(remaining, content);
    }

    #[test]
    fn test_header_must_open_first_line() {
        let content = "\n---\ntitle: Late\n---\nBody\n";
        let (fm, remaining) = FrontMatter::parse(content).unwrap();
        assert_eq!(fm.title, None);
        assert_eq!(remaining, content);
    }

    #[test]
    fn test_unclosed_header_is_body() {
        let content = "---\ntitle: Never closed\n\nSome text\n";
        let (fm, remaining) = FrontMatter::parse(content).unwrap();
        assert_eq!(fm.title, None);
        assert_eq!(remaining, content);
    }

    #[test]
    fn test_thematic_break_is_not_header() {
        let content = "-----\ntitle: nope\n---\n";
        let (fm, remaining) = FrontMatter::parse(content).unwrap();
        assert_eq!(fm.title, None);
        assert_eq!(remaining, content);
    }

    #[test]
    fn test_empty_header() {
        let (fm, remaining) = FrontMatter::parse("---\n---\nBody").unwrap();
        assert_eq!(fm, FrontMatter::default());
        assert_eq!(remaining, "Body");

        let (fm, _) = FrontMatter::parse("---\n# only a comment\n---\n").unwrap();
        assert_eq!(fm, FrontMatter::default());
    }

    #[test]
    fn test_crlf_and_bom() {
        let content = "\u{feff}---\r\ntitle: Windows\r\n---\r\nBody\r\n";
        let (fm, remaining) = FrontMatter::parse(content).unwrap();
        assert_eq!(fm.title.as_deref(), Some("Windows"));
        assert_eq!(remaining, "Body\r\n");
    }

    #[test]
    fn test_scalar_values_become_strings() {
        let content = "---\ndate: 2024\ntitle: true\n---\n";
        let (fm, _) = FrontMatter::parse(content).unwrap();
        assert_eq!(fm.date.as_deref(), Some("2024"));
        assert_eq!(fm.title.as_deref(), Some("true"));
    }

    #[test]
    fn test_structured_values_read_as_absent() {
        let content = "---\ntitle: [Part, One]\ndate:\n  year: 2024\nlayout: post\n---\nBody\n";
        let (fm, remaining) = FrontMatter::parse(content).unwrap();
        assert_eq!(fm.title, None);
        assert_eq!(fm.date, None);
        assert_eq!(
            fm.extra.get("layout"),
            Some(&serde_yaml::Value::String("post".to_string()))
        );
        assert_eq!(remaining, "Body\n");

        let json = "---json\n{\"title\": {\"en\": \"Hi\"}, \"date\": [2024]}\n---\n";
        let (fm, _) = FrontMatter::parse(json).unwrap();
        assert_eq!(fm.missing_fields(), vec!["date", "title"]);
    }

    #[test]
    fn test_missing_fields() {
        let (fm, _) = FrontMatter::parse("---\ntitle: Only title\ndate:\n---\n").unwrap();
        assert_eq!(fm.date, None);
        assert_eq!(fm.missing_fields(), vec!["date"]);
        assert_eq!(FrontMatter::default().missing_fields(), vec!["date", "title"]);
    }

    #[test]
    fn test_invalid_yaml() {
        let err = FrontMatter::parse("---\ntitle: [unclosed\n---\n").unwrap_err();
        assert!(matches!(err, FrontMatterError::Yaml(_)));
    }

    #[test]
    fn test_unsupported_language() {
        let err = FrontMatter::parse("---toml\ntitle = \"x\"\n---\n").unwrap_err();
        assert!(matches!(err, FrontMatterError::UnsupportedLanguage(lang) if lang == "toml"));
    }
}
