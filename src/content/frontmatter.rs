//! Splitting a content file into its frontmatter block and body.

use std::path::Path;

use serde_json::{Map, Value};

use crate::error::{ContentError, Result};
use crate::util::toml_value::table_to_json;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrontmatterFormat {
    /// Fenced by `---` lines
    Yaml,
    /// Fenced by `+++` lines
    Toml,
}

impl FrontmatterFormat {
    pub fn delimiter(&self) -> &'static str {
        match self {
            Self::Yaml => "---",
            Self::Toml => "+++",
        }
    }

    fn from_fence(line: &str) -> Option<FrontmatterFormat> {
        match line.trim_end() {
            "---" => Some(Self::Yaml),
            "+++" => Some(Self::Toml),
            _ => None,
        }
    }
}

#[derive(Debug, PartialEq)]
pub enum Split<'a> {
    /// The file does not open with a fence
    Bare(&'a str),
    Fenced {
        format: FrontmatterFormat,
        frontmatter: &'a str,
        body: &'a str,
    },
    Unterminated(FrontmatterFormat),
}

/// The opening fence must be the first line of the file and the closing fence a line of its own.
pub fn split_frontmatter(content: &str) -> Split<'_> {
    let content = content.strip_prefix('\u{feff}').unwrap_or(content);
    let mut lines = content.split_inclusive('\n');

    let Some(first) = lines.next() else {
        return Split::Bare(content);
    };
    let Some(format) = FrontmatterFormat::from_fence(first) else {
        return Split::Bare(content);
    };

    let start = first.len();
    let mut offset = start;
    for line in lines {
        if line.trim_end() == format.delimiter() {
            let frontmatter = &content[start..offset];
            let body = &content[offset + line.len()..];
            return Split::Fenced {
                format,
                frontmatter,
                body: body.trim_start_matches(['\r', '\n']),
            };
        }
        offset += line.len();
    }

    Split::Unterminated(format)
}

/// Parses the frontmatter into a JSON object, returning it with the body.
/// A file without frontmatter yields an empty object.
pub fn parse_frontmatter<'a>(path: &Path, content: &'a str) -> Result<(Map<String, Value>, &'a str)> {
    let (format, frontmatter, body) = match split_frontmatter(content) {
        Split::Bare(body) => return Ok((Map::new(), body)),
        Split::Unterminated(format) => {
            return Err(ContentError::UnterminatedFrontmatter {
                path: path.to_path_buf(),
                fence: format.delimiter(),
            });
        }
        Split::Fenced { format, frontmatter, body } => (format, frontmatter, body),
    };

    if frontmatter.trim().is_empty() {
        return Ok((Map::new(), body));
    }

    let data = match format {
        FrontmatterFormat::Yaml => {
            let value: Value = serde_yaml::from_str(frontmatter)
                .map_err(|e| ContentError::frontmatter(path, e.to_string()))?;
            match value {
                Value::Object(map) => map,
                Value::Null => Map::new(),
                _ => return Err(ContentError::frontmatter(path, "frontmatter must be a mapping of keys to values")),
            }
        }
        FrontmatterFormat::Toml => {
            let table: toml::Table = toml::from_str(frontmatter)
                .map_err(|e| ContentError::frontmatter(path, e.to_string()))?;
            table_to_json(table)
        }
    };

    Ok((data, body))
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use crate::test_data::{POST_DATA, TOML_POST_DATA};

    use super::*;

    #[test]
    fn test_split_yaml() {
        let Split::Fenced { format, frontmatter, body } = split_frontmatter(POST_DATA) else {
            panic!("expected fenced frontmatter");
        };
        assert_eq!(format, FrontmatterFormat::Yaml);
        assert!(frontmatter.starts_with("title:"));
        assert!(body.starts_with("How to be a great software engineer?"));
    }

    #[test]
    fn test_split_toml() {
        let Split::Fenced { format, frontmatter, .. } = split_frontmatter(TOML_POST_DATA) else {
            panic!("expected fenced frontmatter");
        };
        assert_eq!(format, FrontmatterFormat::Toml);
        assert!(frontmatter.contains("title = "));
    }

    #[test]
    fn test_fence_in_body_is_kept() {
        let content = "---\ntitle: A\n---\nabove\n---\nbelow\n";
        let Split::Fenced { frontmatter, body, .. } = split_frontmatter(content) else {
            panic!("expected fenced frontmatter");
        };
        assert_eq!(frontmatter, "title: A\n");
        assert_eq!(body, "above\n---\nbelow\n");
    }

    #[test]
    fn test_crlf_and_bom() {
        let content = "\u{feff}---\r\ntitle: A\r\n---\r\n\r\nbody";
        let Split::Fenced { frontmatter, body, .. } = split_frontmatter(content) else {
            panic!("expected fenced frontmatter");
        };
        assert_eq!(frontmatter, "title: A\r\n");
        assert_eq!(body, "body");
    }

    #[test]
    fn test_no_frontmatter() {
        let content = "# Just a title\n\n---\n";
        assert_eq!(split_frontmatter(content), Split::Bare(content));
        assert_eq!(split_frontmatter(""), Split::Bare(""));

        let (data, body) = parse_frontmatter(Path::new("a.md"), content).unwrap();
        assert!(data.is_empty());
        assert_eq!(body, content);
    }

    #[test]
    fn test_unterminated() {
        assert_eq!(split_frontmatter("---\ntitle: A\n"), Split::Unterminated(FrontmatterFormat::Yaml));
        let err = parse_frontmatter(Path::new("a.md"), "+++\ntitle = 'A'\n").err().unwrap();
        assert!(matches!(err, ContentError::UnterminatedFrontmatter { fence: "+++", .. }));
    }

    #[test]
    fn test_parse_yaml() {
        let (data, _) = parse_frontmatter(Path::new("a.md"), POST_DATA).unwrap();
        assert_eq!(data["title"], json!("What I learned after 20+ years of software development"));
        assert_eq!(data["pubDate"], json!("2022-04-02"));
        assert_eq!(data["tags"], json!(["career", "engineering"]));
    }

    #[test]
    fn test_parse_toml_dates_as_text() {
        let (data, body) = parse_frontmatter(Path::new("a.md"), TOML_POST_DATA).unwrap();
        assert_eq!(data["pubDate"], json!("2024-02-12T22:54:00Z"));
        assert_eq!(data["draft"], json!(true));
        assert!(body.starts_with("Body of a TOML post"));
    }

    #[test]
    fn test_empty_frontmatter() {
        let (data, body) = parse_frontmatter(Path::new("a.md"), "---\n---\nbody").unwrap();
        assert!(data.is_empty());
        assert_eq!(body, "body");
    }

    #[test]
    fn test_non_mapping_frontmatter() {
        let err = parse_frontmatter(Path::new("a.md"), "---\n- one\n- two\n---\n").err().unwrap();
        assert!(matches!(err, ContentError::Frontmatter { .. }));

        let err = parse_frontmatter(Path::new("a.md"), "---\ntitle: [unclosed\n---\n").err().unwrap();
        assert!(err.to_string().contains("a.md"));
    }
}
