use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::{env, fs, io};

use serde::Deserialize;

use crate::site::Link;

#[derive(Deserialize, Default)]
pub struct Site {
    pub title: Option<String>,
    pub description: Option<String>,
    pub nav: Option<Vec<Link>>,
}

#[derive(Deserialize)]
pub struct Paths {
    /// Each collection lives in a sub-directory named after it
    #[serde(default = "default_content_dir")]
    pub content_dir: PathBuf,
}

impl Default for Paths {
    fn default() -> Self {
        Paths { content_dir: default_content_dir() }
    }
}

fn default_content_dir() -> PathBuf {
    PathBuf::from("content")
}

#[derive(Deserialize, Default)]
pub struct Defaults {
    #[serde(default)]
    pub include_drafts: bool,
}

#[derive(Deserialize)]
pub struct Log {
    pub level: LogLevel,
    pub log_to_console: bool,
    pub location: Option<PathBuf>,
}

#[derive(Deserialize, Copy, Clone, Debug, PartialEq)]
pub enum LogLevel {
    Critical = 0,
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

#[derive(Deserialize, Default)]
pub struct Config {
    pub site: Option<Site>,
    #[serde(default)]
    pub paths: Paths,
    #[serde(default)]
    pub defaults: Defaults,
    pub log: Option<Log>,
}

impl Config {
    pub fn collection_dir(&self, collection: &str) -> PathBuf {
        self.paths.content_dir.join(collection)
    }
}

fn parse_path(path: PathBuf) -> io::Result<PathBuf> {
    let Some(str_path) = path.to_str() else {
        return Ok(path);
    };
    if !str_path.starts_with("${exe_dir}") {
        return Ok(path);
    }

    let cur_exe = env::current_exe()?;
    let exe_dir = cur_exe.parent()
        .and_then(|p| p.to_str())
        .ok_or_else(|| io::Error::new(ErrorKind::NotFound, "Could not resolve the executable directory"))?;
    Ok(PathBuf::from(str_path.replace("${exe_dir}", exe_dir)))
}

pub fn parse_config(cfg_content: &str) -> io::Result<Config> {
    let mut cfg: Config = match toml::from_str::<Config>(cfg_content) {
        Ok(cfg) => cfg,
        Err(e) => return Err(io::Error::new(
            ErrorKind::InvalidData, format!("Error parsing configuration file: {}", e))),
    };

    cfg.paths = Paths {
        content_dir: parse_path(cfg.paths.content_dir)?,
    };
    if let Some(ref mut log) = cfg.log {
        if let Some(location) = log.location.take() {
            log.location = Some(parse_path(location)?);
        }
    }

    Ok(cfg)
}

pub fn read_config(cfg_path: &Path) -> io::Result<Config> {
    let cfg_content = match fs::read_to_string(cfg_path) {
        Ok(content) => content,
        Err(e) => return Err(io::Error::new(e.kind(), format!("Error opening configuration file {}: {}", cfg_path.display(), e))),
    };

    parse_config(&cfg_content)
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn test_full_config() {
        let cfg = parse_config(r##"
[site]
title = "My blog"
description = "Notes"

[paths]
content_dir = "src/content"

[defaults]
include_drafts = true

[log]
level = "Debug"
log_to_console = true
location = "/tmp/quire/server.log"
"##).unwrap();

        let site = cfg.site.as_ref().unwrap();
        assert_eq!(site.title.as_deref(), Some("My blog"));
        assert!(site.nav.is_none());
        assert_eq!(cfg.collection_dir("posts"), PathBuf::from("src/content/posts"));
        assert!(cfg.defaults.include_drafts);
        let log = cfg.log.as_ref().unwrap();
        assert_eq!(log.level, LogLevel::Debug);
        assert_eq!(log.location, Some(PathBuf::from("/tmp/quire/server.log")));
    }

    #[test]
    fn test_empty_config_uses_defaults() {
        let cfg = parse_config("").unwrap();
        assert!(cfg.site.is_none());
        assert!(cfg.log.is_none());
        assert!(!cfg.defaults.include_drafts);
        assert_eq!(cfg.paths.content_dir, PathBuf::from("content"));
    }

    #[test]
    fn test_exe_dir_expansion() {
        let cfg = parse_config(r##"
[paths]
content_dir = "${exe_dir}/content"
"##).unwrap();
        let exe = env::current_exe().unwrap();
        assert_eq!(cfg.paths.content_dir, exe.parent().unwrap().join("content"));
    }

    #[test]
    fn test_invalid_config() {
        let err = parse_config("[paths]\ncontent_dir = 12").err().unwrap();
        assert_eq!(err.kind(), ErrorKind::InvalidData);
    }

    #[test]
    fn test_read_config_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[defaults]\ninclude_drafts = true").unwrap();
        let cfg = read_config(file.path()).unwrap();
        assert!(cfg.defaults.include_drafts);

        let err = read_config(Path::new("/definitely/not/here/quire.toml")).err().unwrap();
        assert_eq!(err.kind(), ErrorKind::NotFound);
    }
}
