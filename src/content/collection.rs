use std::collections::{BTreeMap, HashSet};
use std::ffi::OsStr;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::Serialize;
use spdlog::{debug, warn};

use crate::content::frontmatter::parse_frontmatter;
use crate::content::schema::{Post, Schema, POST_SCHEMA};
use crate::error::{CollectionError, ContentError};
use crate::util::slug::slug_from_path;

const CONTENT_EXTENSIONS: &[&str] = &["md", "markdown", "mdx"];

/// A named set of documents and the schema their frontmatter must satisfy.
pub struct CollectionDef {
    pub name: &'static str,
    pub schema: &'static Schema,
}

pub fn collections() -> Vec<CollectionDef> {
    vec![
        CollectionDef { name: "posts", schema: &POST_SCHEMA },
    ]
}

pub fn find_collection(name: &str) -> Option<CollectionDef> {
    collections().into_iter().find(|c| c.name == name)
}

#[derive(Debug, Clone, Serialize)]
pub struct Entry {
    /// Path inside the collection directory, always with `/` separators
    pub id: String,
    pub slug: String,
    pub collection: &'static str,
    #[serde(skip)]
    pub body: String,
    pub data: Post,
}

#[derive(Debug)]
pub struct Collection {
    pub name: &'static str,
    pub entries: Vec<Entry>,
}

impl Collection {
    /// Reads and validates every document under `dir`.
    /// Fails with all invalid files when at least one does not match the schema.
    pub fn load(def: &CollectionDef, dir: &Path) -> Result<Collection, CollectionError> {
        if !dir.exists() {
            warn!("Collection '{}' has no directory at {}", def.name, dir.display());
            return Ok(Collection { name: def.name, entries: vec![] });
        }

        let mut files = vec![];
        list_content_files(dir, &mut files).map_err(|source| CollectionError::Read {
            collection: def.name.to_string(),
            dir: dir.to_path_buf(),
            source,
        })?;
        files.sort();

        let mut entries = vec![];
        let mut errors = vec![];
        for file in files {
            match load_entry(def, dir, &file) {
                Ok(entry) => {
                    debug!("Loaded {} from {}", entry.slug, file.display());
                    entries.push(entry);
                }
                Err(e) => {
                    warn!("{}", e);
                    errors.push(e);
                }
            }
        }

        if !errors.is_empty() {
            return Err(CollectionError::Invalid {
                collection: def.name.to_string(),
                errors,
            });
        }

        entries.sort_by(|a, b| a.id.cmp(&b.id));
        for entry in duplicate_slugs(&entries) {
            warn!("Duplicate slug '{}' in collection '{}' ({})", entry.slug, def.name, entry.id);
        }

        debug!("Collection '{}': {} entries loaded from {}", def.name, entries.len(), dir.display());
        Ok(Collection { name: def.name, entries })
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, slug: &str) -> Option<&Entry> {
        self.entries.iter().find(|e| e.slug == slug)
    }

    /// Entries sorted newest first; drafts only when asked for.
    pub fn sorted(&self, include_drafts: bool) -> Vec<&Entry> {
        let mut entries: Vec<&Entry> = self.entries.iter()
            .filter(|e| include_drafts || !e.data.draft)
            .collect();
        entries.sort_by(|a, b| b.data.pub_date.cmp(&a.data.pub_date).then_with(|| a.id.cmp(&b.id)));
        entries
    }

    pub fn published(&self) -> Vec<&Entry> {
        self.sorted(false)
    }

    /// Published entries grouped by tag, each group newest first.
    pub fn tags(&self) -> BTreeMap<&str, Vec<&Entry>> {
        let mut tags: BTreeMap<&str, Vec<&Entry>> = BTreeMap::new();
        for entry in self.published() {
            for tag in &entry.data.tags {
                let group = tags.entry(tag.as_str()).or_default();
                // A tag listed twice in one post still counts once
                if !group.iter().any(|e| std::ptr::eq(*e, entry)) {
                    group.push(entry);
                }
            }
        }
        tags
    }
}

pub fn load_entry(def: &CollectionDef, root: &Path, file: &Path) -> Result<Entry, ContentError> {
    let content = fs::read_to_string(file).map_err(|e| ContentError::io(file, e))?;
    let (data, body) = parse_frontmatter(file, &content)?;

    let post = Post::from_validated(def.schema, &data).map_err(|issues| ContentError::Schema {
        path: file.to_path_buf(),
        issues,
    })?;

    let relative = file.strip_prefix(root).unwrap_or(file);
    let id = relative.iter()
        .map(|s| s.to_string_lossy())
        .collect::<Vec<_>>()
        .join("/");

    Ok(Entry {
        id,
        slug: slug_from_path(relative),
        collection: def.name,
        body: body.to_string(),
        data: post,
    })
}

/// Entries whose slug was already taken by an entry earlier in `entries`.
pub fn duplicate_slugs(entries: &[Entry]) -> Vec<&Entry> {
    let mut seen = HashSet::new();
    entries.iter()
        .filter(|e| !seen.insert(e.slug.as_str()))
        .collect()
}

// Works on raw bytes so names that are not UTF-8 are still listed
fn is_hidden(name: &OsStr) -> bool {
    let bytes = name.as_encoded_bytes();
    bytes.starts_with(b".") || bytes.starts_with(b"_")
}

fn list_content_files(dir: &Path, files: &mut Vec<PathBuf>) -> io::Result<()> {
    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        if is_hidden(&entry.file_name()) {
            continue;
        }

        let file_type = entry.file_type()?;
        let path = entry.path();
        if file_type.is_dir() {
            list_content_files(&path, files)?;
        } else if file_type.is_file() {
            let is_content = path.extension()
                .and_then(|e| e.to_str())
                .is_some_and(|e| CONTENT_EXTENSIONS.contains(&e));
            if is_content {
                files.push(path);
            }
        }
    }
    Ok(())
}
