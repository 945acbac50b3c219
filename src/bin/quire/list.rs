use anyhow::{anyhow, Result};

use quire::config::Config;
use quire::content::{find_collection, Collection, Entry};

use crate::ListArgs;

fn format_entry(entry: &Entry) -> String {
    let draft = if entry.data.draft { " [draft]" } else { "" };
    let tags = if entry.data.tags.is_empty() {
        String::new()
    } else {
        format!(" ({})", entry.data.tags.join(", "))
    };
    format!("{}  {}{}  {}{}",
            entry.data.pub_date.format("%Y-%m-%d"),
            entry.slug,
            draft,
            entry.data.title,
            tags)
}

pub fn list_cmd(config: &Config, args: ListArgs) -> Result<()> {
    let def = find_collection("posts").ok_or_else(|| anyhow!("The posts collection is not defined"))?;
    let collection = Collection::load(&def, &config.collection_dir(def.name))?;

    let include_drafts = args.drafts || config.defaults.include_drafts;
    let mut entries = collection.sorted(include_drafts);
    if let Some(ref tag) = args.tag {
        entries.retain(|e| e.data.tags.iter().any(|t| t == tag));
    }

    if args.json {
        println!("{}", serde_json::to_string_pretty(&entries)?);
        return Ok(());
    }

    for entry in entries {
        println!("{}", format_entry(entry));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};
    use quire::content::Post;

    use super::*;

    #[test]
    fn test_format_entry() {
        let mut entry = Entry {
            id: "hello.md".to_string(),
            slug: "hello".to_string(),
            collection: "posts",
            body: String::new(),
            data: Post {
                title: "Hello".to_string(),
                description: "First post".to_string(),
                pub_date: Utc.with_ymd_and_hms(2024, 1, 14, 10, 0, 0).unwrap(),
                updated_date: None,
                tags: vec!["rust".to_string(), "web".to_string()],
                draft: false,
                hero_image: None,
            },
        };
        assert_eq!(format_entry(&entry), "2024-01-14  hello  Hello (rust, web)");

        entry.data.draft = true;
        entry.data.tags.clear();
        assert_eq!(format_entry(&entry), "2024-01-14  hello [draft]  Hello");
    }
}
