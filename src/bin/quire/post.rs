use std::fmt::Write;
use std::fs::{create_dir_all, OpenOptions};
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use chrono::{NaiveDate, Utc};
use serde::Serialize;

use quire::config::Config;
use quire::util::slug::slugify;

use crate::{PostArgs, PostOutput};

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct NewPost<'a> {
    title: &'a str,
    description: &'a str,
    pub_date: String,
    tags: &'a [String],
    draft: bool,
}

fn render_header(post: &NewPost) -> Result<String> {
    // serde_yaml takes care of quoting titles with ':' or '#'
    let yaml = serde_yaml::to_string(post)?;
    Ok(format!("---\n{}---\n\n", yaml))
}

fn render_body() -> String {
    let mut buf = String::new();

    let _ = writeln!(&mut buf, "This is a body example");
    let _ = writeln!(&mut buf, "Please remove it and replace with your content");

    buf
}

fn post_file_name(title: &str, date: &NaiveDate, output: &PostOutput) -> Result<PathBuf> {
    let title_slug = slugify(title);
    if title_slug.is_empty() {
        bail!("The title '{}' has no letters or digits to build a file name from", title);
    }

    let slug = format!("{}-{}", date.format("%Y%m%d"), title_slug);
    Ok(match output {
        PostOutput::Dir => PathBuf::from(slug).join("index.md"),
        _ => PathBuf::from(format!("{}.md", slug)),
    })
}

fn write_new(path: &Path, content: &str) -> Result<()> {
    use std::io::Write;

    if let Some(parent) = path.parent() {
        create_dir_all(parent).with_context(|| format!("Error creating directory {}", parent.display()))?;
    }
    let mut file = OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(path)
        .with_context(|| format!("Error creating {}", path.display()))?;
    file.write_all(content.as_bytes())?;
    Ok(())
}

pub fn post_cmd(config: &Config, args: PostArgs) -> Result<()> {
    let today = Utc::now().date_naive();

    if args.output != PostOutput::Stdout && args.title.is_none() {
        bail!("For file and dir outputs, title is required");
    }

    let title = args.title.as_deref().unwrap_or("Replace with title");
    let description = args.description.as_deref().unwrap_or("Replace with a short description");
    let header = render_header(&NewPost {
        title,
        description,
        pub_date: today.format("%Y-%m-%d").to_string(),
        tags: &args.tags,
        draft: args.draft,
    })?;
    let content = format!("{}{}", header, render_body());

    match args.output {
        PostOutput::Stdout => {
            print!("{}", content);
        }
        PostOutput::File | PostOutput::Dir => {
            let path = config.collection_dir("posts").join(post_file_name(title, &today, &args.output)?);
            println!("Creating post {}", path.display());
            write_new(&path, &content)?;
        }
    }

    Ok(())
}
