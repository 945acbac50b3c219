use std::fmt::{Display, Formatter};
use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use spdlog::warn;

use quire::logger::configure_logger;

use crate::check::check_cmd;
use crate::config::open_config;
use crate::list::list_cmd;
use crate::post::post_cmd;
use crate::site::site_cmd;

mod check;
mod config;
mod list;
mod post;
mod site;

const CFG_FILE_NAME: &str = "quire.toml";

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Config path
    #[arg(short, long, global = true)]
    config_path: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Validate the frontmatter of every document. Fails if any is invalid
    Check(CheckArgs),
    /// List posts, newest first
    List(ListArgs),
    /// Create a new post
    New(PostArgs),
    /// Print the site title, description and navigation links
    Site(SiteArgs),
}

#[derive(Parser, Debug)]
struct CheckArgs {
    /// Only check this collection
    #[arg(long)]
    collection: Option<String>,
}

#[derive(Parser, Debug)]
struct ListArgs {
    /// Include drafts
    #[arg(short, long)]
    drafts: bool,

    /// Only posts with this tag
    #[arg(short, long)]
    tag: Option<String>,

    /// Print as JSON
    #[arg(long)]
    json: bool,
}

#[derive(Parser, Debug)]
struct PostArgs {
    /// Title of the post. Required for file and dir outputs
    #[arg(short, long)]
    title: Option<String>,

    /// Short description used in listings and meta tags
    #[arg(short, long)]
    description: Option<String>,

    /// Tag to add. Can be repeated
    #[arg(long = "tag")]
    tags: Vec<String>,

    /// Mark the post as a draft
    #[arg(long)]
    draft: bool,

    /// Post generation options
    #[arg(short, long, default_value_t = PostOutput::Stdout)]
    output: PostOutput,
}

#[derive(Parser, Debug)]
struct SiteArgs {
    /// Print as JSON
    #[arg(long)]
    json: bool,
}

#[derive(Clone, Debug, PartialEq, ValueEnum)]
enum PostOutput {
    /// Writes the new post content to the stdout
    Stdout,
    /// Writes the new post to <slug>.md in the posts collection
    File,
    /// Writes the new post to <slug>/index.md in the posts collection (posts with images)
    Dir,
}

impl Display for PostOutput {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            PostOutput::Stdout => "stdout",
            PostOutput::File => "file",
            PostOutput::Dir => "dir",
        };
        write!(f, "{}", name)
    }
}

fn main() -> Result<()> {
    let args = Args::parse();
    let config_path = args.config_path.map(PathBuf::from);

    let config = open_config(config_path)?;

    if let Err(err) = configure_logger(&config) {
        warn!("Error creating logger sinks. Using console instead. Desc={}", err);
    }

    match args.command {
        Command::Check(args) => check_cmd(&config, args),
        Command::List(args) => list_cmd(&config, args),
        Command::New(args) => post_cmd(&config, args),
        Command::Site(args) => site_cmd(&config, args),
    }
}
