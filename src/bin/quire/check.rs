use anyhow::{anyhow, bail, Result};

use quire::config::Config;
use quire::content::{collections, find_collection, Collection};
use quire::error::{CollectionError, ContentError};

use crate::CheckArgs;

fn describe(err: &ContentError) -> String {
    match err {
        ContentError::Schema { path, issues } => {
            let mut buf = format!("✗ {}", path.display());
            for issue in issues {
                buf.push_str(&format!("\n      {}", issue));
            }
            buf
        }
        _ => format!("✗ {}", err),
    }
}

pub fn check_cmd(config: &Config, args: CheckArgs) -> Result<()> {
    let defs = match args.collection {
        Some(name) => vec![find_collection(&name).ok_or_else(|| anyhow!("Unknown collection '{}'", name))?],
        None => collections(),
    };

    let mut invalid = 0;
    for def in defs {
        let dir = config.collection_dir(def.name);
        println!("Checking collection '{}' in {}", def.name, dir.display());

        match Collection::load(&def, &dir) {
            Ok(collection) => {
                let drafts = collection.entries.iter().filter(|e| e.data.draft).count();
                println!("  ✓ {} entries, {} drafts", collection.len(), drafts);
            }
            Err(CollectionError::Invalid { errors, .. }) => {
                for err in &errors {
                    println!("  {}", describe(err));
                }
                invalid += errors.len();
            }
            Err(err) => return Err(err.into()),
        }
    }

    if invalid > 0 {
        bail!("Validation failed with {} invalid document(s)", invalid);
    }

    println!("✓ All checks passed");
    Ok(())
}
