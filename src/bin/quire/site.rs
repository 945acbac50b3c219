use anyhow::Result;

use quire::config::Config;
use quire::site::SiteInfo;

use crate::SiteArgs;

pub fn site_cmd(config: &Config, args: SiteArgs) -> Result<()> {
    let info = SiteInfo::from_config(config);

    if args.json {
        println!("{}", serde_json::to_string_pretty(&info)?);
        return Ok(());
    }

    println!("{}", info.title);
    println!("{}", info.description);
    println!();
    for link in &info.nav {
        println!("  {:<12} {}", link.title, link.href);
    }
    Ok(())
}
