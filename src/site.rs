use serde::{Deserialize, Serialize};

use crate::config::Config;

// Global site data. Templates read these through SiteInfo so a config file can override them.
pub const SITE_TITLE: &str = "Quire Blog";
pub const SITE_DESCRIPTION: &str = "Welcome to my website!";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NavLink {
    pub href: &'static str,
    pub title: &'static str,
}

pub const INTERNAL_LINKS: &[NavLink] = &[
    NavLink { href: "/", title: "Home" },
    NavLink { href: "/about", title: "About" },
    NavLink { href: "/blog", title: "Blog" },
];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Link {
    pub href: String,
    pub title: String,
}

impl From<&NavLink> for Link {
    fn from(value: &NavLink) -> Self {
        Link {
            href: value.href.to_string(),
            title: value.title.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SiteInfo {
    pub title: String,
    pub description: String,
    pub nav: Vec<Link>,
}

impl Default for SiteInfo {
    fn default() -> Self {
        SiteInfo {
            title: SITE_TITLE.to_string(),
            description: SITE_DESCRIPTION.to_string(),
            nav: INTERNAL_LINKS.iter().map(Link::from).collect(),
        }
    }
}

impl SiteInfo {
    /// Built-in constants, with whatever the `[site]` table sets taking precedence.
    pub fn from_config(config: &Config) -> SiteInfo {
        let mut info = SiteInfo::default();
        let Some(ref site) = config.site else {
            return info;
        };

        if let Some(ref title) = site.title {
            info.title = title.clone();
        }
        if let Some(ref description) = site.description {
            info.description = description.clone();
        }
        if let Some(ref nav) = site.nav {
            info.nav = nav.clone();
        }
        info
    }
}
