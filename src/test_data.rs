#[cfg(test)]
pub const POST_DATA: &str = "---
title: What I learned after 20+ years of software development
description: How to be a great software engineer?
pubDate: 2022-04-02
tags:
  - career
  - engineering
heroImage: /images/what-i-learned.jpg
---

How to be a great software engineer?

Someone asked me this question today and I didn’t have an answer. After thinking for a while, I came up with a list of what I try to do myself.

Disclaimer: I don't think I am a great engineer, but I would love to have listened to that myself when I started my career, over 20 years ago.

## Non technical

### Have a honest image of yourself

You finished university and learned a lot. You solved many hard problems.
";

#[cfg(test)]
pub const TOML_POST_DATA: &str = r#"+++
title = "Writing posts with TOML headers"
description = "Frontmatter does not have to be YAML"
pubDate = 2024-02-12T22:54:00Z
draft = true
+++

Body of a TOML post
"#;
