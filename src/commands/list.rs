//! List site content

use anyhow::Result;
use std::collections::HashMap;

use crate::content::loader::ContentLoader;
use crate::content::sidebar::resolve_sidebar;
use crate::content::PostSummary;
use crate::helpers::Helpers;
use crate::Site;

/// List site content by type
pub fn run(site: &Site, content_type: &str) -> Result<()> {
    for line in render(site, content_type)? {
        println!("{}", line);
    }
    Ok(())
}

/// Lines printed by [`run`]
pub fn render(site: &Site, content_type: &str) -> Result<Vec<String>> {
    let mut lines = Vec::new();

    match content_type {
        "post" | "posts" => {
            let helpers = Helpers::new(&site.config);
            let posts = ContentLoader::new(site).load_posts()?;
            lines.push(format!("Posts ({}):", posts.len()));
            for post in posts {
                lines.push(format!(
                    "  {} - {} [{}] ({})",
                    post.date.string,
                    post.title,
                    post.url,
                    helpers.from_now(&post.date.date)
                ));
            }
        }
        "tag" | "tags" => {
            let posts = ContentLoader::new(site).load_posts()?;
            let tags = count_terms(&posts, |p| &p.tags);
            lines.push(format!("Tags ({}):", tags.len()));
            for (tag, count) in tags {
                lines.push(format!("  {} ({})", tag, count));
            }
        }
        "category" | "categories" => {
            let posts = ContentLoader::new(site).load_posts()?;
            let categories = count_terms(&posts, |p| &p.categories);
            lines.push(format!("Categories ({}):", categories.len()));
            for (cat, count) in categories {
                lines.push(format!("  {} ({})", cat, count));
            }
        }
        "nav" => {
            let nav = &site.config.theme_config.nav;
            lines.push(format!("Nav ({}):", nav.len()));
            for item in nav {
                lines.push(format!("  {} -> {}", item.text, item.link));
            }
        }
        "sidebar" => {
            let sidebar = resolve_sidebar(&site.config, &site.source_dir)?;
            lines.push(format!("Sidebar ({}):", sidebar.len()));
            for (prefix, groups) in sidebar {
                lines.push(format!("  {}", prefix));
                for group in groups {
                    lines.push(format!("    {}", group.text));
                    for item in group.items {
                        lines.push(format!("      {} -> {}", item.text, item.link));
                    }
                }
            }
        }
        _ => {
            anyhow::bail!(
                "Unknown type: {}. Available: post, tag, category, nav, sidebar",
                content_type
            );
        }
    }

    Ok(lines)
}

/// Count terms across posts, most used first, then by name
fn count_terms<F>(posts: &[PostSummary], terms: F) -> Vec<(String, usize)>
where
    F: Fn(&PostSummary) -> &Vec<String>,
{
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for post in posts {
        for term in terms(post) {
            *counts.entry(term.as_str()).or_insert(0) += 1;
        }
    }

    let mut counts: Vec<_> = counts
        .into_iter()
        .map(|(term, count)| (term.to_string(), count))
        .collect();
    counts.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    counts
}
