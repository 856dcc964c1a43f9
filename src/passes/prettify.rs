//! Pretty URL restructuring
//!
//! Moves every `name.html` page to `name/index.html` so it is served
//! without a visible extension.

use std::path::Path;

use log::{debug, trace};

use crate::errors::Result;
use crate::pipeline::RunContext;
use crate::walker::walk;

use super::file_ops::{announce, ensure_directory, relocate};

/// Directory name a page moves into, or `None` when the page stays
///
/// Pages named `index_name` are terminal. The extension check is
/// case-sensitive, so `About.HTML` stays where it is.
pub fn pretty_dir_name<'a>(
    file_name: &'a str,
    html_extension: &str,
    index_name: &str,
) -> Option<&'a str> {
    if file_name == index_name {
        return None;
    }
    file_name
        .strip_suffix(html_extension)
        .filter(|stem| !stem.is_empty())
}

/// Moves every non-index HTML page under the root into its own directory
///
/// Directories created here are not walked again in the same run, so each
/// original page is moved exactly once.
///
/// # Errors
/// The first failing traversal, directory creation or move aborts the pass.
pub fn prettify_urls(ctx: &mut RunContext) -> Result<()> {
    let root = ctx.config.root.clone();
    debug!("Prettifying URLs under {}", root.display());

    walk(&root, |node| {
        let Some(file_name) = node.file_name() else {
            return Ok(());
        };
        let Some(dir_name) =
            pretty_dir_name(file_name, &ctx.config.html_extension, &ctx.config.index_name)
        else {
            trace!("Leaving {} in place", node.path.display());
            return Ok(());
        };

        let new_dir = node.parent().join(dir_name);
        let target = new_dir.join(&ctx.config.index_name);
        move_page(&node.path, &new_dir, &target, ctx)?;

        announce(
            ctx.dry_run,
            &format!("Moved {file_name} -> "),
            &format!("{dir_name}/{}", ctx.config.index_name),
        );
        ctx.report.pages_moved += 1;
        Ok(())
    })
}

fn move_page(source: &Path, new_dir: &Path, target: &Path, ctx: &mut RunContext) -> Result<()> {
    ensure_directory(new_dir, ctx.dry_run)?;
    relocate(source, target, ctx)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pretty_dir_name() {
        assert_eq!(pretty_dir_name("about.html", ".html", "index.html"), Some("about"));
        assert_eq!(
            pretty_dir_name("blog.post.html", ".html", "index.html"),
            Some("blog.post")
        );
        assert_eq!(pretty_dir_name("index.html", ".html", "index.html"), None);
        assert_eq!(pretty_dir_name("about.htm", ".html", "index.html"), None);
        assert_eq!(pretty_dir_name("style.css", ".html", "index.html"), None);
    }

    #[test]
    fn test_extension_is_case_sensitive() {
        assert_eq!(pretty_dir_name("About.HTML", ".html", "index.html"), None);
        assert_eq!(pretty_dir_name("Index.html", ".html", "index.html"), Some("Index"));
    }

    #[test]
    fn test_bare_extension_is_left_alone() {
        assert_eq!(pretty_dir_name(".html", ".html", "index.html"), None);
    }
}
