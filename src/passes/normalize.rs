//! Double-extension repair
//!
//! Image optimizers tend to append the new extension without dropping the
//! old one, leaving `photo.png.webp`. This pass renames such files to
//! `photo.webp`.

use log::{debug, trace};
use regex::{NoExpand, Regex, RegexBuilder};

use crate::config::Config;
use crate::errors::{Result, pattern_matching_error};
use crate::pipeline::RunContext;
use crate::walker::walk;

use super::file_ops::{announce, relocate};

/// Matcher for `<base>.<image ext>.<target ext>` file names
#[derive(Debug, Clone)]
pub struct ExtensionRule {
    pattern: Regex,
    replacement: String,
}

impl ExtensionRule {
    /// Builds the rule from the configured image and target extensions
    ///
    /// Matching ignores case; the replacement uses the configured spelling.
    pub fn new(config: &Config) -> Result<Self> {
        let sources = config
            .image_extension_names()
            .into_iter()
            .map(regex::escape)
            .collect::<Vec<_>>()
            .join("|");
        let target = config.target_extension_name();
        let pattern_str = format!(r"\.(?:{sources})\.{}$", regex::escape(target));

        let pattern = RegexBuilder::new(&pattern_str)
            .case_insensitive(true)
            .build()
            .map_err(|e| pattern_matching_error(e, &pattern_str))?;

        Ok(ExtensionRule {
            pattern,
            replacement: format!(".{target}"),
        })
    }

    /// The collapsed file name, or `None` if the name has no double extension
    pub fn collapsed_name(&self, file_name: &str) -> Option<String> {
        if !self.pattern.is_match(file_name) {
            return None;
        }
        Some(
            self.pattern
                .replace(file_name, NoExpand(&self.replacement))
                .into_owned(),
        )
    }
}

/// Renames every double-extension image under the root
///
/// An existing file with the collapsed name is replaced under the default
/// collision policy.
///
/// # Errors
/// The first failing traversal or rename aborts the pass.
pub fn normalize_extensions(ctx: &mut RunContext) -> Result<()> {
    let root = ctx.config.root.clone();
    let rule = ExtensionRule::new(&ctx.config)?;
    debug!("Normalizing image extensions under {}", root.display());

    walk(&root, |node| {
        let Some(new_name) = node.file_name().and_then(|name| rule.collapsed_name(name)) else {
            trace!("No double extension on {}", node.path.display());
            return Ok(());
        };

        let target = node.parent().join(&new_name);
        relocate(&node.path, &target, ctx)?;

        announce(
            ctx.dry_run,
            &format!("Renaming: {} --> ", node.path.display()),
            &target.display().to_string(),
        );
        ctx.report.images_renamed += 1;
        Ok(())
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rule() -> ExtensionRule {
        ExtensionRule::new(&Config::default()).unwrap()
    }

    #[test]
    fn test_collapses_double_extensions() {
        let rule = rule();

        assert_eq!(rule.collapsed_name("hero.png.webp").as_deref(), Some("hero.webp"));
        assert_eq!(rule.collapsed_name("hero.jpg.webp").as_deref(), Some("hero.webp"));
        assert_eq!(rule.collapsed_name("hero.jpeg.webp").as_deref(), Some("hero.webp"));
        assert_eq!(
            rule.collapsed_name("my.photo.png.webp").as_deref(),
            Some("my.photo.webp")
        );
    }

    #[test]
    fn test_matching_ignores_case() {
        let rule = rule();

        assert_eq!(rule.collapsed_name("HERO.PNG.WEBP").as_deref(), Some("HERO.webp"));
        assert_eq!(rule.collapsed_name("hero.Jpg.webp").as_deref(), Some("hero.webp"));
    }

    #[test]
    fn test_leaves_other_names_alone() {
        let rule = rule();

        assert_eq!(rule.collapsed_name("hero.webp"), None);
        assert_eq!(rule.collapsed_name("hero.png"), None);
        assert_eq!(rule.collapsed_name("hero.gif.webp"), None);
        assert_eq!(rule.collapsed_name("hero.png.webp.bak"), None);
        assert_eq!(rule.collapsed_name("heropng.webp"), None);
    }

    #[test]
    fn test_custom_extensions() {
        let mut config = Config::default();
        config.image_extensions = vec!["gif".to_string()];
        config.target_extension = "avif".to_string();
        let rule = ExtensionRule::new(&config).unwrap();

        assert_eq!(rule.collapsed_name("a.gif.avif").as_deref(), Some("a.avif"));
        assert_eq!(rule.collapsed_name("a.png.webp"), None);
    }
}
