//! Image reference rewriting
//!
//! After images were renamed to the target extension, HTML pages still
//! point at `assets/img/hero.png`. This pass rewrites those references to
//! `assets/img/hero.webp`.

use std::fs;
use std::path::Path;

use log::{debug, trace};
use rayon::prelude::*;
use regex::{Captures, Regex, RegexBuilder};

use crate::config::Config;
use crate::errors::{Result, file_operation_error, pattern_matching_error};
use crate::pipeline::RunContext;
use crate::walker::{Node, collect_files, walk};

use super::file_ops::announce;

/// Characters that end an image path inside HTML
const DELIMITERS: &str = r#""'\s>"#;

/// Matcher for image references below the asset prefix
///
/// A reference is the asset prefix, optionally preceded by `/` or `../`,
/// a path without delimiters, and an image extension directly followed by a
/// quote, whitespace or `>`. The whole reference is matched ignoring case,
/// so `/Assets/Img/hero.PNG` is rewritten as well.
#[derive(Debug, Clone)]
pub struct ReferenceRule {
    pattern: Regex,
    target_extension: String,
}

impl ReferenceRule {
    pub fn new(config: &Config) -> Result<Self> {
        let sources = config
            .image_extension_names()
            .into_iter()
            .map(regex::escape)
            .collect::<Vec<_>>()
            .join("|");
        let pattern_str = format!(
            r"(?P<path>(?:\.\./|/)?{prefix}[^{DELIMITERS}]+)\.(?:{sources})(?P<delimiter>[{DELIMITERS}])",
            prefix = regex::escape(&config.asset_prefix),
        );

        let pattern = RegexBuilder::new(&pattern_str)
            .case_insensitive(true)
            .build()
            .map_err(|e| pattern_matching_error(e, &pattern_str))?;

        Ok(ReferenceRule {
            pattern,
            target_extension: config.target_extension_name().to_string(),
        })
    }

    /// Rewrites every reference in `content`, returning the text and the count
    pub fn rewrite(&self, content: &str) -> (String, usize) {
        let mut count = 0;
        let rewritten = self.pattern.replace_all(content, |caps: &Captures| {
            count += 1;
            format!(
                "{}.{}{}",
                &caps["path"], self.target_extension, &caps["delimiter"]
            )
        });
        (rewritten.into_owned(), count)
    }
}

/// Outcome of rewriting one file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FileOutcome {
    pub references: usize,
    pub written: bool,
}

/// Rewrites the image references of a single HTML file
///
/// The file is written back only when a reference changed, unless
/// `always_write` is set.
///
/// # Errors
/// Returns an error if the file cannot be read as UTF-8 or written back.
pub fn rewrite_file(
    path: &Path,
    rule: &ReferenceRule,
    always_write: bool,
    dry_run: bool,
) -> Result<FileOutcome> {
    let content = fs::read_to_string(path)
        .map_err(|e| file_operation_error(e, path.to_path_buf(), "read"))?;
    let (rewritten, references) = rule.rewrite(&content);

    let written = references > 0 || always_write;
    if !written {
        trace!("No image references in {}", path.display());
        return Ok(FileOutcome {
            references,
            written,
        });
    }

    if !dry_run {
        fs::write(path, rewritten)
            .map_err(|e| file_operation_error(e, path.to_path_buf(), "write"))?;
    }
    announce(
        dry_run,
        "Updated image refs in ",
        &path.display().to_string(),
    );

    Ok(FileOutcome {
        references,
        written,
    })
}

/// Rewrites image references in every HTML file under the root
///
/// With `rewrite.parallel` the files are first collected and then
/// rewritten on the rayon pool.
///
/// # Errors
/// The first failing traversal, read or write aborts the pass.
pub fn rewrite_references(ctx: &mut RunContext) -> Result<()> {
    let root = ctx.config.root.clone();
    let rule = ReferenceRule::new(&ctx.config)?;
    let html_extension = ctx.config.html_extension.clone();
    let always_write = ctx.config.rewrite.always_write;
    let dry_run = ctx.dry_run;
    debug!("Rewriting image references under {}", root.display());

    let is_html = |node: &Node| {
        node.file_name()
            .is_some_and(|name| name.ends_with(&html_extension))
    };

    let outcomes = if ctx.config.rewrite.parallel {
        let pages = collect_files(&root, is_html)?;
        debug!("Rewriting {} HTML files in parallel", pages.len());
        pages
            .par_iter()
            .map(|node| rewrite_file(&node.path, &rule, always_write, dry_run))
            .collect::<Result<Vec<FileOutcome>>>()?
    } else {
        let mut outcomes = Vec::new();
        walk(&root, |node| {
            if is_html(node) {
                outcomes.push(rewrite_file(&node.path, &rule, always_write, dry_run)?);
            }
            Ok(())
        })?;
        outcomes
    };

    for outcome in outcomes {
        ctx.report.html_scanned += 1;
        ctx.report.references_rewritten += outcome.references;
        if outcome.written {
            ctx.report.html_rewritten += 1;
        }
    }

    Ok(())
}
