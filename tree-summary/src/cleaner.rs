//! Textual noise filter for large frontend files.
//!
//! This is a handful of regex passes, not a parser. Irregular markup can
//! survive it and that is fine: the goal is only to shrink what gets sent
//! to the model.

use regex::Regex;
use std::sync::LazyLock;

static STYLE_BLOCK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<style[\s\S]*?</style>").expect("invalid STYLE_BLOCK regex"));
static CLASS_ATTR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"class="[^"]*""#).expect("invalid CLASS_ATTR regex"));
static STYLE_ATTR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"style="[^"]*""#).expect("invalid STYLE_ATTR regex"));
static HTML_COMMENT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<!--[\s\S]*?-->").expect("invalid HTML_COMMENT regex"));

/// Removes `<style>` blocks, `class="..."` and `style="..."` attributes and
/// `<!-- -->` comments, then trims the result.
pub fn clean_markup(content: &str) -> String {
    let content = STYLE_BLOCK.replace_all(content, "");
    let content = CLASS_ATTR.replace_all(&content, "");
    let content = STYLE_ATTR.replace_all(&content, "");
    let content = HTML_COMMENT.replace_all(&content, "");
    content.trim().to_string()
}
