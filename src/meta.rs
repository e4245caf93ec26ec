//! Head metadata rewriting.
//!
//! The `<head>` is never reserialized, so metadata is edited as text: each
//! operation matches one attribute value or element body and replaces only
//! that span. Everything else in the document stays byte-identical.

use regex::{Captures, Regex};

use crate::patterns::{HEAD_OPEN, JSON_LD_SCRIPT, TITLE};

/// Build a pattern for `<meta {attr}="{value}" content="...">`.
///
/// Groups: prefix up to the opening quote of `content`, the value, the
/// closing quote.
fn meta_pattern(attr: &str, value: &str) -> Option<Regex> {
    let pattern = format!(
        r#"(?is)(<meta\s+{}=["']{}["']\s+content=["'])(.*?)(["'])"#,
        regex::escape(attr),
        regex::escape(value)
    );
    match Regex::new(&pattern) {
        Ok(re) => Some(re),
        Err(e) => {
            log::debug!("Invalid meta pattern for {attr}={value}: {e}");
            None
        }
    }
}

fn splice_group(caps: &Captures, new_value: &str) -> String {
    format!("{}{new_value}{}", &caps[1], &caps[3])
}

/// Replace the first `<title>` text, or insert a title after `<head>`.
///
/// # Example
///
/// ```rust
/// use rs_pbnkit::meta::replace_title;
///
/// let html = "<head><meta charset=\"utf-8\"><title>Old</title></head>";
/// assert_eq!(
///     replace_title(html, "New"),
///     "<head><meta charset=\"utf-8\"><title>New</title></head>"
/// );
/// assert_eq!(replace_title("<head></head>", "T"), "<head>\n<title>T</title></head>");
/// ```
#[must_use]
pub fn replace_title(html: &str, title: &str) -> String {
    if TITLE.is_match(html) {
        return TITLE
            .replacen(html, 1, |caps: &Captures| splice_group(caps, title))
            .into_owned();
    }
    match HEAD_OPEN.find(html) {
        Some(head) => {
            let pos = head.end();
            format!("{}\n<title>{title}</title>{}", &html[..pos], &html[pos..])
        }
        None => html.to_string(),
    }
}

/// Replace the `content` of the first `<meta {attr}="{value}">`.
///
/// Returns the new document and whether a tag was found.
#[must_use]
pub fn replace_meta_content(html: &str, attr: &str, value: &str, new_content: &str) -> (String, bool) {
    let Some(re) = meta_pattern(attr, value) else {
        return (html.to_string(), false);
    };
    if !re.is_match(html) {
        return (html.to_string(), false);
    }
    let out = re.replacen(html, 1, |caps: &Captures| splice_group(caps, new_content));
    (out.into_owned(), true)
}

/// Replace the `content` of every meta tag matching `attr`/`value`.
fn replace_meta_all(html: &str, attr: &str, value: &str, new_content: &str) -> String {
    meta_pattern(attr, value).map_or_else(
        || html.to_string(),
        |re| {
            re.replace_all(html, |caps: &Captures| splice_group(caps, new_content))
                .into_owned()
        },
    )
}

/// Replace every `og:title` value.
#[must_use]
pub fn replace_og_title(html: &str, title: &str) -> String {
    replace_meta_all(html, "property", "og:title", title)
}

/// Replace every `twitter:title` value.
#[must_use]
pub fn replace_twitter_title(html: &str, title: &str) -> String {
    replace_meta_all(html, "name", "twitter:title", title)
}

/// Replace every `twitter:description` value.
#[must_use]
pub fn replace_twitter_description(html: &str, description: &str) -> String {
    replace_meta_all(html, "name", "twitter:description", description)
}

/// Check whether a JSON value holds `field` as a key at any depth.
fn has_field(value: &serde_json::Value, field: &str) -> bool {
    match value {
        serde_json::Value::Object(map) => map
            .iter()
            .any(|(key, v)| key == field || has_field(v, field)),
        serde_json::Value::Array(items) => items.iter().any(|v| has_field(v, field)),
        _ => false,
    }
}

/// Replace the string values of `field` inside the first JSON-LD block.
///
/// Only applies when the block parses as JSON and contains the field. The
/// replacement is textual, so indentation and key order survive.
///
/// # Example
///
/// ```rust
/// use rs_pbnkit::meta::replace_json_ld_field;
///
/// let html = r#"<script type="application/ld+json">{
///   "@type": "Article",
///   "name": "Old"
/// }</script>"#;
///
/// let out = replace_json_ld_field(html, "name", "New \"quoted\"");
/// assert!(out.contains(r#""name": "New \"quoted\"""#));
/// assert!(out.contains("{\n  \"@type\""));
/// ```
#[must_use]
pub fn replace_json_ld_field(html: &str, field: &str, new_value: &str) -> String {
    let Some(script) = JSON_LD_SCRIPT.captures(html) else {
        return html.to_string();
    };
    let Some(body) = script.get(2) else {
        return html.to_string();
    };

    let Ok(data) = serde_json::from_str::<serde_json::Value>(body.as_str()) else {
        log::debug!("JSON-LD block does not parse, left untouched");
        return html.to_string();
    };
    if !has_field(&data, field) {
        return html.to_string();
    }

    let escaped_field = regex::escape(field);
    let double = Regex::new(&format!(
        r#"(?is)("{escaped_field}"\s*:\s*")((?:[^"\\]|\\.)*)(")"#
    ));
    let single = Regex::new(&format!(r#"(?is)('{escaped_field}'\s*:\s*')([^']*)(')"#));
    let (Ok(double), Ok(single)) = (double, single) else {
        return html.to_string();
    };

    // Strip the surrounding quotes from the JSON encoding of the value.
    let json_value = serde_json::to_string(new_value).unwrap_or_default();
    let json_value = json_value
        .strip_prefix('"')
        .and_then(|v| v.strip_suffix('"'))
        .unwrap_or(new_value);

    let mut count = 0;
    let replaced = double.replace_all(body.as_str(), |caps: &Captures| {
        count += 1;
        splice_group(caps, json_value)
    });
    let replaced = single.replace_all(&replaced, |caps: &Captures| {
        count += 1;
        splice_group(caps, new_value)
    });
    if count == 0 {
        return html.to_string();
    }

    format!("{}{replaced}{}", &html[..body.start()], &html[body.end()..])
}

/// Rewrite title and description metadata in one pass.
///
/// Covers `<title>`, `og:title`, `og:description`, `name="description"`,
/// the Twitter card tags and the JSON-LD `name`/`description` fields. A
/// description meta tag is added after `</title>` when the page has none.
#[must_use]
pub fn update_head_meta(html: &str, title: &str, description: &str) -> String {
    let mut out = replace_title(html, title);
    out = replace_og_title(&out, title);
    out = replace_json_ld_field(&out, "name", title);

    let (next, has_description) = replace_meta_content(&out, "name", "description", description);
    out = next;
    out = replace_meta_content(&out, "property", "og:description", description).0;
    out = replace_json_ld_field(&out, "description", description);
    out = replace_twitter_title(&out, title);
    out = replace_twitter_description(&out, description);

    if !has_description {
        if let Some(title_tag) = TITLE.find(&out) {
            let pos = title_tag.end();
            out = format!(
                "{}\n    <meta name=\"description\" content=\"{description}\">{}",
                &out[..pos],
                &out[pos..]
            );
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const HEAD: &str = r#"<html><head>
<title>Old title</title>
<meta name="description" content="Old desc">
<meta property="og:title" content="Old OG">
<meta property="og:description" content='Old OG desc'>
<meta name="twitter:title" content="Old TW">
<meta name="twitter:description" content="Old TW desc">
<script type="application/ld+json">{"@graph": [{"name": "Old", "description": "Old d"}]}</script>
</head><body></body></html>"#;

    #[test]
    fn update_rewrites_every_value() {
        let out = update_head_meta(HEAD, "New title", "New desc");
        let expected = r#"<html><head>
<title>New title</title>
<meta name="description" content="New desc">
<meta property="og:title" content="New title">
<meta property="og:description" content='New desc'>
<meta name="twitter:title" content="New title">
<meta name="twitter:description" content="New desc">
<script type="application/ld+json">{"@graph": [{"name": "New title", "description": "New desc"}]}</script>
</head><body></body></html>"#;

        assert_eq!(out, expected);
    }

    #[test]
    fn missing_description_is_inserted_after_title() {
        let html = "<head><title>A</title></head>";
        let out = update_head_meta(html, "B", "C");

        assert_eq!(
            out,
            "<head><title>B</title>\n    <meta name=\"description\" content=\"C\"></head>"
        );
    }

    #[test]
    fn meta_content_reports_absence() {
        let (out, found) = replace_meta_content("<head></head>", "name", "description", "x");
        assert!(!found);
        assert_eq!(out, "<head></head>");
    }

    #[test]
    fn replacement_value_is_literal() {
        let (out, found) = replace_meta_content(
            r#"<meta name="description" content="a">"#,
            "name",
            "description",
            "$1 costs $5",
        );
        assert!(found);
        assert_eq!(out, r#"<meta name="description" content="$1 costs $5">"#);
    }

    #[test]
    fn json_ld_without_field_is_untouched() {
        let html = r#"<script type="application/ld+json">{"headline": "x"}</script>"#;
        assert_eq!(replace_json_ld_field(html, "name", "y"), html);
    }

    #[test]
    fn invalid_json_ld_is_untouched() {
        let html = r#"<script type="application/ld+json">{"name": </script>"#;
        assert_eq!(replace_json_ld_field(html, "name", "y"), html);
    }

    #[test]
    fn title_in_header_element_is_not_head() {
        let html = "<html><header class=\"x\"></header></html>";
        assert_eq!(replace_title(html, "T"), html);
    }
}
