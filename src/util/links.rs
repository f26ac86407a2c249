use std::borrow::Cow;

use url::Url;

/// Rewrites relative links inside an HTML fragment into absolute URLs.
///
/// The bridge only depends on this trait; the framework may plug in its own
/// HTML tooling instead of [`HtmlLinkRewriter`].
pub trait LinkRewriter {
    /// Returns `html` with relative link attributes resolved against `base`.
    fn rewrite_links(&self, html: &str, base: &str) -> String;
}

/// Tag-scanning link rewriter.
///
/// Handles `href` on `<a>`/`<area>`, `src` on media and frame tags, and
/// `srcset` on `<img>`/`<source>`. Everything outside those attribute values
/// is copied through unchanged, including comments and malformed markup.
#[derive(Debug, Clone, Copy, Default)]
pub struct HtmlLinkRewriter;

impl LinkRewriter for HtmlLinkRewriter {
    fn rewrite_links(&self, html: &str, base: &str) -> String {
        let base = match Url::parse(base) {
            Ok(url) => url,
            Err(e) => {
                tracing::warn!(base = %base, error = %e, "Invalid base URL, leaving links untouched");
                return html.to_owned();
            }
        };

        let mut out = String::with_capacity(html.len() + html.len() / 8);
        let mut rest = html;

        while let Some(lt) = rest.find('<') {
            out.push_str(&rest[..lt]);
            let markup = &rest[lt..];

            if markup.starts_with("<!--") {
                let end = markup.find("-->").map_or(markup.len(), |p| p + 3);
                out.push_str(&markup[..end]);
                rest = &markup[end..];
                continue;
            }

            let Some(gt) = find_tag_end(markup) else {
                // Unterminated tag: copy the remainder verbatim
                out.push_str(markup);
                return out;
            };

            out.push_str(&rewrite_tag(&markup[..=gt], &base));
            rest = &markup[gt + 1..];
        }

        out.push_str(rest);
        out
    }
}

/// Attributes carrying URLs for a given (lowercased) tag name.
fn url_attributes(tag_name: &str) -> &'static [&'static str] {
    match tag_name {
        "a" | "area" => &["href"],
        "img" | "source" => &["src", "srcset"],
        "iframe" | "video" | "audio" => &["src"],
        _ => &[],
    }
}

/// Finds the byte offset of the `>` closing a tag that starts at offset 0,
/// ignoring `>` inside quoted attribute values.
fn find_tag_end(markup: &str) -> Option<usize> {
    let mut quote: Option<u8> = None;
    for (i, &b) in markup.as_bytes().iter().enumerate().skip(1) {
        match quote {
            Some(q) if b == q => quote = None,
            Some(_) => {}
            None if b == b'"' || b == b'\'' => quote = Some(b),
            None if b == b'>' => return Some(i),
            None => {}
        }
    }
    None
}

/// A parsed attribute: lowercased name and the byte range of its value.
struct Attribute {
    name: String,
    value_start: usize,
    value_end: usize,
}

fn rewrite_tag<'a>(tag: &'a str, base: &Url) -> Cow<'a, str> {
    let bytes = tag.as_bytes();
    // Skip '<', then read the element name
    let name_end = bytes
        .iter()
        .skip(1)
        .position(|&b| b.is_ascii_whitespace() || b == b'/' || b == b'>')
        .map_or(bytes.len(), |p| p + 1);
    let tag_name = tag[1..name_end].to_ascii_lowercase();

    let wanted = url_attributes(&tag_name);
    if wanted.is_empty() {
        return Cow::Borrowed(tag);
    }

    let mut replacements: Vec<(usize, usize, String)> = Vec::new();
    for attr in scan_attributes(tag, name_end) {
        if !wanted.contains(&attr.name.as_str()) {
            continue;
        }
        let value = &tag[attr.value_start..attr.value_end];
        let resolved = if attr.name == "srcset" {
            resolve_srcset(value, base)
        } else {
            resolve(value, base)
        };
        if let Some(resolved) = resolved {
            replacements.push((attr.value_start, attr.value_end, resolved));
        }
    }

    if replacements.is_empty() {
        return Cow::Borrowed(tag);
    }

    let mut out = String::with_capacity(tag.len() + 64);
    let mut cursor = 0;
    for (start, end, value) in replacements {
        out.push_str(&tag[cursor..start]);
        out.push_str(&value);
        cursor = end;
    }
    out.push_str(&tag[cursor..]);
    Cow::Owned(out)
}

/// Scans `name=value` pairs starting after the element name.
///
/// Delimiters are all ASCII, so every recorded offset is a char boundary.
fn scan_attributes(tag: &str, from: usize) -> Vec<Attribute> {
    let bytes = tag.as_bytes();
    let len = bytes.len();
    let mut attrs = Vec::new();
    let mut i = from;

    loop {
        while i < len && (bytes[i].is_ascii_whitespace() || bytes[i] == b'/') {
            i += 1;
        }
        if i >= len || bytes[i] == b'>' {
            break;
        }

        let name_start = i;
        while i < len && !bytes[i].is_ascii_whitespace() && !matches!(bytes[i], b'=' | b'>' | b'/')
        {
            i += 1;
        }
        if i == name_start {
            // Stray '=' without a name
            i += 1;
            continue;
        }
        let name = tag[name_start..i].to_ascii_lowercase();

        while i < len && bytes[i].is_ascii_whitespace() {
            i += 1;
        }
        if i >= len || bytes[i] != b'=' {
            continue; // boolean attribute
        }
        i += 1;
        while i < len && bytes[i].is_ascii_whitespace() {
            i += 1;
        }
        if i >= len {
            break;
        }

        let (value_start, value_end) = if bytes[i] == b'"' || bytes[i] == b'\'' {
            let quote = bytes[i];
            let start = i + 1;
            let end = bytes[start..]
                .iter()
                .position(|&b| b == quote)
                .map_or(len, |p| start + p);
            i = (end + 1).min(len);
            (start, end)
        } else {
            let start = i;
            while i < len && !bytes[i].is_ascii_whitespace() && bytes[i] != b'>' {
                i += 1;
            }
            (start, i)
        };

        attrs.push(Attribute {
            name,
            value_start,
            value_end,
        });
    }

    attrs
}

/// Resolves a single link value, or `None` when it should stay as written.
fn resolve(value: &str, base: &Url) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() || trimmed.starts_with('#') {
        return None;
    }
    // Already absolute (http, mailto, data, ...)
    if Url::parse(trimmed).is_ok() {
        return None;
    }
    base.join(trimmed).ok().map(String::from)
}

/// Resolves every candidate URL of a `srcset` list, keeping descriptors.
fn resolve_srcset(value: &str, base: &Url) -> Option<String> {
    // Commas inside data URIs make candidate splitting ambiguous
    if value.contains("data:") {
        return None;
    }

    let mut changed = false;
    let candidates: Vec<String> = value
        .split(',')
        .map(str::trim)
        .filter(|c| !c.is_empty())
        .map(|candidate| {
            let (url, descriptor) = match candidate.split_once(char::is_whitespace) {
                Some((url, descriptor)) => (url, Some(descriptor.trim())),
                None => (candidate, None),
            };
            let url = match resolve(url, base) {
                Some(resolved) => {
                    changed = true;
                    resolved
                }
                None => url.to_owned(),
            };
            match descriptor {
                Some(d) if !d.is_empty() => format!("{url} {d}"),
                _ => url,
            }
        })
        .collect();

    changed.then(|| candidates.join(", "))
}
