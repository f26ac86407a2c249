/// Byline prefix the provider puts in front of author names.
const BYLINE_PREFIX: &str = "By ";

/// Removes a single leading `"By "` from a byline.
///
/// Only the prefix is stripped; separators inside the byline (`and`, commas)
/// are left alone, so `"By John Smith and Jane Doe"` becomes
/// `"John Smith and Jane Doe"`.
pub fn strip_byline_prefix(byline: &str) -> &str {
    byline.strip_prefix(BYLINE_PREFIX).unwrap_or(byline)
}

/// Lower-cases a name and then upper-cases the first character of every
/// whitespace-separated word.
///
/// Whitespace is preserved as-is. Characters that expand when case-mapped
/// (e.g. `'ß'` upper-cases to `"SS"`) are emitted in full.
///
/// # Examples
///
/// ```
/// use apbridge::util::title_case_name;
///
/// assert_eq!(title_case_name("JOHN Q. SMITH"), "John Q. Smith");
/// assert_eq!(title_case_name("jane doe"), "Jane Doe");
/// ```
pub fn title_case_name(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    let mut at_word_start = true;

    for c in name.chars() {
        if c.is_whitespace() {
            out.push(c);
            at_word_start = true;
        } else if at_word_start {
            // Lower first so that titlecase-only code points normalize too
            for lower in c.to_lowercase() {
                out.extend(lower.to_uppercase());
            }
            at_word_start = false;
        } else {
            out.extend(c.to_lowercase());
        }
    }

    out
}

/// Turns a byline into a display author: strips `"By "`, trims, title-cases.
///
/// Returns `None` when nothing is left.
pub fn normalize_author(byline: &str) -> Option<String> {
    let name = strip_byline_prefix(byline).trim();
    if name.is_empty() {
        return None;
    }
    Some(title_case_name(name))
}

/// Converts a topic selector into a readable feed name: hyphens become
/// spaces and only the first character is upper-cased.
///
/// ```
/// use apbridge::util::humanize_topic;
///
/// assert_eq!(humanize_topic("us-news"), "Us news");
/// ```
pub fn humanize_topic(topic: &str) -> String {
    let spaced = topic.replace('-', " ");
    let mut chars = spaced.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_strip_byline_prefix() {
        assert_eq!(strip_byline_prefix("By JOHN SMITH"), "JOHN SMITH");
        assert_eq!(strip_byline_prefix("JOHN SMITH"), "JOHN SMITH");
        // Case sensitive, like the provider's own prefix
        assert_eq!(strip_byline_prefix("BY JOHN"), "BY JOHN");
        assert_eq!(strip_byline_prefix("By "), "");
    }

    #[test]
    fn test_title_case_name() {
        assert_eq!(title_case_name("JOHN Q. SMITH"), "John Q. Smith");
        assert_eq!(title_case_name("JANE DOE"), "Jane Doe");
        assert_eq!(title_case_name("mARY o'BRIEN"), "Mary O'brien");
        assert_eq!(title_case_name("ANNE-MARIE"), "Anne-marie");
        assert_eq!(title_case_name(""), "");
    }

    #[test]
    fn test_title_case_preserves_whitespace() {
        assert_eq!(title_case_name("JOHN  SMITH\tJR"), "John  Smith\tJr");
    }

    #[test]
    fn test_title_case_unicode() {
        assert_eq!(title_case_name("ÉLODIE ÇAKIR"), "Élodie Çakir");
        assert_eq!(title_case_name("ДМИТРИЙ ИВАНОВ"), "Дмитрий Иванов");
    }

    #[test]
    fn test_normalize_author() {
        assert_eq!(
            normalize_author("By JOHN Q. SMITH").as_deref(),
            Some("John Q. Smith")
        );
        assert_eq!(normalize_author("JANE DOE").as_deref(), Some("Jane Doe"));
        assert_eq!(
            normalize_author("By JOHN SMITH and JANE DOE").as_deref(),
            Some("John Smith And Jane Doe")
        );
        assert_eq!(normalize_author(""), None);
        assert_eq!(normalize_author("By "), None);
        assert_eq!(normalize_author("   "), None);
    }

    #[test]
    fn test_humanize_topic() {
        assert_eq!(humanize_topic("us-news"), "Us news");
        assert_eq!(humanize_topic("apf-topnews"), "Apf topnews");
        assert_eq!(humanize_topic("politics"), "Politics");
        assert_eq!(humanize_topic("ap-fact-check"), "Ap fact check");
        assert_eq!(humanize_topic(""), "");
    }

    proptest! {
        #[test]
        fn title_case_is_idempotent(s in "[a-zA-Z .']{0,40}") {
            let once = title_case_name(&s);
            prop_assert_eq!(title_case_name(&once), once);
        }

        #[test]
        fn title_case_keeps_ascii_length(s in "[a-zA-Z ]{0,40}") {
            prop_assert_eq!(title_case_name(&s).len(), s.len());
        }

        #[test]
        fn humanize_topic_has_no_hyphens(s in "[a-z-]{0,30}") {
            prop_assert!(!humanize_topic(&s).contains('-'));
        }
    }
}
