//! Feature list extraction from the top-level README.

use super::markdown::{bullet_text, heading_level, section_body};

/// Feature heading spellings, tried in order. The first present one wins.
pub const FEATURE_HEADINGS: [&str; 3] = ["## ✨ Features", "## 🚀 Features", "## Features"];

/// Whether `line` is the given heading, allowing trailing text after whitespace.
fn is_heading(line: &str, heading: &str) -> bool {
    line.trim_end()
        .strip_prefix(heading)
        .is_some_and(|rest| rest.is_empty() || rest.starts_with(char::is_whitespace))
}

/// Bullets of the first Features section, markers stripped, exact duplicates removed.
///
/// The section runs until the next heading of any level or the end of file.
/// Lines inside fenced code blocks are ignored.
pub fn extract_features(readme: &str) -> Vec<String> {
    let ends_section = |line: &str| heading_level(line).is_some();
    let Some(body) = FEATURE_HEADINGS
        .iter()
        .find_map(|heading| section_body(readme, |l| is_heading(l, heading), ends_section))
    else {
        return Vec::new();
    };

    let mut features: Vec<String> = Vec::new();
    for text in body.into_iter().filter_map(bullet_text) {
        if !features.iter().any(|f| f == text) {
            features.push(text.to_string());
        }
    }
    features
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sparkles_heading() {
        let readme = "# OSH.IT\n\n## ✨ Features\n\n- **Lazy loading**: 92% faster\n- Plugin system\n\n## Install\n- not a feature\n";
        assert_eq!(
            extract_features(readme),
            vec!["**Lazy loading**: 92% faster", "Plugin system"]
        );
    }

    #[test]
    fn test_first_matching_variant_wins() {
        let readme = "## Features\n- plain\n\n## 🚀 Features\n- rocket\n";
        assert_eq!(extract_features(readme), vec!["rocket"]);
    }

    #[test]
    fn test_plain_heading() {
        let readme = "## Features\n* one\n+ two\n- three\n";
        assert_eq!(extract_features(readme), vec!["one", "two", "three"]);
    }

    #[test]
    fn test_duplicates_removed() {
        let readme = "## Features\n- Fast\n- Simple\n- Fast\n";
        assert_eq!(extract_features(readme), vec!["Fast", "Simple"]);
    }

    #[test]
    fn test_section_stops_at_subheading() {
        let readme = "## Features\n- Top\n### Details\n- Nested\n";
        assert_eq!(extract_features(readme), vec!["Top"]);
    }

    #[test]
    fn test_code_fence_comment_does_not_end_section() {
        let readme = "## ✨ Features\n- Lazy loading\n```bash\n# enable it\nosh plugin add weather\n```\n- Smart plugins\n## Install\n";
        assert_eq!(extract_features(readme), vec!["Lazy loading", "Smart plugins"]);
    }

    #[test]
    fn test_indented_hash_is_not_a_heading() {
        let readme = "## Features\n- First\n    # indented code\n- Second\n";
        assert_eq!(extract_features(readme), vec!["First", "Second"]);
    }

    #[test]
    fn test_non_bullet_lines_skipped() {
        let readme = "## Features\nSome prose.\n\n- Real feature\n";
        assert_eq!(extract_features(readme), vec!["Real feature"]);
    }

    #[test]
    fn test_no_features_heading() {
        assert!(extract_features("# Title\n- bullet\n").is_empty());
        assert!(extract_features("## Featuresque\n- nope\n").is_empty());
    }
}
