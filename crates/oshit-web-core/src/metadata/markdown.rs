//! Line helpers shared by the README and CHANGELOG scanners.

use std::sync::LazyLock;

use regex::Regex;

static BULLET_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*[-*+]\s+(.+)$").expect("valid bullet regex"));

/// Leading spaces allowed before a heading or fence; more makes an indented code block.
const MAX_INDENT: usize = 3;

/// ATX heading level of a line (`## Foo` is 2), if it is a heading.
pub(crate) fn heading_level(line: &str) -> Option<usize> {
    let trimmed = line.trim_start_matches(' ');
    if line.len() - trimmed.len() > MAX_INDENT {
        return None;
    }
    let level = trimmed.chars().take_while(|&c| c == '#').count();
    if level == 0 || level > 6 {
        return None;
    }

    match trimmed[level..].chars().next() {
        None => Some(level),
        Some(c) if c.is_whitespace() => Some(level),
        Some(_) => None,
    }
}

/// Text of a bullet line with the marker stripped.
pub(crate) fn bullet_text(line: &str) -> Option<&str> {
    let caps = BULLET_RE.captures(line)?;
    let text = caps.get(1)?.as_str().trim();
    (!text.is_empty()).then_some(text)
}

/// Fence character (`` ` `` or `~`) if the line opens or closes a fenced code block.
fn fence_char(line: &str) -> Option<char> {
    let trimmed = line.trim_start_matches(' ');
    if line.len() - trimmed.len() > MAX_INDENT {
        return None;
    }
    ['`', '~']
        .into_iter()
        .find(|&c| trimmed.chars().take_while(|&t| t == c).count() >= 3)
}

/// Lines following the first line accepted by `starts`, up to (not
/// including) the first line accepted by `ends`.
///
/// Fenced code blocks are skipped: their lines are neither part of the
/// body nor able to end the section.
pub(crate) fn section_body<'a>(
    text: &'a str,
    starts: impl Fn(&str) -> bool,
    ends: impl Fn(&str) -> bool,
) -> Option<Vec<&'a str>> {
    let mut lines = text.lines();
    lines.find(|line| starts(line))?;

    let mut body = Vec::new();
    let mut fence: Option<char> = None;
    for line in lines {
        match (fence, fence_char(line)) {
            (None, Some(c)) => fence = Some(c),
            (Some(open), Some(c)) if open == c => fence = None,
            (Some(_), _) => {}
            (None, None) if ends(line) => break,
            (None, None) => body.push(line),
        }
    }
    Some(body)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_heading_level() {
        assert_eq!(heading_level("# Title"), Some(1));
        assert_eq!(heading_level("### Added"), Some(3));
        assert_eq!(heading_level("##"), Some(2));
        assert_eq!(heading_level("#hashtag"), None);
        assert_eq!(heading_level("plain"), None);
        assert_eq!(heading_level("####### too deep"), None);
        assert_eq!(heading_level("   ## indented"), Some(2));
        assert_eq!(heading_level("    ## code"), None);
        assert_eq!(heading_level("\t## code"), None);
    }

    #[test]
    fn test_fence_char() {
        assert_eq!(fence_char("```bash"), Some('`'));
        assert_eq!(fence_char("  ~~~"), Some('~'));
        assert_eq!(fence_char("``inline``"), None);
        assert_eq!(fence_char("    ```"), None);
    }

    #[test]
    fn test_section_body_skips_fences() {
        let text = "## A\none\n```sh\n# comment\n- not a bullet\n~~~\n```\ntwo\n## B\n";
        let body = section_body(text, |l| l == "## A", |l| heading_level(l).is_some()).unwrap();
        assert_eq!(body, vec!["one", "two"]);
    }

    #[test]
    fn test_section_body_unclosed_fence_runs_to_end() {
        let text = "## A\none\n```\n## B\n- hidden\n";
        let body = section_body(text, |l| l == "## A", |l| heading_level(l).is_some()).unwrap();
        assert_eq!(body, vec!["one"]);
    }

    #[test]
    fn test_bullet_text() {
        assert_eq!(bullet_text("- Lazy loading "), Some("Lazy loading"));
        assert_eq!(bullet_text("  * nested"), Some("nested"));
        assert_eq!(bullet_text("+ plus"), Some("plus"));
        assert_eq!(bullet_text("**bold** text"), None);
        assert_eq!(bullet_text("---"), None);
        assert_eq!(bullet_text("-   "), None);
    }

    #[test]
    fn test_section_body() {
        let text = "intro\n## A\none\ntwo\n## B\nthree\n";
        let body = section_body(text, |l| l == "## A", |l| l.starts_with("##")).unwrap();
        assert_eq!(body, vec!["one", "two"]);

        let tail = section_body(text, |l| l == "## B", |l| l.starts_with("##")).unwrap();
        assert_eq!(tail, vec!["three"]);

        assert!(section_body(text, |l| l == "## C", |_| true).is_none());
    }
}
