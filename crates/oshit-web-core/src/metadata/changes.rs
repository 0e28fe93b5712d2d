//! Recent change extraction from the changelog.

use super::markdown::{bullet_text, heading_level, section_body};

/// Maximum number of changes reported.
pub const MAX_CHANGES: usize = 5;

fn is_unreleased_heading(line: &str) -> bool {
    heading_level(line) == Some(2)
        && line
            .trim()
            .to_ascii_lowercase()
            .starts_with("## [unreleased]")
}

/// First [`MAX_CHANGES`] bullets of the `## [Unreleased]` section.
///
/// The section ends at the next level-1 or level-2 heading; `### Added`
/// style subsections are read through.
pub fn extract_changes(changelog: &str) -> Vec<String> {
    let Some(body) = section_body(changelog, is_unreleased_heading, |l| {
        heading_level(l).is_some_and(|level| level <= 2)
    }) else {
        return Vec::new();
    };

    body.into_iter()
        .filter_map(bullet_text)
        .take(MAX_CHANGES)
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_caps_at_five_in_order() {
        let changelog = "# Changelog\n\n## [Unreleased]\n- one\n- two\n- three\n- four\n- five\n- six\n- seven\n\n## [1.0.0]\n- old\n";
        assert_eq!(
            extract_changes(changelog),
            vec!["one", "two", "three", "four", "five"]
        );
    }

    #[test]
    fn test_fewer_than_five() {
        let changelog = "## [Unreleased]\n- only\n## [1.0.0] - 2024-01-01\n- old\n";
        assert_eq!(extract_changes(changelog), vec!["only"]);
    }

    #[test]
    fn test_reads_through_subsections() {
        let changelog = "## [Unreleased]\n### Added\n- New plugin\n### Fixed\n- Crash\n## [1.0.0]\n";
        assert_eq!(extract_changes(changelog), vec!["New plugin", "Crash"]);
    }

    #[test]
    fn test_section_at_end_of_file() {
        let changelog = "## [Unreleased]\n- trailing\n";
        assert_eq!(extract_changes(changelog), vec!["trailing"]);
    }

    #[test]
    fn test_case_insensitive_heading() {
        let changelog = "## [unreleased]\n- lower\n";
        assert_eq!(extract_changes(changelog), vec!["lower"]);
    }

    #[test]
    fn test_no_unreleased_section() {
        assert!(extract_changes("# Changelog\n## [1.0.0]\n- old\n").is_empty());
        assert!(extract_changes("### [Unreleased]\n- wrong level\n").is_empty());
    }
}
