use anyhow::Result;
use std::time::{SystemTime, UNIX_EPOCH};

pub fn now_epoch_secs() -> Result<u64> {
    Ok(SystemTime::now().duration_since(UNIX_EPOCH)?.as_secs())
}

/// First `max_chars` characters of `input`, cut on a character boundary.
pub fn preview(input: &str, max_chars: usize) -> String {
    input.chars().take(max_chars).collect()
}

/// First non-empty line with any leading `#` run and surrounding
/// whitespace removed.
pub fn first_line_description(content: &str) -> String {
    content
        .lines()
        .map(str::trim)
        .find(|line| !line.is_empty())
        .map(|line| line.trim_start_matches('#').trim().to_string())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn preview_counts_characters_not_bytes() {
        assert_eq!(preview("知识管理", 2), "知识");
        assert_eq!(preview("ab", 10), "ab");
    }

    #[test]
    fn description_skips_blank_lines_and_heading_marks() {
        assert_eq!(first_line_description("\n\n## SWOT analysis\nbody"), "SWOT analysis");
        assert_eq!(first_line_description("plain first line"), "plain first line");
        assert_eq!(first_line_description(""), "");
    }
}
