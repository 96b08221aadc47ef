/// Fixed edit instruction sent with every image.
pub const REMOVE_SUBTITLES: &str = include_str!("../data/prompts/remove_subtitles.txt");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_instruction_is_non_empty() {
        assert!(!REMOVE_SUBTITLES.trim().is_empty());
    }

    #[test]
    fn test_instruction_is_bilingual() {
        assert!(REMOVE_SUBTITLES.contains("字幕"));
        assert!(REMOVE_SUBTITLES.contains("Remove all subtitles"));
        assert!(REMOVE_SUBTITLES.contains("inpaint"));
    }
}
