pub const IMAGE_ANALYSIS: &str = include_str!("../data/prompts/image_analysis.txt");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_image_prompt_is_single_line() {
        assert!(!IMAGE_ANALYSIS.is_empty());
        assert!(!IMAGE_ANALYSIS.contains('\n'));
    }

    #[test]
    fn test_image_prompt_asks_for_verdict() {
        assert!(IMAGE_ANALYSIS.starts_with("Analyze this image"));
        assert!(IMAGE_ANALYSIS.contains("credible or fake"));
    }
}
