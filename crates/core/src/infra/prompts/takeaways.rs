use std::sync::LazyLock;

use regex::Regex;

/// 要点抽出用 system プロンプト
pub const TAKEAWAYS_SYSTEM: &str = "You extract exactly 3 short, punchy key takeaways from LinkedIn posts. Each takeaway must be under 12 words. Output ONLY a numbered list 1. 2. 3. — nothing else.";

/// 見出しが一つも決まらない場合の既定値
pub const FALLBACK_HEADLINE: &str = "Key Insights";

const ROLE_SHORT_MAX_CHARS: usize = 60;

static LIST_MARKER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d+[.)]\s*").expect("valid list marker regex"));

pub fn takeaways_user_prompt(post: &str) -> String {
    format!("Extract 3 key takeaways from this LinkedIn post:\n\n{post}")
}

/// 番号付きリストの応答から最大3件を取り出す
pub fn parse_takeaways(raw: &str) -> Vec<String> {
    raw.lines()
        .map(|line| LIST_MARKER.replace(line, "").trim().to_string())
        .filter(|line| !line.is_empty())
        .take(3)
        .collect()
}

/// 見出し: 画像タイトル > 投稿タイトル > トピック > 要点1 > 既定値
pub fn choose_headline<'a>(
    infographic_title: &'a str,
    post_title: &'a str,
    topic: &'a str,
    takeaways: &'a [String],
) -> &'a str {
    [infographic_title, post_title, topic]
        .into_iter()
        .chain(takeaways.first().map(String::as_str))
        .find(|s| !s.is_empty())
        .unwrap_or(FALLBACK_HEADLINE)
}

/// 役割コンテキストの1行目・1文目を最大60文字に切り詰める
pub fn role_short_label(role_context: &str) -> String {
    let first_line = role_context.lines().next().unwrap_or("");
    let first_sentence = first_line.split('.').next().unwrap_or("");
    first_sentence
        .trim()
        .chars()
        .take(ROLE_SHORT_MAX_CHARS)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_numbered_list() {
        let raw = "1. Automate the toil\n2) Fund long-term capability\n\n3.   Align to outcomes\n4. Extra";
        assert_eq!(
            parse_takeaways(raw),
            vec![
                "Automate the toil".to_string(),
                "Fund long-term capability".to_string(),
                "Align to outcomes".to_string(),
            ]
        );
    }

    #[test]
    fn test_parse_unnumbered_lines_kept() {
        assert_eq!(parse_takeaways("Just one line"), vec!["Just one line".to_string()]);
        assert!(parse_takeaways("\n  \n").is_empty());
    }

    #[test]
    fn test_choose_headline_precedence() {
        let tk = vec!["First takeaway".to_string()];
        assert_eq!(choose_headline("Custom", "Title", "Topic", &tk), "Custom");
        assert_eq!(choose_headline("", "Title", "Topic", &tk), "Title");
        assert_eq!(choose_headline("", "", "Topic", &tk), "Topic");
        assert_eq!(choose_headline("", "", "", &tk), "First takeaway");
        assert_eq!(choose_headline("", "", "", &[]), FALLBACK_HEADLINE);
    }

    #[test]
    fn test_role_short_label() {
        assert_eq!(
            role_short_label("VP Engineering at Acme. 15 years in infra.\nSecond line"),
            "VP Engineering at Acme"
        );
        assert_eq!(role_short_label(""), "");
        assert_eq!(role_short_label(&"x".repeat(80)).chars().count(), 60);
    }
}
