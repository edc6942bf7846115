use crate::domain::settings::GenerationSettings;
use crate::domain::types::{ArticleSource, TextPrompts};

use super::bold::to_unicode_bold;

/// 常に禁止する使い古されたフレーズ
pub const BANNED_PHRASES: &str = "\"game-changer\", \"revolutionary\", \"paradigm\", \"leverage\", \"utilize\", \"robust\", \"seamless\", \"cutting-edge\", \"innovative\", \"synergy\", \"ecosystem\", \"deep dive\", \"unpack\", \"needle\", \"moving forward\", \"at the end of the day\", \"the bottom line\", \"it's important to note\", \"in conclusion\", \"to summarize\", \"in today's\", \"fast-paced\", \"I wanted to share\", \"I'm excited\", \"I'm thrilled\", \"excited to announce\", \"delighted to share\"";

/// 取得できなかった記事の代わりに入れる文言
pub const ARTICLE_UNAVAILABLE: &str = "[Could not fetch content — use topic/context only]";

const EMOJI_ON: &str = "Include relevant emojis to boost engagement.";
const EMOJI_OFF: &str = "Do not use emojis.";
const HASHTAGS_ON: &str = "End the post with 5–8 relevant hashtags on a new line.";
const HASHTAGS_OFF: &str = "Do not include hashtags.";

const CLOSING_INSTRUCTION: &str = "Write a compelling LinkedIn post based on the above. Output ONLY the post text—no preamble, no explanation.";

/// 投稿生成用の system / user プロンプトを組み立てる
pub fn render_text_prompts(
    settings: &GenerationSettings,
    topic: &str,
    post_title: &str,
    role_context: &str,
    articles: &[ArticleSource],
) -> TextPrompts {
    TextPrompts {
        system: render_system(settings),
        user: render_user(topic, post_title, role_context, articles),
    }
}

fn render_system(settings: &GenerationSettings) -> String {
    let emoji_note = if settings.use_emoji { EMOJI_ON } else { EMOJI_OFF };
    let hashtag_note = if settings.use_hashtags {
        HASHTAGS_ON
    } else {
        HASHTAGS_OFF
    };

    format!(
        "You are a skilled LinkedIn ghostwriter. Write posts that feel like they were written by a real practitioner, not generated by AI.

Rules:
- Output plain text only — no markdown symbols (no **, *, #, _, or similar)
- Open with a direct, curiosity-driving hook (1–2 lines max)
- Use short paragraphs (1–3 lines) with plenty of white space
- Follow a clear narrative arc: hook → insight → takeaway
- Target length: {char_target} characters
- Tone: {tone}
- {emoji_note}
- {hashtag_note}
- Do not use bullet lists unless they genuinely add value
- Write like a practitioner talking to a peer — direct, specific, opinionated. Use contractions. Trust the reader.
- Prefer concrete details over vague generalities. Say what actually happened or what you actually think.
- NEVER use: {BANNED_PHRASES}

WRITING STYLE — study and closely replicate the voice, sentence rhythm, paragraph length, use of contrast, and structural patterns of this example post:
\"\"\"
{style}
\"\"\"",
        char_target = settings.length.char_target(),
        tone = settings.tone.phrase(),
        style = settings.style_example(),
    )
}

fn render_user(
    topic: &str,
    post_title: &str,
    role_context: &str,
    articles: &[ArticleSource],
) -> String {
    let role_block = if role_context.is_empty() {
        String::new()
    } else {
        format!("AUTHOR CONTEXT:\n{role_context}\n")
    };
    let title_block = if post_title.is_empty() {
        String::new()
    } else {
        format!(
            "POST TITLE: Open the post with exactly this as the bold headline: \"{}\"\n",
            to_unicode_bold(post_title)
        )
    };
    let topic_block = if topic.is_empty() {
        String::new()
    } else {
        format!("TOPIC: {topic}\n")
    };
    let article_context = render_article_context(articles);
    let articles_block = if article_context.is_empty() {
        String::new()
    } else {
        format!("SOURCE ARTICLES:{article_context}")
    };

    [
        String::new(),
        role_block,
        title_block,
        topic_block,
        articles_block,
        String::new(),
        CLOSING_INSTRUCTION.to_string(),
    ]
    .join("\n")
    .trim()
    .to_string()
}

/// 記事ごとに番号と URL のラベルを付けて連結する。
/// 取得失敗も代替文言で残し、URL リストとの位置対応を保つ。
pub fn render_article_context(articles: &[ArticleSource]) -> String {
    articles
        .iter()
        .enumerate()
        .map(|(i, article)| {
            let body = article.text.as_deref().unwrap_or(ARTICLE_UNAVAILABLE);
            format!("\n\n--- Article {} ({}) ---\n{body}", i + 1, article.url)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::settings::{PostLength, Tone};

    fn settings() -> GenerationSettings {
        GenerationSettings {
            length: PostLength::Medium,
            tone: Tone::Conversational,
            use_emoji: true,
            use_hashtags: true,
            ..Default::default()
        }
    }

    #[test]
    fn test_system_prompt_medium_conversational() {
        let p = render_text_prompts(&settings(), "Platform engineering", "", "", &[]);
        assert!(p.system.contains("Target length: 700–1000 characters"));
        assert!(p.system.contains("Tone: conversational and engaging"));
        assert!(p.system.contains(EMOJI_ON));
        assert!(p.system.contains(HASHTAGS_ON));
        assert!(p.system.contains(&format!("NEVER use: {BANNED_PHRASES}")));
    }

    #[test]
    fn test_flags_off_forbid() {
        let s = GenerationSettings {
            use_emoji: false,
            use_hashtags: false,
            length: PostLength::Short,
            tone: Tone::Analytical,
            ..settings()
        };
        let p = render_text_prompts(&s, "x", "", "", &[]);
        assert!(p.system.contains("- Do not use emojis."));
        assert!(p.system.contains("- Do not include hashtags."));
        assert!(p.system.contains("300–500"));
        assert!(p.system.contains("analytical and data-driven"));
        assert!(p.system.contains(BANNED_PHRASES));
    }

    #[test]
    fn test_style_example_embedded_verbatim() {
        let s = GenerationSettings {
            style_post: "Less talk. More shipping.\n\nThat's the job.".to_string(),
            ..settings()
        };
        let p = render_text_prompts(&s, "x", "", "", &[]);
        assert!(p
            .system
            .ends_with("\"\"\"\nLess talk. More shipping.\n\nThat's the job.\n\"\"\""));
    }

    #[test]
    fn test_user_prompt_topic_only() {
        let p = render_text_prompts(&settings(), "Cloud costs", "", "", &[]);
        assert_eq!(p.user, format!("TOPIC: Cloud costs\n\n\n\n{CLOSING_INSTRUCTION}"));
    }

    #[test]
    fn test_user_prompt_all_blocks_in_order() {
        let articles = [ArticleSource {
            url: "https://a.example/1".to_string(),
            text: Some("Article one body".to_string()),
        }];
        let p = render_text_prompts(&settings(), "Cloud costs", "Hi5", "CTO at Acme", &articles);
        let role = p.user.find("AUTHOR CONTEXT:\nCTO at Acme").unwrap();
        let title = p.user.find("POST TITLE:").unwrap();
        let topic = p.user.find("TOPIC: Cloud costs").unwrap();
        let sources = p.user.find("SOURCE ARTICLES:").unwrap();
        let closing = p.user.find(CLOSING_INSTRUCTION).unwrap();
        assert!(role < title && title < topic && topic < sources && sources < closing);
        assert!(p.user.starts_with("AUTHOR CONTEXT:"));
        assert!(p.user.contains(&format!("\"{}\"", to_unicode_bold("Hi5"))));
        assert!(!p.user.contains("\"Hi5\""));
    }

    #[test]
    fn test_failed_fetch_keeps_position() {
        let articles = [
            ArticleSource {
                url: "https://a.example/1".to_string(),
                text: Some("Real article text".to_string()),
            },
            ArticleSource {
                url: "https://b.example/2".to_string(),
                text: None,
            },
        ];
        let p = render_text_prompts(&settings(), "", "", "", &articles);
        let first = p
            .user
            .find("--- Article 1 (https://a.example/1) ---\nReal article text")
            .unwrap();
        let second = p
            .user
            .find(&format!("--- Article 2 (https://b.example/2) ---\n{ARTICLE_UNAVAILABLE}"))
            .unwrap();
        assert!(first < second);
        assert!(p.user.starts_with("SOURCE ARTICLES:\n\n--- Article 1"));
        assert!(!p.user.contains("TOPIC:"));
    }
}
