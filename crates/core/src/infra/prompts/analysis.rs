use std::sync::LazyLock;

use regex::Regex;

use crate::domain::types::{AnalysisReport, TextPrompts};

pub const ANALYSIS_SYSTEM: &str = "You are a LinkedIn content strategist. You analyze posts and give structured, actionable feedback.";

static SCORE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)ENGAGEMENT SCORE:\s*(\d+)").expect("valid score regex"));
static HOOK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?im)^\s*HOOK STRENGTH:(.*)$").expect("valid hook regex"));
static READABILITY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?im)^\s*READABILITY:(.*)$").expect("valid readability regex"));

/// 分析依頼プロンプト
pub fn render_analysis_prompts(post: &str) -> TextPrompts {
    let user = format!(
        "Analyze this LinkedIn post and respond in the following exact format:

ENGAGEMENT SCORE: [number 1-100]/100
HOOK STRENGTH: [Weak/Moderate/Strong/Excellent]
READABILITY: [Poor/Fair/Good/Excellent]

WHAT'S WORKING:
- [point 1]
- [point 2]
- [point 3]

IMPROVEMENTS:
- [specific change 1]
- [specific change 2]
- [specific change 3]

REVISED HOOK:
[Write a better opening line for this post]

---
Post to analyze:
\"\"\"
{post}
\"\"\""
    );
    TextPrompts {
        system: ANALYSIS_SYSTEM.to_string(),
        user,
    }
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum Section {
    None,
    Working,
    Improvements,
    RevisedHook,
}

/// 分析応答を構造化する。見つからない項目は空のまま。
pub fn parse_analysis(text: &str) -> AnalysisReport {
    let mut report = AnalysisReport {
        score: SCORE
            .captures(text)
            .and_then(|c| c[1].parse::<u32>().ok())
            .map(|s| s.min(100)),
        hook_strength: capture_label(&HOOK, text),
        readability: capture_label(&READABILITY, text),
        ..Default::default()
    };

    let mut section = Section::None;
    let mut hook_lines: Vec<&str> = vec![];

    for line in text.lines() {
        let trimmed = line.trim();
        // 以降は引用された元投稿
        if trimmed.starts_with("---") {
            break;
        }
        let upper = trimmed.to_ascii_uppercase();
        if upper.starts_with("WHAT'S WORKING:") {
            section = Section::Working;
            continue;
        }
        if upper.starts_with("IMPROVEMENTS:") {
            section = Section::Improvements;
            continue;
        }
        if upper.starts_with("REVISED HOOK:") {
            section = Section::RevisedHook;
            let inline = trimmed["REVISED HOOK:".len()..].trim();
            if !inline.is_empty() {
                hook_lines.push(inline);
            }
            continue;
        }

        match section {
            Section::Working | Section::Improvements => {
                if let Some(item) = trimmed.strip_prefix("- ") {
                    let target = if section == Section::Working {
                        &mut report.working
                    } else {
                        &mut report.improvements
                    };
                    target.push(item.trim().to_string());
                }
            }
            Section::RevisedHook if !trimmed.is_empty() => hook_lines.push(trimmed),
            _ => {}
        }
    }

    if !hook_lines.is_empty() {
        report.revised_hook = Some(hook_lines.join("\n"));
    }
    report
}

fn capture_label(re: &Regex, text: &str) -> Option<String> {
    re.captures(text)
        .map(|c| c[1].trim().to_string())
        .filter(|s| !s.is_empty())
}
