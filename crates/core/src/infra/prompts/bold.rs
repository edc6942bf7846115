//! 数学用太字（Mathematical Bold）への変換

const BOLD_UPPER_A: u32 = 0x1D400;
const BOLD_LOWER_A: u32 = 0x1D41A;
const BOLD_DIGIT_ZERO: u32 = 0x1D7CE;

/// ASCII 英数字を太字コードポイントへ置き換える。それ以外はそのまま。
pub fn to_unicode_bold(text: &str) -> String {
    text.chars().map(bold_char).collect()
}

/// `to_unicode_bold` の逆変換
pub fn from_unicode_bold(text: &str) -> String {
    text.chars().map(plain_char).collect()
}

fn bold_char(ch: char) -> char {
    let base = match ch {
        'A'..='Z' => BOLD_UPPER_A + (ch as u32 - 'A' as u32),
        'a'..='z' => BOLD_LOWER_A + (ch as u32 - 'a' as u32),
        '0'..='9' => BOLD_DIGIT_ZERO + (ch as u32 - '0' as u32),
        _ => return ch,
    };
    char::from_u32(base).unwrap_or(ch)
}

fn plain_char(ch: char) -> char {
    let code = ch as u32;
    let plain = if (BOLD_UPPER_A..BOLD_UPPER_A + 26).contains(&code) {
        'A' as u32 + (code - BOLD_UPPER_A)
    } else if (BOLD_LOWER_A..BOLD_LOWER_A + 26).contains(&code) {
        'a' as u32 + (code - BOLD_LOWER_A)
    } else if (BOLD_DIGIT_ZERO..BOLD_DIGIT_ZERO + 10).contains(&code) {
        '0' as u32 + (code - BOLD_DIGIT_ZERO)
    } else {
        return ch;
    };
    char::from_u32(plain).unwrap_or(ch)
}
