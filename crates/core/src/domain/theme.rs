use serde::{Deserialize, Serialize};

/// インフォグラフィックの視覚テーマ
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    Shock,
    Dark,
    Light,
    Tech,
    Sign,
    /// 旧テーマ。テンプレートは残っているがサイクルには含まれない
    #[serde(rename = "roadsign")]
    RoadSign,
    Cylinder,
    Neon,
}

/// 唯一のサイクル表。全ての呼び出し元がこれを使う。
const CYCLE: [(Theme, Theme); 7] = [
    (Theme::Shock, Theme::Dark),
    (Theme::Dark, Theme::Light),
    (Theme::Light, Theme::Tech),
    (Theme::Tech, Theme::Sign),
    (Theme::Sign, Theme::Cylinder),
    (Theme::Cylinder, Theme::Neon),
    (Theme::Neon, Theme::Shock),
];

impl Theme {
    pub const ALL: [Theme; 8] = [
        Theme::Shock,
        Theme::Dark,
        Theme::Light,
        Theme::Tech,
        Theme::Sign,
        Theme::RoadSign,
        Theme::Cylinder,
        Theme::Neon,
    ];

    /// サイクル表に見つからない場合の既定テーマ
    pub const DEFAULT: Theme = Theme::Shock;

    /// サイクルの長さ
    pub const CYCLE_LEN: usize = CYCLE.len();

    pub fn as_str(self) -> &'static str {
        match self {
            Theme::Shock => "shock",
            Theme::Dark => "dark",
            Theme::Light => "light",
            Theme::Tech => "tech",
            Theme::Sign => "sign",
            Theme::RoadSign => "roadsign",
            Theme::Cylinder => "cylinder",
            Theme::Neon => "neon",
        }
    }

    pub fn parse(value: &str) -> Option<Theme> {
        Theme::ALL.into_iter().find(|t| t.as_str() == value)
    }

    /// サイクル上の次のテーマ（サイクル外なら既定テーマ）
    pub fn next(self) -> Theme {
        CYCLE
            .iter()
            .find(|(from, _)| *from == self)
            .map(|(_, to)| *to)
            .unwrap_or(Theme::DEFAULT)
    }

    pub fn in_cycle(self) -> bool {
        CYCLE.iter().any(|(from, _)| *from == self)
    }

    /// 画像ラッパーの背景色
    pub fn backdrop_hex(self) -> &'static str {
        match self {
            Theme::Shock => "#0a0e1a",
            Theme::Dark => "#0d1b2a",
            Theme::Light => "#f0f4f8",
            Theme::Tech => "#050a15",
            Theme::Sign => "#e8e8e8",
            Theme::RoadSign => "#2a1a1a",
            Theme::Cylinder => "#d0d0d0",
            Theme::Neon => "#0d0005",
        }
    }
}

impl std::fmt::Display for Theme {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Theme {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Theme::parse(s).ok_or_else(|| format!("unknown theme: {s}"))
    }
}

/// 任意の文字列から次のテーマを求める。未知の値は既定テーマ。
pub fn advance(current: &str) -> Theme {
    match Theme::parse(current) {
        Some(theme) => theme.next(),
        None => Theme::DEFAULT,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cycle_closure() {
        for start in Theme::ALL.into_iter().filter(|t| t.in_cycle()) {
            let mut t = start;
            for step in 1..=Theme::CYCLE_LEN {
                t = t.next();
                assert!(Theme::ALL.contains(&t));
                if step < Theme::CYCLE_LEN {
                    assert_ne!(t, start, "{start} returned early after {step} steps");
                }
            }
            assert_eq!(t, start);
        }
    }

    #[test]
    fn test_cycle_sequence_from_shock() {
        let mut seq = vec![];
        let mut current = Theme::Shock.as_str().to_string();
        for _ in 0..7 {
            let next = advance(&current);
            seq.push(next);
            current = next.to_string();
        }
        assert_eq!(
            seq,
            vec![
                Theme::Dark,
                Theme::Light,
                Theme::Tech,
                Theme::Sign,
                Theme::Cylinder,
                Theme::Neon,
                Theme::Shock,
            ]
        );
    }

    #[test]
    fn test_advance_unknown_gives_default() {
        for v in ["", "SHOCK", "sepia", "road sign", "neon "] {
            assert_eq!(advance(v), Theme::DEFAULT);
        }
    }

    #[test]
    fn test_roadsign_outside_cycle() {
        assert!(!Theme::RoadSign.in_cycle());
        assert_eq!(advance("roadsign"), Theme::Shock);
        assert!(Theme::ALL.iter().all(|t| t.next() != Theme::RoadSign));
    }

    #[test]
    fn test_parse_roundtrip_names() {
        for t in Theme::ALL {
            assert_eq!(t.as_str().parse::<Theme>().unwrap(), t);
            assert_eq!(
                serde_json::to_string(&t).unwrap(),
                format!("\"{}\"", t.as_str())
            );
        }
        assert!("glitter".parse::<Theme>().is_err());
    }
}
