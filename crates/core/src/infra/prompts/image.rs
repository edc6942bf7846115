//! テーマ別の画像生成プロンプト
//!
//! テーマごとに1つのテンプレート関数を持ち、`template_for` の網羅的な
//! match で対応付ける。テーマを追加するとここがコンパイルエラーになる。

use crate::domain::theme::Theme;

/// テンプレートへの入力
#[derive(Debug, Clone, Copy)]
pub struct ImagePromptInput<'a> {
    pub headline: &'a str,
    pub takeaways: [&'a str; 3],
    /// 著者の短い肩書き。現行テンプレートには埋め込まない
    pub role_short: &'a str,
}

type Template = fn(&ImagePromptInput<'_>) -> String;

fn template_for(theme: Theme) -> Template {
    match theme {
        Theme::Shock => shock,
        Theme::Dark => dark,
        Theme::Light => light,
        Theme::Tech => tech,
        Theme::Sign => sign,
        Theme::RoadSign => road_sign,
        Theme::Cylinder => cylinder,
        Theme::Neon => neon,
    }
}

/// テーマに対応する画像プロンプトを返す
pub fn render_image_prompt(theme: Theme, input: &ImagePromptInput<'_>) -> String {
    template_for(theme)(input)
}

/// 文字列のテーマ名から描画する。未知の名前は light テンプレート。
pub fn render_image_prompt_for(theme: &str, input: &ImagePromptInput<'_>) -> String {
    render_image_prompt(Theme::parse(theme).unwrap_or(Theme::Light), input)
}

fn shock(i: &ImagePromptInput<'_>) -> String {
    let [t1, t2, t3] = i.takeaways;
    format!(
        "A bold, dramatic, high-impact editorial infographic in portrait format styled after viral tech news media covers. Very dark near-black background (#0a0e1a) with a futuristic server room or technology environment subtly glowing in the backdrop — cinematic, atmospheric depth.

EXACT LAYOUT (top to bottom):
1. TOP HEADER: Full-width thin fiery orange accent bar, then large bold ALL-CAPS white headline: \"{headline}\" — with one or two key words rendered in a dramatic orange-to-red gradient (#FF4500 to #FF8C00) for shocking visual impact
2. HERO SECTION: The most visually dominant element on the page — a bold insight or key phrase from \"{t1}\" displayed in massive heavy typography, bright orange-to-gold gradient (#FF6B00 to #FFD700) with a dramatic glow radiating beneath it, centered, commanding ~25% of the vertical space
3. CHALLENGE TEXT: Bold white provocative question or challenge statement that makes the viewer question their current approach
4. VISUAL ELEMENT: A dramatic silhouetted business figure (seen from behind, no face) alongside an abstract futuristic AI or tech visual element, both glowing with orange-blue atmospheric light
5. THREE PANELS: Three equal-width info panels side by side, each with a glowing orange top border. Each panel has: a small glowing icon, bold white uppercase label, brief light-grey description. LEFT: \"{t1}\" | CENTER: \"{t2}\" | RIGHT: \"{t3}\"
6. CTA BANNER: Full-width bold banner with strong orange gradient (#CC3700 to #FF6B00), white bold ALL-CAPS call-to-action urging immediate action
7. FOOTER STRIP: Narrow dark footer with a white closing question

STYLE: High-energy, fire orange (#FF6B00) and gold (#FFD700) accents on very dark near-black background, dramatic neon-like glow effects, cinematic high-contrast lighting, bold aggressive typography hierarchy, no brand logos, no watermarks, no identifiable faces, print-ready",
        headline = i.headline,
    )
}

fn dark(i: &ImagePromptInput<'_>) -> String {
    let [t1, t2, t3] = i.takeaways;
    format!(
        "A dramatic, editorial-style infographic in portrait format. Dark, textured near-black background with subtle grunge and distressed texture — no flat color fills.

Layout from top to bottom:
- Large bold white display title at the very top: \"{headline}\" — followed by a thin gold or red horizontal accent line beneath it
- Atmospheric thematic illustration in the upper-middle section: cinematic, dramatic scene visually related to the topic, dark moody lighting, no human faces
- Three insight rows below the illustration, each row containing: a small relevant icon, a bold uppercase white label, and lighter-weight description text — content: \"{t1}\" / \"{t2}\" / \"{t3}\"
- A bold closing statement at the bottom with key words highlighted in gold (#D4A017)

Style: cinematic editorial magazine quality, gold (#D4A017) and white typography, mix of bold display and regular sans-serif weight, dramatic high-contrast lighting, no brand logos, no watermarks, no people, print-ready",
        headline = i.headline,
    )
}

fn light(i: &ImagePromptInput<'_>) -> String {
    let [t1, t2, t3] = i.takeaways;
    format!(
        "A clean, editorial-style infographic in portrait format. Light grey or off-white background with subtle paper or linen texture — professional editorial layout.

Layout from top to bottom:
- Large bold dark display title at the very top: \"{headline}\" — followed by a thin blue (#0077B5) horizontal accent line beneath it
- Clean thematic illustration in the upper-middle section: modern, professional graphic visually related to the topic, soft color treatment, no human faces
- Three insight rows below the illustration, each row containing: a small relevant icon, a bold uppercase dark label, and lighter-weight description text — content: \"{t1}\" / \"{t2}\" / \"{t3}\"
- A bold closing statement at the bottom with key words highlighted in blue (#0077B5)

Style: modern editorial magazine quality, blue (#0077B5) and dark grey typography on light textured background, clean sans-serif, subtle drop shadows, high readability, no brand logos, no watermarks, no people, print-ready",
        headline = i.headline,
    )
}

fn tech(i: &ImagePromptInput<'_>) -> String {
    let [t1, t2, t3] = i.takeaways;
    format!(
        "A high-tech futuristic infographic in portrait format. Deep midnight navy-black background (#050a15) layered with subtle glowing circuit board traces, hexagonal grid patterns, and faint scan-line overlays — like a holographic heads-up display projected in a dark operations center.

EXACT LAYOUT (top to bottom):
1. HEADER: A glowing electric-blue horizontal accent line, then the bold headline in large clean white sans-serif with electric blue (#00d4ff) highlights on key words: \"{headline}\"
2. VISUAL ELEMENT: A dramatic central graphic — a glowing data sphere or holographic ring structure radiating electric blue and cyan light, floating on the dark background, conveying scale and advanced technology
3. THREE PANELS: Three equal cards with glowing electric blue (#00d4ff) borders and very dark semi-transparent fills. Each card has a small glowing tech icon, bold white label, and concise grey description. LEFT: \"{t1}\" | CENTER: \"{t2}\" | RIGHT: \"{t3}\"
4. DATA STRIP: A full-width band with subtle digital texture, showing a key insight or metric in large bold white type
5. FOOTER: A thin glowing cyan line, then a closing statement in white

STYLE: Futuristic sci-fi editorial, electric blue (#00d4ff) and cyan (#00ffee) accents on near-black (#050a15), neon glow effects on panel borders and text highlights, crisp geometric sans-serif typography, circuit traces and hexagonal grid as background texture. No brand logos, no watermarks, no human faces, print-ready portrait format.",
        headline = i.headline,
    )
}

fn sign(i: &ImagePromptInput<'_>) -> String {
    format!(
        "A photorealistic minimalist typographic sign in portrait orientation, displayed in a clean modern interior. The sign is a large white rectangular panel with a thin white frame/border, mounted flat on a light warm-grey concrete or plaster wall. A subtle warm LED strip light glows softly from directly beneath the bottom edge of the sign.

The sign surface is pure clean white. Typography is the ONLY content — no icons, no images, no decorative elements except one horizontal rule:

TYPOGRAPHY LAYOUT (top to bottom):
- UPPER BLOCK: Large bold ALL-CAPS black sans-serif text, left-aligned with generous left margin, occupying roughly the top 65% of the sign interior. The text is the title/headline of the post, written in full and wrapping naturally across multiple lines at very large type size. Text reads: \"{headline}\"
- HORIZONTAL RULE: A single thin solid black horizontal line spanning ~85% of the sign width
- LOWER BLOCK: Same large bold ALL-CAPS black sans-serif style, left-aligned, a short punchy memorable closer derived from: \"{t1}\" — distilled to its most impactful 3–6 words

TYPOGRAPHY STYLE: Bold condensed or regular geometric sans-serif (Futura Bold / Helvetica Neue Bold / Montserrat ExtraBold style), pure black (#111111) on pure white (#FFFFFF), very large point size, generous line-height, slightly loose tracking.

PHOTO STYLE: Photorealistic interior photograph, very slight 3/4 perspective angle, soft natural light from the left, warm LED underglow at the sign base, clean minimal background wall. No people, no brand logos, no watermarks.",
        headline = i.headline,
        t1 = i.takeaways[0],
    )
}

fn road_sign(i: &ImagePromptInput<'_>) -> String {
    format!(
        "A photorealistic urban photograph shot from street level looking straight ahead down a wide multi-lane city road. An overpass or bridge spans the road in the middle distance. Mounted on the underside of the overpass, centered across all lanes, is a large rectangular LED highway message board — the kind used for traffic advisories. The sign has a thick black metal housing and border. The LED matrix display glows with bright amber/orange dot-matrix text on a pure black background.

SIGN TEXT: The sign displays exactly this message in large LED dot-matrix ALL-CAPS lettering, centered and word-wrapped naturally across 2–3 lines to fill the panel: \"{headline}\"

LED TEXT STYLE: Classic amber/orange dot-matrix LED characters, each letter formed by a grid of glowing dots, very bright against the black panel, slight glow/bloom effect around the letters. No other text, no icons.

SCENE: Urban city environment — multiple lanes of traffic (cars seen from behind, driving away from camera), city buildings flanking both sides of the road, overcast or dusk sky. Slight wide-angle perspective. Photorealistic, cinematic, no watermarks, no logos, no people's faces visible.",
        headline = i.headline,
    )
}

fn cylinder(i: &ImagePromptInput<'_>) -> String {
    format!(
        "A photorealistic photograph of a large freestanding cylindrical column or advertising pillar in an open urban plaza or corporate courtyard. The cylinder is approximately 2 metres tall and wide, with a smooth white or off-white surface and polished chrome or brushed steel rims at the top and bottom edge. The column stands on a clean stone-paved plaza floor; glass office buildings or a modern corporate facade are softly visible in the background.

SIGN TEXT: The curved white face of the cylinder displays ONLY the following text, printed in very large bold ALL-CAPS black sans-serif typeface, centered both vertically and horizontally on the cylinder face: \"{headline}\"

TYPOGRAPHY: Extremely large, heavy black sans-serif (similar to Impact, Helvetica Neue Black, or Gotham Ultra). Text wraps naturally across multiple lines to fill the cylinder face. Characters are crisp black on pure white. No icons, no decorations, no secondary text — only the headline.

PHOTO STYLE: Photorealistic, slight low-angle shot looking up slightly at the column, soft overcast daylight, subtle ambient shadow on the paved ground. No people, no brand logos, no watermarks.",
        headline = i.headline,
    )
}

fn neon(i: &ImagePromptInput<'_>) -> String {
    format!(
        "A photorealistic photograph of a square acrylic or clear glass sign panel hanging by a thin cord or rope from above, positioned in front of a large window at dusk or evening. Outside the window, blurred trees and street lights are softly visible. The panel is mounted with small chrome screws at each corner.

SIGN TEXT: The panel displays ONLY the following text as bright red neon tube lettering, bold ALL-CAPS, left-aligned with a generous left margin, wrapping naturally across multiple lines to fill the panel face: \"{headline}\"

NEON STYLE: Red neon glass tubes formed into each letter, glowing intensely with a warm red-pink light. Strong neon glow and bloom effect radiating from each letter onto the surrounding acrylic surface. The neon color is vivid red (#FF2244) with a soft pink halo. No other colors, no icons, no secondary text.

ATMOSPHERE: The neon text reflects and mirrors faintly on the window glass behind the panel. The room behind the camera is dark, making the neon the primary light source. Bokeh city/nature background through the window. Photorealistic, moody, cinematic. No people, no brand logos, no watermarks.",
        headline = i.headline,
    )
}
