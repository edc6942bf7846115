//! プロンプト組み立て（純粋関数のみ。ネットワーク・ストレージに触れない）

pub mod analysis;
pub mod bold;
pub mod image;
pub mod takeaways;
pub mod text;

pub use bold::{from_unicode_bold, to_unicode_bold};
pub use image::{render_image_prompt, render_image_prompt_for, ImagePromptInput};
pub use text::render_text_prompts;
