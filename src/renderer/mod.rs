pub mod commentary;
pub mod script;

pub use commentary::{GoldCommentary, RupiahCommentary};
pub use script::{ScriptKind, format_for_telegram, no_article_message, render_gold, render_rupiah};
