// One broadcast pass: fetch, extract, render, deliver
use crate::analyzer::RecordBuilder;
use crate::config::AppConfig;
use crate::model::Article;
use crate::notifier::TelegramNotifier;
use crate::renderer::{
    GoldCommentary, RupiahCommentary, ScriptKind, format_for_telegram, no_article_message,
    render_gold, render_rupiah,
};
use crate::scraper::ArticleSource;
use chrono::NaiveDate;
use tracing::{info, warn};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub rupiah_sent: bool,
    pub gold_sent: bool,
}

impl RunSummary {
    pub fn any_sent(&self) -> bool {
        self.rupiah_sent || self.gold_sent
    }
}

async fn fetch_article(source: &dyn ArticleSource, keyword: &str) -> Option<Article> {
    match source.latest(keyword).await {
        Ok(Some(article)) => Some(article),
        Ok(None) => {
            warn!("📭 No article found for '{}'", keyword);
            None
        }
        Err(e) => {
            warn!("❌ Article lookup for '{}' failed: {}", keyword, e);
            None
        }
    }
}

async fn deliver(notifier: &TelegramNotifier, kind: ScriptKind, message: &str) -> bool {
    match notifier.notify_text(message).await {
        Ok(()) => {
            info!("📤 {} script delivered", kind.label());
            true
        }
        Err(e) => {
            warn!("❌ {} script not delivered: {}", kind.label(), e);
            false
        }
    }
}

/// Fetches both articles concurrently, then renders and sends the rupiah
/// script followed by the gold script. A missing article is reported with a
/// short notice instead of a script.
pub async fn run(
    config: &AppConfig,
    source: &dyn ArticleSource,
    notifier: &TelegramNotifier,
    builder: &RecordBuilder,
    today: NaiveDate,
) -> RunSummary {
    let site = &config.site;
    let (rupiah_article, gold_article) = futures::join!(
        fetch_article(source, &site.rupiah_keyword),
        fetch_article(source, &site.gold_keyword)
    );

    let rupiah_record = rupiah_article.as_ref().map(|article| builder.exchange_rate(article));
    let rupiah_message = match &rupiah_record {
        Some(record) => {
            if record.is_empty() {
                warn!("⚠️ Nothing extracted from '{}', rendering defaults", record.title);
            }
            let commentary = RupiahCommentary::from_record(record);
            let script = render_rupiah(
                record,
                &commentary,
                &config.extraction.currency_vocabulary,
                today,
            );
            format_for_telegram(&script, ScriptKind::Rupiah, &site.source_name)
        }
        None => no_article_message(ScriptKind::Rupiah, &site.source_name),
    };
    let rupiah_sent = deliver(notifier, ScriptKind::Rupiah, &rupiah_message).await;

    let rupiah_rate = rupiah_record.as_ref().and_then(|record| record.current_rate);
    let gold_message = match &gold_article {
        Some(article) => {
            let record = builder.commodity(article, Some(today));
            if record.is_empty() {
                warn!("⚠️ Nothing extracted from '{}', rendering defaults", record.title);
            }
            let commentary = GoldCommentary::from_record(&record, rupiah_rate);
            let script = render_gold(&record, &commentary, rupiah_rate);
            format_for_telegram(&script, ScriptKind::Gold, &site.source_name)
        }
        None => no_article_message(ScriptKind::Gold, &site.source_name),
    };
    let gold_sent = deliver(notifier, ScriptKind::Gold, &gold_message).await;

    let summary = RunSummary {
        rupiah_sent,
        gold_sent,
    };
    info!(
        "🏁 Run finished: rupiah {}, gold {}",
        if summary.rupiah_sent { "sent" } else { "failed" },
        if summary.gold_sent { "sent" } else { "failed" }
    );
    summary
}
