// Broadcast scripts and their Telegram HTML form
use crate::analyzer::trend::{Direction, TrendVocabulary};
use crate::model::{CommodityPriceRecord, ExchangeRateRecord, ObservationDate};
use crate::renderer::commentary::{GRAMS_PER_TROY_OUNCE, GoldCommentary, RupiahCommentary};
use crate::utils::{format_grouped, format_long_date, indonesian_day_name};
use chrono::{Datelike, NaiveDate};

// Stand-ins for fields the article did not provide.
const DEFAULT_RUPIAH_RATE: f64 = 16_000.0;
const DEFAULT_TIME: &str = "10:00";
const DEFAULT_GOLD_PRICE: f64 = 1_000_000.0;
const DEFAULT_REFERENCE_PRICE: f64 = 2_000.0;
const BUYBACK_RATIO: f64 = 0.9;

const SEPARATOR: &str = "────────────────────";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScriptKind {
    Rupiah,
    Gold,
}

impl ScriptKind {
    pub fn label(self) -> &'static str {
        match self {
            ScriptKind::Rupiah => "RUPIAH",
            ScriptKind::Gold => "GOLD",
        }
    }

    fn subject(self) -> &'static str {
        match self {
            ScriptKind::Rupiah => "rupiah",
            ScriptKind::Gold => "emas/antam",
        }
    }
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

fn direction_of(delta: f64) -> Direction {
    if delta > 0.0 {
        Direction::Up
    } else if delta < 0.0 {
        Direction::Down
    } else {
        Direction::Flat
    }
}

/// Upper, title-case and intro words for a commodity move.
fn commodity_words(direction: Direction) -> (&'static str, &'static str, &'static str) {
    match direction {
        Direction::Up => ("NAIK", "Naik", "kembali naik"),
        Direction::Down => ("TURUN", "Turun", "kembali turun"),
        Direction::Flat => ("STAGNAN", "Stagnan", "stagnan"),
    }
}

/// An absent trend is written with the vocabulary's negative label.
pub fn render_rupiah(
    record: &ExchangeRateRecord,
    commentary: &RupiahCommentary,
    vocabulary: &TrendVocabulary,
    today: NaiveDate,
) -> String {
    let current = record
        .current_rate
        .or(record.opening_rate)
        .unwrap_or(DEFAULT_RUPIAH_RATE);
    let opening = record.opening_rate.unwrap_or(current);
    let time = record
        .observed_at
        .map(|t| t.format("%H:%M").to_string())
        .unwrap_or_else(|| DEFAULT_TIME.to_string());
    let percentage = record.percentage_change.unwrap_or(0.0);
    let trend = record
        .trend
        .as_ref()
        .map(|t| t.label.as_str())
        .unwrap_or(vocabulary.negative.as_str());

    let script = format!(
        "JUDUL : {title}

Nilai tukar rupiah {trend} dalam pembukaan perdagangan hari ini. {day}, {date}, rupiah dihargai {opening}/US$. Kemudian pada pukul {time} WIB, rupiah bergerak ke angka {current}/US$.

NILAI TUKAR RUPIAH {current}/US$ {trend_title} {percentage}% dari sebelumnya

{external}

NILAI TUKAR MATA UANG ASIA {asian}

{global_domestic}

PERKIRAAN PELEMAHAN RUPIAH {forecast}",
        title = record.title,
        trend = trend,
        day = indonesian_day_name(today.weekday()),
        date = format_long_date(today),
        opening = format_grouped(opening, 0),
        time = time,
        current = format_grouped(current, 0),
        trend_title = capitalize(trend),
        percentage = format_grouped(percentage.abs(), 2),
        external = commentary.external,
        asian = commentary.asian_currencies,
        global_domestic = commentary.global_domestic,
        forecast = commentary.forecast_range,
    );
    script.trim().to_string()
}

/// `rupiah_rate` is the current rate from the same run, used for the
/// rupiah value of the world gold price.
pub fn render_gold(
    record: &CommodityPriceRecord,
    commentary: &GoldCommentary,
    rupiah_rate: Option<f64>,
) -> String {
    let price = record.price.unwrap_or(DEFAULT_GOLD_PRICE);
    let change = record.price_change.unwrap_or(0.0);
    let buyback = record
        .buyback_price
        .unwrap_or_else(|| (price * BUYBACK_RATIO).trunc());
    let buyback_change = record
        .buyback_change
        .unwrap_or_else(|| (change * BUYBACK_RATIO).trunc());

    let (price_upper, price_title, price_intro) = commodity_words(direction_of(change));
    let (_, buyback_title, _) = commodity_words(direction_of(buyback_change));

    let reference = record.reference_price.unwrap_or(DEFAULT_REFERENCE_PRICE);
    let reference_pct = record.reference_change_pct.unwrap_or(0.0);
    let reference_idr =
        (reference * rupiah_rate.unwrap_or(DEFAULT_RUPIAH_RATE) / GRAMS_PER_TROY_OUNCE).trunc();
    let reference_word = if reference_pct >= 0.0 { "Bertambah" } else { "Berkurang" };

    let date_heading = match &record.observed_on {
        Some(ObservationDate::Stated(text)) => text.to_uppercase(),
        Some(ObservationDate::Supplied(date)) => format_long_date(*date).to_uppercase(),
        None => String::new(),
    };

    let mut price_section = format!("Rp {}/gram.", format_grouped(price, 0));
    if change != 0.0 {
        price_section.push_str(&format!(
            "\n{} Rp{}/gram dari hari sebelumnya",
            price_title,
            format_grouped(change.abs(), 0)
        ));
    }
    let mut buyback_section = format!("Rp {}/gram.", format_grouped(buyback, 0));
    if buyback_change != 0.0 {
        buyback_section.push_str(&format!(
            "\n{} Rp{}/gram dari sebelumnya",
            buyback_title,
            format_grouped(buyback_change.abs(), 0)
        ));
    }

    let script = format!(
        "JUDUL : EMAS ANTAM {price_upper} RP{change_abs}/GRAM, HARI INI

Harga emas PT Aneka Tambang Tbk atau Antam {price_intro}

HARGA EMAS ANTAM

{price_section}

HARGA BUYBACK EMAS ANTAM

{buyback_section}

****
{correlation}

{reference_heading}

US$ {reference}/troy ons.
Rp{reference_idr}
{reference_word} {reference_pct}% dari hari sebelumnya

{catalysts}

PERKIRAAN KENAIKAN HARGA EMAS DUNIA

{forecast_usd} atau {forecast_idr}",
        price_upper = price_upper,
        change_abs = format_grouped(change.abs().trunc(), 0),
        price_intro = price_intro,
        price_section = price_section,
        buyback_section = buyback_section,
        correlation = commentary.global_correlation,
        reference_heading = format!("HARGA EMAS DUNIA {}", date_heading).trim_end(),
        reference = format_grouped(reference, 1),
        reference_idr = format_grouped(reference_idr, 0),
        reference_word = reference_word,
        reference_pct = format_grouped(reference_pct.abs(), 2),
        catalysts = commentary.price_catalysts,
        forecast_usd = commentary.forecast_usd,
        forecast_idr = commentary.forecast_idr,
    );
    script.trim().to_string()
}

fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

/// At least one letter and no lowercase letters.
fn is_all_caps(line: &str) -> bool {
    line.chars().any(char::is_alphabetic) && !line.chars().any(char::is_lowercase)
}

fn footer(source_name: &str) -> String {
    format!("\n\n{}\nℹ️ <i>Data dari {}</i>", SEPARATOR, escape_html(source_name))
}

/// Telegram HTML: escaped text, bold title and section headers, header and
/// source footer. `****` separators are dropped.
pub fn format_for_telegram(script: &str, kind: ScriptKind, source_name: &str) -> String {
    let header = format!("📊 <b>SCRIPT {}</b> 📊\n\n", kind.label());
    let escaped = escape_html(&script.replace("****", ""));

    let body = escaped
        .lines()
        .map(|line| {
            let stripped = line.trim();
            if stripped.starts_with("JUDUL : ") {
                format!("<b>{}</b>", stripped)
            } else if is_all_caps(stripped) && stripped.chars().count() > 3 {
                format!("<b>{}</b>", stripped)
            } else {
                line.to_string()
            }
        })
        .collect::<Vec<_>>()
        .join("\n");

    format!("{}{}{}", header, body, footer(source_name))
}

/// Sent instead of a script when no article was found.
pub fn no_article_message(kind: ScriptKind, source_name: &str) -> String {
    format!(
        "📊 <b>SCRIPT {}</b> 📊\n\n<b>Tidak ada artikel</b> tentang {} yang ditemukan hari ini.{}",
        kind.label(),
        kind.subject(),
        footer(source_name)
    )
}
