// Fixed-template commentary paragraphs for the broadcast scripts
use crate::analyzer::trend::Direction;
use crate::model::{CommodityPriceRecord, CurrencyObservation, ExchangeRateRecord};
use crate::utils::format_grouped;

/// Grams per troy ounce.
pub const GRAMS_PER_TROY_OUNCE: f64 = 31.1035;

const RUPIAH_FORECAST_SPREAD: f64 = 50.0;
const GOLD_FORECAST_SPREAD_USD: f64 = 20.0;

#[derive(Debug, Clone, PartialEq)]
pub struct RupiahCommentary {
    pub external: String,
    pub asian_currencies: String,
    pub global_domestic: String,
    pub forecast_range: String,
}

impl RupiahCommentary {
    pub fn from_record(record: &ExchangeRateRecord) -> Self {
        let movement = match record.trend.as_ref().map(|t| t.direction) {
            Some(Direction::Up) => "penguatan",
            _ => "pelemahan",
        };
        let external = format!(
            "Pergerakan {} rupiah dipengaruhi oleh dinamika pasar global. \
             Indeks dolar AS menunjukkan volatilitas yang berdampak pada mata uang emerging market. \
             Para investor terus memantau kebijakan bank sentral AS The Fed terkait suku bunga.",
            movement
        );

        let global_domestic = "Faktor domestik juga berperan dalam pergerakan rupiah hari ini. \
             Kondisi ekonomi dalam negeri dan arus modal asing mempengaruhi sentimen pasar. \
             Bank Indonesia diperkirakan akan terus menjaga stabilitas nilai tukar."
            .to_string();

        let forecast_range = match record.current_rate {
            Some(rate) => format!(
                "Rp {} - Rp {}/US$",
                format_grouped((rate - RUPIAH_FORECAST_SPREAD).trunc(), 0),
                format_grouped((rate + RUPIAH_FORECAST_SPREAD).trunc(), 0)
            ),
            None => "Rp 16.900 - Rp 17.000/US$".to_string(),
        };

        Self {
            external,
            asian_currencies: asian_currencies_text(&record.currencies),
            global_domestic,
            forecast_range,
        }
    }
}

/// `Peso (+0,12%), Yen (-0,35%)`
fn asian_currencies_text(currencies: &[CurrencyObservation]) -> String {
    if currencies.is_empty() {
        return "Data mata uang Asia tidak tersedia".to_string();
    }
    currencies
        .iter()
        .map(|c| format!("{} ({}%)", c.name, signed_percent(c.change_pct)))
        .collect::<Vec<_>>()
        .join(", ")
}

fn signed_percent(value: f64) -> String {
    let sign = if value < 0.0 { '-' } else { '+' };
    format!("{}{}", sign, format_grouped(value.abs(), 2))
}

#[derive(Debug, Clone, PartialEq)]
pub struct GoldCommentary {
    pub global_correlation: String,
    pub price_catalysts: String,
    pub forecast_usd: String,
    pub forecast_idr: String,
}

impl GoldCommentary {
    /// `rupiah_rate` converts the US$ forecast into rupiah per gram.
    pub fn from_record(record: &CommodityPriceRecord, rupiah_rate: Option<f64>) -> Self {
        let movement = match record.price_trend.as_ref().map(|t| t.direction) {
            Some(Direction::Up) => "kenaikan",
            _ => "penurunan",
        };
        let global_correlation = format!(
            "Harga emas Antam mengikuti pergerakan harga emas dunia yang mengalami {}. \
             Korelasi antara harga domestik dan global tetap kuat seiring dengan fluktuasi nilai tukar rupiah.",
            movement
        );

        let price_catalysts = "Faktor geopolitik global dan status safe haven emas mendorong pergerakan harga. \
             Ekspektasi kebijakan moneter bank sentral utama juga mempengaruhi daya tarik logam mulia."
            .to_string();

        let default_idr = "Rp 1.050.000 - Rp 1.100.000/gram".to_string();
        let (forecast_usd, forecast_idr) = match record.reference_price {
            Some(base) => {
                let low = (base - GOLD_FORECAST_SPREAD_USD).trunc();
                let high = (base + GOLD_FORECAST_SPREAD_USD).trunc();
                let usd = format!(
                    "US$ {} - US$ {}/troy ons",
                    format_grouped(low, 0),
                    format_grouped(high, 0)
                );
                let idr = match rupiah_rate {
                    Some(rate) => {
                        let per_gram = rate / GRAMS_PER_TROY_OUNCE;
                        format!(
                            "Rp {} - Rp {}/gram",
                            format_grouped((low * per_gram).trunc(), 0),
                            format_grouped((high * per_gram).trunc(), 0)
                        )
                    }
                    None => default_idr,
                };
                (usd, idr)
            }
            None => ("US$ 2.000 - US$ 2.050/troy ons".to_string(), default_idr),
        };

        Self {
            global_correlation,
            price_catalysts,
            forecast_usd,
            forecast_idr,
        }
    }
}
