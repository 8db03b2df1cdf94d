//! Display formatting for prices, changes and market caps.

const MISSING: &str = "—";

fn group_thousands(int_part: u64) -> String {
    let digits = int_part.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// `1234.5` -> `"$1,234.50"`.
#[must_use]
pub fn format_price(price: f64) -> String {
    let cents = (price.abs() * 100.0).round();
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let cents = cents as u64;
    let sign = if price < 0.0 && cents > 0 { "-" } else { "" };
    format!("{sign}${}.{:02}", group_thousands(cents / 100), cents % 100)
}

/// `1.234` -> `"+1.23%"`, `-0.5` -> `"-0.50%"`, `0` -> `"0.00%"`.
#[must_use]
pub fn format_change_percent(change: f64) -> String {
    if change == 0.0 {
        "0.00%".to_string()
    } else if change > 0.0 {
        format!("+{change:.2}%")
    } else {
        format!("{change:.2}%")
    }
}

/// Formats a market cap given in millions (Finnhub's unit) as `$X.XXT`, `$X.XXB` or `$X.XXM`.
#[must_use]
pub fn format_market_cap_value(millions: f64) -> String {
    if !millions.is_finite() || millions <= 0.0 {
        return "N/A".to_string();
    }
    let usd = millions * 1_000_000.0;
    if usd >= 1e12 {
        format!("${:.2}T", usd / 1e12)
    } else if usd >= 1e9 {
        format!("${:.2}B", usd / 1e9)
    } else {
        format!("${:.2}M", usd / 1e6)
    }
}

#[must_use]
pub(crate) fn format_pe_ratio(pe: Option<f64>) -> String {
    match pe {
        Some(v) if v.is_finite() && v != 0.0 => format!("{v:.1}"),
        _ => MISSING.to_string(),
    }
}
