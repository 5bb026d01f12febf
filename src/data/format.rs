//! Display formatting for amounts and dates

use chrono::NaiveDate;

use super::costs::{Money, Rate};

/// Group the integer part with commas: `745650` -> `745,650`
pub fn format_amount(value: f64) -> String {
    let negative = value < 0.0;
    let rounded = (value.abs() * 100.0).round() / 100.0;
    let whole = rounded.trunc() as u64;
    let cents = ((rounded - rounded.trunc()) * 100.0).round() as u64;

    let digits = whole.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }

    let sign = if negative { "-" } else { "" };
    if cents == 0 {
        format!("{}{}", sign, grouped)
    } else {
        let fraction = format!("{:02}", cents);
        format!("{}{}.{}", sign, grouped, fraction.trim_end_matches('0'))
    }
}

/// `AED 18,500/week` plus an optional `≈ $5,037/week USD` line
pub fn format_money(money: &Money, unit: &str) -> (String, Option<String>) {
    let aed = format!("AED {}{}", format_amount(money.aed), unit);
    let usd = money
        .usd
        .map(|usd| format!("≈ ${}{} USD", format_amount(usd), unit));
    (aed, usd)
}

pub fn format_rate(rate: &Rate) -> String {
    match rate {
        Rate::Weekly { rate, usd, weeks } => {
            let mut s = format!("AED {}/week", format_amount(*rate));
            if let Some(weeks) = weeks {
                s.push_str(&format!(" × {} weeks", weeks));
            }
            if let Some(usd) = usd {
                s.push_str(&format!(" (${}/week USD)", format_amount(*usd)));
            }
            s
        }
        Rate::Monthly { rate, usd, months } => {
            let mut s = format!("AED {}/mo", format_amount(*rate));
            if let Some(months) = months {
                s.push_str(&format!(" × {} months", months));
            }
            if let Some(usd) = usd {
                s.push_str(&format!(" (${}/mo USD)", format_amount(*usd)));
            }
            s
        }
        Rate::Flat { cost, note } => match note {
            Some(note) => format!("AED {} ({})", format_amount(*cost), note),
            None => format!("AED {}", format_amount(*cost)),
        },
    }
}

/// `2025-09-30` -> `Sep 2025`; anything unparseable is returned as-is
pub fn format_month_year(date: &str) -> String {
    parse_date(date)
        .map(|d| d.format("%b %Y").to_string())
        .unwrap_or_else(|| date.to_string())
}

/// `2025-09-30` -> `September 2025`
pub fn format_month_year_long(date: &str) -> String {
    parse_date(date)
        .map(|d| d.format("%B %Y").to_string())
        .unwrap_or_else(|| date.to_string())
}

fn parse_date(date: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(date, "%Y-%m-%d").ok()
}
