/// Format an amount as a USD-style money string: `$` prefix and exactly two
/// digits after the decimal point, rounded (not truncated).
/// Example: 300.3 -> "$300.30"
pub fn format_usd(amount: f64) -> String {
    format!("${:.2}", amount)
}
