//! 非交互模式输出 (--foods)

use std::fmt::Write;

use crate::models::Analysis;

/// 数值显示：最多两位小数，去掉多余的 0
pub fn format_amount(value: f64) -> String {
    let s = format!("{value:.2}");
    let s = s.trim_end_matches('0').trim_end_matches('.');
    if s == "-0" { "0".to_string() } else { s.to_string() }
}

/// 文本报告：逐个食物 + 合计表
pub fn render_text(analysis: &Analysis) -> String {
    let mut out = String::new();

    let _ = writeln!(out, "Nutritional Summary");
    for record in &analysis.results {
        let _ = writeln!(out, "\n  {}", record.description);
        if record.field_count() == 0 {
            let _ = writeln!(out, "    (no tracked nutrients)");
        }
        for (label, value) in record.fields() {
            let _ = writeln!(out, "    {label:<20} {:>10}", format_amount(value));
        }
    }

    let _ = writeln!(out, "\nTotal Combined Nutrition");
    for (label, value) in analysis.totals.iter() {
        let _ = writeln!(out, "  {label:<22} {:>10}", format_amount(value));
    }

    if !analysis.missing.is_empty() {
        let _ = writeln!(out, "\nNot found: {}", analysis.missing.join(", "));
    }
    out
}

pub fn render_json(analysis: &Analysis) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(analysis)
}
