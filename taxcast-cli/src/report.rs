//! Plain-text rendering of an estimate.

use std::fmt::Write;

use taxcast_finance::{describe_asset, AcquisitionCost, EstimationResult, Regime};

/// `¥1,234,567`, rounded to whole yen.
pub fn format_yen(amount: f64) -> String {
    let rounded = amount.round() as i64;
    let digits = rounded.unsigned_abs().to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }
    if rounded < 0 {
        format!("-¥{grouped}")
    } else {
        format!("¥{grouped}")
    }
}

pub fn render(result: &EstimationResult) -> String {
    let mut out = String::new();
    let regime = match result.regime {
        Regime::Individual => "individual",
        Regime::Corporate => "corporate",
    };

    writeln!(
        out,
        "# Tax estimate ({regime}, FY{}, {}/12 months elapsed)\n",
        result.calculation_year, result.months_passed
    ).ok();

    row(&mut out, "YTD income", result.year_to_date_income);
    row(&mut out, "YTD expense", result.year_to_date_expense);
    row(&mut out, "YTD profit", result.year_to_date_profit);
    row(&mut out, "Projected annual profit", result.projected_annual_profit);

    if let Some(d) = &result.deductions {
        row(&mut out, "Basic deduction", d.basic);
        if d.blue_return > 0.0 {
            row(&mut out, "Blue-return deduction", d.blue_return);
        }
    }
    if let Some(taxable) = result.taxable_income {
        row(&mut out, "Taxable income", taxable);
    }

    writeln!(out, "\n## Breakdown\n").ok();
    for (levy, amount) in result.breakdown.iter() {
        row(&mut out, levy.label(), amount);
    }
    row(&mut out, "Total", result.total_tax);
    row(&mut out, "Per month", result.monthly_tax_equivalent);

    if !result.depreciation.is_empty() {
        writeln!(out, "\n## Depreciable assets\n").ok();
        for entry in &result.depreciation {
            let note = describe_asset(&entry.description, result.calculation_year);
            let cost = match note.acquisition_cost {
                AcquisitionCost::Known(cost) => format_yen(cost),
                AcquisitionCost::Unknown => "unknown".to_string(),
            };
            let name = entry
                .transaction_id
                .as_deref()
                .unwrap_or(entry.description.as_str());
            writeln!(
                out,
                "- {name}: counted {} of recorded {} ({:?}), acquisition cost {cost}",
                format_yen(entry.counted),
                format_yen(entry.recorded),
                entry.rule,
            ).ok();
        }
    }

    if let Some(years) = &result.selectable_years {
        let listed: Vec<String> = years.iter().map(i32::to_string).collect();
        writeln!(out, "\nSelectable years: {}", listed.join(", ")).ok();
    }

    out
}

fn row(out: &mut String, label: &str, amount: f64) {
    writeln!(out, "  {label:<28}{:>16}", format_yen(amount)).ok();
}
