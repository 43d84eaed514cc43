use rating_core::common::time::to_date_str;
use rating_core::{
    AlignedTable, ComparisonTable, Leaderboard, Momentum, RatingError, RecentForm, TeamError,
    TrendSummary,
};
use std::error::Error;
use std::io::Write;

pub fn print_leaderboard(board: &Leaderboard, top: usize) {
    println!("Top {} teams by current rating:", top.min(board.len()));
    for entry in board.top(top) {
        println!("   {}. {}: {:.0}", entry.rank, entry.team, entry.rating);
    }
}

pub fn print_summary(summary: &TrendSummary) {
    println!("{} statistics:", summary.team);
    println!("   Current: {:.0} ({})", summary.current, to_date_str(summary.current_date));
    println!("   Peak: {:.0} ({})", summary.peak, to_date_str(summary.peak_date));
    println!("   Low: {:.0} ({})", summary.trough, to_date_str(summary.trough_date));
    println!("   Data points: {}", summary.point_count);
    match summary.last_smoothed() {
        Some(p) => println!(
            "   Smoothed ({} pts): {:.1} ({})",
            summary.window,
            p.value.unwrap_or_default(),
            to_date_str(p.date)
        ),
        None => println!("   Smoothed ({} pts): n/a", summary.window),
    }
}

pub fn print_comparison(table: &ComparisonTable) {
    println!("Team comparison, sorted by {}:", table.sort_key());
    println!(
        "   {:>3}  {:<24} {:>8} {:>8} {:>8} {:>10}",
        "#", "Team", "Current", "Peak", "Low", "Momentum"
    );
    for entry in table.entries() {
        let momentum = entry
            .momentum
            .as_ref()
            .map(|m| format!("{:+.1}", m.delta))
            .unwrap_or_else(|| "n/a".to_string());
        println!(
            "   {:>3}  {:<24} {:>8.0} {:>8.0} {:>8.0} {:>10}",
            entry.rank,
            entry.team,
            entry.summary.current,
            entry.summary.peak,
            entry.summary.trough,
            momentum
        );
    }
}

fn format_change(m: &Momentum) -> String {
    let arrow = if m.is_rising() { "up  " } else { "down" };
    let pct = m
        .pct_change
        .map(|p| format!("{:+.1}%", p))
        .unwrap_or_else(|| "n/a".to_string());
    format!("{} {}: {:+.1} pts ({})", arrow, m.team, m.delta, pct)
}

pub fn print_momentum(items: &[Momentum], lookback_days: i64) {
    println!("Team momentum ({}-day change):", lookback_days);
    for m in items {
        println!(
            "   {} since {}",
            format_change(m),
            to_date_str(m.reference_date)
        );
    }
}

pub fn print_recent(items: &[RecentForm], since: chrono::NaiveDate) {
    println!("Recent form since {}:", to_date_str(since));
    for form in items {
        let smoothed = form
            .smoothed
            .iter()
            .rev()
            .find_map(|p| p.value)
            .map(|v| format!("{:.1}", v))
            .unwrap_or_else(|| "n/a".to_string());
        println!(
            "   {}, {:.0} -> {:.0}, smoothed {}",
            format_change(&form.change),
            form.change.reference,
            form.change.current,
            smoothed
        );
    }
}

/// Short reason a team was skipped, by error group
fn error_kind(error: &RatingError) -> &'static str {
    if error.is_series_err() {
        "series"
    } else if error.is_trend_err() {
        "trend"
    } else {
        "setup"
    }
}

pub fn print_errors(errors: &[TeamError]) {
    if errors.is_empty() {
        return;
    }
    println!("Skipped {} team(s):", errors.len());
    for e in errors {
        println!("   [{}] {}: {}", error_kind(&e.error), e.team, e.error);
    }
}

/// Write the aligned table as CSV: a date column, then one column per team
pub fn write_aligned<W: Write>(table: &AlignedTable, writer: W) -> Result<(), Box<dyn Error>> {
    let mut wtr = csv::Writer::from_writer(writer);

    let mut header = vec!["date".to_string()];
    header.extend(table.teams.iter().cloned());
    wtr.write_record(&header)?;

    for row in &table.rows {
        let mut record = vec![to_date_str(row.date)];
        record.extend(
            row.ratings
                .iter()
                .map(|r| r.map(|v| v.to_string()).unwrap_or_default()),
        );
        wtr.write_record(&record)?;
    }

    wtr.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use rating_core::{ErrCode, RatingPoint, RatingSeriesStore};

    #[test]
    fn test_error_kind_groups() {
        assert_eq!(error_kind(&RatingError::new("", ErrCode::EmptyStore)), "series");
        assert_eq!(error_kind(&RatingError::new("", ErrCode::EmptyRange)), "series");
        assert_eq!(error_kind(&RatingError::new("", ErrCode::InvalidWindow)), "trend");
        assert_eq!(
            error_kind(&RatingError::new("", ErrCode::InsufficientHistory)),
            "trend"
        );
        assert_eq!(error_kind(&RatingError::new("", ErrCode::InvalidInput)), "series");
        assert_eq!(error_kind(&RatingError::new("", ErrCode::ConfigError)), "setup");
    }

    #[test]
    fn test_write_aligned() {
        let d1 = NaiveDate::from_ymd_opt(2020, 1, 1).unwrap();
        let d2 = NaiveDate::from_ymd_opt(2020, 1, 2).unwrap();
        let stores = vec![
            RatingSeriesStore::new("A", vec![RatingPoint::new(d1, 1500.5)]).unwrap(),
            RatingSeriesStore::new("B", vec![RatingPoint::new(d2, 1600.0)]).unwrap(),
        ];
        let mut out = Vec::new();
        write_aligned(&AlignedTable::new(&stores), &mut out).unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "date,A,B\n2020-01-01,1500.5,\n2020-01-02,,1600\n"
        );
    }
}
