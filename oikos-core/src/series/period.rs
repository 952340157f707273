use chrono::NaiveDate;

use oikos_types::Frequency;

/// Parse a provider period string into the period's start date and the
/// cadence it implies.
///
/// Accepted shapes, covering the providers we normalize:
/// - `2020` (annual);
/// - `2020-Q3` / `2020Q3` (quarterly);
/// - `2020-05` / `2020M05` (monthly);
/// - `2020-05-17` (daily).
///
/// Returns `None` for anything else; the normalizer skips unparseable
/// periods rather than failing the batch.
#[must_use]
pub fn parse_period(period: &str) -> Option<(NaiveDate, Frequency)> {
    let p = period.trim();

    if let Ok(date) = NaiveDate::parse_from_str(p, "%Y-%m-%d") {
        return Some((date, Frequency::Daily));
    }

    if p.len() == 4 {
        let year: i32 = p.parse().ok()?;
        return NaiveDate::from_ymd_opt(year, 1, 1).map(|d| (d, Frequency::Annual));
    }

    // Quarterly: "2020-Q3" or "2020Q3".
    if let Some(qpos) = p.find(['Q', 'q']) {
        let year: i32 = p[..qpos].trim_end_matches('-').parse().ok()?;
        let quarter: u32 = p[qpos + 1..].parse().ok()?;
        if !(1..=4).contains(&quarter) {
            return None;
        }
        let month = (quarter - 1) * 3 + 1;
        return NaiveDate::from_ymd_opt(year, month, 1).map(|d| (d, Frequency::Quarterly));
    }

    // Monthly: "2020-05" or "2020M05".
    let (ys, ms) = p
        .split_once(['M', 'm'])
        .or_else(|| p.split_once('-'))?;
    let year: i32 = ys.trim_end_matches('-').parse().ok()?;
    let month: u32 = ms.parse().ok()?;
    NaiveDate::from_ymd_opt(year, month, 1).map(|d| (d, Frequency::Monthly))
}
