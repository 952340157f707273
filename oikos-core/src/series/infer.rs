use chrono::NaiveDate;

use oikos_types::Frequency;

/// Infer the cadence of a series from the spacing of its observation dates.
///
/// Prefer the mode of the positive adjacent day deltas; if there is no
/// unique mode, fall back to the lower median so the result is always an
/// actually observed gap. The representative gap is then bucketed:
/// up to 3 days reads as daily, around a month as monthly, around a quarter
/// as quarterly, anything longer as annual.
///
/// Input order does not matter; duplicate dates are ignored. Series with
/// fewer than two distinct dates default to annual, the dominant cadence in
/// macro data.
#[must_use]
pub fn infer_frequency(dates: &[NaiveDate]) -> Frequency {
    let Some(step) = representative_gap_days(dates) else {
        return Frequency::Annual;
    };
    match step {
        0..=3 => Frequency::Daily,
        4..=45 => Frequency::Monthly,
        46..=135 => Frequency::Quarterly,
        _ => Frequency::Annual,
    }
}

fn representative_gap_days(dates: &[NaiveDate]) -> Option<i64> {
    if dates.len() < 2 {
        return None;
    }
    let mut sorted: Vec<NaiveDate> = dates.to_vec();
    sorted.sort_unstable();

    let mut deltas: Vec<i64> = Vec::with_capacity(sorted.len() - 1);
    let mut last = sorted[0];
    for &d in sorted.iter().skip(1) {
        let gap = (d - last).num_days();
        if gap > 0 {
            deltas.push(gap);
            last = d;
        }
    }
    if deltas.is_empty() {
        return None;
    }
    deltas.sort_unstable();

    // Unique mode wins; otherwise the lower median.
    let mut best_delta = deltas[0];
    let mut best_count = 0usize;
    let mut num_best = 0usize;
    let mut cur_delta = deltas[0];
    let mut cur_count = 1usize;
    for &d in deltas.iter().skip(1) {
        if d == cur_delta {
            cur_count += 1;
            continue;
        }
        if cur_count > best_count {
            best_count = cur_count;
            best_delta = cur_delta;
            num_best = 1;
        } else if cur_count == best_count {
            num_best += 1;
        }
        cur_delta = d;
        cur_count = 1;
    }
    if cur_count > best_count {
        best_delta = cur_delta;
        num_best = 1;
    } else if cur_count == best_count {
        num_best += 1;
    }

    if num_best == 1 {
        return Some(best_delta);
    }

    let mid = deltas.len() / 2;
    if deltas.len() % 2 == 1 {
        Some(deltas[mid])
    } else {
        Some(deltas[mid - 1])
    }
}
