use std::collections::HashMap;
use std::time::{Duration, Instant};

use chrono::NaiveDate;
use proptest::prelude::*;

use oikos_middleware::{RateLimiter, ResponseCache};
use oikos_types::{
    DataPoint, Frequency, NormalizedSeries, ProviderId, RateLimitConfig, ResolvedRequest,
    SeriesMetadata,
};

fn request(provider: ProviderId, indicator: &str, codes: &[&str]) -> ResolvedRequest {
    ResolvedRequest {
        provider,
        indicator_code: indicator.to_string(),
        country_codes: codes.iter().map(ToString::to_string).collect(),
        start: NaiveDate::from_ymd_opt(2020, 1, 1).unwrap(),
        end: NaiveDate::from_ymd_opt(2024, 12, 31).unwrap(),
        frequency: None,
    }
}

fn series(country: &str, value: f64) -> NormalizedSeries {
    NormalizedSeries {
        metadata: SeriesMetadata {
            source: ProviderId::WorldBank,
            indicator: "SL.UEM.TOTL.ZS".to_string(),
            country: country.to_string(),
            frequency: Frequency::Annual,
            unit: None,
            last_updated: None,
            api_url: String::new(),
        },
        points: vec![DataPoint {
            date: NaiveDate::from_ymd_opt(2023, 1, 1).unwrap(),
            value,
        }],
    }
}

fn cache_with_ttl(capacity: usize, ttl: Duration) -> ResponseCache {
    ResponseCache::new(
        capacity,
        HashMap::from([(ProviderId::WorldBank, ttl)]),
        Duration::from_secs(3600),
    )
}

#[test]
fn entries_expire_exactly_at_the_ttl_boundary() {
    let cache = cache_with_ttl(8, Duration::from_secs(60));
    let fp = request(ProviderId::WorldBank, "SL.UEM.TOTL.ZS", &["DEU"]).fingerprint();
    let t0 = Instant::now();
    cache.put_at(fp.clone(), vec![series("DEU", 3.0)], t0);

    assert!(cache.get_at(&fp, t0 + Duration::from_secs(59)).is_some());
    // The boundary instant itself is a miss.
    assert!(cache.get_at(&fp, t0 + Duration::from_secs(60)).is_none());
    // The expired entry was dropped on the way out.
    assert!(cache.is_empty());
}

#[test]
fn capacity_evicts_the_least_recently_used_entry() {
    let cache = cache_with_ttl(2, Duration::from_secs(3600));
    let t0 = Instant::now();
    let fp_a = request(ProviderId::WorldBank, "SL.UEM.TOTL.ZS", &["DEU"]).fingerprint();
    let fp_b = request(ProviderId::WorldBank, "SL.UEM.TOTL.ZS", &["FRA"]).fingerprint();
    let fp_c = request(ProviderId::WorldBank, "SL.UEM.TOTL.ZS", &["ITA"]).fingerprint();

    cache.put_at(fp_a.clone(), vec![series("DEU", 3.0)], t0);
    cache.put_at(fp_b.clone(), vec![series("FRA", 7.3)], t0);
    // Touch A so B becomes the eviction victim.
    assert!(cache.get_at(&fp_a, t0).is_some());
    cache.put_at(fp_c.clone(), vec![series("ITA", 7.9)], t0);

    assert!(cache.get_at(&fp_a, t0).is_some());
    assert!(cache.get_at(&fp_b, t0).is_none());
    assert!(cache.get_at(&fp_c, t0).is_some());
}

#[test]
fn concurrent_writers_resolve_last_write_wins() {
    let cache = cache_with_ttl(8, Duration::from_secs(3600));
    let fp = request(ProviderId::WorldBank, "SL.UEM.TOTL.ZS", &["DEU"]).fingerprint();
    let t0 = Instant::now();
    cache.put_at(fp.clone(), vec![series("DEU", 3.0)], t0);
    cache.put_at(fp.clone(), vec![series("DEU", 3.1)], t0 + Duration::from_secs(1));

    let got = cache.get_at(&fp, t0 + Duration::from_secs(2)).unwrap();
    assert_eq!(got.len(), 1);
    assert!((got[0].points[0].value - 3.1).abs() < f64::EPSILON);
}

#[test]
fn order_insensitive_fingerprints_share_a_cache_line() {
    let cache = cache_with_ttl(8, Duration::from_secs(3600));
    let t0 = Instant::now();
    let ab = request(ProviderId::WorldBank, "SL.UEM.TOTL.ZS", &["DEU", "FRA"]).fingerprint();
    let ba = request(ProviderId::WorldBank, "SL.UEM.TOTL.ZS", &["FRA", "DEU"]).fingerprint();

    cache.put_at(ab, vec![series("DEU", 3.0), series("FRA", 7.3)], t0);
    assert!(cache.get_at(&ba, t0).is_some());
    assert_eq!(cache.len(), 1);
}

#[test]
fn paced_burst_respects_spacing_and_both_windows() {
    // Tight budgets so every constraint binds within the simulation.
    let limiter = RateLimiter::new(HashMap::from([(
        ProviderId::Oecd,
        RateLimitConfig {
            min_delay: Duration::from_millis(500),
            max_per_minute: 5,
            max_per_hour: 50,
        },
    )]));

    let t0 = Instant::now();
    let mut now = t0;
    let mut issued: Vec<Instant> = Vec::new();
    for _ in 0..30 {
        now += limiter.acquire_at(ProviderId::Oecd, now);
        issued.push(now);
    }

    for pair in issued.windows(2) {
        assert!(pair[1] - pair[0] >= Duration::from_millis(500));
    }
    for (i, &t) in issued.iter().enumerate() {
        let in_minute = issued[..=i]
            .iter()
            .filter(|&&s| t.duration_since(s) < Duration::from_secs(60))
            .count();
        assert!(in_minute <= 5, "minute window violated at request {i}");
    }
}

#[test]
fn a_saturating_burst_completes_in_deterministic_time() {
    // 25 requests against a 20-per-minute budget: the first 20 pass
    // immediately, 21-25 wait for the window to free up at exactly t0+60s.
    let limiter = RateLimiter::new(HashMap::from([(
        ProviderId::WorldBank,
        RateLimitConfig {
            min_delay: Duration::ZERO,
            max_per_minute: 20,
            max_per_hour: 1000,
        },
    )]));

    let t0 = Instant::now();
    let mut now = t0;
    let mut issued = Vec::new();
    for _ in 0..25 {
        now += limiter.acquire_at(ProviderId::WorldBank, now);
        issued.push(now);
    }

    assert!(issued[..20].iter().all(|&t| t == t0));
    assert!(issued[20..].iter().all(|&t| t == t0 + Duration::from_secs(60)));
    assert_eq!(now - t0, Duration::from_secs(60));
}

#[test]
fn a_concurrent_burst_is_scheduled_without_overflowing_the_window() {
    // 25 callers acquire at the same instant, as in-flight concurrent
    // requests do. Reservation at acquisition time pushes 21-25 into the
    // next window instead of admitting everyone into the empty one.
    let limiter = RateLimiter::new(HashMap::from([(
        ProviderId::WorldBank,
        RateLimitConfig {
            min_delay: Duration::ZERO,
            max_per_minute: 20,
            max_per_hour: 1000,
        },
    )]));

    let t0 = Instant::now();
    let delays: Vec<Duration> = (0..25)
        .map(|_| limiter.acquire_at(ProviderId::WorldBank, t0))
        .collect();

    assert!(delays[..20].iter().all(Duration::is_zero));
    assert!(delays[20..].iter().all(|&d| d == Duration::from_secs(60)));
    assert_eq!(limiter.minute_occupancy_at(ProviderId::WorldBank, t0), 20);
    // Once the first window has drained, the deferred five occupy the next.
    assert_eq!(
        limiter.minute_occupancy_at(ProviderId::WorldBank, t0 + Duration::from_secs(60)),
        5
    );
}

proptest! {
    /// However callers interleave, sleeping the advertised delay before each
    /// recorded attempt keeps the rolling minute occupancy within budget.
    #[test]
    fn admission_delay_never_lets_the_minute_window_overflow(
        cap in 1u32..8,
        jitters in proptest::collection::vec(0u64..5000, 1..40),
    ) {
        let limiter = RateLimiter::new(HashMap::from([(
            ProviderId::Imf,
            RateLimitConfig {
                min_delay: Duration::ZERO,
                max_per_minute: cap,
                max_per_hour: 10_000,
            },
        )]));
        let mut now = Instant::now();
        for jitter in jitters {
            now += Duration::from_millis(jitter);
            now += limiter.acquire_at(ProviderId::Imf, now);
            prop_assert!(
                limiter.minute_occupancy_at(ProviderId::Imf, now) <= cap as usize
            );
        }
    }

    /// Expired entries are never served, whatever the TTL and probe offset.
    #[test]
    fn expired_entries_are_never_served(
        ttl_secs in 1u64..600,
        probe_offset in 0u64..1200,
    ) {
        let cache = cache_with_ttl(4, Duration::from_secs(ttl_secs));
        let fp = request(ProviderId::WorldBank, "SP.POP.TOTL", &["JPN"]).fingerprint();
        let t0 = Instant::now();
        cache.put_at(fp.clone(), vec![series("JPN", 124.5)], t0);

        let hit = cache.get_at(&fp, t0 + Duration::from_secs(probe_offset)).is_some();
        prop_assert_eq!(hit, probe_offset < ttl_secs);
    }
}
