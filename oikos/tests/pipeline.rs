use std::sync::Arc;

use chrono::NaiveDate;

use oikos::{Oikos, OikosError, ProviderId};
use oikos_mock::{Fault, MockAdapter};
use oikos_types::Intent;

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

fn range() -> (NaiveDate, NaiveDate) {
    (
        NaiveDate::from_ymd_opt(2020, 1, 1).unwrap(),
        NaiveDate::from_ymd_opt(2024, 12, 31).unwrap(),
    )
}

/// Eurostat unemployment fixture for one ISO2 country.
fn eurostat_mock_with(countries: &[&str]) -> MockAdapter {
    let mut mock = MockAdapter::new(ProviderId::Eurostat);
    for code in countries {
        mock = mock.with_series(
            "une_rt_m",
            code,
            &[("2023-01", 6.5), ("2023-02", 6.4), ("2023-03", 6.4)],
        );
    }
    mock
}

#[tokio::test]
async fn german_unemployment_routes_to_eurostat_despite_a_suggestion() {
    init_tracing();
    let mock = Arc::new(eurostat_mock_with(&["DE"]));
    let oikos = Oikos::builder().with_adapter(mock.clone()).build().unwrap();

    let (start, end) = range();
    let intent = Intent::for_indicator("unemployment rate")
        .country("Germany")
        .suggested_provider(ProviderId::WorldBank)
        .range(start, end)
        .build();

    let outcome = oikos.query(&intent).await.unwrap();
    assert_eq!(outcome.series.len(), 1);
    assert!(outcome.failures.is_empty());
    let meta = &outcome.series[0].metadata;
    assert_eq!(meta.source, ProviderId::Eurostat);
    assert_eq!(meta.indicator, "une_rt_m");
    assert_eq!(meta.country, "DE");
    assert_eq!(mock.fetch_count(), 1);
}

#[tokio::test]
async fn an_explicit_mention_overrides_every_other_rule() {
    let mock = Arc::new(MockAdapter::new(ProviderId::Oecd).with_series(
        "HUR",
        "ITA",
        &[("2023-Q1", 7.9), ("2023-Q2", 7.6)],
    ));
    let oikos = Oikos::builder().with_adapter(mock.clone()).build().unwrap();

    let (start, end) = range();
    // Italy alone would hit the Eurostat default; the explicit mention wins.
    let intent = Intent::for_indicator("unemployment rate")
        .country("Italy")
        .explicit_provider(ProviderId::Oecd)
        .suggested_provider(ProviderId::WorldBank)
        .range(start, end)
        .build();

    let outcome = oikos.query(&intent).await.unwrap();
    assert_eq!(outcome.series.len(), 1);
    assert_eq!(outcome.series[0].metadata.source, ProviderId::Oecd);
    assert_eq!(outcome.series[0].metadata.indicator, "HUR");
    assert_eq!(outcome.series[0].metadata.country, "ITA");
}

#[tokio::test]
async fn eurozone_expansion_reports_gaps_without_aborting_the_batch() {
    init_tracing();
    // Malta and Cyprus carry no data; the other eighteen members do.
    let with_data = [
        "AT", "BE", "HR", "EE", "FI", "FR", "DE", "EL", "IE", "IT", "LV", "LT", "LU", "NL", "PT",
        "SK", "SI", "ES",
    ];
    let mock = Arc::new(eurostat_mock_with(&with_data));
    let oikos = Oikos::builder().with_adapter(mock.clone()).build().unwrap();

    let (start, end) = range();
    let intent = Intent::for_indicator("unemployment rate")
        .country("Eurozone")
        .range(start, end)
        .build();

    let outcome = oikos.query(&intent).await.unwrap();
    assert_eq!(outcome.series.len(), 18);
    assert_eq!(outcome.failures.len(), 2);
    let failed: Vec<&str> = outcome
        .failures
        .iter()
        .flat_map(|f| f.countries.iter().map(String::as_str))
        .collect();
    assert!(failed.contains(&"MT"));
    assert!(failed.contains(&"CY"));
    for f in &outcome.failures {
        assert!(f.error.is_no_data(), "unexpected failure: {}", f.error);
    }
    // One batched request for all twenty members.
    assert_eq!(mock.fetch_count(), 1);

    // Greece comes back in the Eurostat dialect.
    assert!(outcome.series.iter().any(|s| s.metadata.country == "EL"));
}

#[tokio::test]
async fn repeated_queries_are_served_from_the_cache() {
    let mock = Arc::new(eurostat_mock_with(&["DE"]));
    let oikos = Oikos::builder().with_adapter(mock.clone()).build().unwrap();

    let (start, end) = range();
    let intent = Intent::for_indicator("unemployment rate")
        .country("Germany")
        .range(start, end)
        .build();

    let first = oikos.query(&intent).await.unwrap();
    let second = oikos.query(&intent).await.unwrap();
    assert_eq!(first.series.len(), second.series.len());
    assert_eq!(mock.fetch_count(), 1);
    assert_eq!(oikos.cache().len(), 1);

    // A differently phrased but semantically identical query also hits.
    let rephrased = Intent::for_indicator("jobless rate")
        .country("germany")
        .range(start, end)
        .build();
    let third = oikos.query(&rephrased).await.unwrap();
    assert_eq!(third.series.len(), 1);
    assert_eq!(mock.fetch_count(), 1);
}

#[tokio::test]
async fn cache_hits_still_report_the_countries_without_data() {
    // France is requested but the provider only carries Germany; the gap
    // must be reported on the cached repeat as well as on the first fill.
    let mock = Arc::new(eurostat_mock_with(&["DE"]));
    let oikos = Oikos::builder().with_adapter(mock.clone()).build().unwrap();

    let (start, end) = range();
    let intent = Intent::for_indicator("unemployment rate")
        .countries(["Germany", "France"])
        .range(start, end)
        .build();

    let first = oikos.query(&intent).await.unwrap();
    assert_eq!(first.series.len(), 1);
    assert_eq!(first.failures.len(), 1);

    let second = oikos.query(&intent).await.unwrap();
    assert_eq!(mock.fetch_count(), 1);
    assert_eq!(second.series.len(), 1);
    assert_eq!(second.failures.len(), 1);
    assert!(second.failures[0].error.is_no_data());
    assert_eq!(second.failures[0].countries, vec!["FR".to_string()]);
}

#[tokio::test(start_paused = true)]
async fn transient_failures_are_retried_until_the_data_arrives() {
    let mock = Arc::new(
        eurostat_mock_with(&["DE"])
            .with_fault(Fault::Transient)
            .with_fault(Fault::Transient),
    );
    let oikos = Oikos::builder().with_adapter(mock.clone()).build().unwrap();

    let (start, end) = range();
    let intent = Intent::for_indicator("unemployment rate")
        .country("Germany")
        .range(start, end)
        .build();

    let outcome = oikos.query(&intent).await.unwrap();
    assert_eq!(outcome.series.len(), 1);
    assert_eq!(mock.fetch_count(), 3);
}

#[tokio::test(start_paused = true)]
async fn a_hung_provider_times_out_and_the_retry_recovers() {
    let mock = Arc::new(eurostat_mock_with(&["DE"]).with_fault(Fault::Hang));
    let oikos = Oikos::builder().with_adapter(mock.clone()).build().unwrap();

    let (start, end) = range();
    let intent = Intent::for_indicator("unemployment rate")
        .country("Germany")
        .range(start, end)
        .build();

    let outcome = oikos.query(&intent).await.unwrap();
    assert_eq!(outcome.series.len(), 1);
    assert_eq!(mock.fetch_count(), 2);
}

#[tokio::test]
async fn a_total_failure_surfaces_as_an_aggregated_error() {
    let mock = Arc::new(MockAdapter::new(ProviderId::Eurostat).with_fault(Fault::Fatal));
    let oikos = Oikos::builder().with_adapter(mock).build().unwrap();

    let (start, end) = range();
    let intent = Intent::for_indicator("unemployment rate")
        .country("Germany")
        .range(start, end)
        .build();

    let err = oikos.query(&intent).await.unwrap_err();
    match err {
        OikosError::AllCountriesFailed(errors) => assert_eq!(errors.len(), 1),
        other => panic!("unexpected error: {other}"),
    }
}

#[tokio::test]
async fn intents_without_countries_or_indicators_fail_fast() {
    let mock = Arc::new(MockAdapter::default());
    let oikos = Oikos::builder().with_adapter(mock).build().unwrap();

    let intent = Intent::for_indicator("unemployment rate").build();
    assert!(matches!(
        oikos.query(&intent).await,
        Err(OikosError::Validation(_))
    ));
}

#[tokio::test]
async fn unknown_countries_carry_sample_codes_in_the_failure() {
    let mock = Arc::new(eurostat_mock_with(&["DE"]));
    let oikos = Oikos::builder().with_adapter(mock).build().unwrap();

    let (start, end) = range();
    let intent = Intent::for_indicator("unemployment rate")
        .countries(["Germany", "Atlantis"])
        .range(start, end)
        .build();

    let outcome = oikos.query(&intent).await.unwrap();
    assert_eq!(outcome.series.len(), 1);
    assert_eq!(outcome.failures.len(), 1);
    match &outcome.failures[0].error {
        OikosError::UnknownCountry {
            input,
            sample_valid_codes,
        } => {
            assert_eq!(input, "Atlantis");
            assert!(!sample_valid_codes.is_empty());
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[tokio::test]
async fn a_missing_adapter_for_the_routed_provider_is_reported() {
    // Only a World Bank adapter is registered, but Germany routes to Eurostat.
    let mock = Arc::new(MockAdapter::new(ProviderId::WorldBank));
    let oikos = Oikos::builder().with_adapter(mock).build().unwrap();

    let (start, end) = range();
    let intent = Intent::for_indicator("unemployment rate")
        .country("Germany")
        .range(start, end)
        .build();

    let err = oikos.query(&intent).await.unwrap_err();
    match err {
        OikosError::AllCountriesFailed(errors) => {
            assert!(matches!(errors[0], OikosError::Provider { .. }));
        }
        other => panic!("unexpected error: {other}"),
    }
}
