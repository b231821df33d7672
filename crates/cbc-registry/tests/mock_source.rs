//! Contract tests for `MockCitizenSource`.
//!
//! Time is paused, so the simulated 2 s latency elapses instantly while
//! still being observable through `tokio::time::Instant`.

use std::time::Duration;

use cbc_registry::{
    CitizenSource, Cpf, MockCitizenSource, MockSourceConfig, RegistrationStatus, SourceError,
};
use chrono::Datelike;
use tokio::time::Instant;

fn cpf_ending_in(digit: u8) -> Cpf {
    Cpf::parse(&format!("1114447773{digit}")).unwrap()
}

fn seeded(seed: u64) -> MockCitizenSource {
    MockCitizenSource::new(MockSourceConfig::default().with_seed(seed))
}

#[tokio::test(start_paused = true)]
async fn lookup_waits_for_simulated_latency() {
    let source = seeded(1);
    let start = Instant::now();

    let _ = source.lookup(&cpf_ending_in(5)).await;

    assert!(start.elapsed() >= Duration::from_millis(2000));
}

#[tokio::test(start_paused = true)]
async fn last_digit_zero_is_not_found() {
    let err = seeded(1).lookup(&cpf_ending_in(0)).await.unwrap_err();
    assert_eq!(err, SourceError::NotFound);
}

#[tokio::test(start_paused = true)]
async fn last_digit_one_is_auth_failure() {
    let err = seeded(1).lookup(&cpf_ending_in(1)).await.unwrap_err();
    assert_eq!(err, SourceError::Unauthorized);
}

#[tokio::test(start_paused = true)]
async fn last_digit_two_is_rate_limited() {
    let err = seeded(1).lookup(&cpf_ending_in(2)).await.unwrap_err();
    assert_eq!(err, SourceError::RateLimited);
}

#[tokio::test(start_paused = true)]
async fn other_digits_always_resolve() {
    let source = seeded(99);
    for digit in 3..=9 {
        for _ in 0..10 {
            let record = source
                .lookup(&cpf_ending_in(digit))
                .await
                .unwrap_or_else(|e| panic!("digit {digit} failed: {e}"));
            assert_eq!(record.cpf, cpf_ending_in(digit));
        }
    }
}

#[tokio::test(start_paused = true)]
async fn concrete_scenario_formatted_input() {
    let cpf = Cpf::parse("111.444.777-35").unwrap();
    assert_eq!(cpf.as_str(), "11144477735");

    let record = seeded(3).lookup(&cpf).await.unwrap();
    assert_eq!(record.cpf.as_str(), "11144477735");
}

#[tokio::test(start_paused = true)]
async fn generated_values_stay_in_range() {
    let source = seeded(2024);
    let cpf = cpf_ending_in(7);

    for _ in 0..200 {
        let record = source.lookup(&cpf).await.unwrap();

        let birth = record.birth_date;
        assert!((1950..=1999).contains(&birth.year()));
        assert!((1..=12).contains(&birth.month()));
        assert!((1..=28).contains(&birth.day()));

        assert_eq!(record.registered_at.to_rfc3339(), "2010-03-15T00:00:00+00:00");

        let rg = record.rg.as_deref().unwrap();
        assert_eq!(rg.len(), 8);
        let title = record.voter_title.as_deref().unwrap();
        assert_eq!(title.len(), 12);
        let pis = record.pis.as_deref().unwrap();
        assert_eq!(pis.len(), 11);
        assert!(rg.chars().chain(title.chars()).chain(pis.chars()).all(|c| c.is_ascii_digit()));

        assert!(RegistrationStatus::ALL.contains(&record.status));
    }
}

#[tokio::test(start_paused = true)]
async fn same_seed_same_record() {
    let cpf = cpf_ending_in(9);
    let a = seeded(42).lookup(&cpf).await.unwrap();
    let b = seeded(42).lookup(&cpf).await.unwrap();
    assert_eq!(a, b);
}

#[tokio::test(start_paused = true)]
async fn custom_latency_is_honoured() {
    let source = MockCitizenSource::new(
        MockSourceConfig::default()
            .with_latency(Duration::from_millis(50))
            .with_seed(5),
    );
    assert_eq!(source.latency(), Duration::from_millis(50));

    let start = Instant::now();
    source.lookup(&cpf_ending_in(4)).await.unwrap();
    let elapsed = start.elapsed();
    assert!(elapsed >= Duration::from_millis(50));
    assert!(elapsed < Duration::from_millis(2000));
}
