use std::time::Duration;
use tunefetch::core::retry::{run_with_retry, RetryConfig};
use tunefetch::FetchError;

#[test]
fn test_exhaustion_reports_total_attempt_count() {
    let config = RetryConfig {
        max_retries: 2,
        base_delay: Duration::from_millis(10),
        multiplier: 2,
    };

    let mut calls = 0;
    let mut waits = Vec::new();
    let result: Result<((), u32), _> = run_with_retry(
        &config,
        |d| waits.push(d),
        || {
            calls += 1;
            Err(FetchError::network("still down"))
        },
    );

    let failure = result.unwrap_err();
    assert_eq!(calls, 3);
    assert_eq!(failure.attempts, 3);
    assert_eq!(
        waits,
        vec![Duration::from_millis(10), Duration::from_millis(20)]
    );
}

#[test]
fn test_recovery_after_transient_failures() {
    let config = RetryConfig::with_max_retries(3);

    let mut calls = 0;
    let result = run_with_retry(&config, |_| {}, || {
        calls += 1;
        if calls < 2 {
            Err(FetchError::transcode("ffmpeg hiccup"))
        } else {
            Ok("song.mp3")
        }
    });

    let (value, attempts) = result.unwrap();
    assert_eq!(value, "song.mp3");
    assert_eq!(attempts, 2);
}

#[test]
fn test_each_call_is_independent() {
    // The policy holds no state: two consecutive runs see the same budget
    let config = RetryConfig::with_max_retries(1);

    for _ in 0..2 {
        let mut calls = 0;
        let result: Result<((), u32), _> = run_with_retry(&config, |_| {}, || {
            calls += 1;
            Err(FetchError::network("down"))
        });
        assert_eq!(result.unwrap_err().attempts, 2);
        assert_eq!(calls, 2);
    }
}
