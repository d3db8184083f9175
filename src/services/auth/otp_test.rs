use super::*;
use base64::Engine;
use uuid::Uuid;

fn challenge(code_hash: &str, attempts: i32, consumed: bool, expired: bool) -> OtpChallengeRow {
    let now = Utc::now();
    let expires_at = if expired {
        now - ChronoDuration::minutes(1)
    } else {
        now + ChronoDuration::minutes(10)
    };
    OtpChallengeRow {
        id: Uuid::new_v4(),
        email: "test@example.com".to_string(),
        purpose: "login".to_string(),
        code_hash: code_hash.to_string(),
        expires_at,
        attempts,
        consumed,
        created_at: now - ChronoDuration::minutes(1),
    }
}

#[test]
fn generated_code_is_six_decimal_digits() {
    for _ in 0..100 {
        let code = generate_code();
        assert_eq!(code.len(), OTP_CODE_LEN);
        assert!(code.chars().all(|c| c.is_ascii_digit()));
        // no leading zero by construction
        assert!(!code.starts_with('0'));
    }
}

#[test]
fn hash_is_stable_and_discriminating() {
    let a = hash_code("123456");
    let b = hash_code("123456");
    let c = hash_code("123457");
    assert_eq!(a, b);
    assert_ne!(a, c);
}

#[test]
fn hash_is_base64_of_sha256() {
    // 44 chars of standard base64 (32 bytes -> 43 chars + '=' padding).
    let h = hash_code("123456");
    assert_eq!(h.len(), 44);
    assert!(h.ends_with('='));
    assert!(BASE64.decode(&h).is_ok_and(|raw| raw.len() == 32));
}

#[test]
fn matching_hash_passes() {
    let hash = hash_code("123456");
    let ch = challenge(&hash, 0, false, false);
    assert_eq!(
        evaluate_challenge(&ch, &hash, Utc::now(), 5),
        ChallengeGate::Pass
    );
}

#[test]
fn consumed_challenge_wins_over_everything() {
    let hash = hash_code("123456");
    let ch = challenge(&hash, 99, true, true);
    assert_eq!(
        evaluate_challenge(&ch, &hash, Utc::now(), 5),
        ChallengeGate::Consumed
    );
}

#[test]
fn expired_challenge_is_flagged_before_hash_check() {
    let hash = hash_code("123456");
    let ch = challenge(&hash, 0, false, true);
    assert_eq!(
        evaluate_challenge(&ch, &hash_code("000000"), Utc::now(), 5),
        ChallengeGate::Expired
    );
}

#[test]
fn attempt_limit_locks_even_with_correct_code() {
    let hash = hash_code("123456");
    let ch = challenge(&hash, 5, false, false);
    assert_eq!(
        evaluate_challenge(&ch, &hash, Utc::now(), 5),
        ChallengeGate::AttemptsExceeded
    );
}

#[test]
fn wrong_hash_is_a_mismatch() {
    let ch = challenge(&hash_code("123456"), 0, false, false);
    assert_eq!(
        evaluate_challenge(&ch, &hash_code("000000"), Utc::now(), 5),
        ChallengeGate::Mismatch
    );
}
