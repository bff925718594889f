//! Unit tests for verification service

use chrono::Duration;
use std::sync::Arc;
use uuid::Uuid;

use crate::domain::entities::user::User;
use crate::domain::entities::verification_token::TOKEN_LENGTH;
use crate::errors::{DomainError, MailError, VerificationError};
use crate::repositories::{MockTokenStore, MockUserDirectory, TokenStore};
use crate::services::verification::{
    ManualClock, VerificationService, VerificationServiceConfig,
};

use super::mocks::{
    fixture, fixture_with, registered_user, t0, test_config, MockMailer, RacingTokenStore,
};

#[tokio::test]
async fn test_issue_persists_token_with_exact_expiry() {
    let fx = fixture(24);
    let user = registered_user(&fx.users).await;

    let handle = fx.service.issue(&user).await.unwrap();
    let token = &handle.token;

    assert_eq!(token.user_id, user.id);
    assert_eq!(token.issued_at, t0());
    assert_eq!(token.expires_at, token.issued_at + Duration::hours(24));
    assert_eq!(token.token.len(), TOKEN_LENGTH);

    let stored = fx.store.find_by_token(&token.token).await.unwrap();
    assert_eq!(stored.as_ref(), Some(token));
}

#[tokio::test]
async fn test_issue_sends_link_to_user() {
    let fx = fixture(24);
    let user = registered_user(&fx.users).await;

    let handle = fx.service.issue(&user).await.unwrap();
    let token = handle.token.token.clone();
    handle.delivery.wait().await.unwrap();

    let sent = fx.mailer.sent();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].to, "olena.koval@example.com");
    assert_eq!(sent[0].subject, "Verify your email address");
    assert!(sent[0].html_body.contains("Hi Olena!"));
    assert!(sent[0].html_body.contains(&format!(
        "https://greencity.example/ownSecurity/verifyEmail?token={}",
        token
    )));
}

#[tokio::test]
async fn test_issue_rejects_malformed_address() {
    let fx = fixture(24);
    let user = User::new("not-an-address", "Olena");

    let result = fx.service.issue(&user).await;

    assert!(matches!(result, Err(DomainError::Validation { .. })));
    assert_eq!(fx.store.len().await, 0);
}

#[tokio::test]
async fn test_issue_delivers_to_trimmed_address() {
    let fx = fixture(24);
    let user = User::new("  olena.koval@example.com \t", "Olena");
    fx.users.insert(user.clone()).await;

    let handle = fx.service.issue(&user).await.unwrap();
    handle.delivery.wait().await.unwrap();

    let sent = fx.mailer.sent();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].to, "olena.koval@example.com");
}

#[tokio::test]
async fn test_issue_propagates_store_failure() {
    let fx = fixture(24);
    let user = registered_user(&fx.users).await;
    fx.store.set_should_fail(true);

    let result = fx.service.issue(&user).await;

    assert!(matches!(result, Err(DomainError::Internal { .. })));
    assert!(fx.mailer.sent().is_empty());
}

#[tokio::test]
async fn test_mail_failure_does_not_affect_issue() {
    let fx = fixture_with(MockTokenStore::new(), MockMailer::new(true), test_config(24));
    let user = registered_user(&fx.users).await;

    let handle = fx.service.issue(&user).await.unwrap();
    let token = handle.token.clone();

    let delivery = handle.delivery.wait().await;
    assert!(matches!(delivery, Err(MailError::Transport { .. })));

    let stored = fx.store.find_by_token(&token.token).await.unwrap();
    assert_eq!(stored, Some(token));
}

#[tokio::test(start_paused = true)]
async fn test_slow_mailer_times_out() {
    let mut config = test_config(24);
    config.mail_send_timeout = std::time::Duration::from_secs(5);
    let fx = fixture_with(
        MockTokenStore::new(),
        MockMailer::with_delay(std::time::Duration::from_secs(60)),
        config,
    );
    let user = registered_user(&fx.users).await;

    let handle = fx.service.issue(&user).await.unwrap();
    let delivery = handle.delivery.wait().await;

    assert_eq!(
        delivery,
        Err(MailError::Timeout(std::time::Duration::from_secs(5)))
    );
    assert!(fx.mailer.sent().is_empty());
    assert_eq!(fx.store.len().await, 1);
}

#[tokio::test]
async fn test_verify_marks_user_and_consumes_token() {
    let fx = fixture(24);
    let user = registered_user(&fx.users).await;
    let handle = fx.service.issue(&user).await.unwrap();
    fx.clock.advance(Duration::hours(2));

    let verified = fx.service.verify(&handle.token.token).await.unwrap();

    assert_eq!(verified.user_id, user.id);
    assert_eq!(verified.token_id, handle.token.id);
    assert_eq!(verified.verified_at, t0() + Duration::hours(2));
    assert_eq!(fx.users.is_verified(user.id).await, Some(true));
    assert!(!fx.store.exists_by_id(handle.token.id).await.unwrap());

    let second = fx.service.verify(&handle.token.token).await;
    assert!(matches!(
        second,
        Err(DomainError::Verification(VerificationError::TokenNotFound))
    ));
}

#[tokio::test]
async fn test_verify_unknown_token() {
    let fx = fixture(24);

    let result = fx.service.verify("never-issued").await;

    let err = result.unwrap_err();
    assert!(matches!(
        err,
        DomainError::Verification(VerificationError::TokenNotFound)
    ));
    assert_eq!(err.error_code(), "TOKEN_NOT_FOUND");
}

#[tokio::test]
async fn test_verify_at_exact_expiry_is_expired() {
    let fx = fixture(1);
    let user = registered_user(&fx.users).await;
    let handle = fx.service.issue(&user).await.unwrap();
    fx.clock.set(handle.token.expires_at);

    let result = fx.service.verify(&handle.token.token).await;

    match result {
        Err(DomainError::Verification(VerificationError::TokenExpired { expired_at })) => {
            assert_eq!(expired_at, handle.token.expires_at);
        }
        other => panic!("Expected TokenExpired, got {:?}", other),
    }
    assert_eq!(fx.users.is_verified(user.id).await, Some(false));
    assert_eq!(fx.users.mark_calls(), 0);
}

#[tokio::test]
async fn test_expired_token_is_retained() {
    let fx = fixture(1);
    let user = registered_user(&fx.users).await;
    let handle = fx.service.issue(&user).await.unwrap();
    fx.clock.advance(Duration::hours(5));

    let result = fx.service.verify(&handle.token.token).await;

    assert!(matches!(
        result,
        Err(DomainError::Verification(VerificationError::TokenExpired { .. }))
    ));
    assert!(fx.store.exists_by_id(handle.token.id).await.unwrap());
    assert_eq!(fx.store.delete_calls(), 0);
}

#[tokio::test]
async fn test_one_hour_ttl_scenario() {
    let fx = fixture(1);
    let first_user = registered_user(&fx.users).await;
    let second_user = User::new("taras@example.com", "Taras");
    fx.users.insert(second_user.clone()).await;

    let first = fx.service.issue(&first_user).await.unwrap();
    let second = fx.service.issue(&second_user).await.unwrap();

    fx.clock.set(t0() + Duration::minutes(30));
    assert!(fx.service.verify(&first.token.token).await.is_ok());

    fx.clock.set(t0() + Duration::minutes(90));
    let late = fx.service.verify(&second.token.token).await;
    assert!(matches!(
        late,
        Err(DomainError::Verification(VerificationError::TokenExpired { .. }))
    ));
    assert!(fx.store.exists_by_id(second.token.id).await.unwrap());

    fx.clock.set(t0() + Duration::minutes(91));
    let later = fx.service.verify(&second.token.token).await;
    assert!(matches!(
        later,
        Err(DomainError::Verification(VerificationError::TokenExpired { .. }))
    ));
    assert_eq!(fx.users.is_verified(second_user.id).await, Some(false));
}

#[tokio::test]
async fn test_verify_propagates_directory_failure() {
    let fx = fixture(24);
    let user = registered_user(&fx.users).await;
    let handle = fx.service.issue(&user).await.unwrap();
    fx.users.set_should_fail(true);

    let result = fx.service.verify(&handle.token.token).await;

    assert!(matches!(result, Err(DomainError::Internal { .. })));
    assert!(fx.store.exists_by_id(handle.token.id).await.unwrap());
}

// Verify-then-delete is two store calls, so two callers holding the same
// token can both pass the lookup. Both must report success and the user is
// marked verified twice; the loser's delete hits NotFound.
#[tokio::test]
async fn test_concurrent_verify_both_succeed() {
    let fx = fixture_with(RacingTokenStore::new(2), MockMailer::new(false), test_config(24));
    let user = registered_user(&fx.users).await;
    let handle = fx.service.issue(&user).await.unwrap();
    let token = handle.token.token.clone();

    let (a, b) = tokio::join!(fx.service.verify(&token), fx.service.verify(&token));

    assert!(a.is_ok());
    assert!(b.is_ok());
    assert_eq!(fx.users.mark_calls(), 2);
    assert_eq!(fx.store.inner.delete_calls(), 2);
    assert_eq!(fx.store.inner.len().await, 0);
    assert_eq!(fx.users.is_verified(user.id).await, Some(true));
}

#[tokio::test]
async fn test_list_all_includes_expired() {
    let fx = fixture(1);
    let user = registered_user(&fx.users).await;
    let first = fx.service.issue(&user).await.unwrap();
    fx.clock.advance(Duration::hours(3));
    let second = fx.service.issue(&user).await.unwrap();

    let all = fx.service.list_all().await.unwrap();

    assert_eq!(all.len(), 2);
    assert_eq!(all[0].id, first.token.id);
    assert_eq!(all[1].id, second.token.id);
}

#[tokio::test]
async fn test_delete_known_and_unknown() {
    let fx = fixture(24);
    let user = registered_user(&fx.users).await;
    let handle = fx.service.issue(&user).await.unwrap();

    fx.service.delete(handle.token.id).await.unwrap();
    assert!(!fx.store.exists_by_id(handle.token.id).await.unwrap());

    let missing = Uuid::new_v4();
    let err = fx.service.delete(missing).await.unwrap_err();
    match err {
        DomainError::Verification(VerificationError::RecordNotFound { id }) => {
            assert_eq!(id, missing)
        }
        other => panic!("Expected RecordNotFound, got {:?}", other),
    }
}

#[tokio::test]
async fn test_reissue_issues_new_token_and_keeps_old() {
    let fx = fixture(24);
    let user = registered_user(&fx.users).await;
    let first = fx.service.issue(&user).await.unwrap();

    let second = fx.service.reissue(user.id).await.unwrap();

    assert_ne!(first.token.token, second.token.token);
    assert!(fx.store.exists_by_id(first.token.id).await.unwrap());
    assert!(fx.store.exists_by_id(second.token.id).await.unwrap());
}

#[tokio::test]
async fn test_reissue_unknown_user() {
    let fx = fixture(24);

    let result = fx.service.reissue(Uuid::new_v4()).await;

    assert!(matches!(result, Err(DomainError::NotFound { .. })));
}

#[tokio::test]
async fn test_reissue_already_verified() {
    let fx = fixture(24);
    let user = registered_user(&fx.users).await;
    let handle = fx.service.issue(&user).await.unwrap();
    fx.service.verify(&handle.token.token).await.unwrap();

    let err = fx.service.reissue(user.id).await.unwrap_err();

    assert!(matches!(
        err,
        DomainError::Verification(VerificationError::AlreadyVerified { .. })
    ));
    assert_eq!(err.error_code(), "ALREADY_VERIFIED");
}

#[tokio::test]
async fn test_new_rejects_non_positive_ttl() {
    let config = VerificationServiceConfig {
        token_ttl: Duration::zero(),
        ..test_config(1)
    };

    let result = VerificationService::new(
        Arc::new(MockTokenStore::new()),
        Arc::new(MockUserDirectory::new()),
        Arc::new(MockMailer::new(false)),
        Arc::new(ManualClock::new(t0())),
        config,
    );

    assert!(matches!(result, Err(DomainError::Validation { .. })));
}

#[tokio::test]
async fn test_new_rejects_ttl_beyond_one_year() {
    let config = VerificationServiceConfig {
        token_ttl: Duration::hours(3_000_000_000),
        ..test_config(1)
    };

    let result = VerificationService::new(
        Arc::new(MockTokenStore::new()),
        Arc::new(MockUserDirectory::new()),
        Arc::new(MockMailer::new(false)),
        Arc::new(ManualClock::new(t0())),
        config,
    );

    assert!(matches!(result, Err(DomainError::Validation { .. })));
}

#[tokio::test]
async fn test_new_rejects_empty_address() {
    let config = VerificationServiceConfig {
        server_address: "  ".to_string(),
        ..test_config(1)
    };

    let result = VerificationService::new(
        Arc::new(MockTokenStore::new()),
        Arc::new(MockUserDirectory::new()),
        Arc::new(MockMailer::new(false)),
        Arc::new(ManualClock::new(t0())),
        config,
    );

    assert!(matches!(result, Err(DomainError::Validation { .. })));
}

#[test]
fn test_config_from_shared_settings() {
    let shared = gc_shared::VerificationConfig {
        verify_email_time_hour: 48,
        address: "https://greencity.example/".to_string(),
        mail_send_timeout_secs: 10,
        ..Default::default()
    };

    let config = VerificationServiceConfig::try_from(&shared).unwrap();

    assert_eq!(config.token_ttl, Duration::hours(48));
    assert_eq!(config.mail_send_timeout, std::time::Duration::from_secs(10));
    assert_eq!(
        config.verification_link("abc"),
        "https://greencity.example/ownSecurity/verifyEmail?token=abc"
    );
}

#[test]
fn test_config_rejects_out_of_range_ttl() {
    for hours in [0, -5, 8761, 3_000_000_000, i64::MAX] {
        let shared = gc_shared::VerificationConfig {
            verify_email_time_hour: hours,
            ..Default::default()
        };

        let result = VerificationServiceConfig::try_from(&shared);
        assert!(
            matches!(result, Err(DomainError::Validation { .. })),
            "accepted {} hours",
            hours
        );
    }
}
