//! Integration tests for the token store
//!
//! Exercises the store through its public API only: role consistency across
//! many tokens, restart survival through a shared backend, and concurrent
//! readers observing whole sessions.

use std::sync::Arc;
use std::thread;

use roster_common::testing::{make_token, MockTokenPersistence};
use roster_common::{decode_role, AuthChange, Role, TokenStore};
use serde_json::json;

// ============================================================================
// Role consistency
// ============================================================================

#[test]
fn role_always_matches_current_token() {
    let store = TokenStore::in_memory();
    let tokens = [
        make_token(&json!({"role": "admin"})),
        make_token(&json!({"role": "user"})),
        make_token(&json!({"sub": "no-role"})),
        "opaque".to_string(),
        make_token(&json!({"role": ["admin"]})),
        make_token(&json!({"role": "admin", "exp": 1})),
    ];

    for token in &tokens {
        store.set(token.clone());
        assert_eq!(store.get().as_deref(), Some(token.as_str()));
        assert_eq!(store.role(), decode_role(token), "token {token}");
    }

    store.clear();
    assert_eq!(store.role(), None);
}

// ============================================================================
// Durable storage
// ============================================================================

#[test]
fn token_survives_restart_through_backend() {
    let backend = Arc::new(MockTokenPersistence::new());
    let token = make_token(&json!({"role": "admin"}));

    {
        let first_run = TokenStore::with_persistence(backend.clone());
        first_run.set(token.clone());
    }

    let second_run = TokenStore::with_persistence(backend.clone());
    assert_eq!(second_run.role(), Some(Role::Admin));
    assert_eq!(second_run.get(), Some(token));

    second_run.clear();
    let third_run = TokenStore::with_persistence(backend.clone());
    assert_eq!(third_run.get(), None);
    assert_eq!(backend.save_count(), 1);
}

// ============================================================================
// Concurrency
// ============================================================================

#[test]
fn concurrent_readers_see_whole_sessions() {
    let store = Arc::new(TokenStore::in_memory());
    let admin = make_token(&json!({"role": "admin"}));
    let plain = "plain-token".to_string();

    let writer = {
        let store = Arc::clone(&store);
        let (admin, plain) = (admin.clone(), plain.clone());
        thread::spawn(move || {
            for i in 0..500 {
                if i % 2 == 0 {
                    store.set(admin.clone());
                } else {
                    store.set(plain.clone());
                }
            }
        })
    };

    let readers: Vec<_> = (0..4)
        .map(|_| {
            let store = Arc::clone(&store);
            thread::spawn(move || {
                for _ in 0..500 {
                    if let Some(token) = store.get() {
                        assert!(token == "plain-token" || token.contains('.'));
                    }
                }
            })
        })
        .collect();

    writer.join().unwrap();
    for reader in readers {
        reader.join().unwrap();
    }

    assert_eq!(store.get(), Some(plain));
    assert_eq!(store.role(), None);
}

#[tokio::test]
async fn subscribers_follow_sign_in_and_out() {
    let store = TokenStore::in_memory();
    let mut first = store.subscribe();
    let mut second = store.subscribe();

    store.set("opaque");
    store.clear();

    for receiver in [&mut first, &mut second] {
        assert_eq!(receiver.recv().await.unwrap(), AuthChange::SignedIn { role: None });
        assert_eq!(receiver.recv().await.unwrap(), AuthChange::SignedOut);
    }
}
