//! Paste service behavior tests.

use super::{share_url, NewPaste, PasteService};
use crate::constants::MAX_ID_ATTEMPTS;
use crate::error::AppError;
use crate::ids::IdGenerator;
use crate::models::paste::CreatePasteRequest;
use crate::test_support::{epoch, setup_temp_db};
use chrono::Duration;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Barrier};
use std::thread;
use tempfile::TempDir;

const BASE: &str = "http://paste.test";

fn setup_service() -> (PasteService, TempDir) {
    let (db, temp) = setup_temp_db();
    (PasteService::new(db), temp)
}

fn request(content: &str, ttl_seconds: Option<i64>, max_views: Option<i64>) -> CreatePasteRequest {
    CreatePasteRequest {
        content: content.to_string(),
        ttl_seconds,
        max_views,
    }
}

fn scripted_ids(ids: &[&str]) -> IdGenerator {
    let ids: Vec<String> = ids.iter().map(|id| id.to_string()).collect();
    let next = AtomicUsize::new(0);
    Arc::new(move || {
        let index = next.fetch_add(1, Ordering::SeqCst).min(ids.len() - 1);
        ids[index].clone()
    })
}

fn assert_not_found<T: std::fmt::Debug>(result: Result<T, AppError>) {
    match result {
        Err(AppError::NotFound) => {}
        other => panic!("expected NotFound, got {:?}", other),
    }
}

fn assert_bad_request<T: std::fmt::Debug>(result: Result<T, AppError>) {
    match result {
        Err(AppError::BadRequest(_)) => {}
        other => panic!("expected BadRequest, got {:?}", other),
    }
}

#[test]
fn create_returns_share_url_and_persists_limits() {
    let (service, _temp) = setup_service();
    let created = service
        .create(request("hello", Some(60), Some(3)), epoch(), BASE)
        .expect("create");

    assert_eq!(created.url, format!("{}/p/{}", BASE, created.id));
    let stored = service
        .database()
        .pastes
        .get(&created.id)
        .expect("get")
        .expect("stored");
    assert_eq!(stored.content, "hello");
    assert_eq!(stored.created_at, epoch());
    assert_eq!(stored.expires_at, Some(epoch() + Duration::seconds(60)));
    assert_eq!(stored.max_views, Some(3));
    assert_eq!(stored.views_count, 0);
}

#[test]
fn create_rejects_invalid_input_without_persisting() {
    let (service, _temp) = setup_service();
    let cases = [
        request("", None, None),
        request("   \n\t", None, None),
        request("x", Some(0), None),
        request("x", Some(-5), None),
        request("x", None, Some(0)),
        request("x", None, Some(-1)),
        request("x", Some(i64::MAX), None),
    ];
    for case in cases {
        assert_bad_request(service.create(case, epoch(), BASE));
    }
    assert_eq!(service.database().pastes.count().expect("count"), 0);
}

#[test]
fn new_paste_resolves_ttl_against_supplied_instant() {
    let draft = NewPaste::from_request(request("x", Some(5), None), epoch()).expect("valid");
    assert_eq!(draft.expires_at, Some(epoch() + Duration::seconds(5)));
    assert_eq!(draft.max_views, None);
}

#[test]
fn share_url_trims_trailing_slash() {
    assert_eq!(share_url("http://h/", "abc"), "http://h/p/abc");
    assert_eq!(share_url("http://h", "abc"), "http://h/p/abc");
}

#[test]
fn create_retries_with_fresh_id_after_collision() {
    let (db, _temp) = setup_temp_db();
    let taken = PasteService::with_id_generator(db.share().expect("share"), scripted_ids(&["collision0"]));
    taken
        .create(request("first", None, None), epoch(), BASE)
        .expect("seed");

    let service = PasteService::with_id_generator(
        db,
        scripted_ids(&["collision0", "collision0", "freshid000"]),
    );
    let created = service
        .create(request("second", None, None), epoch(), BASE)
        .expect("retry should succeed");

    assert_eq!(created.id, "freshid000");
    let original = service
        .database()
        .pastes
        .get("collision0")
        .expect("get")
        .expect("exists");
    assert_eq!(original.content, "first");
}

#[test]
fn create_gives_up_after_bounded_attempts() {
    let (db, _temp) = setup_temp_db();
    let service = PasteService::with_id_generator(db, scripted_ids(&["collision0"]));
    service
        .create(request("first", None, None), epoch(), BASE)
        .expect("seed");

    match service.create(request("second", None, None), epoch(), BASE) {
        Err(AppError::IdSpaceExhausted(attempts)) => assert_eq!(attempts, MAX_ID_ATTEMPTS),
        other => panic!("expected IdSpaceExhausted, got {:?}", other),
    }
    assert_eq!(service.database().pastes.count().expect("count"), 1);
}

#[test]
fn single_view_paste_is_gone_after_first_counted_read() {
    let (service, _temp) = setup_service();
    let created = service
        .create(request("hello", None, Some(1)), epoch(), BASE)
        .expect("create");

    let first = service.view(&created.id, epoch()).expect("first view");
    assert_eq!(first.content, "hello");
    assert_eq!(first.remaining_views, Some(0));
    assert_eq!(first.expires_at, None);

    assert_not_found(service.view(&created.id, epoch()));
    assert_not_found(service.display(&created.id, epoch()));
}

#[test]
fn ttl_paste_expires_between_reads() {
    let (service, _temp) = setup_service();
    let created = service
        .create(request("timed", Some(5), None), epoch(), BASE)
        .expect("create");

    let view = service
        .view(&created.id, epoch() + Duration::seconds(3))
        .expect("view before expiry");
    assert_eq!(view.remaining_views, None);
    assert_eq!(view.expires_at, Some(epoch() + Duration::seconds(5)));

    assert_not_found(service.view(&created.id, epoch() + Duration::seconds(6)));
}

#[test]
fn both_read_paths_honor_ttl_boundaries() {
    let (service, _temp) = setup_service();
    let ttl = 30;
    let created = service
        .create(request("boundary", Some(ttl), None), epoch(), BASE)
        .expect("create");
    let before = epoch() + Duration::seconds(ttl - 1);
    let after = epoch() + Duration::seconds(ttl + 1);

    service.display(&created.id, before).expect("display before expiry");
    service.view(&created.id, before).expect("view before expiry");
    assert_not_found(service.display(&created.id, after));
    assert_not_found(service.view(&created.id, after));
}

#[test]
fn display_reads_never_consume_views() {
    let (service, _temp) = setup_service();
    let created = service
        .create(request("look", None, Some(2)), epoch(), BASE)
        .expect("create");

    for _ in 0..10 {
        let paste = service.display(&created.id, epoch()).expect("display");
        assert_eq!(paste.views_count, 0);
    }

    let stored = service
        .database()
        .pastes
        .get(&created.id)
        .expect("get")
        .expect("exists");
    assert_eq!(stored.views_count, 0);
    assert_eq!(
        service.view(&created.id, epoch()).expect("view").remaining_views,
        Some(1)
    );
}

#[test]
fn remaining_views_track_each_counted_read() {
    let (service, _temp) = setup_service();
    let created = service
        .create(request("count", None, Some(4)), epoch(), BASE)
        .expect("create");

    let remaining: Vec<Option<u64>> = (0..4)
        .map(|_| service.view(&created.id, epoch()).expect("view").remaining_views)
        .collect();
    assert_eq!(remaining, vec![Some(3), Some(2), Some(1), Some(0)]);
    assert_not_found(service.view(&created.id, epoch()));
}

#[test]
fn content_round_trips_byte_for_byte() {
    let (service, _temp) = setup_service();
    let content = "<script>alert('x')</script> & \"quotes\"\n\ttabs ünïcödé";
    let created = service
        .create(request(content, None, None), epoch(), BASE)
        .expect("create");

    assert_eq!(service.display(&created.id, epoch()).expect("display").content, content);
    assert_eq!(service.view(&created.id, epoch()).expect("view").content, content);
}

#[test]
fn unknown_and_malformed_ids_are_not_found() {
    let (service, _temp) = setup_service();
    for id in ["missing000", "", "../../etc", "way-too-long-identifier"] {
        assert_not_found(service.display(id, epoch()));
        assert_not_found(service.view(id, epoch()));
    }
}

#[test]
fn concurrent_counted_reads_succeed_exactly_max_views_times() {
    let (service, _temp) = setup_service();
    let max_views = 7usize;
    let created = service
        .create(request("race", None, Some(max_views as i64)), epoch(), BASE)
        .expect("create");

    let service = Arc::new(service);
    let callers = max_views + 5;
    let barrier = Arc::new(Barrier::new(callers));
    let handles: Vec<_> = (0..callers)
        .map(|_| {
            let service = service.clone();
            let barrier = barrier.clone();
            let id = created.id.clone();
            thread::spawn(move || {
                barrier.wait();
                match service.view(&id, epoch()) {
                    Ok(_) => true,
                    Err(AppError::NotFound) => false,
                    Err(err) => panic!("unexpected error: {:?}", err),
                }
            })
        })
        .collect();

    let succeeded = handles
        .into_iter()
        .map(|handle| handle.join().expect("join"))
        .filter(|ok| *ok)
        .count();
    assert_eq!(succeeded, max_views);
}
