//! Verify how cookies are forgotten.
use googletest::{
    assert_that, expect_that,
    prelude::{contains_substring, eq, none, not},
};
use http_cookie_store::CookieStoreConfig;

use crate::assertions::is_removal_cookie;
use crate::helpers::{set_cookie_for, set_cookie_headers, store_from_headers, store_from_pairs};

#[googletest::test]
fn a_forgotten_cookie_is_gone() {
    let config = CookieStoreConfig::default();
    let mut store = store_from_pairs(&[("a", "1")], &config);

    store.forget("a");

    expect_that!(store.get("a"), none());
    expect_that!(store.get_or("a", "default"), eq("default"));
    expect_that!(store.has("a"), eq(false));

    let queued: Vec<_> = store.response_cookies().collect();
    assert_that!(queued.len(), eq(1));
    expect_that!(queued[0], is_removal_cookie());
    expect_that!(queued[0].path(), eq(Some("/")));
}

#[googletest::test]
fn forgetting_a_cookie_set_in_the_same_request() {
    let config = CookieStoreConfig::default();
    let mut store = store_from_pairs(&[], &config);

    store.set("a", "1", 60).unwrap();
    store.forget("a");

    expect_that!(store.get("a"), none());
    // The removal replaces the queued cookie.
    let queued: Vec<_> = store.response_cookies().collect();
    assert_that!(queued.len(), eq(1));
    expect_that!(queued[0], is_removal_cookie());
}

#[googletest::test]
fn forgetting_an_absent_cookie_twice_is_harmless() {
    let config = CookieStoreConfig::default();
    let mut store = store_from_pairs(&[("other", "1")], &config);

    store.forget("nonexistent");
    let after_first: Vec<_> = store.all().iter().map(|(n, v)| (n.to_owned(), v.to_owned())).collect();
    store.forget("nonexistent");

    let after_second: Vec<_> = store.all().iter().map(|(n, v)| (n.to_owned(), v.to_owned())).collect();
    assert_eq!(after_first, after_second);
    expect_that!(store.get("other"), eq(Some("1")));
    expect_that!(store.response_cookies().count(), eq(1));
}

#[googletest::test]
fn forget_with_a_custom_path() {
    let config = CookieStoreConfig::default();
    let mut store = store_from_pairs(&[("a", "1")], &config);

    store.forget_with_path("a", "/admin");

    expect_that!(store.get("a"), none());
    let headers = set_cookie_headers(&mut store);
    let header = set_cookie_for(&headers, "a");
    expect_that!(header, contains_substring("Path=/admin"));
    expect_that!(header, contains_substring("Expires=Thu, 01 Jan 1970 00:00:00 GMT"));
}

#[googletest::test]
fn forget_with_an_empty_path_omits_the_attribute() {
    let config = CookieStoreConfig::default();
    let mut store = store_from_pairs(&[], &config);

    store.forget_with_path("a", "");

    let headers = set_cookie_headers(&mut store);
    expect_that!(set_cookie_for(&headers, "a"), not(contains_substring("Path")));
}

#[googletest::test]
fn forget_all_empties_the_jar() {
    let config = CookieStoreConfig::default();
    let mut store = store_from_pairs(&[("a", "1"), ("b", "2")], &config);

    store.forget_all();

    expect_that!(store.all().is_empty(), eq(true));
    let headers = set_cookie_headers(&mut store);
    expect_that!(headers.len(), eq(2));
    for name in ["a", "b"] {
        expect_that!(
            set_cookie_for(&headers, name),
            contains_substring("Expires=Thu, 01 Jan 1970 00:00:00 GMT")
        );
    }
}

#[googletest::test]
fn forget_all_covers_request_and_response_cookies() {
    let config = CookieStoreConfig::default();
    let mut store = store_from_headers(&["a=1; b=2; c=3"], &config);
    store.set("d", "4", 0).unwrap();

    store.forget_all();

    expect_that!(store.all().len(), eq(0));
    let queued: Vec<_> = store.response_cookies().collect();
    expect_that!(queued.len(), eq(4));
    for cookie in queued {
        expect_that!(cookie, is_removal_cookie());
    }
}

#[googletest::test]
fn forget_all_on_an_empty_jar_does_nothing() {
    let config = CookieStoreConfig::default();
    let mut store = store_from_pairs(&[], &config);

    store.forget_all();

    expect_that!(store.all().is_empty(), eq(true));
    expect_that!(store.response_cookies().count(), eq(0));
}

#[googletest::test]
fn forget_after_commit_still_clears_the_request() {
    let config = CookieStoreConfig::default();
    let mut store = store_from_pairs(&[("a", "1")], &config);
    let _ = set_cookie_headers(&mut store);

    store.forget("a");

    expect_that!(store.get("a"), none());
    expect_that!(store.response_cookies().count(), eq(0));
}
