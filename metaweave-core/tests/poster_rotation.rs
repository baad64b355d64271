mod support;

use std::sync::Arc;

use metaweave_core::{MediaType, PosterResolver, SearchQuery};
use serde_json::json;
use support::{FakeTransport, PLACEHOLDER, config, poster_url, verifying_catalog};

fn resolver(transport: &Arc<FakeTransport>) -> PosterResolver {
    PosterResolver::new(transport.clone(), &config().poster)
}

#[tokio::test]
async fn rate_limited_key_is_rotated_out() {
    let transport = FakeTransport::new();
    transport.probe_status("k1", 429);
    let posters = resolver(&transport);

    assert_eq!(posters.resolve_poster_checked("tmdb-movie-1", Some("tt1")).await, None);
    assert_eq!(posters.current_credential().as_deref(), Some("k2"));
    assert_eq!(posters.pool().available(), 1);

    let url = posters.resolve_poster_checked("tmdb-movie-1", Some("tt1")).await;
    assert_eq!(url, Some(poster_url("k2", "tt1")));

    let probed: Vec<String> = transport
        .requests()
        .iter()
        .filter_map(|r| r.param_value("apikey").map(str::to_string))
        .collect();
    assert_eq!(probed, vec!["k1", "k2"]);
}

#[tokio::test]
async fn unauthorized_key_is_rotated_out() {
    let transport = FakeTransport::new();
    transport.probe_status("k1", 401);
    let posters = resolver(&transport);

    posters.resolve_poster_checked("tmdb-movie-1", Some("tt1")).await;
    assert_eq!(posters.current_credential().as_deref(), Some("k2"));
}

#[tokio::test]
async fn other_failures_keep_the_key() {
    let transport = FakeTransport::new();
    transport.probe_status("k1", 500);
    let posters = resolver(&transport);

    assert_eq!(posters.resolve_poster_checked("tmdb-movie-1", Some("tt1")).await, None);
    assert_eq!(posters.current_credential().as_deref(), Some("k1"));
}

#[tokio::test]
async fn exhausted_pool_falls_back_to_first_key() {
    let transport = FakeTransport::new();
    transport.probe_status("k1", 429).probe_status("k2", 429);
    let posters = resolver(&transport);

    posters.resolve_poster_checked("tmdb-movie-1", Some("tt1")).await;
    posters.resolve_poster_checked("tmdb-movie-1", Some("tt1")).await;

    assert_eq!(posters.pool().available(), 0);
    assert_eq!(posters.current_credential().as_deref(), Some("k1"));
    assert_eq!(posters.resolve_poster("tmdb-movie-2", Some("tt2")), poster_url("k1", "tt2"));

    posters.reset_credentials();
    assert_eq!(posters.pool().available(), 2);
}

#[tokio::test]
async fn no_external_id_never_probes() {
    let transport = FakeTransport::new();
    let posters = resolver(&transport);

    let url = posters.resolve_poster_checked("tmdb-show-2", None).await;

    assert_eq!(url.as_deref(), Some(PLACEHOLDER));
    assert!(transport.requests().is_empty());
}

#[tokio::test]
async fn verified_search_drops_rate_limited_posters() {
    let transport = FakeTransport::new();
    transport
        .json("search/movie", json!({ "results": [ { "id": 603, "title": "The Matrix" } ] }))
        .json("movie/603", json!({ "id": 603, "title": "The Matrix", "imdb_id": "tt0133093" }))
        .probe_status("k1", 429);
    let catalog = verifying_catalog(&transport);

    let results = catalog
        .search(&SearchQuery::new("The Matrix", MediaType::Movie))
        .await
        .unwrap();

    assert_eq!(results.len(), 1);
    assert_eq!(results[0].poster, None);
    assert_eq!(catalog.posters().current_credential().as_deref(), Some("k2"));
}
