mod support;

use metaweave_core::{MediaKind, MediaType, MetadataError};
use serde_json::json;
use support::{FakeTransport, catalog, poster_url};

fn thrones_routes(transport: &FakeTransport) {
    transport
        .json(
            "tv/1399",
            json!({
                "id": 1399,
                "name": "Game of Thrones",
                "first_air_date": "2011-04-17",
                "seasons": [
                    { "id": 3625, "season_number": 2, "name": "Season 2", "episode_count": 10 },
                    { "id": 3627, "season_number": 0, "name": "Specials" },
                    { "id": 3624, "season_number": 1, "name": "Season 1", "episode_count": 10 }
                ]
            }),
        )
        .json("tv/1399/external_ids", json!({ "imdb_id": "tt0944947" }))
        .json(
            "tv/1399/season/1",
            json!({
                "episodes": [
                    { "id": 63057, "episode_number": 2, "name": "The Kingsroad" },
                    { "id": 63056, "episode_number": 1, "name": "Winter Is Coming" }
                ]
            }),
        )
        .json(
            "tv/1399/season/0",
            json!({ "episodes": [ { "id": 1, "episode_number": 1, "name": "Inside the Episode" } ] }),
        );
}

#[tokio::test]
async fn movie_detail_carries_identifiers() {
    let transport = FakeTransport::new();
    transport
        .json(
            "movie/603",
            json!({ "id": 603, "title": "The Matrix", "release_date": "1999-03-31", "imdb_id": "tt0133093" }),
        )
        .json("movie/603/external_ids", json!({ "imdb_id": "tt0133093" }));
    let catalog = catalog(&transport);

    let detail = catalog.get_by_id(MediaType::Movie, "603", None).await.unwrap().unwrap();

    assert_eq!(detail.imdb_id.as_deref(), Some("tt0133093"));
    assert_eq!(detail.tmdb_id.as_deref(), Some("603"));
    assert_eq!(detail.meta.kind, MediaKind::Movie);
    assert_eq!(detail.meta.title, "The Matrix");
    assert_eq!(detail.meta.poster.as_deref(), Some(poster_url("k1", "tt0133093").as_str()));
}

#[tokio::test]
async fn series_detail_defaults_to_season_one() {
    let transport = FakeTransport::new();
    thrones_routes(&transport);
    let catalog = catalog(&transport);

    let detail = catalog.get_by_id(MediaType::Series, "1399", None).await.unwrap().unwrap();
    let meta = &detail.meta;

    let numbers: Vec<u32> = meta.seasons().iter().map(|s| s.number).collect();
    assert_eq!(numbers, vec![0, 1, 2]);

    let season = meta.season_data().unwrap();
    assert_eq!(season.id, "3624");
    assert_eq!(season.number, 1);
    let episodes: Vec<&str> = season.episodes.iter().map(|e| e.title.as_str()).collect();
    assert_eq!(episodes, vec!["Winter Is Coming", "The Kingsroad"]);
    assert_eq!(transport.hits("tv/1399/season/0"), 0);
}

#[tokio::test]
async fn series_detail_honors_requested_season() {
    let transport = FakeTransport::new();
    thrones_routes(&transport);
    let catalog = catalog(&transport);

    let detail = catalog
        .get_by_id(MediaType::Series, "1399", Some("3627"))
        .await
        .unwrap()
        .unwrap();

    let season = detail.meta.season_data().unwrap();
    assert_eq!(season.title, "Specials");
    assert_eq!(season.episodes.len(), 1);
    assert_eq!(transport.hits("tv/1399/season/1"), 0);
}

#[tokio::test]
async fn unknown_season_id_falls_back_to_season_one() {
    let transport = FakeTransport::new();
    thrones_routes(&transport);
    let catalog = catalog(&transport);

    let detail = catalog
        .get_by_id(MediaType::Series, "1399", Some("999999"))
        .await
        .unwrap()
        .unwrap();

    assert_eq!(detail.meta.season_data().unwrap().number, 1);
}

#[tokio::test]
async fn series_without_season_one_has_no_season_data() {
    let transport = FakeTransport::new();
    transport
        .json(
            "tv/5",
            json!({ "id": 5, "name": "Specials Only", "seasons": [ { "id": 50, "season_number": 0, "name": "Specials" } ] }),
        )
        .json("tv/5/external_ids", json!({ "imdb_id": null }));
    let catalog = catalog(&transport);

    let detail = catalog.get_by_id(MediaType::Series, "5", None).await.unwrap().unwrap();

    assert!(detail.meta.season_data().is_none());
    assert_eq!(detail.imdb_id, None);
    assert_eq!(detail.meta.poster.as_deref(), Some(support::PLACEHOLDER));
}

#[tokio::test]
async fn missing_title_is_none_and_server_errors_propagate() {
    let transport = FakeTransport::new();
    transport.status("movie/1", 404).status("movie/2", 503);
    let catalog = catalog(&transport);

    assert!(catalog.get_by_id(MediaType::Movie, "1", None).await.unwrap().is_none());

    let err = catalog.get_by_id(MediaType::Movie, "2", None).await.unwrap_err();
    assert_eq!(err.status_code(), Some(503));
}

#[tokio::test]
async fn canonical_id_lookup() {
    let transport = FakeTransport::new();
    transport
        .json("movie/603", json!({ "id": 603, "title": "The Matrix" }))
        .json("movie/603/external_ids", json!({}));
    let catalog = catalog(&transport);

    let detail = catalog.get_by_canonical_id("tmdb-movie-603", None).await.unwrap().unwrap();
    assert_eq!(detail.meta.id, "603");

    let err = catalog.get_by_canonical_id("tmdb-film-603", None).await.unwrap_err();
    assert!(matches!(err, MetadataError::InvalidCanonicalId(_)));
}

fn legacy_show() -> serde_json::Value {
    json!({
        "id": 42,
        "title": "Dark",
        "poster": "/poster/8711/{profile}",
        "original_release_year": 2017,
        "object_type": "show",
        "seasons": [
            { "id": 7, "season_number": 2, "title": "Season 2" },
            { "id": 5, "season_number": 1, "title": "Season 1" }
        ],
        "external_ids": [
            { "provider": "imdb", "external_id": "tt0000001" },
            { "provider": "tmdb", "external_id": "70523" },
            { "provider": "imdb_latest", "external_id": "tt5753856" }
        ]
    })
}

#[tokio::test]
async fn legacy_show_detail() {
    let transport = FakeTransport::new();
    transport
        .json("content/titles/show/42/locale/en_US", legacy_show())
        .json(
            "content/titles/show_season/7/locale/en_US",
            json!({
                "id": 7,
                "season_number": 2,
                "title": "Season 2",
                "episodes": [
                    { "id": 702, "episode_number": 2, "title": "Lost and Found" },
                    { "id": 701, "episode_number": 1, "title": "Beginnings and Endings" }
                ]
            }),
        );
    let catalog = catalog(&transport);

    let detail = catalog
        .get_legacy_by_id(MediaType::Series, "42", None)
        .await
        .unwrap()
        .unwrap();

    assert_eq!(detail.imdb_id.as_deref(), Some("tt5753856"));
    assert_eq!(detail.tmdb_id.as_deref(), Some("70523"));

    let meta = &detail.meta;
    assert_eq!(meta.id, "42");
    assert_eq!(meta.year, Some(2017));
    assert_eq!(meta.poster.as_deref(), Some("https://images.justwatch.com/poster/8711/s166"));
    assert_eq!(meta.seasons()[0].number, 1);

    let season = meta.season_data().unwrap();
    assert_eq!(season.id, "7");
    assert_eq!(season.episodes[0].id, "701");
    assert!(transport.requests().iter().all(|r| r.base_url == support::JUSTWATCH_BASE));
}

#[tokio::test]
async fn legacy_missing_season_fails_lookup() {
    let transport = FakeTransport::new();
    transport
        .json("content/titles/show/42/locale/en_US", legacy_show())
        .status("content/titles/show_season/5/locale/en_US", 404)
        .status("content/titles/show_season/6/locale/en_US", 400);
    let catalog = catalog(&transport);

    let err = catalog
        .get_legacy_by_id(MediaType::Series, "42", Some("5"))
        .await
        .unwrap_err();
    assert!(matches!(err, MetadataError::Upstream { status_code: 404, .. }));

    let err = catalog
        .get_legacy_by_id(MediaType::Series, "42", Some("6"))
        .await
        .unwrap_err();
    assert!(matches!(err, MetadataError::Upstream { status_code: 400, .. }));
}

#[tokio::test]
async fn legacy_absent_statuses() {
    let transport = FakeTransport::new();
    transport
        .status("content/titles/movie/1/locale/en_US", 400)
        .status("content/titles/movie/2/locale/en_US", 404)
        .status("content/titles/movie/3/locale/en_US", 500);
    let catalog = catalog(&transport);

    assert!(catalog.get_legacy_by_id(MediaType::Movie, "1", None).await.unwrap().is_none());
    assert!(catalog.get_legacy_by_id(MediaType::Movie, "2", None).await.unwrap().is_none());

    let err = catalog.get_legacy_by_id(MediaType::Movie, "3", None).await.unwrap_err();
    assert!(matches!(err, MetadataError::Upstream { status_code: 500, .. }));
}

#[tokio::test]
async fn legacy_unsupported_object_type() {
    let transport = FakeTransport::new();
    transport.json(
        "content/titles/movie/9/locale/en_US",
        json!({ "id": 9, "title": "Someone", "object_type": "person" }),
    );
    let catalog = catalog(&transport);

    let err = catalog.get_legacy_by_id(MediaType::Movie, "9", None).await.unwrap_err();
    assert!(matches!(err, MetadataError::UnsupportedType(tag) if tag == "person"));
}
