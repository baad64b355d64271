//! Provider records to the internal [`MediaMeta`] shape.

use chrono::{Datelike, NaiveDate};
use metaweave_model::{EpisodeMeta, MediaKind, MediaMeta, MediaType, SeasonDetail, SeasonMeta};

use crate::error::{MetadataError, Result};
use crate::providers::justwatch::{JwSeasonMeta, LegacyDetail};
use crate::providers::tmdb::{TmdbDetails, TmdbEpisodeShort, TmdbSearchItem, TmdbSeasonShort};

/// Provider-neutral intermediate record, before season data is attached.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediaRecord {
    pub id: String,
    pub title: String,
    pub media_type: MediaType,
    pub poster: Option<String>,
    pub year: Option<u16>,
    pub seasons: Vec<SeasonMeta>,
}

/// Build the internal record. Season data is only kept for series and both
/// seasons and episodes come out sorted by number.
pub fn to_internal_meta(record: MediaRecord, season_detail: Option<SeasonDetail>) -> MediaMeta {
    let kind = match record.media_type {
        MediaType::Movie => MediaKind::Movie,
        MediaType::Series => MediaKind::series(
            record.seasons,
            season_detail.map(|d| SeasonDetail::new(d.id, d.number, d.title, d.episodes)),
        ),
    };

    MediaMeta {
        id: record.id,
        title: record.title,
        year: record.year,
        poster: record.poster,
        kind,
    }
}

/// Year of a `YYYY-MM-DD` release date, falling back to a leading
/// four-digit year for partial dates.
pub fn year_from_release_date(date: Option<&str>) -> Option<u16> {
    let date = date?.trim();
    if let Ok(parsed) = NaiveDate::parse_from_str(date, "%Y-%m-%d") {
        return u16::try_from(parsed.year()).ok();
    }

    let prefix = date.get(..4)?;
    if prefix.bytes().all(|b| b.is_ascii_digit()) {
        prefix.parse().ok()
    } else {
        None
    }
}

fn type_mismatch(expected: MediaType, found: MediaType) -> MetadataError {
    MetadataError::UnsupportedType(format!(
        "expected {} payload, got {}",
        expected.tag(),
        found.tag()
    ))
}

pub fn format_tmdb_search_result(
    item: &TmdbSearchItem,
    media_type: MediaType,
    poster: Option<String>,
) -> Result<MediaRecord> {
    if item.media_type() != media_type {
        return Err(type_mismatch(media_type, item.media_type()));
    }

    Ok(match item {
        TmdbSearchItem::Movie(movie) => MediaRecord {
            id: movie.id.to_string(),
            title: movie.title.clone(),
            media_type,
            poster,
            year: year_from_release_date(movie.release_date.as_deref()),
            seasons: Vec::new(),
        },
        TmdbSearchItem::Show(show) => MediaRecord {
            id: show.id.to_string(),
            title: show.name.clone(),
            media_type,
            poster,
            year: year_from_release_date(show.first_air_date.as_deref()),
            seasons: Vec::new(),
        },
    })
}

pub fn format_tmdb_details(
    details: &TmdbDetails,
    media_type: MediaType,
    poster: Option<String>,
) -> Result<MediaRecord> {
    if details.media_type() != media_type {
        return Err(type_mismatch(media_type, details.media_type()));
    }

    Ok(match details {
        TmdbDetails::Movie(movie) => MediaRecord {
            id: movie.id.to_string(),
            title: movie.title.clone(),
            media_type,
            poster,
            year: year_from_release_date(movie.release_date.as_deref()),
            seasons: Vec::new(),
        },
        TmdbDetails::Show(show) => MediaRecord {
            id: show.id.to_string(),
            title: show.name.clone(),
            media_type,
            poster,
            year: year_from_release_date(show.first_air_date.as_deref()),
            seasons: show
                .seasons
                .iter()
                .map(|s| SeasonMeta {
                    id: s.id.to_string(),
                    number: s.season_number,
                    title: s.name.clone(),
                })
                .collect(),
        },
    })
}

pub fn format_tmdb_season(season: &TmdbSeasonShort, episodes: Vec<TmdbEpisodeShort>) -> SeasonDetail {
    let episodes = episodes
        .into_iter()
        .map(|e| EpisodeMeta {
            id: e.id.to_string(),
            number: e.episode_number,
            title: e.title,
        })
        .collect();
    SeasonDetail::new(season.id.to_string(), season.season_number, season.name.clone(), episodes)
}

fn format_legacy_season(season: &JwSeasonMeta) -> SeasonDetail {
    let episodes = season
        .episodes
        .iter()
        .map(|e| EpisodeMeta {
            id: e.id.clone(),
            number: e.episode_number,
            title: e.title.clone(),
        })
        .collect();
    SeasonDetail::new(season.id.clone(), season.season_number, season.title.clone(), episodes)
}

/// `detail.media_type` was checked against the legacy `object_type` when the
/// client fetched the title; the raw tag is not consulted again.
pub fn format_legacy_title(detail: &LegacyDetail) -> MediaMeta {
    let title = &detail.title;

    let record = MediaRecord {
        id: title.id.clone(),
        title: title.title.clone(),
        media_type: detail.media_type,
        poster: title.poster.clone(),
        year: title.original_release_year,
        seasons: title
            .seasons
            .iter()
            .map(|s| SeasonMeta {
                id: s.id.clone(),
                number: s.season_number,
                title: s.title.clone(),
            })
            .collect(),
    };

    to_internal_meta(record, detail.season.as_ref().map(format_legacy_season))
}
