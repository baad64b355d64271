//! Internal media metadata shape produced by the normalizer.
//!
//! Every provider response, whichever catalog it came from, ends up as a
//! [`MediaMeta`]. Series-only data lives inside [`MediaKind::Series`] so a
//! movie can never carry seasons.

use crate::media_type::MediaType;

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MediaMeta {
    pub id: String,
    pub title: String,
    pub year: Option<u16>,
    pub poster: Option<String>,
    #[cfg_attr(feature = "serde", serde(flatten))]
    pub kind: MediaKind,
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(
    feature = "serde",
    serde(tag = "type", rename_all = "lowercase")
)]
pub enum MediaKind {
    Movie,
    Series {
        seasons: Vec<SeasonMeta>,
        #[cfg_attr(
            feature = "serde",
            serde(default, skip_serializing_if = "Option::is_none")
        )]
        season_data: Option<SeasonDetail>,
    },
}

impl MediaKind {
    /// Build a series kind; seasons are ordered by season number.
    pub fn series(
        mut seasons: Vec<SeasonMeta>,
        season_data: Option<SeasonDetail>,
    ) -> Self {
        seasons.sort_by_key(|season| season.number);
        MediaKind::Series {
            seasons,
            season_data,
        }
    }

    pub fn media_type(&self) -> MediaType {
        match self {
            MediaKind::Movie => MediaType::Movie,
            MediaKind::Series { .. } => MediaType::Series,
        }
    }
}

impl MediaMeta {
    pub fn media_type(&self) -> MediaType {
        self.kind.media_type()
    }

    pub fn seasons(&self) -> &[SeasonMeta] {
        match &self.kind {
            MediaKind::Series { seasons, .. } => seasons,
            MediaKind::Movie => &[],
        }
    }

    pub fn season_data(&self) -> Option<&SeasonDetail> {
        match &self.kind {
            MediaKind::Series { season_data, .. } => season_data.as_ref(),
            MediaKind::Movie => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SeasonMeta {
    pub id: String,
    pub number: u32,
    pub title: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EpisodeMeta {
    pub id: String,
    pub number: u32,
    pub title: String,
}

/// A single season together with its episode listing.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SeasonDetail {
    pub id: String,
    pub number: u32,
    pub title: String,
    pub episodes: Vec<EpisodeMeta>,
}

impl SeasonDetail {
    /// Episodes are ordered by episode number regardless of input order.
    pub fn new(
        id: impl Into<String>,
        number: u32,
        title: impl Into<String>,
        mut episodes: Vec<EpisodeMeta>,
    ) -> Self {
        episodes.sort_by_key(|episode| episode.number);
        Self {
            id: id.into(),
            number,
            title: title.into(),
            episodes,
        }
    }
}

/// Cross-provider identifiers resolved during a detail lookup.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ExternalIds {
    pub imdb_id: Option<String>,
    pub tmdb_id: Option<String>,
}

/// Result of a detail lookup: the normalized record plus the identifiers
/// needed to bridge into other namespaces.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DetailedMeta {
    pub meta: MediaMeta,
    pub imdb_id: Option<String>,
    pub tmdb_id: Option<String>,
}
