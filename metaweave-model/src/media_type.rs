use std::fmt::{self, Display, Formatter};
use std::str::FromStr;

use crate::error::ModelError;

/// The two kinds of title the catalog understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum MediaType {
    /// Movie media type
    Movie,
    /// Series media type
    Series,
}

impl MediaType {
    /// Provider tag used by canonical ids, TMDB routing and JustWatch
    /// object types.
    pub fn tag(self) -> &'static str {
        match self {
            MediaType::Movie => "movie",
            MediaType::Series => "show",
        }
    }

    /// Parse a provider tag (`"movie"` or `"show"`).
    pub fn from_tag(tag: &str) -> Result<Self, ModelError> {
        match tag {
            "movie" => Ok(MediaType::Movie),
            "show" => Ok(MediaType::Series),
            other => Err(ModelError::UnsupportedType(other.to_string())),
        }
    }

    pub fn is_series(self) -> bool {
        matches!(self, MediaType::Series)
    }
}

impl Display for MediaType {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            MediaType::Movie => write!(f, "Movie"),
            MediaType::Series => write!(f, "Series"),
        }
    }
}

/// Accepts the provider tags plus the user-facing spellings
/// (`series`, `tv`), case-insensitively.
impl FromStr for MediaType {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "movie" | "movies" => Ok(MediaType::Movie),
            "show" | "series" | "tv" => Ok(MediaType::Series),
            _ => Err(ModelError::UnsupportedType(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tags_round_trip() {
        for media_type in [MediaType::Movie, MediaType::Series] {
            assert_eq!(MediaType::from_tag(media_type.tag()), Ok(media_type));
        }
    }

    #[test]
    fn unknown_tag_is_unsupported() {
        assert_eq!(
            MediaType::from_tag("person"),
            Err(ModelError::UnsupportedType("person".into()))
        );
        // Tags are exact; only the user-facing parser is lenient.
        assert!(MediaType::from_tag("Movie").is_err());
        assert_eq!("Series".parse::<MediaType>(), Ok(MediaType::Series));
        assert_eq!(" tv ".parse::<MediaType>(), Ok(MediaType::Series));
    }
}
