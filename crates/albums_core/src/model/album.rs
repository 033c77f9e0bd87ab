//! Album domain model.
//!
//! # Responsibility
//! - Define the canonical album record read from the `album` table.
//! - Separate persisted records (`Album`) from insert payloads (`NewAlbum`).
//!
//! # Invariants
//! - `id` uniquely identifies an album and is immutable once assigned.
//! - `price` is non-negative by convention only; it is not validated.

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Store-assigned album identifier (`album.id`).
pub type AlbumId = i64;

/// Persisted album row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Album {
    pub id: AlbumId,
    pub title: String,
    pub artist: String,
    pub price: f64,
}

impl Album {
    /// Returns the insertable part of this record.
    pub fn to_new(&self) -> NewAlbum {
        NewAlbum {
            title: self.title.clone(),
            artist: self.artist.clone(),
            price: self.price,
        }
    }
}

impl Display for Album {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{{{} {} {} {}}}",
            self.id, self.title, self.artist, self.price
        )
    }
}

/// Album payload that has not been assigned an id yet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewAlbum {
    pub title: String,
    pub artist: String,
    pub price: f64,
}

impl NewAlbum {
    pub fn new(title: impl Into<String>, artist: impl Into<String>, price: f64) -> Self {
        Self {
            title: title.into(),
            artist: artist.into(),
            price,
        }
    }

    /// Attaches a store-assigned id, producing the persisted shape.
    pub fn with_id(self, id: AlbumId) -> Album {
        Album {
            id,
            title: self.title,
            artist: self.artist,
            price: self.price,
        }
    }
}

/// Formats a list of albums as `[{..} {..}]`.
pub fn format_albums(albums: &[Album]) -> String {
    let items = albums
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(" ");
    format!("[{items}]")
}

/// Field name reported when a draft is incomplete.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlbumField {
    Title,
    Artist,
    Price,
}

impl AlbumField {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Title => "title",
            Self::Artist => "artist",
            Self::Price => "price",
        }
    }
}

impl Display for AlbumField {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DraftError {
    MissingField(AlbumField),
}

impl Display for DraftError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingField(field) => write!(f, "album draft is missing `{field}`"),
        }
    }
}

impl Error for DraftError {}

/// Builder collecting album fields by name.
///
/// Setters may be called in any order; `build` checks that every field was
/// provided exactly as named, so a swapped read order cannot silently put the
/// artist into the title.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AlbumDraft {
    title: Option<String>,
    artist: Option<String>,
    price: Option<f64>,
}

impl AlbumDraft {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn title(&mut self, title: impl Into<String>) -> &mut Self {
        self.title = Some(title.into());
        self
    }

    pub fn artist(&mut self, artist: impl Into<String>) -> &mut Self {
        self.artist = Some(artist.into());
        self
    }

    pub fn price(&mut self, price: f64) -> &mut Self {
        self.price = Some(price);
        self
    }

    /// # Errors
    /// - `DraftError::MissingField` when any field was never set.
    pub fn build(&self) -> Result<NewAlbum, DraftError> {
        let title = self
            .title
            .clone()
            .ok_or(DraftError::MissingField(AlbumField::Title))?;
        let artist = self
            .artist
            .clone()
            .ok_or(DraftError::MissingField(AlbumField::Artist))?;
        let price = self
            .price
            .ok_or(DraftError::MissingField(AlbumField::Price))?;
        Ok(NewAlbum {
            title,
            artist,
            price,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::{format_albums, Album, AlbumDraft, AlbumField, DraftError, NewAlbum};

    fn blue_train() -> Album {
        NewAlbum::new("Blue Train", "John Coltrane", 56.99).with_id(1)
    }

    #[test]
    fn album_display_matches_console_format() {
        assert_eq!(blue_train().to_string(), "{1 Blue Train John Coltrane 56.99}");
    }

    #[test]
    fn format_albums_wraps_in_brackets() {
        assert_eq!(format_albums(&[]), "[]");

        let giant_steps = NewAlbum::new("Giant Steps", "John Coltrane", 63.99).with_id(2);
        assert_eq!(
            format_albums(&[blue_train(), giant_steps]),
            "[{1 Blue Train John Coltrane 56.99} {2 Giant Steps John Coltrane 63.99}]"
        );
    }

    #[test]
    fn draft_setters_are_order_independent() {
        let mut draft = AlbumDraft::new();
        draft.price(49.99).artist("John Coltrane").title("A Love Supreme");

        let album = draft.build().expect("complete draft should build");
        assert_eq!(album, NewAlbum::new("A Love Supreme", "John Coltrane", 49.99));
    }

    #[test]
    fn draft_reports_first_missing_field() {
        let mut draft = AlbumDraft::new();
        assert_eq!(
            draft.build(),
            Err(DraftError::MissingField(AlbumField::Title))
        );

        draft.title("Blue Train");
        assert_eq!(
            draft.build(),
            Err(DraftError::MissingField(AlbumField::Artist))
        );

        draft.artist("John Coltrane");
        assert_eq!(
            draft.build(),
            Err(DraftError::MissingField(AlbumField::Price))
        );
    }

    #[test]
    fn serialized_field_names_match_table_columns() {
        let value = serde_json::to_value(blue_train()).unwrap();
        let mut keys: Vec<&str> = value
            .as_object()
            .unwrap()
            .keys()
            .map(String::as_str)
            .collect();
        keys.sort_unstable();
        assert_eq!(keys, ["artist", "id", "price", "title"]);
    }

    #[test]
    fn to_new_drops_only_the_id() {
        let album = blue_train();
        assert_eq!(album.to_new().with_id(album.id), album);
    }
}
