use albums_core::{
    open_db_in_memory, open_store, Album, AlbumRepository, Credentials, NewAlbum,
    SqliteAlbumStore, StoreConfig, StoreError,
};
use rusqlite::Connection;

fn seeded_store() -> SqliteAlbumStore {
    let store = SqliteAlbumStore::new(open_db_in_memory().unwrap());
    for album in [
        NewAlbum::new("Blue Train", "John Coltrane", 56.99),
        NewAlbum::new("Giant Steps", "John Coltrane", 63.99),
        NewAlbum::new("Jeru", "Gerry Mulligan", 17.99),
        NewAlbum::new("Sarah Vaughan", "Sarah Vaughan", 34.98),
    ] {
        store.add_album(&album).unwrap();
    }
    store
}

#[test]
fn albums_by_artist_returns_exact_matches_in_id_order() {
    let store = seeded_store();

    let albums = store.albums_by_artist("John Coltrane").unwrap();
    let titles: Vec<&str> = albums.iter().map(|album| album.title.as_str()).collect();
    assert_eq!(titles, ["Blue Train", "Giant Steps"]);
    assert!(albums.windows(2).all(|pair| pair[0].id < pair[1].id));
}

#[test]
fn albums_by_artist_without_matches_is_empty_not_error() {
    let store = seeded_store();

    assert!(store.albums_by_artist("Miles Davis").unwrap().is_empty());
    assert!(store.albums_by_artist("john coltrane").unwrap().is_empty());
    assert!(store.albums_by_artist("John").unwrap().is_empty());
}

#[test]
fn artist_filter_is_bound_as_parameter() {
    let store = seeded_store();

    let injected = store.albums_by_artist("x' OR '1'='1").unwrap();
    assert!(injected.is_empty());
}

#[test]
fn added_album_roundtrips_through_album_by_id() {
    let store = seeded_store();
    let new_album = NewAlbum::new("A Love Supreme", "John Coltrane", 49.99);

    let id = store.add_album(&new_album).unwrap();
    assert!(id > 0);

    let loaded = store.album_by_id(id).unwrap();
    assert_eq!(loaded, new_album.with_id(id));
}

#[test]
fn add_album_assigns_fresh_unique_ids() {
    let store = seeded_store();
    let album = NewAlbum::new("Ballads", "John Coltrane", 12.5);

    let first = store.add_album(&album).unwrap();
    let second = store.add_album(&album).unwrap();
    assert_ne!(first, second);
    assert_eq!(store.album_by_id(first).unwrap().title, "Ballads");
    assert_eq!(store.album_by_id(second).unwrap().title, "Ballads");
}

#[test]
fn album_by_id_reads_seeded_row() {
    let store = seeded_store();

    let album = store.album_by_id(1).unwrap();
    assert_eq!(
        album,
        Album {
            id: 1,
            title: "Blue Train".to_string(),
            artist: "John Coltrane".to_string(),
            price: 56.99,
        }
    );
}

#[test]
fn missing_id_is_not_found_specialization() {
    let store = seeded_store();

    let err = store.album_by_id(999).unwrap_err();
    assert!(matches!(err, StoreError::NotFound(999)));
    assert!(err.is_not_found());
    assert!(err.is_query_failure());
}

/// File-backed store whose `album` table was dropped by another connection.
fn store_without_table(dir: &tempfile::TempDir) -> SqliteAlbumStore {
    let config = StoreConfig {
        credentials: Credentials::default(),
        db_path: dir.path().join("albums.sqlite3"),
    };
    let store = open_store(&config).unwrap();
    store
        .add_album(&NewAlbum::new("Blue Train", "John Coltrane", 56.99))
        .unwrap();

    let admin = Connection::open(&config.db_path).unwrap();
    admin.execute_batch("DROP TABLE album;").unwrap();
    drop(admin);
    store
}

#[test]
fn query_against_missing_table_is_query_error() {
    let dir = tempfile::tempdir().unwrap();
    let store = store_without_table(&dir);

    let err = store.albums_by_artist("John Coltrane").unwrap_err();
    assert!(matches!(err, StoreError::Query(_)));
    assert!(!err.is_not_found());

    let err = store.album_by_id(1).unwrap_err();
    assert!(matches!(err, StoreError::Query(_)));
}

#[test]
fn insert_failure_is_write_error() {
    let dir = tempfile::tempdir().unwrap();
    let store = store_without_table(&dir);

    let err = store
        .add_album(&NewAlbum::new("Lush Life", "John Coltrane", 20.0))
        .unwrap_err();
    assert!(matches!(err, StoreError::Write(_)));
    assert!(!err.is_query_failure());
}

#[test]
fn close_releases_connection() {
    let store = seeded_store();
    store.close().unwrap();
}
