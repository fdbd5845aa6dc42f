use musiclib_core::{
    Artist, ArtistGateway, ArtistRepository, Repository, SqliteArtistDao,
    SqliteConnectionProvider,
};

fn repository() -> ArtistRepository<SqliteArtistDao> {
    let dao = SqliteArtistDao::new(SqliteConnectionProvider::open_in_memory().unwrap());
    dao.create_table().unwrap();
    ArtistRepository::new(dao)
}

#[test]
fn add_assigns_the_generated_id_in_place() {
    let repository = repository();

    let mut artist = Artist::new("Repo Artist");
    let id = repository.add(&mut artist).unwrap().expect("add should succeed");

    assert_eq!(id, 1);
    assert_eq!(artist.id, Some(1));
    assert!(artist.is_persisted());
}

#[test]
fn add_refuses_an_artist_without_a_name() {
    let repository = repository();

    let mut artist = Artist { id: None, name: None };
    assert_eq!(repository.add(&mut artist).unwrap(), None);
    assert_eq!(artist.id, None);
    assert!(repository.get_all().unwrap().is_empty());
}

#[test]
fn create_then_get_by_id_returns_an_equal_entity() {
    let repository = repository();

    let mut artist = Artist::new("Sun Ra");
    repository.add(&mut artist).unwrap();

    let found = repository
        .get_by_id(artist.id.unwrap())
        .unwrap()
        .expect("artist should be found");
    assert_eq!(found, artist);
}

#[test]
fn get_by_id_for_absent_id_is_none_not_an_error() {
    let repository = repository();
    assert!(repository.get_by_id(12345).unwrap().is_none());
}

#[test]
fn get_by_name_finds_the_persisted_entity() {
    let repository = repository();

    let mut artist = Artist::new("Fela Kuti");
    repository.add(&mut artist).unwrap();

    let found = repository.get_by_name("Fela Kuti").unwrap().unwrap();
    assert_eq!(found.id, artist.id);
    assert!(repository.get_by_name("Nobody").unwrap().is_none());
}

#[test]
fn update_requires_id_and_name() {
    let repository = repository();

    let unsaved = Artist::new("Unsaved");
    assert_eq!(repository.update(&unsaved).unwrap(), 0);

    let nameless = Artist { id: Some(1), name: None };
    assert_eq!(repository.update(&nameless).unwrap(), 0);
}

#[test]
fn update_of_missing_id_affects_zero_rows_and_creates_nothing() {
    let repository = repository();

    let ghost = Artist::with_id(77, Some("Ghost".to_string()));
    assert_eq!(repository.update(&ghost).unwrap(), 0);
    assert!(repository.get_all().unwrap().is_empty());
}

#[test]
fn delete_twice_reports_progress_exactly_once() {
    let repository = repository();

    let mut artist = Artist::new("Ephemeral");
    repository.add(&mut artist).unwrap();
    let id = artist.id.unwrap();

    assert!(repository.delete(id).unwrap() > 0);
    assert_eq!(repository.delete(id).unwrap(), 0);
}

#[test]
fn get_all_contains_exactly_the_added_entities_in_order() {
    let repository = repository();

    let mut first = Artist::new("First");
    let mut second = Artist::new("Second");
    repository.add(&mut first).unwrap();
    repository.add(&mut second).unwrap();

    let all = repository.get_all().unwrap();
    assert_eq!(all, vec![first, second]);
}

// The end-to-end sequence from the original console walkthrough.
#[test]
fn add_update_get_delete_scenario() {
    let repository = repository();

    let mut artist = Artist::new("Repo Artist");
    let id = repository.add(&mut artist).unwrap().unwrap();
    assert_eq!(id, 1);

    artist.name = Some("Updated Repo Artist".to_string());
    assert!(repository.update(&artist).unwrap() >= 1);

    let updated = repository.get_by_id(id).unwrap().unwrap();
    assert_eq!(updated.name.as_deref(), Some("Updated Repo Artist"));

    assert!(repository.delete(id).unwrap() >= 1);
    assert!(repository.get_by_id(id).unwrap().is_none());
}
