//! Integration tests for `DieselPlatformRepository` against embedded
//! PostgreSQL.

use ludivault::domain::ports::{GameRepository, PlatformRepository, RepositoryError};
use ludivault::domain::{AssignId, Page, PlatformDraft, PlatformId};
use rstest::{fixture, rstest};

#[expect(dead_code, reason = "each suite uses a different subset of the helpers")]
mod support;

use support::{Library, first_page};

#[fixture]
fn library() -> Option<Library> {
    support::library()
}

#[rstest]
fn create_then_get_round_trips(library: Option<Library>) {
    let Some(lib) = library else { return };
    let owner = lib.user("alice");

    let created = lib.platform(owner, "Nintendo Switch");
    let fetched = lib
        .run(lib.platforms().get(created.id(), owner))
        .expect("platform visible to owner");

    assert_eq!(fetched, created);
    assert_eq!(fetched.short_name(), "PLT");
}

#[rstest]
fn other_users_cannot_see_or_touch_a_platform(library: Option<Library>) {
    let Some(lib) = library else { return };
    let owner = lib.user("alice");
    let intruder = lib.user("mallory");
    let platform = lib.platform(owner, "PlayStation 5");
    let repo = lib.platforms();

    let get = lib.run(repo.get(platform.id(), intruder));
    let renamed = PlatformDraft::new("Stolen", "X")
        .expect("valid draft")
        .assign_id(platform.id());
    let update = lib.run(repo.update(&renamed, intruder));
    let delete = lib.run(repo.delete(platform.id(), intruder));
    let listed = lib.run(repo.list(intruder, first_page())).expect("list");

    assert_eq!(get, Err(RepositoryError::not_found("platform")));
    assert_eq!(update, Err(RepositoryError::not_found("platform")));
    assert_eq!(delete, Err(RepositoryError::not_found("platform")));
    assert!(listed.is_empty());
    assert_eq!(
        lib.run(repo.get(platform.id(), owner)).expect("still there"),
        platform
    );
}

#[rstest]
fn duplicate_names_conflict_per_owner(library: Option<Library>) {
    let Some(lib) = library else { return };
    let alice = lib.user("alice");
    let bob = lib.user("bob");
    lib.platform(alice, "Steam Deck");

    let again = PlatformDraft::new("Steam Deck", "SD").expect("valid draft");
    let duplicate = lib.run(lib.platforms().create(again.clone(), alice));
    assert!(matches!(duplicate, Err(RepositoryError::Conflict { .. })));

    let other_owner = lib.run(lib.platforms().create(again, bob));
    assert!(other_owner.is_ok(), "names are only unique per owner");
}

#[rstest]
fn list_is_ordered_by_name_and_paged(library: Option<Library>) {
    let Some(lib) = library else { return };
    let owner = lib.user("alice");
    for name in ["Xbox", "Amiga", "Game Boy"] {
        lib.platform(owner, name);
    }
    let repo = lib.platforms();

    let all = lib.run(repo.list(owner, first_page())).expect("list");
    let names: Vec<_> = all.iter().map(|platform| platform.name()).collect();
    assert_eq!(names, ["Amiga", "Game Boy", "Xbox"]);

    let page = Page::new(Some(1), Some(1)).expect("valid page");
    let second = lib.run(repo.list(owner, page)).expect("list page");
    assert_eq!(second.len(), 1);
    assert_eq!(second.first().map(|platform| platform.name()), Some("Game Boy"));
}

#[rstest]
fn update_replaces_fields(library: Option<Library>) {
    let Some(lib) = library else { return };
    let owner = lib.user("alice");
    let platform = lib.platform(owner, "Switch");
    let repo = lib.platforms();

    let renamed = PlatformDraft::new("Nintendo Switch", "NSW")
        .expect("valid draft")
        .assign_id(platform.id());
    lib.run(repo.update(&renamed, owner)).expect("update");

    let fetched = lib.run(repo.get(platform.id(), owner)).expect("get");
    assert_eq!(fetched.name(), "Nintendo Switch");
    assert_eq!(fetched.short_name(), "NSW");
}

#[rstest]
fn platform_with_games_cannot_be_deleted(library: Option<Library>) {
    let Some(lib) = library else { return };
    let owner = lib.user("alice");
    let platform = lib.platform(owner, "GameCube");
    let game = lib.game(owner, &platform, "Metroid Prime");
    let repo = lib.platforms();

    let blocked = lib.run(repo.delete(platform.id(), owner));
    assert!(matches!(blocked, Err(RepositoryError::Conflict { .. })));

    lib.run(lib.games().delete(game.id(), owner)).expect("delete game");
    lib.run(repo.delete(platform.id(), owner)).expect("delete platform");
    assert_eq!(
        lib.run(repo.get(platform.id(), owner)),
        Err(RepositoryError::not_found("platform"))
    );
}

#[rstest]
fn missing_platform_is_not_found(library: Option<Library>) {
    let Some(lib) = library else { return };
    let owner = lib.user("alice");

    let result = lib.run(lib.platforms().delete(PlatformId::random(), owner));
    assert_eq!(result, Err(RepositoryError::not_found("platform")));
}
