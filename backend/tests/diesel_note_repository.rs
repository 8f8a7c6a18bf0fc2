//! Integration tests for `DieselNoteRepository` against embedded PostgreSQL.

use ludivault::domain::ports::{NoteRepository, RepositoryError};
use ludivault::domain::{Game, GameNote, NoteDraft, NoteKind, UserId};
use rstest::{fixture, rstest};

#[expect(dead_code, reason = "each suite uses a different subset of the helpers")]
mod support;

use support::{Library, first_page, page};

#[fixture]
fn library() -> Option<Library> {
    support::library()
}

fn note(lib: &Library, owner: UserId, game: &Game, title: &str, pinned: bool) -> GameNote {
    let draft = NoteDraft::new(game.id(), title, format!("{title} body"), NoteKind::Text, pinned)
        .expect("valid note");
    lib.run(lib.notes().create(draft, owner)).expect("create note")
}

#[rstest]
fn create_keeps_pinned_flag_and_stamps_the_note(library: Option<Library>) {
    let Some(lib) = library else { return };
    let owner = lib.user("alice");
    let platform = lib.platform(owner, "PC");
    let game = lib.game(owner, &platform, "Outer Wilds");

    let draft = NoteDraft::new(
        game.id(),
        "Wiki",
        "https://example.test/outer-wilds",
        NoteKind::Link,
        true,
    )
    .expect("valid note");
    let created = lib.run(lib.notes().create(draft, owner)).expect("create");

    assert!(created.pinned());
    assert_eq!(created.kind(), NoteKind::Link);
    let fetched = lib.run(lib.notes().get(created.id(), owner)).expect("get");
    assert_eq!(fetched, created);
}

#[rstest]
fn notes_on_foreign_games_are_rejected(library: Option<Library>) {
    let Some(lib) = library else { return };
    let alice = lib.user("alice");
    let bob = lib.user("bob");
    let platform = lib.platform(bob, "PC");
    let game = lib.game(bob, &platform, "Inscryption");
    let bobs_note = note(&lib, bob, &game, "Spoilers", false);
    let repo = lib.notes();

    let draft =
        NoteDraft::new(game.id(), "Mine now", "", NoteKind::Text, false).expect("valid note");
    assert_eq!(
        lib.run(repo.create(draft.clone(), alice)),
        Err(RepositoryError::not_found("note"))
    );
    assert_eq!(
        lib.run(repo.update(bobs_note.id(), &draft, alice)),
        Err(RepositoryError::not_found("note"))
    );
    assert_eq!(
        lib.run(repo.get(bobs_note.id(), alice)),
        Err(RepositoryError::not_found("note"))
    );
    assert!(
        lib.run(repo.list_titles(game.id(), alice, first_page()))
            .expect("list")
            .is_empty()
    );
}

#[rstest]
fn titles_list_pinned_first_then_newest(library: Option<Library>) {
    let Some(lib) = library else { return };
    let owner = lib.user("alice");
    let platform = lib.platform(owner, "PC");
    let game = lib.game(owner, &platform, "Factorio");
    let oldest = note(&lib, owner, &game, "Ratios", false);
    let pinned = note(&lib, owner, &game, "Blueprints", true);
    let newest = note(&lib, owner, &game, "Mods", false);

    let titles = lib
        .run(lib.notes().list_titles(game.id(), owner, first_page()))
        .expect("list titles");
    let ids: Vec<_> = titles.iter().map(|summary| summary.id).collect();

    assert_eq!(ids, [pinned.id(), newest.id(), oldest.id()]);
    assert!(titles.iter().all(|summary| summary.game_id == game.id()));

    let rest: Vec<_> = lib
        .run(lib.notes().list_titles(game.id(), owner, page(2, 1)))
        .expect("list second window")
        .iter()
        .map(|summary| summary.id)
        .collect();
    assert_eq!(rest, [newest.id(), oldest.id()]);
}

#[rstest]
fn update_keeps_the_timestamp(library: Option<Library>) {
    let Some(lib) = library else { return };
    let owner = lib.user("alice");
    let platform = lib.platform(owner, "PC");
    let game = lib.game(owner, &platform, "Noita");
    let original = note(&lib, owner, &game, "Seeds", false);
    let repo = lib.notes();

    let draft = NoteDraft::new(game.id(), "Seeds and spells", "updated", NoteKind::Text, true)
        .expect("valid note");
    lib.run(repo.update(original.id(), &draft, owner)).expect("update");

    let fetched = lib.run(repo.get(original.id(), owner)).expect("get");
    assert_eq!(fetched.title(), "Seeds and spells");
    assert_eq!(fetched.value(), "updated");
    assert!(fetched.pinned());
    assert_eq!(fetched.added_on(), original.added_on());
}

#[rstest]
fn delete_is_scoped_to_the_owner(library: Option<Library>) {
    let Some(lib) = library else { return };
    let alice = lib.user("alice");
    let bob = lib.user("bob");
    let platform = lib.platform(alice, "PC");
    let game = lib.game(alice, &platform, "Baba Is You");
    let target = note(&lib, alice, &game, "Level 7", false);
    let repo = lib.notes();

    assert_eq!(
        lib.run(repo.delete(target.id(), bob)),
        Err(RepositoryError::not_found("note"))
    );
    lib.run(repo.delete(target.id(), alice)).expect("delete");
    assert_eq!(
        lib.run(repo.get(target.id(), alice)),
        Err(RepositoryError::not_found("note"))
    );
}
