//! Row-level ownership predicates spliced into SQL at compile time.
//!
//! Every statement that reads, changes or removes a row carries one of these
//! predicates, so selecting and authorising happen in a single round trip.
//! Both macros expand to string literals for use inside `concat!`.

/// `<table>.user_id = $<param>`: the row names its owner.
macro_rules! owned_directly {
    ($table:literal, $param:literal) => {
        concat!($table, ".user_id = $", $param)
    };
}

/// The row's game belongs to the user bound at `$<param>`.
macro_rules! owned_via_game {
    ($table:literal, $param:literal) => {
        concat!(
            "exists (select 1 from games owner where owner.id = ",
            $table,
            ".game_id and owner.user_id = $",
            $param,
            ")"
        )
    };
}

pub(crate) use owned_directly;
pub(crate) use owned_via_game;

#[cfg(test)]
mod tests {
    use rstest::rstest;

    #[rstest]
    fn direct_ownership_compares_the_owner_column() {
        assert_eq!(owned_directly!("platforms", 2), "platforms.user_id = $2");
    }

    #[rstest]
    fn transitive_ownership_correlates_with_games() {
        assert_eq!(
            owned_via_game!("game_notes", 1),
            "exists (select 1 from games owner where owner.id = game_notes.game_id \
             and owner.user_id = $1)"
        );
    }
}
