// Paths are relative to the configured base URL.

use crate::analysis::player_stats::PlayerId;

pub const HEROES: &str = "/heroes";

pub fn player(id: PlayerId) -> String {
    format!("/players/{}", id)
}

pub fn player_win_loss(id: PlayerId) -> String {
    format!("/players/{}/wl", id)
}

pub fn player_heroes(id: PlayerId) -> String {
    format!("/players/{}/heroes", id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn player_paths_embed_the_account_id() {
        let id = PlayerId::parse("86745912").unwrap();
        assert_eq!(player(id), "/players/86745912");
        assert_eq!(player_win_loss(id), "/players/86745912/wl");
        assert_eq!(player_heroes(id), "/players/86745912/heroes");
    }
}
