pub mod matchups;
pub mod pro_players;
pub mod rostered_players;
pub mod scorings;

pub use matchups::extract_matchups;
pub use pro_players::extract_pro_player_scorings;
pub use rostered_players::collect_rostered_players;
pub use scorings::extract_scorings;
