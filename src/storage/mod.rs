mod db;
mod stats;

pub use db::Database;
pub use stats::recent_tracks;
pub use stats::top_artist;
pub use stats::top_genre;
pub use stats::total_listening_time;
