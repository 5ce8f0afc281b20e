//! Locally hosted sample tracks, keyed by genre, mood and duration.
//!
//! Stands in for a generative music backend: every key maps to one of the
//! `/edm/myedmN.mp3` files under the asset root.

use rand::{Rng, seq::SliceRandom};
use tracing::debug;

/// Tracks offered per target duration (seconds) for EDM.
const EDM_BY_DURATION: &[(u32, &[u8])] = &[
    (60, &[1, 2, 3]),
    (120, &[4, 5, 6]),
    (180, &[7, 8, 9]),
    (240, &[10, 11]),
    (300, &[12, 13]),
    (360, &[1, 7]),
];

const FALLBACK_DURATION: u32 = 180;

/// Tracks offered per mood for every other genre.
const BY_MOOD: &[(&str, &[u8])] = &[
    ("Energetic", &[1, 4, 7]),
    ("Chill", &[2, 5, 8]),
    ("Dark", &[3, 6, 9]),
    ("Uplifting", &[10, 11, 12]),
    ("Mysterious", &[13, 1, 7]),
    ("Romantic", &[2, 8, 5]),
    ("Aggressive", &[3, 9, 6]),
    ("Peaceful", &[2, 5, 8]),
    ("Melancholic", &[4, 7, 10]),
    ("Festive", &[1, 11, 13]),
];

const FALLBACK_MOOD: &str = "Energetic";

/// Remix presets, one fixed track per genre.
const BY_GENRE: &[(&str, u8)] = &[
    ("EDM", 1),
    ("Hip Hop", 2),
    ("Rock", 3),
    ("Pop", 4),
    ("Electronic", 5),
];

pub fn track_path(n: u8) -> String {
    format!("/edm/myedm{}.mp3", n)
}

#[derive(Debug, Clone, Copy, Default)]
pub struct TrackCatalog;

impl TrackCatalog {
    pub fn new() -> Self {
        Self
    }

    /// Track used as the remix base for `genre`; unknown genres get the EDM track.
    pub fn remix_track(&self, genre: &str) -> String {
        let n = BY_GENRE
            .iter()
            .find(|(g, _)| *g == genre)
            .map_or(1, |(_, n)| *n);
        track_path(n)
    }

    pub fn text_to_music_track(&self, genre: &str, mood: &str, duration_secs: u32) -> String {
        self.text_to_music_track_with(genre, mood, duration_secs, &mut rand::thread_rng())
    }

    /// Same as [`Self::text_to_music_track`] with a caller-supplied RNG.
    pub fn text_to_music_track_with<R: Rng + ?Sized>(
        &self,
        genre: &str,
        mood: &str,
        duration_secs: u32,
        rng: &mut R,
    ) -> String {
        let candidates = if genre == "EDM" {
            Self::edm_candidates(duration_secs)
        } else {
            Self::mood_candidates(mood)
        };
        let n = candidates.choose(rng).copied().unwrap_or(1);
        debug!(
            "Catalog pick for genre={} mood={} duration={}s: myedm{}",
            genre, mood, duration_secs, n
        );
        track_path(n)
    }

    fn edm_candidates(duration_secs: u32) -> &'static [u8] {
        let lookup = |d: u32| EDM_BY_DURATION.iter().find(|(k, _)| *k == d).map(|(_, v)| *v);
        lookup(duration_secs)
            .or_else(|| lookup(FALLBACK_DURATION))
            .unwrap_or(&[])
    }

    fn mood_candidates(mood: &str) -> &'static [u8] {
        let lookup = |m: &str| BY_MOOD.iter().find(|(k, _)| *k == m).map(|(_, v)| *v);
        lookup(mood).or_else(|| lookup(FALLBACK_MOOD)).unwrap_or(&[])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn remix_tracks_by_genre() {
        let c = TrackCatalog::new();
        assert_eq!(c.remix_track("Hip Hop"), "/edm/myedm2.mp3");
        assert_eq!(c.remix_track("Electronic"), "/edm/myedm5.mp3");
        assert_eq!(c.remix_track("Polka"), "/edm/myedm1.mp3");
    }

    #[test]
    fn edm_picks_follow_duration_with_fallback() {
        let c = TrackCatalog::new();
        let mut rng = rand::thread_rng();
        for _ in 0..20 {
            let pick = c.text_to_music_track_with("EDM", "Chill", 240, &mut rng);
            assert!(pick == "/edm/myedm10.mp3" || pick == "/edm/myedm11.mp3");

            let fallback = c.text_to_music_track_with("EDM", "Chill", 90, &mut rng);
            assert!(["/edm/myedm7.mp3", "/edm/myedm8.mp3", "/edm/myedm9.mp3"].contains(&fallback.as_str()));
        }
    }

    #[test]
    fn other_genres_pick_by_mood_with_fallback() {
        let c = TrackCatalog::new();
        for _ in 0..20 {
            let dark = c.text_to_music_track("Rock", "Dark", 60);
            assert!(["/edm/myedm3.mp3", "/edm/myedm6.mp3", "/edm/myedm9.mp3"].contains(&dark.as_str()));

            let unknown = c.text_to_music_track("Rock", "Sleepy", 60);
            assert!(["/edm/myedm1.mp3", "/edm/myedm4.mp3", "/edm/myedm7.mp3"].contains(&unknown.as_str()));
        }
    }
}
