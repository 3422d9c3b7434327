use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Show {
    pub(crate) name: String,
    pub(crate) season_lengths: Vec<u32>,
    pub(crate) deleted: bool,
}

impl Show {
    pub(crate) fn new(name: impl Into<String>, season_lengths: Vec<u32>) -> Self {
        Self {
            name: name.into(),
            season_lengths,
            deleted: false,
        }
    }

    pub(crate) fn episode_count(&self) -> u32 {
        self.season_lengths.iter().sum()
    }

    pub(crate) fn season_count(&self) -> usize {
        self.season_lengths.len()
    }

    pub(crate) fn episode(&self, number: u32) -> Option<Episode> {
        let (season, episode) = locate(number, &self.season_lengths)?;
        Some(Episode {
            number,
            season,
            episode,
        })
    }
}

/// A single installment, addressed both by its flat number and by its
/// 1-based season / episode-within-season position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Episode {
    pub(crate) number: u32,
    pub(crate) season: u32,
    pub(crate) episode: u32,
}

impl fmt::Display for Episode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Season {}, episode {}", self.season, self.episode)
    }
}

/// Maps a flat episode number onto `(season, episode_in_season)`, both 1-based.
///
/// Returns `None` when `number` is not below the total of `season_lengths`.
pub(crate) fn locate(number: u32, season_lengths: &[u32]) -> Option<(u32, u32)> {
    let mut remainder = number;
    for (idx, &len) in season_lengths.iter().enumerate() {
        if remainder < len {
            return Some((idx as u32 + 1, remainder + 1));
        }
        remainder -= len;
    }
    None
}

pub(crate) fn encode_season_lengths(season_lengths: &[u32]) -> String {
    season_lengths.iter().map(|len| format!("{len},")).collect()
}

pub(crate) fn decode_season_lengths(raw: &str) -> Option<Vec<u32>> {
    let mut lengths = Vec::new();
    for piece in raw.split(',') {
        let piece = piece.trim();
        if piece.is_empty() {
            continue;
        }
        let len = piece.parse::<u32>().ok().filter(|len| *len > 0)?;
        lengths.push(len);
    }
    lengths
        .iter()
        .try_fold(0u32, |total, len| total.checked_add(*len))?;
    (!lengths.is_empty()).then_some(lengths)
}
