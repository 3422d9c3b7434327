use tracing::warn;

use super::show::Show;
use super::store::{StoreError, WatchStore};

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum StepResult {
    NeedsMore(String),
    Complete(Show),
    Rejected(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Field {
    Name,
    SeasonCount,
    SeasonLength(usize),
}

/// Collects a new show one value at a time: name, season count, then one
/// length per season. Persists exactly once, when the last length arrives;
/// the builder is spent after it returns `Complete`.
#[derive(Debug)]
pub(crate) struct ShowBuilder {
    known_names: Vec<String>,
    name: String,
    season_count: usize,
    season_lengths: Vec<u32>,
    field: Field,
}

impl ShowBuilder {
    pub(crate) fn new(known_names: Vec<String>) -> Self {
        Self {
            known_names,
            name: String::new(),
            season_count: 0,
            season_lengths: Vec::new(),
            field: Field::Name,
        }
    }

    pub(crate) fn prompt(&self) -> String {
        match self.field {
            Field::Name => "Show name: ".to_string(),
            Field::SeasonCount => "Season count: ".to_string(),
            Field::SeasonLength(idx) => format!("Season {} length: ", idx + 1),
        }
    }

    pub(crate) fn submit<S>(&mut self, store: &S, raw: &str) -> Result<StepResult, StoreError>
    where
        S: WatchStore + ?Sized,
    {
        let value = raw.trim();
        if value.is_empty() {
            return Ok(StepResult::Rejected("Enter a value.".to_string()));
        }

        match self.field {
            Field::Name => {
                if self.known_names.iter().any(|known| known == value) {
                    return Ok(StepResult::Rejected(format!(
                        "A show named '{value}' already exists."
                    )));
                }
                self.name = value.to_string();
                self.field = Field::SeasonCount;
            }
            Field::SeasonCount => {
                let Some(count) = parse_positive(value) else {
                    return Ok(rejected_number(value));
                };
                self.season_count = count as usize;
                self.field = Field::SeasonLength(0);
            }
            Field::SeasonLength(idx) => {
                let Some(len) = parse_positive(value) else {
                    return Ok(rejected_number(value));
                };
                let total = self
                    .season_lengths
                    .iter()
                    .try_fold(len, |total, prior| total.checked_add(*prior));
                if total.is_none() {
                    return Ok(StepResult::Rejected(format!(
                        "Season {} length {len} pushes the episode total past {}.",
                        idx + 1,
                        u32::MAX
                    )));
                }
                if idx + 1 < self.season_count {
                    self.season_lengths.push(len);
                    self.field = Field::SeasonLength(idx + 1);
                } else {
                    let mut season_lengths = self.season_lengths.clone();
                    season_lengths.push(len);
                    let show = Show::new(self.name.clone(), season_lengths);
                    if let Err(err) = store.create_show(&show) {
                        warn!(show = %show.name, error = %err, "failed to save new show");
                        return Err(err);
                    }
                    return Ok(StepResult::Complete(show));
                }
            }
        }

        Ok(StepResult::NeedsMore(self.prompt()))
    }
}

fn parse_positive(value: &str) -> Option<u32> {
    value.parse::<u32>().ok().filter(|n| *n > 0)
}

fn rejected_number(value: &str) -> StepResult {
    StepResult::Rejected(format!("'{value}' is not a positive whole number."))
}
