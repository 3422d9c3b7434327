use rand::Rng;
use tracing::{error, info};

use super::builder::{ShowBuilder, StepResult};
use super::picker::{PickError, Picker};
use super::show::{Episode, Show};
use super::store::{StoreError, WatchStore};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Input {
    Up,
    Down,
    Enter,
    Backspace,
    Char(char),
    Interrupt,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Control {
    Continue,
    Quit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Choice {
    Watched,
    Later,
}

impl Choice {
    pub(crate) fn toggle(self) -> Self {
        match self {
            Self::Watched => Self::Later,
            Self::Later => Self::Watched,
        }
    }
}

/// "Add show" sits at cursor 0; shows follow from cursor 1.
#[derive(Debug)]
pub(crate) struct Menu {
    pub(crate) entries: Vec<Show>,
    pub(crate) cursor: usize,
}

impl Menu {
    fn from_shows(shows: Vec<Show>) -> Self {
        let entries: Vec<Show> = shows.into_iter().filter(|show| !show.deleted).collect();
        let cursor = if entries.is_empty() { 0 } else { 1 };
        Self { entries, cursor }
    }

    pub(crate) fn len(&self) -> usize {
        self.entries.len() + 1
    }

    fn next(&mut self) {
        self.cursor = (self.cursor + 1) % self.len();
    }

    fn previous(&mut self) {
        self.cursor = match self.cursor {
            0 => self.len() - 1,
            n => n - 1,
        };
    }

    pub(crate) fn selected(&self) -> Option<&Show> {
        self.cursor.checked_sub(1).and_then(|idx| self.entries.get(idx))
    }

    fn selected_mut(&mut self) -> Option<&mut Show> {
        self.cursor
            .checked_sub(1)
            .and_then(|idx| self.entries.get_mut(idx))
    }
}

#[derive(Debug)]
pub(crate) enum Stage {
    Menu,
    AddShow {
        builder: ShowBuilder,
        prompt: String,
        input: String,
    },
    Result {
        show: Show,
        outcome: Result<Episode, PickError>,
        choice: Choice,
    },
}

pub(crate) struct FlowController<'a, S: ?Sized, R> {
    store: &'a S,
    picker: Picker,
    rng: R,
    menu: Menu,
    stage: Stage,
    status: String,
}

impl<'a, S, R> FlowController<'a, S, R>
where
    S: WatchStore + ?Sized,
    R: Rng,
{
    pub(crate) fn new(store: &'a S, picker: Picker, rng: R) -> Result<Self, StoreError> {
        let menu = Menu::from_shows(store.list_shows()?);
        let status = if menu.entries.is_empty() {
            status_info("No shows yet. Choose \"Add show\" to create one.")
        } else {
            status_info("Ready.")
        };
        Ok(Self {
            store,
            picker,
            rng,
            menu,
            stage: Stage::Menu,
            status,
        })
    }

    pub(crate) fn menu(&self) -> &Menu {
        &self.menu
    }

    pub(crate) fn stage(&self) -> &Stage {
        &self.stage
    }

    pub(crate) fn status(&self) -> &str {
        &self.status
    }

    pub(crate) fn handle(&mut self, input: Input) -> Control {
        if input == Input::Interrupt {
            return Control::Quit;
        }
        match self.stage {
            Stage::Menu => self.handle_menu(input),
            Stage::AddShow { .. } => {
                self.handle_add_show(input);
                Control::Continue
            }
            Stage::Result { .. } => self.handle_result(input),
        }
    }

    fn handle_menu(&mut self, input: Input) -> Control {
        match input {
            Input::Char('q') => return Control::Quit,
            Input::Down | Input::Char('j') => self.menu.next(),
            Input::Up | Input::Char('k') => self.menu.previous(),
            Input::Enter => self.confirm_menu(),
            Input::Char('d') => self.set_selected_deleted(true),
            Input::Char('u') => self.set_selected_deleted(false),
            _ => {}
        }
        Control::Continue
    }

    fn confirm_menu(&mut self) {
        let Some(selected) = self.menu.selected() else {
            // Soft-deleted shows still own their names.
            let known_names = match self.store.list_shows() {
                Ok(shows) => shows.into_iter().map(|show| show.name).collect(),
                Err(err) => {
                    error!(error = %err, "failed to read show names");
                    self.status = status_error(&format!("Reading shows failed: {err}"));
                    return;
                }
            };
            let builder = ShowBuilder::new(known_names);
            let prompt = builder.prompt();
            self.stage = Stage::AddShow {
                builder,
                prompt,
                input: String::new(),
            };
            self.status = status_info("Type a value and press Enter.");
            return;
        };
        if selected.deleted {
            self.status = status_info(&format!(
                "{} is deleted. Press u to restore it first.",
                selected.name
            ));
            return;
        }

        let show = selected.clone();
        let outcome = self.picker.pick(self.store, &show, &mut self.rng);
        self.status = match &outcome {
            Ok(episode) => status_info(&format!("{}: {episode}", show.name)),
            Err(PickError::Store(err)) => {
                error!(show = %show.name, error = %err, "episode lookup failed");
                status_error(&format!("Lookup failed for {}: {err}", show.name))
            }
            Err(err) => status_info(&format!("{}: {err}", show.name)),
        };
        self.stage = Stage::Result {
            show,
            outcome,
            choice: Choice::Watched,
        };
    }

    fn set_selected_deleted(&mut self, deleted: bool) {
        let store = self.store;
        let Some(selected) = self.menu.selected_mut() else {
            return;
        };
        if selected.deleted == deleted {
            return;
        }

        let name = selected.name.clone();
        let result = if deleted {
            store.soft_delete_show(&name)
        } else {
            store.restore_show(&name)
        };
        match result {
            Ok(()) => {
                selected.deleted = deleted;
                self.status = if deleted {
                    status_info(&format!("Deleted {name}. Press u to undo."))
                } else {
                    status_info(&format!("Restored {name}."))
                };
            }
            Err(err) => {
                error!(show = %name, error = %err, deleted, "failed to update show");
                let verb = if deleted { "Delete" } else { "Restore" };
                self.status = status_error(&format!("{verb} failed for {name}: {err}"));
            }
        }
    }

    fn handle_add_show(&mut self, input: Input) {
        let Stage::AddShow {
            builder,
            prompt,
            input: buffer,
        } = &mut self.stage
        else {
            return;
        };

        match input {
            Input::Char(c) => buffer.push(c),
            Input::Backspace => {
                buffer.pop();
            }
            Input::Enter => match builder.submit(self.store, buffer) {
                Ok(StepResult::NeedsMore(next)) => {
                    *prompt = next;
                    buffer.clear();
                    self.status = status_info("Type a value and press Enter.");
                }
                Ok(StepResult::Rejected(reason)) => {
                    self.status = status_info(&reason);
                }
                Ok(StepResult::Complete(show)) => self.finish_add(show),
                Err(StoreError::DuplicateShow(name)) => {
                    self.stage = Stage::Menu;
                    self.status = status_error(&format!(
                        "A show named '{name}' already exists. Nothing was added."
                    ));
                }
                Err(err) => {
                    self.status = status_error(&format!("Saving show failed: {err}"));
                }
            },
            _ => {}
        }
    }

    fn finish_add(&mut self, show: Show) {
        self.stage = Stage::Menu;
        match self.store.list_shows() {
            Ok(shows) => {
                self.menu = Menu::from_shows(shows);
                if let Some(idx) = self
                    .menu
                    .entries
                    .iter()
                    .position(|entry| entry.name == show.name)
                {
                    self.menu.cursor = idx + 1;
                }
                info!(show = %show.name, episodes = show.episode_count(), "added show");
                self.status = status_info(&format!("Added {}.", show.name));
            }
            Err(err) => {
                error!(error = %err, "failed to reload shows");
                self.menu.entries.push(show.clone());
                self.menu.cursor = self.menu.entries.len();
                self.status =
                    status_error(&format!("Added {} but reloading shows failed: {err}", show.name));
            }
        }
    }

    fn handle_result(&mut self, input: Input) -> Control {
        let Stage::Result {
            show,
            outcome,
            choice,
        } = &mut self.stage
        else {
            return Control::Continue;
        };

        match input {
            Input::Char('q') => return Control::Quit,
            Input::Up | Input::Down | Input::Char('j') | Input::Char('k') => {
                *choice = choice.toggle();
            }
            Input::Enter => {
                let watched = match (&*outcome, *choice) {
                    (Ok(episode), Choice::Watched) => Some(*episode),
                    _ => None,
                };
                match watched {
                    Some(episode) => match self.store.mark_watched(&show.name, episode.number) {
                        Ok(()) => {
                            self.status =
                                status_info(&format!("Marked {} {episode} as watched.", show.name));
                            self.stage = Stage::Menu;
                        }
                        Err(err) => {
                            error!(show = %show.name, number = episode.number, error = %err, "failed to record watch");
                            self.status = status_error(&format!("Recording watch failed: {err}"));
                        }
                    },
                    None => {
                        self.status = status_info("Back to menu.");
                        self.stage = Stage::Menu;
                    }
                }
            }
            _ => {}
        }
        Control::Continue
    }
}

pub(crate) fn status_info(msg: &str) -> String {
    format!("INFO: {msg}")
}

pub(crate) fn status_error(msg: &str) -> String {
    format!("ERROR: {msg}")
}
