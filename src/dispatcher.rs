use tracing::{debug, info, warn};

use crate::card::{build_comic_card, build_help_card, build_plain_text, Response};
use crate::command::{classify, needs_latest, Command};
use crate::event::{ChatEvent, Space};
use crate::random::RandomSource;
use crate::xkcd::{ComicError, ComicSource};

pub const UNKNOWN_COMMAND_TEXT: &str =
    "Sorry, I don't understand. Type 'help' to see all the valid commands.";
pub const FETCH_FAILED_TEXT: &str = "Something went wrong fetching that comic. Please try again.";

/// xkcd never published a comic 404.
const MISSING_COMIC: u32 = 404;

/// Turns chat events into responses. Holds no per-request state.
pub struct Dispatcher {
    comics: Box<dyn ComicSource>,
    random: Box<dyn RandomSource>,
}

impl Dispatcher {
    pub fn new(comics: Box<dyn ComicSource>, random: Box<dyn RandomSource>) -> Self {
        Self { comics, random }
    }

    pub async fn handle(&self, event: ChatEvent) -> Response {
        match event {
            ChatEvent::SpaceRemoved => {
                info!("Bot removed from a space");
                Response::empty()
            }
            ChatEvent::SpaceAdded(Space::Room { display_name }) => {
                info!("Bot added to room {:?}", display_name);
                build_plain_text(format!(
                    "Thanks for adding me to \"{}\"! Type \"help\" for a full list of commands!",
                    display_name
                ))
            }
            ChatEvent::SpaceAdded(Space::Dm { user_name }) => {
                info!("Bot added to a DM with {:?}", user_name);
                build_plain_text(format!(
                    "Thanks for adding me to a DM, {}! Type \"help\" for a full list of commands!",
                    user_name
                ))
            }
            ChatEvent::SpaceAdded(Space::Other(space_type)) => {
                debug!("Ignoring ADDED_TO_SPACE for space type {:?}", space_type);
                Response::empty()
            }
            ChatEvent::Message { text } => match self.respond_to(&text).await {
                Ok(response) => response,
                Err(e) => {
                    warn!("Failed to answer {:?}: {}", text, e);
                    build_plain_text(FETCH_FAILED_TEXT)
                }
            },
            ChatEvent::Unrecognized { event_type } => {
                debug!("Ignoring event type {:?}", event_type);
                Response::empty()
            }
        }
    }

    async fn respond_to(&self, text: &str) -> Result<Response, ComicError> {
        // help and free text resolve without the latest comic number. They
        // skip the upstream call a fetch-then-classify flow would make, so
        // they still answer while the comic service is down.
        if !needs_latest(text) {
            return Ok(match classify(text, 0) {
                Command::Help => build_help_card(),
                _ => build_plain_text(UNKNOWN_COMMAND_TEXT),
            });
        }

        let latest = self.comics.fetch_latest().await?;
        let command = classify(text, latest.number);
        debug!("Classified {:?} as {:?}", text, command);

        let response = match command {
            Command::Latest => build_comic_card(&latest),
            Command::Random => {
                let number = self.pick_random(latest.number);
                build_comic_card(&self.comics.fetch_by_number(number).await?)
            }
            Command::Numbered(n) => build_comic_card(&self.comics.fetch_by_number(n).await?),
            Command::Help => build_help_card(),
            Command::Unknown(_) => build_plain_text(UNKNOWN_COMMAND_TEXT),
        };

        Ok(response)
    }

    /// Uniform over published comics in `1..=latest`, skipping 404.
    fn pick_random(&self, latest: u32) -> u32 {
        if latest < MISSING_COMIC {
            return self.random.pick(latest);
        }
        let n = self.random.pick(latest - 1);
        if n >= MISSING_COMIC {
            n + 1
        } else {
            n
        }
    }
}
