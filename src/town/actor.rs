use super::error::TownError;
use super::space::{Town, TownSnapshot};
use crate::area::{AreaModel, AreaPrompt};
use crate::event::TownEvent;
use crate::player::{PlayerId, PlayerLocation, PlayerModel};
use tokio::sync::{broadcast, mpsc, oneshot};
use tracing::{info, warn};

/// Requests handled by the task that owns a town
#[derive(Debug)]
pub enum TownCommand {
    Join {
        user_name: String,
        reply: oneshot::Sender<(PlayerModel, TownSnapshot)>,
    },
    Move {
        player_id: PlayerId,
        location: PlayerLocation,
        reply: oneshot::Sender<Result<Option<AreaPrompt>, TownError>>,
    },
    UpdateArea {
        model: AreaModel,
        reply: oneshot::Sender<Result<(), TownError>>,
    },
    ActivateArea {
        model: AreaModel,
        reply: oneshot::Sender<Result<AreaModel, TownError>>,
    },
    GetArea {
        area_id: String,
        reply: oneshot::Sender<Option<AreaModel>>,
    },
    Snapshot {
        reply: oneshot::Sender<TownSnapshot>,
    },
    Leave {
        player_id: PlayerId,
    },
}

/// Cloneable handle to a running town
///
/// All mutations funnel through one mpsc mailbox into the owning task, so a
/// town's areas are only ever touched from a single place. Events produced
/// by each command are published to the broadcast channel in the order the
/// town returned them.
#[derive(Clone, Debug)]
pub struct TownHandle {
    town_id: String,
    commands: mpsc::Sender<TownCommand>,
    events: broadcast::Sender<TownEvent>,
}

impl TownHandle {
    /// Spawn the owning task for `town` on the current runtime
    pub fn spawn(town: Town, command_capacity: usize, event_capacity: usize) -> Self {
        let (commands, rx) = mpsc::channel(command_capacity);
        let (events, _) = broadcast::channel(event_capacity);
        let town_id = town.id().to_string();

        tokio::spawn(run_town(town, rx, events.clone()));

        Self {
            town_id,
            commands,
            events,
        }
    }

    pub fn town_id(&self) -> &str {
        &self.town_id
    }

    /// Subscribe to town events
    pub fn subscribe(&self) -> broadcast::Receiver<TownEvent> {
        self.events.subscribe()
    }

    /// Add a player; returns it together with a snapshot taken right after
    /// the join, consistent with the join's position in the event stream.
    pub async fn join(&self, user_name: &str) -> Result<(PlayerModel, TownSnapshot), TownError> {
        self.request(|reply| TownCommand::Join {
            user_name: user_name.to_string(),
            reply,
        })
        .await
    }

    pub async fn move_player(
        &self,
        player_id: &str,
        location: PlayerLocation,
    ) -> Result<Option<AreaPrompt>, TownError> {
        self.request(|reply| TownCommand::Move {
            player_id: player_id.to_string(),
            location,
            reply,
        })
        .await?
    }

    pub async fn update_area(&self, model: AreaModel) -> Result<(), TownError> {
        self.request(|reply| TownCommand::UpdateArea { model, reply })
            .await?
    }

    pub async fn activate_area(&self, model: AreaModel) -> Result<AreaModel, TownError> {
        self.request(|reply| TownCommand::ActivateArea { model, reply })
            .await?
    }

    pub async fn area(&self, area_id: &str) -> Result<Option<AreaModel>, TownError> {
        self.request(|reply| TownCommand::GetArea {
            area_id: area_id.to_string(),
            reply,
        })
        .await
    }

    pub async fn snapshot(&self) -> Result<TownSnapshot, TownError> {
        self.request(|reply| TownCommand::Snapshot { reply }).await
    }

    /// Remove a player (fire-and-forget)
    pub async fn leave(&self, player_id: &str) -> Result<(), TownError> {
        self.commands
            .send(TownCommand::Leave {
                player_id: player_id.to_string(),
            })
            .await
            .map_err(|_| TownError::Closed)
    }

    async fn request<T>(
        &self,
        build: impl FnOnce(oneshot::Sender<T>) -> TownCommand,
    ) -> Result<T, TownError> {
        let (tx, rx) = oneshot::channel();
        self.commands
            .send(build(tx))
            .await
            .map_err(|_| TownError::Closed)?;
        rx.await.map_err(|_| TownError::Closed)
    }
}

/// Town task loop: applies commands one at a time until every handle is dropped
async fn run_town(
    mut town: Town,
    mut commands: mpsc::Receiver<TownCommand>,
    events: broadcast::Sender<TownEvent>,
) {
    info!(town_id = %town.id(), "Town task started");

    while let Some(command) = commands.recv().await {
        match command {
            TownCommand::Join { user_name, reply } => {
                let (player, emitted) = town.add_player(&user_name);
                publish(&events, emitted);
                let _ = reply.send((player, town.snapshot()));
            }
            TownCommand::Move {
                player_id,
                location,
                reply,
            } => {
                let result = town
                    .update_player_location(&player_id, location)
                    .map(|outcome| {
                        publish(&events, outcome.events);
                        outcome.prompt
                    });
                let _ = reply.send(result);
            }
            TownCommand::UpdateArea { model, reply } => {
                let result = town
                    .apply_area_update(&model)
                    .map(|emitted| publish(&events, emitted));
                let _ = reply.send(result);
            }
            TownCommand::ActivateArea { model, reply } => {
                let result = town.activate_area(&model).map(|emitted| {
                    publish(&events, emitted);
                    town.area(model.id())
                        .map(|area| area.to_model())
                        .unwrap_or(model)
                });
                let _ = reply.send(result);
            }
            TownCommand::GetArea { area_id, reply } => {
                let _ = reply.send(town.area(&area_id).map(|area| area.to_model()));
            }
            TownCommand::Snapshot { reply } => {
                let _ = reply.send(town.snapshot());
            }
            TownCommand::Leave { player_id } => match town.remove_player(&player_id) {
                Ok(emitted) => publish(&events, emitted),
                Err(e) => warn!(player_id = %player_id, error = %e, "Failed to remove player"),
            },
        }
    }

    info!(town_id = %town.id(), "Town task stopped");
}

/// Fan out in order; a send with no subscribers is not an error here
fn publish(events: &broadcast::Sender<TownEvent>, batch: Vec<TownEvent>) {
    for event in batch {
        let _ = events.send(event);
    }
}
