use crate::event::TownEvent;
use crate::player::PlayerId;
use crate::subscription::protocol::{ClientMessage, ServerMessage};
use crate::town::{TownHandle, TownSnapshot};
use axum::extract::ws::{Message, WebSocket};
use tokio::sync::broadcast;
use tracing::{debug, error, info, warn};

/// Holds back broadcast events until the player's own `playerJoined`
///
/// Everything published before the join is already part of the snapshot
/// the client received with `initialize`.
#[derive(Debug, Clone)]
pub struct JoinGate {
    player_id: PlayerId,
    open: bool,
}

impl JoinGate {
    pub fn new(player_id: &str) -> Self {
        Self {
            player_id: player_id.to_string(),
            open: false,
        }
    }

    /// Whether `event` should reach the client; opens on the player's join
    pub fn admit(&mut self, event: &TownEvent) -> bool {
        if self.open {
            return true;
        }
        if let TownEvent::PlayerJoined(player) = event {
            if player.id == self.player_id {
                self.open = true;
            }
        }
        false
    }

    /// Admit everything from now on
    pub fn open(&mut self) {
        self.open = true;
    }

    pub fn is_open(&self) -> bool {
        self.open
    }
}

/// Manages a single WebSocket connection for one player
pub struct ConnectionManager {
    player_id: PlayerId,
    town: TownHandle,
    gate: JoinGate,
}

impl ConnectionManager {
    pub fn new(player_id: PlayerId, town: TownHandle) -> Self {
        let gate = JoinGate::new(&player_id);
        Self {
            player_id,
            town,
            gate,
        }
    }

    /// Handle WebSocket connection lifecycle
    ///
    /// `events_rx` must have been subscribed before the player joined.
    pub async fn handle(
        mut self,
        mut socket: WebSocket,
        mut events_rx: broadcast::Receiver<TownEvent>,
        snapshot: TownSnapshot,
    ) {
        info!(player_id = %self.player_id, "WebSocket connection established");

        if let Err(e) = send(&mut socket, ServerMessage::initialize(&self.player_id, snapshot)).await
        {
            error!(error = %e, "Failed to send initial town state");
            self.leave().await;
            return;
        }

        loop {
            tokio::select! {
                // Handle incoming client messages
                Some(msg) = socket.recv() => {
                    match msg {
                        Ok(Message::Text(text)) => {
                            if let Err(e) = self.handle_client_message(&mut socket, &text).await {
                                warn!(error = %e, "Error handling client message");
                                if send(&mut socket, ServerMessage::error(e.to_string())).await.is_err() {
                                    break;
                                }
                            }
                        }
                        Ok(Message::Close(_)) => {
                            info!(player_id = %self.player_id, "WebSocket client disconnected");
                            break;
                        }
                        Ok(Message::Ping(data)) => {
                            if let Err(e) = socket.send(Message::Pong(data)).await {
                                error!(error = %e, "Failed to send pong");
                                break;
                            }
                        }
                        Ok(_) => {
                            // Ignore binary, pong messages
                        }
                        Err(e) => {
                            warn!(error = %e, "WebSocket error");
                            break;
                        }
                    }
                }

                // Forward town events
                result = events_rx.recv() => {
                    match result {
                        Ok(event) => {
                            if self.gate.admit(&event) {
                                if let Err(e) = send(&mut socket, ServerMessage::event(&event)).await {
                                    error!(error = %e, "Failed to send town event");
                                    break;
                                }
                            }
                        }
                        Err(broadcast::error::RecvError::Lagged(skipped)) => {
                            warn!(skipped = skipped, "WebSocket lagged, resending town state");
                            if let Err(e) = self.resync(&mut socket).await {
                                error!(error = %e, "Failed to resync lagged client");
                                break;
                            }
                        }
                        Err(broadcast::error::RecvError::Closed) => {
                            error!("Town event channel closed");
                            break;
                        }
                    }
                }

                else => {
                    break;
                }
            }
        }

        self.leave().await;
        info!(player_id = %self.player_id, "WebSocket connection closed");
    }

    /// Handle client message (movement or area update)
    async fn handle_client_message(
        &mut self,
        socket: &mut WebSocket,
        text: &str,
    ) -> anyhow::Result<()> {
        let msg: ClientMessage = serde_json::from_str(text)?;

        match msg {
            ClientMessage::PlayerMovement { location } => {
                if let Some(prompt) = self.town.move_player(&self.player_id, location).await? {
                    send(socket, ServerMessage::area_prompt(&prompt)).await?;
                }
            }
            ClientMessage::InteractableUpdate { model } => {
                debug!(player_id = %self.player_id, area_id = %model.id(), "Area update from client");
                self.town.update_area(model).await?;
            }
        }

        Ok(())
    }

    /// Replace the client's state after missed events
    async fn resync(&mut self, socket: &mut WebSocket) -> anyhow::Result<()> {
        let msg = self.resync_message().await?;
        send(socket, msg).await
    }

    /// Fresh `initialize` from the current town; the player is already in it
    async fn resync_message(&mut self) -> anyhow::Result<ServerMessage> {
        let snapshot = self.town.snapshot().await?;
        self.gate.open();
        Ok(ServerMessage::initialize(&self.player_id, snapshot))
    }

    async fn leave(&self) {
        if let Err(e) = self.town.leave(&self.player_id).await {
            warn!(player_id = %self.player_id, error = %e, "Failed to remove player from town");
        }
    }
}

async fn send(socket: &mut WebSocket, msg: ServerMessage) -> anyhow::Result<()> {
    let json = serde_json::to_string(&msg)?;
    socket.send(Message::Text(json)).await?;
    Ok(())
}
