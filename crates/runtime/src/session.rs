//! A running game: the current state, the actions that produced it and the
//! bus its changes are announced on.
//!
//! [`Session`] is the dispatch surface a scene layer talks to. Every action
//! goes through [`GameEngine`]; rejected actions leave the state untouched
//! and are not recorded, so the history is always a faithful replay script.

use std::sync::Arc;

use game_core::action::BattleReport;
use game_core::{
    Action, ActionResult, ChangeFloorAction, ContentOracle, GameEngine, GameEnv, GameError,
    GameState, InteractionState, OpenDoorAction, PickUpEquipmentAction, PickUpItemAction,
    PlacedObject, next_battle_action,
};
use tracing::{debug, info, warn};

use crate::events::{EventBus, extract_events};
use crate::providers::ActionProvider;
use crate::repository::InitialStateSeed;
use crate::{Result, RuntimeError};

pub struct Session {
    content: Arc<dyn ContentOracle>,
    seed: InitialStateSeed,
    state: GameState,
    history: Vec<Action>,
    bus: EventBus,
}

impl Session {
    /// Upper bound on follow-up actions settled after one dispatch.
    const MAX_FOLLOW_UPS: usize = 1024;

    /// Starts a new game on the seed floor.
    pub fn new(
        content: Arc<dyn ContentOracle>,
        seed: InitialStateSeed,
        bus: EventBus,
    ) -> Result<Self> {
        let env = GameEnv::new(content.as_ref());
        let state =
            GameState::initialize(seed.floor, None, &env).map_err(RuntimeError::InitialState)?;
        info!(floor = seed.floor, player = %state.player_key, "session started");

        Ok(Self {
            content,
            seed,
            state,
            history: Vec::new(),
            bus,
        })
    }

    /// Rebuilds a game from its seed and recorded actions.
    ///
    /// Replay publishes no events. Actions that are rejected on replay are
    /// dropped from the history, exactly as they would have been live.
    pub fn replay(
        content: Arc<dyn ContentOracle>,
        seed: InitialStateSeed,
        actions: &[Action],
        bus: EventBus,
    ) -> Result<Self> {
        let mut session = Self::new(content, seed, bus)?;
        for action in actions {
            session.apply(action.clone(), false)?;
        }
        debug!(
            recorded = actions.len(),
            applied = session.history.len(),
            "replay finished"
        );
        Ok(session)
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn history(&self) -> &[Action] {
        &self.history
    }

    pub fn seed(&self) -> InitialStateSeed {
        self.seed
    }

    pub fn content(&self) -> &dyn ContentOracle {
        self.content.as_ref()
    }

    pub fn bus(&self) -> &EventBus {
        &self.bus
    }

    /// Applies `action` and publishes the resulting events.
    ///
    /// Returns `None` when the action was rejected as meaningless right now;
    /// the state is then unchanged. Internal and fatal failures are errors.
    pub fn dispatch(&mut self, action: Action) -> Result<Option<ActionResult>> {
        self.apply(action, true)
    }

    fn apply(&mut self, action: Action, publish: bool) -> Result<Option<ActionResult>> {
        let engine = GameEngine::new(GameEnv::new(self.content.as_ref()));

        let outcome = match engine.execute(&self.state, &action) {
            Ok(outcome) => outcome,
            Err(error) if error.severity().is_rejection() => {
                debug!(
                    action = action.name(),
                    code = error.error_code(),
                    "action rejected: {error}"
                );
                return Ok(None);
            }
            Err(error) => {
                warn!(
                    action = action.name(),
                    code = error.error_code(),
                    "action failed: {error}"
                );
                return Err(error.into());
            }
        };

        if publish {
            for event in extract_events(&outcome.delta, &self.state, &outcome.state) {
                self.bus.publish(event);
            }
        }

        self.state = outcome.state;
        self.history.push(action);
        Ok(Some(outcome.result))
    }

    /// The action the scene layer would dispatch next without player input:
    /// accepting a pending pickup or stair, or the next battle step.
    pub fn follow_up(&self) -> Option<Action> {
        match &self.state.interaction {
            InteractionState::None => None,
            InteractionState::ItemPickup { item_id } => {
                Some(Action::PickUpItem(PickUpItemAction::new(item_id.clone())))
            }
            InteractionState::EquipmentPickup { equipment_id } => Some(Action::PickUpEquipment(
                PickUpEquipmentAction::new(equipment_id.clone()),
            )),
            InteractionState::FloorChange { stair_id } => {
                Some(Action::ChangeFloor(ChangeFloorAction::new(stair_id.clone())))
            }
            InteractionState::Battle(_) => next_battle_action(&self.state, self.content.config()),
        }
    }

    /// Dispatches follow-ups until nothing is pending. Returns their results.
    pub fn settle(&mut self) -> Result<Vec<ActionResult>> {
        let mut results = Vec::new();
        for _ in 0..Self::MAX_FOLLOW_UPS {
            let Some(action) = self.follow_up() else {
                return Ok(results);
            };
            match self.dispatch(action)? {
                Some(result) => results.push(result),
                None => {
                    warn!(interaction = ?self.state.interaction, "follow-up rejected");
                    return Ok(results);
                }
            }
        }
        warn!("follow-up limit reached");
        Ok(results)
    }

    /// Plays the current battle to its end.
    ///
    /// Returns the settlement, or `None` if no battle was running.
    pub fn resolve_battle(&mut self) -> Result<Option<BattleReport>> {
        while let Some(action) = next_battle_action(&self.state, self.content.config()) {
            match self.dispatch(action)? {
                Some(ActionResult::EndBattle(report)) => return Ok(Some(report)),
                Some(_) => {}
                None => {
                    warn!("battle step rejected");
                    return Ok(None);
                }
            }
        }
        Ok(None)
    }

    /// Opens the door a move is about to bump into, if the player may.
    /// A move that only turns the player never opens anything.
    ///
    /// Returns true if a door was opened.
    pub fn open_door_ahead(&mut self, action: &Action) -> Result<bool> {
        let Action::Move(step) = action else {
            return Ok(false);
        };
        if step.turns(self.state.player.character.facing) {
            return Ok(false);
        }
        let destination = self.state.player_position().offset(step.dx, step.dy);
        let door_key = match self.state.entities.occupant_at(destination) {
            Some((key, placement)) if matches!(placement.object, PlacedObject::Door(_)) => {
                key.to_string()
            }
            _ => return Ok(false),
        };

        let allowed = self
            .state
            .door_access(&door_key)
            .is_some_and(|access| access.can_open());
        if !allowed {
            debug!(door = %door_key, "door stays shut");
            return Ok(false);
        }

        let opened = self.dispatch(Action::OpenDoor(OpenDoorAction::new(door_key)))?;
        Ok(opened.is_some())
    }

    /// Pulls actions from `provider` until it runs dry, opening doors and
    /// settling follow-ups after each one. Returns the number of actions
    /// taken from the provider.
    pub async fn run(&mut self, provider: &dyn ActionProvider) -> Result<usize> {
        let mut taken = 0;
        while let Some(action) = provider.provide_action(&self.state).await? {
            taken += 1;
            self.open_door_ahead(&action)?;
            self.dispatch(action)?;
            self.settle()?;
        }
        Ok(taken)
    }
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("seed", &self.seed)
            .field("floor", &self.state.floor)
            .field("history", &self.history.len())
            .finish()
    }
}
