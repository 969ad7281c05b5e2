use std::collections::{BTreeSet, HashSet};
use std::error::Error;
use std::fmt::{Display, Formatter};

use crate::game_structure::{GameStructure, Player, Proposition, StateIdx};

/// A node of a [TurnBasedGame].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct State {
    pub name: String,
    /// The propositions that hold in this state, aka its labels
    pub propositions: HashSet<Proposition>,
    /// The only player choosing where to go from this state
    pub controller: Player,
    /// Successor states in declaration order. Never empty in a built game.
    pub transitions: Vec<StateIdx>,
}

/// An explicit turn-based game graph. Only obtainable through [GameBuilder] or
/// deserialization, both of which reject graphs with dead-end states or states
/// without a controller.
#[derive(Clone, Debug, Deserialize)]
#[serde(try_from = "GameDescription")]
pub struct TurnBasedGame {
    players: Vec<Player>,
    initial_state: StateIdx,
    states: Vec<State>,
}

impl TurnBasedGame {
    pub fn players(&self) -> &[Player] {
        &self.players
    }

    pub fn state(&self, index: StateIdx) -> Option<&State> {
        self.states.get(index.0)
    }

    pub fn state_by_name(&self, name: &str) -> Option<StateIdx> {
        self.states
            .iter()
            .position(|s| s.name == name)
            .map(StateIdx)
    }

    fn state_at(&self, state: StateIdx) -> &State {
        self.states
            .get(state.0)
            .unwrap_or_else(|| panic!("Out of bounds state ({}) given to game", state))
    }
}

impl GameStructure for TurnBasedGame {
    fn initial_state_index(&self) -> StateIdx {
        self.initial_state
    }

    fn state_count(&self) -> usize {
        self.states.len()
    }

    fn has_label(&self, state: StateIdx, proposition: &str) -> bool {
        self.state_at(state).propositions.contains(proposition)
    }

    fn controller(&self, state: StateIdx) -> &str {
        &self.state_at(state).controller
    }

    fn successors(&self, state: StateIdx) -> &[StateIdx] {
        &self.state_at(state).transitions
    }

    fn state_name(&self, state: StateIdx) -> String {
        self.state_at(state).name.clone()
    }
}

/// Incrementally describes a [TurnBasedGame]. States are added first, then wired
/// together. Nothing is validated until [GameBuilder::build].
/// # Example
/// ```
/// use tbatl_engine::game_structure::{GameBuilder, GameStructure};
///
/// let mut builder = GameBuilder::new();
/// let q0 = builder.add_state("q0", ["oog"], "t");
/// let q1 = builder.add_state("q1", ["oog", "req"], "c");
/// builder.connect(q0, &[q0, q1]);
/// builder.connect(q1, &[q0]);
/// let game = builder.build().unwrap();
/// assert_eq!(game.successors(q0), &[q0, q1]);
/// ```
#[derive(Clone, Debug, Default)]
pub struct GameBuilder {
    players: Option<Vec<Player>>,
    initial_state: StateIdx,
    states: Vec<State>,
    edges: Vec<(StateIdx, StateIdx)>,
}

impl GameBuilder {
    pub fn new() -> Self {
        Default::default()
    }

    /// Restricts controllers to the given players. Without this, the players
    /// are whoever controls some state.
    pub fn declare_players<I, P>(&mut self, players: I) -> &mut Self
    where
        I: IntoIterator<Item = P>,
        P: Into<Player>,
    {
        self.players = Some(players.into_iter().map(Into::into).collect());
        self
    }

    pub fn add_state<I, P>(
        &mut self,
        name: impl Into<String>,
        propositions: I,
        controller: impl Into<Player>,
    ) -> StateIdx
    where
        I: IntoIterator<Item = P>,
        P: Into<Proposition>,
    {
        self.states.push(State {
            name: name.into(),
            propositions: propositions.into_iter().map(Into::into).collect(),
            controller: controller.into(),
            transitions: vec![],
        });
        StateIdx(self.states.len() - 1)
    }

    /// Adds transitions from `from` to each of `targets`. Repeated transitions are ignored.
    pub fn connect(&mut self, from: StateIdx, targets: &[StateIdx]) -> &mut Self {
        self.edges.extend(targets.iter().map(|&to| (from, to)));
        self
    }

    pub fn set_initial_state(&mut self, state: StateIdx) -> &mut Self {
        self.initial_state = state;
        self
    }

    pub fn build(self) -> Result<TurnBasedGame, GameError> {
        let GameBuilder {
            players,
            initial_state,
            mut states,
            edges,
        } = self;

        if states.is_empty() {
            return Err(GameError::NoStates);
        }

        let mut names = HashSet::new();
        for state in &states {
            if !names.insert(state.name.as_str()) {
                return Err(GameError::DuplicateStateName {
                    name: state.name.clone(),
                });
            }
            if state.controller.is_empty() {
                return Err(GameError::NoController {
                    state: state.name.clone(),
                });
            }
            if let Some(players) = &players {
                if !players.contains(&state.controller) {
                    return Err(GameError::UnknownController {
                        state: state.name.clone(),
                        controller: state.controller.clone(),
                    });
                }
            }
        }

        let state_count = states.len();
        for (from, to) in edges {
            let source = states
                .get_mut(from.0)
                .ok_or(GameError::UnknownState { index: from })?;
            if to.0 >= state_count {
                return Err(GameError::UnknownSuccessor {
                    state: source.name.clone(),
                    target: to,
                });
            }
            if !source.transitions.contains(&to) {
                source.transitions.push(to);
            }
        }

        if let Some(dead_end) = states.iter().find(|s| s.transitions.is_empty()) {
            return Err(GameError::NoTransitions {
                state: dead_end.name.clone(),
            });
        }

        if initial_state.0 >= states.len() {
            return Err(GameError::UnknownState {
                index: initial_state,
            });
        }

        let players = players.unwrap_or_else(|| {
            states
                .iter()
                .map(|s| s.controller.clone())
                .collect::<BTreeSet<_>>()
                .into_iter()
                .collect()
        });

        Ok(TurnBasedGame {
            players,
            initial_state,
            states,
        })
    }
}

/// The JSON shape of a game, e.g.
/// ```json
/// { "players": ["t", "c"],
///   "states": [ { "name": "q0", "propositions": ["oog"], "controller": "t", "transitions": [0, 1] }, ... ] }
/// ```
#[derive(Deserialize)]
struct GameDescription {
    #[serde(default)]
    players: Option<Vec<Player>>,
    #[serde(default)]
    initial_state: StateIdx,
    states: Vec<StateDescription>,
}

#[derive(Deserialize)]
struct StateDescription {
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    propositions: Vec<Proposition>,
    #[serde(default)]
    controller: Player,
    #[serde(default)]
    transitions: Vec<StateIdx>,
}

impl TryFrom<GameDescription> for TurnBasedGame {
    type Error = GameError;

    fn try_from(description: GameDescription) -> Result<Self, Self::Error> {
        let mut builder = GameBuilder::new();
        if let Some(players) = description.players {
            builder.declare_players(players);
        }
        builder.set_initial_state(description.initial_state);
        for (i, state) in description.states.iter().enumerate() {
            let name = state.name.clone().unwrap_or_else(|| format!("s{}", i));
            builder.add_state(name, state.propositions.clone(), state.controller.clone());
        }
        for (i, state) in description.states.iter().enumerate() {
            builder.connect(StateIdx(i), &state.transitions);
        }
        builder.build()
    }
}

/// Reasons a game graph cannot be checked.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GameError {
    NoStates,
    DuplicateStateName { name: String },
    NoController { state: String },
    UnknownController { state: String, controller: Player },
    UnknownState { index: StateIdx },
    UnknownSuccessor { state: String, target: StateIdx },
    NoTransitions { state: String },
}

impl Display for GameError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            GameError::NoStates => write!(f, "The game has no states"),
            GameError::DuplicateStateName { name } => {
                write!(f, "More than one state is named '{}'", name)
            }
            GameError::NoController { state } => {
                write!(f, "State '{}' has no controlling player", state)
            }
            GameError::UnknownController { state, controller } => write!(
                f,
                "State '{}' is controlled by '{}', which is not a declared player",
                state, controller
            ),
            GameError::UnknownState { index } => {
                write!(f, "There is no state with index {}", index)
            }
            GameError::UnknownSuccessor { state, target } => write!(
                f,
                "State '{}' has a transition to {}, which is not a state",
                state, target
            ),
            GameError::NoTransitions { state } => write!(
                f,
                "State '{}' has no outgoing transitions. Add a self-loop if it should be terminal",
                state
            ),
        }
    }
}

impl Error for GameError {}
