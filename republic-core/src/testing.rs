use crate::content::{Artifact, EventOption, GameEvent};
use crate::state::{Flags, GameState, START_YEAR};
use crate::stats::{CountryStats, Effects, INITIAL_STATS};

/// Builds arbitrary game states for tests, bypassing initialization and clamping.
pub struct GameStateBuilder {
    state: GameState,
}

impl GameStateBuilder {
    pub fn new() -> Self {
        Self {
            state: GameState {
                country: INITIAL_STATS,
                year: START_YEAR,
                turn: 1,
                artifacts: im::Vector::new(),
                flags: Flags::new(),
                game_over: false,
                game_over_reason: None,
                country_name: "Testland".to_string(),
            },
        }
    }

    pub fn year(mut self, year: i32) -> Self {
        self.state.year = year;
        self
    }

    pub fn turn(mut self, turn: u32) -> Self {
        self.state.turn = turn;
        self
    }

    pub fn country(mut self, country: CountryStats) -> Self {
        self.state.country = country;
        self
    }

    pub fn stability(mut self, value: f64) -> Self {
        self.state.country.stability = value;
        self
    }

    pub fn elite_satisfaction(mut self, value: f64) -> Self {
        self.state.country.elite_satisfaction = value;
        self
    }

    pub fn military_power(mut self, value: f64) -> Self {
        self.state.country.military_power = value;
        self
    }

    pub fn famine_risk(mut self, value: f64) -> Self {
        self.state.country.famine_risk = value;
        self
    }

    pub fn flag(mut self, name: &str) -> Self {
        self.state.flags.insert(name.to_string(), true);
        self
    }

    pub fn with_artifact(mut self, artifact: Artifact) -> Self {
        self.state.artifacts.push_back(artifact);
        self
    }

    pub fn game_over(mut self) -> Self {
        self.state.game_over = true;
        self
    }

    pub fn build(self) -> GameState {
        self.state
    }
}

impl Default for GameStateBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Artifact with the given id, effects and tags at zero cost.
pub fn artifact(id: &str, effects: Effects, tags: &[&str]) -> Artifact {
    Artifact {
        id: id.to_string(),
        name: id.to_string(),
        description: String::new(),
        effects,
        point_cost: 0,
        tags: tags.iter().map(|t| t.to_string()).collect(),
    }
}

/// Option with the given effects and flags.
pub fn option(effects: Effects, set_flags: &[&str]) -> EventOption {
    EventOption {
        text: "option".to_string(),
        effects,
        explanation: None,
        set_flags: set_flags.iter().map(|f| f.to_string()).collect(),
    }
}

/// Two-option event with no gates or tags.
pub fn event(id: &str) -> GameEvent {
    GameEvent {
        id: id.to_string(),
        title: id.to_string(),
        description: String::new(),
        theory: None,
        source: None,
        wiki_link: None,
        image: None,
        options: vec![option(Effects::new(), &[]), option(Effects::new(), &[])],
        min_year: None,
        max_year: None,
        tags: Vec::new(),
        req_flags: Vec::new(),
    }
}
