//! Scenario loader.
//!
//! A scenario file describes the whole case: the rooms, where the detective
//! starts, who the suspects are, and where the clues lie. Everything that
//! names a room does so by its `name`.
//!
//! ```ron
//! (
//!     rooms: [(name: "hall", layout: ["#####", "#...#", "#####"], exits: [])],
//!     player: (name: "Detective", room: "hall", position: (1, 1)),
//!     suspects: [(id: 1, name: "Butler", room: "hall", position: (3, 1), murderer: true)],
//!     clues: [(id: 1, name: "Candlestick", room: "hall", position: (2, 1))],
//! )
//! ```

use std::path::Path;

use mystery_core::{
    CardinalDirection, Clue, ClueId, DialogueRef, EntityId, GameConfig, Mover, Player, Position,
    RoomId, RoomOracle, Rooms, Suspect, Walkable, World, WorldError,
};
use serde::{Deserialize, Serialize};

use crate::loaders::{LoadResult, RoomLoader, RoomSpec, read_file};

#[derive(Debug, Clone, Serialize, Deserialize)]
struct ScenarioRon {
    rooms: Vec<RoomSpec>,
    player: PlayerSpec,
    #[serde(default)]
    suspects: Vec<SuspectSpec>,
    #[serde(default)]
    clues: Vec<ClueSpec>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct PlayerSpec {
    name: String,
    room: String,
    position: (i32, i32),
    #[serde(default = "default_facing")]
    facing: CardinalDirection,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct SuspectSpec {
    id: u32,
    name: String,
    #[serde(default)]
    description: String,
    #[serde(default)]
    dialogue: Option<String>,
    #[serde(default)]
    murderer: bool,
    room: String,
    position: (i32, i32),
    #[serde(default = "default_facing")]
    facing: CardinalDirection,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct ClueSpec {
    id: u32,
    name: String,
    #[serde(default)]
    description: String,
    room: String,
    position: (i32, i32),
}

fn default_facing() -> CardinalDirection {
    CardinalDirection::South
}

/// A fully resolved scenario, ready to become a [`World`].
#[derive(Debug, Clone)]
pub struct Scenario {
    pub rooms: Rooms,
    pub player: Player,
    pub suspects: Vec<Suspect>,
    pub clues: Vec<Clue>,
}

impl Scenario {
    /// # Errors
    ///
    /// Returns [`WorldError`] when ids collide.
    pub fn into_world(self, config: GameConfig) -> Result<World, WorldError> {
        World::new(config, self.rooms, self.player, self.suspects, self.clues)
    }
}

/// Loader for scenarios from RON files.
pub struct ScenarioLoader;

impl ScenarioLoader {
    /// Load a scenario from a RON file.
    pub fn load(path: &Path) -> LoadResult<Scenario> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    /// Parse and resolve scenario RON text.
    ///
    /// Characters must start on open floor and exactly one suspect must be
    /// the murderer.
    pub fn parse(content: &str) -> LoadResult<Scenario> {
        let data: ScenarioRon = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse scenario RON: {}", e))?;

        let rooms = RoomLoader::build(&data.rooms)?;

        let player = {
            let spec = &data.player;
            let room = resolve_room(&rooms, &spec.room)?;
            let position = open_tile(&rooms, room, spec.position, &spec.name)?;
            Player::new(spec.name.clone(), Mover::new(room, position, spec.facing))
        };

        let mut suspects = Vec::with_capacity(data.suspects.len());
        for spec in &data.suspects {
            let room = resolve_room(&rooms, &spec.room)?;
            let position = open_tile(&rooms, room, spec.position, &spec.name)?;
            let mut suspect = Suspect::new(
                EntityId(spec.id),
                spec.name.clone(),
                Mover::new(room, position, spec.facing),
            )
            .with_description(spec.description.clone())
            .murderer(spec.murderer);
            if let Some(dialogue) = &spec.dialogue {
                suspect = suspect.with_dialogue(DialogueRef::new(dialogue.clone()));
            }
            suspects.push(suspect);
        }

        let murderers = suspects.iter().filter(|s| s.is_murderer()).count();
        if murderers != 1 {
            anyhow::bail!("Scenario must have exactly one murderer, found {}", murderers);
        }

        let clues = data
            .clues
            .iter()
            .map(|spec| {
                let room = resolve_room(&rooms, &spec.room)?;
                let position = Position::from(spec.position);
                if !rooms.get(room)?.contains(position) {
                    anyhow::bail!("Clue '{}' lies outside room '{}'", spec.name, spec.room);
                }
                Ok(Clue::new(ClueId(spec.id), spec.name.clone(), room, position)
                    .with_description(spec.description.clone()))
            })
            .collect::<LoadResult<Vec<_>>>()?;

        Ok(Scenario {
            rooms,
            player,
            suspects,
            clues,
        })
    }
}

fn resolve_room(rooms: &Rooms, name: &str) -> LoadResult<RoomId> {
    rooms
        .by_name(name)
        .map(|room| room.id())
        .ok_or_else(|| anyhow::anyhow!("Unknown room '{}'", name))
}

fn open_tile(rooms: &Rooms, room: RoomId, at: (i32, i32), who: &str) -> LoadResult<Position> {
    let position = Position::from(at);
    if !rooms.get(room)?.is_walkable(position) {
        anyhow::bail!("'{}' starts on blocked tile {}", who, position);
    }
    Ok(position)
}
