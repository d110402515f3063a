//! Room layout loader.
//!
//! Rooms are written as ASCII art (top row first) plus a list of exits that
//! name their destination room. Names are resolved to [`RoomId`]s in file
//! order, matching the order rooms join the arena.

use std::collections::HashMap;

use mystery_core::{
    CardinalDirection, Position, Room, RoomId, Rooms, Transition, Trigger, Walkable,
};
use serde::{Deserialize, Serialize};

use crate::loaders::LoadResult;

/// One room as written in a scenario file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoomSpec {
    pub name: String,
    /// `.` floor, `#` wall, `T` furniture, space void.
    pub layout: Vec<String>,
    #[serde(default)]
    pub exits: Vec<ExitSpec>,
}

/// An exit mat and where it leads.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExitSpec {
    pub at: (i32, i32),
    pub facing: CardinalDirection,
    pub to: String,
    pub arrive: (i32, i32),
    #[serde(default)]
    pub arrive_facing: Option<CardinalDirection>,
}

/// Builds a [`Rooms`] arena from room specs.
pub struct RoomLoader;

impl RoomLoader {
    /// Builds every room, then wires exits by destination name.
    ///
    /// Fails on duplicate names, unknown layout symbols, exits outside their
    /// room, unknown destinations, and arrival tiles that are not open floor.
    pub fn build(specs: &[RoomSpec]) -> LoadResult<Rooms> {
        if specs.len() > usize::from(u16::MAX) {
            anyhow::bail!("Too many rooms: {}", specs.len());
        }

        let mut ids: HashMap<&str, RoomId> = HashMap::new();
        for (index, spec) in specs.iter().enumerate() {
            if ids.insert(spec.name.as_str(), RoomId(index as u16)).is_some() {
                anyhow::bail!("Duplicate room name '{}'", spec.name);
            }
        }

        let mut rooms: Vec<Room> = specs
            .iter()
            .map(|spec| {
                let rows: Vec<&str> = spec.layout.iter().map(String::as_str).collect();
                Room::from_ascii(spec.name.clone(), &rows).ok_or_else(|| {
                    anyhow::anyhow!("Room '{}' has an empty or invalid layout", spec.name)
                })
            })
            .collect::<LoadResult<_>>()?;

        for (index, spec) in specs.iter().enumerate() {
            for exit in &spec.exits {
                let destination_room = *ids.get(exit.to.as_str()).ok_or_else(|| {
                    anyhow::anyhow!(
                        "Exit in room '{}' leads to unknown room '{}'",
                        spec.name,
                        exit.to
                    )
                })?;
                let destination_position = Position::from(exit.arrive);
                if !rooms[usize::from(destination_room.0)].is_walkable(destination_position) {
                    anyhow::bail!(
                        "Exit in room '{}' arrives on blocked tile {} of '{}'",
                        spec.name,
                        destination_position,
                        exit.to
                    );
                }

                let trigger = Trigger {
                    facing: exit.facing,
                    transition: Transition {
                        destination_room,
                        destination_position,
                        destination_direction: exit.arrive_facing,
                    },
                };
                rooms[index]
                    .add_trigger(Position::from(exit.at), trigger)
                    .map_err(|e| anyhow::anyhow!("Invalid exit in room '{}': {}", spec.name, e))?;
            }
        }

        let mut arena = Rooms::new();
        for room in rooms {
            arena.push(room);
        }
        Ok(arena)
    }
}
