//! Plain-text rendering of the player's surroundings.
use std::fmt::Write;

use mystery_core::{
    CardinalDirection, ClueId, EntityId, GameEvent, Player, Position, RoomId, RoomOracle,
    TerrainKind, World, WorldError,
};
use mystery_runtime::{Event, GamePhase};

/// Draws the current room, north at the top.
///
/// The player is drawn as an arrow showing its facing, suspects by the first
/// letter of their name and clues as `?`.
pub fn room(world: &World) -> Result<String, WorldError> {
    let room = world.current_room()?;
    let player = world.player();
    let dims = room.dimensions();

    let mut out = String::new();
    let _ = writeln!(out, "== {} ==", room.name());
    for y in (0..dims.height as i32).rev() {
        for x in 0..dims.width as i32 {
            let here = Position::new(x, y);
            let terrain = room.tile(here).map(|tile| tile.terrain());
            out.push(glyph(world, room.id(), here, player, terrain));
        }
        out.push('\n');
    }
    Ok(out)
}

fn glyph(
    world: &World,
    room: RoomId,
    here: Position,
    player: &Player,
    terrain: Option<TerrainKind>,
) -> char {
    if here == player.position() {
        return match player.direction() {
            CardinalDirection::North => '^',
            CardinalDirection::East => '>',
            CardinalDirection::South => 'v',
            CardinalDirection::West => '<',
        };
    }
    if let Some(suspect) = world
        .suspects()
        .iter()
        .find(|suspect| suspect.room() == room && suspect.position() == here)
    {
        return suspect.name().chars().next().unwrap_or('@');
    }
    if world.clues_in(room).any(|clue| clue.position() == here) {
        return '?';
    }
    match terrain {
        Some(TerrainKind::Floor) => '.',
        Some(TerrainKind::Wall) => '#',
        Some(TerrainKind::Furniture) => 'T',
        Some(TerrainKind::Void) | None => ' ',
    }
}

/// One line describing an event, using names from the world.
pub fn event(world: &World, event: &Event) -> String {
    let suspect_name = |id: EntityId| {
        world
            .suspect(id)
            .map(|suspect| suspect.name().to_string())
            .unwrap_or_else(|| id.to_string())
    };
    let clue_name = |id: ClueId| {
        world
            .journal()
            .clues()
            .iter()
            .chain(world.available_clues())
            .find(|clue| clue.id() == id)
            .map(|clue| clue.name().to_string())
            .unwrap_or_else(|| id.to_string())
    };

    match event {
        Event::Game(GameEvent::InterviewRequested { suspect }) => {
            let description = world
                .suspect(*suspect)
                .map(|suspect| suspect.description().to_string())
                .unwrap_or_default();
            format!("You approach {}. {}", suspect_name(*suspect), description)
        }
        Event::Game(GameEvent::ClueReached { clue }) => {
            format!("You examine the {}.", clue_name(*clue))
        }
        Event::Game(GameEvent::ClueCollected { clue }) => {
            format!("{} added to your journal.", clue_name(*clue))
        }
        Event::Game(GameEvent::RoomChangeRequested { .. }) => {
            "You step through the door.".to_string()
        }
        Event::Game(GameEvent::RoomChanged { to, .. }) => {
            let name = world
                .rooms()
                .get(*to)
                .map(|room| room.name().to_string())
                .unwrap_or_else(|_| to.to_string());
            format!("You are now in the {}.", name)
        }
        Event::Game(GameEvent::SuspectAccused { suspect, correct: true }) => {
            format!("{} breaks down and confesses.", suspect_name(*suspect))
        }
        Event::Game(GameEvent::SuspectAccused { suspect, correct: false }) => {
            format!("{} scoffs. You will need more than that.", suspect_name(*suspect))
        }
        Event::Phase(change) => match change.to {
            GamePhase::Exploring => "You resume your investigation.".to_string(),
            GamePhase::Interviewing { .. } => "(interview: type 'end' when done)".to_string(),
            GamePhase::Solved { .. } => "Case closed.".to_string(),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mystery_core::{Clue, GameConfig, Mover, Room, Rooms, Suspect};

    fn world() -> World {
        let mut rooms = Rooms::new();
        rooms.push(Room::from_ascii("den", &["#####", "#.T.#", "#...#", "#####"]).unwrap());
        let player = Player::new(
            "Detective",
            Mover::new(RoomId(0), Position::new(1, 1), CardinalDirection::East),
        );
        let suspects = vec![Suspect::new(
            EntityId(1),
            "Vicar",
            Mover::new(RoomId(0), Position::new(3, 2), CardinalDirection::South),
        )];
        let clues = vec![Clue::new(ClueId(1), "Ring", RoomId(0), Position::new(3, 1))];
        World::new(GameConfig::still(), rooms, player, suspects, clues).unwrap()
    }

    #[test]
    fn draws_room_with_characters() {
        let drawn = room(&world()).unwrap();
        assert_eq!(drawn, "== den ==\n#####\n#.TV#\n#>.?#\n#####\n");
    }

    #[test]
    fn describes_events_by_name() {
        let world = world();
        let line = event(&world, &Event::Game(GameEvent::ClueReached { clue: ClueId(1) }));
        assert_eq!(line, "You examine the Ring.");
    }
}
