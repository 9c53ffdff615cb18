//! Manorhunt headless validation harness.
//!
//! Loads the bundled mansion description and drives the engine through
//! geometry, visibility, combat, traversal, and full-game sweeps — no
//! rendering, no input, no controller. Prints a pass/fail report and
//! exits non-zero on any failure.
//!
//! Usage:
//!   cargo run -p manorhunt-simtest
//!   cargo run -p manorhunt-simtest -- --verbose

use manorhunt_core::policy::{self, Action};
use manorhunt_core::{traversal, Control, World, WorldDescription, WorldError};
use rand::rngs::StdRng;
use rand::SeedableRng;

// ── Bundled world (same JSON a front end would load) ────────────────────
const MANSION_JSON: &str = include_str!("../../../data/mansion.json");

const MAX_TURN: u32 = 40;

// ── Test harness ────────────────────────────────────────────────────────

struct TestResult {
    name: String,
    passed: bool,
    detail: String,
}

fn check(results: &mut Vec<TestResult>, name: &str, passed: bool, detail: String) {
    results.push(TestResult {
        name: name.to_string(),
        passed,
        detail,
    });
}

fn load_mansion() -> Result<World, WorldError> {
    let desc: WorldDescription =
        serde_json::from_str(MANSION_JSON).map_err(|e| WorldError::Load(e.to_string()))?;
    World::load(&desc, MAX_TURN)
}

fn main() {
    let verbose = std::env::args().any(|a| a == "--verbose");
    println!("=== Manorhunt Simulation Harness ===\n");

    let mut results = Vec::new();

    results.extend(validate_world_load(verbose));
    results.extend(validate_adjacency(verbose));
    results.extend(validate_visibility(verbose));
    results.extend(validate_combat(verbose));
    results.extend(validate_pet_traversal(verbose));
    results.extend(validate_target_tour(verbose));
    results.extend(validate_policy(verbose));
    results.extend(validate_full_game(verbose));

    // ── Summary ──
    println!();
    let passed = results.iter().filter(|r| r.passed).count();
    let failed = results.iter().filter(|r| !r.passed).count();
    let total = results.len();

    for r in &results {
        let icon = if r.passed { "✓" } else { "✗" };
        if !r.passed || verbose {
            println!("  {} {}: {}", icon, r.name, r.detail);
        }
    }

    println!(
        "\n=== RESULT: {}/{} passed, {} failed ===",
        passed, total, failed
    );

    if failed > 0 {
        std::process::exit(1);
    }
}

// ── 1. World loading ────────────────────────────────────────────────────

fn validate_world_load(_verbose: bool) -> Vec<TestResult> {
    println!("--- World Loading ---");
    let mut results = Vec::new();

    let world = match load_mansion() {
        Ok(w) => w,
        Err(e) => {
            check(
                &mut results,
                "mansion_load",
                false,
                format!("load error: {}", e),
            );
            return results;
        }
    };

    check(
        &mut results,
        "room_count",
        world.rooms().len() == 20,
        format!("{} rooms", world.rooms().len()),
    );
    let item_total: usize = world.rooms().iter().map(|r| r.items.len()).sum();
    check(
        &mut results,
        "item_count",
        item_total == 12,
        format!("{} items placed", item_total),
    );
    check(
        &mut results,
        "target_start",
        world.target().current_room == 0 && world.target().health == 50,
        format!(
            "{} in room {} with {} hp",
            world.target().name,
            world.target().current_room,
            world.target().health
        ),
    );
    check(
        &mut results,
        "pet_start",
        world.pet().current_room == 0,
        format!("{} in room {}", world.pet().name, world.pet().current_room),
    );
    check(
        &mut results,
        "turn_starts_at_one",
        world.turn() == 1,
        format!("turn {}", world.turn()),
    );

    // a mutated description with an overlapping room must be rejected
    let mut desc: WorldDescription = serde_json::from_str(MANSION_JSON).unwrap();
    desc.rooms.push(manorhunt_core::world::RoomSpec {
        name: "Impossible Closet".to_string(),
        top_row: 2,
        top_col: 2,
        bottom_row: 10,
        bottom_col: 10,
    });
    check(
        &mut results,
        "overlap_rejected",
        World::load(&desc, MAX_TURN).is_err(),
        "overlapping room rejected at load".to_string(),
    );

    let mut desc: WorldDescription = serde_json::from_str(MANSION_JSON).unwrap();
    desc.rooms.push(manorhunt_core::world::RoomSpec {
        name: "Tower".to_string(),
        top_row: 0,
        top_col: 30,
        bottom_row: 6,
        bottom_col: 40,
    });
    check(
        &mut results,
        "out_of_grid_rejected",
        World::load(&desc, MAX_TURN).is_err(),
        "room outside the grid rejected at load".to_string(),
    );

    results
}

// ── 2. Adjacency ────────────────────────────────────────────────────────

fn validate_adjacency(_verbose: bool) -> Vec<TestResult> {
    println!("--- Adjacency ---");
    let mut results = Vec::new();
    let world = match load_mansion() {
        Ok(w) => w,
        Err(_) => return results,
    };

    check(
        &mut results,
        "foyer_neighbors",
        world.neighbors_of(0).unwrap() == [1, 4].as_slice(),
        format!("Foyer -> {:?}", world.neighbors_of(0).unwrap()),
    );
    check(
        &mut results,
        "gallery_neighbors",
        world.neighbors_of(5).unwrap() == [2, 3, 4, 8, 9].as_slice(),
        format!("Gallery -> {:?}", world.neighbors_of(5).unwrap()),
    );
    check(
        &mut results,
        "ballroom_neighbors",
        world.neighbors_of(15).unwrap() == [10, 11, 12, 14, 16, 18, 19].as_slice(),
        format!("Ballroom -> {:?}", world.neighbors_of(15).unwrap()),
    );

    // straight splits and stacked partial overlaps come out reciprocal
    let mut reciprocal = true;
    for room in world.rooms() {
        for &n in &room.neighbors {
            if !world.rooms()[n].neighbors.contains(&room.id) {
                reciprocal = false;
            }
        }
    }
    check(
        &mut results,
        "mansion_adjacency_reciprocal",
        reciprocal,
        "every neighbor edge present in both directions".to_string(),
    );

    let isolated: Vec<usize> = world
        .rooms()
        .iter()
        .filter(|r| r.neighbors.is_empty())
        .map(|r| r.id)
        .collect();
    check(
        &mut results,
        "no_isolated_rooms",
        isolated.is_empty(),
        format!("isolated rooms: {:?}", isolated),
    );

    results
}

// ── 3. Visibility precedence ────────────────────────────────────────────

fn validate_visibility(_verbose: bool) -> Vec<TestResult> {
    println!("--- Visibility ---");
    let mut results = Vec::new();
    let mut world = match load_mansion() {
        Ok(w) => w,
        Err(_) => return results,
    };

    world.add_player("Ada", 0, Control::Human, 3, 0).unwrap();

    // lone player, pet co-located
    check(
        &mut results,
        "pet_masks_lone_player",
        !world.can_be_seen(0).unwrap(),
        "hidden with the pet in the Foyer".to_string(),
    );

    // lone player, pet away, no neighbors occupied
    world.move_pet(9).unwrap();
    check(
        &mut results,
        "alone_and_unwatched",
        !world.can_be_seen(0).unwrap(),
        "hidden with empty neighboring rooms".to_string(),
    );

    // a witness next door
    world.add_player("Bea", 1, Control::Human, 3, 1).unwrap();
    check(
        &mut results,
        "neighbor_witness",
        world.can_be_seen(0).unwrap(),
        "seen from the Parlor".to_string(),
    );

    // the pet overrides even a crowded neighborhood
    world.move_pet(0).unwrap();
    check(
        &mut results,
        "pet_overrides_neighbors",
        !world.can_be_seen(0).unwrap(),
        "hidden again once the pet returns".to_string(),
    );

    // a second player in the room trumps everything
    world.add_player("Cal", 2, Control::Human, 3, 0).unwrap();
    check(
        &mut results,
        "roommate_always_sees",
        world.can_be_seen(0).unwrap(),
        "seen with a roommate despite the pet".to_string(),
    );

    results
}

// ── 4. Combat ───────────────────────────────────────────────────────────

fn validate_combat(_verbose: bool) -> Vec<TestResult> {
    println!("--- Combat ---");
    let mut results = Vec::new();
    let mut world = match load_mansion() {
        Ok(w) => w,
        Err(_) => return results,
    };

    world.add_player("Bob", 0, Control::Human, 3, 0).unwrap();
    world.pick_item(0, 0).unwrap(); // the Carving Knife, power 4

    let outcome = world.attack_with_item(0, 0).unwrap();
    check(
        &mut results,
        "first_blood",
        outcome.landed() && world.target_health() == 46,
        format!("{} hp after the knife", world.target_health()),
    );
    check(
        &mut results,
        "item_consumed_on_success",
        world.player(0).unwrap().items().is_empty(),
        "knife gone from the bag".to_string(),
    );

    // witnessed poke: John next door, pet elsewhere
    world.add_player("John", 1, Control::Human, 3, 1).unwrap();
    world.move_pet(9).unwrap();
    let outcome = world.poke_target(0).unwrap();
    check(
        &mut results,
        "witnessed_attempt_fails",
        !outcome.landed() && world.target_health() == 46,
        format!("{}", outcome),
    );

    // pet returns and masks the poke
    world.move_pet(0).unwrap();
    let outcome = world.poke_target(0).unwrap();
    check(
        &mut results,
        "masked_poke_lands",
        outcome.landed() && world.target_health() == 45,
        format!("{} hp after the poke", world.target_health()),
    );

    // a swing from the wrong room still burns the item
    world.move_player(1, 2).unwrap(); // John walks to the Library
    world.pick_item(1, 0).unwrap(); // and takes the Letter Opener
    let outcome = world.attack_with_item(1, 0).unwrap();
    check(
        &mut results,
        "wrong_room_burns_item",
        !outcome.landed()
            && world.target_health() == 45
            && world.player(1).unwrap().items().is_empty(),
        format!("{}; opener gone from the bag", outcome),
    );

    results
}

// ── 5. Pet traversal ────────────────────────────────────────────────────

fn validate_pet_traversal(_verbose: bool) -> Vec<TestResult> {
    println!("--- Pet Traversal ---");
    let mut results = Vec::new();
    let mut world = match load_mansion() {
        Ok(w) => w,
        Err(_) => return results,
    };

    let path = traversal::dfs_path(world.rooms(), 0);
    check(
        &mut results,
        "path_starts_at_anchor",
        path.first() == Some(&0),
        format!("path head {:?}", path.first()),
    );
    let mut seen: Vec<usize> = path.clone();
    seen.sort_unstable();
    seen.dedup();
    check(
        &mut results,
        "path_covers_mansion",
        seen.len() == world.rooms().len(),
        format!("{} of {} rooms visited", seen.len(), world.rooms().len()),
    );
    check(
        &mut results,
        "path_records_backtracking",
        path.len() > world.rooms().len(),
        format!("{} entries for {} rooms", path.len(), world.rooms().len()),
    );

    let mut stepwise_adjacent = true;
    for pair in path.windows(2) {
        let (a, b) = (pair[0], pair[1]);
        if !world.rooms()[a].neighbors.contains(&b) && !world.rooms()[b].neighbors.contains(&a) {
            stepwise_adjacent = false;
        }
    }
    check(
        &mut results,
        "path_walks_edges",
        stepwise_adjacent,
        "every step crosses a shared wall".to_string(),
    );

    let cycle = path.len() - 1;
    let at_three = world.follow_dfs_pet(0, 3).unwrap();
    let wrapped = world.follow_dfs_pet(0, 3 + cycle).unwrap();
    check(
        &mut results,
        "tour_is_cyclic",
        at_three == wrapped,
        format!("step 3 and step {} both land in room {}", 3 + cycle, wrapped),
    );

    let restarted = world.follow_dfs_pet(15, 0).unwrap();
    let ballroom_path = traversal::dfs_path(world.rooms(), 15);
    check(
        &mut results,
        "tour_restarts_from_new_anchor",
        restarted == ballroom_path[1],
        format!("first hop from the Ballroom is room {}", restarted),
    );

    results
}

// ── 6. Target tour ──────────────────────────────────────────────────────

fn validate_target_tour(_verbose: bool) -> Vec<TestResult> {
    println!("--- Target Tour ---");
    let mut results = Vec::new();
    let mut world = match load_mansion() {
        Ok(w) => w,
        Err(_) => return results,
    };

    let mut in_order = true;
    for expected in 1..world.rooms().len() {
        if world.move_target() != expected {
            in_order = false;
        }
    }
    let back_home = world.move_target();
    check(
        &mut results,
        "tour_visits_in_declaration_order",
        in_order,
        "rooms 1..19 in sequence".to_string(),
    );
    check(
        &mut results,
        "tour_wraps_to_room_zero",
        back_home == 0,
        format!("back in room {}", back_home),
    );

    results
}

// ── 7. Computer policy ──────────────────────────────────────────────────

fn validate_policy(_verbose: bool) -> Vec<TestResult> {
    println!("--- Computer Policy ---");
    let mut results = Vec::new();
    let mut world = match load_mansion() {
        Ok(w) => w,
        Err(_) => return results,
    };
    let mut rng = StdRng::seed_from_u64(1870);

    world.add_player("Ada", 0, Control::Computer, 3, 0).unwrap();

    // masked and co-located with an empty bag: always a poke
    let action = policy::decide(&world, 0, &mut rng).unwrap();
    check(
        &mut results,
        "eligible_empty_bag_pokes",
        action == Action::Poke,
        format!("chose {}", action.as_str()),
    );

    // with an item in the bag: always an attack
    world.pick_item(0, 0).unwrap();
    let action = policy::decide(&world, 0, &mut rng).unwrap();
    check(
        &mut results,
        "eligible_with_item_attacks",
        action == Action::Attack,
        format!("chose {}", action.as_str()),
    );

    // target elsewhere: never an attack, and no picks in an empty room
    world.move_target();
    let mut clean = true;
    for _ in 0..100 {
        match policy::decide(&world, 0, &mut rng).unwrap() {
            Action::Attack | Action::Poke => clean = false,
            Action::Pick => clean = false, // Foyer is empty now
            Action::Look | Action::Move => {}
        }
    }
    check(
        &mut results,
        "fallback_respects_empty_room",
        clean,
        "100 draws stayed in {look, move}".to_string(),
    );

    let dest = policy::random_destination(&world, 0, &mut rng).unwrap();
    check(
        &mut results,
        "move_destination_is_neighbor",
        matches!(dest, Some(d) if world.neighbors_of(0).unwrap().contains(&d)),
        format!("destination {:?}", dest),
    );

    results
}

// ── 8. Full game ────────────────────────────────────────────────────────

fn validate_full_game(verbose: bool) -> Vec<TestResult> {
    println!("--- Full Game ---");
    let mut results = Vec::new();
    let mut world = match load_mansion() {
        Ok(w) => w,
        Err(_) => return results,
    };
    let mut rng = StdRng::seed_from_u64(417);

    world.add_player("Ada", 0, Control::Computer, 3, 0).unwrap();
    world.add_player("Hal", 1, Control::Computer, 3, 8).unwrap();

    let mut pet_step = 0usize;
    let mut turns_played = 0u32;
    let mut attacks_landed = 0u32;

    while !world.is_game_over() {
        let player_id = world.current_player(world.turn()).unwrap().id;
        let action = policy::decide(&world, player_id, &mut rng).unwrap();
        if verbose {
            println!(
                "  turn {:2}: player {} -> {}",
                world.turn(),
                player_id,
                action.as_str()
            );
        }
        match action {
            Action::Attack => {
                if world.attack_with_item(player_id, 0).unwrap().landed() {
                    attacks_landed += 1;
                }
            }
            Action::Poke => {
                if world.poke_target(player_id).unwrap().landed() {
                    attacks_landed += 1;
                }
            }
            Action::Look => {
                world.look_around(player_id).unwrap();
            }
            Action::Move => {
                if let Some(dest) = policy::random_destination(&world, player_id, &mut rng).unwrap()
                {
                    world.move_player(player_id, dest).unwrap();
                }
            }
            Action::Pick => {
                // a full bag is a wasted turn, not a failure
                match world.pick_item(player_id, 0) {
                    Ok(()) | Err(WorldError::Rule(_)) => {}
                    Err(e) => panic!("unexpected pick error: {}", e),
                }
            }
        }
        world.move_target();
        world.follow_dfs_pet(0, pet_step).unwrap();
        pet_step += 1;
        world.advance_turn();
        turns_played += 1;
    }

    check(
        &mut results,
        "game_terminates",
        turns_played <= MAX_TURN,
        format!(
            "{} turns, target at {} hp, {} blows landed",
            turns_played,
            world.target_health(),
            attacks_landed
        ),
    );
    check(
        &mut results,
        "game_over_condition_holds",
        world.target_health() <= 0 || world.turn() > world.max_turn(),
        format!(
            "turn {} of {}, target {} hp",
            world.turn(),
            world.max_turn(),
            world.target_health()
        ),
    );

    results
}
