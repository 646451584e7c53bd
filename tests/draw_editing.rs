//! Integration tests for manual group edits and team assembly.

use dart_draw_web::{
    assemble, generate_teams, partition, shuffle_with_rng, swap, DrawError, Group, GroupRole,
    Groups, Player, ScoreKey, Strategy, Team,
};
use rand::rngs::StdRng;
use rand::SeedableRng;

fn roster(n: usize) -> Vec<Player> {
    (0..n)
        .map(|i| Player::new(format!("P{i} Last"), 10.0 + i as f64, 2.0))
        .collect()
}

fn sorted_names(groups: &Groups) -> Vec<String> {
    let mut all: Vec<String> = groups.all_players().map(|p| p.name.clone()).collect();
    all.sort();
    all
}

fn sizes(groups: &Groups) -> Vec<usize> {
    groups.groups.iter().map(Group::len).collect()
}

#[test]
fn swap_across_groups_keeps_sizes_and_players() {
    let mut groups = partition(&roster(7), Strategy::AbDraw, ScoreKey::Ppd);
    let before_names = sorted_names(&groups);
    let before_sizes = sizes(&groups);
    let a0 = groups.get(GroupRole::A).unwrap().slots[0].clone();
    let b2 = groups.get(GroupRole::B).unwrap().slots[2].clone();

    swap(&mut groups, GroupRole::A, 0, GroupRole::B, 2).unwrap();

    assert_eq!(groups.get(GroupRole::A).unwrap().slots[0], b2);
    assert_eq!(groups.get(GroupRole::B).unwrap().slots[2], a0);
    assert_eq!(sorted_names(&groups), before_names);
    assert_eq!(sizes(&groups), before_sizes);
}

#[test]
fn swap_within_one_group() {
    let mut groups = partition(&roster(4), Strategy::AbDraw, ScoreKey::Ppd);
    swap(&mut groups, GroupRole::A, 0, GroupRole::A, 1).unwrap();
    let a: Vec<_> = groups.get(GroupRole::A).unwrap().players().map(|p| p.name.as_str()).collect();
    assert_eq!(a, vec!["P2 Last", "P3 Last"]);
}

#[test]
fn swap_into_empty_slot_moves_player() {
    let mut groups = partition(&roster(4), Strategy::LowPlayerPick, ScoreKey::Ppd);
    swap(&mut groups, GroupRole::Available, 1, GroupRole::A, 0).unwrap();
    let a = groups.get(GroupRole::A).unwrap();
    assert_eq!(a.slots[0].as_ref().map(|p| p.name.as_str()), Some("P2 Last"));
    assert_eq!(a.slots[1], None);
    assert_eq!(groups.get(GroupRole::Available).unwrap().slots[1], None);
    assert_eq!(groups.unassigned(), 1);
}

#[test]
fn swap_rejects_bad_slots_without_changes() {
    let mut groups = partition(&roster(4), Strategy::AbDraw, ScoreKey::Ppd);
    let before = groups.clone();
    assert_eq!(
        swap(&mut groups, GroupRole::A, 5, GroupRole::B, 0),
        Err(DrawError::SlotOutOfRange { role: GroupRole::A, index: 5, len: 2 })
    );
    assert_eq!(
        swap(&mut groups, GroupRole::A, 0, GroupRole::C, 0),
        Err(DrawError::UnknownGroup(GroupRole::C))
    );
    assert_eq!(groups, before);
}

#[test]
fn shuffle_keeps_membership_of_the_group() {
    let mut groups = partition(&roster(12), Strategy::AbDraw, ScoreKey::Ppd);
    let a_names = |g: &Groups| -> Vec<String> {
        g.get(GroupRole::A).unwrap().players().map(|p| p.name.clone()).collect()
    };
    let mut before = a_names(&groups);
    let b_before = groups.get(GroupRole::B).unwrap().clone();

    shuffle_with_rng(&mut groups, GroupRole::A, &mut StdRng::seed_from_u64(3)).unwrap();

    let mut after = a_names(&groups);
    before.sort();
    after.sort();
    assert_eq!(before, after);
    assert_eq!(groups.get(GroupRole::B).unwrap(), &b_before);
}

#[test]
fn assemble_worked_example() {
    let players = vec![
        Player::new("Pat One", 3.0, 5.0),
        Player::new("Quinn Two", 2.0, 4.0),
        Player::new("Rae Three", 1.0, 3.0),
        Player::new("Sam Four", 4.0, 6.0),
    ];
    let groups = partition(&players, Strategy::AbDraw, ScoreKey::Combo);
    let teams = assemble(&groups);
    assert_eq!(
        teams,
        vec![
            Team {
                name: "Sam and Quinn".to_string(),
                players: vec!["Sam Four".to_string(), "Quinn Two".to_string()],
            },
            Team {
                name: "Pat and Rae".to_string(),
                players: vec!["Pat One".to_string(), "Rae Three".to_string()],
            },
        ]
    );
    assert_eq!(assemble(&groups), teams);
}

#[test]
fn odd_roster_leaves_a_solo_team() {
    let groups = partition(&roster(5), Strategy::AbDraw, ScoreKey::Ppd);
    let teams = generate_teams(&groups, Strategy::AbDraw).unwrap();
    assert_eq!(teams.len(), 3);
    assert_eq!(teams[2].players, vec!["P2 Last".to_string()]);
    assert_eq!(teams[2].name, "P2");
}

#[test]
fn trios_shorten_when_tiers_run_out() {
    let groups = partition(&roster(7), Strategy::AbcTrios, ScoreKey::Ppd);
    let teams = assemble(&groups);
    let lens: Vec<_> = teams.iter().map(Team::len).collect();
    assert_eq!(lens, vec![3, 2, 2]);
    assert_eq!(teams[0].name, "P6 and P3 and P0");
}

#[test]
fn teams_cover_every_player_once() {
    let strategies = [
        Strategy::AbDraw,
        Strategy::ParityDraw,
        Strategy::PartnerBring,
        Strategy::AbcTrios,
        Strategy::BlindDraw,
    ];
    for strategy in strategies {
        for n in 1..=11 {
            let groups = partition(&roster(n), strategy, ScoreKey::Combo);
            let teams = generate_teams(&groups, strategy).unwrap();
            let mut on_teams: Vec<String> = teams.iter().flat_map(|t| t.players.clone()).collect();
            on_teams.sort();
            assert_eq!(on_teams, sorted_names(&groups), "{:?} n={}", strategy, n);
        }
    }
}

#[test]
fn empty_slots_are_skipped() {
    let groups = Groups::new(vec![
        Group {
            role: GroupRole::A,
            slots: vec![None, Some(Player::new("Ann Lee", 20.0, 2.0)), None],
        },
        Group {
            role: GroupRole::B,
            slots: vec![Some(Player::new("Bo Park", 15.0, 1.5)), None, None],
        },
    ]);
    let teams = assemble(&groups);
    assert_eq!(teams.len(), 2);
    assert_eq!(teams[0].name, "Bo");
    assert_eq!(teams[1].name, "Ann");
}

#[test]
fn generate_teams_rejects_empty_draw() {
    let groups = partition(&[], Strategy::AbDraw, ScoreKey::Combo);
    assert_eq!(generate_teams(&groups, Strategy::AbDraw), Err(DrawError::NoPlayers));
}

#[test]
fn pick_draw_needs_all_picks_made() {
    let mut groups = partition(&roster(4), Strategy::LowPlayerPick, ScoreKey::Ppd);
    assert_eq!(
        generate_teams(&groups, Strategy::LowPlayerPick),
        Err(DrawError::EmptyGroup(GroupRole::A))
    );
    swap(&mut groups, GroupRole::Available, 0, GroupRole::A, 0).unwrap();
    assert_eq!(
        generate_teams(&groups, Strategy::LowPlayerPick),
        Err(DrawError::UnassignedPlayers(1))
    );
    swap(&mut groups, GroupRole::Available, 1, GroupRole::A, 1).unwrap();
    let teams = generate_teams(&groups, Strategy::LowPlayerPick).unwrap();
    assert_eq!(teams.len(), 2);
    // B was seeded weakest-first.
    assert_eq!(teams[0].players, vec!["P3 Last".to_string(), "P0 Last".to_string()]);
}

#[test]
fn single_player_pick_draw_has_no_partner_group() {
    let mut groups = partition(&roster(1), Strategy::LowPlayerPick, ScoreKey::Ppd);
    swap(&mut groups, GroupRole::Available, 0, GroupRole::A, 0).unwrap();
    assert_eq!(
        generate_teams(&groups, Strategy::LowPlayerPick),
        Err(DrawError::EmptyGroup(GroupRole::B))
    );
}
