//! Integration tests for roster entry, CSV import and tournament settings.

use dart_draw_web::{import_csv, FeeSettings, Money, Player, Strategy, Tournament, TournamentError};

#[test]
fn add_player_validates_manual_entry() {
    let mut t = Tournament::new("Thursday");
    assert!(matches!(
        t.add_player(Player::new("  ", 20.0, 2.0)),
        Err(TournamentError::InvalidPlayer(_))
    ));
    assert!(matches!(
        t.add_player(Player::new("Zero Ppd", 0.0, 2.0)),
        Err(TournamentError::InvalidPlayer(_))
    ));
    assert!(matches!(
        t.add_player(Player::new("Bad Mpr", 20.0, f64::NAN)),
        Err(TournamentError::InvalidPlayer(_))
    ));
    assert!(t.players.is_empty());

    t.add_player(Player::new("  Ann Lee ", 20.0, 2.0)).unwrap();
    assert_eq!(t.players[0].name, "Ann Lee");
    assert_eq!(
        t.add_player(Player::new("ann lee", 18.0, 1.9)),
        Err(TournamentError::DuplicatePlayerName)
    );
    assert_eq!(t.players.len(), 1);
}

#[test]
fn add_players_is_all_or_nothing() {
    let mut t = Tournament::new("Thursday");
    let batch = vec![
        Player::new("Ann Lee", 20.0, 2.0),
        Player::new("Bo Park", -1.0, 2.0),
    ];
    assert!(t.add_players(batch).is_err());
    assert!(t.players.is_empty());
}

#[test]
fn completed_tournament_is_read_only() {
    let mut t = Tournament::with_players("Final", vec![Player::new("Ann Lee", 20.0, 2.0)]);
    t.complete();
    assert_eq!(
        t.add_player(Player::new("Bo Park", 18.0, 1.5)),
        Err(TournamentError::Completed)
    );
    assert_eq!(t.remove_player("Ann Lee"), Err(TournamentError::Completed));
    assert_eq!(t.players.len(), 1);
}

#[test]
fn remove_and_mark_paid() {
    let mut t = Tournament::new("Thursday");
    t.add_player(Player::new("Ann Lee", 20.0, 2.0)).unwrap();
    t.add_player(Player::new("Bo Park", 18.0, 1.5)).unwrap();
    t.set_paid("Bo Park", true).unwrap();
    assert_eq!(t.paid_count(), 1);
    t.remove_player("Ann Lee").unwrap();
    assert_eq!(
        t.remove_player("Ann Lee"),
        Err(TournamentError::PlayerNotFound("Ann Lee".to_string()))
    );
    assert_eq!(t.players.len(), 1);
}

#[test]
fn paid_flag_can_be_cleared() {
    let mut t = Tournament::new("Thursday");
    t.add_player(Player::new("Ann Lee", 20.0, 2.0)).unwrap();
    t.set_paid("Ann Lee", true).unwrap();
    assert_eq!(t.paid_count(), 1);
    t.set_paid("Ann Lee", false).unwrap();
    assert_eq!(t.paid_count(), 0);
    assert_eq!(
        t.set_paid("Nobody", false),
        Err(TournamentError::PlayerNotFound("Nobody".to_string()))
    );
}

#[test]
fn settings_validation() {
    let mut t = Tournament::new("Thursday");
    let fees = FeeSettings {
        entry_fee: Money::from_dollars(10),
        ..FeeSettings::default()
    };
    assert!(matches!(
        t.update_settings(fees, 0, Strategy::AbDraw),
        Err(TournamentError::InvalidSettings(_))
    ));
    let negative = FeeSettings {
        usage_fee: Money::from_dollars(-1),
        ..fees
    };
    assert!(matches!(
        t.update_settings(negative, 3, Strategy::AbDraw),
        Err(TournamentError::InvalidSettings(_))
    ));
    t.update_settings(fees, 5, Strategy::ParityDraw).unwrap();
    assert_eq!(t.payout_spots, 5);
    assert_eq!(t.strategy, Strategy::ParityDraw);
}

#[test]
fn prize_pool_includes_bar_and_bonus_minus_usage() {
    let fees = FeeSettings {
        entry_fee: Money::from_dollars(10),
        bar_contribution: Money::from_dollars(6),
        usage_fee: Money::from_dollars(1),
        bonus_money: Money::from_dollars(50),
    };
    assert_eq!(fees.prize_pool(20), Money::from_dollars(350));
    assert_eq!(fees.prize_pool(0), Money::from_dollars(50));
    assert_eq!(Money::from_cents(12345).to_string(), "$123.45");
}

#[test]
fn import_csv_reads_roster() {
    let data = "name,ppd,mpr,paid\nAnn Lee, 21.5, 2.4, true\nBo Park,18.0,2.0,\n";
    let players = import_csv(data.as_bytes()).unwrap();
    assert_eq!(players.len(), 2);
    assert_eq!(players[0].name, "Ann Lee");
    assert_eq!(players[0].ppd, 21.5);
    assert!(players[0].paid);
    assert!(!players[1].paid);
    assert_eq!(players[1].combo(), 38.0);
}

#[test]
fn import_csv_without_paid_column() {
    let data = "name,ppd,mpr\nAnn Lee,21.5,2.4\n";
    let players = import_csv(data.as_bytes()).unwrap();
    assert!(!players[0].paid);
}

#[test]
fn import_csv_rejects_bad_rows() {
    let bad_number = "name,ppd,mpr\nAnn Lee,fast,2.4\n";
    assert!(matches!(
        import_csv(bad_number.as_bytes()),
        Err(TournamentError::RosterImport(_))
    ));
    let zero = "name,ppd,mpr\nAnn Lee,0,2.4\n";
    assert!(matches!(
        import_csv(zero.as_bytes()),
        Err(TournamentError::InvalidPlayer(_))
    ));
    let dup = "name,ppd,mpr\nAnn Lee,20,2.4\nANN LEE,19,2.0\n";
    assert_eq!(
        import_csv(dup.as_bytes()),
        Err(TournamentError::DuplicatePlayerName)
    );
}
