//! Roster input: CSV import of rated players.

use crate::models::{validate_player, Player, TournamentError};
use serde::Deserialize;
use std::io::Read;

#[derive(Debug, Deserialize)]
struct RosterRow {
    name: String,
    ppd: f64,
    mpr: f64,
    #[serde(default)]
    paid: Option<bool>,
}

/// Read players from CSV with a `name,ppd,mpr[,paid]` header.
///
/// Every row is validated like a manual entry; the first bad row or a repeated
/// name (case-insensitive) rejects the whole file.
pub fn import_csv<R: Read>(reader: R) -> Result<Vec<Player>, TournamentError> {
    let mut rdr = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);
    let mut players: Vec<Player> = Vec::new();
    for (line, row) in rdr.deserialize::<RosterRow>().enumerate() {
        let row =
            row.map_err(|e| TournamentError::RosterImport(format!("row {}: {}", line + 1, e)))?;
        let mut player = Player::new(row.name, row.ppd, row.mpr);
        player.paid = row.paid.unwrap_or(false);
        let player = validate_player(player)?;
        if players.iter().any(|p| p.name.eq_ignore_ascii_case(&player.name)) {
            return Err(TournamentError::DuplicatePlayerName);
        }
        players.push(player);
    }
    log::info!("Imported {} player(s) from CSV", players.len());
    Ok(players)
}
