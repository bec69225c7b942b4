/// Core scoreboard commands issued by UI layers.
pub mod board_service;
/// Confirmation prompt seam used by destructive commands.
pub mod confirm;
/// Best-effort roster persistence glue.
pub mod persistence;
