// Task-Modul: Enthält alle Embassy Tasks
//
// Der Board-Task besitzt LED, Bus und Tick-Registry und
// verteilt den periodischen System-Tick.

pub mod board;

// Re-export Tasks für einfachen Import
pub use board::board_task;
