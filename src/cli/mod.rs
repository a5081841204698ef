pub mod prices;
pub mod ui;
