pub mod ids;
pub mod playlist;
pub mod representation;
pub mod track;
pub mod user;
