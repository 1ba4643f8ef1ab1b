pub mod commit;
pub mod completed;
pub mod score;
