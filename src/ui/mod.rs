pub mod panels;
pub mod table;
