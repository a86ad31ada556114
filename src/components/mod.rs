pub mod match_detail;
pub mod match_row;
pub mod theme;
