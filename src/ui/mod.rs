pub mod guide;
pub mod panels;
pub mod plot;
pub mod steps;
pub mod table;
