pub mod department;
pub mod personnel;
pub mod visit;
