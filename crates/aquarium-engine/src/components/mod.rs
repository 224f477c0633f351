pub mod creature;
pub mod descriptor;
pub mod species;
