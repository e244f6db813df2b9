pub mod growing;
