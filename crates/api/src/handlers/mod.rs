pub mod books;
pub mod health;
pub mod orders;
pub mod root;
pub mod users;
