pub mod login;
pub mod pages;
