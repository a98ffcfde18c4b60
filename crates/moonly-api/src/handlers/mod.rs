pub mod access;
pub mod deletions;
pub mod domains;
pub mod health;
pub mod serving_url;
pub mod uploads;
