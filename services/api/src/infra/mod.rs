pub mod db;
pub mod password;
pub mod seed_file;
