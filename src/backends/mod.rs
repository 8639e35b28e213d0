pub mod disk;
pub mod firewall;
pub mod network;
pub mod process;
pub mod resources;
pub mod users;
