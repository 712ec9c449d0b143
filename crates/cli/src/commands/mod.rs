pub mod decode;
pub mod encode;
pub mod layout;
pub mod size;
