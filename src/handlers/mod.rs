pub mod draw;

pub use draw::draw_config;
