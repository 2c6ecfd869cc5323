pub mod encoding;
pub mod html;


pub use html::Document;
