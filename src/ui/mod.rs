mod app;
mod composer;
mod sign_in;
pub mod theme;
mod widgets;

pub use app::render;
pub(crate) use composer::reply_scroll_limit;
