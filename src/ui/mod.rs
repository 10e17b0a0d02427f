mod renderer;
mod state;
pub mod theme;

pub use renderer::render;
pub use state::AppState;
#[cfg(test)]
pub use state::BlockKind;
pub use theme::Theme;
