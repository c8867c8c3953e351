pub mod scene;
pub mod text;

pub use scene::{compose, SceneRenderer, SyntheticImage};
pub use text::FontRegistry;
