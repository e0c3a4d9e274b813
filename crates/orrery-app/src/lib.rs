//! Orrery application framework: the scene state and the fixed-timestep loop
//! that drives it.

pub mod game_loop;
pub mod scene;

pub use game_loop::{FIXED_DT, GameLoop, MAX_FRAME_TIME};
pub use scene::{FrameSnapshot, SceneError, SceneState};
