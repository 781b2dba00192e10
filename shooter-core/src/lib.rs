pub mod capture;
pub mod constants;
pub mod grid;
pub mod hint;
pub mod render;
pub mod rng;
pub mod sim;

pub use capture::{capture, CapturedFrame};
pub use grid::{Bubble, BubbleColor};
pub use hint::{HintDebug, HintRequest, HintResult, StrategicHint, TargetSummary};
pub use sim::{Game, Vec2, WorldSnapshot};
