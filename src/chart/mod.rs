// Chart core - pure layout from samples to a renderer-agnostic scene
pub mod axis;
pub mod bar;
pub mod format;
pub mod gauge;
pub mod legend;
pub mod line;
pub mod path;
pub mod scale;
pub mod scene;
pub mod theme;
