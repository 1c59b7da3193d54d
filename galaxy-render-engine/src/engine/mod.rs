pub mod assets;
pub mod camera;
pub mod core;
pub mod galaxy;
pub mod loading;
pub mod mesh;
pub mod scene;
pub mod systems;
