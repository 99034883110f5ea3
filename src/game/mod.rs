// Gameplay: characters and the demo scene

pub mod characters;
pub mod scene;
