use glam::Vec3;
use serde::Deserialize;
use std::collections::HashSet;
use std::fs;
use std::path::Path;

use mv_core::actor::Actor;

#[derive(Debug, Deserialize, Clone)]
pub struct SceneFile {
    pub version: String,
    pub scene_id: String,
    pub terrain: TerrainDecl,
    #[serde(default)]
    pub camera: Option<CameraDecl>,
    pub actors: Vec<ActorDecl>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct TerrainDecl {
    pub model: String,
    #[serde(default = "default_terrain_scale")]
    pub scale: f32,
}

#[derive(Debug, Deserialize, Clone)]
pub struct CameraDecl {
    pub position: [f32; 3],
    pub target: [f32; 3],
}

#[derive(Debug, Deserialize, Clone)]
pub struct ActorDecl {
    pub id: String,
    pub model: String,
    pub position: [f32; 3],
    #[serde(default = "default_scale")]
    pub scale: f32,
    #[serde(default = "default_jump_height")]
    pub max_jump_height: f32,
    #[serde(default)]
    pub flight: Option<FlightDecl>,
}

#[derive(Debug, Deserialize, Clone, Copy)]
pub struct FlightDecl {
    pub pattern: FlightPatternDecl,
    pub radius: f32,
    pub height: f32,
    pub angular_speed: f32,
}

#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum FlightPatternDecl {
    Circular,
    FigureEight,
}

pub fn load_scene_from_path(scene_path: &Path) -> Result<SceneFile, String> {
    let raw = fs::read_to_string(scene_path)
        .map_err(|e| format!("Failed to read scene file {}: {e}", scene_path.display()))?;
    let scene: SceneFile = serde_json::from_str(&raw)
        .map_err(|e| format!("Failed to parse scene JSON {}: {e}", scene_path.display()))?;
    validate_scene(&scene)?;
    Ok(scene)
}

fn validate_scene(scene: &SceneFile) -> Result<(), String> {
    // Validation is intentionally strict so the per-frame loop can assume
    // every value is already in range.
    if scene.actors.is_empty() {
        return Err("Scene validation failed: actors array is empty".to_string());
    }
    if scene.terrain.scale <= 0.0 {
        return Err(format!(
            "Scene validation failed: terrain scale {} must be positive",
            scene.terrain.scale
        ));
    }

    let mut actor_ids = HashSet::new();
    for actor in &scene.actors {
        if !actor_ids.insert(actor.id.clone()) {
            return Err(format!(
                "Scene validation failed: duplicate actor id '{}'",
                actor.id
            ));
        }
        if actor.scale <= 0.0 {
            return Err(format!(
                "Scene validation failed: actor '{}' scale {} must be positive",
                actor.id, actor.scale
            ));
        }
        if actor.max_jump_height < 0.0 {
            return Err(format!(
                "Scene validation failed: actor '{}' max_jump_height {} must not be negative",
                actor.id, actor.max_jump_height
            ));
        }
        if let Some(flight) = &actor.flight {
            if flight.radius < 0.0 {
                return Err(format!(
                    "Scene validation failed: actor '{}' flight radius {} must not be negative",
                    actor.id, flight.radius
                ));
            }
            if flight.radius == 0.0 {
                log::warn!(
                    "Actor '{}' declares zero-radius flight; it will hover in place",
                    actor.id
                );
            }
        }
    }

    Ok(())
}

/// Instantiate the runtime actor for a manifest entry, arming the declared
/// flight pattern.
pub fn build_actor(decl: &ActorDecl) -> Actor {
    let mut actor = Actor::new(
        decl.id.clone(),
        decl.model.clone(),
        Vec3::from_array(decl.position),
        decl.scale,
        decl.max_jump_height,
    );
    if let Some(flight) = &decl.flight {
        match flight.pattern {
            FlightPatternDecl::Circular => {
                actor.set_circular_flight(flight.radius, flight.height, flight.angular_speed)
            }
            FlightPatternDecl::FigureEight => {
                actor.set_figure_eight_flight(flight.radius, flight.height, flight.angular_speed)
            }
        }
    }
    actor
}

const fn default_terrain_scale() -> f32 {
    0.03
}

const fn default_scale() -> f32 {
    1.0
}

const fn default_jump_height() -> f32 {
    3.0
}
