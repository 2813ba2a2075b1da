//! Camera for viewing the Sun, both orbits and the exploratory ellipse.
//!
//! One orthographic 2D camera centred on the Sun. The scroll wheel zooms.

use bevy::{camera::ScalingMode, input::mouse::AccumulatedMouseScroll, prelude::*};

/// Minimum zoom level (closest).
pub const MIN_ZOOM: f32 = 0.25;

/// Maximum zoom level (furthest).
pub const MAX_ZOOM: f32 = 4.0;

pub const DEFAULT_ZOOM: f32 = 1.0;

/// Visible height in model units at zoom 1.0: Mars's aphelion on both sides plus margin.
pub const VIEWPORT_HEIGHT: f32 = 760.0;

/// Zoom speed multiplier for scroll wheel.
pub const ZOOM_SPEED: f32 = 0.1;

/// Marker component for the main camera.
#[derive(Component)]
pub struct MainCamera;

/// Plugin providing camera functionality.
pub struct CameraPlugin;

impl Plugin for CameraPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, setup_camera)
            .add_systems(Update, camera_zoom);
    }
}

fn setup_camera(mut commands: Commands) {
    commands.spawn((
        Camera2d,
        Projection::Orthographic(OrthographicProjection {
            scaling_mode: ScalingMode::FixedVertical {
                viewport_height: VIEWPORT_HEIGHT,
            },
            scale: DEFAULT_ZOOM,
            ..OrthographicProjection::default_2d()
        }),
        MainCamera,
    ));
}

/// Handle mouse scroll wheel for zoom.
fn camera_zoom(
    mouse_scroll: Res<AccumulatedMouseScroll>,
    mut camera_query: Query<&mut Projection, With<MainCamera>>,
) {
    if mouse_scroll.delta.y == 0.0 {
        return;
    }

    let Ok(mut projection) = camera_query.single_mut() else {
        return;
    };

    let Projection::Orthographic(ref mut ortho) = *projection else {
        return;
    };

    // Logarithmic zoom: multiply scale by factor based on scroll direction
    let zoom_factor = 1.0 - mouse_scroll.delta.y * ZOOM_SPEED;
    ortho.scale = (ortho.scale * zoom_factor).clamp(MIN_ZOOM, MAX_ZOOM);
}
