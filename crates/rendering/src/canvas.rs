//! The on-screen canvas: a dynamic texture on a full-window sprite.
//!
//! `TerrainScene` rasterizes into a one-byte-per-pixel `Canvas` each frame;
//! `draw_canvas` expands it to RGBA and swaps it into the sprite's image.

use bevy::image::ImageSampler;
use bevy::prelude::*;
use bevy::render::render_asset::RenderAssetUsages;
use bevy::render::render_resource::{Extent3d, TextureDimension, TextureFormat};

use terrain::raster::Canvas;
use terrain::renderer::FrameStats;
use terrain::scene::TerrainScene;

/// CPU-side pixels and the GPU image they are uploaded to.
#[derive(Resource)]
pub struct TerrainCanvas {
    pub image: Handle<Image>,
    pub canvas: Canvas,
    rgba: Vec<u8>,
}

impl TerrainCanvas {
    pub fn new(image: Handle<Image>, size: usize) -> Self {
        Self {
            image,
            canvas: Canvas::new(size),
            rgba: Vec::with_capacity(size * size * 4),
        }
    }
}

/// Statistics for the last drawn frame, read by the controls panel.
#[derive(Resource, Debug, Default, Clone, Copy)]
pub struct LastFrameStats(pub FrameStats);

/// Marker for the canvas sprite.
#[derive(Component)]
pub struct CanvasSprite;

/// A black square RGBA image sampled without filtering, so each texel maps
/// to exactly one window pixel.
pub fn create_canvas_image(size: usize) -> Image {
    let mut image = Image::new_fill(
        Extent3d {
            width: size as u32,
            height: size as u32,
            depth_or_array_layers: 1,
        },
        TextureDimension::D2,
        &[0, 0, 0, 255],
        TextureFormat::Rgba8UnormSrgb,
        RenderAssetUsages::RENDER_WORLD | RenderAssetUsages::MAIN_WORLD,
    );
    image.sampler = ImageSampler::nearest();
    image
}

pub fn setup_canvas(
    mut commands: Commands,
    mut images: ResMut<Assets<Image>>,
    scene: Option<Res<TerrainScene>>,
) {
    let size = scene
        .map(|s| s.canvas_size() as usize)
        .unwrap_or(terrain::config::CANVAS_PIXELS);
    let handle = images.add(create_canvas_image(size));

    commands.spawn(Camera2d);
    commands.spawn((Sprite::from_image(handle.clone()), CanvasSprite));
    commands.insert_resource(TerrainCanvas::new(handle, size));
}

/// Rasterize the scene and upload the result.
pub fn draw_canvas(
    scene: Option<Res<TerrainScene>>,
    target: Option<ResMut<TerrainCanvas>>,
    mut images: ResMut<Assets<Image>>,
    mut last_stats: ResMut<LastFrameStats>,
) {
    let (Some(scene), Some(mut target)) = (scene, target) else {
        return;
    };
    let target = &mut *target;
    last_stats.0 = scene.draw(&mut target.canvas);
    target.canvas.write_rgba(&mut target.rgba);

    let Some(image) = images.get_mut(&target.image) else {
        return;
    };
    if image.data.len() == target.rgba.len() {
        image.data.copy_from_slice(&target.rgba);
    } else {
        warn!(
            "Canvas image holds {} bytes, expected {}",
            image.data.len(),
            target.rgba.len()
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_canvas_image_is_black_and_opaque() {
        let image = create_canvas_image(4);
        assert_eq!(image.data.len(), 4 * 4 * 4);
        for px in image.data.chunks(4) {
            assert_eq!(px, &[0, 0, 0, 255]);
        }
        assert_eq!(image.width(), 4);
        assert_eq!(image.height(), 4);
    }

    #[test]
    fn test_terrain_canvas_matches_image_size() {
        let image = create_canvas_image(16);
        let canvas = TerrainCanvas::new(Handle::default(), 16);
        assert_eq!(canvas.canvas.size(), 16);
        assert_eq!(canvas.canvas.pixels().len() * 4, image.data.len());
    }
}
