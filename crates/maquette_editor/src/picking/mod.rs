//! Ray picking: screen coordinate to scene node.

mod camera;

pub use camera::{OrbitCamera, ViewCamera};

use glam::{Vec2, Vec3};
use maquette_math::{intersect, Aabb, Ray};
use maquette_scene::{Node, NodeId, Scene};

/// Half-extent of the stand-in box used for hit testing.
///
/// Exact mesh-precision picking belongs to the rendering backend; the
/// editing core approximates every node as a unit cube centered on its
/// world position.
const PICK_HALF_EXTENT: f32 = 0.5;

/// Maps 2D screen coordinates to rays and resolves the closest
/// intersected node in a scene.
///
/// Camera state comes in through [`ViewCamera`]; the manager itself only
/// knows the viewport size.
#[derive(Clone, Debug)]
pub struct PickingManager {
    screen_width: u32,
    screen_height: u32,
}

impl PickingManager {
    pub fn new(screen_width: u32, screen_height: u32) -> Self {
        Self {
            screen_width,
            screen_height,
        }
    }

    pub fn set_screen_size(&mut self, width: u32, height: u32) {
        self.screen_width = width;
        self.screen_height = height;
    }

    pub fn screen_size(&self) -> (u32, u32) {
        (self.screen_width, self.screen_height)
    }

    /// Build a pick ray through the given pixel.
    ///
    /// Pixels are normalized to NDC in `[-1, 1]` with the y axis
    /// flipped (screen y grows downward).
    pub fn screen_to_ray(&self, x: f32, y: f32, camera: &dyn ViewCamera) -> Ray {
        let width = self.screen_width.max(1) as f32;
        let height = self.screen_height.max(1) as f32;
        let ndc = Vec2::new((2.0 * x) / width - 1.0, 1.0 - (2.0 * y) / height);
        camera.viewport_ray(ndc)
    }

    /// Project a world position to pixel coordinates; `None` when the
    /// point is behind the camera.
    pub fn world_to_screen(&self, world: Vec3, camera: &dyn ViewCamera) -> Option<Vec2> {
        let ndc = camera.project(world)?;
        let width = self.screen_width.max(1) as f32;
        let height = self.screen_height.max(1) as f32;
        Some(Vec2::new(
            (ndc.x + 1.0) * 0.5 * width,
            (1.0 - ndc.y) * 0.5 * height,
        ))
    }

    /// Pick the closest node under the given pixel, or `None` on a
    /// miss.
    pub fn pick(
        &self,
        scene: &Scene,
        camera: &dyn ViewCamera,
        x: f32,
        y: f32,
    ) -> Option<NodeId> {
        let ray = self.screen_to_ray(x, y, camera);
        self.pick_with_ray(scene, &ray)
    }

    /// Pick the closest node hit by a world-space ray.
    ///
    /// Visits the whole tree pre-order; a node wins only when its hit
    /// distance is strictly less than the best found so far, so the
    /// first node in traversal order wins ties. The root itself is not
    /// a pick candidate; it anchors the tree and has no renderable
    /// presence. Distances come from world positions, so matrices
    /// should be current (`Scene::update`) before picking.
    pub fn pick_with_ray(&self, scene: &Scene, ray: &Ray) -> Option<NodeId> {
        let root = scene.root();
        let mut closest_distance = f32::INFINITY;
        let mut picked = None;

        scene.traverse(|id, node| {
            if id == root {
                return;
            }
            if let Some(distance) = Self::intersect_node(node, ray) {
                if distance < closest_distance {
                    closest_distance = distance;
                    picked = Some(id);
                }
            }
        });

        if let Some(id) = picked {
            log::debug!("picked node {:?} at distance {}", id, closest_distance);
        }
        picked
    }

    /// Slab intersection against the node's stand-in box.
    fn intersect_node(node: &Node, ray: &Ray) -> Option<f32> {
        let aabb = Aabb::from_center_half_extents(
            node.world_position(),
            Vec3::splat(PICK_HALF_EXTENT),
        );
        intersect::ray_aabb(ray, &aabb)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use maquette_scene::Node;

    fn scene_with(positions: &[(&str, Vec3)]) -> Scene {
        let mut scene = Scene::new("Test");
        for (name, position) in positions {
            scene.add_node(Node::new(*name).with_position(*position));
        }
        scene.update();
        scene
    }

    #[test]
    fn test_pick_closest_of_two() {
        let scene = scene_with(&[
            ("Near", Vec3::new(0.0, 0.0, 2.0)),
            ("Far", Vec3::new(0.0, 0.0, 5.0)),
        ]);
        let picking = PickingManager::new(1280, 720);

        // Ray from in front of both, marching through them in +z order.
        let ray = Ray::new(Vec3::new(0.0, 0.0, 0.0), Vec3::Z);
        let picked = picking.pick_with_ray(&scene, &ray).unwrap();
        assert_eq!(scene.node(picked).unwrap().name(), "Near");
    }

    #[test]
    fn test_pick_miss_returns_none() {
        let scene = scene_with(&[("Lonely", Vec3::new(10.0, 0.0, 0.0))]);
        let picking = PickingManager::new(1280, 720);
        let ray = Ray::new(Vec3::new(0.0, 0.0, 5.0), Vec3::Z);
        assert!(picking.pick_with_ray(&scene, &ray).is_none());
    }

    #[test]
    fn test_pick_tie_prefers_traversal_order() {
        // Two nodes at the same position: the earlier sibling wins.
        let scene = scene_with(&[
            ("FirstTwin", Vec3::new(0.0, 0.0, 3.0)),
            ("SecondTwin", Vec3::new(0.0, 0.0, 3.0)),
        ]);
        let picking = PickingManager::new(1280, 720);
        let ray = Ray::new(Vec3::ZERO, Vec3::Z);
        let picked = picking.pick_with_ray(&scene, &ray).unwrap();
        assert_eq!(scene.node(picked).unwrap().name(), "FirstTwin");
    }

    #[test]
    fn test_pick_uses_world_position() {
        let mut scene = Scene::new("Test");
        let parent = scene.add_node(Node::new("Parent").with_position(Vec3::new(0.0, 0.0, 4.0)));
        let child = scene
            .add_child(parent, Node::new("Child").with_position(Vec3::new(2.0, 0.0, 0.0)))
            .unwrap();
        scene.update();

        let picking = PickingManager::new(1280, 720);
        // Aimed at the child's world position (2, 0, 4), not its local one.
        let ray = Ray::new(Vec3::new(2.0, 0.0, 0.0), Vec3::Z);
        assert_eq!(picking.pick_with_ray(&scene, &ray), Some(child));
    }

    #[test]
    fn test_pick_through_screen_coordinates() {
        let scene = scene_with(&[("Target", Vec3::ZERO)]);
        let picking = PickingManager::new(1280, 720);
        let camera = OrbitCamera::looking_at(Vec3::ZERO, 5.0);

        // Center of the screen looks straight at the focus.
        let picked = picking.pick(&scene, &camera, 640.0, 360.0).unwrap();
        assert_eq!(scene.node(picked).unwrap().name(), "Target");

        // A corner ray misses the unit box at the origin.
        assert!(picking.pick(&scene, &camera, 0.0, 0.0).is_none());
    }

    #[test]
    fn test_world_to_screen_round_trip() {
        let picking = PickingManager::new(800, 600);
        let camera = OrbitCamera::looking_at(Vec3::ZERO, 5.0);
        let screen = picking.world_to_screen(Vec3::ZERO, &camera).unwrap();
        assert!((screen - Vec2::new(400.0, 300.0)).length() < 1e-2);
    }
}
